//! Draws a [`Scene`] onto any `embedded-graphics` target.
//!
//! The LCD is too slow for a full repaint every tick, so the renderer keeps
//! a copy of what it drew last time and only touches what changed. Each
//! damaged area (old bounds of removed or changed objects, new bounds of
//! added or changed ones) is erased and every object touching it is drawn
//! again in scene order, clipped to the area. Inside a damaged area the
//! panel ends up exactly as a full repaint would leave it.

use alloc::vec::Vec;

use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::{
        Rgb565,
        RgbColor,
    },
    prelude::*,
    primitives::{
        PrimitiveStyle,
        Rectangle,
    },
    text::{
        Baseline,
        Text,
    },
};

use crate::{
    geometry::{
        Rect,
        overlaps,
    },
    scene::{
        ObjectId,
        Scene,
        Visual,
    },
};

pub const BACKGROUND: Rgb565 = Rgb565::BLACK;

impl From<Rect> for Rectangle {
    fn from(rect: Rect) -> Self {
        Self::new(
            Point::new(rect.x, rect.y),
            Size::new(rect.width.unsigned_abs(), rect.height.unsigned_abs()),
        )
    }
}

#[derive(Debug, Default)]
pub struct Renderer {
    /// What is on the panel right now, sorted by id.
    drawn: Vec<(ObjectId, Visual)>,
    /// Areas to repaint this frame.
    damage: Vec<Rect>,
    /// Panel contents unknown; clear everything on the next frame.
    stale: bool,
}

impl Renderer {
    pub const fn new() -> Self {
        Self {
            drawn: Vec::new(),
            damage: Vec::new(),
            stale: true,
        }
    }

    /// Forget what is on the panel and repaint from scratch next frame.
    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    /// Bring the panel in line with `scene`.
    pub fn render<S, D>(&mut self, scene: &S, target: &mut D) -> Result<(), D::Error>
    where
        S: Scene,
        D: DrawTarget<Color = Rgb565>,
    {
        if self.stale {
            // Stays stale until the clear goes through.
            target.clear(BACKGROUND)?;
            self.drawn.clear();
            self.stale = false;
        }

        self.collect_damage(scene);

        let result = self.paint(scene, target);
        if result.is_err() {
            self.stale = true;
        }
        result?;

        self.drawn.clear();
        self.drawn
            .extend(scene.visuals().map(|(id, visual)| (id, visual.clone())));
        Ok(())
    }

    /// Diff the scene against `drawn`. Both are sorted by id, so one merge
    /// pass finds every added, changed and removed object.
    fn collect_damage<S: Scene>(&mut self, scene: &S) {
        self.damage.clear();
        let mut drawn = self.drawn.iter().peekable();
        for (id, visual) in scene.visuals() {
            while let Some((_, gone)) = drawn.next_if(|(old_id, _)| *old_id < id) {
                self.damage.push(gone.bounds());
            }
            match drawn.next_if(|(old_id, _)| *old_id == id) {
                Some((_, old)) if old == visual => {}
                Some((_, old)) => {
                    let (before, after) = (old.bounds(), visual.bounds());
                    self.damage.push(before);
                    if after != before {
                        self.damage.push(after);
                    }
                }
                None => self.damage.push(visual.bounds()),
            }
        }
        self.damage.extend(drawn.map(|(_, gone)| gone.bounds()));
    }

    fn paint<S, D>(&self, scene: &S, target: &mut D) -> Result<(), D::Error>
    where
        S: Scene,
        D: DrawTarget<Color = Rgb565>,
    {
        let erase = PrimitiveStyle::with_fill(BACKGROUND);
        for rect in &self.damage {
            let area = Rectangle::from(*rect);
            area.into_styled(erase).draw(target)?;

            let mut clipped = target.clipped(&area);
            for (_, visual) in scene.visuals() {
                if overlaps(*rect, visual.bounds()) {
                    draw_visual(visual, &mut clipped)?;
                }
            }
        }
        Ok(())
    }
}

fn draw_visual<D>(visual: &Visual, target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    match visual {
        Visual::Block { rect, color } => Rectangle::from(*rect)
            .into_styled(PrimitiveStyle::with_fill(*color))
            .draw(target),
        Visual::Label {
            x,
            y,
            text,
            font,
            color,
        } => {
            let style = MonoTextStyle::new(font.mono(), *color);
            Text::with_baseline(text, Point::new(*x, *y), style, Baseline::Top)
                .draw(target)
                .map(|_| ())
        }
    }
}
