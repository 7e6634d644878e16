//! The scene: an ordered list of things on screen.
//!
//! The game never draws pixels. It adds, removes and edits [`Visual`]s in a
//! [`Scene`]; the renderer draws whatever the scene holds, in insertion
//! order, so later entries end up on top.

use alloc::{
    string::String,
    vec::Vec,
};

use embedded_graphics::{
    mono_font::{
        MonoFont,
        ascii::{
            FONT_6X10,
            FONT_10X20,
        },
    },
    pixelcolor::Rgb565,
};

use crate::{
    config::{
        BALL_COLOR,
        PADDLE_COLOR,
        SCREEN_H,
        SCREEN_W,
    },
    entities::{
        Ball,
        Brick,
        Paddle,
    },
    geometry::Rect,
};

/// Handle to an object in a scene. Handed out in increasing order and never
/// reused; a 64-bit counter does not wrap within the life of the device.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ObjectId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Font {
    /// 6×10, score and prompts.
    Small,
    /// 10×20, title letters.
    Large,
}

impl Font {
    pub fn mono(self) -> &'static MonoFont<'static> {
        match self {
            Self::Small => &FONT_6X10,
            Self::Large => &FONT_10X20,
        }
    }

    /// Horizontal advance per character.
    pub fn advance(self) -> i32 {
        let font = self.mono();
        (font.character_size.width + font.character_spacing) as i32
    }

    pub fn line_height(self) -> i32 {
        self.mono().character_size.height as i32
    }
}

/// Something the renderer knows how to draw.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Visual {
    Block {
        rect: Rect,
        color: Rgb565,
    },
    /// Text anchored at its top-left corner.
    Label {
        x: i32,
        y: i32,
        text: String,
        font: Font,
        color: Rgb565,
    },
}

impl Visual {
    pub fn label(x: i32, y: i32, text: impl Into<String>, font: Font, color: Rgb565) -> Self {
        Self::Label {
            x,
            y,
            text: text.into(),
            font,
            color,
        }
    }

    /// Label centred on the screen. Odd remainders floor.
    pub fn centered_label(text: &str, font: Font, color: Rgb565) -> Self {
        let (width, height) = text_size(text, font);
        let x = (SCREEN_W - width).div_euclid(2);
        let y = (SCREEN_H - height).div_euclid(2);
        Self::label(x, y, text, font, color)
    }

    /// Screen area this visual covers.
    pub fn bounds(&self) -> Rect {
        match self {
            Self::Block { rect, .. } => *rect,
            Self::Label {
                x, y, text, font, ..
            } => {
                let (width, height) = text_size(text, *font);
                // Empty text still gets a 1px box so damage checks stay valid.
                Rect::new(*x, *y, width.max(1), height)
            }
        }
    }
}

/// Pixel size of a single line of `text` in `font`.
pub fn text_size(text: &str, font: Font) -> (i32, i32) {
    let chars = i32::try_from(text.chars().count()).unwrap_or(i32::MAX);
    (chars.saturating_mul(font.advance()), font.line_height())
}

/// Scene handle the game writes into.
pub trait Scene {
    /// Append on top of everything already there.
    fn add(&mut self, visual: Visual) -> ObjectId;

    /// Returns whether the object was present.
    fn remove(&mut self, id: ObjectId) -> bool;

    fn contains(&self, id: ObjectId) -> bool;

    fn get_mut(&mut self, id: ObjectId) -> Option<&mut Visual>;

    fn clear(&mut self);

    /// Bottom-most first, which is also ascending id order.
    fn visuals(&self) -> impl Iterator<Item = (ObjectId, &Visual)>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Move or resize a block. No-op for labels and unknown ids.
    fn set_rect(&mut self, id: ObjectId, rect: Rect) {
        if let Some(Visual::Block { rect: r, .. }) = self.get_mut(id) {
            *r = rect;
        }
    }

    /// Replace a label's text. No-op for blocks and unknown ids.
    fn set_text(&mut self, id: ObjectId, text: &str) {
        if let Some(Visual::Label { text: t, .. }) = self.get_mut(id) {
            t.clear();
            t.push_str(text);
        }
    }
}

/// Gameplay objects that have a scene representation.
pub trait Sprite {
    fn visual(&self) -> Visual;
}

impl Sprite for Brick {
    fn visual(&self) -> Visual {
        Visual::Block {
            rect: self.rect,
            color: self.color,
        }
    }
}

impl Sprite for Paddle {
    fn visual(&self) -> Visual {
        Visual::Block {
            rect: self.rect,
            color: PADDLE_COLOR,
        }
    }
}

impl Sprite for Ball {
    fn visual(&self) -> Visual {
        Visual::Block {
            rect: self.rect,
            color: BALL_COLOR,
        }
    }
}

/// Vec-backed [`Scene`]. Ids increase with every `add`, so the list is
/// always sorted by id and lookups are binary searches.
#[derive(Debug, Default)]
pub struct DisplayList {
    items: Vec<(ObjectId, Visual)>,
    next_id: u64,
}

impl DisplayList {
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: 0,
        }
    }

    pub fn get(&self, id: ObjectId) -> Option<&Visual> {
        self.position(id).ok().map(|i| &self.items[i].1)
    }

    fn position(&self, id: ObjectId) -> Result<usize, usize> {
        self.items.binary_search_by_key(&id, |(item, _)| *item)
    }
}

impl Scene for DisplayList {
    fn add(&mut self, visual: Visual) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.items.push((id, visual));
        id
    }

    fn remove(&mut self, id: ObjectId) -> bool {
        match self.position(id) {
            Ok(i) => {
                self.items.remove(i);
                true
            }
            Err(_) => false,
        }
    }

    fn contains(&self, id: ObjectId) -> bool {
        self.position(id).is_ok()
    }

    fn get_mut(&mut self, id: ObjectId) -> Option<&mut Visual> {
        match self.position(id) {
            Ok(i) => Some(&mut self.items[i].1),
            Err(_) => None,
        }
    }

    fn clear(&mut self) {
        self.items.clear();
    }

    fn visuals(&self) -> impl Iterator<Item = (ObjectId, &Visual)> {
        self.items.iter().map(|(id, visual)| (*id, visual))
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}
