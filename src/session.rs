//! One play-through: the brick wall, paddle, ball and score.

use alloc::{
    format,
    string::String,
    vec::Vec,
};

use crate::{
    config::{
        BALL_H,
        BALL_W,
        BRICK_COLS,
        BRICK_H,
        BRICK_ROWS,
        BRICK_TOP,
        BRICK_W,
        GameOptions,
        PADDLE_Y,
        SCORE_X,
        SCORE_Y,
        SCREEN_W,
        TEXT_COLOR,
        TOTAL_BRICKS,
    },
    entities::{
        Ball,
        Brick,
        Paddle,
    },
    geometry::overlaps,
    input::Intent,
    scene::{
        Font,
        ObjectId,
        Scene,
        Sprite,
        Visual,
    },
};

/// How a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Every brick destroyed.
    Cleared,
    /// The ball got past the paddle.
    Missed,
}

pub struct Session {
    options: GameOptions,
    bricks: Vec<(ObjectId, Brick)>,
    paddle: Paddle,
    paddle_id: Option<ObjectId>,
    ball: Ball,
    ball_id: Option<ObjectId>,
    score: usize,
    score_visible: bool,
    score_text: String,
    score_label: Option<ObjectId>,
}

impl Session {
    pub fn new(options: GameOptions) -> Self {
        Self {
            options,
            bricks: Vec::with_capacity(TOTAL_BRICKS),
            paddle: Self::fresh_paddle(options),
            paddle_id: None,
            ball: Self::fresh_ball(),
            ball_id: None,
            score: 0,
            score_visible: true,
            score_text: String::new(),
            score_label: None,
        }
    }

    fn fresh_paddle(options: GameOptions) -> Paddle {
        Paddle::new(options.paddle_start_x, PADDLE_Y)
    }

    fn fresh_ball() -> Ball {
        Ball::new((SCREEN_W - BALL_W) / 2, PADDLE_Y - BALL_H)
    }

    /// Lay out a fresh wall, paddle and ball and add them to `scene`.
    pub fn reset_arcade(&mut self, scene: &mut impl Scene) {
        for (id, _) in self.bricks.drain(..) {
            scene.remove(id);
        }
        for id in [self.paddle_id.take(), self.ball_id.take()].into_iter().flatten() {
            scene.remove(id);
        }

        for col in 0..BRICK_COLS {
            for row in 0..BRICK_ROWS {
                let brick = Brick::new(col as i32 * BRICK_W, BRICK_TOP + row as i32 * BRICK_H, row);
                self.bricks.push((scene.add(brick.visual()), brick));
            }
        }

        self.paddle = Self::fresh_paddle(self.options);
        self.paddle_id = Some(scene.add(self.paddle.visual()));
        self.ball = Self::fresh_ball();
        self.ball_id = Some(scene.add(self.ball.visual()));

        self.score = 0;
        self.score_visible = true;
        self.set_score_text(scene);
        debug!("arcade reset with {} bricks", self.bricks.len());
    }

    /// Advance one tick. Returns the outcome once the session is over.
    pub fn tick(&mut self, intent: Intent, scene: &mut impl Scene) -> Option<Outcome> {
        self.paddle.move_by(intent);

        // At most one brick per tick.
        if let Some(i) = self.bricks.iter().position(|(_, brick)| overlaps(self.ball.rect, brick.rect)) {
            let (id, _) = self.bricks.remove(i);
            scene.remove(id);
            self.score += 1;
            self.set_score_text(scene);
            debug!("brick hit, score {}", self.score);
        }

        self.ball.move_by();
        self.ball.bounce_off_paddle(&self.paddle);

        if let Some(id) = self.paddle_id {
            scene.set_rect(id, self.paddle.rect);
        }
        if let Some(id) = self.ball_id {
            scene.set_rect(id, self.ball.rect);
        }
        self.refresh(scene);

        if self.bricks.is_empty() {
            Some(Outcome::Cleared)
        } else if self.ball.missed_by(&self.paddle) {
            Some(Outcome::Missed)
        } else {
            None
        }
    }

    /// Put the score label back on top if it should be visible and isn't.
    pub fn refresh(&mut self, scene: &mut impl Scene) {
        if !self.score_visible {
            return;
        }
        if self.score_label.is_some_and(|id| scene.contains(id)) {
            return;
        }
        self.score_label = Some(scene.add(Visual::label(
            SCORE_X,
            SCORE_Y,
            self.score_text.as_str(),
            Font::Small,
            TEXT_COLOR,
        )));
    }

    fn set_score_text(&mut self, scene: &mut impl Scene) {
        self.score_text = format!("Score: {}", self.score);
        if let Some(id) = self.score_label {
            scene.set_text(id, &self.score_text);
        }
    }

    pub const fn score(&self) -> usize {
        self.score
    }

    pub const fn total_bricks(&self) -> usize {
        TOTAL_BRICKS
    }

    pub fn remaining_bricks(&self) -> usize {
        self.bricks.len()
    }

    pub fn bricks(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter().map(|(_, brick)| brick)
    }

    pub const fn paddle(&self) -> &Paddle {
        &self.paddle
    }

    pub const fn ball(&self) -> &Ball {
        &self.ball
    }

    pub const fn score_visible(&self) -> bool {
        self.score_visible
    }

    pub fn set_score_visible(&mut self, visible: bool) {
        self.score_visible = visible;
    }

    /// Flip the blink toggle and return the value it had before.
    pub fn toggle_score_visible(&mut self) -> bool {
        let was = self.score_visible;
        self.score_visible = !was;
        was
    }

    pub fn score_text(&self) -> &str {
        &self.score_text
    }

    #[cfg(test)]
    pub(crate) fn ball_mut(&mut self) -> &mut Ball {
        &mut self.ball
    }
}
