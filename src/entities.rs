//! Bricks, paddle and ball.
//!
//! Each entity is plain geometry plus its own motion state; turning one into
//! something drawable is the scene adapter's job (see [`crate::scene::Sprite`]).

use embedded_graphics::pixelcolor::Rgb565;

use crate::{
    config::{
        BALL_H,
        BALL_MIN_SPEED,
        BALL_W,
        BRICK_COLORS,
        BRICK_H,
        BRICK_W,
        PADDLE_H,
        PADDLE_SPEED,
        PADDLE_W,
        SCREEN_W,
    },
    geometry::Rect,
    input::Intent,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Brick {
    pub rect: Rect,
    pub color: Rgb565,
}

impl Brick {
    /// Brick at `(x, y)` coloured after its row, row 0 being the top.
    pub fn new(x: i32, y: i32, row: usize) -> Self {
        Self {
            rect: Rect::new(x, y, BRICK_W, BRICK_H),
            color: BRICK_COLORS[row % BRICK_COLORS.len()],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Paddle {
    pub rect: Rect,
    pub speed_x: i32,
}

impl Paddle {
    pub const fn new(x: i32, y: i32) -> Self {
        Self {
            rect: Rect::new(x, y, PADDLE_W, PADDLE_H),
            speed_x: 0,
        }
    }

    /// Move one tick in the direction of `intent`, clamped to the screen.
    pub fn move_by(&mut self, intent: Intent) {
        self.speed_x = intent.sign() * PADDLE_SPEED;
        let new_x = self.rect.x + self.speed_x;
        self.rect.x = new_x.clamp(0, SCREEN_W - self.rect.width - 1);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ball {
    pub rect: Rect,
    pub speed_x: i32,
    pub speed_y: i32,
}

impl Ball {
    /// Ball at `(x, y)` heading up and to the right.
    pub const fn new(x: i32, y: i32) -> Self {
        Self {
            rect: Rect::new(x, y, BALL_W, BALL_H),
            speed_x: BALL_MIN_SPEED,
            speed_y: -BALL_MIN_SPEED,
        }
    }

    /// Advance one tick and bounce off the side and top walls.
    ///
    /// A bounce only flips the velocity; the ball may sit a pixel outside
    /// the playfield for one tick before coming back.
    pub fn move_by(&mut self) {
        self.rect.x += self.speed_x;
        self.rect.y += self.speed_y;
        if self.rect.x < 0 || self.rect.right() > SCREEN_W {
            self.speed_x = -self.speed_x;
        }
        if self.rect.y < 0 {
            self.speed_y = -self.speed_y;
        }
    }

    /// Bounce back up if the paddle is under the ball. Returns whether it did.
    pub fn bounce_off_paddle(&mut self, paddle: &Paddle) -> bool {
        if self.reached(paddle) && self.over(paddle) {
            self.speed_y = -self.speed_y;
            self.rect.y = paddle.rect.y - self.rect.height;
            true
        } else {
            false
        }
    }

    /// The ball got down to the paddle line with the paddle elsewhere.
    pub fn missed_by(&self, paddle: &Paddle) -> bool {
        self.reached(paddle) && !self.over(paddle)
    }

    /// Moving down with the bottom edge at or past the paddle's top edge.
    fn reached(&self, paddle: &Paddle) -> bool {
        self.speed_y > 0 && self.rect.bottom() >= paddle.rect.y
    }

    /// Either vertical edge lies within the paddle span, ends included.
    fn over(&self, paddle: &Paddle) -> bool {
        let span = paddle.rect.x..=paddle.rect.right();
        span.contains(&self.rect.x) || span.contains(&self.rect.right())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::config::PADDLE_Y;

    #[test]
    fn test_paddle_moves_by_speed() {
        let mut paddle = Paddle::new(100, PADDLE_Y);
        paddle.move_by(Intent::Left);
        assert_eq!(paddle.rect.x, 100 - PADDLE_SPEED);
        assert_eq!(paddle.speed_x, -PADDLE_SPEED);
        paddle.move_by(Intent::Stay);
        assert_eq!(paddle.rect.x, 100 - PADDLE_SPEED);
        assert_eq!(paddle.speed_x, 0);
        paddle.move_by(Intent::Right);
        assert_eq!(paddle.rect.x, 100);
    }

    #[test]
    fn test_paddle_clamps_at_edges() {
        let mut paddle = Paddle::new(2, PADDLE_Y);
        paddle.move_by(Intent::Left);
        assert_eq!(paddle.rect.x, 0);

        let mut paddle = Paddle::new(SCREEN_W - PADDLE_W - 3, PADDLE_Y);
        paddle.move_by(Intent::Right);
        assert_eq!(paddle.rect.x, SCREEN_W - PADDLE_W - 1);
    }

    #[test]
    fn test_ball_bounces_off_side_walls_without_reposition() {
        let mut ball = Ball::new(0, 50);
        ball.speed_x = -BALL_MIN_SPEED;
        ball.move_by();
        assert_eq!(ball.rect.x, -1);
        assert_eq!(ball.speed_x, BALL_MIN_SPEED);
        ball.move_by();
        assert_eq!(ball.rect.x, 0);

        let mut ball = Ball::new(SCREEN_W - BALL_W, 50);
        ball.move_by();
        assert_eq!(ball.rect.right(), SCREEN_W + 1);
        assert_eq!(ball.speed_x, -BALL_MIN_SPEED);
    }

    #[test]
    fn test_ball_bounces_off_ceiling() {
        let mut ball = Ball::new(50, 0);
        ball.move_by();
        assert_eq!(ball.rect.y, -1);
        assert_eq!(ball.speed_y, BALL_MIN_SPEED);
    }

    #[test]
    fn test_bounce_snaps_ball_onto_paddle() {
        let paddle = Paddle::new(100, PADDLE_Y);
        let mut ball = Ball::new(104, PADDLE_Y - BALL_H + 2);
        ball.speed_y = BALL_MIN_SPEED;

        assert!(ball.bounce_off_paddle(&paddle));
        assert_eq!(ball.rect.y, paddle.rect.y - ball.rect.height);
        assert_eq!(ball.speed_y, -BALL_MIN_SPEED);
        assert!(!ball.missed_by(&paddle));
    }

    #[test]
    fn test_paddle_span_is_inclusive() {
        let paddle = Paddle::new(100, PADDLE_Y);

        // Right edge exactly on the paddle's left end.
        let mut ball = Ball::new(100 - BALL_W, PADDLE_Y - BALL_H);
        ball.speed_y = BALL_MIN_SPEED;
        assert!(ball.bounce_off_paddle(&paddle));

        // Left edge exactly on the paddle's right end.
        let mut ball = Ball::new(100 + PADDLE_W, PADDLE_Y - BALL_H);
        ball.speed_y = BALL_MIN_SPEED;
        assert!(ball.bounce_off_paddle(&paddle));

        // One pixel further out misses.
        let mut ball = Ball::new(100 + PADDLE_W + 1, PADDLE_Y - BALL_H);
        ball.speed_y = BALL_MIN_SPEED;
        assert!(!ball.bounce_off_paddle(&paddle));
        assert!(ball.missed_by(&paddle));
    }

    #[test]
    fn test_rising_ball_is_neither_caught_nor_missed() {
        let paddle = Paddle::new(0, PADDLE_Y);
        let mut ball = Ball::new(200, PADDLE_Y);
        assert!(!ball.bounce_off_paddle(&paddle));
        assert!(!ball.missed_by(&paddle));
    }

    #[test]
    fn test_ball_above_paddle_line_is_not_missed() {
        let paddle = Paddle::new(0, PADDLE_Y);
        let mut ball = Ball::new(200, PADDLE_Y - BALL_H - 1);
        ball.speed_y = BALL_MIN_SPEED;
        assert!(!ball.missed_by(&paddle));
    }

    fn intent() -> impl Strategy<Value = Intent> {
        prop_oneof![Just(Intent::Left), Just(Intent::Stay), Just(Intent::Right)]
    }

    proptest! {
        #[test]
        fn prop_paddle_stays_on_screen(
            start in 0..(SCREEN_W - PADDLE_W),
            intents in proptest::collection::vec(intent(), 0..200),
        ) {
            let mut paddle = Paddle::new(start, PADDLE_Y);
            for intent in intents {
                paddle.move_by(intent);
                prop_assert!(paddle.rect.x >= 0);
                prop_assert!(paddle.rect.right() <= SCREEN_W);
            }
        }

        #[test]
        fn prop_ball_speed_magnitude_is_constant(
            x in 0..(SCREEN_W - BALL_W),
            y in 0..(PADDLE_Y - BALL_H),
            paddle_x in 0..(SCREEN_W - PADDLE_W),
            ticks in 1..2000usize,
        ) {
            let paddle = Paddle::new(paddle_x, PADDLE_Y);
            let mut ball = Ball::new(x, y);
            for _ in 0..ticks {
                ball.move_by();
                let _ = ball.bounce_off_paddle(&paddle);
                prop_assert_eq!(ball.speed_x.abs(), BALL_MIN_SPEED);
                prop_assert_eq!(ball.speed_y.abs(), BALL_MIN_SPEED);
                if ball.missed_by(&paddle) {
                    break;
                }
            }
        }
    }
}
