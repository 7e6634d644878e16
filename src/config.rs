//! Playfield geometry, entity sizes, colours and timings.

use embassy_time::Duration;
use embedded_graphics::pixelcolor::{
    Rgb565,
    RgbColor,
    WebColors,
};

// ── Display ─────────────────────────────────────────────────────────────────

pub const SCREEN_W: i32 = 320;
pub const SCREEN_H: i32 = 170;

// ── Bricks ──────────────────────────────────────────────────────────────────

pub const BRICK_W: i32 = 16;
pub const BRICK_H: i32 = 8;
pub const BRICK_ROWS: usize = 4;
/// Y of the top brick row; leaves room for the score label above the wall.
pub const BRICK_TOP: i32 = 2 * BRICK_H;
pub const BRICK_COLS: usize = (SCREEN_W / BRICK_W) as usize;
pub const TOTAL_BRICKS: usize = BRICK_ROWS * BRICK_COLS;

/// Row colours, top row first.
pub const BRICK_COLORS: [Rgb565; BRICK_ROWS] = [
    Rgb565::RED,
    Rgb565::CSS_ORANGE,
    Rgb565::GREEN,
    Rgb565::BLUE,
];

// ── Paddle ──────────────────────────────────────────────────────────────────

pub const PADDLE_W: i32 = 16;
pub const PADDLE_H: i32 = 4;
pub const PADDLE_Y: i32 = SCREEN_H - PADDLE_H - 1;
pub const PADDLE_SPEED: i32 = 6;
pub const PADDLE_COLOR: Rgb565 = Rgb565::MAGENTA;

// ── Ball ────────────────────────────────────────────────────────────────────

pub const BALL_W: i32 = 4;
pub const BALL_H: i32 = 4;
pub const BALL_MIN_SPEED: i32 = 1;
pub const BALL_COLOR: Rgb565 = Rgb565::YELLOW;

// ── Text ────────────────────────────────────────────────────────────────────

pub const TEXT_COLOR: Rgb565 = Rgb565::WHITE;
pub const SCORE_X: i32 = 2;
pub const SCORE_Y: i32 = 2;

pub const TITLE: &str = "BREAKOUT";
pub const TITLE_COLORS: [Rgb565; 6] = [
    Rgb565::RED,
    Rgb565::CSS_ORANGE,
    Rgb565::YELLOW,
    Rgb565::GREEN,
    Rgb565::BLUE,
    Rgb565::MAGENTA,
];
/// Horizontal advance between title letters.
pub const TITLE_PITCH: i32 = 18;
pub const CREDIT: &str = "DASH9COMPUTING";

pub const PROMPT_START: &str = "PRESS TO START";
pub const PROMPT_READY: &str = "Ready";
pub const BANNER_CLEARED: &str = "GAME CLEARED";
pub const BANNER_OVER: &str = "GAME OVER";

// ── Timing ──────────────────────────────────────────────────────────────────

/// One simulation step while playing.
pub const TICK: Duration = Duration::from_millis(10);
/// Interval between start-button polls on the attract screen.
pub const BLINK_POLL: Duration = Duration::from_millis(50);
/// Polls per prompt blink phase.
pub const BLINK_POLLS: u8 = 10;
pub const SPLASH: Duration = Duration::from_millis(2000);
pub const READY: Duration = Duration::from_millis(1000);
/// Final score shown alone before the banner.
pub const FINAL_SCORE: Duration = Duration::from_millis(1100);
pub const BANNER: Duration = Duration::from_millis(2000);
pub const BLANK: Duration = Duration::from_millis(3000);

// ── Variants ────────────────────────────────────────────────────────────────

/// Per-variant presentation choices. The simulation itself is shared.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GameOptions {
    /// Starting X of the paddle's left edge.
    pub paddle_start_x: i32,
    /// Show the BREAKOUT splash every time the attract screen is entered.
    pub title: bool,
    /// Show a "Ready" prompt between the start press and the first tick.
    pub ready: bool,
}

impl GameOptions {
    /// Left/Right/Start buttons.
    pub const BUTTONS: Self = Self {
        paddle_start_x: (SCREEN_W - PADDLE_W) / 3,
        title: true,
        ready: false,
    };

    /// Analog joystick with click button.
    pub const JOYSTICK: Self = Self {
        paddle_start_x: (SCREEN_W - PADDLE_W) / 2,
        title: false,
        ready: true,
    };
}

impl Default for GameOptions {
    fn default() -> Self {
        Self::BUTTONS
    }
}
