//! Attract → play → end-screen state machine.
//!
//! [`Game::step`] runs everything up to the next pause and tells the caller
//! how long to sleep before stepping again. The driver is a single loop:
//!
//! ```rust,ignore
//! loop {
//!     let wait = game.step(&mut input, &mut scene);
//!     renderer.render(&scene, &mut display)?;
//!     Timer::after(wait).await;
//! }
//! ```

use embassy_time::Duration;

use crate::{
    config::{
        BANNER,
        BANNER_CLEARED,
        BANNER_OVER,
        BLANK,
        BLINK_POLL,
        BLINK_POLLS,
        CREDIT,
        FINAL_SCORE,
        GameOptions,
        PROMPT_READY,
        PROMPT_START,
        READY,
        SCREEN_H,
        SCREEN_W,
        SPLASH,
        TEXT_COLOR,
        TICK,
        TITLE,
        TITLE_COLORS,
        TITLE_PITCH,
    },
    input::InputSource,
    scene::{
        Font,
        Scene,
        Visual,
        text_size,
    },
    session::{
        Outcome,
        Session,
    },
};

/// Coarse game mode, as seen from outside.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    Attract,
    Playing,
    End { cleared: bool },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EndStage {
    /// Final score alone on screen.
    Score,
    /// GAME CLEARED / GAME OVER.
    Banner,
    /// Empty screen before returning to attract.
    Blank,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// BREAKOUT splash.
    Title,
    /// Prompt blinking; `polls_left == 0` starts the next blink phase.
    Attract { polls_left: u8 },
    /// "Ready" shown between start and the first tick.
    Ready,
    Playing,
    End { cleared: bool, stage: EndStage },
}

impl State {
    pub const fn mode(self) -> Mode {
        match self {
            Self::Title | Self::Attract { .. } => Mode::Attract,
            Self::Ready | Self::Playing => Mode::Playing,
            Self::End { cleared, .. } => Mode::End { cleared },
        }
    }
}

pub struct Game {
    options: GameOptions,
    state: State,
    session: Session,
}

impl Game {
    pub fn new(options: GameOptions) -> Self {
        Self {
            options,
            state: Self::attract_entry(options),
            session: Session::new(options),
        }
    }

    const fn attract_entry(options: GameOptions) -> State {
        if options.title {
            State::Title
        } else {
            State::Attract { polls_left: 0 }
        }
    }

    /// Run until the next pause and return its length.
    pub fn step(&mut self, input: &mut impl InputSource, scene: &mut impl Scene) -> Duration {
        loop {
            let (next, wait) = self.advance(input, scene);
            if next.mode() != self.state.mode() {
                info!("mode {} -> {}", self.state.mode(), next.mode());
            }
            self.state = next;
            if let Some(wait) = wait {
                return wait;
            }
        }
    }

    fn advance(&mut self, input: &mut impl InputSource, scene: &mut impl Scene) -> (State, Option<Duration>) {
        match self.state {
            State::Title => {
                show_title(scene);
                (State::Attract { polls_left: 0 }, Some(SPLASH))
            }
            State::Attract { polls_left: 0 } => {
                if self.session.toggle_score_visible() {
                    show_centered(scene, PROMPT_START);
                } else {
                    scene.clear();
                }
                (State::Attract { polls_left: BLINK_POLLS }, None)
            }
            State::Attract { polls_left } => {
                if input.start_pressed() {
                    info!("start pressed");
                    scene.clear();
                    if self.options.ready {
                        show_centered(scene, PROMPT_READY);
                        (State::Ready, Some(READY))
                    } else {
                        self.session.reset_arcade(scene);
                        (State::Playing, None)
                    }
                } else {
                    (State::Attract { polls_left: polls_left - 1 }, Some(BLINK_POLL))
                }
            }
            State::Ready => {
                scene.clear();
                self.session.reset_arcade(scene);
                (State::Playing, None)
            }
            State::Playing => match self.session.tick(input.paddle_intent(), scene) {
                None => (State::Playing, Some(TICK)),
                Some(outcome) => {
                    info!("session over: {}, score {}", outcome, self.session.score());
                    let cleared = outcome == Outcome::Cleared;
                    (
                        State::End {
                            cleared,
                            stage: EndStage::Score,
                        },
                        None,
                    )
                }
            },
            State::End {
                cleared,
                stage: EndStage::Score,
            } => {
                scene.clear();
                self.session.set_score_visible(true);
                self.session.refresh(scene);
                (
                    State::End {
                        cleared,
                        stage: EndStage::Banner,
                    },
                    Some(FINAL_SCORE),
                )
            }
            State::End {
                cleared,
                stage: EndStage::Banner,
            } => {
                show_centered(scene, if cleared { BANNER_CLEARED } else { BANNER_OVER });
                (
                    State::End {
                        cleared,
                        stage: EndStage::Blank,
                    },
                    Some(BANNER),
                )
            }
            State::End {
                stage: EndStage::Blank,
                ..
            } => {
                scene.clear();
                self.session.set_score_visible(false);
                (Self::attract_entry(self.options), Some(BLANK))
            }
        }
    }

    pub const fn state(&self) -> State {
        self.state
    }

    pub const fn mode(&self) -> Mode {
        self.state.mode()
    }

    pub const fn session(&self) -> &Session {
        &self.session
    }

    pub const fn options(&self) -> GameOptions {
        self.options
    }
}

/// Clear the scene and show a single centred line of text.
fn show_centered(scene: &mut impl Scene, text: &str) {
    scene.clear();
    scene.add(Visual::centered_label(text, Font::Small, TEXT_COLOR));
}

/// Multicoloured title letters with the credit line underneath.
fn show_title(scene: &mut impl Scene) {
    scene.clear();

    let (_, letter_h) = text_size("B", Font::Large);
    let width = TITLE_PITCH * (TITLE.len() as i32 - 1) + Font::Large.advance();
    let x = (SCREEN_W - width).div_euclid(2);
    let y = (SCREEN_H - letter_h).div_euclid(2);
    for (i, letter) in TITLE.char_indices() {
        let mut buf = [0u8; 4];
        scene.add(Visual::label(
            x + i as i32 * TITLE_PITCH,
            y,
            &*letter.encode_utf8(&mut buf),
            Font::Large,
            TITLE_COLORS[i % TITLE_COLORS.len()],
        ));
    }

    let (credit_w, credit_h) = text_size(CREDIT, Font::Small);
    scene.add(Visual::label(
        (SCREEN_W - credit_w).div_euclid(2),
        SCREEN_H - credit_h - 5,
        CREDIT,
        Font::Small,
        TEXT_COLOR,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::BALL_MIN_SPEED,
        input::Intent,
        scene::DisplayList,
    };

    /// Input that replays fixed answers.
    #[derive(Default)]
    struct Scripted {
        start: bool,
        intent: Intent,
        start_polls: usize,
    }

    impl InputSource for Scripted {
        fn paddle_intent(&mut self) -> Intent {
            self.intent
        }

        fn start_pressed(&mut self) -> bool {
            self.start_polls += 1;
            self.start
        }
    }

    fn texts(scene: &DisplayList) -> Vec<&str> {
        scene
            .visuals()
            .filter_map(|(_, visual)| match visual {
                Visual::Label { text, .. } => Some(text.as_str()),
                Visual::Block { .. } => None,
            })
            .collect()
    }

    #[test]
    fn test_title_splash_first() {
        let mut game = Game::new(GameOptions::BUTTONS);
        let mut scene = DisplayList::new();
        let mut input = Scripted::default();

        assert_eq!(game.mode(), Mode::Attract);
        assert_eq!(game.step(&mut input, &mut scene), SPLASH);
        assert_eq!(texts(&scene), ["B", "R", "E", "A", "K", "O", "U", "T", CREDIT]);
        assert_eq!(input.start_polls, 0);
    }

    #[test]
    fn test_attract_polls_without_start_never_leave_attract() {
        let mut game = Game::new(GameOptions::JOYSTICK);
        let mut scene = DisplayList::new();
        let mut input = Scripted::default();

        let mut toggles = 0;
        let mut visible = game.session().score_visible();
        for _ in 0..(BLINK_POLLS as usize * 6) {
            assert_eq!(game.step(&mut input, &mut scene), BLINK_POLL);
            assert_eq!(game.mode(), Mode::Attract);
            if game.session().score_visible() != visible {
                toggles += 1;
                visible = game.session().score_visible();
            }
        }
        assert_eq!(toggles, 6);
        assert_eq!(input.start_polls, BLINK_POLLS as usize * 6);
    }

    #[test]
    fn test_prompt_blinks() {
        let mut game = Game::new(GameOptions::JOYSTICK);
        let mut scene = DisplayList::new();
        let mut input = Scripted::default();

        game.step(&mut input, &mut scene);
        assert_eq!(texts(&scene), [PROMPT_START]);
        for _ in 0..BLINK_POLLS {
            game.step(&mut input, &mut scene);
        }
        assert!(scene.is_empty());
        for _ in 0..BLINK_POLLS {
            game.step(&mut input, &mut scene);
        }
        assert_eq!(texts(&scene), [PROMPT_START]);
    }

    #[test]
    fn test_start_enters_play() {
        let mut game = Game::new(GameOptions::BUTTONS);
        let mut scene = DisplayList::new();
        let mut input = Scripted::default();

        game.step(&mut input, &mut scene);
        input.start = true;
        assert_eq!(game.step(&mut input, &mut scene), TICK);
        assert_eq!(game.state(), State::Playing);
        assert_eq!(game.session().remaining_bricks(), 80);
        // Bricks, paddle, ball, then the score label on top.
        assert_eq!(scene.len(), 83);
        assert_eq!(texts(&scene), ["Score: 0"]);
    }

    #[test]
    fn test_joystick_shows_ready_first() {
        let mut game = Game::new(GameOptions::JOYSTICK);
        let mut scene = DisplayList::new();
        let mut input = Scripted {
            start: true,
            ..Scripted::default()
        };

        assert_eq!(game.step(&mut input, &mut scene), READY);
        assert_eq!(game.state(), State::Ready);
        assert_eq!(game.mode(), Mode::Playing);
        assert_eq!(texts(&scene), [PROMPT_READY]);

        assert_eq!(game.step(&mut input, &mut scene), TICK);
        assert_eq!(game.state(), State::Playing);
        assert_eq!(texts(&scene), ["Score: 0"]);
    }

    #[test]
    fn test_miss_runs_end_sequence() {
        let mut game = Game::new(GameOptions::JOYSTICK);
        let mut scene = DisplayList::new();
        let mut input = Scripted {
            start: true,
            ..Scripted::default()
        };
        game.step(&mut input, &mut scene);
        game.step(&mut input, &mut scene);
        input.start = false;

        // Drop the ball next to the paddle line, away from the paddle.
        let ball = game.session.ball_mut();
        ball.rect.x = 0;
        ball.rect.y = crate::config::PADDLE_Y - ball.rect.height - 1;
        ball.speed_y = BALL_MIN_SPEED;

        assert_eq!(game.step(&mut input, &mut scene), FINAL_SCORE);
        assert_eq!(game.mode(), Mode::End { cleared: false });
        assert_eq!(texts(&scene), ["Score: 0"]);
        assert_eq!(scene.len(), 1);

        assert_eq!(game.step(&mut input, &mut scene), BANNER);
        assert_eq!(texts(&scene), [BANNER_OVER]);

        assert_eq!(game.step(&mut input, &mut scene), BLANK);
        assert!(scene.is_empty());
        assert!(!game.session().score_visible());

        // Back to the blinking prompt; hidden phase first.
        assert_eq!(game.step(&mut input, &mut scene), BLINK_POLL);
        assert_eq!(game.mode(), Mode::Attract);
        assert!(scene.is_empty());
    }

    #[test]
    fn test_clearing_the_wall_shows_game_cleared() {
        let mut game = Game::new(GameOptions::BUTTONS);
        let mut scene = DisplayList::new();
        let mut input = Scripted::default();
        game.step(&mut input, &mut scene);
        input.start = true;
        game.step(&mut input, &mut scene);

        let mut ticks = 0;
        while game.mode() == Mode::Playing {
            let target = game.session().bricks().next().map(|brick| brick.rect);
            if let Some(target) = target {
                let ball = game.session.ball_mut();
                ball.rect.x = target.x + 2;
                ball.rect.y = target.y + 2;
                ball.speed_y = -BALL_MIN_SPEED;
            }
            game.step(&mut input, &mut scene);
            ticks += 1;
        }

        assert_eq!(ticks, 80);
        assert_eq!(game.mode(), Mode::End { cleared: true });
        assert_eq!(game.session().score(), 80);
        game.step(&mut input, &mut scene);
        assert_eq!(texts(&scene), [BANNER_CLEARED]);

        // Buttons variant goes back through the title splash.
        game.step(&mut input, &mut scene);
        assert_eq!(game.step(&mut input, &mut scene), SPLASH);
        assert_eq!(game.state(), State::Attract { polls_left: 0 });
    }
}
