//! Push buttons used by the game: Left, Right, Start and the stick click.
//!
//! All four are active low with internal pull-ups.

use esp_hal::gpio::{
    Input,
    InputConfig,
    Pull,
};

use crate::{
    ButtonResources,
    input::ButtonInput,
};

/// Left/Right/Start wired into the game's input trait.
pub type ArcadeButtons = ButtonInput<Input<'static>, Input<'static>, Input<'static>>;

pub struct Buttons {
    pub left: Input<'static>,
    pub right: Input<'static>,
    pub start: Input<'static>,
    pub stick: Input<'static>,
}

impl From<ButtonResources<'static>> for Buttons {
    fn from(res: ButtonResources<'static>) -> Self {
        let pull_up = InputConfig::default().with_pull(Pull::Up);
        Self {
            left: Input::new(res.left, pull_up),
            right: Input::new(res.right, pull_up),
            start: Input::new(res.start, pull_up),
            stick: Input::new(res.stick, pull_up),
        }
    }
}

impl Buttons {
    /// Digital variant: Left/Right steer, Start starts.
    pub fn arcade(self) -> ArcadeButtons {
        ButtonInput::new(self.left, self.right, self.start)
    }

    /// Joystick variant: only the stick click is used, as start.
    pub fn stick(self) -> Input<'static> {
        self.stick
    }
}
