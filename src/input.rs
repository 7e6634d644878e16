//! Input front-ends normalised to a paddle intent and a start signal.
//!
//! Two physical variants feed the same game:
//! - [`ButtonInput`]: Left, Right and Start push buttons
//! - [`JoystickInput`]: an analog X axis plus the stick's click switch
//!
//! All switches are active low (pulled up, pressed pulls the line to ground).

use embedded_hal::digital::InputPin;

/// Consecutive identical reads needed before a level change is accepted.
pub const DEBOUNCE_SAMPLES: u8 = 2;

/// Raw ADC units either side of centre that still count as "at rest".
pub const JOYSTICK_DEADZONE: u16 = 200;

/// Readings averaged to find the resting centre of the axis.
pub const CALIBRATION_SAMPLES: u16 = 16;

/// Which way the player wants the paddle to go this tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Intent {
    Left,
    #[default]
    Stay,
    Right,
}

impl Intent {
    /// −1, 0 or +1.
    pub const fn sign(self) -> i32 {
        match self {
            Self::Left => -1,
            Self::Stay => 0,
            Self::Right => 1,
        }
    }

    /// Combine two direction switches; both or neither held means stay.
    pub const fn from_switches(left: bool, right: bool) -> Self {
        match (left, right) {
            (true, false) => Self::Left,
            (false, true) => Self::Right,
            _ => Self::Stay,
        }
    }
}

/// What the game polls every step. Implementations must return debounced,
/// normalised values.
pub trait InputSource {
    fn paddle_intent(&mut self) -> Intent;
    fn start_pressed(&mut self) -> bool;
}

/// A single analog axis, e.g. one ADC channel of a joystick.
pub trait AnalogAxis {
    fn read_raw(&mut self) -> u16;
}

/// Sample-count debouncer for one digital line.
#[derive(Clone, Copy, Debug, Default)]
pub struct Debounce {
    stable: bool,
    candidate: bool,
    streak: u8,
}

impl Debounce {
    pub const fn new() -> Self {
        Self {
            stable: false,
            candidate: false,
            streak: 0,
        }
    }

    /// Feed one raw sample and get the accepted level back.
    pub fn update(&mut self, raw: bool) -> bool {
        if raw == self.stable {
            self.streak = 0;
            return self.stable;
        }
        if raw == self.candidate {
            self.streak = self.streak.saturating_add(1);
        } else {
            self.candidate = raw;
            self.streak = 1;
        }
        if self.streak >= DEBOUNCE_SAMPLES {
            self.stable = raw;
            self.streak = 0;
        }
        self.stable
    }

    pub const fn level(&self) -> bool {
        self.stable
    }
}

/// Active-low read; a failed read counts as released.
fn is_pressed<P: InputPin>(pin: &mut P) -> bool {
    match pin.is_low() {
        Ok(low) => low,
        Err(_) => {
            warn!("input pin read failed");
            false
        }
    }
}

/// Left/Right/Start push buttons.
pub struct ButtonInput<L, R, S> {
    left: L,
    right: R,
    start: S,
    left_state: Debounce,
    right_state: Debounce,
    start_state: Debounce,
}

impl<L: InputPin, R: InputPin, S: InputPin> ButtonInput<L, R, S> {
    pub const fn new(left: L, right: R, start: S) -> Self {
        Self {
            left,
            right,
            start,
            left_state: Debounce::new(),
            right_state: Debounce::new(),
            start_state: Debounce::new(),
        }
    }
}

impl<L: InputPin, R: InputPin, S: InputPin> InputSource for ButtonInput<L, R, S> {
    fn paddle_intent(&mut self) -> Intent {
        let left = self.left_state.update(is_pressed(&mut self.left));
        let right = self.right_state.update(is_pressed(&mut self.right));
        Intent::from_switches(left, right)
    }

    fn start_pressed(&mut self) -> bool {
        self.start_state.update(is_pressed(&mut self.start))
    }
}

/// Analog stick on one axis plus its click switch as start.
pub struct JoystickInput<A, S> {
    axis: A,
    button: S,
    center: u16,
    deadzone: u16,
    button_state: Debounce,
}

impl<A: AnalogAxis, S: InputPin> JoystickInput<A, S> {
    /// Build with a known resting centre.
    pub const fn new(axis: A, button: S, center: u16) -> Self {
        Self {
            axis,
            button,
            center,
            deadzone: JOYSTICK_DEADZONE,
            button_state: Debounce::new(),
        }
    }

    /// Average [`CALIBRATION_SAMPLES`] readings as the centre. The stick
    /// must be left alone while this runs.
    pub fn calibrate(mut axis: A, button: S) -> Self {
        let sum: u32 = (0..CALIBRATION_SAMPLES)
            .map(|_| u32::from(axis.read_raw()))
            .sum();
        let center = u16::try_from(sum / u32::from(CALIBRATION_SAMPLES)).unwrap_or(u16::MAX);
        info!("joystick centre calibrated at {}", center);
        Self::new(axis, button, center)
    }

    #[must_use]
    pub const fn with_deadzone(mut self, deadzone: u16) -> Self {
        self.deadzone = deadzone;
        self
    }

    pub const fn center(&self) -> u16 {
        self.center
    }
}

impl<A: AnalogAxis, S: InputPin> InputSource for JoystickInput<A, S> {
    fn paddle_intent(&mut self) -> Intent {
        let raw = self.axis.read_raw();
        if raw < self.center.saturating_sub(self.deadzone) {
            Intent::Left
        } else if raw > self.center.saturating_add(self.deadzone) {
            Intent::Right
        } else {
            Intent::Stay
        }
    }

    fn start_pressed(&mut self) -> bool {
        self.button_state.update(is_pressed(&mut self.button))
    }
}

#[cfg(test)]
mod tests {
    use core::{
        cell::Cell,
        convert::Infallible,
    };

    use embedded_hal::digital::ErrorType;

    use super::*;

    /// Pin whose level the test flips through a shared cell.
    struct FakePin<'a> {
        low: &'a Cell<bool>,
    }

    impl ErrorType for FakePin<'_> {
        type Error = Infallible;
    }

    impl InputPin for FakePin<'_> {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.low.get())
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(self.low.get())
        }
    }

    struct BrokenPin;

    impl ErrorType for BrokenPin {
        type Error = embedded_hal::digital::ErrorKind;
    }

    impl InputPin for BrokenPin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Err(embedded_hal::digital::ErrorKind::Other)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Err(embedded_hal::digital::ErrorKind::Other)
        }
    }

    struct FixedAxis(u16);

    impl AnalogAxis for FixedAxis {
        fn read_raw(&mut self) -> u16 {
            self.0
        }
    }

    #[test]
    fn test_intent_from_switches() {
        assert_eq!(Intent::from_switches(true, false), Intent::Left);
        assert_eq!(Intent::from_switches(false, true), Intent::Right);
        assert_eq!(Intent::from_switches(true, true), Intent::Stay);
        assert_eq!(Intent::from_switches(false, false), Intent::Stay);
    }

    #[test]
    fn test_debounce_needs_consecutive_samples() {
        let mut db = Debounce::new();
        assert!(!db.update(true));
        assert!(db.update(true));
        assert!(db.update(true));
        assert!(db.update(false));
        assert!(!db.update(false));
    }

    #[test]
    fn test_debounce_ignores_single_glitch() {
        let mut db = Debounce::new();
        for raw in [true, false, true, false, false, true, false] {
            assert!(!db.update(raw));
        }
        assert!(!db.level());
    }

    #[test]
    fn test_buttons_are_active_low() {
        let left = Cell::new(false);
        let right = Cell::new(false);
        let start = Cell::new(false);
        let mut input = ButtonInput::new(
            FakePin { low: &left },
            FakePin { low: &right },
            FakePin { low: &start },
        );

        assert_eq!(input.paddle_intent(), Intent::Stay);
        assert!(!input.start_pressed());

        left.set(true);
        input.paddle_intent();
        assert_eq!(input.paddle_intent(), Intent::Left);

        right.set(true);
        input.paddle_intent();
        assert_eq!(input.paddle_intent(), Intent::Stay);

        left.set(false);
        input.paddle_intent();
        assert_eq!(input.paddle_intent(), Intent::Right);

        start.set(true);
        input.start_pressed();
        assert!(input.start_pressed());
    }

    #[test]
    fn test_pin_error_reads_as_released() {
        let low = Cell::new(true);
        let mut input = ButtonInput::new(BrokenPin, FakePin { low: &low }, BrokenPin);
        assert_eq!(input.paddle_intent(), Intent::Stay);
        for _ in 0..4 {
            assert_eq!(input.paddle_intent(), Intent::Right);
        }
        assert!(!input.start_pressed());
        assert!(!input.start_pressed());
    }

    #[test]
    fn test_joystick_deadzone() {
        let pin = Cell::new(false);
        let center = 2048;
        let cases = [
            (center, Intent::Stay),
            (center - JOYSTICK_DEADZONE, Intent::Stay),
            (center + JOYSTICK_DEADZONE, Intent::Stay),
            (center - JOYSTICK_DEADZONE - 1, Intent::Left),
            (center + JOYSTICK_DEADZONE + 1, Intent::Right),
            (0, Intent::Left),
            (4095, Intent::Right),
        ];
        for (raw, expected) in cases {
            let mut input = JoystickInput::new(FixedAxis(raw), FakePin { low: &pin }, center);
            assert_eq!(input.paddle_intent(), expected, "raw reading {raw}");
        }
    }

    #[test]
    fn test_joystick_calibration_averages_readings() {
        struct Wobble(u16);
        impl AnalogAxis for Wobble {
            fn read_raw(&mut self) -> u16 {
                self.0 = if self.0 == 1990 { 2010 } else { 1990 };
                self.0
            }
        }

        let pin = Cell::new(false);
        let input = JoystickInput::calibrate(Wobble(0), FakePin { low: &pin });
        assert_eq!(input.center(), 2000);
    }

    #[test]
    fn test_joystick_click_is_start() {
        let pin = Cell::new(true);
        let mut input = JoystickInput::new(FixedAxis(2048), FakePin { low: &pin }, 2048)
            .with_deadzone(50);
        input.start_pressed();
        assert!(input.start_pressed());
        pin.set(false);
        input.start_pressed();
        assert!(!input.start_pressed());
    }
}
