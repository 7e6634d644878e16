//! Analog joystick X axis on ADC1.
//!
//! The stick module's X output goes to GPIO9 (ADC1 channel 8) on the
//! expansion header; its click switch shares the badge's stick-button line.

use esp_hal::{
    Blocking,
    analog::adc::{
        Adc,
        AdcConfig,
        AdcPin,
        Attenuation,
    },
    gpio::Input,
    peripherals::{
        ADC1,
        GPIO9,
    },
};

use crate::{
    JoystickResources,
    input::{
        AnalogAxis,
        JoystickInput,
    },
};

/// Joystick axis plus click, wired into the game's input trait.
pub type Joystick<'a> = JoystickInput<JoystickAxis<'a>, Input<'static>>;

/// One-shot ADC reads of the X axis, 12-bit (0..=4095).
pub struct JoystickAxis<'a> {
    adc: Adc<'a, ADC1<'a>, Blocking>,
    pin: AdcPin<GPIO9<'a>, ADC1<'a>>,
}

impl<'a> From<JoystickResources<'a>> for JoystickAxis<'a> {
    fn from(res: JoystickResources<'a>) -> Self {
        let mut config = AdcConfig::new();
        // Full 0..3.3 V swing of the stick potentiometer.
        let pin = config.enable_pin(res.x, Attenuation::_11dB);
        Self {
            adc: Adc::new(res.adc, config),
            pin,
        }
    }
}

impl AnalogAxis for JoystickAxis<'_> {
    fn read_raw(&mut self) -> u16 {
        loop {
            // WouldBlock until the conversion completes.
            if let Ok(raw) = self.adc.read_oneshot(&mut self.pin) {
                return raw;
            }
        }
    }
}
