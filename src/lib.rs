//! # badge-breakout
//!
//! Breakout for the Disobey 2026 badge.
//!
//! The game itself is hardware independent and builds on the host:
//! - **Simulation**: [`geometry`], [`entities`], [`session`]
//! - **State machine**: [`game`] (attract → play → end screen)
//! - **Input**: [`input`], buttons or an analog joystick behind one trait
//! - **Scene / rendering**: [`scene`] and [`render`] on top of `embedded-graphics`
//!
//! With the `board` feature the crate also brings up the badge: the ST7789
//! display, the push buttons, the joystick ADC and the async game loop in
//! [`runner`].
//!
//! ## Quick start
//!
//! ```rust,ignore
//! let peripherals = badge_breakout::init();
//! let resources = badge_breakout::split_resources!(peripherals);
//!
//! let mut display: badge_breakout::Display = resources.display.into();
//! let buttons: badge_breakout::Buttons = resources.buttons.into();
//! let mut input = buttons.arcade();
//!
//! badge_breakout::runner::run(&mut display, &mut input, GameOptions::BUTTONS).await
//! ```

#![cfg_attr(not(test), no_std)]

extern crate alloc;

#[macro_use]
mod fmt;

pub mod config;
pub mod entities;
pub mod game;
pub mod geometry;
pub mod input;
pub mod render;
pub mod scene;
pub mod session;

#[cfg(feature = "board")]
mod buttons;
#[cfg(feature = "board")]
mod display;
#[cfg(feature = "board")]
mod joystick;
#[cfg(feature = "board")]
pub mod runner;

#[cfg(feature = "board")]
pub use board::*;
#[cfg(feature = "board")]
pub use buttons::{
    ArcadeButtons,
    Buttons,
};
pub use config::GameOptions;
#[cfg(feature = "board")]
pub use display::Display;
pub use game::{
    Game,
    Mode,
};
#[cfg(feature = "board")]
pub use joystick::{
    Joystick,
    JoystickAxis,
};

/// StaticCell helper: allocates a value into a `static` exactly once.
#[cfg(feature = "board")]
#[macro_export]
macro_rules! mk_static {
    ($t:ty, $val:expr) => {{
        static STATIC_CELL: static_cell::StaticCell<$t> = static_cell::StaticCell::new();
        #[deny(unused_attributes)]
        let x = STATIC_CELL.uninit().write($val);
        x
    }};
}

#[cfg(feature = "board")]
mod board {
    use esp_hal::{
        assign_resources,
        clock::{
            Clock,
            CpuClock,
        },
        rom,
    };

    // ── Pin / peripheral assignments ────────────────────────────────────────

    assign_resources! {
        pub Resources<'d> {
            display: DisplayResources<'d> {
                dc: GPIO15,
                rst: GPIO7,
                sck: GPIO4,
                cs: GPIO6,
                miso: GPIO16,
                mosi: GPIO5,
                spi: SPI2,
                dma: DMA_CH0,
                backlight: GPIO19,
            },
            buttons: ButtonResources<'d> {
                left: GPIO21,
                right: GPIO2,
                start: GPIO12,
                stick: GPIO14,
            },
            joystick: JoystickResources<'d> {
                x: GPIO9,
                adc: ADC1,
            }
        }
    }

    // ── Board initialisation ────────────────────────────────────────────────

    /// Switch the CPU clock on ESP32-S3.
    ///
    /// The hardware needs an intermediate step through the PLL source before
    /// the target frequency can be selected.
    fn set_cpu_clock(cpu_clock_speed: CpuClock) {
        let _ = esp_hal::peripherals::SYSTEM::regs()
            .sysclk_conf()
            .modify(|_, w| unsafe { w.soc_clk_sel().bits(1) });
        let _ = esp_hal::peripherals::SYSTEM::regs()
            .cpu_per_conf()
            .modify(|_, w| unsafe {
                let _ = w.pll_freq_sel().set_bit();
                w.cpuperiod_sel().bits(match cpu_clock_speed {
                    CpuClock::_80MHz => 0,
                    CpuClock::_160MHz => 1,
                    CpuClock::_240MHz => 2,
                    _ => panic!("Unsupported CPU clock speed"),
                })
            });

        rom::ets_update_cpu_frequency_rom(cpu_clock_speed.frequency().as_mhz());
    }

    /// Bring up the badge at full CPU speed and return the raw peripherals.
    ///
    /// Call once at the top of `main`, then [`split_resources!`] the result
    /// into the display, button and joystick groups.
    #[must_use]
    pub fn init() -> esp_hal::peripherals::Peripherals {
        set_cpu_clock(CpuClock::_160MHz);
        let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
        esp_hal::init(config)
    }

    impl From<esp_hal::peripherals::Peripherals> for Resources<'_> {
        fn from(peripherals: esp_hal::peripherals::Peripherals) -> Self {
            split_resources!(peripherals)
        }
    }
}
