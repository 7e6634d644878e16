//! Breakout with an analog joystick.
//!
//! - Tilt the stick left/right to move the paddle
//! - Click the stick to begin a game
//!
//! Leave the stick centred at power-up; its resting position is calibrated
//! before the first frame.

#![no_std]
#![no_main]

use badge_breakout::{
    Buttons,
    Display,
    GameOptions,
    Joystick,
    JoystickAxis,
    mk_static,
    split_resources,
};
use defmt::info;
use embassy_executor::Spawner;
use embassy_time::{
    Duration,
    Timer,
};
use esp_backtrace as _;
use esp_hal::timer::timg::TimerGroup;
use esp_println as _;

extern crate alloc;

esp_bootloader_esp_idf::esp_app_desc!();

#[embassy_executor::task]
async fn game_task(display: &'static mut Display<'static>, joystick: &'static mut Joystick<'static>) {
    info!("Breakout task started (joystick, centre {})", joystick.center());
    badge_breakout::runner::run(display, joystick, GameOptions::JOYSTICK).await
}

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    let peripherals = badge_breakout::init();
    let resources = split_resources!(peripherals);

    esp_alloc::heap_allocator!(size: 64 * 1024);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let display = mk_static!(Display<'static>, resources.display.into());
    let buttons: Buttons = resources.buttons.into();
    let axis: JoystickAxis<'static> = resources.joystick.into();
    let joystick = mk_static!(Joystick<'static>, Joystick::calibrate(axis, buttons.stick()));

    spawner.must_spawn(game_task(display, joystick));

    loop {
        Timer::after(Duration::from_secs(600)).await;
    }
}
