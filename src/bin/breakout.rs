//! Breakout with the badge push buttons.
//!
//! - Left/Right move the paddle
//! - Start begins a game from the blinking prompt

#![no_std]
#![no_main]

use badge_breakout::{
    Buttons,
    Display,
    GameOptions,
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
async fn game_task(display: &'static mut Display<'static>, buttons: Buttons) {
    info!("Breakout task started (buttons)");
    let mut input = buttons.arcade();
    badge_breakout::runner::run(display, &mut input, GameOptions::BUTTONS).await
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

    spawner.must_spawn(game_task(display, buttons));

    loop {
        Timer::after(Duration::from_secs(600)).await;
    }
}
