//! The device main loop: step the game, repaint, sleep.

use embassy_time::Timer;

use crate::{
    Display,
    config::GameOptions,
    game::Game,
    input::InputSource,
    render::Renderer,
    scene::DisplayList,
};

/// Run the arcade forever on `display`, reading `input`.
///
/// Both firmware variants call this from their game task; they only differ
/// in the input they pass and the [`GameOptions`] preset.
pub async fn run(display: &mut Display<'_>, input: &mut impl InputSource, options: GameOptions) {
    info!("breakout running: {}", options);

    let mut game = Game::new(options);
    let mut scene = DisplayList::new();
    let mut renderer = Renderer::new();

    loop {
        let wait = game.step(input, &mut scene);
        if renderer.render(&scene, display).is_err() {
            error!("display refresh failed, repainting next frame");
        }
        Timer::after(wait).await;
    }
}
