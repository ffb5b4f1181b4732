//! Cannon Sim entry point
//!
//! Loads settings, opens the window and runs the frame loop until quit.

use cannon_sim::view::{RenderError, Scene, window};
use cannon_sim::{App, AppStatus, Settings};
use macroquad::time::get_frame_time;
use macroquad::window::next_frame;

fn main() {
    env_logger::init();
    log::info!("Cannon Sim starting...");

    let settings = Settings::load_or_default(Settings::path_from_env().as_deref());
    let conf = window::window_conf(&settings);
    macroquad::Window::from_config(conf, run(settings));
}

async fn run(settings: Settings) {
    if let Err(e) = run_loop(settings).await {
        log::error!("Render failure: {e}");
        std::process::exit(1);
    }
    log::info!("Window closed");
}

async fn run_loop(settings: Settings) -> Result<(), RenderError> {
    let mut scene = Scene::new();
    let mut app = App::new(&settings, &mut scene)?;

    loop {
        window::poll_keys(&mut scene);
        let status = app.frame(&mut scene, f64::from(get_frame_time()))?;
        if status == AppStatus::Quit {
            return Ok(());
        }
        window::paint(&scene);
        next_frame().await;
    }
}
