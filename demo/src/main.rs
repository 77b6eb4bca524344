mod app;

use app::App;
use backend::glutils;
use backend::system::System;
use log::{error, info};

const WIDTH: u32 = 800;
const HEIGHT: u32 = 640;
const TITLE: &str = "GLFW3 play!!";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(msg) = run() {
        error!("{msg}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let mut system = System::new(WIDTH, HEIGHT, TITLE)
        .map_err(|msg| format!("demo initialization failure: {msg}"))?;
    info!("OpenGL {} on {}", glutils::gl_version(), glutils::gl_renderer());

    let mut app = App::new(&system).map_err(|msg| format!("scene setup failure: {msg}"))?;

    while !system.should_close() {
        app.draw_scene(&mut system);
        system.swap_buffers();
        system.dispatch_events(&mut app);
    }
    Ok(())
}
