use std::time::Instant;

use gl_tutorials::abs::{App, ShaderCompiler};
use gl_tutorials::asset::{FileLoader, ResourceDir};
use gl_tutorials::config::Config;
use gl_tutorials::input::InputState;
use gl_tutorials::scenes::Stage;
use gl_tutorials::{Error, Result, logging};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let stage = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<Stage>().map_err(Error::Usage)?,
        None => Stage::DrawMethods,
    };

    let config = Config::load()?;
    logging::init(config.log_level()?)
        .map_err(|e| Error::Config(format!("unable to install logger ({e})")))?;
    log::info!("Running stage '{}'", stage.title());

    let mut app = App::new(stage.title(), &config)?;

    let resources = match &config.data_dir {
        Some(dir) => ResourceDir::new(dir),
        None => ResourceDir::from_executable()?,
    };
    let loader = FileLoader::new(resources, config.policy.missing_file);
    let compiler = ShaderCompiler::new(&app.gl, loader, config.policy.diagnostics);

    let mut scene = stage.build(&app, &compiler)?;
    if stage.captures_mouse() {
        app.sdl.mouse().set_relative_mouse_mode(true);
    }

    let mut input = InputState::default();
    let mut last_frame_time = Instant::now();

    loop {
        let now = Instant::now();
        let delta_time = now.duration_since(last_frame_time).as_secs_f32();
        last_frame_time = now;

        input.begin_frame();
        for event in app.event_pump.poll_iter() {
            input.handle_event(&event);
        }
        if input.quit {
            break;
        }

        scene.update(&input, delta_time);
        scene.render(&app.gl)?;
        app.window.gl_swap_window();
    }

    Ok(())
}
