#[macro_use]
extern crate derive_more;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate static_assertions;

use ggez::conf::{WindowMode, WindowSetup};
use ggez::event::run;
use ggez::ContextBuilder;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use crate::app::{Controls, Palette, Prefs, SnakeApp};
use crate::error::{Error, ErrorConversion, Result};

mod app;
mod basic;
mod error;
mod food;
mod snake;

fn main() {
    if let Err(e) = TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ) {
        eprintln!("failed to initialize logger: {}", e);
    }

    if let Err(e) = start() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn start() -> Result {
    let app = SnakeApp::new(Prefs::default(), Palette::default(), Controls::default())
        .with_trace_step("start")?;
    let size = app.window_size();

    let wm = WindowMode::default().dimensions(size.x, size.y);
    let ws = WindowSetup::default().title("Snake");

    let (ctx, event_loop) = ContextBuilder::new("snake", "snake")
        .window_mode(wm)
        .window_setup(ws)
        .build()
        .map_err(Error::from)
        .with_trace_step("building the ggez context")?;

    log::info!("press ENTER to start");
    run(ctx, event_loop, app)
}
