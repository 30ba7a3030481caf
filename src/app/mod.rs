use std::time::Instant;

use ggez::event::EventHandler;
use ggez::graphics::Canvas;
use ggez::input::keyboard::KeyInput;
use ggez::{Context, GameResult};
use rand::rngs::ThreadRng;

pub use keyboard_control::Controls;
pub use palette::Palette;
pub use prefs::{ConfigError, Prefs};

use crate::app::board::Board;
use crate::app::session::Session;
use crate::basic::Point;
use crate::error::{Error, ErrorConversion, Result};

mod board;
mod control;
mod keyboard_control;
mod palette;
mod prefs;
mod session;
mod surface;

pub struct SnakeApp {
    session: Session<Board, ThreadRng>,
    controls: Controls,
}

impl SnakeApp {
    pub fn new(prefs: Prefs, palette: Palette, controls: Controls) -> Result<Self> {
        let grid = prefs.grid().map_err(Error::from).with_trace_step("SnakeApp::new")?;
        let session = Session::new(prefs, Board::new(grid, palette), rand::thread_rng())
            .map_err(Error::from)
            .with_trace_step("SnakeApp::new")?;
        Ok(Self { session, controls })
    }

    pub fn window_size(&self) -> Point {
        Board::window_size(self.session.grid())
    }
}

impl EventHandler for SnakeApp {
    fn update(&mut self, _ctx: &mut Context) -> GameResult {
        self.session.update(Instant::now());
        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context) -> GameResult {
        let board = self.session.surface();
        let mut canvas = Canvas::from_frame(ctx, board.palette().background_color);
        board.draw(ctx, &mut canvas)?;
        canvas.finish(ctx)
    }

    // turns happen on key release
    fn key_up_event(&mut self, _ctx: &mut Context, input: KeyInput) -> GameResult {
        let Some(input) = input.keycode.and_then(|key| self.controls.input(key)) else {
            return Ok(());
        };
        if let Err(e) = self.session.handle_input(input, Instant::now()) {
            log::error!("{}", e);
        }
        Ok(())
    }
}
