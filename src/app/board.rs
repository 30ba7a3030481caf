use std::collections::HashMap;

use ggez::graphics::{self, Canvas, DrawMode, DrawParam, Mesh, Rect, Text};
use ggez::{Context, GameResult};
use itertools::Itertools;

use crate::app::palette::Palette;
use crate::app::surface::{Status, Style, Surface};
use crate::basic::{Grid, Point};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct CellHandle(u64);

/// Retains the cells placed by the session and draws them with ggez
pub struct Board {
    grid: Grid,
    // top-left corner of the board in the window
    offset: Point,
    palette: Palette,

    cells: HashMap<CellHandle, (Point, Style)>,
    next_handle: u64,
    status: Status,
}

impl Board {
    const MARGIN: f32 = 20.;
    const STATUS_HEIGHT: f32 = 90.;
    const TEXT_SIZE: f32 = 18.;

    pub fn new(grid: Grid, palette: Palette) -> Self {
        Self {
            grid,
            offset: Point { x: Self::MARGIN, y: Self::MARGIN },
            palette,

            cells: HashMap::new(),
            next_handle: 0,
            status: Status::Title,
        }
    }

    /// Window size needed to show the board with the status underneath
    pub fn window_size(grid: Grid) -> Point {
        let board = grid.pixel_size();
        Point {
            x: board.x + 2. * Self::MARGIN,
            y: board.y + 2. * Self::MARGIN + Self::STATUS_HEIGHT,
        }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn draw(&self, ctx: &mut Context, canvas: &mut Canvas) -> GameResult {
        let board_size = self.grid.pixel_size();
        let board_rect = Rect::new(self.offset.x, self.offset.y, board_size.x, board_size.y);
        canvas.draw(
            &graphics::Quad,
            DrawParam::new().dest_rect(board_rect).color(self.palette.board_color),
        );
        let border = Mesh::new_rectangle(ctx, DrawMode::stroke(1.), board_rect, self.palette.border_color)?;
        canvas.draw(&border, DrawParam::new());

        let side = self.grid.cell_size as f32;
        let cell_rect = |pos: Point| {
            let Point { x, y } = pos + self.offset;
            Rect::new(x, y, side, side)
        };

        // handles grow with every new cell so the newest segment is the head
        let segments = self
            .cells
            .iter()
            .filter(|(_, (_, style))| *style == Style::Segment)
            .sorted_by_key(|(handle, _)| std::cmp::Reverse(handle.0))
            .collect_vec();
        let len = segments.len();
        for (seg_idx, (_, (pos, _))) in segments.into_iter().enumerate() {
            canvas.draw(
                &graphics::Quad,
                DrawParam::new()
                    .dest_rect(cell_rect(*pos))
                    .color(self.palette.segment_color(seg_idx, len)),
            );
        }

        for (pos, _) in self.cells.values().filter(|(_, style)| *style == Style::Food) {
            canvas.draw(
                &graphics::Quad,
                DrawParam::new().dest_rect(cell_rect(*pos)).color(self.palette.food_color),
            );
        }

        let mut text = Text::new(self.status.to_string());
        text.set_scale(Self::TEXT_SIZE);
        let text_pos = Point {
            x: self.offset.x,
            y: self.offset.y + board_size.y + Self::MARGIN / 2.,
        };
        canvas.draw(&text, DrawParam::new().dest(text_pos).color(self.palette.text_color));

        Ok(())
    }
}

impl Surface for Board {
    type Handle = CellHandle;

    fn create_cell(&mut self, pos: Point, style: Style) -> CellHandle {
        let handle = CellHandle(self.next_handle);
        self.next_handle += 1;
        self.cells.insert(handle, (pos, style));
        handle
    }

    fn remove_cell(&mut self, handle: CellHandle) {
        if self.cells.remove(&handle).is_none() {
            log::warn!("tried to remove unknown cell {:?}", handle);
        }
    }

    fn show_status(&mut self, status: Status) {
        self.status = status;
    }
}
