use rand::Rng;

use crate::basic::{Cell, Grid};
use crate::snake::Occupancy;

/// Pick a random cell not covered by the snake
///
/// Cells are drawn uniformly from the whole grid and redrawn while they
/// land on the snake. Returns `None` when there is no free cell left, in
/// which case sampling would never terminate.
pub fn spawn(grid: Grid, occupancy: &Occupancy, rng: &mut impl Rng) -> Option<Cell> {
    if occupancy.len() >= grid.cell_count() {
        return None;
    }

    loop {
        let cell = Cell {
            col: rng.gen_range(0..grid.cols),
            row: rng.gen_range(0..grid.rows),
        };
        if !occupancy.contains(cell) {
            return Some(cell);
        }
        log::trace!("food landed on the snake at {:?}, retrying", cell);
    }
}
