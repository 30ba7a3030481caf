use std::fmt::{Debug, Error, Formatter};

use num_integer::Integer;

use super::dir::Dir;
use crate::basic::Point;

#[derive(Eq, PartialEq, Copy, Clone, Hash)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    #[must_use]
    pub fn translate(self, dir: Dir) -> Self {
        let (dc, dr) = dir.delta();
        Self {
            col: self.col + dc,
            row: self.row + dr,
        }
    }
}

impl Debug for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "<{}, {}>", self.col, self.row)
    }
}

/// Board extents in cells together with the pixel size of one cell
// INVARIANT: cols, rows and cell_size are positive (checked by Prefs::grid)
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Grid {
    pub cols: i32,
    pub rows: i32,
    pub cell_size: u32,
}

impl Grid {
    pub fn contains(self, cell: Cell) -> bool {
        (0..self.cols).contains(&cell.col) && (0..self.rows).contains(&cell.row)
    }

    pub fn cell_count(self) -> usize {
        self.cols as usize * self.rows as usize
    }

    /// Top-left corner of the cell in pixels
    pub fn to_pixel(self, cell: Cell) -> Point {
        let side = self.cell_size as f32;
        Point {
            x: cell.col as f32 * side,
            y: cell.row as f32 * side,
        }
    }

    /// The cell covering the given pixel, rounding towards negative infinity
    /// so that pixels left of or above the board map to negative cells
    pub fn cell_at_pixel(self, x: i32, y: i32) -> Cell {
        let side = self.cell_size as i32;
        Cell {
            col: Integer::div_floor(&x, &side),
            row: Integer::div_floor(&y, &side),
        }
    }

    pub fn pixel_size(self) -> Point {
        Point {
            x: (self.cols as u32 * self.cell_size) as f32,
            y: (self.rows as u32 * self.cell_size) as f32,
        }
    }
}
