use std::time::Duration;

use num_integer::Integer;

use crate::basic::{Cell, Grid};

pub const DEFAULT_WIDTH: u32 = 200;
pub const DEFAULT_HEIGHT: u32 = 200;
pub const DEFAULT_CELL_SIZE: u32 = 10;
pub const DEFAULT_SPEED_MILLIS: u64 = 200;

const_assert_eq!(DEFAULT_WIDTH % DEFAULT_CELL_SIZE, 0);
const_assert_eq!(DEFAULT_HEIGHT % DEFAULT_CELL_SIZE, 0);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Display, Error)]
pub enum ConfigError {
    #[display(fmt = "`{}` must be positive", field)]
    NotPositive { field: &'static str },
    #[display(fmt = "`{}` ({}) is not a multiple of the cell size ({})", field, value, cell_size)]
    Indivisible {
        field: &'static str,
        value: u32,
        cell_size: u32,
    },
    #[display(fmt = "`{}` is too large", field)]
    TooLarge { field: &'static str },
    #[display(fmt = "start cell {:?} is outside the {}x{} grid", start, cols, rows)]
    StartOutside { start: Cell, cols: i32, rows: i32 },
}

/// Board dimensions are in pixels
#[derive(Clone, Debug)]
pub struct Prefs {
    pub width: u32,
    pub height: u32,
    pub cell_size: u32,
    pub speed_millis: u64,

    /// Where the snake starts, random if `None`
    pub start: Option<Cell>,
}

impl Default for Prefs {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            cell_size: DEFAULT_CELL_SIZE,
            speed_millis: DEFAULT_SPEED_MILLIS,

            start: None,
        }
    }
}

// builder
impl Prefs {
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn cell_size(mut self, cell_size: u32) -> Self {
        self.cell_size = cell_size;
        self
    }

    pub fn speed_millis(mut self, speed_millis: u64) -> Self {
        self.speed_millis = speed_millis;
        self
    }

    pub fn start(mut self, start: Cell) -> Self {
        self.start = Some(start);
        self
    }
}

impl Prefs {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.speed_millis)
    }

    /// Checks every field and derives the cell grid
    pub fn grid(&self) -> Result<Grid, ConfigError> {
        if self.speed_millis == 0 {
            return Err(ConfigError::NotPositive { field: "speed_millis" });
        }
        if self.cell_size == 0 {
            return Err(ConfigError::NotPositive { field: "cell_size" });
        }

        let count = |field: &'static str, value: u32| {
            if value == 0 {
                return Err(ConfigError::NotPositive { field });
            }
            if !Integer::is_multiple_of(&value, &self.cell_size) {
                return Err(ConfigError::Indivisible {
                    field,
                    value,
                    cell_size: self.cell_size,
                });
            }
            i32::try_from(value / self.cell_size).map_err(|_| ConfigError::TooLarge { field })
        };

        let grid = Grid {
            cols: count("width", self.width)?,
            rows: count("height", self.height)?,
            cell_size: self.cell_size,
        };

        if let Some(start) = self.start {
            if !grid.contains(start) {
                return Err(ConfigError::StartOutside {
                    start,
                    cols: grid.cols,
                    rows: grid.rows,
                });
            }
        }

        Ok(grid)
    }
}
