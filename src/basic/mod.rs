pub use cell::{Cell, Grid};
pub use dir::Dir;
pub use point::Point;

mod cell;
mod dir;
mod point;
