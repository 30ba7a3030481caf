use std::fmt::{self, Display, Formatter};

use crate::basic::Point;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Style {
    Segment,
    Food,
}

/// The line(s) of text shown under the board
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Status {
    Title,
    Score(usize),
    GameOver { score: usize },
    Won { score: usize },
}

const NEW_GAME_HINT: &str = "Press ENTER key for new game";

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Status::Title => write!(f, "Snake\n{}", NEW_GAME_HINT),
            Status::Score(score) => write!(f, "{}", score),
            Status::GameOver { score } => write!(f, "{}\nGAME OVER\n{}", score, NEW_GAME_HINT),
            Status::Won { score } => write!(f, "{}\nYOU WIN\n{}", score, NEW_GAME_HINT),
        }
    }
}

/// Something that can show unit-size cells and a status line
///
/// Positions are the top-left corner of the cell in pixels. Every
/// handle returned by `create_cell` is passed back to `remove_cell`
/// exactly once when the cell goes away.
pub trait Surface {
    type Handle;

    fn create_cell(&mut self, pos: Point, style: Style) -> Self::Handle;
    fn remove_cell(&mut self, handle: Self::Handle);
    fn show_status(&mut self, status: Status);
}

#[test]
fn test_status_text() {
    assert_eq!(Status::Score(3).to_string(), "3");
    assert_eq!(
        Status::GameOver { score: 4 }.to_string(),
        "4\nGAME OVER\nPress ENTER key for new game"
    );
}
