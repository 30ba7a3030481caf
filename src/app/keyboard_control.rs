use crate::app::session::Input;
use crate::basic::Dir;
use ggez::input::keyboard::KeyCode::{self, *};

#[derive(Copy, Clone, Debug)]
pub struct Controls {
    pub u: KeyCode,
    pub d: KeyCode,
    pub l: KeyCode,
    pub r: KeyCode,
    pub start: KeyCode,
}

impl Default for Controls {
    fn default() -> Self {
        Self { u: Up, d: Down, l: Left, r: Right, start: Return }
    }
}

impl Controls {
    pub fn input(&self, key: KeyCode) -> Option<Input> {
        let input = match key {
            k if k == self.u => Input::Turn(Dir::U),
            k if k == self.d => Input::Turn(Dir::D),
            k if k == self.l => Input::Turn(Dir::L),
            k if k == self.r => Input::Turn(Dir::R),
            k if k == self.start => Input::Start,
            _ => return None,
        };
        Some(input)
    }
}

#[test]
fn test_arrows_and_enter() {
    let controls = Controls::default();
    assert_eq!(controls.input(Up), Some(Input::Turn(Dir::U)));
    assert_eq!(controls.input(Left), Some(Input::Turn(Dir::L)));
    assert_eq!(controls.input(Return), Some(Input::Start));
    assert_eq!(controls.input(Space), None);
}
