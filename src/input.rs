use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::snake::Direction;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Turn(Direction),
    Quit,
    None,
}

pub fn map_key(ev: &KeyEvent) -> KeyAction {
    match ev {
        ev if is_ctrl_c(ev) => KeyAction::Quit,
        KeyEvent { code, modifiers: _ } => match code {
            KeyCode::Left => KeyAction::Turn(Direction::Left),
            KeyCode::Up => KeyAction::Turn(Direction::Up),
            KeyCode::Right => KeyAction::Turn(Direction::Right),
            KeyCode::Down => KeyAction::Turn(Direction::Down),
            KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,
            _ => KeyAction::None,
        }
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}
