//! Game action definitions

use std::fmt;
use std::str::FromStr;

use macroquad::prelude::KeyCode;

/// Everything the player can hold down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Jump,
}

impl Action {
    pub const ALL: [Action; 5] = [Action::Up, Action::Down, Action::Left, Action::Right, Action::Jump];

    /// Keyboard binding: arrow keys and space
    pub fn key_code(self) -> KeyCode {
        match self {
            Action::Up => KeyCode::Up,
            Action::Down => KeyCode::Down,
            Action::Left => KeyCode::Left,
            Action::Right => KeyCode::Right,
            Action::Jump => KeyCode::Space,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Action::Up => "up",
            Action::Down => "down",
            Action::Left => "left",
            Action::Right => "right",
            Action::Jump => "jump",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognised action name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown action {0:?}, expected one of up, down, left, right, jump")]
pub struct ParseActionError(String);

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "space" => Ok(Action::Jump),
            name => Action::ALL
                .into_iter()
                .find(|action| action.name() == name)
                .ok_or_else(|| ParseActionError(s.to_string())),
        }
    }
}
