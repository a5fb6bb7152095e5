//! Input state management
//!
//! Polls keyboard (macroquad) and gamepad (gilrs) input, combining them into
//! one `KeySnapshot` per tick. The simulation only ever sees the snapshot.

use macroquad::prelude::is_key_down;

use super::{Action, Gamepad};

/// Which actions are held during one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeySnapshot {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl KeySnapshot {
    /// Read the keyboard. Only valid inside a running macroquad window.
    pub fn poll() -> Self {
        Self::from_fn(|action| is_key_down(action.key_code()))
    }

    /// Snapshot with exactly the given actions held
    pub fn holding(actions: &[Action]) -> Self {
        Self::from_fn(|action| actions.contains(&action))
    }

    fn from_fn(mut held: impl FnMut(Action) -> bool) -> Self {
        let mut snapshot = Self::default();
        for action in Action::ALL {
            snapshot.set(action, held(action));
        }
        snapshot
    }

    pub fn is_down(&self, action: Action) -> bool {
        match action {
            Action::Up => self.up,
            Action::Down => self.down,
            Action::Left => self.left,
            Action::Right => self.right,
            Action::Jump => self.jump,
        }
    }

    pub fn set(&mut self, action: Action, held: bool) {
        let slot = match action {
            Action::Up => &mut self.up,
            Action::Down => &mut self.down,
            Action::Left => &mut self.left,
            Action::Right => &mut self.right,
            Action::Jump => &mut self.jump,
        };
        *slot = held;
    }

    /// Held in either snapshot
    pub fn merge(self, other: KeySnapshot) -> Self {
        Self::from_fn(|action| self.is_down(action) || other.is_down(action))
    }
}

/// Keyboard plus gamepad
#[derive(Default)]
pub struct InputState {
    gamepad: Gamepad,
}

impl InputState {
    pub fn new() -> Self {
        Self { gamepad: Gamepad::new() }
    }

    /// Call once per frame before the simulation tick
    pub fn poll(&mut self) -> KeySnapshot {
        self.gamepad.poll();
        let pad = KeySnapshot::from_fn(|action| self.gamepad.is_down(action));
        KeySnapshot::poll().merge(pad)
    }

    /// Check if any gamepad is connected
    pub fn has_gamepad(&self) -> bool {
        self.gamepad.has_gamepad()
    }
}
