//! Gamepad support
//!
//! Native: Uses gilrs crate for cross-platform gamepad input. D-pad or left
//! stick steer, South (A / Cross) jumps.
//! WASM: No gamepad; keyboard only.

use super::Action;

/// Stick deflection needed before a direction counts as held
const STICK_THRESHOLD: f32 = 0.5;

// ============================================================================
// WASM Implementation
// ============================================================================

#[cfg(target_arch = "wasm32")]
mod platform {
    use super::*;

    #[derive(Default)]
    pub struct Gamepad;

    impl Gamepad {
        pub fn new() -> Self {
            Self
        }

        pub fn poll(&mut self) {}

        pub fn has_gamepad(&self) -> bool {
            false
        }

        pub fn is_down(&self, _action: Action) -> bool {
            false
        }
    }
}

// ============================================================================
// Native Implementation (gilrs)
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
mod platform {
    use super::*;
    use gilrs::{Axis, Button, Gilrs};
    use log::warn;

    pub struct Gamepad {
        /// None when the platform backend failed to start
        gilrs: Option<Gilrs>,
    }

    impl Gamepad {
        pub fn new() -> Self {
            let gilrs = match Gilrs::new() {
                Ok(gilrs) => Some(gilrs),
                Err(err) => {
                    warn!("gamepad support unavailable: {}", err);
                    None
                }
            };
            Self { gilrs }
        }

        /// Drain pending events so button state is current
        pub fn poll(&mut self) {
            if let Some(gilrs) = self.gilrs.as_mut() {
                while gilrs.next_event().is_some() {}
            }
        }

        pub fn has_gamepad(&self) -> bool {
            self.active().is_some()
        }

        fn active(&self) -> Option<gilrs::Gamepad<'_>> {
            self.gilrs.as_ref()?.gamepads().next().map(|(_, gp)| gp)
        }

        pub fn is_down(&self, action: Action) -> bool {
            let Some(gp) = self.active() else { return false };

            let stick_x = gp.value(Axis::LeftStickX);
            let stick_y = gp.value(Axis::LeftStickY);
            match action {
                Action::Up => gp.is_pressed(Button::DPadUp) || stick_y > STICK_THRESHOLD,
                Action::Down => gp.is_pressed(Button::DPadDown) || stick_y < -STICK_THRESHOLD,
                Action::Left => gp.is_pressed(Button::DPadLeft) || stick_x < -STICK_THRESHOLD,
                Action::Right => gp.is_pressed(Button::DPadRight) || stick_x > STICK_THRESHOLD,
                Action::Jump => gp.is_pressed(Button::South),
            }
        }
    }

    impl Default for Gamepad {
        fn default() -> Self {
            Self::new()
        }
    }
}

pub use platform::Gamepad;
