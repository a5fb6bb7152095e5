//! Intent: keyboard control for the player, patrol for enemies
//!
//! Both are pure functions of (body state, input) to (velocity, direction,
//! state). Physics runs afterwards and may override the state on landing.

use super::components::MessageHandler;
use super::entity::Body;
use super::settings::{ControlSettings, PatrolSettings};
use super::state::{Direction, EntityMessage, EntityState};
use crate::input::KeySnapshot;

/// Player state machine driven by the key snapshot.
#[derive(Debug, Clone, Copy)]
pub struct UserControl {
    settings: ControlSettings,
}

impl UserControl {
    pub fn new(settings: ControlSettings) -> Self {
        Self { settings }
    }

    /// Apply one tick of input. Returns `Jump` when the player jumped.
    pub fn update(&self, body: &mut Body, keys: KeySnapshot) -> Option<EntityMessage> {
        let jumped = match body.state {
            EntityState::Idle => self.idle(body, keys),
            EntityState::Walking => self.walking(body, keys),
            EntityState::Jumping => {
                self.steer(body, keys);
                false
            }
            EntityState::Hanging => self.hanging(body, keys),
            EntityState::Climbing => false,
        };

        // Runs separately so a hang that turned into a climb moves this tick
        if body.state == EntityState::Climbing {
            self.climbing(body, keys);
        }

        jumped.then_some(EntityMessage::Jump)
    }

    fn idle(&self, body: &mut Body, keys: KeySnapshot) -> bool {
        body.velocity.x = 0;
        body.velocity.y = 0;

        if keys.left {
            self.walk(body, Direction::Left);
        }
        if keys.right {
            self.walk(body, Direction::Right);
        }
        self.try_jump(body, keys)
    }

    fn walking(&self, body: &mut Body, keys: KeySnapshot) -> bool {
        if keys.left || keys.right {
            self.steer(body, keys);
        } else {
            body.set_state(EntityState::Idle);
            body.velocity.x = 0;
        }
        self.try_jump(body, keys)
    }

    fn hanging(&self, body: &mut Body, keys: KeySnapshot) -> bool {
        body.velocity.x = 0;
        body.velocity.y = 0;

        if keys.up || keys.down {
            body.set_state(EntityState::Climbing);
        }
        // Facing away from the ladder side the key points to
        if keys.left {
            body.direction = Direction::Right;
        }
        if keys.right {
            body.direction = Direction::Left;
        }
        self.try_jump(body, keys)
    }

    fn climbing(&self, body: &mut Body, keys: KeySnapshot) {
        if keys.up {
            body.velocity.y = self.settings.climb_up_velocity;
        }
        if keys.down {
            body.velocity.y = self.settings.climb_down_velocity;
        }
        if !keys.up && !keys.down {
            body.set_state(EntityState::Hanging);
        }
    }

    fn walk(&self, body: &mut Body, direction: Direction) {
        body.set_state(EntityState::Walking);
        body.direction = direction;
        body.velocity.x = direction.sign() * self.settings.walk_speed;
    }

    /// Horizontal steering without a state change
    fn steer(&self, body: &mut Body, keys: KeySnapshot) {
        body.velocity.x = 0;
        if keys.left {
            body.direction = Direction::Left;
            body.velocity.x = -self.settings.walk_speed;
        }
        if keys.right {
            body.direction = Direction::Right;
            body.velocity.x = self.settings.walk_speed;
        }
    }

    fn try_jump(&self, body: &mut Body, keys: KeySnapshot) -> bool {
        if !keys.jump {
            return false;
        }
        body.set_state(EntityState::Jumping);
        body.velocity.y = self.settings.jump_velocity;
        true
    }
}

/// Walks back and forth between two x bounds.
#[derive(Debug, Clone, Copy)]
pub struct EnemyPatrol {
    settings: PatrolSettings,
    left_bound: i32,
    right_bound: i32,
    halted: bool,
}

impl EnemyPatrol {
    pub fn new(settings: PatrolSettings, left_bound: i32, right_bound: i32) -> Self {
        Self {
            settings,
            left_bound,
            right_bound,
            halted: false,
        }
    }

    pub fn bounds(&self) -> (i32, i32) {
        (self.left_bound, self.right_bound)
    }

    pub fn update(&self, body: &mut Body) {
        if self.halted {
            body.velocity.x = 0;
            return;
        }

        body.set_state(EntityState::Walking);
        let speed = self.settings.walk_speed;
        let x = body.bounds.x;
        match body.direction {
            Direction::Left if x > self.left_bound => body.velocity.x = -speed,
            Direction::Right if x < self.right_bound => body.velocity.x = speed,
            direction => {
                body.direction = direction.reverse();
                body.velocity.x = body.direction.sign() * speed;
            }
        }
    }
}

impl MessageHandler for EnemyPatrol {
    fn receive(&mut self, message: EntityMessage) {
        if message == EntityMessage::Stomped {
            self.halted = true;
        }
    }
}
