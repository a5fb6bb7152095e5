//! Primitive value types shared by every simulation component

use serde::{Deserialize, Serialize};

/// Facing direction of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    Left,
    #[default]
    Right,
}

impl Direction {
    pub fn reverse(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// -1 for Left, +1 for Right
    pub fn sign(self) -> i32 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// Movement state. Drives both control handling and gravity suppression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EntityState {
    #[default]
    Idle,
    Walking,
    Jumping,
    /// Attached to a ladder, not moving
    Hanging,
    /// Moving up or down a ladder
    Climbing,
}

impl EntityState {
    /// Ladder states ignore gravity and never fall into `Jumping`.
    pub fn is_on_ladder(self) -> bool {
        matches!(self, EntityState::Hanging | EntityState::Climbing)
    }
}

/// Messages delivered synchronously to an entity's reactive components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityMessage {
    /// Left the ground under its own power
    Jump,
    /// Standing on spikes this tick
    LandOnSpike,
    /// Picked up a coin
    ReceiveCoin,
    /// Touched an enemy from the side or below
    EnemyContact,
    /// Landed on from above by the player
    Stomped,
}

/// Audio cue queued for the host to play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Jump,
    Hurt,
    CoinPickup,
    EnemyDeath,
}
