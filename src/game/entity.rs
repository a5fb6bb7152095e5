//! Entities: the player and patrolling enemies
//!
//! An entity is a `Body` (box, velocity, facing, state) plus the components
//! that drive it. Messages are fanned out to the reactive components in a fixed
//! order, so sound always hears about an event before health or death act on it.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use super::components::{Combat, Death, Health, MessageHandler, SoundEmitter};
use super::control::{EnemyPatrol, UserControl};
use super::physics::{Physics, PhysicsReport};
use super::settings::GameSettings;
use super::state::{Direction, EntityMessage, EntityState, SoundCue};
use crate::input::KeySnapshot;
use crate::world::{AxisAlignedBox, TileMap};

/// Velocity in units per second
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Velocity {
    pub x: i32,
    pub y: i32,
}

/// Physical state shared by every entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Body {
    pub bounds: AxisAlignedBox,
    pub velocity: Velocity,
    pub direction: Direction,
    pub state: EntityState,
}

impl Body {
    pub fn new(bounds: AxisAlignedBox) -> Self {
        Self {
            bounds,
            velocity: Velocity::default(),
            direction: Direction::default(),
            state: EntityState::default(),
        }
    }

    pub fn set_state(&mut self, state: EntityState) {
        if self.state != state {
            trace!("state {:?} -> {:?}", self.state, state);
            self.state = state;
        }
    }
}

// =============================================================================
// Player
// =============================================================================

/// Player hitbox width in pixels
pub const PLAYER_WIDTH: i32 = 20;
/// Player hitbox height in pixels
pub const PLAYER_HEIGHT: i32 = 30;
/// Where the player appears when a level does not say otherwise
pub const DEFAULT_PLAYER_START: (i32, i32) = (10, 10);

#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
    pub control: UserControl,
    pub physics: Physics,
    pub sound: SoundEmitter,
    pub health: Health,
    pub death: Death,
}

impl Player {
    pub fn new(start: (i32, i32), settings: &GameSettings) -> Self {
        let bounds = AxisAlignedBox::new(start.0, start.1, PLAYER_WIDTH, PLAYER_HEIGHT);
        Self {
            body: Body::new(bounds),
            control: UserControl::new(settings.control),
            physics: Physics::player(settings.physics),
            sound: SoundEmitter::new(),
            health: Health::new(settings.health),
            death: Death::new(),
        }
    }

    /// Deliver a message to sound, then health, then death.
    pub fn message(&mut self, message: EntityMessage) {
        // Damage swallowed by i-frames makes no sound
        self.sound.mute_hurt(self.health.is_invincible() || self.health.is_dead());
        let handlers: [&mut dyn MessageHandler; 3] = [&mut self.sound, &mut self.health, &mut self.death];
        for handler in handlers {
            handler.receive(message);
        }
    }

    /// Control, physics, then bookkeeping for one tick.
    pub fn update(&mut self, delta_time: f64, keys: KeySnapshot, map: &TileMap) -> PhysicsReport {
        if let Some(message) = self.control.update(&mut self.body, keys) {
            self.message(message);
        }

        let report = self.physics.update(delta_time, &mut self.body, map);

        self.health.tick();
        self.death.update(&self.body, Some(&self.health), map.height());
        report
    }

    pub fn is_dead(&self) -> bool {
        self.death.is_dead()
    }
}

// =============================================================================
// Enemies
// =============================================================================

/// Enemy archetypes. Only the hitbox size differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    PinkGuy,
    TrashMonster,
    ToothWalker,
}

impl EnemyKind {
    /// Hitbox (width, height) in pixels
    pub fn size(self) -> (i32, i32) {
        match self {
            EnemyKind::PinkGuy => (32, 32),
            EnemyKind::TrashMonster => (35, 32),
            EnemyKind::ToothWalker => (30, 65),
        }
    }
}

/// Where an enemy starts and how far it walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub kind: EnemyKind,
    /// Top-left corner of the hitbox
    pub position: (i32, i32),
    /// Leftmost x the enemy walks to
    pub left_bound: i32,
    /// Rightmost x the enemy walks to
    pub right_bound: i32,
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub body: Body,
    pub patrol: EnemyPatrol,
    pub physics: Physics,
    pub combat: Combat,
    pub sound: SoundEmitter,
    pub death: Death,
}

impl Enemy {
    pub fn new(spawn: &EnemySpawn, settings: &GameSettings) -> Self {
        let (width, height) = spawn.kind.size();
        let bounds = AxisAlignedBox::new(spawn.position.0, spawn.position.1, width, height);
        Self {
            kind: spawn.kind,
            body: Body::new(bounds),
            patrol: EnemyPatrol::new(settings.patrol, spawn.left_bound, spawn.right_bound),
            physics: Physics::enemy(settings.physics),
            combat: Combat::new(settings.combat),
            sound: SoundEmitter::new(),
            death: Death::new(),
        }
    }

    /// Deliver a message to patrol, then sound, then death.
    pub fn message(&mut self, message: EntityMessage) {
        let handlers: [&mut dyn MessageHandler; 3] = [&mut self.patrol, &mut self.sound, &mut self.death];
        for handler in handlers {
            handler.receive(message);
        }
    }

    /// Patrol, resolve contact with the player, then physics.
    pub fn update(&mut self, delta_time: f64, map: &TileMap, player: &mut Player) -> PhysicsReport {
        self.patrol.update(&mut self.body);

        if !self.death.is_dead() && !player.is_dead() {
            if let Some(message) = self.combat.resolve(&self.body, player) {
                debug!("{:?} {:?} by player", self.kind, message);
                self.message(message);
            }
        }

        let report = self.physics.update(delta_time, &mut self.body, map);
        self.death.update(&self.body, None, map.height());
        report
    }

    pub fn is_dead(&self) -> bool {
        self.death.is_dead()
    }

    /// Move cues the enemy emitted this tick into `queue`
    pub fn drain_sounds(&mut self, queue: &mut super::event::EventQueue<SoundCue>) {
        self.sound.drain_into(queue);
    }
}
