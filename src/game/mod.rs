//! Game simulation module
//!
//! Entities, their components and the per-level tick. Everything here is
//! deterministic given the same map, settings, key snapshots and frame times.
//!
//! Key concepts:
//! - Body: box, velocity, facing and movement state shared by every entity
//! - Components: control, physics, sound, health, death, combat
//! - Messages: synchronous notifications fanned out to an entity's components
//! - Events: cues and removals queued for the host after each tick

mod components;
mod config;
mod control;
mod entity;
mod event;
mod level;
mod physics;
mod settings;
mod state;

pub use components::{Combat, Death, Health, MessageHandler, SoundEmitter};
pub use config::{ConfigError, GameConfig, LevelSequence, LevelSpec};
pub use control::{EnemyPatrol, UserControl};
pub use entity::{
    Body, Enemy, EnemyKind, EnemySpawn, Player, Velocity, DEFAULT_PLAYER_START, PLAYER_HEIGHT, PLAYER_WIDTH,
};
pub use event::{DefeatEvent, EventQueue, Events, TickOutcome};
pub use level::Level;
pub use physics::{Physics, PhysicsReport, WallResponse};
pub use settings::{
    CombatSettings, ControlSettings, GameSettings, HealthSettings, PatrolSettings, PhysicsSettings,
};
pub use state::{Direction, EntityMessage, EntityState, SoundCue};
