//! SPIRE: simulation core for a 2D side-scrolling tile platformer
//!
//! - `world`: boxes, tile templates, blocks and the tile map
//! - `game`: entities, components, physics and the per-level tick
//! - `input`: key snapshots sampled from keyboard and gamepad
//!
//! The core is headless. A host samples input, calls `Level::update` with the
//! frame time, then draws `Level::map` and the entities and plays the queued
//! sound cues.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod game;
pub mod input;
pub mod world;
