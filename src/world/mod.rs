//! World module - tile grid, blocks and collision geometry
//!
//! - `aabb`: integer boxes and the strict edge queries collision relies on
//! - `terrain`: shared tile templates and the map code table
//! - `block`: placed tiles and their per-tick behaviour
//! - `arena`: generational block slots
//! - `map`: text loader, per-tick block pass and collideable terrain view

mod aabb;
mod arena;
mod block;
mod map;
pub mod terrain;

pub use aabb::AxisAlignedBox;
pub use block::{Block, BlockContext, BlockKind, BlockOutcome};
pub use arena::BlockId;
pub use map::{MapError, Terrain, TileMap};
pub use terrain::{TerrainType, TileRole, BLOCK_SIZE};
