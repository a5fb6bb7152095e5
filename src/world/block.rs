//! Blocks: positioned terrain instances and their per-tick behaviour
//!
//! Each block kind reacts to the player (and sometimes the surrounding
//! terrain) once per tick, after entity physics has run. Contact tests are
//! strict along one axis and exact along the resting axis, so the player must
//! be flush against a platform to ride it, not merely overlapping it.

use log::{debug, info};

use super::aabb::AxisAlignedBox;
use super::map::Terrain;
use super::terrain::{TerrainType, TileRole};
use crate::game::{EntityMessage, EntityState, EventQueue, Player, SoundCue};
use crate::input::KeySnapshot;

/// Pixels a falling block sinks per tick while ridden
const FALL_SPEED: i32 = 1;
/// Pixels a moving block travels per tick
const MOVE_SPEED: i32 = 1;
/// Push displacement is the center distance divided by this, per tick
const PUSH_DIVISOR: i32 = 20;
/// Velocity a pushable block gains per tick while airborne
const PUSHABLE_GRAVITY: i32 = 1;

/// Per-kind behaviour and state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Solid,
    Decoration,
    Spike,
    /// Level exit
    Gateway,
    Falling {
        /// Set once the block has landed on terrain; it never moves again
        fallen: bool,
    },
    /// Platform steered by whoever stands on it
    Moving,
    Coin,
    Ladder {
        /// One pixel wide column at the ladder's center
        sensor: AxisAlignedBox,
    },
    Pushable {
        velocity_y: i32,
    },
}

/// What the map should do with a block after its update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockOutcome {
    Keep,
    /// Remove the block from the map
    Consume,
    /// The player reached the exit
    SwitchLevel,
}

/// Everything a block may touch during its update, besides terrain.
pub struct BlockContext<'a> {
    pub player: &'a mut Player,
    pub keys: KeySnapshot,
    pub cues: &'a mut EventQueue<SoundCue>,
}

/// A tile placed in the map.
#[derive(Debug, Clone)]
pub struct Block {
    /// Shared template this block was built from
    pub terrain: &'static TerrainType,
    /// Live hitbox
    pub bounds: AxisAlignedBox,
    /// Hurts on contact and never blocks horizontal movement
    pub hazardous: bool,
    pub kind: BlockKind,
}

impl Block {
    /// Build a block whose map cell origin is at (x, y).
    pub fn new(terrain: &'static TerrainType, role: TileRole, x: i32, y: i32) -> Self {
        let bounds = terrain.hitbox_at(x, y);
        let kind = match role {
            TileRole::Solid => BlockKind::Solid,
            TileRole::Decoration => BlockKind::Decoration,
            TileRole::Spike => BlockKind::Spike,
            TileRole::Gateway => BlockKind::Gateway,
            TileRole::Falling => BlockKind::Falling { fallen: false },
            TileRole::Moving => BlockKind::Moving,
            TileRole::Coin => BlockKind::Coin,
            TileRole::Ladder => BlockKind::Ladder {
                sensor: ladder_sensor(&bounds),
            },
            TileRole::Pushable => BlockKind::Pushable { velocity_y: 1 },
        };

        Self {
            terrain,
            bounds,
            hazardous: role == TileRole::Spike,
            kind,
        }
    }

    /// Part of the collideable terrain group that physics resolves against
    pub fn is_collideable(&self) -> bool {
        matches!(
            self.kind,
            BlockKind::Solid
                | BlockKind::Spike
                | BlockKind::Falling { .. }
                | BlockKind::Moving
                | BlockKind::Pushable { .. }
        )
    }

    /// Has per-tick behaviour
    pub fn is_interactive(&self) -> bool {
        !matches!(self.kind, BlockKind::Solid | BlockKind::Decoration)
    }

    /// Visual handle for the renderer
    pub fn visual(&self) -> &'static str {
        self.terrain.name
    }

    /// React to the player and terrain for one tick.
    pub fn update(&mut self, ctx: &mut BlockContext<'_>, terrain: &Terrain<'_>) -> BlockOutcome {
        match &mut self.kind {
            BlockKind::Solid | BlockKind::Decoration => BlockOutcome::Keep,
            BlockKind::Spike => {
                update_spike(&self.bounds, ctx);
                BlockOutcome::Keep
            }
            BlockKind::Gateway => update_gateway(&self.bounds, ctx),
            BlockKind::Falling { fallen } => {
                update_falling(&mut self.bounds, fallen, ctx, terrain);
                BlockOutcome::Keep
            }
            BlockKind::Moving => {
                update_moving(&mut self.bounds, ctx);
                BlockOutcome::Keep
            }
            BlockKind::Coin => update_coin(&self.bounds, ctx),
            BlockKind::Ladder { sensor } => {
                update_ladder(sensor, ctx);
                BlockOutcome::Keep
            }
            BlockKind::Pushable { velocity_y } => {
                update_pushable(&mut self.bounds, velocity_y, ctx, terrain);
                BlockOutcome::Keep
            }
        }
    }
}

/// 1 px column starting half a pixel left of center, truncated
fn ladder_sensor(bounds: &AxisAlignedBox) -> AxisAlignedBox {
    let x = (bounds.center_x() as f64 - 0.5) as i32;
    AxisAlignedBox::new(x, bounds.top(), 1, bounds.height)
}

fn update_spike(bounds: &AxisAlignedBox, ctx: &mut BlockContext<'_>) {
    let player = &mut ctx.player;

    // Spikes only ever sit on the floor, so contact always comes from above
    if bounds.intersects(&player.body.bounds) {
        player.body.bounds.set_bottom(bounds.top());
    }

    if player.body.bounds.rests_on(bounds) {
        player.message(EntityMessage::LandOnSpike);
    }
}

fn update_gateway(bounds: &AxisAlignedBox, ctx: &mut BlockContext<'_>) -> BlockOutcome {
    if ctx.player.body.bounds.contains_point(bounds.center_x(), bounds.center_y()) {
        info!("player reached exit at ({}, {})", bounds.x, bounds.y);
        BlockOutcome::SwitchLevel
    } else {
        BlockOutcome::Keep
    }
}

fn update_falling(
    bounds: &mut AxisAlignedBox,
    fallen: &mut bool,
    ctx: &mut BlockContext<'_>,
    terrain: &Terrain<'_>,
) {
    let player = &mut ctx.player.body;
    if !*fallen && player.bounds.rests_on(bounds) {
        bounds.y += FALL_SPEED;
        // Keep the rider glued on, otherwise it flickers between Idle and Jumping
        player.bounds.set_bottom(bounds.top());
    }

    for other in terrain.overlapping_boxes(*bounds) {
        if bounds.is_bottom_edge_inside(&other) {
            bounds.set_bottom(other.top());
            if !*fallen {
                debug!("falling block settled at ({}, {})", bounds.x, bounds.y);
            }
            *fallen = true;
        }
    }
}

fn update_moving(bounds: &mut AxisAlignedBox, ctx: &mut BlockContext<'_>) {
    let player = &mut ctx.player.body;
    if !player.bounds.rests_on(bounds) || player.state.is_on_ladder() {
        return;
    }

    bounds.x += MOVE_SPEED * player.direction.sign();
    player.bounds.x = bounds.x;

    if ctx.keys.up {
        bounds.y -= MOVE_SPEED;
        player.bounds.set_bottom(bounds.top());
    } else if ctx.keys.down {
        bounds.y += MOVE_SPEED;
        player.bounds.set_bottom(bounds.top());
    }
}

fn update_coin(bounds: &AxisAlignedBox, ctx: &mut BlockContext<'_>) -> BlockOutcome {
    if !bounds.intersects(&ctx.player.body.bounds) {
        return BlockOutcome::Keep;
    }

    ctx.player.message(EntityMessage::ReceiveCoin);
    ctx.cues.send(SoundCue::CoinPickup);
    BlockOutcome::Consume
}

fn update_ladder(sensor: &AxisAlignedBox, ctx: &mut BlockContext<'_>) {
    let player = &mut ctx.player.body;
    if sensor.intersects(&player.bounds)
        && player.state != EntityState::Jumping
        && (ctx.keys.up || ctx.keys.down)
    {
        player.bounds.set_center_x(sensor.center_x());
        player.set_state(EntityState::Hanging);
    }
}

fn update_pushable(
    bounds: &mut AxisAlignedBox,
    velocity_y: &mut i32,
    ctx: &mut BlockContext<'_>,
    terrain: &Terrain<'_>,
) {
    let player = &ctx.player.body;
    let beside = bounds.left() == player.bounds.right() || bounds.right() == player.bounds.left();
    if beside && player.state == EntityState::Walking && player.bounds.bottom() == bounds.bottom() {
        // Per tick, not per second: push speed depends on frame rate
        bounds.x += (bounds.center_x() - player.bounds.center_x()) / PUSH_DIVISOR;
    }

    for other in terrain.overlapping_boxes(*bounds) {
        if bounds.is_left_edge_inside(&other) {
            bounds.set_left(other.right());
        }
        if bounds.is_right_edge_inside(&other) {
            bounds.set_right(other.left());
        }
    }

    *velocity_y += PUSHABLE_GRAVITY;
    bounds.y += *velocity_y;

    for other in terrain.overlapping_boxes(*bounds) {
        if bounds.is_top_edge_inside(&other) {
            bounds.set_top(other.bottom());
            *velocity_y = 0;
        }
        if bounds.is_bottom_edge_inside(&other) {
            bounds.set_bottom(other.top());
            *velocity_y = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameSettings, SoundCue};
    use crate::world::{terrain, TileMap, BLOCK_SIZE};

    fn player_at(x: i32, y: i32) -> Player {
        Player::new((x, y), &GameSettings::default())
    }

    fn run(block: &mut Block, player: &mut Player, keys: KeySnapshot, map: &TileMap) -> BlockOutcome {
        let mut cues = EventQueue::new();
        let mut ctx = BlockContext { player, keys, cues: &mut cues };
        block.update(&mut ctx, &map.terrain())
    }

    #[test]
    fn test_spike_snaps_and_reports_landing() {
        let map = TileMap::new(4, 4);
        let mut spike = Block::new(&terrain::SPIKES_UPRIGHT, TileRole::Spike, 0, 25);
        assert!(spike.hazardous);
        let spike_top = spike.bounds.top();

        // Sunk 3 px into the spike
        let mut player = player_at(2, spike_top - 27);
        run(&mut spike, &mut player, KeySnapshot::default(), &map);

        assert_eq!(player.body.bounds.bottom(), spike_top);
        assert_eq!(player.health.current(), 80);
    }

    #[test]
    fn test_spike_ignores_diagonal_contact() {
        let map = TileMap::new(4, 4);
        let mut spike = Block::new(&terrain::SPIKES_UPRIGHT, TileRole::Spike, 25, 25);
        let top = spike.bounds.top();

        // Right edge exactly on the spike's left edge
        let mut player = player_at(5, top - 30);
        run(&mut spike, &mut player, KeySnapshot::default(), &map);
        assert_eq!(player.health.current(), 100);
    }

    #[test]
    fn test_gateway_needs_center_inside_player() {
        let map = TileMap::new(8, 8);
        let mut gate = Block::new(&terrain::ENTRANCE_EXIT, TileRole::Gateway, 50, 50);
        let (cx, cy) = (gate.bounds.center_x(), gate.bounds.center_y());

        let mut far = player_at(cx + 1, cy - 10);
        assert_eq!(run(&mut gate, &mut far, KeySnapshot::default(), &map), BlockOutcome::Keep);

        let mut over = player_at(cx - 10, cy - 15);
        assert_eq!(run(&mut gate, &mut over, KeySnapshot::default(), &map), BlockOutcome::SwitchLevel);
    }

    #[test]
    fn test_falling_block_sinks_under_rider_then_settles() {
        let mut map = TileMap::new(4, 4);
        // Floor one pixel below the falling block
        map.spawn(Block::new(&terrain::FLOOR, TileRole::Solid, 0, 51));
        let mut falling = Block::new(&terrain::FALLING_BLOCK, TileRole::Falling, 0, 25);

        let mut rider = player_at(2, 25 - 30);
        run(&mut falling, &mut rider, KeySnapshot::default(), &map);
        assert_eq!(falling.bounds.y, 26);
        assert_eq!(rider.body.bounds.bottom(), 26);
        assert_eq!(falling.kind, BlockKind::Falling { fallen: false });

        // Flush with the floor now; one more tick pushes it in and it settles
        run(&mut falling, &mut rider, KeySnapshot::default(), &map);
        assert_eq!(falling.bounds.bottom(), 51);
        assert_eq!(falling.kind, BlockKind::Falling { fallen: true });

        // Fallen blocks stay put even when ridden
        let y = falling.bounds.y;
        rider.body.bounds.set_bottom(falling.bounds.top());
        run(&mut falling, &mut rider, KeySnapshot::default(), &map);
        assert_eq!(falling.bounds.y, y);
    }

    #[test]
    fn test_moving_block_carries_rider_in_facing_direction() {
        let map = TileMap::new(8, 8);
        let mut platform = Block::new(&terrain::MOVING_BLOCK, TileRole::Moving, 50, 100);
        let mut rider = player_at(55, 70);
        rider.body.direction = crate::game::Direction::Left;

        run(&mut platform, &mut rider, KeySnapshot { up: true, ..Default::default() }, &map);

        assert_eq!(platform.bounds.x, 49);
        assert_eq!(platform.bounds.y, 99);
        assert_eq!(rider.body.bounds.x, 49);
        assert_eq!(rider.body.bounds.bottom(), 99);
    }

    #[test]
    fn test_moving_block_ignores_climbing_player() {
        let map = TileMap::new(8, 8);
        let mut platform = Block::new(&terrain::MOVING_BLOCK, TileRole::Moving, 50, 100);
        let mut climber = player_at(55, 70);
        climber.body.state = EntityState::Climbing;

        run(&mut platform, &mut climber, KeySnapshot::default(), &map);
        assert_eq!(platform.bounds, AxisAlignedBox::new(50, 100, 25, 25));
    }

    #[test]
    fn test_coin_is_consumed_with_cue() {
        let map = TileMap::new(4, 4);
        let mut coin = Block::new(&terrain::COIN, TileRole::Coin, 0, 0);
        let mut player = player_at(0, 0);
        player.health.set_current(50);

        let mut cues = EventQueue::new();
        let outcome = {
            let mut ctx = BlockContext { player: &mut player, keys: KeySnapshot::default(), cues: &mut cues };
            coin.update(&mut ctx, &map.terrain())
        };

        assert_eq!(outcome, BlockOutcome::Consume);
        assert_eq!(player.health.current(), 60);
        assert_eq!(cues.iter().copied().collect::<Vec<_>>(), vec![SoundCue::CoinPickup]);
    }

    #[test]
    fn test_ladder_snaps_player_to_sensor() {
        let map = TileMap::new(8, 8);
        let mut ladder = Block::new(&terrain::LADDER, TileRole::Ladder, 50, 50);
        let BlockKind::Ladder { sensor } = ladder.kind else { panic!("not a ladder") };
        assert_eq!(sensor, AxisAlignedBox::new(61, 50, 1, BLOCK_SIZE));

        let mut player = player_at(45, 40);
        run(&mut ladder, &mut player, KeySnapshot::default(), &map);
        assert_eq!(player.body.state, EntityState::Idle);

        run(&mut ladder, &mut player, KeySnapshot { up: true, ..Default::default() }, &map);
        assert_eq!(player.body.state, EntityState::Hanging);
        assert_eq!(player.body.bounds.center_x(), 61);
    }

    #[test]
    fn test_ladder_ignores_jumping_player() {
        let map = TileMap::new(8, 8);
        let mut ladder = Block::new(&terrain::LADDER, TileRole::Ladder, 50, 50);
        let mut player = player_at(45, 40);
        player.body.state = EntityState::Jumping;

        run(&mut ladder, &mut player, KeySnapshot { down: true, ..Default::default() }, &map);
        assert_eq!(player.body.state, EntityState::Jumping);
        assert_eq!(player.body.bounds.x, 45);
    }

    #[test]
    fn test_pushable_moves_a_twentieth_of_center_distance() {
        let mut map = TileMap::new(8, 8);
        map.spawn(Block::new(&terrain::FLOOR, TileRole::Solid, 0, 125));
        map.spawn(Block::new(&terrain::FLOOR, TileRole::Solid, 25, 125));
        map.spawn(Block::new(&terrain::FLOOR, TileRole::Solid, 50, 125));
        map.spawn(Block::new(&terrain::FLOOR, TileRole::Solid, 75, 125));
        let mut crate_block = Block::new(&terrain::PUSHABLE, TileRole::Pushable, 50, 100);

        // Flush against the crate's left face, same floor
        let mut player = player_at(30, 95);
        player.body.state = EntityState::Walking;

        run(&mut crate_block, &mut player, KeySnapshot::default(), &map);

        // Centers 62 and 40: 22 / 20 truncates to 1
        assert_eq!(crate_block.bounds.x, 51);
        assert_eq!(crate_block.bounds.bottom(), 125);
        assert_eq!(crate_block.kind, BlockKind::Pushable { velocity_y: 0 });
    }

    #[test]
    fn test_pushable_ignores_idle_player() {
        let mut map = TileMap::new(8, 8);
        map.spawn(Block::new(&terrain::FLOOR, TileRole::Solid, 50, 125));
        let mut crate_block = Block::new(&terrain::PUSHABLE, TileRole::Pushable, 50, 100);
        let mut player = player_at(30, 95);

        run(&mut crate_block, &mut player, KeySnapshot::default(), &map);
        assert_eq!(crate_block.bounds.x, 50);
    }

    #[test]
    fn test_pushable_falls_under_gravity() {
        let map = TileMap::new(8, 8);
        let mut crate_block = Block::new(&terrain::PUSHABLE, TileRole::Pushable, 0, 0);
        let mut player = player_at(150, 150);

        run(&mut crate_block, &mut player, KeySnapshot::default(), &map);
        assert_eq!(crate_block.bounds.y, 2);
        run(&mut crate_block, &mut player, KeySnapshot::default(), &map);
        assert_eq!(crate_block.bounds.y, 5);
    }
}
