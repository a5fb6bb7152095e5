//! Sub-stepped integration and axis-separated collision resolution
//!
//! A frame's delta time is split into whole fixed steps plus a remainder
//! step. Each step applies gravity, moves vertically and resolves, then moves
//! horizontally and resolves. Positions and velocities are integers; every
//! product with a time step is truncated toward zero.
//!
//! Contacts are gathered once per axis pass, before any snapping. Hazardous
//! blocks take part in the vertical pass only, so entities can walk into
//! spikes but not fall through them.

use super::entity::Body;
use super::settings::PhysicsSettings;
use super::state::{Direction, EntityState};
use crate::world::{AxisAlignedBox, TileMap};

/// Gravity is specified per frame at this rate
const NOMINAL_FRAME_RATE: f64 = 60.0;

/// What happens to horizontal motion on hitting a wall
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallResponse {
    /// Snap flush and keep velocity
    Stop,
    /// Snap flush, face away and reverse velocity
    BounceBack,
}

/// Summary of one `Physics::update` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhysicsReport {
    /// Whole fixed steps taken, excluding the remainder step
    pub full_steps: u32,
    /// Landed on terrain in at least one step
    pub landed: bool,
    pub hit_ceiling: bool,
    pub hit_wall: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct Physics {
    settings: PhysicsSettings,
    response: WallResponse,
}

impl Physics {
    pub fn new(settings: PhysicsSettings, response: WallResponse) -> Self {
        Self { settings, response }
    }

    pub fn player(settings: PhysicsSettings) -> Self {
        Self::new(settings, WallResponse::Stop)
    }

    pub fn enemy(settings: PhysicsSettings) -> Self {
        Self::new(settings, WallResponse::BounceBack)
    }

    /// Advance `body` by `delta_time` seconds against the map's terrain.
    pub fn update(&self, delta_time: f64, body: &mut Body, map: &TileMap) -> PhysicsReport {
        assert!(
            delta_time >= 0.0 && delta_time.is_finite(),
            "delta time must be finite and non-negative, got {delta_time}"
        );
        assert!(
            body.bounds.width > 0 && body.bounds.height > 0,
            "entity box must have positive size, got {:?}",
            body.bounds
        );

        let step = self.settings.fixed_step;
        assert!(step.is_finite() && step > 0.0, "fixed step must be positive, got {step}");
        let mut report = PhysicsReport {
            full_steps: (delta_time / step) as u32,
            ..Default::default()
        };

        for _ in 0..report.full_steps {
            self.step(step, body, map, &mut report, true);
        }
        self.step(delta_time % step, body, map, &mut report, false);

        clamp_to_map(&mut body.bounds, map.width());
        report
    }

    /// One integration step. The remainder step only resolves vertically if
    /// it actually moved.
    fn step(&self, h: f64, body: &mut Body, map: &TileMap, report: &mut PhysicsReport, full: bool) {
        if !body.state.is_on_ladder() {
            body.velocity.y += (self.settings.gravity as f64 * h * NOMINAL_FRAME_RATE) as i32;
        }

        let dy = (body.velocity.y as f64 * h) as i32;
        body.bounds.y += dy;
        if full || dy != 0 {
            resolve_vertical(body, map, report);
        }

        body.bounds.x += (body.velocity.x as f64 * h) as i32;
        self.resolve_horizontal(body, map, report);
    }

    fn resolve_horizontal(&self, body: &mut Body, map: &TileMap, report: &mut PhysicsReport) {
        let contacts: Vec<AxisAlignedBox> = map
            .terrain()
            .overlapping(body.bounds)
            .filter(|block| !block.hazardous)
            .map(|block| block.bounds)
            .collect();

        let mut bounced_to = None;
        for block in &contacts {
            if body.bounds.is_left_edge_inside(block) {
                body.bounds.set_left(block.right());
                report.hit_wall = true;
                bounced_to = Some(Direction::Right);
            }
            if body.bounds.is_right_edge_inside(block) {
                body.bounds.set_right(block.left());
                report.hit_wall = true;
                bounced_to = Some(Direction::Left);
            }
        }

        if let (WallResponse::BounceBack, Some(direction)) = (self.response, bounced_to) {
            body.direction = direction;
            body.velocity.x = -body.velocity.x;
        }
    }
}

fn resolve_vertical(body: &mut Body, map: &TileMap, report: &mut PhysicsReport) {
    let contacts: Vec<AxisAlignedBox> = map.terrain().overlapping_boxes(body.bounds);

    let mut landed = false;
    for block in &contacts {
        if body.bounds.is_top_edge_inside(block) {
            body.bounds.set_top(block.bottom());
            body.velocity.y = 0;
            report.hit_ceiling = true;
        }
        if body.bounds.is_bottom_edge_inside(block) {
            landed = true;
            body.bounds.set_bottom(block.top());
            body.velocity.y = 0;
            if body.state == EntityState::Jumping {
                body.set_state(EntityState::Idle);
            }
        }
    }

    if landed {
        report.landed = true;
    } else if !body.state.is_on_ladder() {
        body.set_state(EntityState::Jumping);
    }
}

/// Keep the box inside the map's top, left and right edges. The bottom is
/// open so entities can fall out.
fn clamp_to_map(bounds: &mut AxisAlignedBox, map_width: i32) {
    if bounds.top() < 0 {
        bounds.set_top(0);
    }
    if bounds.left() < 0 {
        bounds.set_left(0);
    } else if bounds.right() > map_width {
        bounds.set_right(map_width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{terrain, Block, TileRole};

    const FRAME: f64 = 1.0 / 60.0;

    fn physics() -> Physics {
        Physics::player(PhysicsSettings::default())
    }

    /// 8x8 cells with a floor row at y = 175
    fn floor_map() -> TileMap {
        let mut map = TileMap::new(8, 8);
        for column in 0..8 {
            map.spawn(Block::new(&terrain::FLOOR, TileRole::Solid, column * 25, 175));
        }
        map
    }

    fn body_at(x: i32, y: i32) -> Body {
        Body::new(AxisAlignedBox::new(x, y, 20, 30))
    }

    #[test]
    fn test_one_pixel_fall_lands_flush() {
        let map = floor_map();
        let mut body = body_at(50, 144);
        body.state = EntityState::Jumping;
        body.velocity.y = 60;

        let report = physics().update(FRAME, &mut body, &map);

        assert_eq!(report.full_steps, 1);
        assert!(report.landed);
        assert_eq!(body.bounds.bottom(), 175);
        assert_eq!(body.velocity.y, 0);
        assert_eq!(body.state, EntityState::Idle);
    }

    #[test]
    fn test_resting_walker_stays_walking() {
        let map = floor_map();
        let mut body = body_at(50, 145);
        body.state = EntityState::Walking;

        for _ in 0..30 {
            physics().update(FRAME, &mut body, &map);
        }
        assert_eq!(body.bounds.bottom(), 175);
        assert_eq!(body.state, EntityState::Walking);
    }

    #[test]
    fn test_no_ground_means_jumping() {
        let map = TileMap::new(8, 8);
        let mut body = body_at(50, 50);

        physics().update(FRAME, &mut body, &map);
        assert_eq!(body.state, EntityState::Jumping);
        assert_eq!(body.velocity.y, 60);
    }

    #[test]
    fn test_ladder_states_ignore_gravity() {
        let map = TileMap::new(8, 8);
        let mut body = body_at(50, 50);
        body.state = EntityState::Hanging;

        physics().update(0.5, &mut body, &map);
        assert_eq!(body.bounds.y, 50);
        assert_eq!(body.velocity.y, 0);
        assert_eq!(body.state, EntityState::Hanging);
    }

    #[test]
    fn test_ceiling_stops_upward_motion() {
        let mut map = TileMap::new(8, 8);
        map.spawn(Block::new(&terrain::CEILING, TileRole::Solid, 50, 25));
        let mut body = body_at(50, 52);
        body.state = EntityState::Jumping;
        body.velocity.y = -600;

        let report = physics().update(FRAME, &mut body, &map);

        assert!(report.hit_ceiling);
        assert_eq!(body.bounds.top(), 50);
        assert_eq!(body.velocity.y, 0);
    }

    #[test]
    fn test_wall_stops_player_flush() {
        let mut map = floor_map();
        map.spawn(Block::new(&terrain::WALL_LEFT, TileRole::Solid, 100, 150));
        let mut body = body_at(78, 145);
        body.state = EntityState::Walking;
        body.velocity.x = 180;

        let report = physics().update(FRAME, &mut body, &map);

        assert!(report.hit_wall);
        assert_eq!(body.bounds.right(), 100);
        assert_eq!(body.velocity.x, 180);
        assert_eq!(body.direction, Direction::Right);
    }

    #[test]
    fn test_spikes_never_block_sideways() {
        let mut map = floor_map();
        // Spike hitbox occupies y 167..174 at x 100..125
        map.spawn(Block::new(&terrain::SPIKES_UPRIGHT, TileRole::Spike, 100, 150));
        let mut body = body_at(79, 145);
        body.state = EntityState::Walking;
        body.velocity.x = 180;

        physics().update(FRAME, &mut body, &map);
        assert_eq!(body.bounds.x, 82);
        assert!(body.bounds.right() > 100);
    }

    #[test]
    fn test_enemy_bounces_off_walls() {
        let mut map = floor_map();
        map.spawn(Block::new(&terrain::WALL_LEFT, TileRole::Solid, 100, 150));
        let mut body = body_at(80, 145);
        body.state = EntityState::Walking;
        body.velocity.x = 90;

        Physics::enemy(PhysicsSettings::default()).update(FRAME, &mut body, &map);

        assert_eq!(body.bounds.right(), 100);
        assert_eq!(body.direction, Direction::Left);
        assert_eq!(body.velocity.x, -90);
    }

    #[test]
    fn test_clamped_to_map_edges() {
        let map = TileMap::new(8, 8);
        let mut body = body_at(-5, -5);
        body.state = EntityState::Hanging;
        physics().update(0.0, &mut body, &map);
        assert_eq!((body.bounds.x, body.bounds.y), (0, 0));

        let mut body = body_at(190, 50);
        body.state = EntityState::Hanging;
        physics().update(0.0, &mut body, &map);
        assert_eq!(body.bounds.right(), 200);
    }

    #[test]
    fn test_bottom_is_not_clamped() {
        let map = TileMap::new(8, 8);
        let mut body = body_at(50, 190);
        physics().update(FRAME, &mut body, &map);
        assert!(body.bounds.bottom() > 200);
    }

    #[test]
    fn test_large_dt_resolves_every_step() {
        let map = floor_map();
        // 45 px above the floor, too far to fall in one step
        let mut body = body_at(50, 100);

        let report = physics().update(10.5 / 60.0, &mut body, &map);

        assert_eq!(report.full_steps, 10);
        assert!(report.landed);
        assert_eq!(body.bounds.bottom(), 175);
        assert_eq!(body.state, EntityState::Idle);
    }

    #[test]
    fn test_one_long_update_matches_many_short_ones() {
        // 1/64 s is exact in binary, so batching leaves no remainder
        let settings = PhysicsSettings {
            fixed_step: 1.0 / 64.0,
            ..Default::default()
        };
        let physics = Physics::player(settings);
        let map = TileMap::new(8, 40);

        for k in 1..=8 {
            let mut batched = body_at(50, 0);
            batched.velocity.x = 100;
            let mut stepped = batched;

            physics.update(k as f64 * settings.fixed_step, &mut batched, &map);
            for _ in 0..k {
                physics.update(settings.fixed_step, &mut stepped, &map);
            }

            assert_eq!(batched.bounds, stepped.bounds, "after {k} steps");
            assert_eq!(batched.velocity, stepped.velocity, "after {k} steps");
        }
    }

    #[test]
    fn test_batched_frames_differ_only_by_truncation() {
        let map = TileMap::new(8, 40);

        for k in 1..=10 {
            let mut batched = body_at(50, 0);
            let mut stepped = batched;

            physics().update(k as f64 * FRAME, &mut batched, &map);
            for _ in 0..k {
                physics().update(FRAME, &mut stepped, &map);
            }

            assert!((batched.bounds.y - stepped.bounds.y).abs() <= 1, "after {k} frames");
            assert!((batched.velocity.y - stepped.velocity.y).abs() <= 1, "after {k} frames");
        }
    }

    #[test]
    fn test_sub_steps_catch_thin_ledge() {
        let mut map = TileMap::new(8, 8);
        // Hitbox spans y 112..125
        map.spawn(Block::new(&terrain::FLOOR_TOP_HALF, TileRole::Solid, 50, 100));

        let mut body = body_at(50, 0);
        let report = physics().update(2.0, &mut body, &map);
        assert!(report.landed);
        assert_eq!(body.bounds.bottom(), 112);
        assert_eq!(body.state, EntityState::Idle);

        // Half-second steps move 900 px at once and pass straight through
        let coarse = Physics::player(PhysicsSettings {
            fixed_step: 0.5,
            ..Default::default()
        });
        let mut body = body_at(50, 0);
        let report = coarse.update(2.0, &mut body, &map);
        assert!(!report.landed);
        assert!(body.bounds.top() > 125);
    }

    #[test]
    fn test_small_dt_accumulates_velocity() {
        let map = TileMap::new(8, 8);
        let mut body = body_at(50, 50);
        body.state = EntityState::Jumping;

        // A quarter frame adds 15 to vy, which moves less than a pixel
        physics().update(FRAME / 4.0, &mut body, &map);
        assert_eq!(body.velocity.y, 15);
        assert_eq!(body.bounds.y, 50);
    }

    #[test]
    #[should_panic(expected = "positive size")]
    fn test_degenerate_box_panics() {
        let map = TileMap::new(8, 8);
        let mut body = Body::new(AxisAlignedBox::new(0, 0, 0, 30));
        physics().update(FRAME, &mut body, &map);
    }
}
