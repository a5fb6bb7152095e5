//! Terrain types and the tile code table
//!
//! A `TerrainType` is a shared template: a visual handle plus a footprint
//! expressed as fractions of one block. Every block of the same type points at
//! the same `'static` instance. Footprints are converted to pixels by
//! truncating toward zero, so a 0.3-block spike is 7 px tall, not 8.

use super::aabb::AxisAlignedBox;

/// Edge length of one map cell in pixels
pub const BLOCK_SIZE: i32 = 25;

/// Immutable visual + hitbox template for one kind of tile.
#[derive(Debug, PartialEq)]
pub struct TerrainType {
    /// Visual handle the renderer resolves to a sprite
    pub name: &'static str,
    /// Offset of the footprint from the cell origin, in blocks
    pub offset_x: f64,
    pub offset_y: f64,
    /// Footprint size, in blocks
    pub width: f64,
    pub height: f64,
}

impl TerrainType {
    pub const fn new(name: &'static str, offset_x: f64, offset_y: f64, width: f64, height: f64) -> Self {
        Self { name, offset_x, offset_y, width, height }
    }

    /// A type filling exactly one cell
    pub const fn full(name: &'static str) -> Self {
        Self::new(name, 0.0, 0.0, 1.0, 1.0)
    }

    /// Pixel hitbox for an instance whose cell origin is at (x, y).
    pub fn hitbox_at(&self, x: i32, y: i32) -> AxisAlignedBox {
        AxisAlignedBox::new(
            x + to_pixels(self.offset_x),
            y + to_pixels(self.offset_y),
            to_pixels(self.width),
            to_pixels(self.height),
        )
    }
}

fn to_pixels(blocks: f64) -> i32 {
    (blocks * BLOCK_SIZE as f64) as i32
}

/// What a tile does once placed. Decides the block's collision class and
/// per-tick behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileRole {
    /// Plain collideable terrain
    Solid,
    /// Background art, never collides
    Decoration,
    Spike,
    Gateway,
    Falling,
    Moving,
    Coin,
    Ladder,
    Pushable,
}

// =============================================================================
// Interactive blocks
// =============================================================================

pub static SPIKES_UPRIGHT: TerrainType = TerrainType::new("SPIKES_UPRIGHT", 0.0, 0.7, 1.0, 0.3);
pub static ENTRANCE_EXIT: TerrainType = TerrainType::new("ENTRANCE_EXIT", 0.0, -0.5, 1.0, 1.5);
pub static COIN: TerrainType = TerrainType::new("COIN", 0.2, 0.2, 0.6, 0.6);
pub static FALLING_BLOCK: TerrainType = TerrainType::full("FALLING_BLOCK");
pub static MOVING_BLOCK: TerrainType = TerrainType::full("MOVING_BLOCK");
pub static LADDER: TerrainType = TerrainType::full("LADDER");
pub static PUSHABLE: TerrainType = TerrainType::full("PUSHABLE");

// =============================================================================
// Collideable blocks
// =============================================================================

pub static CORNER_BOTTOM_LEFT: TerrainType = TerrainType::full("CORNER_BOTTOM_LEFT");
pub static CORNER_BOTTOM_RIGHT: TerrainType = TerrainType::full("CORNER_BOTTOM_RIGHT");
pub static CORNER_TOP_LEFT_1: TerrainType = TerrainType::full("CORNER_TOP_LEFT_1");
pub static CORNER_TOP_LEFT_2: TerrainType = TerrainType::full("CORNER_TOP_LEFT_2");
pub static CORNER_TOP_LEFT_3: TerrainType = TerrainType::full("CORNER_TOP_LEFT_3");
pub static CORNER_TOP_LEFT_4: TerrainType = TerrainType::full("CORNER_TOP_LEFT_4");
pub static CORNER_TOP_RIGHT_1: TerrainType = TerrainType::full("CORNER_TOP_RIGHT_1");
pub static CORNER_TOP_RIGHT_2: TerrainType = TerrainType::full("CORNER_TOP_RIGHT_2");
pub static CORNER_TOP_RIGHT_3: TerrainType = TerrainType::full("CORNER_TOP_RIGHT_3");
pub static CORNER_TOP_RIGHT_4: TerrainType = TerrainType::full("CORNER_TOP_RIGHT_4");
pub static WALL_LEFT: TerrainType = TerrainType::full("WALL_LEFT");
pub static WALL_RIGHT: TerrainType = TerrainType::full("WALL_RIGHT");
pub static CEILING: TerrainType = TerrainType::full("CEILING");
pub static FLOOR: TerrainType = TerrainType::full("FLOOR");
pub static FLOOR_TOP_HALF: TerrainType = TerrainType::new("FLOOR_TOP_HALF", 0.0, 0.48, 1.0, 0.52);

// =============================================================================
// Decorations
// =============================================================================

pub static BG_FILLER: TerrainType = TerrainType::full("BG_FILLER");
pub static BG_WALL: TerrainType = TerrainType::full("BG_WALL");
pub static BG_WALL_BOTTOM_HALF: TerrainType = TerrainType::new("BG_WALL_BOTTOM_HALF", 0.0, 0.48, 1.0, 0.52);
pub static BG_WINDOW_DOUBLE: TerrainType = TerrainType::new("BG_WINDOW_DOUBLE", 0.0, 0.0, 4.5, 4.0);
pub static BG_WINDOW_SINGLE: TerrainType = TerrainType::new("BG_WINDOW_SINGLE", -0.5, -0.40625, 2.0, 2.0);
pub static BG_WINDOW_BARRED: TerrainType = TerrainType::new("BG_WINDOW_BARRED", 0.0, -0.28125, 1.0, 1.28125);
pub static BG_SHELF_POTIONS: TerrainType = TerrainType::new("BG_SHELF_POTIONS", 0.0, -1.0, 1.0, 2.0);
pub static BG_SHELF_BOOKS: TerrainType = TerrainType::new("BG_SHELF_BOOKS", 0.0, -1.0, 1.0, 2.0);
pub static BG_SHELF_EMPTY: TerrainType = TerrainType::new("BG_SHELF_EMPTY", 0.0, -1.0, 1.0, 2.0);
pub static BG_BANNER_RED_LARGE_1: TerrainType = TerrainType::new("BG_BANNER_RED_LARGE_1", -0.25, 0.0, 3.5, 2.5);
pub static BG_BANNER_RED_LARGE_2: TerrainType = TerrainType::new("BG_BANNER_RED_LARGE_2", -0.25, 0.0, 3.5, 2.5);

/// Code used in map files for a cell with no block
pub const EMPTY_CODE: &str = "--";

/// Resolve a two-character map code to its terrain template and role.
pub fn lookup(code: &str) -> Option<(&'static TerrainType, TileRole)> {
    use TileRole::*;

    let entry = match code {
        "SP" => (&SPIKES_UPRIGHT, Spike),
        "GW" => (&ENTRANCE_EXIT, Gateway),
        "CN" => (&COIN, Coin),
        "FB" => (&FALLING_BLOCK, Falling),
        "MB" => (&MOVING_BLOCK, Moving),
        "LB" => (&LADDER, Ladder),
        "PB" => (&PUSHABLE, Pushable),

        "f1" => (&FLOOR, Solid),
        "f2" => (&FLOOR_TOP_HALF, Solid),
        "l1" => (&WALL_LEFT, Solid),
        "r1" => (&WALL_RIGHT, Solid),
        "c1" => (&CEILING, Solid),
        "bl" => (&CORNER_BOTTOM_LEFT, Solid),
        "br" => (&CORNER_BOTTOM_RIGHT, Solid),
        "k1" => (&CORNER_TOP_LEFT_1, Solid),
        "k2" => (&CORNER_TOP_LEFT_2, Solid),
        "k3" => (&CORNER_TOP_LEFT_3, Solid),
        "k4" => (&CORNER_TOP_LEFT_4, Solid),
        "k5" => (&CORNER_TOP_RIGHT_1, Solid),
        "k6" => (&CORNER_TOP_RIGHT_2, Solid),
        "k7" => (&CORNER_TOP_RIGHT_3, Solid),
        "k8" => (&CORNER_TOP_RIGHT_4, Solid),

        "xx" => (&BG_FILLER, Decoration),
        "wl" => (&BG_WALL, Decoration),
        "wb" => (&BG_WALL_BOTTOM_HALF, Decoration),
        "2w" => (&BG_WINDOW_DOUBLE, Decoration),
        "1w" => (&BG_WINDOW_SINGLE, Decoration),
        "bw" => (&BG_WINDOW_BARRED, Decoration),
        "s1" => (&BG_SHELF_POTIONS, Decoration),
        "s2" => (&BG_SHELF_BOOKS, Decoration),
        "s3" => (&BG_SHELF_EMPTY, Decoration),
        "b1" => (&BG_BANNER_RED_LARGE_1, Decoration),
        "b2" => (&BG_BANNER_RED_LARGE_2, Decoration),

        _ => return None,
    };
    Some(entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footprints_truncate_toward_zero() {
        // 0.7 * 25 = 17.5 and 0.3 * 25 = 7.5
        assert_eq!(SPIKES_UPRIGHT.hitbox_at(0, 0), AxisAlignedBox::new(0, 17, 25, 7));
        // -0.5 * 25 = -12.5 truncates to -12, not -13
        assert_eq!(ENTRANCE_EXIT.hitbox_at(100, 100), AxisAlignedBox::new(100, 88, 25, 37));
        assert_eq!(COIN.hitbox_at(50, 0), AxisAlignedBox::new(55, 5, 15, 15));
        assert_eq!(FLOOR_TOP_HALF.hitbox_at(0, 25), AxisAlignedBox::new(0, 37, 25, 13));
    }

    #[test]
    fn test_lookup_shares_one_template_per_type() {
        let (a, role_a) = lookup("f1").unwrap();
        let (b, role_b) = lookup("f1").unwrap();
        assert!(std::ptr::eq(a, b));
        assert_eq!(role_a, TileRole::Solid);
        assert_eq!(role_b, TileRole::Solid);
    }

    #[test]
    fn test_lookup_roles() {
        assert_eq!(lookup("SP").map(|(_, r)| r), Some(TileRole::Spike));
        assert_eq!(lookup("LB").map(|(_, r)| r), Some(TileRole::Ladder));
        assert_eq!(lookup("2w").map(|(_, r)| r), Some(TileRole::Decoration));
        assert!(lookup("zz").is_none());
        assert!(lookup(EMPTY_CODE).is_none());
    }
}
