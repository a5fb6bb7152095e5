//! Axis-aligned boxes in integer pixel space
//!
//! Every hitbox in the simulation is one of these. Edge queries use strict
//! inequalities: a box whose edge sits exactly on another box's edge is
//! touching, not inside. Contact-triggered behaviour relies on that
//! distinction (feet resting on a platform are flush, not overlapping).

use serde::{Deserialize, Serialize};

/// A rectangle defined by its top-left corner and size, y pointing down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AxisAlignedBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl AxisAlignedBox {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    // =========================================================================
    // Edges
    // =========================================================================

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Horizontal center, rounded toward the left edge
    pub fn center_x(&self) -> i32 {
        self.x + self.width / 2
    }

    /// Vertical center, rounded toward the top edge
    pub fn center_y(&self) -> i32 {
        self.y + self.height / 2
    }

    pub fn set_left(&mut self, left: i32) {
        self.x = left;
    }

    pub fn set_right(&mut self, right: i32) {
        self.x = right - self.width;
    }

    pub fn set_top(&mut self, top: i32) {
        self.y = top;
    }

    pub fn set_bottom(&mut self, bottom: i32) {
        self.y = bottom - self.height;
    }

    pub fn set_center_x(&mut self, center_x: i32) {
        self.x = center_x - self.width / 2;
    }

    /// Move by an offset
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// True if the two boxes share interior area. Touching edges do not count.
    pub fn intersects(&self, other: &AxisAlignedBox) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Check if point is inside (right and bottom edges exclusive)
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.left() && x < self.right() && y >= self.top() && y < self.bottom()
    }

    /// This box's top edge lies strictly between `other`'s top and bottom.
    /// Used to detect hitting a ceiling from below.
    pub fn is_top_edge_inside(&self, other: &AxisAlignedBox) -> bool {
        other.top() < self.top() && self.top() < other.bottom()
    }

    /// This box's bottom edge lies strictly between `other`'s top and bottom.
    /// Used to detect landing on something from above.
    pub fn is_bottom_edge_inside(&self, other: &AxisAlignedBox) -> bool {
        other.top() < self.bottom() && self.bottom() < other.bottom()
    }

    /// This box's left edge lies strictly between `other`'s left and right.
    pub fn is_left_edge_inside(&self, other: &AxisAlignedBox) -> bool {
        other.left() < self.left() && self.left() < other.right()
    }

    /// This box's right edge lies strictly between `other`'s left and right.
    pub fn is_right_edge_inside(&self, other: &AxisAlignedBox) -> bool {
        other.left() < self.right() && self.right() < other.right()
    }

    /// Either vertical edge of this box lies strictly within `other`'s span.
    pub fn has_edge_within_span(&self, other: &AxisAlignedBox) -> bool {
        self.is_left_edge_inside(other) || self.is_right_edge_inside(other)
    }

    /// This box is standing exactly on top of `other`, with a vertical edge
    /// strictly over it. Diagonal corner contact does not count.
    pub fn rests_on(&self, other: &AxisAlignedBox) -> bool {
        self.bottom() == other.top() && self.has_edge_within_span(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touching_boxes_do_not_intersect() {
        let a = AxisAlignedBox::new(0, 0, 10, 10);
        let b = AxisAlignedBox::new(10, 0, 10, 10);
        let c = AxisAlignedBox::new(0, 10, 10, 10);
        assert!(!a.intersects(&b));
        assert!(!a.intersects(&c));
        assert!(a.intersects(&AxisAlignedBox::new(9, 9, 10, 10)));
    }

    #[test]
    fn test_edge_setters_keep_size() {
        let mut b = AxisAlignedBox::new(5, 5, 20, 30);
        b.set_bottom(100);
        assert_eq!(b.top(), 70);
        assert_eq!(b.height, 30);
        b.set_right(50);
        assert_eq!(b.left(), 30);
        b.set_center_x(40);
        assert_eq!(b.x, 30);
        assert_eq!(b.center_x(), 40);
    }

    #[test]
    fn test_edge_inside_is_strict() {
        let block = AxisAlignedBox::new(0, 100, 25, 25);
        let mut entity = AxisAlignedBox::new(0, 75, 20, 30);
        assert!(entity.is_bottom_edge_inside(&block));
        entity.set_bottom(100);
        assert!(!entity.is_bottom_edge_inside(&block));
        entity.set_bottom(125);
        assert!(!entity.is_bottom_edge_inside(&block));
    }

    #[test]
    fn test_rests_on_requires_flush_contact() {
        let platform = AxisAlignedBox::new(100, 100, 25, 25);
        let mut feet = AxisAlignedBox::new(110, 70, 20, 30);
        assert!(feet.rests_on(&platform));

        // One pixel of overlap is not resting
        feet.y += 1;
        assert!(!feet.rests_on(&platform));

        // Diagonal corner contact is not resting
        let corner = AxisAlignedBox::new(125, 70, 20, 30);
        assert!(!corner.rests_on(&platform));
    }

    #[test]
    fn test_contains_point_excludes_far_edges() {
        let b = AxisAlignedBox::new(0, 0, 10, 10);
        assert!(b.contains_point(0, 0));
        assert!(b.contains_point(9, 9));
        assert!(!b.contains_point(10, 5));
        assert!(!b.contains_point(5, 10));
    }
}
