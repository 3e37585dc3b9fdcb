//! Axis-aligned bounding boxes and overlap tests
//!
//! Everything in the play area collides as a rectangle centered on its
//! position. Screen coordinates: y grows downward, so `top < bottom`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    /// Bottom-right corner
    pub max: Vec2,
}

impl Aabb {
    /// Box of `size` (width, height) centered on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Non-zero-area intersection; touching edges don't count
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// Overlap test between two boxes (symmetric)
#[inline]
pub fn overlap(a: &Aabb, b: &Aabb) -> bool {
    a.overlaps(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn aabb(x: f32, y: f32, w: f32, h: f32) -> Aabb {
        Aabb::from_center(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn test_from_center_edges() {
        let b = aabb(100.0, 50.0, 40.0, 20.0);
        assert_eq!(b.left(), 80.0);
        assert_eq!(b.right(), 120.0);
        assert_eq!(b.top(), 40.0);
        assert_eq!(b.bottom(), 60.0);
        assert_eq!(b.center(), Vec2::new(100.0, 50.0));
        assert_eq!(b.size(), Vec2::new(40.0, 20.0));
    }

    #[test]
    fn test_overlapping_boxes() {
        let player = aabb(500.0, 550.0, 40.0, 40.0);
        let bullet = aabb(510.0, 530.0, 6.0, 20.0);
        assert!(overlap(&player, &bullet));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        // Right edge of a meets left edge of b exactly
        let a = aabb(10.0, 10.0, 20.0, 20.0);
        let b = aabb(30.0, 10.0, 20.0, 20.0);
        assert!(!overlap(&a, &b));

        // Bottom of a meets top of c exactly
        let c = aabb(10.0, 30.0, 20.0, 20.0);
        assert!(!overlap(&a, &c));
    }

    #[test]
    fn test_separated_on_one_axis() {
        let a = aabb(0.0, 0.0, 10.0, 10.0);
        // Same row, far right
        assert!(!overlap(&a, &aabb(100.0, 0.0, 10.0, 10.0)));
        // Same column, far below
        assert!(!overlap(&a, &aabb(0.0, 100.0, 10.0, 10.0)));
    }

    #[test]
    fn test_containment_overlaps() {
        let outer = aabb(0.0, 0.0, 100.0, 100.0);
        let inner = aabb(5.0, 5.0, 2.0, 2.0);
        assert!(overlap(&outer, &inner));
        assert!(overlap(&inner, &outer));
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(
            ax in -100.0f32..1100.0, ay in -100.0f32..700.0,
            aw in 0.0f32..80.0, ah in 0.0f32..80.0,
            bx in -100.0f32..1100.0, by in -100.0f32..700.0,
            bw in 0.0f32..80.0, bh in 0.0f32..80.0,
        ) {
            let a = aabb(ax, ay, aw, ah);
            let b = aabb(bx, by, bw, bh);
            prop_assert_eq!(overlap(&a, &b), overlap(&b, &a));
        }

        #[test]
        fn prop_box_with_area_overlaps_itself(
            x in -100.0f32..1100.0, y in -100.0f32..700.0,
            w in 1.0f32..80.0, h in 1.0f32..80.0,
        ) {
            let a = aabb(x, y, w, h);
            prop_assert!(overlap(&a, &a));
        }
    }
}
