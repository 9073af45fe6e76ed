//! Axis-aligned bounding box overlap testing
//!
//! Player and obstacles are plain rectangles, so collision is a strict AABB
//! overlap test: boxes that merely touch along an edge do not collide.

use glam::Vec2;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Build a box from its center point and full extents
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Strict overlap test: shared edges count as separated, not colliding
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rect(cx: f32, cy: f32, w: f32, h: f32) -> Aabb {
        Aabb::from_center_size(Vec2::new(cx, cy), Vec2::new(w, h))
    }

    #[test]
    fn test_clear_overlap() {
        let a = rect(200.0, 100.0, 40.0, 40.0);
        let b = rect(210.0, 110.0, 30.0, 30.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_contained_box_overlaps() {
        let outer = rect(200.0, 200.0, 100.0, 100.0);
        let inner = rect(200.0, 200.0, 10.0, 10.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        // Player right edge exactly on obstacle left edge: 180..220 vs 220..250
        let player = rect(200.0, 100.0, 40.0, 40.0);
        let obstacle = rect(235.0, 100.0, 30.0, 40.0);
        assert_eq!(player.max.x, obstacle.min.x);
        assert!(!player.overlaps(&obstacle));

        // One unit of overlap does collide
        let obstacle = rect(234.0, 100.0, 30.0, 40.0);
        assert!(player.overlaps(&obstacle));
    }

    #[test]
    fn test_touching_corners_do_not_collide() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(10.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_separated_on_one_axis() {
        let a = rect(200.0, 100.0, 40.0, 40.0);
        // Same x span, far apart in y
        let b = rect(200.0, 300.0, 40.0, 40.0);
        assert!(!a.overlaps(&b));
    }

    proptest! {
        /// Overlap is symmetric for arbitrary boxes
        #[test]
        fn prop_overlap_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            aw in 1.0f32..100.0, ah in 1.0f32..100.0,
            bw in 1.0f32..100.0, bh in 1.0f32..100.0,
        ) {
            let a = rect(ax, ay, aw, ah);
            let b = rect(bx, by, bw, bh);
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        /// A box with positive extents always overlaps itself
        #[test]
        fn prop_overlap_reflexive(
            x in -500.0f32..500.0, y in -500.0f32..500.0,
            w in 1.0f32..100.0, h in 1.0f32..100.0,
        ) {
            let a = rect(x, y, w, h);
            prop_assert!(a.overlaps(&a));
        }
    }
}
