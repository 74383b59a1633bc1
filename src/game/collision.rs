//! Collision primitives for the interaction loop.
//!
//! # Overview
//!
//! Everything coarse-grained in the game collides through axis-aligned
//! bounding boxes: the player's hull against enemy hulls for the game-over
//! check, and candidate player positions against the scenario's cached
//! boxes for movement blocking. Trap proximity is deliberately not a box
//! test; the state machine uses a scalar distance threshold.
//!
//! # Core Components
//!
//! * [`Aabb`] - Axis-Aligned Bounding Box, the fundamental collision primitive
//! * [`Aabb::intersects`] - the inclusive three-axis overlap test
//! * [`Aabb::around`] - ground-plane hull derivation for player and enemies

use crate::math::vec::Vec3;

/// Axis-Aligned Bounding Box (AABB) for coarse collision detection.
///
/// An AABB is a rectangular box whose faces are aligned with the world
/// coordinate axes, defined by its minimum and maximum corners. AABB
/// overlap tests are just six comparisons, which makes them ideal for the
/// per-tick player/enemy and movement-blocking checks.
#[derive(Debug, Clone, PartialEq)]
pub struct Aabb {
    /// Minimum corner `[x, y, z]`.
    pub min: [f32; 3],
    /// Maximum corner `[x, y, z]`.
    pub max: [f32; 3],
}

impl Aabb {
    /// Creates a new AABB from minimum and maximum corner points.
    pub fn new(min: [f32; 3], max: [f32; 3]) -> Self {
        Self { min, max }
    }

    /// Derives a ground-plane hull around an entity position.
    ///
    /// The box extends `radius` along X and Z on the ground plane; the Y
    /// interval collapses to the floor. Player and enemy hulls both come
    /// from here, so a player at eye height and an enemy at ground level
    /// still overlap when their footprints do (floor-plane collision, Y
    /// ignored by construction).
    pub fn around(position: Vec3, radius: f32) -> Self {
        Self::new(
            [position.x() - radius, 0.0, position.z() - radius],
            [position.x() + radius, 0.0, position.z() + radius],
        )
    }

    /// Builds the minimum box containing every supplied point.
    ///
    /// Returns `None` for an empty point set, so the scenario cache never
    /// stores a box for an empty mesh part.
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let first = points.first()?;
        let mut min = *first.as_array();
        let mut max = min;
        for p in &points[1..] {
            for i in 0..3 {
                min[i] = min[i].min(p.as_array()[i]);
                max[i] = max[i].max(p.as_array()[i]);
            }
        }
        Some(Self::new(min, max))
    }

    /// Checks whether this AABB intersects another.
    ///
    /// Two boxes collide iff their intervals overlap on all three axes.
    /// The comparison is inclusive: boxes that merely touch at a face,
    /// edge, or corner count as colliding. The game-over check depends on
    /// this convention, so a distance exactly equal to the combined radii
    /// consistently resolves to a hit.
    pub fn intersects(&self, other: &Aabb) -> bool {
        for i in 0..3 {
            if self.max[i] < other.min[i] || self.min[i] > other.max[i] {
                return false;
            }
        }
        true
    }

    /// Checks whether a point falls inside this box on the X/Z plane.
    ///
    /// Y is ignored; movement blocking is floor-plane collision only.
    pub fn contains_xz(&self, point: Vec3) -> bool {
        point.x() >= self.min[0]
            && point.x() <= self.max[0]
            && point.z() >= self.min[2]
            && point.z() <= self.max[2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests overlap on all axes versus separation on a single axis.
    #[test]
    fn test_intersects_separating_axis() {
        let a = Aabb::new([0.0, 0.0, 0.0], [2.0, 2.0, 2.0]);
        let b = Aabb::new([1.0, 1.0, 1.0], [3.0, 3.0, 3.0]);
        let c = Aabb::new([2.5, 0.0, 0.0], [4.0, 2.0, 2.0]);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    /// Tests that boxes touching exactly at a face count as colliding
    /// (inclusive comparison).
    #[test]
    fn test_intersects_touching_faces() {
        let a = Aabb::new([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        let b = Aabb::new([1.0, 0.0, 0.0], [2.0, 1.0, 1.0]);
        assert!(a.intersects(&b));
    }

    /// Tests the ground-plane hull derivation the game-over check uses:
    /// a radius-1 hull at the origin spans [{-1,0,-1},{1,0,1}].
    #[test]
    fn test_around_ground_plane() {
        let hull = Aabb::around(Vec3::new(0.0, 1.7, 0.0), 1.0);
        assert_eq!(hull.min, [-1.0, 0.0, -1.0]);
        assert_eq!(hull.max, [1.0, 0.0, 1.0]);
    }

    /// Tests that two identical hulls at the same center overlap, and that
    /// hulls at different heights still overlap by footprint.
    #[test]
    fn test_hulls_ignore_height() {
        let player = Aabb::around(Vec3::new(0.0, 1.7, 0.0), 1.0);
        let enemy = Aabb::around(Vec3::new(0.5, 0.0, 0.5), 1.0);
        assert!(player.intersects(&enemy));
    }

    /// Tests the X/Z point containment used for movement blocking.
    #[test]
    fn test_contains_xz_ignores_y() {
        let wall = Aabb::new([-1.0, 0.0, -1.0], [1.0, 4.0, 1.0]);
        assert!(wall.contains_xz(Vec3::new(0.0, 99.0, 0.0)));
        assert!(!wall.contains_xz(Vec3::new(1.5, 0.0, 0.0)));
    }

    /// Tests bounding-box construction from a vertex cloud.
    #[test]
    fn test_from_points() {
        let points = [
            Vec3::new(1.0, -2.0, 3.0),
            Vec3::new(-1.0, 2.0, 0.0),
            Vec3::new(0.5, 0.0, -3.0),
        ];
        let aabb = Aabb::from_points(&points).expect("non-empty point set");
        assert_eq!(aabb.min, [-1.0, -2.0, -3.0]);
        assert_eq!(aabb.max, [1.0, 2.0, 3.0]);
        assert!(Aabb::from_points(&[]).is_none());
    }
}
