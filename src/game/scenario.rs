//! Static scenario geometry and movement blocking.

use crate::assets::RenderableParts;
use crate::game::collision::Aabb;
use crate::math::mat::Mat4;
use crate::math::vec::Vec3;
use crate::render::scenario_world_transform;

/// The static collision geometry the player moves through.
///
/// Collision boxes are computed once from the loaded mesh parts (each
/// part's vertices transformed into world space, then reduced to per-axis
/// min/max) and cached for the lifetime of the scenario. Construction
/// requires loaded geometry, so the cache can never be consulted before
/// the mesh exists.
pub struct Scenario {
    parts: RenderableParts,
    collision_boxes: Vec<Aabb>,
}

impl Scenario {
    /// Builds a scenario from loaded geometry, computing the box cache.
    pub fn new(parts: RenderableParts) -> Self {
        let world = scenario_world_transform();
        let collision_boxes = Self::build_collision_boxes(&parts, &world);
        Self {
            parts,
            collision_boxes,
        }
    }

    fn build_collision_boxes(parts: &RenderableParts, world: &Mat4) -> Vec<Aabb> {
        parts
            .parts
            .iter()
            .filter_map(|part| {
                let transformed: Vec<Vec3> = part
                    .positions
                    .iter()
                    .map(|p| world.transform_point(*p, Vec3::ZERO))
                    .collect();
                Aabb::from_points(&transformed)
            })
            .collect()
    }

    /// Checks whether a candidate position is inside scenario geometry.
    ///
    /// Only the X/Z extent counts: floor plane collision, Y ignored. A
    /// blocked candidate means the movement that produced it is rejected,
    /// not corrected.
    pub fn blocks(&self, point: Vec3) -> bool {
        self.collision_boxes.iter().any(|b| b.contains_xz(point))
    }

    /// The renderable mesh parts.
    pub fn parts(&self) -> &RenderableParts {
        &self.parts
    }

    /// The cached world-space collision boxes.
    pub fn collision_boxes(&self) -> &[Aabb] {
        &self.collision_boxes
    }
}
