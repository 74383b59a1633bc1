//! # Assets Module
//!
//! Geometry loading boundary between the simulation core and whatever
//! parses model files. The core never interprets mesh data beyond the
//! vertex positions it needs for collision boxes; everything else in a
//! [`MeshPart`] is opaque freight for the rendering collaborator.
//!
//! Loading is asynchronous and must fully resolve before an entity joins
//! the active roster. A failed load is fatal to that spawn attempt only:
//! the caller logs it and moves on, the tick loop never sees it.

use crate::math::vec::Vec3;

/// Identifies a piece of entity geometry to load.
///
/// The simulation core names what it needs; the [`GeometrySource`] decides
/// where it comes from (model files, procedural generation, a cache).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryRef {
    /// A pursuing enemy model.
    Enemy,
    /// A floor trap model.
    Trap,
    /// The static scenario mesh.
    Scenario,
}

/// One renderable piece of a loaded model.
///
/// Vertex positions are kept in model space; the collision system
/// transforms them into world space when it builds its boxes. The material
/// slot is an opaque handle for the rendering collaborator.
#[derive(Debug, Clone)]
pub struct MeshPart {
    /// Model-space vertex positions.
    pub positions: Vec<Vec3>,
    /// Opaque material handle understood by the renderer.
    pub material: u32,
}

/// The complete renderable geometry of one entity.
#[derive(Debug, Clone, Default)]
pub struct RenderableParts {
    /// The mesh parts making up the model.
    pub parts: Vec<MeshPart>,
}

impl RenderableParts {
    /// Returns true when the model contains no vertices at all.
    pub fn is_empty(&self) -> bool {
        self.parts.iter().all(|p| p.positions.is_empty())
    }
}

/// Errors surfaced by a geometry source.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// The source has no geometry registered for the requested reference.
    #[error("no geometry registered for {0:?}")]
    MissingSource(GeometryRef),
    /// The source produced geometry with no vertices.
    #[error("geometry for {0:?} resolved empty")]
    EmptyGeometry(GeometryRef),
}

/// Asynchronous geometry loading contract.
///
/// Implementations may fetch and parse model files; the demo binary and the
/// tests use [`BuiltinGeometry`] instead. Callers block on the future with
/// `pollster::block_on` during startup and difficulty-step spawn batches,
/// the only points where the simulation suspends.
pub trait GeometrySource {
    /// Resolves the geometry for `source`, or an error fatal to the spawn.
    fn load_entity_geometry(
        &self,
        source: GeometryRef,
    ) -> impl Future<Output = Result<RenderableParts, AssetError>>;
}

/// Procedural geometry used by the demo binary and tests.
///
/// Produces simple slab models: a marker pyramid for enemies, a flat plate
/// for traps, and a ring of wall slabs with interior pillars for the
/// scenario so movement blocking has something to push against.
#[derive(Debug, Default, Clone)]
pub struct BuiltinGeometry;

impl BuiltinGeometry {
    fn slab(center: Vec3, half_x: f32, half_y: f32, half_z: f32) -> MeshPart {
        let (cx, cy, cz) = (center.x(), center.y(), center.z());
        let mut positions = Vec::with_capacity(8);
        for &sx in &[-1.0f32, 1.0] {
            for &sy in &[-1.0f32, 1.0] {
                for &sz in &[-1.0f32, 1.0] {
                    positions.push(Vec3::new(
                        cx + sx * half_x,
                        cy + sy * half_y,
                        cz + sz * half_z,
                    ));
                }
            }
        }
        MeshPart {
            positions,
            material: 0,
        }
    }

    fn enemy_marker() -> RenderableParts {
        // Square base plus an apex, enough to give the model a facing
        let base = vec![
            Vec3::new(-0.5, 0.0, -0.5),
            Vec3::new(0.5, 0.0, -0.5),
            Vec3::new(0.5, 0.0, 0.5),
            Vec3::new(-0.5, 0.0, 0.5),
            Vec3::new(0.0, 1.2, 0.0),
        ];
        RenderableParts {
            parts: vec![MeshPart {
                positions: base,
                material: 1,
            }],
        }
    }

    fn trap_plate() -> RenderableParts {
        RenderableParts {
            parts: vec![Self::slab(Vec3::new(0.0, 0.05, 0.0), 0.6, 0.05, 0.6)],
        }
    }

    fn scenario_walls() -> RenderableParts {
        let mut parts = Vec::new();
        // Perimeter walls just outside the playfield radius
        let extent = 24.0;
        let thickness = 1.0;
        let height = 4.0;
        parts.push(Self::slab(
            Vec3::new(0.0, height / 2.0, -extent),
            extent,
            height / 2.0,
            thickness,
        ));
        parts.push(Self::slab(
            Vec3::new(0.0, height / 2.0, extent),
            extent,
            height / 2.0,
            thickness,
        ));
        parts.push(Self::slab(
            Vec3::new(-extent, height / 2.0, 0.0),
            thickness,
            height / 2.0,
            extent,
        ));
        parts.push(Self::slab(
            Vec3::new(extent, height / 2.0, 0.0),
            thickness,
            height / 2.0,
            extent,
        ));
        // A few interior pillars so collision gating matters in the open
        for &(px, pz) in &[(8.0f32, 8.0f32), (-10.0, 4.0), (5.0, -12.0)] {
            parts.push(Self::slab(
                Vec3::new(px, height / 2.0, pz),
                1.5,
                height / 2.0,
                1.5,
            ));
        }
        RenderableParts { parts }
    }
}

impl GeometrySource for BuiltinGeometry {
    async fn load_entity_geometry(
        &self,
        source: GeometryRef,
    ) -> Result<RenderableParts, AssetError> {
        let parts = match source {
            GeometryRef::Enemy => Self::enemy_marker(),
            GeometryRef::Trap => Self::trap_plate(),
            GeometryRef::Scenario => Self::scenario_walls(),
        };
        if parts.is_empty() {
            return Err(AssetError::EmptyGeometry(source));
        }
        Ok(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests that every builtin reference resolves to non-empty geometry.
    #[test]
    fn test_builtin_geometry_resolves() {
        let source = BuiltinGeometry;
        for reference in [GeometryRef::Enemy, GeometryRef::Trap, GeometryRef::Scenario] {
            let parts = pollster::block_on(source.load_entity_geometry(reference))
                .expect("builtin geometry should resolve");
            assert!(!parts.is_empty());
        }
    }

    /// Tests that the scenario model carries multiple collidable parts.
    #[test]
    fn test_scenario_has_multiple_parts() {
        let parts =
            pollster::block_on(BuiltinGeometry.load_entity_geometry(GeometryRef::Scenario))
                .expect("scenario geometry should resolve");
        assert!(parts.parts.len() >= 4);
    }
}
