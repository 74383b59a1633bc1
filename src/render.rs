//! Rendering collaborator contract.
//!
//! The simulation hands each entity's parts and a finished world transform
//! to a [`Renderer`] once per tick, after all state updates and collision
//! checks. There is no error contract: a renderer that fails swallows the
//! failure itself, the tick never aborts over presentation.

use crate::assets::RenderableParts;
use crate::math::mat::Mat4;
use crate::math::vec::Vec3;

/// Vertical offset applied to trap models so the plate sits on the floor.
pub const TRAP_Y_OFFSET: f32 = 0.3;

/// Vertical offset applied to the scenario mesh.
pub const SCENARIO_Y_OFFSET: f32 = -12.0;

/// Vertical field of view handed to the camera construction.
pub const CAMERA_FOV_DEGREES: f32 = 60.0;
/// Near clipping plane distance.
pub const CAMERA_NEAR: f32 = 0.05;
/// Far clipping plane distance.
pub const CAMERA_FAR: f32 = 125.0;
/// Nominal aspect ratio; a real backend overrides with its surface size.
pub const CAMERA_ASPECT: f32 = 16.0 / 9.0;

/// Draw-call contract between the core and the graphics backend.
pub trait Renderer {
    /// Receives the player's view-projection matrix once per tick, before
    /// any entity draws. Backends without a camera ignore it.
    fn set_camera(&mut self, _view_projection: &Mat4) {}

    /// Draws one entity with the supplied world transform.
    fn render(&mut self, parts: &RenderableParts, world: &Mat4);
}

/// Builds the world transform for an enemy model.
///
/// The model is translated to its position and rotated about Y by its
/// smoothed heading. Models face +X at zero heading, hence the -90° offset.
pub fn enemy_world_transform(position: Vec3, current_angle: f32) -> Mat4 {
    Mat4::rotation_y(current_angle - 90.0).multiply(&Mat4::translation(
        position.x(),
        position.y(),
        position.z(),
    ))
}

/// Builds the world transform for a trap model.
pub fn trap_world_transform(position: Vec3) -> Mat4 {
    Mat4::translation(position.x(), TRAP_Y_OFFSET, position.z())
}

/// Builds the world transform for the scenario mesh.
pub fn scenario_world_transform() -> Mat4 {
    Mat4::translation(0.0, SCENARIO_Y_OFFSET, 0.0)
}

/// Renderer that logs draw calls at trace level.
///
/// Stands in for a real graphics backend in the demo binary; also useful
/// when diagnosing entity transforms without a window.
#[derive(Debug, Default)]
pub struct LogRenderer {
    draws: u64,
}

impl LogRenderer {
    /// Number of draw calls issued so far.
    pub fn draw_count(&self) -> u64 {
        self.draws
    }
}

impl Renderer for LogRenderer {
    fn render(&mut self, parts: &RenderableParts, world: &Mat4) {
        self.draws += 1;
        log::trace!(
            "draw {} parts at [{:.2}, {:.2}, {:.2}]",
            parts.parts.len(),
            world.0[3][0],
            world.0[3][1],
            world.0[3][2]
        );
    }
}
