//! Player state and movement logic.
//!
//! The player is a first-person camera: a world position plus a look-at
//! target. Input axes are polled once per tick and applied here, with
//! candidate positions checked against the scenario before they are
//! committed. A blocked axis is rejected outright, independently of the
//! other axis.
//!
//! # Coordinate System
//!
//! Right-handed, X/Z on the ground plane, Y up. Yaw rotates the look-at
//! target around the position; pitch raises or lowers the target within a
//! clamped band so the view can never flip.

use crate::game::collision::Aabb;
use crate::game::scenario::Scenario;
use crate::math::mat::Mat4;
use crate::math::vec::Vec3;

/// Distance covered along the view ray per tick at full input.
pub const STEP_AMOUNT: f32 = 0.008;
/// Yaw applied per tick at full input, degrees.
pub const ROT_AMOUNT: f32 = 0.5;
/// Half-width of the player's collision hull.
pub const PLAYER_RADIUS: f32 = 1.0;
/// Camera height above the ground plane.
pub const EYE_HEIGHT: f32 = 1.7;
/// Vertical velocity applied on a jump trigger, units per tick.
pub const JUMP_VELOCITY: f32 = 0.05;
/// Downward acceleration, units per tick squared.
pub const GRAVITY: f32 = 0.002;
/// Look-target rise/fall per tick at full pitch input.
pub const PITCH_STEP: f32 = 0.02;
/// Clamp for the target's height offset relative to the camera.
pub const MAX_PITCH_OFFSET: f32 = 4.0;

/// Continuous input axes polled once per tick.
///
/// Axis values are expected in [-1, 1]; the jump trigger is consumed on
/// the tick it is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    /// Forward (+1) / backward (-1) along the view ray.
    pub back_forth: f32,
    /// Strafe left (+1) / right (-1).
    pub sideways: f32,
    /// Turn left (+1) / right (-1).
    pub turn: f32,
    /// Look up (+1) / down (-1).
    pub pitch: f32,
    /// Jump trigger.
    pub jump: bool,
}

impl InputState {
    /// Whether any horizontal movement axis is engaged.
    pub fn is_moving(&self) -> bool {
        self.back_forth != 0.0 || self.sideways != 0.0
    }
}

/// What happened to the player during one tick of movement.
#[derive(Debug, Clone, Copy, Default)]
pub struct MovementOutcome {
    /// Horizontal movement was applied on at least one axis.
    pub moved: bool,
    /// The player returned to the ground this tick.
    pub landed: bool,
}

/// The player camera.
#[derive(Debug, Clone)]
pub struct Player {
    /// World position of the camera.
    pub position: Vec3,
    /// Look-at point; movement and yaw keep it consistent with `position`.
    pub target: Vec3,
    /// Half-width of the collision hull.
    pub bounding_radius: f32,
    vertical_velocity: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    /// Creates a player at the spawn point, facing into the scene.
    pub fn new() -> Self {
        Self {
            position: Vec3::new(0.0, EYE_HEIGHT, 5.0),
            target: Vec3::new(0.0, EYE_HEIGHT, 0.0),
            bounding_radius: PLAYER_RADIUS,
            vertical_velocity: 0.0,
        }
    }

    /// Ground-plane collision hull at the current position, recomputed
    /// every tick by the orchestrator.
    pub fn hull(&self) -> Aabb {
        Aabb::around(self.position, self.bounding_radius)
    }

    /// Computes the view matrix for the current position and look target.
    ///
    /// The camera matrix comes from a look-at construction; inverting it
    /// transforms world coordinates into view space for the rendering
    /// collaborator.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.target, Vec3::new(0.0, 1.0, 0.0)).inverse()
    }

    /// Computes the combined view-projection matrix for rendering.
    ///
    /// # Arguments
    ///
    /// * `fov_y_degrees` - Vertical field of view
    /// * `aspect_ratio` - Width divided by height of the viewport
    /// * `near` / `far` - Clipping plane distances
    pub fn view_projection_matrix(
        &self,
        fov_y_degrees: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    ) -> Mat4 {
        self.view_matrix()
            .multiply(&Mat4::perspective(fov_y_degrees, aspect_ratio, near, far))
    }

    /// Applies one tick of input with collision gating.
    ///
    /// Forward/back and strafe are resolved independently: a candidate
    /// position inside scenario geometry rejects that axis's movement
    /// without affecting the other. Yaw and pitch always apply. Jump
    /// kinematics run every tick; landing is reported so the orchestrator
    /// can fire the impact cue.
    pub fn apply_movement(&mut self, input: &InputState, scenario: &Scenario) -> MovementOutcome {
        let mut outcome = MovementOutcome::default();

        if input.back_forth != 0.0 {
            let delta = (self.target - self.position) * (input.back_forth * STEP_AMOUNT);
            outcome.moved |= self.try_translate(delta, scenario);
        }

        if input.sideways != 0.0 {
            // A target rotated 270° about the camera gives the strafe axis
            let side_target = Mat4::rotation_y(270.0).transform_point(self.target, self.position);
            let delta = (side_target - self.position) * (-input.sideways * STEP_AMOUNT);
            outcome.moved |= self.try_translate(delta, scenario);
        }

        if input.turn != 0.0 {
            self.target = Mat4::rotation_y(input.turn * ROT_AMOUNT)
                .transform_point(self.target, self.position);
        }

        if input.pitch != 0.0 {
            let offset = (self.target.y() - self.position.y() + input.pitch * PITCH_STEP)
                .clamp(-MAX_PITCH_OFFSET, MAX_PITCH_OFFSET);
            self.target = Vec3::new(self.target.x(), self.position.y() + offset, self.target.z());
        }

        if input.jump && self.is_grounded() {
            self.vertical_velocity = JUMP_VELOCITY;
        }
        outcome.landed = self.apply_vertical();

        outcome
    }

    fn is_grounded(&self) -> bool {
        self.position.y() <= EYE_HEIGHT && self.vertical_velocity == 0.0
    }

    /// Advances the jump arc; returns true on the landing tick.
    fn apply_vertical(&mut self) -> bool {
        if self.is_grounded() {
            return false;
        }
        let rise = Vec3::new(0.0, self.vertical_velocity, 0.0);
        self.position = self.position + rise;
        self.target = self.target + rise;
        self.vertical_velocity -= GRAVITY;

        if self.position.y() <= EYE_HEIGHT {
            let correction = EYE_HEIGHT - self.position.y();
            self.target = self.target + Vec3::new(0.0, correction, 0.0);
            self.position = Vec3::new(self.position.x(), EYE_HEIGHT, self.position.z());
            self.vertical_velocity = 0.0;
            return true;
        }
        false
    }

    /// Moves position and target together if the candidate is not inside
    /// scenario geometry. Returns whether the movement was applied.
    fn try_translate(&mut self, delta: Vec3, scenario: &Scenario) -> bool {
        let candidate = self.position + delta;
        if scenario.blocks(candidate) {
            return false;
        }
        self.position = candidate;
        self.target = self.target + delta;
        true
    }
}
