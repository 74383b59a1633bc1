//! Floor traps: passive hazards the enemy state machine reacts to.

use crate::assets::RenderableParts;
use crate::math::vec::Vec3;

/// A placed trap.
///
/// Position is fixed once placed; traps have no behavior of their own.
/// The enemy state machine queries them by scalar distance only.
pub struct Trap {
    position: Vec3,
    parts: RenderableParts,
}

impl Trap {
    /// Places a trap at a world position with its loaded geometry.
    pub fn new(position: Vec3, parts: RenderableParts) -> Self {
        Self { position, parts }
    }

    /// World position of the trap.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// The renderable mesh parts.
    pub fn parts(&self) -> &RenderableParts {
        &self.parts
    }
}
