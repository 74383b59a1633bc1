//! Enemy behavior state machine.
//!
//! Each enemy runs the same per-tick routine: decide its state from the
//! distance to the player, react to nearby traps, pick a target, then move
//! and turn toward it at a fixed per-tick speed. `Disabled` is terminal:
//! a trapped enemy freezes in place and is flagged for removal after a
//! fixed number of ticks.

use crate::assets::RenderableParts;
use crate::game::audio::Cue;
use crate::game::collision::Aabb;
use crate::game::trap::Trap;
use crate::math::vec::{Vec3, random_point_within};

/// Movement speed while wandering, world units per tick. Doubles as the
/// arrival distance for idle spots.
pub const IDLE_SPEED: f32 = 0.01;
/// Base pursuit speed before difficulty scaling, world units per tick.
pub const BASE_AGGRESSIVE_SPEED: f32 = 0.025;
/// Pursuit speed gain per difficulty step.
pub const DIFFICULTY_SPEED_SCALE: f32 = 0.5;
/// Pursuit detection range at difficulty zero.
pub const BASE_AGGRESSIVE_RANGE: f32 = 8.0;
/// Heading change budget, degrees per tick.
pub const ROT_SPEED: f32 = 0.1;
/// Heading budget multiplier while pursuing.
pub const AGGRESSIVE_ROT_MULTIPLIER: f32 = 2.5;
/// Heading budget gain per difficulty step.
pub const ROT_DIFFICULTY_SCALE: f32 = 0.25;
/// Distance at which a trap disables an aggressive enemy.
pub const TRAP_PROXIMITY_RANGE: f32 = 1.2;
/// Ticks an enemy waits at an exhausted idle spot before picking a new one.
pub const IDLE_COUNT: u32 = 100;
/// Radius for new idle spots around the current position.
pub const IDLE_WANDER_RADIUS: f32 = 5.0;
/// Ticks between entering `Disabled` and being flagged `removed`
/// (5 simulated seconds at 60 ticks per second).
pub const DISABLED_LIFETIME_TICKS: u32 = 300;
/// Half-width of the enemy's collision hull.
pub const ENEMY_RADIUS: f32 = 1.0;
/// Models face +X at zero heading; rendering and smoothing share this offset.
pub const MODEL_ANGLE_OFFSET: f32 = 90.0;
/// Decimal places kept when clamping movement-step drift.
pub const STEP_PRECISION_DECIMALS: u32 = 4;

/// Behavioral state of an enemy. `Disabled` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyState {
    /// Wandering between idle spots.
    Idle,
    /// Pursuing the player.
    Aggressive,
    /// Caught by a trap; frozen until removal.
    Disabled,
}

/// A pursuing enemy.
pub struct Enemy {
    /// World position, mutated every tick by the state machine.
    pub position: Vec3,
    /// Current behavioral state.
    pub state: EnemyState,
    /// Difficulty applied this tick; assigned by the orchestrator.
    pub difficulty: u32,
    /// Current wander target.
    pub idle_spot: Vec3,
    /// Ticks remaining at an exhausted idle spot before re-targeting.
    pub idle_counter: u32,
    /// Smoothed heading, degrees.
    pub current_angle: f32,
    /// Instantaneous desired heading, degrees.
    pub target_angle: f32,
    /// Marks the enemy for roster removal; consumed by the purge pass.
    pub removed: bool,
    /// Half-width of the collision hull.
    pub bounding_radius: f32,
    /// Loaded model geometry, opaque to the state machine.
    pub parts: RenderableParts,
    disable_ticks: u32,
}

impl Enemy {
    /// Creates an idle enemy at a position with its loaded geometry.
    pub fn new(position: Vec3, parts: RenderableParts) -> Self {
        let wander = random_point_within(position, IDLE_WANDER_RADIUS);
        Self {
            position,
            state: EnemyState::Idle,
            difficulty: 0,
            idle_spot: Vec3::new(wander.x(), 0.0, wander.z()),
            idle_counter: IDLE_COUNT,
            current_angle: 0.0,
            target_angle: 0.0,
            removed: false,
            bounding_radius: ENEMY_RADIUS,
            parts,
            disable_ticks: 0,
        }
    }

    /// Runs one simulation tick of the state machine.
    ///
    /// State transitions are evaluated before any movement. A `Disabled`
    /// enemy only advances its removal countdown; everything else picks a
    /// target from its state and closes on it at a fixed per-tick speed.
    /// Cues for transition edges (aggression onset, trap death) are pushed
    /// into `cues` for the orchestrator to flush.
    pub fn update(&mut self, player_position: Vec3, traps: &[Trap], cues: &mut Vec<Cue>) {
        if self.state == EnemyState::Disabled {
            self.tick_removal();
            return;
        }

        let distance_to_player = self.position.distance_to(&player_position);
        let speed = if distance_to_player <= self.aggression_threshold() {
            if self.state != EnemyState::Aggressive {
                self.state = EnemyState::Aggressive;
                cues.push(Cue::Aggression);
            }
            self.aggressive_speed()
        } else {
            self.state = EnemyState::Idle;
            IDLE_SPEED
        };

        // Traps only catch enemies that are hunting
        if self.state == EnemyState::Aggressive
            && traps
                .iter()
                .any(|t| self.position.distance_to(&t.position()) <= TRAP_PROXIMITY_RANGE)
        {
            self.state = EnemyState::Disabled;
            self.disable_ticks = DISABLED_LIFETIME_TICKS;
            cues.push(Cue::Death);
            return;
        }

        let target = if self.state == EnemyState::Aggressive {
            player_position
        } else {
            self.update_idle_spot();
            self.idle_spot
        };

        self.advance_toward(target, speed);
        self.turn_toward(target);
    }

    /// Detection range for the current difficulty. Grows with difficulty;
    /// the comparison against it is inclusive.
    pub fn aggression_threshold(&self) -> f32 {
        BASE_AGGRESSIVE_RANGE + (BASE_AGGRESSIVE_RANGE / 2.0) * self.difficulty as f32
    }

    /// Pursuit speed for the current difficulty, world units per tick.
    pub fn aggressive_speed(&self) -> f32 {
        BASE_AGGRESSIVE_SPEED * (1.0 + DIFFICULTY_SPEED_SCALE * self.difficulty as f32)
    }

    /// Ground-plane collision hull at the current position.
    pub fn hull(&self) -> Aabb {
        Aabb::around(self.position, self.bounding_radius)
    }

    fn tick_removal(&mut self) {
        if self.disable_ticks > 0 {
            self.disable_ticks -= 1;
            if self.disable_ticks == 0 {
                self.removed = true;
            }
        }
    }

    fn update_idle_spot(&mut self) {
        // Arrival distance equals the per-tick step, so "arrived" means the
        // next step would land on or past the spot
        if self.position.distance_to(&self.idle_spot) < IDLE_SPEED {
            if self.idle_counter == 0 {
                let wander = random_point_within(self.position, IDLE_WANDER_RADIUS);
                self.idle_spot = Vec3::new(wander.x(), 0.0, wander.z());
                self.idle_counter = IDLE_COUNT;
            } else {
                self.idle_counter -= 1;
            }
        }
    }

    fn advance_toward(&mut self, target: Vec3, speed: f32) {
        let facing = target - self.position;
        let length = facing.length();
        if length == 0.0 {
            // Degenerate facing vector: skip the step rather than produce NaN
            return;
        }
        let mut step = facing * (speed / length);
        if step.length() > speed {
            step = step.round_to(STEP_PRECISION_DECIMALS);
        }
        self.position = self.position + step;
    }

    fn turn_toward(&mut self, target: Vec3) {
        let dx = target.x() - self.position.x();
        let dz = target.z() - self.position.z();
        if dx == 0.0 && dz == 0.0 {
            return;
        }
        self.target_angle = (-dz).atan2(dx).to_degrees() + MODEL_ANGLE_OFFSET;

        // Shortest angular path: normalize the difference into (-180, 180]
        // and clamp it to this tick's rotation budget
        let mut delta = (self.target_angle - self.current_angle).rem_euclid(360.0);
        if delta > 180.0 {
            delta -= 360.0;
        }
        let budget = self.rotation_speed();
        self.current_angle = (self.current_angle + delta.clamp(-budget, budget)).rem_euclid(360.0);
    }

    fn rotation_speed(&self) -> f32 {
        let aggression = if self.state == EnemyState::Aggressive {
            AGGRESSIVE_ROT_MULTIPLIER
        } else {
            1.0
        };
        ROT_SPEED * aggression * (1.0 + ROT_DIFFICULTY_SCALE * self.difficulty as f32)
    }
}
