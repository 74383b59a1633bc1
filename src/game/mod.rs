//! Game state management module.
//!
//! This module defines the [`GameState`] struct, which owns all mutable
//! simulation state for the tick loop: the player, the enemy roster, the
//! trap list, the scenario, score, and difficulty. The orchestrator passes
//! it into each tick; nothing else mutates it.

pub mod audio;
pub mod collision;
pub mod enemy;
pub mod player;
pub mod scenario;
pub mod trap;

use self::enemy::Enemy;
use self::player::Player;
use self::scenario::Scenario;
use self::trap::Trap;
use slotmap::{SlotMap, new_key_type};

/// Simulation ticks per simulated second.
pub const TICK_RATE: u32 = 60;
/// Seconds between difficulty increases.
pub const DIFFICULTY_INTERVAL_SECS: u64 = 30;
/// Score accrued per simulated second at difficulty zero; each difficulty
/// step adds the same amount again.
pub const SCORE_PER_SECOND: f64 = 10.0;
/// Score awarded for each enemy that ends in a trap.
pub const TRAP_SCORE_BONUS: f64 = 50.0;
/// Enemies spawned at game start.
pub const ENEMY_COUNT: usize = 3;
/// Traps placed at game start.
pub const TRAP_COUNT: usize = 5;
/// Radius of the playfield used for random placement.
pub const WORLD_RADIUS: f32 = 20.0;
/// Enemies added per difficulty step.
pub const SPAWN_ENEMIES_PER_STEP: u32 = 2;
/// Traps added per difficulty step.
pub const SPAWN_TRAPS_PER_STEP: u32 = 1;

new_key_type! {
    /// Stable handle to an enemy in the roster.
    pub struct EnemyKey;
}

/// Represents the entire mutable state of a game session.
///
/// Updated once per tick by the orchestrator and read by the rendering
/// collaborator afterwards. Enemies live in a slotmap so removal marks can
/// be compacted once per tick without invalidating other handles.
pub struct GameState {
    /// The player character.
    pub player: Player,
    /// Active enemy roster.
    pub enemies: SlotMap<EnemyKey, Enemy>,
    /// Placed traps; immutable once placed.
    pub traps: Vec<Trap>,
    /// Static collision geometry.
    pub scenario: Scenario,
    /// Accumulated score. Never decreases.
    pub score: f64,
    /// Current difficulty. Never decreases.
    pub difficulty: u32,
    /// Simulation ticks since the session started.
    pub elapsed_ticks: u64,
    /// Latched once the player is caught; halts further ticks.
    pub game_over: bool,
}

impl GameState {
    /// Creates a session around loaded scenario geometry.
    ///
    /// Entities are spawned separately, after their own geometry resolves.
    pub fn new(scenario: Scenario) -> Self {
        Self {
            player: Player::new(),
            enemies: SlotMap::with_key(),
            traps: Vec::new(),
            scenario,
            score: 0.0,
            difficulty: 0,
            elapsed_ticks: 0,
            game_over: false,
        }
    }

    /// Seconds of simulated time elapsed.
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_ticks as f64 / TICK_RATE as f64
    }

    /// Advances the clock one tick, accrues score, and recomputes
    /// difficulty from the elapsed-time thresholds.
    ///
    /// Returns the number of difficulty steps gained this tick (normally 0,
    /// 1 exactly on a threshold) so the orchestrator can size its spawn
    /// batch. Difficulty never decreases.
    pub fn advance_tick(&mut self) -> u32 {
        self.elapsed_ticks += 1;
        self.score += SCORE_PER_SECOND * (1.0 + self.difficulty as f64) / TICK_RATE as f64;

        let target = (self.elapsed_ticks / (DIFFICULTY_INTERVAL_SECS * TICK_RATE as u64)) as u32;
        let increase = target.saturating_sub(self.difficulty);
        self.difficulty += increase;
        increase
    }

    /// Compacts the roster, dropping every enemy flagged `removed` and
    /// awarding the trap bonus for each.
    ///
    /// Runs once per tick, after state updates and collision checks and
    /// before rendering. Purging is idempotent: a second call in the same
    /// state finds nothing to drop and awards nothing.
    pub fn purge_removed(&mut self) -> usize {
        let before = self.enemies.len();
        self.enemies.retain(|_, enemy| !enemy.removed);
        let purged = before - self.enemies.len();
        self.score += TRAP_SCORE_BONUS * purged as f64;
        purged
    }

    /// Final score as presented to the player.
    pub fn final_score(&self) -> u64 {
        self.score as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::RenderableParts;
    use crate::math::vec::Vec3;

    fn empty_state() -> GameState {
        GameState::new(Scenario::new(RenderableParts::default()))
    }

    fn spawn_enemy(state: &mut GameState, x: f32) -> EnemyKey {
        state
            .enemies
            .insert(Enemy::new(Vec3::new(x, 0.0, 0.0), RenderableParts::default()))
    }

    /// Tests that purging drops flagged enemies exactly once: the second
    /// pass is a no-op with no double score award.
    #[test]
    fn test_purge_is_idempotent() {
        let mut state = empty_state();
        let caught = spawn_enemy(&mut state, 0.0);
        spawn_enemy(&mut state, 5.0);
        state.enemies[caught].removed = true;

        assert_eq!(state.purge_removed(), 1);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.score, TRAP_SCORE_BONUS);

        assert_eq!(state.purge_removed(), 0);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.score, TRAP_SCORE_BONUS);
    }

    /// Tests that difficulty steps exactly on the interval threshold and
    /// never decreases.
    #[test]
    fn test_difficulty_steps_on_threshold() {
        let mut state = empty_state();
        let interval_ticks = DIFFICULTY_INTERVAL_SECS * TICK_RATE as u64;

        for _ in 0..interval_ticks - 1 {
            assert_eq!(state.advance_tick(), 0);
        }
        assert_eq!(state.difficulty, 0);
        assert_eq!(state.advance_tick(), 1);
        assert_eq!(state.difficulty, 1);

        for _ in 0..interval_ticks {
            state.advance_tick();
        }
        assert_eq!(state.difficulty, 2);
    }

    /// Tests that score is monotonically non-decreasing across ticks and
    /// purges.
    #[test]
    fn test_score_monotonic() {
        let mut state = empty_state();
        let mut last = state.score;
        for _ in 0..500 {
            state.advance_tick();
            assert!(state.score >= last);
            last = state.score;
        }
        state.purge_removed();
        assert!(state.score >= last);
    }

    /// Tests that score accrual scales with difficulty.
    #[test]
    fn test_score_scales_with_difficulty() {
        let mut low = empty_state();
        let mut high = empty_state();
        high.difficulty = 3;
        low.advance_tick();
        high.advance_tick();
        assert!(high.score > low.score);
    }
}
