//! Per-tick update logic for the App.
//!
//! One call to [`App::tick`] is one simulation tick: clock and score
//! advance, difficulty-step spawn batches, player movement, the enemy
//! state machine fan-out, the game-over collision check, roster purge,
//! and finally rendering. The ordering guarantee (every enemy update
//! completes before any collision check, every collision check before any
//! draw) lives entirely in this function.

use super::{App, TickOutcome};
use crate::assets::GeometrySource;
use crate::game::audio::Cue;
use crate::game::{SPAWN_ENEMIES_PER_STEP, SPAWN_TRAPS_PER_STEP};
use crate::game::player::InputState;
use crate::render::{
    CAMERA_ASPECT, CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR, Renderer, enemy_world_transform,
    scenario_world_transform, trap_world_transform,
};

impl<L: GeometrySource, R: Renderer> App<L, R> {
    /// Advances the simulation by one tick.
    ///
    /// Once the game is over this is a pure no-op that keeps reporting the
    /// final score; the driver is expected to stop scheduling ticks.
    pub fn tick(&mut self, input: &InputState) -> TickOutcome {
        if self.state.game_over {
            return TickOutcome::GameOver(self.state.final_score());
        }

        // Clock, score, difficulty
        let difficulty_steps = self.state.advance_tick();
        if difficulty_steps > 0 {
            self.spawn_enemies((difficulty_steps * SPAWN_ENEMIES_PER_STEP) as usize);
            self.spawn_traps((difficulty_steps * SPAWN_TRAPS_PER_STEP) as usize);
            log::info!(
                "difficulty {} at {:.0}s, roster {}",
                self.state.difficulty,
                self.state.elapsed_seconds(),
                self.state.enemies.len()
            );
        }

        // Player movement, collision-gated per axis
        let movement = self.state.player.apply_movement(input, &self.state.scenario);
        self.audio.set_walking(input.is_moving());
        if movement.landed {
            self.audio.play(Cue::JumpImpact);
        }

        // Enemy state machines, all before any collision check
        let mut cues = Vec::new();
        let player_position = self.state.player.position;
        for (_, enemy) in self.state.enemies.iter_mut() {
            enemy.difficulty = self.state.difficulty;
            enemy.update(player_position, &self.state.traps, &mut cues);
        }
        for cue in cues.drain(..) {
            self.audio.play(cue);
        }

        // Game-over check against the updated positions
        let player_hull = self.state.player.hull();
        let caught = self
            .state
            .enemies
            .iter()
            .any(|(_, enemy)| !enemy.removed && player_hull.intersects(&enemy.hull()));
        if caught {
            self.state.game_over = true;
            let score = self.state.final_score();
            log::info!("player caught after {:.1}s, final score {score}", self.state.elapsed_seconds());
            return TickOutcome::GameOver(score);
        }

        // Compact the roster before rendering so a just-removed enemy is
        // never drawn
        let purged = self.state.purge_removed();
        if purged > 0 {
            log::debug!("purged {purged} trapped enemies");
        }

        // Hand everything to the rendering collaborator
        self.renderer.set_camera(&self.state.player.view_projection_matrix(
            CAMERA_FOV_DEGREES,
            CAMERA_ASPECT,
            CAMERA_NEAR,
            CAMERA_FAR,
        ));
        self.renderer
            .render(self.state.scenario.parts(), &scenario_world_transform());
        for trap in &self.state.traps {
            self.renderer
                .render(trap.parts(), &trap_world_transform(trap.position()));
        }
        for (_, enemy) in self.state.enemies.iter() {
            self.renderer.render(
                &enemy.parts,
                &enemy_world_transform(enemy.position, enemy.current_angle),
            );
        }

        TickOutcome::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{BuiltinGeometry, RenderableParts};
    use crate::game::audio::CuePlayer;
    use crate::game::enemy::{Enemy, EnemyState};
    use crate::game::trap::Trap;
    use crate::game::{DIFFICULTY_INTERVAL_SECS, TICK_RATE};
    use crate::math::vec::Vec3;
    use crate::render::LogRenderer;

    type TestApp = App<BuiltinGeometry, LogRenderer>;

    /// An app with a deterministic (empty) roster; tests insert exactly
    /// the entities they need.
    fn bare_app() -> TestApp {
        let mut app = App::new(BuiltinGeometry, LogRenderer::default(), CuePlayer::silent())
            .expect("builtin geometry should load");
        app.state.enemies.clear();
        app.state.traps.clear();
        app
    }

    fn enemy_at(x: f32, z: f32) -> Enemy {
        Enemy::new(Vec3::new(x, 0.0, z), RenderableParts::default())
    }

    /// Tests the end-to-end game-over property: an enemy hull overlapping
    /// the player hull at the same center ends the game exactly once, and
    /// no tick-driven mutation happens afterwards.
    #[test]
    fn test_game_over_fires_once_then_freezes() {
        let mut app = bare_app();
        let player_position = app.state.player.position;
        app.state
            .enemies
            .insert(enemy_at(player_position.x(), player_position.z()));

        let outcome = app.tick(&InputState::default());
        let score = app.state.final_score();
        assert_eq!(outcome, TickOutcome::GameOver(score));
        assert!(app.state.game_over);

        let ticks_before = app.state.elapsed_ticks;
        let enemies_before = app.state.enemies.len();
        let outcome = app.tick(&InputState::default());
        assert_eq!(outcome, TickOutcome::GameOver(score));
        assert_eq!(app.state.elapsed_ticks, ticks_before);
        assert_eq!(app.state.enemies.len(), enemies_before);
        assert_eq!(app.state.final_score(), score);
    }

    /// Tests that enemy updates run before the collision check: an enemy
    /// whose pursuit step carries it into the player's hull ends the game
    /// within that same tick.
    #[test]
    fn test_updates_precede_collision_check() {
        let mut app = bare_app();
        let p = app.state.player.position;
        // Footprints are 1+1 wide, so overlap starts at an x-gap of 2; the
        // aggressive step (0.025, aimed at the eye-height position) closes
        // ~0.019 of it per tick
        app.state.enemies.insert(enemy_at(p.x() + 2.015, p.z()));

        let outcome = app.tick(&InputState::default());
        assert!(matches!(outcome, TickOutcome::GameOver(_)));
    }

    /// Tests that a difficulty step spawns its batch of enemies and traps.
    #[test]
    fn test_difficulty_step_spawns_batch() {
        let mut app = bare_app();
        app.state.elapsed_ticks = DIFFICULTY_INTERVAL_SECS * TICK_RATE as u64 - 1;

        app.tick(&InputState::default());
        assert_eq!(app.state.difficulty, 1);
        assert_eq!(app.state.enemies.len(), SPAWN_ENEMIES_PER_STEP as usize);
        assert_eq!(app.state.traps.len(), SPAWN_TRAPS_PER_STEP as usize);
    }

    /// Tests that removed enemies are purged before rendering: the draw
    /// count for a tick covers the scenario, traps, and live enemies only.
    #[test]
    fn test_purged_enemies_are_not_rendered() {
        let mut app = bare_app();
        app.state.enemies.insert(enemy_at(10.0, 10.0));
        let mut caught = enemy_at(-10.0, -10.0);
        caught.removed = true;
        app.state.enemies.insert(caught);

        let draws_before = app.renderer.draw_count();
        app.tick(&InputState::default());
        let draws = app.renderer.draw_count() - draws_before;
        // Scenario plus the one live enemy; the flagged one was compacted
        assert_eq!(draws, 2);
        assert_eq!(app.state.enemies.len(), 1);
    }

    /// Tests that an enemy disabled by a trap freezes, survives as a
    /// rendered corpse, and leaves the roster on schedule with its bonus.
    #[test]
    fn test_trapped_enemy_lifecycle_through_ticks() {
        let mut app = bare_app();
        let p = app.state.player.position;
        // Close enough to aggro, sitting on a trap
        let key = app.state.enemies.insert(enemy_at(p.x() + 5.0, p.z()));
        app.state
            .traps
            .push(Trap::new(app.state.enemies[key].position, RenderableParts::default()));

        app.tick(&InputState::default());
        assert_eq!(app.state.enemies[key].state, EnemyState::Disabled);
        let resting_place = app.state.enemies[key].position;
        let score_at_disable = app.state.score;

        // The countdown holds the enemy in the roster until its last tick
        for _ in 0..crate::game::enemy::DISABLED_LIFETIME_TICKS - 1 {
            app.tick(&InputState::default());
        }
        assert_eq!(app.state.enemies[key].position, resting_place);

        app.tick(&InputState::default());
        assert!(!app.state.enemies.contains_key(key));
        assert!(app.state.score > score_at_disable + crate::game::TRAP_SCORE_BONUS - 1.0);
    }

    /// Tests the footstep edge wiring: moving input starts the walk loop,
    /// idle input stops it.
    #[test]
    fn test_walking_cue_edges() {
        let mut app = bare_app();
        let moving = InputState {
            back_forth: 1.0,
            ..Default::default()
        };
        app.tick(&moving);
        assert!(app.audio.is_walking());
        app.tick(&InputState::default());
        assert!(!app.audio.is_walking());
    }
}
