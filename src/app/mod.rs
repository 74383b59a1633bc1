//! Application orchestration.
//!
//! The [`App`] owns the simulation state and the three collaborators the
//! core calls into (geometry loading, rendering, and cue playback) and
//! drives one simulation tick per frame. Entity spawning happens here:
//! geometry must resolve before an entity joins the roster, so spawn
//! batches block on the loader at startup and on difficulty steps, the
//! only suspension points in the system.

pub mod update;

use crate::assets::{AssetError, GeometryRef, GeometrySource};
use crate::game::audio::CuePlayer;
use crate::game::enemy::Enemy;
use crate::game::player::InputState;
use crate::game::scenario::Scenario;
use crate::game::trap::Trap;
use crate::game::{ENEMY_COUNT, GameState, TICK_RATE, TRAP_COUNT, WORLD_RADIUS};
use crate::math::vec::{Vec3, random_point_within};
use crate::render::Renderer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Result of one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The session continues.
    Continue,
    /// The player was caught; carries the final score. No further
    /// tick-driven state mutation occurs once this is returned.
    GameOver(u64),
}

/// The game application: simulation state plus collaborators.
pub struct App<L: GeometrySource, R: Renderer> {
    /// All mutable simulation state.
    pub state: GameState,
    loader: L,
    renderer: R,
    audio: CuePlayer,
}

impl<L: GeometrySource, R: Renderer> App<L, R> {
    /// Loads the scenario and spawns the starting roster.
    ///
    /// The scenario must resolve before the session exists at all; a
    /// scenario load failure is fatal to the whole session, unlike entity
    /// spawns, which fail individually.
    pub fn new(loader: L, renderer: R, audio: CuePlayer) -> Result<Self, AssetError> {
        let scenario_parts =
            pollster::block_on(loader.load_entity_geometry(GeometryRef::Scenario))?;
        let mut app = Self {
            state: GameState::new(Scenario::new(scenario_parts)),
            loader,
            renderer,
            audio,
        };
        app.spawn_enemies(ENEMY_COUNT);
        app.spawn_traps(TRAP_COUNT);
        Ok(app)
    }

    /// Spawns enemies at random playfield positions.
    ///
    /// Each spawn loads its geometry first; a failed load skips that one
    /// spawn and is logged, never surfaced to the tick loop.
    pub fn spawn_enemies(&mut self, count: usize) {
        for _ in 0..count {
            match pollster::block_on(self.loader.load_entity_geometry(GeometryRef::Enemy)) {
                Ok(parts) => {
                    let spot = random_point_within(Vec3::ZERO, WORLD_RADIUS);
                    let position = Vec3::new(spot.x(), 0.0, spot.z());
                    self.state.enemies.insert(Enemy::new(position, parts));
                }
                Err(e) => log::warn!("enemy spawn skipped: {e}"),
            }
        }
    }

    /// Places traps at random playfield positions, same failure contract
    /// as enemy spawns.
    pub fn spawn_traps(&mut self, count: usize) {
        for _ in 0..count {
            match pollster::block_on(self.loader.load_entity_geometry(GeometryRef::Trap)) {
                Ok(parts) => {
                    let spot = random_point_within(Vec3::ZERO, WORLD_RADIUS);
                    let position = Vec3::new(spot.x(), 0.0, spot.z());
                    self.state.traps.push(Trap::new(position, parts));
                }
                Err(e) => log::warn!("trap placement skipped: {e}"),
            }
        }
    }

    /// Runs the frame-paced session loop until game over or shutdown.
    ///
    /// `poll_input` is called once per tick with the current tick number,
    /// the input collaborator contract. Returns the final score.
    pub fn run<F>(&mut self, mut poll_input: F, shutdown: &AtomicBool) -> u64
    where
        F: FnMut(u64) -> InputState,
    {
        let tick_duration = Duration::from_secs_f64(1.0 / TICK_RATE as f64);
        let mut next_tick = Instant::now();

        loop {
            if shutdown.load(Ordering::Relaxed) {
                log::info!("shutdown requested, ending session");
                return self.state.final_score();
            }

            let input = poll_input(self.state.elapsed_ticks);
            match self.tick(&input) {
                TickOutcome::Continue => {}
                TickOutcome::GameOver(score) => return score,
            }

            next_tick += tick_duration;
            let now = Instant::now();
            if next_tick > now {
                std::thread::sleep(next_tick - now);
            } else {
                // Fell behind; resynchronize instead of bursting ticks
                next_tick = now;
            }
        }
    }
}
