//! Acecho - A 3D Chase Survival Game Core
//!
//! This is the main entry point for the Acecho simulation. Acecho is the
//! core of a first-person chase game: autonomous enemies pursue the player
//! through a static scenario, floor traps disable aggressive pursuers,
//! difficulty scales on fixed time thresholds, and contact with an enemy
//! ends the run.
//!
//! # Architecture
//! The application follows a modular architecture:
//! - `app/`: Orchestration, the per-tick update routine and session loop
//! - `game/`: Core game logic for player, enemies, traps, scenario, audio
//! - `assets/`: Geometry loading contract between core and model parsing
//! - `render/`: Draw-call contract between core and graphics backend
//! - `math/`: Mathematical utilities for 3D game logic
//!
//! # Usage
//! Run with `cargo run`. The binary drives a scripted demo session against
//! the procedural geometry source and a logging renderer; set `RUST_LOG`
//! to see per-tick detail.

#![warn(missing_docs)]
pub mod app;
pub mod assets;
pub mod game;
pub mod math;
pub mod render;

use app::App;
use assets::BuiltinGeometry;
use game::audio::CuePlayer;
use game::player::InputState;
use render::LogRenderer;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

/// Main entry point for the Acecho demo session.
///
/// Initializes logging, wires the collaborators (procedural geometry,
/// logging renderer, best-effort audio), and runs the session loop until
/// the player is caught or the process is interrupted.
fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let flag = Arc::clone(&shutdown);
        if let Err(e) = ctrlc::set_handler(move || flag.store(true, Ordering::Relaxed)) {
            log::warn!("could not install interrupt handler: {e}");
        }
    }

    let audio = CuePlayer::new();
    let mut app = match App::new(BuiltinGeometry, LogRenderer::default(), audio) {
        Ok(app) => app,
        Err(e) => {
            log::error!("scenario geometry failed to load: {e}");
            return;
        }
    };

    log::info!(
        "session start: {} enemies, {} traps",
        app.state.enemies.len(),
        app.state.traps.len()
    );

    let score = app.run(demo_input, &shutdown);
    println!("Final score: {score}");
}

/// Scripted input for the demo session: keep walking with a slow sweep of
/// the view, hopping every ten seconds or so, until something catches up.
fn demo_input(tick: u64) -> InputState {
    InputState {
        back_forth: 1.0,
        sideways: 0.0,
        turn: if (tick / 600) % 2 == 0 { 0.2 } else { -0.2 },
        pitch: 0.0,
        jump: tick % 600 == 0,
    }
}
