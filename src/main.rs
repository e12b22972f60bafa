//! Inkball entry point
//!
//! Headless demo: runs the simulation against a built-in two-level
//! configuration at the fixed tick rate and logs progress. Real hosts embed
//! the library, draw the exposed state, and feed input edits between ticks.

use std::time::{Duration, Instant};

use inkball::consts::TICK_RATE;
use inkball::sim::{tick, GamePhase, GameState};
use inkball::GameConfig;

const DEMO_CONFIG: &str = r#"{
    "levels": [
        {
            "layout": [
                "XXXXXXXXXXXX",
                "XS         X",
                "X    2     X",
                "X          X",
                "X   H2     X",
                "X          X",
                "X       B1 X",
                "X  1       X",
                "X     H1   X",
                "X          X",
                "X         SX",
                "XXXXXXXXXXXX"
            ],
            "time": 90,
            "spawn_interval": 8,
            "balls": ["blue", "orange", "grey"],
            "score_increase_from_hole_capture_modifier": 1.0,
            "score_decrease_from_wrong_hole_modifier": 1.0
        },
        {
            "layout": [
                "XXXXXXXXXXXX",
                "X          X",
                "X  S       X",
                "X     X    X",
                "X   H0     X",
                "X          X",
                "X    X     X",
                "X      H3  X",
                "X          X",
                "X  B3      X",
                "X          X",
                "XXXXXXXXXXXX"
            ],
            "time": 60,
            "spawn_interval": 5,
            "balls": ["green", "grey"],
            "score_increase_from_hole_capture_modifier": 1.5,
            "score_decrease_from_wrong_hole_modifier": 1.0
        }
    ],
    "score_increase_from_hole_capture":
        { "grey": 70, "orange": 50, "blue": 50, "green": 50, "yellow": 100 },
    "score_decrease_from_wrong_hole":
        { "grey": 0, "orange": 25, "blue": 25, "green": 25, "yellow": 100 }
}"#;

fn main() {
    env_logger::init();

    let config = match GameConfig::from_json(DEMO_CONFIG) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("demo config failed to parse: {err}");
            std::process::exit(1);
        }
    };

    let seed = 0xB0A2D;
    let mut state = GameState::new(config, seed);
    log::info!("running demo with seed {seed:#x}");

    let tick_duration = Duration::from_secs(1) / TICK_RATE;
    let mut last_report = 0;

    // Real-time paced loop; ends when the game finishes or both levels'
    // clocks have had time to run out
    let max_ticks = (u64::from(TICK_RATE)) * 200;
    while state.tick_count < max_ticks {
        let started = Instant::now();
        tick(&mut state);

        if state.phase == GamePhase::Finished {
            break;
        }
        if state.phase == GamePhase::TimeUp {
            log::info!("out of time on level {}", state.level_index);
            break;
        }

        if state.time_remaining != last_report {
            last_report = state.time_remaining;
            log::debug!(
                "level {} t={}s score={} balls={} queued={}",
                state.level_index,
                state.time_remaining,
                state.score,
                state.balls.len(),
                state.spawn_queue.len(),
            );
        }

        if let Some(rest) = tick_duration.checked_sub(started.elapsed()) {
            std::thread::sleep(rest);
        }
    }

    println!(
        "demo over: phase {:?}, level {}, score {}",
        state.phase, state.level_index, state.score
    );
}
