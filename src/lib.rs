//! Inkball - a grid-based ball-capture puzzle
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `levels`: Parsed level layouts and scoring configuration
//! - `render`: Capability traits a host rendering layer implements
//!
//! The simulation advances one fixed tick at a time via [`sim::tick`]; a
//! host drives the loop, draws the exposed state, and feeds line edits and
//! pause/reset commands back in between ticks.

pub mod levels;
pub mod render;
pub mod sim;

pub use levels::{GameConfig, Layout, LevelSpec, ScoreTable};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 30;

    /// Board cell size in pixels
    pub const CELL_SIZE: f32 = 32.0;

    /// Ball base radius (half a cell)
    pub const BALL_RADIUS: f32 = CELL_SIZE / 2.0;
    /// Per-axis spawn speed; balls launch on a random ±diagonal
    pub const BALL_SPAWN_SPEED: f32 = 2.0;

    /// Distance at which a hole starts bending a ball's path
    pub const HOLE_ATTRACTION_RADIUS: f32 = 45.0;
    /// Distance at which a ball is captured
    pub const HOLE_CAPTURE_RADIUS: f32 = 15.0;
    /// Fraction of the offset-to-hole applied as a velocity nudge per tick
    pub const HOLE_ATTRACTION_FACTOR: f32 = 0.005;

    /// Drawn line stroke thickness
    pub const LINE_THICKNESS: f32 = 10.0;

    /// Ticks a ball skips wall tests after a wall bounce
    pub const WALL_COOLDOWN_TICKS: u32 = 2;

    /// Ticks between score increments during the time-bonus animation
    pub const BONUS_TICK_INTERVAL: u64 = 2;
}

/// Rescale a vector to the given speed. Zero vectors are left unchanged.
#[inline]
pub fn normalize_to(v: Vec2, speed: f32) -> Vec2 {
    let mag = v.length();
    if mag > 0.0 { v * (speed / mag) } else { v }
}
