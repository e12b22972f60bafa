//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Single writer: the tick loop
//! - No rendering or platform dependencies

pub mod ball;
pub mod collision;
pub mod line;
pub mod state;
pub mod tick;

pub use ball::{Ball, CaptureOutcome};
pub use collision::{distance_to_segment, reflect, segment_normal};
pub use line::InkLine;
pub use state::{
    BallColor, Board, CellTag, GamePhase, GameState, Hole, PerimeterSweep, SweepTile, Wall,
    WallKind,
};
pub use tick::tick;
