//! Game state and core simulation types
//!
//! All mutable game state lives in [`GameState`], the single structure the
//! tick loop writes. Hosts read it between ticks and mutate it only through
//! the narrow line-edit / pause / reset entry points.

use std::collections::VecDeque;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::line::InkLine;
use crate::consts::*;
use crate::levels::{GameConfig, Layout, ScoreTable};

/// Ball / hole / wall colour ids.
///
/// `Grey` (id 0) is the wildcard: a grey ball captures into any hole and
/// any ball captures into a grey hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BallColor {
    Grey,
    Orange,
    Blue,
    Green,
    Yellow,
}

impl BallColor {
    pub const ALL: [BallColor; 5] = [
        BallColor::Grey,
        BallColor::Orange,
        BallColor::Blue,
        BallColor::Green,
        BallColor::Yellow,
    ];

    /// Numeric id (0..=4)
    #[inline]
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    /// Layout digit (`'0'..='4'`)
    pub fn from_digit(c: char) -> Option<Self> {
        c.to_digit(10).and_then(|d| Self::from_id(d as u8))
    }

    /// Config colour name (`"grey"`, `"orange"`, ...)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "grey" => Some(BallColor::Grey),
            "orange" => Some(BallColor::Orange),
            "blue" => Some(BallColor::Blue),
            "green" => Some(BallColor::Green),
            "yellow" => Some(BallColor::Yellow),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BallColor::Grey => "grey",
            BallColor::Orange => "orange",
            BallColor::Blue => "blue",
            BallColor::Green => "green",
            BallColor::Yellow => "yellow",
        }
    }

    #[inline]
    pub fn is_wildcard(self) -> bool {
        matches!(self, BallColor::Grey)
    }
}

/// Wall variants: plain bounce, or bounce-and-recolor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallKind {
    Neutral,
    Colored(BallColor),
}

/// What a board cell holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellTag {
    #[default]
    Tile,
    Wall(WallKind),
    /// Top-left cell of a hole's 2x2 footprint
    Hole(BallColor),
    Spawner,
}

/// A static wall occupying one grid cell
#[derive(Debug, Clone, Copy)]
pub struct Wall {
    pub col: usize,
    pub row: usize,
    pub kind: WallKind,
}

impl Wall {
    /// Cell center in pixel coordinates
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.col as f32 * CELL_SIZE + CELL_SIZE / 2.0,
            self.row as f32 * CELL_SIZE + CELL_SIZE / 2.0,
        )
    }
}

/// A capture zone. The attraction and capture radii are global constants.
#[derive(Debug, Clone, Copy)]
pub struct Hole {
    /// Center of the 2x2 cell footprint, in pixels
    pub center: Vec2,
    pub color: BallColor,
}

/// Read-only grid of cell tags, derived once from the parsed layout
#[derive(Debug, Clone, Default)]
pub struct Board {
    cols: usize,
    rows: usize,
    cells: Vec<CellTag>,
}

impl Board {
    pub fn from_layout(layout: &Layout) -> Self {
        Self {
            cols: layout.cols,
            rows: layout.rows,
            cells: layout.cells.clone(),
        }
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Cell tag at (col, row); out-of-range reads are plain tiles
    pub fn get(&self, col: usize, row: usize) -> CellTag {
        if col < self.cols && row < self.rows {
            self.cells[row * self.cols + col]
        } else {
            CellTag::Tile
        }
    }

    /// Iterate all cells as (col, row, tag)
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, CellTag)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &tag)| (i % self.cols, i / self.cols, tag))
    }

    #[inline]
    pub fn pixel_width(&self) -> f32 {
        self.cols as f32 * CELL_SIZE
    }

    #[inline]
    pub fn pixel_height(&self) -> f32 {
        self.rows as f32 * CELL_SIZE
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Frozen by the player; toggles back to Playing
    Paused,
    /// Level timer expired with balls still in play; terminal until reset
    TimeUp,
    /// Converting remaining time into score after a clear
    ScoreAnimating,
    /// Every level cleared
    Finished,
}

/// Travel direction of a sweep cursor tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SweepDir {
    Right,
    Down,
    Left,
    Up,
}

impl SweepDir {
    fn delta(self) -> (i32, i32) {
        match self {
            SweepDir::Right => (1, 0),
            SweepDir::Down => (0, 1),
            SweepDir::Left => (-1, 0),
            SweepDir::Up => (0, -1),
        }
    }

    fn turned(self) -> Self {
        match self {
            SweepDir::Right => SweepDir::Down,
            SweepDir::Down => SweepDir::Left,
            SweepDir::Left => SweepDir::Up,
            SweepDir::Up => SweepDir::Right,
        }
    }
}

/// One cursor tile of the perimeter sweep
#[derive(Debug, Clone, Copy)]
pub struct SweepTile {
    pub col: i32,
    pub row: i32,
    dir: SweepDir,
}

impl SweepTile {
    fn advance(&mut self) {
        let (dx, dy) = self.dir.delta();
        self.col += dx;
        self.row += dy;
    }
}

/// Cosmetic border animation shown while the time bonus converts.
///
/// Two cursor tiles start at opposite corners and walk the board edge in
/// opposite rotational directions, stepping once per score increment.
#[derive(Debug, Clone)]
pub struct PerimeterSweep {
    pub tiles: [SweepTile; 2],
    pub active: bool,
    cols: i32,
    rows: i32,
    steps: u32,
    span: u32,
}

impl PerimeterSweep {
    pub fn new(cols: usize, rows: usize) -> Self {
        let mut sweep = Self {
            tiles: [
                SweepTile {
                    col: 0,
                    row: 0,
                    dir: SweepDir::Right,
                },
                SweepTile {
                    col: 0,
                    row: 0,
                    dir: SweepDir::Left,
                },
            ],
            active: false,
            cols: cols as i32,
            rows: rows as i32,
            steps: 0,
            span: (cols.max(rows).saturating_sub(1) as u32).max(1),
        };
        sweep.rewind();
        sweep
    }

    fn rewind(&mut self) {
        self.tiles[0] = SweepTile {
            col: 0,
            row: 0,
            dir: SweepDir::Right,
        };
        self.tiles[1] = SweepTile {
            col: self.cols - 1,
            row: self.rows - 1,
            dir: SweepDir::Left,
        };
        self.steps = 0;
    }

    /// Restart from the corners and become visible
    pub fn start(&mut self) {
        self.rewind();
        self.active = true;
    }

    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Move both cursors one cell, turning at the corners
    pub fn step(&mut self) {
        if !self.active {
            return;
        }
        for tile in &mut self.tiles {
            tile.advance();
        }
        self.steps += 1;
        if self.steps >= self.span {
            self.steps = 0;
            for tile in &mut self.tiles {
                tile.dir = tile.dir.turned();
            }
        }
    }
}

/// Complete game state: one writer (the tick loop), read between ticks
#[derive(Debug, Clone)]
pub struct GameState {
    /// Parsed configuration the state was built from
    pub config: GameConfig,
    /// Per-colour score gains for correct captures
    pub increase_table: ScoreTable,
    /// Per-colour score penalties for wrong captures
    pub decrease_table: ScoreTable,
    /// Seed the RNG was initialised with (reused on reset)
    pub seed: u64,
    /// Deterministic RNG for spawn location and velocity signs
    pub rng: Pcg32,

    /// Current level (index into `config.levels`)
    pub level_index: usize,
    pub board: Board,
    pub walls: Vec<Wall>,
    pub holes: Vec<Hole>,
    /// Spawner cell origins, in pixels
    pub spawners: Vec<Vec2>,

    pub balls: Vec<Ball>,
    /// Committed line obstacles
    pub lines: Vec<InkLine>,
    /// Line currently being drawn, not yet an obstacle
    pub pending_line: Option<InkLine>,

    /// Colours awaiting emission, front first
    pub spawn_queue: VecDeque<BallColor>,
    /// Level spawn interval in seconds
    pub spawn_interval: u32,
    /// Ticks until the next spawn
    pub spawn_timer: u32,
    /// Colour of the most recently emitted ball (for queue displays)
    pub last_spawned: Option<BallColor>,

    pub score: i64,
    pub increase_modifier: f32,
    pub decrease_modifier: f32,

    /// Seconds left on the level clock
    pub time_remaining: u32,
    /// Ticks into the current clock second
    pub timer_ticks: u32,

    /// Seconds still to convert into score during the bonus phase
    pub bonus_remaining: u32,
    /// One-shot guard: the bonus phase ran for this level
    pub bonus_started: bool,
    /// Ticks into the bonus phase (paces the conversion)
    pub bonus_ticks: u64,
    pub sweep: PerimeterSweep,

    pub phase: GamePhase,
    /// Total ticks the simulation has advanced
    pub tick_count: u64,
}

impl GameState {
    /// Build a fresh state from parsed config, starting at the first level
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let increase_table = ScoreTable::from_names(&config.score_increase_from_hole_capture);
        let decrease_table = ScoreTable::from_names(&config.score_decrease_from_wrong_hole);

        let mut state = Self {
            config,
            increase_table,
            decrease_table,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            level_index: 0,
            board: Board::default(),
            walls: Vec::new(),
            holes: Vec::new(),
            spawners: Vec::new(),
            balls: Vec::new(),
            lines: Vec::new(),
            pending_line: None,
            spawn_queue: VecDeque::new(),
            spawn_interval: 0,
            spawn_timer: 0,
            last_spawned: None,
            score: 0,
            increase_modifier: 1.0,
            decrease_modifier: 1.0,
            time_remaining: 0,
            timer_ticks: 0,
            bonus_remaining: 0,
            bonus_started: false,
            bonus_ticks: 0,
            sweep: PerimeterSweep::new(0, 0),
            phase: GamePhase::Playing,
            tick_count: 0,
        };
        state.load_level(0);
        state
    }

    /// Load the given level, replacing all per-level state.
    ///
    /// An index past the configured set is the terminal finished condition,
    /// not an error.
    pub fn load_level(&mut self, index: usize) {
        self.level_index = index;
        if index >= self.config.levels.len() {
            self.phase = GamePhase::Finished;
            self.sweep.stop();
            log::info!("no level {index} configured: game finished");
            return;
        }

        let spec = self.config.levels[index].clone();
        let layout = Layout::parse(&spec.layout);

        self.board = Board::from_layout(&layout);
        self.walls.clear();
        self.holes.clear();
        self.spawners.clear();
        for (col, row, tag) in self.board.cells() {
            match tag {
                CellTag::Wall(kind) => self.walls.push(Wall { col, row, kind }),
                CellTag::Hole(color) => self.holes.push(Hole {
                    center: Vec2::new(
                        col as f32 * CELL_SIZE + CELL_SIZE,
                        row as f32 * CELL_SIZE + CELL_SIZE,
                    ),
                    color,
                }),
                CellTag::Spawner => self
                    .spawners
                    .push(Vec2::new(col as f32 * CELL_SIZE, row as f32 * CELL_SIZE)),
                CellTag::Tile => {}
            }
        }

        self.balls.clear();
        for &(col, row, color) in &layout.initial_balls {
            let pos = Vec2::new(
                col as f32 * CELL_SIZE + CELL_SIZE / 2.0,
                row as f32 * CELL_SIZE + CELL_SIZE / 2.0,
            );
            let vel = random_diagonal(&mut self.rng);
            self.balls.push(Ball::new(pos, vel, color));
        }

        self.lines.clear();
        self.pending_line = None;
        self.spawn_queue = spec.balls.iter().copied().collect();
        self.spawn_interval = spec.spawn_interval;
        self.spawn_timer = spec.spawn_interval * TICK_RATE;
        self.last_spawned = None;
        self.increase_modifier = spec.score_increase_modifier;
        self.decrease_modifier = spec.score_decrease_modifier;
        self.time_remaining = spec.time;
        self.timer_ticks = 0;
        self.bonus_remaining = 0;
        self.bonus_started = false;
        self.bonus_ticks = 0;
        self.sweep = PerimeterSweep::new(self.board.cols(), self.board.rows());
        self.phase = GamePhase::Playing;

        log::info!(
            "loaded level {index}: {} walls, {} holes, {} spawners, {} queued balls, {}s",
            self.walls.len(),
            self.holes.len(),
            self.spawners.len(),
            self.spawn_queue.len(),
            self.time_remaining,
        );
    }

    /// Start drawing a line at the given point
    pub fn begin_line(&mut self, point: Vec2) {
        self.pending_line = Some(InkLine::new(point));
    }

    /// Extend the line being drawn; no-op when none is in progress
    pub fn extend_line(&mut self, point: Vec2) {
        if let Some(line) = &mut self.pending_line {
            line.push_point(point);
        }
    }

    /// Commit the in-progress line to the active obstacle set
    pub fn commit_line(&mut self) {
        if let Some(line) = self.pending_line.take() {
            self.lines.push(line);
        }
    }

    /// Delete the first committed line whose stroke passes through `point`
    pub fn delete_line_near(&mut self, point: Vec2) {
        if let Some(i) = self.lines.iter().position(|l| l.near_point(point)) {
            self.lines.remove(i);
        }
    }

    /// Freeze or resume gameplay. Only flips between Playing and Paused;
    /// terminal phases and the bonus conversion ignore it.
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            other => other,
        };
    }

    /// Throw everything away and restart from the first level
    pub fn reset(&mut self) {
        self.score = 0;
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.tick_count = 0;
        self.load_level(0);
        log::info!("game reset");
    }

    /// Spawn countdown in seconds, for display. Clamps at zero once the
    /// queue has drained.
    pub fn spawn_countdown_secs(&self) -> f32 {
        self.spawn_timer as f32 / TICK_RATE as f32
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn is_finished(&self) -> bool {
        self.phase == GamePhase::Finished
    }
}

/// Random ±diagonal launch velocity
pub(crate) fn random_diagonal(rng: &mut Pcg32) -> Vec2 {
    let vx = if rng.random_bool(0.5) {
        BALL_SPAWN_SPEED
    } else {
        -BALL_SPAWN_SPEED
    };
    let vy = if rng.random_bool(0.5) {
        BALL_SPAWN_SPEED
    } else {
        -BALL_SPAWN_SPEED
    };
    Vec2::new(vx, vy)
}
