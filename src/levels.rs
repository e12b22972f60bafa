//! Level layouts and scoring configuration
//!
//! Hosts load config however they like (a JSON file, an embedded string)
//! and hand the parsed result to the simulation. Data inconsistencies —
//! unknown layout characters, unknown colour names in the score tables —
//! are logged and degraded, never fatal: a broken cell becomes a plain
//! tile and an unknown colour simply scores nothing.

use std::collections::HashMap;

use serde::Deserialize;

use crate::sim::state::{BallColor, CellTag, WallKind};

/// Top-level game configuration, shaped for JSON:
///
/// ```json
/// {
///   "levels": [ { "layout": ["XX", "XS"], "time": 120, ... } ],
///   "score_increase_from_hole_capture": { "grey": 70, "orange": 50, ... },
///   "score_decrease_from_wrong_hole": { "grey": 0, "orange": 25, ... }
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct GameConfig {
    pub levels: Vec<LevelSpec>,
    pub score_increase_from_hole_capture: HashMap<String, i64>,
    pub score_decrease_from_wrong_hole: HashMap<String, i64>,
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Per-level parameters
#[derive(Debug, Clone, Deserialize)]
pub struct LevelSpec {
    /// Text grid rows; see [`Layout::parse`] for the cell alphabet
    pub layout: Vec<String>,
    /// Level time limit in seconds
    pub time: u32,
    /// Seconds between ball emissions
    pub spawn_interval: u32,
    /// Colours to emit, in order
    pub balls: Vec<BallColor>,
    #[serde(rename = "score_increase_from_hole_capture_modifier")]
    pub score_increase_modifier: f32,
    #[serde(rename = "score_decrease_from_wrong_hole_modifier")]
    pub score_decrease_modifier: f32,
}

/// Per-colour score base values, built from a name-keyed config map
#[derive(Debug, Clone, Default)]
pub struct ScoreTable {
    values: [i64; BallColor::ALL.len()],
}

impl ScoreTable {
    /// Build from config colour names. Unknown names are a logged warning
    /// and contribute nothing; colours the map omits score zero.
    pub fn from_names(map: &HashMap<String, i64>) -> Self {
        let mut table = Self::default();
        for (name, &value) in map {
            match BallColor::from_name(name) {
                Some(color) => table.values[color.id() as usize] = value,
                None => log::warn!("unknown colour name in score table: {name:?}"),
            }
        }
        table
    }

    #[inline]
    pub fn get(&self, color: BallColor) -> i64 {
        self.values[color.id() as usize]
    }
}

/// A parsed layout grid
#[derive(Debug, Clone)]
pub struct Layout {
    pub cols: usize,
    pub rows: usize,
    /// Row-major cell tags
    pub cells: Vec<CellTag>,
    /// Balls present at level start: (col, row, colour)
    pub initial_balls: Vec<(usize, usize, BallColor)>,
}

impl Layout {
    /// Parse text rows into cell tags.
    ///
    /// Alphabet: `X` neutral wall, `1`-`4` coloured wall, `S` spawner,
    /// `B<c>` starting ball of colour digit `c`, `H<c>` hole of colour
    /// digit `c` (2x2 footprint, tagged at its top-left cell), space for a
    /// plain tile. `B` and `H` consume the following digit's cell too.
    /// Anything unrecognised degrades to a tile with a warning.
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Layout {
        let row_count = rows.len();
        let col_count = rows
            .iter()
            .map(|r| r.as_ref().chars().count())
            .max()
            .unwrap_or(0);

        let mut layout = Layout {
            cols: col_count,
            rows: row_count,
            cells: vec![CellTag::Tile; col_count * row_count],
            initial_balls: Vec::new(),
        };

        for (row, text) in rows.iter().enumerate() {
            let chars: Vec<char> = text.as_ref().chars().collect();
            let mut col = 0;
            while col < chars.len() {
                let c = chars[col];
                let next = chars.get(col + 1).copied();
                match c {
                    'X' => layout.set(col, row, CellTag::Wall(WallKind::Neutral)),
                    '1'..='4' => {
                        // Wall digits are colour ids; from_digit cannot fail here
                        if let Some(color) = BallColor::from_digit(c) {
                            layout.set(col, row, CellTag::Wall(WallKind::Colored(color)));
                        }
                    }
                    'S' => layout.set(col, row, CellTag::Spawner),
                    'B' => {
                        match next.and_then(BallColor::from_digit) {
                            Some(color) => layout.initial_balls.push((col, row, color)),
                            None => log::warn!("ball at ({col}, {row}) has no colour digit"),
                        }
                        col += 1;
                    }
                    'H' => {
                        match next.and_then(BallColor::from_digit) {
                            Some(color) => layout.set(col, row, CellTag::Hole(color)),
                            None => log::warn!("hole at ({col}, {row}) has no colour digit"),
                        }
                        col += 1;
                    }
                    ' ' => {}
                    other => {
                        log::warn!("unrecognised layout character {other:?} at ({col}, {row})");
                    }
                }
                col += 1;
            }
        }

        layout
    }

    fn set(&mut self, col: usize, row: usize, tag: CellTag) {
        if col < self.cols && row < self.rows {
            self.cells[row * self.cols + col] = tag;
        }
    }
}
