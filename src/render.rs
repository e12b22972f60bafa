//! Rendering capability interface
//!
//! The core never draws. A host implements [`Canvas`] over whatever backend
//! it has and asks entities to draw themselves through [`Drawable`]. Sprite
//! lookups are allowed to fail — a missing asset degrades that draw to a
//! no-op with a logged warning, and the simulation is unaffected.

use glam::Vec2;

use crate::consts::{CELL_SIZE, LINE_THICKNESS};
use crate::sim::{Ball, BallColor, Board, CellTag, InkLine, Wall, WallKind};

/// Closed set of sprite identities the game draws with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Tile,
    Spawner,
    Wall(WallKind),
    Hole(BallColor),
    Ball(BallColor),
}

impl Sprite {
    /// Conventional asset name (`tile`, `entrypoint`, `wall0`..`wall4`,
    /// `hole0`..`hole4`, `ball0`..`ball4`)
    pub fn name(self) -> String {
        match self {
            Sprite::Tile => "tile".to_string(),
            Sprite::Spawner => "entrypoint".to_string(),
            Sprite::Wall(WallKind::Neutral) => "wall0".to_string(),
            Sprite::Wall(WallKind::Colored(c)) => format!("wall{}", c.id()),
            Sprite::Hole(c) => format!("hole{}", c.id()),
            Sprite::Ball(c) => format!("ball{}", c.id()),
        }
    }
}

/// What the host must supply to put the game on screen
pub trait Canvas {
    /// Draw a sprite into the given pixel rectangle. Returns false when the
    /// asset is unavailable; the caller logs and moves on.
    fn draw_sprite(&mut self, sprite: Sprite, x: f32, y: f32, w: f32, h: f32) -> bool;

    /// Draw one stroke segment of a player line
    fn draw_segment(&mut self, a: Vec2, b: Vec2, thickness: f32);
}

/// Anything that can put itself on a canvas
pub trait Drawable {
    fn draw(&self, canvas: &mut dyn Canvas);
}

fn draw_or_warn(canvas: &mut dyn Canvas, sprite: Sprite, x: f32, y: f32, w: f32, h: f32) {
    if !canvas.draw_sprite(sprite, x, y, w, h) {
        log::warn!("sprite {:?} unavailable; skipping draw", sprite.name());
    }
}

impl Drawable for Ball {
    fn draw(&self, canvas: &mut dyn Canvas) {
        draw_or_warn(
            canvas,
            Sprite::Ball(self.color),
            self.pos.x - self.radius,
            self.pos.y - self.radius,
            2.0 * self.radius,
            2.0 * self.radius,
        );
    }
}

impl Drawable for Wall {
    fn draw(&self, canvas: &mut dyn Canvas) {
        draw_or_warn(
            canvas,
            Sprite::Wall(self.kind),
            self.col as f32 * CELL_SIZE,
            self.row as f32 * CELL_SIZE,
            CELL_SIZE,
            CELL_SIZE,
        );
    }
}

impl Drawable for InkLine {
    fn draw(&self, canvas: &mut dyn Canvas) {
        for seg in self.points().windows(2) {
            canvas.draw_segment(seg[0], seg[1], LINE_THICKNESS);
        }
    }
}

impl Drawable for Board {
    /// Base tiles and spawners first, then holes at their 2x2 size
    fn draw(&self, canvas: &mut dyn Canvas) {
        for (col, row, tag) in self.cells() {
            let x = col as f32 * CELL_SIZE;
            let y = row as f32 * CELL_SIZE;
            draw_or_warn(canvas, Sprite::Tile, x, y, CELL_SIZE, CELL_SIZE);
            if tag == CellTag::Spawner {
                draw_or_warn(canvas, Sprite::Spawner, x, y, CELL_SIZE, CELL_SIZE);
            }
        }
        for (col, row, tag) in self.cells() {
            if let CellTag::Hole(color) = tag {
                let x = col as f32 * CELL_SIZE;
                let y = row as f32 * CELL_SIZE;
                draw_or_warn(
                    canvas,
                    Sprite::Hole(color),
                    x,
                    y,
                    CELL_SIZE * 2.0,
                    CELL_SIZE * 2.0,
                );
            }
        }
    }
}
