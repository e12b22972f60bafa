//! Ball motion and resolution against the board, walls, and holes
//!
//! A ball integrates one velocity step per tick, then resolves collisions in
//! a fixed order: board edge, walls, drawn lines (handled by the line
//! module), and finally holes. Wall bounces arm a short cooldown so a single
//! contact cannot re-trigger on consecutive ticks while the ball is still
//! overlapping the cell.

use glam::Vec2;

use super::state::{BallColor, Hole, Wall, WallKind};
use crate::consts::*;
use crate::normalize_to;

/// Outcome of resolving a ball against the hole registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// Ball entered a hole of its own colour (or either side is the wildcard)
    Correct,
    /// Ball entered a hole of a different colour
    Wrong,
    /// Ball keeps moving
    None,
}

/// A ball in play
#[derive(Debug, Clone)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: BallColor,
    /// Render radius; shrinks inside a hole's attraction field
    pub radius: f32,
    /// Ticks remaining before walls are tested again after a bounce
    pub wall_cooldown: u32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, color: BallColor) -> Self {
        Self {
            pos,
            vel,
            color,
            radius: BALL_RADIUS,
            wall_cooldown: 0,
        }
    }

    /// Integrate one tick of motion
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    /// Reflect off the board edge and the first overlapping wall.
    ///
    /// Edge tests run every tick, per axis, offset by the current radius.
    /// Wall tests are skipped while the bounce cooldown is counting down;
    /// at most one wall collision resolves per tick.
    pub fn resolve_bounds_and_walls(&mut self, walls: &[Wall], width: f32, height: f32) {
        if self.pos.x - self.radius < 0.0 || self.pos.x + self.radius > width {
            self.vel.x = -self.vel.x;
        }
        if self.pos.y - self.radius < 0.0 || self.pos.y + self.radius > height {
            self.vel.y = -self.vel.y;
        }

        if self.wall_cooldown > 0 {
            self.wall_cooldown -= 1;
            return;
        }

        for wall in walls {
            let center = wall.center();
            if self.pos.distance(center) > self.radius + CELL_SIZE / 2.0 {
                continue;
            }

            // Reflect along the axis of greater overlap with the cell center
            let offset = self.pos - center;
            if offset.x.abs() > offset.y.abs() {
                self.vel.x = -self.vel.x;
            } else {
                self.vel.y = -self.vel.y;
            }

            if let WallKind::Colored(color) = wall.kind {
                if color != self.color {
                    self.color = color;
                }
            }

            self.wall_cooldown = WALL_COOLDOWN_TICKS;
            return;
        }
    }

    /// Resolve hole attraction and capture.
    ///
    /// Only the first hole within attraction range is evaluated (holes do
    /// not overlap). Inside the field the render radius shrinks linearly
    /// with distance and the velocity bends toward the hole center without
    /// changing speed; a ball at rest keeps the nudge and starts drifting
    /// in. Outside every field the radius resets to the base radius.
    pub fn resolve_holes(&mut self, holes: &[Hole]) -> CaptureOutcome {
        for hole in holes {
            let to_hole = hole.center - self.pos;
            let dist = to_hole.length();
            if dist > HOLE_ATTRACTION_RADIUS {
                continue;
            }

            self.radius = BALL_RADIUS * (dist / HOLE_ATTRACTION_RADIUS);

            let speed = self.vel.length();
            self.vel += to_hole * HOLE_ATTRACTION_FACTOR;
            if speed > 0.0 {
                self.vel = normalize_to(self.vel, speed);
            }

            if dist <= HOLE_CAPTURE_RADIUS {
                let matched = self.color == hole.color
                    || self.color.is_wildcard()
                    || hole.color.is_wildcard();
                return if matched {
                    CaptureOutcome::Correct
                } else {
                    CaptureOutcome::Wrong
                };
            }
            return CaptureOutcome::None;
        }

        self.radius = BALL_RADIUS;
        CaptureOutcome::None
    }
}
