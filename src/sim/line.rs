//! Player-drawn line obstacles
//!
//! A line is an ordered polyline built up while the player holds the draw
//! gesture. It is one-shot: the first ball that hits any of its segments is
//! reflected and the whole line is discarded by the tick loop.

use glam::Vec2;

use super::ball::Ball;
use super::collision;
use crate::consts::LINE_THICKNESS;

/// A committed or in-progress ink stroke
#[derive(Debug, Clone, Default)]
pub struct InkLine {
    points: Vec<Vec2>,
}

impl InkLine {
    pub fn new(start: Vec2) -> Self {
        Self {
            points: vec![start],
        }
    }

    /// Append the next stroke point
    pub fn push_point(&mut self, point: Vec2) {
        self.points.push(point);
    }

    /// Stroke points in draw order
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Test the ball's predicted next-tick position against each segment and
    /// reflect its velocity off the first segment hit.
    ///
    /// The prediction (`pos + vel`) catches fast balls before they step over
    /// a thin stroke. Returns true when a segment was hit; the caller is
    /// responsible for discarding the line.
    pub fn deflect(&self, ball: &mut Ball) -> bool {
        let predicted = ball.pos + ball.vel;
        let reach = LINE_THICKNESS / 2.0 + ball.radius;

        for seg in self.points.windows(2) {
            if collision::distance_to_segment(predicted, seg[0], seg[1]) <= reach {
                let normal = collision::segment_normal(seg[0], seg[1]);
                ball.vel = collision::reflect(ball.vel, normal);
                return true;
            }
        }
        false
    }

    /// Whether a point lies on the stroke (within half the stroke
    /// thickness). Used for explicit deletion, independent of ball radius.
    pub fn near_point(&self, point: Vec2) -> bool {
        self.points
            .windows(2)
            .any(|seg| collision::distance_to_segment(point, seg[0], seg[1]) <= LINE_THICKNESS / 2.0)
    }
}
