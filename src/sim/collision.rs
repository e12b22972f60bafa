//! Collision geometry shared by walls, lines, and holes
//!
//! Everything a circular ball needs to interact with the board: clamped
//! point-to-segment distance for stroke collision, and specular reflection
//! for bounce response.

use glam::Vec2;

/// Distance from a point to a line segment.
///
/// Projects the point onto the segment, clamping the parametric position to
/// [0, 1] so positions past either endpoint fall back to endpoint distance.
/// Degenerate (zero-length) segments are treated as a point.
pub fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance(a);
    }

    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Unit normal of a segment (perpendicular to its direction).
///
/// Returns zero for degenerate segments, which makes the reflection a no-op.
pub fn segment_normal(a: Vec2, b: Vec2) -> Vec2 {
    let dir = b - a;
    Vec2::new(-dir.y, dir.x).normalize_or_zero()
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}
