//! Offset vectors along segment directions

use kurbo::{Point, Vec2};

/// Round a coordinate to the unit grid, ties to even
pub fn round_to_grid(value: f64) -> f64 {
    value.round_ties_even()
}

/// The direction from `from` to `to`, scaled to length `offset` and rounded
/// to whole units per axis
///
/// Coincident points have no direction; the result is then zero.
pub fn scaled_direction(from: Point, to: Point, offset: i64) -> Vec2 {
    let delta = to - from;
    let length = delta.hypot();
    if length == 0.0 {
        return Vec2::ZERO;
    }
    let scaled = delta / length * offset as f64;
    Vec2::new(round_to_grid(scaled.x), round_to_grid(scaled.y))
}
