//! Cubic Bézier evaluation
//!
//! Uses the power-basis (polynomial coefficient) form so results match the
//! values font tools have historically produced for the same control points.

use kurbo::{CubicBez, Point};

/// Evaluate a cubic Bézier at parameter `t`
///
/// Per axis the curve is expanded to `a·t³ + b·t² + c·t + d` with
/// coefficients derived from the four control coordinates.
pub fn point_on_cubic(curve: CubicBez, t: f64) -> Point {
    let axis = |p0: f64, p1: f64, p2: f64, p3: f64| {
        let d = p0;
        let c = (p1 - d) * 3.0;
        let b = (p2 - p1) * 3.0 - c;
        let a = p3 - d - c - b;
        a * t.powi(3) + b * t.powi(2) + c * t + d
    };

    Point::new(
        axis(curve.p0.x, curve.p1.x, curve.p2.x, curve.p3.x),
        axis(curve.p0.y, curve.p1.y, curve.p2.y, curve.p3.y),
    )
}
