//! Chaikin corner cutting.
//!
//! Every pass replaces each edge with its 25% and 75% points, which rounds
//! corners while keeping every new point on an edge of the previous pass.
//! The first and last points stay fixed.

use crate::polyline::GeoPoint;

/// Number of points produced by one pass over `n >= 3` points.
pub const fn points_after_pass(n: usize) -> usize {
    2 * (n - 1) + 1
}

/// Runs `iterations` corner-cutting passes over `points`.
///
/// Each pass keeps the first point, emits the two cut points of every
/// edge, and substitutes the last point for the final edge's 75% cut, so
/// `n` points become `2·(n−1)+1`. Inputs with fewer than three points have
/// no corner to cut and are returned unchanged.
pub fn chaikin(points: &[GeoPoint], iterations: u32) -> Vec<GeoPoint> {
    let mut current = points.to_vec();
    if current.len() < 3 {
        return current;
    }

    for _ in 0..iterations {
        current = cut_corners(&current);
    }

    current
}

fn cut_corners(points: &[GeoPoint]) -> Vec<GeoPoint> {
    let n = points.len();
    let mut next = Vec::with_capacity(points_after_pass(n));
    next.push(points[0]);

    for (edge, pair) in points.windows(2).enumerate() {
        let (p, q) = (pair[0], pair[1]);
        next.push(p.lerp(q, 0.25));
        if edge + 2 < n {
            next.push(p.lerp(q, 0.75));
        }
    }

    next.push(points[n - 1]);
    next
}
