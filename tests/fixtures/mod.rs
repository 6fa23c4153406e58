//! Test fixtures for route-smoother.
//!
//! Provides cell paths shaped like the output of a hexagonal-grid
//! shortest-path query, plus a seeded generator for adversarial polylines.

pub mod shipping_lanes;

pub use shipping_lanes::*;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use route_smoother::geodesic::LocalFrame;
use route_smoother::GeoPoint;

/// Random walk with sharp turns, built in a local plane around `origin`.
///
/// Steps are 2-15 km and every heading change is up to ±170°, so the
/// polyline doubles back on itself often.
pub fn sharp_turn_walk(seed: u64, origin: GeoPoint, points: usize) -> Vec<GeoPoint> {
    let mut rng = StdRng::seed_from_u64(seed);
    let frame = LocalFrame::new(origin);

    let mut heading: f64 = rng.random_range(0.0..std::f64::consts::TAU);
    let (mut x, mut y) = (0.0, 0.0);
    let mut walk = Vec::with_capacity(points);
    walk.push(origin);

    for _ in 1..points {
        heading += rng.random_range(-170.0_f64..170.0).to_radians();
        let step = rng.random_range(2_000.0..15_000.0);
        x += step * heading.cos();
        y += step * heading.sin();
        walk.push(frame.unproject(x, y));
    }

    walk
}
