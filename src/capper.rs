//! Deviation capping.
//!
//! Walks a smoothed curve once, left to right, and pulls every interior
//! point that strays farther than the cap from the raw corridor back
//! toward its nearest raw segment, exactly onto the cap boundary.
//!
//! The pass is not iterated to a fixed point: a corrected point is never
//! compared against its already finalized neighbours again.

use tracing::debug;

use crate::polyline::GeoPoint;
use crate::search::nearest_segment;
use crate::segment::closest_point_on_segment_fast;

/// Distances up to `max + DEVIATION_TOLERANCE_M` count as in bound.
pub const DEVIATION_TOLERANCE_M: f64 = 1e-6;

/// Extra pulls allowed after the first correction of a point.
///
/// Moving a point also moves the latitude its projection is centered on,
/// so a point landed on the boundary in one frame can sit a hair outside
/// it in its own.
const SETTLE_STEPS: usize = 4;

/// Caps the distance of every interior point of `smoothed` to `raw`.
///
/// The first and last output points are set to the raw endpoints. When
/// `raw` has fewer than two points there is no corridor and `smoothed` is
/// returned unchanged.
pub fn cap_deviation(
    raw: &[GeoPoint],
    smoothed: &[GeoPoint],
    max_deviation_m: f64,
    window: usize,
) -> Vec<GeoPoint> {
    let mut capped = smoothed.to_vec();
    if raw.len() < 2 || capped.len() < 2 {
        return capped;
    }

    let last = capped.len() - 1;
    capped[0] = raw[0];
    capped[last] = raw[raw.len() - 1];

    let bound = max_deviation_m + DEVIATION_TOLERANCE_M;
    let threshold_sq = bound * bound;
    let mut cursor = 0;
    let mut corrected = 0usize;

    for point in capped.iter_mut().take(last).skip(1) {
        let Some(found) = nearest_segment(raw, *point, cursor, window, threshold_sq) else {
            break;
        };
        cursor = found.segment;

        if found.distance_sq <= threshold_sq {
            continue;
        }

        *point = pull_toward(*point, found.point, found.distance_m(), max_deviation_m);
        for _ in 0..SETTLE_STEPS {
            let (nearest, distance_sq) =
                closest_point_on_segment_fast(raw[found.segment], raw[found.segment + 1], *point);
            if distance_sq <= threshold_sq {
                break;
            }
            *point = pull_toward(*point, nearest, distance_sq.sqrt(), max_deviation_m);
        }
        corrected += 1;
    }

    debug!(
        points = capped.len(),
        corrected,
        max_deviation_m,
        window,
        "capped smoothed path"
    );

    capped
}

/// Moves `point` along the straight line to `nearest` until it is
/// `max_deviation_m` away, assuming it is currently `distance_m` away.
fn pull_toward(point: GeoPoint, nearest: GeoPoint, distance_m: f64, max_deviation_m: f64) -> GeoPoint {
    let alpha = (distance_m - max_deviation_m) / distance_m;
    point.lerp(nearest, alpha)
}
