//! Nearest raw segment within a sliding index window.
//!
//! Points along a smoothed curve advance monotonically along the raw
//! corridor, so the segment matching point `i + 1` is close (in index) to
//! the one matching point `i`. Callers carry a cursor between queries and
//! only `2 * window + 1` segments are examined per query.

use crate::polyline::GeoPoint;
use crate::segment::closest_point_on_segment_fast;

/// Best candidate found by [`nearest_segment`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentMatch {
    /// Closest point on the winning segment.
    pub point: GeoPoint,
    /// Squared planar distance from the query point, in m².
    pub distance_sq: f64,
    /// Index `i` of the winning segment `raw[i]`–`raw[i + 1]`.
    pub segment: usize,
}

impl SegmentMatch {
    /// Planar distance in meters.
    pub fn distance_m(&self) -> f64 {
        self.distance_sq.sqrt()
    }
}

/// Inclusive range of segment indices searched around `cursor`.
///
/// `segment_count` must be at least 1.
pub fn window_bounds(segment_count: usize, cursor: usize, window: usize) -> (usize, usize) {
    let last = segment_count - 1;
    let cursor = cursor.min(last);
    (cursor.saturating_sub(window), cursor.saturating_add(window).min(last))
}

/// Finds the raw segment closest to `p` among those within `window`
/// indices of `cursor`.
///
/// Scanning stops at the first segment whose squared distance is at or
/// below `threshold_sq`, so the result is the best segment seen, not
/// necessarily the closest one in the window. Pass `0.0` to rank the
/// whole window. Returns `None` when `raw` has fewer than two points.
pub fn nearest_segment(
    raw: &[GeoPoint],
    p: GeoPoint,
    cursor: usize,
    window: usize,
    threshold_sq: f64,
) -> Option<SegmentMatch> {
    if raw.len() < 2 {
        return None;
    }

    let (lo, hi) = window_bounds(raw.len() - 1, cursor, window);
    let mut best: Option<SegmentMatch> = None;

    for segment in lo..=hi {
        let (point, distance_sq) = closest_point_on_segment_fast(raw[segment], raw[segment + 1], p);

        if best.is_none_or(|current| distance_sq < current.distance_sq) {
            best = Some(SegmentMatch {
                point,
                distance_sq,
                segment,
            });
        }

        if distance_sq <= threshold_sq {
            break;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Eastward along the equator, then a short hop north and back west
    /// over the top of segment 2.
    fn u_turn() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.01, 0.0),
            GeoPoint::new(0.02, 0.0),
            GeoPoint::new(0.03, 0.0),
            GeoPoint::new(0.03, 0.003),
            GeoPoint::new(0.015, 0.003),
        ]
    }

    #[test]
    fn test_too_short_returns_none() {
        assert!(nearest_segment(&[], GeoPoint::new(0.0, 0.0), 0, 5, 0.0).is_none());
        let single = [GeoPoint::new(1.0, 1.0)];
        assert!(nearest_segment(&single, GeoPoint::new(0.0, 0.0), 0, 5, 0.0).is_none());
    }

    #[test]
    fn test_window_bounds_clamp() {
        assert_eq!(window_bounds(10, 0, 3), (0, 3));
        assert_eq!(window_bounds(10, 5, 3), (2, 8));
        assert_eq!(window_bounds(10, 9, 3), (6, 9));
        // cursor past the end is pulled back onto the last segment
        assert_eq!(window_bounds(10, 40, 3), (6, 9));
        assert_eq!(window_bounds(1, 0, 25), (0, 0));
        assert_eq!(window_bounds(4, 2, usize::MAX), (0, 3));
    }

    #[test]
    fn test_window_hides_globally_closer_segment() {
        let raw = u_turn();
        // 0.002° north of segment 2, 0.001° south of segment 4
        let p = GeoPoint::new(0.025, 0.002);

        let windowed = nearest_segment(&raw, p, 2, 1, 0.0).unwrap();
        assert_eq!(windowed.segment, 2);
        assert!((windowed.distance_m() - 222.4).abs() < 0.5, "got {}", windowed.distance_m());

        let global = nearest_segment(&raw, p, 2, raw.len(), 0.0).unwrap();
        assert_eq!(global.segment, 4);
        assert!(global.distance_sq < windowed.distance_sq);
    }

    #[test]
    fn test_early_exit_accepts_first_segment_in_bound() {
        let raw = u_turn();
        let p = GeoPoint::new(0.025, 0.002);

        // segment 2 (~222 m) is within a 300 m threshold and is scanned before segment 4
        let threshold = 300.0_f64;
        let found = nearest_segment(&raw, p, 3, 1, threshold * threshold).unwrap();
        assert_eq!(found.segment, 2);
    }

    #[test]
    fn test_returns_best_when_nothing_in_bound() {
        let raw = u_turn();
        let p = GeoPoint::new(0.005, -0.01);
        let found = nearest_segment(&raw, p, 0, 2, 1.0).unwrap();
        assert_eq!(found.segment, 0);
        assert!(found.distance_m() > 1_000.0);
    }
}
