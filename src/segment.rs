//! Closest point on a line segment.

use crate::geodesic::{distance_meters, LocalFrame};
use crate::polyline::GeoPoint;

/// Segments whose projected squared length falls below this (m²) are
/// treated as a single point.
const DEGENERATE_SEGMENT_M2: f64 = 1e-12;

/// Result of projecting a point onto a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentProjection {
    /// Closest point on the segment.
    pub point: GeoPoint,
    /// Haversine distance from the query point, in meters.
    pub distance_m: f64,
}

/// Closest point on segment `a`–`b` to `p`, with its haversine distance.
///
/// All three points are projected onto a plane centered on `p`, the
/// projection parameter is clamped to the segment, and the result is mapped
/// back to longitude/latitude. Coincident endpoints yield `a`.
pub fn closest_point_on_segment(a: GeoPoint, b: GeoPoint, p: GeoPoint) -> SegmentProjection {
    let (point, _) = closest_point_on_segment_fast(a, b, p);
    SegmentProjection {
        point,
        distance_m: distance_meters(p, point),
    }
}

/// Same projection as [`closest_point_on_segment`], returning the squared
/// planar distance (m²) from `p` instead of a haversine distance.
///
/// Intended for ranking candidates in tight loops.
pub fn closest_point_on_segment_fast(a: GeoPoint, b: GeoPoint, p: GeoPoint) -> (GeoPoint, f64) {
    let frame = LocalFrame::new(p);
    let (ax, ay) = frame.project(a);
    let (bx, by) = frame.project(b);

    let dx = bx - ax;
    let dy = by - ay;
    let length_sq = dx * dx + dy * dy;

    if length_sq <= DEGENERATE_SEGMENT_M2 {
        return (a, ax * ax + ay * ay);
    }

    // p sits at the origin of the frame, so (p - a)·d = -(a·d)
    let t = (-(ax * dx + ay * dy) / length_sq).clamp(0.0, 1.0);
    let cx = ax + t * dx;
    let cy = ay + t * dy;

    let point = if t == 0.0 {
        a
    } else if t == 1.0 {
        b
    } else {
        frame.unproject(cx, cy)
    };

    (point, cx * cx + cy * cy)
}
