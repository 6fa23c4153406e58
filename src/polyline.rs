//! Polyline representation for route geometries.
//!
//! Coordinates are kept as decoded longitude/latitude pairs. Conversion to
//! wire formats (GeoJSON, encoded polylines) happens at the boundary, see
//! [`crate::output`].

use serde::{Deserialize, Serialize};

/// A geographic coordinate in degrees.
///
/// Longitude comes first, matching GeoJSON ordering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Linear interpolation in degree space: `t = 0` is `self`, `t = 1` is `other`.
    pub fn lerp(self, other: GeoPoint, t: f64) -> GeoPoint {
        GeoPoint {
            lon: (1.0 - t) * self.lon + t * other.lon,
            lat: (1.0 - t) * self.lat + t * other.lat,
        }
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lon, lat): (f64, f64)) -> Self {
        Self { lon, lat }
    }
}

impl From<GeoPoint> for [f64; 2] {
    fn from(point: GeoPoint) -> Self {
        [point.lon, point.lat]
    }
}

/// An ordered sequence of waypoints.
///
/// Any length is accepted. Polylines with fewer than two points are
/// degenerate and pass through every smoothing stage unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<GeoPoint>,
}

impl Polyline {
    /// Creates a new Polyline from decoded coordinate points.
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Self { points }
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    /// Consumes the polyline and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<GeoPoint> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&GeoPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&GeoPoint> {
        self.points.last()
    }

    /// True when some pair of consecutive points is more than 180 degrees
    /// of longitude apart, i.e. the shorter way between them wraps ±180.
    ///
    /// The local planar projection used for smoothing does not unwrap
    /// longitudes, so such paths are left unsmoothed.
    pub fn crosses_antimeridian(&self) -> bool {
        self.points
            .windows(2)
            .any(|pair| (pair[1].lon - pair[0].lon).abs() > 180.0)
    }
}

impl From<Vec<GeoPoint>> for Polyline {
    fn from(points: Vec<GeoPoint>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<GeoPoint> for Polyline {
    fn from_iter<I: IntoIterator<Item = GeoPoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
