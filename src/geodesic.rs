//! Great-circle distance and local planar projection.
//!
//! Haversine distance is used wherever an absolute distance is reported.
//! The equirectangular projection is cheaper and is used for geometry in a
//! small neighbourhood of a query point (segment projection, ranking).

use crate::polyline::GeoPoint;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Haversine distance between two points in meters.
pub fn distance_meters(p: GeoPoint, q: GeoPoint) -> f64 {
    let lat1_rad = p.lat.to_radians();
    let lat2_rad = q.lat.to_radians();
    let delta_lat = (q.lat - p.lat).to_radians();
    let delta_lng = (q.lon - p.lon).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().min(1.0).asin();

    EARTH_RADIUS_M * c
}

/// Projects `p` onto a plane centered at `origin`, in meters.
///
/// Equirectangular approximation: `x = R·Δlon·cos(lat0)`, `y = R·Δlat`.
/// Error grows with distance from `origin` and with latitude; keep spans
/// within a few tens of kilometers. Longitudes are not unwrapped, so the
/// two points must lie on the same side of the antimeridian.
pub fn local_projection(origin: GeoPoint, p: GeoPoint) -> (f64, f64) {
    LocalFrame::new(origin).project(p)
}

/// Squared planar distance in m², using the projection at latitude `lat0`.
///
/// Only meaningful for ranking nearby candidates against each other or
/// against a squared threshold; use [`distance_meters`] for reporting.
pub fn squared_planar_distance(p: GeoPoint, q: GeoPoint, lat0: f64) -> f64 {
    let dx = EARTH_RADIUS_M * (q.lon - p.lon).to_radians() * lat0.to_radians().cos();
    let dy = EARTH_RADIUS_M * (q.lat - p.lat).to_radians();
    dx * dx + dy * dy
}

/// Equirectangular projection centered on a fixed origin.
///
/// Same validity bounds as [`local_projection`].
#[derive(Debug, Clone, Copy)]
pub struct LocalFrame {
    origin: GeoPoint,
    meters_per_deg_lon: f64,
    meters_per_deg_lat: f64,
}

impl LocalFrame {
    pub fn new(origin: GeoPoint) -> Self {
        let meters_per_deg_lat = EARTH_RADIUS_M * 1.0_f64.to_radians();
        Self {
            origin,
            meters_per_deg_lon: meters_per_deg_lat * origin.lat.to_radians().cos(),
            meters_per_deg_lat,
        }
    }

    pub fn origin(&self) -> GeoPoint {
        self.origin
    }

    pub fn project(&self, p: GeoPoint) -> (f64, f64) {
        (
            (p.lon - self.origin.lon) * self.meters_per_deg_lon,
            (p.lat - self.origin.lat) * self.meters_per_deg_lat,
        )
    }

    /// Inverse of [`LocalFrame::project`].
    ///
    /// At the poles the longitude scale collapses to zero; the origin's
    /// longitude is returned there.
    pub fn unproject(&self, x: f64, y: f64) -> GeoPoint {
        let lon = if self.meters_per_deg_lon.abs() > 1e-6 {
            self.origin.lon + x / self.meters_per_deg_lon
        } else {
            self.origin.lon
        };
        GeoPoint::new(lon, self.origin.lat + y / self.meters_per_deg_lat)
    }
}
