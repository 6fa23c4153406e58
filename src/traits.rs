//! Seams between the smoothing core and its collaborators.
//!
//! The core never resolves cells or runs graph queries itself; callers
//! inject those through these traits.

use crate::polyline::GeoPoint;

/// Maps a cell identifier to its representative coordinate.
pub trait CellLocator {
    fn centroid(&self, cell: &str) -> Option<GeoPoint>;
}

impl<F> CellLocator for F
where
    F: Fn(&str) -> Option<GeoPoint>,
{
    fn centroid(&self, cell: &str) -> Option<GeoPoint> {
        self(cell)
    }
}

/// Answers shortest-path queries over a cell-adjacency graph.
///
/// The returned cells are ordered from `from` to `to`, both included.
pub trait PathSource {
    type Error: std::error::Error;

    fn shortest_path(&self, from: &str, to: &str) -> Result<Vec<String>, Self::Error>;
}

/// Curve-fitting capability used by the spline generator.
///
/// Chosen once when a [`crate::smoother::Smoother`] is built. An
/// unavailable fitter makes spline requests fall back to the raw path
/// with a degradation flag instead of a different method's output.
pub trait SplineFit: Send + Sync {
    fn is_available(&self) -> bool;

    /// Fits `points` and resamples the curve at `target_points` evenly
    /// spaced parameters. `None` means the capability is missing.
    fn fit(&self, points: &[GeoPoint], slack: f64, target_points: usize) -> Option<Vec<GeoPoint>>;
}
