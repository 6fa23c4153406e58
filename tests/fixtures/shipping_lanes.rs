//! Cell centroid paths for realistic fixtures.
//!
//! Each path steps between neighbouring cells of a coarse hexagonal grid
//! (edge length ~60 km), so consecutive centroids zigzag the way raw
//! shortest-path output does.

/// A named cell with its centroid.
#[derive(Debug, Clone)]
pub struct Cell {
    pub id: &'static str,
    pub lon: f64,
    pub lat: f64,
}

impl Cell {
    pub const fn new(id: &'static str, lon: f64, lat: f64) -> Self {
        Self { id, lon, lat }
    }
}

// ============================================================================
// Bay of Biscay, Brest to Finisterre
// ============================================================================

pub const BISCAY: &[Cell] = &[
    Cell::new("biscay-00", -4.95, 48.05),
    Cell::new("biscay-01", -5.40, 47.62),
    Cell::new("biscay-02", -5.20, 47.12),
    Cell::new("biscay-03", -5.65, 46.68),
    Cell::new("biscay-04", -5.45, 46.18),
    Cell::new("biscay-05", -5.90, 45.74),
    Cell::new("biscay-06", -6.35, 45.30),
    Cell::new("biscay-07", -6.15, 44.80),
    Cell::new("biscay-08", -6.60, 44.36),
    Cell::new("biscay-09", -7.05, 43.92),
    Cell::new("biscay-10", -7.50, 43.48),
    Cell::new("biscay-11", -8.30, 43.40),
    Cell::new("biscay-12", -9.10, 43.32),
];

// ============================================================================
// Strait of Malacca, approaching Singapore
// ============================================================================

pub const MALACCA: &[Cell] = &[
    Cell::new("malacca-00", 98.60, 5.10),
    Cell::new("malacca-01", 99.10, 4.75),
    Cell::new("malacca-02", 99.60, 4.40),
    Cell::new("malacca-03", 99.95, 3.90),
    Cell::new("malacca-04", 100.45, 3.55),
    Cell::new("malacca-05", 100.80, 3.05),
    Cell::new("malacca-06", 101.30, 2.70),
    Cell::new("malacca-07", 101.80, 2.35),
    Cell::new("malacca-08", 102.15, 1.85),
    Cell::new("malacca-09", 102.65, 1.50),
    Cell::new("malacca-10", 103.15, 1.15),
];

/// Looks up a centroid across every fixture path.
pub fn centroid(id: &str) -> Option<route_smoother::GeoPoint> {
    BISCAY
        .iter()
        .chain(MALACCA)
        .find(|cell| cell.id == id)
        .map(|cell| route_smoother::GeoPoint::new(cell.lon, cell.lat))
}

pub fn ids(cells: &[Cell]) -> Vec<&'static str> {
    cells.iter().map(|cell| cell.id).collect()
}
