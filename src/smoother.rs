//! Request-level smoothing: curve generator, then deviation capping.

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use crate::capper::cap_deviation;
use crate::chaikin::chaikin;
use crate::config::{SmoothingConfig, SmoothingMethod};
use crate::error::SmoothError;
use crate::polyline::{GeoPoint, Polyline};
use crate::search::nearest_segment;
use crate::segment::closest_point_on_segment;
use crate::spline::CubicSplineFit;
use crate::traits::{CellLocator, SplineFit};

/// Why a result is less smooth than requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Degradation {
    /// Spline requested but no curve-fitting capability is installed; the
    /// raw path was passed through.
    SplineUnavailable,
    /// The path wraps ±180° longitude and was left unsmoothed.
    AntimeridianCrossing,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmoothedRoute {
    pub raw: Polyline,
    pub smoothed: Polyline,
    /// Method requested by the configuration.
    pub method: SmoothingMethod,
    pub degradation: Option<Degradation>,
    /// Largest distance from a smoothed point to the raw corridor, in meters.
    pub max_deviation_m: f64,
}

impl SmoothedRoute {
    pub fn is_degraded(&self) -> bool {
        self.degradation.is_some()
    }

    fn passthrough(raw: &Polyline, method: SmoothingMethod, degradation: Option<Degradation>) -> Self {
        Self {
            raw: raw.clone(),
            smoothed: raw.clone(),
            method,
            degradation,
            max_deviation_m: 0.0,
        }
    }
}

/// Smooths raw cell paths according to one validated configuration.
///
/// Holds no per-request state; share it freely across threads.
#[derive(Debug, Clone)]
pub struct Smoother<F: SplineFit = CubicSplineFit> {
    config: SmoothingConfig,
    fitter: F,
    spline_available: bool,
}

impl Smoother<CubicSplineFit> {
    pub fn new(config: SmoothingConfig) -> Result<Self, SmoothError> {
        Self::with_fitter(config, CubicSplineFit)
    }
}

impl<F: SplineFit> Smoother<F> {
    /// Builds a smoother with an explicit spline capability.
    pub fn with_fitter(config: SmoothingConfig, fitter: F) -> Result<Self, SmoothError> {
        config.validate()?;
        let spline_available = fitter.is_available();
        if !spline_available && config.method == SmoothingMethod::Spline {
            warn!("spline smoothing requested but no curve fitter is available; paths will pass through raw");
        }
        Ok(Self {
            config,
            fitter,
            spline_available,
        })
    }

    pub fn config(&self) -> &SmoothingConfig {
        &self.config
    }

    pub fn spline_available(&self) -> bool {
        self.spline_available
    }

    /// Smooths one raw polyline.
    pub fn smooth(&self, raw: &Polyline) -> SmoothedRoute {
        let method = self.config.method;
        if raw.len() < 2 {
            return SmoothedRoute::passthrough(raw, method, None);
        }
        if raw.crosses_antimeridian() {
            warn!(points = raw.len(), "path crosses the antimeridian, leaving it unsmoothed");
            return SmoothedRoute::passthrough(raw, method, Some(Degradation::AntimeridianCrossing));
        }

        let points = raw.points();
        let (generated, degradation) = match method {
            SmoothingMethod::Chaikin => (chaikin(points, self.config.chaikin_iterations), None),
            SmoothingMethod::Spline => self.fit_spline(points),
        };

        let smoothed = match self.config.deviation_cap() {
            Some(max) => cap_deviation(points, &generated, max, self.config.search_window),
            None => generated,
        };

        let max_deviation_m = measure_deviation(points, &smoothed, self.config.search_window);
        debug!(
            ?method,
            raw_points = raw.len(),
            smoothed_points = smoothed.len(),
            max_deviation_m,
            degraded = degradation.is_some(),
            "smoothed path"
        );

        SmoothedRoute {
            raw: raw.clone(),
            smoothed: Polyline::new(smoothed),
            method,
            degradation,
            max_deviation_m,
        }
    }

    /// Resolves each cell to its centroid, then smooths the resulting path.
    pub fn smooth_cells<S, L>(&self, cells: &[S], locator: &L) -> Result<SmoothedRoute, SmoothError>
    where
        S: AsRef<str>,
        L: CellLocator + ?Sized,
    {
        let raw = cells
            .iter()
            .map(|cell| {
                let cell = cell.as_ref();
                locator
                    .centroid(cell)
                    .ok_or_else(|| SmoothError::UnknownCell(cell.to_string()))
            })
            .collect::<Result<Polyline, _>>()?;

        Ok(self.smooth(&raw))
    }

    /// Smooths independent polylines in parallel.
    pub fn smooth_batch(&self, raws: &[Polyline]) -> Vec<SmoothedRoute> {
        raws.par_iter().map(|raw| self.smooth(raw)).collect()
    }

    fn fit_spline(&self, points: &[GeoPoint]) -> (Vec<GeoPoint>, Option<Degradation>) {
        let fitted = if self.spline_available {
            self.fitter
                .fit(points, self.config.spline_slack, self.config.target_point_count)
        } else {
            None
        };

        match fitted {
            Some(curve) => (curve, None),
            None => (points.to_vec(), Some(Degradation::SplineUnavailable)),
        }
    }
}

/// Largest haversine distance from a point of `smoothed` to `raw`.
///
/// Segments are located with the windowed search (ranking the full
/// window) and measured with the precise projection.
pub fn measure_deviation(raw: &[GeoPoint], smoothed: &[GeoPoint], window: usize) -> f64 {
    let mut cursor = 0;
    let mut worst = 0.0_f64;
    for &p in smoothed {
        let Some(found) = nearest_segment(raw, p, cursor, window, 0.0) else {
            return 0.0;
        };
        cursor = found.segment;
        let precise = closest_point_on_segment(raw[found.segment], raw[found.segment + 1], p);
        worst = worst.max(precise.distance_m);
    }
    worst
}
