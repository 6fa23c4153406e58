//! Parametric cubic spline fit over cumulative chord length.
//!
//! Longitude and latitude are fitted independently as functions of the
//! haversine distance travelled along the raw path, then resampled at
//! evenly spaced parameters. `slack` loosens the fit: at `0` the curve
//! passes through every knot, larger values first relax the knots with a
//! curvature penalty (endpoints pinned) before interpolating.

use crate::geodesic::distance_meters;
use crate::polyline::GeoPoint;
use crate::traits::SplineFit;

/// Consecutive knots closer than this (meters) are merged.
const DUPLICATE_KNOT_M: f64 = 1e-9;

/// In-crate natural cubic spline fitter.
#[derive(Debug, Clone, Copy, Default)]
pub struct CubicSplineFit;

impl SplineFit for CubicSplineFit {
    fn is_available(&self) -> bool {
        true
    }

    fn fit(&self, points: &[GeoPoint], slack: f64, target_points: usize) -> Option<Vec<GeoPoint>> {
        Some(fit_spline(points, slack, target_points))
    }
}

/// Stand-in for deployments without a curve-fitting backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableSplineFit;

impl SplineFit for UnavailableSplineFit {
    fn is_available(&self) -> bool {
        false
    }

    fn fit(&self, _points: &[GeoPoint], _slack: f64, _target_points: usize) -> Option<Vec<GeoPoint>> {
        None
    }
}

/// Fits a spline through `points` and returns `target_points` samples.
///
/// Returns the input unchanged when it has fewer than three points, when
/// fewer than three distinct knots remain, or when the path has zero length.
/// The first and last samples are exactly the input's endpoints.
pub fn fit_spline(points: &[GeoPoint], slack: f64, target_points: usize) -> Vec<GeoPoint> {
    if points.len() < 3 || target_points < 2 {
        return points.to_vec();
    }

    let knots = distinct_knots(points);
    if knots.len() < 3 {
        return points.to_vec();
    }

    let params = chord_parameters(&knots);
    let total = params[params.len() - 1];
    if total <= 0.0 {
        return points.to_vec();
    }

    let lons: Vec<f64> = knots.iter().map(|p| p.lon).collect();
    let lats: Vec<f64> = knots.iter().map(|p| p.lat).collect();
    let lon_curve = NaturalCubic::new(&params, relax(&lons, slack));
    let lat_curve = NaturalCubic::new(&params, relax(&lats, slack));

    let step = total / (target_points - 1) as f64;
    let mut interval = 0;
    let mut samples = Vec::with_capacity(target_points);
    for k in 0..target_points {
        let t = step * k as f64;
        while interval + 2 < params.len() && t > params[interval + 1] {
            interval += 1;
        }
        samples.push(GeoPoint::new(lon_curve.eval(interval, t), lat_curve.eval(interval, t)));
    }

    samples[0] = points[0];
    samples[target_points - 1] = points[points.len() - 1];
    samples
}

fn distinct_knots(points: &[GeoPoint]) -> Vec<GeoPoint> {
    let mut knots: Vec<GeoPoint> = Vec::with_capacity(points.len());
    for &p in points {
        match knots.last() {
            Some(&prev) if distance_meters(prev, p) <= DUPLICATE_KNOT_M => {}
            _ => knots.push(p),
        }
    }
    knots
}

/// Cumulative haversine distance at each knot, starting from 0.
fn chord_parameters(knots: &[GeoPoint]) -> Vec<f64> {
    let mut params = Vec::with_capacity(knots.len());
    let mut travelled = 0.0;
    params.push(travelled);
    for pair in knots.windows(2) {
        travelled += distance_meters(pair[0], pair[1]);
        params.push(travelled);
    }
    params
}

/// Minimizes `Σ (z_i − y_i)² + slack · Σ (z_{i−1} − 2z_i + z_{i+1})²`
/// with `z_0 = y_0` and `z_{n−1} = y_{n−1}`.
///
/// The normal equations are pentadiagonal and, after pinning the end rows,
/// symmetric positive definite on the interior, so elimination without
/// pivoting is safe.
fn relax(values: &[f64], slack: f64) -> Vec<f64> {
    let n = values.len();
    if slack <= 0.0 || n < 3 {
        return values.to_vec();
    }

    // bands[i][j - i + 2] holds A[i][j] for |i - j| <= 2
    let mut bands = vec![[0.0_f64; 5]; n];
    for row in bands.iter_mut() {
        row[2] = 1.0;
    }
    for centre in 1..n - 1 {
        let stencil = [1.0, -2.0, 1.0];
        for (a, ca) in stencil.iter().enumerate() {
            for (b, cb) in stencil.iter().enumerate() {
                let (i, j) = (centre - 1 + a, centre - 1 + b);
                bands[i][j + 2 - i] += slack * ca * cb;
            }
        }
    }
    bands[0] = [0.0, 0.0, 1.0, 0.0, 0.0];
    bands[n - 1] = [0.0, 0.0, 1.0, 0.0, 0.0];

    let mut rhs = values.to_vec();
    for k in 0..n {
        let pivot = bands[k][2];
        for r in k + 1..=(k + 2).min(n - 1) {
            let factor = bands[r][k + 2 - r] / pivot;
            if factor == 0.0 {
                continue;
            }
            for c in k..=(k + 2).min(n - 1) {
                bands[r][c + 2 - r] -= factor * bands[k][c + 2 - k];
            }
            rhs[r] -= factor * rhs[k];
        }
    }

    let mut relaxed = vec![0.0; n];
    for k in (0..n).rev() {
        let mut sum = rhs[k];
        for c in k + 1..=(k + 2).min(n - 1) {
            sum -= bands[k][c + 2 - k] * relaxed[c];
        }
        relaxed[k] = sum / bands[k][2];
    }
    relaxed
}

/// Natural cubic spline (zero second derivative at both ends).
struct NaturalCubic<'a> {
    xs: &'a [f64],
    ys: Vec<f64>,
    second: Vec<f64>,
}

impl<'a> NaturalCubic<'a> {
    /// `xs` must be strictly increasing and at least three long.
    fn new(xs: &'a [f64], ys: Vec<f64>) -> Self {
        let n = xs.len();
        let mut second = vec![0.0; n];

        // Thomas algorithm over the interior unknowns 1..n-1
        let mut diag = vec![0.0; n];
        let mut rhs = vec![0.0; n];
        for i in 1..n - 1 {
            let h_prev = xs[i] - xs[i - 1];
            let h_next = xs[i + 1] - xs[i];
            diag[i] = 2.0 * (h_prev + h_next);
            rhs[i] = 6.0 * ((ys[i + 1] - ys[i]) / h_next - (ys[i] - ys[i - 1]) / h_prev);
            if i > 1 {
                let factor = h_prev / diag[i - 1];
                diag[i] -= factor * h_prev;
                rhs[i] -= factor * rhs[i - 1];
            }
        }
        for i in (1..n - 1).rev() {
            let h_next = xs[i + 1] - xs[i];
            second[i] = (rhs[i] - h_next * second[i + 1]) / diag[i];
        }

        Self { xs, ys, second }
    }

    fn eval(&self, interval: usize, t: f64) -> f64 {
        let (x0, x1) = (self.xs[interval], self.xs[interval + 1]);
        let h = x1 - x0;
        let a = (x1 - t) / h;
        let b = (t - x0) / h;
        a * self.ys[interval]
            + b * self.ys[interval + 1]
            + ((a * a * a - a) * self.second[interval] + (b * b * b - b) * self.second[interval + 1]) * h * h
                / 6.0
    }
}
