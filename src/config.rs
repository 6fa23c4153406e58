//! Smoothing configuration carried by a routing request.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::SmoothError;

pub const TARGET_POINT_COUNT_RANGE: RangeInclusive<usize> = 50..=2000;
pub const CHAIKIN_ITERATIONS_RANGE: RangeInclusive<u32> = 1..=6;
pub const SEARCH_WINDOW_RANGE: RangeInclusive<usize> = 1..=1000;

/// Curve generator applied before deviation capping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmoothingMethod {
    #[default]
    Spline,
    Chaikin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    pub method: SmoothingMethod,
    /// Fit looseness for the spline; 0 interpolates the knots exactly.
    pub spline_slack: f64,
    /// Number of samples taken along the spline.
    pub target_point_count: usize,
    /// Corner-cutting passes for Chaikin.
    pub chaikin_iterations: u32,
    /// Deviation cap in meters; `None` or 0 disables capping.
    pub max_deviation_m: Option<f64>,
    /// Half-width, in raw segment indices, of the nearest-segment search window.
    pub search_window: usize,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            method: SmoothingMethod::Spline,
            spline_slack: 0.0,
            target_point_count: 200,
            chaikin_iterations: 2,
            max_deviation_m: None,
            search_window: 25,
        }
    }
}

impl SmoothingConfig {
    /// Checks every option against its documented bound.
    pub fn validate(&self) -> Result<(), SmoothError> {
        if !(self.spline_slack.is_finite() && self.spline_slack >= 0.0) {
            return Err(out_of_range("spline_slack", self.spline_slack, "a finite value >= 0"));
        }
        if !TARGET_POINT_COUNT_RANGE.contains(&self.target_point_count) {
            return Err(out_of_range("target_point_count", self.target_point_count, "50..=2000"));
        }
        if !CHAIKIN_ITERATIONS_RANGE.contains(&self.chaikin_iterations) {
            return Err(out_of_range("chaikin_iterations", self.chaikin_iterations, "1..=6"));
        }
        if let Some(max) = self.max_deviation_m {
            if !(max.is_finite() && max >= 0.0) {
                return Err(out_of_range("max_deviation_m", max, "a finite value >= 0"));
            }
        }
        if !SEARCH_WINDOW_RANGE.contains(&self.search_window) {
            return Err(out_of_range("search_window", self.search_window, "1..=1000"));
        }
        Ok(())
    }

    /// Effective deviation cap, if capping is enabled.
    pub fn deviation_cap(&self) -> Option<f64> {
        self.max_deviation_m.filter(|max| *max > 0.0)
    }
}

fn out_of_range(field: &'static str, value: impl ToString, expected: &'static str) -> SmoothError {
    SmoothError::ConfigOutOfRange {
        field,
        value: value.to_string(),
        expected,
    }
}
