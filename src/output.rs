//! GeoJSON packaging of a smoothed route.
//!
//! One `LineString` feature per polyline, with just enough properties for a
//! map layer to tell them apart. Styling is left to the consumer.

use serde::Serialize;

use crate::polyline::Polyline;
use crate::smoother::SmoothedRoute;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Raw,
    Smoothed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    pub geometry: LineString,
    pub properties: LineProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "LineString")]
pub struct LineString {
    pub coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineProperties {
    pub kind: LineKind,
    /// Cell grid resolution the raw path was built at, if known.
    pub resolution: Option<u8>,
    pub point_count: usize,
}

/// Builds the raw and smoothed features for `route`.
pub fn route_features(route: &SmoothedRoute, resolution: Option<u8>) -> FeatureCollection {
    FeatureCollection {
        features: vec![
            line_feature(&route.raw, LineKind::Raw, resolution),
            line_feature(&route.smoothed, LineKind::Smoothed, resolution),
        ],
    }
}

fn line_feature(polyline: &Polyline, kind: LineKind, resolution: Option<u8>) -> Feature {
    Feature {
        geometry: LineString {
            coordinates: polyline.points().iter().map(|&p| p.into()).collect(),
        },
        properties: LineProperties {
            kind,
            resolution,
            point_count: polyline.len(),
        },
    }
}
