//! route-smoother
//!
//! Turns a raw path of cell centroids into a smooth route that never drifts
//! more than a configured distance from the original corridor.

pub mod traits;
pub mod polyline;
pub mod geodesic;
pub mod segment;
pub mod search;
pub mod chaikin;
pub mod spline;
pub mod capper;
pub mod config;
pub mod error;
pub mod smoother;
pub mod graph;
pub mod output;

pub use config::{SmoothingConfig, SmoothingMethod};
pub use error::{GraphError, SmoothError};
pub use polyline::{GeoPoint, Polyline};
pub use smoother::{Degradation, SmoothedRoute, Smoother};
