//! # surfit core
//!
//! Core types and traits for the surfit spatial interpolation library.
//!
//! This crate provides:
//! - `SamplePoint` / `TargetPoint`: planar observations and query locations
//! - Geometry utilities: `distance`, `max_distance`
//! - `Error`: typed failures shared by every interpolator
//! - `Interpolator`: the common trait for point-to-scalar estimators

pub mod error;
pub mod geometry;

pub use error::{Error, ErrorKind, Result};
pub use geometry::{
    distance, max_distance, validate_points, validate_target, Planar, SamplePoint, TargetPoint,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, ErrorKind, Result};
    pub use crate::geometry::{distance, max_distance, SamplePoint, TargetPoint};
    pub use crate::Interpolator;
}

/// Core trait for all interpolators in surfit.
///
/// Interpolators are pure functions from a sample set and a target location
/// to a single estimated value.
pub trait Interpolator {
    /// Returns the interpolator name
    fn name(&self) -> &'static str;

    /// Returns a description of what the interpolator does
    fn description(&self) -> &'static str;

    /// Estimate the value at `target` from `points`
    fn interpolate(&self, points: &[SamplePoint], target: TargetPoint) -> Result<f64>;
}
