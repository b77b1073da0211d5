//! # surfit algorithms
//!
//! Scattered-point spatial interpolation for surfit.
//!
//! Every interpolator is a pure function of a sample set and a target
//! location, returning one estimate or a typed [`surfit_core::Error`]:
//!
//! - **TIN**: Delaunay triangulation with barycentric interpolation
//! - **IDW**: inverse distance weighting
//! - **Gaussian kernel**: kernel-weighted average with optional bandwidth
//! - **Trend surface**: first-order least-squares plane
//! - **Thin plate spline**: exact minimum-curvature radial basis interpolant

pub mod interpolation;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::interpolation::{
        gaussian_kernel, idw, interpolate_batch, tin_interpolation, tps_interpolation,
        trend_surface, GaussianParams, IdwParams, KernelLog, Method, ThinPlateSpline,
        TpsParams, Triangulation, TrendSurface,
    };
    pub use surfit_core::prelude::*;
}
