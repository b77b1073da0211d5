//! Spatial interpolation algorithms
//!
//! Estimate a value at a target location from scattered sample points:
//! - TIN: Triangulated Irregular Network (linear barycentric)
//! - IDW: Inverse Distance Weighting
//! - Gaussian: Gaussian kernel smoothing
//! - Trend surface: global least-squares plane
//! - TPS: Thin Plate Spline

mod gaussian;
mod idw;
mod linalg;
mod method;
mod tin;
mod tps;
mod trend;

pub use gaussian::{gaussian_kernel, GaussianParams};
pub use idw::{idw, IdwParams};
pub use method::{interpolate_batch, Method};
pub use tin::{tin_interpolation, Enclosing, Triangle, Triangulation};
pub use tps::{tps_interpolation, KernelLog, ThinPlateSpline, TpsParams};
pub use trend::{trend_surface, TrendSurface};

pub use surfit_core::{SamplePoint, TargetPoint};
