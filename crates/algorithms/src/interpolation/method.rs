//! Method selection and multi-target evaluation

use surfit_core::{validate_target, Interpolator, Result, SamplePoint, TargetPoint};
use tracing::debug;

use super::gaussian::{gaussian_kernel, GaussianParams};
use super::idw::{idw, IdwParams};
use super::tin::{tin_interpolation, Triangulation};
use super::tps::{tps_interpolation, ThinPlateSpline, TpsParams};
use super::trend::{trend_surface, TrendSurface};

/// One of the five interpolation methods, with its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Method {
    Tin,
    Idw(IdwParams),
    Gaussian(GaussianParams),
    TrendSurface,
    ThinPlateSpline(TpsParams),
}

impl Method {
    /// Every method with default parameters, in a fixed order.
    pub fn all() -> [Method; 5] {
        [
            Method::Tin,
            Method::Idw(IdwParams::default()),
            Method::Gaussian(GaussianParams::default()),
            Method::TrendSurface,
            Method::ThinPlateSpline(TpsParams::default()),
        ]
    }
}

impl Interpolator for Method {
    fn name(&self) -> &'static str {
        match self {
            Method::Tin => "TIN",
            Method::Idw(_) => "IDW",
            Method::Gaussian(_) => "Gaussian kernel",
            Method::TrendSurface => "Trend surface",
            Method::ThinPlateSpline(_) => "Thin plate spline",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            Method::Tin => "Linear interpolation within the enclosing Delaunay triangle",
            Method::Idw(_) => "Average of all samples weighted by inverse distance power",
            Method::Gaussian(_) => "Average of all samples weighted by a Gaussian kernel",
            Method::TrendSurface => "Least-squares plane through all samples",
            Method::ThinPlateSpline(_) => "Minimum bending-energy spline through all samples",
        }
    }

    fn interpolate(&self, points: &[SamplePoint], target: TargetPoint) -> Result<f64> {
        match *self {
            Method::Tin => tin_interpolation(points, target),
            Method::Idw(params) => idw(points, target, params),
            Method::Gaussian(params) => gaussian_kernel(points, target, params),
            Method::TrendSurface => trend_surface(points, target),
            Method::ThinPlateSpline(params) => tps_interpolation(points, target, params),
        }
    }
}

/// A method prepared for repeated evaluation over one sample set.
enum Prepared {
    Tin(Triangulation),
    Trend(TrendSurface),
    Tps(ThinPlateSpline),
    PerTarget(Method),
}

impl Prepared {
    fn new(method: &Method, points: &[SamplePoint]) -> Result<Self> {
        Ok(match *method {
            Method::Tin => Prepared::Tin(Triangulation::new(points)?),
            Method::TrendSurface => Prepared::Trend(TrendSurface::fit(points)?),
            Method::ThinPlateSpline(params) => Prepared::Tps(ThinPlateSpline::fit(points, params)?),
            other => Prepared::PerTarget(other),
        })
    }

    fn evaluate(&self, points: &[SamplePoint], target: TargetPoint) -> Result<f64> {
        match self {
            Prepared::Tin(tin) => tin.interpolate(target),
            Prepared::Trend(plane) => {
                validate_target(&target)?;
                Ok(plane.evaluate(target))
            }
            Prepared::Tps(spline) => {
                validate_target(&target)?;
                Ok(spline.evaluate(target))
            }
            Prepared::PerTarget(method) => method.interpolate(points, target),
        }
    }

    #[cfg(feature = "parallel")]
    fn evaluate_all(&self, points: &[SamplePoint], targets: &[TargetPoint]) -> Result<Vec<f64>> {
        use rayon::prelude::*;

        targets
            .par_iter()
            .map(|&target| self.evaluate(points, target))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn evaluate_all(&self, points: &[SamplePoint], targets: &[TargetPoint]) -> Result<Vec<f64>> {
        targets
            .iter()
            .map(|&target| self.evaluate(points, target))
            .collect()
    }
}

/// Evaluate `method` at every target.
///
/// TIN, trend surface and TPS build their model once and reuse it for all
/// targets. With the `parallel` feature, targets are evaluated on the rayon
/// thread pool. The first failing target fails the whole batch.
pub fn interpolate_batch(
    method: &Method,
    points: &[SamplePoint],
    targets: &[TargetPoint],
) -> Result<Vec<f64>> {
    let prepared = Prepared::new(method, points)?;
    debug!(method = method.name(), targets = targets.len(), "batch interpolation");

    prepared.evaluate_all(points, targets)
}
