//! Gaussian kernel interpolation
//!
//! Weighted average of all samples using a radial Gaussian kernel:
//!
//! ```text
//! K(d) = 1/(2π) · exp(-½ (d/h)²)
//! z(x,y) = Σ K(dᵢ)·zᵢ / Σ K(dᵢ)
//! ```
//!
//! The kernel is finite at d = 0, so unlike IDW this is a smoother: the
//! estimate at a sample location is generally not that sample's value.

use std::f64::consts::PI;

use surfit_core::{
    distance, max_distance, validate_points, validate_target, Error, Result, SamplePoint,
    TargetPoint,
};

/// Parameters for Gaussian kernel interpolation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GaussianParams {
    /// Kernel bandwidth h. `None` uses the largest distance from the
    /// target to any sample.
    pub bandwidth: Option<f64>,
}

impl GaussianParams {
    pub fn with_bandwidth(bandwidth: f64) -> Self {
        Self {
            bandwidth: Some(bandwidth),
        }
    }

    /// Bandwidth to use for `target`.
    fn resolve(&self, points: &[SamplePoint], target: &TargetPoint) -> Result<f64> {
        match self.bandwidth {
            Some(h) if h.is_finite() && h > 0.0 => Ok(h),
            Some(h) => Err(Error::invalid_parameter("bandwidth", h, "must be > 0")),
            None => {
                let h = max_distance(points, target)?;
                if h == 0.0 {
                    Err(Error::DegenerateGeometry(
                        "every sample coincides with the target; bandwidth resolves to 0".into(),
                    ))
                } else if !h.is_finite() {
                    Err(Error::DegenerateGeometry(
                        "sample distances overflow; bandwidth is not finite".into(),
                    ))
                } else {
                    Ok(h)
                }
            }
        }
    }
}

/// Perform Gaussian kernel interpolation at a single target.
///
/// Kernel weights are computed relative to the nearest sample, i.e. with
/// `d² - d_min²` in the exponent. The shift is a common factor that cancels
/// in the ratio and keeps the weight sum from underflowing for small
/// bandwidths. The exponent is evaluated as
/// `½ · ((d - d_min)/h) · ((d + d_min)/h)`, so neither the squared distances
/// nor the squared bandwidth are ever formed.
///
/// # Errors
/// - [`Error::InvalidParameter`] for a supplied bandwidth that is not > 0
/// - [`Error::DegenerateGeometry`] if the default bandwidth is 0 or not
///   finite, or the weighted sums overflow
pub fn gaussian_kernel(
    points: &[SamplePoint],
    target: TargetPoint,
    params: GaussianParams,
) -> Result<f64> {
    validate_points(points)?;
    validate_target(&target)?;
    let h = params.resolve(points, &target)?;

    let distances: Vec<f64> = points.iter().map(|p| distance(p, &target)).collect();
    let d_min = distances.iter().copied().fold(f64::INFINITY, f64::min);

    let mut sum_k = 0.0;
    let mut sum_kz = 0.0;

    for (pt, &d) in points.iter().zip(&distances) {
        let scaled = if d == d_min {
            1.0
        } else {
            (-0.5 * ((d - d_min) / h) * ((d + d_min) / h)).exp()
        };
        let k = scaled / (2.0 * PI);
        sum_k += k;
        sum_kz += k * pt.z;
    }

    let value = sum_kz / sum_k;
    if !value.is_finite() {
        return Err(Error::DegenerateGeometry(format!(
            "Gaussian kernel sums are not finite (Σk = {}, Σkz = {})",
            sum_k, sum_kz
        )));
    }
    Ok(value)
}
