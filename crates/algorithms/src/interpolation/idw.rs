//! Inverse Distance Weighting (IDW) interpolation
//!
//! Estimates the value at an unknown location as a weighted average of
//! all sample points, where weights are inversely proportional to
//! distance raised to a power parameter.
//!
//! Reference:
//! Shepard, D. (1968). A two-dimensional interpolation function for
//! irregularly-spaced data. ACM National Conference.

use surfit_core::{
    distance, validate_points, validate_target, Error, Result, SamplePoint, TargetPoint,
};

/// Parameters for IDW interpolation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdwParams {
    /// Power parameter (default: 2.0).
    /// Higher values give more weight to nearby points.
    pub power: f64,
    /// Snap distance. If a sample point is this close to the target or
    /// closer, its value is used directly. The default of 0.0 snaps only on
    /// exact coincidence.
    pub snap_distance: f64,
}

impl Default for IdwParams {
    fn default() -> Self {
        Self {
            power: 2.0,
            snap_distance: 0.0,
        }
    }
}

impl IdwParams {
    pub fn with_power(power: f64) -> Self {
        Self {
            power,
            ..Default::default()
        }
    }

    fn validate(&self) -> Result<()> {
        if !(self.power.is_finite() && self.power > 0.0) {
            return Err(Error::invalid_parameter("power", self.power, "must be > 0"));
        }
        if !(self.snap_distance.is_finite() && self.snap_distance >= 0.0) {
            return Err(Error::invalid_parameter(
                "snap_distance",
                self.snap_distance,
                "must be >= 0",
            ));
        }
        Ok(())
    }
}

/// Perform IDW interpolation at a single target.
///
/// # Algorithm
///
/// ```text
/// z(x,y) = Σ(wi * zi) / Σ(wi)
/// where wi = 1 / d(x,y, xi,yi)^p
/// ```
///
/// Weights are evaluated as `(d_min / d_i)^p`, which differs from `d_i^-p`
/// by a common factor that cancels in the ratio. This keeps every weight in
/// `(0, 1]` so large powers cannot overflow.
///
/// # Arguments
/// * `points` - Scattered sample points with values
/// * `target` - Location to estimate
/// * `params` - Power and snap distance
///
/// # Returns
/// The interpolated value, always within `[min z, max z]`. A target
/// coinciding with a sample returns that sample's value.
pub fn idw(points: &[SamplePoint], target: TargetPoint, params: IdwParams) -> Result<f64> {
    validate_points(points)?;
    validate_target(&target)?;
    params.validate()?;

    let distances: Vec<f64> = points.iter().map(|p| distance(p, &target)).collect();

    // Snap to the first sample within reach
    if let Some(i) = distances.iter().position(|&d| d <= params.snap_distance) {
        return Ok(points[i].z);
    }

    let d_min = distances.iter().copied().fold(f64::INFINITY, f64::min);

    let mut sum_w = 0.0;
    let mut sum_wz = 0.0;

    for (pt, &d) in points.iter().zip(&distances) {
        let w = if d == d_min {
            1.0
        } else {
            (d_min / d).powf(params.power)
        };
        sum_w += w;
        sum_wz += w * pt.z;
    }

    // The nearest sample has weight 1, so sum_w >= 1
    Ok(sum_wz / sum_w)
}
