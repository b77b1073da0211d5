//! Global first-order trend surface
//!
//! Fits the plane `z = a·x + b·y + c` to all samples by ordinary least
//! squares and evaluates it at the target. Every target, near or far, is
//! read off the same plane, so the method has no local sensitivity and
//! reproduces sample values only when the samples are coplanar.

use ndarray::array;
use surfit_core::{validate_points, validate_target, Error, Result, SamplePoint, TargetPoint};
use tracing::debug;

use super::linalg;

/// Least-squares plane `z = a·x + b·y + c`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendSurface {
    /// Slope along x
    pub a: f64,
    /// Slope along y
    pub b: f64,
    /// Intercept
    pub c: f64,
    /// Sample centroid; the least-squares plane passes through (x̄, ȳ, z̄)
    origin: TargetPoint,
    mean: f64,
}

impl TrendSurface {
    /// Fit the plane to `points`.
    ///
    /// Coordinates and values are centred on their means, which fixes the
    /// plane through the centroid and leaves the 2×2 normal equations for
    /// the slopes. Centring keeps projected coordinates from swamping the
    /// sums.
    ///
    /// # Errors
    /// [`Error::DegenerateGeometry`] if fewer than 3 points are given or
    /// the points are collinear.
    pub fn fit(points: &[SamplePoint]) -> Result<Self> {
        validate_points(points)?;
        if points.len() < 3 {
            return Err(Error::DegenerateGeometry(
                "Trend surface requires at least 3 non-collinear points".into(),
            ));
        }

        let n = points.len() as f64;
        let origin = TargetPoint::new(
            points.iter().map(|p| p.x).sum::<f64>() / n,
            points.iter().map(|p| p.y).sum::<f64>() / n,
        );
        let mean = points.iter().map(|p| p.z).sum::<f64>() / n;

        // Accumulate centred sums for normal equations
        let mut sxx = 0.0_f64;
        let mut sxy = 0.0_f64;
        let mut syy = 0.0_f64;
        let mut sxz = 0.0_f64;
        let mut syz = 0.0_f64;

        for pt in points {
            let (x, y, z) = (pt.x - origin.x, pt.y - origin.y, pt.z - mean);
            sxx += x * x;
            sxy += x * y;
            syy += y * y;
            sxz += x * z;
            syz += y * z;
        }

        // [sxx  sxy] [a]   [sxz]
        // [sxy  syy] [b] = [syz]
        let mat = array![[sxx, sxy], [sxy, syy]];
        let rhs = array![sxz, syz];

        let beta = linalg::solve(mat, rhs, "Trend surface")?;
        let (a, b) = (beta[0], beta[1]);
        let surface = Self {
            a,
            b,
            c: mean - a * origin.x - b * origin.y,
            origin,
            mean,
        };
        debug!(a = surface.a, b = surface.b, c = surface.c, "fitted trend surface");

        Ok(surface)
    }

    /// Value of the plane at `target`.
    #[inline]
    pub fn evaluate(&self, target: TargetPoint) -> f64 {
        self.mean + self.a * (target.x - self.origin.x) + self.b * (target.y - self.origin.y)
    }
}

/// Evaluate the least-squares plane through `points` at `target`.
///
/// # Errors
/// [`Error::DegenerateGeometry`] for fewer than 3 or collinear points.
pub fn trend_surface(points: &[SamplePoint], target: TargetPoint) -> Result<f64> {
    validate_target(&target)?;
    Ok(TrendSurface::fit(points)?.evaluate(target))
}
