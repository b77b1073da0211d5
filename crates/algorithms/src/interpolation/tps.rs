//! Thin Plate Spline (TPS) interpolation
//!
//! Constructs a smooth surface that passes exactly through all sample points
//! while minimizing the bending energy (integral of squared second derivatives).
//!
//! The TPS interpolant has the form:
//! ```text
//! f(x,y) = Σᵢ wᵢ · U(‖(x,y) - (xᵢ,yᵢ)‖) + a·x + b·y + c
//! ```
//! where U(r) = r²·log₁₀(r) is the radial basis function, with U(0) = 0.
//! A base-10 logarithm only rescales the weights relative to the natural
//! logarithm form; both interpolate the samples exactly.
//!
//! Requires solving an (n+3)×(n+3) linear system, so cost grows as O(n³).
//!
//! Reference:
//! Duchon, J. (1976). Interpolation des fonctions de deux variables suivant
//! le principe de la flexion des plaques minces. RAIRO Analyse Numérique.
//! Wahba, G. (1990). Spline Models for Observational Data. SIAM.

use ndarray::{Array1, Array2};
use surfit_core::{
    distance, validate_points, validate_target, Error, Result, SamplePoint, TargetPoint,
};
use tracing::debug;

use super::linalg;

/// Logarithm used in the radial basis function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KernelLog {
    /// U(r) = r²·log₁₀(r)
    #[default]
    Base10,
    /// U(r) = r²·ln(r), the textbook form
    Natural,
}

/// Parameters for TPS interpolation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TpsParams {
    /// Smoothing parameter (λ ≥ 0). Default 0.0 = exact interpolation.
    /// Positive values add regularization: larger λ → smoother surface
    /// that doesn't pass exactly through sample points (smoothing spline).
    pub smoothing: f64,
    /// Logarithm base of the radial basis function
    pub kernel_log: KernelLog,
}

impl TpsParams {
    fn validate(&self) -> Result<()> {
        if !(self.smoothing.is_finite() && self.smoothing >= 0.0) {
            return Err(Error::invalid_parameter(
                "smoothing",
                self.smoothing,
                "must be >= 0",
            ));
        }
        Ok(())
    }
}

impl KernelLog {
    /// TPS radial basis function U(r), with U(0) = 0
    #[inline]
    fn kernel(self, r: f64) -> f64 {
        if r == 0.0 {
            return 0.0;
        }
        match self {
            KernelLog::Base10 => r * r * r.log10(),
            KernelLog::Natural => r * r * r.ln(),
        }
    }
}

/// A fitted thin plate spline, reusable across targets.
#[derive(Debug, Clone)]
pub struct ThinPlateSpline {
    centers: Vec<SamplePoint>,
    weights: Vec<f64>,
    /// Sample centroid; the affine part is fitted in coordinates relative to it
    origin: TargetPoint,
    a: f64,
    b: f64,
    c: f64,
    kernel_log: KernelLog,
}

impl ThinPlateSpline {
    /// Fit the spline to `points`.
    ///
    /// Builds and solves the system
    /// ```text
    /// [Φ + λI  P] [w]   [z]
    /// [Pᵀ      0] [β] = [0]
    /// ```
    /// where Φᵢⱼ = U(‖pᵢ - pⱼ‖), P has rows (xᵢ - x̄, yᵢ - ȳ, 1) and
    /// β = (a, b, c). P is centred on the sample centroid (x̄, ȳ) so that
    /// projected coordinates do not swamp the kernel entries.
    ///
    /// # Errors
    /// - [`Error::DegenerateGeometry`] for fewer than 3 points, or a singular
    ///   system (collinear or duplicate points)
    /// - [`Error::InvalidParameter`] for negative smoothing
    pub fn fit(points: &[SamplePoint], params: TpsParams) -> Result<Self> {
        validate_points(points)?;
        params.validate()?;

        let n = points.len();
        if n < 3 {
            return Err(Error::DegenerateGeometry(
                "TPS requires at least 3 non-collinear points".into(),
            ));
        }

        let origin = TargetPoint::new(
            points.iter().map(|p| p.x).sum::<f64>() / n as f64,
            points.iter().map(|p| p.y).sum::<f64>() / n as f64,
        );

        let m = n + 3;
        let mut mat = Array2::<f64>::zeros((m, m));
        let mut rhs = Array1::<f64>::zeros(m);

        // Φ block (n × n), symmetric with λ on the diagonal
        for i in 0..n {
            mat[[i, i]] = params.smoothing;
            for j in (i + 1)..n {
                let u = params.kernel_log.kernel(distance(&points[i], &points[j]));
                mat[[i, j]] = u;
                mat[[j, i]] = u;
            }
        }

        // P (n × 3) and Pᵀ (3 × n); the bottom-right 3×3 block stays zero
        for (i, pt) in points.iter().enumerate() {
            let (x, y) = (pt.x - origin.x, pt.y - origin.y);
            mat[[i, n]] = x;
            mat[[i, n + 1]] = y;
            mat[[i, n + 2]] = 1.0;
            mat[[n, i]] = x;
            mat[[n + 1, i]] = y;
            mat[[n + 2, i]] = 1.0;
            rhs[i] = pt.z;
        }

        debug!(size = m, smoothing = params.smoothing, "solving TPS system");
        let coeffs = linalg::solve(mat, rhs, "TPS")?;

        Ok(Self {
            centers: points.to_vec(),
            weights: coeffs.slice(ndarray::s![..n]).to_vec(),
            origin,
            a: coeffs[n],
            b: coeffs[n + 1],
            c: coeffs[n + 2],
            kernel_log: params.kernel_log,
        })
    }

    /// Radial basis weights, one per sample in input order.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Affine part `(a, b, c)` of `a·x + b·y + c`, in input coordinates.
    pub fn affine(&self) -> (f64, f64, f64) {
        let c = self.c - self.a * self.origin.x - self.b * self.origin.y;
        (self.a, self.b, c)
    }

    /// Value of the spline at `target`.
    pub fn evaluate(&self, target: TargetPoint) -> f64 {
        let bending: f64 = self
            .centers
            .iter()
            .zip(&self.weights)
            .map(|(pt, w)| w * self.kernel_log.kernel(distance(pt, &target)))
            .sum();
        let (dx, dy) = (target.x - self.origin.x, target.y - self.origin.y);
        bending + self.a * dx + self.b * dy + self.c
    }
}

/// Perform Thin Plate Spline interpolation at a single target.
///
/// # Arguments
/// * `points` — Slice of sample points with (x, y, z)
/// * `target` — Location to estimate
/// * `params` — Smoothing parameter and kernel logarithm
///
/// # Errors
/// - If fewer than 3 points are provided
/// - If the linear system is singular (collinear or duplicate points)
pub fn tps_interpolation(
    points: &[SamplePoint],
    target: TargetPoint,
    params: TpsParams,
) -> Result<f64> {
    validate_target(&target)?;
    Ok(ThinPlateSpline::fit(points, params)?.evaluate(target))
}
