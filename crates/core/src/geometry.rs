//! Point types and planar geometry utilities

use crate::error::{Error, Result};

/// A sample point with x, y coordinates and an observed value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SamplePoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl SamplePoint {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Squared Euclidean distance to another point
    #[inline]
    pub fn dist_sq(&self, other_x: f64, other_y: f64) -> f64 {
        let dx = self.x - other_x;
        let dy = self.y - other_y;
        dx * dx + dy * dy
    }

    /// Euclidean distance to another point
    #[inline]
    pub fn dist(&self, other_x: f64, other_y: f64) -> f64 {
        self.dist_sq(other_x, other_y).sqrt()
    }
}

/// The location at which a value is estimated.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetPoint {
    pub x: f64,
    pub y: f64,
}

impl TargetPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for TargetPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<SamplePoint> for TargetPoint {
    fn from(p: SamplePoint) -> Self {
        Self { x: p.x, y: p.y }
    }
}

/// Anything with a position in the (x, y) plane.
pub trait Planar {
    fn xy(&self) -> (f64, f64);
}

impl Planar for SamplePoint {
    #[inline]
    fn xy(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

impl Planar for TargetPoint {
    #[inline]
    fn xy(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// Euclidean distance between two points in the (x, y) plane.
#[inline]
pub fn distance<P: Planar, Q: Planar>(p: &P, q: &Q) -> f64 {
    let (px, py) = p.xy();
    let (qx, qy) = q.xy();
    (px - qx).hypot(py - qy)
}

/// Largest distance from `target` to any point of `points`.
///
/// # Errors
/// [`Error::EmptyInput`] if `points` is empty.
pub fn max_distance(points: &[SamplePoint], target: &TargetPoint) -> Result<f64> {
    if points.is_empty() {
        return Err(Error::EmptyInput);
    }
    Ok(points
        .iter()
        .map(|p| distance(p, target))
        .fold(0.0_f64, f64::max))
}

/// Reject empty point sets and non-finite coordinates or values.
pub fn validate_points(points: &[SamplePoint]) -> Result<()> {
    if points.is_empty() {
        return Err(Error::EmptyInput);
    }
    if let Some((i, p)) = points
        .iter()
        .enumerate()
        .find(|(_, p)| !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite()))
    {
        return Err(Error::InvalidInput(format!(
            "sample {} has a non-finite component ({}, {}, {})",
            i, p.x, p.y, p.z
        )));
    }
    Ok(())
}

/// Reject a target with a non-finite coordinate.
pub fn validate_target(target: &TargetPoint) -> Result<()> {
    if target.x.is_finite() && target.y.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidInput(format!(
            "target ({}, {}) is not finite",
            target.x, target.y
        )))
    }
}
