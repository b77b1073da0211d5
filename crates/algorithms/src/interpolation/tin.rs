//! TIN (Triangulated Irregular Network) interpolation
//!
//! Constructs a Delaunay triangulation from sample points and
//! interpolates within the enclosing triangle using barycentric
//! coordinates derived from signed sub-triangle areas.
//!
//! Uses a simple incremental Bowyer-Watson algorithm for triangulation.
//! The surface is continuous and piecewise linear; its gradient jumps
//! across triangle edges.

use surfit_core::{validate_points, validate_target, Error, Result, SamplePoint, TargetPoint};
use tracing::debug;

/// Barycentric weights above this (negative) bound count as inside.
const INSIDE_EPS: f64 = -1e-10;

/// A triangle defined by three vertex indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    pub v0: usize,
    pub v1: usize,
    pub v2: usize,
}

/// Signed area of triangle (a, b, c); positive when counter-clockwise.
#[inline]
fn signed_area(ax: f64, ay: f64, bx: f64, by: f64, cx: f64, cy: f64) -> f64 {
    0.5 * ((bx - ax) * (cy - ay) - (cx - ax) * (by - ay))
}

/// Barycentric weights of `(px, py)` in triangle `(p0, p1, p2)`.
///
/// Each weight is the signed area of the sub-triangle opposite a vertex
/// divided by the signed area of the whole triangle. Returns `None` for a
/// zero-area triangle.
fn barycentric(
    px: f64,
    py: f64,
    p0: &SamplePoint,
    p1: &SamplePoint,
    p2: &SamplePoint,
) -> Option<[f64; 3]> {
    let total = signed_area(p0.x, p0.y, p1.x, p1.y, p2.x, p2.y);
    if total == 0.0 {
        return None;
    }
    let w0 = signed_area(px, py, p1.x, p1.y, p2.x, p2.y) / total;
    let w1 = signed_area(p0.x, p0.y, px, py, p2.x, p2.y) / total;
    let w2 = signed_area(p0.x, p0.y, p1.x, p1.y, px, py) / total;
    Some([w0, w1, w2])
}

/// Whether `p` lies strictly inside the circumcircle of the
/// counter-clockwise triangle (a, b, c).
///
/// Evaluated as the incircle determinant on coordinates relative to `p`.
fn in_circumcircle(a: &SamplePoint, b: &SamplePoint, c: &SamplePoint, p: &SamplePoint) -> bool {
    let (adx, ady) = (a.x - p.x, a.y - p.y);
    let (bdx, bdy) = (b.x - p.x, b.y - p.y);
    let (cdx, cdy) = (c.x - p.x, c.y - p.y);

    let ad = adx * adx + ady * ady;
    let bd = bdx * bdx + bdy * bdy;
    let cd = cdx * cdx + cdy * cdy;

    let det = adx * (bdy * cd - bd * cdy) - ady * (bdx * cd - bd * cdx)
        + ad * (bdx * cdy - bdy * cdx);
    det > 0.0
}

/// Vertex index standing for the point at infinity.
///
/// A triangle (u, v, GHOST) lies beyond the hull edge u→v, with the
/// outside of the hull to the left of u→v.
const GHOST: usize = usize::MAX;

impl Triangle {
    fn is_ghost(&self) -> bool {
        self.v0 == GHOST || self.v1 == GHOST || self.v2 == GHOST
    }

    fn edges(&self) -> [(usize, usize); 3] {
        [(self.v0, self.v1), (self.v1, self.v2), (self.v2, self.v0)]
    }

    /// Whether inserting `p` destroys this triangle.
    ///
    /// A real triangle conflicts when `p` is inside its circumcircle. A
    /// ghost triangle conflicts when `p` is strictly outside its hull edge,
    /// or lies on the open segment of that edge.
    fn conflicts(&self, vertices: &[SamplePoint], p: &SamplePoint) -> bool {
        let (u, v) = match (self.v0, self.v1, self.v2) {
            (GHOST, u, v) | (v, GHOST, u) | (u, v, GHOST) => (&vertices[u], &vertices[v]),
            (a, b, c) => return in_circumcircle(&vertices[a], &vertices[b], &vertices[c], p),
        };

        let side = signed_area(u.x, u.y, v.x, v.y, p.x, p.y);
        if side != 0.0 {
            return side > 0.0;
        }
        let along_u = (p.x - u.x) * (v.x - u.x) + (p.y - u.y) * (v.y - u.y);
        let along_v = (p.x - v.x) * (u.x - v.x) + (p.y - v.y) * (u.y - v.y);
        along_u > 0.0 && along_v > 0.0
    }
}

/// Build Delaunay triangulation using Bowyer-Watson algorithm
///
/// The outside of the hull is covered by ghost triangles sharing a vertex
/// at infinity, so every hull edge survives into the result. Returns
/// counter-clockwise triangles, or nothing when all points are collinear.
fn delaunay(points: &[SamplePoint]) -> Vec<Triangle> {
    let Some([i0, i1, i2]) = seed_triangle(points) else {
        return Vec::new();
    };

    let mut triangles: Vec<Triangle> = vec![
        Triangle { v0: i0, v1: i1, v2: i2 },
        Triangle { v0: i1, v1: i0, v2: GHOST },
        Triangle { v0: i2, v1: i1, v2: GHOST },
        Triangle { v0: i0, v1: i2, v2: GHOST },
    ];

    for (vi, point) in points.iter().enumerate() {
        if vi == i0 || vi == i1 || vi == i2 {
            continue;
        }

        // Triangles destroyed by the new point
        let bad_triangles: Vec<usize> = triangles
            .iter()
            .enumerate()
            .filter_map(|(ti, tri)| tri.conflicts(points, point).then_some(ti))
            .collect();

        // Boundary polygon of the hole: edges not shared by two bad triangles
        let mut boundary: Vec<(usize, usize)> = Vec::new();

        for &bi in &bad_triangles {
            for (ea, eb) in triangles[bi].edges() {
                let shared = bad_triangles.iter().any(|&oi| {
                    oi != bi
                        && triangles[oi]
                            .edges()
                            .iter()
                            .any(|&(oa, ob)| (oa == ea && ob == eb) || (oa == eb && ob == ea))
                });

                if !shared {
                    boundary.push((ea, eb));
                }
            }
        }

        // Remove bad triangles (in reverse order to preserve indices)
        let mut bad_triangles = bad_triangles;
        bad_triangles.sort_unstable_by(|a, b| b.cmp(a));
        for bi in bad_triangles {
            triangles.swap_remove(bi);
        }

        // Re-fan the hole from the new point, keeping ghosts in (u, v, GHOST) form
        for (ea, eb) in boundary {
            let tri = match (ea, eb) {
                (GHOST, b) => Triangle { v0: b, v1: vi, v2: GHOST },
                (a, GHOST) => Triangle { v0: vi, v1: a, v2: GHOST },
                (a, b) => Triangle { v0: a, v1: b, v2: vi },
            };
            triangles.push(tri);
        }
    }

    // Drop the ghosts; rounding in near-collinear runs can leave slivers
    // with no area
    triangles.retain(|tri| {
        if tri.is_ghost() {
            return false;
        }
        let (a, b, c) = (&points[tri.v0], &points[tri.v1], &points[tri.v2]);
        signed_area(a.x, a.y, b.x, b.y, c.x, c.y) != 0.0
    });

    triangles
}

/// First three points spanning a non-zero area, in counter-clockwise order.
fn seed_triangle(points: &[SamplePoint]) -> Option<[usize; 3]> {
    let first = points.first()?;
    let i1 = points
        .iter()
        .position(|p| p.x != first.x || p.y != first.y)?;
    let second = &points[i1];

    points.iter().enumerate().find_map(|(i2, p)| {
        let area = signed_area(first.x, first.y, second.x, second.y, p.x, p.y);
        if area > 0.0 {
            Some([0, i1, i2])
        } else if area < 0.0 {
            Some([0, i2, i1])
        } else {
            None
        }
    })
}

/// The triangle enclosing a target, with the target's barycentric weights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Enclosing {
    pub triangle: Triangle,
    pub vertices: [SamplePoint; 3],
    pub weights: [f64; 3],
}

impl Enclosing {
    /// Weighted average of the three vertex values.
    pub fn value(&self) -> f64 {
        self.vertices
            .iter()
            .zip(self.weights)
            .map(|(p, w)| w * p.z)
            .sum()
    }
}

/// Delaunay triangulation of a sample set, reusable across targets.
#[derive(Debug, Clone)]
pub struct Triangulation {
    vertices: Vec<SamplePoint>,
    triangles: Vec<Triangle>,
}

impl Triangulation {
    /// Triangulate the (x, y) projections of `points`.
    ///
    /// Samples sharing an (x, y) location with an earlier sample are
    /// dropped; the first occurrence wins.
    ///
    /// # Errors
    /// - [`Error::EmptyInput`] / [`Error::InvalidInput`] for malformed input
    /// - [`Error::DegenerateGeometry`] if fewer than 3 distinct points remain
    ///   or all of them are collinear
    pub fn new(points: &[SamplePoint]) -> Result<Self> {
        validate_points(points)?;

        let mut vertices: Vec<SamplePoint> = Vec::with_capacity(points.len());
        for p in points {
            if !vertices.iter().any(|v| v.x == p.x && v.y == p.y) {
                vertices.push(*p);
            }
        }

        if vertices.len() < 3 {
            return Err(Error::DegenerateGeometry(
                "TIN requires at least 3 distinct sample points".into(),
            ));
        }

        let triangles = delaunay(&vertices);
        if triangles.is_empty() {
            return Err(Error::DegenerateGeometry(
                "Failed to build triangulation (collinear points?)".into(),
            ));
        }

        debug!(
            vertices = vertices.len(),
            triangles = triangles.len(),
            "built Delaunay triangulation"
        );

        Ok(Self {
            vertices,
            triangles,
        })
    }

    /// Distinct vertices, indexed by [`Triangle`] fields.
    pub fn vertices(&self) -> &[SamplePoint] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Find the triangle whose interior or boundary contains `target`.
    pub fn locate(&self, target: TargetPoint) -> Option<Enclosing> {
        // Brute force; fine for moderate triangle counts
        self.triangles.iter().find_map(|tri| {
            let vertices = [
                self.vertices[tri.v0],
                self.vertices[tri.v1],
                self.vertices[tri.v2],
            ];
            let weights = barycentric(target.x, target.y, &vertices[0], &vertices[1], &vertices[2])?;
            weights.iter().all(|&w| w >= INSIDE_EPS).then_some(Enclosing {
                triangle: *tri,
                vertices,
                weights,
            })
        })
    }

    /// Interpolate linearly within the triangle enclosing `target`.
    ///
    /// # Errors
    /// [`Error::OutOfHull`] if no triangle contains `target`.
    pub fn interpolate(&self, target: TargetPoint) -> Result<f64> {
        validate_target(&target)?;
        self.locate(target)
            .map(|enc| enc.value())
            .ok_or(Error::OutOfHull {
                x: target.x,
                y: target.y,
            })
    }
}

/// Perform TIN interpolation at a single target.
///
/// 1. Builds a Delaunay triangulation from sample points
/// 2. Finds the triangle enclosing the target
/// 3. Interpolates linearly using barycentric coordinates
///
/// # Arguments
/// * `points` - Scattered sample points (minimum 3, not all collinear)
/// * `target` - Location to estimate
///
/// # Errors
/// - [`Error::DegenerateGeometry`] for fewer than 3 distinct or collinear points
/// - [`Error::OutOfHull`] if the target lies outside the convex hull
pub fn tin_interpolation(points: &[SamplePoint], target: TargetPoint) -> Result<f64> {
    Triangulation::new(points)?.interpolate(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corner_points() -> Vec<SamplePoint> {
        vec![
            SamplePoint::new(0.0, 10.0, 10.0), // top-left
            SamplePoint::new(10.0, 10.0, 20.0), // top-right
            SamplePoint::new(0.0, 0.0, 30.0),   // bottom-left
            SamplePoint::new(10.0, 0.0, 40.0),  // bottom-right
        ]
    }

    #[test]
    fn test_delaunay_basic() {
        let points = corner_points();
        let tris = delaunay(&points);

        // 4 points should produce 2 triangles
        assert_eq!(tris.len(), 2, "Expected 2 triangles, got {}", tris.len());
    }

    #[test]
    fn test_delaunay_empty_circumcircles() {
        let points = vec![
            SamplePoint::new(0.0, 0.0, 0.0),
            SamplePoint::new(7.0, 1.0, 0.0),
            SamplePoint::new(3.0, 6.0, 0.0),
            SamplePoint::new(9.0, 8.0, 0.0),
            SamplePoint::new(4.0, 3.0, 0.0),
            SamplePoint::new(1.0, 9.0, 0.0),
        ];
        let tris = delaunay(&points);
        assert!(!tris.is_empty());

        for tri in &tris {
            let (a, b, c) = (&points[tri.v0], &points[tri.v1], &points[tri.v2]);
            assert!(
                signed_area(a.x, a.y, b.x, b.y, c.x, c.y) > 0.0,
                "{:?} is not counter-clockwise",
                tri
            );
            for (i, p) in points.iter().enumerate() {
                if i == tri.v0 || i == tri.v1 || i == tri.v2 {
                    continue;
                }
                assert!(
                    !in_circumcircle(a, b, c, p),
                    "Point {} lies inside circumcircle of {:?}",
                    i,
                    tri
                );
            }
        }
    }

    #[test]
    fn test_tin_at_vertices() {
        let points = corner_points();
        for p in &points {
            let val = tin_interpolation(&points, TargetPoint::new(p.x, p.y)).unwrap();
            assert!(
                (val - p.z).abs() < 1e-9,
                "At ({}, {}) expected {}, got {}",
                p.x,
                p.y,
                p.z,
                val
            );
        }
    }

    #[test]
    fn test_tin_linear_interpolation() {
        // Tilted plane z = x + y is reproduced everywhere inside the hull
        let points = vec![
            SamplePoint::new(0.0, 0.0, 0.0),
            SamplePoint::new(10.0, 0.0, 10.0),
            SamplePoint::new(0.0, 10.0, 10.0),
            SamplePoint::new(10.0, 10.0, 20.0),
        ];
        let tin = Triangulation::new(&points).unwrap();

        for &(x, y) in &[(5.0, 5.0), (1.0, 8.5), (9.9, 0.1), (10.0, 3.0)] {
            let val = tin.interpolate(TargetPoint::new(x, y)).unwrap();
            assert!(
                (val - (x + y)).abs() < 1e-9,
                "Plane z=x+y at ({}, {}) should be {}, got {}",
                x,
                y,
                x + y,
                val
            );
        }
    }

    #[test]
    fn test_tin_outside_hull() {
        let points = corner_points();
        let err = tin_interpolation(&points, TargetPoint::new(11.0, 5.0)).unwrap_err();
        assert_eq!(err, Error::OutOfHull { x: 11.0, y: 5.0 });
    }

    #[test]
    fn test_tin_too_few_points() {
        let points = vec![
            SamplePoint::new(0.0, 0.0, 1.0),
            SamplePoint::new(1.0, 0.0, 2.0),
        ];

        let result = tin_interpolation(&points, TargetPoint::new(0.5, 0.0));
        assert!(matches!(result, Err(Error::DegenerateGeometry(_))));
    }

    #[test]
    fn test_tin_collinear_points() {
        let points: Vec<SamplePoint> = (0..5)
            .map(|i| SamplePoint::new(i as f64, 2.0 * i as f64, i as f64))
            .collect();
        let result = tin_interpolation(&points, TargetPoint::new(1.0, 2.0));
        assert!(matches!(result, Err(Error::DegenerateGeometry(_))), "got {:?}", result);
    }

    #[test]
    fn test_tin_duplicates_collapsed() {
        let mut points = corner_points();
        points.push(SamplePoint::new(0.0, 0.0, 99.0));
        let tin = Triangulation::new(&points).unwrap();
        assert_eq!(tin.vertices().len(), 4);

        // The first sample at (0, 0) wins
        let val = tin.interpolate(TargetPoint::new(0.0, 0.0)).unwrap();
        assert!((val - 30.0).abs() < 1e-9, "got {}", val);
    }

    #[test]
    fn test_barycentric_at_vertices() {
        let p0 = SamplePoint::new(0.0, 0.0, 1.0);
        let p1 = SamplePoint::new(10.0, 0.0, 2.0);
        let p2 = SamplePoint::new(0.0, 10.0, 3.0);

        assert_eq!(barycentric(0.0, 0.0, &p0, &p1, &p2), Some([1.0, 0.0, 0.0]));
        assert_eq!(barycentric(10.0, 0.0, &p0, &p1, &p2), Some([0.0, 1.0, 0.0]));

        // At centroid (mean of vertices)
        let [u, v, w] = barycentric(10.0 / 3.0, 10.0 / 3.0, &p0, &p1, &p2).unwrap();
        assert!((u - 1.0 / 3.0).abs() < 1e-10);
        assert!((v - 1.0 / 3.0).abs() < 1e-10);
        assert!((w - 1.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_barycentric_orientation_independent() {
        let p0 = SamplePoint::new(0.0, 0.0, 0.0);
        let p1 = SamplePoint::new(4.0, 0.0, 0.0);
        let p2 = SamplePoint::new(0.0, 4.0, 0.0);

        let ccw = barycentric(1.0, 1.0, &p0, &p1, &p2).unwrap();
        let cw = barycentric(1.0, 1.0, &p0, &p2, &p1).unwrap();
        assert!((ccw[0] - cw[0]).abs() < 1e-12);
        assert!((ccw[1] - cw[2]).abs() < 1e-12);
        assert!((ccw[2] - cw[1]).abs() < 1e-12);
    }

    #[test]
    fn test_many_points() {
        // Grid of 25 points on the plane z = x + y
        let mut points = Vec::new();
        for i in 0..5 {
            for j in 0..5 {
                let x = i as f64 * 2.5;
                let y = j as f64 * 2.5;
                points.push(SamplePoint::new(x, y, x + y));
            }
        }

        let tin = Triangulation::new(&points).unwrap();
        assert!(tin.triangles().len() >= 32, "got {} triangles", tin.triangles().len());

        for row in 0..10 {
            for col in 0..10 {
                let x = 0.5 + col as f64;
                let y = 0.5 + row as f64;
                let val = tin.interpolate(TargetPoint::new(x, y)).unwrap();
                assert!((val - (x + y)).abs() < 1e-9, "({}, {}): got {}", x, y, val);
            }
        }
    }

    #[test]
    fn test_ghost_conflicts_outside_and_on_edge() {
        let points = vec![
            SamplePoint::new(0.0, 0.0, 0.0),
            SamplePoint::new(4.0, 0.0, 0.0),
        ];
        // Hull edge 0→1 has the outside to its right, so the ghost is (1, 0)
        let ghost = Triangle { v0: 1, v1: 0, v2: GHOST };
        let rotated = Triangle { v0: GHOST, v1: 1, v2: 0 };

        for tri in [ghost, rotated] {
            assert!(tri.conflicts(&points, &SamplePoint::new(2.0, -1.0, 0.0)));
            assert!(tri.conflicts(&points, &SamplePoint::new(2.0, 0.0, 0.0)));
            assert!(!tri.conflicts(&points, &SamplePoint::new(2.0, 1.0, 0.0)));
            assert!(!tri.conflicts(&points, &SamplePoint::new(6.0, 0.0, 0.0)));
        }
    }

    #[test]
    fn test_tin_covers_skewed_hull() {
        // Long, nearly flat hull edges give huge circumcircles; every target
        // just inside an edge midpoint must still be found
        let points = vec![
            SamplePoint::new(0.0, 0.0, 1.0),
            SamplePoint::new(100.0, 0.5, 2.0),
            SamplePoint::new(200.0, 0.0, 3.0),
            SamplePoint::new(100.0, 3.0, 4.0),
            SamplePoint::new(60.0, 1.0, 5.0),
            SamplePoint::new(140.0, 1.2, 6.0),
        ];
        let tin = Triangulation::new(&points).unwrap();
        let hull = [0, 2, 3];
        let (cx, cy) = (100.0, 1.0);

        for k in 0..3 {
            let (a, b) = (&points[hull[k]], &points[hull[(k + 1) % 3]]);
            let mx = 0.5 * (a.x + b.x);
            let my = 0.5 * (a.y + b.y);
            let target = TargetPoint::new(mx + 1e-3 * (cx - mx), my + 1e-3 * (cy - my));
            assert!(tin.interpolate(target).is_ok(), "{:?} should be inside", target);
        }

        let area: f64 = tin
            .triangles()
            .iter()
            .map(|t| {
                let (a, b, c) = (&points[t.v0], &points[t.v1], &points[t.v2]);
                signed_area(a.x, a.y, b.x, b.y, c.x, c.y)
            })
            .sum();
        // Hull triangle (0,0), (200,0), (100,3)
        assert!((area - 300.0).abs() < 1e-9, "triangles cover {} of 300", area);
    }

    #[test]
    fn test_tin_points_on_hull_edge() {
        // Samples along the bottom edge stay on the hull
        let points = vec![
            SamplePoint::new(0.0, 0.0, 0.0),
            SamplePoint::new(10.0, 0.0, 10.0),
            SamplePoint::new(5.0, 8.0, 13.0),
            SamplePoint::new(5.0, 0.0, 5.0),
            SamplePoint::new(2.5, 0.0, 2.5),
        ];
        let tin = Triangulation::new(&points).unwrap();
        assert_eq!(tin.triangles().len(), 3);

        let val = tin.interpolate(TargetPoint::new(7.5, 0.0)).unwrap();
        assert!((val - 7.5).abs() < 1e-9, "got {}", val);
    }
}
