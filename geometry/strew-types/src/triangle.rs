//! Triangle type for geometric calculations.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A triangle with concrete vertex positions.
///
/// This is the unit the sampling strategies work with: it knows its own
/// area, face normal, centroid, and how to pick a uniformly distributed
/// point on itself.
///
/// Winding is **counter-clockwise (CCW) when viewed from the front**
/// (normal points toward viewer).
///
/// # Example
///
/// ```
/// use strew_types::{Triangle, Point3};
///
/// let tri = Triangle::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// );
///
/// assert!((tri.area() - 0.5).abs() < 1e-10);
/// let normal = tri.normal().unwrap();
/// assert!((normal.z - 1.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Triangle {
    /// First vertex.
    pub v0: Point3<f64>,
    /// Second vertex.
    pub v1: Point3<f64>,
    /// Third vertex.
    pub v2: Point3<f64>,
}

impl Triangle {
    /// Create a new triangle from three points.
    #[inline]
    #[must_use]
    pub const fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) -> Self {
        Self { v0, v1, v2 }
    }

    /// Compute the (unnormalized) face normal via cross product.
    ///
    /// The direction follows the right-hand rule with CCW winding.
    /// The magnitude equals twice the triangle's area.
    #[inline]
    #[must_use]
    pub fn normal_unnormalized(&self) -> Vector3<f64> {
        let e1 = self.v1 - self.v0;
        let e2 = self.v2 - self.v0;
        e1.cross(&e2)
    }

    /// Compute the unit face normal.
    ///
    /// Returns `None` for degenerate triangles (zero area).
    ///
    /// # Example
    ///
    /// ```
    /// use strew_types::{Triangle, Point3};
    ///
    /// let degen = Triangle::new(
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(1.0, 0.0, 0.0),
    ///     Point3::new(2.0, 0.0, 0.0),
    /// );
    /// assert!(degen.normal().is_none());
    /// ```
    #[must_use]
    pub fn normal(&self) -> Option<Vector3<f64>> {
        let n = self.normal_unnormalized();
        let len = n.norm();
        if len < f64::EPSILON {
            None
        } else {
            Some(n / len)
        }
    }

    /// Compute the triangle area.
    ///
    /// Half the magnitude of the edge cross product. Zero for degenerate
    /// triangles.
    #[inline]
    #[must_use]
    pub fn area(&self) -> f64 {
        self.normal_unnormalized().norm() / 2.0
    }

    /// Compute the centroid (arithmetic mean of the three vertices).
    ///
    /// # Example
    ///
    /// ```
    /// use strew_types::{Triangle, Point3};
    ///
    /// let tri = Triangle::new(
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(3.0, 0.0, 0.0),
    ///     Point3::new(0.0, 3.0, 0.0),
    /// );
    /// assert_eq!(tri.centroid(), Point3::new(1.0, 1.0, 0.0));
    /// ```
    #[must_use]
    pub fn centroid(&self) -> Point3<f64> {
        Point3::from((self.v0.coords + self.v1.coords + self.v2.coords) / 3.0)
    }

    /// Map two unit random values to a uniformly distributed point on the
    /// triangle.
    ///
    /// Uses the square-root reflection trick: `(r1, r2)` uniform in the unit
    /// square maps to uniform barycentric coordinates without clustering at
    /// the vertices.
    ///
    /// # Arguments
    ///
    /// * `r1`, `r2` - Random values in `[0, 1)`
    #[must_use]
    pub fn sample_uniform(&self, r1: f64, r2: f64) -> Point3<f64> {
        let sqrt_r1 = r1.sqrt();
        let a = 1.0 - sqrt_r1;
        let b = sqrt_r1 * (1.0 - r2);
        let c = sqrt_r1 * r2;
        Point3::from(a * self.v0.coords + b * self.v1.coords + c * self.v2.coords)
    }

    /// Check whether the triangle is degenerate (near-zero area).
    #[inline]
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.area() < f64::EPSILON
    }
}
