//! Triangle primitive.

use crate::Aabb;
use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A triangle with concrete vertex positions.
///
/// The atomic primitive of a surface mesh. Immutable by convention: nothing
/// in this workspace mutates a triangle after construction.
///
/// Winding is **counter-clockwise (CCW) when viewed from the front**
/// (normal points toward viewer).
///
/// # Example
///
/// ```
/// use solid_types::{Triangle, Point3};
///
/// let tri = Triangle::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// );
///
/// assert!((tri.area() - 0.5).abs() < 1e-12);
/// assert!((tri.normal().unwrap().z - 1.0).abs() < 1e-12);
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

    /// Get vertices as an array.
    #[inline]
    #[must_use]
    pub const fn vertices(&self) -> [Point3<f64>; 3] {
        [self.v0, self.v1, self.v2]
    }

    /// Compute the (unnormalized) face normal via cross product.
    ///
    /// Direction follows the right-hand rule with CCW winding; magnitude
    /// equals twice the triangle's area.
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
    /// use solid_types::{Triangle, Point3};
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
        let len_sq = n.norm_squared();
        if len_sq > f64::EPSILON {
            Some(n / len_sq.sqrt())
        } else {
            None
        }
    }

    /// Compute the area of the triangle.
    #[inline]
    #[must_use]
    pub fn area(&self) -> f64 {
        self.normal_unnormalized().norm() * 0.5
    }

    /// Compute the centroid (center of mass).
    #[inline]
    #[must_use]
    pub fn centroid(&self) -> Point3<f64> {
        Point3::new(
            (self.v0.x + self.v1.x + self.v2.x) / 3.0,
            (self.v0.y + self.v1.y + self.v2.y) / 3.0,
            (self.v0.z + self.v1.z + self.v2.z) / 3.0,
        )
    }

    /// Compute the axis-aligned bounding box of the triangle.
    ///
    /// # Example
    ///
    /// ```
    /// use solid_types::{Triangle, Point3};
    ///
    /// let tri = Triangle::new(
    ///     Point3::new(0.0, 2.0, 0.0),
    ///     Point3::new(3.0, 0.0, 0.0),
    ///     Point3::new(0.0, 0.0, 1.0),
    /// );
    /// let aabb = tri.aabb();
    /// assert_eq!(aabb.min, Point3::new(0.0, 0.0, 0.0));
    /// assert_eq!(aabb.max, Point3::new(3.0, 2.0, 1.0));
    /// ```
    #[must_use]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_points(self.vertices().iter())
    }

    /// Check if the triangle is degenerate (zero or near-zero area).
    ///
    /// # Arguments
    ///
    /// * `epsilon` - Area threshold below which the triangle is degenerate.
    #[inline]
    #[must_use]
    pub fn is_degenerate(&self, epsilon: f64) -> bool {
        self.area() < epsilon
    }

    /// Create a new triangle with reversed winding (flipped normal).
    #[inline]
    #[must_use]
    pub const fn reversed(&self) -> Self {
        Self {
            v0: self.v0,
            v1: self.v2,
            v2: self.v1,
        }
    }
}
