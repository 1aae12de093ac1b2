//! Rays for containment casting.

use nalgebra::{Point3, Vector3};

/// A ray defined by an origin point and a direction vector.
///
/// The direction does not need to be normalized, but must be non-zero.
/// Ray parameters are measured in units of the direction's length.
///
/// # Example
///
/// ```
/// use nalgebra::{Point3, Vector3};
/// use solid_classify::Ray;
///
/// let ray = Ray::new(Point3::origin(), Vector3::new(1.0, 0.0, 0.0));
/// let point = ray.point_at(5.0);
/// assert!((point.x - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// The origin of the ray.
    pub origin: Point3<f64>,
    /// The direction of the ray (not necessarily normalized).
    pub direction: Vector3<f64>,
}

impl Ray {
    /// Creates a new ray with the given origin and direction.
    #[must_use]
    pub const fn new(origin: Point3<f64>, direction: Vector3<f64>) -> Self {
        Self { origin, direction }
    }

    /// Returns the point along the ray at parameter `t`.
    ///
    /// The point is computed as `origin + t * direction`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point3<f64> {
        self.origin + self.direction * t
    }
}
