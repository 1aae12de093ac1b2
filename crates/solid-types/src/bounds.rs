//! Axis-aligned bounding box.

use crate::Triangle;
use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box (AABB).
///
/// Defined by minimum and maximum corner points. Point containment is
/// boundary-inclusive, which is what makes the "outside the box means
/// outside the solid" rejection test conservative and safe.
///
/// # Example
///
/// ```
/// use solid_types::{Aabb, Point3};
///
/// let aabb = Aabb::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(2.0, 2.0, 2.0),
/// );
///
/// assert!(aabb.contains(&Point3::new(1.0, 1.0, 1.0)));
/// assert!(aabb.contains(&Point3::new(0.0, 0.0, 0.0))); // boundary
/// assert!(!aabb.contains(&Point3::new(3.0, 1.0, 1.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// Minimum corner (smallest x, y, z values).
    pub min: Point3<f64>,
    /// Maximum corner (largest x, y, z values).
    pub max: Point3<f64>,
}

impl Aabb {
    /// Create a new AABB from minimum and maximum corners.
    ///
    /// The corners are swapped per axis if min > max.
    #[must_use]
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self {
            min: Point3::new(min.x.min(max.x), min.y.min(max.y), min.z.min(max.z)),
            max: Point3::new(min.x.max(max.x), min.y.max(max.y), min.z.max(max.z)),
        }
    }

    /// Create an empty (inverted) AABB.
    ///
    /// An empty AABB has min > max, which is the identity element for
    /// [`Aabb::expand_to_include`] and [`Aabb::union`].
    ///
    /// # Example
    ///
    /// ```
    /// use solid_types::{Aabb, Point3};
    ///
    /// let mut aabb = Aabb::empty();
    /// assert!(aabb.is_empty());
    ///
    /// aabb.expand_to_include(&Point3::new(1.0, 2.0, 3.0));
    /// assert!(!aabb.is_empty());
    /// ```
    #[must_use]
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Create an AABB enclosing an iterator of points.
    ///
    /// Returns an empty AABB if the iterator is empty.
    #[must_use]
    pub fn from_points<'a>(points: impl Iterator<Item = &'a Point3<f64>>) -> Self {
        let mut aabb = Self::empty();
        for point in points {
            aabb.expand_to_include(point);
        }
        aabb
    }

    /// Create an AABB enclosing an iterator of triangles.
    ///
    /// # Example
    ///
    /// ```
    /// use solid_types::{Aabb, Triangle, Point3};
    ///
    /// let tri = Triangle::new(
    ///     Point3::new(-1.0, 0.0, 0.0),
    ///     Point3::new(1.0, 0.0, 0.0),
    ///     Point3::new(0.0, 2.0, 0.0),
    /// );
    /// let aabb = Aabb::from_triangles([tri].iter());
    /// assert_eq!(aabb.min, Point3::new(-1.0, 0.0, 0.0));
    /// assert_eq!(aabb.max, Point3::new(1.0, 2.0, 0.0));
    /// ```
    #[must_use]
    pub fn from_triangles<'a>(triangles: impl Iterator<Item = &'a Triangle>) -> Self {
        let mut aabb = Self::empty();
        for tri in triangles {
            aabb.expand_to_include(&tri.v0);
            aabb.expand_to_include(&tri.v1);
            aabb.expand_to_include(&tri.v2);
        }
        aabb
    }

    /// Check if the AABB is empty (min > max on any axis).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Get the size (width, depth, height) of the AABB.
    #[inline]
    #[must_use]
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Index (0 = x, 1 = y, 2 = z) of the axis with the largest extent.
    ///
    /// Ties resolve to the lower axis index.
    #[must_use]
    pub fn longest_axis(&self) -> usize {
        let s = self.size();
        if s.x >= s.y && s.x >= s.z {
            0
        } else if s.y >= s.z {
            1
        } else {
            2
        }
    }

    /// Check if the AABB contains a point.
    ///
    /// Points on the boundary are considered inside.
    #[inline]
    #[must_use]
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Check if this AABB intersects another AABB.
    ///
    /// Touching AABBs are considered intersecting.
    #[inline]
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Compute the union (enclosing AABB) of two AABBs.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Self {
            min: Point3::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            max: Point3::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        }
    }

    /// Expand the AABB in place to include a point.
    pub fn expand_to_include(&mut self, point: &Point3<f64>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    /// Expand the AABB by a uniform margin on all sides.
    ///
    /// # Arguments
    ///
    /// * `margin` - Distance to expand. Negative values shrink the AABB.
    ///
    /// # Example
    ///
    /// ```
    /// use solid_types::{Aabb, Point3};
    ///
    /// let aabb = Aabb::new(
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(1.0, 1.0, 1.0),
    /// );
    /// let expanded = aabb.expanded(0.5);
    /// assert_eq!(expanded.min, Point3::new(-0.5, -0.5, -0.5));
    /// assert_eq!(expanded.max, Point3::new(1.5, 1.5, 1.5));
    /// ```
    #[must_use]
    pub fn expanded(&self, margin: f64) -> Self {
        Self {
            min: Point3::new(
                self.min.x - margin,
                self.min.y - margin,
                self.min.z - margin,
            ),
            max: Point3::new(
                self.max.x + margin,
                self.max.y + margin,
                self.max.z + margin,
            ),
        }
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}
