//! Triangle-soup surface mesh.

use crate::{Aabb, Triangle};
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A surface mesh stored as a flat, ordered collection of triangles.
///
/// Triangle order is irrelevant to every geometric result in this workspace;
/// it only matters for reproducible iteration. There is no vertex sharing:
/// loaders that read indexed formats flatten to one [`Triangle`] per face.
///
/// # Winding Order
///
/// Triangles use **counter-clockwise (CCW) winding** viewed from outside, so
/// normals point outward and [`TriMesh::signed_volume`] is positive for a
/// closed, correctly oriented surface.
///
/// # Example
///
/// ```
/// use solid_types::unit_cube;
///
/// let cube = unit_cube();
/// assert_eq!(cube.triangle_count(), 12);
/// assert!((cube.surface_area() - 6.0).abs() < 1e-12);
/// assert!((cube.signed_volume() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TriMesh {
    /// Triangles in insertion order.
    pub triangles: Vec<Triangle>,
}

impl TriMesh {
    /// Create a new empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(triangle_count: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    /// Create a mesh from an existing triangle collection.
    #[inline]
    #[must_use]
    pub const fn from_triangles(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    /// Number of triangles in the mesh.
    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Check if the mesh has no triangles.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Append a triangle.
    #[inline]
    pub fn push(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Iterate over the triangles in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Triangle> {
        self.triangles.iter()
    }

    /// Compute the axis-aligned bounding box of the mesh.
    ///
    /// Returns an empty AABB for an empty mesh.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_triangles(self.triangles.iter())
    }

    /// Compute the total surface area of the mesh.
    #[must_use]
    pub fn surface_area(&self) -> f64 {
        self.triangles.iter().map(Triangle::area).sum()
    }

    /// Compute the signed volume of the mesh.
    ///
    /// Uses the divergence theorem: the signed volume is the sum of signed
    /// tetrahedra volumes formed by each triangle and the origin.
    ///
    /// # Returns
    ///
    /// - Positive value: normals point outward (correct orientation)
    /// - Negative value: normals point inward (inside-out mesh)
    /// - Near-zero: mesh is not closed or has inconsistent winding
    ///
    /// # Note
    ///
    /// Assumes the mesh is closed (watertight). For open meshes the result
    /// is not meaningful as a volume measurement.
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        let mut volume = 0.0;

        for tri in &self.triangles {
            let (v0, v1, v2) = (&tri.v0, &tri.v1, &tri.v2);

            // Signed volume of tetrahedron with origin = (v0 · (v1 × v2)) / 6
            // Using mul_add for better numerical accuracy and performance
            let cross = Vector3::new(
                v1.y.mul_add(v2.z, -(v1.z * v2.y)),
                v1.z.mul_add(v2.x, -(v1.x * v2.z)),
                v1.x.mul_add(v2.y, -(v1.y * v2.x)),
            );
            volume += v0.z.mul_add(cross.z, v0.x.mul_add(cross.x, v0.y * cross.y));
        }

        volume / 6.0
    }

    /// Compute the absolute volume of the mesh.
    ///
    /// Returns the absolute value of [`TriMesh::signed_volume`].
    #[inline]
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.signed_volume().abs()
    }

    /// Check if the mesh appears to be inside-out.
    ///
    /// A mesh is considered inside-out if its signed volume is negative.
    #[inline]
    #[must_use]
    pub fn is_inside_out(&self) -> bool {
        self.signed_volume() < 0.0
    }

    /// Count degenerate (zero or near-zero area) triangles.
    ///
    /// A non-zero count is a precondition warning for downstream point
    /// classification, not an error: degenerate triangles never intersect
    /// a ray and simply contribute nothing.
    ///
    /// # Arguments
    ///
    /// * `epsilon` - Area threshold below which a triangle is degenerate.
    #[must_use]
    pub fn degenerate_count(&self, epsilon: f64) -> usize {
        self.triangles
            .iter()
            .filter(|tri| tri.is_degenerate(epsilon))
            .count()
    }
}

impl From<Vec<Triangle>> for TriMesh {
    fn from(triangles: Vec<Triangle>) -> Self {
        Self::from_triangles(triangles)
    }
}

impl<'a> IntoIterator for &'a TriMesh {
    type Item = &'a Triangle;
    type IntoIter = std::slice::Iter<'a, Triangle>;

    fn into_iter(self) -> Self::IntoIter {
        self.triangles.iter()
    }
}

/// Helper function to create a unit cube mesh.
///
/// Creates a closed cube from (0,0,0) to (1,1,1) as 12 triangles with
/// outward-facing normals. Used throughout the workspace's tests as the
/// canonical well-behaved closed surface.
///
/// # Example
///
/// ```
/// use solid_types::unit_cube;
///
/// let cube = unit_cube();
/// assert_eq!(cube.triangle_count(), 12);
/// assert!((cube.volume() - 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn unit_cube() -> TriMesh {
    use nalgebra::Point3;

    // 8 corners
    let p = [
        Point3::new(0.0, 0.0, 0.0), // 0
        Point3::new(1.0, 0.0, 0.0), // 1
        Point3::new(1.0, 1.0, 0.0), // 2
        Point3::new(0.0, 1.0, 0.0), // 3
        Point3::new(0.0, 0.0, 1.0), // 4
        Point3::new(1.0, 0.0, 1.0), // 5
        Point3::new(1.0, 1.0, 1.0), // 6
        Point3::new(0.0, 1.0, 1.0), // 7
    ];

    // 12 triangles (2 per face), CCW winding when viewed from outside
    let faces: [[usize; 3]; 12] = [
        [0, 2, 1], // bottom (z=0), normal -Z
        [0, 3, 2],
        [4, 5, 6], // top (z=1), normal +Z
        [4, 6, 7],
        [0, 1, 5], // front (y=0), normal -Y
        [0, 5, 4],
        [3, 7, 6], // back (y=1), normal +Y
        [3, 6, 2],
        [0, 4, 7], // left (x=0), normal -X
        [0, 7, 3],
        [1, 2, 6], // right (x=1), normal +X
        [1, 6, 5],
    ];

    let triangles = faces
        .iter()
        .map(|&[a, b, c]| Triangle::new(p[a], p[b], p[c]))
        .collect();

    TriMesh::from_triangles(triangles)
}
