//! Ray-triangle intersection with explicit grazing detection.
//!
//! Implements the Möller–Trumbore algorithm. Unlike a plain hit test, the
//! result distinguishes crossings through a triangle's interior from
//! crossings that land within tolerance of an edge or vertex. Parity
//! counts built on a grazing crossing are unreliable: the neighboring
//! triangle that shares the edge may see the same crossing land a hair
//! outside its own bounds, so the pair records one crossing instead of
//! two, or two instead of one.

use solid_types::Triangle;

use crate::ray::Ray;
use crate::tolerances::Tolerances;

/// A forward ray-triangle plane crossing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Ray parameter at the crossing; the world point is `ray.point_at(t)`.
    pub t: f64,
    /// Barycentric coordinate along the first edge.
    pub u: f64,
    /// Barycentric coordinate along the second edge.
    pub v: f64,
}

/// Outcome of testing one ray against one triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TriangleHit {
    /// The ray does not cross the triangle.
    Miss,
    /// The ray crosses the triangle interior.
    Hit(RayHit),
    /// The ray crosses the triangle's plane within the boundary tolerance
    /// of an edge or vertex. Callers counting crossings should recast
    /// along a different direction.
    Grazing(RayHit),
}

impl TriangleHit {
    /// Returns `true` for a clean interior crossing.
    #[inline]
    #[must_use]
    pub const fn is_hit(&self) -> bool {
        matches!(self, Self::Hit(_))
    }

    /// Returns `true` when the ray misses the triangle.
    #[inline]
    #[must_use]
    pub const fn is_miss(&self) -> bool {
        matches!(self, Self::Miss)
    }

    /// Returns `true` for an edge- or vertex-grazing crossing.
    #[inline]
    #[must_use]
    pub const fn is_grazing(&self) -> bool {
        matches!(self, Self::Grazing(_))
    }
}

/// Test a ray against a triangle.
///
/// Uses the Möller–Trumbore algorithm. Only crossings strictly ahead of
/// the ray origin count: a crossing with parameter at or below
/// [`Tolerances::t_min`] is a [`TriangleHit::Miss`], so a ray starting on
/// the surface sees only geometry in front of it.
///
/// A crossing whose barycentric coordinates fall within
/// [`Tolerances::boundary`] of the valid range's edge, on either side, is
/// reported as [`TriangleHit::Grazing`] rather than silently accepted or
/// rejected. This catches rays through shared edges that both incident
/// triangles would otherwise reject.
///
/// # Arguments
///
/// * `ray` - The ray to test (direction need not be normalized)
/// * `triangle` - The triangle to test against
/// * `tolerances` - Numeric cutoffs for the test
///
/// # Example
///
/// ```
/// use nalgebra::{Point3, Vector3};
/// use solid_classify::{intersect_ray_triangle, Ray, Tolerances, TriangleHit};
/// use solid_types::Triangle;
///
/// let triangle = Triangle::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(10.0, 0.0, 0.0),
///     Point3::new(5.0, 10.0, 0.0),
/// );
/// let ray = Ray::new(Point3::new(5.0, 3.0, 5.0), Vector3::new(0.0, 0.0, -1.0));
///
/// match intersect_ray_triangle(&ray, &triangle, &Tolerances::default()) {
///     TriangleHit::Hit(hit) => assert!((hit.t - 5.0).abs() < 1e-10),
///     other => panic!("expected a hit, got {other:?}"),
/// }
/// ```
#[must_use]
pub fn intersect_ray_triangle(
    ray: &Ray,
    triangle: &Triangle,
    tolerances: &Tolerances,
) -> TriangleHit {
    let edge1 = triangle.v1 - triangle.v0;
    let edge2 = triangle.v2 - triangle.v0;

    let pvec = ray.direction.cross(&edge2);
    let det = edge1.dot(&pvec);

    // Ray is parallel to the triangle plane (or the triangle is degenerate)
    if det.abs() < tolerances.parallel {
        return TriangleHit::Miss;
    }

    let inv_det = 1.0 / det;
    let tvec = ray.origin - triangle.v0;
    let u = tvec.dot(&pvec) * inv_det;

    let qvec = tvec.cross(&edge1);
    let v = ray.direction.dot(&qvec) * inv_det;
    let w = 1.0 - u - v;

    // Clearly outside the triangle on some side
    if u < -tolerances.boundary || v < -tolerances.boundary || w < -tolerances.boundary {
        return TriangleHit::Miss;
    }

    let t = edge2.dot(&qvec) * inv_det;

    // Behind the origin, or at the origin itself
    if t <= tolerances.t_min {
        return TriangleHit::Miss;
    }

    let hit = RayHit { t, u, v };
    if u > tolerances.boundary && v > tolerances.boundary && w > tolerances.boundary {
        TriangleHit::Hit(hit)
    } else {
        TriangleHit::Grazing(hit)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::{Point3, Vector3};

    use super::*;

    fn simple_triangle() -> Triangle {
        Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(5.0, 10.0, 0.0),
        )
    }

    fn test_hit(origin: Point3<f64>, direction: Vector3<f64>) -> TriangleHit {
        intersect_ray_triangle(
            &Ray::new(origin, direction),
            &simple_triangle(),
            &Tolerances::default(),
        )
    }

    #[test]
    fn ray_hits_interior() {
        let hit = test_hit(Point3::new(5.0, 3.0, 5.0), Vector3::new(0.0, 0.0, -1.0));
        let TriangleHit::Hit(hit) = hit else {
            panic!("expected a hit, got {hit:?}");
        };
        assert_relative_eq!(hit.t, 5.0, epsilon = 1e-10);
        assert!(hit.u > 0.0 && hit.v > 0.0 && hit.u + hit.v < 1.0);
    }

    #[test]
    fn ray_misses_triangle() {
        let hit = test_hit(Point3::new(100.0, 100.0, 5.0), Vector3::new(0.0, 0.0, -1.0));
        assert!(hit.is_miss());
    }

    #[test]
    fn parallel_ray_misses() {
        let hit = test_hit(Point3::new(5.0, 3.0, 5.0), Vector3::new(1.0, 0.0, 0.0));
        assert!(hit.is_miss());
    }

    #[test]
    fn crossing_behind_origin_misses() {
        let hit = test_hit(Point3::new(5.0, 3.0, 5.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(hit.is_miss());
    }

    #[test]
    fn origin_on_triangle_misses_forward() {
        // The crossing sits at t = 0 and is discarded.
        let hit = test_hit(Point3::new(5.0, 3.0, 0.0), Vector3::new(0.0, 0.0, -1.0));
        assert!(hit.is_miss());
    }

    #[test]
    fn ray_through_edge_grazes() {
        // Passes through the midpoint of the v0-v1 edge (v = 0 there).
        let hit = test_hit(Point3::new(5.0, 0.0, 5.0), Vector3::new(0.0, 0.0, -1.0));
        let TriangleHit::Grazing(hit) = hit else {
            panic!("expected grazing, got {hit:?}");
        };
        assert_relative_eq!(hit.t, 5.0, epsilon = 1e-10);
    }

    #[test]
    fn ray_through_vertex_grazes() {
        let hit = test_hit(Point3::new(0.0, 0.0, 5.0), Vector3::new(0.0, 0.0, -1.0));
        assert!(hit.is_grazing());
    }

    #[test]
    fn ray_just_outside_edge_misses() {
        // Well beyond the grazing band on the outside.
        let hit = test_hit(Point3::new(5.0, -1e-3, 5.0), Vector3::new(0.0, 0.0, -1.0));
        assert!(hit.is_miss());
    }

    #[test]
    fn ray_just_inside_edge_hits() {
        // Inside the triangle but clear of the grazing band.
        let hit = test_hit(Point3::new(5.0, 1e-3, 5.0), Vector3::new(0.0, 0.0, -1.0));
        assert!(hit.is_hit());
    }

    #[test]
    fn unnormalized_direction_scales_t() {
        let hit = test_hit(Point3::new(5.0, 3.0, 5.0), Vector3::new(0.0, 0.0, -2.0));
        let TriangleHit::Hit(hit) = hit else {
            panic!("expected a hit, got {hit:?}");
        };
        assert_relative_eq!(hit.t, 2.5, epsilon = 1e-10);
    }

    #[test]
    fn degenerate_triangle_never_hits() {
        let collinear = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        );
        let ray = Ray::new(Point3::new(1.0, 0.0, 5.0), Vector3::new(0.0, 0.0, -1.0));
        let hit = intersect_ray_triangle(&ray, &collinear, &Tolerances::default());
        assert!(hit.is_miss());
    }

    #[test]
    fn wider_boundary_band_widens_grazing() {
        let tolerances = Tolerances::default().boundary(1e-2);
        let ray = Ray::new(Point3::new(5.0, 1e-3, 5.0), Vector3::new(0.0, 0.0, -1.0));
        let hit = intersect_ray_triangle(&ray, &simple_triangle(), &tolerances);
        // v is about 1e-4 here, inside the widened band.
        assert!(hit.is_grazing());
    }
}
