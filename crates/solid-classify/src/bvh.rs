//! Bounding volume hierarchy over mesh triangles.
//!
//! Built once per classifier by median-splitting triangle bounding boxes
//! along the longest axis. Traversal counts every forward crossing along
//! a ray instead of finding the closest one, since parity is what decides
//! containment.

use nalgebra::{Point3, Vector3};
use solid_types::{Aabb, Triangle};

use crate::intersect::{intersect_ray_triangle, TriangleHit};
use crate::ray::Ray;
use crate::tolerances::Tolerances;

/// Padding applied to every node box for numerical robustness.
const AABB_MARGIN: f64 = 1e-8;

/// BVH node for acceleration structure.
#[derive(Debug)]
pub(crate) enum BvhNode {
    Leaf {
        aabb: Aabb,
        triangle: usize,
    },
    Internal {
        aabb: Aabb,
        left: Box<BvhNode>,
        right: Box<BvhNode>,
    },
}

impl BvhNode {
    /// Build a BVH over the given triangle indices.
    ///
    /// Returns `None` when `indices` is empty.
    pub(crate) fn build(triangles: &[Triangle], indices: &mut [usize]) -> Option<Self> {
        if indices.is_empty() {
            return None;
        }

        if indices.len() == 1 {
            let index = indices[0];
            return Some(Self::Leaf {
                aabb: triangles[index].aabb().expanded(AABB_MARGIN),
                triangle: index,
            });
        }

        let mut combined = Aabb::empty();
        for &index in indices.iter() {
            combined = combined.union(&triangles[index].aabb());
        }
        let combined = combined.expanded(AABB_MARGIN);

        // Median split along the longest axis, ordered by centroid
        let axis = combined.longest_axis();
        indices.sort_by(|&a, &b| {
            let ca = triangles[a].centroid()[axis];
            let cb = triangles[b].centroid()[axis];
            ca.partial_cmp(&cb).unwrap_or(std::cmp::Ordering::Equal)
        });

        let mid = indices.len() / 2;
        let (left_indices, right_indices) = indices.split_at_mut(mid);

        let left = Self::build(triangles, left_indices);
        let right = Self::build(triangles, right_indices);

        match (left, right) {
            (Some(l), Some(r)) => Some(Self::Internal {
                aabb: combined,
                left: Box::new(l),
                right: Box::new(r),
            }),
            (Some(node), None) | (None, Some(node)) => Some(node),
            (None, None) => None,
        }
    }

    const fn aabb(&self) -> &Aabb {
        match self {
            Self::Leaf { aabb, .. } | Self::Internal { aabb, .. } => aabb,
        }
    }

    /// Count forward ray crossings through the triangles under this node.
    ///
    /// Returns `None` as soon as any crossing grazes an edge or vertex;
    /// the count would be unreliable and the caller must recast.
    pub(crate) fn count_crossings(
        &self,
        ray: &Ray,
        dir_inv: &Vector3<f64>,
        triangles: &[Triangle],
        tolerances: &Tolerances,
    ) -> Option<usize> {
        if !slab_hit(self.aabb(), &ray.origin, dir_inv) {
            return Some(0);
        }

        match self {
            Self::Leaf { triangle, .. } => {
                match intersect_ray_triangle(ray, &triangles[*triangle], tolerances) {
                    TriangleHit::Miss => Some(0),
                    TriangleHit::Hit(_) => Some(1),
                    TriangleHit::Grazing(_) => None,
                }
            }
            Self::Internal { left, right, .. } => {
                let left_count = left.count_crossings(ray, dir_inv, triangles, tolerances)?;
                let right_count = right.count_crossings(ray, dir_inv, triangles, tolerances)?;
                Some(left_count + right_count)
            }
        }
    }
}

/// Componentwise inverse of a ray direction for slab tests.
///
/// Near-zero components map to `f64::MAX` so that `0.0 * f64::MAX` stays
/// finite in the slab arithmetic instead of producing NaN.
pub(crate) fn inverse_direction(direction: &Vector3<f64>, epsilon: f64) -> Vector3<f64> {
    Vector3::new(
        if direction.x.abs() > epsilon {
            1.0 / direction.x
        } else {
            f64::MAX
        },
        if direction.y.abs() > epsilon {
            1.0 / direction.y
        } else {
            f64::MAX
        },
        if direction.z.abs() > epsilon {
            1.0 / direction.z
        } else {
            f64::MAX
        },
    )
}

/// Slab test: does the forward half-line touch the box?
fn slab_hit(aabb: &Aabb, origin: &Point3<f64>, dir_inv: &Vector3<f64>) -> bool {
    let t1 = (aabb.min.x - origin.x) * dir_inv.x;
    let t2 = (aabb.max.x - origin.x) * dir_inv.x;
    let t3 = (aabb.min.y - origin.y) * dir_inv.y;
    let t4 = (aabb.max.y - origin.y) * dir_inv.y;
    let t5 = (aabb.min.z - origin.z) * dir_inv.z;
    let t6 = (aabb.max.z - origin.z) * dir_inv.z;

    let t_min = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
    let t_max = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

    t_max >= t_min && t_max >= 0.0
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use solid_types::unit_cube;

    use super::*;

    fn cube_bvh() -> (Vec<Triangle>, BvhNode) {
        let triangles = unit_cube().triangles;
        let mut indices: Vec<usize> = (0..triangles.len()).collect();
        let bvh = BvhNode::build(&triangles, &mut indices).unwrap();
        (triangles, bvh)
    }

    fn crossings(ray: &Ray, triangles: &[Triangle], bvh: &BvhNode) -> Option<usize> {
        let tolerances = Tolerances::default();
        let dir_inv = inverse_direction(&ray.direction, tolerances.parallel);
        bvh.count_crossings(ray, &dir_inv, triangles, &tolerances)
    }

    #[test]
    fn build_empty_returns_none() {
        let mut indices: Vec<usize> = Vec::new();
        assert!(BvhNode::build(&[], &mut indices).is_none());
    }

    #[test]
    fn ray_through_cube_counts_two_crossings() {
        let (triangles, bvh) = cube_bvh();
        // Off the face diagonals, so both crossings are clean.
        let ray = Ray::new(Point3::new(0.3, 0.6, -1.0), Vector3::z());
        assert_eq!(crossings(&ray, &triangles, &bvh), Some(2));
    }

    #[test]
    fn ray_from_inside_counts_one_crossing() {
        let (triangles, bvh) = cube_bvh();
        let ray = Ray::new(Point3::new(0.3, 0.6, 0.5), Vector3::z());
        assert_eq!(crossings(&ray, &triangles, &bvh), Some(1));
    }

    #[test]
    fn ray_missing_cube_counts_zero() {
        let (triangles, bvh) = cube_bvh();
        let ray = Ray::new(Point3::new(5.0, 5.0, -1.0), Vector3::z());
        assert_eq!(crossings(&ray, &triangles, &bvh), Some(0));
    }

    #[test]
    fn ray_through_face_diagonal_reports_grazing() {
        let (triangles, bvh) = cube_bvh();
        // x == y lies on the diagonal shared by both top-face triangles.
        let ray = Ray::new(Point3::new(0.5, 0.5, 0.5), Vector3::z());
        assert_eq!(crossings(&ray, &triangles, &bvh), None);
    }

    #[test]
    fn slab_test_accepts_and_rejects() {
        let aabb = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        let dir_inv = Vector3::new(f64::MAX, f64::MAX, 1.0);

        assert!(slab_hit(&aabb, &Point3::new(0.5, 0.5, -1.0), &dir_inv));
        assert!(!slab_hit(&aabb, &Point3::new(5.0, 5.0, -1.0), &dir_inv));
    }

    #[test]
    fn slab_test_rejects_box_behind_ray() {
        let aabb = Aabb::new(Point3::new(0.0, 0.0, -5.0), Point3::new(1.0, 1.0, -4.0));
        let dir_inv = Vector3::new(f64::MAX, f64::MAX, 1.0);
        assert!(!slab_hit(&aabb, &Point3::new(0.5, 0.5, 0.0), &dir_inv));
    }
}
