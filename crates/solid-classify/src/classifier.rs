//! Point-in-volume classification by parity ray casting.

use nalgebra::{Point3, Vector3};
use rayon::prelude::*;
use solid_grid::{OccupancyGrid, PointGrid};
use solid_types::{Aabb, Containment, TriMesh};
use tracing::{debug, info, warn};

use crate::bvh::{inverse_direction, BvhNode};
use crate::error::{ClassifyError, ClassifyResult};
use crate::ray::Ray;
use crate::tolerances::Tolerances;

/// Number of cast directions tried per point before giving up.
const MAX_CAST_ATTEMPTS: usize = 4;

/// Cast direction for an attempt index.
///
/// Attempt 0 is the canonical +Z axis. Later attempts use fixed skew
/// directions so a ray that grazed a mesh feature once does not line up
/// with the same feature again. The table is fixed, so classification is
/// reproducible across runs.
fn cast_direction(attempt: usize) -> Vector3<f64> {
    let direction = match attempt {
        0 => Vector3::new(0.0, 0.0, 1.0),
        1 => Vector3::new(0.531, -0.284, 0.799),
        2 => Vector3::new(-0.672, 0.513, 0.534),
        _ => Vector3::new(0.289, 0.847, -0.447),
    };
    direction.normalize()
}

/// Classifies points against a closed triangle mesh.
///
/// Containment is decided by the parity of forward ray crossings: a point
/// whose ray crosses the surface an odd number of times is inside. Casts
/// that graze a triangle edge or vertex are detected and retried along a
/// different direction; a point whose casts all graze resolves to
/// [`Containment::Indeterminate`] rather than a wrong answer.
///
/// # Surface points
///
/// Crossings at the query point itself are discarded, so a point sitting
/// exactly on the surface is classified by the geometry strictly ahead of
/// its casts. The result is deterministic for a given mesh and point but
/// depends on which face the point sits on: with the canonical +Z cast, a
/// point on a downward-facing face counts as inside and a point on an
/// upward-facing face as outside.
///
/// # Example
///
/// ```
/// use nalgebra::Point3;
/// use solid_classify::VolumeClassifier;
/// use solid_types::{unit_cube, Containment};
///
/// let classifier = VolumeClassifier::new(unit_cube()).unwrap();
/// assert_eq!(
///     classifier.classify(Point3::new(0.5, 0.25, 0.5)),
///     Containment::Inside
/// );
/// assert_eq!(
///     classifier.classify(Point3::new(2.0, 0.25, 0.5)),
///     Containment::Outside
/// );
/// ```
#[derive(Debug)]
pub struct VolumeClassifier {
    /// The mesh being classified against.
    mesh: TriMesh,
    /// Cached mesh bounds for early rejection.
    bounds: Aabb,
    /// Acceleration structure over the mesh triangles.
    bvh: BvhNode,
    /// Numeric tolerances for the ray casts.
    tolerances: Tolerances,
}

impl VolumeClassifier {
    /// Builds a classifier over a triangle mesh with default tolerances.
    ///
    /// The mesh should be closed. Parity counting over an open surface
    /// still runs but reports whatever the crossing counts imply.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::EmptyMesh`] if the mesh has no triangles.
    ///
    /// # Example
    ///
    /// ```
    /// use solid_classify::VolumeClassifier;
    /// use solid_types::unit_cube;
    ///
    /// let classifier = VolumeClassifier::new(unit_cube());
    /// assert!(classifier.is_ok());
    /// ```
    pub fn new(mesh: TriMesh) -> ClassifyResult<Self> {
        Self::with_tolerances(mesh, Tolerances::default())
    }

    /// Builds a classifier with custom numeric tolerances.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::EmptyMesh`] if the mesh has no triangles.
    pub fn with_tolerances(mesh: TriMesh, tolerances: Tolerances) -> ClassifyResult<Self> {
        if mesh.is_empty() {
            return Err(ClassifyError::EmptyMesh);
        }

        let mut indices: Vec<usize> = (0..mesh.triangle_count()).collect();
        let Some(bvh) = BvhNode::build(&mesh.triangles, &mut indices) else {
            return Err(ClassifyError::EmptyMesh);
        };
        let bounds = mesh.bounds();

        debug!(
            triangles = mesh.triangle_count(),
            "Built classification acceleration structure"
        );

        Ok(Self {
            mesh,
            bounds,
            bvh,
            tolerances,
        })
    }

    /// Classifies a single point.
    ///
    /// Points outside the mesh bounding box resolve to
    /// [`Containment::Outside`] without casting any rays. Results are
    /// deterministic: the same mesh and point always produce the same
    /// answer, whether classified alone or in a batch.
    #[must_use]
    pub fn classify(&self, point: Point3<f64>) -> Containment {
        if !self.bounds.contains(&point) {
            return Containment::Outside;
        }

        for attempt in 0..MAX_CAST_ATTEMPTS {
            let ray = Ray::new(point, cast_direction(attempt));
            let dir_inv = inverse_direction(&ray.direction, self.tolerances.parallel);

            if let Some(crossings) =
                self.bvh
                    .count_crossings(&ray, &dir_inv, &self.mesh.triangles, &self.tolerances)
            {
                return if crossings % 2 == 1 {
                    Containment::Inside
                } else {
                    Containment::Outside
                };
            }
            // Grazed an edge or vertex; recast along the next direction.
        }

        Containment::Indeterminate
    }

    /// Returns `true` if the point classifies as inside.
    #[must_use]
    pub fn is_inside(&self, point: Point3<f64>) -> bool {
        self.classify(point).is_inside()
    }

    /// Classifies a batch of points in parallel.
    ///
    /// The output holds one entry per input point, in input order. A
    /// point that fails to resolve is reported as
    /// [`Containment::Indeterminate`] without affecting its neighbors.
    #[must_use]
    pub fn classify_points(&self, points: &[Point3<f64>]) -> Vec<Containment> {
        info!(
            points = points.len(),
            triangles = self.mesh.triangle_count(),
            "Classifying point batch"
        );

        let results: Vec<Containment> = points
            .par_iter()
            .map(|&point| self.classify(point))
            .collect();

        let indeterminate = results.iter().filter(|c| c.is_indeterminate()).count();
        if indeterminate > 0 {
            warn!(indeterminate, "Some points did not resolve after recasts");
        } else {
            info!("Point batch classified");
        }

        results
    }

    /// Classifies every point of a lattice into an occupancy grid.
    ///
    /// Values land in the lattice's linear (x-fastest) order.
    ///
    /// # Errors
    ///
    /// Propagates [`solid_grid::GridError`] if the occupancy container
    /// rejects its inputs.
    pub fn classify_grid(&self, grid: &PointGrid) -> ClassifyResult<OccupancyGrid> {
        let [nx, ny, nz] = grid.counts();
        debug!(nx, ny, nz, spacing = grid.spacing(), "Classifying lattice");

        let points: Vec<Point3<f64>> = grid.points().collect();
        let values = self.classify_points(&points);

        Ok(OccupancyGrid::from_parts(grid.clone(), values)?)
    }

    /// The mesh being classified against.
    #[must_use]
    pub const fn mesh(&self) -> &TriMesh {
        &self.mesh
    }

    /// The mesh bounding box used for early rejection.
    #[must_use]
    pub const fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// The active numeric tolerances.
    #[must_use]
    pub const fn tolerances(&self) -> Tolerances {
        self.tolerances
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use solid_types::{unit_cube, Triangle};

    use super::*;

    fn tetrahedron() -> TriMesh {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 0.0, 0.0);
        let c = Point3::new(0.5, 0.866, 0.0);
        let d = Point3::new(0.5, 0.289, 0.816);

        TriMesh::from_triangles(vec![
            Triangle::new(a, c, b),
            Triangle::new(a, b, d),
            Triangle::new(b, c, d),
            Triangle::new(c, a, d),
        ])
    }

    #[test]
    fn empty_mesh_is_rejected() {
        let result = VolumeClassifier::new(TriMesh::new());
        assert!(matches!(result, Err(ClassifyError::EmptyMesh)));
    }

    #[test]
    fn cube_centroid_is_inside() {
        let classifier = VolumeClassifier::new(unit_cube()).unwrap();
        // The +Z cast from the centroid grazes the top-face diagonal, so
        // this point exercises the recast path.
        assert_eq!(
            classifier.classify(Point3::new(0.5, 0.5, 0.5)),
            Containment::Inside
        );
    }

    #[test]
    fn cube_interior_points_are_inside() {
        let classifier = VolumeClassifier::new(unit_cube()).unwrap();
        for &(x, y, z) in &[
            (0.25, 0.25, 0.25),
            (0.75, 0.25, 0.5),
            (0.1, 0.9, 0.5),
            (0.5, 0.25, 0.9),
        ] {
            assert_eq!(
                classifier.classify(Point3::new(x, y, z)),
                Containment::Inside,
                "({x}, {y}, {z}) should be inside"
            );
        }
    }

    #[test]
    fn points_outside_cube_are_outside() {
        let classifier = VolumeClassifier::new(unit_cube()).unwrap();
        for &(x, y, z) in &[
            (1000.0, 1000.0, 1000.0),
            (1.5, 0.5, 0.5),
            (-0.1, 0.5, 0.5),
            (0.5, 0.5, 1.1),
        ] {
            assert_eq!(
                classifier.classify(Point3::new(x, y, z)),
                Containment::Outside,
                "({x}, {y}, {z}) should be outside"
            );
        }
    }

    #[test]
    fn surface_convention_is_pinned() {
        let classifier = VolumeClassifier::new(unit_cube()).unwrap();
        // Bottom face: the crossing at the point itself is discarded and
        // the cast exits through the top, giving odd parity.
        assert_eq!(
            classifier.classify(Point3::new(0.5, 0.25, 0.0)),
            Containment::Inside
        );
        // Top face: nothing lies ahead of the cast.
        assert_eq!(
            classifier.classify(Point3::new(0.5, 0.25, 1.0)),
            Containment::Outside
        );
    }

    #[test]
    fn classification_is_idempotent() {
        let classifier = VolumeClassifier::new(unit_cube()).unwrap();
        for &(x, y, z) in &[(0.5, 0.5, 0.5), (0.5, 0.25, 0.0), (1.5, 0.5, 0.5)] {
            let point = Point3::new(x, y, z);
            let first = classifier.classify(point);
            assert_eq!(classifier.classify(point), first);
            assert_eq!(classifier.classify(point), first);
            assert_eq!(classifier.is_inside(point), first.is_inside());
        }
    }

    #[test]
    fn triangle_order_does_not_change_results() {
        let cube = unit_cube();
        let mut reordered = cube.triangles.clone();
        reordered.reverse();

        let forward = VolumeClassifier::new(cube).unwrap();
        let shuffled = VolumeClassifier::new(TriMesh::from_triangles(reordered)).unwrap();

        for &(x, y, z) in &[
            (0.5, 0.5, 0.5),
            (0.25, 0.75, 0.5),
            (0.5, 0.25, 0.0),
            (1.5, 0.5, 0.5),
        ] {
            let point = Point3::new(x, y, z);
            assert_eq!(forward.classify(point), shuffled.classify(point));
        }
    }

    #[test]
    fn winding_does_not_change_results() {
        let cube = unit_cube();
        let flipped: Vec<Triangle> = cube.triangles.iter().map(Triangle::reversed).collect();

        let outward = VolumeClassifier::new(cube).unwrap();
        let inward = VolumeClassifier::new(TriMesh::from_triangles(flipped)).unwrap();

        for &(x, y, z) in &[(0.5, 0.5, 0.5), (0.25, 0.75, 0.5), (1.5, 0.5, 0.5)] {
            let point = Point3::new(x, y, z);
            assert_eq!(outward.classify(point), inward.classify(point));
        }
    }

    #[test]
    fn grazing_casts_resolve_by_recasting() {
        let classifier = VolumeClassifier::new(unit_cube()).unwrap();
        // x == y puts the +Z cast on the face diagonal shared by both
        // top-face triangles; this must still resolve.
        assert_eq!(
            classifier.classify(Point3::new(0.5, 0.5, 0.25)),
            Containment::Inside
        );
        // From the right face the +Z cast runs through a top-face edge;
        // the fallback direction finds no further crossings.
        assert_eq!(
            classifier.classify(Point3::new(1.0, 0.5, 0.5)),
            Containment::Outside
        );
    }

    #[test]
    fn recast_directions_agree_with_primary() {
        // A widened grazing band forces extra recasts; answers resolved
        // along fallback directions must match the default classifier.
        let widened = Tolerances::default().boundary(5e-2);
        let relaxed = VolumeClassifier::with_tolerances(unit_cube(), widened).unwrap();
        let baseline = VolumeClassifier::new(unit_cube()).unwrap();

        for &(x, y, z) in &[(0.5, 0.25, 0.5), (0.5, 0.5, 0.25), (1.0, 0.5, 0.5)] {
            let point = Point3::new(x, y, z);
            assert_eq!(relaxed.classify(point), baseline.classify(point));
        }
    }

    #[test]
    fn vertex_aligned_cast_resolves() {
        let classifier = VolumeClassifier::new(unit_cube()).unwrap();
        // From the vertical edge at the origin the +Z cast runs straight
        // through a corner vertex; a fallback direction settles it.
        assert_eq!(
            classifier.classify(Point3::new(0.0, 0.0, 0.5)),
            Containment::Outside
        );
    }

    #[test]
    fn bounds_rejection_skips_casting() {
        // A grazing band this wide makes every cast graze, so any point
        // that reaches the ray caster exhausts the direction table.
        let absurd = Tolerances::default().boundary(10.0);
        let classifier = VolumeClassifier::with_tolerances(unit_cube(), absurd).unwrap();

        assert_eq!(
            classifier.classify(Point3::new(0.5, 0.5, 0.5)),
            Containment::Indeterminate
        );
        assert_eq!(
            classifier.classify(Point3::new(0.5, 0.5, -0.5)),
            Containment::Outside
        );
        assert_eq!(
            classifier.classify(Point3::new(0.0, 0.0, -1.0)),
            Containment::Outside
        );
        assert_eq!(
            classifier.classify(Point3::new(1000.0, 1000.0, 1000.0)),
            Containment::Outside
        );
    }

    #[test]
    fn batch_matches_single_and_preserves_order() {
        let classifier = VolumeClassifier::new(unit_cube()).unwrap();
        let points = vec![
            Point3::new(0.5, 0.5, 0.5),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(0.25, 0.25, 0.25),
            Point3::new(-1.0, -1.0, -1.0),
            Point3::new(0.5, 0.5, 0.25),
        ];

        let batch = classifier.classify_points(&points);

        assert_eq!(batch.len(), points.len());
        for (point, result) in points.iter().zip(&batch) {
            assert_eq!(classifier.classify(*point), *result);
        }
    }

    #[test]
    fn empty_batch_yields_empty_results() {
        let classifier = VolumeClassifier::new(unit_cube()).unwrap();
        assert!(classifier.classify_points(&[]).is_empty());
    }

    #[test]
    fn grid_classification_covers_cube() {
        let classifier = VolumeClassifier::new(unit_cube()).unwrap();
        let grid = PointGrid::covering(&classifier.bounds(), 0.5, 1).unwrap();
        assert_eq!(grid.counts(), [5, 5, 5]);

        let occupancy = classifier.classify_grid(&grid).unwrap();

        assert_eq!(occupancy.indeterminate_count(), 0);
        assert_eq!(occupancy.get(2, 2, 2), Some(Containment::Inside));

        // The padding shell sits strictly outside the mesh bounds.
        let [nx, ny, nz] = grid.counts();
        for k in 0..nz {
            for j in 0..ny {
                for i in 0..nx {
                    let on_shell = i == 0 || j == 0 || k == 0
                        || i == nx - 1 || j == ny - 1 || k == nz - 1;
                    if on_shell {
                        assert_eq!(occupancy.get(i, j, k), Some(Containment::Outside));
                    }
                }
            }
        }

        assert!(occupancy.inside_count() >= 1);
    }

    #[test]
    fn tetrahedron_centroid_inside_far_point_outside() {
        let classifier = VolumeClassifier::new(tetrahedron()).unwrap();
        assert_eq!(
            classifier.classify(Point3::new(0.5, 0.385, 0.204)),
            Containment::Inside
        );
        assert_eq!(
            classifier.classify(Point3::new(10.0, 10.0, 10.0)),
            Containment::Outside
        );
    }

    #[test]
    fn custom_tolerances_still_classify() {
        let tolerances = Tolerances::default().boundary(1e-7);
        let classifier = VolumeClassifier::with_tolerances(unit_cube(), tolerances).unwrap();
        assert_eq!(classifier.tolerances(), tolerances);
        assert_eq!(
            classifier.classify(Point3::new(0.5, 0.25, 0.5)),
            Containment::Inside
        );
    }

    #[test]
    fn accessors_expose_mesh_and_bounds() {
        let classifier = VolumeClassifier::new(unit_cube()).unwrap();
        assert_eq!(classifier.mesh().triangle_count(), 12);
        assert!(classifier.bounds().contains(&Point3::new(0.5, 0.5, 0.5)));
    }
}
