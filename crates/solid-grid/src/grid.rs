//! Regular 3D point lattices.
//!
//! A [`PointGrid`] describes a rectilinear lattice of query points by an
//! origin, a uniform spacing, and a point count per axis. It stores no
//! per-point data; it exists to generate points and to map between
//! integer coordinates and a flat linear index.
//!
//! Linear order is x-fastest: index `(k * ny + j) * nx + i` for the point
//! at integer coordinate `(i, j, k)`. Iteration and flattened containment
//! results both follow this order.

use nalgebra::Point3;
use solid_types::Aabb;

use crate::error::{GridError, GridResult};

/// A regular lattice of query points in world space.
///
/// # Example
///
/// ```
/// use nalgebra::Point3;
/// use solid_grid::PointGrid;
///
/// let grid = PointGrid::new(Point3::origin(), 0.5, [3, 3, 3]).unwrap();
/// assert_eq!(grid.point_count(), 27);
/// assert_eq!(grid.point_at(2, 0, 0), Point3::new(1.0, 0.0, 0.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointGrid {
    /// World position of the lattice point at integer coordinate (0, 0, 0).
    origin: Point3<f64>,
    /// Distance between adjacent lattice points along each axis.
    spacing: f64,
    /// Number of lattice points along x, y, and z.
    counts: [usize; 3],
}

impl PointGrid {
    /// Creates a lattice from an origin, spacing, and per-axis point counts.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidSpacing`] if `spacing` is not positive
    /// and finite, or [`GridError::EmptyDimensions`] if any axis count is
    /// zero.
    pub fn new(origin: Point3<f64>, spacing: f64, counts: [usize; 3]) -> GridResult<Self> {
        if !(spacing.is_finite() && spacing > 0.0) {
            return Err(GridError::InvalidSpacing(spacing));
        }
        if counts.contains(&0) {
            return Err(GridError::EmptyDimensions {
                nx: counts[0],
                ny: counts[1],
                nz: counts[2],
            });
        }
        Ok(Self {
            origin,
            spacing,
            counts,
        })
    }

    /// Creates the smallest padded lattice that covers a bounding box.
    ///
    /// The lattice origin sits `padding_cells * spacing` below `bounds.min`
    /// on every axis, and enough points are generated per axis that the
    /// last point lies at or beyond `bounds.max` plus the same padding.
    /// An axis of zero extent still gets `1 + 2 * padding_cells` points.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidSpacing`] if `spacing` is not positive
    /// and finite, or [`GridError::EmptyBounds`] if `bounds` is empty.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn covering(bounds: &Aabb, spacing: f64, padding_cells: usize) -> GridResult<Self> {
        if !(spacing.is_finite() && spacing > 0.0) {
            return Err(GridError::InvalidSpacing(spacing));
        }
        if bounds.is_empty() {
            return Err(GridError::EmptyBounds);
        }

        let size = bounds.size();
        let pad = padding_cells as f64;
        let origin = Point3::new(
            pad.mul_add(-spacing, bounds.min.x),
            pad.mul_add(-spacing, bounds.min.y),
            pad.mul_add(-spacing, bounds.min.z),
        );
        let count_along = |extent: f64| -> usize {
            let spans = (extent / spacing).ceil() as usize;
            spans + 1 + 2 * padding_cells
        };
        let counts = [count_along(size.x), count_along(size.y), count_along(size.z)];

        Self::new(origin, spacing, counts)
    }

    /// World position of the lattice point at integer coordinate (0, 0, 0).
    #[inline]
    #[must_use]
    pub const fn origin(&self) -> Point3<f64> {
        self.origin
    }

    /// Distance between adjacent lattice points.
    #[inline]
    #[must_use]
    pub const fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Number of lattice points along each axis.
    #[inline]
    #[must_use]
    pub const fn counts(&self) -> [usize; 3] {
        self.counts
    }

    /// Total number of lattice points.
    #[inline]
    #[must_use]
    pub const fn point_count(&self) -> usize {
        self.counts[0] * self.counts[1] * self.counts[2]
    }

    /// World position of the lattice point at integer coordinate `(i, j, k)`.
    ///
    /// Coordinates are not bounds-checked; points outside the lattice are
    /// simply extrapolated along the same spacing.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn point_at(&self, i: usize, j: usize, k: usize) -> Point3<f64> {
        Point3::new(
            (i as f64).mul_add(self.spacing, self.origin.x),
            (j as f64).mul_add(self.spacing, self.origin.y),
            (k as f64).mul_add(self.spacing, self.origin.z),
        )
    }

    /// Flat index of the point at integer coordinate `(i, j, k)`.
    #[inline]
    #[must_use]
    pub const fn linear_index(&self, i: usize, j: usize, k: usize) -> usize {
        (k * self.counts[1] + j) * self.counts[0] + i
    }

    /// Integer coordinate of the point at a flat index.
    #[inline]
    #[must_use]
    pub const fn coord_of(&self, index: usize) -> [usize; 3] {
        let nx = self.counts[0];
        let ny = self.counts[1];
        let i = index % nx;
        let j = (index / nx) % ny;
        let k = index / (nx * ny);
        [i, j, k]
    }

    /// Axis-aligned bounds spanned by the lattice points.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        let [nx, ny, nz] = self.counts;
        Aabb::new(self.origin, self.point_at(nx - 1, ny - 1, nz - 1))
    }

    /// Iterates over all lattice points in linear (x-fastest) order.
    pub fn points(&self) -> impl Iterator<Item = Point3<f64>> + '_ {
        let [nx, ny, nz] = self.counts;
        (0..nz).flat_map(move |k| {
            (0..ny).flat_map(move |j| (0..nx).map(move |i| self.point_at(i, j, k)))
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;
    use solid_types::unit_cube;

    use super::*;

    #[test]
    fn new_rejects_bad_spacing() {
        assert!(matches!(
            PointGrid::new(Point3::origin(), 0.0, [2, 2, 2]),
            Err(GridError::InvalidSpacing(_))
        ));
        assert!(matches!(
            PointGrid::new(Point3::origin(), -1.0, [2, 2, 2]),
            Err(GridError::InvalidSpacing(_))
        ));
        assert!(matches!(
            PointGrid::new(Point3::origin(), f64::NAN, [2, 2, 2]),
            Err(GridError::InvalidSpacing(_))
        ));
    }

    #[test]
    fn new_rejects_zero_counts() {
        assert!(matches!(
            PointGrid::new(Point3::origin(), 1.0, [2, 0, 2]),
            Err(GridError::EmptyDimensions { ny: 0, .. })
        ));
    }

    #[test]
    fn point_positions_follow_spacing() {
        let grid = PointGrid::new(Point3::new(1.0, 2.0, 3.0), 0.5, [4, 4, 4]).unwrap();
        assert_eq!(grid.point_at(0, 0, 0), Point3::new(1.0, 2.0, 3.0));
        assert_eq!(grid.point_at(2, 1, 3), Point3::new(2.0, 2.5, 4.5));
    }

    #[test]
    fn linear_order_is_x_fastest() {
        let grid = PointGrid::new(Point3::origin(), 1.0, [3, 4, 5]).unwrap();
        assert_eq!(grid.linear_index(0, 0, 0), 0);
        assert_eq!(grid.linear_index(1, 0, 0), 1);
        assert_eq!(grid.linear_index(0, 1, 0), 3);
        assert_eq!(grid.linear_index(0, 0, 1), 12);
        assert_eq!(grid.linear_index(2, 3, 4), grid.point_count() - 1);
    }

    #[test]
    fn coord_of_inverts_linear_index() {
        let grid = PointGrid::new(Point3::origin(), 1.0, [3, 4, 5]).unwrap();
        for index in 0..grid.point_count() {
            let [i, j, k] = grid.coord_of(index);
            assert_eq!(grid.linear_index(i, j, k), index);
        }
    }

    #[test]
    fn points_iterate_in_linear_order() {
        let grid = PointGrid::new(Point3::origin(), 1.0, [2, 2, 2]).unwrap();
        let points: Vec<_> = grid.points().collect();
        assert_eq!(points.len(), grid.point_count());
        assert_eq!(points[0], Point3::new(0.0, 0.0, 0.0));
        assert_eq!(points[1], Point3::new(1.0, 0.0, 0.0));
        assert_eq!(points[2], Point3::new(0.0, 1.0, 0.0));
        assert_eq!(points[4], Point3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn covering_grid_spans_the_bounds() {
        let cube = unit_cube();
        let bounds = cube.bounds();
        let grid = PointGrid::covering(&bounds, 0.5, 0).unwrap();

        assert_eq!(grid.counts(), [3, 3, 3]);
        assert_eq!(grid.origin(), Point3::origin());
        let span = grid.bounds();
        assert!(span.min.x <= bounds.min.x && span.max.x >= bounds.max.x);
        assert!(span.min.y <= bounds.min.y && span.max.y >= bounds.max.y);
        assert!(span.min.z <= bounds.min.z && span.max.z >= bounds.max.z);
    }

    #[test]
    fn covering_grid_applies_padding() {
        let bounds = Aabb::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0));
        let grid = PointGrid::covering(&bounds, 0.5, 2).unwrap();

        assert_eq!(grid.counts(), [7, 7, 7]);
        assert_relative_eq!(grid.origin().x, -1.0);
        let span = grid.bounds();
        assert_relative_eq!(span.max.x, 2.0);
    }

    #[test]
    fn covering_grid_handles_flat_axes() {
        let bounds = Aabb::new(Point3::origin(), Point3::new(1.0, 1.0, 0.0));
        let grid = PointGrid::covering(&bounds, 0.25, 1).unwrap();
        assert_eq!(grid.counts()[2], 3);
    }

    #[test]
    fn covering_grid_rejects_empty_bounds() {
        assert!(matches!(
            PointGrid::covering(&Aabb::empty(), 0.5, 0),
            Err(GridError::EmptyBounds)
        ));
    }

    #[test]
    fn covering_grid_rejects_bad_spacing() {
        let bounds = Aabb::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0));
        assert!(matches!(
            PointGrid::covering(&bounds, 0.0, 0),
            Err(GridError::InvalidSpacing(_))
        ));
    }
}
