//! Classified occupancy grids.

use nalgebra::Point3;
use solid_types::Containment;

use crate::error::{GridError, GridResult};
use crate::grid::PointGrid;

/// A [`PointGrid`] paired with one [`Containment`] value per lattice point.
///
/// Values are stored flat in the grid's linear (x-fastest) order, so the
/// value at flat index `n` belongs to the point `grid.coord_of(n)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OccupancyGrid {
    grid: PointGrid,
    values: Vec<Containment>,
}

impl OccupancyGrid {
    /// Pairs a lattice with its per-point containment results.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::LengthMismatch`] if `values` does not hold
    /// exactly one entry per lattice point.
    pub fn from_parts(grid: PointGrid, values: Vec<Containment>) -> GridResult<Self> {
        if values.len() != grid.point_count() {
            return Err(GridError::LengthMismatch {
                expected: grid.point_count(),
                got: values.len(),
            });
        }
        Ok(Self { grid, values })
    }

    /// The underlying point lattice.
    #[inline]
    #[must_use]
    pub const fn grid(&self) -> &PointGrid {
        &self.grid
    }

    /// Containment of the point at integer coordinate `(i, j, k)`, or
    /// `None` when the coordinate lies outside the lattice.
    #[must_use]
    pub fn get(&self, i: usize, j: usize, k: usize) -> Option<Containment> {
        let [nx, ny, nz] = self.grid.counts();
        if i >= nx || j >= ny || k >= nz {
            return None;
        }
        Some(self.values[self.grid.linear_index(i, j, k)])
    }

    /// All containment values in linear (x-fastest) order.
    #[inline]
    #[must_use]
    pub fn values(&self) -> &[Containment] {
        &self.values
    }

    /// Number of points classified as inside.
    #[must_use]
    pub fn inside_count(&self) -> usize {
        self.values.iter().filter(|c| c.is_inside()).count()
    }

    /// Number of points classified as outside.
    #[must_use]
    pub fn outside_count(&self) -> usize {
        self.values.iter().filter(|c| c.is_outside()).count()
    }

    /// Number of points whose classification did not resolve.
    #[must_use]
    pub fn indeterminate_count(&self) -> usize {
        self.values.iter().filter(|c| c.is_indeterminate()).count()
    }

    /// Fraction of lattice points classified as inside.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn inside_fraction(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.inside_count() as f64 / self.values.len() as f64
    }

    /// Iterates over `(point, containment)` pairs in linear order.
    pub fn iter(&self) -> impl Iterator<Item = (Point3<f64>, Containment)> + '_ {
        self.grid.points().zip(self.values.iter().copied())
    }
}
