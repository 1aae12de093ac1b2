//! Error types for grid construction.

use thiserror::Error;

/// Result type for grid operations.
pub type GridResult<T> = Result<T, GridError>;

/// Errors that can occur while building or filling point grids.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GridError {
    /// The lattice spacing must be positive and finite.
    #[error("grid spacing must be positive and finite, got {0}")]
    InvalidSpacing(f64),

    /// Every axis needs at least one lattice point.
    #[error("invalid grid dimensions: {nx}x{ny}x{nz}")]
    EmptyDimensions {
        /// Point count along x.
        nx: usize,
        /// Point count along y.
        ny: usize,
        /// Point count along z.
        nz: usize,
    },

    /// A covering grid cannot be built over an empty bounding box.
    #[error("cannot build a covering grid over an empty bounding box")]
    EmptyBounds,

    /// Occupancy data does not match the grid it claims to fill.
    #[error("occupancy length mismatch: grid has {expected} points, got {got} values")]
    LengthMismatch {
        /// Number of lattice points in the grid.
        expected: usize,
        /// Number of values supplied.
        got: usize,
    },
}
