//! Error types for classification.

use solid_grid::GridError;
use thiserror::Error;

/// Result type for classification operations.
pub type ClassifyResult<T> = Result<T, ClassifyError>;

/// Errors that can occur while building or running a classifier.
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// Mesh has no triangles.
    #[error("mesh is empty")]
    EmptyMesh,

    /// A grid operation rejected its inputs.
    #[error(transparent)]
    Grid(#[from] GridError),
}
