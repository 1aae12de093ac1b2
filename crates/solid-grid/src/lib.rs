//! Query-point lattices and occupancy grids for volumetric classification.
//!
//! This crate provides the sampling side of a voxelization pipeline:
//!
//! - [`PointGrid`]: a regular lattice of query points described by an
//!   origin, spacing, and per-axis counts, with a fixed x-fastest linear
//!   order.
//! - [`OccupancyGrid`]: a lattice paired with one [`Containment`] result
//!   per point.
//!
//! Grids are usually built with [`PointGrid::covering`] so the lattice
//! spans a mesh's bounding box with optional padding:
//!
//! ```
//! use solid_grid::PointGrid;
//! use solid_types::unit_cube;
//!
//! let cube = unit_cube();
//! let grid = PointGrid::covering(&cube.bounds(), 0.5, 1).unwrap();
//! assert_eq!(grid.counts(), [5, 5, 5]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod grid;
mod occupancy;

pub use error::{GridError, GridResult};
pub use grid::PointGrid;
pub use occupancy::OccupancyGrid;

pub use solid_types::Containment;
