//! Core geometry types for solidcast.
//!
//! This crate provides the foundational vocabulary shared by the rest of the
//! workspace:
//!
//! - [`Triangle`] - A triangle with concrete vertex positions
//! - [`TriMesh`] - A triangle-soup surface mesh
//! - [`Aabb`] - Axis-aligned bounding box
//! - [`Containment`] - The tri-state result of a point-in-solid query
//!
//! # Coordinate System
//!
//! Right-handed, unit-agnostic, all coordinates `f64`. Face winding is
//! **counter-clockwise when viewed from outside**, so normals point outward
//! by the right-hand rule. Signed volume is positive for a closed surface
//! with that orientation.
//!
//! # Example
//!
//! ```
//! use solid_types::{unit_cube, Point3};
//!
//! let cube = unit_cube();
//! assert_eq!(cube.triangle_count(), 12);
//! assert!((cube.volume() - 1.0).abs() < 1e-12);
//! assert!(cube.bounds().contains(&Point3::new(0.5, 0.5, 0.5)));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bounds;
mod containment;
mod mesh;
mod triangle;

pub use bounds::Aabb;
pub use containment::Containment;
pub use mesh::{unit_cube, TriMesh};
pub use triangle::Triangle;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
