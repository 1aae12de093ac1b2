//! STL file I/O for solidcast.
//!
//! Loads and saves triangle-soup meshes in the STL (stereolithography)
//! format, binary and ASCII, with automatic variant detection on load.
//!
//! The classification engine consumes plain triangle lists, so this crate
//! flattens every facet to a [`solid_types::Triangle`] and never tries to
//! reconstruct shared vertices.
//!
//! # Example
//!
//! ```no_run
//! use solid_io::{load_stl, save_stl};
//!
//! let mesh = load_stl("part.stl").unwrap();
//! println!(
//!     "{} triangles, area {:.3}, volume {:.3}",
//!     mesh.triangle_count(),
//!     mesh.surface_area(),
//!     mesh.volume(),
//! );
//! save_stl(&mesh, "copy.stl", true).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod stl;

pub use error::{IoError, IoResult};
pub use stl::{load_stl, save_stl};
