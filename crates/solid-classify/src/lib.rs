//! Point-in-volume classification for triangle meshes.
//!
//! Decides whether 3D points lie inside a closed triangle mesh. Each
//! point casts a ray and counts forward crossings with the surface: odd
//! parity means inside. A bounding volume hierarchy prunes the triangle
//! tests, and batches classify in parallel.
//!
//! Rays that pass exactly through a triangle edge or vertex would make
//! the crossing count unreliable, so such casts are detected and retried
//! along a different fixed direction. A point whose casts all graze
//! reports [`Containment::Indeterminate`] instead of a silently wrong
//! answer.
//!
//! # Example
//!
//! ```
//! use nalgebra::Point3;
//! use solid_classify::VolumeClassifier;
//! use solid_types::{unit_cube, Containment};
//!
//! let classifier = VolumeClassifier::new(unit_cube()).unwrap();
//!
//! let results = classifier.classify_points(&[
//!     Point3::new(0.5, 0.25, 0.5),
//!     Point3::new(5.0, 5.0, 5.0),
//! ]);
//!
//! assert_eq!(results, vec![Containment::Inside, Containment::Outside]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bvh;
mod classifier;
mod error;
mod intersect;
mod ray;
mod tolerances;

pub use classifier::VolumeClassifier;
pub use error::{ClassifyError, ClassifyResult};
pub use intersect::{intersect_ray_triangle, RayHit, TriangleHit};
pub use ray::Ray;
pub use tolerances::Tolerances;

pub use solid_types::Containment;
