//! Point-in-solid query result.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The result of classifying one query point against a closed surface.
///
/// Most points resolve to [`Containment::Inside`] or [`Containment::Outside`].
/// [`Containment::Indeterminate`] is reserved for points the classifier could
/// not resolve confidently, typically because every candidate ray grazed a
/// shared edge or vertex, or because the surface is not actually closed.
///
/// # Example
///
/// ```
/// use solid_types::Containment;
///
/// let c = Containment::Inside;
/// assert!(c.is_inside());
/// assert!(!c.is_indeterminate());
/// assert_eq!(c.to_string(), "inside");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Containment {
    /// The point lies inside the volume bounded by the surface.
    Inside,
    /// The point lies outside the volume.
    Outside,
    /// The classifier could not resolve the point confidently.
    Indeterminate,
}

impl Containment {
    /// Check if the point was classified as inside.
    #[inline]
    #[must_use]
    pub const fn is_inside(self) -> bool {
        matches!(self, Self::Inside)
    }

    /// Check if the point was classified as outside.
    #[inline]
    #[must_use]
    pub const fn is_outside(self) -> bool {
        matches!(self, Self::Outside)
    }

    /// Check if the classifier gave up on the point.
    #[inline]
    #[must_use]
    pub const fn is_indeterminate(self) -> bool {
        matches!(self, Self::Indeterminate)
    }
}

impl fmt::Display for Containment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Inside => "inside",
            Self::Outside => "outside",
            Self::Indeterminate => "indeterminate",
        };
        f.write_str(s)
    }
}
