//! Numeric tolerances for ray casting.

/// Tolerances controlling ray-triangle tests.
///
/// The defaults suit meshes with coordinates of roughly unit magnitude
/// (millimeter-scale parts in mm units). Meshes at extreme scales may
/// need a wider or narrower `boundary` band.
///
/// # Example
///
/// ```
/// use solid_classify::Tolerances;
///
/// let defaults = Tolerances::default();
/// assert!(defaults.boundary > 0.0);
///
/// let loose = Tolerances::default().boundary(1e-6);
/// assert!((loose.boundary - 1e-6).abs() < 1e-18);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    /// Determinant magnitude below which a ray counts as parallel to a
    /// triangle's plane. Also rejects degenerate triangles.
    pub parallel: f64,

    /// Ray parameter at or below which a plane crossing is discarded.
    /// Keeps a point sitting on the surface from counting the triangle
    /// it sits on.
    pub t_min: f64,

    /// Half-width of the barycentric band around triangle edges and
    /// vertices treated as grazing. Measured in barycentric units, not
    /// world distance.
    pub boundary: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            parallel: 1e-10,
            t_min: 1e-10,
            boundary: 1e-9,
        }
    }
}

impl Tolerances {
    /// Create tolerances from explicit values.
    #[must_use]
    pub const fn new(parallel: f64, t_min: f64, boundary: f64) -> Self {
        Self {
            parallel,
            t_min,
            boundary,
        }
    }

    /// Set the parallel-ray determinant cutoff.
    #[must_use]
    pub const fn parallel(mut self, parallel: f64) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the minimum accepted ray parameter.
    #[must_use]
    pub const fn t_min(mut self, t_min: f64) -> Self {
        self.t_min = t_min;
        self
    }

    /// Set the grazing band half-width.
    #[must_use]
    pub const fn boundary(mut self, boundary: f64) -> Self {
        self.boundary = boundary;
        self
    }
}
