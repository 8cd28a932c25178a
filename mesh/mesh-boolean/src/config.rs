//! Configuration and presets for boolean operations.
//!
//! # Presets
//!
//! - [`BooleanConfig::default()`] - Balanced settings for millimeter-scale parts
//! - [`BooleanConfig::precise()`] - Tighter classification, wider plane search
//! - [`BooleanConfig::fast()`] - Smaller plane search for quick previews
//!
//! # Example
//!
//! ```
//! use mesh_boolean::BooleanConfig;
//!
//! let config = BooleanConfig::default()
//!     .with_classification_tolerance(1e-6)
//!     .with_plane_sample_size(32);
//! assert_eq!(config.plane_sample_size, 32);
//! ```

/// Configuration for BSP boolean operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BooleanConfig {
    /// Distance within which a point counts as lying on a splitting plane.
    pub classification_tolerance: f64,

    /// Number of leading polygons tried as candidate splitting planes when
    /// building each tree node.
    pub plane_sample_size: usize,

    /// Slack allowed when checking that the result stays inside the base.
    pub bounds_tolerance: f64,

    /// Vertices of the result closer than this are merged, and edges passing
    /// within this distance of a vertex are split there.
    pub weld_tolerance: f64,
}

impl Default for BooleanConfig {
    fn default() -> Self {
        Self {
            classification_tolerance: 1e-5,
            plane_sample_size: 20,
            bounds_tolerance: 1e-4,
            weld_tolerance: 1e-3,
        }
    }
}

impl BooleanConfig {
    /// Tighter tolerances for small, detailed geometry.
    #[must_use]
    pub fn precise() -> Self {
        Self {
            classification_tolerance: 1e-7,
            plane_sample_size: 40,
            bounds_tolerance: 1e-6,
            weld_tolerance: 1e-5,
        }
    }

    /// Fewer candidate planes; trees are less balanced but build faster.
    #[must_use]
    pub fn fast() -> Self {
        Self {
            plane_sample_size: 8,
            ..Self::default()
        }
    }

    /// Set the on-plane classification tolerance.
    #[must_use]
    pub const fn with_classification_tolerance(mut self, tolerance: f64) -> Self {
        self.classification_tolerance = tolerance;
        self
    }

    /// Set how many candidate splitting planes are scored per node.
    ///
    /// Values below 1 are treated as 1.
    #[must_use]
    pub fn with_plane_sample_size(mut self, size: usize) -> Self {
        self.plane_sample_size = size.max(1);
        self
    }

    /// Set the result bounds slack.
    #[must_use]
    pub const fn with_bounds_tolerance(mut self, tolerance: f64) -> Self {
        self.bounds_tolerance = tolerance;
        self
    }

    /// Set the seam weld distance. Zero leaves cut seams as clipped.
    #[must_use]
    pub const fn with_weld_tolerance(mut self, tolerance: f64) -> Self {
        self.weld_tolerance = tolerance;
        self
    }
}
