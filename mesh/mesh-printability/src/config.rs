//! Validation thresholds.
//!
//! Two presets cover the pipeline's needs:
//!
//! - [`ValidationConfig::export()`] - Full label export, at least 100 triangles
//! - [`ValidationConfig::sanity()`] - Lightweight check, at least 1 triangle

/// Triangle floor for a complete label export.
pub const EXPORT_MIN_TRIANGLES: usize = 100;

/// Thresholds applied by [`validate_stl`](crate::validate_stl).
///
/// # Example
///
/// ```
/// use mesh_printability::ValidationConfig;
///
/// assert_eq!(ValidationConfig::export().min_triangles, 100);
/// assert_eq!(ValidationConfig::sanity().min_triangles, 1);
///
/// let custom = ValidationConfig::default().with_min_triangles(12);
/// assert_eq!(custom.min_triangles, 12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Minimum triangle count for a viable mesh.
    pub min_triangles: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self::export()
    }
}

impl ValidationConfig {
    /// Threshold for full-label export.
    #[must_use]
    pub const fn export() -> Self {
        Self {
            min_triangles: EXPORT_MIN_TRIANGLES,
        }
    }

    /// Loose threshold for quick sanity checks.
    #[must_use]
    pub const fn sanity() -> Self {
        Self { min_triangles: 1 }
    }

    /// Set the minimum triangle count.
    #[must_use]
    pub const fn with_min_triangles(mut self, min_triangles: usize) -> Self {
        self.min_triangles = min_triangles;
        self
    }
}
