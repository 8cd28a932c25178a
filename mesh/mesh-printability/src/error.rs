//! Error types for mesh validation.

use mesh_io::IoError;
use thiserror::Error;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Reasons a serialized mesh is rejected for printing.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The buffer could not be parsed as binary STL.
    #[error("STL could not be parsed: {0}")]
    Decode(#[from] IoError),

    /// The mesh has no triangles, so no bounding box exists.
    #[error("STL validation failed: mesh has no bounding box (0 triangles)")]
    MissingBounds,

    /// A bounding-box dimension is zero, negative, or not finite.
    #[error(
        "STL validation failed: degenerate bounding box {width:.3} x {height:.3} x {depth:.3} mm"
    )]
    DegenerateBounds {
        /// Measured extent along X.
        width: f64,
        /// Measured extent along Y.
        height: f64,
        /// Measured extent along Z.
        depth: f64,
    },

    /// Fewer triangles than the configured minimum.
    #[error("STL validation failed: {count} triangles, expected at least {min}")]
    TooFewTriangles {
        /// Measured triangle count.
        count: usize,
        /// Required minimum.
        min: usize,
    },
}
