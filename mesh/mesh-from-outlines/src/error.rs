//! Error types for mesh-from-outlines operations.

use thiserror::Error;

/// Result type for mesh-from-outlines operations.
pub type ExtrudeResult<T> = Result<T, ExtrudeError>;

/// Errors that can occur during outline-to-mesh operations.
#[derive(Debug, Error)]
pub enum ExtrudeError {
    /// Extrusion depth is zero, negative, or not finite.
    #[error("invalid extrusion depth: {0}")]
    InvalidDepth(f64),

    /// Plate footprint is zero, negative, or not finite.
    #[error("invalid plate dimensions: {width} x {height}")]
    InvalidDimensions {
        /// Requested width.
        width: f64,
        /// Requested height.
        height: f64,
    },

    /// Segments count is too low.
    #[error("segments must be at least {min}, got {actual}")]
    TooFewSegments {
        /// Minimum required segments.
        min: usize,
        /// Actual segment count.
        actual: usize,
    },

    /// A shape could not be triangulated.
    #[error("triangulation failed: {details}")]
    Triangulation {
        /// What went wrong.
        details: String,
    },
}
