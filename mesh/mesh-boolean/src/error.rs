//! Error types for boolean operations.

use thiserror::Error;

/// Errors that can occur during boolean operations.
#[derive(Debug, Error)]
pub enum BooleanError {
    /// One of the input soups has no triangles.
    #[error("empty mesh: {details}")]
    EmptyMesh {
        /// Description of which mesh is empty.
        details: String,
    },

    /// An input soup does not enclose a volume.
    #[error("degenerate mesh: {details}")]
    DegenerateMesh {
        /// Description of the degeneracy.
        details: String,
    },

    /// The subtraction produced an unusable solid.
    #[error("degenerate result: {details}")]
    DegenerateResult {
        /// What went wrong with the output.
        details: String,
    },
}

/// Result type for boolean operations.
pub type BooleanResult<T> = Result<T, BooleanError>;
