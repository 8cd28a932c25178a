//! Error types for label synthesis.

use mesh_boolean::BooleanError;
use mesh_from_outlines::ExtrudeError;
use mesh_io::IoError;
use mesh_printability::ValidationError;
use thiserror::Error;

/// Result type for label synthesis.
pub type LabelResult<T> = Result<T, LabelError>;

/// Errors that abort a label export.
///
/// Missing or unusable artwork is not an error; the feature is left out and
/// the plate is still produced. What remains here is either a caller mistake
/// caught before synthesis or a failure of the geometry itself.
#[derive(Debug, Error)]
pub enum LabelError {
    /// Geometry constants that cannot produce a printable label.
    #[error("invalid label configuration: {0}")]
    InvalidConfig(String),

    /// Icon position outside `left`, `right`, `top`.
    #[error("unknown icon position '{0}' (expected left, right or top)")]
    UnknownIconPosition(String),

    /// Relief mode outside `emboss`, `deboss`.
    #[error("unknown relief mode '{0}' (expected emboss or deboss)")]
    UnknownReliefMode(String),

    /// The plate or a feature could not be extruded.
    #[error("extrusion failed: {0}")]
    Extrude(#[from] ExtrudeError),

    /// Deboss subtraction did not produce a usable solid.
    #[error("boolean subtraction failed: {0}")]
    Boolean(#[from] BooleanError),

    /// The serialized mesh failed round-trip validation.
    #[error("export validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Serialization or file output failed.
    #[error("mesh output failed: {0}")]
    Io(#[from] IoError),
}
