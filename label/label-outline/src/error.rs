//! Error types for outline extraction.

use thiserror::Error;

/// Result type for outline operations.
pub type OutlineResult<T> = Result<T, OutlineError>;

/// Errors raised while reading font or markup data.
///
/// The public extraction entry points absorb these and return an empty
/// shape set; they surface only from the lower-level constructors.
#[derive(Debug, Error)]
pub enum OutlineError {
    /// Font bytes could not be parsed.
    #[error("invalid font data: {0}")]
    InvalidFont(String),

    /// Markup is not well-formed XML/SVG.
    #[error("malformed markup: {0}")]
    MalformedMarkup(String),

    /// A `d` attribute or shape attribute could not be interpreted.
    #[error("malformed path: {0}")]
    MalformedPath(String),

    /// IO error while reading a font or markup file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
