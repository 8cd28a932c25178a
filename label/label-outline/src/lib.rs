//! Outline extraction for label features.
//!
//! Turns the two kinds of label artwork into planar [`Shape`]s ready for
//! extrusion: a line of text rendered through a font, and a vector icon given
//! as SVG markup. Shapes come out at their native size (one unit per em for
//! text, markup units for icons); fitting them to a layout box happens later.
//!
//! # Fonts
//!
//! Fonts are passed explicitly as `&dyn FontOutlines`, loaded once and
//! shared read-only between concurrent generations.
//!
//! - [`TrueTypeFont`] reads TrueType/OpenType data through `ttf-parser`
//! - [`SegmentFont`] is a built-in stencil font needing no font file
//!
//! # Example
//!
//! ```
//! use label_outline::{SegmentFont, text_to_shapes, vector_markup_to_shapes};
//!
//! let text = text_to_shapes("BOLTS", &SegmentFont);
//! assert!(!text.is_empty());
//!
//! let icon = vector_markup_to_shapes(r#"<svg><circle cx="12" cy="12" r="10"/></svg>"#);
//! assert_eq!(icon.len(), 1);
//!
//! // Missing artwork is not an error; the feature is just left out.
//! assert!(vector_markup_to_shapes("").is_empty());
//! ```
//!
//! [`Shape`]: mesh_types::Shape

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod curve;
mod error;
mod font;
mod markup;
mod segment;
mod text;

pub use curve::CURVE_STEPS;
pub use error::{OutlineError, OutlineResult};
pub use font::{FontOutlines, Glyph, MISSING_GLYPH_ADVANCE, TrueTypeFont};
pub use markup::{parse_markup, vector_markup_to_shapes};
pub use segment::{SEGMENT_ADVANCE, SegmentFont};
pub use text::text_to_shapes;
