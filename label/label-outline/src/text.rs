//! Text to planar shapes.

use mesh_types::{Point2, Shape, group_contours};
use tracing::debug;

use crate::font::{FontOutlines, MISSING_GLYPH_ADVANCE};

/// Convert a line of text into filled shapes at a size of 1 unit per em.
///
/// The text is trimmed first; empty text yields no shapes. Glyphs are laid
/// out left to right from the origin along the baseline (Y up). Each glyph's
/// rings are grouped into outer boundaries and holes independently, so
/// adjacent glyphs never steal each other's counters. Characters the font
/// cannot supply advance the pen by [`MISSING_GLYPH_ADVANCE`] and leave a gap.
///
/// # Example
///
/// ```
/// use label_outline::{SegmentFont, text_to_shapes};
///
/// assert!(text_to_shapes("   ", &SegmentFont).is_empty());
///
/// // H lights six separate segments, I lights six more.
/// let shapes = text_to_shapes(" HI ", &SegmentFont);
/// assert_eq!(shapes.len(), 12);
/// ```
#[must_use]
pub fn text_to_shapes(text: &str, font: &dyn FontOutlines) -> Vec<Shape> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    let mut shapes = Vec::new();
    let mut cursor = 0.0;
    for ch in text.chars().filter(|c| !c.is_control()) {
        let Some(glyph) = font.glyph(ch) else {
            debug!(?ch, "no glyph, leaving a gap");
            cursor += MISSING_GLYPH_ADVANCE;
            continue;
        };

        let offset = cursor;
        let contours = glyph
            .contours
            .iter()
            .map(|c| c.map_points(|p| Point2::new(p.x + offset, p.y)))
            .collect();
        shapes.extend(group_contours(contours));
        cursor += glyph.advance;
    }

    debug!(chars = text.chars().count(), shapes = shapes.len(), advance = cursor, "text outlined");
    shapes
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::font::Glyph;
    use crate::segment::{SEGMENT_ADVANCE, SegmentFont};
    use approx::assert_relative_eq;
    use mesh_types::{Contour, shapes_bounds};

    /// Font whose only glyph is an "O": a square with a square counter.
    struct RingFont;

    impl FontOutlines for RingFont {
        fn glyph(&self, ch: char) -> Option<Glyph> {
            (ch == 'O').then(|| Glyph {
                contours: vec![
                    Contour::from_xy(&[(0.0, 0.0), (0.6, 0.0), (0.6, 0.7), (0.0, 0.7)]),
                    Contour::from_xy(&[(0.2, 0.2), (0.2, 0.5), (0.4, 0.5), (0.4, 0.2)]),
                ],
                advance: 0.7,
            })
        }
    }

    #[test]
    fn empty_and_blank_text_yield_nothing() {
        assert!(text_to_shapes("", &SegmentFont).is_empty());
        assert!(text_to_shapes(" \t\n ", &SegmentFont).is_empty());
    }

    #[test]
    fn glyphs_advance_along_x() {
        let shapes = text_to_shapes("II", &SegmentFont);
        let b = shapes_bounds(&shapes);
        assert_relative_eq!(b.min.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(b.max.x, SEGMENT_ADVANCE + 0.64, epsilon = 1e-12);
        assert_relative_eq!(b.max.y, 0.8, epsilon = 1e-12);
    }

    #[test]
    fn counters_become_holes_per_glyph() {
        let shapes = text_to_shapes("OO", &RingFont);
        assert_eq!(shapes.len(), 2);
        for s in &shapes {
            assert_eq!(s.holes().len(), 1);
        }
        assert_relative_eq!(shapes[1].bounds().min.x, 0.7, epsilon = 1e-12);
    }

    #[test]
    fn missing_glyphs_leave_a_gap() {
        let shapes = text_to_shapes("O?O", &RingFont);
        assert_eq!(shapes.len(), 2);
        assert_relative_eq!(
            shapes[1].bounds().min.x,
            0.7 + MISSING_GLYPH_ADVANCE,
            epsilon = 1e-12
        );
    }

    #[test]
    fn text_of_only_unknown_glyphs_is_empty() {
        assert!(text_to_shapes("???", &RingFont).is_empty());
    }

    #[test]
    fn outlining_is_deterministic() {
        let a = text_to_shapes("BOLTS 42", &SegmentFont);
        let b = text_to_shapes("BOLTS 42", &SegmentFont);
        assert_eq!(a, b);
    }
}
