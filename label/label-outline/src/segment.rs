//! Built-in sixteen-segment stencil font.
//!
//! Every segment is its own convex quad and the segments lit by any one glyph
//! never touch, so each glyph extrudes to disjoint prisms. Boolean
//! subtraction then never meets shared faces, whatever the text.
//!
//! Glyphs sit on the baseline with a cap height of 0.8 em and a stroke of
//! 0.08 em; the cell is 0.64 em wide with a 0.8 em advance.

use mesh_types::Contour;

use crate::font::{FontOutlines, Glyph};

/// Horizontal pen advance of every glyph.
pub const SEGMENT_ADVANCE: f64 = 0.8;

type Quad = [(f64, f64); 4];

const fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Quad {
    [(x0, y0), (x1, y0), (x1, y1), (x0, y1)]
}

const TOP_L: u32 = 1 << 0;
const TOP_R: u32 = 1 << 1;
const UP_R: u32 = 1 << 2;
const LO_R: u32 = 1 << 3;
const BOT_R: u32 = 1 << 4;
const BOT_L: u32 = 1 << 5;
const LO_L: u32 = 1 << 6;
const UP_L: u32 = 1 << 7;
const MID_L: u32 = 1 << 8;
const MID_R: u32 = 1 << 9;
const DIAG_UL: u32 = 1 << 10;
const UP_C: u32 = 1 << 11;
const DIAG_UR: u32 = 1 << 12;
const DIAG_LL: u32 = 1 << 13;
const LO_C: u32 = 1 << 14;
const DIAG_LR: u32 = 1 << 15;
const DOT: u32 = 1 << 16;

const TOP: u32 = TOP_L | TOP_R;
const BOT: u32 = BOT_L | BOT_R;
const MID: u32 = MID_L | MID_R;
const LEFT: u32 = UP_L | LO_L;
const RIGHT: u32 = UP_R | LO_R;
const CENTER: u32 = UP_C | LO_C;

/// Segment geometry, indexed by bit position.
const SEGMENTS: [Quad; 17] = [
    rect(0.00, 0.72, 0.30, 0.80), // TOP_L
    rect(0.34, 0.72, 0.64, 0.80), // TOP_R
    rect(0.56, 0.46, 0.64, 0.70), // UP_R
    rect(0.56, 0.10, 0.64, 0.34), // LO_R
    rect(0.34, 0.00, 0.64, 0.08), // BOT_R
    rect(0.00, 0.00, 0.30, 0.08), // BOT_L
    rect(0.00, 0.10, 0.08, 0.34), // LO_L
    rect(0.00, 0.46, 0.08, 0.70), // UP_L
    rect(0.00, 0.36, 0.30, 0.44), // MID_L
    rect(0.34, 0.36, 0.64, 0.44), // MID_R
    [(0.18, 0.46), (0.26, 0.46), (0.18, 0.70), (0.10, 0.70)], // DIAG_UL
    rect(0.28, 0.46, 0.36, 0.70), // UP_C
    [(0.38, 0.46), (0.46, 0.46), (0.54, 0.70), (0.46, 0.70)], // DIAG_UR
    [(0.10, 0.10), (0.18, 0.10), (0.26, 0.34), (0.18, 0.34)], // DIAG_LL
    rect(0.28, 0.10, 0.36, 0.34), // LO_C
    [(0.46, 0.10), (0.54, 0.10), (0.46, 0.34), (0.38, 0.34)], // DIAG_LR
    rect(0.28, 0.00, 0.36, 0.08), // DOT
];

/// Segment mask for a character, after ASCII upper-casing.
fn mask(ch: char) -> Option<u32> {
    let m = match ch.to_ascii_uppercase() {
        'A' => TOP | LEFT | RIGHT | MID,
        'B' => TOP | BOT | RIGHT | CENTER | MID_R,
        'C' => TOP | BOT | LEFT,
        'D' => TOP | BOT | RIGHT | CENTER,
        'E' => TOP | BOT | LEFT | MID_L,
        'F' => TOP | LEFT | MID_L,
        'G' => TOP | BOT | LEFT | LO_R | MID_R,
        'H' => LEFT | RIGHT | MID,
        'I' => TOP | BOT | CENTER,
        'J' => RIGHT | BOT | LO_L,
        'K' => LEFT | MID_L | DIAG_UR | DIAG_LR,
        'L' => LEFT | BOT,
        'M' => LEFT | RIGHT | DIAG_UL | DIAG_UR,
        'N' => LEFT | RIGHT | DIAG_UL | DIAG_LR,
        'O' => TOP | BOT | LEFT | RIGHT,
        'P' => TOP | LEFT | UP_R | MID,
        'Q' => TOP | BOT | LEFT | RIGHT | DIAG_LR,
        'R' => TOP | LEFT | UP_R | MID | DIAG_LR,
        'S' => TOP | BOT | UP_L | MID | LO_R,
        'T' => TOP | CENTER,
        'U' => LEFT | RIGHT | BOT,
        'V' => LEFT | DIAG_LL | DIAG_UR,
        'W' => LEFT | RIGHT | DIAG_LL | DIAG_LR,
        'X' => DIAG_UL | DIAG_UR | DIAG_LL | DIAG_LR,
        'Y' => DIAG_UL | DIAG_UR | LO_C,
        'Z' => TOP | BOT | DIAG_UR | DIAG_LL,
        '0' => TOP | BOT | LEFT | RIGHT | DIAG_UR | DIAG_LL,
        '1' => RIGHT,
        '2' => TOP | UP_R | MID | LO_L | BOT,
        '3' => TOP | RIGHT | MID | BOT,
        '4' => UP_L | MID | RIGHT,
        '5' => TOP | UP_L | MID | LO_R | BOT,
        '6' => TOP | LEFT | MID | LO_R | BOT,
        '7' => TOP | RIGHT,
        '8' => TOP | BOT | LEFT | RIGHT | MID,
        '9' => TOP | UP_L | RIGHT | MID | BOT,
        '-' => MID,
        '+' => MID | CENTER,
        '=' => MID | BOT,
        '_' => BOT,
        '/' => DIAG_UR | DIAG_LL,
        '\\' => DIAG_UL | DIAG_LR,
        '(' | '<' => DIAG_UR | DIAG_LR,
        ')' | '>' => DIAG_UL | DIAG_LL,
        '*' => CENTER | DIAG_UL | DIAG_UR | DIAG_LL | DIAG_LR,
        '$' => TOP | BOT | UP_L | MID | LO_R | CENTER,
        '\'' => UP_C,
        '"' => UP_L | UP_C,
        '!' => UP_C | DOT,
        '?' => TOP | UP_R | MID_R | DOT,
        '.' | ',' => DOT,
        ' ' => 0,
        _ => return None,
    };
    Some(m)
}

/// Stencil font that needs no font file.
///
/// Covers `A`-`Z` (either case), `0`-`9` and common punctuation. Characters
/// outside that set report no glyph.
///
/// # Example
///
/// ```
/// use label_outline::{FontOutlines, SegmentFont};
///
/// let font = SegmentFont;
/// let h = font.glyph('H').unwrap();
/// assert_eq!(h.contours.len(), 6);
/// assert!(font.glyph('~').is_none());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SegmentFont;

impl FontOutlines for SegmentFont {
    fn glyph(&self, ch: char) -> Option<Glyph> {
        let mask = mask(ch)?;
        let contours = SEGMENTS
            .iter()
            .enumerate()
            .filter(|(bit, _)| mask & (1 << bit) != 0)
            .map(|(_, quad)| Contour::from_xy(quad))
            .collect();
        Some(Glyph {
            contours,
            advance: SEGMENT_ADVANCE,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use mesh_types::Point2;

    #[test]
    fn every_segment_is_ccw_and_inside_cell() {
        for quad in &SEGMENTS {
            let c = Contour::from_xy(quad);
            assert!(c.is_ccw(), "{quad:?}");
            let b = c.bounds();
            assert!(b.min.x >= 0.0 && b.max.x <= 0.64);
            assert!(b.min.y >= 0.0 && b.max.y <= 0.80);
        }
    }

    #[test]
    fn lit_segments_never_overlap() {
        let charset = ('A'..='Z').chain('0'..='9').chain("-+=_/\\()<>*$'\"!?.,".chars());
        for ch in charset {
            let contours = SegmentFont.glyph(ch).unwrap().contours;
            for (i, a) in contours.iter().enumerate() {
                for (j, b) in contours.iter().enumerate() {
                    if i == j {
                        continue;
                    }
                    // Convex quads overlap only if a vertex or the centroid of
                    // one falls inside the other.
                    let centroid = b
                        .points()
                        .iter()
                        .fold(Point2::origin(), |acc, p| acc + p.coords / 4.0);
                    assert!(!a.contains_point(&centroid), "{ch}: {i} and {j}");
                    for p in b.points() {
                        assert!(!a.contains_point(p), "{ch}: {i} and {j}");
                    }
                }
            }
        }
    }

    #[test]
    fn letters_and_digits_are_covered() {
        for ch in ('A'..='Z').chain('a'..='z').chain('0'..='9') {
            let g = SegmentFont.glyph(ch).unwrap();
            assert!(!g.contours.is_empty(), "{ch}");
        }
    }

    #[test]
    fn space_is_blank_with_advance() {
        let g = SegmentFont.glyph(' ').unwrap();
        assert!(g.contours.is_empty());
        assert_eq!(g.advance, SEGMENT_ADVANCE);
    }

    #[test]
    fn unknown_characters_have_no_glyph() {
        assert!(SegmentFont.glyph('€').is_none());
        assert!(SegmentFont.glyph('@').is_none());
    }
}
