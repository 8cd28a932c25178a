//! Font outline sources.

use std::path::Path;

use mesh_types::{Contour, Point2};
use ttf_parser::{Face, OutlineBuilder};
use tracing::debug;

use crate::curve::{CURVE_STEPS, cubic, quadratic};
use crate::error::{OutlineError, OutlineResult};

/// Pen advance used for characters a font cannot supply, in em units.
pub const MISSING_GLYPH_ADVANCE: f64 = 0.3;

/// Outline of one character at a size of 1 unit per em.
///
/// Contours use a Y-up frame with the pen origin on the baseline at `x = 0`.
/// Their winding is unspecified; nesting decides which are holes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Glyph {
    /// Closed outline rings.
    pub contours: Vec<Contour>,
    /// Horizontal pen advance after this glyph.
    pub advance: f64,
}

impl Glyph {
    /// A glyph with no ink, such as a space.
    #[must_use]
    pub const fn blank(advance: f64) -> Self {
        Self {
            contours: Vec::new(),
            advance,
        }
    }
}

/// Read-only source of glyph outlines.
///
/// Implementations are loaded once and shared between concurrent label
/// generations, so they must be `Send + Sync` and immutable.
pub trait FontOutlines: Send + Sync {
    /// Outline for `ch`, or `None` if the font has no glyph for it.
    fn glyph(&self, ch: char) -> Option<Glyph>;
}

/// TrueType/OpenType font backed by `ttf-parser`.
///
/// The face is re-parsed on every lookup, which only reads table offsets and
/// keeps this type free of self-references.
///
/// # Example
///
/// ```no_run
/// use label_outline::{text_to_shapes, TrueTypeFont};
///
/// let font = TrueTypeFont::from_file("fonts/DejaVuSans-Bold.ttf").unwrap();
/// let shapes = text_to_shapes("BOLTS", &font);
/// assert!(!shapes.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct TrueTypeFont {
    data: Vec<u8>,
    units_per_em: u16,
    curve_steps: usize,
}

impl TrueTypeFont {
    /// Parse font bytes (face index 0).
    ///
    /// # Errors
    ///
    /// Returns [`OutlineError::InvalidFont`] if the bytes are not a font or
    /// report zero units per em.
    pub fn from_bytes(data: Vec<u8>) -> OutlineResult<Self> {
        let units_per_em = {
            let face =
                Face::parse(&data, 0).map_err(|e| OutlineError::InvalidFont(e.to_string()))?;
            face.units_per_em()
        };
        if units_per_em == 0 {
            return Err(OutlineError::InvalidFont("zero units per em".to_string()));
        }
        debug!(bytes = data.len(), units_per_em, "loaded font");
        Ok(Self {
            data,
            units_per_em,
            curve_steps: CURVE_STEPS,
        })
    }

    /// Read and parse a font file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> OutlineResult<Self> {
        Self::from_bytes(std::fs::read(path)?)
    }

    /// Set the number of segments each curve is flattened into.
    #[must_use]
    pub fn with_curve_steps(mut self, steps: usize) -> Self {
        self.curve_steps = steps.max(1);
        self
    }

    /// Design units per em of the face.
    #[must_use]
    pub const fn units_per_em(&self) -> u16 {
        self.units_per_em
    }
}

impl FontOutlines for TrueTypeFont {
    fn glyph(&self, ch: char) -> Option<Glyph> {
        let face = Face::parse(&self.data, 0).ok()?;
        let id = face.glyph_index(ch)?;
        let scale = 1.0 / f64::from(self.units_per_em);
        let advance = face
            .glyph_hor_advance(id)
            .map_or(MISSING_GLYPH_ADVANCE, |a| f64::from(a) * scale);

        let mut flattener = OutlineFlattener::new(scale, self.curve_steps);
        // `None` means the glyph has no outline (e.g. a space).
        let _ = face.outline_glyph(id, &mut flattener);
        Some(Glyph {
            contours: flattener.finish(),
            advance,
        })
    }
}

/// Collects flattened contours from `ttf-parser` outline callbacks.
pub(crate) struct OutlineFlattener {
    scale: f64,
    steps: usize,
    contours: Vec<Contour>,
    current: Vec<Point2<f64>>,
    last: Point2<f64>,
}

impl OutlineFlattener {
    pub(crate) fn new(scale: f64, steps: usize) -> Self {
        Self {
            scale,
            steps,
            contours: Vec::new(),
            current: Vec::new(),
            last: Point2::origin(),
        }
    }

    #[inline]
    fn tx(&self, x: f32, y: f32) -> Point2<f64> {
        Point2::new(f64::from(x) * self.scale, f64::from(y) * self.scale)
    }

    /// Glyph data always closes its contours, so a dangling subpath is
    /// closed implicitly.
    fn flush(&mut self) {
        if self.current.len() >= 3 {
            let contour = Contour::new(std::mem::take(&mut self.current));
            if !contour.is_degenerate() {
                self.contours.push(contour);
            }
        }
        self.current.clear();
    }

    pub(crate) fn finish(mut self) -> Vec<Contour> {
        self.flush();
        self.contours
    }
}

impl OutlineBuilder for OutlineFlattener {
    fn move_to(&mut self, x: f32, y: f32) {
        self.flush();
        let p = self.tx(x, y);
        self.current.push(p);
        self.last = p;
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.tx(x, y);
        self.current.push(p);
        self.last = p;
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let c = self.tx(x1, y1);
        let p = self.tx(x, y);
        self.current.extend(quadratic(self.last, c, p, self.steps));
        self.last = p;
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let c1 = self.tx(x1, y1);
        let c2 = self.tx(x2, y2);
        let p = self.tx(x, y);
        self.current.extend(cubic(self.last, c1, c2, p, self.steps));
        self.last = p;
    }

    fn close(&mut self) {
        self.flush();
    }
}
