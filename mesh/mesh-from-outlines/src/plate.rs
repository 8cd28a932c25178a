//! Rounded-rectangle base plates.

use std::f64::consts::FRAC_PI_2;

use mesh_types::{Contour, Point2, Shape, TriangleSoup};
use tracing::debug;

use crate::error::{ExtrudeError, ExtrudeResult};
use crate::extrude::{Extruder, PrismExtruder};

/// Default number of segments per rounded corner.
pub const DEFAULT_CORNER_SEGMENTS: usize = 10;

/// Configuration for a base plate.
///
/// # Example
///
/// ```
/// use mesh_from_outlines::PlateConfig;
/// use mesh_types::MeshBounds;
///
/// let plate = PlateConfig::new(45.0, 15.0)
///     .with_thickness(1.6)
///     .with_corner_radius(1.2)
///     .build()
///     .unwrap();
///
/// let b = plate.bounds();
/// assert!((b.width() - 45.0).abs() < 1e-12);
/// assert!((b.depth() - 1.6).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct PlateConfig {
    /// Footprint width (X) in mm.
    pub width: f64,
    /// Footprint height (Y) in mm.
    pub height: f64,
    /// Plate thickness (Z) in mm.
    pub thickness: f64,
    /// Corner radius in mm, clamped to half the shorter side.
    pub corner_radius: f64,
    /// Segments per quarter-circle corner.
    pub corner_segments: usize,
}

impl PlateConfig {
    /// A plate of the given footprint with 1.6 mm thickness and 1.2 mm corners.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            thickness: 1.6,
            corner_radius: 1.2,
            corner_segments: DEFAULT_CORNER_SEGMENTS,
        }
    }

    /// Set the thickness.
    #[must_use]
    pub fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = thickness;
        self
    }

    /// Set the corner radius.
    #[must_use]
    pub fn with_corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = radius;
        self
    }

    /// Set the segments per corner.
    #[must_use]
    pub fn with_corner_segments(mut self, segments: usize) -> Self {
        self.corner_segments = segments;
        self
    }

    /// Build the plate solid.
    ///
    /// # Errors
    ///
    /// Returns an error if the footprint or thickness is not positive and
    /// finite, or if `corner_segments` is zero.
    pub fn build(&self) -> ExtrudeResult<TriangleSoup> {
        if !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
        {
            return Err(ExtrudeError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.corner_segments == 0 {
            return Err(ExtrudeError::TooFewSegments {
                min: 1,
                actual: self.corner_segments,
            });
        }

        let outline = rounded_rect(
            self.width,
            self.height,
            self.corner_radius,
            self.corner_segments,
        );
        let soup = PrismExtruder.extrude(&[Shape::solid(outline)], self.thickness)?;
        debug!(
            width = self.width,
            height = self.height,
            triangles = soup.len(),
            "built base plate"
        );
        Ok(soup)
    }
}

/// Build a closed rounded-rectangle slab occupying
/// `[0, width] x [0, height] x [0, thickness]`.
///
/// The corner radius is clamped to `[0, min(width, height) / 2]`.
///
/// # Errors
///
/// Returns an error if any dimension is not positive and finite.
pub fn build_base_plate(
    width: f64,
    height: f64,
    thickness: f64,
    corner_radius: f64,
) -> ExtrudeResult<TriangleSoup> {
    PlateConfig::new(width, height)
        .with_thickness(thickness)
        .with_corner_radius(corner_radius)
        .build()
}

/// Counter-clockwise rounded rectangle outline with its lower-left corner at
/// the origin.
///
/// Each corner is a quarter circle sampled with `segments` chords. A radius of
/// zero (or less) yields a plain four-point rectangle.
///
/// # Example
///
/// ```
/// use mesh_from_outlines::rounded_rect;
///
/// let sharp = rounded_rect(10.0, 5.0, 0.0, 10);
/// assert_eq!(sharp.len(), 4);
///
/// let round = rounded_rect(10.0, 5.0, 1.0, 10);
/// assert_eq!(round.len(), 44);
/// assert!(round.is_ccw());
/// ```
#[must_use]
pub fn rounded_rect(width: f64, height: f64, radius: f64, segments: usize) -> Contour {
    let r = radius.max(0.0).min(width.min(height) / 2.0);
    if r <= 0.0 || segments == 0 {
        return Contour::from_xy(&[(0.0, 0.0), (width, 0.0), (width, height), (0.0, height)]);
    }

    // Corner centers in CCW order, starting bottom-right, with the start angle
    // of each quarter arc.
    let corners = [
        (width - r, r, -FRAC_PI_2),
        (width - r, height - r, 0.0),
        (r, height - r, FRAC_PI_2),
        (r, r, 2.0 * FRAC_PI_2),
    ];

    let mut points = Vec::with_capacity(4 * (segments + 1));
    for (cx, cy, start) in corners {
        for i in 0..=segments {
            #[allow(clippy::cast_precision_loss)]
            let angle = start + FRAC_PI_2 * (i as f64) / (segments as f64);
            points.push(Point2::new(cx + r * angle.cos(), cy + r * angle.sin()));
        }
    }
    Contour::new(points)
}
