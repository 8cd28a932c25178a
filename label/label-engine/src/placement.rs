//! Fitting feature outlines into layout boxes and lifting them to 3D.
//!
//! Outlines arrive at their native size. Fitting scales them uniformly to
//! [`FIT_MARGIN`] of the target box, centers them, and converts from layout
//! space (Y down) to mesh space (Y up, origin at the label's bottom-left):
//!
//! ```text
//! mesh_y = label_height - layout_y_top - scaled_height
//! ```
//!
//! Dropping this flip would mirror text and icons vertically and misplace
//! them whenever the layout is not symmetric.

use mesh_from_outlines::{ExtrudeResult, Extruder};
use mesh_types::{Point2, Shape, TriangleSoup, Vector3, shapes_bounds};
use tracing::debug;

use crate::config::FIT_MARGIN;
use crate::layout::LayoutBox;

/// Reference extents below this are treated as this, so flat artwork never
/// divides by zero.
pub const MIN_REFERENCE_MM: f64 = 0.1;

/// Where and how a feature lands on the label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Target region in layout space.
    pub target: LayoutBox,
    /// Full label height, used for the Y flip.
    pub label_height_mm: f64,
    /// Z of the feature's bottom face.
    pub z_offset_mm: f64,
    /// Whether the source outlines use a Y-down frame (vector markup).
    pub source_y_down: bool,
}

impl Placement {
    /// Placement for text outlines, which are Y-up.
    #[must_use]
    pub const fn text(target: LayoutBox, label_height_mm: f64, z_offset_mm: f64) -> Self {
        Self {
            target,
            label_height_mm,
            z_offset_mm,
            source_y_down: false,
        }
    }

    /// Placement for icon outlines, which are Y-down like the markup they
    /// came from.
    #[must_use]
    pub const fn icon(target: LayoutBox, label_height_mm: f64, z_offset_mm: f64) -> Self {
        Self {
            target,
            label_height_mm,
            z_offset_mm,
            source_y_down: true,
        }
    }
}

/// Scale and move outlines into their target box, in mesh space.
///
/// Returns `None` when there is nothing to place.
///
/// # Example
///
/// ```
/// use label_engine::{LayoutBox, Placement, place_outlines};
/// use mesh_types::{Contour, Shape, shapes_bounds};
///
/// let unit = Shape::solid(Contour::from_xy(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]));
/// let target = LayoutBox { x: 2.0, y: 2.0, width: 10.0, height: 10.0 };
///
/// let placed = place_outlines(&[unit], &Placement::text(target, 20.0, 1.6)).unwrap();
/// let b = shapes_bounds(&placed);
///
/// // 90 % of the box, centered; the box top at y = 2 becomes mesh y = 17.5.
/// assert!((b.width() - 9.0).abs() < 1e-12);
/// assert!((b.min.x - 2.5).abs() < 1e-12);
/// assert!((b.max.y - 17.5).abs() < 1e-12);
/// ```
#[must_use]
pub fn place_outlines(shapes: &[Shape], placement: &Placement) -> Option<Vec<Shape>> {
    if shapes.is_empty() {
        return None;
    }

    let oriented: Vec<Shape> = if placement.source_y_down {
        shapes
            .iter()
            .map(|s| s.map_points(|p| Point2::new(p.x, -p.y)))
            .collect()
    } else {
        shapes.to_vec()
    };

    let bounds = shapes_bounds(&oriented);
    if bounds.is_empty() {
        return None;
    }

    let target = &placement.target;
    let scale = fit_scale(bounds.width(), bounds.height(), target.width, target.height);
    let (w, h) = (bounds.width() * scale, bounds.height() * scale);
    let x = target.x + (target.width - w) / 2.0;
    let y_top = target.y + (target.height - h) / 2.0;
    let y = placement.label_height_mm - y_top - h;

    debug!(scale, width = w, height = h, x, y, "fitted outlines");

    let origin = bounds.min;
    Some(
        oriented
            .iter()
            .map(|s| {
                s.map_points(|p| Point2::new((p.x - origin.x) * scale + x, (p.y - origin.y) * scale + y))
            })
            .collect(),
    )
}

/// Uniform scale fitting `ref_w x ref_h` into `box_w x box_h` with margin.
#[must_use]
pub fn fit_scale(ref_w: f64, ref_h: f64, box_w: f64, box_h: f64) -> f64 {
    (box_w / ref_w.max(MIN_REFERENCE_MM)).min(box_h / ref_h.max(MIN_REFERENCE_MM)) * FIT_MARGIN
}

/// Extrude outlines and place the solid in its target box.
///
/// The outlines are fitted with [`place_outlines`], extruded by `depth_mm`
/// and lifted to `placement.z_offset_mm`. Returns `None` when there is nothing
/// to place or nothing survived extrusion.
///
/// # Errors
///
/// Returns an error if `depth_mm` is not a positive finite number.
///
/// # Example
///
/// ```
/// use label_engine::{LayoutBox, Placement, extrude_and_place};
/// use mesh_from_outlines::PrismExtruder;
/// use mesh_types::MeshBounds;
/// use label_outline::{SegmentFont, text_to_shapes};
///
/// let shapes = text_to_shapes("OK", &SegmentFont);
/// let target = LayoutBox { x: 2.0, y: 2.0, width: 41.0, height: 11.0 };
/// let soup = extrude_and_place(&shapes, 0.8, &Placement::text(target, 15.0, 1.6), &PrismExtruder)
///     .unwrap()
///     .unwrap();
///
/// let b = soup.bounds();
/// assert!((b.min.z - 1.6).abs() < 1e-12);
/// assert!((b.max.z - 2.4).abs() < 1e-12);
///
/// assert!(extrude_and_place(&[], 0.8, &Placement::text(target, 15.0, 1.6), &PrismExtruder)
///     .unwrap()
///     .is_none());
/// ```
pub fn extrude_and_place(
    shapes: &[Shape],
    depth_mm: f64,
    placement: &Placement,
    extruder: &dyn Extruder,
) -> ExtrudeResult<Option<TriangleSoup>> {
    let Some(placed) = place_outlines(shapes, placement) else {
        return Ok(None);
    };
    let mut soup = extruder.extrude(&placed, depth_mm)?;
    if soup.is_empty() {
        debug!(shapes = shapes.len(), "no shape survived extrusion");
        return Ok(None);
    }
    soup.translate(Vector3::new(0.0, 0.0, placement.z_offset_mm));
    Ok(Some(soup))
}
