//! Flat previews for 2D rendering collaborators.
//!
//! Nothing here rasterizes. [`FlatPreview`] describes what the mesh carries
//! in 2D, and [`preview_svg`] produces the quick-look SVG of the label.

use std::fmt::Write as _;

use mesh_types::{Point2, Shape};
use serde::{Deserialize, Serialize};

use crate::compose::ReliefMode;
use crate::layout::LayoutResult;
use crate::placement::{Placement, place_outlines};
use crate::request::LabelRequest;

/// Preview pixels per mm.
pub const PX_PER_MM: f64 = 12.0;

/// Preview font size limits in pixels.
const FONT_PX_MIN: f64 = 10.0;
const FONT_PX_MAX: f64 = 56.0;

/// Share of the text box height used by the preview font.
const FONT_FILL: f64 = 0.68;

/// 2D description of a synthesized label, in layout space (mm, Y down).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatPreview {
    /// Plate width.
    pub width_mm: f64,
    /// Plate height.
    pub height_mm: f64,
    /// Raised or engraved features.
    pub relief: ReliefMode,
    /// Region layout.
    pub layout: LayoutResult,
    /// Label text.
    pub text: String,
    /// Placed text outlines.
    pub text_outlines: Vec<Shape>,
    /// Placed icon outlines.
    pub icon_outlines: Vec<Shape>,
}

impl FlatPreview {
    /// Place native-size outlines exactly as the mesh does, then express them
    /// in layout space.
    #[must_use]
    pub fn new(
        request: &LabelRequest,
        layout: &LayoutResult,
        text_shapes: &[Shape],
        icon_shapes: &[Shape],
    ) -> Self {
        let h = request.height_mm;
        let to_layout = |shapes: Option<Vec<Shape>>| -> Vec<Shape> {
            shapes
                .unwrap_or_default()
                .iter()
                .map(|s| s.map_points(|p| Point2::new(p.x, h - p.y)))
                .collect()
        };
        Self {
            width_mm: request.width_mm,
            height_mm: h,
            relief: request.relief,
            layout: *layout,
            text: request.text.clone(),
            text_outlines: to_layout(place_outlines(
                text_shapes,
                &Placement::text(layout.text_box(), h, 0.0),
            )),
            icon_outlines: to_layout(place_outlines(
                icon_shapes,
                &Placement::icon(layout.icon_box(), h, 0.0),
            )),
        }
    }
}

/// Preview font size in mm for a text box of the given height.
#[must_use]
pub fn preview_font_size_mm(text_height_mm: f64) -> f64 {
    (text_height_mm * PX_PER_MM * FONT_FILL)
        .round()
        .clamp(FONT_PX_MIN, FONT_PX_MAX)
        / PX_PER_MM
}

/// SVG preview of a label: rounded plate outline, optional icon image and
/// centered bold text.
///
/// The document is sized at [`PX_PER_MM`] pixels per mm with a millimeter
/// view box. `<`, `&` and `>` are removed from the text; `icon_href` is
/// XML-escaped into the `href` attribute.
///
/// # Example
///
/// ```
/// use label_engine::{IconPosition, LabelRequest, compute_layout, preview_svg};
///
/// let request = LabelRequest::new("NUTS & BOLTS");
/// let layout = compute_layout(45.0, 15.0, false, IconPosition::Left, 2.0, 6.5);
/// let svg = preview_svg(&request, &layout, None);
///
/// assert!(svg.contains(r#"width="540" height="180" viewBox="0 0 45 15""#));
/// assert!(svg.contains(">NUTS  BOLTS</text>"));
/// ```
#[must_use]
pub fn preview_svg(request: &LabelRequest, layout: &LayoutResult, icon_href: Option<&str>) -> String {
    let (w, h) = (request.width_mm, request.height_mm);
    let text: String = request.text.chars().filter(|c| !matches!(c, '<' | '&' | '>')).collect();

    let mut svg = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {w} {h}">"#,
        (w * PX_PER_MM).round(),
        (h * PX_PER_MM).round(),
    );
    let _ = writeln!(
        svg,
        r##"  <rect x="0" y="0" width="{w}" height="{h}" rx="1.2" ry="1.2" fill="white" stroke="#111" stroke-width="0.4" />"##
    );
    if let Some(href) = icon_href.filter(|s| !s.is_empty()) {
        let href = escape_attribute(href);
        let _ = writeln!(
            svg,
            r#"  <image href="{href}" x="{}" y="{}" width="{s}" height="{s}" preserveAspectRatio="xMidYMid meet" />"#,
            layout.icon_x,
            layout.icon_y,
            s = layout.icon_size_mm,
        );
    }
    let _ = writeln!(
        svg,
        r##"  <text x="{}" y="{}" dominant-baseline="middle" text-anchor="middle" font-family="Arial, sans-serif" font-weight="700" font-size="{}" fill="#111">{text}</text>"##,
        layout.text_x + layout.text_width_mm / 2.0,
        layout.text_y + layout.text_height_mm / 2.0,
        preview_font_size_mm(layout.text_height_mm),
    );
    svg.push_str("</svg>\n");
    svg
}

/// Escape a value for a double-quoted XML attribute.
fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::layout::{IconPosition, compute_layout};
    use approx::assert_relative_eq;
    use label_outline::{SegmentFont, text_to_shapes, vector_markup_to_shapes};
    use mesh_types::shapes_bounds;

    fn layout(has_icon: bool) -> LayoutResult {
        compute_layout(45.0, 15.0, has_icon, IconPosition::Left, 2.0, 6.0)
    }

    #[test]
    fn font_size_is_clamped() {
        assert_relative_eq!(preview_font_size_mm(11.0), 90.0 / 12.0);
        assert_relative_eq!(preview_font_size_mm(0.5), 10.0 / 12.0);
        assert_relative_eq!(preview_font_size_mm(100.0), 56.0 / 12.0);
    }

    #[test]
    fn svg_includes_icon_only_when_given() {
        let req = LabelRequest::new("A");
        assert!(!preview_svg(&req, &layout(false), None).contains("<image"));
        assert!(!preview_svg(&req, &layout(false), Some("")).contains("<image"));
        let with = preview_svg(&req, &layout(true), Some("icons/nut.svg"));
        assert!(with.contains(r#"<image href="icons/nut.svg" x="2" y="4.5" width="6" height="6""#));
    }

    #[test]
    fn icon_href_is_escaped() {
        let req = LabelRequest::new("A");
        let svg = preview_svg(&req, &layout(true), Some(r#"icons/nuts&bolts "m3" <b>.svg"#));
        assert!(svg.contains(
            r#"<image href="icons/nuts&amp;bolts &quot;m3&quot; &lt;b&gt;.svg" x="2""#
        ));
        let image = svg.lines().find(|l| l.contains("<image")).unwrap();
        // Six attributes, each with exactly one pair of quotes.
        assert_eq!(image.matches('"').count(), 12);
        assert!(!image.contains("& "));
    }

    #[test]
    fn svg_text_is_centered_in_text_box() {
        let svg = preview_svg(&LabelRequest::new("A"), &layout(false), None);
        assert!(svg.contains(r#"<text x="22.5" y="7.5""#));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn outlines_stay_inside_their_boxes() {
        let req = LabelRequest::new("BOLTS");
        let l = layout(true);
        let text = text_to_shapes(&req.text, &SegmentFont);
        let icon = vector_markup_to_shapes(r#"<svg><rect x="0" y="0" width="4" height="2"/></svg>"#);
        let preview = FlatPreview::new(&req, &l, &text, &icon);

        let tb = shapes_bounds(&preview.text_outlines);
        assert!(tb.min.x >= l.text_x - 1e-9 && tb.max.x <= l.text_x + l.text_width_mm + 1e-9);
        assert!(tb.min.y >= l.text_y - 1e-9 && tb.max.y <= l.text_y + l.text_height_mm + 1e-9);

        let ib = shapes_bounds(&preview.icon_outlines);
        assert_relative_eq!(ib.width(), 6.0 * 0.9, epsilon = 1e-9);
        assert_relative_eq!(ib.center().x, l.icon_x + 3.0, epsilon = 1e-9);
        assert_relative_eq!(ib.center().y, l.icon_y + 3.0, epsilon = 1e-9);
    }

    #[test]
    fn preview_serializes() {
        let req = LabelRequest::new("A");
        let preview = FlatPreview::new(&req, &layout(false), &text_to_shapes("A", &SegmentFont), &[]);
        let json = serde_json::to_string(&preview).unwrap();
        let back: FlatPreview = serde_json::from_str(&json).unwrap();
        assert_eq!(back.text_outlines.len(), preview.text_outlines.len());
        assert!(back.icon_outlines.is_empty());
    }
}
