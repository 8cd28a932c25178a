//! Box layout of the text and icon regions.
//!
//! Layout space has its origin at the label's top-left corner with Y
//! pointing down, matching the flat preview. Placement flips into mesh space.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LabelError;

/// Space between the icon and the text, present only with an icon.
pub const ICON_GAP_MM: f64 = 1.8;

/// Padding is never smaller than this.
pub const MIN_PADDING_MM: f64 = 0.5;

/// Text box sides are never smaller than this, so extrusion always has area.
pub const MIN_TEXT_BOX_MM: f64 = 2.0;

/// Where the icon sits relative to the text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconPosition {
    /// Icon left of the text.
    #[default]
    Left,
    /// Icon right of the text.
    Right,
    /// Icon above the text, centered horizontally.
    Top,
}

impl IconPosition {
    /// Lowercase name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
        }
    }

    /// Whether the icon shares a row with the text.
    #[must_use]
    pub const fn is_beside(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

impl fmt::Display for IconPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IconPosition {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "top" => Ok(Self::Top),
            _ => Err(LabelError::UnknownIconPosition(s.to_string())),
        }
    }
}

/// An axis-aligned region in layout space (mm, Y down).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutBox {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Extent to the right.
    pub width: f64,
    /// Extent downward.
    pub height: f64,
}

/// Text and icon regions of a label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutResult {
    /// Left edge of the text box.
    pub text_x: f64,
    /// Top edge of the text box.
    pub text_y: f64,
    /// Text box width, at least [`MIN_TEXT_BOX_MM`].
    pub text_width_mm: f64,
    /// Text box height, at least [`MIN_TEXT_BOX_MM`].
    pub text_height_mm: f64,
    /// Left edge of the icon square.
    pub icon_x: f64,
    /// Top edge of the icon square.
    pub icon_y: f64,
    /// Side of the icon square.
    pub icon_size_mm: f64,
}

impl LayoutResult {
    /// The text region.
    #[must_use]
    pub const fn text_box(&self) -> LayoutBox {
        LayoutBox {
            x: self.text_x,
            y: self.text_y,
            width: self.text_width_mm,
            height: self.text_height_mm,
        }
    }

    /// The icon region.
    #[must_use]
    pub const fn icon_box(&self) -> LayoutBox {
        LayoutBox {
            x: self.icon_x,
            y: self.icon_y,
            width: self.icon_size_mm,
            height: self.icon_size_mm,
        }
    }
}

/// Split a label into text and icon regions.
///
/// Never fails. Padding below [`MIN_PADDING_MM`] is raised to it, and text box
/// sides are clamped to at least [`MIN_TEXT_BOX_MM`] when padding or the icon
/// crowd them out. With the icon beside the text and no clamping,
/// `text_width_mm + icon_size_mm + ICON_GAP_MM + 2 * padding == width_mm`.
/// Icon coordinates are computed even without an icon, but are then unused.
///
/// # Example
///
/// ```
/// use label_engine::{IconPosition, compute_layout};
///
/// let layout = compute_layout(45.0, 15.0, true, IconPosition::Left, 2.0, 6.0);
/// assert_eq!(layout.icon_x, 2.0);
/// assert!((layout.text_x - 9.8).abs() < 1e-12);
/// assert!((layout.text_width_mm - 33.2).abs() < 1e-12);
/// assert_eq!(layout.text_height_mm, 11.0);
/// ```
#[must_use]
pub fn compute_layout(
    width_mm: f64,
    height_mm: f64,
    has_icon: bool,
    position: IconPosition,
    padding_mm: f64,
    icon_size_mm: f64,
) -> LayoutResult {
    let pad = padding_mm.max(MIN_PADDING_MM);
    let gap = if has_icon { ICON_GAP_MM } else { 0.0 };
    let beside = if has_icon && position.is_beside() { icon_size_mm + gap } else { 0.0 };
    let above = if has_icon && position == IconPosition::Top { icon_size_mm + gap } else { 0.0 };

    let text_x = if position == IconPosition::Left { pad + beside } else { pad };
    let icon_x = match position {
        IconPosition::Left => pad,
        IconPosition::Right => width_mm - pad - icon_size_mm,
        IconPosition::Top => (width_mm - icon_size_mm) / 2.0,
    };
    let icon_y = match position {
        IconPosition::Top => pad,
        IconPosition::Left | IconPosition::Right => (height_mm - icon_size_mm) / 2.0,
    };

    LayoutResult {
        text_x,
        text_y: pad + above,
        text_width_mm: (width_mm - 2.0 * pad - beside).max(MIN_TEXT_BOX_MM),
        text_height_mm: (height_mm - 2.0 * pad - above).max(MIN_TEXT_BOX_MM),
        icon_x: icon_x.max(0.0),
        icon_y: icon_y.max(0.0),
        icon_size_mm,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn no_icon_uses_whole_padded_interior() {
        let l = compute_layout(45.0, 15.0, false, IconPosition::Left, 2.0, 6.0);
        assert_eq!(l.text_x, 2.0);
        assert_eq!(l.text_y, 2.0);
        assert_eq!(l.text_width_mm, 41.0);
        assert_eq!(l.text_height_mm, 11.0);
    }

    #[test]
    fn icon_right_keeps_text_at_padding() {
        let l = compute_layout(60.0, 20.0, true, IconPosition::Right, 2.0, 8.0);
        assert_eq!(l.text_x, 2.0);
        assert_eq!(l.icon_x, 50.0);
        assert_eq!(l.icon_y, 6.0);
        assert_relative_eq!(l.text_width_mm + 8.0 + ICON_GAP_MM + 4.0, 60.0, epsilon = 1e-12);
    }

    #[test]
    fn icon_top_pushes_text_down() {
        let l = compute_layout(45.0, 30.0, true, IconPosition::Top, 2.0, 6.0);
        assert_eq!(l.icon_x, 19.5);
        assert_eq!(l.icon_y, 2.0);
        assert_relative_eq!(l.text_y, 9.8, epsilon = 1e-12);
        assert_relative_eq!(l.text_height_mm, 30.0 - 4.0 - 7.8, epsilon = 1e-12);
        assert_eq!(l.text_width_mm, 41.0);
    }

    #[test]
    fn small_padding_is_raised() {
        let l = compute_layout(45.0, 15.0, false, IconPosition::Left, 0.1, 6.0);
        assert_eq!(l.text_x, MIN_PADDING_MM);
        assert_eq!(l.text_width_mm, 44.0);
    }

    #[test]
    fn crowded_text_box_is_clamped() {
        let l = compute_layout(12.0, 8.0, true, IconPosition::Left, 4.0, 10.0);
        assert_eq!(l.text_width_mm, MIN_TEXT_BOX_MM);
        assert_eq!(l.text_height_mm, MIN_TEXT_BOX_MM);
        assert_eq!(l.icon_y, 0.0);
    }

    #[test]
    fn position_parses_case_insensitively() {
        assert_eq!("LEFT".parse::<IconPosition>().unwrap(), IconPosition::Left);
        assert_eq!(" top ".parse::<IconPosition>().unwrap(), IconPosition::Top);
        assert!(matches!(
            "bottom".parse::<IconPosition>(),
            Err(LabelError::UnknownIconPosition(_))
        ));
        assert_eq!(IconPosition::Right.to_string(), "right");
    }

    #[test]
    fn boxes_mirror_fields() {
        let l = compute_layout(45.0, 15.0, true, IconPosition::Left, 2.0, 6.0);
        assert_eq!(l.text_box().width, l.text_width_mm);
        assert_eq!(l.icon_box().height, 6.0);
        assert_eq!(l.icon_box().y, 4.5);
    }
}
