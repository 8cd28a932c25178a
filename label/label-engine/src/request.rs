//! Label requests and the clamping applied before synthesis.

use serde::{Deserialize, Serialize};

use crate::compose::ReliefMode;
use crate::layout::{IconPosition, MIN_PADDING_MM};
use crate::preset::Preset;

/// Narrowest label accepted, in mm.
pub const MIN_WIDTH_MM: f64 = 12.0;

/// Shortest label accepted, in mm.
pub const MIN_HEIGHT_MM: f64 = 8.0;

/// Smallest icon square, in mm.
pub const MIN_ICON_SIZE_MM: f64 = 2.0;

/// Longest label text, in characters.
pub const MAX_TEXT_CHARS: usize = 24;

/// Everything needed to synthesize one label.
///
/// The icon arrives as markup text already fetched by the caller; an empty
/// string means no icon.
///
/// # Example
///
/// ```
/// use label_engine::{IconPosition, LabelRequest, ReliefMode};
///
/// let request = LabelRequest::new("m4 bolts")
///     .with_size(36.0, 12.0)
///     .with_icon("<svg/>", IconPosition::Top)
///     .with_relief(ReliefMode::Deboss)
///     .normalized();
///
/// assert_eq!(request.text, "M4 BOLTS");
/// assert!(request.has_icon());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelRequest {
    /// Label text.
    pub text: String,
    /// Plate width in mm.
    pub width_mm: f64,
    /// Plate height in mm.
    pub height_mm: f64,
    /// Icon SVG markup, empty for none.
    pub icon_markup: String,
    /// Icon placement relative to the text.
    pub icon_position: IconPosition,
    /// Margin around the content in mm.
    pub padding_mm: f64,
    /// Side of the icon square in mm.
    pub icon_size_mm: f64,
    /// Raised or engraved features.
    pub relief: ReliefMode,
}

impl Default for LabelRequest {
    fn default() -> Self {
        Self {
            text: String::new(),
            width_mm: 45.0,
            height_mm: 15.0,
            icon_markup: String::new(),
            icon_position: IconPosition::Left,
            padding_mm: 2.0,
            icon_size_mm: 6.5,
            relief: ReliefMode::Emboss,
        }
    }
}

impl LabelRequest {
    /// A default-sized request for `text`.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Take the plate size from a preset.
    #[must_use]
    pub fn with_preset(mut self, preset: &Preset) -> Self {
        self.width_mm = preset.width_mm;
        self.height_mm = preset.height_mm;
        self
    }

    /// Set the plate size.
    #[must_use]
    pub fn with_size(mut self, width_mm: f64, height_mm: f64) -> Self {
        self.width_mm = width_mm;
        self.height_mm = height_mm;
        self
    }

    /// Attach icon markup at a position.
    #[must_use]
    pub fn with_icon(mut self, markup: impl Into<String>, position: IconPosition) -> Self {
        self.icon_markup = markup.into();
        self.icon_position = position;
        self
    }

    /// Set the padding.
    #[must_use]
    pub fn with_padding(mut self, padding_mm: f64) -> Self {
        self.padding_mm = padding_mm;
        self
    }

    /// Set the icon size.
    #[must_use]
    pub fn with_icon_size(mut self, icon_size_mm: f64) -> Self {
        self.icon_size_mm = icon_size_mm;
        self
    }

    /// Set the relief mode.
    #[must_use]
    pub fn with_relief(mut self, relief: ReliefMode) -> Self {
        self.relief = relief;
        self
    }

    /// Whether icon markup was supplied.
    #[must_use]
    pub fn has_icon(&self) -> bool {
        !self.icon_markup.trim().is_empty()
    }

    /// Apply the input clamps: minimum plate, padding and icon sizes,
    /// upper-cased text of at most [`MAX_TEXT_CHARS`] characters.
    ///
    /// Non-finite sizes fall back to the minimums.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.width_mm = at_least(self.width_mm, MIN_WIDTH_MM);
        self.height_mm = at_least(self.height_mm, MIN_HEIGHT_MM);
        self.padding_mm = at_least(self.padding_mm, MIN_PADDING_MM);
        self.icon_size_mm = at_least(self.icon_size_mm, MIN_ICON_SIZE_MM);
        self.text = self.text.to_uppercase().chars().take(MAX_TEXT_CHARS).collect();
        self
    }
}

fn at_least(value: f64, min: f64) -> f64 {
    if value.is_finite() { value.max(min) } else { min }
}
