//! Geometry constants for label synthesis.

use mesh_boolean::BooleanConfig;
use mesh_from_outlines::DEFAULT_CORNER_SEGMENTS;
use mesh_printability::{EXPORT_MIN_TRIANGLES, ValidationConfig};

use crate::compose::ReliefMode;
use crate::error::{LabelError, LabelResult};

/// Thickness of the base plate in mm.
pub const BASE_THICKNESS_MM: f64 = 1.6;

/// Height of raised (or cutting) feature prisms in mm.
pub const FEATURE_HEIGHT_MM: f64 = 0.8;

/// How far debossed features sink below the plate top, in mm.
pub const ENGRAVE_DEPTH_MM: f64 = 0.5;

/// Corner radius of the base plate in mm.
pub const CORNER_RADIUS_MM: f64 = 1.2;

/// Share of a layout box a fitted feature may fill.
pub const FIT_MARGIN: f64 = 0.9;

/// Settings for one label build.
///
/// The defaults reproduce the standard nameplate: a 1.6 mm plate with
/// 1.2 mm corners, features 0.8 mm tall, and 0.5 mm deep engraving.
///
/// # Example
///
/// ```
/// use label_engine::{LabelConfig, ReliefMode};
///
/// let config = LabelConfig::default();
/// assert_eq!(config.feature_z(ReliefMode::Emboss), 1.6);
/// assert!((config.feature_z(ReliefMode::Deboss) - 1.1).abs() < 1e-12);
///
/// let deep = LabelConfig::default().with_engrave_depth(0.7);
/// assert!(deep.validate().is_ok());
///
/// let through = LabelConfig::default().with_engrave_depth(2.0);
/// assert!(through.validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelConfig {
    /// Base plate thickness in mm.
    pub base_thickness: f64,
    /// Feature prism height in mm.
    pub feature_height: f64,
    /// Deboss depth below the plate top in mm.
    pub engrave_depth: f64,
    /// Plate corner radius in mm.
    pub corner_radius: f64,
    /// Chords per plate corner.
    pub corner_segments: usize,
    /// Triangle floor enforced on export.
    pub min_triangles: usize,
    /// Settings for deboss subtraction.
    pub boolean: BooleanConfig,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            base_thickness: BASE_THICKNESS_MM,
            feature_height: FEATURE_HEIGHT_MM,
            engrave_depth: ENGRAVE_DEPTH_MM,
            corner_radius: CORNER_RADIUS_MM,
            corner_segments: DEFAULT_CORNER_SEGMENTS,
            min_triangles: EXPORT_MIN_TRIANGLES,
            boolean: BooleanConfig::default(),
        }
    }
}

impl LabelConfig {
    /// Set the base plate thickness.
    #[must_use]
    pub const fn with_base_thickness(mut self, mm: f64) -> Self {
        self.base_thickness = mm;
        self
    }

    /// Set the feature prism height.
    #[must_use]
    pub const fn with_feature_height(mut self, mm: f64) -> Self {
        self.feature_height = mm;
        self
    }

    /// Set the deboss depth.
    #[must_use]
    pub const fn with_engrave_depth(mut self, mm: f64) -> Self {
        self.engrave_depth = mm;
        self
    }

    /// Set the plate corner radius.
    #[must_use]
    pub const fn with_corner_radius(mut self, mm: f64) -> Self {
        self.corner_radius = mm;
        self
    }

    /// Set the chords per plate corner.
    #[must_use]
    pub const fn with_corner_segments(mut self, segments: usize) -> Self {
        self.corner_segments = segments;
        self
    }

    /// Set the export triangle floor.
    #[must_use]
    pub const fn with_min_triangles(mut self, min: usize) -> Self {
        self.min_triangles = min;
        self
    }

    /// Set the boolean subtraction settings.
    #[must_use]
    pub const fn with_boolean(mut self, boolean: BooleanConfig) -> Self {
        self.boolean = boolean;
        self
    }

    /// Z at which a feature prism starts for the given relief.
    ///
    /// Embossed features stand on the plate top. Debossed ones start
    /// `engrave_depth` below it and, being taller than that depth, poke out
    /// above the top so the cut never leaves a skin of coplanar faces.
    #[must_use]
    pub fn feature_z(&self, mode: ReliefMode) -> f64 {
        match mode {
            ReliefMode::Emboss => self.base_thickness,
            ReliefMode::Deboss => self.base_thickness - self.engrave_depth,
        }
    }

    /// Thresholds for the export validator.
    #[must_use]
    pub const fn validation(&self) -> ValidationConfig {
        ValidationConfig::export().with_min_triangles(self.min_triangles)
    }

    /// Check the constants describe a printable label.
    ///
    /// # Errors
    ///
    /// Returns [`LabelError::InvalidConfig`] if a dimension is not positive
    /// and finite, the engraving would cut through the plate, or features are
    /// too short to clear the plate top when debossing.
    pub fn validate(&self) -> LabelResult<()> {
        for (name, value) in [
            ("base_thickness", self.base_thickness),
            ("feature_height", self.feature_height),
            ("engrave_depth", self.engrave_depth),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(LabelError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if !self.corner_radius.is_finite() || self.corner_radius < 0.0 {
            return Err(LabelError::InvalidConfig(format!(
                "corner_radius must not be negative, got {}",
                self.corner_radius
            )));
        }
        if self.engrave_depth >= self.base_thickness {
            return Err(LabelError::InvalidConfig(format!(
                "engrave_depth {} would cut through a {} mm plate",
                self.engrave_depth, self.base_thickness
            )));
        }
        if self.feature_height <= self.engrave_depth {
            return Err(LabelError::InvalidConfig(format!(
                "feature_height {} does not clear engrave_depth {}",
                self.feature_height, self.engrave_depth
            )));
        }
        Ok(())
    }
}
