//! End-to-end label synthesis.
//!
//! request -> layout -> outlines -> placed feature solids -> composition
//! with the plate -> binary STL -> round-trip validation.

use label_outline::{FontOutlines, text_to_shapes, vector_markup_to_shapes};
use mesh_boolean::{BooleanSubtractor, BspSubtractor};
use mesh_from_outlines::{Extruder, PlateConfig, PrismExtruder};
use mesh_io::encode_stl;
use mesh_printability::{StlReport, validate_stl};
use mesh_types::TriangleSoup;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::compose::compose;
use crate::config::LabelConfig;
use crate::error::LabelResult;
use crate::layout::{LayoutResult, compute_layout};
use crate::placement::{Placement, extrude_and_place};
use crate::preview::FlatPreview;
use crate::request::LabelRequest;

/// Triangle counts of the pieces that went into a label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartCounts {
    /// Base plate triangles.
    pub plate: usize,
    /// Text feature triangles, if text was placed.
    pub text: Option<usize>,
    /// Icon feature triangles, if an icon was placed.
    pub icon: Option<usize>,
}

/// Everything produced for one label.
#[derive(Debug, Clone)]
pub struct LabelOutput {
    /// Final composed mesh.
    pub mesh: TriangleSoup,
    /// Binary STL encoding of `mesh`.
    pub stl: Vec<u8>,
    /// Validation measurements of `stl`.
    pub report: StlReport,
    /// Region layout used.
    pub layout: LayoutResult,
    /// 2D description for preview renderers.
    pub preview: FlatPreview,
    /// Triangle counts before composition.
    pub parts: PartCounts,
}

/// Label synthesizer bound to a font and a configuration.
///
/// The extrusion and subtraction strategies are pluggable; the defaults are
/// [`PrismExtruder`] and [`BspSubtractor`]. An engine holds no mutable
/// state, so one instance can serve concurrent generations.
///
/// # Example
///
/// ```
/// use label_engine::{LabelConfig, LabelEngine, LabelRequest, ReliefMode};
/// use label_outline::SegmentFont;
///
/// let engine = LabelEngine::new(&SegmentFont, LabelConfig::default());
/// let out = engine.generate(&LabelRequest::new("SCREWS").with_relief(ReliefMode::Deboss)).unwrap();
///
/// assert!((out.report.width() - 45.0).abs() < 1e-3);
/// assert!((out.report.depth() - 1.6).abs() < 1e-3);
/// ```
pub struct LabelEngine<'f, E = PrismExtruder, S = BspSubtractor> {
    font: &'f dyn FontOutlines,
    config: LabelConfig,
    extruder: E,
    subtractor: S,
}

impl<'f> LabelEngine<'f> {
    /// Engine with the default extruder and a BSP subtractor configured from
    /// `config.boolean`.
    #[must_use]
    pub fn new(font: &'f dyn FontOutlines, config: LabelConfig) -> Self {
        Self {
            font,
            config,
            extruder: PrismExtruder,
            subtractor: BspSubtractor::new(config.boolean),
        }
    }
}

impl<'f, E, S> LabelEngine<'f, E, S>
where
    E: Extruder,
    S: BooleanSubtractor,
{
    /// Replace the feature extruder.
    #[must_use]
    pub fn with_extruder<E2: Extruder>(self, extruder: E2) -> LabelEngine<'f, E2, S> {
        LabelEngine {
            font: self.font,
            config: self.config,
            extruder,
            subtractor: self.subtractor,
        }
    }

    /// Replace the deboss subtractor.
    #[must_use]
    pub fn with_subtractor<S2: BooleanSubtractor>(self, subtractor: S2) -> LabelEngine<'f, E, S2> {
        LabelEngine {
            font: self.font,
            config: self.config,
            extruder: self.extruder,
            subtractor,
        }
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &LabelConfig {
        &self.config
    }

    /// Synthesize, serialize and validate one label.
    ///
    /// The request is used as given; callers apply
    /// [`LabelRequest::normalized`] first. Empty text or unusable icon markup
    /// only drops that feature.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the plate cannot be
    /// built, a deboss cut fails, or the encoded mesh fails validation.
    pub fn generate(&self, request: &LabelRequest) -> LabelResult<LabelOutput> {
        let config = &self.config;
        config.validate()?;

        let has_icon = request.has_icon();
        let layout = compute_layout(
            request.width_mm,
            request.height_mm,
            has_icon,
            request.icon_position,
            request.padding_mm,
            request.icon_size_mm,
        );
        debug!(?layout, "computed layout");

        let plate = PlateConfig::new(request.width_mm, request.height_mm)
            .with_thickness(config.base_thickness)
            .with_corner_radius(config.corner_radius)
            .with_corner_segments(config.corner_segments)
            .build()?;

        let text_shapes = text_to_shapes(&request.text, self.font);
        let icon_shapes = if has_icon {
            vector_markup_to_shapes(&request.icon_markup)
        } else {
            Vec::new()
        };

        let z = config.feature_z(request.relief);
        let text = extrude_and_place(
            &text_shapes,
            config.feature_height,
            &Placement::text(layout.text_box(), request.height_mm, z),
            &self.extruder,
        )?;
        let icon = extrude_and_place(
            &icon_shapes,
            config.feature_height,
            &Placement::icon(layout.icon_box(), request.height_mm, z),
            &self.extruder,
        )?;

        let parts = PartCounts {
            plate: plate.len(),
            text: text.as_ref().map(TriangleSoup::len),
            icon: icon.as_ref().map(TriangleSoup::len),
        };
        // Text first, then icon.
        let features: Vec<TriangleSoup> = text.into_iter().chain(icon).collect();
        let mesh = compose(&plate, &features, request.relief, &self.subtractor)?;

        let stl = encode_stl(&mesh)?;
        let report = validate_stl(&stl, &config.validation())?;
        info!(
            relief = %request.relief,
            text = %request.text,
            summary = %report.summary(),
            "label generated"
        );

        Ok(LabelOutput {
            preview: FlatPreview::new(request, &layout, &text_shapes, &icon_shapes),
            mesh,
            stl,
            report,
            layout,
            parts,
        })
    }

    /// Generate several labels in parallel. Results keep request order.
    pub fn generate_batch(&self, requests: &[LabelRequest]) -> Vec<LabelResult<LabelOutput>>
    where
        E: Sync,
        S: Sync,
    {
        requests.par_iter().map(|r| self.generate(r)).collect()
    }
}

/// Generate one label with the default engine.
///
/// # Errors
///
/// See [`LabelEngine::generate`].
///
/// # Example
///
/// ```
/// use label_engine::{LabelConfig, LabelRequest, generate_label};
/// use label_outline::SegmentFont;
///
/// let out = generate_label(&LabelRequest::new("BOLTS"), &SegmentFont, &LabelConfig::default()).unwrap();
/// assert!(out.report.triangle_count >= 100);
/// assert_eq!(out.stl.len(), 84 + 50 * out.report.triangle_count);
/// ```
pub fn generate_label(
    request: &LabelRequest,
    font: &dyn FontOutlines,
    config: &LabelConfig,
) -> LabelResult<LabelOutput> {
    LabelEngine::new(font, *config).generate(request)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::compose::ReliefMode;
    use crate::error::LabelError;
    use crate::layout::IconPosition;
    use approx::assert_relative_eq;
    use label_outline::SegmentFont;
    use mesh_boolean::{BooleanError, BooleanResult};
    use mesh_types::MeshBounds;

    const ICON: &str = r#"<svg viewBox="0 0 24 24"><circle cx="12" cy="12" r="10"/></svg>"#;

    struct FailingSubtractor;

    impl BooleanSubtractor for FailingSubtractor {
        fn subtract(&self, _: &TriangleSoup, _: &TriangleSoup) -> BooleanResult<TriangleSoup> {
            Err(BooleanError::DegenerateResult {
                details: "refused".to_string(),
            })
        }
    }

    fn engine() -> LabelEngine<'static> {
        LabelEngine::new(&SegmentFont, LabelConfig::default())
    }

    #[test]
    fn emboss_stands_features_on_the_plate() {
        let out = engine().generate(&LabelRequest::new("BOLTS")).unwrap();
        assert_relative_eq!(out.report.depth(), 2.4, epsilon = 1e-5);
        assert_eq!(out.parts.icon, None);
        assert_eq!(out.mesh.len(), out.parts.plate + out.parts.text.unwrap());
    }

    #[test]
    fn icon_is_placed_when_markup_given() {
        let req = LabelRequest::new("NUT").with_icon(ICON, IconPosition::Right);
        let out = engine().generate(&req).unwrap();
        assert!(out.parts.icon.is_some());
        assert_eq!(out.preview.icon_outlines.len(), 1);
    }

    #[test]
    fn unreadable_icon_is_dropped() {
        let req = LabelRequest::new("NUT").with_icon("<svg><path d=\"M 0\"/></svg>", IconPosition::Left);
        let out = engine().generate(&req).unwrap();
        assert_eq!(out.parts.icon, None);
    }

    #[test]
    fn deboss_keeps_plate_bounds() {
        let req = LabelRequest::new("HI")
            .with_icon(ICON, IconPosition::Left)
            .with_relief(ReliefMode::Deboss);
        let out = engine().generate(&req).unwrap();
        let b = out.mesh.bounds();
        assert_relative_eq!(b.width(), 45.0, epsilon = 1e-6);
        assert_relative_eq!(b.height(), 15.0, epsilon = 1e-6);
        assert_relative_eq!(b.depth(), 1.6, epsilon = 1e-6);
    }

    #[test]
    fn deboss_failure_aborts_export() {
        let req = LabelRequest::new("HI").with_relief(ReliefMode::Deboss);
        let err = engine().with_subtractor(FailingSubtractor).generate(&req).unwrap_err();
        assert!(matches!(err, LabelError::Boolean(_)));
    }

    #[test]
    fn empty_deboss_never_calls_subtractor() {
        let req = LabelRequest::new("   ").with_relief(ReliefMode::Deboss);
        let out = engine().with_subtractor(FailingSubtractor).generate(&req).unwrap();
        assert_eq!(out.mesh.len(), out.parts.plate);
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let engine = LabelEngine::new(&SegmentFont, LabelConfig::default().with_engrave_depth(3.0));
        assert!(matches!(
            engine.generate(&LabelRequest::new("A")),
            Err(LabelError::InvalidConfig(_))
        ));
    }

    #[test]
    fn threshold_failure_is_a_validation_error() {
        let config = LabelConfig::default().with_min_triangles(100_000);
        let err = generate_label(&LabelRequest::new("A"), &SegmentFont, &config).unwrap_err();
        assert!(matches!(err, LabelError::Validation(_)));
    }

    #[test]
    fn batch_keeps_order() {
        let requests = [
            LabelRequest::new("A"),
            LabelRequest::new("").with_size(60.0, 20.0),
            LabelRequest::new("C").with_relief(ReliefMode::Deboss),
        ];
        let results = engine().generate_batch(&requests);
        assert_eq!(results.len(), 3);
        let widths: Vec<f64> = results.iter().map(|r| r.as_ref().unwrap().report.width()).collect();
        assert_relative_eq!(widths[1], 60.0, epsilon = 1e-5);
        assert_relative_eq!(widths[0], 45.0, epsilon = 1e-5);
    }
}
