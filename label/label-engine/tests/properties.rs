//! Behavioral properties of label synthesis.
//!
//! Run with: cargo test -p label-engine --test properties

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]

use label_engine::{
    FIT_MARGIN, ICON_GAP_MM, IconPosition, LabelConfig, LabelEngine, LabelRequest,
    MIN_TEXT_BOX_MM, ReliefMode, compute_layout,
};
use label_outline::SegmentFont;
use mesh_from_outlines::build_base_plate;
use mesh_io::{load_stl, save_stl};
use mesh_printability::check_watertight;
use mesh_types::{MeshBounds, shapes_bounds};
use proptest::prelude::*;
use tempfile::tempdir;

const NUT: &str = r#"<svg viewBox="0 0 24 24">
  <path d="M7 3 L17 3 L22 12 L17 21 L7 21 L2 12 Z M12 8 A4 4 0 1 0 12.01 8 Z"/>
</svg>"#;

fn engine() -> LabelEngine<'static> {
    LabelEngine::new(&SegmentFont, LabelConfig::default())
}

// =============================================================================
// Layout
// =============================================================================

fn arb_beside() -> impl Strategy<Value = IconPosition> {
    prop_oneof![Just(IconPosition::Left), Just(IconPosition::Right)]
}

proptest! {
    #[test]
    fn beside_layout_fills_the_width(
        width in 12.0..150.0f64,
        height in 8.0..40.0f64,
        pad in 0.5..4.0f64,
        icon in 2.0..12.0f64,
        position in arb_beside(),
    ) {
        let l = compute_layout(width, height, true, position, pad, icon);
        prop_assume!(l.text_width_mm > MIN_TEXT_BOX_MM);
        let total = l.text_width_mm + l.icon_size_mm + ICON_GAP_MM + 2.0 * pad;
        prop_assert!((total - width).abs() < 1e-9);
    }

    #[test]
    fn top_layout_fills_the_height(
        width in 12.0..150.0f64,
        height in 8.0..60.0f64,
        pad in 0.5..4.0f64,
        icon in 2.0..12.0f64,
    ) {
        let l = compute_layout(width, height, true, IconPosition::Top, pad, icon);
        prop_assume!(l.text_height_mm > MIN_TEXT_BOX_MM);
        let total = l.text_height_mm + l.icon_size_mm + ICON_GAP_MM + 2.0 * pad;
        prop_assert!((total - height).abs() < 1e-9);
        prop_assert!((l.icon_x + icon / 2.0 - width / 2.0).abs() < 1e-9 || l.icon_x == 0.0);
    }

    #[test]
    fn text_only_layout_is_padded_interior(
        width in 12.0..150.0f64,
        height in 8.0..40.0f64,
        pad in 0.5..3.0f64,
    ) {
        let l = compute_layout(width, height, false, IconPosition::Top, pad, 6.0);
        prop_assert!((l.text_width_mm - (width - 2.0 * pad)).abs() < 1e-9);
        prop_assert!((l.text_height_mm - (height - 2.0 * pad)).abs() < 1e-9);
        prop_assert_eq!(l.text_x, pad);
        prop_assert_eq!(l.text_y, pad);
    }
}

// =============================================================================
// Synthesis
// =============================================================================

#[test]
fn generation_is_deterministic() {
    let req = LabelRequest::new("M3 NUTS").with_icon(NUT, IconPosition::Right);
    for relief in [ReliefMode::Emboss, ReliefMode::Deboss] {
        let req = req.clone().with_relief(relief);
        let a = engine().generate(&req).unwrap();
        let b = engine().generate(&req).unwrap();
        assert_eq!(a.stl, b.stl, "{relief} output differs between runs");
    }
}

#[test]
fn no_features_yields_the_plate() {
    let plate = build_base_plate(45.0, 15.0, 1.6, 1.2).unwrap();
    let blank = [
        LabelRequest::new(""),
        LabelRequest::new(" \t "),
        LabelRequest::new("").with_icon("<svg><path d=\"Q 1\"/></svg>", IconPosition::Top),
    ];
    for req in blank {
        for relief in [ReliefMode::Emboss, ReliefMode::Deboss] {
            let out = engine().generate(&req.clone().with_relief(relief)).unwrap();
            assert_eq!(out.mesh, plate);
            assert_eq!(out.report.triangle_count, 172);
            assert_eq!(out.parts.text, None);
            assert_eq!(out.parts.icon, None);
            assert!((out.report.depth() - 1.6).abs() < 1e-6);
        }
    }
}

#[test]
fn emboss_adds_triangle_counts() {
    for position in [IconPosition::Left, IconPosition::Right, IconPosition::Top] {
        let req = LabelRequest::new("BOLTS")
            .with_size(60.0, 20.0)
            .with_icon(NUT, position);
        let out = engine().generate(&req).unwrap();
        let p = out.parts;
        assert_eq!(out.mesh.len(), p.plate + p.text.unwrap() + p.icon.unwrap());
    }
}

#[test]
fn deboss_bounds_equal_the_plate() {
    let plate = build_base_plate(50.0, 18.75, 1.6, 1.2).unwrap().bounds();
    let req = LabelRequest::new("HEX")
        .with_size(50.0, 18.75)
        .with_icon(NUT, IconPosition::Left)
        .with_relief(ReliefMode::Deboss);
    let out = engine().generate(&req).unwrap();
    let b = out.mesh.bounds();
    for (got, want) in [(b.min, plate.min), (b.max, plate.max)] {
        assert!((got - want).norm() < 1e-6, "{got:?} vs {want:?}");
    }
    assert!(out.mesh.signed_volume() < 50.0 * 18.75 * 1.6);
}

#[test]
fn icon_grows_with_icon_size() {
    let widths: Vec<f64> = [4.0, 6.0, 8.0]
        .into_iter()
        .map(|size| {
            let req = LabelRequest::new("BOLTS")
                .with_size(60.0, 20.0)
                .with_icon(NUT, IconPosition::Left)
                .with_icon_size(size);
            let out = engine().generate(&req).unwrap();
            assert!(out.parts.icon.is_some());
            assert_eq!(out.layout.icon_size_mm, size);

            // The hexagon is wider than tall, so width sets the scale.
            let b = shapes_bounds(&out.preview.icon_outlines);
            assert!((b.width() - FIT_MARGIN * size).abs() < 1e-9, "{size}: {}", b.width());
            assert!(b.height() < b.width());
            b.width()
        })
        .collect();

    assert!(widths.windows(2).all(|w| w[0] < w[1]));
    for (w, want) in widths.iter().zip([3.6, 5.4, 7.2]) {
        assert!((w - want).abs() < 1e-9);
    }
    assert!((widths[2] / widths[0] - 2.0).abs() < 1e-9);
}

#[test]
fn debossed_labels_are_watertight() {
    let circle = r#"<svg viewBox="0 0 10 10"><circle cx="5" cy="5" r="4"/></svg>"#;
    let requests = [
        LabelRequest::new("BOLTS"),
        LabelRequest::new("HI").with_icon(circle, IconPosition::Left),
        LabelRequest::new("M3 NUTS")
            .with_size(60.0, 20.0)
            .with_icon(NUT, IconPosition::Top),
    ];
    for req in requests {
        let out = engine().generate(&req.clone().with_relief(ReliefMode::Deboss)).unwrap();
        let seams = check_watertight(&out.mesh, 1e-4);
        assert!(seams.is_watertight(), "{:?}: {seams:?}", req.text);
    }
}

#[test]
fn features_stay_on_the_plate_footprint() {
    let req = LabelRequest::new("WASHERS")
        .with_size(36.0, 12.0)
        .with_icon(NUT, IconPosition::Top)
        .normalized();
    let out = engine().generate(&req).unwrap();
    let b = out.report.bounds;
    assert!(b.min.x >= -1e-6 && b.max.x <= 36.0 + 1e-6);
    assert!(b.min.y >= -1e-6 && b.max.y <= 12.0 + 1e-6);
}

#[test]
fn saved_label_loads_back() {
    let out = engine().generate(&LabelRequest::new("SCREWS")).unwrap();
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("multiboard-label.stl");

    save_stl(&out.mesh, &path).expect("save");
    assert_eq!(std::fs::read(&path).unwrap(), out.stl);
    assert_eq!(load_stl(&path).expect("load").len(), out.mesh.len());
}

#[test]
fn batch_matches_single_generation() {
    let requests: Vec<LabelRequest> = ["A", "BB", "CCC", ""]
        .iter()
        .map(|t| LabelRequest::new(*t).with_relief(ReliefMode::Deboss))
        .collect();
    let batch = engine().generate_batch(&requests);
    for (req, result) in requests.iter().zip(batch) {
        assert_eq!(result.unwrap().stl, engine().generate(req).unwrap().stl);
    }
}
