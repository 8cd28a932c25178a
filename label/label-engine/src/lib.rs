//! Printable nameplate synthesis.
//!
//! Turns a short text, an optional vector icon and a plate size into a
//! closed triangle mesh ready for 3D printing, plus the binary STL bytes and
//! a flat preview.
//!
//! # Pipeline
//!
//! 1. [`compute_layout`] splits the plate into a text box and an icon square
//! 2. Outlines come from `label-outline` at native size
//! 3. [`extrude_and_place`] fits them into their boxes and lifts them to the
//!    feature height
//! 4. [`compose`] raises ([`ReliefMode::Emboss`]) or engraves
//!    ([`ReliefMode::Deboss`]) them against a rounded base plate
//! 5. The mesh is encoded as binary STL and re-validated from the bytes
//!
//! # Quick Start
//!
//! ```
//! use label_engine::{LabelConfig, LabelEngine, LabelRequest, resolve_preset};
//! use label_outline::SegmentFont;
//!
//! let engine = LabelEngine::new(&SegmentFont, LabelConfig::default());
//! let request = LabelRequest::new("bolts").with_preset(resolve_preset("large")).normalized();
//!
//! let label = engine.generate(&request).unwrap();
//! assert!((label.report.width() - 60.0).abs() < 0.35);
//! assert!((label.report.depth() - 2.4).abs() < 1e-3);
//! ```
//!
//! # Coordinates
//!
//! Layout works in mm with the origin at the plate's top-left corner and Y
//! pointing down. Meshes use the origin at the bottom-left corner of the
//! plate's underside, Y up and Z out of the plate.

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod compose;
mod config;
mod error;
mod layout;
mod pipeline;
mod placement;
mod preset;
mod preview;
mod request;

pub use compose::{ReliefMode, compose};
pub use config::{
    BASE_THICKNESS_MM, CORNER_RADIUS_MM, ENGRAVE_DEPTH_MM, FEATURE_HEIGHT_MM, FIT_MARGIN,
    LabelConfig,
};
pub use error::{LabelError, LabelResult};
pub use layout::{
    ICON_GAP_MM, IconPosition, LayoutBox, LayoutResult, MIN_PADDING_MM, MIN_TEXT_BOX_MM,
    compute_layout,
};
pub use pipeline::{LabelEngine, LabelOutput, PartCounts, generate_label};
pub use placement::{MIN_REFERENCE_MM, Placement, extrude_and_place, fit_scale, place_outlines};
pub use preset::{
    DEFAULT_PRESET_ID, HARDWARE_ICONS, HardwareIcon, MU_MM, PRESETS, Preset, find_icon,
    find_preset, resolve_preset,
};
pub use preview::{FlatPreview, PX_PER_MM, preview_font_size_mm, preview_svg};
pub use request::{
    LabelRequest, MAX_TEXT_CHARS, MIN_HEIGHT_MM, MIN_ICON_SIZE_MM, MIN_WIDTH_MM,
};
