//! Export-time validation of label meshes.
//!
//! This crate checks that a serialized mesh is fit to hand to a slicer. It
//! re-parses the STL bytes rather than trusting the in-memory soup, so the
//! check covers exactly what gets written to disk.
//!
//! # Features
//!
//! - **Round-trip validation**: Decode binary STL and check bounds and size
//! - **Threshold presets**: Full export or lightweight sanity checks
//! - **Watertightness**: Count open and non-manifold edges of a soup
//!
//! # Example
//!
//! ```
//! use mesh_io::encode_stl;
//! use mesh_printability::{check_watertight, validate_stl, ValidationConfig};
//! use mesh_types::{cuboid, Point3};
//!
//! let plate = cuboid(Point3::origin(), Point3::new(45.0, 15.0, 1.6));
//! assert!(check_watertight(&plate, 1e-6).is_watertight());
//!
//! let bytes = encode_stl(&plate).unwrap();
//! let report = validate_stl(&bytes, &ValidationConfig::sanity()).unwrap();
//! println!("{}", report.summary());
//! ```
//!
//! # What is checked
//!
//! - The buffer parses and holds every declared triangle
//! - At least one triangle exists, so a bounding box does
//! - Width, height and depth are all positive and finite
//! - The triangle count meets [`ValidationConfig::min_triangles`]

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod config;
mod error;
mod manifold;
mod validation;

pub use config::{EXPORT_MIN_TRIANGLES, ValidationConfig};
pub use error::{ValidationError, ValidationResult};
pub use manifold::{WatertightReport, check_watertight};
pub use validation::{StlReport, validate_soup, validate_stl};
