//! Generate closed triangle soups from planar outlines.
//!
//! This crate lifts 2D [`Shape`](mesh_types::Shape)s (outer ring plus holes)
//! into 3D solids.
//!
//! # Features
//!
//! - **Prism extrusion**: Straight walls and flat caps via [`PrismExtruder`]
//! - **Holes**: Cap triangulation by ear clipping handles nested counters
//! - **Base plates**: Rounded-rectangle slabs via [`build_base_plate`]
//!
//! # Quick Start
//!
//! ```
//! use mesh_from_outlines::{Extruder, PrismExtruder};
//! use mesh_types::{Contour, Shape};
//!
//! // An "O": outer ring with a hole.
//! let outer = Contour::from_xy(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
//! let hole = Contour::from_xy(&[(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0)]);
//! let shape = Shape::new(outer, vec![hole]);
//!
//! let soup = PrismExtruder.extrude(&[shape], 0.8).unwrap();
//! assert!((soup.signed_volume() - 12.0 * 0.8).abs() < 1e-9);
//! ```
//!
//! # Base Plates
//!
//! ```
//! use mesh_from_outlines::build_base_plate;
//!
//! let plate = build_base_plate(45.0, 15.0, 1.6, 1.2).unwrap();
//! assert!(plate.len() >= 100);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod extrude;
mod plate;

pub use error::{ExtrudeError, ExtrudeResult};
pub use extrude::{Extruder, PrismExtruder, triangulate_shape};
pub use plate::{DEFAULT_CORNER_SEGMENTS, PlateConfig, build_base_plate, rounded_rect};
