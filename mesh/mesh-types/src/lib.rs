//! Core geometry types for label meshes.
//!
//! This crate provides the foundational types shared by every stage of the
//! label pipeline:
//!
//! - [`TriangleSoup`] - An ordered, unindexed list of [`Facet`]s
//! - [`Triangle`] - A concrete triangle with vertex positions
//! - [`Aabb`] / [`Rect2`] - Axis-aligned bounding boxes
//! - [`Contour`] / [`Shape`] - Planar outlines with holes, before extrusion
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with no rendering or UI dependencies. It can be
//! used in CLI tools, servers and WASM builds alike.
//!
//! # Units
//!
//! All coordinates are `f64` millimeters. Outline shapes may be expressed in
//! reference units (1 unit per em for glyphs) until they are placed.
//!
//! # Coordinate System
//!
//! Uses a **right-handed coordinate system**:
//! - X: label width (left/right)
//! - Y: label height (bottom/top)
//! - Z: thickness (up, away from the print bed)
//!
//! Face winding is **counter-clockwise (CCW) when viewed from outside**.
//! Normals point outward by the right-hand rule.
//!
//! # Example
//!
//! ```
//! use mesh_types::{cuboid, MeshBounds, Point3};
//!
//! let plate = cuboid(Point3::origin(), Point3::new(45.0, 15.0, 1.6));
//! let bounds = plate.bounds();
//!
//! assert_eq!(plate.len(), 12);
//! assert!((bounds.depth() - 1.6).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bounds;
mod shape;
mod soup;
mod traits;
mod triangle;

// Re-export core types
pub use bounds::{Aabb, Rect2};
pub use shape::{group_contours, shapes_bounds, Contour, Shape};
pub use soup::{cuboid, Facet, TriangleSoup};
pub use traits::MeshBounds;
pub use triangle::Triangle;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector2, Vector3};
