//! Boolean subtraction (CSG) for closed triangle soups.
//!
//! This crate cuts one solid out of another, the operation behind debossed
//! text and icons. Each input is converted to convex polygons and organized
//! into a binary space partitioning tree; the trees clip each other and the
//! survivors are re-triangulated.
//!
//! # Features
//!
//! - **BSP difference** with iterative, arena-backed trees
//! - **Sequential cuts** of several tools from one base
//! - **Closed seams**: cut edges are welded and split so results stay watertight
//! - **Result checks** rejecting empty, inverted or oversized output
//! - **Pluggable** through the [`BooleanSubtractor`] trait
//!
//! # Quick Start
//!
//! ```
//! use mesh_boolean::difference;
//! use mesh_types::{cuboid, MeshBounds, Point3};
//!
//! let plate = cuboid(Point3::origin(), Point3::new(45.0, 15.0, 1.6));
//! let slot = cuboid(Point3::new(10.0, 5.0, 1.1), Point3::new(35.0, 10.0, 1.9));
//!
//! let cut = difference(&plate, &slot).unwrap();
//! assert!(cut.signed_volume() < plate.signed_volume());
//! assert!((cut.bounds().width() - 45.0).abs() < 1e-9);
//! ```
//!
//! # Configuration
//!
//! ```
//! use mesh_boolean::{BooleanConfig, BspSubtractor};
//!
//! let subtractor = BspSubtractor::new(BooleanConfig::precise());
//! assert_eq!(subtractor.config().plane_sample_size, 40);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod bsp;
mod config;
mod error;
mod operation;
mod polygon;
mod seams;

pub use config::BooleanConfig;
pub use error::{BooleanError, BooleanResult};
pub use operation::{BooleanSubtractor, BspSubtractor, difference, sequential_difference};
