//! Mesh file I/O for label meshes.
//!
//! This crate encodes and decodes triangle soups in the **binary STL** layout,
//! the only mesh format the label pipeline emits.
//!
//! - [`encode_stl`] / [`write_stl`] - Serialize a [`TriangleSoup`](mesh_types::TriangleSoup)
//! - [`decode_stl`] - Parse a buffer back into a soup
//! - [`save_stl`] / [`load_stl`] - File convenience wrappers
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with no rendering or UI dependencies.
//!
//! # Example
//!
//! ```
//! use mesh_io::{decode_stl, encode_stl};
//! use mesh_types::{cuboid, MeshBounds, Point3};
//!
//! let plate = cuboid(Point3::origin(), Point3::new(45.0, 15.0, 1.6));
//! let bytes = encode_stl(&plate).unwrap();
//! let parsed = decode_stl(&bytes).unwrap();
//!
//! assert_eq!(parsed.len(), plate.len());
//! assert!((parsed.bounds().width() - 45.0).abs() < 1e-5);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod stl;

pub use error::{IoError, IoResult};
pub use stl::{
    HEADER_SIZE, TRIANGLE_SIZE, decode_stl, encode_stl, encoded_len, load_stl, save_stl, write_stl,
};
