//! Round-trip validation of serialized meshes.
//!
//! The validator re-parses the exact bytes that will be shipped, so anything
//! lost in serialization (truncation, NaN coordinates, an empty body) is
//! caught before the file reaches a slicer.

use mesh_io::decode_stl;
use mesh_types::{Aabb, MeshBounds, TriangleSoup};
use tracing::debug;

use crate::config::ValidationConfig;
use crate::error::{ValidationError, ValidationResult};

/// Measurements of a mesh that passed validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StlReport {
    /// Axis-aligned bounds of every vertex.
    pub bounds: Aabb,
    /// Number of triangles declared and present.
    pub triangle_count: usize,
}

impl StlReport {
    /// Extent along X in mm.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.bounds.width()
    }

    /// Extent along Y in mm.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.bounds.height()
    }

    /// Extent along Z in mm.
    #[must_use]
    pub fn depth(&self) -> f64 {
        self.bounds.depth()
    }

    /// One-line description, e.g. `45.00 x 15.00 x 2.40 mm, 512 triangles`.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{:.2} x {:.2} x {:.2} mm, {} triangles",
            self.width(),
            self.height(),
            self.depth(),
            self.triangle_count
        )
    }
}

/// Parse a binary STL buffer and check it is printable.
///
/// # Errors
///
/// Returns an error if the buffer does not parse, has no or a degenerate
/// bounding box (any dimension `<= 0` or not finite), or holds fewer
/// triangles than `config.min_triangles`.
///
/// # Example
///
/// ```
/// use mesh_io::encode_stl;
/// use mesh_printability::{validate_stl, ValidationConfig, ValidationError};
/// use mesh_types::{cuboid, Point3};
///
/// let bytes = encode_stl(&cuboid(Point3::origin(), Point3::new(45.0, 15.0, 1.6))).unwrap();
///
/// let report = validate_stl(&bytes, &ValidationConfig::sanity()).unwrap();
/// assert_eq!(report.triangle_count, 12);
///
/// // Twelve triangles are too few for a full label.
/// let err = validate_stl(&bytes, &ValidationConfig::export()).unwrap_err();
/// assert!(matches!(err, ValidationError::TooFewTriangles { count: 12, min: 100 }));
/// ```
pub fn validate_stl(bytes: &[u8], config: &ValidationConfig) -> ValidationResult<StlReport> {
    let soup = decode_stl(bytes)?;
    validate_soup(&soup, config)
}

/// Check an in-memory soup with the same rules as [`validate_stl`].
///
/// # Errors
///
/// See [`validate_stl`].
pub fn validate_soup(soup: &TriangleSoup, config: &ValidationConfig) -> ValidationResult<StlReport> {
    let bounds = soup.bounds_opt().ok_or(ValidationError::MissingBounds)?;

    let (width, height, depth) = (bounds.width(), bounds.height(), bounds.depth());
    let positive = |d: f64| d.is_finite() && d > 0.0;
    // min/max skip NaN, so a poisoned vertex would not show in the box.
    let finite_vertices = soup.triangles().all(|t| t.is_finite());
    if !finite_vertices
        || !bounds.is_finite()
        || !positive(width)
        || !positive(height)
        || !positive(depth)
    {
        return Err(ValidationError::DegenerateBounds {
            width,
            height,
            depth,
        });
    }

    let count = soup.len();
    if count < config.min_triangles {
        return Err(ValidationError::TooFewTriangles {
            count,
            min: config.min_triangles,
        });
    }

    let report = StlReport {
        bounds,
        triangle_count: count,
    };
    debug!(summary = %report.summary(), "mesh validated");
    Ok(report)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mesh_io::encode_stl;
    use mesh_types::{Facet, Point3, Triangle, Vector3, cuboid};

    fn many_boxes(n: usize) -> TriangleSoup {
        let mut soup = TriangleSoup::new();
        for i in 0..n {
            #[allow(clippy::cast_precision_loss)]
            let x = i as f64 * 2.0;
            soup.append(&cuboid(
                Point3::new(x, 0.0, 0.0),
                Point3::new(x + 1.0, 15.0, 1.6),
            ));
        }
        soup
    }

    #[test]
    fn accepts_label_sized_mesh() {
        let bytes = encode_stl(&many_boxes(10)).unwrap();
        let report = validate_stl(&bytes, &ValidationConfig::export()).unwrap();
        assert_eq!(report.triangle_count, 120);
        assert_relative_eq!(report.width(), 19.0, epsilon = 1e-5);
        assert_relative_eq!(report.height(), 15.0, epsilon = 1e-5);
        assert_relative_eq!(report.depth(), 1.6, epsilon = 1e-5);
        assert_eq!(report.summary(), "19.00 x 15.00 x 1.60 mm, 120 triangles");
    }

    #[test]
    fn empty_buffer_has_no_bounds() {
        let bytes = encode_stl(&TriangleSoup::new()).unwrap();
        let err = validate_stl(&bytes, &ValidationConfig::sanity()).unwrap_err();
        assert!(matches!(err, ValidationError::MissingBounds));
    }

    #[test]
    fn flat_mesh_is_degenerate() {
        let mut soup = TriangleSoup::new();
        soup.push(Triangle::from_arrays(
            [0.0, 0.0, 0.0],
            [10.0, 0.0, 0.0],
            [0.0, 10.0, 0.0],
        ));
        let err = validate_soup(&soup, &ValidationConfig::sanity()).unwrap_err();
        match err {
            ValidationError::DegenerateBounds {
                width,
                height,
                depth,
            } => {
                assert_relative_eq!(width, 10.0);
                assert_relative_eq!(height, 10.0);
                assert_eq!(depth, 0.0);
            }
            other => panic!("unexpected error: {other}"),
        }
        // The message carries the measured dimensions.
        let msg = validate_soup(&soup, &ValidationConfig::sanity())
            .unwrap_err()
            .to_string();
        assert!(msg.contains("10.000 x 10.000 x 0.000"), "{msg}");
    }

    #[test]
    fn nan_coordinates_are_degenerate() {
        let tri = Triangle::from_arrays([0.0, 0.0, 0.0], [1.0, 0.0, f64::NAN], [0.0, 1.0, 1.0]);
        let soup = TriangleSoup::from_facets(vec![Facet::from_raw(Vector3::z(), tri)]);
        assert!(matches!(
            validate_soup(&soup, &ValidationConfig::sanity()),
            Err(ValidationError::DegenerateBounds { .. })
        ));
    }

    #[test]
    fn too_few_triangles() {
        let bytes = encode_stl(&many_boxes(8)).unwrap();
        let err = validate_stl(&bytes, &ValidationConfig::export()).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::TooFewTriangles { count: 96, min: 100 }
        ));
        assert!(validate_stl(&bytes, &ValidationConfig::sanity()).is_ok());
    }

    #[test]
    fn garbage_buffer_fails_to_decode() {
        let err = validate_stl(b"solid nope", &ValidationConfig::sanity()).unwrap_err();
        assert!(matches!(err, ValidationError::Decode(_)));
    }
}
