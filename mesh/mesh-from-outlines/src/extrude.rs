//! Straight prism extrusion of planar shapes.

use earcutr::earcut;
use mesh_types::{Contour, Point2, Point3, Shape, Triangle, TriangleSoup};
use tracing::{debug, warn};

use crate::error::{ExtrudeError, ExtrudeResult};

/// Turns a set of planar shapes into a closed 3D solid.
///
/// Implementations receive shapes in the XY plane and must return outward-wound
/// triangles spanning `z = 0` to `z = depth`. Shapes that cannot be meshed are
/// skipped rather than failing the whole set.
pub trait Extruder {
    /// Extrude every shape along +Z by `depth`.
    ///
    /// # Errors
    ///
    /// Returns an error if `depth` is not a positive finite number.
    fn extrude(&self, shapes: &[Shape], depth: f64) -> ExtrudeResult<TriangleSoup>;
}

/// Extruder producing straight-walled prisms with flat caps.
///
/// Caps are triangulated with ear clipping (holes supported); walls are two
/// triangles per outline edge. No vertices beyond the outline points are
/// introduced, so each prism is watertight.
///
/// # Example
///
/// ```
/// use mesh_from_outlines::{Extruder, PrismExtruder};
/// use mesh_types::{Contour, MeshBounds, Shape};
///
/// let square = Shape::solid(Contour::from_xy(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]));
/// let soup = PrismExtruder.extrude(&[square], 0.8).unwrap();
///
/// // 2 triangles per cap, 2 per side wall.
/// assert_eq!(soup.len(), 12);
/// assert!((soup.bounds().depth() - 0.8).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PrismExtruder;

impl Extruder for PrismExtruder {
    fn extrude(&self, shapes: &[Shape], depth: f64) -> ExtrudeResult<TriangleSoup> {
        if !depth.is_finite() || depth <= 0.0 {
            return Err(ExtrudeError::InvalidDepth(depth));
        }

        let mut soup = TriangleSoup::new();
        for (index, shape) in shapes.iter().enumerate() {
            if shape.is_degenerate() {
                debug!(index, "skipping degenerate shape");
                continue;
            }
            match extrude_shape(shape, depth) {
                Ok(prism) => soup.append(&prism),
                Err(e) => warn!(index, error = %e, "skipping shape that failed to extrude"),
            }
        }
        Ok(soup)
    }
}

/// Triangulate a shape's filled area.
///
/// Returns the ring vertices (outer first, then each hole) and counter-clockwise
/// index triples into them.
///
/// # Errors
///
/// Returns [`ExtrudeError::Triangulation`] if ear clipping fails or produces
/// no triangles.
pub fn triangulate_shape(shape: &Shape) -> ExtrudeResult<(Vec<Point2<f64>>, Vec<[usize; 3]>)> {
    let mut points: Vec<Point2<f64>> = Vec::new();
    let mut hole_starts: Vec<usize> = Vec::new();

    points.extend_from_slice(shape.outer().points());
    for hole in shape.holes() {
        hole_starts.push(points.len());
        points.extend_from_slice(hole.points());
    }

    let coords: Vec<f64> = points.iter().flat_map(|p| [p.x, p.y]).collect();
    let indices = earcut(&coords, &hole_starts, 2).map_err(|e| ExtrudeError::Triangulation {
        details: format!("{e:?}"),
    })?;
    if indices.len() < 3 || indices.len() % 3 != 0 {
        return Err(ExtrudeError::Triangulation {
            details: format!("ear clipping returned {} indices", indices.len()),
        });
    }

    let mut triangles = Vec::with_capacity(indices.len() / 3);
    for tri in indices.chunks_exact(3) {
        let (a, b, c) = (tri[0], tri[1], tri[2]);
        let cross = (points[b] - points[a]).perp(&(points[c] - points[a]));
        if cross > 0.0 {
            triangles.push([a, b, c]);
        } else if cross < 0.0 {
            triangles.push([a, c, b]);
        }
    }
    Ok((points, triangles))
}

/// Extrude one shape into a closed prism.
fn extrude_shape(shape: &Shape, depth: f64) -> ExtrudeResult<TriangleSoup> {
    let (points, caps) = triangulate_shape(shape)?;

    let wall_edges: usize = std::iter::once(shape.outer())
        .chain(shape.holes())
        .map(Contour::len)
        .sum();
    let mut soup = TriangleSoup::with_capacity(caps.len() * 2 + wall_edges * 2);

    let lift = |p: Point2<f64>, z: f64| Point3::new(p.x, p.y, z);

    // Top cap faces +Z, bottom cap faces -Z.
    for &[a, b, c] in &caps {
        soup.push(Triangle::new(
            lift(points[a], depth),
            lift(points[b], depth),
            lift(points[c], depth),
        ));
    }
    for &[a, b, c] in &caps {
        soup.push(Triangle::new(
            lift(points[a], 0.0),
            lift(points[c], 0.0),
            lift(points[b], 0.0),
        ));
    }

    // Outer ring is CCW and holes are CW, so the solid is always on the left
    // of each edge and the wall faces right.
    for ring in std::iter::once(shape.outer()).chain(shape.holes()) {
        push_walls(&mut soup, ring, depth);
    }

    Ok(soup)
}

fn push_walls(soup: &mut TriangleSoup, ring: &Contour, depth: f64) {
    let pts = ring.points();
    let n = pts.len();
    for i in 0..n {
        let a = pts[i];
        let b = pts[(i + 1) % n];
        let a0 = Point3::new(a.x, a.y, 0.0);
        let b0 = Point3::new(b.x, b.y, 0.0);
        let a1 = Point3::new(a.x, a.y, depth);
        let b1 = Point3::new(b.x, b.y, depth);
        soup.push(Triangle::new(a0, b0, b1));
        soup.push(Triangle::new(a0, b1, a1));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mesh_printability::check_watertight;
    use mesh_types::MeshBounds;

    fn square(x: f64, y: f64, size: f64) -> Contour {
        Contour::from_xy(&[(x, y), (x + size, y), (x + size, y + size), (x, y + size)])
    }

    #[test]
    fn square_prism_is_closed_with_positive_volume() {
        let soup = PrismExtruder
            .extrude(&[Shape::solid(square(0.0, 0.0, 2.0))], 0.5)
            .unwrap();
        assert_relative_eq!(soup.signed_volume(), 2.0, epsilon = 1e-12);
        let report = check_watertight(&soup, 1e-6);
        assert!(report.is_watertight(), "{report:?}");
    }

    #[test]
    fn shape_with_hole_subtracts_volume() {
        let ring = Shape::new(square(0.0, 0.0, 4.0), vec![square(1.0, 1.0, 2.0)]);
        let soup = PrismExtruder.extrude(&[ring], 1.0).unwrap();
        assert_relative_eq!(soup.signed_volume(), 12.0, epsilon = 1e-9);
        assert!(check_watertight(&soup, 1e-6).is_watertight());
    }

    #[test]
    fn clockwise_input_still_faces_outward() {
        let cw = square(0.0, 0.0, 1.0).oriented(false);
        let soup = PrismExtruder.extrude(&[Shape::solid(cw)], 1.0).unwrap();
        assert!(soup.signed_volume() > 0.0);
    }

    #[test]
    fn caps_face_up_and_down() {
        let soup = PrismExtruder
            .extrude(&[Shape::solid(square(0.0, 0.0, 1.0))], 0.8)
            .unwrap();
        for facet in &soup {
            let c = facet.triangle.centroid();
            if (c.z - 0.8).abs() < 1e-12 {
                assert_relative_eq!(facet.normal.z, 1.0, epsilon = 1e-12);
            } else if c.z.abs() < 1e-12 {
                assert_relative_eq!(facet.normal.z, -1.0, epsilon = 1e-12);
            } else {
                assert!(facet.normal.z.abs() < 1e-12);
            }
        }
    }

    #[test]
    fn degenerate_shapes_are_skipped() {
        let line = Shape::solid(Contour::from_xy(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]));
        let good = Shape::solid(square(5.0, 0.0, 1.0));
        let soup = PrismExtruder.extrude(&[line, good], 1.0).unwrap();
        assert_eq!(soup.len(), 12);
        assert_relative_eq!(soup.bounds().min.x, 5.0);
    }

    #[test]
    fn empty_input_gives_empty_soup() {
        assert!(PrismExtruder.extrude(&[], 1.0).unwrap().is_empty());
    }

    #[test]
    fn invalid_depth_is_rejected() {
        let shape = Shape::solid(square(0.0, 0.0, 1.0));
        assert!(matches!(
            PrismExtruder.extrude(std::slice::from_ref(&shape), 0.0),
            Err(ExtrudeError::InvalidDepth(_))
        ));
        assert!(PrismExtruder.extrude(&[shape], f64::NAN).is_err());
    }

    #[test]
    fn triangulation_covers_area() {
        let shape = Shape::new(square(0.0, 0.0, 4.0), vec![square(1.0, 1.0, 1.0)]);
        let (points, tris) = triangulate_shape(&shape).unwrap();
        let area: f64 = tris
            .iter()
            .map(|&[a, b, c]| 0.5 * (points[b] - points[a]).perp(&(points[c] - points[a])))
            .sum();
        assert_relative_eq!(area, 15.0, epsilon = 1e-9);
    }
}
