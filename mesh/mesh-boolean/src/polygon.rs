//! Planes and convex polygons used by the BSP tree.

use mesh_types::{Point3, Triangle, TriangleSoup, Vector3};
use smallvec::SmallVec;

/// Point classification bits. A polygon's class is the OR of its vertices'.
pub(crate) const COPLANAR: u8 = 0;
pub(crate) const FRONT: u8 = 1;
pub(crate) const BACK: u8 = 2;
pub(crate) const SPANNING: u8 = 3;

/// Oriented plane `normal . p = w` with a unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Plane {
    pub normal: Vector3<f64>,
    pub w: f64,
}

impl Plane {
    /// Plane through three points, or `None` if they are collinear.
    pub fn from_points(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> Option<Self> {
        let n = (b - a).cross(&(c - a));
        let len = n.norm();
        if !(len.is_finite() && len > f64::EPSILON) {
            return None;
        }
        let normal = n / len;
        Some(Self {
            normal,
            w: normal.dot(&a.coords),
        })
    }

    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    #[inline]
    pub fn classify(&self, point: &Point3<f64>, epsilon: f64) -> u8 {
        let t = self.normal.dot(&point.coords) - self.w;
        if t < -epsilon {
            BACK
        } else if t > epsilon {
            FRONT
        } else {
            COPLANAR
        }
    }

    /// Class of a whole polygon relative to this plane.
    pub fn classify_polygon(&self, polygon: &Polygon, epsilon: f64) -> u8 {
        polygon
            .vertices
            .iter()
            .fold(COPLANAR, |acc, v| acc | self.classify(v, epsilon))
    }

    /// Sort `polygon` into `out`, splitting it if it crosses this plane.
    ///
    /// Coplanar polygons go to the coplanar front list when they face the
    /// same way as the plane, otherwise to the coplanar back list. Split
    /// pieces keep the parent's plane.
    pub fn split_polygon(&self, polygon: Polygon, epsilon: f64, out: &mut Split) {
        let types: SmallVec<[u8; 8]> = polygon
            .vertices
            .iter()
            .map(|v| self.classify(v, epsilon))
            .collect();
        let class = types.iter().fold(COPLANAR, |acc, &t| acc | t);

        match class {
            COPLANAR => {
                if self.normal.dot(&polygon.plane.normal) > 0.0 {
                    out.coplanar_front.push(polygon);
                } else {
                    out.coplanar_back.push(polygon);
                }
            }
            FRONT => out.front.push(polygon),
            BACK => out.back.push(polygon),
            _ => {
                let n = polygon.vertices.len();
                let mut front: SmallVec<[Point3<f64>; 8]> = SmallVec::new();
                let mut back: SmallVec<[Point3<f64>; 8]> = SmallVec::new();

                for i in 0..n {
                    let j = (i + 1) % n;
                    let (ti, tj) = (types[i], types[j]);
                    let vi = polygon.vertices[i];
                    let vj = polygon.vertices[j];

                    if ti != BACK {
                        front.push(vi);
                    }
                    if ti != FRONT {
                        back.push(vi);
                    }
                    if (ti | tj) == SPANNING {
                        let denom = self.normal.dot(&(vj - vi));
                        if denom.abs() > epsilon {
                            let t = (self.w - self.normal.dot(&vi.coords)) / denom;
                            let v = vi + (vj - vi) * t;
                            front.push(v);
                            back.push(v);
                        }
                    }
                }

                if front.len() >= 3 {
                    out.front.push(Polygon {
                        vertices: front,
                        plane: polygon.plane,
                    });
                }
                if back.len() >= 3 {
                    out.back.push(Polygon {
                        vertices: back,
                        plane: polygon.plane,
                    });
                }
            }
        }
    }
}

/// Output buckets of [`Plane::split_polygon`].
#[derive(Debug, Default)]
pub(crate) struct Split {
    pub coplanar_front: Vec<Polygon>,
    pub coplanar_back: Vec<Polygon>,
    pub front: Vec<Polygon>,
    pub back: Vec<Polygon>,
}

/// Convex planar polygon with counter-clockwise vertices seen from the front.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Polygon {
    pub vertices: SmallVec<[Point3<f64>; 8]>,
    pub plane: Plane,
}

impl Polygon {
    /// Polygon from a triangle, or `None` if the triangle has no area.
    pub fn from_triangle(triangle: &Triangle) -> Option<Self> {
        let plane = Plane::from_points(&triangle.v0, &triangle.v1, &triangle.v2)?;
        Some(Self {
            vertices: SmallVec::from_slice(&triangle.vertices()),
            plane,
        })
    }

    pub fn flip(&mut self) {
        self.vertices.reverse();
        self.plane.flip();
    }

    /// Fan-triangulate into `soup`, dropping slivers.
    pub fn push_triangles(&self, soup: &mut TriangleSoup) {
        let v = &self.vertices;
        for i in 1..v.len().saturating_sub(1) {
            soup.push(Triangle::new(v[0], v[i], v[i + 1]));
        }
    }
}

/// Convert every non-degenerate triangle of a soup into a polygon.
pub(crate) fn soup_to_polygons(soup: &TriangleSoup) -> Vec<Polygon> {
    soup.triangles()
        .filter_map(|t| Polygon::from_triangle(&t))
        .collect()
}

/// Fan-triangulate polygons back into a soup.
pub(crate) fn polygons_to_soup(polygons: &[Polygon]) -> TriangleSoup {
    let mut soup = TriangleSoup::with_capacity(polygons.len() * 2);
    for polygon in polygons {
        polygon.push_triangles(&mut soup);
    }
    soup
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPS: f64 = 1e-5;

    fn xy_square() -> Polygon {
        let mut p = Polygon::from_triangle(&Triangle::from_arrays(
            [-1.0, -1.0, 0.0],
            [1.0, -1.0, 0.0],
            [1.0, 1.0, 0.0],
        ))
        .unwrap();
        p.vertices.push(Point3::new(-1.0, 1.0, 0.0));
        p
    }

    #[test]
    fn plane_from_points_is_unit() {
        let p = Plane::from_points(
            &Point3::new(0.0, 0.0, 2.0),
            &Point3::new(1.0, 0.0, 2.0),
            &Point3::new(0.0, 1.0, 2.0),
        )
        .unwrap();
        assert_relative_eq!(p.normal, Vector3::z());
        assert_relative_eq!(p.w, 2.0);
        assert!(
            Plane::from_points(&Point3::origin(), &Point3::new(1.0, 0.0, 0.0), &Point3::new(2.0, 0.0, 0.0))
                .is_none()
        );
    }

    #[test]
    fn spanning_polygon_is_split_in_two() {
        let plane = Plane {
            normal: Vector3::x(),
            w: 0.0,
        };
        let mut out = Split::default();
        plane.split_polygon(xy_square(), EPS, &mut out);
        assert_eq!(out.front.len(), 1);
        assert_eq!(out.back.len(), 1);
        assert!(out.front[0].vertices.iter().all(|v| v.x >= -EPS));
        assert!(out.back[0].vertices.iter().all(|v| v.x <= EPS));
        assert_eq!(out.front[0].vertices.len(), 4);
        assert_eq!(out.front[0].plane, xy_square().plane);
    }

    #[test]
    fn coplanar_polygon_sorted_by_facing() {
        let up = Plane {
            normal: Vector3::z(),
            w: 0.0,
        };
        let mut down = up;
        down.flip();

        let mut out = Split::default();
        up.split_polygon(xy_square(), EPS, &mut out);
        down.split_polygon(xy_square(), EPS, &mut out);
        assert_eq!(out.coplanar_front.len(), 1);
        assert_eq!(out.coplanar_back.len(), 1);
    }

    #[test]
    fn flip_reverses_orientation() {
        let mut p = xy_square();
        p.flip();
        assert_relative_eq!(p.plane.normal.z, -1.0);
        let mut soup = TriangleSoup::new();
        p.push_triangles(&mut soup);
        assert_eq!(soup.len(), 2);
        assert!(soup.iter().all(|f| f.normal.z < 0.0));
    }
}
