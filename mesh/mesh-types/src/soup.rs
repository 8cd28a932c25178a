//! Unindexed triangle soup.

use crate::{Aabb, MeshBounds, Triangle};
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A triangle paired with its unit normal.
///
/// Facets built through [`Facet::new`] always carry a normal consistent with
/// the vertex winding. Facets read back from a file keep whatever normal the
/// file stored (see [`Facet::from_raw`]).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Facet {
    /// Unit normal.
    pub normal: Vector3<f64>,
    /// Vertex positions in millimeters.
    pub triangle: Triangle,
}

impl Facet {
    /// Build a facet, deriving the normal from the winding.
    ///
    /// Returns `None` for zero-area triangles, which carry no orientation.
    #[must_use]
    pub fn new(triangle: Triangle) -> Option<Self> {
        triangle.normal().map(|normal| Self { normal, triangle })
    }

    /// Build a facet with an explicit normal, without checking it.
    #[inline]
    #[must_use]
    pub const fn from_raw(normal: Vector3<f64>, triangle: Triangle) -> Self {
        Self { normal, triangle }
    }
}

/// An ordered sequence of independent triangles.
///
/// No vertex sharing is assumed; each facet stands alone. Order is preserved
/// by every operation so that serialization is reproducible.
///
/// # Example
///
/// ```
/// use mesh_types::{Triangle, TriangleSoup, MeshBounds};
///
/// let mut soup = TriangleSoup::new();
/// soup.push(Triangle::from_arrays([0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 1.0, 0.0]));
/// // Collinear points are dropped.
/// soup.push(Triangle::from_arrays([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]));
///
/// assert_eq!(soup.len(), 1);
/// assert_eq!(soup.bounds().width(), 2.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TriangleSoup {
    facets: Vec<Facet>,
}

impl TriangleSoup {
    /// Create an empty soup.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { facets: Vec::new() }
    }

    /// Create an empty soup with room for `capacity` facets.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            facets: Vec::with_capacity(capacity),
        }
    }

    /// Wrap existing facets.
    #[inline]
    #[must_use]
    pub const fn from_facets(facets: Vec<Facet>) -> Self {
        Self { facets }
    }

    /// Append a triangle, computing its normal.
    ///
    /// Degenerate triangles are skipped; returns whether the triangle was kept.
    pub fn push(&mut self, triangle: Triangle) -> bool {
        match Facet::new(triangle) {
            Some(facet) => {
                self.facets.push(facet);
                true
            }
            None => false,
        }
    }

    /// Append a prepared facet as-is.
    #[inline]
    pub fn push_facet(&mut self, facet: Facet) {
        self.facets.push(facet);
    }

    /// Append every facet of `other`, preserving order.
    pub fn append(&mut self, other: &Self) {
        self.facets.extend_from_slice(&other.facets);
    }

    /// Number of facets.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.facets.len()
    }

    /// Whether the soup has no facets.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }

    /// Borrow the facets.
    #[inline]
    #[must_use]
    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }

    /// Iterate over facets.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Facet> {
        self.facets.iter()
    }

    /// Iterate over triangles without normals.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.facets.iter().map(|f| f.triangle)
    }

    /// Consume the soup, returning its facets.
    #[inline]
    #[must_use]
    pub fn into_facets(self) -> Vec<Facet> {
        self.facets
    }

    /// Translate every vertex by `offset`. Normals are unchanged.
    pub fn translate(&mut self, offset: Vector3<f64>) {
        for facet in &mut self.facets {
            facet.triangle.v0 += offset;
            facet.triangle.v1 += offset;
            facet.triangle.v2 += offset;
        }
    }

    /// Scale every vertex per axis about the origin.
    ///
    /// Normals are recomputed. A mirroring scale (odd number of negative
    /// factors) reverses each triangle so normals stay outward.
    pub fn scale(&mut self, factors: Vector3<f64>) {
        let mirrored = factors.x * factors.y * factors.z < 0.0;
        let facets = std::mem::take(&mut self.facets);
        self.facets.reserve(facets.len());
        for facet in facets {
            let [v0, v1, v2] = facet.triangle.vertices();
            let tri = Triangle::new(
                v0.coords.component_mul(&factors).into(),
                v1.coords.component_mul(&factors).into(),
                v2.coords.component_mul(&factors).into(),
            );
            self.push(if mirrored { tri.reversed() } else { tri });
        }
    }

    /// Signed enclosed volume (positive for outward-wound closed surfaces).
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        self.facets.iter().map(|f| f.triangle.signed_volume()).sum()
    }

    /// Total surface area.
    #[must_use]
    pub fn surface_area(&self) -> f64 {
        self.facets.iter().map(|f| f.triangle.area()).sum()
    }
}

impl MeshBounds for TriangleSoup {
    fn bounds(&self) -> Aabb {
        let mut aabb = Aabb::empty();
        for facet in &self.facets {
            for v in &facet.triangle.vertices() {
                aabb.expand_to_include(v);
            }
        }
        aabb
    }
}

impl<'a> IntoIterator for &'a TriangleSoup {
    type Item = &'a Facet;
    type IntoIter = std::slice::Iter<'a, Facet>;

    fn into_iter(self) -> Self::IntoIter {
        self.facets.iter()
    }
}

impl FromIterator<Facet> for TriangleSoup {
    fn from_iter<I: IntoIterator<Item = Facet>>(iter: I) -> Self {
        Self {
            facets: iter.into_iter().collect(),
        }
    }
}

/// Axis-aligned box as a closed soup of 12 triangles, normals outward.
///
/// Handy as a reference solid in tests and for boolean tool shapes.
///
/// # Example
///
/// ```
/// use mesh_types::{cuboid, Point3};
///
/// let soup = cuboid(Point3::origin(), Point3::new(1.0, 2.0, 3.0));
/// assert_eq!(soup.len(), 12);
/// assert!((soup.signed_volume() - 6.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn cuboid(min: nalgebra::Point3<f64>, max: nalgebra::Point3<f64>) -> TriangleSoup {
    let p = |x: f64, y: f64, z: f64| nalgebra::Point3::new(x, y, z);
    let c = [
        p(min.x, min.y, min.z),
        p(max.x, min.y, min.z),
        p(max.x, max.y, min.z),
        p(min.x, max.y, min.z),
        p(min.x, min.y, max.z),
        p(max.x, min.y, max.z),
        p(max.x, max.y, max.z),
        p(min.x, max.y, max.z),
    ];
    // Quads wound CCW from outside.
    let quads = [
        [0, 3, 2, 1], // bottom
        [4, 5, 6, 7], // top
        [0, 1, 5, 4], // front (-y)
        [2, 3, 7, 6], // back (+y)
        [1, 2, 6, 5], // right (+x)
        [3, 0, 4, 7], // left (-x)
    ];
    let mut soup = TriangleSoup::with_capacity(12);
    for [a, b, cc, d] in quads {
        soup.push(Triangle::new(c[a], c[b], c[cc]));
        soup.push(Triangle::new(c[a], c[cc], c[d]));
    }
    soup
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    fn unit_box() -> TriangleSoup {
        cuboid(Point3::origin(), Point3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn push_drops_degenerate() {
        let mut soup = TriangleSoup::new();
        assert!(!soup.push(Triangle::from_arrays(
            [0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0],
            [1.0, 1.0, 1.0]
        )));
        assert!(soup.is_empty());
    }

    #[test]
    fn normals_are_unit_and_match_winding() {
        for facet in &unit_box() {
            assert_relative_eq!(facet.normal.norm(), 1.0, epsilon = 1e-12);
            let expected = facet.triangle.normal().unwrap();
            assert_relative_eq!(facet.normal, expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn cuboid_normals_point_outward() {
        let soup = unit_box();
        let center = soup.bounds().center();
        for facet in &soup {
            let outward = facet.triangle.centroid() - center;
            assert!(facet.normal.dot(&outward) > 0.0);
        }
    }

    #[test]
    fn append_preserves_order_and_count() {
        let mut a = unit_box();
        let mut b = unit_box();
        b.translate(Vector3::new(5.0, 0.0, 0.0));
        a.append(&b);
        assert_eq!(a.len(), 24);
        assert_relative_eq!(a.facets()[12].triangle.v0.x, 5.0);
    }

    #[test]
    fn translate_moves_bounds() {
        let mut soup = unit_box();
        soup.translate(Vector3::new(1.0, 2.0, 3.0));
        let b = soup.bounds();
        assert_relative_eq!(b.min.z, 3.0);
        assert_relative_eq!(b.max.x, 2.0);
    }

    #[test]
    fn scale_keeps_volume_positive_when_mirrored() {
        let mut soup = unit_box();
        soup.scale(Vector3::new(2.0, -1.0, 1.0));
        assert_relative_eq!(soup.signed_volume(), 2.0, epsilon = 1e-12);
        let b = soup.bounds();
        assert_relative_eq!(b.min.y, -1.0);
    }

    #[test]
    fn empty_soup_has_empty_bounds() {
        assert!(TriangleSoup::new().bounds_opt().is_none());
    }

    #[test]
    fn surface_area_of_unit_box() {
        assert_relative_eq!(unit_box().surface_area(), 6.0, epsilon = 1e-12);
    }
}
