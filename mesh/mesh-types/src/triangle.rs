//! A single STL facet's corners.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Three corners in millimeters, wound counter-clockwise when seen from
/// outside the solid.
///
/// Binary STL stores exactly this plus a normal, so the type carries no
/// indices and no adjacency.
///
/// # Example
///
/// ```
/// use mesh_types::Triangle;
///
/// // One half of a 4 x 2 mm plate top at z = 1.6
/// let top = Triangle::from_arrays([0.0, 0.0, 1.6], [4.0, 0.0, 1.6], [4.0, 2.0, 1.6]);
///
/// assert!((top.area() - 4.0).abs() < 1e-12);
/// assert_eq!(top.normal().unwrap().z, 1.0);
/// assert!(top.is_finite());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Triangle {
    /// First corner.
    pub v0: Point3<f64>,
    /// Second corner.
    pub v1: Point3<f64>,
    /// Third corner.
    pub v2: Point3<f64>,
}

impl Triangle {
    /// Corners in winding order.
    #[inline]
    #[must_use]
    pub const fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) -> Self {
        Self { v0, v1, v2 }
    }

    /// Build from `[x, y, z]` arrays, as STL readers and tests hold them.
    #[inline]
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn from_arrays(v0: [f64; 3], v1: [f64; 3], v2: [f64; 3]) -> Self {
        Self::new(Point3::from(v0), Point3::from(v1), Point3::from(v2))
    }

    /// Corners as an array, `v0` first.
    #[inline]
    #[must_use]
    pub const fn vertices(&self) -> [Point3<f64>; 3] {
        [self.v0, self.v1, self.v2]
    }

    /// Cross product of the two edges leaving `v0`: twice the area, pointing
    /// out of the solid.
    #[inline]
    #[must_use]
    pub fn scaled_normal(&self) -> Vector3<f64> {
        (self.v1 - self.v0).cross(&(self.v2 - self.v0))
    }

    /// Unit outward normal, or `None` when the corners are collinear or not
    /// finite. STL writers emit this vector ahead of the corners.
    #[must_use]
    pub fn normal(&self) -> Option<Vector3<f64>> {
        let n = self.scaled_normal();
        let len = n.norm();
        (len.is_finite() && len > f64::EPSILON).then(|| n / len)
    }

    /// Area in mm².
    #[inline]
    #[must_use]
    pub fn area(&self) -> f64 {
        0.5 * self.scaled_normal().norm()
    }

    /// Length of the longest side.
    #[must_use]
    pub fn longest_edge(&self) -> f64 {
        let [a, b, c] = self.vertices();
        (b - a).norm().max((c - b).norm()).max((a - c).norm())
    }

    /// Distance from the longest side to the opposite corner.
    ///
    /// Cut seams produce needle-thin facets whose area is tiny but not zero;
    /// this is the measure that tells them apart from small, well-shaped ones.
    #[must_use]
    pub fn height(&self) -> f64 {
        let longest = self.longest_edge();
        if longest > 0.0 { 2.0 * self.area() / longest } else { 0.0 }
    }

    /// Mean of the corners.
    #[inline]
    #[must_use]
    pub fn centroid(&self) -> Point3<f64> {
        Point3::from((self.v0.coords + self.v1.coords + self.v2.coords) / 3.0)
    }

    /// Contribution of this facet to the enclosed volume (divergence theorem,
    /// tetrahedron against the origin).
    #[inline]
    #[must_use]
    pub fn signed_volume(&self) -> f64 {
        self.v0.coords.dot(&self.v1.coords.cross(&self.v2.coords)) / 6.0
    }

    /// Same corners, opposite winding.
    #[inline]
    #[must_use]
    pub const fn reversed(&self) -> Self {
        Self::new(self.v0, self.v2, self.v1)
    }

    /// Every coordinate is a finite number.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.vertices().iter().all(|v| v.iter().all(|c| c.is_finite()))
    }
}
