//! Planar outlines: closed contours and shapes with holes.
//!
//! Contours are stored open (the closing edge from the last point back to the
//! first is implied). A [`Shape`] always keeps its outer ring counter-clockwise
//! and its holes clockwise, so extruders can rely on the winding.

use nalgebra::Point2;

use crate::Rect2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Points closer than this are merged when cleaning a ring.
const DUPLICATE_EPSILON: f64 = 1e-9;

/// A closed polygon ring in the plane.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Contour {
    points: Vec<Point2<f64>>,
}

impl Contour {
    /// Build a contour, dropping repeated consecutive points and an explicit
    /// closing point equal to the first.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{Contour, Point2};
    ///
    /// let ring = Contour::new(vec![
    ///     Point2::new(0.0, 0.0),
    ///     Point2::new(1.0, 0.0),
    ///     Point2::new(1.0, 0.0),
    ///     Point2::new(0.0, 1.0),
    ///     Point2::new(0.0, 0.0),
    /// ]);
    /// assert_eq!(ring.len(), 3);
    /// assert!(ring.is_ccw());
    /// ```
    #[must_use]
    pub fn new(points: Vec<Point2<f64>>) -> Self {
        let mut cleaned: Vec<Point2<f64>> = Vec::with_capacity(points.len());
        for p in points {
            if !p.x.is_finite() || !p.y.is_finite() {
                continue;
            }
            if cleaned
                .last()
                .is_some_and(|q| (p - q).norm_squared() <= DUPLICATE_EPSILON * DUPLICATE_EPSILON)
            {
                continue;
            }
            cleaned.push(p);
        }
        while cleaned.len() >= 2 {
            let first = cleaned[0];
            let last = cleaned[cleaned.len() - 1];
            if (first - last).norm_squared() <= DUPLICATE_EPSILON * DUPLICATE_EPSILON {
                cleaned.pop();
            } else {
                break;
            }
        }
        Self { points: cleaned }
    }

    /// Build a contour from `(x, y)` pairs.
    #[must_use]
    pub fn from_xy(points: &[(f64, f64)]) -> Self {
        Self::new(points.iter().map(|&(x, y)| Point2::new(x, y)).collect())
    }

    /// Ring vertices, without the closing duplicate.
    #[inline]
    #[must_use]
    pub fn points(&self) -> &[Point2<f64>] {
        &self.points
    }

    /// Number of distinct vertices.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the ring has no vertices.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Shoelace area, positive for counter-clockwise rings.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut twice = 0.0;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            twice += a.x * b.y - b.x * a.y;
        }
        twice * 0.5
    }

    /// Whether the ring winds counter-clockwise.
    #[inline]
    #[must_use]
    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// A ring with fewer than three points or no enclosed area.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 3 || self.signed_area().abs() <= f64::EPSILON
    }

    /// Reverse the winding in place.
    pub fn reverse(&mut self) {
        self.points.reverse();
    }

    /// Return the ring wound counter-clockwise (`ccw == true`) or clockwise.
    #[must_use]
    pub fn oriented(mut self, ccw: bool) -> Self {
        if self.is_ccw() != ccw {
            self.reverse();
        }
        self
    }

    /// Extent of the ring.
    #[must_use]
    pub fn bounds(&self) -> Rect2 {
        let mut rect = Rect2::empty();
        for p in &self.points {
            rect.expand_to_include(p);
        }
        rect
    }

    /// Even-odd point-in-polygon test.
    #[must_use]
    pub fn contains_point(&self, p: &Point2<f64>) -> bool {
        let n = self.points.len();
        if n < 3 {
            return false;
        }
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[j];
            if (a.y > p.y) != (b.y > p.y) {
                let x_cross = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
                if p.x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Whether every vertex of `other` lies inside this ring.
    ///
    /// Valid for rings that do not cross each other, which holds for glyph
    /// and icon outlines.
    #[must_use]
    pub fn contains_contour(&self, other: &Self) -> bool {
        !other.points.is_empty() && other.points.iter().all(|p| self.contains_point(p))
    }

    /// Apply a point transform, re-cleaning the result.
    #[must_use]
    pub fn map_points(&self, f: impl Fn(Point2<f64>) -> Point2<f64>) -> Self {
        Self::new(self.points.iter().copied().map(f).collect())
    }
}

/// One filled region: an outer boundary with optional holes.
///
/// # Example
///
/// ```
/// use mesh_types::{Contour, Shape};
///
/// let outer = Contour::from_xy(&[(0.0, 0.0), (0.0, 4.0), (4.0, 4.0), (4.0, 0.0)]);
/// let hole = Contour::from_xy(&[(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0)]);
/// let shape = Shape::new(outer, vec![hole]);
///
/// assert!(shape.outer().is_ccw());
/// assert!(!shape.holes()[0].is_ccw());
/// assert!((shape.area() - 12.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Shape {
    outer: Contour,
    holes: Vec<Contour>,
}

impl Shape {
    /// Build a shape, normalizing winding (outer CCW, holes CW) and dropping
    /// degenerate holes.
    #[must_use]
    pub fn new(outer: Contour, holes: Vec<Contour>) -> Self {
        Self {
            outer: outer.oriented(true),
            holes: holes
                .into_iter()
                .filter(|h| !h.is_degenerate())
                .map(|h| h.oriented(false))
                .collect(),
        }
    }

    /// A shape without holes.
    #[must_use]
    pub fn solid(outer: Contour) -> Self {
        Self::new(outer, Vec::new())
    }

    /// The outer ring (counter-clockwise).
    #[inline]
    #[must_use]
    pub fn outer(&self) -> &Contour {
        &self.outer
    }

    /// The hole rings (clockwise).
    #[inline]
    #[must_use]
    pub fn holes(&self) -> &[Contour] {
        &self.holes
    }

    /// Whether the outer ring encloses no area.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.outer.is_degenerate()
    }

    /// Filled area (outer minus holes).
    #[must_use]
    pub fn area(&self) -> f64 {
        self.outer.signed_area() + self.holes.iter().map(Contour::signed_area).sum::<f64>()
    }

    /// Extent of the outer ring.
    #[must_use]
    pub fn bounds(&self) -> Rect2 {
        self.outer.bounds()
    }

    /// Apply a point transform to every ring. Winding is re-normalized, so
    /// mirroring transforms are safe.
    #[must_use]
    pub fn map_points(&self, f: impl Fn(Point2<f64>) -> Point2<f64>) -> Self {
        Self::new(
            self.outer.map_points(&f),
            self.holes.iter().map(|h| h.map_points(&f)).collect(),
        )
    }
}

/// Combined extent of a shape set. Empty when the set is empty.
#[must_use]
pub fn shapes_bounds(shapes: &[Shape]) -> Rect2 {
    shapes
        .iter()
        .fold(Rect2::empty(), |acc, s| acc.union(&s.bounds()))
}

/// Group loose rings into shapes by containment depth.
///
/// A ring nested inside an even number of others is an outer boundary; one
/// nested inside an odd number is a hole of its innermost enclosing ring.
/// Degenerate rings are discarded. Output order follows input order of the
/// outer rings.
///
/// # Example
///
/// ```
/// use mesh_types::{Contour, group_contours};
///
/// // An "O": outer ring plus counter.
/// let rings = vec![
///     Contour::from_xy(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]),
///     Contour::from_xy(&[(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0)]),
/// ];
/// let shapes = group_contours(rings);
/// assert_eq!(shapes.len(), 1);
/// assert_eq!(shapes[0].holes().len(), 1);
/// ```
#[must_use]
pub fn group_contours(contours: Vec<Contour>) -> Vec<Shape> {
    let rings: Vec<Contour> = contours.into_iter().filter(|c| !c.is_degenerate()).collect();
    let areas: Vec<f64> = rings.iter().map(|r| r.signed_area().abs()).collect();

    // Innermost enclosing ring and nesting depth of each ring.
    let mut parent: Vec<Option<usize>> = vec![None; rings.len()];
    let mut depth: Vec<usize> = vec![0; rings.len()];
    for i in 0..rings.len() {
        for j in 0..rings.len() {
            if i == j || areas[j] <= areas[i] || !rings[j].contains_contour(&rings[i]) {
                continue;
            }
            depth[i] += 1;
            if parent[i].is_none_or(|p| areas[j] < areas[p]) {
                parent[i] = Some(j);
            }
        }
    }

    let mut holes: Vec<Vec<Contour>> = vec![Vec::new(); rings.len()];
    for i in 0..rings.len() {
        if depth[i] % 2 == 1 {
            if let Some(p) = parent[i] {
                holes[p].push(rings[i].clone());
            }
        }
    }

    rings
        .into_iter()
        .zip(holes)
        .enumerate()
        .filter(|(i, _)| depth[*i] % 2 == 0)
        .map(|(_, (outer, holes))| Shape::new(outer, holes))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square(x: f64, y: f64, size: f64) -> Contour {
        Contour::from_xy(&[(x, y), (x + size, y), (x + size, y + size), (x, y + size)])
    }

    #[test]
    fn new_drops_duplicates_and_closing_point() {
        let ring = Contour::from_xy(&[(0.0, 0.0), (1.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
        assert_eq!(ring.len(), 3);
    }

    #[test]
    fn new_drops_non_finite_points() {
        let ring = Contour::from_xy(&[(0.0, 0.0), (f64::NAN, 0.0), (1.0, 0.0), (0.0, 1.0)]);
        assert_eq!(ring.len(), 3);
    }

    #[test]
    fn signed_area_sign_follows_winding() {
        let ccw = square(0.0, 0.0, 2.0);
        assert_relative_eq!(ccw.signed_area(), 4.0);
        let cw = ccw.clone().oriented(false);
        assert_relative_eq!(cw.signed_area(), -4.0);
    }

    #[test]
    fn degenerate_rings() {
        assert!(Contour::from_xy(&[(0.0, 0.0), (1.0, 1.0)]).is_degenerate());
        assert!(Contour::from_xy(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]).is_degenerate());
        assert!(!square(0.0, 0.0, 1.0).is_degenerate());
    }

    #[test]
    fn point_in_polygon() {
        let sq = square(0.0, 0.0, 2.0);
        assert!(sq.contains_point(&Point2::new(1.0, 1.0)));
        assert!(!sq.contains_point(&Point2::new(3.0, 1.0)));
        assert!(!sq.contains_point(&Point2::new(-0.5, 1.0)));
    }

    #[test]
    fn shape_normalizes_winding() {
        let outer = square(0.0, 0.0, 4.0).oriented(false);
        let hole = square(1.0, 1.0, 1.0);
        let shape = Shape::new(outer, vec![hole]);
        assert!(shape.outer().is_ccw());
        assert!(!shape.holes()[0].is_ccw());
        assert_relative_eq!(shape.area(), 15.0);
    }

    #[test]
    fn mirrored_map_keeps_orientation() {
        let shape = Shape::new(square(0.0, 0.0, 4.0), vec![square(1.0, 1.0, 1.0)]);
        let flipped = shape.map_points(|p| Point2::new(p.x, -p.y));
        assert!(flipped.outer().is_ccw());
        assert!(!flipped.holes()[0].is_ccw());
        assert_relative_eq!(flipped.bounds().min.y, -4.0);
    }

    #[test]
    fn grouping_handles_nested_islands() {
        // Outer, its hole, and an island inside the hole.
        let rings = vec![
            square(0.0, 0.0, 10.0),
            square(2.0, 2.0, 6.0),
            square(4.0, 4.0, 2.0),
            square(20.0, 0.0, 1.0),
        ];
        let shapes = group_contours(rings);
        assert_eq!(shapes.len(), 3);
        assert_eq!(shapes[0].holes().len(), 1);
        assert!(shapes[1].holes().is_empty());
        assert_relative_eq!(shapes[1].area(), 4.0);
        assert_relative_eq!(shapes[2].area(), 1.0);
    }

    #[test]
    fn grouping_discards_degenerate_rings() {
        let rings = vec![Contour::from_xy(&[(0.0, 0.0), (1.0, 0.0)]), square(0.0, 0.0, 1.0)];
        assert_eq!(group_contours(rings).len(), 1);
    }

    #[test]
    fn bounds_of_shape_set() {
        let shapes = vec![Shape::solid(square(0.0, 0.0, 1.0)), Shape::solid(square(3.0, 2.0, 1.0))];
        let b = shapes_bounds(&shapes);
        assert_relative_eq!(b.width(), 4.0);
        assert_relative_eq!(b.height(), 3.0);
        assert!(shapes_bounds(&[]).is_empty());
    }
}
