//! Seam closing for cut results.
//!
//! Clipping splits a face wherever a plane of the other solid crosses it, but
//! the face on the far side of the same edge is often left whole. The new
//! vertex then sits on its neighbour's edge (a T-junction) and the two faces
//! no longer share that edge. This pass welds near-coincident vertices, drops
//! slivers and doubled faces, then splits every edge that passes through a
//! vertex until all edges pair up.

use hashbrown::HashMap;
use mesh_types::{Point3, Triangle, TriangleSoup, Vector3};
use smallvec::{SmallVec, smallvec};
use tracing::debug;

/// Vertex indices of one triangle in winding order.
type Face = [usize; 3];

/// Merges vertices closer than the tolerance onto the first one seen.
struct Welder {
    tolerance: f64,
    cells: HashMap<[i64; 3], SmallVec<[usize; 2]>>,
    points: Vec<Point3<f64>>,
}

impl Welder {
    fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            cells: HashMap::new(),
            points: Vec::new(),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn cell(&self, p: &Point3<f64>) -> [i64; 3] {
        [
            (p.x / self.tolerance).floor() as i64,
            (p.y / self.tolerance).floor() as i64,
            (p.z / self.tolerance).floor() as i64,
        ]
    }

    fn insert(&mut self, p: Point3<f64>) -> usize {
        let [x, y, z] = self.cell(&p);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(ids) = self.cells.get(&[x + dx, y + dy, z + dz]) else {
                        continue;
                    };
                    if let Some(&id) = ids
                        .iter()
                        .find(|&&id| (self.points[id] - p).norm() <= self.tolerance)
                    {
                        return id;
                    }
                }
            }
        }
        let id = self.points.len();
        self.points.push(p);
        self.cells.entry([x, y, z]).or_default().push(id);
        id
    }
}

/// Vertices sorted by x for segment range queries.
struct VertexIndex<'a> {
    points: &'a [Point3<f64>],
    by_x: Vec<usize>,
    tolerance: f64,
}

impl<'a> VertexIndex<'a> {
    fn new(points: &'a [Point3<f64>], faces: &[Face], tolerance: f64) -> Self {
        let mut used = vec![false; points.len()];
        for &id in faces.iter().flatten() {
            used[id] = true;
        }
        let mut by_x: Vec<usize> = (0..points.len()).filter(|&id| used[id]).collect();
        by_x.sort_by(|&a, &b| points[a].x.total_cmp(&points[b].x).then(a.cmp(&b)));
        Self {
            points,
            by_x,
            tolerance,
        }
    }

    /// The vertex strictly inside segment `a`-`b` that lies closest to `a`.
    fn on_segment(&self, a: usize, b: usize) -> Option<usize> {
        let tol = self.tolerance;
        let (pa, pb) = (self.points[a], self.points[b]);
        let dir = pb - pa;
        let len = dir.norm();
        if len <= 2.0 * tol {
            return None;
        }
        let slack = Vector3::repeat(tol);
        let lo = pa.inf(&pb) - slack;
        let hi = pa.sup(&pb) + slack;

        let start = self.by_x.partition_point(|&id| self.points[id].x < lo.x);
        let mut best: Option<(f64, usize)> = None;
        for &id in &self.by_x[start..] {
            let p = self.points[id];
            if p.x > hi.x {
                break;
            }
            if id == a || id == b || p.y < lo.y || p.y > hi.y || p.z < lo.z || p.z > hi.z {
                continue;
            }
            let along = (p - pa).dot(&dir) / len;
            if along <= tol || along >= len - tol {
                continue;
            }
            let foot = pa + dir * (along / len);
            if (p - foot).norm() >= tol {
                continue;
            }
            if best.is_none_or(|(t, _)| along < t) {
                best = Some((along, id));
            }
        }
        best.map(|(_, id)| id)
    }

    /// First edge of `face` carrying a vertex, as (edge index, vertex).
    fn split_point(&self, face: Face) -> Option<(usize, usize)> {
        (0..3).find_map(|k| {
            self.on_segment(face[k], face[(k + 1) % 3]).map(|v| (k, v))
        })
    }
}

/// Collapsed by the weld, or thinner than `tolerance` across its longest side.
fn is_sliver(points: &[Point3<f64>], face: Face, tolerance: f64) -> bool {
    let [a, b, c] = face;
    a == b
        || b == c
        || c == a
        || Triangle::new(points[a], points[b], points[c]).height() < tolerance
}

/// Rotate so the smallest index comes first, keeping the winding.
fn canonical(face: Face) -> Face {
    let k = (0..3).min_by_key(|&k| face[k]).unwrap_or(0);
    [face[k], face[(k + 1) % 3], face[(k + 2) % 3]]
}

/// Drop repeated faces and cancel faces paired with their own reverse.
fn drop_overlaps(faces: Vec<Face>) -> Vec<Face> {
    let mut keep = vec![true; faces.len()];
    let mut open: HashMap<Face, usize> = HashMap::new();
    for (i, &face) in faces.iter().enumerate() {
        let reverse = canonical([face[0], face[2], face[1]]);
        if let Some(j) = open.remove(&reverse) {
            keep[i] = false;
            keep[j] = false;
            continue;
        }
        let key = canonical(face);
        if open.contains_key(&key) {
            keep[i] = false;
        } else {
            open.insert(key, i);
        }
    }
    faces
        .into_iter()
        .zip(keep)
        .filter_map(|(face, kept)| kept.then_some(face))
        .collect()
}

/// Weld the soup and split edges at the vertices lying on them.
///
/// Positions move by at most `tolerance`; every output vertex is one of the
/// input vertices. A non-positive tolerance returns the soup unchanged.
pub(crate) fn close_seams(soup: &TriangleSoup, tolerance: f64) -> TriangleSoup {
    if !(tolerance > 0.0 && tolerance.is_finite()) {
        return soup.clone();
    }

    let mut welder = Welder::new(tolerance);
    let faces: Vec<Face> = soup
        .triangles()
        .map(|t| t.vertices().map(|v| welder.insert(v)))
        .collect();
    let points = welder.points;

    let before = faces.len();
    let faces: Vec<Face> = faces
        .into_iter()
        .filter(|&face| !is_sliver(&points, face, tolerance))
        .collect();
    let faces = drop_overlaps(faces);
    let index = VertexIndex::new(&points, &faces, tolerance);

    let mut out = TriangleSoup::with_capacity(faces.len() * 2);
    let mut splits = 0usize;
    for face in &faces {
        let mut pending: SmallVec<[Face; 4]> = smallvec![*face];
        while let Some(current) = pending.pop() {
            if let Some((k, v)) = index.split_point(current) {
                let (p, q, r) = (current[k], current[(k + 1) % 3], current[(k + 2) % 3]);
                pending.push([v, q, r]);
                pending.push([p, v, r]);
                splits += 1;
            } else {
                let [a, b, c] = current.map(|id| points[id]);
                out.push(Triangle::new(a, b, c));
            }
        }
    }

    debug!(
        input = soup.len(),
        dropped = before - faces.len(),
        splits,
        output = out.len(),
        vertices = points.len(),
        "closed seams"
    );
    out
}
