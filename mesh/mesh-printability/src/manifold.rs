//! Edge-manifold check for triangle soups.

use hashbrown::HashMap;
use mesh_types::{Point3, TriangleSoup};
use tracing::debug;

/// Edge usage summary of a soup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatertightReport {
    /// Edges used by exactly one triangle.
    pub open_edges: usize,
    /// Edges used by more than two triangles.
    pub non_manifold_edges: usize,
    /// Distinct edges after welding.
    pub edge_count: usize,
}

impl WatertightReport {
    /// Every edge is shared by exactly two triangles.
    #[must_use]
    pub const fn is_watertight(&self) -> bool {
        self.open_edges == 0 && self.non_manifold_edges == 0
    }
}

/// Weld vertices closer than `tolerance` and count how often each edge is
/// used.
///
/// A closed 2-manifold uses every edge exactly twice. Soups built by
/// concatenating disjoint closed solids also pass.
///
/// # Example
///
/// ```
/// use mesh_printability::check_watertight;
/// use mesh_types::{cuboid, Point3};
///
/// let mut soup = cuboid(Point3::origin(), Point3::new(1.0, 1.0, 1.0));
/// assert!(check_watertight(&soup, 1e-6).is_watertight());
///
/// soup = soup.iter().skip(1).copied().collect();
/// let report = check_watertight(&soup, 1e-6);
/// assert_eq!(report.open_edges, 3);
/// ```
#[must_use]
pub fn check_watertight(soup: &TriangleSoup, tolerance: f64) -> WatertightReport {
    let cell = if tolerance > 0.0 && tolerance.is_finite() {
        tolerance
    } else {
        1e-9
    };

    let mut vertex_ids: HashMap<[i64; 3], u32> = HashMap::new();
    let mut weld = |p: &Point3<f64>| -> u32 {
        #[allow(clippy::cast_possible_truncation)]
        let key = [
            (p.x / cell).round() as i64,
            (p.y / cell).round() as i64,
            (p.z / cell).round() as i64,
        ];
        #[allow(clippy::cast_possible_truncation)]
        let next = vertex_ids.len() as u32;
        *vertex_ids.entry(key).or_insert(next)
    };

    // Count edge usage, smaller index first
    let mut edge_count: HashMap<(u32, u32), u32> = HashMap::new();
    for facet in soup {
        let [a, b, c] = facet.triangle.vertices().map(|v| weld(&v));
        for (i, j) in [(a, b), (b, c), (c, a)] {
            if i == j {
                continue;
            }
            *edge_count.entry((i.min(j), i.max(j))).or_insert(0) += 1;
        }
    }

    let report = WatertightReport {
        open_edges: edge_count.values().filter(|&&c| c == 1).count(),
        non_manifold_edges: edge_count.values().filter(|&&c| c > 2).count(),
        edge_count: edge_count.len(),
    };
    debug!(
        vertices = vertex_ids.len(),
        edges = report.edge_count,
        open = report.open_edges,
        non_manifold = report.non_manifold_edges,
        "checked edge manifoldness"
    );
    report
}
