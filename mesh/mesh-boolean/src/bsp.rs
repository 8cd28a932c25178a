//! Binary space partitioning tree over convex polygons.
//!
//! Nodes live in a flat arena and refer to their children by index. Every
//! traversal uses an explicit work stack, so deep trees built from finely
//! tessellated outlines cannot overflow the call stack.

use tracing::trace;

use crate::config::BooleanConfig;
use crate::polygon::{BACK, COPLANAR, FRONT, Plane, Polygon, Split};

/// Weight of a spanning polygon relative to front/back imbalance.
const SPAN_WEIGHT: f64 = 8.0;

#[derive(Debug, Clone, Default)]
struct Node {
    /// Splitting plane, `None` only for the root of an empty tree.
    plane: Option<Plane>,
    front: Option<usize>,
    back: Option<usize>,
    /// Polygons lying in `plane`.
    polygons: Vec<Polygon>,
}

/// A solid represented as a BSP tree of its boundary polygons.
#[derive(Debug, Clone)]
pub(crate) struct BspTree {
    nodes: Vec<Node>,
    epsilon: f64,
    sample_size: usize,
}

impl BspTree {
    /// Build a tree from boundary polygons.
    pub fn new(polygons: Vec<Polygon>, config: &BooleanConfig) -> Self {
        let mut tree = Self {
            nodes: vec![Node::default()],
            epsilon: config.classification_tolerance,
            sample_size: config.plane_sample_size.max(1),
        };
        tree.build(polygons);
        tree
    }

    /// Number of nodes in the arena.
    #[cfg(test)]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Swap solid and empty space.
    pub fn invert(&mut self) {
        for node in &mut self.nodes {
            for polygon in &mut node.polygons {
                polygon.flip();
            }
            if let Some(plane) = node.plane.as_mut() {
                plane.flip();
            }
            std::mem::swap(&mut node.front, &mut node.back);
        }
    }

    /// Remove the parts of `polygons` that lie inside this solid.
    pub fn clip_polygons(&self, polygons: Vec<Polygon>) -> Vec<Polygon> {
        let mut kept = Vec::with_capacity(polygons.len());
        let mut stack = vec![(0usize, polygons)];

        while let Some((id, polys)) = stack.pop() {
            let node = &self.nodes[id];
            let Some(plane) = node.plane else {
                kept.extend(polys);
                continue;
            };

            let mut split = Split::default();
            for polygon in polys {
                plane.split_polygon(polygon, self.epsilon, &mut split);
            }
            let mut front = split.front;
            front.append(&mut split.coplanar_front);
            let mut back = split.back;
            back.append(&mut split.coplanar_back);

            match node.front {
                Some(child) => stack.push((child, front)),
                None => kept.extend(front),
            }
            // Without a back child the back half-space is solid.
            if let Some(child) = node.back {
                stack.push((child, back));
            }
        }
        kept
    }

    /// Remove every polygon of this tree that lies inside `other`.
    pub fn clip_to(&mut self, other: &Self) {
        for node in &mut self.nodes {
            let polygons = std::mem::take(&mut node.polygons);
            node.polygons = other.clip_polygons(polygons);
        }
    }

    /// Every polygon in the tree, in arena order.
    pub fn all_polygons(&self) -> Vec<Polygon> {
        self.nodes
            .iter()
            .flat_map(|n| n.polygons.iter().cloned())
            .collect()
    }

    /// Insert polygons, extending the tree below existing planes.
    pub fn build(&mut self, polygons: Vec<Polygon>) {
        let mut stack = vec![(0usize, polygons)];

        while let Some((id, polys)) = stack.pop() {
            if polys.is_empty() {
                continue;
            }
            let plane = match self.nodes[id].plane {
                Some(plane) => plane,
                None => {
                    let plane = self.pick_splitting_plane(&polys);
                    self.nodes[id].plane = Some(plane);
                    plane
                }
            };

            let mut split = Split::default();
            for polygon in polys {
                plane.split_polygon(polygon, self.epsilon, &mut split);
            }
            let node = &mut self.nodes[id];
            node.polygons.append(&mut split.coplanar_front);
            node.polygons.append(&mut split.coplanar_back);

            if !split.front.is_empty() {
                let child = self.child(id, true);
                stack.push((child, split.front));
            }
            if !split.back.is_empty() {
                let child = self.child(id, false);
                stack.push((child, split.back));
            }
        }
        trace!(nodes = self.nodes.len(), "bsp build pass done");
    }

    /// Index of a node's front or back child, creating it if missing.
    fn child(&mut self, id: usize, front: bool) -> usize {
        let existing = if front {
            self.nodes[id].front
        } else {
            self.nodes[id].back
        };
        if let Some(child) = existing {
            return child;
        }
        let child = self.nodes.len();
        self.nodes.push(Node::default());
        if front {
            self.nodes[id].front = Some(child);
        } else {
            self.nodes[id].back = Some(child);
        }
        child
    }

    /// Score the planes of the first few polygons and keep the one that
    /// splits the fewest polygons while balancing the two sides.
    fn pick_splitting_plane(&self, polygons: &[Polygon]) -> Plane {
        let mut best = polygons[0].plane;
        let mut best_score = f64::MAX;

        for candidate in polygons.iter().take(self.sample_size) {
            let plane = candidate.plane;
            let (mut front, mut back, mut spanning) = (0usize, 0usize, 0usize);
            for polygon in polygons {
                match plane.classify_polygon(polygon, self.epsilon) {
                    COPLANAR => {}
                    FRONT => front += 1,
                    BACK => back += 1,
                    _ => spanning += 1,
                }
            }
            #[allow(clippy::cast_precision_loss)]
            let score = SPAN_WEIGHT * spanning as f64 + front.abs_diff(back) as f64;
            if score < best_score {
                best_score = score;
                best = plane;
            }
        }
        best
    }
}
