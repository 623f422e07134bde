//! Wireframe of every node cube, for debug overlays.

use glam::{DVec3, Vec3};
use smallvec::SmallVec;

use super::bounds::DAabb3;
use super::{octant_coords, NodeRef, Octree};
use crate::constants::OCTREE_CHILD_COUNT;

/// Edges of a cube as corner index pairs (corners differ in one bit).
const CUBE_EDGES: [(usize, usize); 12] = [
  (0, 1),
  (2, 3),
  (4, 5),
  (6, 7),
  (0, 2),
  (1, 3),
  (4, 6),
  (5, 7),
  (0, 4),
  (1, 5),
  (2, 6),
  (3, 7),
];

/// Line segments outlining every internal node and leaf, 12 per cube.
///
/// Walks depth-first from the root. Empty slots draw nothing.
pub fn node_outlines(octree: &Octree) -> Vec<[Vec3; 2]> {
  let mut lines = Vec::new();
  let root_width = octree.config().cell_width(octree.config().max_level);
  let mut stack: SmallVec<[(NodeRef, DVec3, f64); 64]> = SmallVec::new();
  stack.push((octree.root(), octree.config().root_min(), root_width));

  while let Some((node, min, width)) = stack.pop() {
    match node {
      NodeRef::Empty => continue,
      NodeRef::Leaf(_) => push_cube(&mut lines, min, width),
      NodeRef::Internal(index) => {
        push_cube(&mut lines, min, width);
        let child_width = 0.5 * width;
        let internal = octree.internal_node(index);
        for octant in 0..OCTREE_CHILD_COUNT {
          let child = internal.child(octant);
          if child == NodeRef::Empty {
            continue;
          }
          let [x, y, z] = octant_coords(octant);
          let offset = DVec3::new(x as f64, y as f64, z as f64) * child_width;
          stack.push((child, min + offset, child_width));
        }
      }
    }
  }
  lines
}

fn push_cube(lines: &mut Vec<[Vec3; 2]>, min: DVec3, width: f64) {
  let corners = DAabb3::cube(min, width).corners();
  for (a, b) in CUBE_EDGES {
    lines.push([corners[a].as_vec3(), corners[b].as_vec3()]);
  }
}
