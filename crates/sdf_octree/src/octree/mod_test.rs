use super::*;
use glam::DVec3;

fn config() -> OctreeConfig {
  OctreeConfig {
    max_level: 6,
    internal_node_capacity: 32,
    list_node_capacity: 32,
    max_render_instances: 32,
    ..Default::default()
  }
}

/// A fresh octree has a single childless internal root.
#[test]
fn test_new_octree_has_empty_internal_root() {
  let octree = Octree::new(config()).unwrap();
  assert_eq!(octree.root(), NodeRef::Internal(0));
  assert_eq!(octree.internal_nodes().len(), 1);
  assert!(octree
    .internal_node(0)
    .children
    .iter()
    .all(|c| c.unpack() == NodeRef::Empty));
  assert!(octree.render_instances().is_empty());
  assert!(octree.list_nodes().is_empty());
  assert!(!octree.is_frame_complete());
}

#[test]
fn test_new_rejects_invalid_config() {
  let result = Octree::new(OctreeConfig {
    max_level: 0,
    ..Default::default()
  });
  assert!(matches!(result, Err(OctreeError::InvalidConfig { .. })));
}

/// Clear drops all content but keeps capacity.
#[test]
fn test_clear_resets_content() {
  let mut octree = Octree::new(config()).unwrap();
  octree.insert(0, DVec3::ZERO, 1).unwrap();
  octree.insert(0, DVec3::splat(-4.0), 2).unwrap();
  assert_eq!(octree.render_instances().len(), 2);

  octree.clear().unwrap();

  assert_eq!(octree.root(), NodeRef::Internal(0));
  assert_eq!(octree.internal_nodes().len(), 1);
  assert!(octree.render_instances().is_empty());
  assert!(octree.list_nodes().is_empty());
  assert!(
    octree.internal_node(0).children.iter().all(|c| *c == PackedNodeRef::EMPTY),
    "Reused root slot must be zeroed"
  );
}

#[test]
fn test_octant_index_roundtrip() {
  for octant in 0..OCTREE_CHILD_COUNT {
    let [x, y, z] = octant_coords(octant);
    assert_eq!(octant_index(x, y, z), octant);
  }
  assert_eq!(octant_index(1, 0, 0), 1);
  assert_eq!(octant_index(0, 1, 0), 2);
  assert_eq!(octant_index(0, 0, 1), 4);
}

#[test]
fn test_internal_node_child_slots() {
  let mut node = InternalNode::zeroed();
  node.set_child(3, NodeRef::Leaf(12));
  node.set_child(6, NodeRef::Internal(4));
  assert_eq!(node.child(3), NodeRef::Leaf(12));
  assert_eq!(node.child(6), NodeRef::Internal(4));
  assert_eq!(node.child(0), NodeRef::Empty);
}

/// Internal nodes are 8 packed words on the GPU.
#[test]
fn test_internal_node_is_32_bytes() {
  assert_eq!(std::mem::size_of::<InternalNode>(), 32);
  assert_eq!(std::mem::size_of::<ListNode>(), 64);
}
