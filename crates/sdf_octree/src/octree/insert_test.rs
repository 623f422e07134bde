use super::*;
use crate::error::PoolKind;
use crate::octree::OctreeConfig;

/// Root at level 4: a 16-unit cube spanning [-8, 8) on every axis.
fn small_config() -> OctreeConfig {
  OctreeConfig {
    max_level: 4,
    internal_node_capacity: 64,
    list_node_capacity: 64,
    max_render_instances: 64,
    ..Default::default()
  }
}

fn small_octree() -> Octree {
  Octree::new(small_config()).unwrap()
}

// =========================================================================
// Single-cell descent
// =========================================================================

/// A level-0 insert builds one internal node per level below the root.
#[test]
fn test_insert_creates_path_and_leaf() {
  let mut octree = small_octree();
  let outcome = octree.insert(0, DVec3::ZERO, 7).unwrap();

  assert_eq!(
    outcome,
    InsertOutcome::NewLeaf {
      list_node: 0,
      instance: 0,
      collapsed_nodes: 0
    }
  );
  assert_eq!(octree.live_internal_nodes(), 4, "Root + levels 3, 2, 1");

  let instances = octree.render_instances();
  assert_eq!(instances.len(), 1);
  assert_eq!(instances[0].world_position, glam::Vec3::ZERO);
  assert_eq!(instances[0].level, 0);
  assert_eq!(instances[0].list_node_index, 0);
  assert_eq!(octree.chain_ids(0).as_slice(), &[7]);
}

/// Cell origin is reproduced for cells in negative octants too.
#[test]
fn test_insert_negative_corner_cell() {
  let mut octree = small_octree();
  octree.insert(1, DVec3::new(-8.0, -2.0, 6.0), 1).unwrap();

  let instance = octree.render_instances()[0];
  assert_eq!(instance.world_position, glam::Vec3::new(-8.0, -2.0, 6.0));
  assert_eq!(instance.level, 1);
}

/// Descent follows octant x + 2y + 4z from the root.
#[test]
fn test_insert_octant_indexing() {
  let mut octree = small_octree();
  // High x, low y, high z half of the root → octant 1 + 4 = 5.
  octree.insert(3, DVec3::new(0.0, -8.0, 0.0), 1).unwrap();

  let NodeRef::Internal(root) = octree.root() else {
    panic!("root must be internal");
  };
  let root_node = octree.internal_node(root);
  for octant in 0..8 {
    if octant == 5 {
      assert!(root_node.child(octant).is_leaf(), "Octant 5 should hold the leaf");
    } else {
      assert_eq!(root_node.child(octant), NodeRef::Empty);
    }
  }
}

/// Same cell twice → one leaf, chain of two.
#[test]
fn test_insert_same_cell_shares_leaf() {
  let mut octree = small_octree();
  octree.insert(1, DVec3::new(2.0, 2.0, 2.0), 1).unwrap();
  let outcome = octree.insert(1, DVec3::new(2.0, 2.0, 2.0), 2).unwrap();

  assert_eq!(outcome, InsertOutcome::SharedLeaf { list_node: 0 });
  assert_eq!(octree.render_instances().len(), 1);
  assert_eq!(octree.chain_ids(0).as_slice(), &[1, 2]);
}

// =========================================================================
// Leaf conflicts
// =========================================================================

/// A finer insert under an existing coarse leaf joins the coarse leaf.
#[test]
fn test_coarse_leaf_wins_over_finer_insert() {
  let mut octree = small_octree();
  octree.insert(2, DVec3::ZERO, 1).unwrap();
  let nodes_before = octree.live_internal_nodes();

  let outcome = octree.insert(0, DVec3::new(1.0, 1.0, 1.0), 2).unwrap();

  assert_eq!(outcome, InsertOutcome::CoarserLeaf { list_node: 0, level: 2 });
  assert_eq!(octree.render_instances().len(), 1, "No finer instance created");
  assert_eq!(octree.live_internal_nodes(), nodes_before, "No subdivision below a leaf");
  assert_eq!(octree.chain_ids(0).as_slice(), &[1, 2]);
}

/// A coarse insert over a finer subtree replaces it and frees its nodes.
#[test]
fn test_coarse_insert_collapses_finer_subtree() {
  let mut octree = small_octree();
  octree.insert(0, DVec3::new(1.0, 1.0, 1.0), 1).unwrap();
  assert_eq!(octree.live_internal_nodes(), 4);

  let outcome = octree.insert(2, DVec3::ZERO, 2).unwrap();
  assert_eq!(
    outcome,
    InsertOutcome::NewLeaf {
      list_node: 1,
      instance: 1,
      collapsed_nodes: 2
    }
  );
  assert_eq!(octree.live_internal_nodes(), 2, "Level-2 and level-1 nodes freed");

  // The fine instance from earlier this frame stays valid.
  let instances = octree.render_instances();
  assert_eq!(instances.len(), 2);
  assert_eq!(octree.chain_ids(instances[0].list_node_index).as_slice(), &[1]);
  assert_eq!(octree.chain_ids(instances[1].list_node_index).as_slice(), &[2]);

  // Later fine inserts in the region now fold into the coarse leaf.
  let outcome = octree.insert(0, DVec3::new(3.0, 3.0, 3.0), 3).unwrap();
  assert_eq!(outcome, InsertOutcome::CoarserLeaf { list_node: 1, level: 2 });
}

/// Freed internal nodes are reused by later descents.
#[test]
fn test_collapsed_nodes_are_reused() {
  let mut octree = small_octree();
  octree.insert(0, DVec3::new(1.0, 1.0, 1.0), 1).unwrap();
  octree.insert(2, DVec3::ZERO, 2).unwrap();
  let high_water = octree.internal_nodes().len();

  // A separate branch needs two new nodes below level 3: both come from the free list.
  octree.insert(0, DVec3::new(5.0, 5.0, 5.0), 3).unwrap();
  assert_eq!(octree.internal_nodes().len(), high_water);
  assert_eq!(octree.live_internal_nodes(), 4);
}

// =========================================================================
// Failures
// =========================================================================

/// A cell outside the root cube is an invariant failure.
#[test]
fn test_insert_outside_root_fails() {
  let mut octree = small_octree();
  let err = octree.insert(0, DVec3::new(8.0, 0.0, 0.0), 1).unwrap_err();
  assert!(matches!(err, OctreeError::OutOfBoundsInsert { level: 0, .. }));
  assert!(octree.render_instances().is_empty());

  let err = octree.insert(0, DVec3::new(0.0, -9.0, 0.0), 1).unwrap_err();
  assert!(matches!(err, OctreeError::OutOfBoundsInsert { .. }));
}

/// The root level itself cannot be a leaf.
#[test]
fn test_insert_at_root_level_fails() {
  let mut octree = small_octree();
  let err = octree.insert(4, DVec3::splat(-8.0), 1).unwrap_err();
  assert!(matches!(err, OctreeError::OutOfBoundsInsert { level: 4, .. }));
  assert!(octree.root().has_data() && !octree.root().is_leaf());
}

/// Running out of internal nodes reports the internal pool.
#[test]
fn test_internal_pool_exhaustion() {
  let mut octree = Octree::new(OctreeConfig {
    internal_node_capacity: 2,
    ..small_config()
  })
  .unwrap();

  let err = octree.insert(0, DVec3::ZERO, 1).unwrap_err();
  assert_eq!(
    err,
    OctreeError::CapacityExceeded {
      pool: PoolKind::InternalNodes,
      capacity: 2
    }
  );
  assert!(octree.render_instances().is_empty());
  assert!(octree.list_nodes().is_empty());
}

/// A full instance array fails before any leaf is created.
#[test]
fn test_render_instance_exhaustion_leaves_tree_intact() {
  let mut octree = Octree::new(OctreeConfig {
    max_render_instances: 1,
    ..small_config()
  })
  .unwrap();

  octree.insert(3, DVec3::splat(-8.0), 1).unwrap();
  let err = octree.insert(3, DVec3::ZERO, 2).unwrap_err();

  assert_eq!(
    err,
    OctreeError::CapacityExceeded {
      pool: PoolKind::RenderInstances,
      capacity: 1
    }
  );
  assert_eq!(octree.list_nodes().len(), 1, "No orphan chain allocated");
  assert_eq!(octree.chain_ids(0).as_slice(), &[1], "Live data untouched");

  let NodeRef::Internal(root) = octree.root() else {
    panic!("root must be internal");
  };
  assert_eq!(octree.internal_node(root).child(7), NodeRef::Empty);

  // Joining the existing leaf still works: no instance needed.
  octree.insert(3, DVec3::splat(-8.0), 3).unwrap();
  assert_eq!(octree.chain_ids(0).as_slice(), &[1, 3]);
}

// =========================================================================
// Footprints
// =========================================================================

/// A box straddling grid lines covers every cell it touches.
#[test]
fn test_footprint_counts() {
  let bounds = DAabb3::new(DVec3::splat(0.2), DVec3::splat(1.8));
  let footprint = Footprint::new(&bounds, 0, 1.0);
  assert_eq!(footprint.start, DVec3::ZERO);
  assert_eq!(footprint.end, DVec3::splat(2.0));
  assert_eq!(footprint.counts, UVec3::splat(2));
  assert_eq!(footprint.cells().count(), 8);

  let inside = DAabb3::new(DVec3::splat(4.5), DVec3::splat(7.5));
  let footprint = Footprint::new(&inside, 2, 4.0);
  assert_eq!(footprint.counts, UVec3::ONE);
  assert_eq!(footprint.cells().next(), Some(DVec3::splat(4.0)));
}

/// A degenerate box on a grid line still claims one cell.
#[test]
fn test_footprint_degenerate_box() {
  let point = DAabb3::new(DVec3::ZERO, DVec3::ZERO);
  let footprint = Footprint::new(&point, 0, 1.0);
  assert_eq!(footprint.counts, UVec3::ONE);
  assert_eq!(footprint.cell_count(), 1);
}

/// Cells enumerate x fastest, then y, then z.
#[test]
fn test_footprint_cell_order() {
  let bounds = DAabb3::new(DVec3::new(0.5, 0.5, 0.5), DVec3::new(1.5, 1.5, 0.9));
  let cells: Vec<_> = Footprint::new(&bounds, 0, 1.0).cells().collect();
  assert_eq!(
    cells,
    vec![
      DVec3::new(0.0, 0.0, 0.0),
      DVec3::new(1.0, 0.0, 0.0),
      DVec3::new(0.0, 1.0, 0.0),
      DVec3::new(1.0, 1.0, 0.0),
    ]
  );
}

/// insert_footprint creates one leaf per covered cell and counts them.
#[test]
fn test_insert_footprint() {
  let mut octree = small_octree();
  let mut stats = BuildStats::default();
  let bounds = DAabb3::new(DVec3::splat(-0.5), DVec3::splat(0.5));

  let footprint = octree.insert_footprint(0, &bounds, 9, &mut stats).unwrap();

  assert_eq!(footprint.cell_count(), 8);
  assert_eq!(octree.render_instances().len(), 8);
  assert_eq!(stats.cells_visited, 8);
  assert_eq!(stats.leaves_created, 8);
  for instance in octree.render_instances() {
    assert_eq!(instance.level, 0);
    assert_eq!(octree.chain_ids(instance.list_node_index).as_slice(), &[9]);
  }
}
