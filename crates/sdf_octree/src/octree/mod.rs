//! Per-frame octree over SDF units.
//!
//! The tree is explicit: internal nodes live in one arena pool, leaf chains
//! in another, and every child slot is a [`NodeRef`] into one of them. The
//! whole structure is cleared and rebuilt every frame; only the config and
//! the pool allocations persist.
//!
//! # Level Convention
//!
//! Level 0 = finest cells, higher level = coarser. The root sits at
//! `max_level` and is centered on the world origin.
//!
//! ```text
//! Cell Width = base_scale * 2^level
//! ```
//!
//! # Module Structure
//!
//! - [`bounds`]: `DAabb3` - f64 boxes for footprints and outlines
//! - [`node_ref`]: `NodeRef` - tagged child slot and its packed `u32` form
//! - [`config`]: `OctreeConfig` - capacities, level range, LOD tuning
//! - [`chain`]: leaf chains of unit ids built from 16-word chunks
//! - [`insert`]: descent/insertion of one cell and of a unit footprint
//! - [`outline`]: line list of every node cube for debug overlays
//! - [`stats`]: per-build counters and the placement report

pub mod bounds;
pub mod chain;
pub mod config;
pub mod insert;
pub mod node_ref;
pub mod outline;
pub mod stats;

use bytemuck::{Pod, Zeroable};
use smallvec::SmallVec;

use crate::arena::ArenaPool;
use crate::constants::{HEAD_CHUNK_IDS, OCTREE_CHILD_COUNT, OCTREE_NODE_WIDTH};
use crate::error::{OctreeError, OctreeResult, PoolKind};
use crate::types::RenderInstance;

// Re-exports
pub use bounds::DAabb3;
pub use chain::ListNode;
pub use config::OctreeConfig;
pub use insert::InsertOutcome;
pub use node_ref::{NodeRef, PackedNodeRef};
pub use outline::node_outlines;
pub use stats::{BuildStats, UnitPlacement};

/// Internal node: one packed child slot per octant.
///
/// Octant index = x + 2y + 4z, each 0 (low half) or 1 (high half).
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct InternalNode {
  pub children: [PackedNodeRef; OCTREE_CHILD_COUNT],
}

impl InternalNode {
  #[inline]
  pub fn child(&self, octant: usize) -> NodeRef {
    self.children[octant].unpack()
  }

  #[inline]
  pub fn set_child(&mut self, octant: usize, child: NodeRef) {
    self.children[octant] = child.pack();
  }
}

/// Octant index for per-axis child coordinates in `[0, OCTREE_NODE_WIDTH)`.
#[inline]
pub fn octant_index(x: usize, y: usize, z: usize) -> usize {
  x + OCTREE_NODE_WIDTH * (y + OCTREE_NODE_WIDTH * z)
}

/// Per-axis child coordinates of an octant index.
#[inline]
pub fn octant_coords(octant: usize) -> [usize; 3] {
  [
    octant % OCTREE_NODE_WIDTH,
    (octant / OCTREE_NODE_WIDTH) % OCTREE_NODE_WIDTH,
    octant / (OCTREE_NODE_WIDTH * OCTREE_NODE_WIDTH),
  ]
}

/// A place a `NodeRef` can live: the root, or one child of an internal node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Slot {
  Root,
  Child { node: u32, octant: usize },
}

/// Octree context: root slot, both pools and the render instance array.
pub struct Octree {
  config: OctreeConfig,
  root: NodeRef,
  internal_nodes: ArenaPool<InternalNode>,
  list_nodes: ArenaPool<ListNode>,
  render_instances: Vec<RenderInstance>,
  /// Set by a successful rebuild, cleared when one starts.
  frame_complete: bool,
}

impl Octree {
  /// Validate `config`, allocate the pools once, and start with an empty root.
  pub fn new(config: OctreeConfig) -> OctreeResult<Self> {
    config.validate()?;
    let mut octree = Self {
      internal_nodes: ArenaPool::new(config.internal_node_capacity, PoolKind::InternalNodes),
      list_nodes: ArenaPool::new(config.list_node_capacity, PoolKind::ListNodes),
      render_instances: Vec::with_capacity(config.max_render_instances as usize),
      root: NodeRef::Empty,
      frame_complete: false,
      config,
    };
    octree.clear()?;
    Ok(octree)
  }

  /// Reset to an empty tree: both pools and the instance array are emptied
  /// in O(1) and the root becomes a fresh, childless internal node.
  pub fn clear(&mut self) -> OctreeResult<()> {
    self.internal_nodes.clear();
    self.list_nodes.clear();
    self.render_instances.clear();
    self.frame_complete = false;
    let root = self.internal_nodes.alloc()?;
    self.root = NodeRef::Internal(root);
    Ok(())
  }

  pub fn config(&self) -> &OctreeConfig {
    &self.config
  }

  pub fn root(&self) -> NodeRef {
    self.root
  }

  /// Live render instances in creation order.
  pub fn render_instances(&self) -> &[RenderInstance] {
    &self.render_instances
  }

  /// Internal node pool contents up to its high-water mark.
  pub fn internal_nodes(&self) -> &[InternalNode] {
    self.internal_nodes.as_slice()
  }

  pub fn internal_node(&self, index: u32) -> &InternalNode {
    self.internal_nodes.get(index)
  }

  /// Leaf chain chunks up to the pool's high-water mark.
  pub fn list_nodes(&self) -> &[ListNode] {
    self.list_nodes.as_slice()
  }

  /// Internal nodes currently reachable or allocated (excludes freed ones).
  pub fn live_internal_nodes(&self) -> u32 {
    self.internal_nodes.live()
  }

  /// Ids of the chain whose head chunk is `list_node`, in append order.
  pub fn chain_ids(&self, list_node: u32) -> SmallVec<[u32; HEAD_CHUNK_IDS]> {
    chain::chain_ids(&self.list_nodes, list_node)
  }

  /// Chunks in the chain whose head chunk is `list_node`.
  pub fn chain_len(&self, list_node: u32) -> u32 {
    chain::chain_len(&self.list_nodes, list_node)
  }

  /// Whether `id` is in the chain whose head chunk is `list_node`.
  pub fn chain_contains(&self, list_node: u32, id: u32) -> bool {
    chain::chain_contains(&self.list_nodes, list_node, id)
  }

  /// Whether the last rebuild ran to completion.
  pub fn is_frame_complete(&self) -> bool {
    self.frame_complete
  }

  pub(crate) fn set_frame_complete(&mut self, complete: bool) {
    self.frame_complete = complete;
  }

  pub(crate) fn slot(&self, slot: Slot) -> NodeRef {
    match slot {
      Slot::Root => self.root,
      Slot::Child { node, octant } => self.internal_nodes.get(node).child(octant),
    }
  }

  pub(crate) fn set_slot(&mut self, slot: Slot, value: NodeRef) {
    match slot {
      Slot::Root => self.root = value,
      Slot::Child { node, octant } => self.internal_nodes.get_mut(node).set_child(octant, value),
    }
  }

  /// Return an internal subtree to the pool. Leaf chains below it are left
  /// alone: render instances already emitted this frame still point at them.
  ///
  /// Returns the number of internal nodes freed.
  pub(crate) fn free_subtree(&mut self, node: u32) -> u32 {
    let mut stack: SmallVec<[u32; 32]> = SmallVec::new();
    stack.push(node);
    let mut freed = 0;
    while let Some(index) = stack.pop() {
      let children = self.internal_nodes.get(index).children;
      for packed in children {
        if let NodeRef::Internal(child) = packed.unpack() {
          stack.push(child);
        }
      }
      self.internal_nodes.free(index);
      freed += 1;
    }
    freed
  }

  pub(crate) fn alloc_internal(&mut self) -> OctreeResult<u32> {
    self.internal_nodes.alloc()
  }

  pub(crate) fn list_pool_mut(&mut self) -> &mut ArenaPool<ListNode> {
    &mut self.list_nodes
  }

  /// Append a render instance, failing when the array is at capacity.
  pub(crate) fn push_render_instance(&mut self, instance: RenderInstance) -> OctreeResult<u32> {
    self.ensure_instance_room()?;
    let index = self.render_instances.len() as u32;
    self.render_instances.push(instance);
    Ok(index)
  }

  pub(crate) fn ensure_instance_room(&self) -> OctreeResult<()> {
    if self.render_instances.len() >= self.config.max_render_instances as usize {
      return Err(OctreeError::CapacityExceeded {
        pool: PoolKind::RenderInstances,
        capacity: self.config.max_render_instances,
      });
    }
    Ok(())
  }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;
