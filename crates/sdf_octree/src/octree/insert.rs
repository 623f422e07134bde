//! Insertion: descend from the root to one target cell and record a unit id
//! in that cell's leaf chain.
//!
//! Octants are chosen with the target cell's center, not its minimum
//! corner. The center sits half a cell away from every boundary of every
//! ancestor, so the floor in the octant computation never lands on a tie.

use glam::{DVec3, UVec3};

use super::bounds::DAabb3;
use super::chain;
use super::stats::BuildStats;
use super::{octant_index, NodeRef, Octree, Slot};
use crate::constants::OCTREE_NODE_WIDTH;
use crate::error::{OctreeError, OctreeResult};
use crate::types::RenderInstance;

/// What `insert` did with the target cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InsertOutcome {
  /// A new leaf (and render instance) was created.
  NewLeaf {
    list_node: u32,
    instance: u32,
    /// Internal nodes returned to the pool because a finer subtree already
    /// occupied the cell.
    collapsed_nodes: u32,
  },
  /// The id joined an existing leaf at the requested level.
  SharedLeaf { list_node: u32 },
  /// A coarser leaf already covered the cell; the id joined it instead.
  CoarserLeaf { list_node: u32, level: u32 },
}

impl InsertOutcome {
  pub fn list_node(&self) -> u32 {
    match *self {
      InsertOutcome::NewLeaf { list_node, .. }
      | InsertOutcome::SharedLeaf { list_node }
      | InsertOutcome::CoarserLeaf { list_node, .. } => list_node,
    }
  }
}

/// Grid range of a unit footprint at one level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Footprint {
  pub level: u32,
  pub cell_width: f64,
  /// Minimum corner of the first cell.
  pub start: DVec3,
  /// Maximum corner of the last cell.
  pub end: DVec3,
  /// Cells per axis.
  pub counts: UVec3,
}

impl Footprint {
  /// Cells covered by `bounds` at `level`: the box snapped outward to the
  /// level's grid, at least one cell per axis.
  pub fn new(bounds: &DAabb3, level: u32, cell_width: f64) -> Self {
    let snapped = bounds.snap_outward(cell_width);
    let counts = (snapped.size() / cell_width).round().max(DVec3::ONE).as_uvec3();
    Self {
      level,
      cell_width,
      start: snapped.min,
      end: snapped.min + counts.as_dvec3() * cell_width,
      counts,
    }
  }

  pub fn cell_count(&self) -> u32 {
    self.counts.x * self.counts.y * self.counts.z
  }

  /// Minimum corners of every cell, x fastest, then y, then z.
  pub fn cells(&self) -> impl Iterator<Item = DVec3> + '_ {
    let counts = self.counts;
    (0..counts.z).flat_map(move |z| {
      (0..counts.y).flat_map(move |y| {
        (0..counts.x).map(move |x| self.start + DVec3::new(x as f64, y as f64, z as f64) * self.cell_width)
      })
    })
  }
}

impl Octree {
  /// Record `id` in the cell of `level` whose minimum corner is `cell_min`.
  ///
  /// Descends from the root, creating internal nodes on the way. Descent
  /// stops at `level` or at the first leaf met; a coarser leaf wins and
  /// receives the id. If the target slot already holds a finer subtree,
  /// the subtree is freed and replaced by the new leaf.
  pub fn insert(&mut self, level: u32, cell_min: DVec3, id: u32) -> OctreeResult<InsertOutcome> {
    if level >= self.config.max_level {
      return Err(OctreeError::OutOfBoundsInsert {
        level,
        position: cell_min,
      });
    }

    let probe = cell_min + DVec3::splat(0.5 * self.config.cell_width(level));

    let mut slot = Slot::Root;
    let mut current_level = self.config.max_level;
    let mut node_size = self.config.cell_width(current_level);
    let mut center = DVec3::ZERO;

    loop {
      let current = self.slot(slot);
      if current_level == level || current.is_leaf() {
        break;
      }

      let node = match current {
        NodeRef::Internal(node) => node,
        _ => {
          let node = self.alloc_internal()?;
          self.set_slot(slot, NodeRef::Internal(node));
          node
        }
      };

      let child_size = 0.5 * node_size;
      let level_start = center - DVec3::splat(child_size);
      let child = ((probe - level_start) / child_size).floor();

      let width = OCTREE_NODE_WIDTH as f64;
      if !child.is_finite() || child.cmplt(DVec3::ZERO).any() || child.cmpge(DVec3::splat(width)).any() {
        tracing::error!(level, ?cell_min, current_level, "cell outside octree node during descent");
        return Err(OctreeError::OutOfBoundsInsert {
          level,
          position: cell_min,
        });
      }

      center = level_start + child * child_size + DVec3::splat(0.5 * child_size);
      node_size = child_size;
      current_level -= 1;
      slot = Slot::Child {
        node,
        octant: octant_index(child.x as usize, child.y as usize, child.z as usize),
      };
    }

    match self.slot(slot) {
      NodeRef::Leaf(list_node) => {
        chain::append_id(self.list_pool_mut(), list_node, id)?;
        if current_level == level {
          Ok(InsertOutcome::SharedLeaf { list_node })
        } else {
          Ok(InsertOutcome::CoarserLeaf {
            list_node,
            level: current_level,
          })
        }
      }
      previous => {
        // Room for the instance first, so a leaf never exists without one.
        self.ensure_instance_room()?;
        let list_node = chain::new_chain(self.list_pool_mut())?;

        let collapsed_nodes = match previous {
          NodeRef::Internal(subtree) => self.free_subtree(subtree),
          _ => 0,
        };
        self.set_slot(slot, NodeRef::Leaf(list_node));

        let cell_origin = center - DVec3::splat(0.5 * node_size);
        let instance =
          self.push_render_instance(RenderInstance::new(cell_origin, current_level, list_node))?;
        chain::append_id(self.list_pool_mut(), list_node, id)?;

        Ok(InsertOutcome::NewLeaf {
          list_node,
          instance,
          collapsed_nodes,
        })
      }
    }
  }

  /// Insert `id` into every cell of `level` that `bounds` overlaps.
  pub fn insert_footprint(
    &mut self,
    level: u32,
    bounds: &DAabb3,
    id: u32,
    stats: &mut BuildStats,
  ) -> OctreeResult<Footprint> {
    let footprint = Footprint::new(bounds, level, self.config.cell_width(level));
    for cell_min in footprint.cells() {
      let outcome = self.insert(level, cell_min, id)?;
      stats.record_insert(&outcome);
    }
    Ok(footprint)
  }
}

#[cfg(test)]
#[path = "insert_test.rs"]
mod insert_test;
