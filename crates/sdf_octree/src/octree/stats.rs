//! Statistics from one octree rebuild.

use glam::{DVec3, UVec3, Vec3};

use super::insert::{Footprint, InsertOutcome};
use crate::lod::LodEstimate;

/// Counters collected while rebuilding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildStats {
	/// Units inserted.
	pub units: u32,
	/// Grid cells visited across all unit footprints.
	pub cells_visited: u32,
	/// Leaves (and render instances) created.
	pub leaves_created: u32,
	/// Cells that joined an existing leaf at the requested level.
	pub shared_cells: u32,
	/// Cells folded into an existing coarser leaf.
	pub leaf_conflicts: u32,
	/// Finer subtrees replaced by a coarser leaf.
	pub collapsed_subtrees: u32,
	/// Internal nodes returned to the pool by those collapses.
	pub collapsed_nodes: u32,
	/// Internal nodes live when the build finished.
	pub internal_nodes: u32,
	/// Chain chunks used when the build finished.
	pub list_nodes: u32,
	/// Wall time of the build in microseconds.
	pub build_time_us: u64,
}

impl BuildStats {
	pub(crate) fn record_insert(&mut self, outcome: &InsertOutcome) {
		self.cells_visited += 1;
		match *outcome {
			InsertOutcome::NewLeaf { collapsed_nodes, .. } => {
				self.leaves_created += 1;
				if collapsed_nodes > 0 {
					self.collapsed_subtrees += 1;
					self.collapsed_nodes += collapsed_nodes;
				}
			}
			InsertOutcome::SharedLeaf { .. } => self.shared_cells += 1,
			InsertOutcome::CoarserLeaf { .. } => self.leaf_conflicts += 1,
		}
	}
}

/// Where one unit landed this frame, for debug overlays.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitPlacement {
	/// Index of the unit in the units array.
	pub unit: usize,
	pub center: Vec3,
	/// Full padded box size (2 × padded half extents).
	pub padded_size: Vec3,
	pub distance_level: u32,
	pub screen_size_level: u32,
	pub level: u32,
	pub cell_width: f64,
	pub cube_start: DVec3,
	pub cube_end: DVec3,
	pub cell_counts: UVec3,
}

impl UnitPlacement {
	pub(crate) fn new(unit: usize, center: Vec3, padded_size: Vec3, lod: LodEstimate, footprint: &Footprint) -> Self {
		Self {
			unit,
			center,
			padded_size,
			distance_level: lod.distance_level,
			screen_size_level: lod.screen_size_level,
			level: lod.level,
			cell_width: footprint.cell_width,
			cube_start: footprint.start,
			cube_end: footprint.end,
			cell_counts: footprint.counts,
		}
	}
}
