//! Per-frame rebuild: clear, then insert every unit's footprint at its
//! estimated level, in array order.

use web_time::Instant;

use crate::error::{OctreeError, OctreeResult};
use crate::lod;
use crate::octree::{BuildStats, Octree, UnitPlacement};
use crate::types::SdfUnit;
use crate::viewer::Viewer;

impl Octree {
  /// Rebuild the tree from scratch for this frame's units and camera.
  ///
  /// Unit ids are array indices. On error the frame is abandoned: the tree
  /// holds whatever was inserted before the failure and
  /// [`frame_outputs`](Self::frame_outputs) returns `None` until the next
  /// successful rebuild.
  pub fn rebuild(&mut self, units: &[SdfUnit], viewer: &Viewer) -> OctreeResult<BuildStats> {
    self.rebuild_with_placement(units, viewer, None).map(|(stats, _)| stats)
  }

  /// [`rebuild`](Self::rebuild), also reporting where unit `selected` landed.
  #[tracing::instrument(level = "debug", skip_all, fields(units = units.len()))]
  pub fn rebuild_with_placement(
    &mut self,
    units: &[SdfUnit],
    viewer: &Viewer,
    selected: Option<usize>,
  ) -> OctreeResult<(BuildStats, Option<UnitPlacement>)> {
    let start = Instant::now();
    self.clear()?;

    let config = self.config().clone();
    let mut stats = BuildStats::default();
    let mut placement = None;

    for (index, unit) in units.iter().enumerate() {
      let estimate = lod::estimate_level(unit, viewer, &config);
      let bounds = unit.padded_bounds(config.bounds_padding);

      let footprint = match self.insert_footprint(estimate.level, &bounds, index as u32, &mut stats) {
        Ok(footprint) => footprint,
        Err(err) => {
          match err {
            OctreeError::CapacityExceeded { .. } => {
              tracing::warn!(unit = index, %err, "octree rebuild aborted");
            }
            _ => tracing::error!(unit = index, %err, "octree rebuild aborted"),
          }
          return Err(err);
        }
      };
      stats.units += 1;

      tracing::trace!(
        unit = index,
        distance_level = estimate.distance_level,
        screen_size_level = estimate.screen_size_level,
        level = estimate.level,
        cells = footprint.cell_count(),
        "unit placed"
      );

      if selected == Some(index) {
        placement = Some(UnitPlacement::new(
          index,
          unit.center(),
          2.0 * unit.padded_scale(config.bounds_padding),
          estimate,
          &footprint,
        ));
      }
    }

    stats.internal_nodes = self.live_internal_nodes();
    stats.list_nodes = self.list_nodes().len() as u32;
    stats.build_time_us = start.elapsed().as_micros() as u64;
    self.set_frame_complete(true);

    tracing::debug!(
      instances = self.render_instances().len(),
      internal_nodes = stats.internal_nodes,
      list_nodes = stats.list_nodes,
      conflicts = stats.leaf_conflicts,
      collapsed = stats.collapsed_subtrees,
      build_time_us = stats.build_time_us,
      "octree rebuilt"
    );

    Ok((stats, placement))
  }
}

#[cfg(test)]
#[path = "rebuild_test.rs"]
mod rebuild_test;
