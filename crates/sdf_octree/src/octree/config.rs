//! OctreeConfig - pool capacities, level range and LOD tuning.

use glam::DVec3;

use crate::constants::{
  DEFAULT_BASE_SCALE, DEFAULT_BOUNDS_PADDING, DEFAULT_INTERNAL_NODE_CAPACITY,
  DEFAULT_LIST_NODE_CAPACITY, DEFAULT_MAX_LEVEL, DEFAULT_MAX_RENDER_INSTANCES,
  DEFAULT_TARGET_PIXEL_SIZE, MAX_NODE_LOCATION,
};
use crate::error::{OctreeError, OctreeResult};

/// Deepest root level accepted: cell math runs in f64, which stays exact for
/// power-of-two cell widths well past this.
pub const MAX_SUPPORTED_LEVEL: u32 = 48;

/// Configuration for the per-frame octree.
///
/// Only this survives across frames; tree content is rebuilt every frame.
#[derive(Clone, Debug, PartialEq)]
pub struct OctreeConfig {
  /// World width of a level-0 cell.
  pub base_scale: f32,

  /// Level of the root node. The root spans `base_scale * 2^max_level`,
  /// centered on the world origin.
  pub max_level: u32,

  pub internal_node_capacity: u32,
  pub list_node_capacity: u32,
  pub max_render_instances: u32,

  /// (Roughly) the on-screen pixel width each cell should cover.
  pub target_pixel_size: f32,

  /// Margin added to every unit's scale before computing its footprint.
  pub bounds_padding: f32,
}

impl OctreeConfig {
  /// Cell width at `level`: `base_scale * 2^level`.
  #[inline]
  pub fn cell_width(&self, level: u32) -> f64 {
    self.base_scale as f64 * (level as f64).exp2()
  }

  /// Finest level a unit can be assigned. The root itself is never a leaf.
  #[inline]
  pub fn max_leaf_level(&self) -> u32 {
    self.max_level.saturating_sub(1)
  }

  /// Minimum corner of the root cube.
  #[inline]
  pub fn root_min(&self) -> DVec3 {
    DVec3::splat(-0.5 * self.cell_width(self.max_level))
  }

  pub fn validate(&self) -> OctreeResult<()> {
    if !(self.base_scale.is_finite() && self.base_scale > 0.0) {
      return Err(invalid("base_scale", format!("must be positive, got {}", self.base_scale)));
    }
    if self.max_level == 0 || self.max_level > MAX_SUPPORTED_LEVEL {
      return Err(invalid(
        "max_level",
        format!("must be in 1..={MAX_SUPPORTED_LEVEL}, got {}", self.max_level),
      ));
    }
    if !(self.target_pixel_size.is_finite() && self.target_pixel_size > 0.0) {
      return Err(invalid(
        "target_pixel_size",
        format!("must be positive, got {}", self.target_pixel_size),
      ));
    }
    if !(self.bounds_padding.is_finite() && self.bounds_padding >= 0.0) {
      return Err(invalid(
        "bounds_padding",
        format!("must be non-negative, got {}", self.bounds_padding),
      ));
    }
    check_capacity("internal_node_capacity", self.internal_node_capacity)?;
    check_capacity("list_node_capacity", self.list_node_capacity)?;
    if self.max_render_instances == 0 {
      return Err(invalid("max_render_instances", "must be non-zero".into()));
    }
    Ok(())
  }
}

fn invalid(field: &'static str, reason: String) -> OctreeError {
  OctreeError::InvalidConfig { field, reason }
}

fn check_capacity(field: &'static str, capacity: u32) -> OctreeResult<()> {
  if capacity == 0 {
    return Err(invalid(field, "must be non-zero".into()));
  }
  if capacity > MAX_NODE_LOCATION {
    return Err(invalid(
      field,
      format!("{capacity} does not fit a 30-bit node location"),
    ));
  }
  Ok(())
}

impl Default for OctreeConfig {
  fn default() -> Self {
    Self {
      base_scale: DEFAULT_BASE_SCALE,
      max_level: DEFAULT_MAX_LEVEL,
      internal_node_capacity: DEFAULT_INTERNAL_NODE_CAPACITY,
      list_node_capacity: DEFAULT_LIST_NODE_CAPACITY,
      max_render_instances: DEFAULT_MAX_RENDER_INSTANCES,
      target_pixel_size: DEFAULT_TARGET_PIXEL_SIZE,
      bounds_padding: DEFAULT_BOUNDS_PADDING,
    }
  }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
