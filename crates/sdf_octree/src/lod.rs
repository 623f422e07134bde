//! Level selection for one SDF unit.
//!
//! Two estimates are made from the camera and the finer (smaller) one wins:
//!
//! - **Distance**: the world width a cell needs at the unit's depth to cover
//!   roughly `target_pixel_size` pixels.
//! - **Screen size**: the projected width of the unit's padded box, measured
//!   along whichever screen axis it is narrower on.
//!
//! Both widths become levels the same way:
//!
//! ```text
//! level = max(0, ceil(log2(world_width / base_scale)))
//! ```

use glam::Vec2;

use crate::octree::OctreeConfig;
use crate::types::SdfUnit;
use crate::viewer::Viewer;

/// Both per-heuristic levels and the one chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LodEstimate {
  pub distance_level: u32,
  pub screen_size_level: u32,
  /// `min(distance_level, screen_size_level)`.
  pub level: u32,
}

/// Estimate the level of `unit` for this frame's camera.
pub fn estimate_level(unit: &SdfUnit, viewer: &Viewer, config: &OctreeConfig) -> LodEstimate {
  let distance_level = distance_level(unit, viewer, config);
  let screen_size_level = screen_size_level(unit, viewer, config);
  LodEstimate {
    distance_level,
    screen_size_level,
    level: distance_level.min(screen_size_level),
  }
}

/// Level whose cells span about `target_pixel_size` pixels at the unit's depth.
pub fn distance_level(unit: &SdfUnit, viewer: &Viewer, config: &OctreeConfig) -> u32 {
  let view_z = viewer.view_z(unit.center());
  let ndc_width = config.target_pixel_size / viewer.viewport.x.max(1) as f32 * 2.0;
  let world_width = ndc_to_world_width(viewer, ndc_width, view_z, viewer.projection.x_axis.x);
  clamp_level(level_for_width(world_width, config.base_scale), config)
}

/// Level matching the projected size of the unit's padded box.
pub fn screen_size_level(unit: &SdfUnit, viewer: &Viewer, config: &OctreeConfig) -> u32 {
  let view_z = viewer.view_z(unit.center());
  let extent = ndc_extent(unit, viewer, config.bounds_padding);
  let pixels = viewer.ndc_extent_to_pixels(extent);

  let world_width = if pixels.x < pixels.y {
    ndc_to_world_width(viewer, extent.x, view_z, viewer.projection.x_axis.x)
  } else {
    ndc_to_world_width(viewer, extent.y, view_z, viewer.projection.y_axis.y)
  };
  clamp_level(level_for_width(world_width, config.base_scale), config)
}

/// `max(0, ceil(log2(world_width / base_scale)))`. A non-finite or
/// non-positive width maps to 0.
#[inline]
pub fn level_for_width(world_width: f32, base_scale: f32) -> f32 {
  // f32::max returns the non-NaN operand.
  (world_width / base_scale).log2().ceil().max(0.0)
}

/// NDC bounding rectangle size of the unit's padded box.
fn ndc_extent(unit: &SdfUnit, viewer: &Viewer, padding: f32) -> Vec2 {
  let mut ndc_low = Vec2::splat(f32::MAX);
  let mut ndc_high = Vec2::splat(f32::MIN);
  for corner in unit.padded_bounds(padding).corners() {
    let clip = viewer.view_projection * corner.as_vec3().extend(1.0);
    let ndc = clip.truncate().truncate() / clip.w;
    ndc_low = ndc_low.min(ndc);
    ndc_high = ndc_high.max(ndc);
  }
  ndc_high - ndc_low
}

/// World width spanned by an NDC extent at view depth `view_z`.
///
/// Scales by the projection's depth term rather than by `-view_z` alone, so
/// the result grows with the near plane distance.
#[inline]
fn ndc_to_world_width(viewer: &Viewer, ndc_width: f32, view_z: f32, diagonal: f32) -> f32 {
  ndc_width * (viewer.projection.w_axis.z * view_z) / diagonal
}

#[inline]
fn clamp_level(level: f32, config: &OctreeConfig) -> u32 {
  level.min(config.max_leaf_level() as f32) as u32
}

#[cfg(test)]
#[path = "lod_test.rs"]
mod lod_test;
