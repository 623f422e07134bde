//! Primitive and render-instance records shared with the GPU.

use bytemuck::{Pod, Zeroable};
use glam::{DVec3, Vec3, Vec4};

use crate::octree::DAabb3;

/// Shape of an SDF unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum SdfShape {
  Sphere = 0,
  Cube = 1,
}

/// Boolean operation an SDF unit applies to the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum SdfOp {
  Add = 0,
  Sub = 1,
  Intersect = 2,
  SmoothAdd = 3,
  SmoothSub = 4,
  SmoothIntersect = 5,
}

impl SdfShape {
  pub fn from_raw(raw: u32) -> Option<Self> {
    match raw {
      0 => Some(Self::Sphere),
      1 => Some(Self::Cube),
      _ => None,
    }
  }
}

impl SdfOp {
  pub fn from_raw(raw: u32) -> Option<Self> {
    match raw {
      0 => Some(Self::Add),
      1 => Some(Self::Sub),
      2 => Some(Self::Intersect),
      3 => Some(Self::SmoothAdd),
      4 => Some(Self::SmoothSub),
      5 => Some(Self::SmoothIntersect),
      _ => None,
    }
  }
}

/// One SDF primitive ("unit") as laid out in the GPU units buffer.
///
/// `position.xyz` is the world-space center, `scale.xyz` the half extents.
/// `scale.w` is the smoothing radius used by the smooth ops.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct SdfUnit {
  pub position: Vec4,
  pub scale: Vec4,
  pub shape: u32,
  pub op: u32,
  pub pad: [u32; 2],
}

impl SdfUnit {
  pub fn new(position: Vec3, scale: Vec4, shape: SdfShape, op: SdfOp) -> Self {
    Self {
      position: position.extend(1.0),
      scale,
      shape: shape as u32,
      op: op as u32,
      pad: [0; 2],
    }
  }

  #[inline]
  pub fn center(&self) -> Vec3 {
    self.position.truncate()
  }

  /// Half extents grown by `padding` on every axis.
  #[inline]
  pub fn padded_scale(&self, padding: f32) -> Vec3 {
    self.scale.truncate() + Vec3::splat(padding)
  }

  /// Padded axis-aligned bounds in double precision.
  pub fn padded_bounds(&self, padding: f32) -> DAabb3 {
    DAabb3::from_center_half_extents(
      self.center().as_dvec3(),
      self.padded_scale(padding).as_dvec3(),
    )
  }

  pub fn shape(&self) -> Option<SdfShape> {
    SdfShape::from_raw(self.shape)
  }

  pub fn op(&self) -> Option<SdfOp> {
    SdfOp::from_raw(self.op)
  }
}

/// One live leaf cell, drawn by the renderer as a coarse cube.
///
/// Field order matches the shader struct: list index first, then the
/// cell's minimum corner, then its level (cell width = base scale * 2^level).
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
  pub list_node_index: u32,
  pub world_position: Vec3,
  pub level: u32,
}

impl RenderInstance {
  pub fn new(world_position: DVec3, level: u32, list_node_index: u32) -> Self {
    Self {
      list_node_index,
      world_position: world_position.as_vec3(),
      level,
    }
  }

  /// World width of the cell.
  #[inline]
  pub fn cell_width(&self, base_scale: f32) -> f32 {
    base_scale * (self.level as f32).exp2()
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
