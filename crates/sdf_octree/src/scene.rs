//! Built-in demo scene: two blended sphere/cube pairs, one pair animated.

use glam::{Vec3, Vec4};

use crate::types::{SdfOp, SdfShape, SdfUnit};

/// The four demo units, each pair sharing a center.
pub fn demo_units() -> Vec<SdfUnit> {
  let left = Vec3::new(-1.0, 0.0, 1.0);
  let right = Vec3::new(1.0, 0.0, 1.0);
  vec![
    SdfUnit::new(left, Vec4::new(0.6, 0.2, 0.7, 0.55), SdfShape::Sphere, SdfOp::SmoothAdd),
    SdfUnit::new(left, Vec4::new(0.6, 0.2, 0.7, 0.1), SdfShape::Cube, SdfOp::SmoothAdd),
    SdfUnit::new(right, Vec4::new(0.6, 0.2, 0.7, 0.55), SdfShape::Sphere, SdfOp::SmoothAdd),
    SdfUnit::new(right, Vec4::new(0.6, 0.2, 0.7, 0.1), SdfShape::Cube, SdfOp::SmoothAdd),
  ]
}

/// Move the demo spheres for time `time` (seconds): the first bobs along Y,
/// the second circles in XZ. Other units are left alone.
pub fn animate_demo_units(units: &mut [SdfUnit], time: f32) {
  let (sin, cos) = time.sin_cos();
  if let Some(sphere) = units.get_mut(0) {
    sphere.position.y = 0.5 + 0.3 * sin;
  }
  if let Some(sphere) = units.get_mut(2) {
    sphere.position.x = 1.0 + 0.3 * sin;
    sphere.position.z = 1.0 + 0.3 * cos;
  }
}
