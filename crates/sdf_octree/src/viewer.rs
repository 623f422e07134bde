//! Camera state read by the LOD estimator, refreshed once per frame.

use glam::{Mat4, UVec2, Vec3};

/// Near clip plane distance.
pub const NEAR: f32 = 1.0;
/// Far clip plane distance.
pub const FAR: f32 = 100_000.0;

/// View and projection of the frame's camera.
///
/// Right-handed, OpenGL clip depth (`-1..1`), camera looking down `-Z` in
/// view space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewer {
  pub view: Mat4,
  pub projection: Mat4,
  pub view_projection: Mat4,
  pub inverse_view: Mat4,
  /// Viewport resolution in pixels.
  pub viewport: UVec2,
  pub position: Vec3,
  pub view_dir: Vec3,
  pub up: Vec3,
  /// Vertical field of view in radians.
  pub fov_y: f32,
  pub near: f32,
  pub far: f32,
}

impl Viewer {
  /// Camera at `position` looking along `view_dir`.
  pub fn look_at(position: Vec3, view_dir: Vec3, up: Vec3, fov_y_degrees: f32, viewport: UVec2) -> Self {
    let fov_y = fov_y_degrees.to_radians();
    let aspect = viewport.x.max(1) as f32 / viewport.y.max(1) as f32;
    let projection = Mat4::perspective_rh_gl(fov_y, aspect, NEAR, FAR);
    let view = Mat4::look_at_rh(position, position + view_dir, up);

    Self {
      view,
      projection,
      view_projection: projection * view,
      inverse_view: view.inverse(),
      viewport,
      position,
      view_dir,
      up,
      fov_y,
      near: NEAR,
      far: FAR,
    }
  }

  /// Camera from host-supplied matrices. Position and orientation are
  /// recovered from the inverse view.
  pub fn from_matrices(view: Mat4, projection: Mat4, viewport: UVec2) -> Self {
    let inverse_view = view.inverse();
    let fov_y = 2.0 * (1.0 / projection.y_axis.y).atan();
    Self {
      view,
      projection,
      view_projection: projection * view,
      inverse_view,
      viewport,
      position: inverse_view.w_axis.truncate(),
      view_dir: -inverse_view.z_axis.truncate(),
      up: inverse_view.y_axis.truncate(),
      fov_y,
      near: NEAR,
      far: FAR,
    }
  }

  /// View-space depth of `point`; negative in front of the camera.
  #[inline]
  pub fn view_z(&self, point: Vec3) -> f32 {
    self.view.transform_point3(point).z
  }

  /// Pixel extent of an NDC-space extent (NDC spans 2 units per axis).
  #[inline]
  pub fn ndc_extent_to_pixels(&self, extent: glam::Vec2) -> glam::Vec2 {
    extent * 0.5 * self.viewport.as_vec2()
  }
}
