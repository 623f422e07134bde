//! UploadSink - hand-off of a finished frame's buffers to the renderer.
//!
//! The octree only produces bytes. Buffer creation, lifetime and the GPU
//! queue belong to the host behind [`UploadSink`].

use crate::octree::{ListNode, Octree};
use crate::types::{RenderInstance, SdfUnit};

/// Buffer holding the live render instances.
pub const RENDER_INSTANCES_BUFFER: &str = "sdf-render-instances";
/// Buffer holding the SDF units, indexed by the ids stored in leaf chains.
pub const UNITS_BUFFER: &str = "sdf-units-buffer";
/// Buffer holding the leaf chain chunks, indexed by `list_node_index`.
pub const LIST_NODES_BUFFER: &str = "sdf-list-nodes";

/// Receiver of named, flat byte buffers.
///
/// # Example (wgpu)
///
/// ```ignore
/// struct QueueSink<'a> {
///     queue: &'a wgpu::Queue,
///     buffers: &'a HashMap<&'static str, wgpu::Buffer>,
/// }
///
/// impl UploadSink for QueueSink<'_> {
///     fn upload(&mut self, name: &str, bytes: &[u8]) {
///         self.queue.write_buffer(&self.buffers[name], 0, bytes);
///     }
/// }
/// ```
pub trait UploadSink {
  /// Called once per buffer per frame. `bytes` only covers live elements.
  fn upload(&mut self, name: &str, bytes: &[u8]);
}

/// No-op sink for headless runs.
pub struct NullSink;

impl UploadSink for NullSink {
  fn upload(&mut self, _name: &str, _bytes: &[u8]) {
    // No-op
  }
}

/// Everything the renderer needs from one completed rebuild.
#[derive(Clone, Copy, Debug)]
pub struct FrameOutputs<'a> {
  pub render_instances: &'a [RenderInstance],
  pub units: &'a [SdfUnit],
  pub list_nodes: &'a [ListNode],
}

impl FrameOutputs<'_> {
  /// Push the three buffers to `sink`: instances, units, then list nodes.
  pub fn upload_to(&self, sink: &mut dyn UploadSink) {
    sink.upload(RENDER_INSTANCES_BUFFER, bytemuck::cast_slice(self.render_instances));
    sink.upload(UNITS_BUFFER, bytemuck::cast_slice(self.units));
    sink.upload(LIST_NODES_BUFFER, bytemuck::cast_slice(self.list_nodes));
    tracing::trace!(
      instances = self.render_instances.len(),
      units = self.units.len(),
      list_nodes = self.list_nodes.len(),
      "frame buffers uploaded"
    );
  }
}

impl Octree {
  /// Outputs of the last rebuild, paired with the units it was built from.
  ///
  /// `None` if the last rebuild failed or none has run since `clear`.
  pub fn frame_outputs<'a>(&'a self, units: &'a [SdfUnit]) -> Option<FrameOutputs<'a>> {
    self.is_frame_complete().then(|| FrameOutputs {
      render_instances: self.render_instances(),
      units,
      list_nodes: self.list_nodes(),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::octree::OctreeConfig;
  use crate::types::{SdfOp, SdfShape};
  use crate::viewer::Viewer;
  use glam::{UVec2, Vec3, Vec4};

  #[derive(Default)]
  struct RecordingSink {
    uploads: Vec<(String, Vec<u8>)>,
  }

  impl UploadSink for RecordingSink {
    fn upload(&mut self, name: &str, bytes: &[u8]) {
      self.uploads.push((name.to_string(), bytes.to_vec()));
    }
  }

  fn unit(position: Vec3) -> SdfUnit {
    SdfUnit::new(position, Vec4::new(1.0, 1.0, 1.0, 0.0), SdfShape::Sphere, SdfOp::Add)
  }

  #[test]
  fn test_outputs_unavailable_before_rebuild() {
    let octree = Octree::new(OctreeConfig::default()).unwrap();
    assert!(octree.frame_outputs(&[]).is_none());
  }

  #[test]
  fn test_upload_sends_live_bytes_in_order() {
    let mut octree = Octree::new(OctreeConfig::default()).unwrap();
    let viewer = Viewer::look_at(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y, 90.0, UVec2::splat(1024));
    let units = [unit(Vec3::new(4.0, 4.0, -1004.0)), unit(Vec3::new(-4.0, -4.0, -1004.0))];
    octree.rebuild(&units, &viewer).unwrap();

    let mut sink = RecordingSink::default();
    octree.frame_outputs(&units).unwrap().upload_to(&mut sink);

    let names: Vec<_> = sink.uploads.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, [RENDER_INSTANCES_BUFFER, UNITS_BUFFER, LIST_NODES_BUFFER]);

    assert_eq!(sink.uploads[0].1.len(), 2 * std::mem::size_of::<RenderInstance>());
    assert_eq!(sink.uploads[1].1.len(), 2 * std::mem::size_of::<SdfUnit>());
    assert_eq!(sink.uploads[2].1.len(), 2 * std::mem::size_of::<ListNode>());
    assert_eq!(sink.uploads[1].1.as_slice(), bytemuck::cast_slice::<SdfUnit, u8>(&units));
  }

  #[test]
  fn test_failed_rebuild_withholds_outputs() {
    let mut octree = Octree::new(OctreeConfig {
      max_render_instances: 1,
      ..Default::default()
    })
    .unwrap();
    let viewer = Viewer::look_at(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y, 90.0, UVec2::splat(1024));
    let units = [unit(Vec3::new(4.0, 4.0, -1004.0)), unit(Vec3::new(-4.0, -4.0, -1004.0))];

    assert!(octree.rebuild(&units, &viewer).is_err());
    assert!(octree.frame_outputs(&units).is_none());
  }
}
