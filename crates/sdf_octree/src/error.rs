//! Error type for octree construction.

use glam::DVec3;
use thiserror::Error;

/// Fixed-capacity store that can run out of room during a rebuild.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoolKind {
  /// Internal octree nodes.
  InternalNodes,
  /// Leaf chain chunks.
  ListNodes,
  /// Render instance array.
  RenderInstances,
}

impl std::fmt::Display for PoolKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let name = match self {
      PoolKind::InternalNodes => "internal node pool",
      PoolKind::ListNodes => "list node pool",
      PoolKind::RenderInstances => "render instance array",
    };
    f.write_str(name)
  }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OctreeError {
  /// A pool or the render instance array is full. Fatal for the current frame.
  #[error("{pool} is full (capacity {capacity})")]
  CapacityExceeded { pool: PoolKind, capacity: u32 },

  /// A cell fell outside the node being descended. Indicates a level or
  /// footprint bug, not bad input.
  #[error("cell at {position} (level {level}) lies outside the octree")]
  OutOfBoundsInsert { level: u32, position: DVec3 },

  #[error("invalid config `{field}`: {reason}")]
  InvalidConfig { field: &'static str, reason: String },
}

pub type OctreeResult<T> = Result<T, OctreeError>;
