//! Engine-agnostic metrics for octree rebuilds.
//!
//! Feature-gated and runtime-toggled so a default build pays nothing.
//!
//! # Usage
//!
//! ```ignore
//! use sdf_octree::metrics::{OctreeMetrics, COLLECT_METRICS};
//!
//! // Compile with --features metrics
//! // Runtime toggle:
//! COLLECT_METRICS.store(false, Ordering::Relaxed);
//!
//! let stats = octree.rebuild(&units, &viewer)?;
//! metrics.record_build(&stats, octree.render_instances());
//! ```

use std::collections::VecDeque;
#[cfg(feature = "metrics")]
use std::sync::atomic::Ordering;
use std::sync::atomic::AtomicBool;

use crate::octree::BuildStats;
use crate::types::RenderInstance;

/// Levels tracked individually; coarser instances land in the last bucket.
pub const TRACKED_LEVELS: usize = 16;

/// Runtime toggle for metrics collection.
pub static COLLECT_METRICS: AtomicBool = AtomicBool::new(true);

/// Check if metrics collection is enabled (both compile-time and runtime).
#[inline]
pub fn is_enabled() -> bool {
  #[cfg(feature = "metrics")]
  {
    COLLECT_METRICS.load(Ordering::Relaxed)
  }
  #[cfg(not(feature = "metrics"))]
  {
    false
  }
}

/// Fixed-size history of recent samples, oldest evicted first.
#[derive(Debug, Clone)]
pub struct RollingWindow {
  buffer: VecDeque<u64>,
  capacity: usize,
}

impl RollingWindow {
  pub fn new(capacity: usize) -> Self {
    Self {
      buffer: VecDeque::with_capacity(capacity),
      capacity,
    }
  }

  pub fn push(&mut self, value: u64) {
    if self.buffer.len() >= self.capacity {
      self.buffer.pop_front();
    }
    self.buffer.push_back(value);
  }

  pub fn len(&self) -> usize {
    self.buffer.len()
  }

  pub fn is_empty(&self) -> bool {
    self.buffer.is_empty()
  }

  pub fn clear(&mut self) {
    self.buffer.clear();
  }

  pub fn last(&self) -> Option<u64> {
    self.buffer.back().copied()
  }

  pub fn average(&self) -> f64 {
    if self.buffer.is_empty() {
      0.0
    } else {
      self.buffer.iter().sum::<u64>() as f64 / self.buffer.len() as f64
    }
  }

  pub fn min_max(&self) -> Option<(u64, u64)> {
    let min = self.buffer.iter().min()?;
    let max = self.buffer.iter().max()?;
    Some((*min, *max))
  }
}

impl Default for RollingWindow {
  fn default() -> Self {
    Self::new(128) // ~2 seconds at 60fps
  }
}

/// Per-frame octree statistics plus rolling build timings.
#[derive(Debug, Clone, Default)]
pub struct OctreeMetrics {
  /// Render instances at each level in the last frame (index = level).
  pub instances_per_level: [u32; TRACKED_LEVELS],
  /// Last frame's build counters.
  pub last_build: BuildStats,
  /// Rolling window of build times in microseconds.
  pub build_timings: RollingWindow,
  /// Total rebuilds recorded this session.
  pub total_builds: u64,
}

impl OctreeMetrics {
  pub fn new() -> Self {
    Self::default()
  }

  /// Record one successful rebuild.
  pub fn record_build(&mut self, stats: &BuildStats, instances: &[RenderInstance]) {
    if !is_enabled() {
      return;
    }

    self.instances_per_level.fill(0);
    for instance in instances {
      let level = (instance.level as usize).min(TRACKED_LEVELS - 1);
      self.instances_per_level[level] += 1;
    }
    self.last_build = *stats;
    self.build_timings.push(stats.build_time_us);
    self.total_builds += 1;
  }

  /// Reset per-frame data and timings. `total_builds` is cumulative and kept.
  pub fn reset(&mut self) {
    self.instances_per_level.fill(0);
    self.last_build = BuildStats::default();
    self.build_timings.clear();
  }

  pub fn total_instances(&self) -> u32 {
    self.instances_per_level.iter().sum()
  }

  pub fn avg_build_time_us(&self) -> f64 {
    self.build_timings.average()
  }
}
