//! sdf_octree - Per-frame sparse octree over SDF primitives
//!
//! Every frame the octree is cleared and rebuilt from a flat array of SDF
//! units and the camera. Each unit gets a level from two screen-space
//! heuristics and is inserted into every cell of that level its padded box
//! touches. The result is three GPU-ready buffers: one render instance per
//! leaf cell, the chained unit ids of every leaf, and the units themselves.
//!
//! # Features
//!
//! - **Arena pools**: fixed-capacity, index-addressed, O(1) clear
//! - **LOD selection**: finer of a distance and a projected-size estimate
//! - **Leaf chains**: 16-word chunks holding the unit ids of one cell
//! - **Upload hand-off**: named byte buffers via [`UploadSink`]
//!
//! # Example
//!
//! ```ignore
//! use sdf_octree::{scene, Octree, OctreeConfig, Viewer};
//!
//! let mut octree = Octree::new(OctreeConfig::default())?;
//! let units = scene::demo_units();
//! let viewer = Viewer::look_at(eye, dir, Vec3::Y, 60.0, UVec2::new(1280, 720));
//!
//! let stats = octree.rebuild(&units, &viewer)?;
//! if let Some(outputs) = octree.frame_outputs(&units) {
//!     outputs.upload_to(&mut sink);
//! }
//! ```

pub mod arena;
pub mod constants;
pub mod error;
pub mod types;

pub use error::{OctreeError, OctreeResult, PoolKind};
pub use types::{RenderInstance, SdfOp, SdfShape, SdfUnit};

// Octree storage and insertion
pub mod octree;
pub use octree::{BuildStats, InsertOutcome, NodeRef, Octree, OctreeConfig, UnitPlacement};

// Camera and level selection
pub mod lod;
pub mod viewer;
pub use lod::LodEstimate;
pub use viewer::Viewer;

// Frame orchestration and output
mod rebuild;
pub mod upload;
pub use upload::{FrameOutputs, UploadSink};

pub mod metrics;
pub mod scene;
