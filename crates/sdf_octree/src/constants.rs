//! Layout constants shared by the octree, the leaf chains and the GPU side.
//!
//! # Leaf chain chunk layout
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  word:   0      1 ........................... 14        15       │
//! │  head:  [count][ id 0 ....................... id 13 ][ next ]    │
//! │  cont:  [ id 0 ............................... id 14 ][ next ]    │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every chunk is 16 words (64 bytes). The head of a chain spends its first
//! word on the running id count, continuation chunks use all 15 data words
//! for ids.

/// Children per axis of an internal node (2 → octree).
pub const OCTREE_NODE_WIDTH: usize = 2;

/// Children per internal node.
pub const OCTREE_CHILD_COUNT: usize = OCTREE_NODE_WIDTH * OCTREE_NODE_WIDTH * OCTREE_NODE_WIDTH;

/// Data words per chain chunk (excluding the `next` link).
pub const CHUNK_DATA_WORDS: usize = 15;

/// Id slots in the head chunk of a chain (one data word holds the count).
pub const HEAD_CHUNK_IDS: usize = CHUNK_DATA_WORDS - 1;

/// Id slots in every continuation chunk of a chain.
pub const CONTINUATION_CHUNK_IDS: usize = CHUNK_DATA_WORDS;

/// `next` value marking the last chunk of a chain.
pub const NO_NEXT_CHUNK: u32 = u32::MAX;

/// Largest pool index a node reference can carry (30-bit location).
pub const MAX_NODE_LOCATION: u32 = (1 << 30) - 1;

/// World width of a level-0 cell.
pub const DEFAULT_BASE_SCALE: f32 = 1.0;

/// Level of the root node.
pub const DEFAULT_MAX_LEVEL: u32 = 32;

/// (Roughly) the on-screen pixel width each cell should cover.
pub const DEFAULT_TARGET_PIXEL_SIZE: f32 = 128.0;

/// Margin added to a unit's scale before computing its footprint.
pub const DEFAULT_BOUNDS_PADDING: f32 = 0.1;

pub const DEFAULT_INTERNAL_NODE_CAPACITY: u32 = 1024;
pub const DEFAULT_LIST_NODE_CAPACITY: u32 = 2048;
pub const DEFAULT_MAX_RENDER_INSTANCES: u32 = 1024;

/// Number of chunks a chain holding `count` ids occupies.
///
/// `1 + ceil(max(0, count - 14) / 15)`
#[inline]
pub const fn chain_chunks_for(count: u32) -> u32 {
  let overflow = count.saturating_sub(HEAD_CHUNK_IDS as u32);
  1 + overflow.div_ceil(CONTINUATION_CHUNK_IDS as u32)
}
