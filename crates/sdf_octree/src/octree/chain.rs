//! Leaf chains - the unbounded list of unit ids attached to one leaf cell.
//!
//! A chain is a singly linked run of fixed 16-word chunks from the list node
//! pool. The head chunk keeps the running count in its first data word, so
//! it holds 14 ids; continuation chunks hold 15. The count is the only
//! bookkeeping: where the next id goes is derived from it.

use bytemuck::{Pod, Zeroable};
use smallvec::SmallVec;

use crate::arena::ArenaPool;
use crate::constants::{CHUNK_DATA_WORDS, CONTINUATION_CHUNK_IDS, HEAD_CHUNK_IDS, NO_NEXT_CHUNK};
use crate::error::OctreeResult;

/// One chunk of a leaf chain, uploaded verbatim.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct ListNode {
  /// Head: `[count, id0..id13]`. Continuation: `[id0..id14]`.
  pub data: [u32; CHUNK_DATA_WORDS],
  /// Pool index of the next chunk, or [`NO_NEXT_CHUNK`].
  pub next: u32,
}

impl ListNode {
  /// Ids stored in the whole chain (head chunks only).
  #[inline]
  pub fn count(&self) -> u32 {
    self.data[0]
  }

  #[inline]
  pub fn next(&self) -> Option<u32> {
    (self.next != NO_NEXT_CHUNK).then_some(self.next)
  }
}

/// Id slots in use in the head and in the tail chunk for a chain of `count`.
///
/// Returns `(tail_is_head, used_slots_in_tail)`.
#[inline]
fn tail_fill(count: u32) -> (bool, usize) {
  let count = count as usize;
  if count <= HEAD_CHUNK_IDS {
    (true, count)
  } else {
    let overflow = count - HEAD_CHUNK_IDS;
    let used = overflow % CONTINUATION_CHUNK_IDS;
    // A full continuation reports 15 used, not 0.
    (false, if used == 0 { CONTINUATION_CHUNK_IDS } else { used })
  }
}

/// Allocate an empty head chunk.
pub fn new_chain(pool: &mut ArenaPool<ListNode>) -> OctreeResult<u32> {
  let head = pool.alloc()?;
  pool.get_mut(head).next = NO_NEXT_CHUNK;
  Ok(head)
}

/// Append `id` to the chain starting at `head`.
///
/// Walks to the last chunk; if it is full, links a fresh continuation from
/// `pool`. On failure the chain is unchanged.
pub fn append_id(pool: &mut ArenaPool<ListNode>, head: u32, id: u32) -> OctreeResult<()> {
  let mut tail = head;
  while let Some(next) = pool.get(tail).next() {
    tail = next;
  }

  let count = pool.get(head).count();
  let (tail_is_head, used) = tail_fill(count);

  if tail_is_head && used < HEAD_CHUNK_IDS {
    pool.get_mut(tail).data[1 + used] = id;
  } else if !tail_is_head && used < CONTINUATION_CHUNK_IDS {
    pool.get_mut(tail).data[used] = id;
  } else {
    let chunk = pool.alloc()?;
    {
      let node = pool.get_mut(chunk);
      node.data[0] = id;
      node.next = NO_NEXT_CHUNK;
    }
    pool.get_mut(tail).next = chunk;
  }

  pool.get_mut(head).data[0] = count + 1;
  Ok(())
}

/// All ids of a chain in append order.
pub fn chain_ids(pool: &ArenaPool<ListNode>, head: u32) -> SmallVec<[u32; HEAD_CHUNK_IDS]> {
  let head_node = pool.get(head);
  let mut remaining = head_node.count() as usize;
  let mut ids = SmallVec::with_capacity(remaining);

  let take = remaining.min(HEAD_CHUNK_IDS);
  ids.extend_from_slice(&head_node.data[1..1 + take]);
  remaining -= take;

  let mut cursor = head_node.next();
  while let Some(index) = cursor {
    let node = pool.get(index);
    let take = remaining.min(CONTINUATION_CHUNK_IDS);
    ids.extend_from_slice(&node.data[..take]);
    remaining -= take;
    cursor = node.next();
  }

  ids
}

/// Number of chunks in the chain starting at `head`.
pub fn chain_len(pool: &ArenaPool<ListNode>, head: u32) -> u32 {
  let mut len = 1;
  let mut cursor = pool.get(head).next();
  while let Some(index) = cursor {
    len += 1;
    cursor = pool.get(index).next();
  }
  len
}

/// Whether `id` occurs anywhere in the chain.
pub fn chain_contains(pool: &ArenaPool<ListNode>, head: u32, id: u32) -> bool {
  chain_ids(pool, head).contains(&id)
}

#[cfg(test)]
#[path = "chain_test.rs"]
mod chain_test;
