//! Fixed-capacity slab allocator with index-linked free list.
//!
//! Slots are identified by their `u32` index, never by address. The free list
//! is threaded through a side table of indices, so `clear` only has to reset
//! two counters: everything handed out before a clear is simply forgotten.

use bytemuck::Zeroable;

use crate::error::{OctreeError, OctreeResult, PoolKind};

/// Sentinel for "no free slot" in the free list.
const NIL: u32 = u32::MAX;
/// `next_free` marker for a slot that is handed out, not on the free list.
const IN_USE: u32 = u32::MAX - 1;

/// Slab of `capacity` zero-initialized `T`s.
pub struct ArenaPool<T> {
  slots: Vec<T>,
  /// `next_free[i]` is the free slot after `i` while `i` is on the free list,
  /// `IN_USE` while it is live.
  next_free: Vec<u32>,
  free_head: u32,
  /// Slots `[0, high_water)` have been handed out at least once since the last clear.
  high_water: u32,
  /// Number of slots currently on the free list.
  free_len: u32,
  kind: PoolKind,
}

impl<T: Zeroable + Copy> ArenaPool<T> {
  /// Create a pool with `capacity` slots. `kind` labels capacity errors.
  pub fn new(capacity: u32, kind: PoolKind) -> Self {
    Self {
      slots: vec![T::zeroed(); capacity as usize],
      next_free: vec![IN_USE; capacity as usize],
      free_head: NIL,
      high_water: 0,
      free_len: 0,
      kind,
    }
  }

  /// Allocate a zeroed slot, reusing freed slots first.
  ///
  /// Fails without touching the pool when every slot is live.
  pub fn alloc(&mut self) -> OctreeResult<u32> {
    let index = if self.free_head != NIL {
      let index = self.free_head;
      self.free_head = self.next_free[index as usize];
      self.free_len -= 1;
      index
    } else {
      if self.high_water as usize >= self.slots.len() {
        return Err(OctreeError::CapacityExceeded {
          pool: self.kind,
          capacity: self.capacity(),
        });
      }
      let index = self.high_water;
      self.high_water += 1;
      index
    };

    self.next_free[index as usize] = IN_USE;
    self.slots[index as usize] = T::zeroed();
    Ok(index)
  }

  /// Return a slot to the free list.
  ///
  /// Freeing an index that was never allocated in this build, or one that
  /// is already free, is ignored.
  pub fn free(&mut self, index: u32) {
    if index >= self.high_water {
      tracing::warn!(pool = %self.kind, index, high_water = self.high_water, "ignoring free of unallocated slot");
      return;
    }
    if self.next_free[index as usize] != IN_USE {
      tracing::warn!(pool = %self.kind, index, "ignoring double free");
      return;
    }
    self.next_free[index as usize] = self.free_head;
    self.free_head = index;
    self.free_len += 1;
  }

  /// Forget every allocation. O(1): slot contents are left as-is and
  /// re-zeroed on their next `alloc`.
  pub fn clear(&mut self) {
    self.free_head = NIL;
    self.high_water = 0;
    self.free_len = 0;
  }

  #[inline]
  pub fn get(&self, index: u32) -> &T {
    &self.slots[index as usize]
  }

  #[inline]
  pub fn get_mut(&mut self, index: u32) -> &mut T {
    &mut self.slots[index as usize]
  }

  /// Total slots.
  #[inline]
  pub fn capacity(&self) -> u32 {
    self.slots.len() as u32
  }

  /// Slots handed out since the last clear, freed or not. Upload ranges
  /// use this bound, indices embedded in the tree are always below it.
  #[inline]
  pub fn high_water(&self) -> u32 {
    self.high_water
  }

  /// Slots currently live (allocated and not freed).
  #[inline]
  pub fn live(&self) -> u32 {
    self.high_water - self.free_len
  }

  /// The `[0, high_water)` prefix of the slab.
  pub fn as_slice(&self) -> &[T] {
    &self.slots[..self.high_water as usize]
  }

  pub fn kind(&self) -> PoolKind {
    self.kind
  }
}

#[cfg(test)]
#[path = "arena_test.rs"]
mod arena_test;
