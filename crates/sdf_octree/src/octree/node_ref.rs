//! NodeRef - the three-state child slot of an internal node.
//!
//! In memory and on the GPU a slot is one packed `u32`:
//!
//! ```text
//! bit 0      has_data
//! bit 1      is_leaf
//! bits 2-31  location (index into the internal or list node pool)
//! ```
//!
//! All-zero bits decode to `Empty`, so a zeroed internal node has eight
//! empty children.

use bytemuck::{Pod, Zeroable};

use crate::constants::MAX_NODE_LOCATION;

const HAS_DATA_BIT: u32 = 1 << 0;
const IS_LEAF_BIT: u32 = 1 << 1;
const LOCATION_SHIFT: u32 = 2;

/// Decoded child slot.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum NodeRef {
  /// Nothing below this slot.
  #[default]
  Empty,
  /// Index into the internal node pool.
  Internal(u32),
  /// Index of the head chunk of a leaf chain in the list node pool.
  Leaf(u32),
}

impl NodeRef {
  #[inline]
  pub fn has_data(self) -> bool {
    !matches!(self, NodeRef::Empty)
  }

  #[inline]
  pub fn is_leaf(self) -> bool {
    matches!(self, NodeRef::Leaf(_))
  }

  /// Pool index, if the slot carries one.
  #[inline]
  pub fn location(self) -> Option<u32> {
    match self {
      NodeRef::Empty => None,
      NodeRef::Internal(loc) | NodeRef::Leaf(loc) => Some(loc),
    }
  }

  /// Pack into the 32-bit wire form.
  #[inline]
  pub fn pack(self) -> PackedNodeRef {
    let bits = match self {
      NodeRef::Empty => 0,
      NodeRef::Internal(loc) => {
        debug_assert!(loc <= MAX_NODE_LOCATION, "location {loc} exceeds 30 bits");
        HAS_DATA_BIT | (loc << LOCATION_SHIFT)
      }
      NodeRef::Leaf(loc) => {
        debug_assert!(loc <= MAX_NODE_LOCATION, "location {loc} exceeds 30 bits");
        HAS_DATA_BIT | IS_LEAF_BIT | (loc << LOCATION_SHIFT)
      }
    };
    PackedNodeRef(bits)
  }
}

/// Packed 32-bit form of a [`NodeRef`].
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Pod, Zeroable)]
pub struct PackedNodeRef(pub u32);

impl PackedNodeRef {
  pub const EMPTY: Self = Self(0);

  /// Decode. The location bits are ignored unless `has_data` is set.
  #[inline]
  pub fn unpack(self) -> NodeRef {
    if self.0 & HAS_DATA_BIT == 0 {
      return NodeRef::Empty;
    }
    let loc = self.0 >> LOCATION_SHIFT;
    if self.0 & IS_LEAF_BIT != 0 {
      NodeRef::Leaf(loc)
    } else {
      NodeRef::Internal(loc)
    }
  }
}

impl From<NodeRef> for PackedNodeRef {
  fn from(node: NodeRef) -> Self {
    node.pack()
  }
}

impl From<PackedNodeRef> for NodeRef {
  fn from(packed: PackedNodeRef) -> Self {
    packed.unpack()
  }
}

#[cfg(test)]
#[path = "node_ref_test.rs"]
mod node_ref_test;
