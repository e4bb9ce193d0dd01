//! Decomposed cache addresses.
//!
//! A raw address is split into three fields by the cache geometry:
//! 1. **Offset:** Byte position inside a line.
//! 2. **Index:** Which set the address maps to.
//! 3. **Tag:** Identifies which block currently occupies a line.

use serde::Serialize;

/// The (offset, index, tag) view of one raw address.
///
/// Produced by [`Geometry::decode`](crate::cache::Geometry::decode) and never
/// stored; it is recomputed for every trace entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct DecodedAddress {
    /// Byte offset within the line.
    pub offset: u64,
    /// Set index.
    pub index: u64,
    /// Remaining high-order bits.
    pub tag: u64,
}

impl DecodedAddress {
    /// Returns the set index as a position into the set table.
    #[inline(always)]
    pub const fn set(&self) -> usize {
        self.index as usize
    }
}
