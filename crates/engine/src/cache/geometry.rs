//! Cache Geometry and Address Codec.
//!
//! Derives the fixed shape of a cache from its configuration and splits raw
//! addresses into offset, index and tag fields.
//!
//! # Layout
//!
//! ```text
//!  63                         offset_bits + index_bits       offset_bits        0
//! +---------------------------+------------------------------+------------------+
//! |            tag            |            index             |      offset      |
//! +---------------------------+------------------------------+------------------+
//! ```
//!
//! Both the line size and the set count must be powers of two so that each
//! field is a contiguous bit range selected by a `size - 1` mask.

use serde::Serialize;

use crate::common::{DecodedAddress, SimError};
use crate::config::CacheConfig;

/// Immutable cache shape and the masks derived from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Geometry {
    size_bytes: u64,
    line_bytes: u64,
    ways: usize,
    sets: usize,
    offset_mask: u64,
    offset_bits: u32,
    index_mask: u64,
    index_bits: u32,
}

impl Geometry {
    /// Validates a cache configuration and derives its geometry.
    ///
    /// # Arguments
    ///
    /// * `config` - Cache size, line size and associativity.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidGeometry`] when any size is zero, the line
    /// size or derived set count is not a power of two, or
    /// `sets * ways * line_bytes` does not reproduce the cache size.
    pub fn new(config: &CacheConfig) -> Result<Self, SimError> {
        let CacheConfig {
            size_bytes,
            line_bytes,
            ways,
        } = *config;

        if size_bytes == 0 || line_bytes == 0 || ways == 0 {
            return Err(SimError::InvalidGeometry(format!(
                "size ({size_bytes}), line size ({line_bytes}) and associativity ({ways}) must be non-zero"
            )));
        }
        if !line_bytes.is_power_of_two() {
            return Err(SimError::InvalidGeometry(format!(
                "line size {line_bytes} is not a power of two"
            )));
        }

        let set_bytes = line_bytes.checked_mul(ways).ok_or_else(|| {
            SimError::InvalidGeometry(format!("{ways} ways of {line_bytes} bytes overflow"))
        })?;
        if size_bytes < set_bytes || size_bytes % set_bytes != 0 {
            return Err(SimError::InvalidGeometry(format!(
                "cache size {size_bytes} is not a multiple of {ways} ways x {line_bytes} bytes"
            )));
        }

        let sets = size_bytes / set_bytes;
        if !sets.is_power_of_two() {
            return Err(SimError::InvalidGeometry(format!(
                "set count {sets} is not a power of two"
            )));
        }

        let to_usize = |value: u64, what: &str| {
            usize::try_from(value).map_err(|_| {
                SimError::InvalidGeometry(format!("{what} {value} exceeds the host word size"))
            })
        };

        Ok(Self {
            size_bytes,
            line_bytes,
            ways: to_usize(ways, "associativity")?,
            sets: to_usize(sets, "set count")?,
            offset_mask: line_bytes - 1,
            offset_bits: line_bytes.trailing_zeros(),
            index_mask: sets - 1,
            index_bits: sets.trailing_zeros(),
        })
    }

    /// Splits a raw address into offset, index and tag.
    #[inline]
    pub const fn decode(&self, addr: u64) -> DecodedAddress {
        let offset = addr & self.offset_mask;
        let rest = addr >> self.offset_bits;
        let index = rest & self.index_mask;
        let tag = rest >> self.index_bits;
        DecodedAddress { offset, index, tag }
    }

    /// Rebuilds a raw address from its fields.
    ///
    /// Inverse of [`decode`](Self::decode) for every address.
    #[inline]
    pub fn compose(&self, decoded: &DecodedAddress) -> u64 {
        let tag_shift = self.offset_bits + self.index_bits;
        decoded.tag.checked_shl(tag_shift).unwrap_or(0)
            | ((decoded.index & self.index_mask) << self.offset_bits)
            | (decoded.offset & self.offset_mask)
    }

    /// Total capacity in bytes.
    pub const fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// Line size in bytes.
    pub const fn line_bytes(&self) -> u64 {
        self.line_bytes
    }

    /// Associativity (lines per set).
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Number of sets.
    pub const fn sets(&self) -> usize {
        self.sets
    }

    /// Total number of lines across all sets.
    pub const fn lines(&self) -> usize {
        self.sets * self.ways
    }

    /// Mask selecting the offset field.
    pub const fn offset_mask(&self) -> u64 {
        self.offset_mask
    }

    /// Width of the offset field in bits.
    pub const fn offset_bits(&self) -> u32 {
        self.offset_bits
    }

    /// Mask selecting the index field (after the offset shift).
    pub const fn index_mask(&self) -> u64 {
        self.index_mask
    }

    /// Width of the index field in bits.
    pub const fn index_bits(&self) -> u32 {
        self.index_bits
    }
}
