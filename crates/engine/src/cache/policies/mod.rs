//! Cache Replacement Policies.
//!
//! Selects the victim line within a set when a read miss must allocate.
//!
//! # Policies
//!
//! - `Fifo`: Evicts the line loaded earliest, using per-line load ages.

/// First-In, First-Out replacement policy.
pub mod fifo;

pub use fifo::FifoPolicy;

use super::CacheSet;

/// Trait for cache replacement policies.
///
/// Policies inspect the lines of a set and never mutate them; the caller
/// performs the load into the chosen way.
pub trait ReplacementPolicy: Send + Sync + std::fmt::Debug {
    /// Selects the way to fill in `set`.
    ///
    /// # Arguments
    ///
    /// * `set` - The set receiving the new block.
    ///
    /// # Returns
    ///
    /// The index of the way to overwrite.
    fn victim(&self, set: &CacheSet) -> usize;
}
