//! Access Latency Model.
//!
//! Converts the classification of one access into a cycle cost:
//!
//! | Access | Hit   | Miss               |
//! |--------|-------|--------------------|
//! | Read   | 1     | `tc + trm` (loads) |
//! | Write  | `twm` | `twm` (no load)    |
//!
//! Writes always pay the memory write time because the cache is
//! write-through; write misses never allocate.

use serde::Serialize;

use crate::common::AccessKind;
use crate::config::TimingConfig;

/// Cycles charged for a read that hits.
pub const READ_HIT_CYCLES: u64 = 1;

/// Result of a cache lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum LookupOutcome {
    /// A valid line held the tag.
    Hit,
    /// No valid line held the tag.
    Miss,
}

impl LookupOutcome {
    /// Returns `true` for [`LookupOutcome::Hit`].
    #[inline]
    pub const fn is_hit(self) -> bool {
        matches!(self, Self::Hit)
    }
}

/// Latency parameters for one run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimingModel {
    cache_latency: u64,
    mem_read_latency: u64,
    mem_write_latency: u64,
}

impl TimingModel {
    /// Creates a timing model from configured latencies.
    pub const fn new(config: &TimingConfig) -> Self {
        Self {
            cache_latency: config.cache_latency,
            mem_read_latency: config.mem_read_latency,
            mem_write_latency: config.mem_write_latency,
        }
    }

    /// Cycles charged for one access.
    ///
    /// # Arguments
    ///
    /// * `kind` - Whether the access reads or writes.
    /// * `outcome` - Whether the lookup hit.
    pub const fn cost(&self, kind: AccessKind, outcome: LookupOutcome) -> u64 {
        match (kind, outcome) {
            (AccessKind::Read, LookupOutcome::Hit) => READ_HIT_CYCLES,
            (AccessKind::Read, LookupOutcome::Miss) => {
                self.cache_latency.saturating_add(self.mem_read_latency)
            }
            (AccessKind::Write, _) => self.mem_write_latency,
        }
    }

    /// Whether a miss of this kind loads the block into the cache.
    pub const fn allocates_on_miss(kind: AccessKind) -> bool {
        kind.is_read()
    }
}

impl From<&TimingConfig> for TimingModel {
    fn from(config: &TimingConfig) -> Self {
        Self::new(config)
    }
}
