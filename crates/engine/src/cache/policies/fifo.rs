//! First-In, First-Out (FIFO) Replacement Policy.
//!
//! Every line carries an age that counts simulated accesses since it was
//! loaded. Ages advance for all lines on every access and are not reset on a
//! hit, so the oldest line is always the one loaded earliest. Hits therefore
//! never change the eviction order.
//!
//! # Victim selection
//!
//! 1. The first invalid line in way order, if any.
//! 2. Otherwise the line with the strictly largest age; ties go to the lowest way.
//!
//! # Performance
//!
//! - **Time Complexity:** `victim()` is O(W) for W ways.
//! - **Space Complexity:** O(1); the ages live in the lines themselves.

use super::ReplacementPolicy;
use crate::cache::CacheSet;

/// Age-based FIFO policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct FifoPolicy;

impl FifoPolicy {
    /// Creates a new FIFO policy instance.
    pub const fn new() -> Self {
        Self
    }
}

impl ReplacementPolicy for FifoPolicy {
    fn victim(&self, set: &CacheSet) -> usize {
        let lines = set.lines();
        if let Some(way) = lines.iter().position(|line| !line.valid) {
            return way;
        }

        let mut victim = 0;
        let mut oldest = 0;
        for (way, line) in lines.iter().enumerate() {
            if way == 0 || line.age > oldest {
                victim = way;
                oldest = line.age;
            }
        }
        victim
    }
}
