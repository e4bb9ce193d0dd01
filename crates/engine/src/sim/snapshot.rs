//! Per-step observation of a run.
//!
//! After every access the simulator can hand a [`Snapshot`] to an observer.
//! Snapshots are plain values: they carry the configuration summary, the
//! running counters and the resident address of every line, and they hold no
//! reference back into the simulator. Rendering them is the observer's job.

use serde::Serialize;

use crate::cache::Cache;
use crate::config::Config;
use crate::stats::SimStats;

/// The observable state of a run after one access.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Number of accesses replayed so far.
    pub step: usize,
    /// Configuration the run uses.
    pub config: Config,
    /// Running counters.
    pub stats: SimStats,
    /// Resident address per line, `None` for invalid lines; one row per set.
    pub lines: Vec<Vec<Option<u64>>>,
}

impl Snapshot {
    /// Captures the current state of `cache`.
    pub fn capture(step: usize, config: &Config, stats: &SimStats, cache: &Cache) -> Self {
        let lines = cache
            .sets()
            .iter()
            .map(|set| {
                set.lines()
                    .iter()
                    .map(|line| line.valid.then_some(line.addr))
                    .collect()
            })
            .collect();

        Self {
            step,
            config: config.clone(),
            stats: *stats,
            lines,
        }
    }

    /// Number of sets in the line table.
    pub const fn sets(&self) -> usize {
        self.lines.len()
    }
}

/// Receives snapshots while a run progresses.
///
/// Closures taking `&Snapshot` implement this trait.
pub trait SnapshotSink {
    /// Called once after every replayed access.
    fn observe(&mut self, snapshot: &Snapshot);
}

impl<F: FnMut(&Snapshot)> SnapshotSink for F {
    fn observe(&mut self, snapshot: &Snapshot) {
        self(snapshot);
    }
}
