//! Simulator: replays a trace against one cache.
//!
//! The run is a strictly sequential fold over the trace. For every entry the
//! simulator:
//! 1. Ages every line in the cache.
//! 2. Decodes the address into offset, index and tag.
//! 3. Looks the tag up in the indexed set.
//! 4. On a read miss, asks the replacement policy for a victim and loads it.
//! 5. Charges the timing model's cost and updates the statistics.
//!
//! A run moves `Ready → Running → Done` and never goes back.

use tracing::{info, trace};

use super::snapshot::{Snapshot, SnapshotSink};
use super::trace::{Trace, TraceEntry};
use crate::cache::Cache;
use crate::cache::policies::{FifoPolicy, ReplacementPolicy};
use crate::common::{DecodedAddress, SimError};
use crate::config::{Config, ReplacementPolicy as PolicyType};
use crate::stats::SimStats;
use crate::timing::{LookupOutcome, TimingModel};

/// Lifecycle of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    /// Constructed; no entry replayed yet.
    Ready,
    /// At least one entry replayed and more remain.
    Running,
    /// Every entry has been replayed.
    Done,
}

/// What happened to one trace entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessRecord {
    /// The replayed entry.
    pub entry: TraceEntry,
    /// Its decomposed address.
    pub decoded: DecodedAddress,
    /// Hit or miss.
    pub outcome: LookupOutcome,
    /// Way that hit or was filled; `None` for a write miss.
    pub way: Option<usize>,
    /// Address previously held by the filled line, if it was valid.
    pub evicted: Option<u64>,
    /// Cycles charged.
    pub cost: u64,
}

/// Top-level simulator: cache, policy, timing model, trace and results.
#[derive(Debug)]
pub struct Simulator {
    config: Config,
    cache: Cache,
    policy: Box<dyn ReplacementPolicy>,
    timing: TimingModel,
    trace: Vec<TraceEntry>,
    cursor: usize,
    stats: SimStats,
    state: RunState,
}

impl Simulator {
    /// Creates a simulator for `trace` under `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidGeometry`] if the cache shape is not
    /// representable and [`SimError::Allocation`] if its storage cannot be
    /// reserved.
    pub fn new(config: Config, trace: Vec<TraceEntry>) -> Result<Self, SimError> {
        let cache = Cache::from_config(&config.cache)?;
        let policy: Box<dyn ReplacementPolicy> = match config.policy.replacement {
            PolicyType::Fifo => Box::new(FifoPolicy::new()),
        };
        let timing = TimingModel::new(&config.timing);

        Ok(Self {
            config,
            cache,
            policy,
            timing,
            trace,
            cursor: 0,
            stats: SimStats::default(),
            state: RunState::Ready,
        })
    }

    /// Creates a simulator from a loaded trace.
    ///
    /// # Errors
    ///
    /// See [`Simulator::new`].
    pub fn from_trace(trace: Trace) -> Result<Self, SimError> {
        Self::new(trace.config, trace.entries)
    }

    /// Replays the next trace entry.
    ///
    /// # Returns
    ///
    /// The record of the replayed access, or `None` once the run is done.
    pub fn step(&mut self) -> Option<AccessRecord> {
        let Some(&entry) = self.trace.get(self.cursor) else {
            self.finish();
            return None;
        };
        self.state = RunState::Running;

        self.cache.tick();
        let decoded = self.cache.geometry().decode(entry.addr);
        let index = decoded.set();

        let (outcome, way, evicted) = match self.cache.lookup(index, decoded.tag) {
            Some(way) => (LookupOutcome::Hit, Some(way), None),
            None if TimingModel::allocates_on_miss(entry.kind) => {
                // The index is masked to the set count, so the set exists.
                let set = &self.cache.sets()[index];
                let way = self.policy.victim(set);
                let victim = set.lines()[way];
                self.cache.load(index, way, decoded.tag, entry.addr);
                (LookupOutcome::Miss, Some(way), victim.valid.then_some(victim.addr))
            }
            None => (LookupOutcome::Miss, None, None),
        };

        let cost = self.timing.cost(entry.kind, outcome);
        self.stats.record(entry.kind, outcome, cost);
        if evicted.is_some() {
            self.stats.record_eviction();
        }

        trace!(
            step = self.cursor,
            cycle = entry.cycle,
            kind = %entry.kind,
            addr = entry.addr,
            tag = decoded.tag,
            index = decoded.index,
            offset = decoded.offset,
            hit = outcome.is_hit(),
            cost,
            "access"
        );

        self.cursor += 1;
        if self.cursor == self.trace.len() {
            self.finish();
        }

        Some(AccessRecord {
            entry,
            decoded,
            outcome,
            way,
            evicted,
            cost,
        })
    }

    /// Replays every remaining entry.
    ///
    /// # Returns
    ///
    /// The final statistics.
    pub fn run(&mut self) -> SimStats {
        while self.step().is_some() {}
        self.stats
    }

    /// Replays every remaining entry, handing a snapshot to `sink` after each.
    ///
    /// # Returns
    ///
    /// The final statistics.
    pub fn run_with<S: SnapshotSink + ?Sized>(&mut self, sink: &mut S) -> SimStats {
        while self.step().is_some() {
            sink.observe(&self.snapshot());
        }
        self.stats
    }

    /// Captures the current observable state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self.cursor, &self.config, &self.stats, &self.cache)
    }

    fn finish(&mut self) {
        if self.state != RunState::Done {
            self.state = RunState::Done;
            info!(
                accesses = self.stats.accesses(),
                hits = self.stats.hits,
                misses = self.stats.misses,
                cycles = self.stats.cycles,
                "simulation complete"
            );
        }
    }

    /// Current lifecycle state.
    pub const fn state(&self) -> RunState {
        self.state
    }

    /// Statistics so far.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// The simulated cache.
    pub const fn cache(&self) -> &Cache {
        &self.cache
    }

    /// The run configuration.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The trace being replayed.
    pub fn trace(&self) -> &[TraceEntry] {
        &self.trace
    }

    /// Number of entries replayed so far.
    pub const fn position(&self) -> usize {
        self.cursor
    }
}
