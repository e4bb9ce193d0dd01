//! Trace replay.
//!
//! Provides the trace representation and its loader, the simulation loop that
//! replays a trace against a cache, and the snapshots it hands to observers.

pub mod loader;
pub mod simulator;
pub mod snapshot;
pub mod trace;

pub use loader::{load_trace, parse_trace};
pub use simulator::{AccessRecord, RunState, Simulator};
pub use snapshot::{Snapshot, SnapshotSink};
pub use trace::{Trace, TraceEntry};
