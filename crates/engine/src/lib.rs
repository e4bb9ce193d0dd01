//! Set-associative cache simulator library.
//!
//! This crate replays a memory-access trace against a single cache level and
//! accounts hits, misses and access latency. It is organised as follows:
//! 1. **Cache:** Geometry and address decomposition, the set/line store, and replacement.
//! 2. **Timing:** Per-access cycle costs for the write-through, write-no-allocate model.
//! 3. **Simulation:** Trace loading, the replay loop, and per-step snapshots.
//! 4. **Reporting:** Configuration and statistics collection.

/// Set-associative store, geometry, address codec, and replacement policies.
pub mod cache;
/// Common types (access kinds, decoded addresses, errors).
pub mod common;
/// Simulator configuration (defaults, policy labels, JSON loading).
pub mod config;
/// Trace loading, the simulation loop, and snapshots.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;
/// Access latency model.
pub mod timing;

/// Root configuration type; use `Config::default()` or build it from a trace header.
pub use crate::config::Config;
/// Error taxonomy shared by every fallible operation in the crate.
pub use crate::common::SimError;
/// Top-level simulator; construct with `Simulator::new`.
pub use crate::sim::Simulator;
