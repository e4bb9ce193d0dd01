//! Memory-access traces.

use serde::Serialize;

use crate::common::AccessKind;
use crate::config::Config;

/// One simulated memory reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TraceEntry {
    /// Cycle stamp from the trace. Informational only; it does not drive timing.
    pub cycle: u64,
    /// Read or write.
    pub kind: AccessKind,
    /// Raw byte address.
    pub addr: u64,
}

impl TraceEntry {
    /// Creates a trace entry.
    pub const fn new(cycle: u64, kind: AccessKind, addr: u64) -> Self {
        Self { cycle, kind, addr }
    }

    /// Creates a read of `addr` at `cycle`.
    pub const fn read(cycle: u64, addr: u64) -> Self {
        Self::new(cycle, AccessKind::Read, addr)
    }

    /// Creates a write of `addr` at `cycle`.
    pub const fn write(cycle: u64, addr: u64) -> Self {
        Self::new(cycle, AccessKind::Write, addr)
    }
}

/// A fully loaded trace: the configuration from its header and every entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trace {
    /// Configuration built from the header line.
    pub config: Config,
    /// Entries in replay order.
    pub entries: Vec<TraceEntry>,
}
