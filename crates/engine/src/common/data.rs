//! Memory Access Kinds.
//!
//! Classifies trace entries so the simulation loop can pick the right timing
//! branch and decide whether a miss allocates a line.

use std::fmt;

use serde::Serialize;

/// Kind of memory reference issued by the CPU.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum AccessKind {
    /// Data read. Allocates a line on a miss.
    Read,

    /// Data write. Propagated to memory on every access and never allocates.
    Write,
}

impl AccessKind {
    /// Classifies a trace access character.
    ///
    /// `R` is a read; every other character is treated as a write.
    ///
    /// # Arguments
    ///
    /// * `c` - The access character from the trace.
    #[inline]
    pub const fn from_trace_char(c: char) -> Self {
        if c == 'R' { Self::Read } else { Self::Write }
    }

    /// Returns `true` for reads.
    #[inline]
    pub const fn is_read(self) -> bool {
        matches!(self, Self::Read)
    }
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => write!(f, "R"),
            Self::Write => write!(f, "W"),
        }
    }
}
