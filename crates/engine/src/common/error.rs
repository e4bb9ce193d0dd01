//! Simulator error taxonomy.
//!
//! Every failure in the simulator is fatal: construction and loading either
//! succeed completely or return one of these errors, and no partial results
//! are produced. The variants cover:
//! 1. **Resources:** Storage that could not be reserved.
//! 2. **Input:** Bad command-line usage, unreadable or malformed trace files.
//! 3. **Geometry:** Cache shapes the address codec cannot represent.

use std::collections::TryReserveError;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building or feeding the simulator.
#[derive(Debug, Error)]
pub enum SimError {
    /// Storage for `what` could not be reserved.
    #[error("could not allocate {count} {what}")]
    Allocation {
        /// Which table was being reserved (sets, lines, trace entries).
        what: &'static str,
        /// Number of elements requested.
        count: usize,
        /// Underlying reservation failure.
        #[source]
        source: TryReserveError,
    },

    /// The program was invoked with the wrong arguments.
    #[error("usage: {0}")]
    Usage(String),

    /// The trace file could not be opened or read.
    #[error("could not read trace file '{}': {source}", path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The trace file does not match the expected layout.
    #[error("malformed trace at line {line}: {message}")]
    Parse {
        /// 1-based line number where parsing stopped.
        line: usize,
        /// What was expected.
        message: String,
    },

    /// The cache shape is not representable.
    #[error("invalid cache geometry: {0}")]
    InvalidGeometry(String),

    /// A JSON configuration document could not be deserialized.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl SimError {
    /// Builds a [`SimError::Parse`] at `line`.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}
