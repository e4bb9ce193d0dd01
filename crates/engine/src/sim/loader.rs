//! Trace File Loader.
//!
//! Reads a trace file into a [`Trace`]. The file is a whitespace-separated
//! stream of unsigned integers and access characters:
//! 1. **Header:** `cache_size block_size tc trm twm`.
//! 2. **Count:** The number of entries `N`.
//! 3. **Entries:** `N` records of `cycle access address`, where `access` is a
//!    single character (`R` reads, anything else writes).
//!
//! The whole trace is loaded before simulation starts. Any deviation from the
//! layout is fatal; content after the last declared entry is ignored.

use std::fs;
use std::iter::Peekable;
use std::path::Path;

use tracing::{debug, warn};

use super::trace::{Trace, TraceEntry};
use crate::common::{AccessKind, SimError};
use crate::config::Config;

/// Header fields plus the entry count.
const HEADER_FIELDS: usize = 6;

/// Fields per trace entry.
const ENTRY_FIELDS: usize = 3;

/// Reads and parses the trace file at `path`.
///
/// # Errors
///
/// Returns [`SimError::Io`] if the file cannot be read, and any error of
/// [`parse_trace`] otherwise.
pub fn load_trace(path: impl AsRef<Path>) -> Result<Trace, SimError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| SimError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let trace = parse_trace(&text)?;
    debug!(
        path = %path.display(),
        entries = trace.entries.len(),
        "trace loaded"
    );
    Ok(trace)
}

/// Parses trace text.
///
/// # Errors
///
/// * [`SimError::Parse`] when a field is missing, not an unsigned integer, or
///   an access field is not a single character.
/// * [`SimError::Allocation`] when storage for the entries cannot be reserved.
pub fn parse_trace(text: &str) -> Result<Trace, SimError> {
    let mut scanner = Scanner::new(text);

    let size_bytes = scanner.next_u64("cache size")?;
    let line_bytes = scanner.next_u64("block size")?;
    let tc = scanner.next_u64("cache access time (tc)")?;
    let trm = scanner.next_u64("memory read time (trm)")?;
    let twm = scanner.next_u64("memory write time (twm)")?;
    let config = Config::from_header(size_bytes, line_bytes, tc, trm, twm);

    let declared = scanner.next_u64("entry count")?;
    let count = usize::try_from(declared).map_err(|_| {
        SimError::parse(
            scanner.line(),
            format!("entry count {declared} is too large"),
        )
    })?;

    // Never reserve past what the text can hold; a bad count fails below.
    let available = text.split_whitespace().count().saturating_sub(HEADER_FIELDS) / ENTRY_FIELDS;
    let capacity = count.min(available);
    let mut entries = Vec::new();
    entries
        .try_reserve_exact(capacity)
        .map_err(|source| SimError::Allocation {
            what: "trace entries",
            count: capacity,
            source,
        })?;

    for _ in 0..count {
        let cycle = scanner.next_u64("cycle")?;
        let kind = scanner.next_kind()?;
        let addr = scanner.next_u64("address")?;
        entries.push(TraceEntry { cycle, kind, addr });
    }

    if let Some((line, _)) = scanner.peek() {
        warn!(line, count, "ignoring content after the last declared trace entry");
    }

    Ok(Trace { config, entries })
}

/// Whitespace tokenizer that remembers which line each token came from.
struct Scanner<'a> {
    tokens: Peekable<Box<dyn Iterator<Item = (usize, &'a str)> + 'a>>,
    line: usize,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        let tokens: Box<dyn Iterator<Item = (usize, &'a str)> + 'a> = Box::new(
            text.lines()
                .enumerate()
                .flat_map(|(i, line)| line.split_whitespace().map(move |tok| (i + 1, tok))),
        );
        Self {
            tokens: tokens.peekable(),
            line: 1,
        }
    }

    /// Line of the most recently consumed token.
    const fn line(&self) -> usize {
        self.line
    }

    fn peek(&mut self) -> Option<(usize, &'a str)> {
        self.tokens.peek().copied()
    }

    fn next_token(&mut self, what: &str) -> Result<&'a str, SimError> {
        match self.tokens.next() {
            Some((line, tok)) => {
                self.line = line;
                Ok(tok)
            }
            None => Err(SimError::parse(
                self.line,
                format!("unexpected end of file, expected {what}"),
            )),
        }
    }

    fn next_u64(&mut self, what: &str) -> Result<u64, SimError> {
        let tok = self.next_token(what)?;
        tok.parse().map_err(|_| {
            SimError::parse(
                self.line,
                format!("expected {what} as an unsigned integer, found '{tok}'"),
            )
        })
    }

    fn next_kind(&mut self) -> Result<AccessKind, SimError> {
        let tok = self.next_token("access kind")?;
        let mut chars = tok.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(AccessKind::from_trace_char(c)),
            _ => Err(SimError::parse(
                self.line,
                format!("expected a single access character, found '{tok}'"),
            )),
        }
    }
}
