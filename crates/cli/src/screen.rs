//! Terminal renderer for simulator snapshots.
//!
//! A [`Screen`] owns the text of one frame. Snapshots are drawn into it and
//! [`Screen::flip`] clears the terminal, writes the frame and starts a new one.
//!
//! Frame layout:
//!
//! ```text
//! <size> <ways> <line> <replacement> <write> <allocation> <tc> <trm> <twm>
//! <cycles>
//! <hits> <misses>
//! <sets>
//! <one row per set, each line right-aligned in 16 columns: address or NULL>
//! ```

use std::fmt::Write as _;
use std::io::{self, Write};

use cachesim_core::sim::Snapshot;

/// Sentinel drawn for invalid lines.
const EMPTY_LINE: &str = "NULL";

/// Column width of one line entry.
const LINE_WIDTH: usize = 16;

/// ANSI sequence: erase the display and home the cursor.
const CLEAR: &str = "\x1b[2J\x1b[H";

/// Frame buffer for terminal output.
#[derive(Debug, Default)]
pub struct Screen {
    buffer: String,
    clear: bool,
}

impl Screen {
    /// Creates a screen; `clear` controls whether each flip erases the terminal first.
    pub fn new(clear: bool) -> Self {
        Self {
            buffer: String::with_capacity(256),
            clear,
        }
    }

    /// Appends the frame for `snapshot`.
    pub fn draw_snapshot(&mut self, snapshot: &Snapshot) {
        let config = &snapshot.config;
        let stats = &snapshot.stats;
        let out = &mut self.buffer;

        // Writing into a String cannot fail.
        let _ = writeln!(
            out,
            "{} {} {} {} {} {} {} {} {}",
            config.cache.size_bytes,
            config.cache.ways,
            config.cache.line_bytes,
            config.policy.replacement,
            config.policy.write,
            config.policy.allocation,
            config.timing.cache_latency,
            config.timing.mem_read_latency,
            config.timing.mem_write_latency,
        );
        let _ = writeln!(out, "{}", stats.cycles);
        let _ = writeln!(out, "{} {}", stats.hits, stats.misses);
        let _ = writeln!(out, "{}", snapshot.sets());

        for set in &snapshot.lines {
            for line in set {
                let _ = match line {
                    Some(addr) => write!(out, "{addr:>LINE_WIDTH$}"),
                    None => write!(out, "{EMPTY_LINE:>LINE_WIDTH$}"),
                };
            }
            out.push('\n');
        }
    }

    /// Text of the frame drawn so far.
    pub fn contents(&self) -> &str {
        &self.buffer
    }

    /// Writes the frame to `out`, flushes it, and resets the buffer.
    ///
    /// # Errors
    ///
    /// Propagates write and flush failures.
    pub fn flip<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if self.clear {
            out.write_all(CLEAR.as_bytes())?;
        }
        out.write_all(self.contents().as_bytes())?;
        out.flush()?;
        self.buffer.clear();
        Ok(())
    }
}
