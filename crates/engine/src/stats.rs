//! Simulation statistics collection and reporting.
//!
//! This module tracks the results of a run. It provides:
//! 1. **Totals:** Cumulative cycles, hits and misses.
//! 2. **Breakdown:** Hits and misses split by access kind, plus evictions.
//! 3. **Reporting:** A sectioned text report for the terminal.

use std::fmt;

use serde::Serialize;

use crate::common::AccessKind;
use crate::timing::LookupOutcome;

/// Running results of a simulation.
///
/// `hits + misses` always equals the number of accesses recorded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Cumulative access latency in cycles.
    pub cycles: u64,
    /// Accesses that found their block resident.
    pub hits: u64,
    /// Accesses that did not.
    pub misses: u64,

    /// Read hits.
    pub read_hits: u64,
    /// Read misses (each one loads a line).
    pub read_misses: u64,
    /// Write hits.
    pub write_hits: u64,
    /// Write misses (never allocate).
    pub write_misses: u64,
    /// Read misses that overwrote a valid line.
    pub evictions: u64,
}

/// Section names for selective stats output.
///
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "breakdown"];

impl SimStats {
    /// Records one access.
    ///
    /// # Arguments
    ///
    /// * `kind` - Read or write.
    /// * `outcome` - Hit or miss.
    /// * `cost` - Cycles charged by the timing model.
    pub const fn record(&mut self, kind: AccessKind, outcome: LookupOutcome, cost: u64) {
        self.cycles = self.cycles.saturating_add(cost);
        match (kind, outcome) {
            (AccessKind::Read, LookupOutcome::Hit) => {
                self.hits += 1;
                self.read_hits += 1;
            }
            (AccessKind::Read, LookupOutcome::Miss) => {
                self.misses += 1;
                self.read_misses += 1;
            }
            (AccessKind::Write, LookupOutcome::Hit) => {
                self.hits += 1;
                self.write_hits += 1;
            }
            (AccessKind::Write, LookupOutcome::Miss) => {
                self.misses += 1;
                self.write_misses += 1;
            }
        }
    }

    /// Records that a read miss replaced a valid line.
    pub const fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Total accesses recorded.
    pub const fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of accesses that hit, in `[0, 1]`; 0 when nothing ran.
    pub fn hit_rate(&self) -> f64 {
        let total = self.accesses();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Writes the requested report sections.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`]; an
    /// empty slice selects all of them.
    ///
    /// # Errors
    ///
    /// Propagates failures of the underlying writer.
    pub fn write_sections<W: fmt::Write>(&self, out: &mut W, sections: &[&str]) -> fmt::Result {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| *x == s);
        let pct = |part: u64, whole: u64| {
            if whole == 0 {
                0.0
            } else {
                (part as f64 / whole as f64) * 100.0
            }
        };

        writeln!(out, "==========================================================")?;
        writeln!(out, "CACHE SIMULATION STATISTICS")?;
        writeln!(out, "==========================================================")?;
        if want("summary") {
            writeln!(out, "sim_accesses             {}", self.accesses())?;
            writeln!(out, "sim_cycles               {}", self.cycles)?;
            writeln!(out, "cache.hits               {}", self.hits)?;
            writeln!(out, "cache.misses             {}", self.misses)?;
            writeln!(out, "cache.hit_rate           {:.2}%", self.hit_rate() * 100.0)?;
            writeln!(out, "----------------------------------------------------------")?;
        }
        if want("breakdown") {
            let reads = self.read_hits + self.read_misses;
            let writes = self.write_hits + self.write_misses;
            writeln!(out, "ACCESS BREAKDOWN")?;
            writeln!(
                out,
                "  read   accesses: {:<10} | hits: {:<10} | miss_rate: {:.2}%",
                reads,
                self.read_hits,
                pct(self.read_misses, reads)
            )?;
            writeln!(
                out,
                "  write  accesses: {:<10} | hits: {:<10} | miss_rate: {:.2}%",
                writes,
                self.write_hits,
                pct(self.write_misses, writes)
            )?;
            writeln!(out, "  evictions              {}", self.evictions)?;
            writeln!(out, "----------------------------------------------------------")?;
        }
        Ok(())
    }

    /// Renders the requested sections into a string.
    pub fn report_sections(&self, sections: &[&str]) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_sections(&mut out, sections);
        out
    }

    /// Prints only the requested statistics sections to stdout.
    pub fn print_sections(&self, sections: &[&str]) {
        print!("{}", self.report_sections(sections));
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}

impl fmt::Display for SimStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_sections(f, &[])
    }
}
