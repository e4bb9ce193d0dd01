//! Cache simulator CLI.
//!
//! Replays one trace file against the simulated cache. It performs:
//! 1. **Load:** Parses the trace header and entries.
//! 2. **Replay:** Steps the simulator, redrawing the cache table after every access.
//! 3. **Report:** Prints the final statistics.

mod screen;

use std::ffi::OsString;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use tracing_subscriber::EnvFilter;

use cachesim_core::SimError;
use cachesim_core::sim::{Simulator, Snapshot, loader};
use cachesim_core::stats::SimStats;

use crate::screen::Screen;

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    version,
    about = "Set-associative cache simulator",
    long_about = "Replay a memory-access trace against an 8-way FIFO, write-through, \
                  write-no-allocate cache and report hits, misses and access cycles.\n\n\
                  Trace layout:\n  \
                  cache_size block_size tc trm twm\n  \
                  N\n  \
                  cycle R|W address   (N times)\n\n\
                  Set RUST_LOG=debug (or trace) for diagnostic output on stderr."
)]
struct Cli {
    /// Trace file to replay.
    trace: PathBuf,
}

fn main() -> ExitCode {
    init_logging();

    let cli = match parse_args(std::env::args_os()) {
        Ok(Some(cli)) => cli,
        Ok(None) => return ExitCode::SUCCESS,
        Err(e) => return fatal(&e),
    };

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fatal(&e),
    }
}

/// Parses the command line.
///
/// # Returns
///
/// `None` when help or version output was requested and printed.
fn parse_args<I, T>(args: I) -> Result<Option<Cli>, SimError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            Ok(None)
        }
        Err(e) => Err(SimError::Usage(usage_message(&e))),
    }
}

/// Clap's rendered error without its `error: ` prefix or usage footer.
fn usage_message(error: &clap::Error) -> String {
    let rendered = error.render().to_string();
    let detail = rendered
        .lines()
        .map(str::trim)
        .take_while(|line| !line.starts_with("Usage:"))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if let Some(rest) = detail.strip_prefix("error: ") {
        return rest.to_owned();
    }
    detail
}

/// Loads the trace, replays it with a live display, and prints the report.
fn run(cli: &Cli) -> Result<(), SimError> {
    let trace = loader::load_trace(&cli.trace)?;
    let mut sim = Simulator::from_trace(trace)?;

    let stdout = io::stdout();
    let mut screen = Screen::new(stdout.is_terminal());
    if let Err(e) = replay(&mut sim, &mut screen, &mut stdout.lock()) {
        tracing::warn!(error = %e, "terminal output failed; display stopped");
    }
    Ok(())
}

/// Replays the whole trace, drawing a frame to `out` after every access and
/// the statistics report at the end.
///
/// The simulation always runs to completion. After the first failed write
/// nothing more is written.
///
/// # Errors
///
/// Returns the first write failure.
fn replay<W: Write>(
    sim: &mut Simulator,
    screen: &mut Screen,
    out: &mut W,
) -> io::Result<SimStats> {
    let mut display_error = None;

    let stats = sim.run_with(&mut |snapshot: &Snapshot| {
        if display_error.is_some() {
            return;
        }
        screen.draw_snapshot(snapshot);
        if let Err(e) = screen.flip(&mut *out) {
            display_error = Some(e);
        }
    });

    if let Some(e) = display_error {
        return Err(e);
    }
    writeln!(out)?;
    write!(out, "{stats}")?;
    out.flush()?;
    Ok(stats)
}

fn fatal(error: &SimError) -> ExitCode {
    let _ = write_fatal(&mut io::stderr().lock(), error);
    ExitCode::FAILURE
}

fn write_fatal<W: Write>(out: &mut W, error: &SimError) -> io::Result<()> {
    writeln!(out, "[!] FATAL: {error}")?;
    if let SimError::Usage(_) = error {
        writeln!(out, "  cachesim <trace-file>")?;
        writeln!(out, "  cachesim --help  for details")?;
    }
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
