//! # Error Tests
//!
//! Display text and source chaining for the simulator error taxonomy.

use std::error::Error as _;
use std::io;
use std::path::PathBuf;

use cachesim_core::SimError;
use cachesim_core::config::Config;

#[test]
fn parse_error_reports_line() {
    let err = SimError::parse(3, "expected cycle as an unsigned integer, found 'x'");
    assert_eq!(
        err.to_string(),
        "malformed trace at line 3: expected cycle as an unsigned integer, found 'x'"
    );
}

#[test]
fn io_error_names_path_and_keeps_source() {
    let err = SimError::Io {
        path: PathBuf::from("missing.trace"),
        source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
    };
    let text = err.to_string();
    assert!(text.contains("missing.trace"));
    assert!(text.contains("no such file"));
    assert!(err.source().is_some());
}

#[test]
fn usage_error_display() {
    let err = SimError::Usage("missing trace file".into());
    assert_eq!(err.to_string(), "usage: missing trace file");
}

#[test]
fn geometry_error_display() {
    let err = SimError::InvalidGeometry("line size 3 is not a power of two".into());
    assert!(err.to_string().starts_with("invalid cache geometry"));
}

#[test]
fn allocation_error_keeps_source() {
    let source = Vec::<u64>::new().try_reserve_exact(usize::MAX).unwrap_err();
    let err = SimError::Allocation {
        what: "trace entries",
        count: usize::MAX,
        source,
    };
    assert!(err.to_string().contains("trace entries"));
    assert!(err.source().is_some());
}

#[test]
fn json_errors_convert_to_config_error() {
    let err = Config::from_json("{ not json").unwrap_err();
    assert!(matches!(err, SimError::Config(_)));
}
