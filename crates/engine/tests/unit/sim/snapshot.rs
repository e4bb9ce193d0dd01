//! # Snapshot Tests
//!
//! Snapshot contents and observer delivery.

use cachesim_core::sim::Snapshot;
use pretty_assertions::assert_eq;

use crate::common::builder::TraceBuilder;
use crate::common::harness::TestContext;
use crate::common::mocks::MockSink;

/// 128 bytes, 8-byte lines, 8 ways: 2 sets.
fn builder() -> TraceBuilder {
    TraceBuilder::new(128, 8, 1, 10, 20)
}

#[test]
fn initial_snapshot_is_empty() {
    let ctx = TestContext::from_builder(builder().read(0));
    let snap = ctx.sim.snapshot();
    assert_eq!(snap.step, 0);
    assert_eq!(snap.sets(), 2);
    assert_eq!(snap.lines, vec![vec![None; 8]; 2]);
    assert_eq!(snap.stats.accesses(), 0);
}

#[test]
fn snapshot_reflects_loads_and_counters() {
    let mut ctx = TestContext::from_builder(builder().read(0x8).read(0x10).write(0x18));
    let _ = ctx.run();
    let snap = ctx.sim.snapshot();

    let mut set0 = vec![None; 8];
    set0[0] = Some(0x10);
    let mut set1 = vec![None; 8];
    set1[0] = Some(0x8);
    assert_eq!(snap.lines, vec![set0, set1]);
    assert_eq!(snap.step, 3);
    assert_eq!(snap.stats.misses, 3);
    assert_eq!(snap.stats.cycles, 11 + 11 + 20);
    assert_eq!(&snap.config, ctx.sim.config());
}

#[test]
fn run_with_notifies_once_per_access() {
    let mut ctx = TestContext::from_builder(builder().read(0).read(0).write(8).read(16));
    let mut sink = MockSink::new();
    let _ = sink.expect_observe().times(4).return_const(());

    let stats = ctx.sim.run_with(&mut sink);
    assert_eq!(stats.accesses(), 4);
}

#[test]
fn run_with_empty_trace_never_notifies() {
    let mut ctx = TestContext::from_builder(builder());
    let mut sink = MockSink::new();
    let _ = sink.expect_observe().never();
    let _ = ctx.sim.run_with(&mut sink);
}

#[test]
fn closure_observer_sees_monotonic_steps() {
    let mut ctx = TestContext::from_builder(builder().read_n(0, 3).write(0));
    let mut seen: Vec<Snapshot> = Vec::new();
    let _ = ctx.sim.run_with(&mut |s: &Snapshot| seen.push(s.clone()));

    let steps: Vec<_> = seen.iter().map(|s| s.step).collect();
    assert_eq!(steps, vec![1, 2, 3, 4]);
    let cycles: Vec<_> = seen.iter().map(|s| s.stats.cycles).collect();
    assert_eq!(cycles, vec![11, 12, 13, 33]);
}

#[test]
fn snapshot_serializes_empty_lines_as_null() {
    let ctx = TestContext::from_builder(builder());
    let value = serde_json::to_value(ctx.sim.snapshot()).unwrap();
    assert!(value["lines"][0][0].is_null());
    assert_eq!(value["config"]["policy"]["replacement"], "FIFO");
}
