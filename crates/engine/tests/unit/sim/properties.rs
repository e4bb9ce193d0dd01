//! # Run Invariants
//!
//! Properties that must hold for any trace over any valid geometry.

use std::collections::HashSet;

use cachesim_core::Simulator;
use cachesim_core::config::Config;
use cachesim_core::sim::TraceEntry;
use cachesim_core::timing::LookupOutcome;
use proptest::prelude::*;

/// Small geometries so random addresses collide often.
fn config() -> impl Strategy<Value = Config> {
    (0u32..4, 0u32..3, 1u64..5).prop_map(|(line_shift, set_shift, ways)| {
        let line = 1u64 << line_shift;
        let sets = 1u64 << set_shift;
        let mut config = Config::from_header(line * sets * ways, line, 1, 10, 20);
        config.cache.ways = ways;
        config
    })
}

fn trace() -> impl Strategy<Value = Vec<TraceEntry>> {
    prop::collection::vec(
        (any::<bool>(), 0u64..256).prop_map(|(read, addr)| {
            if read {
                TraceEntry::read(0, addr)
            } else {
                TraceEntry::write(0, addr)
            }
        }),
        0..200,
    )
}

proptest! {
    #[test]
    fn hits_plus_misses_equals_steps(config in config(), trace in trace()) {
        let n = trace.len() as u64;
        let mut sim = Simulator::new(config, trace).unwrap();
        let mut steps = 0u64;
        while sim.step().is_some() {
            steps += 1;
            prop_assert_eq!(sim.stats().accesses(), steps);
        }
        prop_assert_eq!(sim.stats().hits + sim.stats().misses, n);
    }

    #[test]
    fn no_duplicate_valid_tags_in_a_set(config in config(), trace in trace()) {
        let mut sim = Simulator::new(config, trace).unwrap();
        while sim.step().is_some() {
            for set in sim.cache().sets() {
                let mut tags = HashSet::new();
                for line in set.lines().iter().filter(|l| l.valid) {
                    prop_assert!(tags.insert(line.tag), "duplicate tag {} in set {}", line.tag, set.index());
                }
            }
        }
    }

    #[test]
    fn cycles_match_timing_table(config in config(), trace in trace()) {
        let mut sim = Simulator::new(config, trace).unwrap();
        let mut expected = 0u64;
        while let Some(rec) = sim.step() {
            expected += match (rec.entry.kind.is_read(), rec.outcome) {
                (true, LookupOutcome::Hit) => 1,
                (true, LookupOutcome::Miss) => 11,
                (false, _) => 20,
            };
        }
        prop_assert_eq!(sim.stats().cycles, expected);
    }

    #[test]
    fn writes_never_change_the_line_table(config in config(), trace in trace()) {
        let mut sim = Simulator::new(config, trace).unwrap();
        loop {
            let before = sim.snapshot().lines;
            let Some(rec) = sim.step() else { break };
            if !rec.entry.kind.is_read() {
                prop_assert_eq!(sim.snapshot().lines, before);
            }
        }
    }

    #[test]
    fn hits_never_change_eviction_order(config in config(), trace in trace()) {
        // Replaying with every read hit removed yields the same line table.
        let mut full = Simulator::new(config.clone(), trace.clone()).unwrap();
        let records: Vec<_> = std::iter::from_fn(|| full.step()).collect();
        let misses: Vec<TraceEntry> = records
            .iter()
            .filter(|r| r.outcome == LookupOutcome::Miss && r.entry.kind.is_read())
            .map(|r| r.entry)
            .collect();

        let mut reads_only = Simulator::new(config, misses).unwrap();
        let _ = reads_only.run();
        prop_assert_eq!(full.snapshot().lines, reads_only.snapshot().lines);
    }
}
