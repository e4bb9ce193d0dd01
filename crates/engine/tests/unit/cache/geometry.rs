//! # Geometry and Address Codec Tests
//!
//! Validation of cache shapes, mask derivation, and address decomposition.

use cachesim_core::SimError;
use cachesim_core::cache::Geometry;
use cachesim_core::common::DecodedAddress;
use cachesim_core::config::CacheConfig;
use proptest::prelude::*;
use rstest::rstest;

fn geometry(size_bytes: u64, line_bytes: u64, ways: u64) -> Result<Geometry, SimError> {
    Geometry::new(&CacheConfig {
        size_bytes,
        line_bytes,
        ways,
    })
}

// ══════════════════════════════════════════════════════════
// 1. Shape derivation
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(64, 8, 8, 1)]
#[case(128, 8, 8, 2)]
#[case(4096, 64, 8, 8)]
#[case(1024, 16, 1, 64)]
#[case(32768, 64, 4, 128)]
fn set_count_is_derived(
    #[case] size: u64,
    #[case] line: u64,
    #[case] ways: u64,
    #[case] sets: usize,
) {
    let g = geometry(size, line, ways).unwrap();
    assert_eq!(g.sets(), sets);
    assert_eq!(g.ways(), ways as usize);
    assert_eq!(g.lines(), sets * ways as usize);
    assert_eq!(g.sets() as u64 * ways * line, size);
}

#[rstest]
#[case(64, 8, 8, 0b111, 3, 0, 0)]
#[case(4096, 64, 8, 0x3F, 6, 0x7, 3)]
#[case(1024, 16, 1, 0xF, 4, 0x3F, 6)]
fn masks_are_size_minus_one(
    #[case] size: u64,
    #[case] line: u64,
    #[case] ways: u64,
    #[case] offset_mask: u64,
    #[case] offset_bits: u32,
    #[case] index_mask: u64,
    #[case] index_bits: u32,
) {
    let g = geometry(size, line, ways).unwrap();
    assert_eq!(g.offset_mask(), line - 1);
    assert_eq!(g.offset_mask(), offset_mask);
    assert_eq!(g.offset_bits(), offset_bits);
    assert_eq!(g.index_mask(), g.sets() as u64 - 1);
    assert_eq!(g.index_mask(), index_mask);
    assert_eq!(g.index_bits(), index_bits);
}

// ══════════════════════════════════════════════════════════
// 2. Rejected shapes
// ══════════════════════════════════════════════════════════

#[rstest]
#[case::zero_size(0, 8, 8)]
#[case::zero_line(64, 0, 8)]
#[case::zero_ways(64, 8, 0)]
#[case::line_not_pow2(96, 12, 8)]
#[case::sets_not_pow2(192, 8, 8)]
#[case::smaller_than_one_set(32, 8, 8)]
#[case::not_a_multiple(100, 4, 8)]
fn invalid_shapes_are_rejected(#[case] size: u64, #[case] line: u64, #[case] ways: u64) {
    let err = geometry(size, line, ways).unwrap_err();
    assert!(matches!(err, SimError::InvalidGeometry(_)), "got {err}");
}

#[test]
fn non_power_of_two_ways_are_accepted() {
    // 3 ways x 8 bytes x 4 sets: only the line size and set count must be powers of two.
    let g = geometry(96, 8, 3).unwrap();
    assert_eq!(g.sets(), 4);
}

// ══════════════════════════════════════════════════════════
// 3. Decomposition
// ══════════════════════════════════════════════════════════

#[test]
fn decode_splits_fields() {
    // 64-byte lines, 8 sets: offset = bits 0..6, index = bits 6..9, tag = rest.
    let g = geometry(4096, 64, 8).unwrap();
    let addr = (0x5A << 9) | (0b101 << 6) | 0x2B;
    assert_eq!(
        g.decode(addr),
        DecodedAddress {
            offset: 0x2B,
            index: 0b101,
            tag: 0x5A,
        }
    );
}

#[test]
fn fully_associative_has_no_index_bits() {
    let g = geometry(64, 8, 8).unwrap();
    let d = g.decode(0x1234);
    assert_eq!(d.index, 0);
    assert_eq!(d.offset, 0x1234 & 7);
    assert_eq!(d.tag, 0x1234 >> 3);
}

#[test]
fn same_line_shares_tag_and_index() {
    let g = geometry(4096, 64, 8).unwrap();
    let a = g.decode(0x1000);
    let b = g.decode(0x1000 + 63);
    assert_eq!((a.tag, a.index), (b.tag, b.index));
    assert_ne!(a.offset, b.offset);
}

proptest! {
    #[test]
    fn decode_compose_round_trip(
        line_shift in 0u32..8,
        set_shift in 0u32..8,
        ways in 1u64..9,
        addr in any::<u64>(),
    ) {
        let line = 1u64 << line_shift;
        let sets = 1u64 << set_shift;
        let g = geometry(line * sets * ways, line, ways).unwrap();
        let d = g.decode(addr);
        prop_assert!(d.offset <= g.offset_mask());
        prop_assert!(d.index <= g.index_mask());
        prop_assert_eq!(g.compose(&d), addr);
    }
}
