//! Property-based tests for RepeatIndex overlap queries

use alu_regions::core::{RepeatIndex, RepeatIndexBuilder, RepeatInterval, Strand};
use proptest::prelude::*;

/// Generate a strand (or none)
fn arb_strand() -> impl Strategy<Value = Option<Strand>> {
    prop_oneof![
        Just(Some(Strand::Plus)),
        Just(Some(Strand::Minus)),
        Just(None),
    ]
}

/// Generate closed intervals, possibly overlapping each other
fn arb_intervals(max_pos: u64) -> impl Strategy<Value = Vec<(u64, u64, Option<Strand>)>> {
    prop::collection::vec(
        (1u64..max_pos, 0u64..300, arb_strand()).prop_map(|(start, len, strand)| (start, start + len, strand)),
        0..40,
    )
}

fn build(chrom: &str, intervals: &[(u64, u64, Option<Strand>)]) -> RepeatIndex {
    let mut builder = RepeatIndexBuilder::new();
    for &(s, e, strand) in intervals {
        builder.insert(chrom, s, e, strand);
    }
    builder.build()
}

fn sorted(mut v: Vec<RepeatInterval>) -> Vec<(u64, u64, Option<Strand>)> {
    let mut out: Vec<(u64, u64, Option<Strand>)> = v.drain(..).map(|r| (r.start, r.end, r.strand)).collect();
    out.sort_by_key(|&(s, e, strand)| (s, e, strand.map(|x| x.to_char())));
    out
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// An overlap query returns exactly the intervals intersecting [start, end]
    #[test]
    fn prop_overlap_matches_brute_force(
        intervals in arb_intervals(5000),
        query_start in 1u64..5500,
        query_len in 0u64..800,
    ) {
        let query_end = query_start + query_len;
        let index = build("chr1", &intervals);

        let results = sorted(index.overlap("chr1", query_start, query_end));

        let mut expected: Vec<(u64, u64, Option<Strand>)> = intervals
            .iter()
            .copied()
            .filter(|&(s, e, _)| s <= query_end && e >= query_start)
            .collect();
        expected.sort_by_key(|&(s, e, strand)| (s, e, strand.map(|x| x.to_char())));

        prop_assert_eq!(results, expected);
    }

    /// Intervals of another chromosome are never returned
    #[test]
    fn prop_other_chromosome_never_returned(
        chr1 in arb_intervals(5000),
        chr2 in arb_intervals(5000),
        query_start in 1u64..5500,
        query_len in 0u64..800,
    ) {
        let mut builder = RepeatIndexBuilder::new();
        for &(s, e, strand) in &chr1 {
            builder.insert("chr1", s, e, strand);
        }
        for &(s, e, strand) in &chr2 {
            builder.insert("chr2", s + 100_000, e + 100_000, strand);
        }
        let index = builder.build();

        let results = index.overlap("chr1", query_start, query_start + query_len);
        for r in results {
            prop_assert!(r.end < 100_000, "chr2 interval {}-{} leaked into chr1 query", r.start, r.end);
        }
    }

    /// Unindexed chromosomes answer with an empty result
    #[test]
    fn prop_unindexed_chromosome_is_empty(
        intervals in arb_intervals(5000),
        query_start in 1u64..5500,
        query_len in 0u64..800,
    ) {
        let index = build("chr1", &intervals);
        prop_assert!(index.overlap("chrNONE", query_start, query_start + query_len).is_empty());
    }

    /// Every inserted interval is counted once
    #[test]
    fn prop_total_intervals(intervals in arb_intervals(5000)) {
        let index = build("chr7", &intervals);
        prop_assert_eq!(index.total_intervals(), intervals.len());
        prop_assert_eq!(index.interval_count("chr7"), intervals.len());
    }
}

#[test]
fn test_point_queries_on_boundaries() {
    let index = build("chr1", &[(100, 150, Some(Strand::Plus))]);
    assert_eq!(index.overlap("chr1", 99, 99).len(), 0);
    assert_eq!(index.overlap("chr1", 100, 100).len(), 1);
    assert_eq!(index.overlap("chr1", 150, 150).len(), 1);
    assert_eq!(index.overlap("chr1", 151, 151).len(), 0);
}
