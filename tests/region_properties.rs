//! Property-based tests for region normalization and intron derivation

use alu_regions::core::{
    derive_introns, derive_regions, normalize, GeneRegion, RegionLists, RegionOrder, RegionType, Strand,
    TranscriptModel,
};
use proptest::prelude::*;

/// Generate an ascending list of disjoint regions
fn arb_region_list() -> impl Strategy<Value = Vec<(u64, u64)>> {
    prop::collection::vec((1u64..500, 1u64..500), 0..12).prop_map(|pairs| {
        let mut pos = 1u64;
        pairs
            .into_iter()
            .map(|(gap, len)| {
                let start = pos + gap;
                let end = start + len;
                pos = end;
                (start, end)
            })
            .collect()
    })
}

fn model(strand: Strand, regions: RegionLists) -> TranscriptModel {
    TranscriptModel {
        transcript_id: "ENST0001".to_string(),
        gene_name: "GENE".to_string(),
        gene_id: "ENSG0001".to_string(),
        gene_type: "protein_coding".to_string(),
        chrom: "chr1".to_string(),
        strand: Some(strand),
        span_start: 1,
        span_end: 1_000_000,
        ccds_id: None,
        tags: vec![],
        regions,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// N regions give N-1 introns spanning exactly the gaps
    #[test]
    fn prop_intron_count_and_bounds(list in arb_region_list()) {
        let introns = derive_introns(&list);
        prop_assert_eq!(introns.len(), list.len().saturating_sub(1));
        for (i, &(start, end)) in introns.iter().enumerate() {
            prop_assert_eq!(start, list[i].1 + 1);
            prop_assert_eq!(end, list[i + 1].0 - 1);
        }
    }

    /// Reversing a '-' strand list twice restores it
    #[test]
    fn prop_reversal_round_trip(list in arb_region_list()) {
        let once = normalize(&list, Some(Strand::Minus), RegionOrder::AsListed);
        let twice = normalize(&once, Some(Strand::Minus), RegionOrder::AsListed);
        prop_assert_eq!(twice, list);
    }

    /// A '-' strand list given 5'→3' (descending) and the same list given
    /// ascending on '+' derive identical intervals
    #[test]
    fn prop_strands_agree_on_genomic_order(list in arb_region_list()) {
        let mut descending = list.clone();
        descending.reverse();
        let minus = derive_regions(
            &model(Strand::Minus, RegionLists { exon: descending, ..Default::default() }),
            RegionOrder::AsListed,
        );
        let plus = derive_regions(
            &model(Strand::Plus, RegionLists { exon: list, ..Default::default() }),
            RegionOrder::AsListed,
        );
        prop_assert_eq!(minus, plus);
    }

    /// Sorting makes the derivation independent of file order
    #[test]
    fn prop_sorted_order_is_shuffle_invariant(list in arb_region_list(), seed in any::<u64>()) {
        let mut shuffled = list.clone();
        if !shuffled.is_empty() {
            let len = shuffled.len();
            shuffled.rotate_left((seed as usize) % len);
        }
        let a = derive_regions(
            &model(Strand::Plus, RegionLists { cds: list, ..Default::default() }),
            RegionOrder::Sorted,
        );
        let b = derive_regions(
            &model(Strand::Plus, RegionLists { cds: shuffled, ..Default::default() }),
            RegionOrder::Sorted,
        );
        prop_assert_eq!(a, b);
    }

    /// Intron records never span two different region lists
    #[test]
    fn prop_introns_stay_within_lists(
        cds in arb_region_list(),
        utr5 in arb_region_list(),
        utr3 in arb_region_list(),
    ) {
        let expected_introns = cds.len().saturating_sub(1)
            + utr5.len().saturating_sub(1)
            + utr3.len().saturating_sub(1);
        let m = model(Strand::Plus, RegionLists {
            cds,
            five_prime_utr: utr5,
            three_prime_utr: utr3,
            ..Default::default()
        });
        let derived = derive_regions(&m, RegionOrder::AsListed);
        let introns = derived.iter().filter(|d| d.kind == GeneRegion::Intron).count();
        prop_assert_eq!(introns, expected_introns);
    }
}

#[test]
fn test_minus_strand_scenario() {
    let m = model(
        Strand::Minus,
        RegionLists {
            exon: vec![(300, 400), (100, 200)],
            ..Default::default()
        },
    );
    let derived = derive_regions(&m, RegionOrder::AsListed);
    assert_eq!(derived.len(), 3);
    assert_eq!((derived[0].start, derived[0].end), (100, 200));
    assert_eq!(derived[1].kind, GeneRegion::Intron);
    assert_eq!((derived[1].start, derived[1].end), (201, 299));
    assert_eq!((derived[2].start, derived[2].end), (300, 400));
}

#[test]
fn test_out_of_order_plus_strand() {
    let regions = RegionLists {
        exon: vec![(300, 400), (100, 200)],
        ..Default::default()
    };
    let m = model(Strand::Plus, regions);

    // Trusted order yields an inverted intron, which is still emitted
    let as_listed = derive_regions(&m, RegionOrder::AsListed);
    assert_eq!((as_listed[1].start, as_listed[1].end), (401, 99));
    assert!(as_listed[1].is_empty());

    // Sorting repairs it
    let sorted = derive_regions(&m, RegionOrder::Sorted);
    assert_eq!((sorted[1].start, sorted[1].end), (201, 299));
}

#[test]
fn test_coding_transcript_uses_cds() {
    let m = model(
        Strand::Plus,
        RegionLists {
            exon: vec![(100, 400), (600, 900)],
            cds: vec![(150, 400), (600, 800)],
            five_prime_utr: vec![(100, 149)],
            three_prime_utr: vec![(801, 900)],
        },
    );
    let labels: Vec<GeneRegion> = derive_regions(&m, RegionOrder::AsListed)
        .iter()
        .map(|d| d.kind)
        .collect();
    assert_eq!(
        labels,
        vec![
            GeneRegion::Region(RegionType::Cds),
            GeneRegion::Intron,
            GeneRegion::Region(RegionType::Cds),
            GeneRegion::Region(RegionType::FivePrimeUtr),
            GeneRegion::Region(RegionType::ThreePrimeUtr),
        ]
    );
}
