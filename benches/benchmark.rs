//! Performance benchmarks for AluRegions
//!
//! Run with: cargo bench

use alu_regions::core::{
    classify, classify_transcript, RegionLists, RegionOrder, RepeatIndex, RepeatIndexBuilder, Strand,
    TranscriptModel,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// Synthetic chromosome with one ~300bp element every 3kb, alternating strands
fn synthetic_index(elements: u64) -> RepeatIndex {
    let mut builder = RepeatIndexBuilder::new();
    for i in 0..elements {
        let start = 1 + i * 3000;
        let strand = if i % 2 == 0 { Strand::Plus } else { Strand::Minus };
        builder.insert("chr1", start, start + 300, Some(strand));
    }
    builder.build()
}

/// Benchmark index construction
fn bench_index_build(c: &mut Criterion) {
    c.bench_function("index_build_100k", |b| {
        b.iter(|| black_box(synthetic_index(black_box(100_000))))
    });
}

/// Benchmark single region classification
fn bench_single_region(c: &mut Criterion) {
    let index = synthetic_index(100_000);

    c.bench_function("classify_single_region", |b| {
        b.iter(|| {
            let stats = classify(
                black_box(&index),
                black_box("chr1"),
                black_box(1_500_000),
                black_box(1_520_000),
            );
            black_box(stats)
        })
    });
}

/// Benchmark region classification by region size
fn bench_region_sizes(c: &mut Criterion) {
    let index = synthetic_index(100_000);
    let mut group = c.benchmark_group("classify_by_region_size");

    for size in [1_000u64, 10_000, 100_000].iter() {
        group.throughput(Throughput::Elements(*size));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| black_box(classify(&index, "chr1", 1_000_000, 1_000_000 + size)))
        });
    }

    group.finish();
}

/// Benchmark a whole 20-exon transcript
fn bench_transcript(c: &mut Criterion) {
    let index = synthetic_index(100_000);
    let exons: Vec<(u64, u64)> = (0..20u64)
        .map(|i| (2_000_000 + i * 5000, 2_000_000 + i * 5000 + 150))
        .collect();
    let model = TranscriptModel {
        transcript_id: "ENST_BENCH".to_string(),
        gene_name: "BENCH".to_string(),
        gene_id: "ENSG_BENCH".to_string(),
        gene_type: "lncRNA".to_string(),
        chrom: "chr1".to_string(),
        strand: Some(Strand::Plus),
        span_start: exons[0].0,
        span_end: exons[19].1,
        ccds_id: None,
        tags: vec![],
        regions: RegionLists {
            exon: exons,
            ..Default::default()
        },
    };

    c.bench_function("classify_transcript_20_exons", |b| {
        b.iter(|| black_box(classify_transcript(&model, &index, RegionOrder::AsListed)))
    });
}

criterion_group!(
    benches,
    bench_index_build,
    bench_single_region,
    bench_region_sizes,
    bench_transcript,
);
criterion_main!(benches);
