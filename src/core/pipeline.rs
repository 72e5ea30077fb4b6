//! Per-transcript classification pipeline
//!
//! Each transcript is classified independently against the shared,
//! read-only [`RepeatIndex`]. Results are merged back in transcript order,
//! and the [`DedupContext`] is only touched during that sequential merge, so
//! the output does not depend on the thread count.

use crate::core::classify::{contained, AluCategory, OverlapStats};
use crate::core::config::{ClassifyConfig, RegionOrder, PROGRESS_INTERVAL};
use crate::core::error::Result;
use crate::core::index::RepeatIndex;
use crate::core::regions::{derive_regions, GeneRegion};
use crate::core::transcript::{TranscriptModel, TranscriptSet};
use crate::core::Strand;
use rayon::prelude::*;
use std::collections::HashSet;

/// Transcripts handed to the thread pool per batch
const CHUNK_SIZE: usize = 1000;

/// One output row: a region or derived intron of one transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneRegionRecord {
    pub gene_name: String,
    pub gene_id: String,
    pub gene_type: String,
    pub transcript_id: String,
    pub region: GeneRegion,
    pub chrom: String,
    pub strand: Option<Strand>,
    pub start: u64,
    pub end: u64,
    pub total_alu_count: usize,
    pub total_alu_length: u64,
    pub ir_alu_pair_count: usize,
    pub has_alu: bool,
    pub has_ir_alu: bool,
    pub alu_category: AluCategory,
}

impl GeneRegionRecord {
    fn new(model: &TranscriptModel, region: GeneRegion, start: u64, end: u64, stats: &OverlapStats) -> Self {
        Self {
            gene_name: model.gene_name.clone(),
            gene_id: model.gene_id.clone(),
            gene_type: model.gene_type.clone(),
            transcript_id: model.transcript_id.clone(),
            region,
            chrom: model.chrom.clone(),
            strand: model.strand,
            start,
            end,
            total_alu_count: stats.total_alu_count,
            total_alu_length: stats.total_alu_length,
            ir_alu_pair_count: stats.ir_alu_pair_count,
            has_alu: stats.has_alu(),
            has_ir_alu: stats.has_ir_alu(),
            alu_category: stats.category,
        }
    }

    /// Identity used to recognize the same intron in different transcripts
    pub fn intron_key(&self) -> IntronKey {
        IntronKey {
            chrom: self.chrom.clone(),
            strand: self.strand,
            start: self.start,
            end: self.end,
        }
    }
}

/// Identity of a derived intron
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IntronKey {
    pub chrom: String,
    pub strand: Option<Strand>,
    pub start: u64,
    pub end: u64,
}

/// Identity of an indexed repeat element
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepeatKey {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
}

/// State shared by all transcripts of one run
#[derive(Debug, Default)]
pub struct DedupContext {
    emitted_introns: HashSet<IntronKey>,
    intronic_repeats: HashSet<RepeatKey>,
}

impl DedupContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an intron; returns false if it was recorded before
    pub fn first_emission(&mut self, key: IntronKey) -> bool {
        self.emitted_introns.insert(key)
    }

    /// Record a repeat element found inside an intron
    pub fn record_intronic(&mut self, key: RepeatKey) {
        self.intronic_repeats.insert(key);
    }

    /// Distinct repeat elements found inside any intron
    pub fn intronic_repeat_count(&self) -> usize {
        self.intronic_repeats.len()
    }

    /// Distinct introns recorded
    pub fn intron_count(&self) -> usize {
        self.emitted_introns.len()
    }
}

/// Everything one transcript contributes
#[derive(Debug, Clone, Default)]
pub struct TranscriptOutput {
    pub records: Vec<GeneRegionRecord>,
    /// Repeat elements counted inside this transcript's introns
    pub intronic_repeats: Vec<RepeatKey>,
}

/// Classify every region and intron of one transcript
pub fn classify_transcript(model: &TranscriptModel, index: &RepeatIndex, order: RegionOrder) -> TranscriptOutput {
    let mut out = TranscriptOutput::default();
    for derived in derive_regions(model, order) {
        let elements = contained(index, &model.chrom, derived.start, derived.end);
        if derived.kind.is_intron() {
            out.intronic_repeats.extend(elements.iter().map(|e| RepeatKey {
                chrom: model.chrom.clone(),
                start: e.start,
                end: e.end,
            }));
        }
        let stats = OverlapStats::from_elements(&elements);
        out.records
            .push(GeneRegionRecord::new(model, derived.kind, derived.start, derived.end, &stats));
    }
    out
}

/// Run statistics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifySummary {
    /// Transcripts classified
    pub transcripts: usize,
    /// Transcripts on chromosomes without indexed elements
    pub skipped_unindexed: usize,
    /// Records emitted
    pub records: usize,
    /// Intron records emitted
    pub introns: usize,
    /// Intron records suppressed as already emitted
    pub duplicate_introns: usize,
    /// Elements in the index
    pub indexed_repeats: usize,
    /// Distinct elements inside at least one intron
    pub intronic_repeats: usize,
}

impl ClassifySummary {
    /// Share of indexed elements found inside introns, in percent
    pub fn intronic_percentage(&self) -> f64 {
        if self.indexed_repeats == 0 {
            0.0
        } else {
            100.0 * self.intronic_repeats as f64 / self.indexed_repeats as f64
        }
    }
}

/// Classify all transcripts, passing records to `emit` in transcript order
///
/// # Arguments
/// * `set` - Transcript models in transcript-record order
/// * `index` - Repeat index, fully built
/// * `config` - Run options (threads, ordering, intron deduplication)
/// * `ctx` - Deduplication context for this run
/// * `emit` - Receives each record
pub fn classify_transcripts<F>(
    set: &TranscriptSet,
    index: &RepeatIndex,
    config: &ClassifyConfig,
    ctx: &mut DedupContext,
    mut emit: F,
) -> Result<ClassifySummary>
where
    F: FnMut(&GeneRegionRecord) -> std::io::Result<()>,
{
    let mut summary = ClassifySummary {
        indexed_repeats: index.total_intervals(),
        ..Default::default()
    };

    let eligible: Vec<&TranscriptModel> = set
        .models
        .iter()
        .filter(|m| {
            let indexed = index.has_chrom(&m.chrom);
            if !indexed {
                log::debug!("Skipping {}: no repeats indexed on {}", m.transcript_id, m.chrom);
            }
            indexed
        })
        .collect();
    summary.skipped_unindexed = set.len() - eligible.len();

    let pool = if config.threads > 1 {
        Some(rayon::ThreadPoolBuilder::new().num_threads(config.threads).build()?)
    } else {
        None
    };

    for chunk in eligible.chunks(CHUNK_SIZE) {
        let outputs: Vec<TranscriptOutput> = match &pool {
            Some(pool) => pool.install(|| {
                chunk
                    .par_iter()
                    .map(|m| classify_transcript(m, index, config.region_order))
                    .collect()
            }),
            None => chunk
                .iter()
                .map(|m| classify_transcript(m, index, config.region_order))
                .collect(),
        };

        for output in outputs {
            for key in output.intronic_repeats {
                ctx.record_intronic(key);
            }
            for record in &output.records {
                if record.region.is_intron() {
                    if config.dedup_introns && !ctx.first_emission(record.intron_key()) {
                        summary.duplicate_introns += 1;
                        continue;
                    }
                    summary.introns += 1;
                }
                emit(record)?;
                summary.records += 1;
            }
            summary.transcripts += 1;
            if summary.transcripts % PROGRESS_INTERVAL == 0 {
                log::info!("Done processing {}k transcripts...", summary.transcripts / 1000);
            }
        }
    }

    summary.intronic_repeats = ctx.intronic_repeat_count();
    Ok(summary)
}

/// Classify all transcripts and collect the records
pub fn classify_all(
    set: &TranscriptSet,
    index: &RepeatIndex,
    config: &ClassifyConfig,
) -> Result<(Vec<GeneRegionRecord>, ClassifySummary)> {
    let mut records = Vec::new();
    let mut ctx = DedupContext::new();
    let summary = classify_transcripts(set, index, config, &mut ctx, |r| {
        records.push(r.clone());
        Ok(())
    })?;
    Ok((records, summary))
}
