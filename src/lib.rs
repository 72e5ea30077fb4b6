//! AluRegions - Alu insertion content of gene regions
//!
//! Annotates every 5' UTR, coding/exonic region, 3' UTR and derived intron
//! of a transcript annotation with the Alu elements it fully contains, and
//! classifies each region as `no_alu`, `non_ir_single_alu`,
//! `non_ir_multi_alu` or `ir_alu` (an inverted-repeat pair is present).
//!
//! # Features
//!
//! - Per-chromosome interval index (rust-lapper) for sub-linear queries
//! - Strand-aware intron derivation within each region list
//! - Parallel classification with rayon, deterministic output order
//! - Plain, gzip and bzip2 inputs
//!
//! # Example
//!
//! ```ignore
//! use alu_regions::{ClassifyConfig, classify_all};
//! use alu_regions::formats::{bed, gff};
//!
//! let config = ClassifyConfig::default();
//! let (index, _) = bed::load_repeat_index("hg19.repeatmasker.bed.gz", &config.marker)?;
//! let transcripts = gff::load_transcripts("gencode.gff3.gz", config.missing_context)?;
//! let (records, summary) = classify_all(&transcripts, &index, &config)?;
//! ```

pub mod core;
pub mod formats;

// Re-export commonly used types
pub use self::core::{
    classify, classify_all, classify_transcripts, AluCategory, AluRegionsError, AnnotationError,
    ClassifyConfig, ClassifySummary, DedupContext, GeneRegion, GeneRegionRecord,
    MissingContextPolicy, OverlapStats, RegionOrder, RepeatIndex, RepeatIndexBuilder, Result,
    Strand, TranscriptBuilder, TranscriptModel, TranscriptSet,
};
pub use formats::{bed, gff, table};
