//! Core annotation and classification engine
//!
//! This module contains the repeat interval index, the transcript model
//! builder, region/intron derivation and the overlap classifier.

mod ccds;
mod classify;
pub mod config;
mod error;
mod index;
pub mod io;
mod pipeline;
mod regions;
mod strand;
mod transcript;

pub use ccds::{ccds_introns, intron_id, CcdsIntron};
pub use classify::{classify, contained, union_length, AluCategory, OverlapStats};
pub use config::{ClassifyConfig, MissingContextPolicy, RegionOrder};
pub use error::{AluRegionsError, AnnotationError, AnnotationResult, FormatError, Result};
pub use index::{RepeatIndex, RepeatIndexBuilder, RepeatInterval};
pub use io::{create_output, LineIterator, OutputWriter, SmartReader};
pub use pipeline::{
    classify_all, classify_transcript, classify_transcripts, ClassifySummary, DedupContext,
    GeneRegionRecord, IntronKey, RepeatKey, TranscriptOutput,
};
pub use regions::{derive_introns, derive_regions, normalize, DerivedRegion, GeneRegion};
pub use strand::{strand_char, Strand};
pub use transcript::{
    AnnotationRecord, Attributes, BuilderStats, FeatureKind, RegionLists, RegionType,
    TranscriptBuilder, TranscriptModel, TranscriptSet,
};
