//! File format adapters
//!
//! Adapters between the engine and its files: GFF3 annotation in, RepeatMasker
//! BED in, gene region table and intron BED out.

pub mod bed;
pub mod gff;
pub mod table;

pub use bed::{
    load_repeat_index, read_repeat_index, BedParseError, BedRecordView, RepeatLoadStats,
    RepeatRecord,
};
pub use gff::{load_transcripts, read_transcripts, GffParseError, GffRecordView};
