//! GFF3 annotation adapter
//!
//! Splits GFF3 lines with zero-copy parsing and feeds the decoded records
//! into a [`TranscriptBuilder`]. GFF uses 1-based closed coordinates, the
//! same convention as the engine.

use crate::core::{
    AnnotationRecord, Attributes, FeatureKind, FormatError, LineIterator, MissingContextPolicy,
    Result, SmartReader, Strand, TranscriptBuilder, TranscriptSet,
};
use memchr::memchr;
use std::io::BufRead;
use std::path::Path;

/// GFF3 parse error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GffParseError {
    #[error("Empty line")]
    EmptyLine,

    #[error("Too few fields: expected {expected}, found {found}")]
    TooFewFields { expected: usize, found: usize },

    #[error("Invalid UTF-8 in field: {0}")]
    InvalidUtf8(&'static str),

    #[error("Invalid number in field {0}: {1}")]
    InvalidNumber(&'static str, String),

    #[error("Invalid strand: {0}")]
    InvalidStrand(String),
}

/// Zero-copy GFF3 record view for parsing
/// GFF format: seqname, source, feature, start, end, score, strand, frame, attributes
/// All coordinates are 1-based, closed interval [start, end]
#[derive(Debug)]
pub struct GffRecordView<'a> {
    /// Sequence name (chromosome)
    pub seqname: &'a str,
    /// Source field
    pub source: &'a str,
    /// Feature type
    pub feature: &'a str,
    /// Start position (1-based)
    pub start: u64,
    /// End position (1-based, inclusive)
    pub end: u64,
    /// Strand
    pub strand: Option<Strand>,
    /// Attributes field
    pub attributes: &'a str,
}

impl<'a> GffRecordView<'a> {
    /// Parse a GFF3 line with minimal allocation
    /// GFF has exactly 9 tab-separated fields
    pub fn parse(line: &'a [u8]) -> std::result::Result<Self, GffParseError> {
        if line.is_empty() {
            return Err(GffParseError::EmptyLine);
        }

        // Find field boundaries using memchr for tab characters
        let mut field_bounds = Vec::with_capacity(9);
        let mut start_pos = 0;
        loop {
            match memchr(b'\t', &line[start_pos..]) {
                Some(tab_pos) => {
                    field_bounds.push((start_pos, start_pos + tab_pos));
                    start_pos += tab_pos + 1;
                }
                None => {
                    field_bounds.push((start_pos, line.len()));
                    break;
                }
            }
        }

        if field_bounds.len() < 9 {
            return Err(GffParseError::TooFewFields {
                expected: 9,
                found: field_bounds.len(),
            });
        }

        let get_field = |idx: usize, name: &'static str| -> std::result::Result<&'a str, GffParseError> {
            let (start, end) = field_bounds[idx];
            std::str::from_utf8(&line[start..end]).map_err(|_| GffParseError::InvalidUtf8(name))
        };
        let get_number = |idx: usize, name: &'static str| -> std::result::Result<u64, GffParseError> {
            let s = get_field(idx, name)?;
            s.parse()
                .map_err(|_| GffParseError::InvalidNumber(name, s.to_string()))
        };

        let strand_str = get_field(6, "strand")?;
        let strand = Strand::parse_field(strand_str).map_err(GffParseError::InvalidStrand)?;

        Ok(Self {
            seqname: get_field(0, "seqname")?,
            source: get_field(1, "source")?,
            feature: get_field(2, "feature")?,
            start: get_number(3, "start")?,
            end: get_number(4, "end")?,
            strand,
            attributes: get_field(8, "attributes")?,
        })
    }

    /// Decode into an owned record
    ///
    /// Attributes are only parsed for feature kinds the engine uses; other
    /// kinds carry empty attributes. Entries without `=` are skipped and
    /// counted, leaving the decision to the [`TranscriptBuilder`].
    pub fn to_record(&self) -> AnnotationRecord {
        let feature = FeatureKind::from_feature(self.feature);
        let attributes = match feature {
            FeatureKind::Other => Attributes::default(),
            _ => Attributes::parse_lenient(self.attributes),
        };
        AnnotationRecord {
            chrom: self.seqname.to_string(),
            feature,
            start: self.start,
            end: self.end,
            strand: self.strand,
            attributes,
        }
    }
}

/// Build transcript models from a GFF3 stream
///
/// Comment (`#`) and empty lines are skipped.
pub fn read_transcripts<R: BufRead>(reader: R, policy: MissingContextPolicy) -> Result<TranscriptSet> {
    let mut builder = TranscriptBuilder::new(policy);
    let mut lines = LineIterator::new(reader);

    loop {
        let line_number = lines.line_number() + 1;
        let line = match lines.next_line() {
            Some(line) => line?,
            None => break,
        };
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let view = GffRecordView::parse(line.as_bytes()).map_err(|e| FormatError::InvalidGff {
            line: line_number,
            message: e.to_string(),
        })?;
        builder.push(view.to_record())?;
    }

    let set = builder.finish();
    log::info!("Done parsing {} transcripts...", set.len());
    Ok(set)
}

/// Build transcript models from a (possibly compressed) GFF3 file
pub fn load_transcripts<P: AsRef<Path>>(path: P, policy: MissingContextPolicy) -> Result<TranscriptSet> {
    read_transcripts(SmartReader::open(path)?, policy)
}
