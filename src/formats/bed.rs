//! BED format adapter
//!
//! Reads RepeatMasker BED6 (`chrom, start, end, label, score, strand`) into
//! a [`RepeatIndex`] and writes intron BED6 lines. BED is 0-based half-open;
//! starts are shifted by one on load and back on output.

use crate::core::{
    strand_char, CcdsIntron, FormatError, GeneRegionRecord, LineIterator, RepeatIndex,
    RepeatIndexBuilder, Result, SmartReader, Strand,
};
use memchr::memchr;
use std::io::{self, BufRead, Write};
use std::path::Path;

/// BED parsing error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BedParseError {
    #[error("Empty line")]
    EmptyLine,

    #[error("Too few fields: expected at least {expected}, found {found}")]
    TooFewFields { expected: usize, found: usize },

    #[error("Invalid UTF-8 in field: {0}")]
    InvalidUtf8(&'static str),

    #[error("Invalid number in field {0}: {1}")]
    InvalidNumber(&'static str, String),

    #[error("Invalid strand: {0}")]
    InvalidStrand(String),
}

/// Zero-copy BED record view for parsing
/// Only parses coordinate fields immediately, other fields are kept as byte slices
pub struct BedRecordView<'a> {
    /// Original line bytes
    line: &'a [u8],
    /// Chromosome name
    pub chrom: &'a str,
    /// Start position (0-based)
    pub start: u64,
    /// End position (exclusive)
    pub end: u64,
    /// Field boundaries (start, end) for lazy access
    field_bounds: Vec<(usize, usize)>,
}

impl<'a> BedRecordView<'a> {
    /// Parse a BED line with minimal allocation
    /// Only parses chrom, start, end immediately
    pub fn parse(line: &'a [u8]) -> std::result::Result<Self, BedParseError> {
        if line.is_empty() {
            return Err(BedParseError::EmptyLine);
        }

        // Find field boundaries using memchr for tab characters
        let mut field_bounds = Vec::with_capacity(6);
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

        // Need at least 3 fields (BED3)
        if field_bounds.len() < 3 {
            return Err(BedParseError::TooFewFields {
                expected: 3,
                found: field_bounds.len(),
            });
        }

        let field = |idx: usize, name: &'static str| -> std::result::Result<&'a str, BedParseError> {
            let (start, end) = field_bounds[idx];
            std::str::from_utf8(&line[start..end]).map_err(|_| BedParseError::InvalidUtf8(name))
        };

        let chrom = field(0, "chrom")?;
        let start_str = field(1, "start")?;
        let start: u64 = start_str
            .parse()
            .map_err(|_| BedParseError::InvalidNumber("start", start_str.to_string()))?;
        let end_str = field(2, "end")?;
        let end: u64 = end_str
            .parse()
            .map_err(|_| BedParseError::InvalidNumber("end", end_str.to_string()))?;

        Ok(Self {
            line,
            chrom,
            start,
            end,
            field_bounds,
        })
    }

    /// Get the number of fields
    pub fn field_count(&self) -> usize {
        self.field_bounds.len()
    }

    /// Get field as string slice (lazy access)
    pub fn field(&self, index: usize) -> Option<&'a str> {
        self.field_bounds
            .get(index)
            .and_then(|(start, end)| std::str::from_utf8(&self.line[*start..*end]).ok())
    }

    /// Get name field (field 3) if present
    pub fn name(&self) -> Option<&'a str> {
        self.field(3)
    }

    /// Get strand field (field 5); absent or "." is unstranded
    pub fn strand(&self) -> std::result::Result<Option<Strand>, BedParseError> {
        match self.field(5) {
            Some(s) => Strand::parse_field(s).map_err(BedParseError::InvalidStrand),
            None => Ok(None),
        }
    }
}

/// A decoded repeat annotation line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatRecord {
    pub chrom: String,
    /// Start position (1-based, inclusive)
    pub start: u64,
    /// End position (1-based, inclusive)
    pub end: u64,
    /// RepeatMasker name/class/family label
    pub label: String,
    pub strand: Option<Strand>,
}

impl RepeatRecord {
    /// Decode a BED6 line, converting the start to 1-based
    pub fn parse(line: &[u8]) -> std::result::Result<Self, BedParseError> {
        let view = BedRecordView::parse(line)?;
        Ok(Self {
            chrom: view.chrom.to_string(),
            start: view.start + 1,
            end: view.end,
            label: view.name().unwrap_or("").to_string(),
            strand: view.strand()?,
        })
    }

    /// Label contains the marker substring
    pub fn is_target(&self, marker: &str) -> bool {
        self.label.contains(marker)
    }
}

/// Counters collected while loading repeats
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepeatLoadStats {
    /// Data lines read
    pub total: usize,
    /// Elements indexed
    pub indexed: usize,
}

/// Index the repeat records whose label contains `marker`
///
/// Comment (`#`), `track` and `browser` lines are skipped.
pub fn read_repeat_index<R: BufRead>(reader: R, marker: &str) -> Result<(RepeatIndex, RepeatLoadStats)> {
    let mut builder = RepeatIndexBuilder::new();
    let mut stats = RepeatLoadStats::default();
    let mut lines = LineIterator::new(reader);

    loop {
        let line_number = lines.line_number() + 1;
        let line = match lines.next_line() {
            Some(line) => line?,
            None => break,
        };
        if line.is_empty()
            || line.starts_with('#')
            || line.starts_with("track")
            || line.starts_with("browser")
        {
            continue;
        }
        stats.total += 1;

        let record = RepeatRecord::parse(line.as_bytes()).map_err(|e| FormatError::InvalidBed {
            line: line_number,
            message: e.to_string(),
        })?;
        if record.is_target(marker) {
            builder.insert(&record.chrom, record.start, record.end, record.strand);
            stats.indexed += 1;
        }
    }

    log::info!(
        "Done parsing repeats: {} of {} records match '{}'",
        stats.indexed,
        stats.total,
        marker
    );
    Ok((builder.build(), stats))
}

/// Index the repeat records of a (possibly compressed) BED file
pub fn load_repeat_index<P: AsRef<Path>>(path: P, marker: &str) -> Result<(RepeatIndex, RepeatLoadStats)> {
    read_repeat_index(SmartReader::open(path)?, marker)
}

/// Write an intron record as BED6: name `<transcript>-<category>`, score = element count
pub fn write_intron_bed<W: Write + ?Sized>(out: &mut W, record: &GeneRegionRecord) -> io::Result<()> {
    writeln!(
        out,
        "{}\t{}\t{}\t{}-{}\t{}\t{}",
        record.chrom,
        record.start.saturating_sub(1),
        record.end,
        record.transcript_id,
        record.alu_category,
        record.total_alu_count,
        strand_char(record.strand)
    )
}

/// Write a CCDS intron as BED6 with score 0
pub fn write_ccds_intron<W: Write + ?Sized>(out: &mut W, intron: &CcdsIntron) -> io::Result<()> {
    writeln!(
        out,
        "{}\t{}\t{}\t{}\t0\t{}",
        intron.chrom,
        intron.start.saturating_sub(1),
        intron.end,
        intron.name,
        strand_char(intron.strand)
    )
}
