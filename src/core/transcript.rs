//! Transcript model construction
//!
//! Annotation records are streamed into a [`TranscriptBuilder`], which keeps
//! one [`TranscriptModel`] per `transcript_id` in first-seen order. Region
//! records (exon, CDS, UTRs) are appended to the model opened by the
//! transcript's own `transcript` record.

use crate::core::config::MissingContextPolicy;
use crate::core::error::{AnnotationError, AnnotationResult};
use crate::core::Strand;
use std::collections::{HashMap, HashSet};

/// Feature kind column of an annotation record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    Transcript,
    Cds,
    Exon,
    FivePrimeUtr,
    ThreePrimeUtr,
    /// Anything else (gene, start_codon, ...). Ignored by the builder.
    Other,
}

impl FeatureKind {
    /// Map the GFF3 feature column onto a kind
    pub fn from_feature(s: &str) -> Self {
        match s {
            "transcript" => FeatureKind::Transcript,
            "CDS" => FeatureKind::Cds,
            "exon" => FeatureKind::Exon,
            "five_prime_UTR" => FeatureKind::FivePrimeUtr,
            "three_prime_UTR" => FeatureKind::ThreePrimeUtr,
            _ => FeatureKind::Other,
        }
    }

    /// Region list fed by this kind, if any
    pub fn region_type(&self) -> Option<RegionType> {
        match self {
            FeatureKind::Cds => Some(RegionType::Cds),
            FeatureKind::Exon => Some(RegionType::Exon),
            FeatureKind::FivePrimeUtr => Some(RegionType::FivePrimeUtr),
            FeatureKind::ThreePrimeUtr => Some(RegionType::ThreePrimeUtr),
            FeatureKind::Transcript | FeatureKind::Other => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureKind::Transcript => "transcript",
            FeatureKind::Cds => "CDS",
            FeatureKind::Exon => "exon",
            FeatureKind::FivePrimeUtr => "five_prime_UTR",
            FeatureKind::ThreePrimeUtr => "three_prime_UTR",
            FeatureKind::Other => "other",
        }
    }
}

/// Region list of a transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionType {
    Exon,
    Cds,
    FivePrimeUtr,
    ThreePrimeUtr,
}

impl RegionType {
    /// Label written to the region column of the output table
    pub fn label(&self) -> &'static str {
        match self {
            RegionType::Exon => "exon",
            RegionType::Cds => "CDS",
            RegionType::FivePrimeUtr => "fivep_UTR",
            RegionType::ThreePrimeUtr => "threep_UTR",
        }
    }
}

/// Attributes the engine reads from the key=value column
///
/// Keys not listed here are dropped during parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    pub transcript_id: Option<String>,
    pub gene_name: Option<String>,
    pub gene_id: Option<String>,
    pub gene_type: Option<String>,
    /// `ccdsid` attribute
    pub ccds_id: Option<String>,
    /// Comma-separated `tag` attribute
    pub tags: Vec<String>,
    /// Entries without `=` skipped by [`Attributes::parse_lenient`]
    pub malformed: usize,
}

impl Attributes {
    /// Parse a GFF3 attribute block (`key=value;key=value`)
    ///
    /// Empty entries (e.g. a trailing `;`) are skipped; an entry without `=`
    /// makes the whole block malformed.
    pub fn parse(block: &str) -> AnnotationResult<Self> {
        let mut attrs = Attributes::default();
        for entry in block.split(';').map(str::trim).filter(|e| !e.is_empty()) {
            let (key, value) = entry.split_once('=').ok_or_else(|| {
                AnnotationError::MalformedAttributeBlock {
                    block: block.to_string(),
                    message: format!("entry '{}' has no '='", entry),
                }
            })?;
            attrs.set(key, value);
        }
        Ok(attrs)
    }

    /// Parse a block, skipping entries without `=` and counting them in
    /// `malformed`
    pub fn parse_lenient(block: &str) -> Self {
        let mut attrs = Attributes::default();
        for entry in block.split(';').map(str::trim).filter(|e| !e.is_empty()) {
            match entry.split_once('=') {
                Some((key, value)) => attrs.set(key, value),
                None => attrs.malformed += 1,
            }
        }
        attrs
    }

    fn set(&mut self, key: &str, value: &str) {
        match key {
            "transcript_id" => self.transcript_id = Some(value.to_string()),
            "gene_name" => self.gene_name = Some(value.to_string()),
            "gene_id" => self.gene_id = Some(value.to_string()),
            "gene_type" => self.gene_type = Some(value.to_string()),
            "ccdsid" => self.ccds_id = Some(value.to_string()),
            "tag" => self.tags = value.split(',').map(|t| t.to_string()).collect(),
            _ => {}
        }
    }

    /// Check for a tag value
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    fn require<'a>(
        value: &'a Option<String>,
        key: &'static str,
        feature: FeatureKind,
    ) -> AnnotationResult<&'a str> {
        value
            .as_deref()
            .ok_or_else(|| AnnotationError::MissingAttribute {
                key,
                feature: feature.as_str().to_string(),
            })
    }
}

/// One decoded annotation line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationRecord {
    pub chrom: String,
    pub feature: FeatureKind,
    /// Start position (1-based, inclusive)
    pub start: u64,
    /// End position (1-based, inclusive)
    pub end: u64,
    pub strand: Option<Strand>,
    pub attributes: Attributes,
}

/// Per-type region lists of one transcript, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionLists {
    pub exon: Vec<(u64, u64)>,
    pub cds: Vec<(u64, u64)>,
    pub five_prime_utr: Vec<(u64, u64)>,
    pub three_prime_utr: Vec<(u64, u64)>,
}

impl RegionLists {
    pub fn get(&self, region_type: RegionType) -> &[(u64, u64)] {
        match region_type {
            RegionType::Exon => &self.exon,
            RegionType::Cds => &self.cds,
            RegionType::FivePrimeUtr => &self.five_prime_utr,
            RegionType::ThreePrimeUtr => &self.three_prime_utr,
        }
    }

    pub fn get_mut(&mut self, region_type: RegionType) -> &mut Vec<(u64, u64)> {
        match region_type {
            RegionType::Exon => &mut self.exon,
            RegionType::Cds => &mut self.cds,
            RegionType::FivePrimeUtr => &mut self.five_prime_utr,
            RegionType::ThreePrimeUtr => &mut self.three_prime_utr,
        }
    }
}

/// Transcript-level metadata plus its region lists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptModel {
    pub transcript_id: String,
    pub gene_name: String,
    pub gene_id: String,
    pub gene_type: String,
    pub chrom: String,
    pub strand: Option<Strand>,
    pub span_start: u64,
    pub span_end: u64,
    pub ccds_id: Option<String>,
    pub tags: Vec<String>,
    pub regions: RegionLists,
}

impl TranscriptModel {
    /// Open a model from a `transcript` record
    pub fn from_record(record: &AnnotationRecord) -> AnnotationResult<Self> {
        let attrs = &record.attributes;
        let feature = record.feature;
        Ok(Self {
            transcript_id: Attributes::require(&attrs.transcript_id, "transcript_id", feature)?
                .to_string(),
            gene_name: Attributes::require(&attrs.gene_name, "gene_name", feature)?.to_string(),
            gene_id: Attributes::require(&attrs.gene_id, "gene_id", feature)?.to_string(),
            gene_type: Attributes::require(&attrs.gene_type, "gene_type", feature)?.to_string(),
            chrom: record.chrom.clone(),
            strand: record.strand,
            span_start: record.start,
            span_end: record.end,
            ccds_id: attrs.ccds_id.clone(),
            tags: attrs.tags.clone(),
            regions: RegionLists::default(),
        })
    }

    /// A transcript is coding when it has at least one CDS record
    pub fn is_coding(&self) -> bool {
        !self.regions.cds.is_empty()
    }

    /// List used for the coding/exonic region kind
    pub fn coding_region_type(&self) -> RegionType {
        if self.is_coding() {
            RegionType::Cds
        } else {
            RegionType::Exon
        }
    }

    /// Region lists processed for this transcript, in output order
    pub fn region_types(&self) -> [RegionType; 3] {
        [
            self.coding_region_type(),
            RegionType::FivePrimeUtr,
            RegionType::ThreePrimeUtr,
        ]
    }

    /// Protein-coding transcript carrying the CCDS tag
    pub fn is_ccds_protein_coding(&self) -> bool {
        self.gene_type == "protein_coding" && self.tags.iter().any(|t| t == "CCDS")
    }
}

/// Counters collected while building
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuilderStats {
    /// Records seen
    pub records: usize,
    /// Records of unrecognized feature kinds
    pub ignored: usize,
    /// Region records dropped (no transcript context, skipped transcript,
    /// missing `transcript_id`, chromosome mismatch)
    pub discarded: usize,
    /// Transcript records that replaced an earlier model with the same id
    pub replaced: usize,
    /// Transcript records skipped for missing required attributes
    pub skipped_transcripts: usize,
    /// Attribute entries without `=`, summed over all records
    pub malformed_entries: usize,
}

/// All models of one annotation, in transcript-record order
#[derive(Debug, Clone, Default)]
pub struct TranscriptSet {
    pub models: Vec<TranscriptModel>,
    pub stats: BuilderStats,
}

impl TranscriptSet {
    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

/// Streaming builder for transcript models
///
/// Models are held in an arena indexed by transcript id, since the records
/// of one transcript are not guaranteed to be contiguous.
#[derive(Debug, Default)]
pub struct TranscriptBuilder {
    policy: MissingContextPolicy,
    models: Vec<TranscriptModel>,
    by_id: HashMap<String, usize>,
    /// Ids of transcript records that could not be opened
    skipped: HashSet<String>,
    stats: BuilderStats,
}

impl TranscriptBuilder {
    pub fn new(policy: MissingContextPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Feed one record
    pub fn push(&mut self, record: AnnotationRecord) -> AnnotationResult<()> {
        self.stats.records += 1;

        if record.attributes.malformed > 0 {
            log::warn!(
                "{} record at {}:{}-{} has {} attribute entries without '='",
                record.feature.as_str(),
                record.chrom,
                record.start,
                record.end,
                record.attributes.malformed
            );
            self.stats.malformed_entries += record.attributes.malformed;
        }

        if record.feature == FeatureKind::Transcript {
            let model = match TranscriptModel::from_record(&record) {
                Ok(model) => model,
                Err(e) => {
                    log::warn!("Skipping transcript at {}:{}-{}: {}", record.chrom, record.start, record.end, e);
                    self.stats.skipped_transcripts += 1;
                    if let Some(id) = &record.attributes.transcript_id {
                        if !self.by_id.contains_key(id) {
                            self.skipped.insert(id.clone());
                        }
                    }
                    return Ok(());
                }
            };
            self.skipped.remove(&model.transcript_id);
            match self.by_id.get(&model.transcript_id) {
                Some(&idx) => {
                    log::warn!("Transcript {} defined twice, keeping the last definition", model.transcript_id);
                    self.stats.replaced += 1;
                    self.models[idx] = model;
                }
                None => {
                    self.by_id.insert(model.transcript_id.clone(), self.models.len());
                    self.models.push(model);
                }
            }
            return Ok(());
        }

        let region_type = match record.feature.region_type() {
            Some(t) => t,
            None => {
                self.stats.ignored += 1;
                return Ok(());
            }
        };

        let transcript_id = match record.attributes.transcript_id.as_deref() {
            Some(id) => id,
            None => {
                log::warn!(
                    "Discarding {} record at {}:{}-{}: no transcript_id",
                    record.feature.as_str(),
                    record.chrom,
                    record.start,
                    record.end
                );
                self.stats.discarded += 1;
                return Ok(());
            }
        };

        let idx = match self.by_id.get(transcript_id) {
            Some(&idx) => idx,
            None if self.skipped.contains(transcript_id) => {
                self.stats.discarded += 1;
                return Ok(());
            }
            None => {
                return match self.policy {
                    MissingContextPolicy::Fail => Err(AnnotationError::MissingTranscriptContext {
                        transcript_id: transcript_id.to_string(),
                        feature: record.feature.as_str().to_string(),
                    }),
                    MissingContextPolicy::Discard => {
                        log::warn!(
                            "Discarding {} record of {}: no transcript record seen",
                            record.feature.as_str(),
                            transcript_id
                        );
                        self.stats.discarded += 1;
                        Ok(())
                    }
                };
            }
        };

        let model = &mut self.models[idx];
        if model.chrom != record.chrom {
            log::warn!(
                "Discarding {} record of {} on {}: transcript is on {}",
                record.feature.as_str(),
                model.transcript_id,
                record.chrom,
                model.chrom
            );
            self.stats.discarded += 1;
            return Ok(());
        }
        model.regions.get_mut(region_type).push((record.start, record.end));
        Ok(())
    }

    /// Feed every record of an iterator, stopping at the first error
    pub fn extend<I>(&mut self, records: I) -> AnnotationResult<()>
    where
        I: IntoIterator<Item = AnnotationRecord>,
    {
        for record in records {
            self.push(record)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Close the pass and hand over the models
    pub fn finish(self) -> TranscriptSet {
        TranscriptSet {
            models: self.models,
            stats: self.stats,
        }
    }
}
