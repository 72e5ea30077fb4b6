//! CCDS intron export
//!
//! Collects the distinct introns of protein-coding, CCDS-tagged transcripts.
//! No repeat index is involved; an intron shared by several transcripts is
//! reported once, under the first transcript that produced it.

use crate::core::config::RegionOrder;
use crate::core::pipeline::{DedupContext, IntronKey};
use crate::core::regions::derive_regions;
use crate::core::strand::strand_char;
use crate::core::transcript::TranscriptSet;
use crate::core::Strand;

/// A distinct CCDS intron
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CcdsIntron {
    pub chrom: String,
    pub strand: Option<Strand>,
    /// Start position (1-based, inclusive)
    pub start: u64,
    /// End position (1-based, inclusive)
    pub end: u64,
    /// `<transcript base id>_<ccdsid>_<gene_name>_<intron id>`
    pub name: String,
}

impl CcdsIntron {
    /// Number of bases spanned; zero for empty gaps
    pub fn len(&self) -> u64 {
        (self.end + 1).saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Intron id: chromosome, strand and 0-based half-open coordinates
pub fn intron_id(chrom: &str, strand: Option<Strand>, start: u64, end: u64) -> String {
    format!("{}_{}_{}_{}", chrom, strand_char(strand), start.saturating_sub(1), end)
}

/// Collect CCDS introns, optionally limited to `max_len` bases
pub fn ccds_introns(
    set: &TranscriptSet,
    order: RegionOrder,
    max_len: Option<u64>,
    ctx: &mut DedupContext,
) -> Vec<CcdsIntron> {
    let mut out = Vec::new();
    for model in set.models.iter().filter(|m| m.is_ccds_protein_coding()) {
        let tx_base = model
            .transcript_id
            .split('_')
            .next()
            .unwrap_or(&model.transcript_id);
        let ccds_id = match &model.ccds_id {
            Some(id) => id.as_str(),
            None => {
                log::warn!("Transcript {} is tagged CCDS but has no ccdsid", model.transcript_id);
                "."
            }
        };

        for derived in derive_regions(model, order).into_iter().filter(|d| d.kind.is_intron()) {
            let key = IntronKey {
                chrom: model.chrom.clone(),
                strand: model.strand,
                start: derived.start,
                end: derived.end,
            };
            if !ctx.first_emission(key) {
                continue;
            }
            let intron = CcdsIntron {
                chrom: model.chrom.clone(),
                strand: model.strand,
                start: derived.start,
                end: derived.end,
                name: format!(
                    "{}_{}_{}_{}",
                    tx_base,
                    ccds_id,
                    model.gene_name,
                    intron_id(&model.chrom, model.strand, derived.start, derived.end)
                ),
            };
            if max_len.map_or(true, |max| intron.len() <= max) {
                out.push(intron);
            }
        }
    }
    log::info!("Collected {} distinct CCDS introns", out.len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transcript::{RegionLists, TranscriptModel};

    fn model(id: &str, gene_type: &str, tags: &[&str], cds: Vec<(u64, u64)>) -> TranscriptModel {
        TranscriptModel {
            transcript_id: id.to_string(),
            gene_name: "GENE".to_string(),
            gene_id: "GID".to_string(),
            gene_type: gene_type.to_string(),
            chrom: "chr2".to_string(),
            strand: Some(Strand::Minus),
            span_start: 1,
            span_end: 10_000,
            ccds_id: Some("CCDS5.1".to_string()),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            regions: RegionLists {
                cds,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_ccds_filter_and_dedup() {
        let set = TranscriptSet {
            models: vec![
                model("ENST1.1_PAR_Y", "protein_coding", &["basic", "CCDS"], vec![(500, 600), (100, 200)]),
                model("ENST2.1", "protein_coding", &["CCDS"], vec![(500, 600), (100, 200)]),
                model("ENST3.1", "protein_coding", &["basic"], vec![(900, 950), (100, 200)]),
                model("ENST4.1", "lncRNA", &["CCDS"], vec![(900, 950), (100, 200)]),
            ],
            stats: Default::default(),
        };
        let mut ctx = DedupContext::new();
        let introns = ccds_introns(&set, RegionOrder::AsListed, None, &mut ctx);

        assert_eq!(introns.len(), 1);
        let intron = &introns[0];
        assert_eq!((intron.start, intron.end), (201, 499));
        assert_eq!(intron.name, "ENST1.1_CCDS5.1_GENE_chr2_-_200_499");
        assert_eq!(intron.len(), 299);
    }

    #[test]
    fn test_max_length() {
        let set = TranscriptSet {
            models: vec![model(
                "ENST1.1",
                "protein_coding",
                &["CCDS"],
                vec![(9000, 9100), (5000, 5100), (100, 200)],
            )],
            stats: Default::default(),
        };
        let mut ctx = DedupContext::new();
        let introns = ccds_introns(&set, RegionOrder::AsListed, Some(4000), &mut ctx);
        assert_eq!(introns.len(), 1);
        assert_eq!((introns[0].start, introns[0].end), (5101, 8999));
    }
}
