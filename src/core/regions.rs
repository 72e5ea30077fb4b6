//! Region and intron derivation
//!
//! Turns a [`TranscriptModel`] into the ordered list of intervals that get
//! classified: every region of the coding/exonic, 5' UTR and 3' UTR lists,
//! each followed by the intron separating it from the next region of the
//! same list. Introns are never derived across two different lists.

use crate::core::config::RegionOrder;
use crate::core::transcript::{RegionType, TranscriptModel};
use crate::core::Strand;

/// Kind of a derived interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneRegion {
    /// A region taken directly from one of the transcript's lists
    Region(RegionType),
    /// Gap between two consecutive regions of one list
    Intron,
}

impl GeneRegion {
    /// Label written to the region column of the output table
    pub fn label(&self) -> &'static str {
        match self {
            GeneRegion::Region(t) => t.label(),
            GeneRegion::Intron => "intron",
        }
    }

    pub fn is_intron(&self) -> bool {
        matches!(self, GeneRegion::Intron)
    }
}

/// One interval to classify
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedRegion {
    pub kind: GeneRegion,
    /// Start position (1-based, inclusive)
    pub start: u64,
    /// End position (1-based, inclusive). Below `start` for introns between
    /// touching or out-of-order regions.
    pub end: u64,
}

impl DerivedRegion {
    /// Span covers no base (`start > end`)
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

/// Put a region list into genomic order
///
/// With [`RegionOrder::AsListed`] the list is trusted to be in transcript
/// order, so '-' strand lists are reversed once. With
/// [`RegionOrder::Sorted`] the list is sorted ascending regardless of strand.
pub fn normalize(list: &[(u64, u64)], strand: Option<Strand>, order: RegionOrder) -> Vec<(u64, u64)> {
    let mut out = list.to_vec();
    match order {
        RegionOrder::AsListed => {
            if strand == Some(Strand::Minus) {
                out.reverse();
            }
        }
        RegionOrder::Sorted => out.sort_unstable(),
    }
    out
}

/// Gaps between consecutive regions: `(end[i] + 1, start[i + 1] - 1)`
///
/// A list of `n` regions yields `n - 1` introns. Gaps of zero or negative
/// width are returned as-is.
pub fn derive_introns(list: &[(u64, u64)]) -> Vec<(u64, u64)> {
    list.windows(2)
        .map(|w| (w[0].1 + 1, w[1].0.saturating_sub(1)))
        .collect()
}

/// Derive every region and intron of a transcript in output order
pub fn derive_regions(model: &TranscriptModel, order: RegionOrder) -> Vec<DerivedRegion> {
    let mut out = Vec::new();
    for region_type in model.region_types() {
        let list = normalize(model.regions.get(region_type), model.strand, order);
        let introns = derive_introns(&list);
        for (i, &(start, end)) in list.iter().enumerate() {
            out.push(DerivedRegion {
                kind: GeneRegion::Region(region_type),
                start,
                end,
            });
            if let Some(&(intron_start, intron_end)) = introns.get(i) {
                if intron_start > intron_end + 1 {
                    log::warn!(
                        "Transcript {}: intron {}-{} between {} regions has start > end",
                        model.transcript_id,
                        intron_start,
                        intron_end,
                        region_type.label()
                    );
                }
                out.push(DerivedRegion {
                    kind: GeneRegion::Intron,
                    start: intron_start,
                    end: intron_end,
                });
            }
        }
    }
    out
}
