//! Overlap statistics and Alu category of a region
//!
//! Only elements lying entirely inside the region are counted. Elements
//! crossing a region boundary belong to no region they cross.

use crate::core::index::{RepeatIndex, RepeatInterval};
use crate::core::Strand;
use std::fmt;

/// Structural pattern of the Alu elements inside a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AluCategory {
    NoAlu,
    NonIrSingleAlu,
    NonIrMultiAlu,
    /// At least one pair of opposite-orientation elements
    IrAlu,
}

impl AluCategory {
    /// Category of a region with `total` elements forming `ir_pairs` pairs
    ///
    /// # Examples
    /// ```
    /// use alu_regions::core::AluCategory;
    /// assert_eq!(AluCategory::from_counts(0, 0), AluCategory::NoAlu);
    /// assert_eq!(AluCategory::from_counts(1, 0), AluCategory::NonIrSingleAlu);
    /// assert_eq!(AluCategory::from_counts(3, 0), AluCategory::NonIrMultiAlu);
    /// assert_eq!(AluCategory::from_counts(2, 1), AluCategory::IrAlu);
    /// ```
    pub fn from_counts(total: usize, ir_pairs: usize) -> Self {
        if ir_pairs > 0 {
            AluCategory::IrAlu
        } else if total > 1 {
            AluCategory::NonIrMultiAlu
        } else if total == 1 {
            AluCategory::NonIrSingleAlu
        } else {
            AluCategory::NoAlu
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AluCategory::NoAlu => "no_alu",
            AluCategory::NonIrSingleAlu => "non_ir_single_alu",
            AluCategory::NonIrMultiAlu => "non_ir_multi_alu",
            AluCategory::IrAlu => "ir_alu",
        }
    }
}

impl fmt::Display for AluCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counts for one region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlapStats {
    /// Contained elements
    pub total_alu_count: usize,
    /// Bases covered by the union of contained elements
    pub total_alu_length: u64,
    /// Contained elements on '+'
    pub plus_count: usize,
    /// Contained elements on '-'
    pub minus_count: usize,
    /// `min(plus_count, minus_count)`
    pub ir_alu_pair_count: usize,
    pub category: AluCategory,
}

impl OverlapStats {
    /// Statistics of a region without elements
    pub fn empty() -> Self {
        Self::from_elements(&[])
    }

    /// Summarize elements already known to lie inside the region
    pub fn from_elements(elements: &[RepeatInterval]) -> Self {
        let total_alu_count = elements.len();
        let plus_count = elements.iter().filter(|e| e.strand == Some(Strand::Plus)).count();
        let minus_count = elements.iter().filter(|e| e.strand == Some(Strand::Minus)).count();
        let ir_alu_pair_count = plus_count.min(minus_count);
        Self {
            total_alu_count,
            total_alu_length: union_length(elements),
            plus_count,
            minus_count,
            ir_alu_pair_count,
            category: AluCategory::from_counts(total_alu_count, ir_alu_pair_count),
        }
    }

    pub fn has_alu(&self) -> bool {
        self.total_alu_count > 0
    }

    pub fn has_ir_alu(&self) -> bool {
        self.ir_alu_pair_count > 0
    }
}

/// Number of distinct bases covered by a set of closed intervals
pub fn union_length(elements: &[RepeatInterval]) -> u64 {
    let mut spans: Vec<(u64, u64)> = elements.iter().map(|e| (e.start, e.end)).collect();
    spans.sort_unstable();

    let mut total = 0;
    let mut current: Option<(u64, u64)> = None;
    for (start, end) in spans {
        current = match current {
            Some((cs, ce)) if start <= ce + 1 => Some((cs, ce.max(end))),
            Some((cs, ce)) => {
                total += ce + 1 - cs;
                Some((start, end))
            }
            None => Some((start, end)),
        };
    }
    if let Some((cs, ce)) = current {
        total += ce + 1 - cs;
    }
    total
}

/// Elements of the index lying entirely within `[start, end]`
pub fn contained(index: &RepeatIndex, chrom: &str, start: u64, end: u64) -> Vec<RepeatInterval> {
    index
        .overlap(chrom, start, end)
        .into_iter()
        .filter(|e| e.start >= start && e.end <= end)
        .collect()
}

/// Classify the region `[start, end]` of a chromosome
///
/// An unindexed chromosome or an empty span yields [`OverlapStats::empty`].
pub fn classify(index: &RepeatIndex, chrom: &str, start: u64, end: u64) -> OverlapStats {
    OverlapStats::from_elements(&contained(index, chrom, start, end))
}
