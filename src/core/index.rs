//! Interval index for repeat-element queries
//!
//! Uses rust-lapper for O(log n + k) interval queries.
//!
//! Coordinates are 1-based and closed. Lapper stores half-open intervals,
//! so an element `[start, end]` is kept as `[start, end + 1)`.

use crate::core::Strand;
use rust_lapper::{Interval, Lapper};
use std::collections::HashMap;
use std::fmt;

/// A repeat element as returned by an overlap query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RepeatInterval {
    /// Start position (1-based, inclusive)
    pub start: u64,
    /// End position (1-based, inclusive)
    pub end: u64,
    /// Orientation of the element
    pub strand: Option<Strand>,
}

/// Type alias for stored repeat intervals
pub type StoredInterval = Interval<u64, Option<Strand>>;

/// Collects repeat elements per chromosome before the index is frozen
#[derive(Debug, Default)]
pub struct RepeatIndexBuilder {
    by_chrom: HashMap<String, Vec<StoredInterval>>,
}

impl RepeatIndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a closed interval `[start, end]` to a chromosome.
    ///
    /// Intervals with `end < start` cover no bases and are ignored.
    pub fn insert(&mut self, chrom: &str, start: u64, end: u64, strand: Option<Strand>) {
        if end < start {
            log::warn!("Ignoring empty repeat interval {}:{}-{}", chrom, start, end);
            return;
        }
        let interval = Interval {
            start,
            stop: end + 1,
            val: strand,
        };
        match self.by_chrom.get_mut(chrom) {
            Some(list) => list.push(interval),
            None => {
                self.by_chrom.insert(chrom.to_string(), vec![interval]);
            }
        }
    }

    /// Number of intervals collected so far
    pub fn len(&self) -> usize {
        self.by_chrom.values().map(|v| v.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Freeze into a queryable index
    pub fn build(self) -> RepeatIndex {
        let maps = self
            .by_chrom
            .into_iter()
            .map(|(chrom, intervals)| (chrom, Lapper::new(intervals)))
            .collect();
        RepeatIndex { maps }
    }
}

/// Interval index organized by chromosome
///
/// Read-only once built, so it can be shared across threads by reference.
pub struct RepeatIndex {
    /// Chromosome -> interval tree (using Lapper)
    maps: HashMap<String, Lapper<u64, Option<Strand>>>,
}

impl fmt::Debug for RepeatIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.maps.iter().map(|(chrom, l)| (chrom, l.len())))
            .finish()
    }
}

impl RepeatIndex {
    /// Query elements whose span intersects the closed range `[start, end]`
    ///
    /// Chromosomes without indexed elements yield an empty result.
    pub fn overlap(&self, chrom: &str, start: u64, end: u64) -> Vec<RepeatInterval> {
        if end < start {
            return vec![];
        }
        match self.maps.get(chrom) {
            Some(l) => l
                .find(start, end + 1)
                .map(|iv| RepeatInterval {
                    start: iv.start,
                    end: iv.stop - 1,
                    strand: iv.val,
                })
                .collect(),
            None => vec![],
        }
    }

    /// Check if a chromosome has any indexed element
    pub fn has_chrom(&self, chrom: &str) -> bool {
        self.maps.contains_key(chrom)
    }

    /// Get all indexed chromosome names
    pub fn chroms(&self) -> impl Iterator<Item = &str> {
        self.maps.keys().map(|s| s.as_str())
    }

    /// Get the number of intervals for a chromosome
    pub fn interval_count(&self, chrom: &str) -> usize {
        self.maps.get(chrom).map(|l| l.len()).unwrap_or(0)
    }

    /// Get total number of intervals across all chromosomes
    pub fn total_intervals(&self) -> usize {
        self.maps.values().map(|l| l.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_index() -> RepeatIndex {
        let mut builder = RepeatIndexBuilder::new();
        builder.insert("chr1", 100, 150, Some(Strand::Plus));
        builder.insert("chr1", 160, 200, Some(Strand::Minus));
        builder.insert("chr1", 500, 800, Some(Strand::Plus));
        builder.insert("chr2", 10, 20, None);
        builder.build()
    }

    #[test]
    fn test_index_creation() {
        let index = create_test_index();

        assert!(index.has_chrom("chr1"));
        assert!(index.has_chrom("chr2"));
        assert!(!index.has_chrom("chr3"));
        assert_eq!(index.total_intervals(), 4);
        assert_eq!(index.interval_count("chr1"), 3);
        assert_eq!(index.interval_count("chr3"), 0);
    }

    #[test]
    fn test_overlap_closed_boundaries() {
        let index = create_test_index();

        // Touching the last base counts as overlap
        let results = index.overlap("chr1", 150, 150);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].start, 100);
        assert_eq!(results[0].end, 150);
        assert_eq!(results[0].strand, Some(Strand::Plus));

        // One past the end does not
        let results = index.overlap("chr1", 151, 159);
        assert!(results.is_empty());
    }

    #[test]
    fn test_overlap_multiple() {
        let index = create_test_index();

        let mut results = index.overlap("chr1", 120, 600);
        results.sort_by_key(|r| r.start);
        assert_eq!(results.len(), 3);
        assert_eq!(results[2].start, 500);
        assert_eq!(results[2].end, 800);
    }

    #[test]
    fn test_unindexed_chromosome() {
        let index = create_test_index();
        assert!(index.overlap("chrX", 1, 1_000_000).is_empty());
    }

    #[test]
    fn test_inverted_query_is_empty() {
        let index = create_test_index();
        assert!(index.overlap("chr1", 600, 100).is_empty());
    }

    #[test]
    fn test_builder_ignores_empty() {
        let mut builder = RepeatIndexBuilder::new();
        builder.insert("chr1", 10, 9, None);
        assert!(builder.is_empty());
        let index = builder.build();
        assert!(!index.has_chrom("chr1"));
    }

    #[test]
    fn test_chroms() {
        let index = create_test_index();
        let mut chroms: Vec<&str> = index.chroms().collect();
        chroms.sort_unstable();
        assert_eq!(chroms, vec!["chr1", "chr2"]);
    }
}
