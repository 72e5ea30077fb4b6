//! Run configuration
//!
//! Options shared by the library entry points. The CLI maps its flags onto
//! these types.

/// Default label substring selecting Alu elements from RepeatMasker output
pub const DEFAULT_MARKER: &str = "Alu";

/// Progress is logged after this many transcripts
pub const PROGRESS_INTERVAL: usize = 5000;

/// How region lists are put into genomic order before intron derivation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegionOrder {
    /// Trust the annotation order: features are listed 5'→3', so lists on
    /// the '-' strand are reversed once.
    #[default]
    AsListed,
    /// Sort every list ascending by coordinate, ignoring file order
    Sorted,
}

/// What to do with a region record whose transcript record has not been seen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingContextPolicy {
    /// Stop with `AnnotationError::MissingTranscriptContext`
    #[default]
    Fail,
    /// Drop the record and log a warning
    Discard,
}

/// Options for a classification run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifyConfig {
    /// Substring of the repeat label that marks a target element
    pub marker: String,
    /// Number of threads (1 = sequential)
    pub threads: usize,
    /// Region ordering policy
    pub region_order: RegionOrder,
    /// Region-before-transcript policy
    pub missing_context: MissingContextPolicy,
    /// Emit each intron identity only once across transcripts
    pub dedup_introns: bool,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            threads: 1,
            region_order: RegionOrder::default(),
            missing_context: MissingContextPolicy::default(),
            dedup_introns: false,
        }
    }
}
