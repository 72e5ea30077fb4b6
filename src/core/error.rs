//! Error types for AluRegions
//!
//! Defines all error types used throughout the library.

use thiserror::Error;

/// Main error type for AluRegions operations
#[derive(Debug, Error)]
pub enum AluRegionsError {
    /// Transcript model construction errors
    #[error("Annotation error: {0}")]
    Annotation(#[from] AnnotationError),

    /// Input line format errors
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// Thread pool construction errors
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while assembling transcript models from annotation records
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnnotationError {
    /// Attribute column could not be split into key=value pairs
    #[error("Malformed attribute block '{block}': {message}")]
    MalformedAttributeBlock { block: String, message: String },

    /// A required attribute is absent
    #[error("Missing required attribute '{key}' on {feature} record")]
    MissingAttribute { key: &'static str, feature: String },

    /// A region record arrived before its transcript record
    #[error("{feature} record references transcript '{transcript_id}' before its transcript record")]
    MissingTranscriptContext {
        transcript_id: String,
        feature: String,
    },
}

/// Errors attached to a specific input line
#[derive(Debug, Error)]
pub enum FormatError {
    /// Invalid GFF3 line
    #[error("Invalid GFF format at line {line}: {message}")]
    InvalidGff { line: usize, message: String },

    /// Invalid BED line
    #[error("Invalid BED format at line {line}: {message}")]
    InvalidBed { line: usize, message: String },
}

/// Result type alias for AluRegions operations
pub type Result<T> = std::result::Result<T, AluRegionsError>;

/// Result type alias for transcript model construction
pub type AnnotationResult<T> = std::result::Result<T, AnnotationError>;
