//! Error types for the Circuit Fingerprint Challenge domain.
//!
//! This module defines the error hierarchy shared by the validator, the scorer
//! and the command-line tooling. Every error maps to a machine-readable code and
//! to a process exit status, so organizer scripts can tell a rejected
//! submission apart from a broken input set.

use crate::task::{format_id_list, TaskId};
use crate::validation::ValidationReport;
use std::path::PathBuf;

/// Top-level error type
#[derive(Debug, thiserror::Error)]
pub enum ChallengeError {
    /// The submission was rejected by the validator
    #[error(transparent)]
    Submission(#[from] SubmissionError),

    /// The organizer inputs or settings are unusable
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// A file could not be read, parsed or written
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),
}

impl ChallengeError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Submission(_) => "SUBMISSION_REJECTED",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Document(_) => "DOCUMENT_ERROR",
        }
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Submission(_) => 1,
            Self::Configuration(_) => 2,
            Self::Document(_) => 3,
        }
    }
}

/// Submission rejected by the validator
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    /// One or more violations; all of them are carried in the report
    #[error("Submission rejected: {0}")]
    Rejected(ValidationReport),
}

impl SubmissionError {
    /// The full violation report
    pub fn report(&self) -> &ValidationReport {
        match self {
            Self::Rejected(report) => report,
        }
    }
}

/// Unusable organizer inputs or settings
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    /// The manifest lists no tasks, so no mean can be taken
    #[error("Task manifest contains no tasks")]
    EmptyManifest,

    /// The manifest repeats task ids
    #[error("Task manifest contains duplicate task IDs: {}", format_id_list(.0))]
    DuplicateManifestIds(Vec<TaskId>),

    /// The ground truth repeats task ids
    #[error("Ground truth contains duplicate task IDs: {}", format_id_list(.0))]
    DuplicateTruthIds(Vec<TaskId>),

    /// A ground-truth runtime cannot be used as a ratio denominator
    #[error("Ground truth for id={id} has invalid true_forward_wall_s={value}")]
    InvalidTruthRuntime {
        /// Task identifier
        id: TaskId,
        /// Offending runtime
        value: f64,
    },

    /// Manifest tasks without a ground-truth label
    #[error("Ground truth is missing labels for task IDs: {}", format_id_list(.0))]
    MissingGroundTruth(Vec<TaskId>),

    /// A setting failed validation
    #[error("Invalid setting: {0}")]
    InvalidSetting(String),
}

/// File access or parse failure
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// The file could not be read
    #[error("Failed to read {path}: {source}")]
    Read {
        /// File path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The file contents are not a valid document of the expected shape
    #[error("Failed to parse {path}: {reason}")]
    Parse {
        /// File path
        path: PathBuf,
        /// Parser message
        reason: String,
    },

    /// The file could not be written
    #[error("Failed to write {path}: {source}")]
    Write {
        /// File path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A value could not be serialized
    #[error("Failed to serialize document: {0}")]
    Serialize(String),
}

/// Crate-wide result type
pub type ChallengeResult<T> = Result<T, ChallengeError>;
