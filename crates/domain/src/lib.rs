//! Circuit Fingerprint Challenge Domain Types
//!
//! This crate provides the core domain model for evaluating challenge submissions.
//! Contestants predict, for each quantum-circuit task, the smallest acceptable
//! threshold rung and the forward wall-clock runtime at that rung. The types here
//! describe the public task manifest, the private ground truth, normalized
//! predictions and the resulting score report.
//!
//! ## Architecture
//!
//! The domain layer is organized into the following modules:
//!
//! - **ladder**: The fixed threshold rung ladder and the pure scoring formulas
//! - **task**: Task identifiers and the public task manifest
//! - **truth**: Private ground-truth labels
//! - **prediction**: Normalized predictions and submissions
//! - **score**: Per-task scores, the score report and ranking helpers
//! - **validation**: Violation records collected while checking a submission
//! - **errors**: Error taxonomy with error codes and process exit codes
//!
//! ## Usage
//!
//! ```rust
//! use circuit_fingerprint_domain::ladder::{self, ThresholdRung};
//!
//! let truth = ThresholdRung::new(4).unwrap();
//! let predicted = ThresholdRung::new(16).unwrap();
//!
//! assert_eq!(ladder::steps_over(predicted, truth), Some(2));
//! assert_eq!(ladder::threshold_score(2), 0.25);
//! assert_eq!(ladder::runtime_score(20.0, 10.0), 0.5);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod ladder;
pub mod prediction;
pub mod score;
pub mod task;
pub mod truth;
pub mod validation;

// Re-export commonly used types
pub use errors::{
    ChallengeError, ChallengeResult, ConfigurationError, DocumentError, SubmissionError,
};
pub use ladder::{ThresholdRung, THRESHOLD_RUNGS};
pub use prediction::{NormalizedPrediction, NormalizedSubmission};
pub use score::{ScoreReport, ScoreSummary, TaskScore};
pub use task::{Task, TaskId, TaskManifest};
pub use truth::{GroundTruth, GroundTruthLabel};
pub use validation::{ValidationReport, Violation, ViolationKind};
