//! Application layer for the Circuit Fingerprint Challenge evaluator
//!
//! This crate runs the two evaluation phases on top of the domain model.
//!
//! ## Modules
//!
//! - `validation` - Turns an untrusted submission into a normalized one
//! - `scoring` - Scores a normalized submission against ground truth
//!
//! The phases share no state. The validator's [`NormalizedSubmission`] is
//! the only thing the scorer consumes from it.
//!
//! [`NormalizedSubmission`]: circuit_fingerprint_domain::NormalizedSubmission

pub mod scoring;
pub mod validation;

// Re-export commonly used types
pub use scoring::{
    score_task, Leaderboard, ScoreOutcome, ScoringConfig, ScoringEngine, ScoringEngineBuilder,
    TaskOutcome,
};
pub use validation::{
    RawSubmission, SubmissionValidator, ValidationOutcome, ValidationSummary, ValidatorConfig,
    ValidatorExt,
};
