//! Testing utilities for the Circuit Fingerprint Challenge evaluator
//!
//! This crate provides:
//! - Fixtures for manifests, ground truth and submissions
//! - Builders for raw and normalized submissions
//! - Proptest strategies for rungs and runtimes
//!
//! # Examples
//!
//! ```
//! use circuit_fingerprint_testing::{builders::*, fixtures::*};
//!
//! let manifest = create_test_manifest();
//!
//! let raw = SubmissionBuilder::new()
//!     .predict("A", 4, 1.5)
//!     .predict("B", 8, 2.0)
//!     .predict("C", 1, 0.25)
//!     .keyed()
//!     .build_raw();
//!
//! assert_eq!(manifest.len(), 3);
//! assert_eq!(raw["predictions"].as_array().map(Vec::len), Some(3));
//! ```

pub mod builders;
pub mod fixtures;
pub mod strategies;

// Re-export commonly used types
pub use builders::*;
pub use fixtures::*;

// Re-export testing dependencies for convenience
pub use fake;
pub use proptest;
