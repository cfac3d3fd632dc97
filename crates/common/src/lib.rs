//! Common utilities shared by the Circuit Fingerprint Challenge tooling.
//!
//! This crate provides foundational utilities used across the workspace:
//! - Configuration management
//! - Telemetry and structured logging
//! - Reading and writing JSON/YAML documents

pub mod config;
pub mod io;
pub mod telemetry;

// Re-export commonly used types
pub use crate::config::{EvaluatorConfig, OutputSettings, ScoringSettings, TelemetryConfig, ValidationSettings};
pub use crate::io::{read_document, read_typed, write_json_pretty, DocumentFormat};
pub use crate::telemetry::init_tracing;

/// Common error type used at the application boundary
pub type Result<T> = std::result::Result<T, anyhow::Error>;
