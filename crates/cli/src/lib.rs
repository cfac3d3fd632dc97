//! Circuit Fingerprint Challenge CLI Library
//!
//! Command implementations and output formatting for the
//! `circuit-fingerprint` binary.

pub mod commands;
pub mod output;

pub use commands::{exit_code, CommandContext};
pub use output::{JsonFormatter, OutputFormat, TableFormatter};

/// Re-export common types
pub use anyhow::{Context, Result};
