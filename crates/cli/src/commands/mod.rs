//! CLI commands

pub mod config;
pub mod score;
pub mod validate;

use crate::output::OutputFormat;
use circuit_fingerprint_common::EvaluatorConfig;
use circuit_fingerprint_domain::ChallengeError;

/// Context passed to all commands
pub struct CommandContext {
    pub config: EvaluatorConfig,
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context
    pub fn new(config: EvaluatorConfig, format: OutputFormat) -> Self {
        Self { config, format }
    }
}

/// Process exit status for a failed command.
///
/// Challenge errors carry their own status; anything else exits with 1.
pub fn exit_code(error: &anyhow::Error) -> i32 {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<ChallengeError>())
        .map(ChallengeError::exit_code)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use circuit_fingerprint_domain::{ConfigurationError, SubmissionError, ValidationReport};

    #[test]
    fn test_exit_code_mapping() {
        let rejected = anyhow::Error::from(ChallengeError::from(SubmissionError::Rejected(
            ValidationReport::new(),
        )));
        assert_eq!(exit_code(&rejected), 1);

        let config = anyhow::Error::from(ChallengeError::from(ConfigurationError::EmptyManifest));
        assert_eq!(exit_code(&config), 2);
    }

    #[test]
    fn test_exit_code_through_context() {
        let result: Result<(), ChallengeError> = Err(ConfigurationError::EmptyManifest.into());
        let err = result.context("Failed to score submission").unwrap_err();
        assert_eq!(exit_code(&err), 2);
    }

    #[test]
    fn test_exit_code_default() {
        assert_eq!(exit_code(&anyhow::anyhow!("boom")), 1);
    }
}
