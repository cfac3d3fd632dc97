//! Submission validation
//!
//! Validation collects every violation it finds instead of stopping at the
//! first one. [`ValidatorConfig::fail_fast`] keeps only the first.

mod shape;
mod submission;

pub use shape::*;
pub use submission::*;

use circuit_fingerprint_domain::ConfigurationError;
use validator::Validate;

/// Bridge from `validator` derive rules to the domain's configuration errors
pub trait ValidatorExt {
    /// Run the derived rules, folding every failure into one error
    fn ensure_valid(&self) -> Result<(), ConfigurationError>;
}

impl<T: Validate> ValidatorExt for T {
    fn ensure_valid(&self) -> Result<(), ConfigurationError> {
        match self.validate() {
            Ok(_) => Ok(()),
            Err(errors) => {
                let mut messages = Vec::new();

                for (field, field_errors) in errors.field_errors() {
                    for error in field_errors {
                        let message = error
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("{} is invalid ({})", field, error.code));
                        messages.push(message);
                    }
                }

                messages.sort();
                Err(ConfigurationError::InvalidSetting(messages.join("; ")))
            }
        }
    }
}
