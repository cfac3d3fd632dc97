//! `validate` command

use anyhow::Result;
use circuit_fingerprint_application::{
    SubmissionValidator, ValidationOutcome, ValidationSummary, ValidatorConfig,
};
use circuit_fingerprint_common::{read_document, read_typed, write_json_pretty};
use circuit_fingerprint_domain::{ChallengeError, NormalizedSubmission, TaskManifest, Violation};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use crate::commands::CommandContext;
use crate::output::{colors, validation_plain, wrote_line, JsonFormatter, OutputFormat, TableFormatter};

/// Arguments of the `validate` command
#[derive(Debug, Clone)]
pub struct ValidateArgs {
    pub public: PathBuf,
    pub submission: PathBuf,
    pub write_normalized: Option<PathBuf>,
    pub fail_fast: bool,
}

#[derive(Serialize)]
struct ValidationView<'a> {
    accepted: bool,
    summary: &'a ValidationSummary,
    violations: &'a [Violation],
}

/// Validate a raw submission, optionally writing its normalized form.
pub async fn run(ctx: &CommandContext, args: ValidateArgs) -> Result<NormalizedSubmission> {
    let manifest: TaskManifest = read_typed(&args.public).await.map_err(ChallengeError::from)?;
    manifest.validate().map_err(ChallengeError::from)?;

    let raw = read_document(&args.submission)
        .await
        .map_err(ChallengeError::from)?;

    let config = ValidatorConfig {
        fail_fast: args.fail_fast || ctx.config.validation.fail_fast,
    };
    let outcome = SubmissionValidator::with_config(&manifest, config).inspect(&raw);
    render(ctx.format, &outcome)?;

    let normalized = outcome.into_result().map_err(ChallengeError::from)?;

    if let Some(path) = &args.write_normalized {
        write_json_pretty(path, &normalized)
            .await
            .map_err(ChallengeError::from)?;
        info!(path = %path.display(), "Wrote normalized submission");
        if ctx.format != OutputFormat::Json {
            println!("{}", wrote_line("normalized", path));
        }
    }

    Ok(normalized)
}

fn render(format: OutputFormat, outcome: &ValidationOutcome) -> Result<()> {
    match format {
        OutputFormat::Plain => println!("{}", validation_plain(&outcome.summary)),
        OutputFormat::Json => {
            let view = ValidationView {
                accepted: outcome.is_valid(),
                summary: &outcome.summary,
                violations: &outcome.report.violations,
            };
            println!("{}", JsonFormatter::format(&view)?);
        }
        OutputFormat::Table => {
            let summary = &outcome.summary;
            println!(
                "{}",
                TableFormatter::key_value(vec![
                    ("Expected tasks", summary.expected_tasks.to_string()),
                    ("Valid predictions parsed", summary.valid_predictions.to_string()),
                    ("Unique ids in submission", summary.unique_ids.to_string()),
                ])?
            );

            if outcome.is_valid() {
                println!("{}", colors::success("Submission accepted"));
            } else {
                println!("{}", TableFormatter::violations(&outcome.report)?);
                println!(
                    "{}",
                    colors::error(&format!("{} violation(s) found", outcome.report.len()))
                );
            }
        }
    }
    Ok(())
}
