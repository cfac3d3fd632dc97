//! `score` command

use anyhow::Result;
use circuit_fingerprint_application::{Leaderboard, ScoreOutcome, ScoringConfig, ScoringEngine};
use circuit_fingerprint_common::{read_typed, write_json_pretty};
use circuit_fingerprint_domain::{
    ChallengeError, GroundTruth, NormalizedSubmission, ScoreSummary, TaskManifest, TaskScore,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::commands::CommandContext;
use crate::output::{colors, score_plain, wrote_line, JsonFormatter, OutputFormat, TableFormatter};

/// Arguments of the `score` command
#[derive(Debug, Clone)]
pub struct ScoreArgs {
    pub truth: PathBuf,
    pub public: PathBuf,
    pub submission: PathBuf,
    pub out: PathBuf,
    pub top_k: Option<usize>,
}

#[derive(Serialize)]
struct ScoreView<'a> {
    overall_score: f64,
    summary: &'a ScoreSummary,
    worst: &'a [&'a TaskScore],
    best: &'a [&'a TaskScore],
    report: &'a Path,
}

/// Score a normalized submission and write the report.
pub async fn run(ctx: &CommandContext, args: ScoreArgs) -> Result<ScoreOutcome> {
    let truth: GroundTruth = read_typed(&args.truth).await.map_err(ChallengeError::from)?;
    let manifest: TaskManifest = read_typed(&args.public).await.map_err(ChallengeError::from)?;
    let submission: NormalizedSubmission = read_typed(&args.submission)
        .await
        .map_err(ChallengeError::from)?;

    let engine = ScoringEngine::new(ScoringConfig {
        top_k: args.top_k.unwrap_or(ctx.config.scoring.top_k),
    })
    .map_err(ChallengeError::from)?;

    let outcome = engine
        .score(&manifest, &truth, &submission)
        .map_err(ChallengeError::from)?;

    write_json_pretty(&args.out, &outcome.report)
        .await
        .map_err(ChallengeError::from)?;
    info!(path = %args.out.display(), "Wrote score report");

    let board = engine.leaderboard(&outcome.report);
    render(ctx.format, &outcome, &board, engine.config().top_k, &args.out)?;

    Ok(outcome)
}

fn render(
    format: OutputFormat,
    outcome: &ScoreOutcome,
    board: &Leaderboard<'_>,
    top_k: usize,
    out: &Path,
) -> Result<()> {
    let ScoreOutcome { report, summary } = outcome;

    match format {
        OutputFormat::Plain => {
            println!("{}", score_plain(summary, report, board, top_k));
            println!("{}", wrote_line("report", out));
        }
        OutputFormat::Json => {
            let view = ScoreView {
                overall_score: report.overall_score,
                summary,
                worst: &board.worst,
                best: &board.best,
                report: out,
            };
            println!("{}", JsonFormatter::format(&view)?);
        }
        OutputFormat::Table => {
            println!(
                "{}",
                TableFormatter::key_value(vec![
                    ("Tasks", summary.tasks.to_string()),
                    ("Missing predictions", summary.missing_predictions.to_string()),
                    ("Fidelity violations", summary.fidelity_violations.to_string()),
                    ("Exact threshold matches", summary.exact_threshold_matches.to_string()),
                    ("Ignored predictions", summary.ignored_predictions.to_string()),
                    ("Overall score", format!("{:.6}", report.overall_score)),
                ])?
            );
            println!("\n{}", colors::bold(&format!("Worst {}:", top_k)));
            println!("{}", TableFormatter::task_scores(&board.worst)?);
            println!("\n{}", colors::bold(&format!("Best {}:", top_k)));
            println!("{}", TableFormatter::task_scores(&board.best)?);
            println!("{}", wrote_line("report", out));
        }
    }
    Ok(())
}
