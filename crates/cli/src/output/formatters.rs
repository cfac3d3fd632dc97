//! Output formatters

use anyhow::Result;
use circuit_fingerprint_application::{Leaderboard, ValidationSummary};
use circuit_fingerprint_domain::{ScoreReport, ScoreSummary, TaskScore};
use serde::Serialize;
use std::fmt::Write;
use std::path::Path;

/// JSON formatter
pub struct JsonFormatter;

impl JsonFormatter {
    /// Format a value as pretty JSON
    pub fn format<T: Serialize>(value: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }
}

/// One leaderboard line: `  {id}: task=... thr=... time=...`
pub fn task_line(task: &TaskScore) -> String {
    format!(
        "  {}: task={:.4} thr={:.4} time={:.4}",
        task.id, task.task_score, task.threshold_score, task.runtime_score
    )
}

/// Plain validation summary
pub fn validation_plain(summary: &ValidationSummary) -> String {
    format!(
        "Expected tasks: {}\nValid predictions parsed: {}\nUnique ids in submission: {}",
        summary.expected_tasks, summary.valid_predictions, summary.unique_ids
    )
}

/// Plain scoring summary followed by the worst and best tasks
pub fn score_plain(
    summary: &ScoreSummary,
    report: &ScoreReport,
    board: &Leaderboard<'_>,
    top_k: usize,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Tasks: {}", summary.tasks);
    let _ = writeln!(out, "Missing predictions: {}", summary.missing_predictions);
    let _ = writeln!(out, "Overall score: {:.6}", report.overall_score);

    let _ = writeln!(out, "\nWorst {}:", top_k);
    for task in &board.worst {
        let _ = writeln!(out, "{}", task_line(task));
    }

    let _ = writeln!(out, "\nBest {}:", top_k);
    for task in &board.best {
        let _ = writeln!(out, "{}", task_line(task));
    }

    out.trim_end().to_string()
}

/// Trailer printed after a file is written
pub fn wrote_line(label: &str, path: &Path) -> String {
    format!("\nWrote {}: {}", label, path.display())
}
