//! Worst and best tasks of a score report

use circuit_fingerprint_domain::{ScoreReport, TaskScore};
use serde::Serialize;

/// The lowest- and highest-scoring tasks of a report.
///
/// Both lists are in ascending score order; ties keep manifest order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leaderboard<'r> {
    /// Up to `k` lowest-scoring tasks
    pub worst: Vec<&'r TaskScore>,
    /// Up to `k` highest-scoring tasks
    pub best: Vec<&'r TaskScore>,
}

impl<'r> Leaderboard<'r> {
    /// Build a leaderboard with `k` entries on each side
    pub fn from_report(report: &'r ScoreReport, k: usize) -> Self {
        Self {
            worst: report.worst(k),
            best: report.best(k),
        }
    }
}
