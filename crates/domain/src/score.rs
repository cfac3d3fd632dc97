//! Score report types.

use crate::task::TaskId;
use serde::{Deserialize, Serialize};

/// Score breakdown for a single task.
///
/// `task_score` is the product of the two components. A task that is missing
/// a prediction or violates the fidelity gate scores zero on every field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskScore {
    /// Task identifier
    pub id: TaskId,
    /// `threshold_score * runtime_score`
    pub task_score: f64,
    /// `2^-steps_over`
    pub threshold_score: f64,
    /// `min(r, 1/r)` for the predicted/true runtime ratio
    pub runtime_score: f64,
}

impl TaskScore {
    /// A zero-credit score
    pub fn zero(id: TaskId) -> Self {
        Self {
            id,
            task_score: 0.0,
            threshold_score: 0.0,
            runtime_score: 0.0,
        }
    }

    /// Build a score from its two components
    pub fn from_components(id: TaskId, threshold_score: f64, runtime_score: f64) -> Self {
        Self {
            id,
            task_score: threshold_score * runtime_score,
            threshold_score,
            runtime_score,
        }
    }
}

/// Persisted score report: the overall mean plus every task in manifest order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Mean task score over all manifest tasks
    pub overall_score: f64,
    /// Per-task breakdown in manifest order
    pub tasks: Vec<TaskScore>,
}

impl ScoreReport {
    /// Build a report, computing the overall score as the arithmetic mean.
    ///
    /// Returns `None` for an empty task list, where the mean is undefined.
    pub fn from_tasks(tasks: Vec<TaskScore>) -> Option<Self> {
        if tasks.is_empty() {
            return None;
        }
        let overall_score = tasks.iter().map(|t| t.task_score).sum::<f64>() / tasks.len() as f64;
        Some(Self {
            overall_score,
            tasks,
        })
    }

    /// Tasks ordered by ascending task score.
    ///
    /// The sort is stable, so ties keep manifest order.
    pub fn ranked(&self) -> Vec<&TaskScore> {
        let mut ranked: Vec<&TaskScore> = self.tasks.iter().collect();
        ranked.sort_by(|a, b| a.task_score.total_cmp(&b.task_score));
        ranked
    }

    /// The `k` lowest-scoring tasks, lowest first.
    pub fn worst(&self, k: usize) -> Vec<&TaskScore> {
        self.ranked().into_iter().take(k).collect()
    }

    /// The `k` highest-scoring tasks, in ascending order (highest last).
    pub fn best(&self, k: usize) -> Vec<&TaskScore> {
        let ranked = self.ranked();
        let start = ranked.len().saturating_sub(k);
        ranked[start..].to_vec()
    }
}

/// Run statistics printed alongside a report but not persisted with it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSummary {
    /// Number of manifest tasks scored
    pub tasks: usize,
    /// Manifest tasks without a prediction
    pub missing_predictions: usize,
    /// Predictions below the true threshold
    pub fidelity_violations: usize,
    /// Predictions on exactly the true threshold
    pub exact_threshold_matches: usize,
    /// Predictions for ids outside the manifest
    pub ignored_predictions: usize,
}
