//! Scoring Engine - per-task scoring and aggregation
//!
//! Every manifest task gets exactly one [`TaskScore`]. A task without a
//! prediction scores zero but still counts towards the mean. A prediction
//! below the true threshold rung scores zero regardless of its runtime.

use super::leaderboard::Leaderboard;
use crate::validation::ValidatorExt;
use circuit_fingerprint_domain::ladder::{runtime_score, steps_over, threshold_score};
use circuit_fingerprint_domain::task::format_id_list;
use circuit_fingerprint_domain::{
    ConfigurationError, GroundTruth, GroundTruthLabel, NormalizedPrediction, NormalizedSubmission,
    ScoreReport, ScoreSummary, TaskId, TaskManifest, TaskScore,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, info, instrument, warn};
use validator::Validate;

/// Scoring engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ScoringConfig {
    /// Number of worst and best tasks in the leaderboard
    #[validate(range(min = 1, message = "top_k must be at least 1"))]
    pub top_k: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self { top_k: 10 }
    }
}

/// How a single task was scored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    /// No prediction for the task
    Missing,
    /// Predicted rung below the true rung
    FidelityViolation,
    /// Scored normally
    Scored {
        /// Rungs above the true rung
        steps_over: u32,
    },
}

/// Result of a scoring run
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreOutcome {
    /// Persisted report
    pub report: ScoreReport,
    /// Run statistics
    pub summary: ScoreSummary,
}

/// Score one task against its label.
pub fn score_task(
    id: &TaskId,
    prediction: Option<&NormalizedPrediction>,
    label: &GroundTruthLabel,
) -> (TaskScore, TaskOutcome) {
    let Some(prediction) = prediction else {
        return (TaskScore::zero(id.clone()), TaskOutcome::Missing);
    };

    match steps_over(prediction.predicted_threshold_min, label.true_threshold_min) {
        None => (TaskScore::zero(id.clone()), TaskOutcome::FidelityViolation),
        Some(steps) => {
            let score = TaskScore::from_components(
                id.clone(),
                threshold_score(steps),
                runtime_score(prediction.predicted_forward_wall_s, label.true_forward_wall_s),
            );
            (score, TaskOutcome::Scored { steps_over: steps })
        }
    }
}

/// The main scoring engine
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    /// Create a scoring engine, rejecting an invalid configuration
    pub fn new(config: ScoringConfig) -> Result<Self, ConfigurationError> {
        config.ensure_valid()?;
        Ok(Self { config })
    }

    /// Get the engine configuration
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score a submission against the ground truth.
    ///
    /// Fails when the manifest is empty or has duplicate ids, when the truth
    /// file is malformed, or when a manifest task has no truth label.
    #[instrument(skip_all, fields(tasks = manifest.len(), predictions = submission.len()))]
    pub fn score(
        &self,
        manifest: &TaskManifest,
        truth: &GroundTruth,
        submission: &NormalizedSubmission,
    ) -> Result<ScoreOutcome, ConfigurationError> {
        manifest.validate()?;
        truth.validate()?;

        let labels = truth.index();
        let predictions = submission.index();
        let expected = manifest.id_set();

        let unlabeled: BTreeSet<TaskId> = manifest
            .ids()
            .filter(|id| !labels.contains_key(id))
            .cloned()
            .collect();
        if !unlabeled.is_empty() {
            return Err(ConfigurationError::MissingGroundTruth(
                unlabeled.into_iter().collect(),
            ));
        }

        let extra_labels = labels.keys().filter(|id| !expected.contains(*id)).count();
        if extra_labels > 0 {
            debug!(extra_labels, "Ignoring ground truth labels outside the manifest");
        }

        let ignored = ids_outside(predictions.keys().copied(), &expected);
        if !ignored.is_empty() {
            warn!(
                ignored = %format_id_list(&ignored),
                "Ignoring predictions for ids outside the manifest"
            );
        }

        let mut summary = ScoreSummary {
            tasks: manifest.len(),
            ignored_predictions: ignored.len(),
            ..ScoreSummary::default()
        };
        let mut scores = Vec::with_capacity(manifest.len());

        for task in &manifest.tasks {
            let label = labels
                .get(&task.id)
                .ok_or_else(|| ConfigurationError::MissingGroundTruth(vec![task.id.clone()]))?;
            let (score, outcome) = score_task(&task.id, predictions.get(&task.id).copied(), label);

            match outcome {
                TaskOutcome::Missing => summary.missing_predictions += 1,
                TaskOutcome::FidelityViolation => summary.fidelity_violations += 1,
                TaskOutcome::Scored { steps_over: 0 } => summary.exact_threshold_matches += 1,
                TaskOutcome::Scored { .. } => {}
            }

            debug!(
                task_id = %task.id,
                ?outcome,
                task_score = score.task_score,
                "Scored task"
            );
            scores.push(score);
        }

        let report = ScoreReport::from_tasks(scores).ok_or(ConfigurationError::EmptyManifest)?;

        info!(
            overall_score = report.overall_score,
            missing_predictions = summary.missing_predictions,
            fidelity_violations = summary.fidelity_violations,
            "Scoring complete"
        );

        Ok(ScoreOutcome { report, summary })
    }

    /// Worst and best tasks of a report using the configured `top_k`
    pub fn leaderboard<'r>(&self, report: &'r ScoreReport) -> Leaderboard<'r> {
        Leaderboard::from_report(report, self.config.top_k)
    }
}

/// Builder for ScoringEngine
pub struct ScoringEngineBuilder {
    config: ScoringConfig,
}

impl ScoringEngineBuilder {
    /// Start from the default configuration
    pub fn new() -> Self {
        Self {
            config: ScoringConfig::default(),
        }
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: ScoringConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the leaderboard size
    pub fn top_k(mut self, top_k: usize) -> Self {
        self.config.top_k = top_k;
        self
    }

    /// Build the engine, validating the configuration
    pub fn build(self) -> Result<ScoringEngine, ConfigurationError> {
        ScoringEngine::new(self.config)
    }
}

impl Default for ScoringEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Ids present in `ids` but not in `expected`, sorted
pub fn ids_outside<'a>(
    ids: impl IntoIterator<Item = &'a TaskId>,
    expected: &HashSet<&TaskId>,
) -> Vec<TaskId> {
    ids.into_iter()
        .filter(|id| !expected.contains(id))
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use circuit_fingerprint_domain::ThresholdRung;

    fn rung(value: u32) -> ThresholdRung {
        ThresholdRung::new(value).unwrap()
    }

    fn label(id: &str, threshold: u32, runtime: f64) -> GroundTruthLabel {
        GroundTruthLabel {
            id: TaskId::from(id),
            true_threshold_min: rung(threshold),
            true_forward_wall_s: runtime,
        }
    }

    fn prediction(id: &str, threshold: u32, runtime: f64) -> NormalizedPrediction {
        NormalizedPrediction {
            id: TaskId::from(id),
            predicted_threshold_min: rung(threshold),
            predicted_forward_wall_s: runtime,
        }
    }

    #[test]
    fn test_score_task_runtime_overestimate() {
        let id = TaskId::from("A");
        let (score, outcome) = score_task(&id, Some(&prediction("A", 4, 20.0)), &label("A", 4, 10.0));

        assert_eq!(outcome, TaskOutcome::Scored { steps_over: 0 });
        assert_eq!(score.threshold_score, 1.0);
        assert_eq!(score.runtime_score, 0.5);
        assert_eq!(score.task_score, 0.5);
    }

    #[test]
    fn test_score_task_two_rungs_over() {
        let id = TaskId::from("A");
        let (score, outcome) = score_task(&id, Some(&prediction("A", 16, 10.0)), &label("A", 4, 10.0));

        assert_eq!(outcome, TaskOutcome::Scored { steps_over: 2 });
        assert_eq!(score.threshold_score, 0.25);
        assert_eq!(score.runtime_score, 1.0);
        assert_eq!(score.task_score, 0.25);
    }

    #[test]
    fn test_score_task_fidelity_gate() {
        let id = TaskId::from("A");
        let (score, outcome) = score_task(&id, Some(&prediction("A", 4, 5.0)), &label("A", 8, 5.0));

        assert_eq!(outcome, TaskOutcome::FidelityViolation);
        assert_eq!(score, TaskScore::zero(id));
    }

    #[test]
    fn test_score_task_missing() {
        let id = TaskId::from("A");
        let (score, outcome) = score_task(&id, None, &label("A", 1, 1.0));

        assert_eq!(outcome, TaskOutcome::Missing);
        assert_eq!(score.task_score, 0.0);
        assert_eq!(score.threshold_score, 0.0);
        assert_eq!(score.runtime_score, 0.0);
    }

    #[test]
    fn test_lowest_rung_exact_match() {
        let id = TaskId::from("A");
        let (score, _) = score_task(&id, Some(&prediction("A", 1, 3.0)), &label("A", 1, 3.0));
        assert_eq!(score.task_score, 1.0);
    }

    #[test]
    fn test_config_validation() {
        assert!(ScoringEngine::new(ScoringConfig { top_k: 0 }).is_err());
        assert!(ScoringEngine::new(ScoringConfig { top_k: 1 }).is_ok());
        assert!(ScoringEngine::new(ScoringConfig { top_k: 20_000 }).is_ok());
    }

    #[test]
    fn test_builder() {
        let engine = ScoringEngineBuilder::new().top_k(3).build().unwrap();
        assert_eq!(engine.config().top_k, 3);

        let err = ScoringEngineBuilder::default().top_k(0).build().unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidSetting(_)));
    }

    #[test]
    fn test_ids_outside() {
        let manifest = TaskManifest::from_ids(["A", "B"]);
        let expected = manifest.id_set();
        let ids = [TaskId::from("Z"), TaskId::from("A"), TaskId::from("C"), TaskId::from("Z")];

        let outside = ids_outside(ids.iter(), &expected);
        assert_eq!(outside, vec![TaskId::from("C"), TaskId::from("Z")]);
    }
}
