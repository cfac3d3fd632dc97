//! Test fixtures for manifests, ground truth and submissions.
//!
//! The fixed fixtures use tasks `A`, `B` and `C`. The `random_*` helpers use
//! `fake` to produce larger inputs with realistic-looking circuit names.

use circuit_fingerprint_domain::{
    GroundTruth, GroundTruthLabel, NormalizedPrediction, NormalizedSubmission, TaskId,
    TaskManifest, ThresholdRung, THRESHOLD_RUNGS,
};
use fake::{faker::lorem::en::Word, Fake};
use serde_json::{json, Value};

/// Manifest with tasks `A`, `B`, `C`
pub fn create_test_manifest() -> TaskManifest {
    TaskManifest::from_ids(["A", "B", "C"])
}

/// Ground truth for [`create_test_manifest`]
pub fn create_test_truth() -> GroundTruth {
    GroundTruth {
        labels: vec![
            create_test_label("A", 4, 10.0),
            create_test_label("B", 8, 5.0),
            create_test_label("C", 1, 2.0),
        ],
    }
}

/// A single ground-truth label. Panics if `threshold` is off the ladder.
pub fn create_test_label(id: impl Into<TaskId>, threshold: u32, runtime: f64) -> GroundTruthLabel {
    GroundTruthLabel {
        id: id.into(),
        true_threshold_min: rung(threshold),
        true_forward_wall_s: runtime,
    }
}

/// A single normalized prediction. Panics if `threshold` is off the ladder.
pub fn create_test_prediction(id: impl Into<TaskId>, threshold: u32, runtime: f64) -> NormalizedPrediction {
    NormalizedPrediction {
        id: id.into(),
        predicted_threshold_min: rung(threshold),
        predicted_forward_wall_s: runtime,
    }
}

/// Normalized submission that exactly matches [`create_test_truth`]
pub fn create_perfect_submission() -> NormalizedSubmission {
    NormalizedSubmission::new(
        create_test_truth()
            .labels
            .iter()
            .map(|label| NormalizedPrediction {
                id: label.id.clone(),
                predicted_threshold_min: label.true_threshold_min,
                predicted_forward_wall_s: label.true_forward_wall_s,
            })
            .collect(),
    )
}

/// A raw prediction record with arbitrary JSON field values
pub fn create_raw_prediction(id: impl Into<Value>, threshold: Value, runtime: Value) -> Value {
    json!({
        "id": id.into(),
        "predicted_threshold_min": threshold,
        "predicted_forward_wall_s": runtime,
    })
}

/// Ladder rung from a raw value. Panics if the value is off the ladder.
pub fn rung(value: u32) -> ThresholdRung {
    ThresholdRung::new(value).unwrap_or_else(|| panic!("{} is not a ladder rung", value))
}

/// `count` distinct string task ids
pub fn random_task_ids(count: usize) -> Vec<TaskId> {
    (0..count)
        .map(|i| {
            let family: String = Word().fake();
            TaskId::from(format!("{}_{:04}", family, i))
        })
        .collect()
}

/// Manifest with `count` random task ids
pub fn random_manifest(count: usize) -> TaskManifest {
    TaskManifest::from_ids(random_task_ids(count))
}

/// Ground truth with a random rung and runtime for every manifest task
pub fn random_truth(manifest: &TaskManifest) -> GroundTruth {
    GroundTruth {
        labels: manifest
            .ids()
            .map(|id| GroundTruthLabel {
                id: id.clone(),
                true_threshold_min: random_rung(),
                true_forward_wall_s: (0.01..600.0).fake(),
            })
            .collect(),
    }
}

/// A uniformly random ladder rung
pub fn random_rung() -> ThresholdRung {
    let index: usize = (0..THRESHOLD_RUNGS.len()).fake();
    rung(THRESHOLD_RUNGS[index])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_truth_covers_manifest() {
        let manifest = create_test_manifest();
        let truth = create_test_truth();
        assert!(truth.validate().is_ok());

        let labels = truth.index();
        assert!(manifest.ids().all(|id| labels.contains_key(id)));
    }

    #[test]
    fn test_random_ids_are_unique() {
        let manifest = random_manifest(50);
        assert!(manifest.validate().is_ok());
        assert_eq!(manifest.len(), 50);
    }

    #[test]
    fn test_random_truth_is_valid() {
        let manifest = random_manifest(20);
        let truth = random_truth(&manifest);
        assert_eq!(truth.labels.len(), 20);
        assert!(truth.validate().is_ok());
    }
}
