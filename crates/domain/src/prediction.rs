//! Normalized predictions.
//!
//! A [`NormalizedSubmission`] is only ever produced by the submission validator
//! (or read back from a file it wrote), so every prediction in it carries a
//! ladder threshold and a finite, strictly positive runtime.

use crate::ladder::ThresholdRung;
use crate::task::TaskId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Validated prediction for a single task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPrediction {
    /// Task identifier
    pub id: TaskId,

    /// Predicted smallest sufficient threshold rung
    pub predicted_threshold_min: ThresholdRung,

    /// Predicted forward wall-clock runtime in seconds
    pub predicted_forward_wall_s: f64,
}

/// Canonical submission: predictions sorted ascending by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSubmission {
    /// Predictions in ascending id order
    pub predictions: Vec<NormalizedPrediction>,
}

impl NormalizedSubmission {
    /// Build a submission, sorting predictions by id.
    pub fn new(mut predictions: Vec<NormalizedPrediction>) -> Self {
        predictions.sort_by(|a, b| a.id.cmp(&b.id));
        Self { predictions }
    }

    /// Index predictions by id. A repeated id keeps the last occurrence.
    pub fn index(&self) -> IndexMap<&TaskId, &NormalizedPrediction> {
        self.predictions.iter().map(|p| (&p.id, p)).collect()
    }

    /// Number of predictions
    pub fn len(&self) -> usize {
        self.predictions.len()
    }

    /// Whether the submission is empty
    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }
}
