//! Private ground-truth labels.

use crate::errors::ConfigurationError;
use crate::ladder::ThresholdRung;
use crate::task::{duplicate_ids, TaskId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Organizer-only label for a single task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundTruthLabel {
    /// Task identifier
    pub id: TaskId,

    /// Smallest threshold rung that meets the fidelity target
    pub true_threshold_min: ThresholdRung,

    /// Measured forward wall-clock runtime at that rung, in seconds
    pub true_forward_wall_s: f64,
}

/// Ground-truth file contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroundTruth {
    /// One label per task
    pub labels: Vec<GroundTruthLabel>,
}

impl GroundTruth {
    /// Index labels by task id, preserving file order.
    pub fn index(&self) -> IndexMap<&TaskId, &GroundTruthLabel> {
        self.labels.iter().map(|l| (&l.id, l)).collect()
    }

    /// Check that ids are unique and every runtime is finite and strictly positive.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let duplicates = duplicate_ids(self.labels.iter().map(|l| &l.id));
        if !duplicates.is_empty() {
            return Err(ConfigurationError::DuplicateTruthIds(duplicates));
        }

        for label in &self.labels {
            let runtime = label.true_forward_wall_s;
            if !runtime.is_finite() || runtime <= 0.0 {
                return Err(ConfigurationError::InvalidTruthRuntime {
                    id: label.id.clone(),
                    value: runtime,
                });
            }
        }

        Ok(())
    }
}
