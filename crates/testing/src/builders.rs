//! Fluent builders for submissions and ground truth.

use circuit_fingerprint_domain::{GroundTruth, GroundTruthLabel, NormalizedSubmission, TaskId};
use serde_json::{json, Value};

use crate::fixtures::{create_raw_prediction, create_test_label, create_test_prediction};

/// Builder for raw (untrusted) and normalized submissions
#[derive(Clone, Default)]
pub struct SubmissionBuilder {
    records: Vec<Value>,
    keyed: bool,
}

impl SubmissionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a well-formed prediction
    pub fn predict(mut self, id: &str, threshold: u32, runtime: f64) -> Self {
        self.records
            .push(create_raw_prediction(id, json!(threshold), json!(runtime)));
        self
    }

    /// Add an arbitrary record, well-formed or not
    pub fn record(mut self, record: Value) -> Self {
        self.records.push(record);
        self
    }

    /// Wrap the records in `{"predictions": [...]}`
    pub fn keyed(mut self) -> Self {
        self.keyed = true;
        self
    }

    pub fn build_raw(self) -> Value {
        let records = Value::Array(self.records);
        if self.keyed {
            json!({ "predictions": records })
        } else {
            records
        }
    }

    /// Build a normalized submission directly, bypassing validation.
    ///
    /// Panics if a record added with [`record`](Self::record) is malformed.
    pub fn build_normalized(self) -> NormalizedSubmission {
        let predictions = self
            .records
            .iter()
            .map(|record| {
                let id = TaskId::from_value(&record["id"]).expect("record id");
                let threshold = record["predicted_threshold_min"].as_u64().expect("record threshold");
                let runtime = record["predicted_forward_wall_s"].as_f64().expect("record runtime");
                create_test_prediction(id, threshold as u32, runtime)
            })
            .collect();
        NormalizedSubmission::new(predictions)
    }
}

/// Builder for ground truth
#[derive(Clone, Default)]
pub struct GroundTruthBuilder {
    labels: Vec<GroundTruthLabel>,
}

impl GroundTruthBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, id: &str, threshold: u32, runtime: f64) -> Self {
        self.labels.push(create_test_label(id, threshold, runtime));
        self
    }

    pub fn build(self) -> GroundTruth {
        GroundTruth {
            labels: self.labels,
        }
    }
}
