//! Submission validator and normalizer

use super::shape::RawSubmission;
use crate::scoring::ids_outside;
use circuit_fingerprint_domain::ladder::ladder_display;
use circuit_fingerprint_domain::task::{duplicate_ids, format_id_list};
use circuit_fingerprint_domain::{
    NormalizedPrediction, NormalizedSubmission, SubmissionError, TaskId, TaskManifest,
    ThresholdRung, ValidationReport, Violation, ViolationKind,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::{debug, info, instrument};

/// Prediction field holding the task id
pub const ID_FIELD: &str = "id";
/// Prediction field holding the threshold rung
pub const THRESHOLD_FIELD: &str = "predicted_threshold_min";
/// Prediction field holding the runtime in seconds
pub const RUNTIME_FIELD: &str = "predicted_forward_wall_s";

/// Validator configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Keep only the first violation
    pub fail_fast: bool,
}

/// Counts reported after a validation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSummary {
    /// Tasks in the manifest
    pub expected_tasks: usize,
    /// Records that passed every per-record check
    pub valid_predictions: usize,
    /// Distinct readable ids in the submission
    pub unique_ids: usize,
}

/// Everything a validation pass produced, accepted or not
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationOutcome {
    /// Records that passed every per-record check, in document order
    pub predictions: Vec<NormalizedPrediction>,
    /// Violations found
    pub report: ValidationReport,
    /// Counts
    pub summary: ValidationSummary,
}

impl ValidationOutcome {
    /// Whether the submission was accepted
    pub fn is_valid(&self) -> bool {
        self.report.is_valid()
    }

    /// The normalized submission, or the rejection carrying every violation.
    pub fn into_result(self) -> Result<NormalizedSubmission, SubmissionError> {
        if self.report.is_valid() {
            Ok(NormalizedSubmission::new(self.predictions))
        } else {
            Err(SubmissionError::Rejected(self.report))
        }
    }
}

/// Validates raw submissions against a task manifest.
pub struct SubmissionValidator<'m> {
    manifest: &'m TaskManifest,
    expected: HashSet<&'m TaskId>,
    config: ValidatorConfig,
}

impl<'m> SubmissionValidator<'m> {
    /// Create a validator collecting every violation
    pub fn new(manifest: &'m TaskManifest) -> Self {
        Self::with_config(manifest, ValidatorConfig::default())
    }

    /// Create a validator with explicit configuration
    pub fn with_config(manifest: &'m TaskManifest, config: ValidatorConfig) -> Self {
        Self {
            manifest,
            expected: manifest.id_set(),
            config,
        }
    }

    /// Get the validator configuration
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate and normalize a raw submission.
    pub fn validate(&self, document: &Value) -> Result<NormalizedSubmission, SubmissionError> {
        self.inspect(document).into_result()
    }

    /// Run every check and return what was found without failing.
    #[instrument(skip_all, fields(expected_tasks = self.manifest.len()))]
    pub fn inspect(&self, document: &Value) -> ValidationOutcome {
        let mut report = ValidationReport::new();
        let mut predictions = Vec::new();
        let mut seen: Vec<TaskId> = Vec::new();

        match RawSubmission::accept(document) {
            Ok(shape) => {
                let records = shape.records();
                debug!(records = records.len(), "Accepted submission shape");

                for (index, record) in records.iter().enumerate() {
                    let checked = check_record(index, record, &mut report);
                    if let Some(id) = checked.id {
                        seen.push(id);
                    }
                    if let Some(prediction) = checked.prediction {
                        predictions.push(prediction);
                    }
                }

                self.check_id_set(&seen, &mut report);
            }
            Err(violation) => report.push(violation),
        }

        let unique_ids = seen.iter().collect::<HashSet<_>>().len();
        let summary = ValidationSummary {
            expected_tasks: self.manifest.len(),
            valid_predictions: predictions.len(),
            unique_ids,
        };

        if self.config.fail_fast {
            report.truncate_to_first();
        }

        info!(
            valid_predictions = summary.valid_predictions,
            unique_ids = summary.unique_ids,
            violations = report.len(),
            "Validated submission"
        );

        ValidationOutcome {
            predictions,
            report,
            summary,
        }
    }

    fn check_id_set(&self, seen: &[TaskId], report: &mut ValidationReport) {
        let duplicates = duplicate_ids(seen);
        if !duplicates.is_empty() {
            report.push(
                Violation::new(
                    ViolationKind::DuplicateIds,
                    format!(
                        "Duplicate task IDs found in submission: {}",
                        format_id_list(&duplicates)
                    ),
                )
                .with_ids(duplicates),
            );
        }

        let submitted: HashSet<&TaskId> = seen.iter().collect();

        let missing = ids_outside(self.manifest.ids(), &submitted);
        if !missing.is_empty() {
            report.push(
                Violation::new(
                    ViolationKind::MissingIds,
                    format!("Missing predictions for task IDs: {}", format_id_list(&missing)),
                )
                .with_ids(missing),
            );
        }

        let unknown = ids_outside(seen, &self.expected);
        if !unknown.is_empty() {
            report.push(
                Violation::new(
                    ViolationKind::UnknownIds,
                    format!("Submission contains unknown task IDs: {}", format_id_list(&unknown)),
                )
                .with_ids(unknown),
            );
        }
    }
}

/// Result of checking one record
struct CheckedRecord {
    id: Option<TaskId>,
    prediction: Option<NormalizedPrediction>,
}

fn check_record(index: usize, record: &Value, report: &mut ValidationReport) -> CheckedRecord {
    let Some(fields) = record.as_object() else {
        report.push(
            Violation::new(
                ViolationKind::NotAnObject,
                format!("predictions[{}]: each prediction must be an object", index),
            )
            .at(index),
        );
        return CheckedRecord {
            id: None,
            prediction: None,
        };
    };

    let id = check_id(index, fields, report);
    let label = match &id {
        Some(id) => format!("id={}", id),
        None => format!("predictions[{}]", index),
    };

    let threshold = match fields.get(THRESHOLD_FIELD) {
        Some(raw) => check_threshold(index, &id, &label, raw, report),
        None => {
            report.push(missing_field(index, &id, THRESHOLD_FIELD, &label));
            None
        }
    };

    let runtime = match fields.get(RUNTIME_FIELD) {
        Some(raw) => check_runtime(index, &id, &label, raw, report),
        None => {
            report.push(missing_field(index, &id, RUNTIME_FIELD, &label));
            None
        }
    };

    let prediction = match (&id, threshold, runtime) {
        (Some(id), Some(rung), Some(runtime)) => Some(NormalizedPrediction {
            id: id.clone(),
            predicted_threshold_min: rung,
            predicted_forward_wall_s: runtime,
        }),
        _ => None,
    };

    CheckedRecord { id, prediction }
}

fn check_id(index: usize, fields: &Map<String, Value>, report: &mut ValidationReport) -> Option<TaskId> {
    let Some(raw) = fields.get(ID_FIELD) else {
        report.push(
            Violation::new(
                ViolationKind::MissingField,
                format!("predictions[{}]: each prediction must include 'id'", index),
            )
            .at(index)
            .field(ID_FIELD),
        );
        return None;
    };

    let id = TaskId::from_value(raw);
    if id.is_none() {
        report.push(
            Violation::new(
                ViolationKind::WrongType,
                format!(
                    "predictions[{}]: 'id' must be a string or integer (got {})",
                    index, raw
                ),
            )
            .at(index)
            .field(ID_FIELD),
        );
    }
    id
}

fn check_threshold(
    index: usize,
    id: &Option<TaskId>,
    label: &str,
    raw: &Value,
    report: &mut ValidationReport,
) -> Option<ThresholdRung> {
    let number = match raw {
        Value::Number(n) if n.is_i64() || n.is_u64() => n,
        _ => {
            report.push(
                Violation::new(
                    ViolationKind::WrongType,
                    format!("{} must be int for {} (got {})", THRESHOLD_FIELD, label, raw),
                )
                .at(index)
                .for_id(id.clone())
                .field(THRESHOLD_FIELD),
            );
            return None;
        }
    };

    let rung = number
        .as_u64()
        .and_then(|v| u32::try_from(v).ok())
        .and_then(ThresholdRung::new);

    if rung.is_none() {
        report.push(
            Violation::new(
                ViolationKind::OffLadder,
                format!(
                    "{}: {}={} is not one of {}",
                    label,
                    THRESHOLD_FIELD,
                    number,
                    ladder_display()
                ),
            )
            .at(index)
            .for_id(id.clone())
            .field(THRESHOLD_FIELD),
        );
    }
    rung
}

fn check_runtime(
    index: usize,
    id: &Option<TaskId>,
    label: &str,
    raw: &Value,
    report: &mut ValidationReport,
) -> Option<f64> {
    let (kind, value) = match raw {
        // Overflowing literals keep their text and read back as infinite.
        Value::Number(n) => match n.to_string().parse::<f64>() {
            Ok(v) if v.is_finite() && v > 0.0 => return Some(v),
            value => (ViolationKind::InvalidRuntime, value.ok()),
        },
        _ => (ViolationKind::WrongType, None),
    };

    let shown = match value {
        Some(v) if !v.is_finite() => v.to_string(),
        _ => raw.to_string(),
    };

    debug!(index, ?value, "Rejected runtime");
    report.push(
        Violation::new(
            kind,
            format!(
                "{}: {} must be a finite positive number (got {})",
                label, RUNTIME_FIELD, shown
            ),
        )
        .at(index)
        .for_id(id.clone())
        .field(RUNTIME_FIELD),
    );
    None
}

fn missing_field(index: usize, id: &Option<TaskId>, field: &str, label: &str) -> Violation {
    Violation::new(
        ViolationKind::MissingField,
        format!("Missing {} for {}", field, label),
    )
    .at(index)
    .for_id(id.clone())
    .field(field)
}
