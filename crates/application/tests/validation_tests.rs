//! Tests for submission validation and normalization
//!
//! Each violation category is exercised on its own, then in combination.

use circuit_fingerprint_application::{SubmissionValidator, ValidatorConfig};
use circuit_fingerprint_domain::{SubmissionError, TaskId, TaskManifest, ViolationKind};
use circuit_fingerprint_testing::fixtures::*;
use circuit_fingerprint_testing::SubmissionBuilder;
use serde_json::{json, Value};

fn complete_submission() -> SubmissionBuilder {
    SubmissionBuilder::new()
        .predict("A", 4, 10.0)
        .predict("B", 8, 5.0)
        .predict("C", 1, 2.0)
}

fn rejection(manifest: &TaskManifest, document: &Value) -> Vec<ViolationKind> {
    match SubmissionValidator::new(manifest).validate(document) {
        Err(SubmissionError::Rejected(report)) => report.violations.iter().map(|v| v.kind).collect(),
        Ok(_) => panic!("submission unexpectedly accepted"),
    }
}

// ============================================================================
// Accepted submissions
// ============================================================================

#[test]
fn test_complete_submission_accepted() {
    let manifest = create_test_manifest();
    let normalized = SubmissionValidator::new(&manifest)
        .validate(&complete_submission().build_raw())
        .unwrap();

    assert_eq!(normalized.len(), 3);
}

#[test]
fn test_integer_runtime_coerced_to_real() {
    let manifest = TaskManifest::from_ids(["A"]);
    let doc = json!([create_raw_prediction("A", json!(4), json!(7))]);
    let normalized = SubmissionValidator::new(&manifest).validate(&doc).unwrap();

    let rendered = serde_json::to_value(&normalized).unwrap();
    assert_eq!(rendered["predictions"][0]["predicted_forward_wall_s"], json!(7.0));
    assert_eq!(rendered["predictions"][0]["predicted_threshold_min"], json!(4));
}

#[test]
fn test_integer_ids_supported() {
    let manifest = TaskManifest::from_ids([TaskId::Int(2), TaskId::Int(10)]);
    let doc = json!([
        create_raw_prediction(10, json!(2), json!(1.0)),
        create_raw_prediction(2, json!(2), json!(1.0)),
    ]);
    let normalized = SubmissionValidator::new(&manifest).validate(&doc).unwrap();

    assert_eq!(normalized.predictions[0].id, TaskId::Int(2));
    assert_eq!(normalized.predictions[1].id, TaskId::Int(10));
}

#[test]
fn test_validation_is_idempotent() {
    let manifest = create_test_manifest();
    let validator = SubmissionValidator::new(&manifest);

    let first = validator.validate(&complete_submission().keyed().build_raw()).unwrap();
    let reread = serde_json::to_value(&first).unwrap();
    let second = validator.validate(&reread).unwrap();

    assert_eq!(first, second);
}

// ============================================================================
// Structural violations
// ============================================================================

#[test]
fn test_invalid_shape() {
    let manifest = create_test_manifest();
    assert_eq!(rejection(&manifest, &json!({"rows": []})), vec![ViolationKind::InvalidShape]);
    assert_eq!(
        rejection(&manifest, &json!({"predictions": "A"})),
        vec![ViolationKind::InvalidShape]
    );
}

#[test]
fn test_record_not_an_object() {
    let manifest = create_test_manifest();
    let doc = complete_submission().record(json!(["A", 4, 1.0])).build_raw();

    assert_eq!(rejection(&manifest, &doc), vec![ViolationKind::NotAnObject]);
}

#[test]
fn test_missing_id() {
    let manifest = create_test_manifest();
    let doc = complete_submission()
        .record(json!({"predicted_threshold_min": 4, "predicted_forward_wall_s": 1.0}))
        .build_raw();

    assert_eq!(rejection(&manifest, &doc), vec![ViolationKind::MissingField]);
}

#[test]
fn test_missing_threshold_and_runtime() {
    let manifest = TaskManifest::from_ids(["A"]);
    let outcome = SubmissionValidator::new(&manifest).inspect(&json!([{"id": "A"}]));

    let fields: Vec<&str> = outcome
        .report
        .violations
        .iter()
        .filter_map(|v| v.field.as_deref())
        .collect();
    assert_eq!(fields, vec!["predicted_threshold_min", "predicted_forward_wall_s"]);
    assert_eq!(
        outcome.report.violations[0].message,
        "Missing predicted_threshold_min for id=A"
    );
}

// ============================================================================
// Domain violations
// ============================================================================

#[test]
fn test_threshold_off_ladder_names_id_and_value() {
    let manifest = TaskManifest::from_ids(["A"]);
    let doc = json!([create_raw_prediction("A", json!(3), json!(1.0))]);
    let outcome = SubmissionValidator::new(&manifest).inspect(&doc);

    let violation = outcome.report.find(ViolationKind::OffLadder).unwrap();
    assert_eq!(violation.id, Some(TaskId::from("A")));
    assert_eq!(
        violation.message,
        "id=A: predicted_threshold_min=3 is not one of [1, 2, 4, 8, 16, 32, 64, 128, 256]"
    );
}

#[test]
fn test_threshold_wrong_types() {
    let manifest = TaskManifest::from_ids(["A"]);

    for threshold in [json!("4"), json!(true), json!(null), json!([4])] {
        let doc = json!([create_raw_prediction("A", threshold.clone(), json!(1.0))]);
        assert_eq!(
            rejection(&manifest, &doc),
            vec![ViolationKind::WrongType],
            "threshold {}",
            threshold
        );
    }
}

#[test]
fn test_negative_threshold_is_off_ladder() {
    let manifest = TaskManifest::from_ids(["A"]);
    let doc = json!([create_raw_prediction("A", json!(-4), json!(1.0))]);
    assert_eq!(rejection(&manifest, &doc), vec![ViolationKind::OffLadder]);
}

#[test]
fn test_float_threshold_is_wrong_type() {
    let manifest = TaskManifest::from_ids(["A"]);
    let doc = json!([create_raw_prediction("A", json!(4.0), json!(1.0))]);
    assert_eq!(rejection(&manifest, &doc), vec![ViolationKind::WrongType]);
}

#[test]
fn test_runtime_must_be_positive() {
    let manifest = TaskManifest::from_ids(["A"]);

    for runtime in [json!(0), json!(0.0), json!(-2.5)] {
        let doc = json!([create_raw_prediction("A", json!(4), runtime)]);
        assert_eq!(rejection(&manifest, &doc), vec![ViolationKind::InvalidRuntime]);
    }
}

#[test]
fn test_runtime_must_be_numeric() {
    let manifest = TaskManifest::from_ids(["A"]);

    for runtime in [json!("1.0"), json!(null), json!(false), json!([1.0])] {
        let doc = json!([create_raw_prediction("A", json!(4), runtime)]);
        assert_eq!(rejection(&manifest, &doc), vec![ViolationKind::WrongType]);
    }
}

// ============================================================================
// Set-membership violations
// ============================================================================

#[test]
fn test_duplicate_ids() {
    let manifest = create_test_manifest();
    let doc = complete_submission().predict("B", 16, 5.0).build_raw();
    let outcome = SubmissionValidator::new(&manifest).inspect(&doc);

    let violation = outcome.report.find(ViolationKind::DuplicateIds).unwrap();
    assert_eq!(violation.ids, vec![TaskId::from("B")]);
    assert_eq!(outcome.report.len(), 1);
}

#[test]
fn test_missing_and_unknown_reported_together() {
    let manifest = create_test_manifest();
    let doc = SubmissionBuilder::new()
        .predict("A", 4, 1.0)
        .predict("B", 4, 1.0)
        .predict("D", 4, 1.0)
        .build_raw();
    let outcome = SubmissionValidator::new(&manifest).inspect(&doc);

    let missing = outcome.report.find(ViolationKind::MissingIds).unwrap();
    assert_eq!(missing.ids, vec![TaskId::from("C")]);
    assert_eq!(missing.message, "Missing predictions for task IDs: [C]");

    let unknown = outcome.report.find(ViolationKind::UnknownIds).unwrap();
    assert_eq!(unknown.ids, vec![TaskId::from("D")]);
    assert_eq!(unknown.message, "Submission contains unknown task IDs: [D]");
}

#[test]
fn test_missing_ids_sorted() {
    let manifest = TaskManifest::from_ids(["Z", "M", "A"]);
    let outcome = SubmissionValidator::new(&manifest).inspect(&json!([]));

    let missing = outcome.report.find(ViolationKind::MissingIds).unwrap();
    assert_eq!(
        missing.ids,
        vec![TaskId::from("A"), TaskId::from("M"), TaskId::from("Z")]
    );
}

#[test]
fn test_string_and_integer_ids_are_distinct() {
    let manifest = TaskManifest::from_ids([TaskId::Int(1)]);
    let doc = json!([create_raw_prediction("1", json!(4), json!(1.0))]);
    let kinds = rejection(&manifest, &doc);

    assert_eq!(kinds, vec![ViolationKind::MissingIds, ViolationKind::UnknownIds]);
}

// ============================================================================
// Collect-all versus fail-fast
// ============================================================================

#[test]
fn test_collects_every_category() {
    let manifest = create_test_manifest();
    let doc = SubmissionBuilder::new()
        .record(json!(7))
        .record(create_raw_prediction("A", json!(3), json!(1.0)))
        .record(create_raw_prediction("B", json!(4), json!(f64::NAN)))
        .predict("B", 4, 1.0)
        .predict("X", 4, 1.0)
        .keyed()
        .build_raw();

    let kinds = rejection(&manifest, &doc);
    assert_eq!(
        kinds,
        vec![
            ViolationKind::NotAnObject,
            ViolationKind::OffLadder,
            ViolationKind::WrongType,
            ViolationKind::DuplicateIds,
            ViolationKind::MissingIds,
            ViolationKind::UnknownIds,
        ]
    );
}

#[test]
fn test_fail_fast_reports_first_violation_only() {
    let manifest = create_test_manifest();
    let doc = SubmissionBuilder::new()
        .record(create_raw_prediction("A", json!(3), json!(1.0)))
        .predict("X", 4, 1.0)
        .build_raw();

    let validator = SubmissionValidator::with_config(&manifest, ValidatorConfig { fail_fast: true });
    match validator.validate(&doc) {
        Err(SubmissionError::Rejected(report)) => {
            assert_eq!(report.len(), 1);
            assert_eq!(report.violations[0].kind, ViolationKind::OffLadder);
        }
        Ok(_) => panic!("submission unexpectedly accepted"),
    }
}
