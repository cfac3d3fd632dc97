//! Accepted top-level submission shapes

use circuit_fingerprint_domain::{Violation, ViolationKind};
use serde_json::Value;

/// Key holding the prediction list in the keyed shape
pub const PREDICTIONS_KEY: &str = "predictions";

/// A raw submission document in one of its two accepted shapes.
///
/// Anything else is rejected before any record is looked at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawSubmission<'a> {
    /// A bare list of prediction records
    Bare(&'a [Value]),
    /// An object whose `predictions` key holds the list
    Keyed(&'a [Value]),
}

impl<'a> RawSubmission<'a> {
    /// Classify a parsed document.
    pub fn accept(document: &'a Value) -> Result<Self, Violation> {
        match document {
            Value::Array(records) => Ok(Self::Bare(records)),
            Value::Object(fields) => match fields.get(PREDICTIONS_KEY) {
                Some(Value::Array(records)) => Ok(Self::Keyed(records)),
                Some(_) => Err(Violation::new(
                    ViolationKind::InvalidShape,
                    "'predictions' must be a list.",
                )
                .field(PREDICTIONS_KEY)),
                None => Err(shape_violation()),
            },
            _ => Err(shape_violation()),
        }
    }

    /// The prediction records, in document order
    pub fn records(&self) -> &'a [Value] {
        match *self {
            Self::Bare(records) | Self::Keyed(records) => records,
        }
    }
}

fn shape_violation() -> Violation {
    Violation::new(
        ViolationKind::InvalidShape,
        "Submission must be a list or an object with key 'predictions'.",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_list() {
        let doc = json!([{"id": "A"}]);
        let shape = RawSubmission::accept(&doc).unwrap();
        assert!(matches!(shape, RawSubmission::Bare(_)));
        assert_eq!(shape.records().len(), 1);
    }

    #[test]
    fn test_keyed_object() {
        let doc = json!({"predictions": [{"id": "A"}, {"id": "B"}], "team": "x"});
        let shape = RawSubmission::accept(&doc).unwrap();
        assert!(matches!(shape, RawSubmission::Keyed(_)));
        assert_eq!(shape.records().len(), 2);
    }

    #[test]
    fn test_predictions_not_a_list() {
        let doc = json!({"predictions": {"A": 4}});
        let violation = RawSubmission::accept(&doc).unwrap_err();
        assert_eq!(violation.kind, ViolationKind::InvalidShape);
        assert_eq!(violation.message, "'predictions' must be a list.");
    }

    #[test]
    fn test_other_shapes_rejected() {
        for doc in [json!("text"), json!(42), json!(null), json!({"preds": []})] {
            let violation = RawSubmission::accept(&doc).unwrap_err();
            assert_eq!(violation.kind, ViolationKind::InvalidShape);
        }
    }
}
