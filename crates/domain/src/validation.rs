//! Violation records collected while validating a submission.
//!
//! Validation does not stop at the first problem. Every violation is recorded
//! with enough context (record index, task id, field) for a contestant to fix
//! the whole submission in one pass.

use crate::task::TaskId;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Category of a submission violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Top-level document is neither a list nor an object with `predictions`
    InvalidShape,
    /// A prediction record is not an object
    NotAnObject,
    /// A required field is absent
    MissingField,
    /// A field has the wrong JSON type
    WrongType,
    /// Threshold is an integer but not on the rung ladder
    OffLadder,
    /// Runtime is non-finite or not strictly positive
    InvalidRuntime,
    /// Some ids appear more than once
    DuplicateIds,
    /// Some manifest ids have no prediction
    MissingIds,
    /// Some predicted ids are not in the manifest
    UnknownIds,
}

impl ViolationKind {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidShape => "INVALID_SHAPE",
            Self::NotAnObject => "NOT_AN_OBJECT",
            Self::MissingField => "MISSING_FIELD",
            Self::WrongType => "WRONG_TYPE",
            Self::OffLadder => "OFF_LADDER",
            Self::InvalidRuntime => "INVALID_RUNTIME",
            Self::DuplicateIds => "DUPLICATE_IDS",
            Self::MissingIds => "MISSING_IDS",
            Self::UnknownIds => "UNKNOWN_IDS",
        }
    }
}

/// A single submission violation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// Violation category
    pub kind: ViolationKind,

    /// Position of the offending record in the prediction list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,

    /// Offending task id, when it could be read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<TaskId>,

    /// Offending field name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    /// Ids involved in a set-membership violation, sorted ascending
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<TaskId>,

    /// Human-readable description
    pub message: String,
}

impl Violation {
    /// Create a violation with only a kind and a message
    pub fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            index: None,
            id: None,
            field: None,
            ids: Vec::new(),
            message: message.into(),
        }
    }

    /// Attach the record index
    pub fn at(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    /// Attach the task id
    pub fn for_id(mut self, id: Option<TaskId>) -> Self {
        self.id = id;
        self
    }

    /// Attach the field name
    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Attach the ids of a set-membership violation
    pub fn with_ids(mut self, ids: Vec<TaskId>) -> Self {
        self.ids = ids;
        self
    }
}

impl Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Accumulated outcome of validating a submission
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Violations in detection order
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Create an empty (passing) report
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no violation was recorded
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Record a violation
    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Number of violations
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Whether the report is empty
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// First violation of the given kind, if any
    pub fn find(&self, kind: ViolationKind) -> Option<&Violation> {
        self.violations.iter().find(|v| v.kind == kind)
    }

    /// Whether any violation of the given kind was recorded
    pub fn has(&self, kind: ViolationKind) -> bool {
        self.find(kind).is_some()
    }

    /// Keep only the first violation.
    pub fn truncate_to_first(&mut self) {
        self.violations.truncate(1);
    }
}

impl Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.violations.iter().map(|v| v.message.as_str()).collect();
        write!(f, "{}", messages.join("; "))
    }
}
