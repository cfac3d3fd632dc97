//! Task identifiers and the public task manifest.

use crate::errors::ConfigurationError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};
use std::fmt::{self, Display};

/// Identifier of a task, stable across the manifest, ground truth and submissions.
///
/// Ids are either integers or strings. The two kinds never compare equal:
/// integer `1` and string `"1"` are different tasks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskId {
    /// Integer identifier
    Int(i64),
    /// String identifier
    Str(String),
}

impl TaskId {
    /// Interpret a raw JSON value as an id.
    ///
    /// Only strings and integral numbers qualify; floats, booleans, null and
    /// containers return `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::Str(s.clone())),
            Value::Number(n) => n.as_i64().map(Self::Int),
            _ => None,
        }
    }
}

impl Ord for TaskId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Str(a), Self::Str(b)) => a.cmp(b),
            (Self::Int(_), Self::Str(_)) => Ordering::Less,
            (Self::Str(_), Self::Int(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for TaskId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{}", n),
            Self::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for TaskId {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

/// Render a list of ids as `[a, b, c]` for error messages.
pub fn format_id_list(ids: &[TaskId]) -> String {
    let rendered: Vec<String> = ids.iter().map(TaskId::to_string).collect();
    format!("[{}]", rendered.join(", "))
}

/// One evaluation unit of the challenge.
///
/// Only `id` is interpreted. Every other attribute (circuit file, processor,
/// precision, ...) is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Task identifier
    pub id: TaskId,

    /// Remaining task attributes
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Task {
    /// Create a task with no extra attributes
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self {
            id: id.into(),
            attributes: Map::new(),
        }
    }
}

/// Public task manifest: the ordered list of tasks a submission must cover.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskManifest {
    /// Tasks in published order
    pub tasks: Vec<Task>,
}

impl TaskManifest {
    /// Build a manifest from a list of ids
    pub fn from_ids<I, T>(ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TaskId>,
    {
        Self {
            tasks: ids.into_iter().map(Task::new).collect(),
        }
    }

    /// Task ids in manifest order
    pub fn ids(&self) -> impl Iterator<Item = &TaskId> {
        self.tasks.iter().map(|t| &t.id)
    }

    /// Set of task ids
    pub fn id_set(&self) -> HashSet<&TaskId> {
        self.ids().collect()
    }

    /// Number of tasks
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the manifest lists no tasks
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Check the manifest invariants: at least one task, unique ids.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.is_empty() {
            return Err(ConfigurationError::EmptyManifest);
        }

        let duplicates = duplicate_ids(self.ids());
        if !duplicates.is_empty() {
            return Err(ConfigurationError::DuplicateManifestIds(duplicates));
        }

        Ok(())
    }
}

/// Collect the ids that occur more than once, sorted and deduplicated.
pub fn duplicate_ids<'a>(ids: impl IntoIterator<Item = &'a TaskId>) -> Vec<TaskId> {
    let mut seen = HashSet::new();
    let mut duplicates = BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            duplicates.insert(id.clone());
        }
    }
    duplicates.into_iter().collect()
}
