//! Threshold rung ladder and scoring formulas.
//!
//! Every component that needs to know which thresholds are legal, how rungs are
//! indexed, or how a prediction is scored goes through this module. The
//! validator and the scorer never carry their own copy of the ladder.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// The fixed ascending ladder of threshold rungs.
pub const THRESHOLD_RUNGS: [u32; 9] = [1, 2, 4, 8, 16, 32, 64, 128, 256];

/// A threshold value known to be a member of [`THRESHOLD_RUNGS`].
///
/// Serializes as a bare integer. Deserialization rejects values that are not
/// on the ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct ThresholdRung(u32);

impl ThresholdRung {
    /// The lowest (coarsest) rung.
    pub const MIN: ThresholdRung = ThresholdRung(1);

    /// The highest (most precise) rung.
    pub const MAX: ThresholdRung = ThresholdRung(256);

    /// Create a rung from a raw threshold, returning `None` if it is off the ladder.
    pub fn new(value: u32) -> Option<Self> {
        is_on_ladder(value).then_some(Self(value))
    }

    /// The raw threshold value.
    #[inline]
    pub fn value(self) -> u32 {
        self.0
    }

    /// Zero-based position on the ladder (1 -> 0, 2 -> 1, ..., 256 -> 8).
    #[inline]
    pub fn index(self) -> u32 {
        // Ladder values are exact powers of two.
        self.0.trailing_zeros()
    }
}

impl Display for ThresholdRung {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for ThresholdRung {
    type Error = OffLadderError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(OffLadderError(value))
    }
}

impl From<ThresholdRung> for u32 {
    fn from(rung: ThresholdRung) -> Self {
        rung.0
    }
}

/// Returned when a threshold is not a ladder member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("threshold {0} is not one of {ladder}", ladder = ladder_display())]
pub struct OffLadderError(pub u32);

/// Check ladder membership for a raw value.
pub fn is_on_ladder(value: u32) -> bool {
    THRESHOLD_RUNGS.contains(&value)
}

/// Rung index for a raw value, or `None` when the value is off the ladder.
pub fn rung_index(value: u32) -> Option<u32> {
    ThresholdRung::new(value).map(ThresholdRung::index)
}

/// Render the ladder as `[1, 2, 4, ...]` for messages.
pub fn ladder_display() -> String {
    let rungs: Vec<String> = THRESHOLD_RUNGS.iter().map(u32::to_string).collect();
    format!("[{}]", rungs.join(", "))
}

/// Number of rungs by which `predicted` exceeds `truth`.
///
/// Returns `None` when the prediction sits below the true rung, which is the
/// fidelity gate: such a prediction earns no credit at all.
pub fn steps_over(predicted: ThresholdRung, truth: ThresholdRung) -> Option<u32> {
    if predicted < truth {
        return None;
    }
    Some(predicted.index() - truth.index())
}

/// Threshold component of a task score: `2^-steps_over`.
///
/// Exact for every reachable step count since each factor is a power of two.
pub fn threshold_score(steps_over: u32) -> f64 {
    0.5_f64.powi(steps_over as i32)
}

/// Runtime component of a task score for a prediction/truth ratio `r`: `min(r, 1/r)`.
pub fn runtime_ratio_score(ratio: f64) -> f64 {
    ratio.min(1.0 / ratio)
}

/// Runtime component of a task score.
///
/// `true_runtime` must be strictly positive; ground truth loading enforces it.
pub fn runtime_score(predicted_runtime: f64, true_runtime: f64) -> f64 {
    runtime_ratio_score(predicted_runtime / true_runtime)
}
