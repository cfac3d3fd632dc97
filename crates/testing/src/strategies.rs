//! Proptest strategies for ladder rungs and runtimes.

use circuit_fingerprint_domain::{ThresholdRung, THRESHOLD_RUNGS};
use proptest::prelude::*;

/// Any ladder rung
pub fn rung() -> impl Strategy<Value = ThresholdRung> {
    proptest::sample::select(THRESHOLD_RUNGS.to_vec()).prop_filter_map("on ladder", ThresholdRung::new)
}

/// Any strictly positive, finite runtime in a realistic range
pub fn runtime() -> impl Strategy<Value = f64> {
    1e-3f64..1e4
}

/// A `(threshold, runtime)` pair
pub fn rung_and_runtime() -> impl Strategy<Value = (ThresholdRung, f64)> {
    (rung(), runtime())
}
