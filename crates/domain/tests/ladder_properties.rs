//! Property tests for the rung ladder and scoring formulas

use circuit_fingerprint_domain::ladder::{
    self, runtime_ratio_score, steps_over, threshold_score, ThresholdRung, THRESHOLD_RUNGS,
};
use proptest::prelude::*;

fn rung() -> impl Strategy<Value = ThresholdRung> {
    proptest::sample::select(THRESHOLD_RUNGS.to_vec()).prop_map(|v| ThresholdRung::new(v).unwrap())
}

// ============================================================================
// Rung index
// ============================================================================

#[test]
fn test_rung_index_strictly_increasing() {
    let indices: Vec<u32> = THRESHOLD_RUNGS
        .iter()
        .map(|&v| ladder::rung_index(v).unwrap())
        .collect();

    for pair in indices.windows(2) {
        assert_eq!(pair[1], pair[0] + 1);
    }
    assert_eq!(indices.first(), Some(&0));
    assert_eq!(indices.last(), Some(&8));
}

proptest! {
    #[test]
    fn prop_rung_index_matches_log2(r in rung()) {
        prop_assert_eq!(1u32 << r.index(), r.value());
    }

    #[test]
    fn prop_off_ladder_values_have_no_index(v in any::<u32>()) {
        prop_assume!(!THRESHOLD_RUNGS.contains(&v));
        prop_assert!(ladder::rung_index(v).is_none());
    }
}

// ============================================================================
// Threshold score
// ============================================================================

proptest! {
    #[test]
    fn prop_threshold_score_is_exact_power_of_two(k in 0u32..=8) {
        prop_assert_eq!(threshold_score(k), 1.0 / (1u32 << k) as f64);
    }

    #[test]
    fn prop_threshold_score_monotonically_decreasing(k in 0u32..8) {
        prop_assert!(threshold_score(k + 1) < threshold_score(k));
    }

    #[test]
    fn prop_fidelity_gate(predicted in rung(), truth in rung()) {
        let steps = steps_over(predicted, truth);
        if predicted < truth {
            prop_assert!(steps.is_none());
        } else {
            prop_assert_eq!(steps, Some(predicted.index() - truth.index()));
        }
    }
}

// ============================================================================
// Runtime score
// ============================================================================

#[test]
fn test_runtime_score_identity() {
    assert_eq!(runtime_ratio_score(1.0), 1.0);
}

proptest! {
    #[test]
    fn prop_runtime_score_symmetric(r in 1e-6f64..1e6) {
        let forward = runtime_ratio_score(r);
        let inverse = runtime_ratio_score(1.0 / r);
        prop_assert!((forward - inverse).abs() <= 1e-12 * forward.max(inverse));
    }

    #[test]
    fn prop_runtime_score_bounded(r in 1e-6f64..1e6) {
        let score = runtime_ratio_score(r);
        prop_assert!(score > 0.0);
        prop_assert!(score <= 1.0);
        if r != 1.0 {
            prop_assert!(score < 1.0);
        }
    }
}
