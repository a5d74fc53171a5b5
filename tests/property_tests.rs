//! Property-based tests for best-tracker
//!
//! - Test mathematical invariants (running max/min, earliest step)
//! - Test all-or-nothing updates
//! - Run with ProptestConfig::with_cases(100)

use best_tracker::{BestValueTracker, Direction, Error};
use proptest::prelude::*;

// ============================================================================
// Property Test Generators (Strategies)
// ============================================================================

/// Generate a sequence of (loss, accuracy) observations
fn arb_observations(max_len: usize) -> impl Strategy<Value = Vec<[f64; 2]>> {
    proptest::collection::vec(
        (-1.0e6f64..1.0e6, -1.0e6f64..1.0e6).prop_map(|(a, b)| [a, b]),
        1..max_len,
    )
}

/// Observations drawn from a small value set so ties are common
fn arb_tied_observations(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    proptest::collection::vec((0u8..4).prop_map(f64::from), 1..max_len)
}

fn loss_acc_tracker(track_step: bool) -> BestValueTracker {
    BestValueTracker::from_metrics(
        [
            ("loss", Direction::LowerIsBetter),
            ("acc", Direction::HigherIsBetter),
        ],
        track_step,
    )
    .unwrap()
}

fn replay(tracker: &mut BestValueTracker, observations: &[[f64; 2]]) {
    for (step, values) in (0u64..).zip(observations) {
        tracker.update(values, step).unwrap();
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: lower-is-better best equals the minimum candidate
    #[test]
    fn prop_lower_is_better_tracks_min(observations in arb_observations(64)) {
        let mut tracker = loss_acc_tracker(true);
        replay(&mut tracker, &observations);

        let min = observations.iter().map(|o| o[0]).fold(f64::INFINITY, f64::min);
        prop_assert_eq!(tracker.best_value("loss"), Some(min));
    }

    /// Property: higher-is-better best equals the maximum candidate
    #[test]
    fn prop_higher_is_better_tracks_max(observations in arb_observations(64)) {
        let mut tracker = loss_acc_tracker(true);
        replay(&mut tracker, &observations);

        let max = observations.iter().map(|o| o[1]).fold(f64::NEG_INFINITY, f64::max);
        prop_assert_eq!(tracker.best_value("acc"), Some(max));
    }

    /// Property: best step is the earliest step at which the best occurred
    #[test]
    fn prop_ties_keep_earliest_step(values in arb_tied_observations(64)) {
        let mut tracker = BestValueTracker::from_metrics([("acc", true)], true).unwrap();
        for (step, &value) in (0u64..).zip(&values) {
            tracker.update(&[value], step).unwrap();
        }

        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let first = values.iter().position(|&v| v == max).unwrap() as u64;
        prop_assert_eq!(tracker.best_step("acc"), Some(first));
    }

    /// Property: repeating an update changes nothing
    #[test]
    fn prop_repeat_update_is_idempotent(
        observations in arb_observations(32),
        step in 0u64..1000
    ) {
        let mut tracker = loss_acc_tracker(true);
        replay(&mut tracker, &observations);

        let last = observations[observations.len() - 1];
        tracker.update(&last, step).unwrap();
        let once = tracker.snapshot();
        tracker.update(&last, step).unwrap();
        prop_assert_eq!(tracker.snapshot(), once);
    }

    /// Property: wrong arity is rejected and leaves state untouched
    #[test]
    fn prop_arity_mismatch_is_noop(
        observations in arb_observations(16),
        bad in proptest::collection::vec(-10.0f64..10.0, 0..6)
    ) {
        prop_assume!(bad.len() != 2);
        let mut tracker = loss_acc_tracker(true);
        replay(&mut tracker, &observations);

        let before = tracker.snapshot();
        let result = tracker.update(&bad, 999);
        let is_arity_mismatch = matches!(result, Err(Error::ArityMismatch { expected: 2, .. }));
        prop_assert!(is_arity_mismatch);
        prop_assert_eq!(tracker.snapshot(), before);
    }

    /// Property: no step keys are ever reported when step tracking is off
    #[test]
    fn prop_no_steps_when_disabled(observations in arb_observations(64)) {
        let mut tracker = loss_acc_tracker(false);
        replay(&mut tracker, &observations);

        prop_assert!(!tracker.render().contains("_step"));
        prop_assert_eq!(tracker.best_step("loss"), None);
        prop_assert_eq!(tracker.best_step("acc"), None);
    }
}
