use rstest::rstest;
use carefind_core::test_support::MeanScorer;
use carefind_core::{CriteriaSignals, Scorer};

const TOLERANCE: f64 = 1e-9;

fn signals(service_match: f64, proximity: f64) -> CriteriaSignals {
    CriteriaSignals {
        cost: 2.0,
        quality: 4.0,
        service_match,
        proximity,
    }
}

#[rstest]
#[case(1.0, 1.0, 1.0)]
#[case(1.0, 0.0, 0.5)]
#[case(0.5, 0.25, 0.375)]
// Out-of-range signals still clamp into the unit interval.
#[case(3.0, 3.0, 1.0)]
#[case(-1.0, 0.0, 0.0)]
// Non-finite signals should yield 0.0
#[case(f64::NAN, 1.0, 0.0)]
#[case(f64::INFINITY, 1.0, 0.0)]
fn mean_scorer_scenarios(#[case] service: f64, #[case] proximity: f64, #[case] expected: f64) {
    let score = MeanScorer.score(&signals(service, proximity));
    assert!(score.is_finite(), "score must be finite");
    assert!((score - expected).abs() <= TOLERANCE);
}

#[rstest]
#[case(f64::NAN, 0.0)]
#[case(f64::INFINITY, 0.0)]
#[case(f64::NEG_INFINITY, 0.0)]
#[case(-0.1, 0.0)]
#[case(1.2, 1.0)]
#[case(0.4, 0.4)]
fn sanitise_clamps_and_filters(#[case] input: f64, #[case] expected: f64) {
    let result = MeanScorer::sanitise(input);
    assert!(result.is_finite(), "result must be finite");
    assert!((0.0..=1.0).contains(&result), "result must be within [0, 1]");
    assert!((result - expected).abs() <= TOLERANCE);
}

#[rstest]
fn scorer_is_usable_through_shared_pointers() {
    let shared: std::sync::Arc<dyn Scorer> = std::sync::Arc::new(MeanScorer);
    let by_ref = &shared;
    assert!((by_ref.score(&signals(1.0, 0.0)) - 0.5).abs() <= TOLERANCE);
}

#[rstest]
fn finite_check_covers_every_input() {
    assert!(signals(0.5, 0.5).is_finite());
    assert!(!CriteriaSignals { quality: f64::NAN, ..signals(0.5, 0.5) }.is_finite());
}
