//! Property tests for the standard fuzzy engine.
#![expect(
    clippy::float_arithmetic,
    reason = "properties compare scores with floating point slack"
)]

use carefind_core::{CriteriaSignals, Scorer};
use carefind_scorer::FuzzyEngine;
use proptest::prelude::*;
use rstest::rstest;

/// Slack for floating-point noise in the centroid.
const SLACK: f64 = 1e-6;

fn engine() -> FuzzyEngine {
    FuzzyEngine::standard().unwrap_or_else(|err| panic!("standard rules compile: {err}"))
}

/// Any encoded cost and quality rating inside the engine's universes.
fn fixed_context() -> impl Strategy<Value = (f64, f64)> {
    (1.0..=3.0_f64, 2.0..=5.0_f64)
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn output_stays_in_unit_interval(
        cost in -10.0..10.0_f64,
        quality in -10.0..10.0_f64,
        service_match in -1.0..2.0_f64,
        proximity in -1.0..2.0_f64,
    ) {
        let score = engine().score(&CriteriaSignals { cost, quality, service_match, proximity });
        prop_assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn closer_is_never_worse(
        (cost, quality) in fixed_context(),
        service_match in 0.0..=1.0_f64,
        a in 0.0..=1.0_f64,
        b in 0.0..=1.0_f64,
    ) {
        let engine = engine();
        let (low, high) = ordered(a, b);
        let base = CriteriaSignals { cost, quality, service_match, proximity: low };
        let closer = CriteriaSignals { proximity: high, ..base };
        prop_assert!(engine.score(&closer) + SLACK >= engine.score(&base));
    }

    #[test]
    fn better_service_match_is_never_worse(
        (cost, quality) in fixed_context(),
        proximity in 0.0..=1.0_f64,
        a in 0.0..=1.0_f64,
        b in 0.0..=1.0_f64,
    ) {
        let engine = engine();
        let (low, high) = ordered(a, b);
        let base = CriteriaSignals { cost, quality, service_match: low, proximity };
        let better = CriteriaSignals { service_match: high, ..base };
        prop_assert!(engine.score(&better) + SLACK >= engine.score(&base));
    }
}

#[rstest]
#[case::fair_quality_strong_match(1.0, 3.9, 0.95, 0.65)]
#[case::edge_of_high_quality(2.0, 3.5, 1.0, 0.6)]
#[case::premium_fair_quality(3.0, 3.2, 0.95, 0.4)]
fn one_step_closer_is_never_worse(
    #[case] cost: f64,
    #[case] quality: f64,
    #[case] service_match: f64,
    #[case] proximity: f64,
) {
    let engine = engine();
    let base = CriteriaSignals { cost, quality, service_match, proximity };
    let closer = CriteriaSignals { proximity: proximity + 0.01, ..base };
    assert!(
        engine.score(&closer) + SLACK >= engine.score(&base),
        "score fell between proximity {proximity} and {}",
        proximity + 0.01
    );
}

#[rstest]
#[case::fair_quality_middle_distance(1.0, 3.7, 0.67, 0.3)]
#[case::partial_match_nearby(2.0, 4.0, 0.5, 0.9)]
#[case::low_quality_nearby(1.5, 2.4, 0.6, 0.8)]
fn one_step_better_match_is_never_worse(
    #[case] cost: f64,
    #[case] quality: f64,
    #[case] service_match: f64,
    #[case] proximity: f64,
) {
    let engine = engine();
    let base = CriteriaSignals { cost, quality, service_match, proximity };
    let better = CriteriaSignals { service_match: service_match + 0.01, ..base };
    assert!(
        engine.score(&better) + SLACK >= engine.score(&base),
        "score fell between service match {service_match} and {}",
        service_match + 0.01
    );
}

/// Walks proximity and service match in fixed steps across a grid of
/// cost and quality contexts.
#[rstest]
fn scores_rise_along_both_critical_axes() {
    let engine = engine();
    let steps = 25_u32;
    let at = |step: u32| f64::from(step) / f64::from(steps);
    for cost in [1.0, 1.35, 2.0, 2.4, 3.0] {
        for quality in [2.0, 2.6, 3.0, 3.5, 3.9, 4.5, 5.0] {
            for outer in 0..=steps {
                let mut by_proximity = 0.0_f64;
                let mut by_service = 0.0_f64;
                for inner in 0..=steps {
                    let closer = engine.score(&CriteriaSignals {
                        cost,
                        quality,
                        service_match: at(outer),
                        proximity: at(inner),
                    });
                    let better = engine.score(&CriteriaSignals {
                        cost,
                        quality,
                        service_match: at(inner),
                        proximity: at(outer),
                    });
                    assert!(
                        closer + SLACK >= by_proximity,
                        "cost {cost}, quality {quality}: proximity step {inner} lowered the score"
                    );
                    assert!(
                        better + SLACK >= by_service,
                        "cost {cost}, quality {quality}: service step {inner} lowered the score"
                    );
                    by_proximity = closer;
                    by_service = better;
                }
            }
        }
    }
}
