//! Criterion benchmarks for batch scoring.
//!
//! Measures end-to-end ranking over synthetic hospital sets (100, 1000 and
//! 5000 candidates) and raw inference throughput on the standard engine.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package carefind-scorer
//! ```

// Criterion macros generate code that triggers missing_docs warnings.
#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use std::hint::black_box;

use carefind_core::test_support::MemoryResolver;
use carefind_core::{Candidate, CriteriaSignals, Scorer, UserQuery, lat_lon};
use carefind_scorer::{FuzzyEngine, Recommender, RecommenderConfig};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

/// Candidate set sizes to benchmark.
const BATCH_SIZES: &[u32] = &[100, 1000, 5000];

const COST_LABELS: [&str; 5] = ["Low", "Medium", "High", "Premium", "N/A"];

const SERVICE_LISTS: [&str; 4] = [
    "Cardiology, ICU",
    "Interventional Cardiology, Cardiac Surgery",
    "Ophthalmology",
    "Dental Surgery, Paediatrics",
];

/// Build a deterministic candidate set spread around the user.
///
/// Coordinates march outwards on a grid so that every proximity band is
/// represented.
#[expect(
    clippy::float_arithmetic,
    reason = "grid offsets are computed in floating point"
)]
#[expect(
    clippy::integer_division_remainder_used,
    clippy::integer_division,
    reason = "indices cycle through the fixture tables"
)]
fn generate_candidates(count: u32) -> Vec<Candidate> {
    (0..count)
        .map(|index| {
            let cost = COST_LABELS
                .get(usize::try_from(index % 5).unwrap_or_default())
                .copied()
                .unwrap_or("N/A");
            let services = SERVICE_LISTS
                .get(usize::try_from(index % 4).unwrap_or_default())
                .copied()
                .unwrap_or("Cardiology");
            let row = f64::from(index / 50);
            let column = f64::from(index % 50);
            Candidate::new(format!("Hospital {index}"), "Lagos", services)
                .with_cost_label(cost)
                .with_quality_score(2.0 + f64::from(index % 7) * 0.5)
                .with_coordinates(lat_lon(6.55 + row * 0.002, 3.30 + column * 0.003))
        })
        .collect()
}

fn bench_recommend(c: &mut Criterion) {
    let mut group = c.benchmark_group("recommend");
    let query = UserQuery::new("Ikeja", "Cardiology", "Medium", "High");

    for &size in BATCH_SIZES {
        let candidates = generate_candidates(size);
        let resolver = MemoryResolver::with_entries([("Ikeja", lat_lon(6.6018, 3.3515))]);
        let recommender = FuzzyEngine::standard()
            .map_err(|err| err.to_string())
            .and_then(|engine| {
                Recommender::new(engine, resolver, RecommenderConfig::default())
                    .map_err(|err| err.to_string())
            })
            .unwrap_or_else(|err| panic!("benchmark recommender builds: {err}"));

        group.throughput(Throughput::Elements(u64::from(size)));
        group.bench_with_input(BenchmarkId::new("candidates", size), &size, |b, _| {
            b.iter(|| black_box(recommender.recommend(&query, &candidates)));
        });
    }

    group.finish();
}

#[expect(
    clippy::float_arithmetic,
    clippy::integer_division_remainder_used,
    reason = "signal sweep is computed in floating point"
)]
fn bench_inference(c: &mut Criterion) {
    let engine =
        FuzzyEngine::standard().unwrap_or_else(|err| panic!("standard rules compile: {err}"));
    let signals: Vec<CriteriaSignals> = (0..=100_u32)
        .map(|step| CriteriaSignals {
            cost: 1.0 + f64::from(step % 3),
            quality: 2.0 + f64::from(step) * 0.03,
            service_match: 0.95,
            proximity: f64::from(step) / 100.0,
        })
        .collect();

    c.bench_function("evaluate_sweep", |b| {
        b.iter(|| {
            signals
                .iter()
                .map(|s| engine.score(black_box(s)))
                .sum::<f64>()
        });
    });
}

criterion_group!(benches, bench_recommend, bench_inference);
criterion_main!(benches);
