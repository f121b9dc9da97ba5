//! Top-K selection over scored candidates.

use crate::scored::ScoredCandidate;

/// Shortlist length used when callers do not choose one.
pub const DEFAULT_TOP_K: usize = 3;

/// Keep positive scores, order them descending and truncate to `k`.
///
/// The sort is stable, so equal scores keep their dataset order. An empty
/// result is not an error.
///
/// # Examples
///
/// ```
/// use carefind_core::{Candidate, ScoreBreakdown, ScoredCandidate, select_top};
///
/// let scored = [0.0, 0.8, 0.5, 0.9].into_iter().enumerate().map(|(i, score)| {
///     let breakdown = ScoreBreakdown { recommendation_score: score, ..ScoreBreakdown::zero() };
///     ScoredCandidate::new(Candidate::new(format!("H{i}"), "", ""), breakdown)
/// });
/// let top: Vec<f64> = select_top(scored, 3)
///     .iter()
///     .map(ScoredCandidate::recommendation_score)
///     .collect();
/// assert_eq!(top, [0.9, 0.8, 0.5]);
/// ```
#[must_use]
pub fn select_top<I>(scored: I, k: usize) -> Vec<ScoredCandidate>
where
    I: IntoIterator<Item = ScoredCandidate>,
{
    let mut kept: Vec<ScoredCandidate> = scored
        .into_iter()
        .filter(|candidate| candidate.recommendation_score() > 0.0)
        .collect();
    kept.sort_by(|a, b| b.recommendation_score().total_cmp(&a.recommendation_score()));
    kept.truncate(k);
    kept
}
