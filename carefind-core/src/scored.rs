//! Candidates paired with the signals and score they earned.

use crate::candidate::Candidate;

/// Per-candidate signals gathered before inference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    /// Service match in `[0, 1]`.
    pub service_score: f64,
    /// Proximity in `[0, 1]`.
    pub proximity_score: f64,
    /// Great-circle distance from the user in kilometres, when located.
    pub distance_km: Option<f64>,
    /// Final recommendation in `[0, 1]`.
    pub recommendation_score: f64,
}

impl ScoreBreakdown {
    /// Breakdown for a candidate that could not be scored.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            service_score: 0.0,
            proximity_score: 0.0,
            distance_km: None,
            recommendation_score: 0.0,
        }
    }
}

/// A candidate with its scores.
///
/// Instances are immutable: re-scoring produces a new value.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    candidate: Candidate,
    breakdown: ScoreBreakdown,
}

impl ScoredCandidate {
    /// Pair a candidate with its scores.
    #[must_use]
    pub const fn new(candidate: Candidate, breakdown: ScoreBreakdown) -> Self {
        Self {
            candidate,
            breakdown,
        }
    }

    /// The scored candidate.
    #[must_use]
    pub const fn candidate(&self) -> &Candidate {
        &self.candidate
    }

    /// All scores.
    #[must_use]
    pub const fn breakdown(&self) -> ScoreBreakdown {
        self.breakdown
    }

    /// Service match in `[0, 1]`.
    #[must_use]
    pub const fn service_score(&self) -> f64 {
        self.breakdown.service_score
    }

    /// Proximity in `[0, 1]`.
    #[must_use]
    pub const fn proximity_score(&self) -> f64 {
        self.breakdown.proximity_score
    }

    /// Distance from the user in kilometres, if the candidate was located.
    #[must_use]
    pub const fn distance_km(&self) -> Option<f64> {
        self.breakdown.distance_km
    }

    /// Final recommendation in `[0, 1]`.
    #[must_use]
    pub const fn recommendation_score(&self) -> f64 {
        self.breakdown.recommendation_score
    }

    /// Consume the wrapper and return the candidate.
    #[must_use]
    pub fn into_candidate(self) -> Candidate {
        self.candidate
    }
}
