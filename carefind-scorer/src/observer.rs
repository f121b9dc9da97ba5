//! Observability hooks for ranking requests.

use carefind_core::{Candidate, ResolveError, ScoredCandidate, UserQuery};

use crate::CandidateFault;

/// Receives events while a [`Recommender`](crate::Recommender) runs.
///
/// Every method has an empty default so implementers only override what
/// they need. Observers are shared across threads.
pub trait RankingObserver: Send + Sync {
    /// A candidate was scored.
    fn candidate_scored(&self, _scored: &ScoredCandidate) {}

    /// A candidate could not be scored and was given `0.0`.
    fn candidate_faulted(&self, _candidate: &Candidate, _fault: &CandidateFault) {}

    /// An address did not resolve and the fallback coordinate was used.
    fn location_unresolved(&self, _address: &str, _error: &ResolveError) {}

    /// No candidate earned a positive score.
    fn shortlist_empty(&self, _query: &UserQuery) {}
}

/// Forwards ranking events to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl RankingObserver for LogObserver {
    fn candidate_scored(&self, scored: &ScoredCandidate) {
        log::debug!(
            "scored '{}': service {:.2}, proximity {:.2}, recommendation {:.3}",
            scored.candidate().name,
            scored.service_score(),
            scored.proximity_score(),
            scored.recommendation_score()
        );
    }

    fn candidate_faulted(&self, candidate: &Candidate, fault: &CandidateFault) {
        log::warn!("skipping '{}': {fault}", candidate.name);
    }

    fn location_unresolved(&self, address: &str, error: &ResolveError) {
        log::warn!("could not resolve '{address}', using fallback coordinate: {error}");
    }

    fn shortlist_empty(&self, query: &UserQuery) {
        log::info!(
            "no candidates matched '{}' near '{}'",
            query.service_needed,
            query.location
        );
    }
}
