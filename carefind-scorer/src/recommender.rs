//! The ranking pipeline: `Candidate × UserQuery → ScoredCandidate`, then top-K.
//!
//! Each candidate is scored independently. The service matcher runs first;
//! candidates that do not offer the requested service score `0.0` without
//! being located or passed to inference. Matches are located (their own
//! coordinates, else the resolver, else the fallback), given a proximity
//! score and handed to the [`Scorer`] together with their cost and quality.

use std::sync::Arc;

use carefind_core::{
    Candidate, CoordinateResolver, CriteriaSignals, DEFAULT_COORDINATE, DEFAULT_MAX_DISTANCE_KM,
    DEFAULT_TOP_K, ScoreBreakdown, ScoredCandidate, Scorer, UserQuery, haversine_km, proximity,
    select_top, validate_max_distance,
};
use geo::Coord;

use crate::observer::{LogObserver, RankingObserver};
use crate::{CandidateFault, RecommendError};

/// Tunable parameters for a [`Recommender`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommenderConfig {
    /// Distance at which proximity reaches zero.
    pub max_distance_km: f64,
    /// Shortlist length.
    pub top_k: usize,
    /// Coordinate used when an address cannot be resolved.
    pub fallback_coordinate: Coord<f64>,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            max_distance_km: DEFAULT_MAX_DISTANCE_KM,
            top_k: DEFAULT_TOP_K,
            fallback_coordinate: DEFAULT_COORDINATE,
        }
    }
}

impl RecommenderConfig {
    /// Check the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns [`RecommendError::Proximity`] for an unusable cut-off and
    /// [`RecommendError::InvalidTopK`] when `top_k` is zero.
    pub fn validate(&self) -> Result<(), RecommendError> {
        validate_max_distance(self.max_distance_km)?;
        if self.top_k == 0 {
            return Err(RecommendError::InvalidTopK);
        }
        Ok(())
    }
}

/// Ranks candidates for a query.
///
/// # Examples
///
/// ```
/// use carefind_core::test_support::MemoryResolver;
/// use carefind_core::{Candidate, UserQuery, lat_lon};
/// use carefind_scorer::{FuzzyEngine, Recommender, RecommenderConfig};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let resolver = MemoryResolver::with_entries([("Ikeja", lat_lon(6.6018, 3.3515))]);
/// let recommender =
///     Recommender::new(FuzzyEngine::standard()?, resolver, RecommenderConfig::default())?;
/// let candidates = vec![
///     Candidate::new("Lagoon Heart", "Allen Avenue, Ikeja", "Cardiology, ICU")
///         .with_cost_label("Low")
///         .with_quality_score(4.5)
///         .with_coordinates(lat_lon(6.6150, 3.3580)),
/// ];
/// let query = UserQuery::new("Ikeja", "Cardiology", "Medium", "High");
/// let shortlist = recommender.recommend(&query, &candidates)?;
/// assert_eq!(shortlist.len(), 1);
/// # Ok(())
/// # }
/// ```
pub struct Recommender<S, R> {
    scorer: S,
    resolver: R,
    config: RecommenderConfig,
    observer: Arc<dyn RankingObserver>,
}

impl<S, R> Recommender<S, R>
where
    S: Scorer,
    R: CoordinateResolver,
{
    /// Validate `config` and build a recommender that logs its events.
    ///
    /// # Errors
    ///
    /// See [`RecommenderConfig::validate`].
    pub fn new(scorer: S, resolver: R, config: RecommenderConfig) -> Result<Self, RecommendError> {
        config.validate()?;
        Ok(Self {
            scorer,
            resolver,
            config,
            observer: Arc::new(LogObserver),
        })
    }

    /// Replace the event sink.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn RankingObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// Resolve `address`, reporting failures and using the fallback.
    #[must_use]
    pub fn locate(&self, address: &str) -> Coord<f64> {
        self.resolver.resolve(address).unwrap_or_else(|error| {
            self.observer.location_unresolved(address, &error);
            self.config.fallback_coordinate
        })
    }

    /// Score one candidate relative to `origin`.
    ///
    /// # Errors
    ///
    /// Returns a [`CandidateFault`] when the candidate's quality or
    /// coordinates are not finite.
    pub fn score_candidate(
        &self,
        candidate: &Candidate,
        origin: Coord<f64>,
        query: &UserQuery,
    ) -> Result<ScoredCandidate, CandidateFault> {
        let service_score = candidate.services.match_score(&query.service_needed);
        if service_score <= 0.0 {
            return Ok(ScoredCandidate::new(candidate.clone(), ScoreBreakdown::zero()));
        }
        if !candidate.quality_score.is_finite() {
            return Err(CandidateFault::InvalidQuality {
                value: candidate.quality_score,
            });
        }
        let location = candidate
            .coordinates
            .unwrap_or_else(|| self.locate(&candidate.address));
        if !(location.x.is_finite() && location.y.is_finite()) {
            return Err(CandidateFault::InvalidCoordinates {
                address: candidate.address.clone(),
            });
        }
        let distance_km = haversine_km(origin, location);
        let proximity_score = proximity(distance_km, self.config.max_distance_km);
        let signals = CriteriaSignals {
            cost: candidate.cost_value(),
            quality: candidate.quality_score,
            service_match: service_score,
            proximity: proximity_score,
        };
        let breakdown = ScoreBreakdown {
            service_score,
            proximity_score,
            distance_km: Some(distance_km),
            recommendation_score: self.scorer.score(&signals),
        };
        Ok(ScoredCandidate::new(candidate.clone(), breakdown))
    }

    /// Score every candidate, in dataset order, without filtering.
    ///
    /// Faulty candidates are reported to the observer and score `0.0`.
    ///
    /// # Errors
    ///
    /// Returns [`RecommendError::EmptyCandidates`] when `candidates` is empty.
    pub fn score_all(
        &self,
        query: &UserQuery,
        candidates: &[Candidate],
    ) -> Result<Vec<ScoredCandidate>, RecommendError> {
        if candidates.is_empty() {
            return Err(RecommendError::EmptyCandidates);
        }
        let origin = self.locate(&query.location);
        let scored = candidates
            .iter()
            .map(|candidate| {
                self.score_candidate(candidate, origin, query)
                    .unwrap_or_else(|fault| {
                        self.observer.candidate_faulted(candidate, &fault);
                        ScoredCandidate::new(candidate.clone(), ScoreBreakdown::zero())
                    })
            })
            .inspect(|scored| self.observer.candidate_scored(scored))
            .collect();
        Ok(scored)
    }

    /// Score `candidates` and return the top-K shortlist.
    ///
    /// An empty shortlist is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`RecommendError::EmptyCandidates`] when `candidates` is empty.
    pub fn recommend(
        &self,
        query: &UserQuery,
        candidates: &[Candidate],
    ) -> Result<Vec<ScoredCandidate>, RecommendError> {
        let scored = self.score_all(query, candidates)?;
        let shortlist = select_top(scored, self.config.top_k);
        if shortlist.is_empty() {
            self.observer.shortlist_empty(query);
        }
        Ok(shortlist)
    }
}
