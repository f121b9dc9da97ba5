//! Facade crate for the carefind hospital recommender.
//!
//! This crate re-exports the core domain types and the fuzzy ranking engine,
//! and exposes the dataset loader and geocoding adapters behind the `data`
//! feature.
//!
//! ```
//! use carefind_engine::{FuzzyEngine, RuleBase};
//!
//! let engine = FuzzyEngine::with_rules(&RuleBase::standard().expect("embedded rules"))
//!     .expect("rules compile");
//! assert_eq!(engine.rule_count(), 28);
//! ```

#![forbid(unsafe_code)]

pub use carefind_core::{
    Candidate, CoordinateResolver, CostLevel, CriteriaSignals, DEFAULT_COORDINATE,
    DEFAULT_MAX_DISTANCE_KM, DEFAULT_QUALITY_SCORE, DEFAULT_TOP_K, Level, ProximityError,
    ResolveError, ScoreBreakdown, ScoredCandidate, Scorer, ServiceList, UserQuery, encode_cost,
    haversine_km, lat_lon, match_service, normalize, proximity, select_top,
};

pub use carefind_scorer::{
    CandidateFault, FuzzyEngine, FuzzyError, LogObserver, RankingObserver, RecommendError,
    Recommender, RecommenderConfig, RuleBase,
};

#[cfg(feature = "data")]
pub use carefind_data::{
    CachingResolver, DatasetError, GeocodeCache, GeocodeCacheError, LoadedDataset,
    NominatimConfig, NominatimGeocoder, load_candidates,
};
