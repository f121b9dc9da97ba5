//! Core domain types for the carefind ranking engine.
//!
//! This crate holds the signal extractors that feed inference: the preference
//! normaliser, service matcher, cost encoder and proximity scorer, together
//! with the candidate model and top-K selection. The [`Scorer`] and
//! [`CoordinateResolver`] traits are the seams other crates implement.
//!
//! # Examples
//!
//! ```
//! use carefind_core::{encode_cost, haversine_km, lat_lon, match_service, proximity};
//!
//! let service = match_service("cardiology", "Cardiology, ICU");
//! let km = haversine_km(lat_lon(6.6018, 3.3515), lat_lon(6.6150, 3.3580));
//! assert_eq!(service, 1.0);
//! assert!(proximity(km, 10.0) > 0.8);
//! assert_eq!(encode_cost(Some("Low")), 1.0);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod candidate;
pub mod cost;
pub mod level;
pub mod proximity;
pub mod query;
pub mod resolver;
pub mod scored;
pub mod scorer;
pub mod select;
pub mod service;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use candidate::{Candidate, DEFAULT_QUALITY_SCORE};
pub use cost::{CostLevel, encode_cost};
pub use level::{Level, ParseLevelError, normalize};
pub use proximity::{
    DEFAULT_MAX_DISTANCE_KM, ProximityError, haversine_km, lat_lon, proximity,
    validate_max_distance,
};
pub use query::UserQuery;
pub use resolver::{CoordinateResolver, DEFAULT_COORDINATE, ResolveError};
pub use scored::{ScoreBreakdown, ScoredCandidate};
pub use scorer::{CriteriaSignals, Scorer};
pub use select::{DEFAULT_TOP_K, select_top};
pub use service::{ServiceList, match_service};
