//! Fuzzy inference and ranking for carefind.
//!
//! The crate provides two layers:
//! - **Inference**: [`FuzzyEngine`] is a Mamdani system with triangular
//!   membership functions over four inputs (cost, quality, service match and
//!   proximity) and one output (recommendation). Its rules are a versioned
//!   JSON [`RuleBase`]; the standard rule set ships with the crate.
//! - **Ranking**: [`Recommender`] gathers per-candidate signals using the
//!   matchers in [`carefind_core`], scores each candidate through any
//!   [`Scorer`](carefind_core::Scorer), and selects the top-K. Events are
//!   reported to an injected [`RankingObserver`].
//!
//! # Examples
//!
//! ```
//! use carefind_core::{CriteriaSignals, Scorer};
//! use carefind_scorer::FuzzyEngine;
//!
//! let engine = FuzzyEngine::standard().expect("standard rules compile");
//! let signals = CriteriaSignals { cost: 2.0, quality: 4.5, service_match: 1.0, proximity: 0.9 };
//! let score = engine.score(&signals);
//! assert!((0.0..=1.0).contains(&score));
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod engine;
mod error;
mod membership;
mod observer;
mod recommender;
mod rules;
mod variable;

pub use engine::FuzzyEngine;
pub use error::{CandidateFault, FuzzyError, RecommendError};
pub use membership::Triangle;
pub use observer::{LogObserver, RankingObserver};
pub use recommender::{Recommender, RecommenderConfig};
pub use rules::{Clause, Literal, Rule, RuleBase};
pub use variable::{Axis, FuzzyVariable, FuzzyVariables, OUTPUT_RESOLUTION, Term};
