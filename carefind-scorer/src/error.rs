//! Error types for fuzzy inference and ranking.

use camino::Utf8PathBuf;
use carefind_core::ProximityError;
use thiserror::Error;

/// Errors raised while building the fuzzy engine or loading its rule base.
#[derive(Debug, Error)]
pub enum FuzzyError {
    /// The rule base contained no rules.
    #[error("rule base is empty")]
    EmptyRuleBase,
    /// A rule had no antecedent clauses.
    #[error("rule {rule} has no antecedents")]
    EmptyRule {
        /// Position of the rule in the rule base.
        rule: usize,
    },
    /// A clause within a rule had no literals.
    #[error("rule {rule} contains an empty clause")]
    EmptyClause {
        /// Position of the rule in the rule base.
        rule: usize,
    },
    /// A literal was not of the form `axis.term`.
    #[error("literal '{literal}' must have the form axis.term")]
    MalformedLiteral {
        /// Offending literal.
        literal: String,
    },
    /// A literal named an axis the engine does not know.
    #[error("unknown input axis '{axis}'")]
    UnknownAxis {
        /// Offending axis name.
        axis: String,
    },
    /// A literal named a term missing from its axis.
    #[error("axis '{axis}' has no term '{term}'")]
    UnknownTerm {
        /// Axis the literal referred to.
        axis: String,
        /// Offending term name.
        term: String,
    },
    /// A rule's consequent is not an output term.
    #[error("rule {rule} concludes unknown output term '{term}'")]
    UnknownConsequent {
        /// Position of the rule in the rule base.
        rule: usize,
        /// Offending term name.
        term: String,
    },
    /// Membership break points were not finite and ordered.
    #[error("membership break points must be finite and ordered, got [{left}, {peak}, {right}]")]
    InvalidTriangle {
        /// Left foot.
        left: f64,
        /// Peak.
        peak: f64,
        /// Right foot.
        right: f64,
    },
    /// A variable's universe was empty or not finite.
    #[error("variable '{variable}' must span a finite, non-empty range")]
    InvalidRange {
        /// Variable name.
        variable: String,
    },
    /// Reading a rule-base file failed.
    #[error("failed to read rule base at {path}")]
    ReadRules {
        /// File path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// A rule-base document was not valid JSON for the expected schema.
    #[error("failed to parse rule base")]
    ParseRules {
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
}

/// Errors that stop a whole ranking request.
#[derive(Debug, Error, PartialEq)]
pub enum RecommendError {
    /// No candidates were supplied.
    #[error("no candidates supplied for ranking")]
    EmptyCandidates,
    /// The shortlist length was zero.
    #[error("shortlist length must be at least one")]
    InvalidTopK,
    /// The proximity cut-off was unusable.
    #[error(transparent)]
    Proximity(#[from] ProximityError),
}

/// Faults confined to one candidate. The candidate scores `0.0`.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CandidateFault {
    /// The quality score was not a finite number.
    #[error("quality score {value} is not finite")]
    InvalidQuality {
        /// Offending value.
        value: f64,
    },
    /// The candidate's coordinates were not finite.
    #[error("coordinates for '{address}' are not finite")]
    InvalidCoordinates {
        /// Address whose coordinates were rejected.
        address: String,
    },
}
