//! Rule bases as versioned data.
//!
//! A rule is written in conjunctive normal form: it fires at the minimum over
//! its clauses, and each clause at the maximum over its literals. Literals
//! are `axis.term` strings, so a rule reads as
//!
//! ```json
//! { "when": [["cost.low"], ["service_match.low", "proximity.far"]], "then": "low" }
//! ```
//!
//! Rule order is preserved for reproducible diagnostics; it does not affect
//! the inferred score.

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::FuzzyError;
use crate::variable::Axis;

const STANDARD_RULES: &str = include_str!("../rules/default.json");

/// A reference to one term on one input axis.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Literal {
    axis: Axis,
    term: String,
}

impl Literal {
    /// Refer to `term` on `axis`.
    pub fn new(axis: Axis, term: impl Into<String>) -> Self {
        Self {
            axis,
            term: term.into(),
        }
    }

    /// Input axis.
    #[must_use]
    pub const fn axis(&self) -> Axis {
        self.axis
    }

    /// Term name.
    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }
}

impl TryFrom<String> for Literal {
    type Error = FuzzyError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        let malformed = || FuzzyError::MalformedLiteral {
            literal: raw.clone(),
        };
        let (axis, term) = raw.split_once('.').ok_or_else(malformed)?;
        if term.is_empty() {
            return Err(malformed());
        }
        Ok(Self::new(axis.parse()?, term))
    }
}

impl From<Literal> for String {
    fn from(literal: Literal) -> Self {
        format!("{}.{}", literal.axis, literal.term)
    }
}

/// Literals joined by OR.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Clause(Vec<Literal>);

impl Clause {
    /// Build a clause from its alternatives.
    #[must_use]
    pub const fn any_of(literals: Vec<Literal>) -> Self {
        Self(literals)
    }

    /// Alternatives in declaration order.
    #[must_use]
    pub fn literals(&self) -> &[Literal] {
        &self.0
    }
}

/// Clauses joined by AND, concluding one output term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Optional label shown in diagnostics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Antecedent clauses.
    pub when: Vec<Clause>,
    /// Output term.
    pub then: String,
}

/// An ordered, versioned collection of rules.
///
/// # Examples
///
/// ```
/// use carefind_scorer::RuleBase;
///
/// let rules = RuleBase::standard()?;
/// assert_eq!(rules.version, "2");
/// assert_eq!(rules.len(), 28);
/// # Ok::<(), carefind_scorer::FuzzyError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleBase {
    /// Version tag of the rule set.
    pub version: String,
    /// Rules in authoring order.
    pub rules: Vec<Rule>,
}

impl RuleBase {
    /// The rule base shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns [`FuzzyError::ParseRules`] if the embedded document is
    /// malformed.
    pub fn standard() -> Result<Self, FuzzyError> {
        Self::from_json(STANDARD_RULES)
    }

    /// Parse a rule base from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`FuzzyError::ParseRules`] when the text does not match the
    /// schema, including malformed literals.
    pub fn from_json(text: &str) -> Result<Self, FuzzyError> {
        serde_json::from_str(text).map_err(|source| FuzzyError::ParseRules { source })
    }

    /// Read and parse a rule base file.
    ///
    /// # Errors
    ///
    /// Returns [`FuzzyError::ReadRules`] when the file cannot be read and
    /// [`FuzzyError::ParseRules`] when it cannot be parsed.
    pub fn from_path(path: &Utf8Path) -> Result<Self, FuzzyError> {
        let text =
            std::fs::read_to_string(path.as_std_path()).map_err(|source| FuzzyError::ReadRules {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_json(&text)
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the rule base holds no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
