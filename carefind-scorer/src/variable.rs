//! Linguistic variables: named axes partitioned into fuzzy terms.

use std::fmt;
use std::str::FromStr;

use carefind_core::CriteriaSignals;

use crate::FuzzyError;
use crate::membership::Triangle;

/// One of the four crisp inputs consumed by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Encoded cost tier.
    Cost,
    /// Quality rating.
    Quality,
    /// Service match score.
    ServiceMatch,
    /// Proximity score.
    Proximity,
}

impl Axis {
    /// Every input axis in evaluation order.
    pub const ALL: [Self; 4] = [Self::Cost, Self::Quality, Self::ServiceMatch, Self::Proximity];

    /// Identifier used in rule literals.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cost => "cost",
            Self::Quality => "quality",
            Self::ServiceMatch => "service_match",
            Self::Proximity => "proximity",
        }
    }

    /// Position within [`Axis::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Cost => 0,
            Self::Quality => 1,
            Self::ServiceMatch => 2,
            Self::Proximity => 3,
        }
    }

    /// Select this axis's crisp value from `signals`.
    #[must_use]
    pub const fn signal(self, signals: &CriteriaSignals) -> f64 {
        match self {
            Self::Cost => signals.cost,
            Self::Quality => signals.quality,
            Self::ServiceMatch => signals.service_match,
            Self::Proximity => signals.proximity,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Axis {
    type Err = FuzzyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|axis| axis.as_str() == s)
            .ok_or_else(|| FuzzyError::UnknownAxis { axis: s.to_owned() })
    }
}

/// A named term on a [`FuzzyVariable`].
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    name: String,
    shape: Triangle,
}

impl Term {
    /// Term name as used in rules.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Membership function.
    #[must_use]
    pub const fn shape(&self) -> Triangle {
        self.shape
    }
}

/// A bounded axis with ordered linguistic terms.
///
/// # Examples
///
/// ```
/// use carefind_scorer::{FuzzyVariable, Triangle};
///
/// let proximity = FuzzyVariable::new("proximity", 0.0, 1.0)
///     .with_term("far", Triangle::new(0.0, 0.0, 0.3)?)
///     .with_term("close", Triangle::new(0.6, 1.0, 1.0)?);
/// assert_eq!(proximity.fuzzify(1.4), vec![0.0, 1.0]);
/// # Ok::<(), carefind_scorer::FuzzyError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyVariable {
    name: String,
    low: f64,
    high: f64,
    terms: Vec<Term>,
}

impl FuzzyVariable {
    /// Create a variable over `[low, high]` with no terms.
    pub fn new(name: impl Into<String>, low: f64, high: f64) -> Self {
        Self {
            name: name.into(),
            low,
            high,
            terms: Vec::new(),
        }
    }

    /// Append a term.
    #[must_use]
    pub fn with_term(mut self, name: impl Into<String>, shape: Triangle) -> Self {
        self.terms.push(Term {
            name: name.into(),
            shape,
        });
        self
    }

    /// Variable name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Universe of discourse as `(low, high)`.
    #[must_use]
    pub const fn range(&self) -> (f64, f64) {
        (self.low, self.high)
    }

    /// Terms in declaration order.
    #[must_use]
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Index of the term called `name`.
    #[must_use]
    pub fn term_index(&self, name: &str) -> Option<usize> {
        self.terms.iter().position(|term| term.name == name)
    }

    /// Clamp `x` into the universe.
    #[must_use]
    pub const fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.low, self.high)
    }

    /// Membership of `x` in each term, in declaration order.
    ///
    /// Inputs outside the universe are clamped first.
    #[must_use]
    pub fn fuzzify(&self, x: f64) -> Vec<f64> {
        let x = self.clamp(x);
        self.terms.iter().map(|term| term.shape.degree(x)).collect()
    }
}

/// Number of samples taken across the output universe.
pub const OUTPUT_RESOLUTION: u32 = 101;

/// The engine's four inputs and its single output.
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyVariables {
    inputs: [FuzzyVariable; 4],
    output: FuzzyVariable,
}

impl FuzzyVariables {
    /// Assemble a set of variables.
    ///
    /// `inputs` must follow the order of [`Axis::ALL`].
    #[must_use]
    pub const fn new(inputs: [FuzzyVariable; 4], output: FuzzyVariable) -> Self {
        Self { inputs, output }
    }

    /// Variable for `axis`.
    #[must_use]
    pub const fn input(&self, axis: Axis) -> &FuzzyVariable {
        match axis {
            Axis::Cost => &self.inputs[0],
            Axis::Quality => &self.inputs[1],
            Axis::ServiceMatch => &self.inputs[2],
            Axis::Proximity => &self.inputs[3],
        }
    }

    /// Output variable.
    #[must_use]
    pub const fn output(&self) -> &FuzzyVariable {
        &self.output
    }
}

impl Default for FuzzyVariables {
    fn default() -> Self {
        let cost = FuzzyVariable::new(Axis::Cost.as_str(), 1.0, 3.0)
            .with_term("low", Triangle::ordered(1.0, 1.0, 1.5))
            .with_term("medium", Triangle::ordered(1.2, 1.5, 2.0))
            .with_term("high", Triangle::ordered(1.5, 2.0, 2.5))
            .with_term("premium", Triangle::ordered(2.0, 3.0, 3.0));
        let quality = FuzzyVariable::new(Axis::Quality.as_str(), 2.0, 5.0)
            .with_term("low", Triangle::ordered(2.0, 2.0, 3.0))
            .with_term("medium", Triangle::ordered(2.5, 3.0, 4.0))
            .with_term("high", Triangle::ordered(3.5, 5.0, 5.0));
        // The outer terms of the two critical axes are full-width ramps, so
        // raising either signal can only move weight from low towards high.
        let service_match = FuzzyVariable::new(Axis::ServiceMatch.as_str(), 0.0, 1.0)
            .with_term("low", Triangle::ordered(0.0, 0.0, 1.0))
            .with_term("medium", Triangle::ordered(0.2, 0.5, 0.7))
            .with_term("high", Triangle::ordered(0.0, 1.0, 1.0));
        let proximity = FuzzyVariable::new(Axis::Proximity.as_str(), 0.0, 1.0)
            .with_term("far", Triangle::ordered(0.0, 0.0, 1.0))
            .with_term("medium", Triangle::ordered(0.2, 0.5, 0.7))
            .with_term("close", Triangle::ordered(0.0, 1.0, 1.0));
        let recommendation = FuzzyVariable::new("recommendation", 0.0, 1.0)
            .with_term("low", Triangle::ordered(0.0, 0.0, 0.4))
            .with_term("medium", Triangle::ordered(0.3, 0.5, 0.6))
            .with_term("high", Triangle::ordered(0.7, 0.85, 1.0));
        Self::new([cost, quality, service_match, proximity], recommendation)
    }
}
