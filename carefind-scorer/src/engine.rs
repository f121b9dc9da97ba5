//! Mamdani inference over the four ranking signals.
//!
//! Evaluation fuzzifies each crisp input, fires every rule at
//! `min(max(literal memberships))`, clips the rule's output term at that
//! strength, aggregates by pointwise maximum and defuzzifies with the
//! discrete centroid over [`OUTPUT_RESOLUTION`] samples.
//!
//! The engine is immutable after construction. Output membership curves are
//! sampled once, so evaluation allocates only the per-call working vectors
//! and one engine can be shared across threads.

use carefind_core::{CriteriaSignals, Scorer};

use crate::FuzzyError;
use crate::rules::{Rule, RuleBase};
use crate::variable::{Axis, FuzzyVariable, FuzzyVariables, OUTPUT_RESOLUTION};

#[derive(Debug, Clone)]
struct CompiledRule {
    clauses: Vec<Vec<(Axis, usize)>>,
    consequent: usize,
}

impl CompiledRule {
    fn strength(&self, memberships: &[Vec<f64>; 4]) -> f64 {
        self.clauses
            .iter()
            .map(|clause| {
                clause
                    .iter()
                    .map(|&(axis, term)| {
                        memberships
                            .get(axis.index())
                            .and_then(|degrees| degrees.get(term))
                            .copied()
                            .unwrap_or(0.0)
                    })
                    .fold(0.0, f64::max)
            })
            .fold(1.0, f64::min)
    }
}

/// A compiled fuzzy inference system.
///
/// # Examples
///
/// ```
/// use carefind_core::{CriteriaSignals, Scorer};
/// use carefind_scorer::FuzzyEngine;
///
/// let engine = FuzzyEngine::standard()?;
/// let ideal = CriteriaSignals { cost: 1.0, quality: 5.0, service_match: 1.0, proximity: 1.0 };
/// let miss = CriteriaSignals { service_match: 0.0, ..ideal };
/// assert!(engine.score(&ideal) > engine.score(&miss));
/// # Ok::<(), carefind_scorer::FuzzyError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FuzzyEngine {
    variables: FuzzyVariables,
    rules: Vec<CompiledRule>,
    samples: Vec<f64>,
    output_curves: Vec<Vec<f64>>,
    version: String,
}

impl FuzzyEngine {
    /// Compile `rules` against `variables`.
    ///
    /// # Errors
    ///
    /// Returns [`FuzzyError::EmptyRuleBase`] for an empty rule base,
    /// [`FuzzyError::InvalidRange`] for a degenerate universe, and the
    /// matching variant when a rule is empty or names an unknown term.
    pub fn new(variables: FuzzyVariables, rules: &RuleBase) -> Result<Self, FuzzyError> {
        if rules.is_empty() {
            return Err(FuzzyError::EmptyRuleBase);
        }
        for axis in Axis::ALL {
            check_range(variables.input(axis))?;
        }
        check_range(variables.output())?;

        let compiled = rules
            .rules
            .iter()
            .enumerate()
            .map(|(index, rule)| compile_rule(&variables, index, rule))
            .collect::<Result<Vec<_>, _>>()?;
        let samples = sample_universe(variables.output());
        let output_curves: Vec<Vec<f64>> = variables
            .output()
            .terms()
            .iter()
            .map(|term| samples.iter().map(|&x| term.shape().degree(x)).collect())
            .collect();
        log::debug!(
            "compiled {} fuzzy rules (rule base version {})",
            compiled.len(),
            rules.version
        );
        Ok(Self {
            variables,
            rules: compiled,
            samples,
            output_curves,
            version: rules.version.clone(),
        })
    }

    /// Compile `rules` against the standard variables.
    ///
    /// # Errors
    ///
    /// See [`FuzzyEngine::new`].
    pub fn with_rules(rules: &RuleBase) -> Result<Self, FuzzyError> {
        Self::new(FuzzyVariables::default(), rules)
    }

    /// The standard variables and the embedded rule base.
    ///
    /// # Errors
    ///
    /// See [`RuleBase::standard`] and [`FuzzyEngine::new`].
    pub fn standard() -> Result<Self, FuzzyError> {
        Self::with_rules(&RuleBase::standard()?)
    }

    /// Number of compiled rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Version tag of the compiled rule base.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Variables the engine was compiled against.
    #[must_use]
    pub const fn variables(&self) -> &FuzzyVariables {
        &self.variables
    }

    /// Firing strength of each rule for `signals`, in rule-base order.
    #[must_use]
    pub fn rule_strengths(&self, signals: &CriteriaSignals) -> Vec<f64> {
        let memberships = self.fuzzify(signals);
        self.rules
            .iter()
            .map(|rule| rule.strength(&memberships))
            .collect()
    }

    /// Infer a crisp recommendation for `signals`.
    ///
    /// Returns `0.0` when no rule fires.
    #[must_use]
    pub fn evaluate(&self, signals: &CriteriaSignals) -> f64 {
        let memberships = self.fuzzify(signals);
        let mut aggregate = vec![0.0_f64; self.samples.len()];
        for rule in &self.rules {
            let strength = rule.strength(&memberships);
            if strength <= 0.0 {
                continue;
            }
            let Some(curve) = self.output_curves.get(rule.consequent) else {
                continue;
            };
            for (point, &degree) in aggregate.iter_mut().zip(curve) {
                *point = point.max(degree.min(strength));
            }
        }
        centroid(&self.samples, &aggregate)
    }

    fn fuzzify(&self, signals: &CriteriaSignals) -> [Vec<f64>; 4] {
        Axis::ALL.map(|axis| self.variables.input(axis).fuzzify(axis.signal(signals)))
    }
}

impl Scorer for FuzzyEngine {
    fn score(&self, signals: &CriteriaSignals) -> f64 {
        if !signals.is_finite() {
            return 0.0;
        }
        Self::sanitise(self.evaluate(signals))
    }
}

fn check_range(variable: &FuzzyVariable) -> Result<(), FuzzyError> {
    let (low, high) = variable.range();
    if low.is_finite() && high.is_finite() && low < high {
        Ok(())
    } else {
        Err(FuzzyError::InvalidRange {
            variable: variable.name().to_owned(),
        })
    }
}

fn compile_rule(
    variables: &FuzzyVariables,
    index: usize,
    rule: &Rule,
) -> Result<CompiledRule, FuzzyError> {
    if rule.when.is_empty() {
        return Err(FuzzyError::EmptyRule { rule: index });
    }
    let clauses = rule
        .when
        .iter()
        .map(|clause| {
            if clause.literals().is_empty() {
                return Err(FuzzyError::EmptyClause { rule: index });
            }
            clause
                .literals()
                .iter()
                .map(|literal| {
                    let axis = literal.axis();
                    variables
                        .input(axis)
                        .term_index(literal.term())
                        .map(|term| (axis, term))
                        .ok_or_else(|| FuzzyError::UnknownTerm {
                            axis: axis.as_str().to_owned(),
                            term: literal.term().to_owned(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;
    let consequent = variables.output().term_index(&rule.then).ok_or_else(|| {
        FuzzyError::UnknownConsequent {
            rule: index,
            term: rule.then.clone(),
        }
    })?;
    Ok(CompiledRule {
        clauses,
        consequent,
    })
}

#[expect(
    clippy::float_arithmetic,
    reason = "samples are spaced evenly across the output universe"
)]
fn sample_universe(variable: &FuzzyVariable) -> Vec<f64> {
    let (low, high) = variable.range();
    let last = f64::from(OUTPUT_RESOLUTION - 1);
    (0..OUTPUT_RESOLUTION)
        .map(|step| low + (high - low) * f64::from(step) / last)
        .collect()
}

#[expect(
    clippy::float_arithmetic,
    reason = "centroid defuzzification is a weighted mean"
)]
fn centroid(samples: &[f64], aggregate: &[f64]) -> f64 {
    let area: f64 = aggregate.iter().sum();
    if area <= 0.0 {
        return 0.0;
    }
    let moment: f64 = samples.iter().zip(aggregate).map(|(x, mu)| x * mu).sum();
    moment / area
}
