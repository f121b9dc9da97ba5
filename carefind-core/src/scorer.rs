//! Combine per-candidate signals into one recommendation score.
//!
//! The `Scorer` trait is the evaluation seam between signal gathering and
//! inference: a pure function of four crisp inputs.

/// Crisp inputs for one candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriteriaSignals {
    /// Encoded cost on the `1.0..=3.0` scale.
    pub cost: f64,
    /// Quality rating.
    pub quality: f64,
    /// Service match in `[0, 1]`.
    pub service_match: f64,
    /// Proximity in `[0, 1]`.
    pub proximity: f64,
}

impl CriteriaSignals {
    /// Whether every input is finite.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.cost.is_finite()
            && self.quality.is_finite()
            && self.service_match.is_finite()
            && self.proximity.is_finite()
    }
}

/// Produce a recommendation score from [`CriteriaSignals`].
///
/// Implementations must be thread-safe (`Send` + `Sync`) and hold no
/// mutable state, so one instance can serve concurrent evaluations.
/// The method is infallible; implementers must return `0.0` when no
/// evidence supports a recommendation.
///
/// Implementations must:
/// - Produce finite scores.
/// - Return values in `0.0..=1.0`.
///
/// Use [`Scorer::sanitise`] to apply these guards.
///
/// # Examples
///
/// ```rust
/// use carefind_core::{CriteriaSignals, Scorer};
///
/// struct ServiceOnly;
///
/// impl Scorer for ServiceOnly {
///     fn score(&self, signals: &CriteriaSignals) -> f64 {
///         Self::sanitise(signals.service_match)
///     }
/// }
///
/// let signals = CriteriaSignals { cost: 1.0, quality: 4.0, service_match: 0.95, proximity: 0.5 };
/// assert_eq!(ServiceOnly.score(&signals), 0.95);
/// ```
pub trait Scorer: Send + Sync {
    /// Return a score for `signals`.
    fn score(&self, signals: &CriteriaSignals) -> f64;

    /// Clamp and validate a raw score.
    ///
    /// Returns `0.0` for non-finite values and clamps to `0.0..=1.0`.
    fn sanitise(score: f64) -> f64
    where
        Self: Sized,
    {
        if !score.is_finite() {
            return 0.0;
        }
        score.clamp(0.0, 1.0)
    }
}

impl<S: Scorer + ?Sized> Scorer for &S {
    fn score(&self, signals: &CriteriaSignals) -> f64 {
        (**self).score(signals)
    }
}

impl<S: Scorer + ?Sized> Scorer for std::sync::Arc<S> {
    fn score(&self, signals: &CriteriaSignals) -> f64 {
        (**self).score(signals)
    }
}
