//! Match a requested service against a facility's published service list.
//!
//! Scores are graded so that exact and near-exact matches always outrank
//! keyword overlap:
//!
//! | Outcome | Score |
//! |---|---|
//! | exact term | [`EXACT_MATCH`] |
//! | term contains the request | [`PARTIAL_MATCH`] |
//! | a requested word appears anywhere | [`KEYWORD_MATCH`] |
//! | nothing | [`NO_MATCH`] |
//!
//! A request for plain `surgery` is handled separately so that general
//! surgical needs are not matched to dental, oral or cosmetic specialties.
//!
//! # Examples
//! ```
//! use carefind_core::match_service;
//!
//! assert_eq!(match_service("cardiology", "Cardiology, ICU"), 1.0);
//! assert_eq!(match_service("surgery", "Surgery, Dental Surgery"), 0.0);
//! assert_eq!(match_service("xyz", "Cardiology"), 0.0);
//! ```

use std::fmt;

/// Score for an exact term match.
pub const EXACT_MATCH: f64 = 1.0;
/// Score when a term contains the requested service.
pub const PARTIAL_MATCH: f64 = 0.95;
/// Score when any requested word appears in the list.
pub const KEYWORD_MATCH: f64 = 0.5;
/// Score when nothing matches.
pub const NO_MATCH: f64 = 0.0;

const SURGERY: &str = "surgery";
const GENERAL_SURGERY_TERMS: [&str; 2] = ["surgery", "surgical services"];
const SPECIALTY_SURGERY_TERMS: [&str; 3] = ["dental surgery", "oral surgery", "cosmetic surgery"];
const SPECIALTY_QUALIFIERS: [&str; 3] = ["dental", "oral", "cosmetic"];

/// Services offered by a facility, parsed from a comma-separated field.
///
/// Terms keep their published spelling for display; matching is
/// case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceList {
    terms: Vec<String>,
}

impl ServiceList {
    /// Split `raw` on commas, trimming terms and dropping empty ones.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let terms = raw
            .split(',')
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(ToOwned::to_owned)
            .collect();
        Self { terms }
    }

    /// Published terms in their original order.
    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Whether no services are listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Score how well this list satisfies `requested`.
    #[must_use]
    pub fn match_score(&self, requested: &str) -> f64 {
        let requested = requested.trim().to_lowercase();
        if requested.is_empty() || self.terms.is_empty() {
            return NO_MATCH;
        }
        let terms: Vec<String> = self.terms.iter().map(|term| term.to_lowercase()).collect();
        if requested == SURGERY {
            return surgery_score(&terms);
        }
        if terms.iter().any(|term| *term == requested) {
            return EXACT_MATCH;
        }
        if terms.iter().any(|term| term.contains(requested.as_str())) {
            return PARTIAL_MATCH;
        }
        let joined = terms.join(" ");
        if requested.split_whitespace().any(|word| joined.contains(word)) {
            return KEYWORD_MATCH;
        }
        NO_MATCH
    }
}

impl From<&str> for ServiceList {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl fmt::Display for ServiceList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.terms.join(", "))
    }
}

/// Score a raw comma-separated service field against `requested`.
#[must_use]
pub fn match_service(requested: &str, candidate_services: &str) -> f64 {
    ServiceList::parse(candidate_services).match_score(requested)
}

fn surgery_score(terms: &[String]) -> f64 {
    let has = |wanted: &str| terms.iter().any(|term| term == wanted);
    if GENERAL_SURGERY_TERMS.iter().any(|term| has(term)) {
        // Any specialty listing voids the general match.
        if SPECIALTY_SURGERY_TERMS.iter().any(|term| has(term)) {
            return NO_MATCH;
        }
        return EXACT_MATCH;
    }
    let general_variant = terms.iter().any(|term| {
        term.contains(SURGERY)
            && !SPECIALTY_QUALIFIERS
                .iter()
                .any(|qualifier| term.contains(qualifier))
    });
    if general_variant { PARTIAL_MATCH } else { NO_MATCH }
}
