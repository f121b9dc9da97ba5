//! Ordinal preference levels supplied by users.
//!
//! Preferences arrive as free-form strings. [`normalize`] coerces them into a
//! [`Level`] and never fails: unrecognised input falls back to the caller's
//! default.
//!
//! # Examples
//! ```
//! use carefind_core::{Level, normalize};
//!
//! assert_eq!(normalize("  HIGH ", Level::Medium), Level::High);
//! assert_eq!(normalize("cheap", Level::Medium), Level::Medium);
//! assert_eq!(Level::Medium.to_string(), "Medium");
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// One of the three ordinal preference levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Level {
    /// Lowest tolerance.
    Low,
    /// Middle tolerance.
    Medium,
    /// Highest tolerance.
    High,
}

impl Level {
    /// Every level in ascending order.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Return the title-cased label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Scalar weight for callers that need a numeric preference.
    ///
    /// ```
    /// use carefind_core::Level;
    ///
    /// assert_eq!(Level::Low.weight(), 0.33);
    /// assert_eq!(Level::High.weight(), 1.0);
    /// ```
    #[must_use]
    pub const fn weight(self) -> f64 {
        match self {
            Self::Low => 0.33,
            Self::Medium => 0.66,
            Self::High => 1.0,
        }
    }

    /// Parse a level, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a [`Level`] strictly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown level '{0}', expected low, medium or high")]
pub struct ParseLevelError(pub String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseLevelError(s.to_owned()))
    }
}

/// Coerce a free-form preference into a [`Level`].
///
/// Matching is case-insensitive and ignores surrounding whitespace. Anything
/// else, including the empty string, yields `default` and logs a warning.
#[must_use]
pub fn normalize(raw: &str, default: Level) -> Level {
    Level::parse(raw).unwrap_or_else(|| {
        log::warn!("unrecognised preference {raw:?}; using default {default}");
        default
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("low", Level::Low)]
    #[case("  Medium", Level::Medium)]
    #[case("HIGH\t", Level::High)]
    #[case("hIgH", Level::High)]
    fn normalize_accepts_valid_levels(#[case] raw: &str, #[case] expected: Level) {
        assert_eq!(normalize(raw, Level::Low), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("premium")]
    #[case("very high")]
    fn normalize_falls_back_to_default(#[case] raw: &str) {
        assert_eq!(normalize(raw, Level::Medium), Level::Medium);
        assert_eq!(normalize(raw, Level::High), Level::High);
    }

    #[rstest]
    fn from_str_reports_unknown_label() {
        let err = "cheap".parse::<Level>().expect_err("cheap is not a level");
        assert_eq!(err, ParseLevelError("cheap".into()));
    }

    #[rstest]
    fn display_round_trips_through_parse() {
        for level in Level::ALL {
            assert_eq!(Level::parse(&level.to_string()), Some(level));
        }
    }
}
