//! User queries with normalised preferences.

use crate::level::{Level, normalize};

/// Level assumed for an unrecognised cost preference.
pub const DEFAULT_COST_PREFERENCE: Level = Level::Medium;
/// Level assumed for an unrecognised quality preference.
pub const DEFAULT_QUALITY_PREFERENCE: Level = Level::High;

/// What the user asked for.
///
/// Preferences are always one of the three [`Level`]s; [`UserQuery::new`]
/// normalises raw strings and never fails.
///
/// # Examples
///
/// ```
/// use carefind_core::{Level, UserQuery};
///
/// let query = UserQuery::new("Ikeja", "Cardiology", "medium", "premium");
/// assert_eq!(query.cost_preference, Level::Medium);
/// assert_eq!(query.quality_preference, Level::High);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserQuery {
    /// Free-form location to search around.
    pub location: String,
    /// Service the user needs.
    pub service_needed: String,
    /// Tolerance for cost.
    pub cost_preference: Level,
    /// Expected quality.
    pub quality_preference: Level,
}

impl UserQuery {
    /// Build a query, normalising both preferences.
    pub fn new(
        location: impl Into<String>,
        service_needed: impl Into<String>,
        cost_preference: &str,
        quality_preference: &str,
    ) -> Self {
        Self {
            location: location.into(),
            service_needed: service_needed.into(),
            cost_preference: normalize(cost_preference, DEFAULT_COST_PREFERENCE),
            quality_preference: normalize(quality_preference, DEFAULT_QUALITY_PREFERENCE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "", Level::Medium, Level::High)]
    #[case("low", "LOW", Level::Low, Level::Low)]
    #[case("expensive", " medium ", Level::Medium, Level::Medium)]
    fn preferences_are_normalised(
        #[case] cost: &str,
        #[case] quality: &str,
        #[case] expected_cost: Level,
        #[case] expected_quality: Level,
    ) {
        let query = UserQuery::new("Yaba", "Maternity", cost, quality);
        assert_eq!(query.cost_preference, expected_cost);
        assert_eq!(query.quality_preference, expected_quality);
    }
}
