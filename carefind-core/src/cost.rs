//! Categorical cost labels and their numeric encoding.

use std::fmt;

/// Cost tier published for a facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CostLevel {
    /// Cheapest tier.
    Low,
    /// Mid-range tier.
    Medium,
    /// Expensive tier.
    High,
    /// Top tier. Shares the `High` numeric value.
    Premium,
}

/// Value used when a label is missing, `N/A` or unknown.
pub const DEFAULT_COST: f64 = 1.0;

impl CostLevel {
    /// Look up a label after trimming and capitalising it.
    ///
    /// ```
    /// use carefind_core::CostLevel;
    ///
    /// assert_eq!(CostLevel::parse("premium"), Some(CostLevel::Premium));
    /// assert_eq!(CostLevel::parse("N/A"), None);
    /// ```
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        match capitalise(label.trim()).as_str() {
            "Low" => Some(Self::Low),
            "Medium" => Some(Self::Medium),
            "High" => Some(Self::High),
            "Premium" => Some(Self::Premium),
            _ => None,
        }
    }

    /// Numeric position on the cost scale.
    #[must_use]
    pub const fn scale(self) -> f64 {
        match self {
            Self::Low => 1.0,
            Self::Medium => 2.0,
            Self::High | Self::Premium => 3.0,
        }
    }

    /// Return the capitalised label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Premium => "Premium",
        }
    }
}

impl fmt::Display for CostLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encode a raw cost label on the `1.0..=3.0` scale.
///
/// Missing, `N/A` and unrecognised labels encode as the cheapest tier rather
/// than being penalised.
///
/// ```
/// use carefind_core::encode_cost;
///
/// assert_eq!(encode_cost(Some("medium")), 2.0);
/// assert_eq!(encode_cost(Some("Premium")), 3.0);
/// assert_eq!(encode_cost(None), 1.0);
/// ```
#[must_use]
pub fn encode_cost(label: Option<&str>) -> f64 {
    label
        .filter(|raw| !raw.trim().eq_ignore_ascii_case("n/a"))
        .and_then(CostLevel::parse)
        .map_or(DEFAULT_COST, CostLevel::scale)
}

fn capitalise(raw: &str) -> String {
    let mut chars = raw.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}
