//! Facilities offered for ranking.

use geo::Coord;

use crate::cost::CostLevel;
use crate::service::ServiceList;

/// Quality score assumed when the published value is absent or invalid.
pub const DEFAULT_QUALITY_SCORE: f64 = 3.0;

/// A facility as supplied by the dataset collaborator.
///
/// Candidates are immutable during scoring.
///
/// # Examples
///
/// ```
/// use carefind_core::{Candidate, CostLevel, lat_lon};
///
/// let candidate = Candidate::new("Lagoon Heart", "12 Allen Avenue, Ikeja", "Cardiology, ICU")
///     .with_cost_label("Low")
///     .with_quality_score(4.5)
///     .with_coordinates(lat_lon(6.615, 3.358));
/// assert_eq!(candidate.cost_level, Some(CostLevel::Low));
/// assert_eq!(candidate.services.terms().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Display name.
    pub name: String,
    /// Postal address used for geocoding.
    pub address: String,
    /// Services offered.
    pub services: ServiceList,
    /// Cost label as published, for presentation.
    pub cost_label: String,
    /// Parsed cost tier, `None` for `N/A` or unknown labels.
    pub cost_level: Option<CostLevel>,
    /// Quality rating on the dataset's scale.
    pub quality_score: f64,
    /// Average user rating.
    pub user_rating: f64,
    /// Known coordinates, if the dataset carries them.
    pub coordinates: Option<Coord<f64>>,
}

impl Candidate {
    /// Create a candidate with default cost, quality and rating.
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        services: impl AsRef<str>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            services: ServiceList::parse(services.as_ref()),
            cost_label: "N/A".to_owned(),
            cost_level: None,
            quality_score: DEFAULT_QUALITY_SCORE,
            user_rating: DEFAULT_QUALITY_SCORE,
            coordinates: None,
        }
    }

    /// Set the cost label, parsing it into a [`CostLevel`] when recognised.
    #[must_use]
    pub fn with_cost_label(mut self, label: impl Into<String>) -> Self {
        let label = label.into();
        self.cost_level = CostLevel::parse(&label);
        self.cost_label = label;
        self
    }

    /// Set the quality score.
    #[must_use]
    pub const fn with_quality_score(mut self, score: f64) -> Self {
        self.quality_score = score;
        self
    }

    /// Set the user rating.
    #[must_use]
    pub const fn with_user_rating(mut self, rating: f64) -> Self {
        self.user_rating = rating;
        self
    }

    /// Attach known coordinates.
    #[must_use]
    pub const fn with_coordinates(mut self, coordinates: Coord<f64>) -> Self {
        self.coordinates = Some(coordinates);
        self
    }

    /// Numeric cost input, see [`encode_cost`](crate::encode_cost).
    #[must_use]
    pub fn cost_value(&self) -> f64 {
        crate::cost::encode_cost(Some(self.cost_label.as_str()))
    }
}
