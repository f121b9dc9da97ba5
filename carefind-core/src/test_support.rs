//! In-memory doubles used by unit and behaviour tests.

use std::collections::HashMap;

use geo::Coord;

use crate::{CoordinateResolver, CriteriaSignals, ResolveError, Scorer};

/// Resolver backed by a fixed address table.
///
/// Lookups are exact string matches; unknown addresses report
/// [`ResolveError::NotFound`].
#[derive(Debug, Default, Clone)]
pub struct MemoryResolver {
    entries: HashMap<String, Coord<f64>>,
}

impl MemoryResolver {
    /// Create a resolver from `(address, coordinate)` pairs.
    pub fn with_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Coord<f64>)>,
        S: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(address, coord)| (address.into(), coord))
                .collect(),
        }
    }
}

impl CoordinateResolver for MemoryResolver {
    fn resolve(&self, address: &str) -> Result<Coord<f64>, ResolveError> {
        self.entries
            .get(address)
            .copied()
            .ok_or_else(|| ResolveError::NotFound {
                address: address.to_owned(),
            })
    }
}

/// Scorer that returns the mean of service match and proximity.
#[derive(Debug, Copy, Clone, Default)]
pub struct MeanScorer;

impl Scorer for MeanScorer {
    fn score(&self, signals: &CriteriaSignals) -> f64 {
        Self::sanitise((signals.service_match + signals.proximity) / 2.0)
    }
}
