//! Great-circle distance and the linear proximity transform.
//!
//! Coordinates use [`geo::Coord`] with `x` as longitude and `y` as latitude,
//! both in degrees. Use [`lat_lon`] to build one from the conventional
//! `(lat, lon)` order.
//!
//! # Examples
//! ```
//! use carefind_core::{haversine_km, lat_lon, proximity};
//!
//! let a = lat_lon(6.60, 3.35);
//! let b = lat_lon(6.70, 3.35);
//! let km = haversine_km(a, b);
//! assert!((km - 11.12).abs() < 0.01);
//! assert_eq!(proximity(20.0, 10.0), 0.0);
//! ```

use geo::Coord;
use thiserror::Error;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Default distance at which proximity reaches zero.
pub const DEFAULT_MAX_DISTANCE_KM: f64 = 10.0;

/// Errors raised when configuring proximity scoring.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProximityError {
    /// The cut-off distance was zero, negative or not finite.
    #[error("maximum distance must be a positive finite number of kilometres, got {0}")]
    InvalidMaxDistance(f64),
}

/// Build a coordinate from latitude and longitude in degrees.
#[must_use]
pub const fn lat_lon(lat: f64, lon: f64) -> Coord<f64> {
    Coord { x: lon, y: lat }
}

/// Haversine distance between two coordinates on a spherical Earth.
#[must_use]
pub fn haversine_km(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let lat1 = a.y.to_radians();
    let lat2 = b.y.to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = (b.x - a.x).to_radians();
    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let central = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * central
}

/// Closeness in `[0, 1]`, decaying linearly to zero at `max_distance_km`.
///
/// Distances past the threshold clamp to `0.0`. Callers validate
/// `max_distance_km` with [`validate_max_distance`].
#[must_use]
pub fn proximity(distance_km: f64, max_distance_km: f64) -> f64 {
    (1.0 - (distance_km / max_distance_km).min(1.0)).max(0.0)
}

/// Check that a proximity cut-off is usable.
///
/// # Errors
///
/// Returns [`ProximityError::InvalidMaxDistance`] unless the value is finite
/// and strictly positive.
pub fn validate_max_distance(max_distance_km: f64) -> Result<f64, ProximityError> {
    if max_distance_km.is_finite() && max_distance_km > 0.0 {
        Ok(max_distance_km)
    } else {
        Err(ProximityError::InvalidMaxDistance(max_distance_km))
    }
}
