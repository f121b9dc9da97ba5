//! Resolve free-form addresses to coordinates.
//!
//! The ranking core only needs a function from address to coordinate.
//! Caching, rate limiting and network access belong to implementations.

use geo::Coord;
use thiserror::Error;

use crate::proximity::lat_lon;

/// Coordinate used when an address cannot be resolved: central Lagos.
pub const DEFAULT_COORDINATE: Coord<f64> = lat_lon(6.5244, 3.3792);

/// Errors from [`CoordinateResolver::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The address is known not to resolve.
    #[error("no coordinates found for '{address}'")]
    NotFound {
        /// Address that failed.
        address: String,
    },
    /// The lookup itself failed.
    #[error("lookup for '{address}' failed: {message}")]
    Lookup {
        /// Address that failed.
        address: String,
        /// Description of the underlying failure.
        message: String,
    },
}

/// Translate addresses into coordinates.
///
/// Implementations must be thread-safe so a resolver can be shared by
/// concurrent ranking requests.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use carefind_core::{CoordinateResolver, ResolveError, lat_lon};
///
/// struct Fixed;
///
/// impl CoordinateResolver for Fixed {
///     fn resolve(&self, _address: &str) -> Result<Coord<f64>, ResolveError> {
///         Ok(lat_lon(6.6, 3.35))
///     }
/// }
///
/// assert_eq!(Fixed.resolve("Ikeja").map(|c| c.y), Ok(6.6));
/// ```
pub trait CoordinateResolver: Send + Sync {
    /// Resolve `address` to a coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] when the address cannot be located.
    fn resolve(&self, address: &str) -> Result<Coord<f64>, ResolveError>;
}

impl<R: CoordinateResolver + ?Sized> CoordinateResolver for &R {
    fn resolve(&self, address: &str) -> Result<Coord<f64>, ResolveError> {
        (**self).resolve(address)
    }
}

impl<R: CoordinateResolver + ?Sized> CoordinateResolver for Box<R> {
    fn resolve(&self, address: &str) -> Result<Coord<f64>, ResolveError> {
        (**self).resolve(address)
    }
}

impl<R: CoordinateResolver + ?Sized> CoordinateResolver for std::sync::Arc<R> {
    fn resolve(&self, address: &str) -> Result<Coord<f64>, ResolveError> {
        (**self).resolve(address)
    }
}
