//! HTTP geocoder backed by a Nominatim search endpoint.
//!
//! [`CoordinateResolver`] is synchronous so the ranking core stays
//! embeddable anywhere. [`NominatimGeocoder`] bridges to async HTTP by
//! blocking on a Tokio runtime it owns, or on the caller's multi-threaded
//! runtime when there is one.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use carefind_core::CoordinateResolver;
//! use carefind_data::{NominatimConfig, NominatimGeocoder};
//!
//! let config = NominatimConfig::new("https://nominatim.openstreetmap.org")
//!     .with_timeout(Duration::from_secs(5))
//!     .with_user_agent("my-clinic-finder/1.0 (ops@example.com)");
//! let geocoder = NominatimGeocoder::with_config(config)?;
//! let ikeja = geocoder.resolve("Ikeja, Lagos")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::time::Duration;

use carefind_core::{CoordinateResolver, ResolveError, lat_lon};
use geo::Coord;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use url::Url;

/// Public Nominatim instance.
pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Default user agent for geocoding requests.
pub const DEFAULT_USER_AGENT: &str = "carefind-geocoder/0.1";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Error type for [`NominatimGeocoder`] construction failures.
#[derive(Debug, Error)]
pub enum GeocoderBuildError {
    /// The base URL does not parse.
    #[error("invalid geocoder base URL '{url}'")]
    BaseUrl {
        /// Rejected URL.
        url: String,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime")]
    Runtime(#[source] std::io::Error),
}

/// Errors from a single geocoding request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocoderError {
    /// The request exceeded the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Configured timeout.
        timeout_secs: u64,
    },
    /// The service answered with a non-success status.
    #[error("request to {url} failed with HTTP {status}: {message}")]
    Http {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The request could not be sent or the response not received.
    #[error("request to {url} failed: {message}")]
    Network {
        /// Requested URL.
        url: String,
        /// Error description.
        message: String,
    },
    /// The response body was not a usable search result.
    #[error("unreadable geocoder response: {message}")]
    Decode {
        /// Error description.
        message: String,
    },
}

/// Configuration for [`NominatimGeocoder`].
#[derive(Debug, Clone)]
pub struct NominatimConfig {
    /// Base URL of the service (e.g. `"https://nominatim.openstreetmap.org"`).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent string; public instances require one that identifies the
    /// application.
    pub user_agent: String,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl NominatimConfig {
    /// Create a configuration for the service at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// One entry of a `format=jsonv2` search response.
#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

/// Geocoder that queries `{base}/search?q=..&format=jsonv2&limit=1`.
pub struct NominatimGeocoder {
    client: Client,
    config: NominatimConfig,
    search_url: Url,
    runtime: Runtime,
}

impl std::fmt::Debug for NominatimGeocoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NominatimGeocoder")
            .field("config", &self.config)
            .field("search_url", &self.search_url.as_str())
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish_non_exhaustive()
    }
}

impl NominatimGeocoder {
    /// Create a geocoder for `base_url` with default settings.
    ///
    /// # Errors
    ///
    /// See [`NominatimGeocoder::with_config`].
    pub fn new(base_url: impl Into<String>) -> Result<Self, GeocoderBuildError> {
        Self::with_config(NominatimConfig::new(base_url))
    }

    /// Create a geocoder with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client or
    /// Tokio runtime fails to build.
    pub fn with_config(config: NominatimConfig) -> Result<Self, GeocoderBuildError> {
        let raw = format!("{}/search", config.base_url.trim_end_matches('/'));
        let search_url = Url::parse(&raw).map_err(|source| GeocoderBuildError::BaseUrl {
            url: config.base_url.clone(),
            source,
        })?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(GeocoderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(GeocoderBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            search_url,
            runtime,
        })
    }

    fn build_search_url(&self, address: &str) -> Url {
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair("q", address)
            .append_pair("format", "jsonv2")
            .append_pair("limit", "1");
        url
    }

    async fn search_async(&self, address: &str) -> Result<Option<Coord<f64>>, GeocoderError> {
        let url = self.build_search_url(address);
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url.as_str()))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, url.as_str()))?;
        let places: Vec<Place> = response
            .json()
            .await
            .map_err(|err| GeocoderError::Decode {
                message: err.to_string(),
            })?;
        convert_places(places)
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> GeocoderError {
        if error.is_timeout() {
            return GeocoderError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }
        if let Some(status) = error.status() {
            return GeocoderError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }
        GeocoderError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }

    /// Look up `address`, returning `None` when the service knows no match.
    ///
    /// # Runtime requirements
    ///
    /// Inside a Tokio runtime the runtime must be multi-threaded; from a
    /// `current_thread` runtime the geocoder blocks on its own runtime,
    /// which stalls the caller's tasks for the duration of the request.
    ///
    /// # Errors
    ///
    /// Returns [`GeocoderError`] when the request or decoding fails.
    pub fn search(&self, address: &str) -> Result<Option<Coord<f64>>, GeocoderError> {
        let future = self.search_async(address);
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}

fn convert_places(places: Vec<Place>) -> Result<Option<Coord<f64>>, GeocoderError> {
    let Some(place) = places.into_iter().next() else {
        return Ok(None);
    };
    let parse = |raw: &str, axis: &str| {
        raw.parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| GeocoderError::Decode {
                message: format!("{axis} '{raw}' is not a coordinate"),
            })
    };
    let lat = parse(&place.lat, "latitude")?;
    let lon = parse(&place.lon, "longitude")?;
    Ok(Some(lat_lon(lat, lon)))
}

impl CoordinateResolver for NominatimGeocoder {
    fn resolve(&self, address: &str) -> Result<Coord<f64>, ResolveError> {
        match self.search(address) {
            Ok(Some(coordinate)) => {
                log::debug!("geocoded '{address}' to ({}, {})", coordinate.y, coordinate.x);
                Ok(coordinate)
            }
            Ok(None) => Err(ResolveError::NotFound {
                address: address.to_owned(),
            }),
            Err(err) => Err(ResolveError::Lookup {
                address: address.to_owned(),
                message: err.to_string(),
            }),
        }
    }
}
