//! Persisted geocoding results and a resolver that consults them first.
//!
//! The cache file is a two-column CSV (`Address`, `Coordinates`). Resolved
//! addresses store `(lat,lon)`; addresses known not to resolve store `None`
//! so they are not looked up again.

use std::collections::BTreeMap;
use std::io;
use std::sync::{Mutex, MutexGuard, PoisonError};

use camino::{Utf8Path, Utf8PathBuf};
use carefind_core::{CoordinateResolver, ResolveError, lat_lon};
use csv_async::{AsyncReaderBuilder, AsyncWriter, Trim};
use futures_util::StreamExt;
use geo::Coord;
use thiserror::Error;

use crate::{fs, runtime};

const ADDRESS_COLUMN: &str = "Address";
const COORDINATES_COLUMN: &str = "Coordinates";
const UNRESOLVED: &str = "None";

/// A cache entry: a coordinate, or `None` for a remembered failure.
pub type CachedCoordinate = Option<Coord<f64>>;

/// Errors raised while loading or saving the cache.
#[derive(Debug, Error)]
pub enum GeocodeCacheError {
    /// The cache file could not be read.
    #[error("failed to read geocode cache at {path}")]
    Read {
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The cache file could not be written.
    #[error("failed to write geocode cache at {path}")]
    Write {
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The cache CSV could not be decoded or encoded.
    #[error("malformed geocode cache CSV")]
    Csv {
        /// Underlying CSV failure.
        #[source]
        source: csv_async::Error,
    },
    /// The header row lacks `Address` or `Coordinates`.
    #[error("geocode cache must have 'Address' and 'Coordinates' columns")]
    MissingColumns,
    /// No runtime was available to drive the CSV codec.
    #[error("failed to start the geocode cache runtime")]
    Runtime {
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

impl From<csv_async::Error> for GeocodeCacheError {
    fn from(source: csv_async::Error) -> Self {
        Self::Csv { source }
    }
}

/// In-memory view of the geocode cache file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeocodeCache {
    entries: BTreeMap<String, CachedCoordinate>,
}

impl GeocodeCache {
    /// Load the cache at `path`. A missing file yields an empty cache.
    ///
    /// Entries whose coordinates cannot be parsed are skipped so the address
    /// is looked up again.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeCacheError`] when the file exists but cannot be read
    /// or decoded.
    pub fn load(path: &Utf8Path) -> Result<Self, GeocodeCacheError> {
        let bytes = match fs::read_file(path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("no geocode cache at {path}; starting empty");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(GeocodeCacheError::Read {
                    path: path.to_owned(),
                    source,
                });
            }
        };
        runtime::block_on(Self::decode(&bytes))
            .map_err(|source| GeocodeCacheError::Runtime { source })?
    }

    /// Write the cache to `path`, replacing any previous file.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeCacheError`] when encoding or writing fails.
    pub fn save(&self, path: &Utf8Path) -> Result<(), GeocodeCacheError> {
        let bytes = runtime::block_on(self.encode())
            .map_err(|source| GeocodeCacheError::Runtime { source })??;
        fs::write_file(path, &bytes).map_err(|source| GeocodeCacheError::Write {
            path: path.to_owned(),
            source,
        })?;
        log::debug!("saved {} geocode cache entries to {path}", self.len());
        Ok(())
    }

    async fn decode(bytes: &[u8]) -> Result<Self, GeocodeCacheError> {
        let mut reader = AsyncReaderBuilder::new()
            .trim(Trim::All)
            .create_reader(bytes);
        let headers = reader.headers().await?.clone();
        let address_at = headers.iter().position(|h| h == ADDRESS_COLUMN);
        let coordinates_at = headers.iter().position(|h| h == COORDINATES_COLUMN);
        let (Some(address_at), Some(coordinates_at)) = (address_at, coordinates_at) else {
            return Err(GeocodeCacheError::MissingColumns);
        };

        let mut cache = Self::default();
        let mut records = reader.records();
        while let Some(record) = records.next().await {
            let record = record?;
            let (Some(address), Some(raw)) = (record.get(address_at), record.get(coordinates_at))
            else {
                continue;
            };
            match parse_coordinates(raw) {
                Some(entry) => {
                    cache.entries.insert(address.to_owned(), entry);
                }
                None => log::warn!("ignoring unreadable cached coordinates for '{address}'"),
            }
        }
        Ok(cache)
    }

    async fn encode(&self) -> Result<Vec<u8>, GeocodeCacheError> {
        let mut buffer = Vec::new();
        {
            let mut writer = AsyncWriter::from_writer(&mut buffer);
            writer
                .write_record(&[ADDRESS_COLUMN, COORDINATES_COLUMN])
                .await?;
            for (address, entry) in &self.entries {
                let coordinates = format_coordinates(*entry);
                writer
                    .write_record(&[address.as_str(), coordinates.as_str()])
                    .await?;
            }
            writer.flush().await.map_err(csv_async::Error::from)?;
        }
        Ok(buffer)
    }

    /// Look up `address`. `Some(None)` is a remembered failure.
    #[must_use]
    pub fn get(&self, address: &str) -> Option<CachedCoordinate> {
        self.entries.get(address).copied()
    }

    /// Record the outcome for `address`.
    pub fn insert(&mut self, address: impl Into<String>, entry: CachedCoordinate) {
        self.entries.insert(address.into(), entry);
    }

    /// Number of cached addresses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no addresses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse `(lat,lon)` or `None`. Returns `None` for anything else.
fn parse_coordinates(raw: &str) -> Option<CachedCoordinate> {
    if raw == UNRESOLVED {
        return Some(None);
    }
    let inner = raw.trim().strip_prefix('(')?.strip_suffix(')')?;
    let (lat, lon) = inner.split_once(',')?;
    let lat = lat.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
    let lon = lon.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
    Some(Some(lat_lon(lat, lon)))
}

fn format_coordinates(entry: CachedCoordinate) -> String {
    entry.map_or_else(|| UNRESOLVED.to_owned(), |c| format!("({},{})", c.y, c.x))
}

/// Resolver that answers from a [`GeocodeCache`] and falls back to an
/// upstream resolver on a miss.
///
/// Successful lookups and definite misses ([`ResolveError::NotFound`]) are
/// recorded; transient failures are not. Without an upstream resolver the
/// cache is consulted alone.
#[derive(Debug)]
pub struct CachingResolver<R> {
    upstream: Option<R>,
    cache: Mutex<GeocodeCache>,
}

impl<R: CoordinateResolver> CachingResolver<R> {
    /// Resolve through `upstream`, remembering outcomes in `cache`.
    pub const fn new(upstream: R, cache: GeocodeCache) -> Self {
        Self {
            upstream: Some(upstream),
            cache: Mutex::new(cache),
        }
    }

    /// Answer from `cache` only.
    pub const fn offline(cache: GeocodeCache) -> Self {
        Self {
            upstream: None,
            cache: Mutex::new(cache),
        }
    }

    fn entries(&self) -> MutexGuard<'_, GeocodeCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current cache contents.
    #[must_use]
    pub fn snapshot(&self) -> GeocodeCache {
        self.entries().clone()
    }

    /// Consume the resolver and return the cache.
    #[must_use]
    pub fn into_cache(self) -> GeocodeCache {
        self.cache.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<R: CoordinateResolver> CoordinateResolver for CachingResolver<R> {
    fn resolve(&self, address: &str) -> Result<Coord<f64>, ResolveError> {
        let not_found = || ResolveError::NotFound {
            address: address.to_owned(),
        };
        // The lock is released before any upstream request.
        let cached = self.entries().get(address);
        match cached {
            Some(Some(coordinate)) => return Ok(coordinate),
            Some(None) => return Err(not_found()),
            None => {}
        }
        let Some(upstream) = &self.upstream else {
            return Err(not_found());
        };
        let outcome = upstream.resolve(address);
        match &outcome {
            Ok(coordinate) => self.entries().insert(address, Some(*coordinate)),
            Err(ResolveError::NotFound { .. }) => self.entries().insert(address, None),
            Err(ResolveError::Lookup { .. }) => {}
        }
        outcome
    }
}
