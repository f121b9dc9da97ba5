//! Hospital dataset loader.
//!
//! The dataset is a CSV file with one hospital per row. Rows that lack any
//! of the ranking fields are dropped; the loader reports how many.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use carefind_core::{Candidate, DEFAULT_QUALITY_SCORE, lat_lon};
use csv_async::{AsyncReaderBuilder, StringRecord, Trim};
use futures_util::StreamExt;
use thiserror::Error;
use tokio::io::AsyncRead;

use crate::{fs, runtime};

/// Columns every dataset must carry.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "Name",
    "Full Address",
    "Services",
    "Cost Level",
    "Quality Score",
    "User Rating",
];

/// Columns used when present.
pub const OPTIONAL_COLUMNS: [&str; 2] = ["Latitude", "Longitude"];

const UNKNOWN_ADDRESS: &str = "Unknown";

/// Errors raised while loading a dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The file could not be read.
    #[error("failed to read dataset at {path}")]
    Read {
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The CSV could not be decoded.
    #[error("malformed dataset CSV")]
    Csv {
        /// Underlying CSV failure.
        #[source]
        source: csv_async::Error,
    },
    /// The header row lacks required columns.
    #[error("dataset is missing required columns: {}", .columns.join(", "))]
    MissingColumns {
        /// Names of the absent columns.
        columns: Vec<String>,
    },
    /// No runtime was available to drive the reader.
    #[error("failed to start the dataset reader runtime")]
    Runtime {
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

impl From<csv_async::Error> for DatasetError {
    fn from(source: csv_async::Error) -> Self {
        Self::Csv { source }
    }
}

/// Candidates read from a dataset.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoadedDataset {
    /// Usable rows in file order.
    pub candidates: Vec<Candidate>,
    /// Rows dropped for missing ranking fields.
    pub dropped: usize,
}

/// Positions of the known columns in the header row.
struct Columns {
    name: usize,
    address: usize,
    services: usize,
    cost: usize,
    quality: usize,
    rating: usize,
    latitude: Option<usize>,
    longitude: Option<usize>,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self, DatasetError> {
        let position = |column: &str| headers.iter().position(|header| header == column);
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|column| position(column).is_none())
            .map(|column| (*column).to_owned())
            .collect();
        let required = REQUIRED_COLUMNS.map(position);
        match required {
            [
                Some(name),
                Some(address),
                Some(services),
                Some(cost),
                Some(quality),
                Some(rating),
            ] => Ok(Self {
                name,
                address,
                services,
                cost,
                quality,
                rating,
                latitude: position("Latitude"),
                longitude: position("Longitude"),
            }),
            _ => Err(DatasetError::MissingColumns { columns: missing }),
        }
    }

    /// Build a candidate from `record`, or `None` when a ranking field is blank.
    fn candidate(&self, record: &StringRecord) -> Option<Candidate> {
        let field = |index: usize| record.get(index).filter(|value| !value.is_empty());
        let name = field(self.name)?;
        let services = field(self.services)?;
        let cost = field(self.cost)?;
        let quality = field(self.quality)?;
        let rating = field(self.rating)?;
        let address = field(self.address).unwrap_or(UNKNOWN_ADDRESS);

        let mut candidate = Candidate::new(name, address, services)
            .with_cost_label(cost)
            .with_quality_score(parse_score(quality))
            .with_user_rating(parse_score(rating));
        let coordinate = |index: Option<usize>| {
            index
                .and_then(field)
                .and_then(|value| value.parse::<f64>().ok())
                .filter(|value| value.is_finite())
        };
        if let (Some(lat), Some(lon)) = (coordinate(self.latitude), coordinate(self.longitude)) {
            candidate = candidate.with_coordinates(lat_lon(lat, lon));
        }
        Some(candidate)
    }
}

fn parse_score(raw: &str) -> f64 {
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(DEFAULT_QUALITY_SCORE)
}

/// Read candidates from CSV text.
///
/// Fields are trimmed. Blank `Full Address` values become `"Unknown"`;
/// quality scores and user ratings that are not numbers become `3.0`.
///
/// # Errors
///
/// Returns [`DatasetError::MissingColumns`] when the header lacks a required
/// column and [`DatasetError::Csv`] when the CSV is malformed.
pub async fn read_candidates<R>(reader: R) -> Result<LoadedDataset, DatasetError>
where
    R: AsyncRead + Unpin + Send,
{
    let mut reader = AsyncReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .create_reader(reader);
    let headers = reader.headers().await?.clone();
    let columns = Columns::locate(&headers)?;

    let mut loaded = LoadedDataset::default();
    let mut records = reader.records();
    while let Some(record) = records.next().await {
        match columns.candidate(&record?) {
            Some(candidate) => loaded.candidates.push(candidate),
            None => loaded.dropped += 1,
        }
    }
    if loaded.dropped > 0 {
        log::warn!(
            "dropped {} dataset rows with missing ranking fields",
            loaded.dropped
        );
    }
    log::info!("loaded {} candidates", loaded.candidates.len());
    Ok(loaded)
}

/// Load candidates from the CSV file at `path`.
///
/// # Errors
///
/// Returns [`DatasetError::Read`] when the file cannot be read, otherwise
/// see [`read_candidates`].
pub fn load_candidates(path: &Utf8Path) -> Result<LoadedDataset, DatasetError> {
    let bytes = fs::read_file(path).map_err(|source| DatasetError::Read {
        path: path.to_owned(),
        source,
    })?;
    runtime::block_on(read_candidates(bytes.as_slice()))
        .map_err(|source| DatasetError::Runtime { source })?
}
