//! Error types emitted by the carefind CLI.

use std::sync::Arc;

use camino::Utf8PathBuf;
use carefind_data::{DatasetError, GeocodeCacheError, GeocoderBuildError};
use carefind_scorer::{FuzzyError, RecommendError};
use thiserror::Error;

/// Errors emitted by the carefind CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name.
        field: &'static str,
        /// Matching environment variable.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag name.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag name.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag name.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Loading the hospital dataset failed.
    #[error("failed to load dataset from {path:?}: {source}")]
    LoadDataset {
        /// Dataset path.
        path: Utf8PathBuf,
        /// Loader failure.
        #[source]
        source: DatasetError,
    },
    /// Reading or writing the geocode cache failed.
    #[error(transparent)]
    GeocodeCache(#[from] GeocodeCacheError),
    /// Constructing the geocoder failed.
    #[error("failed to build geocoder for {base_url:?}: {source}")]
    BuildGeocoder {
        /// Configured base URL.
        base_url: String,
        /// Construction failure.
        #[source]
        source: GeocoderBuildError,
    },
    /// The rule base could not be loaded or compiled.
    #[error("unusable rule base: {0}")]
    Rules(#[from] FuzzyError),
    /// The ranking pipeline rejected the request.
    #[error("recommendation failed: {0}")]
    Recommend(#[from] RecommendError),
    /// Serialising the command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing the command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
