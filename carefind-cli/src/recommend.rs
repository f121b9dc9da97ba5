//! `recommend` command: rank hospitals from a dataset for one query.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use carefind_core::{
    CoordinateResolver, DEFAULT_COORDINATE, DEFAULT_MAX_DISTANCE_KM, DEFAULT_TOP_K,
    ScoredCandidate, UserQuery, lat_lon,
};
use carefind_data::{
    CachingResolver, GeocodeCache, NominatimConfig, NominatimGeocoder, load_candidates,
};
use carefind_scorer::{FuzzyEngine, Recommender, RecommenderConfig, RuleBase};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_COST_PREFERENCE, ARG_DATASET, ARG_FALLBACK_LATITUDE, ARG_FALLBACK_LONGITUDE,
    ARG_GEOCODE_CACHE, ARG_LOCATION, ARG_MAX_DISTANCE_KM, ARG_NOMINATIM_URL, ARG_OFFLINE,
    ARG_QUALITY_PREFERENCE, ARG_RULES, ARG_SERVICE, ARG_TOP_K, CliError, ENV_DATASET,
    ENV_FALLBACK_LATITUDE, ENV_FALLBACK_LONGITUDE, ENV_LOCATION, ENV_SERVICE,
};

/// Cache file used when none is configured.
pub(crate) const DEFAULT_GEOCODE_CACHE: &str = "hospital_coordinates.csv";

const DEFAULT_COST_LABEL: &str = "Medium";
const DEFAULT_QUALITY_LABEL: &str = "High";

/// CLI arguments for the `recommend` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rank the hospitals in a CSV dataset for a requested service \
                 near a location. Settings can come from CLI flags, \
                 configuration files, or CAREFIND_* environment variables.",
    about = "Recommend hospitals for a service near a location"
)]
#[ortho_config(prefix = "CAREFIND")]
pub(crate) struct RecommendArgs {
    /// Where the user is, as a free-form address.
    #[arg(long = ARG_LOCATION, value_name = "address")]
    #[serde(default)]
    pub(crate) location: Option<String>,
    /// Medical service needed (e.g. "Cardiology").
    #[arg(long = ARG_SERVICE, value_name = "name")]
    #[serde(default)]
    pub(crate) service: Option<String>,
    /// Cost tolerance: Low, Medium or High.
    #[arg(long = ARG_COST_PREFERENCE, value_name = "level")]
    #[serde(default)]
    pub(crate) cost_preference: Option<String>,
    /// Expected quality: Low, Medium or High.
    #[arg(long = ARG_QUALITY_PREFERENCE, value_name = "level")]
    #[serde(default)]
    pub(crate) quality_preference: Option<String>,
    /// Path to the hospital dataset CSV.
    #[arg(long = ARG_DATASET, value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// Path to the geocode cache CSV (created when absent).
    #[arg(long = ARG_GEOCODE_CACHE, value_name = "path")]
    #[serde(default)]
    pub(crate) geocode_cache: Option<Utf8PathBuf>,
    /// Path to a JSON rule base replacing the built-in rules.
    #[arg(long = ARG_RULES, value_name = "path")]
    #[serde(default)]
    pub(crate) rules: Option<Utf8PathBuf>,
    /// Distance in kilometres at which proximity reaches zero.
    #[arg(long = ARG_MAX_DISTANCE_KM, value_name = "km")]
    #[serde(default)]
    pub(crate) max_distance_km: Option<f64>,
    /// Number of hospitals to recommend.
    #[arg(long = ARG_TOP_K, value_name = "count")]
    #[serde(default)]
    pub(crate) top_k: Option<usize>,
    /// Latitude used when an address cannot be geocoded.
    #[arg(long = ARG_FALLBACK_LATITUDE, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) fallback_latitude: Option<f64>,
    /// Longitude used when an address cannot be geocoded.
    #[arg(long = ARG_FALLBACK_LONGITUDE, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) fallback_longitude: Option<f64>,
    /// Base URL of the Nominatim service.
    #[arg(long = ARG_NOMINATIM_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) nominatim_url: Option<String>,
    /// Answer from the geocode cache only.
    #[arg(
        long = ARG_OFFLINE,
        value_name = "bool",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    #[serde(default)]
    pub(crate) offline: Option<bool>,
}

impl RecommendArgs {
    pub(crate) fn into_config(self) -> Result<RecommendConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RecommendConfig::try_from(merged)
    }
}

/// Resolved `recommend` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecommendConfig {
    pub(crate) query: UserQuery,
    pub(crate) dataset: Utf8PathBuf,
    pub(crate) geocode_cache: Utf8PathBuf,
    pub(crate) rules: Option<Utf8PathBuf>,
    pub(crate) recommender: RecommenderConfig,
    pub(crate) nominatim_url: String,
    pub(crate) offline: bool,
}

impl RecommendConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.dataset, ARG_DATASET)?;
        if let Some(rules) = &self.rules {
            require_existing(rules, ARG_RULES)?;
        }
        Ok(())
    }
}

fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn file_is_file(path: &Utf8Path) -> std::io::Result<bool> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let name = path
        .file_name()
        .ok_or_else(|| std::io::Error::other(format!("'{path}' does not name a file")))?;
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    dir.metadata(name).map(|meta| meta.is_file())
}

impl TryFrom<RecommendArgs> for RecommendConfig {
    type Error = CliError;

    fn try_from(args: RecommendArgs) -> Result<Self, Self::Error> {
        let location = args.location.ok_or(CliError::MissingArgument {
            field: ARG_LOCATION,
            env: ENV_LOCATION,
        })?;
        let service = args.service.ok_or(CliError::MissingArgument {
            field: ARG_SERVICE,
            env: ENV_SERVICE,
        })?;
        let dataset = args.dataset.ok_or(CliError::MissingArgument {
            field: ARG_DATASET,
            env: ENV_DATASET,
        })?;
        let fallback_coordinate = match (args.fallback_latitude, args.fallback_longitude) {
            (Some(lat), Some(lon)) => lat_lon(lat, lon),
            (None, None) => DEFAULT_COORDINATE,
            (Some(_), None) => {
                return Err(CliError::MissingArgument {
                    field: ARG_FALLBACK_LONGITUDE,
                    env: ENV_FALLBACK_LONGITUDE,
                });
            }
            (None, Some(_)) => {
                return Err(CliError::MissingArgument {
                    field: ARG_FALLBACK_LATITUDE,
                    env: ENV_FALLBACK_LATITUDE,
                });
            }
        };
        let query = UserQuery::new(
            location,
            service,
            args.cost_preference.as_deref().unwrap_or(DEFAULT_COST_LABEL),
            args.quality_preference
                .as_deref()
                .unwrap_or(DEFAULT_QUALITY_LABEL),
        );
        let recommender = RecommenderConfig {
            max_distance_km: args.max_distance_km.unwrap_or(DEFAULT_MAX_DISTANCE_KM),
            top_k: args.top_k.unwrap_or(DEFAULT_TOP_K),
            fallback_coordinate,
        };
        recommender.validate()?;
        Ok(Self {
            query,
            dataset,
            geocode_cache: args
                .geocode_cache
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_GEOCODE_CACHE)),
            rules: args.rules,
            recommender,
            nominatim_url: args
                .nominatim_url
                .unwrap_or_else(|| NominatimConfig::default().base_url),
            offline: args.offline.unwrap_or(false),
        })
    }
}

/// Builds the upstream geocoder consulted on cache misses.
pub(crate) trait GeocoderBuilder {
    fn build(&self, config: &RecommendConfig) -> Result<Box<dyn CoordinateResolver>, CliError>;
}

pub(crate) struct NominatimGeocoderBuilder;

impl GeocoderBuilder for NominatimGeocoderBuilder {
    fn build(&self, config: &RecommendConfig) -> Result<Box<dyn CoordinateResolver>, CliError> {
        let geocoder = NominatimGeocoder::new(config.nominatim_url.clone()).map_err(|source| {
            CliError::BuildGeocoder {
                base_url: config.nominatim_url.clone(),
                source,
            }
        })?;
        Ok(Box::new(geocoder))
    }
}

/// One recommended hospital as printed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Recommendation {
    pub(crate) name: String,
    pub(crate) full_address: String,
    pub(crate) services: String,
    pub(crate) cost_level: String,
    pub(crate) quality_score: f64,
    pub(crate) user_rating: f64,
    pub(crate) distance_km: Option<f64>,
    pub(crate) service_score: f64,
    pub(crate) proximity_score: f64,
    pub(crate) recommendation_score: f64,
}

impl From<ScoredCandidate> for Recommendation {
    fn from(scored: ScoredCandidate) -> Self {
        let breakdown = scored.breakdown();
        let candidate = scored.into_candidate();
        Self {
            name: candidate.name,
            full_address: candidate.address,
            services: candidate.services.to_string(),
            cost_level: candidate.cost_label,
            quality_score: candidate.quality_score,
            user_rating: candidate.user_rating,
            distance_km: breakdown.distance_km,
            service_score: breakdown.service_score,
            proximity_score: breakdown.proximity_score,
            recommendation_score: breakdown.recommendation_score,
        }
    }
}

/// Command output: the normalised query and its shortlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct RecommendReport {
    pub(crate) query: UserQuery,
    pub(crate) recommendations: Vec<Recommendation>,
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_recommend_with(args, &NominatimGeocoderBuilder, &mut stdout)
}

pub(crate) fn run_recommend_with(
    args: RecommendArgs,
    builder: &dyn GeocoderBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_recommend_config(args)?;
    let report = execute_recommend(&config, builder)?;
    write_report(writer, &report)
}

fn resolve_recommend_config(args: RecommendArgs) -> Result<RecommendConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

pub(crate) fn execute_recommend(
    config: &RecommendConfig,
    builder: &dyn GeocoderBuilder,
) -> Result<RecommendReport, CliError> {
    let dataset = load_candidates(&config.dataset).map_err(|source| CliError::LoadDataset {
        path: config.dataset.clone(),
        source,
    })?;
    if dataset.dropped > 0 {
        log::warn!(
            "{} rows of {} lack ranking fields and were skipped",
            dataset.dropped,
            config.dataset
        );
    }
    let rules = match &config.rules {
        Some(path) => RuleBase::from_path(path)?,
        None => RuleBase::standard()?,
    };
    let engine = FuzzyEngine::with_rules(&rules)?;

    let cache = GeocodeCache::load(&config.geocode_cache)?;
    let resolver: CachingResolver<Box<dyn CoordinateResolver>> = if config.offline {
        CachingResolver::offline(cache)
    } else {
        CachingResolver::new(builder.build(config)?, cache)
    };
    let shortlist = Recommender::new(engine, &resolver, config.recommender)?
        .recommend(&config.query, &dataset.candidates)?;
    resolver.into_cache().save(&config.geocode_cache)?;

    Ok(RecommendReport {
        query: config.query.clone(),
        recommendations: shortlist.into_iter().map(Recommendation::from).collect(),
    })
}

fn write_report(writer: &mut dyn Write, report: &RecommendReport) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(report).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RecommendConfig, CliError> {
    let merged = RecommendArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RecommendConfig::try_from(merged)
}
