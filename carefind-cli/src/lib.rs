//! Command-line interface for the carefind hospital recommender.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod check_rules;
mod error;
mod recommend;

pub use error::CliError;

use check_rules::{CheckRulesArgs, run_check_rules};
use recommend::{RecommendArgs, run_recommend};

pub(crate) const ARG_LOCATION: &str = "location";
pub(crate) const ARG_SERVICE: &str = "service";
pub(crate) const ARG_COST_PREFERENCE: &str = "cost-preference";
pub(crate) const ARG_QUALITY_PREFERENCE: &str = "quality-preference";
pub(crate) const ARG_DATASET: &str = "dataset";
pub(crate) const ARG_GEOCODE_CACHE: &str = "geocode-cache";
pub(crate) const ARG_RULES: &str = "rules";
pub(crate) const ARG_MAX_DISTANCE_KM: &str = "max-distance-km";
pub(crate) const ARG_TOP_K: &str = "top-k";
pub(crate) const ARG_FALLBACK_LATITUDE: &str = "fallback-latitude";
pub(crate) const ARG_FALLBACK_LONGITUDE: &str = "fallback-longitude";
pub(crate) const ARG_NOMINATIM_URL: &str = "nominatim-url";
pub(crate) const ARG_OFFLINE: &str = "offline";
pub(crate) const ENV_LOCATION: &str = "CAREFIND_CMDS_RECOMMEND_LOCATION";
pub(crate) const ENV_SERVICE: &str = "CAREFIND_CMDS_RECOMMEND_SERVICE";
pub(crate) const ENV_DATASET: &str = "CAREFIND_CMDS_RECOMMEND_DATASET";
pub(crate) const ENV_FALLBACK_LATITUDE: &str = "CAREFIND_CMDS_RECOMMEND_FALLBACK_LATITUDE";
pub(crate) const ENV_FALLBACK_LONGITUDE: &str = "CAREFIND_CMDS_RECOMMEND_FALLBACK_LONGITUDE";

/// Run the carefind CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when arguments, configuration or any stage of the
/// selected command fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Recommend(args) => run_recommend(args),
        Command::CheckRules(args) => run_check_rules(&args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "carefind",
    about = "Rank nearby hospitals for a requested medical service",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Recommend up to three hospitals for a service near a location.
    Recommend(RecommendArgs),
    /// Validate a fuzzy rule-base file and summarise it.
    CheckRules(CheckRulesArgs),
}

#[cfg(test)]
mod tests;
