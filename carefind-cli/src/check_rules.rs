//! `check-rules` command: compile a rule-base file and summarise it.

use std::io::Write;

use camino::Utf8PathBuf;
use carefind_scorer::{FuzzyEngine, RuleBase};
use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::CliError;

/// CLI arguments for the `check-rules` subcommand.
#[derive(Debug, Clone, Parser)]
#[command(about = "Validate a JSON rule base against the fuzzy variables")]
pub(crate) struct CheckRulesArgs {
    /// Path to the rule-base JSON file.
    #[arg(value_name = "path")]
    pub(crate) path: Utf8PathBuf,
}

/// Summary printed for a usable rule base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct RuleBaseSummary {
    pub(crate) path: Utf8PathBuf,
    pub(crate) version: String,
    pub(crate) rules: usize,
}

pub(crate) fn run_check_rules(args: &CheckRulesArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_check_rules_with(args, &mut stdout)
}

pub(crate) fn run_check_rules_with(
    args: &CheckRulesArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let rules = RuleBase::from_path(&args.path)?;
    let engine = FuzzyEngine::with_rules(&rules)?;
    let summary = RuleBaseSummary {
        path: args.path.clone(),
        version: engine.version().to_owned(),
        rules: engine.rule_count(),
    };
    log::info!(
        "rule base {} (version {}) compiles: {} rules",
        summary.path,
        summary.version,
        summary.rules
    );
    let payload = serde_json::to_string_pretty(&summary).map_err(CliError::SerialiseOutput)?;
    writeln!(writer, "{payload}").map_err(CliError::WriteOutput)
}
