//! Rank command implementation for the AstroMatch CLI.

use std::io::Write;

use astromatch_core::Signature;
use astromatch_scorer::{RankedMatch, rank_candidates};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::input::resolve_person;
use crate::tables::{TableSources, require_existing};
use crate::{
    ARG_BOOK_RULES, ARG_OVERRIDES, ARG_RANK_CANDIDATES, ARG_RANK_SUBJECT, CliError,
    ENV_RANK_CANDIDATES, ENV_RANK_SUBJECT, write_json,
};

/// CLI arguments for the `rank` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "rank",
    long_about = "Rank candidate partners for one subject. The candidates \
                 file holds a JSON array of birth dates or signature keys. \
                 Results are sorted by score, then by number of reasons, \
                 then by pair key.",
    about = "Rank candidate partners for one subject"
)]
#[ortho_config(prefix = "ASTROMATCH")]
pub(crate) struct RankArgs {
    /// Subject: birth date or signature key.
    #[arg(long = ARG_RANK_SUBJECT, value_name = "person")]
    #[serde(default)]
    pub(crate) subject: Option<String>,
    /// JSON array of candidate birth dates or signature keys.
    #[arg(long = ARG_RANK_CANDIDATES, value_name = "path")]
    #[serde(default)]
    pub(crate) candidates: Option<Utf8PathBuf>,
    /// JSON file of manual overrides replacing the embedded set.
    #[arg(long = ARG_OVERRIDES, value_name = "path")]
    #[serde(default)]
    pub(crate) overrides: Option<Utf8PathBuf>,
    /// JSON file of book rules replacing the embedded set.
    #[arg(long = ARG_BOOK_RULES, value_name = "path")]
    #[serde(default)]
    pub(crate) book_rules: Option<Utf8PathBuf>,
}

impl RankArgs {
    pub(crate) fn into_config(self) -> Result<RankConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RankConfig::try_from(merged)
    }
}

/// Resolved `rank` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RankConfig {
    pub(crate) subject: Signature,
    pub(crate) candidates: Utf8PathBuf,
    pub(crate) tables: TableSources,
}

impl RankConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.candidates, ARG_RANK_CANDIDATES)?;
        self.tables.validate_sources()
    }
}

impl TryFrom<RankArgs> for RankConfig {
    type Error = CliError;

    fn try_from(args: RankArgs) -> Result<Self, Self::Error> {
        let subject = args.subject.ok_or(CliError::MissingArgument {
            field: ARG_RANK_SUBJECT,
            env: ENV_RANK_SUBJECT,
        })?;
        let candidates = args.candidates.ok_or(CliError::MissingArgument {
            field: ARG_RANK_CANDIDATES,
            env: ENV_RANK_CANDIDATES,
        })?;
        Ok(Self {
            subject: resolve_person(ARG_RANK_SUBJECT, &subject)?,
            candidates,
            tables: TableSources {
                overrides: args.overrides,
                book_rules: args.book_rules,
            },
        })
    }
}

pub(crate) fn run_rank_with(args: RankArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let ranked = execute_rank(&config)?;
    write_json(writer, &ranked)
}

pub(crate) fn execute_rank(config: &RankConfig) -> Result<Vec<RankedMatch>, CliError> {
    config.validate_sources()?;
    let candidates = load_candidates(&config.candidates)?;
    let engine = config.tables.build_engine()?;
    Ok(rank_candidates(&engine, config.subject, &candidates))
}

/// Load a JSON array of birth dates or signature keys.
pub(crate) fn load_candidates(path: &Utf8Path) -> Result<Vec<Signature>, CliError> {
    let contents =
        astromatch_fs::read_to_string(path).map_err(|source| CliError::ReadCandidates {
            path: path.to_path_buf(),
            source,
        })?;
    let entries: Vec<String> =
        serde_json::from_str(&contents).map_err(|source| CliError::ParseCandidates {
            path: path.to_path_buf(),
            source,
        })?;
    entries
        .iter()
        .map(|entry| resolve_person(ARG_RANK_CANDIDATES, entry))
        .collect()
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RankConfig, CliError> {
    let merged = RankArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RankConfig::try_from(merged)
}
