//! Score command implementation for the AstroMatch CLI.

use std::io::Write;

use astromatch_core::Signature;
use astromatch_scorer::ScoreResult;
use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::input::resolve_person;
use crate::tables::TableSources;
use crate::{
    ARG_BOOK_RULES, ARG_OVERRIDES, ARG_SCORE_FIRST, ARG_SCORE_SECOND, CliError, ENV_SCORE_FIRST,
    ENV_SCORE_SECOND, write_json,
};

/// CLI arguments for the `score` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "score",
    long_about = "Score two people against each other. Each person is a \
                 birth date (YYYY-MM-DD) or a signature key such as \
                 aries_rat. The result is printed as JSON.",
    about = "Score two people against each other"
)]
#[ortho_config(prefix = "ASTROMATCH")]
pub(crate) struct ScoreArgs {
    /// First person: birth date or signature key.
    #[arg(value_name = "A")]
    #[serde(default)]
    pub(crate) first: Option<String>,
    /// Second person: birth date or signature key.
    #[arg(value_name = "B")]
    #[serde(default)]
    pub(crate) second: Option<String>,
    /// JSON file of manual overrides replacing the embedded set.
    #[arg(long = ARG_OVERRIDES, value_name = "path")]
    #[serde(default)]
    pub(crate) overrides: Option<Utf8PathBuf>,
    /// JSON file of book rules replacing the embedded set.
    #[arg(long = ARG_BOOK_RULES, value_name = "path")]
    #[serde(default)]
    pub(crate) book_rules: Option<Utf8PathBuf>,
}

impl ScoreArgs {
    pub(crate) fn into_config(self) -> Result<ScoreConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ScoreConfig::try_from(merged)
    }
}

/// Resolved `score` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ScoreConfig {
    pub(crate) first: Signature,
    pub(crate) second: Signature,
    pub(crate) tables: TableSources,
}

impl TryFrom<ScoreArgs> for ScoreConfig {
    type Error = CliError;

    fn try_from(args: ScoreArgs) -> Result<Self, Self::Error> {
        let first = args.first.ok_or(CliError::MissingArgument {
            field: ARG_SCORE_FIRST,
            env: ENV_SCORE_FIRST,
        })?;
        let second = args.second.ok_or(CliError::MissingArgument {
            field: ARG_SCORE_SECOND,
            env: ENV_SCORE_SECOND,
        })?;
        Ok(Self {
            first: resolve_person(ARG_SCORE_FIRST, &first)?,
            second: resolve_person(ARG_SCORE_SECOND, &second)?,
            tables: TableSources {
                overrides: args.overrides,
                book_rules: args.book_rules,
            },
        })
    }
}

pub(crate) fn run_score_with(args: ScoreArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let result = execute_score(&config)?;
    write_json(writer, &result)
}

pub(crate) fn execute_score(config: &ScoreConfig) -> Result<ScoreResult, CliError> {
    config.tables.validate_sources()?;
    let engine = config.tables.build_engine()?;
    Ok(engine.score(config.first, config.second))
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ScoreConfig, CliError> {
    let merged = ScoreArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ScoreConfig::try_from(merged)
}
