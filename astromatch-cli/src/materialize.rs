//! Materialize command implementation for the AstroMatch CLI.

use std::io::Write;

use astromatch_scorer::write_matrix_file;
use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::tables::TableSources;
use crate::{
    ARG_BOOK_RULES, ARG_MATERIALIZE_OUTPUT, ARG_OVERRIDES, CliError, ENV_MATERIALIZE_OUTPUT,
    write_json,
};

/// CLI arguments for the `materialize` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "materialize",
    long_about = "Score every pair of year-less signatures and write the \
                 results as a JSON object keyed by normalised pair. The \
                 parent directory is created when missing.",
    about = "Write the precomputed pair matrix"
)]
#[ortho_config(prefix = "ASTROMATCH")]
pub(crate) struct MaterializeArgs {
    /// Output path for the matrix snapshot.
    #[arg(long = ARG_MATERIALIZE_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
    /// JSON file of manual overrides replacing the embedded set.
    #[arg(long = ARG_OVERRIDES, value_name = "path")]
    #[serde(default)]
    pub(crate) overrides: Option<Utf8PathBuf>,
    /// JSON file of book rules replacing the embedded set.
    #[arg(long = ARG_BOOK_RULES, value_name = "path")]
    #[serde(default)]
    pub(crate) book_rules: Option<Utf8PathBuf>,
}

impl MaterializeArgs {
    pub(crate) fn into_config(self) -> Result<MaterializeConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        MaterializeConfig::try_from(merged)
    }
}

/// Resolved `materialize` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MaterializeConfig {
    pub(crate) output: Utf8PathBuf,
    pub(crate) tables: TableSources,
}

impl TryFrom<MaterializeArgs> for MaterializeConfig {
    type Error = CliError;

    fn try_from(args: MaterializeArgs) -> Result<Self, Self::Error> {
        let output = args.output.ok_or(CliError::MissingArgument {
            field: ARG_MATERIALIZE_OUTPUT,
            env: ENV_MATERIALIZE_OUTPUT,
        })?;
        Ok(Self {
            output,
            tables: TableSources {
                overrides: args.overrides,
                book_rules: args.book_rules,
            },
        })
    }
}

/// Summary printed after the snapshot is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct MaterializeSummary {
    pub(crate) output: Utf8PathBuf,
    pub(crate) pairs: usize,
}

pub(crate) fn run_materialize_with(
    args: MaterializeArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let summary = execute_materialize(&config)?;
    write_json(writer, &summary)
}

pub(crate) fn execute_materialize(
    config: &MaterializeConfig,
) -> Result<MaterializeSummary, CliError> {
    config.tables.validate_sources()?;
    let engine = config.tables.build_engine()?;
    let snapshot = write_matrix_file(&engine, &config.output)?;
    Ok(MaterializeSummary {
        output: config.output.clone(),
        pairs: snapshot.len(),
    })
}
