//! Table sources shared by every subcommand.

use astromatch_scorer::{EngineConfig, ScoringEngine, ScoringTables};
use camino::{Utf8Path, Utf8PathBuf};

use crate::{ARG_BOOK_RULES, ARG_OVERRIDES, CliError};

/// Optional replacements for the embedded book rules and overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct TableSources {
    /// Override records file replacing the embedded one.
    pub(crate) overrides: Option<Utf8PathBuf>,
    /// Book rules file replacing the embedded one.
    pub(crate) book_rules: Option<Utf8PathBuf>,
}

impl TableSources {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        if let Some(path) = &self.overrides {
            require_existing(path, ARG_OVERRIDES)?;
        }
        if let Some(path) = &self.book_rules {
            require_existing(path, ARG_BOOK_RULES)?;
        }
        Ok(())
    }

    /// Load the tables and build an engine with the default configuration.
    pub(crate) fn build_engine(&self) -> Result<ScoringEngine, CliError> {
        let tables =
            ScoringTables::load(self.book_rules.as_deref(), self.overrides.as_deref())?;
        Ok(ScoringEngine::new(tables, EngineConfig::default())?)
    }
}

pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match astromatch_fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Err(source) if source.kind() != std::io::ErrorKind::NotFound => {
            Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            })
        }
        Ok(false) | Err(_) => Err(CliError::MissingSourceFile {
            field,
            path: path.to_path_buf(),
        }),
    }
}
