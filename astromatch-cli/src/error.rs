//! Error types emitted by the AstroMatch CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use astromatch_core::SignatureError;
use astromatch_scorer::{ConfigError, MatrixError, TableError};
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors emitted by the AstroMatch CLI.
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
        /// Name of the missing option.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk or is not a file.
    #[error("{field} path {path:?} does not exist or is not a file")]
    MissingSourceFile {
        /// Option naming the path.
        field: &'static str,
        /// Requested path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Option naming the path.
        field: &'static str,
        /// Requested path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// A person could not be resolved from a birth date or signature key.
    #[error("{field} value '{input}' is neither a birth date nor a signature key: {source}")]
    InvalidPerson {
        /// Option carrying the value.
        field: &'static str,
        /// Text supplied by the caller.
        input: String,
        /// Source error from signature parsing.
        #[source]
        source: SignatureError,
    },
    /// Reading the candidates file failed.
    #[error("failed to read candidates at {path:?}: {source}")]
    ReadCandidates {
        /// Candidates file path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// The candidates file was not a JSON array of strings.
    #[error("failed to parse candidates JSON at {path:?}: {source}")]
    ParseCandidates {
        /// Candidates file path.
        path: Utf8PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// Loading the scoring tables failed.
    #[error("failed to load scoring tables: {0}")]
    LoadTables(#[from] TableError),
    /// The engine configuration was rejected.
    #[error("invalid engine configuration: {0}")]
    EngineConfig(#[from] ConfigError),
    /// Materialising or writing the matrix failed.
    #[error("failed to materialise the matrix: {0}")]
    Materialize(#[from] MatrixError),
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
