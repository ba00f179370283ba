//! Error types raised while loading tables, configuring the engine and
//! materialising the pair matrix.

use camino::Utf8PathBuf;
use thiserror::Error;

use astromatch_core::SignatureError;

/// Errors raised while loading or validating scoring tables.
///
/// All of these surface at load time. Scoring never returns them.
#[derive(Debug, Error)]
pub enum TableError {
    /// Reading a table file failed.
    #[error("failed to read table file at {path}")]
    Read {
        /// Requested file path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// A table document was not valid JSON for its schema.
    #[error("failed to parse {table} table")]
    Parse {
        /// Name of the table being parsed.
        table: &'static str,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// Two override entries normalise to the same pair.
    #[error("override pair '{key}' is listed more than once")]
    OverrideKeyCollision {
        /// Normalised pair key.
        key: String,
    },
    /// An override record is out of range or disagrees with its tier.
    #[error("override for '{key}' is invalid: {reason}")]
    InvalidOverride {
        /// Normalised pair key.
        key: String,
        /// Description of the violated constraint.
        reason: String,
    },
    /// A book rule delta lies outside `-10..=10`.
    #[error("book rule for '{key}' targeting {target} has {field} delta {value} outside -10..=10")]
    InvalidBookDelta {
        /// Signature key owning the rule.
        key: String,
        /// Target animal of the rule.
        target: String,
        /// Delta component that is out of range.
        field: &'static str,
        /// Offending value.
        value: i8,
    },
    /// An `avoid` rule would raise a score.
    #[error("avoid rule for '{key}' targeting {target} has positive {field} delta {value}")]
    PositiveAvoidDelta {
        /// Signature key owning the rule.
        key: String,
        /// Target animal of the rule.
        target: String,
        /// Delta component that is positive.
        field: &'static str,
        /// Offending value.
        value: i8,
    },
    /// A base table lacks an entry.
    #[error("{table} table has no entry for {entry}")]
    IncompleteTable {
        /// Name of the incomplete table.
        table: &'static str,
        /// Missing entry.
        entry: String,
    },
    /// A signature or pair key in a table could not be parsed.
    #[error("unknown key '{key}' in {table} table")]
    UnknownKey {
        /// Name of the table being loaded.
        table: &'static str,
        /// Offending key.
        key: String,
        /// Source parse error.
        #[source]
        source: SignatureError,
    },
}

/// Errors raised while validating an [`EngineConfig`](crate::EngineConfig).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Layer weights are non-finite, negative or do not sum to one.
    #[error("layer weights must be finite, non-negative and sum to 1 (east {east}, west {west})")]
    InvalidWeights {
        /// Configured east weight.
        east: f32,
        /// Configured west weight.
        west: f32,
    },
    /// The quantiser bounds or step are unusable.
    #[error("quantiser requires 0 <= floor < ceiling <= 100 and a step dividing the range")]
    InvalidQuantiser {
        /// Configured floor.
        floor: u8,
        /// Configured ceiling.
        ceiling: u8,
        /// Configured step.
        step: u8,
    },
}

/// Errors raised while materialising, writing or reading a matrix snapshot.
#[derive(Debug, Error)]
pub enum MatrixError {
    /// Two orderings of the same pair produced different results.
    #[error("scores for '{key}' differ between argument orders")]
    AsymmetricPair {
        /// Normalised pair key.
        key: String,
    },
    /// Creating the parent directory for the snapshot failed.
    #[error("failed to create parent directory {path}")]
    CreateParent {
        /// Path of the directory that could not be created.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// Writing the snapshot file failed.
    #[error("failed to write matrix file at {path}")]
    WriteFile {
        /// Target file path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// Serialising the snapshot to JSON failed.
    #[error("failed to serialise matrix into {path}")]
    Serialise {
        /// Target file path.
        path: Utf8PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// Reading a snapshot file failed.
    #[error("failed to read matrix file at {path}")]
    Read {
        /// Requested file path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// A snapshot file was not valid JSON.
    #[error("failed to parse matrix file at {path}")]
    Parse {
        /// Requested file path.
        path: Utf8PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
}
