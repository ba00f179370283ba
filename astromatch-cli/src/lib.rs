//! Command-line interface for scoring AstroMatch signatures.
//!
//! Three subcommands share one engine setup: `score` compares two people,
//! `rank` orders a list of candidates for one subject, and `materialize`
//! writes the precomputed pair matrix. Every argument can also come from
//! the environment or a configuration file through `ortho_config`.
#![forbid(unsafe_code)]

use std::io::Write;

use clap::{Parser, Subcommand};
use serde::Serialize;

mod error;
mod input;
mod materialize;
mod rank;
mod score;
mod tables;

pub use error::CliError;

use materialize::{MaterializeArgs, run_materialize_with};
use rank::{RankArgs, run_rank_with};
use score::{ScoreArgs, run_score_with};

const ARG_SCORE_FIRST: &str = "first";
const ARG_SCORE_SECOND: &str = "second";
const ARG_RANK_SUBJECT: &str = "subject";
const ARG_RANK_CANDIDATES: &str = "candidates";
const ARG_MATERIALIZE_OUTPUT: &str = "output";
const ARG_OVERRIDES: &str = "overrides";
const ARG_BOOK_RULES: &str = "book-rules";
const ENV_SCORE_FIRST: &str = "ASTROMATCH_CMDS_SCORE_FIRST";
const ENV_SCORE_SECOND: &str = "ASTROMATCH_CMDS_SCORE_SECOND";
const ENV_RANK_SUBJECT: &str = "ASTROMATCH_CMDS_RANK_SUBJECT";
const ENV_RANK_CANDIDATES: &str = "ASTROMATCH_CMDS_RANK_CANDIDATES";
const ENV_MATERIALIZE_OUTPUT: &str = "ASTROMATCH_CMDS_MATERIALIZE_OUTPUT";

/// Run the AstroMatch CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments are missing or invalid, a table file
/// fails to load, or output cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Score(args) => run_score_with(args, &mut stdout),
        Command::Rank(args) => run_rank_with(args, &mut stdout),
        Command::Materialize(args) => run_materialize_with(args, &mut stdout),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "astromatch",
    about = "Score compatibility between Western and Chinese zodiac signatures",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score two people against each other.
    Score(ScoreArgs),
    /// Rank candidate partners for one subject.
    Rank(RankArgs),
    /// Precompute every pair into a JSON snapshot.
    Materialize(MaterializeArgs),
}

/// Write `value` as pretty JSON followed by a newline.
fn write_json<T: Serialize>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests;
