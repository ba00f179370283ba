//! Behaviour-driven step definitions driving the AstroMatch CLI scenarios.

use super::helpers::{utf8_root, write_utf8};
use super::*;
use astromatch_scorer::{RankedMatch, ScoreResult, ScoreSource};
use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use tempfile::TempDir;

use crate::materialize::MaterializeSummary;

/// Holds one CLI invocation and what it printed.
#[derive(Debug)]
struct CliWorld {
    workspace: TempDir,
    table_args: RefCell<Vec<String>>,
    candidates: RefCell<Option<Utf8PathBuf>>,
    outcome: RefCell<Option<Result<String, CliError>>>,
}

impl CliWorld {
    fn new() -> Self {
        Self {
            workspace: TempDir::new().expect("create scenario workspace"),
            table_args: RefCell::new(Vec::new()),
            candidates: RefCell::new(None),
            outcome: RefCell::new(None),
        }
    }

    fn root(&self) -> Utf8PathBuf {
        utf8_root(&self.workspace)
    }

    fn invoke(&self, mut argv: Vec<String>) {
        argv.extend(self.table_args.borrow().iter().cloned());
        let mut buffer = Vec::new();
        let outcome = Cli::try_parse_from(argv)
            .map_err(CliError::ArgumentParsing)
            .and_then(|cli| match cli.command {
                Command::Score(args) => run_score_with(args, &mut buffer),
                Command::Rank(args) => run_rank_with(args, &mut buffer),
                Command::Materialize(args) => run_materialize_with(args, &mut buffer),
            })
            .map(|()| String::from_utf8(buffer).expect("utf-8 output"));
        self.outcome.replace(Some(outcome));
    }

    fn output(&self) -> String {
        let borrowed = self.outcome.borrow();
        borrowed
            .as_ref()
            .expect("command ran")
            .as_ref()
            .expect("expected success")
            .clone()
    }

    fn score(&self) -> ScoreResult {
        serde_json::from_str(&self.output()).expect("score output is JSON")
    }
}

fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|part| (*part).to_owned()).collect()
}

#[fixture]
fn world() -> CliWorld {
    CliWorld::new()
}

#[given("no table files are supplied")]
fn no_table_files(#[from(world)] world: &CliWorld) {
    world.table_args.borrow_mut().clear();
}

#[given("a candidates file listing three partners")]
fn candidates_file(#[from(world)] world: &CliWorld) {
    let path = world.root().join("candidates.json");
    write_utf8(&path, br#"["taurus_horse", "gemini_dragon", "gemini_tiger"]"#);
    world.candidates.replace(Some(path));
}

#[when("I score {first:string} against {second:string}")]
fn score_pair(#[from(world)] world: &CliWorld, first: String, second: String) {
    world.invoke(argv(&["astromatch", "score", &first, &second]));
}

#[when("I score {first:string} without a partner")]
fn score_alone(#[from(world)] world: &CliWorld, first: String) {
    world.invoke(argv(&["astromatch", "score", &first]));
}

#[when("I rank {subject:string} against the candidates file")]
fn rank_subject(#[from(world)] world: &CliWorld, subject: String) {
    let candidates = world
        .candidates
        .borrow()
        .clone()
        .expect("candidates file written");
    world.invoke(argv(&[
        "astromatch",
        "rank",
        &format!("--{ARG_RANK_SUBJECT}"),
        &subject,
        &format!("--{ARG_RANK_CANDIDATES}"),
        candidates.as_str(),
    ]));
}

#[when("I materialise the matrix into a nested directory")]
fn materialise(#[from(world)] world: &CliWorld) {
    let output = world.root().join("snapshots/v1/matrix.json");
    world.invoke(argv(&[
        "astromatch",
        "materialize",
        &format!("--{ARG_MATERIALIZE_OUTPUT}"),
        output.as_str(),
    ]));
}

#[then("the command succeeds")]
fn command_succeeds(#[from(world)] world: &CliWorld) {
    let output = world.output();
    assert!(output.ends_with('\n'), "output should end with a newline");
}

#[then("the reported score is {score:word}")]
fn reported_score(#[from(world)] world: &CliWorld, score: String) {
    let expected: u8 = score.parse().expect("numeric score");
    assert_eq!(world.score().score, expected);
}

#[then("the score came from an override")]
fn score_from_override(#[from(world)] world: &CliWorld) {
    assert!(matches!(world.score().source, ScoreSource::Override { .. }));
}

#[then("{key:string} ranks first")]
fn ranks_first(#[from(world)] world: &CliWorld, key: String) {
    let ranked: Vec<RankedMatch> =
        serde_json::from_str(&world.output()).expect("rank output is JSON");
    assert_eq!(ranked.first().map(|m| m.candidate.key()), Some(key));
}

#[then("the summary reports {pairs:word} pairs")]
fn summary_pairs(#[from(world)] world: &CliWorld, pairs: String) {
    let expected: usize = pairs.parse().expect("numeric pair count");
    let summary: MaterializeSummary =
        serde_json::from_str(&world.output()).expect("summary output is JSON");
    assert_eq!(summary.pairs, expected);
    assert!(summary.output.is_file());
}

#[then("the CLI reports that {field:string} is missing")]
fn reports_missing(#[from(world)] world: &CliWorld, field: String) {
    let borrowed = world.outcome.borrow();
    let error = borrowed
        .as_ref()
        .expect("command ran")
        .as_ref()
        .expect_err("expected error");
    match error {
        CliError::MissingArgument { field: missing, .. } => assert_eq!(*missing, field),
        other => panic!("unexpected error {other:?}"),
    }
}

macro_rules! register_cli_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/astromatch_cli.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: CliWorld) {
            let _ = world;
        }
    };
}

register_cli_scenario!(scoring_two_keys, "scoring two signature keys");
register_cli_scenario!(
    scoring_overridden_dates,
    "scoring an overridden pair from birth dates"
);
register_cli_scenario!(ranking_candidates, "ranking candidates from a file");
register_cli_scenario!(materialising_matrix, "materialising the pair matrix");
register_cli_scenario!(rejecting_missing_partner, "rejecting a missing partner");
