//! Behavioural coverage for scoring and ranking pairs of signatures.

use std::cell::RefCell;

use astromatch_core::Signature;
use astromatch_scorer::{
    EngineConfig, RankedMatch, ScoreResult, ScoreSource, ScoringEngine, ScoringTables, Tier,
    rank_candidates,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

/// World state for scoring scenarios.
#[derive(Debug, Default)]
struct ScoringWorld {
    engine: RefCell<Option<ScoringEngine>>,
    subject: RefCell<Option<Signature>>,
    scored: RefCell<Option<ScoreResult>>,
    ranked: RefCell<Vec<RankedMatch>>,
}

#[fixture]
fn world() -> ScoringWorld {
    ScoringWorld::default()
}

fn parse_signature(text: &str) -> Signature {
    text.trim_matches('"')
        .parse()
        .unwrap_or_else(|err| panic!("signature key {text} should parse: {err}"))
}

fn parse_tier(text: &str) -> Tier {
    let name = text.trim_matches('"');
    Tier::ALL
        .into_iter()
        .find(|tier| tier.as_str() == name)
        .unwrap_or_else(|| panic!("unknown tier {name}"))
}

#[given("the built-in scoring engine")]
#[expect(clippy::expect_used, reason = "embedded tables must load in tests")]
fn given_engine(world: &ScoringWorld) {
    let tables = ScoringTables::builtin().expect("embedded tables are valid");
    let engine = ScoringEngine::new(tables, EngineConfig::default()).expect("default config");
    world.engine.replace(Some(engine));
}

#[given("a subject {key:word}")]
fn given_subject(world: &ScoringWorld, key: String) {
    world.subject.replace(Some(parse_signature(&key)));
}

#[when("I score the subject against {key:word}")]
#[expect(clippy::expect_used, reason = "steps require prior setup")]
fn when_score(world: &ScoringWorld, key: String) {
    let borrowed_engine = world.engine.borrow();
    let engine = borrowed_engine.as_ref().expect("engine should be built");
    let subject = world.subject.borrow().expect("subject should be set");
    let partner = parse_signature(&key);

    let forward = engine.score(subject, partner);
    assert_eq!(engine.score(partner, subject), forward);
    world.scored.replace(Some(forward));
}

#[when("I rank the subject against {first:word} {second:word} {third:word}")]
#[expect(clippy::expect_used, reason = "steps require prior setup")]
fn when_rank(world: &ScoringWorld, first: String, second: String, third: String) {
    let borrowed_engine = world.engine.borrow();
    let engine = borrowed_engine.as_ref().expect("engine should be built");
    let subject = world.subject.borrow().expect("subject should be set");
    let candidates = [first, second, third].map(|key| parse_signature(&key));
    world
        .ranked
        .replace(rank_candidates(engine, subject, &candidates));
}

#[then("the tier is {tier:word}")]
#[expect(clippy::expect_used, reason = "steps require prior setup")]
fn then_tier(world: &ScoringWorld, tier: String) {
    let borrowed = world.scored.borrow();
    let result = borrowed.as_ref().expect("result should be recorded");
    assert_eq!(result.tier, parse_tier(&tier));
}

#[then("the tier is at most {tier:word}")]
#[expect(clippy::expect_used, reason = "steps require prior setup")]
fn then_tier_at_most(world: &ScoringWorld, tier: String) {
    let borrowed = world.scored.borrow();
    let result = borrowed.as_ref().expect("result should be recorded");
    assert!(
        result.tier <= parse_tier(&tier),
        "tier {} with score {}",
        result.tier,
        result.score
    );
}

#[then("the score is {score:word}")]
#[expect(clippy::expect_used, reason = "steps require prior setup")]
fn then_score(world: &ScoringWorld, score: String) {
    let expected: u8 = score.trim_matches('"').parse().expect("numeric score");
    let borrowed = world.scored.borrow();
    let result = borrowed.as_ref().expect("result should be recorded");
    assert_eq!(result.score, expected);
}

#[then("the reasons mention the animal clash")]
#[expect(clippy::expect_used, reason = "steps require prior setup")]
fn then_clash_reason(world: &ScoringWorld) {
    let borrowed = world.scored.borrow();
    let result = borrowed.as_ref().expect("result should be recorded");
    assert!(
        result
            .reasons
            .iter()
            .any(|reason| reason == "Animal clash (opposites)"),
        "missing clash reason in {:?}",
        result.reasons
    );
}

#[then("the score source is {kind:word}")]
#[expect(clippy::expect_used, reason = "steps require prior setup")]
fn then_source(world: &ScoringWorld, kind: String) {
    let borrowed = world.scored.borrow();
    let source = borrowed.as_ref().expect("result should be recorded").source;
    match kind.trim_matches('"') {
        "computed" => assert_eq!(source, ScoreSource::Computed),
        "override" => assert!(matches!(source, ScoreSource::Override { .. })),
        other => panic!("unknown score source {other}"),
    }
}

#[then("{key:word} ranks last")]
fn then_ranks_last(world: &ScoringWorld, key: String) {
    let ranked = world.ranked.borrow();
    let Some(last) = ranked.last() else {
        panic!("no candidates were ranked")
    };
    assert_eq!(last.candidate, parse_signature(&key));
    assert!(
        ranked
            .iter()
            .take(ranked.len().saturating_sub(1))
            .all(|entry| entry.result.score > last.result.score),
        "every other candidate should strictly outscore {key}"
    );
}

#[scenario(path = "tests/features/scoring.feature", index = 0)]
fn identical_signatures_are_exceptional(world: ScoringWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/scoring.feature", index = 1)]
fn clashing_animals_stay_low(world: ScoringWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/scoring.feature", index = 2)]
fn trine_partners_outscore_allies(world: ScoringWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/scoring.feature", index = 3)]
fn overrides_are_verbatim(world: ScoringWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/scoring.feature", index = 4)]
fn dragon_trine_partners_outscore_allies(world: ScoringWorld) {
    let _ = world;
}
