//! Behavioural coverage for classifying pairs of signatures.

use std::cell::RefCell;

use astromatch_core::{RelationResult, Signature, classify};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

/// World state for classification scenarios.
#[derive(Debug, Default)]
struct ClassifyWorld {
    signatures: RefCell<Vec<Signature>>,
    relations: RefCell<Vec<RelationResult>>,
}

#[fixture]
fn world() -> ClassifyWorld {
    ClassifyWorld::default()
}

#[given("a signature {key:word}")]
fn given_signature(world: &ClassifyWorld, key: String) {
    let signature: Signature = key
        .trim_matches('"')
        .parse()
        .unwrap_or_else(|err| panic!("signature key {key} should parse: {err}"));
    world.signatures.borrow_mut().push(signature);
}

#[when("I classify every pairing in both orders")]
fn when_classify(world: &ClassifyWorld) {
    let signatures = world.signatures.borrow();
    let mut relations = world.relations.borrow_mut();
    for (index, first) in signatures.iter().enumerate() {
        for second in signatures.iter().skip(index + 1) {
            relations.push(classify(*first, *second));
            relations.push(classify(*second, *first));
        }
    }
    assert!(!relations.is_empty(), "at least one pairing is required");
}

#[then("every east relation is {relation:word}")]
fn then_east_relation(world: &ClassifyWorld, relation: String) {
    for result in world.relations.borrow().iter() {
        assert_eq!(result.east_relation.as_str(), relation.trim_matches('"'));
    }
}

#[then("every west relation is {relation:word}")]
fn then_west_relation(world: &ClassifyWorld, relation: String) {
    for result in world.relations.borrow().iter() {
        assert_eq!(result.west_relation.as_str(), relation.trim_matches('"'));
    }
}

#[then("every pairing is a mirror")]
fn then_mirror(world: &ClassifyWorld) {
    for result in world.relations.borrow().iter() {
        assert!(result.is_mirror(), "expected a mirror pairing: {result:?}");
    }
}

#[scenario(path = "tests/features/classify.feature", index = 0)]
fn trine_mates_are_kindred(world: ClassifyWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/classify.feature", index = 1)]
fn cycle_opposites_clash(world: ClassifyWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/classify.feature", index = 2)]
fn identical_signatures_mirror(world: ClassifyWorld) {
    let _ = world;
}
