//! Property-based tests for the scoring pipeline.
//!
//! # Invariants tested
//!
//! - **Symmetry:** `score(a, b) == score(b, a)` for any pair, year elements
//!   included.
//! - **Grid membership:** computed scores lie on the quantiser grid and the
//!   tier agrees with the score.
//! - **Quantiser idempotence:** quantising a quantised score is a no-op.
//! - **Override precedence:** an overridden pair reports its record.

use std::sync::OnceLock;

use astromatch_core::{ChineseAnimal, Signature, WesternSign, YearElement};
use astromatch_scorer::{
    EngineConfig, Quantiser, ScoreSource, ScoringEngine, ScoringTables, Tier, tier_of,
};
use proptest::prelude::*;

fn engine() -> &'static ScoringEngine {
    static ENGINE: OnceLock<ScoringEngine> = OnceLock::new();
    ENGINE.get_or_init(|| {
        let tables = ScoringTables::builtin()
            .unwrap_or_else(|err| panic!("embedded tables should load: {err}"));
        ScoringEngine::new(tables, EngineConfig::default())
            .unwrap_or_else(|err| panic!("default config should validate: {err}"))
    })
}

fn signature_strategy() -> impl Strategy<Value = Signature> {
    (
        proptest::sample::select(WesternSign::ALL.to_vec()),
        proptest::sample::select(ChineseAnimal::ALL.to_vec()),
        proptest::option::of(proptest::sample::select(YearElement::ALL.to_vec())),
    )
        .prop_map(|(west, east, element)| {
            let signature = Signature::new(west, east);
            match element {
                Some(year_element) => signature.with_year_element(year_element),
                None => signature,
            }
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    /// Property: scoring is independent of argument order.
    #[test]
    fn scoring_is_symmetric(a in signature_strategy(), b in signature_strategy()) {
        prop_assert_eq!(engine().score(a, b), engine().score(b, a));
    }

    /// Property: computed scores sit on the grid with a matching tier.
    #[test]
    fn computed_scores_are_on_the_grid(a in signature_strategy(), b in signature_strategy()) {
        let result = engine().score(a, b);
        prop_assert_eq!(result.tier, tier_of(result.score));
        if result.source == ScoreSource::Computed {
            let quantiser = engine().config().quantiser;
            prop_assert!(quantiser.steps().any(|step| step == result.score));
            prop_assert!(result.raw_score.is_finite());
        }
    }

    /// Property: identical signatures always land in the top tier.
    #[test]
    fn mirrors_are_exceptional(a in signature_strategy()) {
        prop_assert_eq!(engine().score(a, a).tier, Tier::Exceptional);
    }

    /// Property: quantising is idempotent and stays within the grid.
    #[test]
    fn quantiser_is_idempotent(raw in -50.0_f32..150.0_f32) {
        let quantiser = Quantiser::default();
        let once = quantiser.quantise(raw);
        prop_assert!((quantiser.floor..=quantiser.ceiling).contains(&once));
        prop_assert_eq!(quantiser.quantise(f32::from(once)), once);
    }

    /// Property: tiers never decrease as scores grow.
    #[test]
    fn tiers_are_monotonic(x in 0_u8..=100, y in 0_u8..=100) {
        prop_assert!(tier_of(x.min(y)) <= tier_of(x.max(y)));
    }

    /// Property: overridden pairs report their record regardless of year
    /// elements.
    #[test]
    fn overrides_take_precedence(
        index in 0_usize..15,
        first in proptest::option::of(proptest::sample::select(YearElement::ALL.to_vec())),
        second in proptest::option::of(proptest::sample::select(YearElement::ALL.to_vec())),
    ) {
        let overrides = &engine().tables().overrides;
        let Some((key, record)) = overrides.iter().nth(index) else {
            return Err(TestCaseError::fail("override index out of range"));
        };
        let (left, right) = key
            .signatures()
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        let a = first.map_or(left, |element| left.with_year_element(element));
        let b = second.map_or(right, |element| right.with_year_element(element));

        let result = engine().score(a, b);
        prop_assert_eq!(result.score, record.score);
        prop_assert_eq!(result.tier, record.tier);
        prop_assert_eq!(result.source, ScoreSource::Override { flags: record.flags });
    }
}
