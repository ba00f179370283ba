//! Adjustment sources layered on top of the base scores.
//!
//! Sources run in a fixed order: nuance, book, year element. Each declares
//! the largest contribution it can make to either layer through
//! [`LayerBounds`], which lets tests prove that no combination of enabled
//! sources can push a score out of range. The layer clamp, neutral-pattern
//! boost and mirror floor follow aggregation.

use serde::{Deserialize, Serialize};

use astromatch_core::{EastRelation, RelationResult, Signature, WesternAspect, YearRelation};

use crate::{BookRules, NuanceTable};

/// Lowest value either layer may hold after the overlays.
pub const LAYER_FLOOR: f32 = 55.0;
/// Highest value either layer may hold after the overlays.
pub const LAYER_CEILING: f32 = 95.0;
/// Raw scores at or above this value never receive the neutral boost, and
/// boosted scores are capped here.
pub const NEUTRAL_BOOST_CAP: f32 = 74.0;
/// Lowest raw score for identical signatures.
pub const MIRROR_FLOOR: f32 = 90.0;

/// Inclusive range of a source's contribution to one layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeltaBound {
    /// Most negative contribution.
    pub min: f32,
    /// Most positive contribution.
    pub max: f32,
}

impl DeltaBound {
    /// Bound for a source that never touches a layer.
    pub const ZERO: Self = Self { min: 0.0, max: 0.0 };

    /// Report whether `value` lies within the bound.
    #[must_use]
    pub fn contains(self, value: f32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Declared bounds of a source on both layers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerBounds {
    /// Bound on the Eastern layer.
    pub east: DeltaBound,
    /// Bound on the Western layer.
    pub west: DeltaBound,
}

/// Contribution of one source to both layers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerDelta {
    /// Eastern layer delta.
    pub east: f32,
    /// Western layer delta.
    pub west: f32,
    /// Notes surfaced with the score.
    pub notes: Vec<String>,
}

/// Running Eastern and Western layer scores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerScores {
    /// Eastern layer.
    pub east: f32,
    /// Western layer.
    pub west: f32,
}

impl LayerScores {
    /// Add a delta to both layers.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "overlays add deltas to layers")]
    pub fn apply(self, delta: &LayerDelta) -> Self {
        Self {
            east: self.east + delta.east,
            west: self.west + delta.west,
        }
    }

    /// Clamp both layers to [`LAYER_FLOOR`]..=[`LAYER_CEILING`].
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            east: self.east.clamp(LAYER_FLOOR, LAYER_CEILING),
            west: self.west.clamp(LAYER_FLOOR, LAYER_CEILING),
        }
    }
}

/// A source of layer adjustments for a pair of signatures.
pub trait LayerOverlay {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Largest contribution the source can make to each layer.
    fn bounds(&self) -> LayerBounds;

    /// Contribution for a pair. Implementations must stay within
    /// [`LayerOverlay::bounds`] and be symmetric in `a` and `b`.
    fn delta(&self, a: Signature, b: Signature, relation: &RelationResult) -> LayerDelta;
}

impl LayerOverlay for NuanceTable {
    fn name(&self) -> &'static str {
        "nuance"
    }

    fn bounds(&self) -> LayerBounds {
        // 0.6 * 12 + 0.4 * 15 and 0.2 * 15.
        LayerBounds {
            east: DeltaBound {
                min: -13.2,
                max: 13.2,
            },
            west: DeltaBound { min: -3.0, max: 3.0 },
        }
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "nuance deltas are weighted into the layers"
    )]
    fn delta(&self, a: Signature, b: Signature, _relation: &RelationResult) -> LayerDelta {
        let entry = self.lookup(a.east(), b.east());
        let chemistry = f32::from(entry.chemistry);
        let long_term = f32::from(entry.long_term);
        LayerDelta {
            east: 0.6 * long_term + 0.4 * chemistry,
            west: 0.2 * chemistry,
            notes: entry.notes.into(),
        }
    }
}

impl LayerOverlay for BookRules {
    fn name(&self) -> &'static str {
        "book"
    }

    fn bounds(&self) -> LayerBounds {
        LayerBounds {
            east: DeltaBound {
                min: -10.0,
                max: 10.0,
            },
            west: DeltaBound { min: -5.0, max: 5.0 },
        }
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "book deltas are weighted into the layers"
    )]
    fn delta(&self, a: Signature, b: Signature, _relation: &RelationResult) -> LayerDelta {
        let nudge = self.nudge(a, b);
        LayerDelta {
            east: 0.5 * f32::from(nudge.delta.chemistry) + 0.5 * f32::from(nudge.delta.long_term),
            west: 0.5 * f32::from(nudge.delta.communication),
            notes: nudge.notes,
        }
    }
}

/// Eastern pattern used to scale the year-element delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EastPattern {
    Good,
    Difficult,
    Neutral,
}

impl EastPattern {
    const fn of(relation: EastRelation) -> Self {
        match relation {
            EastRelation::SameAnimal
            | EastRelation::SameTrine
            | EastRelation::SecretFriend
            | EastRelation::Ally => Self::Good,
            EastRelation::Clash => Self::Difficult,
            EastRelation::Adjacent | EastRelation::Neutral => Self::Neutral,
        }
    }
}

/// Eastern delta from the two birth-year elements.
///
/// Pairs without year elements on both sides receive nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct YearElementOverlay;

impl YearElementOverlay {
    /// Delta for a year relation under an Eastern relation.
    #[must_use]
    pub const fn east_delta(year: YearRelation, east: EastRelation) -> f32 {
        match (year, EastPattern::of(east)) {
            (YearRelation::Supportive, EastPattern::Good) => 6.0,
            (YearRelation::Supportive, EastPattern::Difficult) => 2.0,
            (YearRelation::Supportive, EastPattern::Neutral) => 4.0,
            (YearRelation::Same, EastPattern::Good) => 4.0,
            (YearRelation::Same, EastPattern::Difficult) => 1.0,
            (YearRelation::Same, EastPattern::Neutral) => 2.0,
            (YearRelation::Clashing, EastPattern::Good) => -6.0,
            (YearRelation::Clashing, EastPattern::Difficult) => -2.0,
            (YearRelation::Clashing, EastPattern::Neutral) => -4.0,
        }
    }
}

impl LayerOverlay for YearElementOverlay {
    fn name(&self) -> &'static str {
        "year_element"
    }

    fn bounds(&self) -> LayerBounds {
        LayerBounds {
            east: DeltaBound { min: -6.0, max: 6.0 },
            west: DeltaBound::ZERO,
        }
    }

    fn delta(&self, _a: Signature, _b: Signature, relation: &RelationResult) -> LayerDelta {
        let east = relation
            .year_relation
            .map_or(0.0, |year| Self::east_delta(year, relation.east_relation));
        LayerDelta {
            east,
            ..LayerDelta::default()
        }
    }
}

/// Switches for each adjustment step. All steps are on by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "each overlay is toggled independently"
)]
pub struct OverlayToggles {
    /// Manual overrides short-circuit scoring.
    pub manual_override: bool,
    /// Chinese-pair nuance deltas.
    pub nuance: bool,
    /// Book nudges.
    pub book: bool,
    /// Year-element deltas.
    pub year_element: bool,
    /// Boost for neutral Eastern pairs with a favourable aspect.
    pub neutral_boost: bool,
    /// Floor for identical signatures.
    pub mirror_floor: bool,
}

impl Default for OverlayToggles {
    fn default() -> Self {
        Self {
            manual_override: true,
            nuance: true,
            book: true,
            year_element: true,
            neutral_boost: true,
            mirror_floor: true,
        }
    }
}

impl OverlayToggles {
    /// Every step disabled; base tables and aggregation only.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            manual_override: false,
            nuance: false,
            book: false,
            year_element: false,
            neutral_boost: false,
            mirror_floor: false,
        }
    }
}

/// Bonus for a neutral Eastern pair with a favourable Western aspect.
///
/// Scores at or above [`NEUTRAL_BOOST_CAP`] are returned unchanged; others
/// are raised by the bonus but never past the cap.
#[must_use]
#[expect(clippy::float_arithmetic, reason = "the boost adds a bonus")]
pub fn neutral_pattern_boost(raw: f32, relation: &RelationResult) -> f32 {
    if relation.east_relation != EastRelation::Neutral || raw >= NEUTRAL_BOOST_CAP {
        return raw;
    }
    let bonus = match relation.west_aspect {
        WesternAspect::Opposition => 6.0,
        WesternAspect::Trine | WesternAspect::Sextile => 4.0,
        _ => return raw,
    };
    (raw + bonus).min(NEUTRAL_BOOST_CAP)
}

/// Raise identical signatures to [`MIRROR_FLOOR`].
#[must_use]
pub fn mirror_floor(raw: f32, relation: &RelationResult) -> f32 {
    if relation.is_mirror() {
        raw.max(MIRROR_FLOOR)
    } else {
        raw
    }
}
