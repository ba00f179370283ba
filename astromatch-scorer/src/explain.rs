//! Human-readable reasons, theme and tier presentation for a pair.
//!
//! Reasons are derived only from the relation classification, never from
//! the numeric score, so overridden pairs explain themselves the same way
//! as computed ones.

use serde::Serialize;

use astromatch_core::{
    EastRelation, Modality, ModalityRelation, PolarityMatch, RelationResult, WestRelation,
    WesternAspect, YearRelation,
};

use crate::Tier;

const FALLBACK_THEME: &str = "Different styles that complement when you meet halfway.";

/// Display metadata for a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierMeta {
    /// Human label.
    pub label: &'static str,
    /// Emoji badge.
    pub emoji: &'static str,
    /// Colour token for the client stylesheet.
    pub color_token: &'static str,
}

impl Tier {
    /// Display metadata for the tier.
    #[must_use]
    pub const fn meta(self) -> TierMeta {
        match self {
            Self::Exceptional => TierMeta {
                label: "Exceptional",
                emoji: "🌟",
                color_token: "text-green-400",
            },
            Self::HighlyCompatible => TierMeta {
                label: "Highly Compatible",
                emoji: "✨",
                color_token: "text-blue-400",
            },
            Self::Balanced => TierMeta {
                label: "Balanced",
                emoji: "⚖️",
                color_token: "text-yellow-400",
            },
            Self::Challenging => TierMeta {
                label: "Challenging",
                emoji: "🔥",
                color_token: "text-orange-400",
            },
        }
    }
}

/// Reasons, theme and tier presentation for a pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Explanation {
    /// Reasons in fixed category order.
    pub reasons: Vec<String>,
    /// One-line theme.
    pub theme: String,
    /// Tier label.
    pub tier_label: &'static str,
    /// Tier emoji.
    pub emoji: &'static str,
    /// Tier colour token.
    pub color_token: &'static str,
}

/// Explain a classified pair at the given tier.
///
/// # Examples
/// ```
/// use astromatch_core::{ChineseAnimal, Signature, WesternSign, classify};
/// use astromatch_scorer::{Tier, explain};
///
/// let a = Signature::new(WesternSign::Aries, ChineseAnimal::Rat);
/// let b = Signature::new(WesternSign::Leo, ChineseAnimal::Dragon);
/// let explanation = explain(&classify(a, b), Tier::Exceptional);
///
/// assert_eq!(explanation.reasons[0], "Same element");
/// assert!(explanation.theme.starts_with("Effortless flow"));
/// assert_eq!(explanation.emoji, "🌟");
/// ```
#[must_use]
pub fn explain(relation: &RelationResult, tier: Tier) -> Explanation {
    let meta = tier.meta();
    Explanation {
        reasons: reasons(relation),
        theme: theme(relation).to_owned(),
        tier_label: meta.label,
        emoji: meta.emoji,
        color_token: meta.color_token,
    }
}

/// Reasons for a pair, one per category that has something to say.
#[must_use]
pub fn reasons(relation: &RelationResult) -> Vec<String> {
    [
        Some(element_reason(relation.west_relation)),
        modality_reason(relation.modality_relation),
        aspect_reason(relation.west_aspect),
        east_reason(relation.east_relation),
        polarity_reason(relation.polarity_match),
        relation.year_relation.map(year_reason),
    ]
    .into_iter()
    .flatten()
    .map(str::to_owned)
    .collect()
}

const fn element_reason(relation: WestRelation) -> &'static str {
    match relation {
        WestRelation::SameElement => "Same element",
        WestRelation::Complementary => "Complementary elements",
        WestRelation::Neutral => "Neutral element mix",
        WestRelation::Tense => "Tense element mix",
    }
}

const fn modality_reason(relation: ModalityRelation) -> Option<&'static str> {
    match relation {
        ModalityRelation::Same(Modality::Cardinal) => Some("Same modality (cardinal)"),
        ModalityRelation::Same(Modality::Fixed) => Some("Same modality (fixed)"),
        ModalityRelation::Same(Modality::Mutable) => Some("Same modality (mutable)"),
        ModalityRelation::Complementary => Some("Complementary modalities"),
        ModalityRelation::Mixed => None,
    }
}

const fn aspect_reason(aspect: WesternAspect) -> Option<&'static str> {
    match aspect {
        WesternAspect::SameSign => Some("Same sign"),
        WesternAspect::Sextile => Some("Sextile aspect"),
        WesternAspect::Trine => Some("Trine aspect"),
        WesternAspect::Square => Some("Square tension"),
        WesternAspect::Opposition => Some("Opposition polarity"),
        WesternAspect::SemiSextile | WesternAspect::Quincunx => None,
    }
}

const fn east_reason(relation: EastRelation) -> Option<&'static str> {
    match relation {
        EastRelation::SameAnimal => Some("Same animal"),
        EastRelation::SameTrine => Some("Same Chinese trine"),
        EastRelation::SecretFriend => Some("Secret friends"),
        EastRelation::Ally => Some("Animal allies"),
        EastRelation::Clash => Some("Animal clash (opposites)"),
        EastRelation::Adjacent => Some("Neighbouring animals"),
        EastRelation::Neutral => None,
    }
}

const fn polarity_reason(polarity: PolarityMatch) -> Option<&'static str> {
    match polarity {
        PolarityMatch::BothYang => Some("High-tempo synergy"),
        PolarityMatch::BothYin => Some("Steady shared pace"),
        PolarityMatch::Mixed => None,
    }
}

const fn year_reason(relation: YearRelation) -> &'static str {
    match relation {
        YearRelation::Same => "Same year element",
        YearRelation::Supportive => "Supportive year elements",
        YearRelation::Clashing => "Clashing year elements",
    }
}

/// Theme for a pair: the first matching predicate wins.
#[must_use]
pub fn theme(relation: &RelationResult) -> &'static str {
    let east = relation.east_relation;
    let harmonious_elements = matches!(
        relation.west_relation,
        WestRelation::SameElement | WestRelation::Complementary
    );
    if east == EastRelation::SameTrine && harmonious_elements {
        "Effortless flow: shared instincts and easy conversation."
    } else if east == EastRelation::SameAnimal {
        "Mirror match: you understand each other's rhythms instantly."
    } else if east == EastRelation::SameTrine {
        "Kindred rhythm: you get each other fast."
    } else if matches!(east, EastRelation::SecretFriend | EastRelation::Ally) {
        "Quiet allies: you stabilise each other naturally."
    } else if east == EastRelation::Clash && relation.west_aspect == WesternAspect::Opposition {
        "Opposites attract: sparks fly when you lean into the contrast."
    } else if east == EastRelation::Clash {
        "Magnetic tension: exciting but needs honest communication."
    } else if relation.west_relation == WestRelation::Tense
        || relation.west_aspect == WesternAspect::Square
    {
        "Growth through friction: patience turns differences into strengths."
    } else {
        FALLBACK_THEME
    }
}
