//! Categorical relations between two signatures.
//!
//! [`classify`] is the only entry point. Every relation it reports is
//! symmetric: swapping the arguments yields the same result.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Element, Modality, Polarity, Signature, YearRelation};

/// Relation between the Western elements of two signs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum WestRelation {
    /// Both signs share an element.
    SameElement,
    /// Fire with Air, or Earth with Water.
    Complementary,
    /// Fire with Earth, Earth with Air, or Air with Water.
    Neutral,
    /// Fire with Water.
    Tense,
}

impl WestRelation {
    /// Return the relation as a `snake_case` `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SameElement => "same_element",
            Self::Complementary => "complementary",
            Self::Neutral => "neutral",
            Self::Tense => "tense",
        }
    }
}

/// Relation between two Chinese animals.
///
/// Exactly one value is assigned per pair, by the first matching rule in
/// declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EastRelation {
    /// Identical animals.
    SameAnimal,
    /// Animals of the same trine.
    SameTrine,
    /// Secret-friend pairing.
    SecretFriend,
    /// Allies two steps apart on the cycle.
    Ally,
    /// Opposites six steps apart on the cycle.
    Clash,
    /// Neighbours on the cycle.
    Adjacent,
    /// None of the above.
    Neutral,
}

impl EastRelation {
    /// All relations in priority order.
    pub const ALL: [Self; 7] = [
        Self::SameAnimal,
        Self::SameTrine,
        Self::SecretFriend,
        Self::Ally,
        Self::Clash,
        Self::Adjacent,
        Self::Neutral,
    ];

    /// Return the relation as a `snake_case` `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SameAnimal => "same_animal",
            Self::SameTrine => "same_trine",
            Self::SecretFriend => "secret_friend",
            Self::Ally => "ally",
            Self::Clash => "clash",
            Self::Adjacent => "adjacent",
            Self::Neutral => "neutral",
        }
    }
}

/// Aspect formed by two signs on the zodiac wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum WesternAspect {
    /// Distance 0.
    SameSign,
    /// Distance 1.
    SemiSextile,
    /// Distance 2.
    Sextile,
    /// Distance 3.
    Square,
    /// Distance 4.
    Trine,
    /// Distance 5.
    Quincunx,
    /// Distance 6.
    Opposition,
}

impl WesternAspect {
    /// Aspect for a wheel distance; anything past 5 is an opposition.
    #[must_use]
    pub const fn from_distance(distance: u8) -> Self {
        match distance {
            0 => Self::SameSign,
            1 => Self::SemiSextile,
            2 => Self::Sextile,
            3 => Self::Square,
            4 => Self::Trine,
            5 => Self::Quincunx,
            _ => Self::Opposition,
        }
    }
}

/// Relation between two modalities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ModalityRelation {
    /// Both signs share the modality.
    Same(Modality),
    /// Cardinal with Mutable.
    Complementary,
    /// Any other mix.
    Mixed,
}

impl ModalityRelation {
    /// Classify two modalities, independent of order.
    #[must_use]
    pub const fn of(a: Modality, b: Modality) -> Self {
        match (a, b) {
            (Modality::Cardinal, Modality::Cardinal) => Self::Same(Modality::Cardinal),
            (Modality::Fixed, Modality::Fixed) => Self::Same(Modality::Fixed),
            (Modality::Mutable, Modality::Mutable) => Self::Same(Modality::Mutable),
            (Modality::Cardinal, Modality::Mutable) | (Modality::Mutable, Modality::Cardinal) => {
                Self::Complementary
            }
            _ => Self::Mixed,
        }
    }
}

/// Shared polarity of two animals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PolarityMatch {
    /// Both animals are yang.
    BothYang,
    /// Both animals are yin.
    BothYin,
    /// One of each.
    Mixed,
}

/// Unordered pair of Western elements, stored lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ElementPair {
    low: Element,
    high: Element,
}

impl ElementPair {
    /// Build the normalised pair.
    #[must_use]
    pub fn new(a: Element, b: Element) -> Self {
        Self {
            low: a.min(b),
            high: a.max(b),
        }
    }

    /// All ten unordered element pairs.
    pub fn all() -> impl Iterator<Item = Self> {
        Element::ALL.into_iter().flat_map(|a| {
            Element::ALL
                .into_iter()
                .filter(move |b| a <= *b)
                .map(move |b| Self { low: a, high: b })
        })
    }

    /// Lower element by declaration order.
    #[must_use]
    pub const fn low(self) -> Element {
        self.low
    }

    /// Higher element by declaration order.
    #[must_use]
    pub const fn high(self) -> Element {
        self.high
    }

    /// Element relation for the pair.
    ///
    /// | | Fire | Earth | Air | Water |
    /// |---|---|---|---|---|
    /// | Fire | same | neutral | complementary | tense |
    /// | Earth | neutral | same | neutral | complementary |
    /// | Air | complementary | neutral | same | neutral |
    /// | Water | tense | complementary | neutral | same |
    #[must_use]
    pub const fn relation(self) -> WestRelation {
        match (self.low, self.high) {
            (Element::Fire, Element::Fire)
            | (Element::Earth, Element::Earth)
            | (Element::Air, Element::Air)
            | (Element::Water, Element::Water) => WestRelation::SameElement,
            (Element::Fire, Element::Air) | (Element::Earth, Element::Water) => {
                WestRelation::Complementary
            }
            (Element::Fire, Element::Water) => WestRelation::Tense,
            _ => WestRelation::Neutral,
        }
    }
}

/// Every categorical relation between two signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RelationResult {
    /// Western element relation.
    pub west_relation: WestRelation,
    /// Chinese animal relation.
    pub east_relation: EastRelation,
    /// Aspect on the zodiac wheel.
    pub west_aspect: WesternAspect,
    /// Modality relation.
    pub modality_relation: ModalityRelation,
    /// Normalised Western element pair.
    pub element_pair: ElementPair,
    /// Both people share the Western sign.
    pub is_same_sign: bool,
    /// Both people share the Chinese animal.
    pub is_same_animal: bool,
    /// Shared animal polarity.
    pub polarity_match: PolarityMatch,
    /// Year-element relation, when both signatures carry one.
    pub year_relation: Option<YearRelation>,
}

impl RelationResult {
    /// Report whether both signs and animals are identical.
    #[must_use]
    pub const fn is_mirror(&self) -> bool {
        self.is_same_sign && self.is_same_animal
    }
}

/// Classify the relation between two signatures.
///
/// # Examples
/// ```
/// use astromatch_core::{
///     ChineseAnimal, EastRelation, Signature, WestRelation, WesternSign, classify,
/// };
///
/// let a = Signature::new(WesternSign::Aries, ChineseAnimal::Rat);
/// let b = Signature::new(WesternSign::Gemini, ChineseAnimal::Dragon);
/// let relation = classify(a, b);
///
/// assert_eq!(relation.east_relation, EastRelation::SameTrine);
/// assert_eq!(relation.west_relation, WestRelation::Complementary);
/// assert_eq!(classify(b, a), relation);
/// ```
#[must_use]
pub fn classify(a: Signature, b: Signature) -> RelationResult {
    let element_pair = ElementPair::new(a.west().element(), b.west().element());
    RelationResult {
        west_relation: element_pair.relation(),
        east_relation: east_relation(a, b),
        west_aspect: WesternAspect::from_distance(a.west().wheel_distance(b.west())),
        modality_relation: ModalityRelation::of(a.west().modality(), b.west().modality()),
        element_pair,
        is_same_sign: a.west() == b.west(),
        is_same_animal: a.east() == b.east(),
        polarity_match: polarity_match(a, b),
        year_relation: a
            .year_element()
            .zip(b.year_element())
            .map(|(left, right)| left.relation_to(right)),
    }
}

fn east_relation(a: Signature, b: Signature) -> EastRelation {
    let (left, right) = (a.east(), b.east());
    if left == right {
        EastRelation::SameAnimal
    } else if left.trine() == right.trine() {
        EastRelation::SameTrine
    } else if left.secret_friend() == right {
        EastRelation::SecretFriend
    } else if left.is_ally_of(right) {
        EastRelation::Ally
    } else if left.opposite() == right {
        EastRelation::Clash
    } else if left.cycle_distance(right) == 1 {
        EastRelation::Adjacent
    } else {
        EastRelation::Neutral
    }
}

fn polarity_match(a: Signature, b: Signature) -> PolarityMatch {
    match (a.east().polarity(), b.east().polarity()) {
        (Polarity::Yang, Polarity::Yang) => PolarityMatch::BothYang,
        (Polarity::Yin, Polarity::Yin) => PolarityMatch::BothYin,
        _ => PolarityMatch::Mixed,
    }
}
