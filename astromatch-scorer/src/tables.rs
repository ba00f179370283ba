//! Base scores for the Western and Eastern layers.
//!
//! Both tables are plain data. Lookups never fail: an absent entry logs a
//! warning and falls back to the neutral default, while
//! [`BaseTables::validate`] reports the same gap as an error so table files
//! are rejected at load time.

use serde::{Deserialize, Serialize};

use astromatch_core::{EastRelation, Element, ElementPair, Modality, ModalityRelation};

use crate::TableError;

/// Largest upward modality nudge.
pub const MODALITY_NUDGE_MAX: f32 = 3.0;
/// Largest downward modality nudge.
pub const MODALITY_NUDGE_MIN: f32 = -3.0;

/// Base score for one unordered Western element pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementBase {
    /// The two elements, in any order.
    pub elements: [Element; 2],
    /// Base score for the pair.
    pub base: f32,
}

impl ElementBase {
    const fn new(a: Element, b: Element, base: f32) -> Self {
        Self {
            elements: [a, b],
            base,
        }
    }

    fn pair(&self) -> ElementPair {
        let [a, b] = self.elements;
        ElementPair::new(a, b)
    }
}

/// Base score for one Eastern relation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelationBase {
    /// Eastern relation.
    pub relation: EastRelation,
    /// Base score for the relation.
    pub base: f32,
}

/// Adjustments applied on top of the element base for modality pairings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalityNudges {
    /// Two fixed signs dig in.
    pub fixed_fixed: f32,
    /// Two mutable signs adapt to each other.
    pub mutable_mutable: f32,
    /// Cardinal initiative with mutable follow-through.
    pub cardinal_mutable: f32,
}

impl Default for ModalityNudges {
    fn default() -> Self {
        Self {
            fixed_fixed: -3.0,
            mutable_mutable: 2.0,
            cardinal_mutable: 1.0,
        }
    }
}

impl ModalityNudges {
    /// Nudge for two modalities, clamped to
    /// [`MODALITY_NUDGE_MIN`]..=[`MODALITY_NUDGE_MAX`].
    #[must_use]
    pub fn nudge(&self, a: Modality, b: Modality) -> f32 {
        let nudge = match ModalityRelation::of(a, b) {
            ModalityRelation::Same(Modality::Fixed) => self.fixed_fixed,
            ModalityRelation::Same(Modality::Mutable) => self.mutable_mutable,
            ModalityRelation::Complementary => self.cardinal_mutable,
            ModalityRelation::Same(Modality::Cardinal) | ModalityRelation::Mixed => 0.0,
        };
        nudge.clamp(MODALITY_NUDGE_MIN, MODALITY_NUDGE_MAX)
    }
}

/// Neutral defaults returned for absent entries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fallbacks {
    /// Western layer default.
    pub west: f32,
    /// Eastern layer default.
    pub east: f32,
}

impl Default for Fallbacks {
    fn default() -> Self {
        Self {
            west: 78.0,
            east: 80.0,
        }
    }
}

/// Base scoring tables for both layers.
///
/// # Examples
/// ```
/// use astromatch_core::{EastRelation, Element, ElementPair, Modality};
/// use astromatch_scorer::BaseTables;
///
/// let tables = BaseTables::default();
/// let pair = ElementPair::new(Element::Fire, Element::Air);
/// assert_eq!(tables.west_base(pair, Modality::Cardinal, Modality::Fixed), 85.0);
/// assert_eq!(tables.east_base(EastRelation::SameTrine), 88.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseTables {
    west: Vec<ElementBase>,
    east: Vec<RelationBase>,
    #[serde(default)]
    modality: ModalityNudges,
    #[serde(default)]
    fallback: Fallbacks,
}

impl Default for BaseTables {
    fn default() -> Self {
        use Element::{Air, Earth, Fire, Water};
        Self {
            west: vec![
                ElementBase::new(Air, Air, 88.0),
                ElementBase::new(Fire, Fire, 86.0),
                ElementBase::new(Water, Water, 82.0),
                ElementBase::new(Earth, Earth, 82.0),
                ElementBase::new(Air, Fire, 85.0),
                ElementBase::new(Water, Earth, 85.0),
                ElementBase::new(Fire, Earth, 74.0),
                ElementBase::new(Air, Earth, 72.0),
                ElementBase::new(Air, Water, 70.0),
                ElementBase::new(Fire, Water, 68.0),
            ],
            east: vec![
                RelationBase {
                    relation: EastRelation::SameAnimal,
                    base: 82.0,
                },
                RelationBase {
                    relation: EastRelation::SameTrine,
                    base: 88.0,
                },
                RelationBase {
                    relation: EastRelation::SecretFriend,
                    base: 86.0,
                },
                RelationBase {
                    relation: EastRelation::Ally,
                    base: 84.0,
                },
                RelationBase {
                    relation: EastRelation::Clash,
                    base: 64.0,
                },
                RelationBase {
                    relation: EastRelation::Adjacent,
                    base: 78.0,
                },
                RelationBase {
                    relation: EastRelation::Neutral,
                    base: 66.0,
                },
            ],
            modality: ModalityNudges::default(),
            fallback: Fallbacks::default(),
        }
    }
}

impl BaseTables {
    /// Parse and validate tables from a JSON document.
    ///
    /// # Errors
    /// Returns [`TableError::Parse`] for malformed JSON and
    /// [`TableError::IncompleteTable`] when an entry is missing.
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let tables: Self = serde_json::from_str(json).map_err(|source| TableError::Parse {
            table: "base",
            source,
        })?;
        tables.validate()?;
        Ok(tables)
    }

    /// Western base: element-pair base plus the modality nudge.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "the western base adds a bounded modality nudge"
    )]
    pub fn west_base(&self, pair: ElementPair, a: Modality, b: Modality) -> f32 {
        self.element_base(pair) + self.modality.nudge(a, b)
    }

    /// Element-pair base without the modality nudge.
    #[must_use]
    pub fn element_base(&self, pair: ElementPair) -> f32 {
        self.west
            .iter()
            .find(|entry| entry.pair() == pair)
            .map_or_else(
                || {
                    log::warn!(
                        "no western base for {}/{}; using fallback {}",
                        pair.low(),
                        pair.high(),
                        self.fallback.west
                    );
                    self.fallback.west
                },
                |entry| entry.base,
            )
    }

    /// Eastern base for a relation.
    #[must_use]
    pub fn east_base(&self, relation: EastRelation) -> f32 {
        self.east
            .iter()
            .find(|entry| entry.relation == relation)
            .map_or_else(
                || {
                    log::warn!(
                        "no eastern base for {}; using fallback {}",
                        relation.as_str(),
                        self.fallback.east
                    );
                    self.fallback.east
                },
                |entry| entry.base,
            )
    }

    /// Smallest and largest western base, nudges included.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "bounds add the nudge limit to the base extremes"
    )]
    pub fn west_range(&self) -> (f32, f32) {
        let (low, high) = extremes(self.west.iter().map(|entry| entry.base), self.fallback.west);
        (low + MODALITY_NUDGE_MIN, high + MODALITY_NUDGE_MAX)
    }

    /// Smallest and largest eastern base.
    #[must_use]
    pub fn east_range(&self) -> (f32, f32) {
        extremes(self.east.iter().map(|entry| entry.base), self.fallback.east)
    }

    /// Check that every element pair and every Eastern relation has a base.
    ///
    /// # Errors
    /// Returns [`TableError::IncompleteTable`] naming the first missing entry.
    pub fn validate(&self) -> Result<(), TableError> {
        let missing_pair =
            ElementPair::all().find(|pair| !self.west.iter().any(|e| e.pair() == *pair));
        if let Some(pair) = missing_pair {
            return Err(TableError::IncompleteTable {
                table: "western base",
                entry: format!("{}/{}", pair.low(), pair.high()),
            });
        }
        if let Some(relation) = EastRelation::ALL
            .into_iter()
            .find(|relation| !self.east.iter().any(|e| e.relation == *relation))
        {
            return Err(TableError::IncompleteTable {
                table: "eastern base",
                entry: relation.as_str().to_owned(),
            });
        }
        Ok(())
    }
}

fn extremes(values: impl Iterator<Item = f32>, fallback: f32) -> (f32, f32) {
    values.fold((fallback, fallback), |(low, high), value| {
        (low.min(value), high.max(value))
    })
}
