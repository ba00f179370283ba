//! Chinese-pair nuance: chemistry and long-term deltas for every ordered
//! pair of animals.
//!
//! Each pair starts from a rule keyed by its structural relation and may
//! receive an additive pair-specific adjustment. The sums are clamped to
//! ±15 chemistry and ±12 long-term.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use astromatch_core::ChineseAnimal;

use crate::TableError;

const CHEMISTRY_LIMIT: i8 = 15;
const LONG_TERM_LIMIT: i8 = 12;

const FALLBACK_NOTES: [&str; 2] = [
    "Different strengths that can fit well.",
    "Care and clarity keep it strong.",
];

/// Qualitative summary of a nuance entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    /// Strong chemistry and a solid long-term outlook.
    Great,
    /// Comfortable on both counts.
    Good,
    /// Neither clearly easy nor clearly hard.
    Mixed,
    /// The long-term outlook needs work.
    Hard,
}

impl Tone {
    /// Derive the tone from clamped deltas.
    #[must_use]
    pub const fn from_deltas(chemistry: i8, long_term: i8) -> Self {
        if chemistry >= 10 && long_term >= 6 {
            Self::Great
        } else if chemistry >= 6 && long_term >= 3 {
            Self::Good
        } else if long_term <= -6 {
            Self::Hard
        } else {
            Self::Mixed
        }
    }
}

/// Structural relation used to pick the base nuance rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PairPattern {
    SameAnimal,
    Trine,
    SecretFriend,
    Clash,
    Adjacent,
    Other,
}

impl PairPattern {
    fn of(a: ChineseAnimal, b: ChineseAnimal) -> Self {
        if a == b {
            Self::SameAnimal
        } else if a.trine() == b.trine() {
            Self::Trine
        } else if a.secret_friend() == b {
            Self::SecretFriend
        } else if a.cycle_distance(b) == 6 {
            Self::Clash
        } else if a.cycle_distance(b) == 1 {
            Self::Adjacent
        } else {
            Self::Other
        }
    }

    const fn deltas(self) -> (i8, i8) {
        match self {
            Self::SameAnimal => (6, 4),
            Self::Trine => (10, 8),
            Self::SecretFriend => (8, 7),
            Self::Clash => (2, -10),
            Self::Adjacent => (4, 1),
            Self::Other => (3, 3),
        }
    }

    const fn notes(self) -> Option<[&'static str; 2]> {
        match self {
            Self::SameAnimal => Some([
                "Like meets like: familiar strengths and blind spots.",
                "Shared style makes bonding quick and honest.",
            ]),
            Self::Trine => Some([
                "You fall into an easy, encouraging rhythm.",
                "Instincts align; trust builds quickly.",
            ]),
            Self::SecretFriend => Some([
                "There's a quiet, natural affinity.",
                "You steady each other without trying.",
            ]),
            Self::Clash => Some([
                "Strong pull, but emotions can flare.",
                "Different instincts; fairness matters.",
            ]),
            Self::Adjacent => Some([
                "Neighbours in temperament; curiosity keeps it lively.",
                "Similar pace with just enough contrast.",
            ]),
            Self::Other => None,
        }
    }
}

/// Pair-specific adjustment, applied in both orders.
struct PairAdjustment {
    pair: [ChineseAnimal; 2],
    chemistry: i8,
    long_term: i8,
    notes: [&'static str; 2],
}

const PAIR_ADJUSTMENTS: [PairAdjustment; 14] = {
    use ChineseAnimal::{
        Dog, Dragon, Goat, Horse, Monkey, Ox, Pig, Rabbit, Rat, Rooster, Snake, Tiger,
    };
    [
        PairAdjustment {
            pair: [Rat, Monkey],
            chemistry: 4,
            long_term: 2,
            notes: [
                "Wit and loyalty go hand in hand here.",
                "You bring out each other's brilliance.",
            ],
        },
        PairAdjustment {
            pair: [Dragon, Monkey],
            chemistry: 4,
            long_term: 2,
            notes: [
                "Ambition meets agility in a true power pair.",
                "Big vision with clever execution.",
            ],
        },
        PairAdjustment {
            pair: [Tiger, Dog],
            chemistry: 3,
            long_term: 4,
            notes: [
                "Courage and loyalty reinforce each other.",
                "You protect what you build together.",
            ],
        },
        PairAdjustment {
            pair: [Rabbit, Goat],
            chemistry: 3,
            long_term: 5,
            notes: [
                "Gentle support and everyday warmth.",
                "Soft hearts that care deeply.",
            ],
        },
        PairAdjustment {
            pair: [Pig, Goat],
            chemistry: 3,
            long_term: 5,
            notes: [
                "Kindness first; home feels nourishing.",
                "Affection turns into lasting comfort.",
            ],
        },
        PairAdjustment {
            pair: [Snake, Rooster],
            chemistry: 3,
            long_term: 4,
            notes: [
                "Competence and elegance win mutual respect.",
                "Precision meets insight in strong teamwork.",
            ],
        },
        PairAdjustment {
            pair: [Ox, Snake],
            chemistry: 3,
            long_term: 4,
            notes: [
                "Quiet devotion with strategic calm.",
                "Steady trust grows over time.",
            ],
        },
        PairAdjustment {
            pair: [Horse, Goat],
            chemistry: 4,
            long_term: 4,
            notes: [
                "Easygoing joy and shared freedom.",
                "Lightness that still feels safe.",
            ],
        },
        PairAdjustment {
            pair: [Dragon, Dog],
            chemistry: 0,
            long_term: -4,
            notes: [
                "Pride and principle can collide.",
                "Different codes need careful listening.",
            ],
        },
        PairAdjustment {
            pair: [Snake, Pig],
            chemistry: -2,
            long_term: -3,
            notes: [
                "Privacy and openness need care.",
                "Gentleness helps bridge priorities.",
            ],
        },
        PairAdjustment {
            pair: [Rat, Horse],
            chemistry: 1,
            long_term: -4,
            notes: [
                "Different speeds; sync plans early.",
                "Restlessness and caution need balance.",
            ],
        },
        PairAdjustment {
            pair: [Ox, Goat],
            chemistry: 1,
            long_term: -4,
            notes: [
                "Practicality meets sensitivity; go steady.",
                "Standards differ; kindness smooths edges.",
            ],
        },
        PairAdjustment {
            pair: [Rabbit, Rooster],
            chemistry: 1,
            long_term: -4,
            notes: [
                "Softness meets blunt honesty; use tact.",
                "Different styles, same goodwill if gentle.",
            ],
        },
        PairAdjustment {
            pair: [Tiger, Monkey],
            chemistry: 10,
            long_term: -6,
            notes: [
                "Off-the-charts chemistry; keep it playful.",
                "High spark, manage heat with respect.",
            ],
        },
    ]
};

fn pair_adjustment(a: ChineseAnimal, b: ChineseAnimal) -> Option<&'static PairAdjustment> {
    PAIR_ADJUSTMENTS
        .iter()
        .find(|adjustment| adjustment.pair == [a, b] || adjustment.pair == [b, a])
}

/// Chemistry and long-term deltas for one ordered animal pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NuanceEntry {
    /// Chemistry delta, within ±15.
    pub chemistry: i8,
    /// Long-term delta, within ±12.
    pub long_term: i8,
    /// Qualitative summary.
    pub tone: Tone,
    /// Two short notes describing the pairing.
    pub notes: [String; 2],
}

impl NuanceEntry {
    /// Neutral entry used when the table has no row for a pair.
    #[must_use]
    pub fn neutral() -> Self {
        Self {
            chemistry: 0,
            long_term: 0,
            tone: Tone::Mixed,
            notes: FALLBACK_NOTES.map(str::to_owned),
        }
    }

    fn derive(a: ChineseAnimal, b: ChineseAnimal) -> Self {
        let pattern = PairPattern::of(a, b);
        let (base_chemistry, base_long_term) = pattern.deltas();
        let adjustment = pair_adjustment(a, b);
        let (extra_chemistry, extra_long_term) =
            adjustment.map_or((0, 0), |adj| (adj.chemistry, adj.long_term));

        let chemistry = base_chemistry
            .saturating_add(extra_chemistry)
            .clamp(-CHEMISTRY_LIMIT, CHEMISTRY_LIMIT);
        let long_term = base_long_term
            .saturating_add(extra_long_term)
            .clamp(-LONG_TERM_LIMIT, LONG_TERM_LIMIT);
        let notes = pattern
            .notes()
            .or_else(|| adjustment.map(|adj| adj.notes))
            .unwrap_or(FALLBACK_NOTES);

        Self {
            chemistry,
            long_term,
            tone: Tone::from_deltas(chemistry, long_term),
            notes: notes.map(str::to_owned),
        }
    }
}

/// Nuance entries for all 144 ordered animal pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NuanceTable {
    entries: BTreeMap<(ChineseAnimal, ChineseAnimal), NuanceEntry>,
}

impl Default for NuanceTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl NuanceTable {
    /// Derive the full table from the relation rules and pair adjustments.
    #[must_use]
    pub fn builtin() -> Self {
        let entries = ChineseAnimal::ALL
            .into_iter()
            .flat_map(|a| ChineseAnimal::ALL.into_iter().map(move |b| (a, b)))
            .map(|(a, b)| ((a, b), NuanceEntry::derive(a, b)))
            .collect();
        Self { entries }
    }

    /// Build a table from explicit entries, e.g. to test fallbacks.
    #[must_use]
    pub const fn from_entries(
        entries: BTreeMap<(ChineseAnimal, ChineseAnimal), NuanceEntry>,
    ) -> Self {
        Self { entries }
    }

    /// Entry for an ordered pair, falling back to [`NuanceEntry::neutral`].
    #[must_use]
    pub fn lookup(&self, a: ChineseAnimal, b: ChineseAnimal) -> NuanceEntry {
        self.entries.get(&(a, b)).cloned().unwrap_or_else(|| {
            log::warn!("no nuance entry for {a}/{b}; using neutral deltas");
            NuanceEntry::neutral()
        })
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Report whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check that every ordered pair has an entry.
    ///
    /// # Errors
    /// Returns [`TableError::IncompleteTable`] naming the first missing pair.
    pub fn validate(&self) -> Result<(), TableError> {
        let missing = ChineseAnimal::ALL
            .into_iter()
            .flat_map(|a| ChineseAnimal::ALL.into_iter().map(move |b| (a, b)))
            .find(|pair| !self.entries.contains_key(pair));
        match missing {
            Some((a, b)) => Err(TableError::IncompleteTable {
                table: "nuance",
                entry: format!("{a}/{b}"),
            }),
            None => Ok(()),
        }
    }
}
