//! Book nudges: small hand-curated adjustments keyed by a full signature.
//!
//! A rule belongs to one signature and names the partner animal it applies
//! to, optionally restricted to some partner Western signs. When scoring a
//! pair, rules are evaluated in both directions and summed; the sum is
//! clamped to ±10 per component.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use astromatch_core::{ChineseAnimal, Signature, WesternSign};

use crate::TableError;

const DELTA_LIMIT: i8 = 10;
const ANY_KEYWORD: &str = "any";

/// Whether a rule favours or warns against the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookAction {
    /// The pairing is encouraged.
    #[serde(alias = "favor")]
    Favour,
    /// The pairing is discouraged.
    Avoid,
}

/// Partner Western signs a rule applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WestFilterRepr", into = "WestFilterRepr")]
pub enum WestFilter {
    /// Any partner sign.
    Any,
    /// Only the listed partner signs.
    Signs(Vec<WesternSign>),
}

impl WestFilter {
    /// Report whether the filter admits `sign`.
    #[must_use]
    pub fn admits(&self, sign: WesternSign) -> bool {
        match self {
            Self::Any => true,
            Self::Signs(signs) => signs.contains(&sign),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum WestFilterRepr {
    Keyword(String),
    Signs(Vec<WesternSign>),
}

impl TryFrom<WestFilterRepr> for WestFilter {
    type Error = String;

    fn try_from(value: WestFilterRepr) -> Result<Self, Self::Error> {
        match value {
            WestFilterRepr::Keyword(word) if word.eq_ignore_ascii_case(ANY_KEYWORD) => Ok(Self::Any),
            WestFilterRepr::Keyword(word) => Err(format!(
                "west filter must be \"{ANY_KEYWORD}\" or a list of signs, got \"{word}\""
            )),
            WestFilterRepr::Signs(signs) => Ok(Self::Signs(signs)),
        }
    }
}

impl From<WestFilter> for WestFilterRepr {
    fn from(value: WestFilter) -> Self {
        match value {
            WestFilter::Any => Self::Keyword(ANY_KEYWORD.to_owned()),
            WestFilter::Signs(signs) => Self::Signs(signs),
        }
    }
}

/// Chemistry, long-term and communication deltas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDelta {
    /// Chemistry delta.
    #[serde(default)]
    pub chemistry: i8,
    /// Long-term delta.
    #[serde(default)]
    pub long_term: i8,
    /// Communication delta.
    #[serde(default)]
    pub communication: i8,
}

impl BookDelta {
    fn components(self) -> [(&'static str, i8); 3] {
        [
            ("chemistry", self.chemistry),
            ("long_term", self.long_term),
            ("communication", self.communication),
        ]
    }

    fn saturating_add(self, other: Self) -> Self {
        Self {
            chemistry: self.chemistry.saturating_add(other.chemistry),
            long_term: self.long_term.saturating_add(other.long_term),
            communication: self.communication.saturating_add(other.communication),
        }
    }

    fn clamped(self) -> Self {
        Self {
            chemistry: self.chemistry.clamp(-DELTA_LIMIT, DELTA_LIMIT),
            long_term: self.long_term.clamp(-DELTA_LIMIT, DELTA_LIMIT),
            communication: self.communication.clamp(-DELTA_LIMIT, DELTA_LIMIT),
        }
    }
}

/// One book rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRule {
    /// Partner animal the rule applies to.
    pub target: ChineseAnimal,
    /// Partner Western signs the rule applies to.
    #[serde(default = "any_sign")]
    pub west_filter: WestFilter,
    /// Favour or avoid. Avoid rules may only lower scores; favour rules
    /// carry whatever sign the curated delta has.
    pub action: BookAction,
    /// Deltas contributed when the rule matches.
    pub delta: BookDelta,
    /// Short note surfaced with the score.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

const fn any_sign() -> WestFilter {
    WestFilter::Any
}

impl BookRule {
    /// Report whether the rule applies to `partner`.
    #[must_use]
    pub fn matches(&self, partner: Signature) -> bool {
        self.target == partner.east() && self.west_filter.admits(partner.west())
    }
}

/// Summed nudge for a pair, with the notes of every matching rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookNudge {
    /// Clamped deltas.
    pub delta: BookDelta,
    /// Notes of the matching rules, first direction first.
    pub notes: Vec<String>,
}

/// Book rules keyed by owning signature.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookRules {
    rules: BTreeMap<Signature, Vec<BookRule>>,
}

impl BookRules {
    /// Parse and validate rules from JSON keyed by signature key
    /// (`"aries_rat"`).
    ///
    /// # Errors
    /// Returns [`TableError::Parse`] for malformed JSON,
    /// [`TableError::UnknownKey`] for unparseable signature keys,
    /// [`TableError::InvalidBookDelta`] for deltas outside `-10..=10`, and
    /// [`TableError::PositiveAvoidDelta`] for avoid rules that would raise a
    /// score.
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let raw: BTreeMap<String, Vec<BookRule>> =
            serde_json::from_str(json).map_err(|source| TableError::Parse {
                table: "book",
                source,
            })?;
        let mut rules: BTreeMap<Signature, Vec<BookRule>> = BTreeMap::new();
        for (key, entries) in raw {
            let signature: Signature = key.parse().map_err(|source| TableError::UnknownKey {
                table: "book",
                key: key.clone(),
                source,
            })?;
            validate_deltas(&key, &entries)?;
            rules.entry(signature).or_default().extend(entries);
        }
        Ok(Self { rules })
    }

    /// Rules owned by `owner`, ignoring any year element.
    #[must_use]
    pub fn rules_for(&self, owner: Signature) -> &[BookRule] {
        self.rules
            .get(&owner.without_year_element())
            .map_or(&[], Vec::as_slice)
    }

    /// Evaluate both directions of a pair.
    #[must_use]
    pub fn nudge(&self, a: Signature, b: Signature) -> BookNudge {
        let matching = self
            .rules_for(a)
            .iter()
            .filter(|rule| rule.matches(b))
            .chain(self.rules_for(b).iter().filter(|rule| rule.matches(a)));
        let (delta, notes) = matching.fold(
            (BookDelta::default(), Vec::new()),
            |(sum, mut notes), rule| {
                notes.extend(rule.note.clone());
                (sum.saturating_add(rule.delta), notes)
            },
        );
        BookNudge {
            delta: delta.clamped(),
            notes,
        }
    }

    /// Number of signatures owning rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Report whether no rules are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Total number of rules across all signatures.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.values().map(Vec::len).sum()
    }
}

fn validate_deltas(key: &str, entries: &[BookRule]) -> Result<(), TableError> {
    for rule in entries {
        let out_of_range = rule
            .delta
            .components()
            .into_iter()
            .find(|(_, value)| !(-DELTA_LIMIT..=DELTA_LIMIT).contains(value));
        if let Some((field, value)) = out_of_range {
            return Err(TableError::InvalidBookDelta {
                key: key.to_owned(),
                target: rule.target.as_str().to_owned(),
                field,
                value,
            });
        }
        let raising = rule
            .delta
            .components()
            .into_iter()
            .find(|(_, value)| *value > 0);
        if let (BookAction::Avoid, Some((field, value))) = (rule.action, raising) {
            return Err(TableError::PositiveAvoidDelta {
                key: key.to_owned(),
                target: rule.target.as_str().to_owned(),
                field,
                value,
            });
        }
    }
    Ok(())
}
