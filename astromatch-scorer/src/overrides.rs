//! Manual score overrides for specific pairs.
//!
//! An override replaces the computed score outright. Keys are normalised on
//! load, so `a|b` and `b|a` address the same record and listing both is a
//! collision. Repeating the exact same key is a collision too.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use astromatch_core::{PairKey, Signature};

use crate::{TableError, Tier};

/// Bitfield describing why a pair was overridden.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverrideFlags(u8);

impl OverrideFlags {
    /// Both animals share a trine.
    pub const SAME_TRINE: Self = Self(1);
    /// Both people share a Western sign.
    pub const SAME_WEST_SIGN: Self = Self(2);
    /// Same animal, or trine synergy.
    pub const SAME_EAST: Self = Self(4);
    /// Compatible Western elements.
    pub const COMPATIBLE: Self = Self(16);
    /// Curated synergy.
    pub const SYNERGY: Self = Self(32);

    /// Wrap raw bits.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Raw bits.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Report whether every bit of `other` is set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl fmt::Display for OverrideFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#08b}", self.0)
    }
}

/// A manual override for one pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideRecord {
    /// Score reported for the pair, 0 to 100.
    pub score: u8,
    /// Tier reported for the pair; must agree with `score`.
    pub tier: Tier,
    /// Provenance flags.
    #[serde(default)]
    pub flags: OverrideFlags,
}

/// Override records keyed by normalised pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideTable {
    records: BTreeMap<PairKey, OverrideRecord>,
}

impl OverrideTable {
    /// Parse and validate overrides from JSON keyed by pair
    /// (`"aries_rat|leo_monkey"`).
    ///
    /// # Errors
    /// Returns [`TableError::Parse`] for malformed JSON,
    /// [`TableError::UnknownKey`] for unparseable pair keys,
    /// [`TableError::OverrideKeyCollision`] when a key repeats or two keys
    /// normalise to the same pair, and [`TableError::InvalidOverride`] when a score exceeds
    /// 100 or its tier disagrees with the score.
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let OverrideEntries(entries) =
            serde_json::from_str(json).map_err(|source| TableError::Parse {
                table: "override",
                source,
            })?;
        let mut records = BTreeMap::new();
        for (source_key, record) in entries {
            let key: PairKey = source_key
                .parse()
                .map_err(|source| TableError::UnknownKey {
                    table: "override",
                    key: source_key.clone(),
                    source,
                })?;
            validate_record(&key, record)?;
            if records.insert(key.clone(), record).is_some() {
                return Err(TableError::OverrideKeyCollision {
                    key: key.into(),
                });
            }
        }
        Ok(Self { records })
    }

    /// Record for a pair, in either order.
    #[must_use]
    pub fn lookup(&self, a: Signature, b: Signature) -> Option<OverrideRecord> {
        self.get(&PairKey::new(a, b))
    }

    /// Record for a normalised key.
    #[must_use]
    pub fn get(&self, key: &PairKey) -> Option<OverrideRecord> {
        self.records.get(key).copied()
    }

    /// Iterate over records in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&PairKey, &OverrideRecord)> {
        self.records.iter()
    }

    /// Number of overridden pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Report whether no overrides are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Raw map entries in document order, repeated keys included.
struct OverrideEntries(Vec<(String, OverrideRecord)>);

impl<'de> Deserialize<'de> for OverrideEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = OverrideEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of pair keys to override records")
            }

            fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> Result<Self::Value, M::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, OverrideRecord>()? {
                    entries.push(entry);
                }
                Ok(OverrideEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

fn validate_record(key: &PairKey, record: OverrideRecord) -> Result<(), TableError> {
    if record.score > 100 {
        return Err(TableError::InvalidOverride {
            key: key.to_string(),
            reason: format!("score {} exceeds 100", record.score),
        });
    }
    let expected = Tier::from_score(record.score);
    if record.tier != expected {
        return Err(TableError::InvalidOverride {
            key: key.to_string(),
            reason: format!(
                "tier {} does not match score {} (expected {expected})",
                record.tier, record.score
            ),
        });
    }
    Ok(())
}
