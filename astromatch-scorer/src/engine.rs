//! The scoring pipeline.
//!
//! [`ScoringEngine::score`] is the single entry point: classification,
//! manual overrides, base tables, overlays, aggregation, quantisation and
//! explanation all run here, in that order. Everything the engine needs is
//! injected through [`ScoringTables`] and [`EngineConfig`]; the engine
//! holds no global state and is shared by reference across threads.

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use astromatch_core::{PairKey, RelationResult, Signature, classify};

use crate::{
    BaseTables, BookRules, ConfigError, LayerDelta, LayerOverlay, LayerScores, LayerWeights,
    NuanceTable, OverlayToggles, OverrideFlags, OverrideRecord, OverrideTable, Quantiser,
    TableError, Tier, YearElementOverlay, aggregate, explain, mirror_floor, neutral_pattern_boost,
    reasons, theme, tier_of,
};

const BUILTIN_BOOK_RULES: &str = include_str!("../data/book_rules.json");
const BUILTIN_OVERRIDES: &str = include_str!("../data/overrides.json");

/// Where a score came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoreSource {
    /// Produced by the pipeline.
    Computed,
    /// Taken verbatim from a manual override.
    Override {
        /// Provenance flags of the override record.
        flags: OverrideFlags,
    },
}

/// Outcome of scoring a pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Score before quantisation; may lie outside the reportable range.
    pub raw_score: f32,
    /// Reported score, 0 to 100.
    pub score: u8,
    /// Tier for `score`.
    pub tier: Tier,
    /// Reasons derived from the relation classification.
    pub reasons: Vec<String>,
    /// One-line theme.
    pub theme: String,
    /// Notes from the nuance and book overlays.
    #[serde(default)]
    pub notes: Vec<String>,
    /// Computed or overridden.
    pub source: ScoreSource,
}

impl ScoreResult {
    fn from_override(record: OverrideRecord, relation: &RelationResult) -> Self {
        Self {
            raw_score: f32::from(record.score),
            score: record.score,
            tier: record.tier,
            reasons: reasons(relation),
            theme: theme(relation).to_owned(),
            notes: Vec::new(),
            source: ScoreSource::Override {
                flags: record.flags,
            },
        }
    }
}

/// Tunable parameters of the pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Layer weights.
    pub weights: LayerWeights,
    /// Score grid.
    pub quantiser: Quantiser,
    /// Enabled adjustment steps.
    pub overlays: OverlayToggles,
}

impl EngineConfig {
    /// Validate the configuration and return a copy.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when the weights or quantiser are unusable.
    pub fn validate(self) -> Result<Self, ConfigError> {
        self.weights.validate()?;
        self.quantiser.validate()?;
        Ok(self)
    }
}

/// Immutable tables consulted by the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringTables {
    /// Base scores for both layers.
    pub base: BaseTables,
    /// Chinese-pair nuance.
    pub nuance: NuanceTable,
    /// Book nudges.
    pub book: BookRules,
    /// Manual overrides.
    pub overrides: OverrideTable,
}

impl ScoringTables {
    /// Tables compiled into the crate.
    ///
    /// # Errors
    /// Returns [`TableError`] if an embedded data file fails validation.
    pub fn builtin() -> Result<Self, TableError> {
        Ok(Self {
            base: BaseTables::default(),
            nuance: NuanceTable::builtin(),
            book: BookRules::from_json(BUILTIN_BOOK_RULES)?,
            overrides: OverrideTable::from_json(BUILTIN_OVERRIDES)?,
        })
    }

    /// Built-in tables with the book rules and overrides optionally read
    /// from files instead.
    ///
    /// # Errors
    /// Returns [`TableError::Read`] when a file cannot be read, and the
    /// parse and validation errors of the individual tables.
    pub fn load(
        book_path: Option<&Utf8Path>,
        overrides_path: Option<&Utf8Path>,
    ) -> Result<Self, TableError> {
        let book = match book_path {
            Some(path) => BookRules::from_json(&read_table(path)?)?,
            None => BookRules::from_json(BUILTIN_BOOK_RULES)?,
        };
        let overrides = match overrides_path {
            Some(path) => OverrideTable::from_json(&read_table(path)?)?,
            None => OverrideTable::from_json(BUILTIN_OVERRIDES)?,
        };
        let tables = Self {
            base: BaseTables::default(),
            nuance: NuanceTable::builtin(),
            book,
            overrides,
        };
        tables.validate()?;
        Ok(tables)
    }

    /// Check the base and nuance tables for gaps.
    ///
    /// # Errors
    /// Returns [`TableError::IncompleteTable`] naming the first gap.
    pub fn validate(&self) -> Result<(), TableError> {
        self.base.validate()?;
        self.nuance.validate()
    }
}

fn read_table(path: &Utf8Path) -> Result<String, TableError> {
    astromatch_fs::read_to_string(path).map_err(|source| TableError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Scores pairs of signatures.
///
/// # Examples
/// ```
/// use astromatch_core::{ChineseAnimal, Signature, WesternSign};
/// use astromatch_scorer::{EngineConfig, ScoringEngine, ScoringTables, Tier};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let engine = ScoringEngine::new(ScoringTables::builtin()?, EngineConfig::default())?;
/// let me = Signature::new(WesternSign::Virgo, ChineseAnimal::Horse);
///
/// let result = engine.score(me, me);
/// assert_eq!(result.tier, Tier::Exceptional);
/// assert_eq!(engine.score(me, me), result);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    tables: ScoringTables,
    config: EngineConfig,
    year_element: YearElementOverlay,
}

impl ScoringEngine {
    /// Build an engine from tables and a configuration.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when the configuration is invalid.
    pub fn new(tables: ScoringTables, config: EngineConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            tables,
            config: config.validate()?,
            year_element: YearElementOverlay,
        })
    }

    /// Tables in use.
    #[must_use]
    pub const fn tables(&self) -> &ScoringTables {
        &self.tables
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Enabled overlays, in application order.
    pub fn overlays(&self) -> impl Iterator<Item = &dyn LayerOverlay> {
        let toggles = self.config.overlays;
        let sources: [(bool, &dyn LayerOverlay); 3] = [
            (toggles.nuance, &self.tables.nuance),
            (toggles.book, &self.tables.book),
            (toggles.year_element, &self.year_element),
        ];
        sources
            .into_iter()
            .filter_map(|(enabled, overlay)| enabled.then_some(overlay))
    }

    /// Score a pair. The result does not depend on argument order.
    #[must_use]
    pub fn score(&self, a: Signature, b: Signature) -> ScoreResult {
        let (first, second) = canonical_order(a, b);
        let relation = classify(first, second);

        if self.config.overlays.manual_override
            && let Some(record) = self.tables.overrides.lookup(first, second)
        {
            log::debug!(
                "override hit for {}: {}",
                PairKey::new(first, second),
                record.score
            );
            return ScoreResult::from_override(record, &relation);
        }

        let base = LayerScores {
            east: self.tables.base.east_base(relation.east_relation),
            west: self.tables.base.west_base(
                relation.element_pair,
                first.west().modality(),
                second.west().modality(),
            ),
        };
        let mut notes = Vec::new();
        let layers = self
            .overlays()
            .fold(base, |layers, overlay| {
                let delta: LayerDelta = overlay.delta(first, second, &relation);
                notes.extend(delta.notes.iter().cloned());
                layers.apply(&delta)
            })
            .clamped();

        let mut raw = aggregate(layers.west, layers.east, self.config.weights);
        if self.config.overlays.neutral_boost {
            raw = neutral_pattern_boost(raw, &relation);
        }
        if self.config.overlays.mirror_floor {
            raw = mirror_floor(raw, &relation);
        }

        let score = self.config.quantiser.quantise(raw);
        let tier = tier_of(score);
        let explanation = explain(&relation, tier);
        ScoreResult {
            raw_score: raw,
            score,
            tier,
            reasons: explanation.reasons,
            theme: explanation.theme,
            notes,
            source: ScoreSource::Computed,
        }
    }
}

/// Order a pair by signature key so both argument orders run identically.
fn canonical_order(a: Signature, b: Signature) -> (Signature, Signature) {
    if (a.key(), a.year_element()) <= (b.key(), b.year_element()) {
        (a, b)
    } else {
        (b, a)
    }
}
