//! Compatibility scoring for AstroMatch signatures.
//!
//! The crate turns the relation classification from `astromatch-core` into
//! a score, tier and explanation:
//! - **Base tables** give each layer a starting score: Western element pairs
//!   with a modality nudge, and Eastern animal relations.
//! - **Overlays** adjust the layers in a fixed order: manual overrides
//!   short-circuit everything, then Chinese-pair nuance, book nudges and
//!   year-element deltas apply before the layers are clamped.
//! - **Aggregation** weights the layers, applies the neutral-pattern boost
//!   and mirror floor, and snaps the result to a 2-point grid.
//! - **Materialisation** precomputes every pair into a JSON snapshot using
//!   `rayon`.
//!
//! # Examples
//!
//! ```no_run
//! use camino::Utf8Path;
//! use astromatch_scorer::{EngineConfig, ScoringEngine, ScoringTables, write_matrix_file};
//!
//! let tables = ScoringTables::builtin().expect("embedded tables are valid");
//! let engine = ScoringEngine::new(tables, EngineConfig::default()).expect("default config");
//! write_matrix_file(&engine, Utf8Path::new("artifacts/matrix.json")).expect("write matrix");
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod aggregate;
mod book;
mod engine;
mod error;
mod explain;
mod matrix;
mod nuance;
mod overlay;
mod overrides;
mod ranking;
mod tables;

pub use aggregate::{LayerWeights, Quantiser, Tier, aggregate, tier_of};
pub use book::{BookAction, BookDelta, BookNudge, BookRule, BookRules, WestFilter};
pub use engine::{EngineConfig, ScoreResult, ScoreSource, ScoringEngine, ScoringTables};
pub use error::{ConfigError, MatrixError, TableError};
pub use explain::{Explanation, TierMeta, explain, reasons, theme};
pub use matrix::{MatrixSnapshot, materialise_all, read_matrix_file, write_matrix_file};
pub use nuance::{NuanceEntry, NuanceTable, Tone};
pub use overlay::{
    DeltaBound, LAYER_CEILING, LAYER_FLOOR, LayerBounds, LayerDelta, LayerOverlay, LayerScores,
    MIRROR_FLOOR, NEUTRAL_BOOST_CAP, OverlayToggles, YearElementOverlay, mirror_floor,
    neutral_pattern_boost,
};
pub use overrides::{OverrideFlags, OverrideRecord, OverrideTable};
pub use ranking::{RankedMatch, rank_candidates};
pub use tables::{
    BaseTables, ElementBase, Fallbacks, MODALITY_NUDGE_MAX, MODALITY_NUDGE_MIN, ModalityNudges,
    RelationBase,
};
