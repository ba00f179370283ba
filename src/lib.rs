//! Facade crate for the AstroMatch compatibility engine.
//!
//! This crate re-exports the signature and relation types and, behind the
//! `scorer` feature, the scoring engine with its tables and ranking.

#![forbid(unsafe_code)]

pub use astromatch_core::{
    BirthDate, ChineseAnimal, EastRelation, Element, Modality, PairKey, RelationResult,
    Signature, SignatureError, WestRelation, WesternSign, YearElement, YearRelation, classify,
};

#[cfg(feature = "scorer")]
pub use astromatch_scorer::{
    EngineConfig, Explanation, MatrixSnapshot, RankedMatch, ScoreResult, ScoreSource,
    ScoringEngine, ScoringTables, Tier, rank_candidates, write_matrix_file,
};
