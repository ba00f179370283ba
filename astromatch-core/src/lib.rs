//! Core domain types for the AstroMatch scoring engine.
//!
//! The crate models a person's astrological signature (Western sign,
//! Chinese animal and optional year element) and classifies the relations
//! between two signatures. Everything here is a pure value type; scoring
//! lives in `astromatch-scorer`.
//!
//! Constructors that accept raw input return `Result` so invalid birth
//! dates and unknown names surface early.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod chinese;
mod element;
mod error;
mod relation;
mod signature;
mod western;

pub use chinese::{ChineseAnimal, Polarity, TrineGroup};
pub use element::{YearElement, YearRelation};
pub use error::SignatureError;
pub use relation::{
    EastRelation, ElementPair, ModalityRelation, PolarityMatch, RelationResult, WestRelation,
    WesternAspect, classify,
};
pub use signature::{BirthDate, PairKey, Signature};
pub use western::{Element, Modality, WesternSign};
