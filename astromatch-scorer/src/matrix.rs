//! Precomputed scores for every pair of year-less signatures.
//!
//! The snapshot is a derived cache: it is rebuilt from the engine and never
//! edited by hand. Keys go through [`PairKey`] on both the write and the
//! read side.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::io::{BufWriter, Write};

use camino::Utf8Path;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use astromatch_core::{PairKey, Signature};
use astromatch_fs::{create_file, ensure_parent_dir, read_to_string};

use crate::{MatrixError, ScoreResult, ScoringEngine};

/// Scores keyed by normalised pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatrixSnapshot {
    entries: BTreeMap<PairKey, ScoreResult>,
}

impl MatrixSnapshot {
    /// Wrap precomputed entries.
    #[must_use]
    pub const fn new(entries: BTreeMap<PairKey, ScoreResult>) -> Self {
        Self { entries }
    }

    /// Result for a pair, in either order.
    #[must_use]
    pub fn lookup(&self, a: Signature, b: Signature) -> Option<&ScoreResult> {
        self.entries.get(&PairKey::new(a, b))
    }

    /// Result for a normalised key.
    #[must_use]
    pub fn get(&self, key: &PairKey) -> Option<&ScoreResult> {
        self.entries.get(key)
    }

    /// Iterate in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&PairKey, &ScoreResult)> {
        self.entries.iter()
    }

    /// Number of pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Report whether the snapshot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the wrapper and return the underlying map.
    #[must_use]
    pub fn into_inner(self) -> BTreeMap<PairKey, ScoreResult> {
        self.entries
    }
}

/// Score all 144 x 144 ordered pairs and merge them by pair key.
///
/// # Errors
/// Returns [`MatrixError::AsymmetricPair`] when the two orderings of a pair
/// disagree.
pub fn materialise_all(engine: &ScoringEngine) -> Result<MatrixSnapshot, MatrixError> {
    let signatures: Vec<Signature> = Signature::all().collect();
    let scored: Vec<(PairKey, ScoreResult)> = signatures
        .par_iter()
        .flat_map_iter(|&a| {
            signatures
                .iter()
                .map(move |&b| (PairKey::new(a, b), engine.score(a, b)))
        })
        .collect();
    log::debug!("scored {} ordered pairs", scored.len());

    let mut entries = BTreeMap::new();
    for (key, result) in scored {
        match entries.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(result);
            }
            Entry::Occupied(existing) => {
                if existing.get() != &result {
                    return Err(MatrixError::AsymmetricPair {
                        key: existing.key().to_string(),
                    });
                }
            }
        }
    }
    log::debug!("materialised {} pairs", entries.len());
    Ok(MatrixSnapshot::new(entries))
}

/// Materialise the matrix and write it as pretty JSON.
///
/// The parent directory is created when missing. Keys are sorted, so
/// repeated runs with the same tables produce identical bytes.
///
/// # Errors
/// Propagates [`materialise_all`] errors and reports filesystem and
/// serialisation failures with the affected path.
pub fn write_matrix_file(
    engine: &ScoringEngine,
    output_path: &Utf8Path,
) -> Result<MatrixSnapshot, MatrixError> {
    let snapshot = materialise_all(engine)?;
    ensure_parent_dir(output_path).map_err(|source| MatrixError::CreateParent {
        path: output_path
            .parent()
            .map_or_else(|| Utf8Path::new(".").to_path_buf(), Utf8Path::to_path_buf),
        source,
    })?;
    let write_error = |source| MatrixError::WriteFile {
        path: output_path.to_path_buf(),
        source,
    };
    let file = create_file(output_path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &snapshot).map_err(|source| {
        MatrixError::Serialise {
            path: output_path.to_path_buf(),
            source,
        }
    })?;
    writer.write_all(b"\n").map_err(write_error)?;
    writer.flush().map_err(write_error)?;
    Ok(snapshot)
}

/// Load a snapshot written by [`write_matrix_file`].
///
/// # Errors
/// Returns [`MatrixError::Read`] or [`MatrixError::Parse`].
pub fn read_matrix_file(path: &Utf8Path) -> Result<MatrixSnapshot, MatrixError> {
    let contents = read_to_string(path).map_err(|source| MatrixError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| MatrixError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
