//! Rank candidate partners for one subject.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use astromatch_core::{PairKey, Signature};

use crate::{ScoreResult, ScoringEngine};

/// A scored candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedMatch {
    /// Candidate signature as supplied.
    pub candidate: Signature,
    /// Normalised key of the subject and candidate.
    pub pair: PairKey,
    /// Score for the pair.
    pub result: ScoreResult,
}

/// Score every candidate against `subject` and sort the results.
///
/// Order: score descending, then number of reasons descending, then pair
/// key ascending. Candidates that tie on all three keep their input order.
#[must_use]
pub fn rank_candidates(
    engine: &ScoringEngine,
    subject: Signature,
    candidates: &[Signature],
) -> Vec<RankedMatch> {
    let mut ranked: Vec<RankedMatch> = candidates
        .iter()
        .map(|&candidate| RankedMatch {
            candidate,
            pair: PairKey::new(subject, candidate),
            result: engine.score(subject, candidate),
        })
        .collect();
    ranked.sort_by(compare_matches);
    ranked
}

fn compare_matches(a: &RankedMatch, b: &RankedMatch) -> Ordering {
    b.result
        .score
        .cmp(&a.result.score)
        .then_with(|| b.result.reasons.len().cmp(&a.result.reasons.len()))
        .then_with(|| a.pair.cmp(&b.pair))
}
