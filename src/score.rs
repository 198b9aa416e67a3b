//! Parser scoring: per-movie accuracy and per-tag precision/recall/F1.
//!
//! Degenerate divisions (no predicted or no true instances of a tag) are
//! surfaced as `None` and rendered as undefined, never coerced to 0 or 100.

use serde::{Deserialize, Serialize};

use crate::tag::Tag;
use crate::{Error, Result};

// =============================================================================
// Accuracy
// =============================================================================

/// Per-movie accuracy of the system output against the consensus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieAccuracy {
    /// Movie identifier.
    pub movie: String,
    /// Positions where consensus and system agree.
    pub correct: usize,
    /// Sequence length.
    pub total: usize,
}

impl MovieAccuracy {
    /// Accuracy as a percentage. `total` is non-zero by construction.
    #[must_use]
    pub fn pct(&self) -> f64 {
        100.0 * self.correct as f64 / self.total as f64
    }
}

/// Score one movie's system output against its consensus sequence.
///
/// Unequal lengths are fatal and carry the movie identifier and both
/// lengths; an empty pair of sequences is a configuration error.
pub fn accuracy(movie: &str, consensus: &[Tag], system: &[Tag]) -> Result<MovieAccuracy> {
    if consensus.len() != system.len() {
        return Err(Error::LengthMismatch {
            movie: movie.to_string(),
            expected: consensus.len(),
            actual: system.len(),
        });
    }
    if consensus.is_empty() {
        return Err(Error::empty(format!("movie {movie} has no lines to score")));
    }
    let correct = consensus
        .iter()
        .zip(system.iter())
        .filter(|(c, s)| c == s)
        .count();
    Ok(MovieAccuracy {
        movie: movie.to_string(),
        correct,
        total: consensus.len(),
    })
}

// =============================================================================
// Per-Tag Precision / Recall / F1
// =============================================================================

/// Corpus-wide error counts for one structural tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCounts {
    /// The structural tag being scored.
    pub tag: Tag,
    /// Consensus == system == tag.
    pub tp: usize,
    /// Consensus != system and system == tag.
    pub fp: usize,
    /// Consensus == tag and system != tag.
    #[serde(rename = "fn")]
    pub fn_: usize,
}

impl TagCounts {
    /// Precision, or `None` when the tag was never predicted.
    #[must_use]
    pub fn precision(&self) -> Option<f64> {
        let denom = self.tp + self.fp;
        (denom > 0).then(|| self.tp as f64 / denom as f64)
    }

    /// Recall, or `None` when the tag never occurs in the consensus.
    #[must_use]
    pub fn recall(&self) -> Option<f64> {
        let denom = self.tp + self.fn_;
        (denom > 0).then(|| self.tp as f64 / denom as f64)
    }

    /// F1, or `None` when precision or recall is undefined or both are zero.
    #[must_use]
    pub fn f1(&self) -> Option<f64> {
        match (self.precision(), self.recall()) {
            (Some(p), Some(r)) if p + r > 0.0 => Some(2.0 * p * r / (p + r)),
            _ => None,
        }
    }
}

/// Accumulate tp/fp/fn per structural tag over all movies, concatenated.
///
/// Sequence pairs must already be equal length (enforced by [`accuracy`]
/// upstream). `O` is never a positive class: an `O` prediction against an
/// `S` consensus is a false negative for `S` and scores nothing for `O`.
#[must_use]
pub fn per_tag_counts<'a, I>(pairs: I) -> [TagCounts; 6]
where
    I: IntoIterator<Item = (&'a [Tag], &'a [Tag])>,
{
    let mut counts = Tag::STRUCTURAL.map(|tag| TagCounts {
        tag,
        tp: 0,
        fp: 0,
        fn_: 0,
    });

    for (consensus, system) in pairs {
        for (&c, &s) in consensus.iter().zip(system.iter()) {
            if c == s {
                if c != Tag::O {
                    counts[c.column()].tp += 1;
                }
            } else {
                if s != Tag::O {
                    counts[s.column()].fp += 1;
                }
                if c != Tag::O {
                    counts[c.column()].fn_ += 1;
                }
            }
        }
    }

    counts
}
