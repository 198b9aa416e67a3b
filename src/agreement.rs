//! Inter-rater agreement over decoded annotator sequences.
//!
//! Walks all movies in a fixed order and, per script line, classifies the
//! triple of annotator tags as full / partial / no agreement while filling
//! the items × categories contingency table that feeds the chance-corrected
//! reliability statistics in [`crate::stats`].
//!
//! The pair arithmetic follows the votes model: each line contributes 3
//! pair-slots, of which full agreement fills 3, partial 1, and none 0. For
//! three raters this is numerically identical to counting the 3 unordered
//! rater pairs.

use serde::{Deserialize, Serialize};

use crate::tag::Tag;
use crate::{Error, Result};

// =============================================================================
// Contingency Table
// =============================================================================

/// Items × categories vote-count matrix.
///
/// One row per script line across all movies, seven columns in
/// [`Tag::ALL`] order. Invariant: every row sums to exactly 3 (one vote per
/// annotator).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContingencyTable {
    rows: Vec<[u32; 7]>,
}

impl ContingencyTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line's triple of annotator votes as a new item row.
    pub fn push_triple(&mut self, triple: [Tag; 3]) {
        let mut row = [0u32; 7];
        for tag in triple {
            row[tag.column()] += 1;
        }
        self.rows.push(row);
    }

    /// The item rows, one per script line.
    #[must_use]
    pub fn rows(&self) -> &[[u32; 7]] {
        &self.rows
    }

    /// Number of items (script lines) in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// =============================================================================
// Agreement Tally
// =============================================================================

/// Per-movie agreement counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieAgreement {
    /// Movie identifier.
    pub movie: String,
    /// Lines where all three annotators agree.
    pub full: usize,
    /// Lines where exactly two annotators agree.
    pub partial: usize,
    /// Lines where all three annotators differ.
    pub none: usize,
}

impl MovieAgreement {
    /// Total annotated lines for this movie.
    #[must_use]
    pub fn lines(&self) -> usize {
        self.full + self.partial + self.none
    }

    /// Percentage of lines with full agreement.
    ///
    /// [`tally`] rejects empty movies, so the denominator is non-zero.
    #[must_use]
    pub fn full_pct(&self) -> f64 {
        100.0 * self.full as f64 / self.lines() as f64
    }
}

/// Corpus-wide agreement results plus the contingency table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgreementSummary {
    /// Per-movie counts, in corpus movie order.
    pub by_movie: Vec<MovieAgreement>,
    /// Agreeing pair-slots across the corpus (3 per fully agreed line, 1
    /// per partially agreed line).
    pub agreeing_pairs: usize,
    /// Total pair-slots (3 per line).
    pub total_pairs: usize,
    /// The items × categories vote table.
    pub table: ContingencyTable,
}

impl AgreementSummary {
    /// Percentage of rater pairs that agree, corpus-wide.
    ///
    /// [`tally`] rejects an empty corpus, so the denominator is non-zero.
    #[must_use]
    pub fn pair_agreement_pct(&self) -> f64 {
        100.0 * self.agreeing_pairs as f64 / self.total_pairs as f64
    }
}

/// Tally agreement across movies, in the given order.
///
/// Each entry supplies a movie name and the three decoded sequences in
/// annotator order. The three sequences must be equal length
/// ([`Error::LengthMismatch`] otherwise), and a movie or corpus without any
/// lines is rejected explicitly ([`Error::EmptyInput`]) rather than
/// silently dividing by zero.
pub fn tally(movies: &[(String, [&[Tag]; 3])]) -> Result<AgreementSummary> {
    let mut by_movie = Vec::with_capacity(movies.len());
    let mut agreeing_pairs = 0;
    let mut total_pairs = 0;
    let mut table = ContingencyTable::new();

    for (movie, [a1, a2, a3]) in movies {
        for other in [a2, a3] {
            if other.len() != a1.len() {
                return Err(Error::LengthMismatch {
                    movie: movie.clone(),
                    expected: a1.len(),
                    actual: other.len(),
                });
            }
        }
        if a1.is_empty() {
            return Err(Error::empty(format!("movie {movie} has no annotated lines")));
        }

        let mut counts = MovieAgreement {
            movie: movie.clone(),
            full: 0,
            partial: 0,
            none: 0,
        };

        for ((&t1, &t2), &t3) in a1.iter().zip(a2.iter()).zip(a3.iter()) {
            if t1 == t2 && t2 == t3 {
                counts.full += 1;
                agreeing_pairs += 3;
            } else if t1 == t2 || t1 == t3 || t2 == t3 {
                counts.partial += 1;
                agreeing_pairs += 1;
            } else {
                counts.none += 1;
            }
            total_pairs += 3;
            table.push_triple([t1, t2, t3]);
        }

        by_movie.push(counts);
    }

    if total_pairs == 0 {
        return Err(Error::empty("corpus has no annotated lines".to_string()));
    }

    Ok(AgreementSummary {
        by_movie,
        agreeing_pairs,
        total_pairs,
        table,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(name: &str, a1: &'static [Tag], a2: &'static [Tag], a3: &'static [Tag]) -> (String, [&'static [Tag]; 3]) {
        (name.to_string(), [a1, a2, a3])
    }

    #[test]
    fn test_full_agreement_is_100_pct() {
        let seq: &[Tag] = &[Tag::S, Tag::N, Tag::D];
        let summary = tally(&[movie("m", seq, seq, seq)]).unwrap();
        assert_eq!(summary.pair_agreement_pct(), 100.0);
        assert_eq!(summary.by_movie[0].full, 3);
        assert_eq!(summary.by_movie[0].full_pct(), 100.0);
    }

    #[test]
    fn test_partial_and_no_agreement_counts() {
        // line 0: full, line 1: two agree, line 2: all differ
        let a1: &[Tag] = &[Tag::S, Tag::N, Tag::S];
        let a2: &[Tag] = &[Tag::S, Tag::N, Tag::N];
        let a3: &[Tag] = &[Tag::S, Tag::D, Tag::C];
        let summary = tally(&[movie("m", a1, a2, a3)]).unwrap();

        let m = &summary.by_movie[0];
        assert_eq!((m.full, m.partial, m.none), (1, 1, 1));
        assert_eq!(summary.agreeing_pairs, 4); // 3 + 1 + 0
        assert_eq!(summary.total_pairs, 9);
    }

    #[test]
    fn test_contingency_rows_sum_to_three() {
        let a1: &[Tag] = &[Tag::S, Tag::N, Tag::S];
        let a2: &[Tag] = &[Tag::S, Tag::N, Tag::N];
        let a3: &[Tag] = &[Tag::O, Tag::D, Tag::C];
        let summary = tally(&[movie("m", a1, a2, a3)]).unwrap();

        for row in summary.table.rows() {
            assert_eq!(row.iter().sum::<u32>(), 3);
        }
        assert_eq!(summary.table.len(), 3);
    }

    #[test]
    fn test_length_mismatch_is_fatal() {
        let a1: &[Tag] = &[Tag::S, Tag::N];
        let a2: &[Tag] = &[Tag::S];
        let a3: &[Tag] = &[Tag::S, Tag::N];
        let err = tally(&[movie("m", a1, a2, a3)]).unwrap_err();
        assert!(matches!(
            err,
            Error::LengthMismatch { expected: 2, actual: 1, .. }
        ));
    }

    #[test]
    fn test_empty_movie_is_rejected() {
        let empty: &[Tag] = &[];
        let err = tally(&[movie("m", empty, empty, empty)]).unwrap_err();
        assert!(matches!(err, Error::EmptyInput(_)));
    }

    #[test]
    fn test_empty_corpus_is_rejected() {
        let err = tally(&[]).unwrap_err();
        assert!(matches!(err, Error::EmptyInput(_)));
    }

    #[test]
    fn test_table_concatenates_movies_in_order() {
        let s: &[Tag] = &[Tag::S];
        let n: &[Tag] = &[Tag::N];
        let summary = tally(&[movie("a", s, s, s), movie("b", n, n, n)]).unwrap();
        assert_eq!(summary.table.rows()[0][Tag::S.column()], 3);
        assert_eq!(summary.table.rows()[1][Tag::N.column()], 3);
    }
}
