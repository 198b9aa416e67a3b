//! Majority-vote consensus over the three annotators.

use crate::tag::Tag;
use crate::{Error, Result};

/// Consensus tag for one line.
///
/// The tag held by at least two annotators, or [`Tag::O`] when all three
/// differ. The branch order (a1 against a2/a3 first, then a2 against a3) is
/// equivalent to plurality with all-distinct triples mapped to `O`: with
/// three voters there is at most one majority pair.
#[must_use]
pub fn consensus_line(a1: Tag, a2: Tag, a3: Tag) -> Tag {
    if a1 == a2 || a1 == a3 {
        a1
    } else if a2 == a3 {
        a2
    } else {
        Tag::O
    }
}

/// Derive the majority-vote sequence for one movie.
///
/// The three decoded sequences must be equal length; a mismatch is fatal
/// and carries the movie identifier and both lengths.
pub fn consensus(movie: &str, a1: &[Tag], a2: &[Tag], a3: &[Tag]) -> Result<Vec<Tag>> {
    for other in [a2, a3] {
        if other.len() != a1.len() {
            return Err(Error::LengthMismatch {
                movie: movie.to_string(),
                expected: a1.len(),
                actual: other.len(),
            });
        }
    }
    Ok(a1
        .iter()
        .zip(a2.iter())
        .zip(a3.iter())
        .map(|((&t1, &t2), &t3)| consensus_line(t1, t2, t3))
        .collect())
}
