//! The screenplay line-tag taxonomy.
//!
//! Every script line carries exactly one tag: one of the six structural
//! categories, or [`Tag::O`] for none/unparseable/no-consensus. The codes
//! are opaque to the evaluation pipeline; their screenplay semantics (scene
//! heading, dialogue, ...) never enter the algorithms.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A structural tag assigned to a single screenplay line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tag {
    /// Scene heading.
    S,
    /// Scene description.
    N,
    /// Character name.
    C,
    /// Dialogue.
    D,
    /// Dialogue expression/parenthetical.
    E,
    /// Transition.
    T,
    /// None: blank line, unparseable annotation, or no consensus.
    O,
}

impl Tag {
    /// All seven categories in contingency-table column order.
    pub const ALL: [Tag; 7] = [Tag::S, Tag::N, Tag::C, Tag::D, Tag::E, Tag::T, Tag::O];

    /// The six structural categories, excluding `O`.
    ///
    /// `O` is never scored as a positive class, but it remains a valid
    /// prediction/ground-truth value for the other tags' errors.
    pub const STRUCTURAL: [Tag; 6] = [Tag::S, Tag::N, Tag::C, Tag::D, Tag::E, Tag::T];

    /// Symbolic code for this tag.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::S => "S",
            Tag::N => "N",
            Tag::C => "C",
            Tag::D => "D",
            Tag::E => "E",
            Tag::T => "T",
            Tag::O => "O",
        }
    }

    /// Column index of this tag in the contingency table.
    #[must_use]
    pub fn column(&self) -> usize {
        match self {
            Tag::S => 0,
            Tag::N => 1,
            Tag::C => 2,
            Tag::D => 3,
            Tag::E => 4,
            Tag::T => 5,
            Tag::O => 6,
        }
    }

    /// Parse a raw token from a parser tag file.
    ///
    /// Anything outside the taxonomy normalizes to [`Tag::O`].
    #[must_use]
    pub fn normalize(token: &str) -> Tag {
        match token.trim() {
            "S" => Tag::S,
            "N" => Tag::N,
            "C" => Tag::C,
            "D" => Tag::D,
            "E" => Tag::E,
            "T" => Tag::T,
            _ => Tag::O,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_taxonomy_tokens() {
        for tag in Tag::ALL {
            assert_eq!(Tag::normalize(tag.as_str()), tag);
        }
    }

    #[test]
    fn test_normalize_out_of_taxonomy() {
        assert_eq!(Tag::normalize("X"), Tag::O);
        assert_eq!(Tag::normalize(""), Tag::O);
        assert_eq!(Tag::normalize("scene"), Tag::O);
        assert_eq!(Tag::normalize("s"), Tag::O); // codes are case-sensitive
    }

    #[test]
    fn test_normalize_trims_whitespace() {
        assert_eq!(Tag::normalize(" S "), Tag::S);
        assert_eq!(Tag::normalize("D\r"), Tag::D);
    }

    #[test]
    fn test_column_order_matches_all() {
        for (i, tag) in Tag::ALL.iter().enumerate() {
            assert_eq!(tag.column(), i);
        }
    }
}
