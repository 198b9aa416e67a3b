//! Annotator sheets and row decoding.
//!
//! Each annotator delivers one sheet per movie: one row per script line,
//! with the line text repeated under the column of the tag the annotator
//! assigned. [`decode_row`] collapses a row to its canonical [`Tag`],
//! resolving every inconsistency conservatively to [`Tag::O`].
//!
//! # Example
//!
//! ```rust
//! use screval::annotation::{decode_row, AnnotatorRow};
//! use screval::Tag;
//!
//! let row = AnnotatorRow {
//!     line: Some("INT. HOUSE".into()),
//!     s: Some("INT. HOUSE".into()),
//!     ..Default::default()
//! };
//! assert_eq!(decode_row(&row), Tag::S);
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::tag::Tag;
use crate::{Error, Result};

// =============================================================================
// Sheet Data
// =============================================================================

/// One row of a raw annotation sheet for a single script line.
///
/// `line` holds the line's content (possibly empty). Each tag field holds
/// the same text iff the annotator assigned that tag; absent, null, or
/// non-matching values count as "not assigned".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotatorRow {
    /// The script line's content, possibly empty or whitespace.
    #[serde(default)]
    pub line: Option<String>,
    /// Scene-heading column.
    #[serde(default, rename = "S")]
    pub s: Option<String>,
    /// Scene-description column.
    #[serde(default, rename = "N")]
    pub n: Option<String>,
    /// Character-name column.
    #[serde(default, rename = "C")]
    pub c: Option<String>,
    /// Dialogue column.
    #[serde(default, rename = "D")]
    pub d: Option<String>,
    /// Expression column.
    #[serde(default, rename = "E")]
    pub e: Option<String>,
    /// Transition column.
    #[serde(default, rename = "T")]
    pub t: Option<String>,
}

/// All of one annotator's rows for a single movie, in script order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSheet {
    /// Movie identifier (keys windows and tag files).
    pub movie: String,
    /// One row per script line of the annotated excerpt.
    pub rows: Vec<AnnotatorRow>,
}

/// Load one annotator's sheet file: an ordered JSON list of movie sheets.
///
/// Sheet order is preserved; annotator 1's order fixes the corpus-wide
/// movie order for the whole run.
pub fn load_sheets(path: &Path) -> Result<Vec<MovieSheet>> {
    let data = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::missing(format!("annotator sheet file {}", path.display()))
        } else {
            Error::Io(e)
        }
    })?;
    serde_json::from_str(&data).map_err(|e| Error::parse(format!("{}: {}", path.display(), e)))
}

// =============================================================================
// Row Decoding
// =============================================================================

/// Decode a single row into its canonical tag.
///
/// Rules, in order:
/// - a missing or whitespace-only `line` is [`Tag::O`];
/// - a tag field matches iff its trimmed text equals the trimmed `line`;
/// - exactly one match with the other five fields non-matching yields that
///   tag; anything else (zero matches, multiple matches) yields [`Tag::O`].
///
/// Total and deterministic: malformed rows degrade, they never fail. A line
/// whose text incidentally appears under two tag columns is ambiguous and
/// resolves to [`Tag::O`].
#[must_use]
pub fn decode_row(row: &AnnotatorRow) -> Tag {
    let line = match &row.line {
        Some(l) if !l.trim().is_empty() => l.trim(),
        _ => return Tag::O,
    };

    let fields = [
        (Tag::S, &row.s),
        (Tag::N, &row.n),
        (Tag::C, &row.c),
        (Tag::D, &row.d),
        (Tag::E, &row.e),
        (Tag::T, &row.t),
    ];

    let mut matched = None;
    let mut non_matched = 0;
    for (tag, field) in fields {
        match field {
            Some(text) if text.trim() == line => matched = Some(tag),
            _ => non_matched += 1,
        }
    }

    match matched {
        Some(tag) if non_matched == 5 => tag,
        _ => Tag::O,
    }
}

/// Decode a whole sheet into one tag per script line, in row order.
#[must_use]
pub fn decode_sheet(rows: &[AnnotatorRow]) -> Vec<Tag> {
    rows.iter().map(decode_row).collect()
}
