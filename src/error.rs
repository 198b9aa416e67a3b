//! Error types for screval.

use thiserror::Error;

/// Result type for screval operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for screval operations.
///
/// Decoder-level ambiguity is never an error: a malformed annotation row
/// degrades to [`Tag::O`](crate::Tag::O) locally. Every variant here breaks
/// a length or existence invariant and aborts the run.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed input file (sheet JSON or windows file).
    #[error("Parse error: {0}")]
    Parse(String),

    /// An expected sheet, window entry, or tag file is absent.
    #[error("Missing resource: {0}")]
    MissingResource(String),

    /// Sequences for the same movie differ in length.
    #[error("Length mismatch for {movie}: expected {expected} lines, got {actual}")]
    LengthMismatch {
        /// Movie identifier.
        movie: String,
        /// Expected sequence length.
        expected: usize,
        /// Actual sequence length.
        actual: usize,
    },

    /// A line window does not fit inside its raw tag file.
    #[error("Window [{start}, {end}) for {movie} out of bounds for a tag file of {len} lines")]
    Window {
        /// Movie identifier.
        movie: String,
        /// Window start (inclusive).
        start: usize,
        /// Window end (exclusive).
        end: usize,
        /// Number of lines in the raw tag file.
        len: usize,
    },

    /// A movie or corpus contains no annotated lines to aggregate over.
    #[error("No annotated lines: {0}")]
    EmptyInput(String),
}

impl Error {
    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Error::Parse(msg.into())
    }

    /// Create a missing-resource error.
    pub fn missing(msg: impl Into<String>) -> Self {
        Error::MissingResource(msg.into())
    }

    /// Create an empty-input error.
    pub fn empty(msg: impl Into<String>) -> Self {
        Error::EmptyInput(msg.into())
    }
}
