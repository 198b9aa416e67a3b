//! System-output alignment: raw parser tag files and line windows.
//!
//! The parser tags entire screenplays, but annotators only saw an excerpt.
//! The windows file maps each movie to the slice of the full tag stream
//! that corresponds to the annotated excerpt.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::tag::Tag;
use crate::{Error, Result};

/// The slice of a full-script tag file covered by the annotated excerpt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineWindow {
    /// Movie identifier.
    pub movie: String,
    /// Start line offset, inclusive.
    pub start: usize,
    /// End line offset, exclusive.
    pub end: usize,
}

impl LineWindow {
    /// Slice the normalized tag stream down to the annotated excerpt.
    ///
    /// The caller's windows file must satisfy start <= end <= stream
    /// length; a violation is a configuration error, never a silent
    /// truncation.
    pub fn slice(&self, tags: &[Tag]) -> Result<Vec<Tag>> {
        if self.start > self.end || self.end > tags.len() {
            return Err(Error::Window {
                movie: self.movie.clone(),
                start: self.start,
                end: self.end,
                len: tags.len(),
            });
        }
        Ok(tags[self.start..self.end].to_vec())
    }
}

/// Parse the windows file.
///
/// One entry per line, four whitespace-separated fields: movie identifier,
/// a label placeholder, start offset, end offset. Blank lines are skipped.
pub fn load_windows(path: &Path) -> Result<Vec<LineWindow>> {
    let data = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::missing(format!("windows file {}", path.display()))
        } else {
            Error::Io(e)
        }
    })?;

    let mut windows = Vec::new();
    for (lineno, line) in data.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 4 {
            return Err(Error::parse(format!(
                "{}:{}: expected 4 whitespace-separated fields, got {}",
                path.display(),
                lineno + 1,
                fields.len()
            )));
        }
        let parse_offset = |s: &str| {
            s.parse::<usize>().map_err(|_| {
                Error::parse(format!(
                    "{}:{}: invalid line offset {:?}",
                    path.display(),
                    lineno + 1,
                    s
                ))
            })
        };
        windows.push(LineWindow {
            movie: fields[0].to_string(),
            start: parse_offset(fields[2])?,
            end: parse_offset(fields[3])?,
        });
    }
    Ok(windows)
}

/// Load a raw parser tag file: one token per line, out-of-taxonomy tokens
/// normalized to [`Tag::O`].
pub fn load_tags(path: &Path) -> Result<Vec<Tag>> {
    let data = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::missing(format!("tag file {}", path.display()))
        } else {
            Error::Io(e)
        }
    })?;
    Ok(data.lines().map(Tag::normalize).collect())
}
