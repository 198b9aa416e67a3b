//! End-to-end evaluation pipeline.
//!
//! Single-threaded, synchronous, one pass: load the three annotator sheet
//! files, decode, tally agreement, derive consensus, align the parser's
//! precomputed output, score, and write the report. Movies are processed in
//! annotator 1's sheet order so every aggregate is reproducible; re-running
//! on identical inputs writes a byte-identical report file.

use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::annotation::{decode_sheet, load_sheets, MovieSheet};
use crate::report::{EvalReport, ReliabilityScores, TagMetrics};
use crate::tag::Tag;
use crate::{agreement, align, consensus, score, stats};
use crate::{Error, Result};

/// Which parser variant's precomputed output is being evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParserVariant {
    /// The rule-based parser.
    Rule,
    /// The transformer-based parser.
    Trx,
}

impl ParserVariant {
    /// Label used for the report file name.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            ParserVariant::Rule => "rule",
            ParserVariant::Trx => "trx",
        }
    }

    /// Subdirectory of the parsed-screenplays folder holding this
    /// variant's tag files.
    #[must_use]
    pub fn tags_subdir(&self) -> &'static str {
        match self {
            ParserVariant::Rule => "parsed-screenplays",
            ParserVariant::Trx => "parsed-robust-screenplays",
        }
    }
}

/// Inputs and output destination for one evaluation run.
#[derive(Debug, Clone)]
pub struct EvalConfig {
    /// The three annotator sheet files, in annotator order.
    pub annotator_files: [PathBuf; 3],
    /// Directory containing the per-variant parsed-screenplay folders.
    pub parsed_dir: PathBuf,
    /// Windows file: movie, label placeholder, start, end per line.
    pub windows_file: PathBuf,
    /// Directory where the report file is written.
    pub results_dir: PathBuf,
    /// Which parser's output to evaluate.
    pub variant: ParserVariant,
}

impl EvalConfig {
    /// Path of the report file this configuration writes.
    #[must_use]
    pub fn report_path(&self) -> PathBuf {
        self.results_dir.join(format!("{}.txt", self.variant.label()))
    }
}

/// Run the full pipeline and write the report file.
pub fn run(config: &EvalConfig) -> Result<EvalReport> {
    let report = evaluate(config)?;
    fs::create_dir_all(&config.results_dir)?;
    let path = config.report_path();
    fs::write(&path, report.render())?;
    info!("wrote evaluation report to {}", path.display());
    Ok(report)
}

/// Run every stage without writing the report file.
pub fn evaluate(config: &EvalConfig) -> Result<EvalReport> {
    let sheets1 = load_sheets(&config.annotator_files[0])?;
    let sheets2 = load_sheets(&config.annotator_files[1])?;
    let sheets3 = load_sheets(&config.annotator_files[2])?;
    info!(
        "loaded annotator sheets: {} / {} / {} movies",
        sheets1.len(),
        sheets2.len(),
        sheets3.len()
    );

    let by_movie2 = index_sheets(&sheets2);
    let by_movie3 = index_sheets(&sheets3);

    // Annotator 1's sheet order fixes the corpus movie order.
    let mut decoded: Vec<(String, [Vec<Tag>; 3])> = Vec::with_capacity(sheets1.len());
    for sheet in &sheets1 {
        let rows2 = by_movie2.get(sheet.movie.as_str()).ok_or_else(|| {
            Error::missing(format!("movie {} in annotator 2 sheets", sheet.movie))
        })?;
        let rows3 = by_movie3.get(sheet.movie.as_str()).ok_or_else(|| {
            Error::missing(format!("movie {} in annotator 3 sheets", sheet.movie))
        })?;
        decoded.push((
            sheet.movie.clone(),
            [
                decode_sheet(&sheet.rows),
                decode_sheet(&rows2.rows),
                decode_sheet(&rows3.rows),
            ],
        ));
    }

    let sequences: Vec<(String, [&[Tag]; 3])> = decoded
        .iter()
        .map(|(movie, [a1, a2, a3])| (movie.clone(), [a1.as_slice(), a2.as_slice(), a3.as_slice()]))
        .collect();
    let summary = agreement::tally(&sequences)?;
    let reliability = ReliabilityScores {
        pair_agreement_pct: summary.pair_agreement_pct(),
        fleiss_kappa: stats::fleiss_kappa(&summary.table),
        krippendorff_alpha: stats::krippendorff_alpha(&summary.table),
    };

    let windows: HashMap<String, align::LineWindow> = align::load_windows(&config.windows_file)?
        .into_iter()
        .map(|w| (w.movie.clone(), w))
        .collect();
    let tags_dir = config.parsed_dir.join(config.variant.tags_subdir());

    let mut accuracy = Vec::with_capacity(decoded.len());
    let mut pairs: Vec<(Vec<Tag>, Vec<Tag>)> = Vec::with_capacity(decoded.len());
    for (movie, [a1, a2, a3]) in &decoded {
        let cons = consensus::consensus(movie, a1, a2, a3)?;
        let window = windows
            .get(movie.as_str())
            .ok_or_else(|| Error::missing(format!("window entry for movie {movie}")))?;
        let raw = align::load_tags(&tags_dir.join(format!("{movie}_tags.txt")))?;
        let system = window.slice(&raw)?;
        accuracy.push(score::accuracy(movie, &cons, &system)?);
        pairs.push((cons, system));
    }

    let counts = score::per_tag_counts(pairs.iter().map(|(c, s)| (c.as_slice(), s.as_slice())));
    let tags = counts.into_iter().map(TagMetrics::from).collect();

    Ok(EvalReport {
        variant: config.variant.label().to_string(),
        agreement: summary.by_movie,
        reliability,
        accuracy,
        tags,
    })
}

fn index_sheets(sheets: &[MovieSheet]) -> HashMap<&str, &MovieSheet> {
    sheets.iter().map(|s| (s.movie.as_str(), s)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_labels_and_subdirs() {
        assert_eq!(ParserVariant::Rule.label(), "rule");
        assert_eq!(ParserVariant::Trx.label(), "trx");
        assert_eq!(ParserVariant::Rule.tags_subdir(), "parsed-screenplays");
        assert_eq!(ParserVariant::Trx.tags_subdir(), "parsed-robust-screenplays");
    }

    #[test]
    fn test_report_path_uses_variant_label() {
        let config = EvalConfig {
            annotator_files: [
                PathBuf::from("a1.json"),
                PathBuf::from("a2.json"),
                PathBuf::from("a3.json"),
            ],
            parsed_dir: PathBuf::from("parsed"),
            windows_file: PathBuf::from("windows.txt"),
            results_dir: PathBuf::from("results"),
            variant: ParserVariant::Trx,
        };
        assert_eq!(config.report_path(), PathBuf::from("results/trx.txt"));
    }
}
