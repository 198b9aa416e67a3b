//! The unified evaluation report.
//!
//! One cohesive structure aggregating every stage's results, in report
//! order: per-movie agreement, corpus reliability, per-movie accuracy,
//! per-tag metrics. [`EvalReport::render`] produces the fixed text format
//! written to the report file; identical inputs render byte-identical text.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::agreement::MovieAgreement;
use crate::score::{MovieAccuracy, TagCounts};
use crate::tag::Tag;

/// Corpus-wide inter-rater reliability scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityScores {
    /// Percentage of rater pairs that agree.
    pub pair_agreement_pct: f64,
    /// Fleiss' kappa.
    pub fleiss_kappa: f64,
    /// Krippendorff's alpha (nominal).
    pub krippendorff_alpha: f64,
}

/// Final precision/recall/F1 for one structural tag.
///
/// `None` marks a degenerate division (no predicted or no true instances),
/// rendered as `undef` rather than 0 or 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagMetrics {
    /// The structural tag.
    pub tag: Tag,
    /// True positives.
    pub tp: usize,
    /// False positives.
    pub fp: usize,
    /// False negatives.
    #[serde(rename = "fn")]
    pub fn_: usize,
    /// Precision, if defined.
    pub precision: Option<f64>,
    /// Recall, if defined.
    pub recall: Option<f64>,
    /// F1, if defined.
    pub f1: Option<f64>,
}

impl From<TagCounts> for TagMetrics {
    fn from(counts: TagCounts) -> Self {
        TagMetrics {
            tag: counts.tag,
            tp: counts.tp,
            fp: counts.fp,
            fn_: counts.fn_,
            precision: counts.precision(),
            recall: counts.recall(),
            f1: counts.f1(),
        }
    }
}

/// The complete evaluation report for one parser variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalReport {
    /// Parser variant label ("rule" or "trx").
    pub variant: String,
    /// Per-movie agreement counts, in corpus movie order.
    pub agreement: Vec<MovieAgreement>,
    /// Corpus-wide reliability scores.
    pub reliability: ReliabilityScores,
    /// Per-movie parser accuracy, in corpus movie order.
    pub accuracy: Vec<MovieAccuracy>,
    /// Per-tag metrics in taxonomy order (structural tags only).
    pub tags: Vec<TagMetrics>,
}

impl EvalReport {
    /// Render the fixed human-readable text format.
    ///
    /// Movie names left-justified to 35 columns, percentages to one
    /// decimal, reliability coefficients to four decimals.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "agreement scores by movie:");
        for m in &self.agreement {
            let _ = writeln!(
                out,
                "\t{:<35} {:>5.1}% all agree, {:>3} two agree, {:>3} all disagree",
                m.movie,
                m.full_pct(),
                m.partial,
                m.none
            );
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "interrater reliability scores:");
        let _ = writeln!(
            out,
            "\t{:>5.1}% rater pairs agree",
            self.reliability.pair_agreement_pct
        );
        let _ = writeln!(out, "\t{:.4} fleiss kappa", self.reliability.fleiss_kappa);
        let _ = writeln!(
            out,
            "\t{:.4} krippendorff alpha",
            self.reliability.krippendorff_alpha
        );
        let _ = writeln!(out);

        let _ = writeln!(out, "parser accuracy by movie:");
        for m in &self.accuracy {
            let _ = writeln!(out, "\t{:<35} acc = {:>5.1}%", m.movie, m.pct());
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "parser precision, recall, and F1 by tag:");
        for t in &self.tags {
            let _ = writeln!(
                out,
                "\t{}: p = {}, r = {}, f1 = {}",
                t.tag,
                fmt_metric(t.precision),
                fmt_metric(t.recall),
                fmt_metric(t.f1)
            );
        }

        out
    }
}

/// Format a metric as a percentage to one decimal, or `undef`.
fn fmt_metric(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:>4.1}", 100.0 * v),
        None => "undef".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> EvalReport {
        EvalReport {
            variant: "rule".into(),
            agreement: vec![MovieAgreement {
                movie: "inception".into(),
                full: 9,
                partial: 1,
                none: 0,
            }],
            reliability: ReliabilityScores {
                pair_agreement_pct: 93.3,
                fleiss_kappa: 0.8123,
                krippendorff_alpha: 0.8125,
            },
            accuracy: vec![MovieAccuracy {
                movie: "inception".into(),
                correct: 8,
                total: 10,
            }],
            tags: vec![TagMetrics {
                tag: Tag::S,
                tp: 3,
                fp: 1,
                fn_: 0,
                precision: Some(0.75),
                recall: Some(1.0),
                f1: Some(6.0 / 7.0),
            }],
        }
    }

    #[test]
    fn test_render_sections_in_order() {
        let text = sample_report().render();
        let agreement = text.find("agreement scores by movie:").unwrap();
        let reliability = text.find("interrater reliability scores:").unwrap();
        let accuracy = text.find("parser accuracy by movie:").unwrap();
        let tags = text.find("parser precision, recall, and F1 by tag:").unwrap();
        assert!(agreement < reliability && reliability < accuracy && accuracy < tags);
    }

    #[test]
    fn test_render_formats() {
        let text = sample_report().render();
        let line = text.lines().find(|l| l.contains("all agree")).unwrap();
        assert!(line.starts_with("\tinception"));
        assert!(line.contains(" 90.0% all agree,   1 two agree,   0 all disagree"));
        // tab, 35-column movie field, separator, right-justified width 5
        assert_eq!(line.find("90.0").unwrap(), 1 + 35 + 1 + 1);
        assert!(text.contains("0.8123 fleiss kappa"));
        assert!(text.contains("acc =  80.0%"));
        assert!(text.contains("\tS: p = 75.0, r = 100.0, f1 = 85.7"));
    }

    #[test]
    fn test_render_undefined_metrics() {
        let mut report = sample_report();
        report.tags[0].precision = None;
        report.tags[0].f1 = None;
        let text = report.render();
        assert!(text.contains("\tS: p = undef, r = 100.0, f1 = undef"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let report = sample_report();
        assert_eq!(report.render(), report.render());
    }
}
