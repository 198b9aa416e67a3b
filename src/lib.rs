//! # screval
//!
//! Evaluate an automatic screenplay parser against human-annotated parsing
//! data.
//!
//! A screenplay parser assigns one structural tag per script line. Three
//! independent annotators labeled excerpts of the same scripts; this crate
//! measures how consistently the annotators agree with each other and how
//! well the parser's precomputed output matches their majority vote.
//!
//! The pipeline, stage by stage:
//!
//! 1. **Decode** each annotator's raw sheet rows into one [`Tag`] per line
//!    ([`annotation`]), with every malformed row degrading to [`Tag::O`].
//! 2. **Agreement**: per-line full/partial/no-agreement counts and the
//!    items × categories contingency table ([`agreement`]), feeding Fleiss'
//!    kappa and Krippendorff's alpha ([`stats`]).
//! 3. **Consensus**: plurality-of-three ground truth ([`consensus`]).
//! 4. **Align** the parser's full-script tag files to the annotated
//!    excerpts via line-offset windows ([`align`]).
//! 5. **Score**: per-movie accuracy and corpus-wide per-tag
//!    precision/recall/F1 ([`score`]), assembled into an [`EvalReport`].
//!
//! # Example
//!
//! ```rust,no_run
//! use screval::{run, EvalConfig, ParserVariant};
//!
//! let config = EvalConfig {
//!     annotator_files: [
//!         "annotator1.json".into(),
//!         "annotator2.json".into(),
//!         "annotator3.json".into(),
//!     ],
//!     parsed_dir: "parsed".into(),
//!     windows_file: "line_numbers.txt".into(),
//!     results_dir: "results".into(),
//!     variant: ParserVariant::Rule,
//! };
//! let report = run(&config)?;
//! println!("{}", report.render());
//! # Ok::<(), screval::Error>(())
//! ```
//!
//! The pipeline is deterministic: movies are processed in annotator 1's
//! sheet order and re-running on identical inputs writes a byte-identical
//! report.

#![warn(missing_docs)]

pub mod agreement;
pub mod align;
pub mod annotation;
pub mod consensus;
mod error;
pub mod pipeline;
pub mod report;
pub mod score;
pub mod stats;
pub mod tag;

pub use error::{Error, Result};
pub use pipeline::{evaluate, run, EvalConfig, ParserVariant};
pub use report::EvalReport;
pub use tag::Tag;
