//! screval - evaluate a screenplay parser against human-annotated data.
//!
//! Reads the three annotators' sheet files, the line-number windows file,
//! and the parser's precomputed per-movie tag files, then writes the
//! evaluation report and echoes it to stdout.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use screval::{run, EvalConfig, ParserVariant};

/// Evaluate a screenplay parser against human-annotated parsing data.
#[derive(Parser)]
#[command(name = "screval")]
#[command(
    version,
    about = "Evaluate a screenplay parser against human-annotated parsing data",
    long_about = r#"
screval - screenplay parser evaluation

Measures (a) inter-rater agreement among three independent annotators
(pairwise agreement, Fleiss' kappa, Krippendorff's alpha) and (b) parser
accuracy and per-tag precision/recall/F1 against the annotators' majority
vote. The parser is never run; only its precomputed tag files are read.

EXAMPLE:
  screval -1 ann1.json -2 ann2.json -3 ann3.json \
      --parsed-dir data/parsed --line-numbers data/line_numbers.txt \
      --results-dir results --trx
"#
)]
struct Cli {
    /// Annotator 1 sheet file (JSON; its sheet order fixes the movie order)
    #[arg(short = '1', long = "annotator-1", value_name = "FILE")]
    annotator_1: PathBuf,

    /// Annotator 2 sheet file (JSON)
    #[arg(short = '2', long = "annotator-2", value_name = "FILE")]
    annotator_2: PathBuf,

    /// Annotator 3 sheet file (JSON)
    #[arg(short = '3', long = "annotator-3", value_name = "FILE")]
    annotator_3: PathBuf,

    /// Directory containing the per-variant parsed-screenplay folders
    #[arg(long, value_name = "DIR")]
    parsed_dir: PathBuf,

    /// Windows file: movie, label, start, end per line
    #[arg(long, value_name = "FILE")]
    line_numbers: PathBuf,

    /// Directory where the report file is written
    #[arg(long, value_name = "DIR")]
    results_dir: PathBuf,

    /// Evaluate the transformer-based parser instead of the rule-based one
    #[arg(long)]
    trx: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let config = EvalConfig {
        annotator_files: [cli.annotator_1, cli.annotator_2, cli.annotator_3],
        parsed_dir: cli.parsed_dir,
        windows_file: cli.line_numbers,
        results_dir: cli.results_dir,
        variant: if cli.trx {
            ParserVariant::Trx
        } else {
            ParserVariant::Rule
        },
    };

    match run(&config) {
        Ok(report) => {
            print!("{}", report.render());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
