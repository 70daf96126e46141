//! Yolotidy: flat detection-dataset reorganizer.
//!
//! Yolotidy takes a flat directory of image/annotation pairs in YOLO label
//! format and separates it into a structured dataset: usable pairs are
//! renumbered into `images/` and `labels/`, while pairs whose annotations
//! filter down to nothing are quarantined into `validate/` for review.
//!
//! # Modules
//!
//! - [`organize`]: the reorganization pass and its run report
//! - [`labels`]: label-list loading and per-file label keys
//! - [`error`]: error types for yolotidy operations

pub mod error;
pub mod labels;
pub mod organize;

use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::Parser;

pub use error::YolotidyError;
pub use organize::{organize, OrganizeOptions, OrganizeReport};

/// The yolotidy CLI application.
#[derive(Parser)]
#[command(name = "yolotidy")]
#[command(version, author, about)]
struct Cli {
    /// Directory of <name>.jpg / <name>.txt pairs to reorganize.
    source_dir: PathBuf,

    /// Comma-separated class identifiers to keep; all lines pass when unset.
    #[arg(
        short = 'o',
        long = "objects",
        value_name = "CLASSES",
        value_delimiter = ','
    )]
    objects: Option<Vec<String>>,

    /// Class substituted when the label map has no entry for a file.
    #[arg(short = 'r', long = "replace", value_name = "CLASS")]
    replace: Option<String>,

    /// Starting value for the sequential output counter.
    #[arg(short = 'i', long = "index", value_name = "N", default_value_t = 0)]
    index: u64,

    /// Newline-delimited label-name file; line position becomes the class index.
    #[arg(short = 'l', long = "labels", value_name = "FILE")]
    labels: Option<PathBuf>,

    /// Compute the run report without moving or rewriting any file.
    #[arg(long)]
    dry_run: bool,

    /// Output format for the run report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Run the yolotidy CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), YolotidyError> {
    let cli = Cli::parse();

    if !matches!(cli.output.as_str(), "text" | "json") {
        return Err(YolotidyError::UnsupportedOutput(cli.output));
    }

    let opts = OrganizeOptions {
        target_classes: cli
            .objects
            .map(|classes| classes.into_iter().collect::<BTreeSet<_>>()),
        replacement_class: cli.replace,
        start_index: cli.index,
        label_list: cli.labels,
        dry_run: cli.dry_run,
    };

    let report = organize(&cli.source_dir, &opts)?;

    match cli.output.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&report).expect("report serializes to JSON");
            println!("{json}");
        }
        _ => print!("{report}"),
    }

    Ok(())
}
