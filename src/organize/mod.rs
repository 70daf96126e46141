//! Reorganization of flat detection-dataset directories.
//!
//! The pass walks a flat directory of `<name>.jpg` / `<name>.txt` pairs and
//! routes each pair by what survives class filtering: pairs with kept lines
//! are renumbered into `images/` + `labels/`, pairs whose annotations filter
//! to nothing are quarantined unrenamed into `validate/`. Unpaired files and
//! annotations that were empty to begin with are left in place.

mod report;

pub use report::OrganizeReport;

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::YolotidyError;
use crate::labels::{label_key, LabelMap};

const IMAGES_DIR: &str = "images";
const LABELS_DIR: &str = "labels";
const VALIDATE_DIR: &str = "validate";

const IMAGE_EXTENSION: &str = "jpg";
const LABEL_EXTENSION: &str = "txt";

/// Options for one reorganization pass.
#[derive(Clone, Debug, Default)]
pub struct OrganizeOptions {
    /// Class-field values to keep; `None` keeps every line.
    pub target_classes: Option<BTreeSet<String>>,

    /// Fallback class substituted when no label-map entry applies.
    pub replacement_class: Option<String>,

    /// Seed for the sequential output counter.
    pub start_index: u64,

    /// Path to a newline-delimited label-name file, if any.
    pub label_list: Option<PathBuf>,

    /// Compute the report without creating directories or touching files.
    pub dry_run: bool,
}

/// Reorganizes `source_dir` in place.
///
/// The label map is loaded before anything else; a failure there aborts the
/// run with nothing on disk changed. Entries are processed in lexicographic
/// file-name order, which fixes the assignment of counter values to kept
/// pairs. Any per-file I/O failure aborts the remaining scan; output written
/// so far stands.
pub fn organize(
    source_dir: &Path,
    opts: &OrganizeOptions,
) -> Result<OrganizeReport, YolotidyError> {
    let label_map = match &opts.label_list {
        Some(path) => LabelMap::from_file(path)?,
        None => LabelMap::empty(),
    };

    organize_with_labels(source_dir, &label_map, opts)
}

/// Same as [`organize`] but with a pre-built label map.
pub fn organize_with_labels(
    source_dir: &Path,
    label_map: &LabelMap,
    opts: &OrganizeOptions,
) -> Result<OrganizeReport, YolotidyError> {
    if !source_dir.is_dir() {
        return Err(YolotidyError::SourceDirInvalid {
            path: source_dir.to_path_buf(),
        });
    }

    let images_dir = source_dir.join(IMAGES_DIR);
    let labels_dir = source_dir.join(LABELS_DIR);
    let validate_dir = source_dir.join(VALIDATE_DIR);

    if !opts.dry_run {
        fs::create_dir_all(&images_dir)?;
        fs::create_dir_all(&labels_dir)?;
        fs::create_dir_all(&validate_dir)?;
    }

    let mut counter = opts.start_index;
    let mut report = OrganizeReport::new();

    // Sorting forces the full listing up front, so renames during the pass
    // never feed back into it.
    for entry in WalkDir::new(source_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(std::io::Error::from)?;

        let Some(file_name) = entry.file_name().to_str() else {
            continue;
        };
        if matches!(file_name, IMAGES_DIR | LABELS_DIR | VALIDATE_DIR) {
            continue;
        }
        if !entry.file_type().is_file() || !has_label_extension(entry.path()) {
            continue;
        }

        let annotation_path = entry.path();
        let Some(stem) = annotation_path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };

        let image_name = format!("{stem}.{IMAGE_EXTENSION}");
        let image_path = source_dir.join(&image_name);
        if !image_path.is_file() {
            report.unpaired += 1;
            continue;
        }

        let content =
            fs::read_to_string(annotation_path).map_err(|source| YolotidyError::AnnotationRead {
                path: annotation_path.to_path_buf(),
                source,
            })?;

        // One label key per file: every kept line gets the same rewrite.
        let class_override = label_map
            .get(label_key(stem))
            .or(opts.replacement_class.as_deref());
        let filtered = filter_annotation(&content, opts.target_classes.as_ref(), class_override);

        if filtered.original_lines == 0 {
            // Quarantine is reserved for files that filtering emptied; an
            // annotation that was already empty stays where it is.
            report.skipped_empty += 1;
            continue;
        }

        if filtered.kept.is_empty() {
            if !opts.dry_run {
                let quarantined_label = validate_dir.join(format!("{stem}.{LABEL_EXTENSION}"));
                move_file(annotation_path, &quarantined_label)?;
                move_file(&image_path, &validate_dir.join(&image_name))?;
            }
            report.quarantined += 1;
            report.quarantined_stems.push(stem.to_string());
            continue;
        }

        if !opts.dry_run {
            let renumbered = renumbered_stem(stem, counter);

            let label_out = labels_dir.join(format!("{renumbered}.{LABEL_EXTENSION}"));
            fs::write(&label_out, filtered.kept.join("\n")).map_err(|source| {
                YolotidyError::AnnotationWrite {
                    path: label_out,
                    source,
                }
            })?;
            fs::remove_file(annotation_path)?;

            let image_out = images_dir.join(format!("{renumbered}.{IMAGE_EXTENSION}"));
            move_file(&image_path, &image_out)?;
        }

        counter += 1;
        report.kept += 1;
    }

    report.next_index = counter;
    Ok(report)
}

/// Outcome of filtering one annotation file's lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilteredAnnotation {
    /// Number of lines before filtering.
    pub original_lines: usize,

    /// Lines that survived the class filter, rewritten, in original order.
    pub kept: Vec<String>,
}

/// Filters and remaps the lines of one annotation file.
///
/// A line is kept iff `target_classes` is unset or contains the line's class
/// field (the first space-delimited token). Kept lines have the class field
/// replaced by `class_override` when one is given; the geometry tokens are
/// copied through untouched. Fully-whitespace content counts as zero lines.
pub fn filter_annotation(
    content: &str,
    target_classes: Option<&BTreeSet<String>>,
    class_override: Option<&str>,
) -> FilteredAnnotation {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return FilteredAnnotation {
            original_lines: 0,
            kept: Vec::new(),
        };
    }

    let mut original_lines = 0;
    let mut kept = Vec::new();

    for line in trimmed.split('\n') {
        original_lines += 1;

        // Tokens are split on single spaces; `split` always yields at least
        // one token, so the class field is safe to index.
        let mut tokens: Vec<&str> = line.split(' ').collect();
        let keep = match target_classes {
            Some(classes) => classes.contains(tokens[0]),
            None => true,
        };
        if !keep {
            continue;
        }

        if let Some(class) = class_override {
            tokens[0] = class;
        }
        kept.push(tokens.join(" "));
    }

    FilteredAnnotation {
        original_lines,
        kept,
    }
}

/// Replaces the final dot-segment of a stem with the zero-padded index.
///
/// `cat.tabby.0003` with index 7 becomes `cat.tabby.00007`; a stem without a
/// dot keeps only the index segment (`.00007`).
fn renumbered_stem(stem: &str, index: u64) -> String {
    match stem.rfind('.') {
        Some(position) => format!("{}.{index:05}", &stem[..position]),
        None => format!(".{index:05}"),
    }
}

fn has_label_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(LABEL_EXTENSION))
}

fn move_file(from: &Path, to: &Path) -> Result<(), YolotidyError> {
    fs::rename(from, to).map_err(|source| YolotidyError::PairMove {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })
}
