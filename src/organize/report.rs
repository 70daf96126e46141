//! Run report types for the reorganization pass.

use std::fmt;

use serde::Serialize;

/// The result of one reorganization pass over a source directory.
///
/// Counts every annotation file that drove an action, plus the ones that were
/// deliberately left alone, so a run can be audited after the fact.
#[derive(Clone, Debug, Default, Serialize)]
pub struct OrganizeReport {
    /// Pairs renumbered into `images/` and `labels/`.
    pub kept: usize,

    /// Pairs moved unrenamed into `validate/` because filtering removed
    /// every annotation line.
    pub quarantined: usize,

    /// Annotation files that had no lines before filtering; left in place.
    pub skipped_empty: usize,

    /// Annotation files without a matching image; left in place.
    pub unpaired: usize,

    /// Base names routed to `validate/`, in processing order.
    pub quarantined_stems: Vec<String>,

    /// The counter value after the pass; seed for a follow-up run.
    pub next_index: u64,
}

impl OrganizeReport {
    /// Creates a new empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of annotation files that were examined.
    pub fn examined(&self) -> usize {
        self.kept + self.quarantined + self.skipped_empty + self.unpaired
    }

    /// Returns true if nothing was moved or rewritten.
    pub fn is_noop(&self) -> bool {
        self.kept == 0 && self.quarantined == 0
    }
}

impl fmt::Display for OrganizeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Processed {} annotation file(s): {} kept, {} quarantined, {} empty, {} unpaired",
            self.examined(),
            self.kept,
            self.quarantined,
            self.skipped_empty,
            self.unpaired
        )?;

        for stem in &self.quarantined_stems {
            writeln!(f, "  quarantined: {}", stem)?;
        }

        writeln!(f, "Next index: {:05}", self.next_index)
    }
}
