//! Label-list loading and per-file label keys.
//!
//! A label list is a newline-delimited file of class names; the 0-based line
//! position of a name becomes its class index. Files in the source directory
//! select their mapping through a label key derived from the file stem.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::YolotidyError;

/// Mapping from a label key to its replacement class index.
///
/// Indices are stored in string form since they are substituted verbatim into
/// annotation lines. The map is immutable once built; a name appearing twice
/// in the list keeps the index of its last occurrence.
#[derive(Clone, Debug, Default)]
pub struct LabelMap {
    entries: BTreeMap<String, String>,
}

impl LabelMap {
    /// Creates an empty map (no label list was supplied).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a map from an ordered, newline-delimited label-name file.
    ///
    /// A read failure is fatal for the whole run; callers are expected to
    /// load the map before any filesystem mutation happens.
    pub fn from_file(path: &Path) -> Result<Self, YolotidyError> {
        let content = fs::read_to_string(path).map_err(|source| YolotidyError::LabelListRead {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self::from_names(content.trim().split('\n')))
    }

    /// Builds a map from label names in list order.
    pub fn from_names<'a, I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut entries = BTreeMap::new();
        for (index, name) in names.into_iter().enumerate() {
            if name.is_empty() {
                continue;
            }
            entries.insert(name.to_string(), index.to_string());
        }

        Self { entries }
    }

    /// Looks up the mapped class index for a label key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Derives the label key for a file stem: the first two dot-separated
/// segments, or the whole stem when it has fewer than two.
///
/// `dog.breed1.0034` and `dog.breed1.extra.0034` both key on `dog.breed1`.
pub fn label_key(stem: &str) -> &str {
    match stem.match_indices('.').nth(1) {
        Some((index, _)) => &stem[..index],
        None => stem,
    }
}
