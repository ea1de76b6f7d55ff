//! Column-name crosswalk from dataset names to reference names.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::dataset::Dataset;
use crate::error::Result;
use crate::io_utils;

/// Mapping `{dataset column: reference column}`.
///
/// Not required to be total; columns without an entry keep their name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Crosswalk {
    map: BTreeMap<String, String>,
}

impl Crosswalk {
    /// Creates an empty crosswalk.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.map.insert(from.into(), to.into());
        self
    }

    /// Parses a JSON object of name pairs.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = io_utils::read_text(path)?;
        Self::from_json(&text)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Name a dataset column takes after renaming.
    pub fn target_of<'a>(&'a self, column: &'a str) -> &'a str {
        self.map.get(column).map(String::as_str).unwrap_or(column)
    }

    /// Keys that name no column of `dataset`.
    pub fn unknown_keys(&self, dataset: &Dataset) -> Vec<String> {
        self.map
            .keys()
            .filter(|k| !dataset.has_column(k))
            .cloned()
            .collect()
    }

    /// Renames the columns of `dataset` in place.
    ///
    /// All renames apply at once, so swaps such as `a -> b, b -> a` work.
    /// Fails if two columns end up with the same name.
    pub fn apply(&self, dataset: &mut Dataset) -> Result<()> {
        let renamed: Vec<String> = dataset
            .columns()
            .iter()
            .map(|c| self.target_of(c).to_string())
            .collect();

        dataset.relabel(renamed)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Crosswalk {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            map: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
