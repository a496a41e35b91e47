// src/store/record.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::ModTime;

/// Mapping from shader file name (relative to the input directory) to the
/// modification time observed when it last compiled successfully.
///
/// On disk this is a flat JSON object:
///
/// ```json
/// { "a.frag": 1700000000000, "b.vert": 1700000001234 }
/// ```
///
/// Entries for deleted shaders are kept; nothing prunes them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimestampRecord {
    entries: BTreeMap<String, ModTime>,
}

impl TimestampRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, file: &str) -> Option<ModTime> {
        self.entries.get(file).copied()
    }

    pub fn contains(&self, file: &str) -> bool {
        self.entries.contains_key(file)
    }

    /// Record a successful compile. Returns the previous value, if any.
    pub fn insert(&mut self, file: impl Into<String>, mod_time: ModTime) -> Option<ModTime> {
        self.entries.insert(file.into(), mod_time)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in file-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ModTime)> + '_ {
        self.entries.iter().map(|(file, t)| (file.as_str(), *t))
    }
}

impl FromIterator<(String, ModTime)> for TimestampRecord {
    fn from_iter<I: IntoIterator<Item = (String, ModTime)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
