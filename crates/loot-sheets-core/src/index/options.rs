//! Key/value options sheet
//!
//! Rows are `[key, value]`; the bot keeps things like the list of loot
//! statuses ("Major upgrade", "Minor upgrade", ...) here.

use ahash::AHashMap;

use super::{insert_first, normalize_key};
use crate::raw::{cell_text, RawRange};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionIndex {
    /// Normalized key to position in `entries`
    lookup: AHashMap<String, usize>,
    /// (key as written, value) in sheet order
    entries: Vec<(String, String)>,
}

impl OptionIndex {
    pub fn from_raw(raw: &RawRange) -> Self {
        let mut index = Self::default();

        for row in raw {
            let Some(key) = cell_text(row, 0) else {
                continue;
            };
            let Some(normalized) = normalize_key(key) else {
                continue;
            };
            let value = cell_text(row, 1).unwrap_or_default();
            if insert_first(&mut index.lookup, "options", normalized, index.entries.len()) {
                index.entries.push((key.to_string(), value.to_string()));
            }
        }

        index
    }

    /// Configured value for `key`; a key with an empty value cell yields `""`
    pub fn get(&self, key: &str) -> Option<&str> {
        let pos = *self.lookup.get(&normalize_key(key)?)?;
        self.entries.get(pos).map(|(_, v)| v.as_str())
    }

    /// Options in sheet order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
