//! Alternate boss names
//!
//! Rows are `[canonical, alias, alias, ...]`. Canonical names always map to
//! themselves and are registered before any alias, so an alias can never
//! redirect a canonical name and [`AliasIndex::resolve`] is idempotent.

use ahash::AHashMap;

use super::{insert_first, normalize_key};
use crate::raw::{cell_text, RawRange};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasIndex {
    canonical: AHashMap<String, String>,
}

impl AliasIndex {
    pub fn from_raw(raw: &RawRange) -> Self {
        let mut index = Self::default();

        let rows: Vec<(&str, &[String])> = raw
            .iter()
            .filter_map(|row| Some((cell_text(row, 0)?, row.as_slice())))
            .collect();

        for (name, _) in &rows {
            if let Some(key) = normalize_key(name) {
                insert_first(&mut index.canonical, "aliases", key, name.to_string());
            }
        }

        for (name, row) in &rows {
            // A canonical name claimed by an earlier row resolves to that row
            let Some(target) = normalize_key(name).and_then(|k| index.canonical.get(&k).cloned())
            else {
                continue;
            };
            for col in 1..row.len() {
                if let Some(key) = cell_text(row, col).and_then(normalize_key) {
                    insert_first(&mut index.canonical, "aliases", key, target.clone());
                }
            }
        }

        index
    }

    /// Canonical name for `name`, or `name` itself when it has no mapping
    pub fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        normalize_key(name)
            .and_then(|key| self.canonical.get(&key))
            .map(String::as_str)
            .unwrap_or(name)
    }

    /// Number of names (canonical and alias) that resolve
    pub fn len(&self) -> usize {
        self.canonical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.canonical.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn raw(rows: &[&[&str]]) -> RawRange {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_resolve() {
        let aliases = AliasIndex::from_raw(&raw(&[
            &["Ragnaros", "rag", "Raggy"],
            &["Onyxia", "ony"],
        ]));
        assert_eq!(aliases.resolve("rag"), "Ragnaros");
        assert_eq!(aliases.resolve("RAGGY"), "Ragnaros");
        assert_eq!(aliases.resolve(" ony "), "Onyxia");
        assert_eq!(aliases.resolve("onyxia"), "Onyxia");
        assert_eq!(aliases.resolve("Nefarian"), "Nefarian");
        assert_eq!(aliases.resolve(""), "");
    }

    #[test]
    fn test_duplicates_first_seen_wins() {
        let aliases = AliasIndex::from_raw(&raw(&[
            &["Ragnaros", "boss"],
            &["Onyxia", "boss", "ony"],
            &["onyxia", "dragon"],
        ]));
        assert_eq!(aliases.resolve("boss"), "Ragnaros");
        assert_eq!(aliases.resolve("ony"), "Onyxia");
        // Aliases on a repeated canonical row still point at the first spelling
        assert_eq!(aliases.resolve("dragon"), "Onyxia");
    }

    #[test]
    fn test_canonical_names_are_never_redirected() {
        let aliases = AliasIndex::from_raw(&raw(&[
            &["Onyxia", "Ragnaros"],
            &["Ragnaros", "rag"],
        ]));
        assert_eq!(aliases.resolve("Ragnaros"), "Ragnaros");
        assert_eq!(aliases.resolve("rag"), "Ragnaros");
    }

    proptest! {
        #[test]
        fn resolve_is_idempotent(
            rows in prop::collection::vec(
                prop::collection::vec("[a-cA-C ]{0,3}", 0..4),
                0..6,
            ),
            probe in "[a-cA-C ]{0,3}",
        ) {
            let aliases = AliasIndex::from_raw(&rows);
            let once = aliases.resolve(&probe).to_string();
            prop_assert_eq!(aliases.resolve(&once), once.as_str());
        }
    }
}
