//! Lookup structures built from fetched ranges
//!
//! Each index is a pure function of one [`RawRange`](crate::RawRange) (plus
//! the range origin where coordinates are involved). Keys are matched
//! trimmed and case-insensitively, rows with an empty key cell are skipped,
//! and when a key appears more than once the first occurrence wins.

mod aliases;
mod loot;
mod options;
mod permissions;

pub use aliases::AliasIndex;
pub use loot::{BossIndex, NameIndex};
pub use options::OptionIndex;
pub use permissions::PermissionIndex;

use ahash::AHashMap;
use std::collections::hash_map::Entry;

/// Normalized lookup key: trimmed, lowercased, never empty
pub(crate) fn normalize_key(s: &str) -> Option<String> {
    let key = s.trim().to_lowercase();
    (!key.is_empty()).then_some(key)
}

/// Insert unless the key is already present.
///
/// Returns `false` for a duplicate, which is left untouched.
pub(crate) fn insert_first<V>(
    map: &mut AHashMap<String, V>,
    index: &'static str,
    key: String,
    value: V,
) -> bool {
    match map.entry(key) {
        Entry::Occupied(existing) => {
            tracing::debug!("{index}: duplicate key '{}' ignored", existing.key());
            false
        }
        Entry::Vacant(slot) => {
            slot.insert(value);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("  Onyxia "), Some("onyxia".to_string()));
        assert_eq!(normalize_key(""), None);
        assert_eq!(normalize_key(" \t"), None);
    }

    #[test]
    fn test_insert_first_keeps_first() {
        let mut map = AHashMap::new();
        assert!(insert_first(&mut map, "test", "a".to_string(), 1));
        assert!(!insert_first(&mut map, "test", "a".to_string(), 2));
        assert_eq!(map["a"], 1);
    }
}
