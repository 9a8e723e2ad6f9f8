//! Principal/action grant table
//!
//! ```text
//!             | set-status | refresh | ...
//!  Officer    |    TRUE    |  TRUE   |
//!  Raider     |            |  x      |
//! ```
//!
//! The header row lists actions, the first column lists principals (a
//! role or user name). A cell grants the action when it holds one of the
//! markers in [`GRANT_MARKERS`].

use ahash::{AHashMap, AHashSet};

use super::{insert_first, normalize_key};
use crate::raw::{cell_text, RawRange};

/// Cell contents that count as a grant (compared case-insensitively)
pub const GRANT_MARKERS: &[&str] = &["true", "yes", "y", "x", "1"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionIndex {
    grants: AHashMap<String, AHashSet<String>>,
}

impl PermissionIndex {
    pub fn from_raw(raw: &RawRange) -> Self {
        let mut index = Self::default();
        let Some(header) = raw.first() else {
            return index;
        };

        // Column position of each action; a repeated action keeps its first column
        let mut seen = AHashSet::new();
        let actions: Vec<(usize, String)> = (1..header.len())
            .filter_map(|col| Some((col, normalize_key(cell_text(header, col)?)?)))
            .filter(|(_, action)| seen.insert(action.clone()))
            .collect();

        for row in raw.iter().skip(1) {
            let Some(principal) = cell_text(row, 0).and_then(normalize_key) else {
                continue;
            };
            let granted: AHashSet<String> = actions
                .iter()
                .filter(|(col, _)| cell_text(row, *col).is_some_and(is_grant))
                .map(|(_, action)| action.clone())
                .collect();
            insert_first(&mut index.grants, "permissions", principal, granted);
        }

        index
    }

    /// Whether `principal` may perform `action`; unknown names are denied
    pub fn has_permission(&self, principal: &str, action: &str) -> bool {
        let (Some(principal), Some(action)) = (normalize_key(principal), normalize_key(action))
        else {
            return false;
        };
        self.grants
            .get(&principal)
            .is_some_and(|actions| actions.contains(&action))
    }

    /// Number of principals listed
    pub fn len(&self) -> usize {
        self.grants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }
}

fn is_grant(cell: &str) -> bool {
    GRANT_MARKERS
        .iter()
        .any(|marker| cell.eq_ignore_ascii_case(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(rows: &[&[&str]]) -> RawRange {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    fn table() -> RawRange {
        raw(&[
            &["", "set-status", "refresh"],
            &["Officer", "TRUE", "true"],
            &["Raider", "", "x"],
            &["Guest", "FALSE", "no"],
        ])
    }

    #[test]
    fn test_has_permission() {
        let perms = PermissionIndex::from_raw(&table());
        assert!(perms.has_permission("Officer", "set-status"));
        assert!(perms.has_permission("officer", "REFRESH"));
        assert!(perms.has_permission("Raider", "refresh"));
        assert!(!perms.has_permission("Raider", "set-status"));
        assert!(!perms.has_permission("Guest", "refresh"));
        assert!(!perms.has_permission("Nobody", "refresh"));
        assert!(!perms.has_permission("Officer", "delete"));
        assert!(!perms.has_permission("", "refresh"));
        assert_eq!(perms.len(), 3);
    }

    #[test]
    fn test_duplicates_first_seen_wins() {
        let perms = PermissionIndex::from_raw(&raw(&[
            &["", "refresh", "Refresh"],
            &["Raider", "", "x"],
            &["raider", "x", "x"],
        ]));
        // Second "Refresh" column and second "raider" row are both ignored
        assert!(!perms.has_permission("Raider", "refresh"));
        assert_eq!(perms.len(), 1);
    }

    #[test]
    fn test_empty() {
        let perms = PermissionIndex::from_raw(&Vec::new());
        assert!(perms.is_empty());
        assert!(!perms.has_permission("Officer", "refresh"));
    }
}
