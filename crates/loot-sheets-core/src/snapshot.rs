//! Immutable view over one fetch of the document
//!
//! A [`DocumentSnapshot`] is built wholesale from the four fetched ranges
//! and never changes afterwards. Refreshing builds a new snapshot; whoever
//! holds the old one keeps a consistent view of the old data.

use std::fmt;

use crate::cell::CellAddress;
use crate::index::{AliasIndex, BossIndex, NameIndex, OptionIndex, PermissionIndex};
use crate::range_spec::{RangeSet, RangeSpec};
use crate::raw::RawRange;

/// Raw values of the four ranges, in fetch order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedRanges {
    pub permissions: RawRange,
    pub loot: RawRange,
    pub options: RawRange,
    pub aliases: RawRange,
}

impl FetchedRanges {
    /// Take ranges in fetch order, `None` unless there are exactly four
    pub fn from_ordered(ranges: Vec<RawRange>) -> Option<Self> {
        let [permissions, loot, options, aliases]: [RawRange; RangeSet::LEN] =
            ranges.try_into().ok()?;
        Some(Self {
            permissions,
            loot,
            options,
            aliases,
        })
    }
}

/// Which half of a (player, boss) pair failed to resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingCoordinate {
    /// The boss is not in the loot header row
    Column,
    /// The player is not in the loot name column
    Row,
    Both,
}

impl fmt::Display for MissingCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MissingCoordinate::Column => "column",
            MissingCoordinate::Row => "row",
            MissingCoordinate::Both => "column and row",
        })
    }
}

/// The five lookup structures of one fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSnapshot {
    loot_range: RangeSpec,
    bosses: BossIndex,
    names: NameIndex,
    permissions: PermissionIndex,
    options: OptionIndex,
    aliases: AliasIndex,
}

impl DocumentSnapshot {
    /// Build every index from freshly fetched values
    ///
    /// Pure and deterministic: the same input always answers every query
    /// the same way.
    pub fn build(ranges: &RangeSet, values: &FetchedRanges) -> Self {
        let origin = ranges.loot.origin();
        let snapshot = Self {
            loot_range: ranges.loot.clone(),
            bosses: BossIndex::from_raw(&values.loot, origin),
            names: NameIndex::from_raw(&values.loot, origin),
            permissions: PermissionIndex::from_raw(&values.permissions),
            options: OptionIndex::from_raw(&values.options),
            aliases: AliasIndex::from_raw(&values.aliases),
        };

        tracing::debug!(
            bosses = snapshot.bosses.len(),
            names = snapshot.names.len(),
            principals = snapshot.permissions.len(),
            options = snapshot.options.len(),
            aliases = snapshot.aliases.len(),
            "built document snapshot"
        );

        snapshot
    }

    pub fn bosses(&self) -> &BossIndex {
        &self.bosses
    }

    pub fn names(&self) -> &NameIndex {
        &self.names
    }

    pub fn permissions(&self) -> &PermissionIndex {
        &self.permissions
    }

    pub fn options(&self) -> &OptionIndex {
        &self.options
    }

    pub fn aliases(&self) -> &AliasIndex {
        &self.aliases
    }

    /// The loot range writes are addressed against
    pub fn loot_range(&self) -> &RangeSpec {
        &self.loot_range
    }

    /// 1-based column of a boss, by header name or alias
    ///
    /// A name written in the header row wins over an alias of the same
    /// spelling.
    pub fn column_for(&self, category: &str) -> Option<u32> {
        self.bosses
            .get_column(category)
            .or_else(|| self.bosses.get_column(self.aliases.resolve(category)))
    }

    /// 1-based row of a player, matched literally against the name column
    pub fn row_for(&self, entity: &str) -> Option<u32> {
        self.names.get_row(entity)
    }

    /// Cell holding `entity`'s status for `category`
    pub fn locate(&self, entity: &str, category: &str) -> Result<CellAddress, MissingCoordinate> {
        let column = self.column_for(category);
        let row = self.row_for(entity);
        match (row, column) {
            (Some(row), Some(col)) => {
                CellAddress::from_coordinates(row, col).ok_or(MissingCoordinate::Both)
            }
            (Some(_), None) => Err(MissingCoordinate::Column),
            (None, Some(_)) => Err(MissingCoordinate::Row),
            (None, None) => Err(MissingCoordinate::Both),
        }
    }

    /// Full single-cell reference for a located cell, e.g. `Loot!C7`
    pub fn cell_reference(&self, addr: CellAddress) -> String {
        self.loot_range.cell_reference(addr)
    }
}
