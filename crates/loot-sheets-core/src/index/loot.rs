//! Boss columns and player rows of the loot table
//!
//! Layout of the loot range:
//!
//! ```text
//!           | Onyxia | Ragnaros | ...
//! ----------+--------+----------+
//!  Alice    |  need  |          |
//!  Bob      |        |  done    |
//! ```
//!
//! The header row names the bosses (the top-left cell is ignored) and the
//! first column names the players. Both indices report 1-based sheet
//! coordinates, offset by the origin of the configured range.

use ahash::AHashMap;

use super::{insert_first, normalize_key};
use crate::cell::CellAddress;
use crate::raw::{cell_text, RawRange};

/// Boss (category) name to sheet column
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BossIndex {
    columns: AHashMap<String, u32>,
    /// Boss names as written, in sheet order
    names: Vec<String>,
}

impl BossIndex {
    /// Build from the loot range whose top-left cell sits at `origin`
    pub fn from_raw(raw: &RawRange, origin: CellAddress) -> Self {
        let mut index = Self::default();
        let Some(header) = raw.first() else {
            return index;
        };

        for col in 1..header.len() {
            let Some(name) = cell_text(header, col) else {
                continue;
            };
            let Some(key) = normalize_key(name) else {
                continue;
            };
            let column = origin.column_number() + col as u32;
            if insert_first(&mut index.columns, "bosses", key, column) {
                index.names.push(name.to_string());
            }
        }

        index
    }

    /// 1-based column of a boss, `None` if the header row does not list it
    pub fn get_column(&self, boss: &str) -> Option<u32> {
        self.columns.get(&normalize_key(boss)?).copied()
    }

    /// Boss names in sheet order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Player (entity) name to sheet row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameIndex {
    rows: AHashMap<String, u32>,
    names: Vec<String>,
}

impl NameIndex {
    /// Build from the loot range whose top-left cell sits at `origin`
    pub fn from_raw(raw: &RawRange, origin: CellAddress) -> Self {
        let mut index = Self::default();

        for (i, row) in raw.iter().enumerate().skip(1) {
            let Some(name) = cell_text(row, 0) else {
                continue;
            };
            let Some(key) = normalize_key(name) else {
                continue;
            };
            let row_number = origin.row_number() + i as u32;
            if insert_first(&mut index.rows, "names", key, row_number) {
                index.names.push(name.to_string());
            }
        }

        index
    }

    /// 1-based row of a player, `None` if the first column does not list them
    pub fn get_row(&self, name: &str) -> Option<u32> {
        self.rows.get(&normalize_key(name)?).copied()
    }

    /// Player names in sheet order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
