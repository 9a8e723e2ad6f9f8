//! # loot-sheets-core
//!
//! Pure data layer of loot-sheets: no I/O, no async.
//!
//! - [`CellAddress`] and [`CellRange`] - A1 addressing
//! - [`RangeSpec`] and [`RangeSet`] - the `Sheet!A1:B2` regions the bot reads
//! - [`RawRange`] - cell text as returned by a range read
//! - [`DocumentSnapshot`] - the five lookup indices built from one fetch
//!
//! ## Example
//!
//! ```rust
//! use loot_sheets_core::{DocumentSnapshot, FetchedRanges, RangeSet};
//!
//! let ranges = RangeSet::parse(
//!     "Permissions!A:D",
//!     "Loot!A1:Z60",
//!     "Options!A:B",
//!     "Aliases!A:F",
//! ).unwrap();
//!
//! let values = FetchedRanges {
//!     loot: vec![
//!         vec!["".into(), "Onyxia".into()],
//!         vec!["Alice".into()],
//!     ],
//!     ..Default::default()
//! };
//!
//! let snapshot = DocumentSnapshot::build(&ranges, &values);
//! let cell = snapshot.locate("Alice", "Onyxia").unwrap();
//! assert_eq!(snapshot.cell_reference(cell), "Loot!B2");
//! ```

pub mod cell;
pub mod error;
pub mod index;
pub mod range_spec;
pub mod raw;
pub mod snapshot;

// Re-exports for convenience
pub use cell::{CellAddress, CellRange};
pub use error::{Error, Result};
pub use index::{AliasIndex, BossIndex, NameIndex, OptionIndex, PermissionIndex};
pub use range_spec::{RangeSet, RangeSpec};
pub use raw::RawRange;
pub use snapshot::{DocumentSnapshot, FetchedRanges, MissingCoordinate};

/// Maximum number of rows addressable in a sheet (Google Sheets cell limit)
pub const MAX_ROWS: u32 = 10_000_000;

/// Maximum number of columns in a sheet (column ZZZ)
pub const MAX_COLS: u16 = 18_278;
