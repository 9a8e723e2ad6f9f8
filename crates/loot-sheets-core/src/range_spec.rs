//! Named sheet regions
//!
//! A [`RangeSpec`] is the `"<SheetName>!<A1-range>"` string handed to the
//! Sheets API, validated once at configuration time. The sheet part is kept
//! exactly as written so that single-cell write addresses built from it
//! quote the sheet the same way the configured range does.

use std::fmt;
use std::str::FromStr;

use crate::cell::{CellAddress, CellRange};
use crate::error::{Error, Result};

/// A rectangular region on one sheet, e.g. `Loot!A1:Z60`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct RangeSpec {
    /// Sheet part as written, including quotes (`'Loot Table'`)
    sheet: String,
    /// Sheet name with quoting removed
    sheet_name: String,
    area: CellRange,
    /// The full reference as written
    reference: String,
}

impl RangeSpec {
    /// Parse a `Sheet!A1:B2` reference
    ///
    /// # Examples
    /// ```
    /// use loot_sheets_core::RangeSpec;
    ///
    /// let spec = RangeSpec::parse("'Loot Table'!B2:K40").unwrap();
    /// assert_eq!(spec.sheet_name(), "Loot Table");
    /// assert_eq!(spec.origin().to_string(), "B2");
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let reference = s.trim();
        let (sheet, a1) = reference
            .rsplit_once('!')
            .ok_or_else(|| Error::InvalidRange(format!("missing sheet name in '{reference}'")))?;

        let sheet_name = unquote_sheet(sheet)
            .ok_or_else(|| Error::InvalidSheetName(reference.to_string()))?;
        let area = CellRange::parse(a1)?;

        Ok(Self {
            sheet: sheet.to_string(),
            sheet_name,
            area,
            reference: reference.to_string(),
        })
    }

    /// The reference exactly as configured
    pub fn as_str(&self) -> &str {
        &self.reference
    }

    /// Sheet part as written, quotes included
    pub fn sheet(&self) -> &str {
        &self.sheet
    }

    /// Sheet name without quoting
    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    /// The covered cell rectangle
    pub fn area(&self) -> &CellRange {
        &self.area
    }

    /// Top-left cell; row/column 0 of the fetched values sits here
    pub fn origin(&self) -> CellAddress {
        self.area.start
    }

    /// Single-cell reference on this range's sheet, e.g. `Loot!C7`
    pub fn cell_reference(&self, addr: CellAddress) -> String {
        format!("{}!{}", self.sheet, addr)
    }
}

fn unquote_sheet(sheet: &str) -> Option<String> {
    let name = match sheet.strip_prefix('\'') {
        Some(rest) => rest.strip_suffix('\'')?.replace("''", "'"),
        None => sheet.to_string(),
    };
    (!name.trim().is_empty()).then_some(name)
}

impl fmt::Display for RangeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reference)
    }
}

impl FromStr for RangeSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RangeSpec {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<RangeSpec> for String {
    fn from(spec: RangeSpec) -> Self {
        spec.reference
    }
}

/// The four regions the bot reads on every refresh
///
/// Fetch order is fixed: permissions, loot, options, aliases.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeSet {
    /// Principal/action grant table
    pub permissions: RangeSpec,
    /// Boss columns by player rows
    pub loot: RangeSpec,
    /// Key/value options
    pub options: RangeSpec,
    /// Canonical names and their aliases
    pub aliases: RangeSpec,
}

impl RangeSet {
    /// Number of ranges in a set
    pub const LEN: usize = 4;

    /// Parse all four references
    pub fn parse(permissions: &str, loot: &str, options: &str, aliases: &str) -> Result<Self> {
        Ok(Self {
            permissions: RangeSpec::parse(permissions)?,
            loot: RangeSpec::parse(loot)?,
            options: RangeSpec::parse(options)?,
            aliases: RangeSpec::parse(aliases)?,
        })
    }

    /// Specs in fetch order
    pub fn as_array(&self) -> [&RangeSpec; Self::LEN] {
        [&self.permissions, &self.loot, &self.options, &self.aliases]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        let spec = RangeSpec::parse("Loot!A1:Z60").unwrap();
        assert_eq!(spec.sheet(), "Loot");
        assert_eq!(spec.sheet_name(), "Loot");
        assert_eq!(spec.origin(), CellAddress::new(0, 0));
        assert_eq!(spec.area().end, CellAddress::new(59, 25));
        assert_eq!(spec.to_string(), "Loot!A1:Z60");
    }

    #[test]
    fn test_parse_quoted_sheet() {
        let spec = RangeSpec::parse("'Bob''s Loot'!C3:F9").unwrap();
        assert_eq!(spec.sheet(), "'Bob''s Loot'");
        assert_eq!(spec.sheet_name(), "Bob's Loot");
        assert_eq!(
            spec.cell_reference(CellAddress::new(4, 3)),
            "'Bob''s Loot'!D5"
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(RangeSpec::parse("A1:B2").is_err());
        assert!(RangeSpec::parse("!A1:B2").is_err());
        assert!(RangeSpec::parse("''!A1:B2").is_err());
        assert!(RangeSpec::parse("'Loot!A1:B2").is_err());
        assert!(RangeSpec::parse("Loot!1:2").is_err());
    }

    #[test]
    fn test_range_set_order() {
        let set = RangeSet::parse("Perms!A:C", "Loot!A1:Z60", "Opts!A:B", "Alias!A:E").unwrap();
        let names: Vec<_> = set.as_array().iter().map(|s| s.sheet_name()).collect();
        assert_eq!(names, ["Perms", "Loot", "Opts", "Alias"]);
    }
}
