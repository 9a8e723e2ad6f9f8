//! A1 addressing

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};
use std::fmt;
use std::str::FromStr;

/// One cell, e.g. `C7`.
///
/// Stored 0-based; rendered 1-based, which is the form a Sheets range string
/// uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellAddress {
    /// 0-based row (row 1 in the sheet is 0)
    pub row: u32,
    /// 0-based column (A is 0)
    pub col: u16,
}

impl CellAddress {
    pub fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }

    /// From 1-based sheet coordinates; `None` if either is zero or past the
    /// sheet limits.
    pub fn from_coordinates(row: u32, col: u32) -> Option<Self> {
        let col = u16::try_from(col).ok().filter(|c| (1..=MAX_COLS).contains(c))?;
        (1..=MAX_ROWS)
            .contains(&row)
            .then(|| Self::new(row - 1, col - 1))
    }

    /// Row number as shown in the sheet
    pub fn row_number(&self) -> u32 {
        self.row + 1
    }

    /// Column number as shown in the sheet (A = 1)
    pub fn column_number(&self) -> u32 {
        u32::from(self.col) + 1
    }

    /// Parse `B2`, `$B$2` or `b2`.
    ///
    /// # Examples
    /// ```
    /// use loot_sheets_core::CellAddress;
    ///
    /// let addr = CellAddress::parse("$C$7").unwrap();
    /// assert_eq!((addr.row, addr.col), (6, 2));
    /// assert_eq!(addr.to_string(), "C7");
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        match split_reference(s)? {
            (col, Some(row)) => Ok(Self::new(row, col)),
            (_, None) => Err(Error::InvalidAddress(format!("'{}' has no row", s.trim()))),
        }
    }
}

/// Column and optional 0-based row of one endpoint of an A1 reference.
///
/// The row may be missing so that column-only endpoints (`A:Z`) parse too.
fn split_reference(s: &str) -> Result<(u16, Option<u32>)> {
    let text = s.trim();
    let plain: String = text.chars().filter(|&c| c != '$').collect();
    let digits_at = plain
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(plain.len());
    let (letters, digits) = plain.split_at(digits_at);

    if letters.is_empty() {
        return Err(Error::InvalidAddress(format!("'{text}' has no column")));
    }
    let col = column_index(letters)?;

    if digits.is_empty() {
        return Ok((col, None));
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidAddress(format!("'{text}' has an invalid row")));
    }
    let row: u32 = digits
        .parse()
        .map_err(|_| Error::RowOutOfBounds(u32::MAX, MAX_ROWS))?;
    match row {
        0 => Err(Error::InvalidAddress(format!("'{text}': rows start at 1"))),
        r if r > MAX_ROWS => Err(Error::RowOutOfBounds(r, MAX_ROWS)),
        r => Ok((col, Some(r - 1))),
    }
}

/// `A` -> 0, `AB` -> 27, case-insensitive, up to `ZZZ`
fn column_index(letters: &str) -> Result<u16> {
    let number = letters.bytes().try_fold(0u32, |acc, b| {
        let next = acc * 26 + u32::from(b.to_ascii_uppercase() - b'A') + 1;
        (next <= u32::from(MAX_COLS)).then_some(next)
    });
    match number {
        Some(n) => Ok((n - 1) as u16),
        None => Err(Error::ColumnOutOfBounds(letters.to_ascii_uppercase())),
    }
}

/// 0 -> `A`, 27 -> `AB`
fn column_name(col: u16) -> String {
    let mut n = u32::from(col) + 1;
    let mut name = Vec::with_capacity(3);
    while n > 0 {
        let rem = (n - 1) % 26;
        name.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    name.reverse();
    String::from_utf8(name).unwrap_or_default()
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_name(self.col), self.row_number())
    }
}

impl FromStr for CellAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Rectangle between two corners, inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRange {
    /// Top-left corner
    pub start: CellAddress,
    /// Bottom-right corner
    pub end: CellAddress,
}

impl CellRange {
    /// Range spanning both corners, whichever order they are given in
    pub fn new(a: CellAddress, b: CellAddress) -> Self {
        Self {
            start: CellAddress::new(a.row.min(b.row), a.col.min(b.col)),
            end: CellAddress::new(a.row.max(b.row), a.col.max(b.col)),
        }
    }

    /// Parse `A1:C10`, a single cell `B2`, or an open-ended `A:C` / `B2:D`.
    ///
    /// An endpoint without a row runs to the top (start) or the bottom (end)
    /// of the sheet.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = |e: Error| Error::InvalidRange(format!("'{s}': {e}"));

        let Some((first, last)) = s.split_once(':') else {
            let cell = CellAddress::parse(s).map_err(invalid)?;
            return Ok(Self::new(cell, cell));
        };
        let (first_col, first_row) = split_reference(first).map_err(invalid)?;
        let (last_col, last_row) = split_reference(last).map_err(invalid)?;

        Ok(Self::new(
            CellAddress::new(first_row.unwrap_or(0), first_col),
            CellAddress::new(last_row.unwrap_or(MAX_ROWS - 1), last_col),
        ))
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}:{}", self.start, self.end)
        }
    }
}

impl FromStr for CellRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
