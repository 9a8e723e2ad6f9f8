//! Raw tabular values as returned by a range read

/// Row-major cell text of one range, exactly as the remote read returns it.
///
/// Rows may be ragged; trailing empty cells are usually omitted by the API
/// and an empty range comes back with no rows at all.
pub type RawRange = Vec<Vec<String>>;

/// Trimmed text of the cell at `col` in `row`, or `None` if missing or blank
pub fn cell_text(row: &[String], col: usize) -> Option<&str> {
    row.get(col).map(|c| c.trim()).filter(|c| !c.is_empty())
}
