//! Errors raised while parsing addresses and range references

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A cell reference that is not `<letters><row>`
    #[error("Bad cell reference: {0}")]
    InvalidAddress(String),

    /// A range reference that does not parse
    #[error("Bad range: {0}")]
    InvalidRange(String),

    #[error("Row {0} is past the last sheet row ({1})")]
    RowOutOfBounds(u32, u32),

    #[error("Column {0} is past ZZZ")]
    ColumnOutOfBounds(String),

    /// Empty or badly quoted sheet name before the `!`
    #[error("Bad sheet name in '{0}'")]
    InvalidSheetName(String),
}
