use std::io;

use mafdb_table::TableError;

#[derive(Debug, thiserror::Error)]
/// An error that can occur while converting a set of records.
///
/// Any error aborts the whole conversion, no partial output is produced.
pub enum ReaderError {
    #[error("Table Error: {0}")]
    /// The table engine rejected the schema or a decomposition.
    Table(#[from] TableError),
    #[error("Schema Error: {0}")]
    /// The schema document could not be parsed.
    Schema(#[from] serde_json::Error),
    #[error("IO Error: {0}")]
    /// An IO error that occurred while reading records or the schema.
    Io(#[from] io::Error),
    #[error("Unknown column rule code: {0}")]
    /// A column rule code outside of `0..=3`.
    UnknownRule(i32),
    #[error("Line {line} has {found} cells but the schema has {expected} columns")]
    /// A record does not have one cell per schema column.
    RowWidth {
        line: usize,
        expected: usize,
        found: usize,
    },
}
