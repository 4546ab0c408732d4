#[derive(Debug, thiserror::Error)]
/// An error that can occur while building or decomposing a [Table](crate::Table).
///
/// Both variants signal a contract violation by the caller rather than a
/// problem with the data itself, the conversion should be aborted.
pub enum TableError {
    #[error("Configuration Error: {0}")]
    /// The header, rules or shape given to a table are inconsistent.
    Configuration(String),
    #[error("Column not found: {0:?}")]
    /// A decomposition referenced a column that does not exist
    /// in the source table.
    ColumnNotFound(String),
}
