//! Conversion of tab separated records into normalized `INSERT` statements.
//!
//! A [Schema] describes the root table, a [RecordSet] owns the lines of one
//! conversion. [convert] renders only the root table while [convert_maf]
//! also decomposes the list and key/value columns found in MAF files.

mod convert;
mod error;
mod maf;
mod records;
mod schema;

pub use self::convert::{build_root, convert};
pub use self::error::ReaderError;
pub use self::maf::{convert_maf, maf_tables};
pub use self::records::RecordSet;
pub use self::schema::{ColumnRule, Schema, SchemaColumn};
