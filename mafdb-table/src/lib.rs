//! Relational decomposition of delimiter separated text.
//!
//! Lines of text are viewed through zero-copy [Field]s and collected into a
//! root [Table]. Denormalized columns of a table can then be decomposed into
//! new derived tables (see [Table::split_rows], [Table::split_cols],
//! [Table::kv_split], [Table::kv_merge], [Table::split_info] and
//! [Table::split_brackets]) which keep viewing the original text and carry
//! the primary key of the row they came from. Every table renders as a bulk
//! `INSERT` statement with [Table::echo].
//!
//! ```
//! use mafdb_table::{tokenize, Field, QuotingRule, Table};
//!
//! let line = "x\t1";
//! let mut table = Table::new(&["a", "b"], &[QuotingRule::Quote, QuotingRule::Verbatim], "t", 0)?;
//! for cell in tokenize(&Field::whole(line), '\t') {
//!     table.add(cell);
//! }
//! assert_eq!(table.echo(), "INSERT INTO t VALUES \n(1,'x',1);\n");
//! # Ok::<(), mafdb_table::TableError>(())
//! ```

mod decompose;
mod error;
mod field;
mod priority;
mod table;
mod tokenize;

pub use self::error::TableError;
pub use self::field::Field;
pub use self::priority::assign_priority_index;
pub use self::table::{Column, QuotingRule, Table};
pub use self::tokenize::{locate, tokenize, tokenize_bracket};
