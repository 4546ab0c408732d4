//! The description of the root table of a conversion.
//!
//! Schemas are usually loaded from a JSON document:
//!
//! ```json
//! {
//!     "table": "maf",
//!     "starting_point": 0,
//!     "columns": [
//!         { "name": "hugo_symbol", "rule": 1 },
//!         { "name": "start_position", "rule": 2 },
//!         { "name": "consequence", "rule": 3 }
//!     ]
//! }
//! ```

use std::path::Path;

use bon::Builder;
use mafdb_table::{locate, QuotingRule};
use serde_derive::Deserialize;

use crate::ReaderError;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Deserialize)]
#[serde(try_from = "i32")]
/// How a column of the root table is treated.
///
/// Encoded as `0` (mask), `1` (quote), `2` (verbatim) or `3` (explode).
pub enum ColumnRule {
    /// The column is omitted from the root statement.
    Mask,
    /// The column is quoted.
    Quote,
    /// The column is emitted as-is.
    Verbatim,
    /// The column is quoted in the root statement and additionally
    /// decomposed into its own tables by the MAF conversion.
    Explode,
}

impl ColumnRule {
    /// The rule applied to the column values in the root table.
    pub fn quoting_rule(self) -> QuotingRule {
        match self {
            Self::Mask => QuotingRule::Mask,
            Self::Quote | Self::Explode => QuotingRule::Quote,
            Self::Verbatim => QuotingRule::Verbatim,
        }
    }
}

impl TryFrom<i32> for ColumnRule {
    type Error = ReaderError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Mask),
            1 => Ok(Self::Quote),
            2 => Ok(Self::Verbatim),
            3 => Ok(Self::Explode),
            other => Err(ReaderError::UnknownRule(other)),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
/// A single named column of the root table.
pub struct SchemaColumn {
    name: String,
    rule: ColumnRule,
}

impl SchemaColumn {
    pub fn new(name: impl Into<String>, rule: ColumnRule) -> Self {
        Self {
            name: name.into(),
            rule,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn rule(&self) -> ColumnRule {
        self.rule
    }
}

impl AsRef<str> for SchemaColumn {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Builder, Deserialize)]
/// The header, rules, name and first key of a root table.
pub struct Schema {
    #[builder(into)]
    /// The name of the root table in the output statement.
    table: String,
    #[builder(default)]
    #[serde(default)]
    /// The root table keys start at `starting_point + 1`.
    ///
    /// This allows several batches of the same file to be converted
    /// without key collisions.
    starting_point: i64,
    /// The columns of each record in order.
    columns: Vec<SchemaColumn>,
}

impl Schema {
    /// Parses a schema from a JSON document.
    pub fn from_json(text: &str) -> Result<Self, ReaderError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a schema JSON file.
    pub fn from_path(path: &Path) -> Result<Self, ReaderError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    #[inline]
    pub fn table(&self) -> &str {
        &self.table
    }

    #[inline]
    pub fn starting_point(&self) -> i64 {
        self.starting_point
    }

    #[inline]
    pub fn columns(&self) -> &[SchemaColumn] {
        &self.columns
    }

    /// The column names in order.
    pub fn header(&self) -> Vec<&str> {
        self.columns.iter().map(SchemaColumn::name).collect()
    }

    /// The quoting rules of the root table in column order.
    pub fn quoting_rules(&self) -> Vec<QuotingRule> {
        self.columns
            .iter()
            .map(|column| column.rule.quoting_rule())
            .collect()
    }

    /// Returns the position of the first column called `name` if that
    /// column has the given rule.
    pub fn locate_with_rule(&self, name: &str, rule: ColumnRule) -> Option<usize> {
        locate(name, &self.columns).filter(|&position| self.columns[position].rule == rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_from_json() {
        let schema = Schema::from_json(
            r#"{
                "table": "maf",
                "starting_point": 10,
                "columns": [
                    { "name": "hugo_symbol", "rule": 1 },
                    { "name": "start_position", "rule": 2 },
                    { "name": "internal_id", "rule": 0 },
                    { "name": "consequence", "rule": 3 }
                ]
            }"#,
        )
        .expect("Schema should parse");

        assert_eq!(schema.table(), "maf");
        assert_eq!(schema.starting_point(), 10);
        assert_eq!(
            schema.header(),
            vec!["hugo_symbol", "start_position", "internal_id", "consequence"],
        );
        assert_eq!(
            schema.quoting_rules(),
            vec![
                QuotingRule::Quote,
                QuotingRule::Verbatim,
                QuotingRule::Mask,
                QuotingRule::Quote,
            ],
        );
    }

    #[test]
    fn test_starting_point_defaults_to_zero() {
        let schema =
            Schema::from_json(r#"{"table": "t", "columns": [{"name": "a", "rule": 1}]}"#).unwrap();
        assert_eq!(schema.starting_point(), 0);
    }

    #[rstest::rstest]
    #[case(r#"{"table": "t", "columns": [{"name": "a", "rule": 4}]}"#)]
    #[case(r#"{"table": "t", "columns": [{"name": "a", "rule": -1}]}"#)]
    #[case(r#"{"table": "t", "columns": [{"name": "a"}]}"#)]
    #[case(r#"{"columns": []}"#)]
    #[case("not json")]
    fn test_invalid_schema(#[case] text: &str) {
        let err = Schema::from_json(text).unwrap_err();
        assert!(matches!(err, ReaderError::Schema(_)), "{err:?}");
    }

    #[test]
    fn test_locate_with_rule() {
        let schema = Schema::builder()
            .table("t")
            .columns(vec![
                SchemaColumn::new("consequence", ColumnRule::Explode),
                SchemaColumn::new("filter", ColumnRule::Quote),
            ])
            .build();

        assert_eq!(schema.locate_with_rule("consequence", ColumnRule::Explode), Some(0));
        assert_eq!(schema.locate_with_rule("filter", ColumnRule::Explode), None);
        assert_eq!(schema.locate_with_rule("filter", ColumnRule::Quote), Some(1));
        assert_eq!(schema.locate_with_rule("missing", ColumnRule::Explode), None);
    }
}
