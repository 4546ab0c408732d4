//! Decomposition operators.
//!
//! Each operator reads one (or two) columns of a source table and builds a
//! new derived table from it. Derived tables view the same buffers as their
//! source, preserve the source row order and carry the primary key of the
//! source row each of their rows came from.
//!
//! A source table whose last row is only partly filled is rejected with a
//! [TableError::Configuration].

use std::iter;

use tracing::debug;

use crate::{locate, tokenize, tokenize_bracket, Field, QuotingRule, Table, TableError};

const KEY_VALUE_HEADER: [&str; 2] = ["key", "value"];
const BRACKET_HEADER: [&str; 2] = ["classification", "score"];
const BRACKET_RULES: [QuotingRule; 2] = [QuotingRule::Quote, QuotingRule::Verbatim];

/// Starting point of every derived table, keys are copied from the parent.
const DERIVED: i64 = -1;

impl<'a> Table<'a> {
    /// Returns the position of the column called `name`.
    pub fn column_index(&self, name: &str) -> Result<usize, TableError> {
        locate(name, &self.columns).ok_or_else(|| TableError::ColumnNotFound(name.to_string()))
    }

    /// Looks up the column an operator reads, the source must only hold
    /// complete rows.
    fn source_column(&self, name: &str) -> Result<usize, TableError> {
        let col = self.column_index(name)?;
        if self.rows.last().is_some_and(|row| row.len() < self.ncol()) {
            return Err(TableError::Configuration(format!(
                "table {:?} has a partially filled last row",
                self.name,
            )));
        }
        Ok(col)
    }

    /// Appends a complete row and overwrites its key with the parent's key.
    fn push_keyed_row(&mut self, key: i64, fields: impl IntoIterator<Item = Field<'a>>) {
        let row = self.rows.len();
        for field in fields {
            self.add(field);
        }
        if let Some(slot) = self.primary_index.get_mut(row) {
            *slot = key;
        }
    }

    /// Iterates over the target column of every source row with the row's key.
    fn targets(&self, col: usize) -> impl Iterator<Item = (i64, &Field<'a>)> + '_ {
        self.primary_index
            .iter()
            .copied()
            .zip(self.rows.iter().map(move |row| &row[col]))
    }

    /// Splits every value of `column` on `separator`, producing one row per
    /// token.
    ///
    /// ```text
    /// id  list                    id  list
    ///  1  a;b;c  -- split_rows -->  1  a
    ///                               1  b
    ///                               1  c
    /// ```
    ///
    /// Rows with an empty value and empty tokens produce no output rows.
    /// The new table has a single quoted column named after `column`.
    pub fn split_rows(
        &self,
        column: &str,
        name: &str,
        separator: char,
    ) -> Result<Table<'a>, TableError> {
        let col = self.source_column(column)?;
        let mut table = Table::new(&[column], &[QuotingRule::Quote], name, DERIVED)?;

        for (key, target) in self.targets(col) {
            if target.is_null() {
                continue;
            }

            for token in tokenize(target, separator) {
                if token.is_empty() {
                    continue;
                }
                table.push_keyed_row(key, [token]);
            }
        }

        debug!(source = %self.name, column, table = %table.name, rows = table.nrow(), "Split column into rows");
        Ok(table)
    }

    /// Splits every value of `column` on `separator`, mapping the tokens
    /// positionally onto the columns of `header`.
    ///
    /// ```text
    /// id  list                    id  c1  c2  c3
    ///  1  a;b;c  -- split_cols -->  1   a   b   c
    /// ```
    ///
    /// Exactly one row is produced per source row, empty values included.
    /// Missing tokens are filled with `NULL` and surplus tokens are dropped.
    pub fn split_cols<S: AsRef<str>>(
        &self,
        column: &str,
        header: &[S],
        rules: &[QuotingRule],
        name: &str,
        separator: char,
    ) -> Result<Table<'a>, TableError> {
        let col = self.source_column(column)?;
        let mut table = Table::new(header, rules, name, DERIVED)?;
        let width = table.ncol();

        for (key, target) in self.targets(col) {
            let tokens = tokenize(target, separator);
            if tokens.len() > width {
                debug!(key, tokens = tokens.len(), width, "Dropping surplus tokens");
            }

            let (source, end) = (target.source(), target.end());
            let padding = iter::repeat_with(|| Field::new(source, end, end));
            table.push_keyed_row(key, tokens.into_iter().chain(padding).take(width));
        }

        debug!(source = %self.name, column, table = %table.name, rows = table.nrow(), "Split column into columns");
        Ok(table)
    }

    /// Splits `key<separator>value` pairs into a `key`, `value` table.
    pub fn kv_split(
        &self,
        column: &str,
        key_rule: QuotingRule,
        value_rule: QuotingRule,
        name: &str,
        separator: char,
    ) -> Result<Table<'a>, TableError> {
        self.split_cols(column, &KEY_VALUE_HEADER, &[key_rule, value_rule], name, separator)
    }

    #[allow(clippy::too_many_arguments)]
    /// Zips the tokens of two columns into a `key`, `value` table.
    ///
    /// ```text
    /// id  keys  values                  id  key  value
    ///  1  a:b   3,2     -- kv_merge -->   1    a      3
    ///                                     1    b      2
    /// ```
    ///
    /// Rows where either value is empty produce no output rows. When the
    /// two columns split into a different number of tokens the pairs are
    /// truncated to the shorter sequence.
    pub fn kv_merge(
        &self,
        keys: &str,
        values: &str,
        key_rule: QuotingRule,
        value_rule: QuotingRule,
        name: &str,
        key_separator: char,
        value_separator: char,
    ) -> Result<Table<'a>, TableError> {
        let keys_col = self.source_column(keys)?;
        let values_col = self.column_index(values)?;
        let mut table = Table::new(&KEY_VALUE_HEADER, &[key_rule, value_rule], name, DERIVED)?;

        for (row, key) in self.rows.iter().zip(&self.primary_index) {
            if row[keys_col].is_null() || row[values_col].is_null() {
                continue;
            }

            let row_keys = tokenize(&row[keys_col], key_separator);
            let row_values = tokenize(&row[values_col], value_separator);
            if row_keys.len() != row_values.len() {
                debug!(
                    key,
                    keys = row_keys.len(),
                    values = row_values.len(),
                    "Key and value counts differ, truncating to the shorter",
                );
            }

            for (k, v) in row_keys.into_iter().zip(row_values) {
                table.push_keyed_row(*key, [k, v]);
            }
        }

        debug!(source = %self.name, keys, values, table = %table.name, rows = table.nrow(), "Merged columns into key value pairs");
        Ok(table)
    }

    /// Splits VCF `INFO` style entries into a `key`, `value` table.
    ///
    /// Entries without a separator are flags and get the value `true`,
    /// everything after the second token is dropped.
    pub fn split_info(
        &self,
        column: &str,
        key_rule: QuotingRule,
        value_rule: QuotingRule,
        name: &str,
        separator: char,
    ) -> Result<Table<'a>, TableError> {
        const FLAG_VALUE: &str = "true";

        let col = self.source_column(column)?;
        let mut table = Table::new(&KEY_VALUE_HEADER, &[key_rule, value_rule], name, DERIVED)?;

        for (key, target) in self.targets(col) {
            let mut tokens = tokenize(target, separator);
            if tokens.len() == 1 {
                tokens.push(Field::whole(FLAG_VALUE));
            }
            tokens.truncate(2);
            table.push_keyed_row(key, tokens);
        }

        debug!(source = %self.name, column, table = %table.name, rows = table.nrow(), "Split info column");
        Ok(table)
    }

    /// Splits `classification(score)` values into a two column table
    /// with the given header and rules.
    ///
    /// Values which do not contain a `(...)` pair produce no row.
    pub fn split_brackets_with<S: AsRef<str>>(
        &self,
        column: &str,
        header: &[S],
        rules: &[QuotingRule],
        name: &str,
    ) -> Result<Table<'a>, TableError> {
        let col = self.source_column(column)?;
        let mut table = Table::new(header, rules, name, DERIVED)?;
        if table.ncol() != 2 {
            return Err(TableError::Configuration(format!(
                "bracket split table {name:?} must have 2 columns, got {}",
                table.ncol(),
            )));
        }

        for (key, target) in self.targets(col) {
            let tokens = tokenize_bracket(target);
            if tokens.is_empty() {
                continue;
            }
            table.push_keyed_row(key, tokens);
        }

        debug!(source = %self.name, column, table = %table.name, rows = table.nrow(), "Split bracketed column");
        Ok(table)
    }

    /// Splits `classification(score)` values into a `classification`
    /// (quoted), `score` (verbatim) table.
    pub fn split_brackets(&self, column: &str, name: &str) -> Result<Table<'a>, TableError> {
        self.split_brackets_with(column, &BRACKET_HEADER, &BRACKET_RULES, name)
    }
}
