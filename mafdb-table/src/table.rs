use std::fmt::{self, Display, Formatter};

use crate::{Field, TableError};

#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
/// How the values of a column are rendered in the output statement.
pub enum QuotingRule {
    /// The column is omitted from the output entirely.
    Mask = 0,
    /// Values are wrapped in single quotes and escaped.
    Quote = 1,
    /// Values are emitted as-is.
    Verbatim = 2,
}

impl QuotingRule {
    /// Converts a list of raw rule codes into [QuotingRule]s.
    pub fn from_codes(codes: &[i32]) -> Result<Vec<Self>, TableError> {
        codes.iter().copied().map(Self::try_from).collect()
    }
}

impl TryFrom<i32> for QuotingRule {
    type Error = TableError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Mask),
            1 => Ok(Self::Quote),
            2 => Ok(Self::Verbatim),
            other => Err(TableError::Configuration(format!(
                "unknown quoting rule code: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
/// A named column and the rule applied to its values.
pub struct Column {
    name: String,
    rule: QuotingRule,
}

impl Column {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn rule(&self) -> QuotingRule {
        self.rule
    }
}

impl AsRef<str> for Column {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

#[derive(Debug)]
/// A fixed width table of [Field]s.
///
/// Tables are filled one field at a time with [Table::add], every
/// `ncol()`-th field closes the current row. Each row carries a generated
/// primary key and optionally a secondary (priority) key which are emitted
/// as the leading values of the row in the output statement.
///
/// ### Primary keys
///
/// With a `starting_point` of `0` or more, rows are keyed
/// `starting_point + 1, starting_point + 2, ...` as they are opened.
/// A negative `starting_point` marks a derived table, its keys start as `0`
/// and the decomposition building it copies the key of the parent row.
///
/// The table owns its fields but only borrows the text they view, the
/// lifetime `'a` is that of the original buffers, not of any parent table.
pub struct Table<'a> {
    pub(crate) name: String,
    pub(crate) columns: Vec<Column>,
    pub(crate) rows: Vec<Vec<Field<'a>>>,
    pub(crate) primary_index: Vec<i64>,
    pub(crate) secondary_index: Vec<i64>,
    pub(crate) starting_point: i64,
    pub(crate) use_secondary_index: bool,
}

impl<'a> Table<'a> {
    /// Creates a new empty table.
    ///
    /// Returns a [TableError::Configuration] if the header and rules differ
    /// in length or if no columns are given.
    pub fn new<S: AsRef<str>>(
        header: &[S],
        rules: &[QuotingRule],
        name: impl Into<String>,
        starting_point: i64,
    ) -> Result<Self, TableError> {
        let name = name.into();

        if header.len() != rules.len() {
            return Err(TableError::Configuration(format!(
                "table {name:?} has {} columns but {} rules",
                header.len(),
                rules.len(),
            )));
        }

        if header.is_empty() {
            return Err(TableError::Configuration(format!(
                "table {name:?} must have at least one column"
            )));
        }

        let columns = header
            .iter()
            .zip(rules)
            .map(|(name, rule)| Column {
                name: name.as_ref().to_string(),
                rule: *rule,
            })
            .collect();

        Ok(Self {
            name,
            columns,
            rows: Vec::new(),
            primary_index: Vec::new(),
            secondary_index: Vec::new(),
            starting_point,
            use_secondary_index: false,
        })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[inline]
    /// The number of rows, including a partially filled last row.
    pub fn nrow(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn ncol(&self) -> usize {
        self.columns.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[inline]
    pub fn starting_point(&self) -> i64 {
        self.starting_point
    }

    #[inline]
    pub fn rows(&self) -> &[Vec<Field<'a>>] {
        &self.rows
    }

    #[inline]
    pub fn primary_keys(&self) -> &[i64] {
        &self.primary_index
    }

    #[inline]
    pub fn secondary_keys(&self) -> &[i64] {
        &self.secondary_index
    }

    #[inline]
    /// Returns if the secondary key is emitted in the output.
    pub fn uses_secondary_index(&self) -> bool {
        self.use_secondary_index
    }

    #[inline]
    pub fn primary_key(&self, row: usize) -> i64 {
        self.primary_index[row]
    }

    #[inline]
    pub fn secondary_key(&self, row: usize) -> i64 {
        self.secondary_index[row]
    }

    /// Returns the field at the given position.
    ///
    /// Panics if either position is out of range.
    pub fn at(&self, row: usize, col: usize) -> &Field<'a> {
        &self.rows[row][col]
    }

    /// Appends a field to the currently open row.
    ///
    /// A new row is opened when the last row is full, which also allocates
    /// its primary and secondary key. The rule of the destination column
    /// is applied to the field once inserted.
    pub fn add(&mut self, mut field: Field<'a>) {
        let ncol = self.ncol();
        let is_open = self.rows.last().is_some_and(|row| row.len() < ncol);
        if !is_open {
            self.open_row();
        }

        let row = self.rows.len() - 1;
        match self.columns[self.rows[row].len()].rule {
            QuotingRule::Quote => field.quote(),
            QuotingRule::Verbatim => field.unquote(),
            QuotingRule::Mask => {},
        }
        self.rows[row].push(field);
    }

    fn open_row(&mut self) {
        let key = if self.starting_point >= 0 {
            self.starting_point + self.primary_index.len() as i64 + 1
        } else {
            0
        };

        self.rows.push(Vec::with_capacity(self.ncol()));
        self.primary_index.push(key);
        self.secondary_index.push(0);
    }

    /// Renders the table as a single `INSERT` statement.
    ///
    /// Empty tables render as an empty string.
    pub fn echo(&self) -> String {
        self.to_string()
    }
}

impl Display for Table<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            return Ok(());
        }

        writeln!(f, "INSERT INTO {} VALUES ", self.name)?;

        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                f.write_str(",\n")?;
            }

            write!(f, "({}", self.primary_index[i])?;
            if self.use_secondary_index {
                write!(f, ",{}", self.secondary_index[i])?;
            }

            for (field, column) in row.iter().zip(&self.columns) {
                if column.rule == QuotingRule::Mask {
                    continue;
                }
                write!(f, ",{field}")?;
            }

            f.write_str(")")?;
        }

        f.write_str(";\n")
    }
}
