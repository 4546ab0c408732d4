use std::io::{self, BufRead};

#[derive(Debug, Default, Clone)]
/// The owned lines of one conversion.
///
/// Every table built from a [RecordSet] borrows its lines, so the record
/// set must outlive all tables of the conversion, including derived ones.
pub struct RecordSet {
    lines: Vec<String>,
}

impl RecordSet {
    /// Creates a record set from already split lines.
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Splits the text into records, one per line.
    ///
    /// Both `\n` and `\r\n` line endings are accepted and a final
    /// line ending does not produce an extra record.
    pub fn from_text(text: &str) -> Self {
        Self::new(text.lines().map(str::to_string).collect())
    }

    /// Reads every line of the reader as a record.
    pub fn from_reader(reader: impl BufRead) -> io::Result<Self> {
        let mut lines = Vec::new();
        for line in reader.lines() {
            let mut line = line?;
            if line.ends_with('\r') {
                line.pop();
            }
            lines.push(line);
        }
        Ok(Self::new(lines))
    }

    /// Drops the first `n` records, typically a column header line.
    pub fn skip(mut self, n: usize) -> Self {
        self.lines.drain(..n.min(self.lines.len()));
        self
    }

    /// Drops every record starting with `prefix`, i.e. `#version 2.4` lines
    /// at the top of a MAF file.
    pub fn without_comments(mut self, prefix: char) -> Self {
        self.lines.retain(|line| !line.starts_with(prefix));
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Iterates over the records in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.lines.iter().map(String::as_str)
    }
}
