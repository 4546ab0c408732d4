//! Zero-copy text views.
//!
//! A [Field] never owns any text, it narrows a view into a buffer owned by
//! whoever built the root table. Every table derived from that root keeps
//! borrowing the same buffer.

use std::fmt::{self, Display, Formatter, Write};

/// A view of `source[start..end]` with a flag controlling how the
/// value is rendered in a statement.
///
/// A zero length field is a SQL `NULL` and is never quoted.
#[derive(Debug, PartialEq, Eq)]
pub struct Field<'a> {
    source: &'a str,
    start: usize,
    end: usize,
    quote: bool,
}

impl<'a> Field<'a> {
    /// Creates a new unquoted field viewing `source[start..end]`.
    ///
    /// Panics if the range is out of bounds or does not fall on
    /// character boundaries.
    pub fn new(source: &'a str, start: usize, end: usize) -> Self {
        assert!(
            start <= end && source.get(start..end).is_some(),
            "field range {start}..{end} is not a valid view of a buffer of length {}",
            source.len(),
        );

        Self {
            source,
            start,
            end,
            quote: false,
        }
    }

    /// Creates a field viewing the entire buffer.
    pub fn whole(source: &'a str) -> Self {
        Self::new(source, 0, source.len())
    }

    #[inline]
    /// The offset of the first byte of the view.
    pub fn start(&self) -> usize {
        self.start
    }

    #[inline]
    /// The offset one past the last byte of the view.
    pub fn end(&self) -> usize {
        self.end
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    /// Returns if the field represents a SQL `NULL`.
    pub fn is_null(&self) -> bool {
        self.is_empty()
    }

    #[inline]
    /// The buffer this field is a view of.
    pub fn source(&self) -> &'a str {
        self.source
    }

    #[inline]
    /// The text the field views.
    pub fn as_str(&self) -> &'a str {
        &self.source[self.start..self.end]
    }

    #[inline]
    pub fn is_quoted(&self) -> bool {
        self.quote
    }

    /// Mark the field to be quoted and escaped on output.
    pub fn quote(&mut self) {
        self.quote = true;
    }

    /// Mark the field to be emitted verbatim on output.
    pub fn unquote(&mut self) {
        self.quote = false;
    }

    /// Renders the field as a SQL value.
    ///
    /// - `NULL` when the field is empty.
    /// - The raw text when unquoted.
    /// - The text wrapped in `'` with every embedded `'` doubled otherwise.
    pub fn echo(&self) -> String {
        self.to_string()
    }
}

impl Display for Field<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return f.write_str("NULL");
        }

        if !self.quote {
            return f.write_str(self.as_str());
        }

        f.write_char('\'')?;
        for (i, part) in self.as_str().split('\'').enumerate() {
            if i > 0 {
                f.write_str("''")?;
            }
            f.write_str(part)?;
        }
        f.write_char('\'')
    }
}
