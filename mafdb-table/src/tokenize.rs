//! Tokenizers which carve a [Field] into child fields over the same buffer.

use crate::Field;

/// Splits the field on every occurrence of `separator`.
///
/// Always produces exactly `count(separator) + 1` fields, empty runs included,
/// so a trailing separator yields a trailing empty field.
/// None of the produced fields are quoted.
pub fn tokenize<'a>(field: &Field<'a>, separator: char) -> Vec<Field<'a>> {
    let source = field.source();
    let base = field.start();

    let mut tokens = Vec::new();
    let mut begin = 0;
    for (offset, _) in field.as_str().match_indices(separator) {
        tokens.push(Field::new(source, base + begin, base + offset));
        begin = offset + separator.len_utf8();
    }
    tokens.push(Field::new(source, base + begin, field.end()));

    tokens
}

/// Splits a field of the shape `label(inner)` into `[label, inner]`.
///
/// The first `(` and the first `)` are located independently. If either is
/// missing, or the `)` does not come after the `(`, no fields are returned.
pub fn tokenize_bracket<'a>(field: &Field<'a>) -> Vec<Field<'a>> {
    let text = field.as_str();
    let source = field.source();
    let base = field.start();

    match (text.find('('), text.find(')')) {
        (Some(open), Some(close)) if close > open => vec![
            Field::new(source, base, base + open),
            Field::new(source, base + open + 1, base + close),
        ],
        _ => Vec::new(),
    }
}

/// Returns the position of the first column in `header` called `name`.
pub fn locate<S: AsRef<str>>(name: &str, header: &[S]) -> Option<usize> {
    header.iter().position(|column| column.as_ref() == name)
}
