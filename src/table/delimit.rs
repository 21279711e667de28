//! Delimiter-aware line splitting
//!
//! A double quote toggles a quoted span. Inside the span the delimiter is
//! literal content; the quotes themselves are kept in the field. The final
//! field is only emitted when it is non-empty, so `"a,b,"` splits into two
//! fields, not three.

/// Double quote that opens and closes a quoted span
pub const DOUBLE_QUOTE: char = '"';

/// Splits a line on `delimiter`, leaving each field untrimmed.
pub fn split_fields(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut part = String::new();
    let mut quoted = false;

    for c in line.chars() {
        if c == DOUBLE_QUOTE {
            quoted = !quoted;
            part.push(c);
        } else if c == delimiter && !quoted {
            fields.push(std::mem::take(&mut part));
        } else {
            part.push(c);
        }
    }

    if !part.is_empty() {
        fields.push(part);
    }

    fields
}

/// Splits a line and trims surrounding whitespace from every field.
///
/// This is the form rows and headers are produced in. Trimming happens after
/// splitting, so a raw line ending in `"\n"` keeps its last (possibly empty)
/// field.
pub fn split_trimmed(line: &str, delimiter: char) -> Vec<String> {
    split_fields(line, delimiter)
        .into_iter()
        .map(|part| part.trim().to_string())
        .collect()
}
