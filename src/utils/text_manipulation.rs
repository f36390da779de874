//! Character-column helpers for single lines.
//!
//! Cursor columns count `char`s, these translate them into byte offsets.

/// Number of characters in `line`
pub fn char_len(line: &str) -> usize {
    line.chars().count()
}

/// Byte offset of character `column`, or the end of the line when past it
pub fn byte_index(line: &str, column: usize) -> usize {
    line.char_indices()
        .nth(column)
        .map_or(line.len(), |(index, _)| index)
}

/// Split at a character column
pub fn split_at_column(line: &str, column: usize) -> (&str, &str) {
    line.split_at(byte_index(line, column))
}

/// `line` with `text` spliced in at `column`
pub fn insert_str_at(line: &str, column: usize, text: &str) -> String {
    let (left, right) = split_at_column(line, column);
    let mut result = String::with_capacity(line.len() + text.len());
    result.push_str(left);
    result.push_str(text);
    result.push_str(right);
    result
}

/// `line` without the character at `column`
pub fn remove_char_at(line: &str, column: usize) -> String {
    let (left, right) = split_at_column(line, column);
    let mut chars = right.chars();
    chars.next();
    format!("{left}{}", chars.as_str())
}

/// The run of word characters (alphanumeric or `_`) that ends at the end of `text`
pub fn trailing_word(text: &str) -> &str {
    let start = text
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_alphanumeric() || *c == '_')
        .last()
        .map_or(text.len(), |(index, _)| index);
    &text[start..]
}
