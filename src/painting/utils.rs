use std::borrow::Cow;
use unicode_width::UnicodeWidthStr;

/// Ensures input uses CRLF line endings.
///
/// Needed for correct output in raw mode.
/// Only replaces solitary LF with CRLF.
pub(crate) fn coerce_crlf(input: &str) -> Cow<'_, str> {
    if !input.contains('\n') {
        return Cow::Borrowed(input);
    }
    let mut result = String::with_capacity(input.len() + 1);
    let mut previous = None;
    for c in input.chars() {
        if c == '\n' && previous != Some('\r') {
            result.push('\r');
        }
        result.push(c);
        previous = Some(c);
    }
    if result.len() == input.len() {
        Cow::Borrowed(input)
    } else {
        Cow::Owned(result)
    }
}

/// Returns string with the ANSI escape codes removed
///
/// If parsing fails silently returns the input string
pub(crate) fn strip_ansi(string: &str) -> String {
    String::from_utf8(strip_ansi_escapes::strip(string)).unwrap_or_else(|_| string.to_owned())
}

/// Compute the line width for ANSI escaped text
pub(crate) fn line_width(line: &str) -> usize {
    strip_ansi(line).width()
}

/// Terminal coordinates are `u16`, saturate anything larger
pub(crate) fn to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}
