mod basic;
mod noop;

pub use basic::{styler, BasicHighlighter, HighlightRules, Matchers, Styler, Stylers};
pub use noop::NoopHighlighter;

/// The highlighting trait. Implementers take the contents of one buffer line and return
/// it with ANSI styling added. Only what gets painted is affected, the buffer keeps the
/// plain text.
pub trait Highlighter: Send {
    /// Styled rendition of `line`
    fn highlight(&self, line: &str) -> String;
}

impl<F> Highlighter for F
where
    F: Fn(&str) -> String + Send,
{
    fn highlight(&self, line: &str) -> String {
        self(line)
    }
}
