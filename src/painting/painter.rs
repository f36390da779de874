use {
    super::utils::{coerce_crlf, line_width, to_u16},
    crate::Highlighter,
    crossterm::{
        cursor::{MoveDown, MoveToColumn, MoveUp, RestorePosition, SavePosition},
        style::Print,
        terminal::{Clear, ClearType},
        QueueableCommand,
    },
    itertools::Itertools,
    std::io::{Result, Write},
};

/// Implementation of the output to the terminal.
///
/// Assumes the cursor sits inside the block of rendered lines and only ever emits the
/// relative moves needed to reproduce a change. Every line is painted after the prefix.
pub struct Painter<W: Write> {
    writer: W,
    prefix: String,
    prefix_width: usize,
}

impl<W: Write> Painter<W> {
    pub fn new(writer: W, prefix: &str) -> Self {
        Painter {
            writer,
            prefix: prefix.to_string(),
            prefix_width: line_width(prefix),
        }
    }

    /// Write the prefix in front of the first, still empty line
    pub fn queue_prefix(&mut self) -> Result<()> {
        if !self.prefix.is_empty() {
            self.writer.queue(Print(&self.prefix))?;
        }
        Ok(())
    }

    /// Redraw the whole block after a structural edit.
    ///
    /// `previous_row` is where the terminal cursor is now, `row` and `column_width` where it
    /// ends up.
    pub fn repaint_buffer(
        &mut self,
        lines: &[String],
        previous_row: usize,
        row: usize,
        column_width: usize,
        highlighter: &dyn Highlighter,
    ) -> Result<()> {
        if previous_row > 0 {
            self.writer.queue(MoveUp(to_u16(previous_row)))?;
        }
        let block = lines
            .iter()
            .map(|line| format!("{}{}", self.prefix, highlighter.highlight(line)))
            .join("\n");
        self.writer
            .queue(MoveToColumn(0))?
            .queue(Clear(ClearType::FromCursorDown))?
            .queue(SavePosition)?
            .queue(Print(coerce_crlf(&block)))?
            .queue(RestorePosition)?;
        self.move_to_column(column_width)?;
        if row > 0 {
            self.writer.queue(MoveDown(to_u16(row)))?;
        }
        Ok(())
    }

    /// Redraw the line under the cursor, leaving the cursor where it was
    pub fn repaint_line(&mut self, line: &str, highlighter: &dyn Highlighter) -> Result<()> {
        self.writer
            .queue(SavePosition)?
            .queue(MoveToColumn(0))?
            .queue(Clear(ClearType::CurrentLine))?
            .queue(Print(&self.prefix))?
            .queue(Print(coerce_crlf(&highlighter.highlight(line))))?
            .queue(RestorePosition)?;
        Ok(())
    }

    /// Move the cursor vertically from row `from` to row `to`
    pub fn move_rows(&mut self, from: usize, to: usize) -> Result<()> {
        if to < from {
            self.writer.queue(MoveUp(to_u16(from - to)))?;
        } else if to > from {
            self.writer.queue(MoveDown(to_u16(to - from)))?;
        }
        Ok(())
    }

    /// Move the cursor behind the prefix plus `column_width` cells of text
    pub fn move_to_column(&mut self, column_width: usize) -> Result<()> {
        self.writer
            .queue(MoveToColumn(to_u16(self.prefix_width + column_width)))?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::NoopHighlighter;
    use pretty_assertions::assert_eq;

    fn output<F>(prefix: &str, paint: F) -> String
    where
        F: FnOnce(&mut Painter<Vec<u8>>) -> Result<()>,
    {
        let mut painter = Painter::new(Vec::new(), prefix);
        paint(&mut painter).unwrap();
        String::from_utf8(painter.into_inner()).unwrap()
    }

    fn lines(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn prefix_is_written_once() {
        assert_eq!(output("> ", |p| p.queue_prefix()), "> ");
        assert_eq!(output("", |p| p.queue_prefix()), "");
    }

    #[test]
    fn column_moves_account_for_prefix() {
        assert_eq!(output("> ", |p| p.move_to_column(3)), "\x1b[6G");
        assert_eq!(output("", |p| p.move_to_column(0)), "\x1b[1G");
    }

    #[test]
    fn row_moves_are_relative() {
        assert_eq!(output("", |p| p.move_rows(2, 0)), "\x1b[2A");
        assert_eq!(output("", |p| p.move_rows(0, 1)), "\x1b[1B");
        assert_eq!(output("", |p| p.move_rows(1, 1)), "");
    }

    #[test]
    fn line_repaint_clears_and_restores() {
        let out = output("> ", |p| p.repaint_line("abc", &NoopHighlighter));

        assert!(out.contains("\x1b[1G\x1b[2K> abc"));
        assert!(!out.contains("\x1b[J"));
    }

    #[test]
    fn buffer_repaint_returns_to_cursor() {
        let out = output("", |p| {
            p.repaint_buffer(&lines(&["ab", "cd", "ef"]), 1, 2, 1, &NoopHighlighter)
        });

        assert!(out.starts_with("\x1b[1A\x1b[1G\x1b[J"));
        assert!(out.contains("ab\r\ncd\r\nef"));
        assert!(out.ends_with("\x1b[2G\x1b[2B"));
    }

    #[test]
    fn buffer_repaint_from_first_row_does_not_move_up() {
        let out = output("> ", |p| p.repaint_buffer(&lines(&["a", ""]), 0, 0, 1, &NoopHighlighter));

        assert!(out.starts_with("\x1b[1G\x1b[J"));
        assert!(out.contains("> a\r\n> "));
        assert!(out.ends_with("\x1b[4G"));
    }

    #[test]
    fn highlighter_only_changes_output() {
        let shout = |line: &str| line.to_uppercase();
        let out = output("", |p| p.repaint_line("abc", &shout));

        assert!(out.contains("ABC"));
    }
}
