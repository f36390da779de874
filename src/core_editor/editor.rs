use {
    super::SessionState,
    crate::{
        utils::text_manipulation::{byte_index, char_len},
        EditContext, KeyPress,
    },
    unicode_width::UnicodeWidthStr,
};

/// Buffer, cursor and session state of one editing session.
///
/// Maintains `row < lines.len()` and `column <= chars in lines[row]`; every mutation goes
/// through a method that re-establishes both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editor {
    lines: Vec<String>,
    column: usize,
    row: usize,
    state: SessionState,
}

impl Default for Editor {
    fn default() -> Self {
        Editor {
            lines: vec![String::new()],
            column: 0,
            row: 0,
            state: SessionState::default(),
        }
    }
}

impl Editor {
    /// All lines of the buffer, never empty
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The line under the cursor
    pub fn line(&self) -> &str {
        &self.lines[self.row]
    }

    /// Cursor column in characters
    pub fn column(&self) -> usize {
        self.column
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Display width of the text left of the cursor
    pub fn column_width(&self) -> usize {
        let line = self.line();
        line[..byte_index(line, self.column)].width()
    }

    /// Count a new key press and build the view handed to the key map
    pub fn begin_key<'a>(&'a mut self, key: &'a KeyPress) -> EditContext<'a> {
        self.state.counter += 1;
        EditContext {
            line: &self.lines[self.row],
            lines: &self.lines,
            column: self.column,
            row: self.row,
            key,
            state: &mut self.state,
        }
    }

    /// Replace the whole buffer, clamping the cursor into it
    pub fn replace_lines(&mut self, lines: Vec<String>) {
        self.lines = if lines.is_empty() {
            vec![String::new()]
        } else {
            lines
        };
        self.row = self.row.min(self.lines.len() - 1);
        self.clamp_column();
    }

    /// Replace the line under the cursor. Returns true if the column had to be clamped.
    pub fn replace_line(&mut self, line: String) -> bool {
        self.lines[self.row] = line;
        self.clamp_column()
    }

    /// Move to `row`, clamped. Returns the previous row if the cursor moved.
    pub fn set_row(&mut self, row: usize) -> Option<usize> {
        let row = row.min(self.lines.len() - 1);
        if row == self.row {
            return None;
        }
        let previous = self.row;
        self.row = row;
        Some(previous)
    }

    /// Move to `column`, clamped. Returns true if the cursor moved.
    pub fn set_column(&mut self, column: usize) -> bool {
        let column = column.min(char_len(self.line()));
        let moved = column != self.column;
        self.column = column;
        moved
    }

    /// Pull the column back onto the current line. Returns true if it changed.
    pub fn clamp_column(&mut self) -> bool {
        self.set_column(self.column)
    }

    /// Buffer content as returned from a finished session
    pub fn joined(&self) -> String {
        self.lines.join("\n")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn editor_with(lines: &[&str], row: usize, column: usize) -> Editor {
        let mut editor = Editor::default();
        editor.replace_lines(lines.iter().map(|l| l.to_string()).collect());
        editor.set_row(row);
        editor.set_column(column);
        editor
    }

    #[test]
    fn new_editor_has_one_empty_line() {
        let editor = Editor::default();

        assert_eq!(editor.lines(), &[String::new()]);
        assert_eq!((editor.column(), editor.row()), (0, 0));
        assert_eq!(editor.state().counter, 0);
    }

    #[test]
    fn replacing_with_nothing_keeps_one_line() {
        let mut editor = editor_with(&["abc"], 0, 3);
        editor.replace_lines(vec![]);

        assert_eq!(editor.lines(), &[String::new()]);
        assert_eq!(editor.column(), 0);
    }

    #[test]
    fn shrinking_buffer_clamps_row_and_column() {
        let mut editor = editor_with(&["short", "a much longer line"], 1, 10);
        editor.replace_lines(vec!["short".into()]);

        assert_eq!((editor.column(), editor.row()), (5, 0));
    }

    #[test]
    fn row_moves_are_clamped() {
        let mut editor = editor_with(&["a", "b"], 0, 0);

        assert_eq!(editor.set_row(7), Some(0));
        assert_eq!(editor.row(), 1);
        assert_eq!(editor.set_row(1), None);
    }

    #[test]
    fn column_counts_characters() {
        let mut editor = editor_with(&["nönä"], 0, 0);

        assert!(editor.set_column(99));
        assert_eq!(editor.column(), 4);
        assert!(!editor.set_column(4));
    }

    #[test]
    fn column_width_accounts_for_wide_characters() {
        let editor = editor_with(&["日本語"], 0, 2);

        assert_eq!(editor.column_width(), 4);
    }

    #[test]
    fn begin_key_counts_presses() {
        let mut editor = Editor::default();
        let key = KeyPress::char('a');
        let context = editor.begin_key(&key);
        assert_eq!(context.state.counter, 1);

        let context = editor.begin_key(&key);
        assert_eq!(context.state.counter, 2);
    }

    #[test]
    fn joined_uses_line_feeds() {
        let editor = editor_with(&["Hi", "there", ""], 0, 0);

        assert_eq!(editor.joined(), "Hi\nthere\n");
    }
}
