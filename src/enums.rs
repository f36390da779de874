/// Buffer mutation requested by a key handler
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Edit {
    /// Replace every line. Used for structural edits that change the line count
    /// and triggers a repaint of the whole block.
    Buffer(Vec<String>),
    /// Replace only the line under the cursor, repainting just that line
    Line(String),
    /// Leave the buffer alone
    #[default]
    Unchanged,
}

/// Everything a handler wants to happen in response to one key press.
///
/// Out of range cursor positions are clamped when the result gets applied, so handlers
/// may freely overshoot (e.g. `column + 1` at the end of a line).
///
/// ```rust
/// use keyline::{Edit, EditResult};
///
/// let result = EditResult::line("hello".into()).with_column(5).end_input();
/// assert_eq!(result.edit, Edit::Line("hello".into()));
/// assert!(result.end_input);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditResult {
    /// Buffer mutation
    pub edit: Edit,
    /// New cursor column, in characters
    pub column: Option<usize>,
    /// New cursor row
    pub row: Option<usize>,
    /// Finish the session and return the buffer
    pub end_input: bool,
}

impl EditResult {
    /// A result that changes nothing
    pub fn none() -> Self {
        Self::default()
    }

    /// Replace all lines
    pub fn buffer(lines: Vec<String>) -> Self {
        Self {
            edit: Edit::Buffer(lines),
            ..Self::default()
        }
    }

    /// Replace the current line
    pub fn line(line: String) -> Self {
        Self {
            edit: Edit::Line(line),
            ..Self::default()
        }
    }

    /// Move the cursor to `column`
    #[must_use]
    pub fn with_column(mut self, column: usize) -> Self {
        self.column = Some(column);
        self
    }

    /// Move the cursor to `row`
    #[must_use]
    pub fn with_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }

    /// Terminate the session after applying this result
    #[must_use]
    pub fn end_input(mut self) -> Self {
        self.end_input = true;
        self
    }

    /// Whether applying this result would have no effect at all
    pub fn is_noop(&self) -> bool {
        self.edit == Edit::Unchanged && self.column.is_none() && self.row.is_none() && !self.end_input
    }
}
