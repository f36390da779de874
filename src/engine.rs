use {
    crate::{
        core_editor::Editor,
        edit_mode::{default_keymap, FlatKeyMap, KeyMap},
        highlighter::{Highlighter, NoopHighlighter},
        input_parsing::{CrosstermSource, KeyPress, KeySource},
        painting::Painter,
        result::{KeylineError, KeylineErrorVariants},
        terminal_extensions::RawModeGuard,
        Edit, EditResult, Result,
    },
    std::io::{stdout, BufWriter, Write},
};

/// Line editor engine
///
/// ## Example usage
/// ```no_run
/// use keyline::{default_keymap, Keyline};
///
/// let answer = Keyline::create()
///     .with_keymap(default_keymap(1))
///     .with_prefix("name: ")
///     .read_line()?;
/// println!("\nHello {answer}");
/// # Ok::<(), keyline::KeylineError>(())
/// ```
///
/// Sessions can also run against any [`KeySource`] and writer, e.g. for tests:
///
/// ```rust
/// use keyline::{Keyline, ScriptedSource};
///
/// let mut keys = ScriptedSource::new("Tea\x7fst\r");
/// let mut output = Vec::new();
/// let line = Keyline::create()
///     .with_raw_mode(false)
///     .read_input(&mut keys, &mut output)?;
/// assert_eq!(line, "Test");
/// # Ok::<(), keyline::KeylineError>(())
/// ```
pub struct Keyline {
    keymap: KeyMap,
    highlighter: Box<dyn Highlighter>,
    prefix: String,
    raw_mode: bool,
}

impl Default for Keyline {
    fn default() -> Self {
        Self::create()
    }
}

impl Keyline {
    /// Single-line editor with the default bindings, no highlighting and no prefix
    pub fn create() -> Self {
        Keyline {
            keymap: default_keymap(1),
            highlighter: Box::new(NoopHighlighter),
            prefix: String::new(),
            raw_mode: true,
        }
    }

    /// Bindings driving the session
    #[must_use]
    pub fn with_keymap(mut self, keymap: KeyMap) -> Self {
        self.keymap = keymap;
        self
    }

    /// Styling applied to every painted line
    #[must_use]
    pub fn with_highlighter(mut self, highlighter: Box<dyn Highlighter>) -> Self {
        self.highlighter = highlighter;
        self
    }

    /// Text painted in front of every line
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Whether to switch the terminal into raw mode for the session. Requires the key
    /// source to be an interactive terminal.
    #[must_use]
    pub fn with_raw_mode(mut self, raw_mode: bool) -> Self {
        self.raw_mode = raw_mode;
        self
    }

    /// Read from the terminal until a binding ends the session
    pub fn read_line(&self) -> Result<String> {
        let mut source = CrosstermSource;
        self.read_input(&mut source, BufWriter::new(stdout()))
    }

    /// Run a session reading keys from `source` and painting to `writer`.
    ///
    /// Returns the buffer joined with `\n` once a binding ends the session.
    pub fn read_input<S, W>(&self, source: &mut S, writer: W) -> Result<String>
    where
        S: KeySource + ?Sized,
        W: Write,
    {
        if self.raw_mode && !source.is_terminal() {
            return Err(KeylineError(KeylineErrorVariants::NotATerminal));
        }

        let mut raw_mode = RawModeGuard::new(self.raw_mode);
        raw_mode.enter()?;
        let result = self.read_input_helper(source, Painter::new(writer, &self.prefix));
        raw_mode.exit();

        result
    }

    /// Helper implementing the logic for [`Keyline::read_input()`] to be wrapped
    /// in a `raw_mode` context.
    fn read_input_helper<S, W>(&self, source: &mut S, mut painter: Painter<W>) -> Result<String>
    where
        S: KeySource + ?Sized,
        W: Write,
    {
        let keymap = self.keymap.flatten();
        let mut editor = Editor::default();
        log::debug!("session started with {} bindings", keymap.len());

        painter.queue_prefix()?;
        loop {
            painter.flush()?;
            let keys = source.read_keys()?;
            if keys.is_empty() {
                log::debug!("key source closed before the session ended");
                return Err(KeylineError(KeylineErrorVariants::UnexpectedEndOfInput));
            }

            for key in &keys {
                if self.handle_key(&keymap, &mut editor, &mut painter, key)? {
                    painter.flush()?;
                    log::debug!("session ended after {} keys", editor.state().counter);
                    return Ok(editor.joined());
                }
            }
        }
    }

    /// Dispatch one key press and apply the winning result.
    ///
    /// Returns true if the session has to end.
    fn handle_key<W: Write>(
        &self,
        keymap: &FlatKeyMap,
        editor: &mut Editor,
        painter: &mut Painter<W>,
        key: &KeyPress,
    ) -> Result<bool> {
        let result = match keymap.resolve(&mut editor.begin_key(key)) {
            Some(result) => result,
            None => {
                log::trace!("unbound key {key:?}");
                return Ok(false);
            }
        };
        log::trace!("key {key:?} resolved to {result:?}");

        let EditResult {
            edit,
            column,
            row,
            end_input,
        } = result;
        let highlighter = self.highlighter.as_ref();
        let mut painted_width = editor.column_width();

        let line = match edit {
            Edit::Buffer(lines) => {
                let previous_row = editor.row();
                editor.replace_lines(lines);
                painted_width = editor.column_width();
                painter.repaint_buffer(
                    editor.lines(),
                    previous_row,
                    editor.row(),
                    painted_width,
                    highlighter,
                )?;
                None
            }
            Edit::Line(line) => Some(line),
            Edit::Unchanged => None,
        };

        if let Some(row) = row {
            if let Some(previous_row) = editor.set_row(row) {
                painter.move_rows(previous_row, editor.row())?;
                editor.clamp_column();
            }
        }

        if let Some(line) = line {
            editor.replace_line(line);
            painter.repaint_line(editor.line(), highlighter)?;
        }

        if let Some(column) = column {
            editor.set_column(column);
        }
        let width = editor.column_width();
        if width != painted_width {
            painter.move_to_column(width)?;
        }

        Ok(end_input)
    }
}
