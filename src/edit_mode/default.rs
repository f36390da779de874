use {
    super::{
        keymap::{handler, Handler, KeyMap},
        keyspec::{KeySpec, Keys, Matcher},
    },
    crate::{
        input_parsing::NamedKey,
        utils::text_manipulation::{char_len, insert_str_at, remove_char_at, split_at_column},
        EditContext, EditResult,
    },
    regex::Regex,
    std::sync::Arc,
};

/// Printable characters and spaces, one or more of them
const PRINTABLE: &str = r"^[\p{L}\p{M}\p{N}\p{P}\p{S}\p{Zs}]+$";

/// Builder for the conventional editing bindings.
///
/// ```rust
/// use keyline::{DefaultKeyMap, KeySpec};
///
/// let keymap = DefaultKeyMap::new(5)
///     .with_end_keys(KeySpec::ctrl('s'))
///     .with_end_linebreak(false)
///     .build();
/// assert!(!keymap.is_empty());
/// ```
#[derive(Clone)]
pub struct DefaultKeyMap {
    max_lines: usize,
    valid: KeySpec,
    exclusions: Vec<KeySpec>,
    end_keys: Keys,
    end_linebreak: bool,
    completion: Option<Handler>,
    completion_keys: Keys,
}

impl DefaultKeyMap {
    /// Bindings for a buffer of at most `max_lines` lines, `1` for single-line input
    pub fn new(max_lines: usize) -> Self {
        let max_lines = max_lines.max(1);
        let end_keys = if max_lines > 1 {
            Keys::from(KeySpec::ctrl('d'))
        } else {
            Keys::from([NamedKey::Return, NamedKey::Enter])
        };
        Self {
            max_lines,
            valid: default_valid(),
            exclusions: Vec::new(),
            end_keys,
            end_linebreak: max_lines > 1,
            completion: None,
            completion_keys: Keys::from(NamedKey::Tab),
        }
    }

    /// Keys whose sequence gets inserted into the line
    #[must_use]
    pub fn with_valid(mut self, valid: impl Into<KeySpec>) -> Self {
        self.valid = valid.into();
        self
    }

    /// Keys that are never inserted even though they are valid
    #[must_use]
    pub fn with_exclusions(mut self, exclusions: impl Into<Keys>) -> Self {
        self.exclusions = exclusions.into().0;
        self
    }

    /// Keys finishing the session
    #[must_use]
    pub fn with_end_keys(mut self, end_keys: impl Into<Keys>) -> Self {
        self.end_keys = end_keys.into();
        self
    }

    /// Whether a trailing empty line is appended when the session ends
    #[must_use]
    pub fn with_end_linebreak(mut self, end_linebreak: bool) -> Self {
        self.end_linebreak = end_linebreak;
        self
    }

    /// Completion handler, see [`advanced_completion`](crate::advanced_completion) and
    /// [`basic_completion`](crate::basic_completion)
    #[must_use]
    pub fn with_completion(mut self, completion: Handler) -> Self {
        self.completion = Some(completion);
        self
    }

    /// Keys triggering the completion handler, `tab` by default
    #[must_use]
    pub fn with_completion_keys(mut self, keys: impl Into<Keys>) -> Self {
        self.completion_keys = keys.into();
        self
    }

    /// Assemble the [`KeyMap`]. Insertion is registered first so every other binding
    /// takes precedence over it.
    pub fn build(self) -> KeyMap {
        let mut keymap = KeyMap::new();

        let exclusions = Arc::new(self.exclusions);
        keymap.add_binding(self.valid, handler(move |ctx| insert(ctx, &exclusions)));

        keymap.add_handler(NamedKey::Left, |ctx| {
            EditResult::none().with_column(ctx.column.saturating_sub(1))
        });
        keymap.add_handler(NamedKey::Right, |ctx| {
            EditResult::none().with_column(ctx.column + 1)
        });
        keymap.add_handler(NamedKey::Home, |_| EditResult::none().with_column(0));
        keymap.add_handler(NamedKey::End, |ctx| {
            EditResult::none().with_column(char_len(ctx.line))
        });

        if self.max_lines > 1 {
            keymap.add_handler(NamedKey::Up, |ctx| {
                EditResult::none().with_row(ctx.row.saturating_sub(1))
            });
            keymap.add_handler(NamedKey::Down, |ctx| EditResult::none().with_row(ctx.row + 1));
            let max_lines = self.max_lines;
            keymap.add_handler([NamedKey::Return, NamedKey::Enter], move |ctx| {
                line_break(ctx, max_lines)
            });
        }

        if let Some(completion) = self.completion {
            keymap.add_binding(self.completion_keys, completion);
        }

        keymap.add_handler(NamedKey::Backspace, backspace);
        keymap.add_handler(NamedKey::Delete, delete);

        let end_linebreak = self.end_linebreak;
        keymap.add_handler(self.end_keys, move |ctx| terminate(ctx, end_linebreak));

        keymap
    }
}

/// The default bindings for `max_lines`
pub fn default_keymap(max_lines: usize) -> KeyMap {
    DefaultKeyMap::new(max_lines).build()
}

fn default_valid() -> KeySpec {
    let mut valid = KeySpec::any().with_ctrl(false).with_meta(false);
    if let Ok(printable) = Regex::new(PRINTABLE) {
        valid.sequence = Some(Matcher::Pattern(printable));
    }
    valid
}

fn insert(ctx: &mut EditContext<'_>, exclusions: &[KeySpec]) -> EditResult {
    if exclusions.iter().any(|spec| spec.matches(ctx.key)) {
        return EditResult::none();
    }
    let text = &ctx.key.sequence;
    EditResult::line(insert_str_at(ctx.line, ctx.column, text))
        .with_column(ctx.column + char_len(text))
}

fn line_break(ctx: &mut EditContext<'_>, max_lines: usize) -> EditResult {
    if ctx.lines.len() >= max_lines {
        return EditResult::none();
    }
    let (left, right) = split_at_column(ctx.line, ctx.column);
    let mut lines = ctx.lines.to_vec();
    lines[ctx.row] = left.to_string();
    lines.insert(ctx.row + 1, right.to_string());
    EditResult::buffer(lines).with_row(ctx.row + 1).with_column(0)
}

fn backspace(ctx: &mut EditContext<'_>) -> EditResult {
    if ctx.column > 0 {
        return EditResult::line(remove_char_at(ctx.line, ctx.column - 1))
            .with_column(ctx.column - 1);
    }
    if ctx.row == 0 {
        return EditResult::none();
    }
    let mut lines = ctx.lines.to_vec();
    let line = lines.remove(ctx.row);
    let previous = &mut lines[ctx.row - 1];
    let column = char_len(previous);
    previous.push_str(&line);
    EditResult::buffer(lines)
        .with_row(ctx.row - 1)
        .with_column(column)
}

fn delete(ctx: &mut EditContext<'_>) -> EditResult {
    if ctx.column < char_len(ctx.line) {
        return EditResult::line(remove_char_at(ctx.line, ctx.column));
    }
    if ctx.row + 1 >= ctx.lines.len() {
        return EditResult::none();
    }
    let mut lines = ctx.lines.to_vec();
    let next = lines.remove(ctx.row + 1);
    lines[ctx.row].push_str(&next);
    EditResult::buffer(lines).with_column(ctx.column)
}

fn terminate(ctx: &mut EditContext<'_>, end_linebreak: bool) -> EditResult {
    if !end_linebreak {
        return EditResult::none().end_input();
    }
    let mut lines = ctx.lines.to_vec();
    lines.push(String::new());
    let row = lines.len() - 1;
    EditResult::buffer(lines)
        .with_row(row)
        .with_column(0)
        .end_input()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{core_editor::SessionState, Edit, KeyPress};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn press(keymap: &KeyMap, lines: &[&str], row: usize, column: usize, key: KeyPress) -> EditResult {
        let lines: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        let mut state = SessionState::default();
        let mut ctx = EditContext {
            line: &lines[row],
            lines: &lines,
            column,
            row,
            key: &key,
            state: &mut state,
        };
        keymap.flatten().resolve(&mut ctx).unwrap_or_default()
    }

    fn buffer(lines: &[&str]) -> Edit {
        Edit::Buffer(lines.iter().map(|l| l.to_string()).collect())
    }

    #[rstest]
    #[case(KeyPress::char('x'), "abxc", 3)]
    #[case(KeyPress::char('Ä'), "abÄc", 3)]
    #[case(KeyPress::char(' '), "ab c", 3)]
    #[case(KeyPress::new("", "日本"), "ab日本c", 4)]
    fn inserts_at_cursor(#[case] key: KeyPress, #[case] line: &str, #[case] column: usize) {
        let result = press(&default_keymap(1), &["abc"], 0, 2, key);

        assert_eq!(result, EditResult::line(line.into()).with_column(column));
    }

    #[rstest]
    #[case(KeyPress::ctrl('a'))]
    #[case(KeyPress::char('a').with_meta())]
    #[case(KeyPress::named(NamedKey::Tab))]
    #[case(KeyPress::named(NamedKey::Escape))]
    fn control_keys_are_not_inserted(#[case] key: KeyPress) {
        let result = press(&default_keymap(1), &["abc"], 0, 1, key);

        assert!(result.is_noop());
    }

    #[test]
    fn exclusions_suppress_insertion() {
        let keymap = DefaultKeyMap::new(1).with_exclusions(["q"]).build();

        assert!(press(&keymap, &[""], 0, 0, KeyPress::char('q')).is_noop());
        assert!(!press(&keymap, &[""], 0, 0, KeyPress::char('r')).is_noop());
    }

    #[rstest]
    #[case(NamedKey::Left, 2, 1)]
    #[case(NamedKey::Left, 0, 0)]
    #[case(NamedKey::Right, 2, 3)]
    #[case(NamedKey::Home, 2, 0)]
    #[case(NamedKey::End, 1, 3)]
    fn horizontal_navigation(#[case] key: NamedKey, #[case] column: usize, #[case] expected: usize) {
        let result = press(&default_keymap(1), &["abc"], 0, column, KeyPress::named(key));

        assert_eq!(result, EditResult::none().with_column(expected));
    }

    #[test]
    fn vertical_navigation_only_in_multi_line_mode() {
        let single = press(&default_keymap(1), &["a"], 0, 0, KeyPress::named(NamedKey::Up));
        assert!(single.is_noop());

        let keymap = default_keymap(3);
        let up = press(&keymap, &["a", "b"], 1, 0, KeyPress::named(NamedKey::Up));
        assert_eq!(up, EditResult::none().with_row(0));
        let down = press(&keymap, &["a", "b"], 0, 0, KeyPress::named(NamedKey::Down));
        assert_eq!(down, EditResult::none().with_row(1));
    }

    #[test]
    fn return_ends_single_line_input() {
        let result = press(&default_keymap(1), &["abc"], 0, 1, KeyPress::named(NamedKey::Return));

        assert_eq!(result, EditResult::none().end_input());
    }

    #[test]
    fn return_splits_line_in_multi_line_mode() {
        let result = press(&default_keymap(3), &["hello"], 0, 2, KeyPress::named(NamedKey::Enter));

        assert_eq!(result.edit, buffer(&["he", "llo"]));
        assert_eq!((result.row, result.column), (Some(1), Some(0)));
        assert!(!result.end_input);
    }

    #[test]
    fn line_break_is_noop_at_max_lines() {
        let result = press(&default_keymap(2), &["a", "b"], 1, 1, KeyPress::named(NamedKey::Return));

        assert!(result.is_noop());
    }

    #[test]
    fn backspace_deletes_left_of_cursor() {
        let result = press(&default_keymap(1), &["nönä"], 0, 2, KeyPress::named(NamedKey::Backspace));

        assert_eq!(result, EditResult::line("nnä".into()).with_column(1));
    }

    #[test]
    fn backspace_at_start_of_buffer_is_noop() {
        let result = press(&default_keymap(3), &["abc"], 0, 0, KeyPress::named(NamedKey::Backspace));

        assert!(result.is_noop());
    }

    #[test]
    fn backspace_at_line_start_merges_upward() {
        let result = press(&default_keymap(3), &["ab", "cd"], 1, 0, KeyPress::named(NamedKey::Backspace));

        assert_eq!(result.edit, buffer(&["abcd"]));
        assert_eq!((result.row, result.column), (Some(0), Some(2)));
    }

    #[test]
    fn delete_removes_char_under_cursor() {
        let result = press(&default_keymap(1), &["abc"], 0, 1, KeyPress::named(NamedKey::Delete));

        assert_eq!(result, EditResult::line("ac".into()));
    }

    #[test]
    fn delete_at_line_end_merges_next_line() {
        let result = press(&default_keymap(3), &["ab", "cd"], 0, 2, KeyPress::named(NamedKey::Delete));

        assert_eq!(result.edit, buffer(&["abcd"]));
        assert_eq!(result.column, Some(2));
    }

    #[test]
    fn delete_at_end_of_buffer_is_noop() {
        let result = press(&default_keymap(3), &["ab", "cd"], 1, 2, KeyPress::named(NamedKey::Delete));

        assert!(result.is_noop());
    }

    #[test]
    fn ctrl_d_ends_multi_line_input_with_linebreak() {
        let result = press(&default_keymap(3), &["a", "b"], 0, 1, KeyPress::ctrl('d'));

        assert_eq!(result.edit, buffer(&["a", "b", ""]));
        assert!(result.end_input);
    }

    #[test]
    fn end_linebreak_can_be_disabled() {
        let keymap = DefaultKeyMap::new(3).with_end_linebreak(false).build();
        let result = press(&keymap, &["a"], 0, 1, KeyPress::ctrl('d'));

        assert_eq!(result, EditResult::none().end_input());
    }

    #[test]
    fn custom_end_keys_replace_defaults() {
        let keymap = DefaultKeyMap::new(1).with_end_keys(KeySpec::ctrl('s')).build();

        assert!(press(&keymap, &[""], 0, 0, KeyPress::ctrl('s')).end_input);
        assert!(!press(&keymap, &[""], 0, 0, KeyPress::named(NamedKey::Return)).end_input);
    }

    #[test]
    fn completion_is_bound_to_tab() {
        let keymap = DefaultKeyMap::new(1)
            .with_completion(handler(|_| EditResult::line("done".into())))
            .build();
        let result = press(&keymap, &["d"], 0, 1, KeyPress::named(NamedKey::Tab));

        assert_eq!(result.edit, Edit::Line("done".into()));
    }
}
