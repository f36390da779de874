use {
    crate::{
        core_editor::CompletionRecord,
        edit_mode::handler,
        utils::text_manipulation::{char_len, split_at_column, trailing_word},
        Completer, EditContext, EditResult, Handler,
    },
    std::sync::Arc,
};

/// Word characters immediately left of `column`
pub fn last_word(line: &str, column: usize) -> &str {
    trailing_word(split_at_column(line, column).0)
}

/// Handler cycling through the candidates of `completer`.
///
/// The first press completes the word left of the cursor with the first candidate. Each
/// press directly following a completion restores the line as it was before the first
/// one and inserts the next candidate, wrapping around at the end of the list. Any other
/// key in between starts a new cycle.
pub fn advanced_completion(completer: impl Completer + 'static) -> Handler {
    let completer = Arc::new(completer);
    handler(move |ctx| complete(&*completer, ctx))
}

fn complete(completer: &dyn Completer, ctx: &mut EditContext<'_>) -> EditResult {
    let (line, column, word, index) = match ctx
        .state
        .continued_completion()
        .filter(is_consistent)
    {
        Some(record) => (record.line, record.column, record.last_word, record.index + 1),
        None => (
            ctx.line.to_string(),
            ctx.column,
            last_word(ctx.line, ctx.column).to_string(),
            0,
        ),
    };

    let (left, right) = split_at_column(&line, column);
    let candidates = completer.complete(left, &word);
    if candidates.is_empty() {
        return EditResult::none();
    }
    let index = index % candidates.len();
    let candidate = &candidates[index];

    let stem = &left[..left.len() - word.len()];
    let completed = format!("{stem}{candidate}{right}");
    let new_column = column - char_len(&word) + char_len(candidate);

    ctx.state.last_completion = Some(CompletionRecord {
        counter: ctx.state.counter,
        last_word: word,
        line,
        column,
        index,
    });

    EditResult::line(completed).with_column(new_column)
}

/// A record can only be continued if its word ends the text left of its column
fn is_consistent(record: &CompletionRecord) -> bool {
    record.column <= char_len(&record.line)
        && split_at_column(&record.line, record.column)
            .0
            .ends_with(&record.last_word)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{core_editor::SessionState, Edit, KeyPress};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    struct Session {
        line: String,
        column: usize,
        state: SessionState,
    }

    impl Session {
        fn new(line: &str) -> Self {
            Self {
                line: line.into(),
                column: char_len(line),
                state: SessionState::default(),
            }
        }

        fn press(&mut self, handler: &Handler) -> EditResult {
            self.state.counter += 1;
            let lines = vec![self.line.clone()];
            let key = KeyPress::named(crate::NamedKey::Tab);
            let mut ctx = EditContext {
                line: &lines[0],
                lines: &lines,
                column: self.column,
                row: 0,
                key: &key,
                state: &mut self.state,
            };
            let result = handler(&mut ctx);
            if let Edit::Line(line) = &result.edit {
                self.line = line.clone();
            }
            if let Some(column) = result.column {
                self.column = column;
            }
            result
        }

        fn other_key(&mut self) {
            self.state.counter += 1;
        }
    }

    fn words(list: &'static [&'static str]) -> impl Completer {
        move |_: &str, word: &str| {
            list.iter()
                .filter(|w| w.starts_with(word))
                .map(|w| w.to_string())
                .collect()
        }
    }

    #[rstest]
    #[case("he", 2, "he")]
    #[case("say he", 6, "he")]
    #[case("say he", 3, "say")]
    #[case("a-b", 3, "b")]
    #[case("a ", 2, "")]
    fn last_word_touches_cursor(#[case] line: &str, #[case] column: usize, #[case] expected: &str) {
        assert_eq!(last_word(line, column), expected);
    }

    #[test]
    fn repeated_presses_cycle() {
        let handler = advanced_completion(words(&["hello", "hell"]));
        let mut session = Session::new("he");

        session.press(&handler);
        assert_eq!((session.line.as_str(), session.column), ("hello", 5));
        session.press(&handler);
        assert_eq!((session.line.as_str(), session.column), ("hell", 4));
        session.press(&handler);
        assert_eq!((session.line.as_str(), session.column), ("hello", 5));
    }

    #[test]
    fn cycle_uses_recorded_line() {
        let calls = Arc::new(std::sync::Mutex::new(Vec::new()));
        let seen = calls.clone();
        let handler = advanced_completion(move |line: &str, word: &str| {
            if let Ok(mut seen) = seen.lock() {
                seen.push((line.to_string(), word.to_string()));
            }
            vec!["hello".to_string(), "hell".to_string()]
        });
        let mut session = Session::new("he");

        session.press(&handler);
        session.press(&handler);

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert!(calls.iter().all(|(line, word)| line == "he" && word == "he"));
    }

    #[test]
    fn other_key_restarts_cycle() {
        let handler = advanced_completion(words(&["login", "logout"]));
        let mut session = Session::new("lo");

        session.press(&handler);
        assert_eq!(session.line, "login");
        session.other_key();
        session.press(&handler);
        assert_eq!(session.line, "login");
        assert_eq!(session.state.last_completion.as_ref().map(|r| r.index), Some(0));
    }

    #[rstest]
    #[case("", 0, "hello")]
    #[case("he", 5, "he")]
    #[case("say he", 3, "he")]
    fn inconsistent_record_starts_fresh_cycle(
        #[case] recorded_line: &str,
        #[case] recorded_column: usize,
        #[case] recorded_word: &str,
    ) {
        let handler = advanced_completion(words(&["login", "logout"]));
        let mut session = Session::new("lo");
        session.state.last_completion = Some(CompletionRecord {
            counter: session.state.counter,
            last_word: recorded_word.to_string(),
            line: recorded_line.to_string(),
            column: recorded_column,
            index: 0,
        });

        session.press(&handler);
        assert_eq!((session.line.as_str(), session.column), ("login", 5));
        assert_eq!(session.state.last_completion.as_ref().map(|r| r.index), Some(0));
    }

    #[test]
    fn completes_word_in_the_middle() {
        let handler = advanced_completion(words(&["that", "this"]));
        let mut session = Session::new("th is");
        session.column = 2;

        session.press(&handler);
        assert_eq!((session.line.as_str(), session.column), ("that is", 4));
    }

    #[test]
    fn no_candidates_is_noop() {
        let handler = advanced_completion(words(&["exit"]));
        let mut session = Session::new("lo");

        assert!(session.press(&handler).is_noop());
        assert_eq!(session.state.last_completion, None);
    }

    #[test]
    fn multibyte_words_keep_char_columns() {
        let handler = advanced_completion(words(&["grün", "grünlich"]));
        let mut session = Session::new("ein gr");

        session.press(&handler);
        assert_eq!((session.line.as_str(), session.column), ("ein grün", 8));
        session.press(&handler);
        assert_eq!((session.line.as_str(), session.column), ("ein grünlich", 12));
    }
}
