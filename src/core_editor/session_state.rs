/// Per-session state threaded through every handler invocation.
///
/// Lives from the first key of a session until it terminates. Handlers that don't care
/// about a field simply ignore it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Number of key presses dispatched so far in this session, including the current one
    pub counter: u64,
    /// The last completion applied, used to continue cycling through candidates
    pub last_completion: Option<CompletionRecord>,
}

/// Snapshot of a completion attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRecord {
    /// Value of [`SessionState::counter`] when the completion fired
    pub counter: u64,
    /// The word being completed, as typed before the gesture started
    pub last_word: String,
    /// The line as it was before the gesture started
    pub line: String,
    /// Cursor column before the gesture started
    pub column: usize,
    /// Index of the candidate that was inserted
    pub index: usize,
}

impl SessionState {
    /// Take the recorded completion if it was made by the key press right before this one
    pub fn continued_completion(&mut self) -> Option<CompletionRecord> {
        let counter = self.counter;
        self.last_completion
            .take()
            .filter(|record| record.counter + 1 == counter)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(counter: u64) -> CompletionRecord {
        CompletionRecord {
            counter,
            last_word: "he".into(),
            line: "he".into(),
            column: 2,
            index: 0,
        }
    }

    #[test]
    fn adjacent_completion_continues() {
        let mut state = SessionState {
            counter: 5,
            last_completion: Some(record(4)),
        };

        assert_eq!(state.continued_completion(), Some(record(4)));
        assert_eq!(state.last_completion, None);
    }

    #[test]
    fn interrupted_completion_is_discarded() {
        let mut state = SessionState {
            counter: 6,
            last_completion: Some(record(4)),
        };

        assert_eq!(state.continued_completion(), None);
        assert_eq!(state.last_completion, None);
    }
}
