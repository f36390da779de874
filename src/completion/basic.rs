use {
    super::circular::advanced_completion,
    crate::{Completer, Handler, Matcher},
    regex::{Regex, RegexBuilder},
    unicase::UniCase,
};

/// A matcher and the text inserted when it matches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionEntry {
    pub matcher: Matcher,
    pub replacement: String,
}

impl From<&str> for CompletionEntry {
    fn from(word: &str) -> Self {
        Self {
            matcher: Matcher::Exact(word.to_string()),
            replacement: word.to_string(),
        }
    }
}

impl From<String> for CompletionEntry {
    fn from(word: String) -> Self {
        Self {
            matcher: Matcher::Exact(word.clone()),
            replacement: word,
        }
    }
}

impl From<(&str, &str)> for CompletionEntry {
    fn from((matcher, replacement): (&str, &str)) -> Self {
        Self {
            matcher: Matcher::Exact(matcher.to_string()),
            replacement: replacement.to_string(),
        }
    }
}

impl From<(Regex, &str)> for CompletionEntry {
    fn from((matcher, replacement): (Regex, &str)) -> Self {
        Self {
            matcher: Matcher::Pattern(matcher),
            replacement: replacement.to_string(),
        }
    }
}

/// Completer over a fixed list of entries
///
/// # Example
///
/// ```rust
/// use keyline::{BasicCompleter, Completer};
///
/// let completer = BasicCompleter::new(["hello", "hell", "help"]);
/// assert_eq!(completer.complete("hel", "hel"), vec!["hello", "hell", "help"]);
/// assert_eq!(completer.complete("hell", "hell"), vec!["hello", "hell"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BasicCompleter {
    entries: Vec<CompletionEntry>,
    complete_on_empty: bool,
    ignore_case: bool,
    /// Case-insensitive copies of the pattern entries, by entry index
    insensitive: Vec<Option<Regex>>,
}

impl BasicCompleter {
    pub fn new<E: Into<CompletionEntry>>(entries: impl IntoIterator<Item = E>) -> Self {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Offer every entry when there is no word left of the cursor
    #[must_use]
    pub fn with_complete_on_empty(mut self, complete_on_empty: bool) -> Self {
        self.complete_on_empty = complete_on_empty;
        self
    }

    /// Compare case-insensitively
    #[must_use]
    pub fn with_ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self.insensitive = if ignore_case {
            self.entries
                .iter()
                .map(|entry| match &entry.matcher {
                    Matcher::Pattern(regex) => RegexBuilder::new(regex.as_str())
                        .case_insensitive(true)
                        .build()
                        .ok(),
                    Matcher::Exact(_) => None,
                })
                .collect()
        } else {
            Vec::new()
        };
        self
    }

    fn fold(&self, text: &str) -> String {
        if self.ignore_case {
            UniCase::new(text).to_folded_case()
        } else {
            text.to_string()
        }
    }

    fn offers(&self, index: usize, entry: &CompletionEntry, word: &str) -> bool {
        match &entry.matcher {
            Matcher::Exact(exact) => self.fold(exact).starts_with(&self.fold(word)),
            Matcher::Pattern(regex) => self
                .insensitive
                .get(index)
                .and_then(Option::as_ref)
                .unwrap_or(regex)
                .is_match(word),
        }
    }
}

impl Completer for BasicCompleter {
    fn complete(&self, _line: &str, last_word: &str) -> Vec<String> {
        if last_word.is_empty() {
            if !self.complete_on_empty {
                return Vec::new();
            }
            return self.entries.iter().map(|e| e.replacement.clone()).collect();
        }
        self.entries
            .iter()
            .enumerate()
            .filter(|(index, entry)| self.offers(*index, entry, last_word))
            .map(|(_, entry)| entry.replacement.clone())
            .collect()
    }
}

/// Cycling completion over fixed entries, bare words or `(matcher, replacement)` pairs
pub fn basic_completion<E: Into<CompletionEntry>>(
    entries: impl IntoIterator<Item = E>,
    complete_on_empty: bool,
    ignore_case: bool,
) -> Handler {
    advanced_completion(
        BasicCompleter::new(entries)
            .with_complete_on_empty(complete_on_empty)
            .with_ignore_case(ignore_case),
    )
}
