/// A trait that defines how to turn the text left of the cursor into a list of
/// replacements for the word being typed.
pub trait Completer: Send + Sync {
    /// Candidates replacing `last_word`, the run of word characters touching the end of
    /// `line`. Candidates are cycled through in the order returned.
    fn complete(&self, line: &str, last_word: &str) -> Vec<String>;
}

impl<F> Completer for F
where
    F: Fn(&str, &str) -> Vec<String> + Send + Sync,
{
    fn complete(&self, line: &str, last_word: &str) -> Vec<String> {
        self(line, last_word)
    }
}
