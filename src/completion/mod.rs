mod base;
mod basic;
mod circular;

pub use base::Completer;
pub use basic::{basic_completion, BasicCompleter, CompletionEntry};
pub use circular::{advanced_completion, last_word};
