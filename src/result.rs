use std::fmt::Display;
use thiserror::Error;

/// Everything that can make a session fail
#[derive(Error, Debug)]
pub enum KeylineErrorVariants {
    /// Raw mode was requested for a key source that is not an interactive terminal
    #[error("key presses can only be read in raw mode from an interactive terminal")]
    NotATerminal,

    /// The key source closed before any binding ended the session
    #[error("input ended before a key binding terminated the session")]
    UnexpectedEndOfInput,

    /// A key, sequence or completion pattern could not be compiled
    #[error("invalid pattern: {0}")]
    InvalidPattern(regex::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    IOError(std::io::Error),
}

/// Error returned by [`Keyline`](crate::Keyline) sessions and pattern compilation
#[derive(Debug)]
pub struct KeylineError(pub KeylineErrorVariants);

impl KeylineError {
    /// Whether the session failed because its key source ran dry
    pub fn is_end_of_input(&self) -> bool {
        matches!(self.0, KeylineErrorVariants::UnexpectedEndOfInput)
    }
}

impl From<std::io::Error> for KeylineError {
    fn from(err: std::io::Error) -> Self {
        Self(KeylineErrorVariants::IOError(err))
    }
}

impl From<regex::Error> for KeylineError {
    fn from(err: regex::Error) -> Self {
        Self(KeylineErrorVariants::InvalidPattern(err))
    }
}

impl Display for KeylineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
impl std::error::Error for KeylineError {}

/// Standard [`std::result::Result`], with [`KeylineError`] as the error variant
pub type Result<T> = std::result::Result<T, KeylineError>;
