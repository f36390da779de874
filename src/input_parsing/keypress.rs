use {
    serde::{Deserialize, Serialize},
    strum::{AsRefStr, Display, EnumIter, EnumString},
};

/// Names of the non-character keys a decoder reports.
///
/// The string forms (`"return"`, `"backspace"`, `"pageup"`, ...) are the key names
/// carried by [`KeyPress::key`] and matched by [`KeySpec`](crate::KeySpec).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum NamedKey {
    /// Carriage return, what most terminals send for the Enter key
    Return,
    /// Line feed
    Enter,
    Backspace,
    Delete,
    Tab,
    Escape,
    Space,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
}

impl NamedKey {
    /// The raw byte sequence a VT100-compatible terminal sends for this key
    pub fn sequence(self) -> &'static str {
        match self {
            NamedKey::Return => "\r",
            NamedKey::Enter => "\n",
            NamedKey::Backspace => "\x7f",
            NamedKey::Delete => "\x1b[3~",
            NamedKey::Tab => "\t",
            NamedKey::Escape => "\x1b",
            NamedKey::Space => " ",
            NamedKey::Up => "\x1b[A",
            NamedKey::Down => "\x1b[B",
            NamedKey::Right => "\x1b[C",
            NamedKey::Left => "\x1b[D",
            NamedKey::Home => "\x1b[H",
            NamedKey::End => "\x1b[F",
            NamedKey::PageUp => "\x1b[5~",
            NamedKey::PageDown => "\x1b[6~",
            NamedKey::Insert => "\x1b[2~",
        }
    }
}

/// A single decoded key press.
///
/// `key` is the decoder's name for the key (`"a"`, `"return"`, `"f5"`), `sequence` the
/// literal text the input device produced for it. Character keys carry their lowercase
/// name in `key` and the typed character (respecting shift) in `sequence`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPress {
    /// Name of the key, if the decoder recognized one
    pub key: Option<String>,
    /// Raw, undecoded sequence
    pub sequence: String,
    /// Control modifier held
    pub ctrl: bool,
    /// Meta/Alt modifier held
    pub meta: bool,
    /// Shift modifier held
    pub shift: bool,
}

impl KeyPress {
    /// Key press with an explicit name and raw sequence and no modifiers
    pub fn new(key: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            sequence: sequence.into(),
            ..Self::default()
        }
    }

    /// Typing a character
    pub fn char(c: char) -> Self {
        if c == ' ' {
            return Self::named(NamedKey::Space);
        }
        Self {
            key: Some(c.to_lowercase().collect()),
            sequence: c.to_string(),
            shift: c.is_uppercase(),
            ..Self::default()
        }
    }

    /// A named special key with its conventional sequence
    pub fn named(key: NamedKey) -> Self {
        Self::new(key.as_ref(), key.sequence())
    }

    /// `ctrl` + an ASCII letter, carrying the matching C0 control character as its sequence
    pub fn ctrl(c: char) -> Self {
        let lower = c.to_ascii_lowercase();
        let sequence = if lower.is_ascii_lowercase() {
            char::from(lower as u8 - b'a' + 1).to_string()
        } else {
            String::new()
        };
        Self {
            key: Some(lower.to_string()),
            sequence,
            ctrl: true,
            ..Self::default()
        }
    }

    /// Same key with the meta modifier held, prefixing the sequence with `ESC`
    #[must_use]
    pub fn with_meta(mut self) -> Self {
        if !self.meta {
            self.sequence.insert(0, '\x1b');
            self.meta = true;
        }
        self
    }

    /// Same key with the shift modifier held
    #[must_use]
    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// Checks the decoded name against a [`NamedKey`]
    pub fn is(&self, key: NamedKey) -> bool {
        self.key.as_deref() == Some(key.as_ref())
    }
}
