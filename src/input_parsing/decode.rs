use {
    super::keypress::{KeyPress, NamedKey},
    crossterm::event::{KeyCode, KeyEvent, KeyModifiers},
    std::{iter::Peekable, str::Chars},
};

impl From<KeyEvent> for KeyPress {
    fn from(event: KeyEvent) -> Self {
        let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
        let meta = event
            .modifiers
            .intersects(KeyModifiers::ALT | KeyModifiers::META);
        let shift = event.modifiers.contains(KeyModifiers::SHIFT);

        let mut key = match event.code {
            KeyCode::Char(c) if ctrl && c.is_ascii_alphabetic() => KeyPress::ctrl(c),
            KeyCode::Char(c) => KeyPress::char(c),
            KeyCode::Enter => KeyPress::named(NamedKey::Return),
            KeyCode::Backspace => KeyPress::named(NamedKey::Backspace),
            KeyCode::Delete => KeyPress::named(NamedKey::Delete),
            KeyCode::Tab => KeyPress::named(NamedKey::Tab),
            KeyCode::BackTab => KeyPress::new(NamedKey::Tab.as_ref(), "\x1b[Z").with_shift(),
            KeyCode::Esc => KeyPress::named(NamedKey::Escape),
            KeyCode::Up => KeyPress::named(NamedKey::Up),
            KeyCode::Down => KeyPress::named(NamedKey::Down),
            KeyCode::Left => KeyPress::named(NamedKey::Left),
            KeyCode::Right => KeyPress::named(NamedKey::Right),
            KeyCode::Home => KeyPress::named(NamedKey::Home),
            KeyCode::End => KeyPress::named(NamedKey::End),
            KeyCode::PageUp => KeyPress::named(NamedKey::PageUp),
            KeyCode::PageDown => KeyPress::named(NamedKey::PageDown),
            KeyCode::Insert => KeyPress::named(NamedKey::Insert),
            KeyCode::F(n) => KeyPress::new(format!("f{n}"), ""),
            _ => KeyPress::default(),
        };

        key.ctrl |= ctrl;
        key.shift |= shift;
        if meta {
            key = key.with_meta();
        }
        key
    }
}

/// Decodes plain text the way a byte-level keypress decoder would.
///
/// Control characters become named or `ctrl` keys and the common CSI cursor sequences
/// become arrow/home/end/delete keys. Other CSI sequences are kept whole as one unnamed
/// key. `ESC` followed by a character is read as that character with meta held.
/// Everything else is typed character by character.
pub fn decode_keys(input: &str) -> Vec<KeyPress> {
    let mut keys = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        let key = match c {
            '\r' => KeyPress::named(NamedKey::Return),
            '\n' => KeyPress::named(NamedKey::Enter),
            '\t' => KeyPress::named(NamedKey::Tab),
            '\x08' => KeyPress::new(NamedKey::Backspace.as_ref(), "\x08"),
            '\x7f' => KeyPress::named(NamedKey::Backspace),
            '\x1b' => decode_escape(&mut chars),
            '\x01'..='\x1a' => KeyPress::ctrl(char::from(c as u8 - 1 + b'a')),
            c if c.is_control() => unnamed(c.to_string()),
            c => KeyPress::char(c),
        };
        keys.push(key);
    }

    keys
}

fn decode_escape(chars: &mut Peekable<Chars<'_>>) -> KeyPress {
    match chars.peek().copied() {
        Some('[') => {
            chars.next();
            decode_csi(chars)
        }
        Some(next) if !next.is_control() => {
            chars.next();
            KeyPress::char(next).with_meta()
        }
        _ => KeyPress::named(NamedKey::Escape),
    }
}

/// Reads the rest of a CSI sequence: parameter and intermediate bytes, then the final byte.
fn decode_csi(chars: &mut Peekable<Chars<'_>>) -> KeyPress {
    let mut body = String::new();
    while let Some(c) = chars.next_if(|&c| matches!(c, '0'..='?' | ' '..='/')) {
        body.push(c);
    }
    let Some(last) = chars.next_if(|&c| matches!(c, '@'..='~')) else {
        if body.is_empty() {
            return KeyPress::char('[').with_meta();
        }
        return unnamed(format!("\x1b[{body}"));
    };

    let named = match (body.as_str(), last) {
        ("", 'A') => NamedKey::Up,
        ("", 'B') => NamedKey::Down,
        ("", 'C') => NamedKey::Right,
        ("", 'D') => NamedKey::Left,
        ("", 'H') => NamedKey::Home,
        ("", 'F') => NamedKey::End,
        ("", 'Z') => return KeyPress::new(NamedKey::Tab.as_ref(), "\x1b[Z").with_shift(),
        ("2", '~') => NamedKey::Insert,
        ("3", '~') => NamedKey::Delete,
        ("5", '~') => NamedKey::PageUp,
        ("6", '~') => NamedKey::PageDown,
        _ => return unnamed(format!("\x1b[{body}{last}")),
    };
    KeyPress::named(named)
}

fn unnamed(sequence: String) -> KeyPress {
    KeyPress {
        key: None,
        sequence,
        ..KeyPress::default()
    }
}
