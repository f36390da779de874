use {
    super::{decode::decode_keys, keypress::KeyPress},
    crossterm::event::{self, Event, KeyEventKind},
    std::{
        collections::VecDeque,
        io::{self, IsTerminal},
        time::Duration,
    },
};

/// Supplier of decoded key presses for an editing session.
///
/// Raw input decoding lives behind this trait; the edit loop only ever sees [`KeyPress`]es.
pub trait KeySource {
    /// Block until input is available and return every key decoded from one read.
    ///
    /// An empty vector signals that the source is exhausted.
    fn read_keys(&mut self) -> io::Result<Vec<KeyPress>>;

    /// Whether the source is an interactive terminal that can be put into raw mode
    fn is_terminal(&self) -> bool {
        false
    }
}

/// Reads key presses from the controlling terminal through `crossterm`
#[derive(Debug, Default)]
pub struct CrosstermSource;

impl KeySource for CrosstermSource {
    fn read_keys(&mut self) -> io::Result<Vec<KeyPress>> {
        let mut keys = Vec::new();
        loop {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind != KeyEventKind::Release {
                    keys.push(KeyPress::from(key_event));
                }
            }
            // Drain whatever arrived with the same read before handing the batch out
            if !keys.is_empty() && !event::poll(Duration::ZERO)? {
                return Ok(keys);
            }
        }
    }

    fn is_terminal(&self) -> bool {
        io::stdin().is_terminal()
    }
}

/// Replays canned input one key press per read
///
/// # Example
///
/// ```rust
/// use keyline::{KeySource, ScriptedSource};
///
/// let mut source = ScriptedSource::new("hi\r");
/// assert_eq!(source.read_keys().unwrap()[0].sequence, "h");
/// ```
#[derive(Debug, Default, Clone)]
pub struct ScriptedSource {
    keys: VecDeque<KeyPress>,
}

impl ScriptedSource {
    /// Decode `input` into key presses, see [`decode_keys`]
    pub fn new(input: &str) -> Self {
        Self::from_keys(decode_keys(input))
    }

    /// Replay an explicit list of key presses
    pub fn from_keys(keys: impl IntoIterator<Item = KeyPress>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    /// Number of key presses not yet read
    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl KeySource for ScriptedSource {
    fn read_keys(&mut self) -> io::Result<Vec<KeyPress>> {
        Ok(self.keys.pop_front().into_iter().collect())
    }
}
