//! # keyline
//! A key-dispatch line editing engine for the terminal
//!
//! Every key press is matched against an ordered list of bindings. Each binding maps
//! one or more [`KeySpec`]s to a handler computing an [`EditResult`], and when several
//! bindings match, the one registered last wins. The engine applies the result to the
//! buffer and emits the minimal ANSI output reproducing the change.
//!
//! ## Example (single line with completion)
//!
//! ```rust,no_run
//! use keyline::{basic_completion, DefaultKeyMap, Keyline};
//!
//! let keymap = DefaultKeyMap::new(1)
//!     .with_completion(basic_completion(["hello", "hell"], false, false))
//!     .build();
//!
//! let line = Keyline::create()
//!     .with_keymap(keymap)
//!     .with_prefix("> ")
//!     .read_line()?;
//! println!("\r\nWe processed: {line}");
//! # Ok::<(), keyline::KeylineError>(())
//! ```
//!
//! ## Example (custom bindings)
//!
//! Any [`KeyMap`] can drive a session, e.g. a single-key yes/no question:
//!
//! ```rust
//! use keyline::{EditResult, KeyMap, Keyline, ScriptedSource};
//! use regex::Regex;
//!
//! let yes_no = Regex::new("(?i)[yn]")?;
//! let keymap = KeyMap::new().with_binding(yes_no, |ctx| {
//!     EditResult::line(ctx.key.sequence.to_lowercase()).end_input()
//! });
//!
//! let answer = Keyline::create()
//!     .with_keymap(keymap)
//!     .with_raw_mode(false)
//!     .read_input(&mut ScriptedSource::new("xY"), std::io::sink())?;
//! assert_eq!(answer, "y");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
mod core_editor;
pub use core_editor::{CompletionRecord, SessionState};

mod enums;
pub use enums::{Edit, EditResult};

mod edit_mode;
pub use edit_mode::{
    default_keymap, handler, DefaultKeyMap, EditContext, FlatKeyMap, Handler, KeyMap, KeySpec,
    Keys, Matcher,
};

mod input_parsing;
pub use input_parsing::{decode_keys, CrosstermSource, KeyPress, KeySource, NamedKey, ScriptedSource};

mod completion;
pub use completion::{
    advanced_completion, basic_completion, last_word, BasicCompleter, Completer, CompletionEntry,
};

mod highlighter;
pub use highlighter::{
    styler, BasicHighlighter, HighlightRules, Highlighter, Matchers, NoopHighlighter, Styler,
    Stylers,
};

mod painting;

mod terminal_extensions;

mod engine;
pub use engine::Keyline;

mod result;
pub use result::{KeylineError, KeylineErrorVariants, Result};

mod utils;
pub use utils::{get_keyspec_modifiers, get_named_keys};

// Reexport the key types to be independent from an explicit crossterm dependency.
pub use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
