mod decode;
mod keypress;
mod source;

pub use decode::decode_keys;
pub use keypress::{KeyPress, NamedKey};
pub use source::{CrosstermSource, KeySource, ScriptedSource};
