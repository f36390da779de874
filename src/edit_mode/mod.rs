mod default;
mod keymap;
mod keyspec;

pub use default::{default_keymap, DefaultKeyMap};
pub use keymap::{handler, EditContext, FlatKeyMap, Handler, KeyMap};
pub use keyspec::{KeySpec, Keys, Matcher};
