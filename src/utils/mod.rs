mod query;
pub(crate) mod text_manipulation;

pub use query::{get_keyspec_modifiers, get_named_keys};
