use crate::input_parsing::NamedKey;
use strum::IntoEnumIterator;

/// Return a `Vec` of the key names usable in a [`KeySpec`](crate::KeySpec)
/// besides single characters
pub fn get_named_keys() -> Vec<String> {
    NamedKey::iter().map(|key| key.to_string()).collect()
}

/// Return a `Vec` of the modifier fields a [`KeySpec`](crate::KeySpec) can constrain
pub fn get_keyspec_modifiers() -> Vec<String> {
    vec!["ctrl".to_string(), "meta".to_string(), "shift".to_string()]
}
