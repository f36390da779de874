use {
    crate::{input_parsing::NamedKey, KeyPress, Result},
    regex::Regex,
    serde::{Deserialize, Serialize},
};

/// Exact string or regular expression tested against a key name, a raw sequence or a word
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "MatcherConfig", into = "MatcherConfig")]
pub enum Matcher {
    /// Whole-string equality
    Exact(String),
    /// Regular expression, searched unless anchored
    Pattern(Regex),
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum MatcherConfig {
    Exact(String),
    Pattern(String),
}

impl TryFrom<MatcherConfig> for Matcher {
    type Error = regex::Error;

    fn try_from(config: MatcherConfig) -> std::result::Result<Self, Self::Error> {
        match config {
            MatcherConfig::Exact(text) => Ok(Matcher::Exact(text)),
            MatcherConfig::Pattern(pattern) => Regex::new(&pattern).map(Matcher::Pattern),
        }
    }
}

impl From<Matcher> for MatcherConfig {
    fn from(matcher: Matcher) -> Self {
        match matcher {
            Matcher::Exact(text) => MatcherConfig::Exact(text),
            Matcher::Pattern(regex) => MatcherConfig::Pattern(regex.as_str().to_string()),
        }
    }
}

impl Matcher {
    /// Compile `pattern` into a [`Matcher::Pattern`]
    pub fn pattern(pattern: &str) -> Result<Self> {
        Ok(Matcher::Pattern(Regex::new(pattern)?))
    }

    /// Test `text`: equality for [`Matcher::Exact`], a regex search for [`Matcher::Pattern`]
    pub fn is_match(&self, text: &str) -> bool {
        match self {
            Matcher::Exact(exact) => exact == text,
            Matcher::Pattern(regex) => regex.is_match(text),
        }
    }

    /// Anchor a pattern so it only matches whole strings. Exact matchers are returned as is.
    ///
    /// The pattern is recompiled from its source, so flags have to be given inline
    /// (`(?i)[yn]`) rather than through a `RegexBuilder`.
    #[must_use]
    pub fn anchored(self) -> Self {
        match self {
            Matcher::Pattern(regex) => {
                Regex::new(&format!("^(?:{})$", regex.as_str()))
                    .map_or(Matcher::Pattern(regex), Matcher::Pattern)
            }
            exact => exact,
        }
    }

    fn matches_name(&self, name: Option<&str>) -> bool {
        match self {
            Matcher::Exact(exact) => name == Some(exact.as_str()),
            Matcher::Pattern(regex) => regex.is_match(name.unwrap_or_default()),
        }
    }
}

impl PartialEq for Matcher {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Matcher::Exact(a), Matcher::Exact(b)) => a == b,
            (Matcher::Pattern(a), Matcher::Pattern(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl Eq for Matcher {}

impl From<&str> for Matcher {
    fn from(text: &str) -> Self {
        Matcher::Exact(text.to_string())
    }
}

impl From<String> for Matcher {
    fn from(text: String) -> Self {
        Matcher::Exact(text)
    }
}

impl From<Regex> for Matcher {
    fn from(regex: Regex) -> Self {
        Matcher::Pattern(regex)
    }
}

impl From<NamedKey> for Matcher {
    fn from(key: NamedKey) -> Self {
        Matcher::Exact(key.to_string())
    }
}

/// Structural predicate over a [`KeyPress`].
///
/// Every field left as `None` is a wildcard; all set fields have to agree for a match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySpec {
    /// Matched against [`KeyPress::key`]. Patterns set directly or loaded from
    /// configuration are searched, the constructors anchor them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<Matcher>,
    /// Required state of the control modifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ctrl: Option<bool>,
    /// Required state of the meta modifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<bool>,
    /// Required state of the shift modifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift: Option<bool>,
    /// Matched against [`KeyPress::sequence`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<Matcher>,
}

impl KeySpec {
    /// A spec matching every key press
    pub fn any() -> Self {
        Self::default()
    }

    /// Normalize a bare key name or pattern.
    ///
    /// Patterns get anchored to the whole key name and both `ctrl` and `meta` are required to
    /// be released, so plain bindings never fire while a modifier is held.
    pub fn of(key: impl Into<Matcher>) -> Self {
        Self {
            key: Some(key.into().anchored()),
            ctrl: Some(false),
            meta: Some(false),
            ..Self::default()
        }
    }

    /// `ctrl` + `key`, e.g. `KeySpec::ctrl('d')`
    pub fn ctrl(key: char) -> Self {
        Self {
            key: Some(Matcher::Exact(key.to_ascii_lowercase().to_string())),
            ctrl: Some(true),
            ..Self::default()
        }
    }

    /// Match the whole raw sequence rather than the decoded key name
    pub fn sequence(sequence: impl Into<Matcher>) -> Self {
        Self {
            sequence: Some(sequence.into().anchored()),
            ..Self::default()
        }
    }

    /// Require the whole key name
    #[must_use]
    pub fn with_key(mut self, key: impl Into<Matcher>) -> Self {
        self.key = Some(key.into().anchored());
        self
    }

    /// Require the control modifier state
    #[must_use]
    pub fn with_ctrl(mut self, ctrl: bool) -> Self {
        self.ctrl = Some(ctrl);
        self
    }

    /// Require the meta modifier state
    #[must_use]
    pub fn with_meta(mut self, meta: bool) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Require the shift modifier state
    #[must_use]
    pub fn with_shift(mut self, shift: bool) -> Self {
        self.shift = Some(shift);
        self
    }

    /// Check whether the key press satisfies every constrained field
    pub fn matches(&self, key: &KeyPress) -> bool {
        self.key
            .as_ref()
            .map_or(true, |matcher| matcher.matches_name(key.key.as_deref()))
            && self.ctrl.map_or(true, |ctrl| ctrl == key.ctrl)
            && self.meta.map_or(true, |meta| meta == key.meta)
            && self.shift.map_or(true, |shift| shift == key.shift)
            && self
                .sequence
                .as_ref()
                .map_or(true, |matcher| matcher.is_match(&key.sequence))
    }
}

impl From<&str> for KeySpec {
    fn from(key: &str) -> Self {
        KeySpec::of(key)
    }
}

impl From<String> for KeySpec {
    fn from(key: String) -> Self {
        KeySpec::of(key)
    }
}

impl From<Regex> for KeySpec {
    fn from(key: Regex) -> Self {
        KeySpec::of(key)
    }
}

impl From<NamedKey> for KeySpec {
    fn from(key: NamedKey) -> Self {
        KeySpec::of(key)
    }
}

/// One or many [`KeySpec`]s bound to the same handler
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keys(pub Vec<KeySpec>);

impl Keys {
    /// Iterate over the individual specs
    pub fn iter(&self) -> std::slice::Iter<'_, KeySpec> {
        self.0.iter()
    }

    /// True if any of the specs matches the key press
    pub fn matches(&self, key: &KeyPress) -> bool {
        self.0.iter().any(|spec| spec.matches(key))
    }
}

impl<'a> IntoIterator for &'a Keys {
    type Item = &'a KeySpec;
    type IntoIter = std::slice::Iter<'a, KeySpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<KeySpec> for Keys {
    fn from(spec: KeySpec) -> Self {
        Keys(vec![spec])
    }
}

impl From<&str> for Keys {
    fn from(key: &str) -> Self {
        Keys(vec![key.into()])
    }
}

impl From<String> for Keys {
    fn from(key: String) -> Self {
        Keys(vec![key.into()])
    }
}

impl From<Regex> for Keys {
    fn from(key: Regex) -> Self {
        Keys(vec![key.into()])
    }
}

impl From<NamedKey> for Keys {
    fn from(key: NamedKey) -> Self {
        Keys(vec![key.into()])
    }
}

impl From<Vec<KeySpec>> for Keys {
    fn from(specs: Vec<KeySpec>) -> Self {
        Keys(specs)
    }
}

impl From<Vec<&str>> for Keys {
    fn from(keys: Vec<&str>) -> Self {
        Keys(keys.into_iter().map(KeySpec::from).collect())
    }
}

impl<const N: usize> From<[KeySpec; N]> for Keys {
    fn from(specs: [KeySpec; N]) -> Self {
        Keys(specs.into())
    }
}

impl<const N: usize> From<[&str; N]> for Keys {
    fn from(keys: [&str; N]) -> Self {
        Keys(keys.into_iter().map(KeySpec::from).collect())
    }
}

impl<const N: usize> From<[NamedKey; N]> for Keys {
    fn from(keys: [NamedKey; N]) -> Self {
        Keys(keys.into_iter().map(KeySpec::from).collect())
    }
}
