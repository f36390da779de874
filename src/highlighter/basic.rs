use {
    crate::{highlighter::Highlighter, Matcher},
    nu_ansi_term::Style,
    regex::{Captures, Regex},
    std::sync::Arc,
};

/// Styling function applied to matched text
pub type Styler = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// [`Styler`] painting with a [`Style`]
pub fn styler(style: Style) -> Styler {
    Arc::new(move |text: &str| style.paint(text).to_string())
}

/// One or many matchers sharing the same stylers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matchers(pub Vec<Matcher>);

impl From<Matcher> for Matchers {
    fn from(matcher: Matcher) -> Self {
        Matchers(vec![matcher])
    }
}

impl From<&str> for Matchers {
    fn from(text: &str) -> Self {
        Matchers(vec![text.into()])
    }
}

impl From<Regex> for Matchers {
    fn from(regex: Regex) -> Self {
        Matchers(vec![regex.into()])
    }
}

impl From<Vec<Matcher>> for Matchers {
    fn from(matchers: Vec<Matcher>) -> Self {
        Matchers(matchers)
    }
}

impl<const N: usize> From<[&str; N]> for Matchers {
    fn from(texts: [&str; N]) -> Self {
        Matchers(texts.into_iter().map(Matcher::from).collect())
    }
}

/// One or many stylers applied in order, each to the output of the previous one
#[derive(Clone)]
pub struct Stylers(pub Vec<Styler>);

impl From<Style> for Stylers {
    fn from(style: Style) -> Self {
        Stylers(vec![styler(style)])
    }
}

impl From<Styler> for Stylers {
    fn from(styler: Styler) -> Self {
        Stylers(vec![styler])
    }
}

impl From<Vec<Styler>> for Stylers {
    fn from(stylers: Vec<Styler>) -> Self {
        Stylers(stylers)
    }
}

impl<const N: usize> From<[Style; N]> for Stylers {
    fn from(styles: [Style; N]) -> Self {
        Stylers(styles.into_iter().map(styler).collect())
    }
}

/// Rules mapping matchers to stylers, normalized so every matcher appears once
#[derive(Clone, Default)]
pub struct HighlightRules {
    rules: Vec<(Matcher, Vec<Styler>)>,
}

impl HighlightRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Style every match of `matchers`. Stylers for a matcher that already has rules are
    /// appended to the existing ones.
    #[must_use]
    pub fn with_rule(mut self, matchers: impl Into<Matchers>, stylers: impl Into<Stylers>) -> Self {
        let stylers = stylers.into().0;
        for matcher in matchers.into().0 {
            match self.rules.iter_mut().find(|(existing, _)| *existing == matcher) {
                Some((_, existing)) => existing.extend(stylers.iter().cloned()),
                None => self.rules.push((matcher, stylers.clone())),
            }
        }
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Compile into a highlighter
    pub fn build(self) -> BasicHighlighter {
        let rules = self
            .rules
            .into_iter()
            .map(|(matcher, stylers)| (matcher, compose(stylers)))
            .collect();
        BasicHighlighter { rules }
    }
}

fn compose(stylers: Vec<Styler>) -> Styler {
    Arc::new(move |text: &str| {
        stylers
            .iter()
            .fold(text.to_string(), |styled, styler| styler(&styled))
    })
}

/// Highlighter substituting every match with its styled form.
///
/// Rules are applied one after the other over the whole line. A later rule sees the
/// escape codes inserted by earlier ones and may match inside them.
///
/// # Example
///
/// ```rust
/// use keyline::{HighlightRules, Highlighter};
/// use nu_ansi_term::{Color, Style};
///
/// let highlighter = HighlightRules::new()
///     .with_rule(["{", "}"], [Style::new().bold(), Style::new().dimmed()])
///     .with_rule("I", Color::Yellow.normal())
///     .build();
///
/// let styled = highlighter.highlight("I {x}");
/// assert!(styled.starts_with(&Color::Yellow.paint("I").to_string()));
/// ```
#[derive(Clone, Default)]
pub struct BasicHighlighter {
    rules: Vec<(Matcher, Styler)>,
}

impl Highlighter for BasicHighlighter {
    fn highlight(&self, line: &str) -> String {
        self.rules
            .iter()
            .fold(line.to_string(), |line, (matcher, styler)| match matcher {
                Matcher::Exact(text) if text.is_empty() => line,
                Matcher::Exact(text) => line.replace(text.as_str(), &styler(text)),
                Matcher::Pattern(regex) => regex
                    .replace_all(&line, |caps: &Captures<'_>| styler(&caps[0]))
                    .into_owned(),
            })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use nu_ansi_term::Color;
    use pretty_assertions::assert_eq;

    fn red(text: &str) -> String {
        Color::Red.paint(text).to_string()
    }

    fn italic(text: &str) -> String {
        Style::new().italic().paint(text).to_string()
    }

    fn wrap(open: &'static str, close: &'static str) -> Styler {
        Arc::new(move |text: &str| format!("{open}{text}{close}"))
    }

    #[test]
    fn styles_every_match() {
        let highlighter = HighlightRules::new()
            .with_rule(["(", ")"], Color::Red.normal())
            .with_rule(Regex::new("x").unwrap(), Style::new().italic())
            .build();

        assert_eq!(
            highlighter.highlight("([x])"),
            format!("{}[{}]{}", red("("), italic("x"), red(")"))
        );
    }

    #[test]
    fn stylers_compose_in_order() {
        let highlighter = HighlightRules::new()
            .with_rule("x", vec![wrap("<", ">"), wrap("[", "]")])
            .build();

        assert_eq!(highlighter.highlight("axa"), "a[<x>]a");
    }

    #[test]
    fn duplicate_matchers_are_merged() {
        let rules = HighlightRules::new()
            .with_rule(["x", "y"], wrap("<", ">"))
            .with_rule("x", wrap("[", "]"));
        assert_eq!(rules.len(), 2);

        let highlighter = rules.build();
        assert_eq!(highlighter.highlight("xy"), "[<x>]<y>");
    }

    #[test]
    fn later_rules_see_earlier_output() {
        let highlighter = HighlightRules::new()
            .with_rule("a", wrap("<b>", "</b>"))
            .with_rule("b", wrap("[", "]"))
            .build();

        assert_eq!(highlighter.highlight("a"), "<[b]>a</[b]>");
    }

    #[test]
    fn no_rules_leave_line_untouched() {
        let highlighter = HighlightRules::new().build();

        assert_eq!(highlighter.highlight("plain"), "plain");
    }
}
