use serde::Deserialize;
use std::collections::HashMap;

/// How a tag is delimited.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    /// Tag has a body and requires a `[/name]` closing tag.
    #[default]
    Default,

    /// Self-closing tag without body, like `[hr]`.
    Single,
}

/// Styles of known tags.
///
/// Tags not registered here are [`Style::Default`].
///
/// Deserializes from a table of tag names to styles:
///
/// ```toml
/// hr = "single"
/// img = "single"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct TagStyles(HashMap<String, Style>);

impl TagStyles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct with all `names` registered as [`Style::Single`].
    pub fn with_single<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names
            .into_iter()
            .map(|name| (name.into(), Style::Single))
            .collect()
    }

    /// Record the style for `name`, overwriting the previous one.
    pub fn register(&mut self, name: impl Into<String>, style: Style) {
        self.0.insert(name.into(), style);
    }

    /// Style registered for `name`, [`Style::Default`] if none.
    pub fn style(&self, name: &str) -> Style {
        self.0.get(name).copied().unwrap_or_default()
    }

    /// Count of registered tags.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Style)> for TagStyles {
    fn from_iter<T: IntoIterator<Item = (String, Style)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<(String, Style)> for TagStyles {
    fn extend<T: IntoIterator<Item = (String, Style)>>(&mut self, iter: T) {
        self.0.extend(iter)
    }
}
