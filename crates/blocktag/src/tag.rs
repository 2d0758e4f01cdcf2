use crate::error::{BlockTagError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Key holding the value of the `[name:value]` shorthand.
pub const SHORTHAND_KEY: &str = "value";

const SHORTHAND_SEP: char = ':';
const ATTR_SEP: char = '=';
const SLASH: char = '/';

/// Parsed tag header, the text between `[` and `]`.
///
/// `[$name $key=$value $flag]` or `[$name:$value]`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag name.
    ///
    /// Never empty. A leading `/` is kept as written.
    pub name: String,

    /// Attributes.
    ///
    /// Keys are unique: when a header repeats a key, the last occurrence overwrites the earlier
    /// ones. A flag attribute without `=` holds an empty value.
    pub attrs: HashMap<String, String>,
}

impl Tag {
    /// Construct a tag without attributes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: HashMap::new(),
        }
    }

    /// Add an attribute, overwriting any previous value under the same key.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Get the attribute, if any.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Name of the tag this one closes, when it is a closing tag like `[/name]`.
    ///
    /// Only one leading `/` is stripped and the rest is trimmed.
    pub fn closing_name(&self) -> Option<&str> {
        self.name.strip_prefix(SLASH).map(str::trim)
    }
}

/// Render back into header text, without the brackets.
///
/// Attributes are written in key order. The output parses back into an equal [`Tag`] as long as
/// no attribute contains whitespace.
impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        let mut attrs = self.attrs.iter().collect::<Vec<_>>();
        attrs.sort();
        for (key, value) in attrs {
            // An empty key keeps its `=`, or the field would vanish when parsed back.
            if value.is_empty() && !key.is_empty() {
                write!(f, " {key}")?;
            } else {
                write!(f, " {key}{ATTR_SEP}{value}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for Tag {
    type Err = BlockTagError;

    fn from_str(s: &str) -> Result<Self> {
        parse_tag(s)
    }
}

/// Parse the header text found between `[` and `]`.
///
/// Three syntaxes are supported:
///
/// * `name`
/// * `name key=value flag`, where `flag` gets an empty value.
/// * `name:value`, stored as a single attribute under [`SHORTHAND_KEY`]. Only the first `:`
///   separates, and no other field may follow.
///
/// # Errors
///
/// * [`BlockTagError::EmptyTag`] when the header has no fields.
/// * [`BlockTagError::SyntaxError`] when the shorthand is mixed with other fields or has no name.
pub fn parse_tag(header: &str) -> Result<Tag> {
    let mut fields = header.split_whitespace();
    let first = fields.next().ok_or(BlockTagError::EmptyTag)?;

    if let Some((name, value)) = first.split_once(SHORTHAND_SEP) {
        if fields.next().is_some() {
            return Err(BlockTagError::SyntaxError(format!(
                "shorthand tag {first:?} can not have other attributes"
            )));
        }
        if name.is_empty() {
            return Err(BlockTagError::SyntaxError(format!(
                "shorthand tag {first:?} has no name"
            )));
        }
        return Ok(Tag::new(name).with_attr(SHORTHAND_KEY, value));
    }

    let attrs = fields
        .map(|field| match field.split_once(ATTR_SEP) {
            Some((key, value)) => (key.to_string(), value.to_string()),
            None => (field.to_string(), String::new()),
        })
        .collect::<HashMap<_, _>>();

    Ok(Tag {
        name: first.to_string(),
        attrs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tag() {
        let tab = [
            ("tag", Tag::new("tag")),
            ("name uid=1", Tag::new("name").with_attr("uid", "1")),
            (
                "name uid=1 to=aaa flag",
                Tag::new("name")
                    .with_attr("uid", "1")
                    .with_attr("to", "aaa")
                    .with_attr("flag", ""),
            ),
            ("  spaced\tname  ", Tag::new("spaced").with_attr("name", "")),
            ("/info", Tag::new("/info")),
        ];
        for (header, want) in tab {
            assert_eq!(parse_tag(header).unwrap(), want, "parse_tag({header:?})");
        }
    }

    #[test]
    fn test_parse_tag_shorthand() {
        assert_eq!(
            parse_tag("name:1").unwrap(),
            Tag::new("name").with_attr("value", "1")
        );
        // Only the first colon separates.
        assert_eq!(
            parse_tag("url:http://x.org").unwrap(),
            Tag::new("url").with_attr("value", "http://x.org")
        );
        assert_eq!(
            parse_tag("name:").unwrap(),
            Tag::new("name").with_attr("value", "")
        );
    }

    #[test]
    fn test_parse_tag_shorthand_mixed() {
        assert!(matches!(
            parse_tag("name:1 uid=2"),
            Err(BlockTagError::SyntaxError(_))
        ));
        assert!(matches!(
            parse_tag("name:1 flag"),
            Err(BlockTagError::SyntaxError(_))
        ));
    }

    #[test]
    fn test_parse_tag_shorthand_without_name() {
        assert!(matches!(parse_tag(":1"), Err(BlockTagError::SyntaxError(_))));
    }

    #[test]
    fn test_parse_tag_empty() {
        assert!(matches!(parse_tag(""), Err(BlockTagError::EmptyTag)));
        assert!(matches!(parse_tag(" \t\n"), Err(BlockTagError::EmptyTag)));
    }

    #[test]
    fn test_parse_tag_duplicate_key_last_wins() {
        let tag = parse_tag("name k=1 k=2 k").unwrap();
        assert_eq!(tag.attrs.len(), 1);
        assert_eq!(tag.attr("k"), Some(""));
    }

    #[test]
    fn test_parse_tag_value_keeps_later_equals() {
        let tag = parse_tag("img src=a.png?w=3").unwrap();
        assert_eq!(tag.attr("src"), Some("a.png?w=3"));
    }

    #[test]
    fn test_closing_name() {
        assert_eq!(Tag::new("/info").closing_name(), Some("info"));
        assert_eq!(Tag::new("//info").closing_name(), Some("/info"));
        assert_eq!(Tag::new("info").closing_name(), None);
    }

    #[test]
    fn test_display_parses_back() {
        let tag = Tag::new("name")
            .with_attr("uid", "1")
            .with_attr("flag", "")
            .with_attr("to", "aaa");
        assert_eq!(tag.to_string(), "name flag to=aaa uid=1");
        assert_eq!(tag.to_string().parse::<Tag>().unwrap(), tag);
    }

    #[test]
    fn test_display_empty_key() {
        let tag = parse_tag("a =").unwrap();
        assert_eq!(tag.attr(""), Some(""));
        assert_eq!(tag.to_string(), "a =");
        assert_eq!(parse_tag("a =v").unwrap().to_string(), "a =v");
    }
}
