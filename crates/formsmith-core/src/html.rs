//! Pre-escaped HTML fragments.
//!
//! Every builder operation returns an [`Html`] value. Its contents have
//! already been escaped where needed, so a template layer should interpolate
//! it verbatim. This is the equivalent of a template engine's "safe string".

use std::fmt;

use serde::{Serialize, Serializer};

/// A fragment of HTML that is safe to interpolate without further escaping.
///
/// `Html` can only be built from trusted markup (via [`Html::from_trusted`]) or
/// from text that gets escaped on the way in (via [`Html::text`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Html(String);

impl Html {
    /// Returns an empty fragment.
    pub const fn empty() -> Self {
        Self(String::new())
    }

    /// Wraps markup the caller vouches for as already escaped.
    pub fn from_trusted(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    /// Escapes plain text into an HTML fragment.
    pub fn text(text: &str) -> Self {
        Self(escape_html(text))
    }

    /// Returns the markup as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the fragment and returns the markup.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Returns `true` if the fragment contains no markup.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends another fragment.
    pub fn push(&mut self, other: &Self) {
        self.0.push_str(&other.0);
    }
}

impl fmt::Display for Html {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Html> for String {
    fn from(html: Html) -> Self {
        html.0
    }
}

impl AsRef<str> for Html {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Serializes as the bare markup. Template engines that auto-escape context
// values still need a `safe` filter; prefer the engine's own safe mechanism.
impl Serialize for Html {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Escapes HTML special characters in a string.
///
/// Replaces `&`, `<`, `>`, `"`, and `'` with their entity equivalents, which
/// makes the result safe both as element text and as a quoted attribute value.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html_all_specials() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#x27;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_html_plain_text_unchanged() {
        assert_eq!(escape_html("hello world"), "hello world");
    }

    #[test]
    fn test_escape_html_does_not_double_escape_once() {
        assert_eq!(escape_html("&amp;"), "&amp;amp;");
    }

    #[test]
    fn test_html_text_escapes() {
        let html = Html::text("<b>");
        assert_eq!(html.as_str(), "&lt;b&gt;");
    }

    #[test]
    fn test_html_from_trusted_verbatim() {
        let html = Html::from_trusted("<b>bold</b>");
        assert_eq!(html.to_string(), "<b>bold</b>");
    }

    #[test]
    fn test_html_push_and_empty() {
        let mut html = Html::empty();
        assert!(html.is_empty());
        html.push(&Html::from_trusted("<br>"));
        assert_eq!(html.into_string(), "<br>");
    }

    #[test]
    fn test_html_serializes_as_string() {
        let json = serde_json::to_string(&Html::from_trusted("<i>x</i>")).unwrap();
        assert_eq!(json, r#""<i>x</i>""#);
    }
}
