//! Renderable content passed into component slots.

use serde::{Deserialize, Serialize};

/// Content placed inside a component region.
///
/// Text is escaped when rendered; HTML is trusted and written verbatim.
/// Markup produced by the rewriter and by other components is always `Html`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum Content {
    /// Plain text, escaped on output.
    Text(String),
    /// Pre-rendered HTML.
    Html(String),
}

impl Content {
    /// Creates text content.
    pub fn text(value: impl Into<String>) -> Self {
        Content::Text(value.into())
    }

    /// Creates trusted HTML content.
    pub fn html(value: impl Into<String>) -> Self {
        Content::Html(value.into())
    }

    /// Returns true when there is nothing to render.
    pub fn is_empty(&self) -> bool {
        match self {
            Content::Text(value) | Content::Html(value) => value.is_empty(),
        }
    }

    /// Appends the rendered form to `out`.
    pub fn write_to(&self, out: &mut String) {
        match self {
            Content::Text(value) => {
                html_escape::encode_text_to_string(value, out);
            }
            Content::Html(value) => out.push_str(value),
        }
    }

    /// Returns the rendered form.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }
}

impl Default for Content {
    fn default() -> Self {
        Content::Text(String::new())
    }
}

impl From<&str> for Content {
    fn from(value: &str) -> Self {
        Content::text(value)
    }
}

impl From<String> for Content {
    fn from(value: String) -> Self {
        Content::Text(value)
    }
}

/// Escapes a value for use inside a double-quoted attribute.
pub(crate) fn escape_attr(value: &str) -> std::borrow::Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(value)
}
