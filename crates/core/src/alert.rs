//! Alert (callout) component.
//!
//! An alert is a single container with an icon region and a content region.
//! Its colour treatment comes from a fixed table keyed by [`AlertContext`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::content::{Content, escape_attr};
use crate::error::DocblocksError;

/// Layout classes shared by every alert, appended after the context bucket.
pub const ALERT_LAYOUT_CLASSES: &str = "p-4 rounded-lg border flex gap-3 items-start shadow-sm transition-all duration-200 ease-in-out hover:shadow-md";
/// Classes of the icon region.
pub const ALERT_ICON_CLASSES: &str = "text-2xl flex-shrink-0 mt-0.5";
/// Classes of the content region.
pub const ALERT_BODY_CLASSES: &str = "space-y-2 text-sm leading-relaxed flex-grow";

/// Severity category of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertContext {
    /// Green treatment.
    Success,
    /// Yellow treatment.
    Warning,
    /// Red treatment.
    Error,
    /// Blue treatment.
    #[default]
    Info,
}

impl AlertContext {
    /// All contexts in declaration order.
    pub const ALL: [AlertContext; 4] = [
        AlertContext::Success,
        AlertContext::Warning,
        AlertContext::Error,
        AlertContext::Info,
    ];

    /// Lowercase name used in markup and attributes.
    pub fn as_str(self) -> &'static str {
        match self {
            AlertContext::Success => "success",
            AlertContext::Warning => "warning",
            AlertContext::Error => "error",
            AlertContext::Info => "info",
        }
    }

    /// Icon used when the author supplies none.
    pub fn default_icon(self) -> &'static str {
        match self {
            AlertContext::Success => "✅",
            AlertContext::Warning => "⚠️",
            AlertContext::Error => "❌",
            AlertContext::Info => "ℹ️",
        }
    }

    /// Maps a directive name to a context, accepting the common aside aliases.
    pub fn from_directive(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "success" => Some(AlertContext::Success),
            "warning" | "caution" => Some(AlertContext::Warning),
            "error" | "danger" => Some(AlertContext::Error),
            "info" | "note" | "tip" => Some(AlertContext::Info),
            _ => None,
        }
    }
}

impl fmt::Display for AlertContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlertContext {
    type Err = DocblocksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "success" => Ok(AlertContext::Success),
            "warning" => Ok(AlertContext::Warning),
            "error" => Ok(AlertContext::Error),
            "info" => Ok(AlertContext::Info),
            other => Err(DocblocksError::UnknownContext(other.to_string())),
        }
    }
}

/// Colour classes for one severity bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleDescriptor {
    /// Background class.
    pub background: &'static str,
    /// Border colour class.
    pub border: &'static str,
    /// Text colour class.
    pub text: &'static str,
}

impl StyleDescriptor {
    /// Space-separated class list of the bucket.
    pub fn class_list(&self) -> String {
        format!("{} {} {}", self.background, self.border, self.text)
    }
}

/// Looks up the style bucket for a context.
pub fn style_for(context: AlertContext) -> StyleDescriptor {
    match context {
        AlertContext::Success => StyleDescriptor {
            background: "bg-green-50",
            border: "border-green-200",
            text: "text-green-700",
        },
        AlertContext::Warning => StyleDescriptor {
            background: "bg-yellow-50",
            border: "border-yellow-200",
            text: "text-yellow-700",
        },
        AlertContext::Error => StyleDescriptor {
            background: "bg-red-50",
            border: "border-red-200",
            text: "text-red-700",
        },
        AlertContext::Info => StyleDescriptor {
            background: "bg-blue-50",
            border: "border-blue-200",
            text: "text-blue-700",
        },
    }
}

/// Props of an alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertProps {
    /// Icon shown before the body.
    pub icon: Content,
    /// Severity category.
    #[serde(default)]
    pub context: AlertContext,
    /// Body content.
    pub children: Content,
}

impl AlertProps {
    /// Creates props with the default (`info`) context.
    pub fn new(icon: impl Into<Content>, children: impl Into<Content>) -> Self {
        Self {
            icon: icon.into(),
            context: AlertContext::default(),
            children: children.into(),
        }
    }

    /// Sets the context.
    pub fn with_context(mut self, context: AlertContext) -> Self {
        self.context = context;
        self
    }
}

/// Icon content for bindings that take optional icon markup: the given HTML,
/// or the context's default glyph.
pub fn alert_icon(icon: Option<String>, context: AlertContext) -> Content {
    match icon {
        Some(icon) => Content::html(icon),
        None => Content::text(context.default_icon()),
    }
}

/// Class attribute of the alert container for a context.
pub fn container_classes(context: AlertContext) -> String {
    format!("{} {}", style_for(context).class_list(), ALERT_LAYOUT_CLASSES)
}

/// Opening markup of an alert up to (and including) the start of the content region.
///
/// The HTML rewriter streams the body between this and [`alert_close`].
pub fn alert_open(context: AlertContext, icon: &Content) -> String {
    let mut out = String::with_capacity(256);
    out.push_str("<div class=\"");
    out.push_str(&container_classes(context));
    out.push_str("\" role=\"alert\" data-context=\"");
    out.push_str(&escape_attr(context.as_str()));
    out.push_str("\"><div class=\"");
    out.push_str(ALERT_ICON_CLASSES);
    out.push_str("\">");
    icon.write_to(&mut out);
    out.push_str("</div><div class=\"");
    out.push_str(ALERT_BODY_CLASSES);
    out.push_str("\">");
    out
}

/// Closing markup matching [`alert_open`].
pub fn alert_close() -> &'static str {
    "</div></div>"
}

/// Renders an alert to HTML.
pub fn render_alert(props: &AlertProps) -> String {
    let mut out = alert_open(props.context, &props.icon);
    props.children.write_to(&mut out);
    out.push_str(alert_close());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buckets() -> Vec<String> {
        AlertContext::ALL
            .iter()
            .map(|c| style_for(*c).class_list())
            .collect()
    }

    #[test]
    fn each_context_renders_only_its_bucket() {
        let all = buckets();
        for (i, context) in AlertContext::ALL.iter().enumerate() {
            let html = render_alert(&AlertProps::new("!", "body").with_context(*context));
            for (j, bucket) in all.iter().enumerate() {
                assert_eq!(html.contains(bucket.as_str()), i == j, "{context} vs {bucket}");
            }
        }
    }

    #[test]
    fn exactly_one_icon_and_content_region() {
        let long_body = "word ".repeat(500);
        for body in ["", "short", long_body.as_str()] {
            let html = render_alert(&AlertProps::new("i", body));
            assert_eq!(html.matches(ALERT_ICON_CLASSES).count(), 1);
            assert_eq!(html.matches(ALERT_BODY_CLASSES).count(), 1);
            assert!(html.find(ALERT_ICON_CLASSES) < html.find(ALERT_BODY_CLASSES));
        }
    }

    #[test]
    fn error_context_ignores_content() {
        for (icon, body) in [("", ""), ("🔥", "disk full"), ("<svg/>", "<p>x</p>")] {
            let props = AlertProps {
                icon: Content::html(icon),
                context: AlertContext::Error,
                children: Content::html(body),
            };
            let html = render_alert(&props);
            assert!(html.starts_with("<div class=\"bg-red-50 border-red-200 text-red-700 "));
        }
    }

    #[test]
    fn default_context_is_info() {
        let props = AlertProps::new("i", "b");
        assert_eq!(props.context, AlertContext::Info);
        assert!(render_alert(&props).contains("data-context=\"info\""));
    }

    #[test]
    fn missing_icon_falls_back_to_glyph() {
        assert_eq!(
            alert_icon(None, AlertContext::Warning),
            Content::text(AlertContext::Warning.default_icon())
        );
        assert_eq!(
            alert_icon(Some("<svg/>".into()), AlertContext::Warning),
            Content::html("<svg/>")
        );
    }

    #[test]
    fn parse_rejects_unknown_context() {
        assert_eq!("warning".parse::<AlertContext>().unwrap(), AlertContext::Warning);
        let err = "critical".parse::<AlertContext>().unwrap_err();
        assert!(matches!(err, DocblocksError::UnknownContext(ref s) if s == "critical"));
    }

    #[test]
    fn directive_aliases() {
        assert_eq!(AlertContext::from_directive("NOTE"), Some(AlertContext::Info));
        assert_eq!(AlertContext::from_directive("danger"), Some(AlertContext::Error));
        assert_eq!(AlertContext::from_directive("caution"), Some(AlertContext::Warning));
        assert_eq!(AlertContext::from_directive("aside"), None);
    }

    #[test]
    fn props_deserialize_with_default_context() {
        let props: AlertProps = serde_json::from_str(
            r#"{"icon":{"type":"text","value":"!"},"children":{"type":"text","value":"hi"}}"#,
        )
        .unwrap();
        assert_eq!(props.context, AlertContext::Info);
    }

    #[test]
    fn success_markup_snapshot() {
        let html = render_alert(
            &AlertProps::new("✅", "Saved & synced").with_context(AlertContext::Success),
        );
        insta::assert_snapshot!(html, @r#"<div class="bg-green-50 border-green-200 text-green-700 p-4 rounded-lg border flex gap-3 items-start shadow-sm transition-all duration-200 ease-in-out hover:shadow-md" role="alert" data-context="success"><div class="text-2xl flex-shrink-0 mt-0.5">✅</div><div class="space-y-2 text-sm leading-relaxed flex-grow">Saved &amp; synced</div></div>"#);
    }
}
