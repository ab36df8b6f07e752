#![deny(missing_docs)]
//! Node.js bindings that surface docblocks' Rust implementation.

use docblocks_core::{
    AlertContext, AlertProps, Content, ImageConfig, SiteConfig, TabItem, Tabs, alert_icon,
    render_alert,
};
use docblocks_mdx::{DocumentOptions, RegistryConfig, compile_document, rewrite_components};
use napi::bindgen_prelude::*;
use napi_derive::napi;
use serde_json::Value as JsonValue;

/// Batch processing types and functions.
pub mod batch;
/// NAPI-exposed data structures.
pub mod types;

pub use batch::*;
pub use types::*;

fn to_napi_error(err: impl std::fmt::Display) -> Error {
    Error::from_reason(err.to_string())
}

/// Renders an alert to HTML.
///
/// An unknown `context` is rejected rather than rendered unstyled. Without an
/// `icon` the context's default glyph is shown.
#[napi(js_name = "renderAlert")]
pub fn render_alert_napi(input: AlertInput) -> napi::Result<String> {
    let context = match input.context.as_deref() {
        Some(raw) => raw.parse::<AlertContext>().map_err(to_napi_error)?,
        None => AlertContext::default(),
    };
    Ok(render_alert(&AlertProps {
        icon: alert_icon(input.icon, context),
        context,
        children: Content::html(input.children),
    }))
}

/// Renders a tab set to HTML: header row plus the selected pane.
///
/// Returns an empty string for an empty tab list.
#[napi(js_name = "renderTabs")]
pub fn render_tabs_napi(input: TabsInput) -> napi::Result<String> {
    let items = input
        .tabs
        .into_iter()
        .map(|tab| TabItem::new(tab.title, Content::html(tab.children)))
        .collect();
    let mut tabs = Tabs::new(items);
    if let Some(index) = input.active_index {
        tabs.select(index as usize).map_err(to_napi_error)?;
    }
    Ok(tabs.render())
}

/// Rewrites `<Alert>`, `<Tabs>` and `<Tab>` tags in already-rendered HTML.
#[napi(js_name = "rewriteComponents")]
pub fn rewrite_components_napi(html: String) -> napi::Result<RewriteResult> {
    let (html, stats) = rewrite_components(&html).map_err(to_napi_error)?;
    Ok(RewriteResult::new(html, stats))
}

pub(crate) fn document_options(config: Option<CompilerConfig>) -> napi::Result<DocumentOptions> {
    let config = config.unwrap_or_default();
    let registry = match config.registry {
        Some(value) => Some(
            serde_json::from_value::<RegistryConfig>(value)
                .map_err(|e| Error::from_reason(format!("Invalid registry: {}", e)))?,
        ),
        None => None,
    };
    let defaults = DocumentOptions::default();
    Ok(DocumentOptions {
        directives: config.directives.unwrap_or(defaults.directives),
        gfm: config.gfm.unwrap_or(defaults.gfm),
        registry,
    })
}

/// Compiles a Markdown/MDX page to HTML with components rendered.
///
/// # Example (JavaScript)
///
/// ```javascript
/// const { compileDocument } = require('docblocks-napi');
///
/// const { html, frontmatter } = compileDocument(':::warning\nCareful.\n:::');
/// ```
#[napi(js_name = "compileDocument")]
pub fn compile_document_napi(
    source: String,
    config: Option<CompilerConfig>,
) -> napi::Result<CompileResult> {
    let options = document_options(config)?;
    compile_document(&source, &options)
        .map(CompileResult::from)
        .map_err(to_napi_error)
}

/// Parses a site configuration and returns it with defaults filled in.
///
/// `format` is `"json"` (default) or `"yaml"`.
#[napi(js_name = "parseSiteConfig")]
pub fn parse_site_config(source: String, format: Option<String>) -> napi::Result<JsonValue> {
    let config = match format.as_deref().unwrap_or("json") {
        "json" => SiteConfig::from_json_str(&source),
        "yaml" | "yml" => SiteConfig::from_yaml_str(&source),
        other => {
            return Err(Error::from_reason(format!(
                "Unsupported config format: {}",
                other
            )));
        }
    }
    .map_err(to_napi_error)?;
    serde_json::to_value(&config).map_err(to_napi_error)
}

/// Returns true when an image source may be rendered under the given image
/// settings (JSON), or under the site defaults when none are given.
#[napi(js_name = "isImageAllowed")]
pub fn is_image_allowed(src: String, images: Option<JsonValue>) -> napi::Result<bool> {
    let images = match images {
        Some(value) => serde_json::from_value::<ImageConfig>(value).map_err(to_napi_error)?,
        None => ImageConfig::default(),
    };
    Ok(images.allows(&src))
}
