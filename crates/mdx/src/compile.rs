//! Markdown/MDX document → HTML with Alert and Tabs components rendered.

use docblocks_core::{DocblocksError, SiteConfig, extract_frontmatter};
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::registry::{RegistryConfig, default_registry};
use crate::transform::components::{RewriteStats, rewrite_components};
use crate::transform::directives::rewrite_directives;

/// Options for [`compile_document`].
#[derive(Debug, Clone)]
pub struct DocumentOptions {
    /// Expand `:::context` directives into alerts.
    pub directives: bool,
    /// GitHub-flavoured Markdown extensions (tables, strikethrough, ...).
    pub gfm: bool,
    /// Directive mappings; the default registry when `None`.
    pub registry: Option<RegistryConfig>,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            directives: true,
            gfm: true,
            registry: None,
        }
    }
}

impl DocumentOptions {
    /// Options matching a site's MDX settings.
    pub fn from_site(config: &SiteConfig) -> Self {
        Self {
            directives: config.mdx.directives,
            ..Self::default()
        }
    }
}

/// Result of compiling one document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileOutput {
    /// Rendered HTML.
    pub html: String,
    /// Frontmatter as a JSON object.
    pub frontmatter: JsonValue,
    /// Directives expanded into alerts.
    pub directive_count: usize,
    /// Alerts rendered (directive and tag form).
    pub alerts: usize,
    /// Tab groups rendered.
    pub tab_groups: usize,
    /// Panes rendered.
    pub panes: usize,
}

/// Compiles a documentation page.
///
/// Steps: split off frontmatter, expand directives, render Markdown with raw
/// HTML passthrough, then rewrite component tags.
pub fn compile_document(
    source: &str,
    options: &DocumentOptions,
) -> Result<CompileOutput, DocblocksError> {
    let extraction = extract_frontmatter(source)?;
    let body = &source[extraction.body_start..];

    let (body, directive_count) = if options.directives {
        let registry = options.registry.as_ref().unwrap_or_else(|| default_registry());
        let (rewritten, count) = rewrite_directives(body, registry);
        (std::borrow::Cow::Owned(rewritten), count)
    } else {
        (std::borrow::Cow::Borrowed(body), 0)
    };

    let html = render_markdown(&body, options.gfm)?;
    let (html, stats) = rewrite_components(&html)?;
    let RewriteStats {
        alerts,
        tab_groups,
        panes,
    } = stats;

    log::debug!(
        "compiled document: {} directive(s), {} alert(s), {} tab group(s)",
        directive_count,
        alerts,
        tab_groups
    );

    Ok(CompileOutput {
        html,
        frontmatter: extraction.value,
        directive_count,
        alerts,
        tab_groups,
        panes,
    })
}

fn render_markdown(body: &str, gfm: bool) -> Result<String, DocblocksError> {
    let options = markdown::Options {
        parse: if gfm {
            markdown::ParseOptions::gfm()
        } else {
            markdown::ParseOptions::default()
        },
        compile: markdown::CompileOptions {
            allow_dangerous_html: true,
            ..if gfm {
                markdown::CompileOptions::gfm()
            } else {
                markdown::CompileOptions::default()
            }
        },
    };
    markdown::to_html_with_options(body, &options)
        .map_err(|message| DocblocksError::Markdown(message.to_string()))
}
