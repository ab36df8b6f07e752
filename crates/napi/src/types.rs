//! NAPI-exposed data structures.

use docblocks_mdx::CompileOutput;
use docblocks_mdx::RewriteStats;
use napi_derive::napi;
use serde_json::Value as JsonValue;

/// Alert props as passed from JavaScript. `icon` and `children` are HTML.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct AlertInput {
    /// Icon markup; the context's default glyph when absent.
    pub icon: Option<String>,
    /// `success`, `warning`, `error` or `info` (default).
    pub context: Option<String>,
    /// Body markup.
    pub children: String,
}

/// One tab entry. `children` is HTML.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct TabInput {
    /// Header label.
    pub title: String,
    /// Pane markup.
    pub children: String,
}

/// Tabs props as passed from JavaScript.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct TabsInput {
    /// Entries in header order.
    pub tabs: Vec<TabInput>,
    /// Initially visible pane (default 0).
    pub active_index: Option<u32>,
}

/// Options accepted by `compileDocument` and `compileBatch`.
#[napi(object)]
#[derive(Debug, Clone, Default)]
pub struct CompilerConfig {
    /// Expand `:::context` directives (default true).
    pub directives: Option<bool>,
    /// GitHub-flavoured Markdown (default true).
    pub gfm: Option<bool>,
    /// Directive registry (JSON, `{ directiveMappings: [...] }`).
    pub registry: Option<JsonValue>,
}

/// Counts returned by `rewriteComponents`.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct RewriteResult {
    /// Rewritten HTML.
    pub html: String,
    /// Alerts rendered.
    pub alerts: u32,
    /// Tab groups rendered.
    pub tab_groups: u32,
    /// Panes rendered.
    pub panes: u32,
}

impl RewriteResult {
    pub(crate) fn new(html: String, stats: RewriteStats) -> Self {
        Self {
            html,
            alerts: stats.alerts as u32,
            tab_groups: stats.tab_groups as u32,
            panes: stats.panes as u32,
        }
    }
}

/// Compiled document.
#[napi(object)]
#[derive(Debug, Clone)]
pub struct CompileResult {
    /// Rendered HTML.
    pub html: String,
    /// Frontmatter object.
    pub frontmatter: JsonValue,
    /// Directives expanded.
    pub directive_count: u32,
    /// Alerts rendered.
    pub alerts: u32,
    /// Tab groups rendered.
    pub tab_groups: u32,
    /// Panes rendered.
    pub panes: u32,
}

impl From<CompileOutput> for CompileResult {
    fn from(out: CompileOutput) -> Self {
        Self {
            html: out.html,
            frontmatter: out.frontmatter,
            directive_count: out.directive_count as u32,
            alerts: out.alerts as u32,
            tab_groups: out.tab_groups as u32,
            panes: out.panes as u32,
        }
    }
}
