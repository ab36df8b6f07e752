use docblocks_core::{AlertContext, AlertProps, Content, TabItem, Tabs, alert_icon, render_alert};
use docblocks_mdx::{DocumentOptions, compile_document, rewrite_components};
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

// ============================================================================
// Inputs
// ============================================================================

/// Alert props as passed from JavaScript. `icon` and `children` are HTML;
/// `children` is required.
#[derive(Debug, Clone, Deserialize)]
pub struct WasmAlertInput {
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
    pub children: String,
}

/// One tab entry. `children` is HTML.
#[derive(Debug, Clone, Deserialize)]
pub struct WasmTabInput {
    pub title: String,
    pub children: String,
}

/// Options accepted by [`compile`]. Mirrors the NAPI `CompilerConfig`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WasmCompilerConfig {
    #[serde(default)]
    pub directives: Option<bool>,
    #[serde(default)]
    pub gfm: Option<bool>,
}

fn js_error(err: impl std::fmt::Display) -> JsError {
    JsError::new(&err.to_string())
}

fn parse_config(config: JsValue) -> Result<WasmCompilerConfig, JsError> {
    if config.is_undefined() || config.is_null() {
        return Ok(WasmCompilerConfig::default());
    }
    serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsError::new(&format!("Invalid options: {}", e)))
}

// ============================================================================
// Alert
// ============================================================================

/// Renders an alert to HTML.
///
/// Without an `icon`, the context's default glyph is used.
#[wasm_bindgen(js_name = renderAlert)]
pub fn render_alert_js(props: JsValue) -> Result<String, JsError> {
    let input: WasmAlertInput = serde_wasm_bindgen::from_value(props)
        .map_err(|e| JsError::new(&format!("Invalid alert props: {}", e)))?;
    let context = match input.context.as_deref() {
        Some(raw) => raw.parse::<AlertContext>().map_err(js_error)?,
        None => AlertContext::default(),
    };
    Ok(render_alert(&AlertProps {
        icon: alert_icon(input.icon, context),
        context,
        children: Content::html(input.children),
    }))
}

// ============================================================================
// Tabs
// ============================================================================

/// Stateful tab switcher for client-side use.
///
/// ```javascript
/// const tabs = new TabsWidget([{ title: 'A', children: '1' }, { title: 'B', children: '2' }]);
/// tabs.select(1);
/// container.innerHTML = tabs.render();
/// ```
#[wasm_bindgen]
pub struct TabsWidget {
    inner: Tabs,
}

#[wasm_bindgen]
impl TabsWidget {
    /// Builds a widget from an array of `{ title, children }`. The first tab
    /// starts active.
    #[wasm_bindgen(constructor)]
    pub fn new(items: JsValue) -> Result<TabsWidget, JsError> {
        let items: Vec<WasmTabInput> = serde_wasm_bindgen::from_value(items)
            .map_err(|e| JsError::new(&format!("Invalid tabs: {}", e)))?;
        let items = items
            .into_iter()
            .map(|tab| TabItem::new(tab.title, Content::html(tab.children)))
            .collect();
        Ok(TabsWidget {
            inner: Tabs::new(items),
        })
    }

    /// Makes `index` the visible pane. Throws when out of range.
    pub fn select(&mut self, index: usize) -> Result<(), JsError> {
        self.inner.select(index).map_err(js_error)
    }

    #[wasm_bindgen(getter, js_name = activeIndex)]
    pub fn active_index(&self) -> usize {
        self.inner.active_index()
    }

    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.inner.len()
    }

    /// Tab titles in header order.
    pub fn titles(&self) -> js_sys::Array {
        self.inner
            .items()
            .iter()
            .map(|item| JsValue::from_str(&item.title))
            .collect()
    }

    #[wasm_bindgen(js_name = renderHeader)]
    pub fn render_header(&self) -> String {
        self.inner.render_header()
    }

    /// Header plus the active pane; empty for an empty widget.
    pub fn render(&self) -> String {
        self.inner.render()
    }
}

// ============================================================================
// Documents
// ============================================================================

/// Counts and HTML returned by [`rewrite`] and [`compile`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteOutput {
    pub html: String,
    pub alerts: usize,
    pub tab_groups: usize,
    pub panes: usize,
}

/// Rewrites `<Alert>`, `<Tabs>` and `<Tab>` tags in rendered HTML.
#[wasm_bindgen(js_name = rewriteComponents)]
pub fn rewrite(html: &str) -> Result<JsValue, JsError> {
    let (html, stats) = rewrite_components(html).map_err(js_error)?;
    let output = RewriteOutput {
        html,
        alerts: stats.alerts,
        tab_groups: stats.tab_groups,
        panes: stats.panes,
    };
    serde_wasm_bindgen::to_value(&output)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// Compiles a Markdown/MDX page to HTML with components rendered.
///
/// Returns `{ html, frontmatter, directiveCount, alerts, tabGroups, panes }`.
#[wasm_bindgen]
pub fn compile(source: &str, config: JsValue) -> Result<JsValue, JsError> {
    let cfg = parse_config(config)?;
    let defaults = DocumentOptions::default();
    let options = DocumentOptions {
        directives: cfg.directives.unwrap_or(defaults.directives),
        gfm: cfg.gfm.unwrap_or(defaults.gfm),
        registry: None,
    };
    let output = compile_document(source, &options).map_err(js_error)?;
    output
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}
