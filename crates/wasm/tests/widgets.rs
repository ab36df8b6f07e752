use docblocks_wasm::{TabsWidget, compile, render_alert_js, rewrite};
use serde::Deserialize;
use serde::Serialize;
use wasm_bindgen_test::*;

#[derive(Serialize)]
struct Tab {
    title: &'static str,
    children: &'static str,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct Output {
    html: String,
    alerts: usize,
    tab_groups: usize,
    panes: usize,
}

fn to_js(value: serde_json::Value) -> wasm_bindgen::JsValue {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap()
}

fn widget(titles: &[&'static str]) -> TabsWidget {
    let tabs: Vec<Tab> = titles
        .iter()
        .map(|&title| Tab {
            title,
            children: "body",
        })
        .collect();
    TabsWidget::new(serde_wasm_bindgen::to_value(&tabs).unwrap()).ok().expect("valid tabs")
}

#[wasm_bindgen_test]
fn tabs_widget_switches_panes() {
    let mut tabs = widget(&["A", "B", "C"]);
    assert_eq!(tabs.length(), 3);
    assert_eq!(tabs.active_index(), 0);

    assert!(tabs.select(2).is_ok());
    assert_eq!(tabs.active_index(), 2);
    let html = tabs.render();
    assert!(html.contains("aria-selected=\"true\" data-tab-index=\"2\">C</button>"));
    assert_eq!(html.matches("tab-button active").count(), 1);
    assert_eq!(tabs.titles().length(), 3);
}

#[wasm_bindgen_test]
fn tabs_widget_rejects_out_of_range() {
    let mut tabs = widget(&["A", "B"]);
    assert!(tabs.select(5).is_err());
    assert_eq!(tabs.active_index(), 0);
}

#[wasm_bindgen_test]
fn empty_tabs_widget_renders_nothing() {
    let tabs = widget(&[]);
    assert_eq!(tabs.render(), "");
}

#[wasm_bindgen_test]
fn render_alert_uses_default_icon() {
    let props = to_js(serde_json::json!({
        "context": "warning",
        "children": "<p>Careful</p>"
    }));
    let html = render_alert_js(props).ok().expect("render");
    assert!(html.contains("bg-yellow-50"));
    assert!(html.contains("⚠️"));
    assert!(html.contains("<p>Careful</p>"));
}

#[wasm_bindgen_test]
fn render_alert_rejects_unknown_context() {
    let props = to_js(serde_json::json!({ "context": "loud", "children": "x" }));
    assert!(render_alert_js(props).is_err());
}

#[wasm_bindgen_test]
fn render_alert_requires_children() {
    let props = to_js(serde_json::json!({ "context": "info", "icon": "i" }));
    assert!(render_alert_js(props).is_err());
}

#[wasm_bindgen_test]
fn rewrite_components_counts() {
    let out = rewrite(r#"<Tabs><Tab title="A">1</Tab><Tab title="B">2</Tab></Tabs>"#).ok().unwrap();
    let out: Output = serde_wasm_bindgen::from_value(out).unwrap();
    assert_eq!(out.tab_groups, 1);
    assert_eq!(out.panes, 2);
    assert!(out.html.contains("data-tab-index=\"1\" hidden>2</div>"));
}

#[wasm_bindgen_test]
fn compile_expands_directives() {
    let out = compile(":::tip\nUse **pnpm**.\n:::\n", wasm_bindgen::JsValue::UNDEFINED).ok().unwrap();
    let out: Output = serde_wasm_bindgen::from_value(out).unwrap();
    assert_eq!(out.alerts, 1);
    assert!(out.html.contains("bg-blue-50"));
    assert!(out.html.contains("<strong>pnpm</strong>"));
}
