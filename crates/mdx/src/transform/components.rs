//! Rewrites `<Alert>`, `<Tabs>` and `<Tab>` tags in rendered HTML into component markup.
//!
//! Rewriting runs in two streaming passes. The first collects the tab titles
//! of every `<Tabs>` group, because the header row is emitted before any pane
//! has been seen. The second emits the markup: each pane is rendered, and all
//! but the first carry `hidden` so the browser widget can switch panes
//! without another render.

use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use docblocks_core::content::Content;
use docblocks_core::tabs::{pane_open, render_header};
use docblocks_core::{AlertContext, DocblocksError, alert_close, alert_open};
use lol_html::html_content::{ContentType, Element, EndTag};
use lol_html::{
    ElementContentHandlers, EndTagHandler, RewriteStrSettings, Selector, element, rewrite_str,
};

type Handler = (Cow<'static, Selector>, ElementContentHandlers<'static>);

/// Counts of components rewritten in one document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteStats {
    /// `<Alert>` elements.
    pub alerts: usize,
    /// `<Tabs>` groups with at least one pane.
    pub tab_groups: usize,
    /// `<Tab>` panes, including ones outside a group.
    pub panes: usize,
}

/// Builder for aggregating element handlers before passing to lol_html.
#[derive(Default)]
pub struct ComponentHandlers {
    handlers: Vec<Handler>,
}

impl ComponentHandlers {
    /// Creates an empty handler list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a single handler tuple.
    pub fn push(&mut self, handler: Handler) -> &mut Self {
        self.handlers.push(handler);
        self
    }

    /// Converts into the handler vector.
    pub fn into_vec(self) -> Vec<Handler> {
        self.handlers
    }
}

/// Tab titles per `<Tabs>` group, in document order of the opening tags.
type TabGroups = Vec<Vec<String>>;

/// Rewrites component tags in `html`.
///
/// Fails fast on an `<Alert>` whose `context` is not one of the four
/// severity categories.
pub fn rewrite_components(html: &str) -> Result<(String, RewriteStats), DocblocksError> {
    let groups = collect_tab_groups(html)?;
    let stats = Rc::new(Cell::new(RewriteStats::default()));
    let panes = PaneStack::default();

    let mut handlers = ComponentHandlers::new();
    handlers
        .push(alert_handler(stats.clone()))
        .push(tabs_handler(Rc::new(groups), panes.clone(), stats.clone()))
        .push(tab_handler(panes, stats.clone()));

    let output = run(html, handlers.into_vec())?;
    Ok((output, stats.get()))
}

fn run(html: &str, handlers: Vec<Handler>) -> Result<String, DocblocksError> {
    rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: handlers,
            ..RewriteStrSettings::new()
        },
    )
    .map_err(|err| match err {
        lol_html::errors::RewritingError::ContentHandlerError(inner) => {
            match inner.downcast::<DocblocksError>() {
                Ok(own) => *own,
                Err(other) => DocblocksError::render(other.to_string()),
            }
        }
        other => DocblocksError::render(other.to_string()),
    })
}

/// First pass: titles of the `<Tab>` children of each `<Tabs>`.
fn collect_tab_groups(html: &str) -> Result<TabGroups, DocblocksError> {
    let groups: Rc<RefCell<TabGroups>> = Rc::default();
    let stack: Rc<RefCell<Vec<usize>>> = Rc::default();

    let tabs = {
        let groups = groups.clone();
        let stack = stack.clone();
        element!("Tabs", move |el| {
            let id = {
                let mut groups = groups.borrow_mut();
                groups.push(Vec::new());
                groups.len() - 1
            };
            stack.borrow_mut().push(id);
            if let Some(end) = el.end_tag_handlers() {
                let stack = stack.clone();
                let pop: EndTagHandler<'static> = Box::new(move |_: &mut EndTag<'_>| {
                    stack.borrow_mut().pop();
                    Ok(())
                });
                end.push(pop);
            }
            Ok(())
        })
    };

    let tab = {
        let groups = groups.clone();
        let stack = stack.clone();
        element!("Tab", move |el| {
            if let Some(&id) = stack.borrow().last() {
                let title = attribute(el, "title").unwrap_or_default();
                if title.is_empty() {
                    log::warn!("<Tab> without a title in tab group {}", id);
                }
                groups.borrow_mut()[id].push(title);
            }
            Ok(())
        })
    };

    run(html, vec![tabs, tab])?;
    let collected = groups.borrow().clone();
    Ok(collected)
}

/// Attribute value with character references resolved. lol_html hands out
/// the raw source text, and the renderers escape again on output.
fn attribute(el: &Element<'_, '_>, name: &str) -> Option<String> {
    el.get_attribute(name)
        .map(|raw| html_escape::decode_html_entities(&raw).into_owned())
}

fn alert_handler(stats: Rc<Cell<RewriteStats>>) -> Handler {
    element!("Alert", move |el| {
        let context = match attribute(el, "context") {
            Some(raw) => raw.parse::<AlertContext>()?,
            None => AlertContext::default(),
        };
        let icon = match attribute(el, "icon") {
            Some(icon) => Content::text(icon),
            None => Content::text(context.default_icon()),
        };

        el.before(&alert_open(context, &icon), ContentType::Html);
        el.after(alert_close(), ContentType::Html);
        el.remove_and_keep_content();

        let mut s = stats.get();
        s.alerts += 1;
        stats.set(s);
        Ok(())
    })
}

/// Per-group pane counter for the second pass. `None` marks an empty group.
type PaneStack = Rc<RefCell<Vec<Option<usize>>>>;

fn tabs_handler(
    groups: Rc<TabGroups>,
    panes: PaneStack,
    stats: Rc<Cell<RewriteStats>>,
) -> Handler {
    let next_group = Cell::new(0usize);

    element!("Tabs", move |el| {
        let id = next_group.get();
        next_group.set(id + 1);
        let titles: Vec<&str> = groups
            .get(id)
            .map(|g| g.iter().map(String::as_str).collect())
            .unwrap_or_default();

        if let Some(end) = el.end_tag_handlers() {
            let panes = panes.clone();
            let pop: EndTagHandler<'static> = Box::new(move |_: &mut EndTag<'_>| {
                panes.borrow_mut().pop();
                Ok(())
            });
            end.push(pop);
        }

        if titles.is_empty() {
            log::debug!("<Tabs> group {} has no <Tab> children; dropping wrapper", id);
            panes.borrow_mut().push(None);
        } else {
            let mut open = String::from("<div class=\"tabs-container\" data-tabs>");
            open.push_str(&render_header(&titles, 0));
            el.before(&open, ContentType::Html);
            el.after("</div>", ContentType::Html);
            panes.borrow_mut().push(Some(0));

            let mut s = stats.get();
            s.tab_groups += 1;
            stats.set(s);
        }
        el.remove_and_keep_content();
        Ok(())
    })
}

fn tab_handler(panes: PaneStack, stats: Rc<Cell<RewriteStats>>) -> Handler {
    element!("Tab", move |el| {
        let title = attribute(el, "title").unwrap_or_default();
        let open = match panes.borrow_mut().last_mut() {
            Some(Some(next)) => {
                let index = *next;
                *next += 1;
                pane_open(&title, Some(index), index != 0)
            }
            _ => pane_open(&title, None, false),
        };
        el.before(&open, ContentType::Html);
        el.after("</div>", ContentType::Html);
        el.remove_and_keep_content();

        let mut s = stats.get();
        s.panes += 1;
        stats.set(s);
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewrite(html: &str) -> (String, RewriteStats) {
        rewrite_components(html).expect("rewrite should succeed")
    }

    #[test]
    fn alert_gets_context_bucket_and_regions() {
        let (out, stats) =
            rewrite(r#"<Alert context="error" icon="!"><p>Disk full</p></Alert>"#);
        assert_eq!(stats.alerts, 1);
        assert!(out.starts_with("<div class=\"bg-red-50 border-red-200 text-red-700 "));
        assert!(out.contains("mt-0.5\">!</div>"));
        assert!(out.contains("flex-grow\"><p>Disk full</p></div></div>"));
        assert!(!out.contains("<Alert") && !out.contains("</Alert>"));
    }

    #[test]
    fn alert_defaults_to_info_with_default_icon() {
        let (out, _) = rewrite("<Alert>hi</Alert>");
        assert!(out.contains("data-context=\"info\""));
        assert!(out.contains(AlertContext::Info.default_icon()));
    }

    #[test]
    fn unknown_alert_context_fails() {
        let err = rewrite_components(r#"<Alert context="fatal">x</Alert>"#).unwrap_err();
        assert!(matches!(err, DocblocksError::UnknownContext(ref c) if c == "fatal"), "{err:?}");
    }

    #[test]
    fn tabs_emit_header_and_hidden_panes() {
        let html = r#"<Tabs><Tab title="A">1</Tab><Tab title="B">2</Tab><Tab title="C">3</Tab></Tabs>"#;
        let (out, stats) = rewrite(html);
        assert_eq!(
            stats,
            RewriteStats {
                alerts: 0,
                tab_groups: 1,
                panes: 3
            }
        );
        assert_eq!(out.matches("tab-button active").count(), 1);
        assert!(out.contains("data-tab-index=\"0\">A</button>"));
        assert!(out.contains("aria-label=\"A\" data-tab-index=\"0\">1</div>"));
        assert!(out.contains("aria-label=\"B\" data-tab-index=\"1\" hidden>2</div>"));
        assert!(out.contains("aria-label=\"C\" data-tab-index=\"2\" hidden>3</div>"));
        assert!(out.starts_with("<div class=\"tabs-container\" data-tabs><div class=\"tabs-header\""));
        assert!(out.ends_with("</div></div>"));
    }

    #[test]
    fn groups_are_independent() {
        let html = r#"<Tabs><Tab title="x">a</Tab></Tabs><Tabs><Tab title="y">b</Tab><Tab title="z">c</Tab></Tabs>"#;
        let (out, stats) = rewrite(html);
        assert_eq!(stats.tab_groups, 2);
        assert_eq!(out.matches("tab-button active").count(), 2);
        assert!(out.contains(">y</button><button"));
        assert!(out.contains("aria-label=\"z\" data-tab-index=\"1\" hidden>c</div>"));
    }

    #[test]
    fn nested_groups_keep_their_own_titles() {
        let html = r#"<Tabs><Tab title="outer"><Tabs><Tab title="inner1">i</Tab><Tab title="inner2">j</Tab></Tabs></Tab><Tab title="second">s</Tab></Tabs>"#;
        let groups = collect_tab_groups(html).unwrap();
        assert_eq!(
            groups,
            vec![
                vec!["outer".to_string(), "second".to_string()],
                vec!["inner1".to_string(), "inner2".to_string()],
            ]
        );
        let (out, _) = rewrite(html);
        assert!(out.contains("aria-label=\"second\" data-tab-index=\"1\" hidden>s</div>"));
        assert!(out.contains("aria-label=\"inner2\" data-tab-index=\"1\" hidden>j</div>"));
    }

    #[test]
    fn empty_tabs_render_no_tabs_markup() {
        let (out, stats) = rewrite("<Tabs></Tabs>");
        assert_eq!(out, "");
        assert_eq!(stats.tab_groups, 0);
    }

    #[test]
    fn lone_tab_is_a_plain_pane() {
        let (out, _) = rewrite(r#"<Tab title="Solo">body</Tab>"#);
        insta::assert_snapshot!(out, @r#"<div class="tab-content" role="tabpanel" aria-label="Solo">body</div>"#);
    }

    #[test]
    fn attribute_entities_are_not_escaped_twice() {
        let (out, _) = rewrite(r#"<Tabs><Tab title="R&amp;D">x</Tab></Tabs>"#);
        assert!(out.contains("data-tab-index=\"0\">R&amp;D</button>"), "{out}");
        assert!(out.contains("aria-label=\"R&amp;D\""), "{out}");

        let (out, _) = rewrite(r#"<Alert icon="&lt;!&gt;">x</Alert>"#);
        assert!(out.contains("mt-0.5\">&lt;!&gt;</div>"), "{out}");
    }

    #[test]
    fn directive_icon_survives_both_passes() {
        let registry = crate::registry::default_registry();
        let (md, _) = crate::transform::directives::rewrite_directives(
            ":::tip icon='\"A&B\"'\nx\n:::",
            registry,
        );
        let (out, _) = rewrite(&md);
        assert!(out.contains("mt-0.5\">\"A&amp;B\"</div>"), "{out}");
    }

    #[test]
    fn other_markup_is_untouched() {
        let html = "<h1>Title</h1><p>Text <code>&lt;Alert&gt;</code></p>";
        let (out, stats) = rewrite(html);
        assert_eq!(out, html);
        assert_eq!(stats, RewriteStats::default());
    }
}
