//! Tabs / Tab component.
//!
//! [`Tabs`] owns an ordered list of [`TabItem`]s and the index of the visible
//! pane. Declaration order addresses both the header buttons and the panes.

use serde::{Deserialize, Serialize};

use crate::content::{Content, escape_attr};
use crate::error::DocblocksError;

/// Scoped styles for the tabs markup.
pub const TABS_STYLESHEET: &str = r#".tabs-container { margin: 1rem 0; }
.tabs-header { display: flex; gap: 0.5rem; margin-bottom: 1rem; border-bottom: 1px solid #e5e7eb; }
.tab-button { padding: 0.5rem 1rem; border: none; background: none; cursor: pointer; font-size: 0.875rem; color: #4b5563; border-bottom: 2px solid transparent; margin-bottom: -1px; }
.tab-button:hover { color: #1f2937; }
.tab-button.active { color: #2563eb; border-bottom-color: #2563eb; }
.tab-content { padding: 1rem 0; }
"#;

/// One titled pane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabItem {
    /// Header label.
    pub title: String,
    /// Pane body.
    #[serde(alias = "children")]
    pub body: Content,
}

impl TabItem {
    /// Creates a tab entry.
    pub fn new(title: impl Into<String>, body: impl Into<Content>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Visual state of a header button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ButtonState {
    /// Matches the active index.
    Active,
    /// Any other button.
    Inactive,
}

/// View of one header button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabButton<'a> {
    /// Position in the header.
    pub index: usize,
    /// Label.
    pub title: &'a str,
    /// Active or inactive.
    pub state: ButtonState,
}

/// A set of panes with exactly one visible at a time.
///
/// An empty set is allowed and renders nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tabs {
    items: Vec<TabItem>,
    active_index: usize,
}

impl Tabs {
    /// Creates a tab set with the first entry active.
    pub fn new(items: Vec<TabItem>) -> Self {
        Self {
            items,
            active_index: 0,
        }
    }

    /// Entries in declaration order.
    pub fn items(&self) -> &[TabItem] {
        &self.items
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when there are no entries.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index of the visible pane.
    pub fn active_index(&self) -> usize {
        self.active_index
    }

    /// The visible entry, if any.
    pub fn active_item(&self) -> Option<&TabItem> {
        self.items.get(self.active_index)
    }

    /// Makes entry `index` the visible one.
    ///
    /// Fails without touching the selection when `index` is out of range.
    pub fn select(&mut self, index: usize) -> Result<(), DocblocksError> {
        if index >= self.items.len() {
            return Err(DocblocksError::TabIndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        if index != self.active_index {
            log::debug!("tabs: selection {} -> {}", self.active_index, index);
            self.active_index = index;
        }
        Ok(())
    }

    /// Header buttons in entry order.
    pub fn buttons(&self) -> Vec<TabButton<'_>> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| TabButton {
                index,
                title: &item.title,
                state: if index == self.active_index {
                    ButtonState::Active
                } else {
                    ButtonState::Inactive
                },
            })
            .collect()
    }

    /// Renders the header row only.
    pub fn render_header(&self) -> String {
        let titles: Vec<&str> = self.items.iter().map(|i| i.title.as_str()).collect();
        render_header(&titles, self.active_index)
    }

    /// Renders the container: header plus the active pane's body.
    pub fn render(&self) -> String {
        let Some(active) = self.active_item() else {
            return String::new();
        };
        let mut out = String::from("<div class=\"tabs-container\">");
        out.push_str(&self.render_header());
        out.push_str(&pane_open(&active.title, Some(self.active_index), false));
        active.body.write_to(&mut out);
        out.push_str("</div></div>");
        out
    }
}

/// Renders a header row for the given titles with `active` highlighted.
pub fn render_header(titles: &[&str], active: usize) -> String {
    let mut out = String::from("<div class=\"tabs-header\" role=\"tablist\">");
    for (index, title) in titles.iter().enumerate() {
        let is_active = index == active;
        out.push_str("<button type=\"button\" class=\"");
        out.push_str(if is_active { "tab-button active" } else { "tab-button" });
        out.push_str("\" role=\"tab\" aria-selected=\"");
        out.push_str(if is_active { "true" } else { "false" });
        out.push_str("\" data-tab-index=\"");
        out.push_str(&index.to_string());
        out.push_str("\">");
        html_escape::encode_text_to_string(title, &mut out);
        out.push_str("</button>");
    }
    out.push_str("</div>");
    out
}

/// Opening tag of a pane.
///
/// `index` ties the pane to its header button; `hidden` marks panes the
/// client widget has not selected yet.
pub fn pane_open(title: &str, index: Option<usize>, hidden: bool) -> String {
    let mut out = String::from("<div class=\"tab-content\" role=\"tabpanel\" aria-label=\"");
    out.push_str(&escape_attr(title));
    out.push('"');
    if let Some(index) = index {
        out.push_str(" data-tab-index=\"");
        out.push_str(&index.to_string());
        out.push('"');
    }
    if hidden {
        out.push_str(" hidden");
    }
    out.push('>');
    out
}

/// Renders a single pane body wrapper.
pub fn render_tab(item: &TabItem) -> String {
    let mut out = pane_open(&item.title, None, false);
    item.body.write_to(&mut out);
    out.push_str("</div>");
    out
}
