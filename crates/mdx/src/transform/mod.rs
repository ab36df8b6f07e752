//! Transform utilities for documentation sources.
//!
//! - `fence`: tracks fenced code blocks so directives inside them are left alone.
//! - `directives`: rewrites `:::context` blocks into `<Alert>` tags.
//! - `components`: rewrites `<Alert>`, `<Tabs>` and `<Tab>` tags into component markup.

/// Component tag rewriting (lol_html).
pub mod components;
/// Directive expansion.
pub mod directives;
/// Code fence state tracking.
pub mod fence;
