#![deny(missing_docs)]
//! docblocks core: Alert and Tabs components, content escaping, and site configuration.

/// Alert (callout) component.
pub mod alert;
/// Site build configuration.
pub mod config;
/// Renderable content and escaping.
pub mod content;
/// Core error types.
pub mod error;
/// YAML frontmatter extraction helpers.
pub mod frontmatter;
/// Tabs / Tab component.
pub mod tabs;

pub use alert::{
    AlertContext, AlertProps, StyleDescriptor, alert_close, alert_icon, alert_open, render_alert,
    style_for,
};
pub use config::{
    BuildTarget, ConfigError, ImageConfig, LoaderRule, MdxIntegration, ModuleResolution,
    RemotePattern, SiteConfig,
};
pub use content::Content;
pub use error::DocblocksError;
pub use frontmatter::{FrontmatterError, FrontmatterExtraction, extract_frontmatter};
pub use tabs::{
    ButtonState, TABS_STYLESHEET, TabButton, TabItem, Tabs, pane_open, render_header, render_tab,
};
