use thiserror::Error;

use crate::frontmatter::FrontmatterError;

/// Errors raised while building or rendering components.
#[derive(Debug, Error)]
pub enum DocblocksError {
    /// An alert context string outside success/warning/error/info.
    #[error("Unknown alert context '{0}': expected one of success, warning, error, info")]
    UnknownContext(String),
    /// `Tabs::select` called with an index past the last entry.
    #[error("Tab index {index} out of range for {len} tab(s)")]
    TabIndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of tabs
        len: usize,
    },
    /// The HTML rewriter failed outside any component handler.
    #[error("Render error: {0}")]
    Render(String),
    /// markdown-rs rejected the document.
    #[error("Markdown error: {0}")]
    Markdown(String),
    /// Frontmatter could not be extracted.
    #[error(transparent)]
    Frontmatter(#[from] FrontmatterError),
}

impl DocblocksError {
    /// Create a render error
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render(message.into())
    }
}
