#![deny(missing_docs)]
//! docblocks MDX engine: directive expansion, component rewriting, and document compilation.

/// Markdown → HTML pipeline with component rewriting.
pub mod compile;
/// Directive registry (directive name → alert context).
pub mod registry;
/// Text and HTML transforms.
pub mod transform;

pub use compile::{CompileOutput, DocumentOptions, compile_document};
pub use registry::{DirectiveMapping, RegistryConfig, default_registry};
pub use transform::components::{RewriteStats, rewrite_components};
pub use transform::directives::rewrite_directives;
