//! Directive registry: which `:::name` blocks become alerts, and with which context.

mod defaults;
mod types;

pub use defaults::default_registry;
pub use types::{DirectiveMapping, RegistryConfig};
