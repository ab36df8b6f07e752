//! Default directive registry.

use docblocks_core::AlertContext;
use once_cell::sync::Lazy;

use super::types::{DirectiveMapping, RegistryConfig};

/// Directive names understood without configuration.
const DEFAULT_DIRECTIVES: &[&str] = &[
    "success", "warning", "error", "info", "note", "tip", "caution", "danger",
];

static DEFAULT_REGISTRY: Lazy<RegistryConfig> = Lazy::new(|| RegistryConfig {
    directive_mappings: DEFAULT_DIRECTIVES
        .iter()
        .filter_map(|name| {
            AlertContext::from_directive(name).map(|context| DirectiveMapping {
                directive: name.to_string(),
                context,
                icon: None,
            })
        })
        .collect(),
});

/// Returns the default registry: the four contexts plus the usual aside aliases.
///
/// # Example
///
/// ```
/// use docblocks_core::AlertContext;
/// use docblocks_mdx::default_registry;
///
/// let registry = default_registry();
/// assert_eq!(
///     registry.get_directive_mapping("danger").map(|m| m.context),
///     Some(AlertContext::Error)
/// );
/// ```
pub fn default_registry() -> &'static RegistryConfig {
    &DEFAULT_REGISTRY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_every_context() {
        let registry = default_registry();
        for context in AlertContext::ALL {
            assert!(registry.is_supported_directive(context.as_str()));
        }
        assert!(!registry.is_supported_directive("aside"));
    }

    #[test]
    fn aliases_map_to_contexts() {
        let registry = default_registry();
        let context = |name: &str| registry.get_directive_mapping(name).map(|m| m.context);
        assert_eq!(context("note"), Some(AlertContext::Info));
        assert_eq!(context("TIP"), Some(AlertContext::Info));
        assert_eq!(context("caution"), Some(AlertContext::Warning));
        assert_eq!(context("danger"), Some(AlertContext::Error));
    }

    #[test]
    fn insert_replaces_existing() {
        let mut registry = default_registry().clone();
        let before = registry.directive_mappings.len();
        registry.insert(DirectiveMapping {
            directive: "tip".into(),
            context: AlertContext::Success,
            icon: Some("💡".into()),
        });
        registry.insert(DirectiveMapping {
            directive: "deprecated".into(),
            context: AlertContext::Warning,
            icon: None,
        });
        assert_eq!(registry.directive_mappings.len(), before + 1);
        let tip = registry.get_directive_mapping("tip").unwrap();
        assert_eq!(tip.context, AlertContext::Success);
        assert_eq!(tip.icon.as_deref(), Some("💡"));
    }
}
