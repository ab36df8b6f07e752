//! Registry type definitions.

use docblocks_core::AlertContext;
use serde::{Deserialize, Serialize};

/// Directive mappings, usually passed in from JavaScript as JSON.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegistryConfig {
    /// Directive to alert mappings.
    pub directive_mappings: Vec<DirectiveMapping>,
}

/// Maps a directive name to an alert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DirectiveMapping {
    /// Directive name (e.g. "warning", "tip").
    pub directive: String,
    /// Context given to the alert.
    pub context: AlertContext,
    /// Icon override; the context's default icon otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl RegistryConfig {
    /// Check if a directive name is supported.
    pub fn is_supported_directive(&self, name: &str) -> bool {
        self.get_directive_mapping(name).is_some()
    }

    /// Get the full mapping for a directive name (case-insensitive).
    pub fn get_directive_mapping(&self, directive: &str) -> Option<&DirectiveMapping> {
        self.directive_mappings
            .iter()
            .find(|m| m.directive.eq_ignore_ascii_case(directive))
    }

    /// Adds or replaces a mapping.
    pub fn insert(&mut self, mapping: DirectiveMapping) {
        match self
            .directive_mappings
            .iter_mut()
            .find(|m| m.directive.eq_ignore_ascii_case(&mapping.directive))
        {
            Some(existing) => *existing = mapping,
            None => self.directive_mappings.push(mapping),
        }
    }
}
