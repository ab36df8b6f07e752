//! Site build configuration.
//!
//! Models the documentation site's build settings: which files are pages,
//! which remote image hosts may be rendered, which loaders handle native
//! modules, and which modules are left out of client bundles.
//!
//! The configuration is read from JSON or YAML. Every field has a default that
//! matches the shipped site, so a partial file only overrides what it names.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Errors emitted while loading or validating a site configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON failed to parse.
    #[error("Config JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// YAML failed to parse.
    #[error("Config YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// The file extension is neither JSON nor YAML.
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),
    /// Parsed, but a value is not usable.
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Build target a module is resolved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildTarget {
    /// Server bundle (SSR and build-time rendering).
    Server,
    /// Browser bundle.
    Client,
}

/// Outcome of resolving a module import for a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleResolution {
    /// Resolve normally.
    Bundled,
    /// Replaced with an empty module.
    Excluded,
}

/// MDX authoring support.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MdxIntegration {
    /// Whether `.md`/`.mdx` files are compiled.
    pub enabled: bool,
    /// Rewrite `:::context` directive blocks into alerts.
    pub directives: bool,
}

impl Default for MdxIntegration {
    fn default() -> Self {
        Self {
            enabled: true,
            directives: true,
        }
    }
}

/// Allowed remote image source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemotePattern {
    /// `http` or `https`; empty matches both.
    #[serde(default)]
    pub protocol: String,
    /// Exact host, `*.example.com` (one label) or `**.example.com` (any depth).
    pub hostname: String,
    /// Port as written in the URL; empty matches only the default port.
    #[serde(default)]
    pub port: String,
    /// Path glob; `/**` matches everything below the root.
    #[serde(default = "default_pathname")]
    pub pathname: String,
}

fn default_pathname() -> String {
    "/**".to_string()
}

impl RemotePattern {
    /// Pattern allowing any path on `hostname` over https.
    pub fn https(hostname: impl Into<String>) -> Self {
        Self {
            protocol: "https".to_string(),
            hostname: hostname.into(),
            port: String::new(),
            pathname: default_pathname(),
        }
    }

    /// Returns true when `url` is covered by this pattern.
    pub fn matches(&self, url: &Url) -> bool {
        if !self.protocol.is_empty() && url.scheme() != self.protocol {
            return false;
        }
        let Some(host) = url.host_str() else {
            return false;
        };
        if !hostname_matches(&self.hostname, host) {
            return false;
        }
        let port = url.port().map(|p| p.to_string()).unwrap_or_default();
        if port != self.port {
            return false;
        }
        pathname_matches(&self.pathname, url.path())
    }
}

fn hostname_matches(pattern: &str, host: &str) -> bool {
    if let Some(suffix) = pattern.strip_prefix("**.") {
        return host.len() > suffix.len() + 1
            && host.ends_with(suffix)
            && host[..host.len() - suffix.len()].ends_with('.');
    }
    if let Some(suffix) = pattern.strip_prefix("*.") {
        return match host.split_once('.') {
            Some((label, rest)) => !label.is_empty() && rest == suffix,
            None => false,
        };
    }
    pattern.eq_ignore_ascii_case(host)
}

fn pathname_matches(pattern: &str, path: &str) -> bool {
    if let Some(prefix) = pattern.strip_suffix("/**") {
        return path == prefix || path.starts_with(&format!("{prefix}/"));
    }
    if let Some(prefix) = pattern.strip_suffix("/*") {
        return match path.strip_prefix(&format!("{prefix}/")) {
            Some(rest) => !rest.contains('/'),
            None => false,
        };
    }
    pattern == path
}

/// Image rendering settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageConfig {
    /// Serve images as-is instead of through the optimizer.
    pub unoptimized: bool,
    /// Allow SVG sources.
    pub dangerously_allow_svg: bool,
    /// Legacy host allowlist; any scheme and path.
    pub domains: Vec<String>,
    /// Fine-grained allowlist.
    pub remote_patterns: Vec<RemotePattern>,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            unoptimized: true,
            dangerously_allow_svg: true,
            domains: vec!["oss.laf.run".to_string(), "static.ppinfra.com".to_string()],
            remote_patterns: vec![
                RemotePattern::https("oss.laf.run"),
                RemotePattern::https("static.ppinfra.com"),
            ],
        }
    }
}

impl ImageConfig {
    /// Returns true when a remote image may be rendered.
    ///
    /// Relative sources are local assets and always allowed; protocol-relative
    /// ones (`//host/...`) are remote and resolved against `https:`. SVG
    /// sources also need `dangerously_allow_svg`.
    pub fn allows(&self, src: &str) -> bool {
        let src = src.trim();
        let parsed = if is_protocol_relative(src) {
            Url::parse(&format!("https:{}", src))
        } else {
            Url::parse(src)
        };
        let url = match parsed {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                return self.dangerously_allow_svg || !is_svg_path(src);
            }
            Err(err) => {
                log::debug!("image source '{}' rejected: {}", src, err);
                return false;
            }
        };
        if !matches!(url.scheme(), "http" | "https") {
            return false;
        }
        if is_svg_path(url.path()) && !self.dangerously_allow_svg {
            return false;
        }
        let host = url.host_str().unwrap_or_default();
        self.domains.iter().any(|d| d.eq_ignore_ascii_case(host))
            || self.remote_patterns.iter().any(|p| p.matches(&url))
    }

    /// Returns true when an allowed image should go through the optimizer.
    pub fn should_optimize(&self, src: &str) -> bool {
        !self.unoptimized && self.allows(src)
    }
}

fn is_protocol_relative(src: &str) -> bool {
    let mut chars = src.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some('/' | '\\'), Some('/' | '\\'))
    )
}

fn is_svg_path(path: &str) -> bool {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    path.to_ascii_lowercase().ends_with(".svg")
}

/// Loader chain applied to files with a given extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoaderRule {
    /// Extension without the dot (e.g. `node`).
    pub extension: String,
    /// Loaders applied in order.
    pub loaders: Vec<String>,
}

/// Full site configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteConfig {
    /// Build output mode.
    pub output: String,
    /// Development double-render checks.
    pub react_strict_mode: bool,
    /// Extensions routed as pages.
    pub page_extensions: Vec<String>,
    /// MDX authoring.
    pub mdx: MdxIntegration,
    /// Remote image policy.
    pub images: ImageConfig,
    /// Extra loader rules.
    pub loader_rules: Vec<LoaderRule>,
    /// Client-side module fallbacks; `false` replaces the module with an empty one.
    pub client_fallbacks: BTreeMap<String, bool>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            output: "standalone".to_string(),
            react_strict_mode: true,
            page_extensions: ["js", "jsx", "ts", "tsx", "md", "mdx"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            mdx: MdxIntegration::default(),
            images: ImageConfig::default(),
            loader_rules: vec![LoaderRule {
                extension: "node".to_string(),
                loaders: vec!["node-loader".to_string()],
            }],
            client_fallbacks: BTreeMap::from([("canvas".to_string(), false)]),
        }
    }
}

impl SiteConfig {
    /// Parses and validates a JSON document.
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a YAML document.
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a config file, picking the format from its extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        log::debug!("loading site config from {}", path.display());
        match ext.as_str() {
            "json" => Self::from_json_str(&source),
            "yaml" | "yml" => Self::from_yaml_str(&source),
            other => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Checks values serde cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for pattern in &self.images.remote_patterns {
            if !matches!(pattern.protocol.as_str(), "" | "http" | "https") {
                return Err(ConfigError::Invalid(format!(
                    "remote pattern for '{}' has unsupported protocol '{}'",
                    pattern.hostname, pattern.protocol
                )));
            }
            if pattern.hostname.is_empty() {
                return Err(ConfigError::Invalid(
                    "remote pattern hostname must not be empty".to_string(),
                ));
            }
            if !pattern.port.is_empty() && pattern.port.parse::<u16>().is_err() {
                return Err(ConfigError::Invalid(format!(
                    "remote pattern for '{}' has invalid port '{}'",
                    pattern.hostname, pattern.port
                )));
            }
        }
        for rule in &self.loader_rules {
            if rule.extension.trim_start_matches('.').is_empty() || rule.loaders.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "loader rule '{}' needs an extension and at least one loader",
                    rule.extension
                )));
            }
        }
        if self.mdx.enabled
            && !self
                .page_extensions
                .iter()
                .any(|e| e == "md" || e == "mdx")
        {
            log::warn!("MDX is enabled but no md/mdx page extension is routed");
        }
        Ok(())
    }

    /// Returns true when `path` is routed as a page.
    pub fn is_page(&self, path: impl AsRef<Path>) -> bool {
        let Some(ext) = path.as_ref().extension().and_then(|e| e.to_str()) else {
            return false;
        };
        if !self.mdx.enabled && (ext == "md" || ext == "mdx") {
            return false;
        }
        self.page_extensions.iter().any(|e| e == ext)
    }

    /// Loaders configured for `path`, if any rule matches its extension.
    pub fn loaders_for(&self, path: impl AsRef<Path>) -> Option<&[String]> {
        let ext = path.as_ref().extension()?.to_str()?;
        self.loader_rules
            .iter()
            .find(|r| r.extension.trim_start_matches('.') == ext)
            .map(|r| r.loaders.as_slice())
    }

    /// Decides whether `module` is bundled for `target`.
    pub fn resolve_module(&self, module: &str, target: BuildTarget) -> ModuleResolution {
        match target {
            BuildTarget::Server => ModuleResolution::Bundled,
            BuildTarget::Client => match self.client_fallbacks.get(module) {
                Some(false) => ModuleResolution::Excluded,
                _ => ModuleResolution::Bundled,
            },
        }
    }
}
