//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! serialized to a TOML table and the user's file is merged on top, so a
//! config file only needs the keys it wants to change.
//!
//! ## Config File Location
//!
//! ```text
//! content/
//! ├── config.toml        # Site config (optional)
//! ├── home.md
//! ├── projects.toml
//! ├── projects/
//! └── blog/
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! [site]
//! title = "Portfolio"
//! author = ""
//! description = "Projects and writing."
//! base_url = "https://example.com"   # Absolute, used for sitemap and canonical URLs
//!
//! [blog]
//! hidden_tags = ["blog", "blog_article"]   # Authoring tags never shown on the site
//! words_per_minute = 200
//!
//! [transition]
//! settle_ms = 50        # Wait after navigating before the new state is captured
//! fallback_ms = 1000    # Give up waiting for the route change after this long
//!
//! [sitemap]
//! enable = true
//!
//! [colors.light]
//! background = "#f8fafc"
//! ...
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Identity and absolute location of the site.
    pub site: SiteMeta,
    /// Blog front matter handling.
    pub blog: BlogConfig,
    /// Client-side page transition timing.
    pub transition: TransitionConfig,
    /// Sitemap output.
    pub sitemap: SitemapConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.title.trim().is_empty() {
            return Err(ConfigError::Validation("site.title must not be empty".into()));
        }
        let url = &self.site.base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "site.base_url must be an absolute http(s) URL, got {url:?}"
            )));
        }
        if self.blog.words_per_minute == 0 {
            return Err(ConfigError::Validation(
                "blog.words_per_minute must be non-zero".into(),
            ));
        }
        if self.transition.settle_ms >= self.transition.fallback_ms {
            return Err(ConfigError::Validation(
                "transition.settle_ms must be smaller than transition.fallback_ms".into(),
            ));
        }
        Ok(())
    }
}

/// Site identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteMeta {
    /// Shown in `<title>` and the footer.
    pub title: String,
    /// Author name for the footer and meta tags. Empty means omitted.
    pub author: String,
    /// Default meta description.
    pub description: String,
    /// Absolute base URL without trailing slash.
    pub base_url: String,
}

impl SiteMeta {
    /// Base URL with any trailing slashes removed.
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Absolute URL for a site path such as `/blog/post`.
    pub fn absolute(&self, path: &str) -> String {
        if path == "/" || path.is_empty() {
            self.base_url().to_string()
        } else {
            format!("{}{}", self.base_url(), path)
        }
    }
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            author: String::new(),
            description: "Projects and writing.".to_string(),
            base_url: "https://example.com".to_string(),
        }
    }
}

/// Blog front matter handling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BlogConfig {
    /// Tags used by the authoring tool to mark notes as posts; dropped on the site.
    pub hidden_tags: Vec<String>,
    /// Reading speed used for the "N min read" estimate.
    pub words_per_minute: u32,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            hidden_tags: vec!["blog".to_string(), "blog_article".to_string()],
            words_per_minute: 200,
        }
    }
}

/// Page transition timing, emitted into the client script.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransitionConfig {
    /// Milliseconds to wait after pushing the route so the new content starts
    /// rendering before the transition captures it.
    pub settle_ms: u64,
    /// Milliseconds after which a route change that was never observed is
    /// treated as done.
    pub fallback_ms: u64,
}

impl TransitionConfig {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            settle_ms: 50,
            fallback_ms: 1000,
        }
    }
}

/// Sitemap output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SitemapConfig {
    /// Write `sitemap.xml` into the output directory.
    pub enable: bool,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self { enable: true }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    /// Card and nav bar surface.
    pub surface: String,
    pub text: String,
    /// Dates, tags, footer.
    pub text_muted: String,
    pub border: String,
    /// Links, active tag filter, focus rings.
    pub accent: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#f8fafc".to_string(),
            surface: "#ffffff".to_string(),
            text: "#0f172a".to_string(),
            text_muted: "#64748b".to_string(),
            border: "#e2e8f0".to_string(),
            accent: "#2563eb".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#020617".to_string(),
            surface: "#0f172a".to_string(),
            text: "#e2e8f0".to_string(),
            text_muted: "#94a3b8".to_string(),
            border: "#334155".to_string(),
            accent: "#60a5fa".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key by key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the content root, on top of stock defaults.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(root)?)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# folio configuration
# ===================
# All settings are optional. Values shown below are the defaults.
# Place this file at content/config.toml. Unknown keys are an error.

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
title = "Portfolio"
# Author name for the footer and meta tags (empty = omitted).
author = ""
description = "Projects and writing."
# Absolute base URL, used for the sitemap and canonical links.
base_url = "https://example.com"

# ---------------------------------------------------------------------------
# Blog
# ---------------------------------------------------------------------------
[blog]
# Tags that only mark a note as a blog post in the authoring tool.
hidden_tags = ["blog", "blog_article"]
# Reading speed for the "N min read" estimate.
words_per_minute = 200

# ---------------------------------------------------------------------------
# Page transitions (browsers with view transition support)
# ---------------------------------------------------------------------------
[transition]
# Delay after navigating before the new page is captured. Tunable; larger
# values hide flashes on heavy pages at the cost of a slower slide.
settle_ms = 50
# Stop waiting for a route change that was never observed.
fallback_ms = 1000

# ---------------------------------------------------------------------------
# Sitemap
# ---------------------------------------------------------------------------
[sitemap]
enable = true

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#f8fafc"
surface = "#ffffff"
text = "#0f172a"
text_muted = "#64748b"
border = "#e2e8f0"
accent = "#2563eb"

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#020617"
surface = "#0f172a"
text = "#e2e8f0"
text_muted = "#94a3b8"
border = "#334155"
accent = "#60a5fa"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    let vars = |scheme: &ColorScheme, indent: &str| {
        [
            ("bg", &scheme.background),
            ("surface", &scheme.surface),
            ("text", &scheme.text),
            ("text-muted", &scheme.text_muted),
            ("border", &scheme.border),
            ("accent", &scheme.accent),
        ]
        .iter()
        .map(|(name, value)| format!("{indent}--color-{name}: {value};"))
        .collect::<Vec<_>>()
        .join("\n")
    };
    format!(
        ":root {{\n{}\n}}\n\n@media (prefers-color-scheme: dark) {{\n    :root {{\n{}\n    }}\n}}",
        vars(&colors.light, "    "),
        vars(&colors.dark, "        "),
    )
}
