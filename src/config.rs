//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives in
//! the content root; user values are merged over the stock defaults so a
//! config only needs the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! # Locale key used for unprefixed content. Ignored when a `root` locale
//! # exists: root is always the default.
//! # default_locale = "en"
//!
//! [title]
//! en = "Vitrine"            # Site title per language tag
//!
//! [locales.root]            # No locales = single-language English site
//! label = "English"
//! lang = "en"
//! dir = "ltr"
//!
//! [routing]
//! base = "/"                # Path prefix the site is served under
//! trailing_slash = "ignore" # always | never | ignore
//! build_format = "directory" # directory | file
//!
//! [content]
//! pages_dir = "pages"       # Markdown pages, relative to the content root
//! i18n_dir = "i18n"         # UI string overrides, relative to the content root
//! legacy_ids = false        # Use file paths (with extension) as page ids
//!
//! [[nav_bar]]               # Explicit navbar; omit to derive it from pages
//! label = "Blog"
//! slug = "posts"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::types::LinkAttrs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
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
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Key of the default locale when there is no `root` locale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_locale: Option<String>,
    /// Site title keyed by language tag.
    pub title: BTreeMap<String, String>,
    /// Configured locales keyed by URL prefix; `root` means no prefix.
    pub locales: BTreeMap<String, LocaleConfig>,
    /// URL shape of generated links.
    pub routing: RoutingConfig,
    /// Content directory layout.
    pub content: ContentConfig,
    /// Explicit navbar. When absent the navbar is derived from the pages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nav_bar: Option<Vec<NavBarItem>>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            default_locale: None,
            title: BTreeMap::from([("en".to_string(), "Vitrine".to_string())]),
            locales: BTreeMap::new(),
            routing: RoutingConfig::default(),
            content: ContentConfig::default(),
            nav_bar: None,
        }
    }
}

impl SiteConfig {
    /// Validate cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(key) = &self.default_locale
            && !self.locales.contains_key(key)
        {
            return Err(ConfigError::Validation(format!(
                "default_locale \"{key}\" is not a configured locale"
            )));
        }
        if !self.routing.base.starts_with('/') {
            return Err(ConfigError::Validation(
                "routing.base must start with '/'".into(),
            ));
        }
        for (i, item) in self.nav_bar.iter().flatten().enumerate() {
            match (&item.link, &item.slug) {
                (Some(_), Some(_)) | (None, None) => {
                    return Err(ConfigError::Validation(format!(
                        "nav_bar[{i}] must set exactly one of `link` or `slug`"
                    )));
                }
                (Some(_), None) if item.label.is_none() => {
                    return Err(ConfigError::Validation(format!(
                        "nav_bar[{i}] links to an external URL and needs a `label`"
                    )));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// A configured locale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocaleConfig {
    /// Human-readable name, shown in language pickers.
    pub label: String,
    /// BCP-47 language tag. Defaults to the default locale's language.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    /// Text direction. Defaults to the default locale's direction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<crate::types::Dir>,
}

/// How paths handle a trailing `/`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrailingSlash {
    Always,
    Never,
    #[default]
    Ignore,
}

/// Whether pages are emitted as `page/index.html` or `page.html`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildFormat {
    #[default]
    Directory,
    File,
}

/// URL shape of generated links.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoutingConfig {
    pub base: String,
    pub trailing_slash: TrailingSlash,
    pub build_format: BuildFormat,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base: "/".to_string(),
            trailing_slash: TrailingSlash::Ignore,
            build_format: BuildFormat::Directory,
        }
    }
}

/// Content directory layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContentConfig {
    pub pages_dir: String,
    pub i18n_dir: String,
    /// Page ids are file paths with extension (`es/guide.md`) rather than
    /// slugs. Also switches fallback ids to locale-swapped file paths.
    pub legacy_ids: bool,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            pages_dir: "pages".to_string(),
            i18n_dir: "i18n".to_string(),
            legacy_ids: false,
        }
    }
}

/// One item of an explicit navbar.
///
/// Exactly one of `link` (manual URL or path) or `slug` (internal page
/// reference) must be set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavBarItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Label translations keyed by language tag.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub translations: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: LinkAttrs,
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
/// Tables merge key-by-key; any other overlay value (arrays included)
/// replaces the base value.
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
    Ok(Some(toml::from_str(&content)?))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
///
/// A `title` in the overlay replaces the base titles outright; the stock
/// title never shows up next to a site's own languages.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => {
            let mut base = base;
            if ov.get("title").is_some()
                && let Some(table) = base.as_table_mut()
            {
                table.remove("title");
            }
            merge_toml(base, ov)
        }
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory, falling back to
/// stock defaults when the file is missing.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(root)?)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Vitrine Configuration
# =====================
# All settings are optional. Values shown below are the defaults.
# Unknown keys cause an error.

# Locale key for unprefixed content when no `root` locale is configured.
# default_locale = "en"

# ---------------------------------------------------------------------------
# Site title, keyed by language tag
# ---------------------------------------------------------------------------
[title]
en = "Vitrine"

# ---------------------------------------------------------------------------
# Locales
# ---------------------------------------------------------------------------
# Each key is a URL prefix (`/es/...`). The special key `root` serves content
# without a prefix. More than one locale turns on fallback pages: every page
# of the default locale is published in each other locale until translated.
#
# [locales.root]
# label = "English"
# lang = "en"
# dir = "ltr"
#
# [locales.es]
# label = "Español"
# lang = "es"

# ---------------------------------------------------------------------------
# Routing
# ---------------------------------------------------------------------------
[routing]
# Path prefix the site is served under.
base = "/"
# Trailing slash policy for generated links: always | never | ignore
trailing_slash = "ignore"
# Output layout: directory (page/index.html) | file (page.html)
build_format = "directory"

# ---------------------------------------------------------------------------
# Content
# ---------------------------------------------------------------------------
[content]
# Markdown pages, relative to the content root.
pages_dir = "pages"
# UI string overrides (<lang>.toml or <lang>.json), relative to the content root.
i18n_dir = "i18n"
# Use file paths with extension as page ids (legacy collections).
legacy_ids = false

# ---------------------------------------------------------------------------
# Navbar
# ---------------------------------------------------------------------------
# Omit to build the navbar from the top-level pages. Each item sets either
# `link` (external URL or site path) or `slug` (a page in the pages dir).
#
# [[nav_bar]]
# label = "Blog"
# slug = "posts"
# translations = { es = "Artículos" }
#
# [[nav_bar]]
# label = "GitHub"
# link = "https://github.com/example"
# attrs = { target = "_blank", rel = "noopener" }
"##
}
