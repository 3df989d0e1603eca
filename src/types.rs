//! Shared types used across loading, routing, and navigation.
//!
//! Page entries flow from the content loaders into the route table, and the
//! route table feeds the navigation builder. These types are also what the
//! CLI serializes to JSON, so they derive `Serialize` throughout.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// HTML attributes attached to a navigation link (`target`, `rel`, ...).
pub type LinkAttrs = BTreeMap<String, String>;

/// Text direction of a locale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    #[default]
    Ltr,
    Rtl,
}

/// Locale metadata derived from a slug.
///
/// `locale` is `None` for the root/default locale, which has no URL prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleData {
    pub lang: String,
    pub dir: Dir,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

/// Per-page navigation overrides from frontmatter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavbarMeta {
    /// Sort weight among siblings; lower ranks first. Absent sorts last.
    /// Integers and fractions are both accepted.
    pub order: Option<f64>,
    /// Link label; the page title is used when absent.
    pub label: Option<String>,
    /// Exclude the page from the automatic navbar.
    pub hidden: bool,
    /// Extra HTML attributes for the generated link.
    pub attrs: LinkAttrs,
}

/// Frontmatter of a page, parsed from the `+++` TOML block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Frontmatter {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Drafts are dropped from production builds.
    pub draft: bool,
    /// Permalink override; replaces the slug derived from the file path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub layout_full_width: bool,
    pub navbar: NavbarMeta,
}

/// One content unit, immutable after load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageEntry {
    /// Hierarchical identifier (`guides/intro`, or `guides/intro.md` for
    /// file-path ids).
    pub id: String,
    /// Locale-qualified permalink. The root index page has an empty slug.
    pub slug: String,
    /// Path of the source file relative to the project root.
    pub file_path: String,
    /// Collection the entry came from (`pages`, `posts`).
    pub collection: String,
    pub data: Frontmatter,
    pub body: String,
}

/// A routable page in a specific locale.
///
/// Fallback routes share the default locale's [`PageEntry`] but carry the
/// requesting locale's metadata; `entry_meta` always describes the content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub entry: Arc<PageEntry>,
    pub slug: String,
    pub id: String,
    #[serde(flatten)]
    pub meta: LocaleData,
    pub entry_meta: LocaleData,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_fallback: bool,
}

impl Route {
    /// Locale key of the route, `None` for root.
    pub fn locale(&self) -> Option<&str> {
        self.meta.locale.as_deref()
    }

    pub fn lang(&self) -> &str {
        &self.meta.lang
    }
}

/// A rendered navigation link, produced per request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavEntry {
    pub label: String,
    pub href: String,
    pub is_current: bool,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: LinkAttrs,
}
