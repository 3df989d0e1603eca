//! Shared test utilities for the vitrine test suite.
//!
//! Provides page and locale builders plus lookups that panic with the
//! available candidates on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let table = locales(&[("root", "en"), ("es", "es")]);
//! let routes = build_routes(&arcs, &table, IdScheme::Slug);
//!
//! let about = find_route(&routes, "es/about");
//! assert!(about.is_fallback);
//! assert_eq!(route_slugs(&routes), vec!["about", "es/about"]);
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::config::LocaleConfig;
use crate::content::{parse_page, LoadOptions};
use crate::locale::LocaleTable;
use crate::types::{NavEntry, PageEntry, Route};

// =========================================================================
// Page builders
// =========================================================================

/// A page as the content loader would produce it for `rel_path` (relative to
/// the pages directory), with `title` set.
pub fn mock_page(rel_path: &str, title: &str) -> PageEntry {
    let mut page = parse_page(rel_path, "", LoadOptions::default())
        .unwrap_or_else(|e| panic!("mock page '{rel_path}' failed to parse: {e}"));
    page.data.title = title.to_string();
    page
}

/// A page with an explicit navbar order.
pub fn ordered_page(rel_path: &str, title: &str, order: Option<f64>) -> PageEntry {
    let mut page = mock_page(rel_path, title);
    page.data.navbar.order = order;
    page
}

/// A page hidden from the automatic navbar.
pub fn hidden_page(rel_path: &str, title: &str) -> PageEntry {
    let mut page = mock_page(rel_path, title);
    page.data.navbar.hidden = true;
    page
}

/// Write `content` to `root/rel`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

// =========================================================================
// Locale builders
// =========================================================================

/// Locale configs from `(key, lang)` pairs. The label is the key.
pub fn locale_map(pairs: &[(&str, &str)]) -> BTreeMap<String, LocaleConfig> {
    pairs
        .iter()
        .map(|(key, lang)| {
            (
                key.to_string(),
                LocaleConfig {
                    label: key.to_string(),
                    lang: Some(lang.to_string()),
                    dir: None,
                },
            )
        })
        .collect()
}

/// Locale table from `(key, lang)` pairs, default resolved as configured
/// without an explicit `default_locale`.
pub fn locales(pairs: &[(&str, &str)]) -> LocaleTable {
    LocaleTable::new(locale_map(pairs), None)
}

// =========================================================================
// Lookups: panic with a clear message on miss
// =========================================================================

/// Find a route by slug. Panics if not found.
pub fn find_route<'a>(routes: &'a [Route], slug: &str) -> &'a Route {
    routes.iter().find(|r| r.slug == slug).unwrap_or_else(|| {
        panic!("route '{slug}' not found. Available: {:?}", route_slugs(routes))
    })
}

/// Find a navbar entry by label. Panics if not found.
pub fn find_nav<'a>(entries: &'a [NavEntry], label: &str) -> &'a NavEntry {
    entries.iter().find(|e| e.label == label).unwrap_or_else(|| {
        panic!("nav entry '{label}' not found. Available: {:?}", nav_labels(entries))
    })
}

// =========================================================================
// Bulk extractors
// =========================================================================

pub fn route_slugs(routes: &[Route]) -> Vec<&str> {
    routes.iter().map(|r| r.slug.as_str()).collect()
}

pub fn nav_labels(entries: &[NavEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.label.as_str()).collect()
}
