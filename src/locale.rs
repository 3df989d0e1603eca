//! Locale resolution.
//!
//! Content for a non-default locale lives under a directory named after the
//! locale key, so the first segment of a slug decides its locale:
//!
//! ```text
//! about          → root locale (no prefix)
//! es             → es (locale index page)
//! es/about       → es
//! esperanto/faq  → root (prefix must be a whole segment)
//! ```
//!
//! The key `root` is special: it names the unprefixed locale and is never
//! matched as a path segment. Every function here is total; a slug that
//! matches no configured key belongs to the default locale.

use crate::config::{LocaleConfig, SiteConfig};
use crate::types::{Dir, LocaleData};
use std::collections::BTreeMap;

/// Key of the unprefixed locale.
pub const ROOT_LOCALE: &str = "root";

/// Language used when nothing else is configured.
pub const BUILT_IN_DEFAULT_LANG: &str = "en";

/// The default locale after resolving config precedence.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultLocale {
    /// Config key of the default locale (`root` when a root locale exists).
    /// `None` only for sites without any configured locales.
    pub key: Option<String>,
    pub lang: String,
    pub dir: Dir,
}

impl DefaultLocale {
    /// URL prefix of the default locale; `None` when it is unprefixed.
    pub fn prefix(&self) -> Option<&str> {
        self.key.as_deref().filter(|k| *k != ROOT_LOCALE)
    }
}

/// Configured locales plus the resolved default.
#[derive(Debug, Clone, PartialEq)]
pub struct LocaleTable {
    locales: BTreeMap<String, LocaleConfig>,
    default: DefaultLocale,
}

impl LocaleTable {
    /// Build the table. The default locale is `root` when configured, else
    /// `default_key`, else the first configured key.
    pub fn new(locales: BTreeMap<String, LocaleConfig>, default_key: Option<&str>) -> Self {
        let key = if locales.contains_key(ROOT_LOCALE) {
            Some(ROOT_LOCALE.to_string())
        } else {
            default_key
                .filter(|k| locales.contains_key(*k))
                .map(str::to_string)
                .or_else(|| locales.keys().next().cloned())
        };
        let config = key.as_deref().and_then(|k| locales.get(k));
        let lang = config
            .and_then(|c| c.lang.clone())
            .or_else(|| key.clone().filter(|k| k != ROOT_LOCALE))
            .unwrap_or_else(|| BUILT_IN_DEFAULT_LANG.to_string());
        let dir = config.and_then(|c| c.dir).unwrap_or_default();
        Self {
            locales,
            default: DefaultLocale { key, lang, dir },
        }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(config.locales.clone(), config.default_locale.as_deref())
    }

    /// A site with no configured locales: English, left-to-right.
    pub fn single() -> Self {
        Self::new(BTreeMap::new(), None)
    }

    pub fn default_locale(&self) -> &DefaultLocale {
        &self.default
    }

    /// More than one locale means fallback routes are generated.
    pub fn is_multilingual(&self) -> bool {
        self.locales.len() > 1
    }

    pub fn has_root(&self) -> bool {
        self.locales.contains_key(ROOT_LOCALE)
    }

    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.locales.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&LocaleConfig> {
        self.locales.get(key)
    }

    /// Configured keys in table order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }

    /// Keys that appear as a URL prefix (every key but `root`).
    pub fn prefixed_keys(&self) -> impl Iterator<Item = &str> {
        self.keys().filter(|k| *k != ROOT_LOCALE)
    }

    /// Locale key from the first segment of a slug, if it names a prefixed
    /// locale.
    pub fn slug_to_locale(&self, slug: &str) -> Option<&str> {
        let first = slug.split('/').next().unwrap_or_default();
        if first.is_empty() || first == ROOT_LOCALE {
            return None;
        }
        self.locales.get_key_value(first).map(|(k, _)| k.as_str())
    }

    /// Resolve `{lang, dir, locale}` for a slug.
    pub fn slug_to_locale_data(&self, slug: &str) -> LocaleData {
        let locale = self.slug_to_locale(slug);
        LocaleData {
            lang: self.locale_to_lang(locale),
            dir: self.locale_to_dir(locale),
            locale: locale.map(str::to_string),
        }
    }

    /// Language tag for a locale key; `None` is the root locale.
    pub fn locale_to_lang(&self, locale: Option<&str>) -> String {
        self.locale_config(locale)
            .and_then(|c| c.lang.clone())
            .unwrap_or_else(|| self.default.lang.clone())
    }

    /// Text direction for a locale key; `None` is the root locale.
    pub fn locale_to_dir(&self, locale: Option<&str>) -> Dir {
        self.locale_config(locale)
            .and_then(|c| c.dir)
            .unwrap_or(self.default.dir)
    }

    fn locale_config(&self, locale: Option<&str>) -> Option<&LocaleConfig> {
        self.locales.get(locale.unwrap_or(ROOT_LOCALE))
    }

    /// Rewrite a slug so it belongs to `locale`, swapping or injecting the
    /// prefix. `None` targets the unprefixed root locale.
    ///
    /// ```text
    /// localized_slug("about", Some("es"))    → "es/about"
    /// localized_slug("fr/about", Some("es")) → "es/about"
    /// localized_slug("fr", Some("es"))       → "es"
    /// localized_slug("es/about", None)       → "about"
    /// ```
    pub fn localized_slug(&self, slug: &str, locale: Option<&str>) -> String {
        let slug_locale = self.slug_to_locale(slug);
        if slug_locale == locale {
            return slug.to_string();
        }
        let target = locale.unwrap_or_default();
        match slug_locale {
            Some(current) if current == slug => target.to_string(),
            Some(current) => {
                let rest = &slug[current.len() + 1..];
                let joined = if target.is_empty() {
                    rest.to_string()
                } else {
                    format!("{target}/{rest}")
                };
                joined.trim_end_matches('/').to_string()
            }
            None if slug.is_empty() => target.to_string(),
            None if target.is_empty() => slug.to_string(),
            None => format!("{target}/{slug}"),
        }
    }

    /// Rewrite a file-path id so it belongs to `locale`.
    ///
    /// Unlike [`localized_slug`](Self::localized_slug) the id keeps its
    /// extension and a bare locale id is left alone.
    pub fn localized_id(&self, id: &str, locale: Option<&str>) -> String {
        match (self.slug_to_locale(id), locale) {
            (Some(current), target) => {
                let prefix = format!("{current}/");
                let replacement = target.map(|t| format!("{t}/")).unwrap_or_default();
                id.replacen(&prefix, &replacement, 1)
            }
            (None, Some(target)) => format!("{target}/{id}"),
            (None, None) => id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{locale_map, locales};

    #[test]
    fn unprefixed_slug_is_root() {
        let table = locales(&[("root", "en"), ("es", "es")]);
        let data = table.slug_to_locale_data("about");
        assert_eq!(data.locale, None);
        assert_eq!(data.lang, "en");
        assert_eq!(data.dir, Dir::Ltr);
    }

    #[test]
    fn prefixed_slug_resolves_locale() {
        let table = locales(&[("root", "en"), ("es", "es")]);
        assert_eq!(table.slug_to_locale("es/about"), Some("es"));
        assert_eq!(table.slug_to_locale("es"), Some("es"));
        assert_eq!(table.slug_to_locale_data("es/guides/x").lang, "es");
    }

    #[test]
    fn prefix_must_be_a_whole_segment() {
        let table = locales(&[("root", "en"), ("es", "es")]);
        assert_eq!(table.slug_to_locale("esperanto/faq"), None);
        assert_eq!(table.slug_to_locale(""), None);
    }

    #[test]
    fn root_key_is_never_a_prefix() {
        let table = locales(&[("root", "en"), ("es", "es")]);
        assert_eq!(table.slug_to_locale("root/about"), None);
        assert_eq!(table.slug_to_locale_data("root").locale, None);
    }

    #[test]
    fn rtl_locale_reports_direction() {
        let mut table_locales = BTreeMap::new();
        table_locales.insert(
            "root".to_string(),
            LocaleConfig {
                label: "English".into(),
                lang: Some("en".into()),
                dir: None,
            },
        );
        table_locales.insert(
            "ar".to_string(),
            LocaleConfig {
                label: "العربية".into(),
                lang: Some("ar".into()),
                dir: Some(Dir::Rtl),
            },
        );
        let table = LocaleTable::new(table_locales, None);
        assert_eq!(table.slug_to_locale_data("ar/intro").dir, Dir::Rtl);
        assert_eq!(table.slug_to_locale_data("intro").dir, Dir::Ltr);
    }

    #[test]
    fn resolution_round_trips_through_locale_prefix() {
        let table = locales(&[("root", "en"), ("es", "es"), ("fr", "fr")]);
        for slug in ["", "about", "es", "es/a/b", "fr/x", "esx/y"] {
            let data = table.slug_to_locale_data(slug);
            let rest = slug.split_once('/').map(|(_, r)| r).unwrap_or("page");
            let rebuilt = match &data.locale {
                Some(l) => format!("{l}/{rest}"),
                None => rest.to_string(),
            };
            assert_eq!(
                table.slug_to_locale_data(&rebuilt).locale,
                data.locale,
                "round trip of {slug:?} via {rebuilt:?}"
            );
        }
    }

    #[test]
    fn missing_lang_falls_back_to_default() {
        let mut table_locales = BTreeMap::new();
        table_locales.insert("root".to_string(), LocaleConfig::default());
        table_locales.insert("pt".to_string(), LocaleConfig::default());
        let table = LocaleTable::new(table_locales, None);
        assert_eq!(table.locale_to_lang(Some("pt")), "en");
        assert_eq!(table.locale_to_lang(None), "en");
    }

    // =========================================================================
    // Default locale selection
    // =========================================================================

    #[test]
    fn no_locales_is_single_english() {
        let table = LocaleTable::single();
        assert!(!table.is_multilingual());
        assert_eq!(table.default_locale().key, None);
        assert_eq!(table.default_locale().lang, "en");
        assert_eq!(table.slug_to_locale_data("anything").lang, "en");
    }

    #[test]
    fn root_wins_over_configured_default() {
        let mut table_locales = BTreeMap::new();
        table_locales.insert("root".to_string(), LocaleConfig::default());
        table_locales.insert("es".to_string(), LocaleConfig::default());
        let table = LocaleTable::new(table_locales, Some("es"));
        assert_eq!(table.default_locale().key.as_deref(), Some("root"));
        assert_eq!(table.default_locale().prefix(), None);
    }

    #[test]
    fn prefixed_default_locale() {
        let table = LocaleTable::new(locale_map(&[("en", "en"), ("es", "es")]), Some("es"));
        assert_eq!(table.default_locale().prefix(), Some("es"));
        assert_eq!(table.default_locale().lang, "es");
    }

    // =========================================================================
    // Localized slugs and ids
    // =========================================================================

    #[test]
    fn localized_slug_injects_prefix() {
        let table = locales(&[("root", "en"), ("es", "es"), ("fr", "fr")]);
        assert_eq!(table.localized_slug("about", Some("es")), "es/about");
        assert_eq!(table.localized_slug("", Some("es")), "es");
    }

    #[test]
    fn localized_slug_swaps_prefix() {
        let table = locales(&[("en", "en"), ("es", "es"), ("fr", "fr")]);
        assert_eq!(table.localized_slug("fr/about", Some("es")), "es/about");
        assert_eq!(table.localized_slug("fr", Some("es")), "es");
        assert_eq!(table.localized_slug("fr/about", None), "about");
        assert_eq!(table.localized_slug("fr", None), "");
    }

    #[test]
    fn localized_slug_same_locale_unchanged() {
        let table = locales(&[("root", "en"), ("es", "es")]);
        assert_eq!(table.localized_slug("es/about", Some("es")), "es/about");
        assert_eq!(table.localized_slug("about", None), "about");
    }

    #[test]
    fn localized_id_keeps_extension() {
        let table = locales(&[("en", "en"), ("es", "es")]);
        assert_eq!(table.localized_id("en/guide.md", Some("es")), "es/guide.md");
        assert_eq!(table.localized_id("guide.md", Some("es")), "es/guide.md");
        assert_eq!(table.localized_id("en/guide.md", None), "guide.md");
        assert_eq!(table.localized_id("guide.md", None), "guide.md");
    }
}
