//! The site context.
//!
//! A [`Site`] bundles everything request handling reads: config, locale
//! table, route table, link formatter and UI strings. It is built once,
//! never mutated, and shared freely between readers.

use crate::config::{load_config, ConfigError, SiteConfig};
use crate::content::{load_pages, ContentError, LoadOptions};
use crate::loaders::LoadError;
use crate::locale::LocaleTable;
use crate::navigation::{get_nav_bar_from_config, NavContext, NavError};
use crate::path::{strip_leading_and_trailing_slashes, PathFormatter};
use crate::routing::{slug_to_param, IdScheme, RouteTable};
use crate::translations::{TranslationError, Translations, UiStrings};
use crate::types::{NavEntry, PageEntry, Route};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Content error: {0}")]
    Content(#[from] ContentError),
    #[error("Loader error: {0}")]
    Load(#[from] LoadError),
    #[error("Translations error: {0}")]
    Translations(#[from] TranslationError),
    #[error("Navbar error: {0}")]
    Nav(#[from] NavError),
}

/// Options for [`Site::load`].
#[derive(Debug, Clone, Default)]
pub struct SiteOptions {
    /// Drop draft pages.
    pub production: bool,
    /// Entries from other collections (remote posts), appended after the
    /// pages.
    pub extra_pages: Vec<PageEntry>,
}

#[derive(Debug, Clone)]
pub struct Site {
    pub config: SiteConfig,
    pub locales: LocaleTable,
    pub routes: RouteTable,
    pub formatter: PathFormatter,
    pub translations: Translations,
}

impl Site {
    /// Assemble a site from already loaded parts.
    pub fn new(config: SiteConfig, pages: Vec<PageEntry>, translations: Translations) -> Self {
        let locales = LocaleTable::from_config(&config);
        let ids = if config.content.legacy_ids {
            IdScheme::FilePath
        } else {
            IdScheme::Slug
        };
        let routes = RouteTable::new(pages, &locales, ids);
        let formatter = PathFormatter::from_config(&config.routing);
        log::debug!(
            "site: {} locale(s), {} page(s), {} route(s)",
            locales.keys().count().max(1),
            routes.pages().len(),
            routes.len()
        );
        Self {
            config,
            locales,
            routes,
            formatter,
            translations,
        }
    }

    /// Load config, pages and UI strings from a content root.
    pub fn load(root: &Path, options: SiteOptions) -> Result<Self, SiteError> {
        let config = load_config(root)?;
        let load_options = LoadOptions {
            production: options.production,
            legacy_ids: config.content.legacy_ids,
        };
        let mut pages = load_pages(&root.join(&config.content.pages_dir), load_options)?;
        pages.extend(options.extra_pages);

        let default_lang = LocaleTable::from_config(&config).default_locale().lang.clone();
        let translations = Translations::load(&root.join(&config.content.i18n_dir), &default_lang)?;
        Ok(Self::new(config, pages, translations))
    }

    pub fn nav_context(&self) -> NavContext<'_> {
        NavContext {
            routes: &self.routes,
            locales: &self.locales,
            formatter: &self.formatter,
        }
    }

    /// Navbar for `pathname` in `locale` (`None` is the root locale).
    pub fn nav_bar(&self, pathname: &str, locale: Option<&str>) -> Result<Vec<NavEntry>, NavError> {
        get_nav_bar_from_config(self.config.nav_bar.as_deref(), pathname, locale, self.nav_context())
    }

    /// Route published at a request path. The base path, an `.html`
    /// extension and surrounding slashes are ignored.
    pub fn route_for_path(&self, pathname: &str) -> Option<&Route> {
        let path = strip_leading_and_trailing_slashes(pathname);
        let base = strip_leading_and_trailing_slashes(&self.config.routing.base);
        let path = if base.is_empty() {
            path
        } else if path == base {
            ""
        } else {
            path.strip_prefix(base)
                .and_then(|rest| rest.strip_prefix('/'))
                .unwrap_or(path)
        };
        let path = path.strip_suffix(".html").unwrap_or(path);
        self.routes.route_by_slug_param(slug_to_param(path).as_deref())
    }

    /// UI strings for a language tag.
    pub fn ui(&self, lang: &str) -> UiStrings {
        self.translations.for_lang(lang)
    }

    /// Check that every locale's navbar resolves.
    pub fn check(&self) -> Result<(), SiteError> {
        let root = self.locales.default_locale().prefix().is_none().then_some(None);
        let prefixed = self.locales.prefixed_keys().map(Some);
        for locale in root.into_iter().chain(prefixed) {
            self.nav_bar("/", locale)?;
        }
        Ok(())
    }
}
