//! Route table construction.
//!
//! Every page entry becomes a [`Route`]. On multilingual sites the table is
//! then completed with fallback routes, so each non-default locale serves
//! every page of the default locale, translated or not:
//!
//! ```text
//! pages:     about, blog, es/about
//! routes:    about, blog, es/about, es/blog (fallback → blog content)
//! ```
//!
//! The table is computed once and never mutated. Lookups by URL parameter go
//! through a precomputed index; the static path list hands every route to
//! the URL-routing boundary.

use crate::locale::{LocaleTable, ROOT_LOCALE};
use crate::types::{PageEntry, Route};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// How fallback routes derive their id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdScheme {
    /// Ids are slugs; a fallback's id is its localized slug.
    #[default]
    Slug,
    /// Ids are file paths; a fallback's id is the locale-swapped file path.
    FilePath,
}

/// Anything addressed by a slug, so routes and pages share locale filtering.
pub trait Slugged {
    fn slug(&self) -> &str;
}

impl Slugged for PageEntry {
    fn slug(&self) -> &str {
        &self.slug
    }
}

impl Slugged for Route {
    fn slug(&self) -> &str {
        &self.slug
    }
}

impl<T: Slugged> Slugged for Arc<T> {
    fn slug(&self) -> &str {
        (**self).slug()
    }
}

impl<T: Slugged> Slugged for &T {
    fn slug(&self) -> &str {
        (**self).slug()
    }
}

/// Build the route table: one route per page, plus fallback routes when the
/// site has more than one locale.
pub fn build_routes(pages: &[Arc<PageEntry>], locales: &LocaleTable, ids: IdScheme) -> Vec<Route> {
    let mut routes: Vec<Route> = pages
        .iter()
        .map(|entry| {
            let meta = locales.slug_to_locale_data(&entry.slug);
            Route {
                entry: Arc::clone(entry),
                slug: entry.slug.clone(),
                id: entry.id.clone(),
                entry_meta: meta.clone(),
                meta,
                is_fallback: false,
            }
        })
        .collect();

    if locales.is_multilingual() {
        let fallbacks = fallback_routes(pages, locales, ids);
        log::debug!(
            "{} pages, {} fallback routes across {} locales",
            pages.len(),
            fallbacks.len(),
            locales.keys().count()
        );
        routes.extend(fallbacks);
    }
    routes
}

fn fallback_routes(pages: &[Arc<PageEntry>], locales: &LocaleTable, ids: IdScheme) -> Vec<Route> {
    let default = locales.default_locale();
    let default_pages = filter_by_locale(pages, default.prefix(), locales);

    let mut fallbacks = Vec::new();
    for key in locales.keys() {
        if default.key.as_deref() == Some(key) {
            continue;
        }
        let locale = (key != ROOT_LOCALE).then_some(key);
        let existing: HashSet<&str> = filter_by_locale(pages, locale, locales)
            .into_iter()
            .map(|p| p.slug.as_str())
            .collect();

        for entry in &default_pages {
            let slug = locales.localized_slug(&entry.slug, locale);
            if existing.contains(slug.as_str()) {
                continue;
            }
            let id = match ids {
                IdScheme::Slug => slug.clone(),
                IdScheme::FilePath => locales.localized_id(&entry.id, locale),
            };
            fallbacks.push(Route {
                entry: Arc::clone(entry),
                slug,
                id,
                meta: crate::types::LocaleData {
                    lang: locales.locale_to_lang(locale),
                    dir: locales.locale_to_dir(locale),
                    locale: locale.map(str::to_string),
                },
                entry_meta: locales.slug_to_locale_data(&entry.slug),
                is_fallback: true,
            });
        }
    }
    fallbacks
}

/// Keep the items belonging to `locale`.
///
/// A named locale keeps slugs equal to its key or under `key/`. The root
/// locale (`None`) keeps whatever no prefixed locale claims, provided a
/// `root` locale is configured. Without locales every item is kept.
pub fn filter_by_locale<'a, T: Slugged>(
    items: &'a [T],
    locale: Option<&str>,
    locales: &LocaleTable,
) -> Vec<&'a T> {
    let locale = locale.filter(|l| *l != ROOT_LOCALE);
    if !locales.is_empty() {
        if let Some(key) = locale.filter(|l| locales.contains(l)) {
            return items
                .iter()
                .filter(|i| belongs_to(i.slug(), key))
                .collect();
        }
        if locales.has_root() {
            let prefixed: Vec<&str> = locales.prefixed_keys().collect();
            return items
                .iter()
                .filter(|i| !prefixed.iter().any(|key| belongs_to(i.slug(), key)))
                .collect();
        }
    }
    items.iter().collect()
}

fn belongs_to(slug: &str, key: &str) -> bool {
    slug == key
        || slug
            .strip_prefix(key)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// URL parameter for a slug. Root slugs (`""`, `index`, `/`) have none.
pub fn slug_to_param(slug: &str) -> Option<String> {
    if slug.is_empty() || slug == "index" || slug == "/" {
        return None;
    }
    Some(slug.strip_suffix("/index").unwrap_or(slug).to_string())
}

/// Map URL parameters to route positions. Later routes win on collision.
pub fn index_by_slug_param(routes: &[Route]) -> HashMap<Option<String>, usize> {
    routes
        .iter()
        .enumerate()
        .map(|(i, route)| (slug_to_param(&route.slug), i))
        .collect()
}

/// Path parameters of a static path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlugParams {
    pub slug: Option<String>,
}

/// One page to publish: its URL parameters and the route rendered there.
#[derive(Debug, Clone, Serialize)]
pub struct StaticPath<'a> {
    pub params: SlugParams,
    pub props: &'a Route,
}

/// The computed routes of a site, built once and read by every request.
#[derive(Debug, Clone)]
pub struct RouteTable {
    pages: Vec<Arc<PageEntry>>,
    routes: Vec<Route>,
    by_param: HashMap<Option<String>, usize>,
}

impl RouteTable {
    pub fn new(pages: Vec<PageEntry>, locales: &LocaleTable, ids: IdScheme) -> Self {
        let pages: Vec<Arc<PageEntry>> = pages.into_iter().map(Arc::new).collect();
        let routes = build_routes(&pages, locales, ids);
        let by_param = index_by_slug_param(&routes);
        Self {
            pages,
            routes,
            by_param,
        }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn pages(&self) -> &[Arc<PageEntry>] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Look up the route for a URL parameter. A single trailing slash is
    /// ignored and an empty parameter addresses the root page.
    pub fn route_by_slug_param(&self, param: Option<&str>) -> Option<&Route> {
        let key = param
            .map(|p| p.strip_suffix('/').unwrap_or(p))
            .filter(|p| !p.is_empty())
            .map(str::to_string);
        self.by_param.get(&key).map(|&i| &self.routes[i])
    }

    /// Exact slug lookup.
    pub fn route_by_slug(&self, slug: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.slug == slug)
    }

    /// Routes of one locale; `None` is the root locale.
    pub fn locale_routes(&self, locale: Option<&str>, locales: &LocaleTable) -> Vec<&Route> {
        filter_by_locale(&self.routes, locale, locales)
    }

    /// Pages of one locale; `None` is the root locale.
    pub fn locale_pages(&self, locale: Option<&str>, locales: &LocaleTable) -> Vec<&Arc<PageEntry>> {
        filter_by_locale(&self.pages, locale, locales)
    }

    /// Static path descriptors, one per route, in table order.
    pub fn paths(&self) -> Vec<StaticPath<'_>> {
        self.routes
            .iter()
            .map(|route| StaticPath {
                params: SlugParams {
                    slug: slug_to_param(&route.slug),
                },
                props: route,
            })
            .collect()
    }
}
