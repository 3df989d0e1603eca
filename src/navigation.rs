//! Navbar construction.
//!
//! Without an explicit `nav_bar` config the navbar is derived from the
//! routes of the active locale in three steps:
//!
//! 1. [`treeify`] arranges routes into a directory tree keyed by id segment.
//! 2. [`sort_dir_entries`] orders siblings by `navbar.order`, then by slug.
//! 3. [`nav_bar_from_dir`] turns the top level into links.
//!
//! With an explicit config each item is resolved on its own and the tree is
//! never built; see [`get_nav_bar_from_config`].
//!
//! ## Directory index merge
//!
//! Routes are inserted deepest-first. When a page lands on a key that
//! already holds a directory (`guides` after `guides/intro`), the page
//! becomes that directory's `index` child instead of replacing it:
//!
//! ```text
//! guides/intro, guides   →   guides/
//!                              ├── index   (guides)
//!                              └── intro   (guides/intro)
//! ```
//!
//! A page already sitting where a directory is needed is moved into the new
//! directory as its `index` the same way. A second page for an occupied
//! key replaces the first with a warning, so the page inserted last wins.

use crate::config::NavBarItem;
use crate::content::strip_extension;
use crate::locale::LocaleTable;
use crate::path::{
    encode_uri, ensure_leading_slash, ensure_trailing_slash, is_absolute, paths_match,
    slug_to_pathname, strip_leading_and_trailing_slashes, PathFormatter,
};
use crate::routing::RouteTable;
use crate::translations::pick_lang;
use crate::types::{LinkAttrs, NavEntry, Route};
use std::cmp::{Ordering, Reverse};
use std::collections::BTreeMap;
use thiserror::Error;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NavError {
    #[error(
        "Invalid navbar item configuration: an item needs a `link` or a `slug`.\n\
         Hint: use `label` + `link` for URLs and site paths, or `slug` for a page."
    )]
    InvalidItem,
    #[error(
        "The slug \"{slug}\" specified in the navbar config must not start or end with a slash.\n\
         Hint: try updating \"{slug}\" to \"{suggestion}\"."
    )]
    SlugHasSlashes { slug: String, suggestion: String },
    #[error(
        "The slug \"{0}\" specified in the navbar config does not exist.\n\
         Hint: reference the slug of a page, e.g. \"guides/intro\" for pages/guides/intro.md."
    )]
    UnknownSlug(String),
    #[error(
        "Invalid navbar structure: expected a page but found the directory \"{0}\".\n\
         Hint: configure `nav_bar` explicitly or hide nested pages with `navbar.hidden = true`."
    )]
    UnexpectedDirectory(String),
}

/// A node of the route tree: a directory of further nodes or a page.
#[derive(Debug, Clone, PartialEq)]
pub enum NavNode<'a> {
    Dir(NavDir<'a>),
    Page(&'a Route),
}

/// A directory in the route tree.
#[derive(Debug, Clone, PartialEq)]
pub struct NavDir<'a> {
    /// Path of the directory relative to the site root.
    pub slug: String,
    /// Children keyed by path segment.
    pub children: BTreeMap<String, NavNode<'a>>,
}

impl<'a> NavDir<'a> {
    fn new(slug: String) -> Self {
        Self {
            slug,
            children: BTreeMap::new(),
        }
    }

    /// Insert a page at `key`, replacing whatever was there.
    fn insert_page(&mut self, key: &str, route: &'a Route) {
        if let Some(existing) = self.children.insert(key.to_string(), NavNode::Page(route)) {
            log::warn!(
                "navbar: \"{}\" replaces {} at \"{}/{key}\"",
                route.slug,
                existing.sort_slug(),
                self.slug
            );
        }
    }

    /// Child directory for `key`, created on demand. A page already at
    /// `key` becomes the new directory's index.
    fn child_dir(&mut self, key: &str) -> &mut NavDir<'a> {
        let slug = strip_leading_and_trailing_slashes(&format!("{}/{key}", self.slug)).to_string();
        let node = self
            .children
            .entry(key.to_string())
            .or_insert_with(|| NavNode::Dir(NavDir::new(slug.clone())));
        if let NavNode::Page(route) = *node {
            let mut dir = NavDir::new(slug);
            dir.children.insert("index".to_string(), NavNode::Page(route));
            *node = NavNode::Dir(dir);
        }
        match node {
            NavNode::Dir(dir) => dir,
            NavNode::Page(_) => unreachable!("page nodes are converted to directories above"),
        }
    }
}

impl NavNode<'_> {
    /// Sort weight: a page's `navbar.order`, or the lowest weight a directory
    /// contains. No order sorts last.
    pub fn order(&self) -> f64 {
        match self {
            NavNode::Page(route) => route.entry.data.navbar.order.unwrap_or(f64::MAX),
            NavNode::Dir(dir) => dir
                .children
                .values()
                .map(NavNode::order)
                .fold(f64::MAX, f64::min),
        }
    }

    fn sort_slug(&self) -> &str {
        match self {
            NavNode::Page(route) => &route.slug,
            NavNode::Dir(dir) => &dir.slug,
        }
    }
}

/// Segments of `id` relative to `base_dir`. The base directory's own index
/// has none.
fn breadcrumbs<'p>(id: &'p str, base_dir: &str) -> Vec<&'p str> {
    let path = strip_extension(id);
    if path == base_dir {
        return Vec::new();
    }
    let base = ensure_trailing_slash(base_dir);
    path.strip_prefix(base.as_str())
        .unwrap_or(path)
        .split('/')
        .collect()
}

/// Arrange routes into a tree keyed by id segment below `base_dir`.
/// Routes hidden from the navbar are left out.
pub fn treeify<'a>(routes: &[&'a Route], base_dir: &str) -> NavDir<'a> {
    let mut root = NavDir::new(base_dir.to_string());

    let mut visible: Vec<&'a Route> = routes
        .iter()
        .copied()
        .filter(|r| !r.entry.data.navbar.hidden)
        .collect();
    visible.sort_by_key(|r| Reverse(r.id.split('/').count()));

    for route in visible {
        let parts = breadcrumbs(&route.id, base_dir);
        let Some((leaf, parents)) = parts.split_last() else {
            continue;
        };
        let mut dir = &mut root;
        for part in parents {
            dir = dir.child_dir(part);
        }
        match dir.children.get_mut(*leaf) {
            Some(NavNode::Dir(existing)) => existing.insert_page("index", route),
            _ => dir.insert_page(leaf, route),
        }
    }
    root
}

/// Collation used for slug tie-breaks. Base letters compare first with case
/// and accents ignored, then accents (unaccented first), then case
/// (lowercase first).
pub fn collate(a: &str, b: &str) -> Ordering {
    let base = |s: &str| -> String {
        s.nfd()
            .filter(|c| !is_combining_mark(*c))
            .flat_map(char::to_lowercase)
            .collect()
    };
    let accented = |s: &str| -> String { s.nfd().flat_map(char::to_lowercase).collect() };
    base(a)
        .cmp(&base(b))
        .then_with(|| accented(a).cmp(&accented(b)))
        .then_with(|| b.cmp(a))
}

/// Order siblings by weight ascending, then by collated slug.
pub fn sort_dir_entries<'a>(mut entries: Vec<(String, NavNode<'a>)>) -> Vec<(String, NavNode<'a>)> {
    entries.sort_by(|(_, a), (_, b)| {
        a.order()
            .total_cmp(&b.order())
            .then_with(|| collate(a.sort_slug(), b.sort_slug()))
    });
    entries
}

/// Build a link, formatting internal hrefs and flagging the current page.
fn make_nav_bar_link(
    href: &str,
    label: String,
    current_pathname: &str,
    attrs: &LinkAttrs,
    formatter: &PathFormatter,
) -> NavEntry {
    let href = if is_absolute(href) {
        href.to_string()
    } else {
        formatter.format(href)
    };
    let is_current = paths_match(&encode_uri(&href), current_pathname);
    NavEntry {
        label,
        href,
        is_current,
        attrs: attrs.clone(),
    }
}

fn link_from_route(route: &Route, current_pathname: &str, formatter: &PathFormatter) -> NavEntry {
    let navbar = &route.entry.data.navbar;
    let label = navbar
        .label
        .clone()
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| route.entry.data.title.clone());
    make_nav_bar_link(
        &slug_to_pathname(&route.slug),
        label,
        current_pathname,
        &navbar.attrs,
        formatter,
    )
}

/// Links for the top level of a tree, in sorted order.
///
/// Only pages can become links; a directory at the top level is an error.
pub fn nav_bar_from_dir(
    tree: NavDir<'_>,
    current_pathname: &str,
    formatter: &PathFormatter,
) -> Result<Vec<NavEntry>, NavError> {
    sort_dir_entries(tree.children.into_iter().collect())
        .into_iter()
        .map(|(_, node)| match node {
            NavNode::Page(route) => Ok(link_from_route(route, current_pathname, formatter)),
            NavNode::Dir(dir) => Err(NavError::UnexpectedDirectory(dir.slug)),
        })
        .collect()
}

/// Everything navbar construction reads from the site.
#[derive(Debug, Clone, Copy)]
pub struct NavContext<'a> {
    pub routes: &'a RouteTable,
    pub locales: &'a LocaleTable,
    pub formatter: &'a PathFormatter,
}

/// Navbar for a request: explicit config when given, else the route tree of
/// `locale` (`None` is the root locale).
pub fn get_nav_bar_from_config(
    nav_bar_config: Option<&[NavBarItem]>,
    pathname: &str,
    locale: Option<&str>,
    ctx: NavContext<'_>,
) -> Result<Vec<NavEntry>, NavError> {
    let routes = ctx.routes.locale_routes(locale, ctx.locales);
    match nav_bar_config {
        Some(items) => items
            .iter()
            .map(|item| config_item_to_entry(item, pathname, locale, &routes, ctx))
            .collect(),
        None => {
            let tree = treeify(&routes, locale.unwrap_or_default());
            nav_bar_from_dir(tree, pathname, ctx.formatter)
        }
    }
}

fn config_item_to_entry(
    item: &NavBarItem,
    pathname: &str,
    locale: Option<&str>,
    routes: &[&Route],
    ctx: NavContext<'_>,
) -> Result<NavEntry, NavError> {
    match (&item.link, &item.slug) {
        (Some(link), _) => Ok(link_from_manual_item(item, link, locale, pathname, ctx)),
        (None, Some(slug)) => link_from_internal_item(item, slug, locale, pathname, routes, ctx),
        (None, None) => Err(NavError::InvalidItem),
    }
}

/// A `link` item: absolute URLs pass through, site paths get the active
/// locale prefixed.
fn link_from_manual_item(
    item: &NavBarItem,
    link: &str,
    locale: Option<&str>,
    pathname: &str,
    ctx: NavContext<'_>,
) -> NavEntry {
    let mut href = link.to_string();
    if !is_absolute(&href) {
        href = ensure_leading_slash(&href);
        if let Some(locale) = locale {
            href = format!("/{locale}{href}");
        }
    }
    let lang = ctx.locales.locale_to_lang(locale);
    let label = pick_lang(&item.translations, &lang)
        .or(item.label.as_deref())
        .unwrap_or_default()
        .to_string();
    make_nav_bar_link(&href, label, pathname, &item.attrs, ctx.formatter)
}

/// A `slug` item: resolved against the locale's routes by exact slug.
fn link_from_internal_item(
    item: &NavBarItem,
    slug: &str,
    locale: Option<&str>,
    pathname: &str,
    routes: &[&Route],
    ctx: NavContext<'_>,
) -> Result<NavEntry, NavError> {
    let bare = if slug == "index" { "" } else { slug };
    let localized = match locale {
        Some(locale) if !bare.is_empty() => format!("{locale}/{bare}"),
        Some(locale) => locale.to_string(),
        None => bare.to_string(),
    };
    let Some(route) = routes.iter().find(|r| r.slug == localized) else {
        return Err(if slug.starts_with('/') || slug.ends_with('/') {
            NavError::SlugHasSlashes {
                slug: slug.to_string(),
                suggestion: strip_leading_and_trailing_slashes(slug).to_string(),
            }
        } else {
            NavError::UnknownSlug(slug.to_string())
        });
    };
    let lang = ctx.locales.locale_to_lang(locale);
    let label = pick_lang(&item.translations, &lang)
        .or(item.label.as_deref().filter(|l| !l.is_empty()))
        .unwrap_or(&route.entry.data.title)
        .to_string();
    Ok(make_nav_bar_link(
        &slug_to_pathname(&route.slug),
        label,
        pathname,
        &item.attrs,
        ctx.formatter,
    ))
}
