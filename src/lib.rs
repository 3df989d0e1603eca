//! # Vitrine
//!
//! Route, locale and navigation core for a multilingual blog and portfolio
//! theme. Markdown pages and posts from a headless content API go in; a
//! route table, static path list and per-request navbar come out.
//!
//! # Architecture: Load, Route, Navigate
//!
//! ```text
//! 1. Load      pages/ + remote posts  →  Vec<PageEntry>
//! 2. Route     entries + locales      →  RouteTable (incl. fallbacks)
//! 3. Navigate  routes + request path  →  Vec<NavEntry>
//! ```
//!
//! Steps 1 and 2 happen once when the [`site::Site`] is built. Step 3 runs per
//! request and only reads.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `config.toml` loading, merging over stock defaults, validation |
//! | [`content`] | Walks the pages directory and parses TOML frontmatter |
//! | [`loaders`] | GraphQL request bodies and validated decoding of posts and projects |
//! | [`locale`] | Locale table: default locale, slug → locale, localized slugs and ids |
//! | [`routing`] | Route table with fallback routes, slug params, static paths |
//! | [`navigation`] | Route tree, sibling ordering, navbar from tree or config |
//! | [`translations`] | Built-in and user UI strings, per-language lookup |
//! | [`route_data`] | Per-request page data: titles, layout flags, navbar |
//! | [`site`] | The immutable site context tying the above together |
//! | [`path`] | Href formatting: base, trailing slash, build format |
//! | [`types`] | Shared types: `PageEntry`, `Route`, `NavEntry` |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Fallback Routes Instead of Missing Pages
//!
//! A multilingual site publishes every page of the default locale in every
//! other locale. Untranslated pages are served from the default content with
//! the requesting locale's `lang` and `dir`, flagged `is_fallback`, so a
//! language switcher never leads to a 404.
//!
//! ## `root` Is Not a Prefix
//!
//! The locale key `root` names content served without a URL prefix. It is
//! the default locale whenever it is configured and it never matches a path
//! segment.
//!
//! ## Navbar From the Filesystem
//!
//! Without an explicit `[[nav_bar]]`, the navbar mirrors the pages directory.
//! Sibling order comes from `navbar.order` in frontmatter, then from the
//! slug. A directory's index page merges into the directory node, see
//! [`navigation`].

pub mod config;
pub mod content;
pub mod loaders;
pub mod locale;
pub mod navigation;
pub mod output;
pub mod path;
pub mod route_data;
pub mod routing;
pub mod site;
pub mod translations;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
