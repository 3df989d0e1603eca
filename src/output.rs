//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Every entity is shown by its semantic identity first (positional index,
//! published path, title) with source details on indented context lines:
//!
//! ## Routes
//!
//! ```text
//! Routes
//! 001 /            Home [en]
//!     Source: pages/index.md
//! 002 /es/         Home [es, fallback from en]
//!     Source: pages/index.md
//!
//! 2 routes, 1 fallback, 2 locales
//! ```
//!
//! ## Navbar
//!
//! ```text
//! Navbar /es/about/
//! 001 Blog → /es/blog/
//! 002 Acerca → /es/about/ (current)
//! ```
//!
//! ## Projects
//!
//! ```text
//! Current projects
//! 001 Vitrine
//!     Route and navigation core
//! Past projects
//! (none)
//! ```
//!
//! # Architecture
//!
//! Each display has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::loaders::{ProjectGroups, ProjectSummary};
use crate::routing::{RouteTable, StaticPath};
use crate::site::Site;
use crate::types::{NavEntry, Route};
use std::path::Path;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Bracketed locale detail of a route: `[es]`, `[es, fallback from en]`.
fn route_detail(route: &Route) -> String {
    if route.is_fallback {
        format!("[{}, fallback from {}]", route.lang(), route.entry_meta.lang)
    } else {
        format!("[{}]", route.lang())
    }
}

/// Source of a route's content: the file for pages, the collection id for
/// remote entries.
fn route_source(route: &Route, pages_dir: &str) -> String {
    let entry = &route.entry;
    if entry.collection == "pages" {
        format!("{}/{}", pages_dir.trim_end_matches('/'), entry.file_path)
    } else {
        format!("{} ({})", entry.file_path, entry.collection)
    }
}

// ============================================================================
// Routes
// ============================================================================

/// Format the route table, one entry per published path.
pub fn format_routes(site: &Site) -> Vec<String> {
    let mut lines = vec!["Routes".to_string()];
    let table: &RouteTable = &site.routes;
    let paths: Vec<String> = table.paths().iter().map(|p| static_path_href(site, p)).collect();
    let width = paths.iter().map(String::len).max().unwrap_or(0);

    for (i, (route, href)) in table.routes().iter().zip(&paths).enumerate() {
        lines.push(format!(
            "{} {:<width$} {} {}",
            format_index(i + 1),
            href,
            route.entry.data.title,
            route_detail(route),
        ));
        lines.push(format!(
            "{}Source: {}",
            indent(1),
            route_source(route, &site.config.content.pages_dir)
        ));
    }

    let fallbacks = table.routes().iter().filter(|r| r.is_fallback).count();
    lines.push(String::new());
    lines.push(format!(
        "{}, {}, {}",
        plural(table.len(), "route"),
        plural(fallbacks, "fallback"),
        plural(site.locales.keys().count().max(1), "locale"),
    ));
    lines
}

fn static_path_href(site: &Site, path: &StaticPath<'_>) -> String {
    let slug = path.params.slug.as_deref().unwrap_or_default();
    site.formatter.format(&crate::path::slug_to_pathname(slug))
}

pub fn print_routes(site: &Site) {
    for line in format_routes(site) {
        println!("{}", line);
    }
}

// ============================================================================
// Navbar
// ============================================================================

/// Format a navbar as computed for `pathname`.
pub fn format_nav(pathname: &str, entries: &[NavEntry]) -> Vec<String> {
    let mut lines = vec![format!("Navbar {pathname}")];
    if entries.is_empty() {
        lines.push("(empty)".to_string());
    }
    for (i, entry) in entries.iter().enumerate() {
        let current = if entry.is_current { " (current)" } else { "" };
        lines.push(format!(
            "{} {} → {}{}",
            format_index(i + 1),
            entry.label,
            entry.href,
            current
        ));
        for (name, value) in &entry.attrs {
            lines.push(format!("{}{name}=\"{value}\"", indent(1)));
        }
    }
    lines
}

pub fn print_nav(pathname: &str, entries: &[NavEntry]) {
    for line in format_nav(pathname, entries) {
        println!("{}", line);
    }
}

// ============================================================================
// Projects
// ============================================================================

fn format_project_group(title: &str, projects: &[ProjectSummary], lines: &mut Vec<String>) {
    lines.push(title.to_string());
    if projects.is_empty() {
        lines.push("(none)".to_string());
    }
    for (i, project) in projects.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), project.name));
        if !project.desc.is_empty() {
            lines.push(format!("{}{}", indent(1), project.desc));
        }
    }
}

/// Format grouped projects with headings in the site's language.
pub fn format_projects(groups: &ProjectGroups, current_title: &str, past_title: &str) -> Vec<String> {
    let mut lines = Vec::new();
    format_project_group(current_title, &groups.current, &mut lines);
    format_project_group(past_title, &groups.past, &mut lines);
    lines
}

pub fn print_projects(groups: &ProjectGroups, current_title: &str, past_title: &str) {
    for line in format_projects(groups, current_title, past_title) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// Summary printed after a successful check.
pub fn format_check(site: &Site, source: &Path) -> Vec<String> {
    let locales: Vec<&str> = site.locales.keys().collect();
    let locales = if locales.is_empty() {
        "(single language)".to_string()
    } else {
        locales.join(", ")
    };
    vec![
        format!("Source: {}", source.display()),
        format!("{}Locales: {}", indent(1), locales),
        format!("{}Pages: {}", indent(1), site.routes.pages().len()),
        format!("{}Routes: {}", indent(1), site.routes.len()),
        format!(
            "{}Navbar: {}",
            indent(1),
            if site.config.nav_bar.is_some() { "configured" } else { "from pages" }
        ),
    ]
}

pub fn print_check(site: &Site, source: &Path) {
    for line in format_check(site, source) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::loaders::ProjectSummary;
    use crate::test_helpers::{locale_map, mock_page};
    use crate::translations::Translations;
    use crate::types::LinkAttrs;

    fn bilingual_site() -> Site {
        let config = SiteConfig {
            locales: locale_map(&[("root", "en"), ("es", "es")]),
            ..SiteConfig::default()
        };
        Site::new(config, vec![mock_page("index.md", "Home")], Translations::default())
    }

    #[test]
    fn routes_listing_marks_fallbacks() {
        let lines = format_routes(&bilingual_site());
        assert_eq!(lines[0], "Routes");
        assert_eq!(lines[1], "001 /    Home [en]");
        assert_eq!(lines[2], "    Source: pages/index.md");
        assert_eq!(lines[3], "002 /es/ Home [es, fallback from en]");
        assert_eq!(lines.last().unwrap(), "2 routes, 1 fallback, 2 locales");
    }

    #[test]
    fn nav_listing_flags_current_and_attrs() {
        let entries = vec![
            NavEntry {
                label: "Blog".into(),
                href: "/blog/".into(),
                is_current: false,
                attrs: LinkAttrs::new(),
            },
            NavEntry {
                label: "GitHub".into(),
                href: "https://github.com".into(),
                is_current: true,
                attrs: LinkAttrs::from([("target".to_string(), "_blank".to_string())]),
            },
        ];
        let lines = format_nav("/", &entries);
        assert_eq!(
            lines,
            vec![
                "Navbar /",
                "001 Blog → /blog/",
                "002 GitHub → https://github.com (current)",
                "    target=\"_blank\"",
            ]
        );
    }

    #[test]
    fn empty_nav() {
        assert_eq!(format_nav("/x", &[]), vec!["Navbar /x", "(empty)"]);
    }

    #[test]
    fn projects_listing() {
        let groups = ProjectGroups {
            current: vec![ProjectSummary {
                name: "Vitrine".into(),
                desc: "Route core".into(),
            }],
            past: vec![],
        };
        let lines = format_projects(&groups, "Current projects", "Past projects");
        assert_eq!(
            lines,
            vec!["Current projects", "001 Vitrine", "    Route core", "Past projects", "(none)"]
        );
    }

    #[test]
    fn check_summary() {
        let lines = format_check(&bilingual_site(), Path::new("content"));
        assert_eq!(lines[0], "Source: content");
        assert_eq!(lines[1], "    Locales: es, root");
        assert_eq!(lines[4], "    Navbar: from pages");
    }
}
