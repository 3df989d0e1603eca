//! Page collection loading.
//!
//! Walks the pages directory and turns every Markdown file into a
//! [`PageEntry`]. The directory layout is the route layout:
//!
//! ```text
//! content/
//! ├── config.toml
//! ├── i18n/
//! │   └── es.toml              # UI string overrides (optional)
//! └── pages/
//!     ├── index.md             # slug ""
//!     ├── about.md             # slug "about"
//!     ├── _draft-notes.md      # underscore prefix = ignored
//!     ├── guides/
//!     │   ├── index.md         # slug "guides"
//!     │   └── Getting Started.md  # slug "guides/getting-started"
//!     └── es/
//!         └── about.md         # slug "es/about"
//! ```
//!
//! ## Frontmatter
//!
//! An optional TOML block delimited by `+++` lines opens the file:
//!
//! ```text
//! +++
//! title = "About"
//! [navbar]
//! order = 2
//! +++
//! Page body...
//! ```
//!
//! Without a `title`, the first `# heading` of the body is used, then the
//! file name with dashes turned into spaces.
//!
//! ## Ids
//!
//! By default a page id is its slug before index normalization (the root
//! index page keeps the id `index`). With `legacy_ids` the id is the file
//! path relative to the pages directory, extension included.

use crate::types::{Frontmatter, PageEntry};
use std::fs;
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Invalid frontmatter in {path}: {source}")]
    Frontmatter {
        path: String,
        source: toml::de::Error,
    },
    #[error("Unterminated frontmatter in {0}: missing closing `+++`")]
    UnterminatedFrontmatter(String),
}

/// File extensions recognized as pages.
pub const PAGE_EXTENSIONS: &[&str] = &["markdown", "mdown", "mkdn", "mkd", "mdwn", "md", "mdx"];

const FRONTMATTER_DELIMITER: &str = "+++";

/// Options controlling which pages are loaded and how they are identified.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Production builds drop drafts.
    pub production: bool,
    /// Use file paths with extension as ids.
    pub legacy_ids: bool,
}

/// Load every page under `pages_dir`, sorted by path for deterministic
/// output. A missing directory yields no pages.
pub fn load_pages(pages_dir: &Path, options: LoadOptions) -> Result<Vec<PageEntry>, ContentError> {
    if !pages_dir.is_dir() {
        log::debug!("no pages directory at {}", pages_dir.display());
        return Ok(Vec::new());
    }

    let mut pages = Vec::new();
    for entry in WalkDir::new(pages_dir).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type().is_file() || !is_page_file(path) {
            continue;
        }
        let rel = path
            .strip_prefix(pages_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/");
        let raw = fs::read_to_string(path)?;
        let page = parse_page(&rel, &raw, options)?;
        if options.production && page.data.draft {
            log::debug!("skipping draft {rel}");
            continue;
        }
        pages.push(page);
    }
    log::debug!("loaded {} pages from {}", pages.len(), pages_dir.display());
    Ok(pages)
}

fn is_page_file(path: &Path) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    if name.starts_with('_') || name.starts_with('.') {
        return false;
    }
    path.extension()
        .map(|e| {
            let ext = e.to_string_lossy().to_lowercase();
            PAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Build a page entry from its path (relative to the pages directory,
/// `/`-separated) and raw file contents.
pub fn parse_page(rel_path: &str, raw: &str, options: LoadOptions) -> Result<PageEntry, ContentError> {
    let (frontmatter, body) = split_frontmatter(raw, rel_path)?;
    let mut data: Frontmatter = match frontmatter {
        Some(block) => toml::from_str(block).map_err(|source| ContentError::Frontmatter {
            path: rel_path.to_string(),
            source,
        })?,
        None => Frontmatter::default(),
    };

    let stem_path = strip_extension(rel_path);
    if data.title.trim().is_empty() {
        data.title = first_heading(body).unwrap_or_else(|| display_title(stem_path));
    }

    let derived = data
        .slug
        .clone()
        .unwrap_or_else(|| slug_from_path(stem_path));
    let id = if options.legacy_ids {
        rel_path.to_string()
    } else {
        derived.clone()
    };

    Ok(PageEntry {
        id,
        slug: normalize_index_slug(&derived).to_string(),
        file_path: rel_path.to_string(),
        collection: "pages".to_string(),
        data,
        body: body.to_string(),
    })
}

/// Split a leading `+++` block from the body.
fn split_frontmatter<'a>(raw: &'a str, path: &str) -> Result<(Option<&'a str>, &'a str), ContentError> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let Some(rest) = raw.strip_prefix(FRONTMATTER_DELIMITER) else {
        return Ok((None, raw));
    };
    let Some(rest) = rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n')) else {
        return Ok((None, raw));
    };
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FRONTMATTER_DELIMITER {
            let body = &rest[offset + line.len()..];
            return Ok((Some(&rest[..offset]), body));
        }
        offset += line.len();
    }
    Err(ContentError::UnterminatedFrontmatter(path.to_string()))
}

fn first_heading(body: &str) -> Option<String> {
    body.lines()
        .find(|line| line.starts_with("# "))
        .map(|line| line.trim_start_matches("# ").trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Title from the last path segment: `guides/getting-started` → "getting started".
fn display_title(stem_path: &str) -> String {
    let name = stem_path.rsplit('/').next().unwrap_or(stem_path);
    name.replace('-', " ")
}

/// Remove the extension of the last path segment.
pub fn strip_extension(path: &str) -> &str {
    let start = path.rfind('/').map(|i| i + 1).unwrap_or(0);
    match path[start..].rfind('.') {
        Some(dot) if dot > 0 => &path[..start + dot],
        _ => path,
    }
}

/// Derive a slug from a path without extension.
///
/// Segments are lowercased, whitespace becomes `-`, and characters outside
/// `[a-z0-9_.-]` (plus non-ASCII letters) are dropped. A trailing `index`
/// segment is removed unless it is the only segment.
pub fn slug_from_path(stem_path: &str) -> String {
    let segments: Vec<String> = stem_path
        .split('/')
        .filter(|s| !s.is_empty())
        .map(slugify_segment)
        .collect();
    match segments.as_slice() {
        [parents @ .., last] if last == "index" && !parents.is_empty() => parents.join("/"),
        _ => segments.join("/"),
    }
}

fn slugify_segment(segment: &str) -> String {
    segment
        .trim()
        .chars()
        .filter_map(|c| {
            if c.is_whitespace() {
                Some('-')
            } else if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') {
                Some(c)
            } else {
                None
            }
        })
        .flat_map(char::to_lowercase)
        .collect()
}

/// The root index page has the slug `index`; treat it as the empty slug.
pub fn normalize_index_slug(slug: &str) -> &str {
    if slug == "index" { "" } else { slug }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::write_file as write;
    use tempfile::TempDir;

    #[test]
    fn frontmatter_parsed() {
        let page = parse_page(
            "about.md",
            "+++\ntitle = \"About Us\"\n[navbar]\norder = 2\nhidden = true\n+++\nHello\n",
            LoadOptions::default(),
        )
        .unwrap();
        assert_eq!(page.data.title, "About Us");
        assert_eq!(page.data.navbar.order, Some(2.0));
        assert!(page.data.navbar.hidden);
        assert_eq!(page.body, "Hello\n");
        assert_eq!(page.slug, "about");
        assert_eq!(page.id, "about");
    }

    #[test]
    fn title_falls_back_to_heading_then_filename() {
        let page = parse_page("who-am-i.md", "# Me\n\ntext", LoadOptions::default()).unwrap();
        assert_eq!(page.data.title, "Me");

        let page = parse_page("who-am-i.md", "just text", LoadOptions::default()).unwrap();
        assert_eq!(page.data.title, "who am i");
    }

    #[test]
    fn unterminated_frontmatter_is_error() {
        let result = parse_page("a.md", "+++\ntitle = \"x\"\n", LoadOptions::default());
        assert!(matches!(result, Err(ContentError::UnterminatedFrontmatter(_))));
    }

    #[test]
    fn unknown_frontmatter_key_is_error() {
        let result = parse_page("a.md", "+++\ntitel = \"x\"\n+++\n", LoadOptions::default());
        assert!(matches!(result, Err(ContentError::Frontmatter { .. })));
    }

    #[test]
    fn index_pages_get_directory_slug() {
        let opts = LoadOptions::default();
        let root = parse_page("index.md", "", opts).unwrap();
        assert_eq!(root.slug, "");
        assert_eq!(root.id, "index");

        let guides = parse_page("guides/index.md", "", opts).unwrap();
        assert_eq!(guides.slug, "guides");
        assert_eq!(guides.id, "guides");
    }

    #[test]
    fn legacy_ids_keep_file_path() {
        let opts = LoadOptions {
            legacy_ids: true,
            ..LoadOptions::default()
        };
        let page = parse_page("es/Guide.md", "", opts).unwrap();
        assert_eq!(page.id, "es/Guide.md");
        assert_eq!(page.slug, "es/guide");
    }

    #[test]
    fn slug_override_wins() {
        let page = parse_page(
            "blog/2024-01-01-hello.md",
            "+++\nslug = \"blog/hello\"\n+++\n",
            LoadOptions::default(),
        )
        .unwrap();
        assert_eq!(page.slug, "blog/hello");
        assert_eq!(page.id, "blog/hello");
    }

    #[test]
    fn fractional_navbar_order_parsed() {
        let page = parse_page(
            "faq.md",
            "+++\n[navbar]\norder = 1.5\n+++\n",
            LoadOptions::default(),
        )
        .unwrap();
        assert_eq!(page.data.navbar.order, Some(1.5));
    }

    #[test]
    fn slugify_segments() {
        assert_eq!(slug_from_path("Guides/Getting Started"), "guides/getting-started");
        assert_eq!(slug_from_path("faq?"), "faq");
        assert_eq!(slug_from_path("index"), "index");
        assert_eq!(slug_from_path("a/index"), "a");
    }

    #[test]
    fn strip_extension_only_touches_last_segment() {
        assert_eq!(strip_extension("v1.0/intro.md"), "v1.0/intro");
        assert_eq!(strip_extension("v1.0/intro"), "v1.0/intro");
        assert_eq!(strip_extension(".hidden"), ".hidden");
    }

    // =========================================================================
    // Directory loading
    // =========================================================================

    #[test]
    fn load_pages_walks_tree_in_order() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "index.md", "# Home");
        write(tmp.path(), "guides/intro.md", "# Intro");
        write(tmp.path(), "about.mdx", "# About");
        write(tmp.path(), "notes.txt", "ignored");
        write(tmp.path(), "_partial.md", "ignored");

        let pages = load_pages(tmp.path(), LoadOptions::default()).unwrap();
        let slugs: Vec<&str> = pages.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["about", "guides/intro", ""]);
        assert!(pages.iter().all(|p| p.collection == "pages"));
    }

    #[test]
    fn production_drops_drafts() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "wip.md", "+++\ndraft = true\n+++\n");
        write(tmp.path(), "done.md", "# Done");

        let dev = load_pages(tmp.path(), LoadOptions::default()).unwrap();
        assert_eq!(dev.len(), 2);

        let prod = load_pages(
            tmp.path(),
            LoadOptions {
                production: true,
                ..LoadOptions::default()
            },
        )
        .unwrap();
        assert_eq!(prod.len(), 1);
        assert_eq!(prod[0].slug, "done");
    }

    #[test]
    fn missing_directory_has_no_pages() {
        let tmp = TempDir::new().unwrap();
        let pages = load_pages(&tmp.path().join("nope"), LoadOptions::default()).unwrap();
        assert!(pages.is_empty());
    }
}
