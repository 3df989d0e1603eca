//! URL path helpers.
//!
//! Slugs are stored without slashes (`es/about`); hrefs are absolute paths
//! shaped by the site's base, build format, and trailing-slash policy. Two
//! hrefs that differ only in formatting are compared through
//! [`paths_match`].

use crate::config::{BuildFormat, RoutingConfig, TrailingSlash};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

pub fn ensure_leading_slash(href: &str) -> String {
    if href.starts_with('/') {
        href.to_string()
    } else {
        format!("/{href}")
    }
}

pub fn ensure_trailing_slash(href: &str) -> String {
    if href.ends_with('/') {
        href.to_string()
    } else {
        format!("{href}/")
    }
}

pub fn strip_leading_slash(href: &str) -> &str {
    href.strip_prefix('/').unwrap_or(href)
}

pub fn strip_trailing_slash(href: &str) -> &str {
    href.strip_suffix('/').unwrap_or(href)
}

pub fn strip_leading_and_trailing_slashes(href: &str) -> &str {
    strip_trailing_slash(strip_leading_slash(href))
}

/// `http://` or `https://` links are external and never reformatted.
pub fn is_absolute(link: &str) -> bool {
    link.starts_with("http://") || link.starts_with("https://")
}

/// Join a base path and an href with exactly one slash between them.
pub fn join_paths(base: &str, href: &str) -> String {
    let base = strip_trailing_slash(base);
    let href = strip_leading_slash(href);
    if href.is_empty() {
        ensure_trailing_slash(base)
    } else {
        format!("{base}/{href}")
    }
}

/// Path of the page published for a slug: `"a/b"` → `"/a/b/"`, `""` → `"/"`.
pub fn slug_to_pathname(slug: &str) -> String {
    match crate::routing::slug_to_param(slug) {
        Some(param) => format!("/{param}/"),
        None => "/".to_string(),
    }
}

fn ensure_html_extension(href: &str) -> String {
    let path = strip_leading_and_trailing_slashes(href);
    if path.ends_with(".html") {
        ensure_leading_slash(path)
    } else if path.is_empty() {
        "/index.html".to_string()
    } else {
        format!("/{path}.html")
    }
}

fn strip_html_extension(href: &str) -> &str {
    let trimmed = strip_trailing_slash(href);
    trimmed.strip_suffix(".html").unwrap_or(href)
}

/// Formats site-relative paths into published hrefs.
#[derive(Debug, Clone, PartialEq)]
pub struct PathFormatter {
    base: String,
    format: BuildFormat,
    trailing_slash: TrailingSlash,
}

impl PathFormatter {
    pub fn new(base: &str, format: BuildFormat, trailing_slash: TrailingSlash) -> Self {
        Self {
            base: ensure_leading_slash(base),
            format,
            trailing_slash,
        }
    }

    pub fn from_config(routing: &RoutingConfig) -> Self {
        Self::new(&routing.base, routing.build_format, routing.trailing_slash)
    }

    /// Formatter used to compare paths: no base, no trailing slashes.
    pub fn matcher() -> Self {
        Self::new("/", BuildFormat::Directory, TrailingSlash::Never)
    }

    /// Format a site-relative path (`about`, `/es/about/`) into an href.
    pub fn format(&self, href: &str) -> String {
        let href = join_paths(&self.base, href);
        let href = match self.format {
            BuildFormat::File => return ensure_html_extension(&href),
            BuildFormat::Directory => strip_html_extension(&href).to_string(),
        };
        if href == "/" {
            return href;
        }
        match self.trailing_slash {
            TrailingSlash::Always => ensure_trailing_slash(&href),
            TrailingSlash::Never => strip_trailing_slash(&href).to_string(),
            TrailingSlash::Ignore => href,
        }
    }
}

impl Default for PathFormatter {
    fn default() -> Self {
        Self::from_config(&RoutingConfig::default())
    }
}

/// Whether two paths name the same page regardless of trailing slashes.
pub fn paths_match(a: &str, b: &str) -> bool {
    let format = PathFormatter::matcher();
    format.format(a) == format.format(b)
}

/// Characters `encodeURI` leaves alone besides ASCII alphanumerics.
const ENCODE_URI: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b';')
    .remove(b',')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b'#')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a URI the way `encodeURI` does: reserved and unreserved
/// characters pass through, everything else is UTF-8 percent-encoded.
pub fn encode_uri(uri: &str) -> String {
    utf8_percent_encode(uri, ENCODE_URI).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slash_helpers() {
        assert_eq!(ensure_leading_slash("a"), "/a");
        assert_eq!(ensure_leading_slash("/a"), "/a");
        assert_eq!(ensure_trailing_slash("a"), "a/");
        assert_eq!(strip_leading_and_trailing_slashes("/a/b/"), "a/b");
        assert_eq!(strip_leading_and_trailing_slashes("a"), "a");
    }

    #[test]
    fn detects_absolute_links() {
        assert!(is_absolute("https://example.com"));
        assert!(is_absolute("http://example.com/x"));
        assert!(!is_absolute("/about"));
        assert!(!is_absolute("mailto:me@example.com"));
    }

    #[test]
    fn slug_pathnames() {
        assert_eq!(slug_to_pathname(""), "/");
        assert_eq!(slug_to_pathname("index"), "/");
        assert_eq!(slug_to_pathname("es/about"), "/es/about/");
        assert_eq!(slug_to_pathname("guides/index"), "/guides/");
    }

    #[test]
    fn format_directory_ignore_keeps_input_slash() {
        let f = PathFormatter::default();
        assert_eq!(f.format("/about/"), "/about/");
        assert_eq!(f.format("about"), "/about");
        assert_eq!(f.format(""), "/");
    }

    #[test]
    fn format_trailing_slash_policies() {
        let always = PathFormatter::new("/", BuildFormat::Directory, TrailingSlash::Always);
        let never = PathFormatter::new("/", BuildFormat::Directory, TrailingSlash::Never);
        assert_eq!(always.format("/about"), "/about/");
        assert_eq!(never.format("/about/"), "/about");
        assert_eq!(never.format("/"), "/");
    }

    #[test]
    fn format_adds_base() {
        let f = PathFormatter::new("/docs/", BuildFormat::Directory, TrailingSlash::Always);
        assert_eq!(f.format("/es/about/"), "/docs/es/about/");
        assert_eq!(f.format("/"), "/docs/");
    }

    #[test]
    fn format_file_build_uses_html_extension() {
        let f = PathFormatter::new("/", BuildFormat::File, TrailingSlash::Always);
        assert_eq!(f.format("/es/about/"), "/es/about.html");
        assert_eq!(f.format("/"), "/index.html");
        assert_eq!(f.format("/page.html"), "/page.html");
    }

    #[test]
    fn directory_build_strips_html_extension() {
        let f = PathFormatter::default();
        assert_eq!(f.format("/about.html"), "/about");
    }

    #[test]
    fn paths_match_ignores_trailing_slash() {
        assert!(paths_match("/es/about/", "/es/about"));
        assert!(paths_match("/", "/"));
        assert!(!paths_match("/es/about", "/es/abouts"));
    }

    #[test]
    fn encode_uri_matches_javascript() {
        assert_eq!(encode_uri("/café/"), "/caf%C3%A9/");
        assert_eq!(encode_uri("/a b?x=1&y=2#top"), "/a%20b?x=1&y=2#top");
        assert_eq!(encode_uri("/100%"), "/100%25");
        assert_eq!(encode_uri("/es/café/"), "/es/caf%C3%A9/");
        assert_eq!(encode_uri("/a;b,c/d?e:f@g&h=i+j$k#l-m_n.o!p~q*r'(s)"), "/a;b,c/d?e:f@g&h=i+j$k#l-m_n.o!p~q*r'(s)");
        assert_eq!(encode_uri("/[x]{y}|\\^`\"<>"), "/%5Bx%5D%7By%7D%7C%5C%5E%60%22%3C%3E");
    }
}
