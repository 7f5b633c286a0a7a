use regex::Regex;
use std::sync::LazyLock;
use url::Url;

use crate::error::{Error, Result};

/// Path markers that identify a same-site URL as documentation
pub const DEFAULT_DOC_PATH_MARKERS: &[&str] = &[
    "/docs/",
    "/reference/",
    "/guides/",
    "/tutorials/",
    "/samples/",
    "/support/",
    "/overview/",
    "/start/",
    "/beginner/",
];

static SCHEME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").unwrap());

static ORIGIN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(https?://[^/]+)").unwrap());

/// Check that a base URL is usable: absolute, http(s), with a host
pub fn validate_base_url(base_url: &str) -> Result<Url> {
    let parsed = Url::parse(base_url)
        .map_err(|e| Error::InvalidInput(format!("base url {base_url:?}: {e}")))?;

    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(Error::InvalidInput(format!(
            "base url {base_url:?} must be an absolute http(s) URL"
        )));
    }

    Ok(parsed)
}

/// Scheme and host (with port) of a URL, or the URL itself when it has none
pub fn origin(base_url: &str) -> &str {
    ORIGIN_RE
        .captures(base_url)
        .and_then(|c| c.get(1))
        .map_or(base_url, |m| m.as_str())
}

/// Resolve an href found on a page against the base URL.
///
/// Absolute hrefs are returned unchanged, root-relative ones are joined to the
/// origin, everything else is joined to the base with a single `/`. Dot
/// segments are left as they are.
pub fn resolve(href: &str, base_url: &str) -> String {
    if SCHEME_RE.is_match(href) {
        return href.to_string();
    }

    if let Some(rest) = href.strip_prefix("//") {
        let scheme = base_url.split("://").next().unwrap_or("https");
        return format!("{scheme}://{rest}");
    }

    if href.starts_with('/') {
        return format!("{}{}", origin(base_url), href);
    }

    format!("{}/{}", base_url.trim_end_matches('/'), href)
}

/// Truncate a URL at the first `#` or `?`
pub fn strip_tracking(url: &str) -> &str {
    match url.find(['#', '?']) {
        Some(idx) => &url[..idx],
        None => url,
    }
}

/// Comparison form of a URL: no fragment, no query, no trailing slash
pub fn normalize(url: &str) -> &str {
    strip_tracking(url).trim_end_matches('/')
}

/// Path of `url` below `root_url`, without surrounding slashes, fragment or query.
///
/// Returns `None` when the URL is not under the root.
pub fn relative_path<'a>(url: &'a str, root_url: &str) -> Option<&'a str> {
    let rest = url.strip_prefix(root_url)?;
    Some(strip_tracking(rest).trim_matches('/'))
}

/// Path of an absolute URL after its origin, without surrounding slashes
pub fn path_after_origin(url: &str) -> &str {
    let origin = origin(url);
    url[origin.len()..].trim_matches('/')
}

/// Classifies same-site URLs as documentation links using path markers
#[derive(Debug, Clone)]
pub struct DocLinkFilter {
    markers: Vec<String>,
}

impl Default for DocLinkFilter {
    fn default() -> Self {
        Self::new(DEFAULT_DOC_PATH_MARKERS.iter().map(|m| m.to_string()).collect())
    }
}

impl DocLinkFilter {
    /// Create a filter from a list of path markers
    pub fn new(markers: Vec<String>) -> Self {
        Self { markers }
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    /// Determine if a URL is an in-scope documentation link
    pub fn is_doc_link(&self, url: &str, base_url: &str) -> bool {
        if !url.starts_with(base_url) {
            return false;
        }

        // Anchors and queries point into pages we already know about
        if url.contains(['#', '?']) {
            return false;
        }

        let path = &url[origin(url).len()..];
        self.markers.iter().any(|marker| path.contains(marker.as_str()))
    }
}

/// Determine if a URL is a documentation link using the default markers
pub fn is_doc_link(url: &str, base_url: &str) -> bool {
    DocLinkFilter::default().is_doc_link(url, base_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        let base = "https://ex.com/docs";

        assert_eq!(
            resolve("https://other.org/page", base),
            "https://other.org/page"
        );
        assert_eq!(resolve("mailto:team@ex.com", base), "mailto:team@ex.com");
        assert_eq!(resolve("/docs/intro", base), "https://ex.com/docs/intro");
        assert_eq!(resolve("intro", base), "https://ex.com/docs/intro");
        assert_eq!(resolve("intro", "https://ex.com/docs/"), "https://ex.com/docs/intro");
        assert_eq!(resolve("//cdn.ex.com/a.js", base), "https://cdn.ex.com/a.js");

        // Dot segments are not collapsed
        assert_eq!(resolve("../api", base), "https://ex.com/docs/../api");
    }

    #[test]
    fn test_origin_keeps_port() {
        assert_eq!(origin("http://localhost:8000/docs/x"), "http://localhost:8000");
        assert_eq!(origin("not a url"), "not a url");
    }

    #[test]
    fn test_strip_tracking_and_normalize() {
        assert_eq!(strip_tracking("https://ex.com/a#top"), "https://ex.com/a");
        assert_eq!(strip_tracking("https://ex.com/a?x=1#y"), "https://ex.com/a");
        assert_eq!(strip_tracking("https://ex.com/a"), "https://ex.com/a");
        assert_eq!(normalize("https://ex.com/a/?x=1"), "https://ex.com/a");
    }

    #[test]
    fn test_relative_path() {
        let root = "https://ex.com/docs";
        assert_eq!(relative_path("https://ex.com/docs/api/x/", root), Some("api/x"));
        assert_eq!(relative_path("https://ex.com/docs/api#frag", root), Some("api"));
        assert_eq!(relative_path("https://ex.com/docs", root), Some(""));
        assert_eq!(relative_path("https://ex.com/blog/post", root), None);
    }

    #[test]
    fn test_is_doc_link() {
        let base = "https://ex.com";

        assert!(is_doc_link("https://ex.com/docs/intro", base));
        assert!(is_doc_link("https://ex.com/guides/setup", base));
        assert!(!is_doc_link("https://ex.com/blog/post", base));
        assert!(!is_doc_link("https://other.com/docs/intro", base));

        // Anchors and queries are always rejected
        assert!(!is_doc_link("https://ex.com/docs/intro#install", base));
        assert!(!is_doc_link("https://ex.com/docs/intro?lang=en", base));
    }

    #[test]
    fn test_is_doc_link_is_stable() {
        let url = "https://ex.com/docs/reference/api";
        let first = is_doc_link(url, "https://ex.com");
        for _ in 0..5 {
            assert_eq!(is_doc_link(url, "https://ex.com"), first);
        }
    }

    #[test]
    fn test_custom_markers() {
        let filter = DocLinkFilter::new(vec!["/manual/".to_string()]);
        assert!(filter.is_doc_link("https://ex.com/manual/ch1", "https://ex.com"));
        assert!(!filter.is_doc_link("https://ex.com/docs/ch1", "https://ex.com"));
    }

    #[test]
    fn test_validate_base_url() {
        assert!(validate_base_url("https://ex.com/docs").is_ok());
        assert!(matches!(
            validate_base_url("ex.com/docs"),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            validate_base_url("ftp://ex.com/docs"),
            Err(Error::InvalidInput(_))
        ));
    }
}
