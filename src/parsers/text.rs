//! Markup-free extraction: the same two-tier navigation read with patterns over raw text.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

use crate::nav::NavItem;
use crate::parsers::{ExtractContext, cluster, run_chain};
use crate::utils::clean_text;

static NAV_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<nav\b[^>]*>(.*?)</nav\s*>").unwrap());
static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<h[1-6]\b[^>]*>(.*?)</h[1-6]\s*>").unwrap());
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<a\b[^>]*?\bhref\s*=\s*["']([^"']*)["'][^>]*>(.*?)</a\s*>"#).unwrap()
});
static MARKDOWN_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]\n]+)\]\(([^)\s]+)(?:\s+[^)]*)?\)").unwrap());
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Pattern-based strategies, most specific first
pub const STRATEGIES: &[(&str, fn(&str, &ExtractContext<'_>) -> Vec<NavItem>)] = &[
    ("regex nav scan", nav_scan),
    ("path clustering", path_clusters),
];

/// Run the pattern-based chain over raw page text
pub fn extract(raw: &str, ctx: &ExtractContext<'_>, min_items: usize) -> Vec<NavItem> {
    run_chain(raw, ctx, min_items, STRATEGIES)
}

/// Read sections out of every `<nav>` region
pub fn nav_scan(raw: &str, ctx: &ExtractContext<'_>) -> Vec<NavItem> {
    NAV_RE
        .captures_iter(raw)
        .filter_map(|c| c.get(1))
        .flat_map(|region| scan_region(region.as_str(), ctx))
        .collect()
}

/// Group every documentation link (anchor tags and markdown links) by first path segment
pub fn path_clusters(raw: &str, ctx: &ExtractContext<'_>) -> Vec<NavItem> {
    let mut links: Vec<(usize, String, &str)> = LINK_RE
        .captures_iter(raw)
        .filter_map(|c| {
            let start = c.get(0)?.start();
            Some((start, strip_tags(c.get(2)?.as_str()), c.get(1)?.as_str()))
        })
        .collect();

    links.extend(MARKDOWN_LINK_RE.captures_iter(raw).filter_map(|c| {
        let start = c.get(0)?.start();
        Some((start, clean_text([c.get(1)?.as_str()]), c.get(2)?.as_str()))
    }));
    links.sort_by_key(|(start, _, _)| *start);

    cluster::cluster_links(links.into_iter().map(|(_, text, href)| (text, href)), ctx)
}

enum Token<'r> {
    Heading { inner: &'r str },
    Link { href: &'r str, text: String, in_heading: bool },
}

/// Same rules as the structural container read: headings open sections, links
/// inside headings re-target them, other links become children.
fn scan_region(region: &str, ctx: &ExtractContext<'_>) -> Vec<NavItem> {
    let headings: Vec<(Range<usize>, &str)> = HEADING_RE
        .captures_iter(region)
        .filter_map(|c| Some((c.get(0)?.range(), c.get(1)?.as_str())))
        .collect();

    let mut tokens: Vec<(usize, Token<'_>)> = headings
        .iter()
        .map(|(span, inner)| (span.start, Token::Heading { inner: *inner }))
        .collect();

    for c in LINK_RE.captures_iter(region) {
        let (Some(whole), Some(href), Some(text)) = (c.get(0), c.get(1), c.get(2)) else {
            continue;
        };
        let in_heading = headings
            .iter()
            .any(|(span, _)| span.contains(&whole.start()));
        tokens.push((
            whole.start(),
            Token::Link {
                href: href.as_str(),
                text: strip_tags(text.as_str()),
                in_heading,
            },
        ));
    }
    tokens.sort_by_key(|(start, _)| *start);

    let mut sections: Vec<NavItem> = Vec::new();
    let mut current: Option<usize> = None;

    for (_, token) in tokens {
        match token {
            Token::Heading { inner } => {
                let title = strip_tags(inner);
                if title.is_empty() {
                    continue;
                }
                let url = LINK_RE
                    .captures(inner)
                    .and_then(|c| c.get(1))
                    .map(|href| href.as_str())
                    .filter(|href| !href.is_empty())
                    .map(|href| ctx.resolve(href))
                    .unwrap_or_default();

                sections.push(NavItem::section(title, url));
                current = Some(sections.len() - 1);
            }
            Token::Link {
                href,
                text,
                in_heading,
            } => {
                if text.is_empty() || href.is_empty() {
                    continue;
                }
                // Anchored and parameterised links count as the page they point at
                let Some(url) = ctx.stripped_doc_link(href) else {
                    continue;
                };

                match (in_heading, current) {
                    (true, Some(idx)) => {
                        sections[idx].title = text;
                        sections[idx].url = url;
                    }
                    (true, None) => {
                        sections.push(NavItem::section(text, url));
                        current = Some(sections.len() - 1);
                    }
                    (false, Some(idx)) => sections[idx].push_child(text, url),
                    (false, None) => sections.push(NavItem::section(text, url)),
                }
            }
        }
    }

    sections
}

/// Visible text of a markup fragment
fn strip_tags(fragment: &str) -> String {
    let text = TAG_RE.replace_all(fragment, "");
    clean_text([&*text])
}
