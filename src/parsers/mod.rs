pub mod cluster;
pub mod html;
pub mod text;

#[cfg(test)]
mod tests;

use regex::Regex;
use scraper::Selector;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::config::MapperConfig;
use crate::error::Result;
use crate::filter::{self, DocLinkFilter};
use crate::nav::{self, NavItem};

/// Document and block-level tags; inline tags and `<scheme:...>` autolinks do not count
static MARKUP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)<(?:!doctype|html|head|body|nav|aside|header|main|section|div|ul|ol|li|a|p|h[1-6]|table)(?:[\s/][^>]*)?>",
    )
    .unwrap()
});

/// Which extraction chain runs over a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParserType {
    /// Structural chain over a parsed DOM
    Html,
    /// Markup-free chain using pattern matching over raw text
    Text,
}

impl ParserType {
    /// Pick a chain from the content itself: anything carrying document or block
    /// tags is HTML
    pub fn detect(content: &str) -> Self {
        if MARKUP_RE.is_match(content) {
            ::log::debug!("Content carries markup, using structural extraction");
            ParserType::Html
        } else {
            ::log::debug!("No markup found, using text extraction");
            ParserType::Text
        }
    }
}

/// Title, visible text and raw hrefs of a single page
#[derive(Debug, Clone, Default)]
pub struct PageParse {
    pub title: Option<String>,
    pub content: String,
    pub links: Vec<String>,
}

/// Inputs shared by every extraction strategy
pub struct ExtractContext<'a> {
    pub base_url: &'a str,
    pub filter: &'a DocLinkFilter,
    pub nav_selectors: &'a [Selector],
}

impl ExtractContext<'_> {
    /// Make an href absolute against the base URL
    pub fn resolve(&self, href: &str) -> String {
        filter::resolve(href, self.base_url)
    }

    /// Resolve an href and keep it only if it is a documentation link
    pub fn doc_link(&self, href: &str) -> Option<String> {
        let url = self.resolve(href);
        self.filter.is_doc_link(&url, self.base_url).then_some(url)
    }

    /// Like [`doc_link`](Self::doc_link), but drops fragment and query first
    pub fn stripped_doc_link(&self, href: &str) -> Option<String> {
        let url = filter::strip_tracking(&self.resolve(href)).to_string();
        self.filter.is_doc_link(&url, self.base_url).then_some(url)
    }
}

/// Run strategies in order, each only while the forest is still below the threshold.
///
/// Every strategy appends to the forest built so far, skipping sections with the
/// title and URL of one already there.
pub(crate) fn run_chain<D: ?Sized>(
    doc: &D,
    ctx: &ExtractContext<'_>,
    min_items: usize,
    strategies: &[(&str, fn(&D, &ExtractContext<'_>) -> Vec<NavItem>)],
) -> Vec<NavItem> {
    let mut forest: Vec<NavItem> = Vec::new();

    for (name, strategy) in strategies {
        let found = nav::count_items(&forest);
        if found >= min_items {
            break;
        }

        let items = strategy(doc, ctx);
        ::log::debug!(
            "Strategy '{}' yielded {} sections ({} items)",
            name,
            items.len(),
            nav::count_items(&items)
        );

        // A section an earlier strategy already produced is not added twice
        for item in items {
            if forest
                .iter()
                .any(|known| known.title == item.title && known.url == item.url)
            {
                ::log::debug!("Strategy '{}' repeated section {:?}", name, item.title);
                continue;
            }
            forest.push(item);
        }
    }

    if !nav::check_forest(&forest) {
        ::log::error!("Extraction produced a malformed navigation forest");
    }

    forest
}

/// Navigation extractor configured once and reused across pages
#[derive(Debug, Clone)]
pub struct NavExtractor {
    nav_selectors: Vec<Selector>,
    filter: DocLinkFilter,
    min_nav_items: usize,
    parser: Option<ParserType>,
}

impl Default for NavExtractor {
    fn default() -> Self {
        let config = MapperConfig::default();
        Self {
            nav_selectors: config
                .nav_selectors
                .iter()
                .filter_map(|s| Selector::parse(s).ok())
                .collect(),
            filter: config.link_filter(),
            min_nav_items: config.min_nav_items,
            parser: None,
        }
    }
}

impl NavExtractor {
    /// Create an extractor from configuration
    pub fn new(config: &MapperConfig) -> Result<Self> {
        config.validate()?;

        let nav_selectors = config
            .nav_selectors
            .iter()
            .filter_map(|s| Selector::parse(s).ok())
            .collect();

        Ok(Self {
            nav_selectors,
            filter: config.link_filter(),
            min_nav_items: config.min_nav_items,
            parser: config.parser,
        })
    }

    /// Extract the navigation forest of a page.
    ///
    /// Only an unusable base URL is an error; markup that yields nothing gives
    /// an empty forest.
    pub fn extract(&self, content: &str, base_url: &str) -> Result<Vec<NavItem>> {
        let parser = self.parser.unwrap_or_else(|| ParserType::detect(content));
        self.extract_with(content, base_url, parser)
    }

    /// Extract with an explicitly chosen chain
    pub fn extract_with(
        &self,
        content: &str,
        base_url: &str,
        parser: ParserType,
    ) -> Result<Vec<NavItem>> {
        filter::validate_base_url(base_url)?;

        let ctx = ExtractContext {
            base_url,
            filter: &self.filter,
            nav_selectors: &self.nav_selectors,
        };

        let forest = match parser {
            ParserType::Html => html::extract(content, &ctx, self.min_nav_items),
            ParserType::Text => text::extract(content, &ctx, self.min_nav_items),
        };

        ::log::info!(
            "Extracted {} navigation sections from {}",
            forest.len(),
            base_url
        );
        ::log::debug!("Navigation outline:\n{}", nav::outline(&forest));

        Ok(forest)
    }
}
