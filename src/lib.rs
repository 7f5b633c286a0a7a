//! Infer the navigation structure of a documentation site and map crawled pages onto it.
//!
//! The pipeline: extract a navigation forest from the root page, tag every
//! fetched page with the section it belongs to, then build a two-level
//! section map. Fetching pages is left to the caller.

pub mod config;
pub mod error;
pub mod filter;
pub mod mapper;
pub mod matcher;
pub mod nav;
pub mod pages;
pub mod parsers;
pub mod results;
pub mod selector;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::MapperConfig;
pub use error::{Error, Result};
pub use mapper::{DocMap, DocSection};
pub use nav::NavItem;
pub use pages::{DocMapper, MapSession};
pub use parsers::{NavExtractor, ParserType};
pub use results::{CrawlSnapshot, FetchResult, FetchedPage};

/// Extract the navigation forest of a page with the default configuration
pub fn extract_navigation(html: &str, base_url: &str) -> Result<Vec<NavItem>> {
    NavExtractor::default().extract(html, base_url)
}

/// Title of the section a URL belongs to, if any
pub fn match_section(url: &str, forest: &[NavItem]) -> Option<String> {
    matcher::match_section(url, forest).map(str::to_string)
}

/// URLs covered by a human-entered section name
pub fn resolve_section_urls(name: &str, forest: &[NavItem]) -> Vec<String> {
    selector::resolve_section_urls(name, forest)
}

/// Build the section tree for a forest and a set of tagged pages
pub fn build_map(forest: &[NavItem], pages: &[FetchedPage]) -> Vec<DocSection> {
    mapper::build_sections(forest, pages)
}
