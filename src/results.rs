use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::Result;
use crate::filter;
use crate::matcher::match_section;
use crate::nav::NavItem;
use crate::parsers::html;

/// Title used when a fetched page has none
pub const UNTITLED: &str = "Untitled";

/// What the fetch collaborator hands over for one URL
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchResult {
    pub url: String,

    #[serde(default)]
    pub title: Option<String>,

    /// Raw HTML or markdown of the page
    #[serde(default)]
    pub html: String,

    #[serde(default)]
    pub links: Vec<String>,
}

/// Everything fetched during one crawl, as stored by the fetch collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlSnapshot {
    pub root_url: String,
    pub pages: Vec<FetchResult>,
}

impl CrawlSnapshot {
    /// Load a snapshot from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Ok(serde_json::from_str(&contents)?)
    }

    /// The page navigation is read from: the one at the root URL, else the first
    pub fn root_page(&self) -> Option<&FetchResult> {
        let root = filter::normalize(&self.root_url);
        self.pages
            .iter()
            .find(|p| filter::normalize(&p.url) == root)
            .or_else(|| self.pages.first())
    }
}

/// A crawled page as it appears in the documentation map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchedPage {
    pub url: String,
    pub title: String,
    pub content: String,

    /// Links found on the page, in page order
    pub links: Vec<String>,

    /// Path below the crawl root, split on `/`
    pub path_segments: Vec<String>,

    /// Section assigned by the matcher, set at most once
    pub menu_section: Option<String>,
}

impl FetchedPage {
    /// Create a page, deriving its path segments from the crawl root
    pub fn new(
        url: impl Into<String>,
        root_url: &str,
        title: impl Into<String>,
        content: impl Into<String>,
        links: Vec<String>,
    ) -> Self {
        let url = url.into();
        let title = title.into();
        let path_segments = path_segments(&url, root_url);

        Self {
            url,
            title: if title.trim().is_empty() {
                UNTITLED.to_string()
            } else {
                title
            },
            content: content.into(),
            links,
            path_segments,
            menu_section: None,
        }
    }

    /// Build a page from a fetch result.
    ///
    /// Title and links missing from the result are read from the HTML.
    pub fn from_fetch(result: FetchResult, root_url: &str) -> Self {
        let parsed = html::parse_page(&result.html);

        let title = result
            .title
            .filter(|t| !t.trim().is_empty())
            .or(parsed.title)
            .unwrap_or_default();

        let links = if result.links.is_empty() {
            parsed.links
        } else {
            result.links
        };

        Self::new(result.url, root_url, title, result.html, links)
    }

    /// Assign the page to a navigation section.
    ///
    /// A page keeps the first section it was tagged with; later calls leave it
    /// untouched. Returns the section now held by the page.
    pub fn tag_section(&mut self, forest: &[NavItem]) -> Option<&str> {
        if self.menu_section.is_some() {
            ::log::warn!("Page {} already tagged, keeping its section", self.url);
        } else {
            self.menu_section = match_section(&self.url, forest).map(str::to_string);
            ::log::debug!("Page {} -> section {:?}", self.url, self.menu_section);
        }

        self.menu_section.as_deref()
    }
}

/// Path of `url` below `root_url` as segments; empty for the root or foreign URLs
pub fn path_segments(url: &str, root_url: &str) -> Vec<String> {
    match filter::relative_path(url, root_url) {
        Some(path) if !path.is_empty() => path.split('/').map(|s| s.to_string()).collect(),
        _ => Vec::new(),
    }
}
