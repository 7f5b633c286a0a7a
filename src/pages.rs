use std::collections::HashSet;
use std::path::Path;

use crate::config::MapperConfig;
use crate::error::Result;
use crate::filter::{self, DocLinkFilter};
use crate::mapper::{self, DocMap};
use crate::nav::NavItem;
use crate::parsers::NavExtractor;
use crate::results::{FetchResult, FetchedPage};
use crate::selector::{SectionUrls, find_section_urls};

/// Builder for one documentation map.
///
/// Navigation is settled here; `start` freezes it and hands out a
/// [`MapSession`] that tags pages against it.
pub struct DocMapper {
    root_url: String,
    config: MapperConfig,
    extractor: NavExtractor,
    nav: Vec<NavItem>,
}

impl DocMapper {
    /// Create a builder for the documentation rooted at `root_url`
    pub fn new(root_url: &str) -> Result<Self> {
        filter::validate_base_url(root_url)?;

        Ok(Self {
            root_url: root_url.to_string(),
            config: MapperConfig::default(),
            extractor: NavExtractor::default(),
            nav: Vec::new(),
        })
    }

    /// Apply a configuration
    pub fn with_config(mut self, config: MapperConfig) -> Result<Self> {
        self.extractor = NavExtractor::new(&config)?;
        self.config = config;
        Ok(self)
    }

    /// Load configuration from a JSON file
    pub fn with_config_file<P: AsRef<Path>>(self, path: P) -> Result<Self> {
        let config = MapperConfig::from_file(path)?;
        self.with_config(config)
    }

    /// Apply configuration from a JSON string
    pub fn with_config_str(self, json: &str) -> Result<Self> {
        let config = MapperConfig::from_json(json)?;
        self.with_config(config)
    }

    /// Override the sections the crawl is scoped to
    pub fn with_sections(mut self, sections: Vec<String>) -> Self {
        self.config.sections = sections;
        self
    }

    /// Override the page cap
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.config.max_pages = max_pages;
        self
    }

    /// Use an already extracted navigation forest
    pub fn with_nav(mut self, nav: Vec<NavItem>) -> Self {
        self.nav = nav;
        self
    }

    /// Extract the navigation from the root page's content
    pub fn with_navigation_from(mut self, content: &str) -> Result<Self> {
        self.nav = self.extractor.extract(content, &self.root_url)?;
        Ok(self)
    }

    pub fn root_url(&self) -> &str {
        &self.root_url
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    pub fn nav(&self) -> &[NavItem] {
        &self.nav
    }

    /// URLs covered by the configured sections, deduplicated, capped at `max_pages`.
    ///
    /// Empty when no sections are configured or none of them matched.
    pub fn scoped_urls(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut urls = Vec::new();

        for name in &self.config.sections {
            match find_section_urls(name, &self.nav) {
                SectionUrls::Found(found) => {
                    ::log::info!("Section {:?} covers {} URLs", name, found.len());
                    urls.extend(found.into_iter().filter(|u| seen.insert(u.clone())));
                }
                SectionUrls::NotFound => {
                    ::log::warn!("Section {:?} not found in navigation", name);
                }
            }
        }

        urls.truncate(self.config.max_pages);
        urls
    }

    /// Freeze the navigation and start accepting pages
    pub fn start(self) -> MapSession {
        ::log::info!(
            "Mapping {} against {} navigation sections",
            self.root_url,
            self.nav.len()
        );

        MapSession {
            root_url: self.root_url,
            filter: self.config.link_filter(),
            max_pages: self.config.max_pages,
            nav: self.nav,
            pages: Vec::new(),
            known: HashSet::new(),
        }
    }
}

/// Collects fetched pages against a fixed navigation forest
pub struct MapSession {
    root_url: String,
    filter: DocLinkFilter,
    max_pages: usize,
    nav: Vec<NavItem>,
    pages: Vec<FetchedPage>,
    known: HashSet<String>,
}

impl MapSession {
    pub fn nav(&self) -> &[NavItem] {
        &self.nav
    }

    pub fn pages(&self) -> &[FetchedPage] {
        &self.pages
    }

    /// Tag a page with its section and keep it.
    ///
    /// A page whose URL was already added is dropped. Returns the section the
    /// page was tagged with.
    pub fn add_page(&mut self, mut page: FetchedPage) -> Option<&str> {
        let key = filter::normalize(&page.url).to_string();
        if !self.known.insert(key) {
            ::log::debug!("Skipping duplicate page {}", page.url);
            return None;
        }

        page.tag_section(&self.nav);
        self.pages.push(page);
        self.pages.last().and_then(|p| p.menu_section.as_deref())
    }

    /// Convert a fetch result into a page and add it
    pub fn add_fetch(&mut self, result: FetchResult) -> Option<&str> {
        let page = FetchedPage::from_fetch(result, &self.root_url);
        self.add_page(page)
    }

    /// Documentation links on a page that are not yet part of the map, in page
    /// order, capped at `max_pages`.
    ///
    /// Hrefs resolve against the page itself; scope is judged against the root.
    pub fn candidate_links(&self, page: &FetchedPage) -> Vec<String> {
        let root = filter::normalize(&self.root_url);
        let mut seen = HashSet::new();

        let mut links: Vec<String> = page
            .links
            .iter()
            .map(|href| filter::resolve(href, &page.url))
            .map(|url| filter::strip_tracking(&url).to_string())
            .filter(|url| self.filter.is_doc_link(url, &self.root_url))
            .filter(|url| {
                let key = filter::normalize(url);
                key != root && !self.known.contains(key)
            })
            .filter(|url| seen.insert(filter::normalize(url).to_string()))
            .collect();

        links.truncate(self.max_pages);
        links
    }

    /// Build the documentation map from everything collected
    pub fn finish(self) -> DocMap {
        mapper::build_map(&self.root_url, self.nav, self.pages)
    }
}
