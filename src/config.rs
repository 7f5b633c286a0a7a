use scraper::Selector;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};
use crate::filter::{DEFAULT_DOC_PATH_MARKERS, DocLinkFilter};
use crate::parsers::ParserType;

/// Containers probed first when looking for a navigation region
pub const DEFAULT_NAV_SELECTORS: &[&str] = &[
    "nav",
    "div.devsite-nav-list",
    "div.sidebar",
    "div.toc",
    "aside",
    "ul.nav",
    ".navigation",
    ".menu",
    "#sidebar",
    "#navigation",
];

/// Configuration for navigation extraction and documentation mapping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapperConfig {
    /// Item count at which the extraction chain stops trying further strategies
    #[serde(default = "default_min_nav_items")]
    pub min_nav_items: usize,

    /// Path markers that make a same-site link a documentation link
    #[serde(default = "default_doc_path_markers")]
    pub doc_path_markers: Vec<String>,

    /// CSS selectors for conventional navigation containers
    #[serde(default = "default_nav_selectors")]
    pub nav_selectors: Vec<String>,

    /// Force a parser; detected from the content when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parser: Option<ParserType>,

    /// Maximum number of URLs handed out for scoped or followed crawling
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,

    /// Section names the crawl is restricted to (empty means no restriction)
    #[serde(default)]
    pub sections: Vec<String>,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            min_nav_items: default_min_nav_items(),
            doc_path_markers: default_doc_path_markers(),
            nav_selectors: default_nav_selectors(),
            parser: None,
            max_pages: default_max_pages(),
            sections: Vec::new(),
        }
    }
}

impl MapperConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the extractor cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.min_nav_items == 0 {
            return Err(Error::InvalidInput(
                "min_nav_items must be at least 1".to_string(),
            ));
        }

        if self.doc_path_markers.iter().any(|m| m.is_empty()) {
            return Err(Error::InvalidInput(
                "doc_path_markers must not contain empty markers".to_string(),
            ));
        }

        for selector in &self.nav_selectors {
            if let Err(e) = Selector::parse(selector) {
                return Err(Error::InvalidInput(format!(
                    "nav selector {selector:?} does not parse: {e:?}"
                )));
            }
        }

        Ok(())
    }

    /// Build the documentation link filter for these markers
    pub fn link_filter(&self) -> DocLinkFilter {
        DocLinkFilter::new(self.doc_path_markers.clone())
    }
}

fn default_min_nav_items() -> usize {
    5
}

fn default_doc_path_markers() -> Vec<String> {
    DEFAULT_DOC_PATH_MARKERS.iter().map(|m| m.to_string()).collect()
}

fn default_nav_selectors() -> Vec<String> {
    DEFAULT_NAV_SELECTORS.iter().map(|s| s.to_string()).collect()
}

fn default_max_pages() -> usize {
    100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let config = MapperConfig::from_json("{}").unwrap();
        assert_eq!(config.min_nav_items, 5);
        assert_eq!(config.max_pages, 100);
        assert_eq!(config.nav_selectors.len(), DEFAULT_NAV_SELECTORS.len());
        assert!(config.doc_path_markers.contains(&"/docs/".to_string()));
        assert!(config.parser.is_none());
        assert!(config.sections.is_empty());
    }

    #[test]
    fn test_overrides() {
        let json = r#"{
            "min_nav_items": 3,
            "parser": "text",
            "sections": ["Guides"],
            "doc_path_markers": ["/manual/"]
        }"#;
        let config = MapperConfig::from_json(json).unwrap();
        assert_eq!(config.min_nav_items, 3);
        assert_eq!(config.parser, Some(ParserType::Text));
        assert_eq!(config.sections, vec!["Guides".to_string()]);
        assert!(config.link_filter().is_doc_link("https://ex.com/manual/a", "https://ex.com"));
    }

    #[test]
    fn test_rejects_bad_selector() {
        let json = r#"{ "nav_selectors": ["nav", "div[[["] }"#;
        assert!(matches!(
            MapperConfig::from_json(json),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_rejects_zero_threshold() {
        assert!(matches!(
            MapperConfig::from_json(r#"{ "min_nav_items": 0 }"#),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            MapperConfig::from_json("{ not json"),
            Err(Error::Json(_))
        ));
    }
}
