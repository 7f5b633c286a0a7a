use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::nav::NavItem;
use crate::results::FetchedPage;

/// A section of the documentation map with the pages it owns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocSection {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Page URLs in page-fetch order
    #[serde(default)]
    pub pages: Vec<String>,

    /// Never nested more than one level
    #[serde(default)]
    pub subsections: Vec<DocSection>,
}

impl DocSection {
    fn from_item(item: &NavItem) -> Self {
        Self {
            title: item.title.clone(),
            url: item.has_url().then(|| item.url.clone()),
            pages: Vec::new(),
            subsections: Vec::new(),
        }
    }
}

/// The documentation map of one crawl
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocMap {
    pub root_url: String,
    pub pages: Vec<FetchedPage>,
    pub nav: Vec<NavItem>,
    pub sections: Vec<DocSection>,
}

/// Build the two-level section tree from the navigation and the tagged pages.
///
/// A section owns the pages tagged with its title. A subsection owns the pages
/// whose URL starts with the child's URL, so a page sits in at most one
/// section but possibly in several subsections.
pub fn build_sections(forest: &[NavItem], pages: &[FetchedPage]) -> Vec<DocSection> {
    let sections: Vec<DocSection> = forest
        .iter()
        .map(|item| {
            let mut section = DocSection::from_item(item);
            section.pages = pages
                .iter()
                .filter(|page| page.menu_section.as_deref() == Some(item.title.as_str()))
                .map(|page| page.url.clone())
                .collect();

            section.subsections = item
                .children
                .iter()
                .map(|child| {
                    let mut subsection = DocSection::from_item(child);
                    if child.has_url() {
                        subsection.pages = pages
                            .iter()
                            .filter(|page| page.url.starts_with(child.url.as_str()))
                            .map(|page| page.url.clone())
                            .collect();
                    }
                    subsection
                })
                .collect();

            section
        })
        .collect();

    if !check_sections(&sections) {
        ::log::error!("Documentation map sections are malformed");
    }

    sections
}

/// Assemble the full map: the section tree plus the pass-through crawl data
pub fn build_map(root_url: &str, forest: Vec<NavItem>, pages: Vec<FetchedPage>) -> DocMap {
    let sections = build_sections(&forest, &pages);

    ::log::info!(
        "Built documentation map for {}: {} sections over {} pages",
        root_url,
        sections.len(),
        pages.len()
    );

    DocMap {
        root_url: root_url.to_string(),
        pages,
        nav: forest,
        sections,
    }
}

/// Check the shape of a section tree.
///
/// No subsection may carry subsections of its own, and no page may sit in more
/// than one top-level section. Violations are logged, not repaired.
pub fn check_sections(sections: &[DocSection]) -> bool {
    let mut ok = true;
    let mut owners: HashMap<&str, &str> = HashMap::new();

    for section in sections {
        for page in &section.pages {
            if let Some(owner) = owners.insert(page.as_str(), section.title.as_str()) {
                ::log::error!(
                    "Page {} appears in top-level sections {:?} and {:?}",
                    page,
                    owner,
                    section.title
                );
                ok = false;
            }
        }

        for subsection in &section.subsections {
            if !subsection.subsections.is_empty() {
                ::log::error!(
                    "Subsection {:?} of {:?} has {} nested subsections",
                    subsection.title,
                    section.title,
                    subsection.subsections.len()
                );
                ok = false;
            }
        }
    }

    ok
}
