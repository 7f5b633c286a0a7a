use crate::nav::NavItem;
use crate::utils::fuzzy_match;

/// Outcome of resolving a section name against the navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionUrls {
    /// A section or child matched; its URLs in forest order (possibly none)
    Found(Vec<String>),
    /// Nothing in the forest matched the name
    NotFound,
}

impl SectionUrls {
    pub fn into_urls(self) -> Vec<String> {
        match self {
            SectionUrls::Found(urls) => urls,
            SectionUrls::NotFound => Vec::new(),
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SectionUrls::Found(_))
    }
}

/// Resolve a human-entered section name to the URLs it covers.
///
/// Sections are tried first: a fuzzy title match yields the section URL then
/// its children's URLs, and only ends the search if that list is non-empty.
/// Otherwise children are tried, and the first match ends the search even when
/// the child has no URL.
pub fn find_section_urls(section_name: &str, forest: &[NavItem]) -> SectionUrls {
    for item in forest {
        if !fuzzy_match(section_name, &item.title) {
            continue;
        }

        let urls: Vec<String> = std::iter::once(item)
            .chain(item.children.iter())
            .filter(|i| i.has_url())
            .map(|i| i.url.clone())
            .collect();

        if !urls.is_empty() {
            return SectionUrls::Found(urls);
        }
    }

    for item in forest {
        if let Some(child) = item
            .children
            .iter()
            .find(|child| fuzzy_match(section_name, &child.title))
        {
            let urls = if child.has_url() {
                vec![child.url.clone()]
            } else {
                Vec::new()
            };
            return SectionUrls::Found(urls);
        }
    }

    SectionUrls::NotFound
}

/// URLs covered by a section name; empty when nothing matched
pub fn resolve_section_urls(section_name: &str, forest: &[NavItem]) -> Vec<String> {
    find_section_urls(section_name, forest).into_urls()
}
