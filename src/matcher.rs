use crate::filter;
use crate::nav::NavItem;
use crate::utils::fuzzy_match;

/// Find the title of the section a URL belongs to.
///
/// Rules are tried in order and the first hit wins; within a rule the forest
/// is scanned in order:
/// 1. exact URL of a section
/// 2. exact URL of a child (resolves to the child's section)
/// 3. first path segment fuzzily matching a section title
/// 4. URL prefixed by a section URL
/// 5. URL prefixed by a child URL (resolves to the child's section)
///
/// Comparisons ignore fragment, query and trailing slash of the queried URL.
pub fn match_section<'f>(url: &str, forest: &'f [NavItem]) -> Option<&'f str> {
    let url = filter::normalize(url);

    if let Some(item) = forest
        .iter()
        .find(|item| item.has_url() && filter::normalize(&item.url) == url)
    {
        return Some(&item.title);
    }

    if let Some(item) = forest.iter().find(|item| {
        item.children
            .iter()
            .any(|child| child.has_url() && filter::normalize(&child.url) == url)
    }) {
        return Some(&item.title);
    }

    let first_segment = filter::path_after_origin(url)
        .split('/')
        .next()
        .unwrap_or_default();
    if !first_segment.is_empty() {
        if let Some(item) = forest
            .iter()
            .find(|item| fuzzy_match(first_segment, &item.title))
        {
            return Some(&item.title);
        }
    }

    if let Some(item) = forest
        .iter()
        .find(|item| item.has_url() && url.starts_with(item.url.as_str()))
    {
        return Some(&item.title);
    }

    forest
        .iter()
        .find(|item| {
            item.children
                .iter()
                .any(|child| child.has_url() && url.starts_with(child.url.as_str()))
        })
        .map(|item| item.title.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forest() -> Vec<NavItem> {
        let mut guides = NavItem::section("Guides", "https://ex.com/docs/guides");
        guides.push_child("Intro", "https://ex.com/docs/intro/");
        guides.push_child("Setup", "https://ex.com/docs/setup");

        let mut api = NavItem::section("API Reference", "https://ex.com/reference");
        api.push_child("Auth", "https://ex.com/reference/auth");

        vec![guides, api, NavItem::section("Samples", "")]
    }

    #[test]
    fn test_exact_section_url() {
        let forest = forest();
        assert_eq!(
            match_section("https://ex.com/docs/guides/", &forest),
            Some("Guides")
        );
        assert_eq!(
            match_section("https://ex.com/docs/guides#top", &forest),
            Some("Guides")
        );
    }

    #[test]
    fn test_child_url_resolves_to_parent() {
        let forest = forest();
        assert_eq!(
            match_section("https://ex.com/docs/intro", &forest),
            Some("Guides")
        );
        assert_eq!(
            match_section("https://ex.com/reference/auth?v=2", &forest),
            Some("API Reference")
        );
    }

    #[test]
    fn test_first_segment_fuzzy_match() {
        let forest = forest();
        // "samples" is contained in no URL, only in a title
        assert_eq!(
            match_section("https://ex.com/samples/hello", &forest),
            Some("Samples")
        );
    }

    #[test]
    fn test_prefix_match() {
        let forest = vec![NavItem::section("Handbook", "https://ex.com/kb")];
        assert_eq!(
            match_section("https://ex.com/kb/page", &forest),
            Some("Handbook")
        );
    }

    #[test]
    fn test_child_prefix_match() {
        let mut section = NavItem::section("Start Here", "");
        section.push_child("Setup", "https://ex.com/docs/setup");
        let forest = vec![section];

        assert_eq!(
            match_section("https://ex.com/docs/setup/linux", &forest),
            Some("Start Here")
        );
    }

    #[test]
    fn test_no_match() {
        let forest = forest();
        assert_eq!(match_section("https://other.org/blog", &forest), None);
        assert_eq!(match_section("https://ex.com/docs/intro", &[]), None);
    }

    #[test]
    fn test_order_wins_over_title_similarity() {
        let forest = vec![
            NavItem::section("Alpha", "https://ex.com/docs/x"),
            NavItem::section("docs x", "https://ex.com/docs/y"),
        ];
        assert_eq!(
            match_section("https://ex.com/docs/x", &forest),
            Some("Alpha")
        );
    }

    #[test]
    fn test_section_url_beats_earlier_child_url() {
        let mut first = NavItem::section("First", "");
        first.push_child("Shared", "https://ex.com/docs/shared");
        let second = NavItem::section("Second", "https://ex.com/docs/shared");

        assert_eq!(
            match_section("https://ex.com/docs/shared", &[first, second]),
            Some("Second")
        );
    }
}
