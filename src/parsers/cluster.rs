//! Last-resort navigation: group documentation links by their first path segment.

use crate::filter;
use crate::nav::NavItem;
use crate::parsers::ExtractContext;
use crate::utils::humanize_segment;

/// Groups smaller than this are dropped
pub const MIN_CLUSTER_LINKS: usize = 2;

/// Cluster `(link text, href)` pairs into sections named after the first path
/// segment below the base URL. Groups keep first-seen order.
pub fn cluster_links<'a, I>(links: I, ctx: &ExtractContext<'_>) -> Vec<NavItem>
where
    I: IntoIterator<Item = (String, &'a str)>,
{
    let mut groups: Vec<(String, Vec<(String, String)>)> = Vec::new();

    for (text, href) in links {
        if text.is_empty() || href.is_empty() {
            continue;
        }

        let Some(url) = ctx.doc_link(href) else {
            continue;
        };
        let Some(path) = filter::relative_path(&url, ctx.base_url) else {
            continue;
        };

        let segment = path.split('/').next().unwrap_or_default();
        let title = humanize_segment(segment);
        if title.is_empty() {
            continue;
        }

        match groups.iter_mut().find(|(name, _)| *name == title) {
            Some((_, members)) => members.push((text, url)),
            None => groups.push((title, vec![(text, url)])),
        }
    }

    groups
        .into_iter()
        .filter(|(_, members)| members.len() >= MIN_CLUSTER_LINKS)
        .map(|(title, members)| {
            let mut section = NavItem::section(title, "");
            for (text, url) in members {
                section.push_child(text, url);
            }
            section
        })
        .collect()
}
