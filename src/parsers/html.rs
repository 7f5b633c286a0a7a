use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::nav::NavItem;
use crate::parsers::{ExtractContext, PageParse, cluster, run_chain};
use crate::utils::clean_text;

static LINK_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());
static HEADING_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1, h2, h3, h4, h5, h6").unwrap());
static LIST_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("ul, ol").unwrap());
static ITEM_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("li").unwrap());
static TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());
static BODY_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("body").unwrap());

/// Class fragments of containers worth probing when no selector matched
const NAV_CLASS_TERMS: &[&str] = &["nav", "menu", "sidebar", "toc"];

/// Class fragments that turn a non-heading element into a heading
const HEADING_CLASS_TERMS: &[&str] = &["heading", "header"];

/// Class fragments that mark a list item as a section label
const HEADING_ITEM_TERMS: &[&str] = &["heading", "header", "title"];

/// Minimum items (and linked items) for a list to count as navigation
const MIN_LIST_ITEMS: usize = 3;

/// Structural strategies, most specific first
pub const STRATEGIES: &[(&str, fn(&Html, &ExtractContext<'_>) -> Vec<NavItem>)] = &[
    ("selector scan", selector_scan),
    ("list heuristic", list_scan),
    ("path clustering", path_clusters),
];

/// Run the structural chain over an HTML document
pub fn extract(html: &str, ctx: &ExtractContext<'_>, min_items: usize) -> Vec<NavItem> {
    let doc = Html::parse_document(html);
    run_chain(&doc, ctx, min_items, STRATEGIES)
}

/// Parses an HTML page into its title, visible text and raw hrefs
pub fn parse_page(html: &str) -> PageParse {
    let doc = Html::parse_document(html);

    let title = doc
        .select(&TITLE_SELECTOR)
        .next()
        .map(|t| clean_text(t.text()))
        .filter(|t| !t.is_empty());

    let content = doc
        .select(&BODY_SELECTOR)
        .flat_map(|n| n.text())
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    let links = doc
        .select(&LINK_SELECTOR)
        .filter_map(|e| e.value().attr("href"))
        .map(|s| s.to_string())
        .collect::<Vec<String>>();

    ::log::debug!("HTML page parse found {} links", links.len());

    PageParse {
        title,
        content,
        links,
    }
}

/// Probe conventional navigation containers and read sections out of each
pub fn selector_scan(doc: &Html, ctx: &ExtractContext<'_>) -> Vec<NavItem> {
    let containers = nav_containers(doc, ctx);
    ::log::debug!("Selector scan found {} navigation containers", containers.len());

    containers
        .into_iter()
        .flat_map(|container| section_from_container(container, ctx))
        .collect()
}

/// Outermost elements matching the navigation selectors, in selector order.
///
/// Falls back to elements with a navigation-like class when no selector matches.
fn nav_containers<'d>(doc: &'d Html, ctx: &ExtractContext<'_>) -> Vec<ElementRef<'d>> {
    let mut seen = HashSet::new();
    let mut containers = Vec::new();

    for selector in ctx.nav_selectors {
        for element in doc.select(selector) {
            if seen.insert(element.id()) {
                containers.push(element);
            }
        }
    }

    if containers.is_empty() {
        containers = doc
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|el| has_class_containing(el, NAV_CLASS_TERMS))
            .collect();
        seen = containers.iter().map(|el| el.id()).collect();
    }

    // A container nested in another one is read as part of the outer one
    containers.retain(|el| !el.ancestors().any(|a| seen.contains(&a.id())));
    containers
}

/// Read sections out of one navigation container, in document order.
///
/// Headings open sections. A link under a heading re-targets that section;
/// any other link becomes a child of the latest section, or a standalone
/// section when none has been opened yet.
pub fn section_from_container(container: ElementRef<'_>, ctx: &ExtractContext<'_>) -> Vec<NavItem> {
    let tag_headings = container.select(&HEADING_SELECTOR).next().is_some();
    let is_heading = |el: &ElementRef<'_>| {
        if tag_headings {
            is_heading_tag(el)
        } else {
            has_class_containing(el, HEADING_CLASS_TERMS)
        }
    };

    let mut sections: Vec<NavItem> = Vec::new();
    let mut current: Option<usize> = None;

    for node in container.descendants().skip(1) {
        let Some(el) = ElementRef::wrap(node) else {
            continue;
        };

        let under_heading = el
            .ancestors()
            .take_while(|a| a.id() != container.id())
            .filter_map(ElementRef::wrap)
            .any(|a| is_heading(&a));

        if is_heading(&el) {
            if under_heading {
                continue;
            }

            let title = clean_text(el.text());
            if title.is_empty() {
                continue;
            }

            let url = el
                .select(&LINK_SELECTOR)
                .filter_map(|a| a.value().attr("href"))
                .find(|href| !href.is_empty())
                .map(|href| ctx.resolve(href))
                .unwrap_or_default();

            sections.push(NavItem::section(title, url));
            current = Some(sections.len() - 1);
            continue;
        }

        if el.value().name() != "a" {
            continue;
        }

        let Some(href) = el.value().attr("href") else {
            continue;
        };
        let text = clean_text(el.text());
        if text.is_empty() || href.is_empty() {
            continue;
        }
        let Some(url) = ctx.doc_link(href) else {
            continue;
        };

        match (under_heading, current) {
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

    sections
}

/// Treat every sizeable, link-heavy list outside the navigation containers as a
/// navigation candidate
pub fn list_scan(doc: &Html, ctx: &ExtractContext<'_>) -> Vec<NavItem> {
    // Lists inside a navigation container were already read by the selector scan
    let read: HashSet<_> = nav_containers(doc, ctx).iter().map(|el| el.id()).collect();

    doc.select(&LIST_SELECTOR)
        .filter(|list| {
            !read.contains(&list.id()) && !list.ancestors().any(|a| read.contains(&a.id()))
        })
        // Nested lists are read through the item that owns them
        .filter(|list| {
            !list
                .ancestors()
                .filter_map(ElementRef::wrap)
                .any(|a| is_list(&a))
        })
        .filter(|list| {
            let mut items = 0;
            let mut linked = 0;
            for item in list.select(&ITEM_SELECTOR) {
                items += 1;
                if item.select(&LINK_SELECTOR).next().is_some() {
                    linked += 1;
                }
            }
            items >= MIN_LIST_ITEMS && linked >= MIN_LIST_ITEMS
        })
        .flat_map(|list| list_as_nav(list, ctx))
        .collect()
}

/// Read a list's direct items as navigation.
///
/// An item owning a nested list becomes a section of the nested links. An item
/// whose class marks it as a heading opens a section that collects the plain
/// items following it. Plain items before any such heading stand alone.
pub fn list_as_nav(list: ElementRef<'_>, ctx: &ExtractContext<'_>) -> Vec<NavItem> {
    let mut sections: Vec<NavItem> = Vec::new();
    let mut current: Option<usize> = None;

    let items = list
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "li");

    for item in items {
        let Some((text, url)) = first_link(item, ctx) else {
            continue;
        };
        if !ctx.filter.is_doc_link(&url, ctx.base_url) {
            continue;
        }

        if let Some(nested) = item.select(&LIST_SELECTOR).next() {
            let mut section = NavItem::section(text, url);
            for link in nested.select(&LINK_SELECTOR) {
                if let Some((child_text, child_url)) = link_parts(link, ctx) {
                    section.push_child(child_text, child_url);
                }
            }
            sections.push(section);
        } else if has_class_containing(&item, HEADING_ITEM_TERMS) {
            sections.push(NavItem::section(text, url));
            current = Some(sections.len() - 1);
        } else if let Some(idx) = current {
            sections[idx].push_child(text, url);
        } else {
            sections.push(NavItem::section(text, url));
        }
    }

    sections
}

/// Group every documentation link on the page by its first path segment
pub fn path_clusters(doc: &Html, ctx: &ExtractContext<'_>) -> Vec<NavItem> {
    let links = doc.select(&LINK_SELECTOR).filter_map(|a| {
        let href = a.value().attr("href")?;
        Some((clean_text(a.text()), href))
    });

    cluster::cluster_links(links, ctx)
}

fn first_link(item: ElementRef<'_>, ctx: &ExtractContext<'_>) -> Option<(String, String)> {
    let link = item.select(&LINK_SELECTOR).next()?;
    link_parts(link, ctx)
}

/// Text and resolved URL of a link, if both are present
fn link_parts(link: ElementRef<'_>, ctx: &ExtractContext<'_>) -> Option<(String, String)> {
    let href = link.value().attr("href")?;
    let text = clean_text(link.text());
    if text.is_empty() || href.is_empty() {
        return None;
    }
    Some((text, ctx.resolve(href)))
}

fn is_heading_tag(el: &ElementRef<'_>) -> bool {
    matches!(el.value().name(), "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}

fn is_list(el: &ElementRef<'_>) -> bool {
    matches!(el.value().name(), "ul" | "ol")
}

fn has_class_containing(el: &ElementRef<'_>, terms: &[&str]) -> bool {
    el.value().classes().any(|class| {
        let class = class.to_lowercase();
        terms.iter().any(|term| class.contains(term))
    })
}
