use crate::mapper;
use crate::nav::{self, NavItem};
use crate::results::FetchedPage;
use crate::{build_map, extract_navigation, match_section, resolve_section_urls};

const ROOT: &str = "https://ex.com/docs";

const SIDEBAR_PAGE: &str = r#"
<!DOCTYPE html>
<html>
  <head><title>Example Docs</title></head>
  <body>
    <header><a href="/">Home</a><a href="/blog">Blog</a></header>
    <aside class="sidebar">
      <h3>Getting Started</h3>
      <a href="/docs/start/install">Installation</a>
      <a href="/docs/start/quickstart">Quickstart</a>
      <h3><a href="/docs/guides/">Guides</a></h3>
      <a href="/docs/guides/routing">Routing</a>
      <a href="/docs/guides/testing">Testing</a>
      <h3>API</h3>
      <a href="/docs/api/client">Client</a>
    </aside>
    <main>
      <p>See <a href="/docs/guides/routing#params">route params</a>.</p>
    </main>
  </body>
</html>
"#;

fn page(url: &str) -> FetchedPage {
    FetchedPage::new(url, ROOT, "", "", Vec::new())
}

#[test]
fn test_sidebar_extraction() {
    let forest = extract_navigation(SIDEBAR_PAGE, ROOT).unwrap();

    let titles: Vec<&str> = forest.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["Getting Started", "Guides", "API"]);
    assert_eq!(forest[1].url, "https://ex.com/docs/guides/");
    assert_eq!(forest[1].children.len(), 2);
    assert_eq!(nav::count_items(&forest), 8);
    assert!(nav::check_forest(&forest));
}

#[test]
fn test_crawl_to_map() {
    let forest = extract_navigation(SIDEBAR_PAGE, ROOT).unwrap();

    let mut pages = vec![
        page("https://ex.com/docs/start/install"),
        page("https://ex.com/docs/guides"),
        page("https://ex.com/docs/guides/routing/params"),
        page("https://ex.com/docs/api/client"),
        page("https://ex.com/docs/changelog"),
    ];
    for p in &mut pages {
        p.tag_section(&forest);
    }

    let sections: Vec<Option<&str>> = pages.iter().map(|p| p.menu_section.as_deref()).collect();
    assert_eq!(
        sections,
        vec![
            Some("Getting Started"),
            Some("Guides"),
            Some("Guides"),
            Some("API"),
            None,
        ]
    );

    let map = build_map(&forest, &pages);
    assert_eq!(map.len(), 3);
    assert_eq!(
        map[1].pages,
        vec![
            "https://ex.com/docs/guides".to_string(),
            "https://ex.com/docs/guides/routing/params".to_string(),
        ]
    );

    let routing = &map[1].subsections[0];
    assert_eq!(routing.title, "Routing");
    assert_eq!(
        routing.pages,
        vec!["https://ex.com/docs/guides/routing/params".to_string()]
    );

    // The untagged page appears in no section
    assert!(
        map.iter()
            .all(|s| !s.pages.contains(&"https://ex.com/docs/changelog".to_string()))
    );
}

#[test]
fn test_section_selection() {
    let forest = extract_navigation(SIDEBAR_PAGE, ROOT).unwrap();

    assert_eq!(
        resolve_section_urls("guide", &forest),
        vec![
            "https://ex.com/docs/guides/".to_string(),
            "https://ex.com/docs/guides/routing".to_string(),
            "https://ex.com/docs/guides/testing".to_string(),
        ]
    );
    assert_eq!(
        resolve_section_urls("quickstart", &forest),
        vec!["https://ex.com/docs/start/quickstart".to_string()]
    );
    assert!(resolve_section_urls("pricing", &forest).is_empty());
}

#[test]
fn test_match_section_is_order_respecting() {
    let forest = vec![
        NavItem::section("A", "https://ex.com/docs/x"),
        NavItem::section("B", "https://ex.com/docs/y"),
    ];

    for _ in 0..3 {
        assert_eq!(
            match_section("https://ex.com/docs/x", &forest).as_deref(),
            Some("A")
        );
    }
}

#[test]
fn test_nav_list_page_lands_in_one_section() {
    let html = r#"
        <nav>
          <ul>
            <li><a href="/docs/a">A</a></li>
            <li><a href="/docs/b">B</a></li>
            <li><a href="/docs/c">C</a></li>
          </ul>
        </nav>
    "#;
    let forest = extract_navigation(html, ROOT).unwrap();

    let mut tagged = page("https://ex.com/docs/a");
    assert_eq!(tagged.tag_section(&forest), Some("A"));

    let map = build_map(&forest, &[tagged]);
    let owners = map
        .iter()
        .filter(|s| s.pages.contains(&"https://ex.com/docs/a".to_string()))
        .count();
    assert_eq!(owners, 1);
    assert!(mapper::check_sections(&map));
}
