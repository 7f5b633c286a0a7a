/// Case-insensitive substring containment in either direction
pub fn fuzzy_match(a: &str, b: &str) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    a.contains(&b) || b.contains(&a)
}

/// Turn a URL path segment into a section label: `getting-started` becomes `Getting Started`
pub fn humanize_segment(segment: &str) -> String {
    segment
        .replace(['-', '_'], " ")
        .split_whitespace()
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Collapse runs of whitespace in extracted element text
pub fn clean_text<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    let joined = parts.into_iter().collect::<String>();
    joined.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuzzy_match() {
        assert!(fuzzy_match("guide", "Guides"));
        assert!(fuzzy_match("Getting Started Guide", "guide"));
        assert!(!fuzzy_match("api", "Guides"));
    }

    #[test]
    fn test_humanize_segment() {
        assert_eq!(humanize_segment("api"), "Api");
        assert_eq!(humanize_segment("getting-started"), "Getting Started");
        assert_eq!(humanize_segment("REST_api"), "Rest Api");
        assert_eq!(humanize_segment(""), "");
    }

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text(["  Getting\n", " Started  "]), "Getting Started");
        assert_eq!(clean_text(["Get", "ting ", "Started"]), "Getting Started");
        assert_eq!(clean_text(Vec::<&str>::new()), "");
    }
}
