use serde::{Deserialize, Serialize};

/// A node in the inferred navigation tree.
///
/// The tree is capped at two levels: level 0 items are sections and may carry
/// children, level 1 items are leaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    /// Display text
    pub title: String,

    /// Absolute URL, empty for a pure grouping label
    #[serde(default)]
    pub url: String,

    /// 0 for a section, 1 for a child
    pub level: u8,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,

    /// Title of the owning section, kept for display only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_title: Option<String>,
}

impl NavItem {
    /// Create a top-level section
    pub fn section(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            level: 0,
            children: Vec::new(),
            parent_title: None,
        }
    }

    /// Create a child of the section titled `parent`
    pub fn child(title: impl Into<String>, url: impl Into<String>, parent: &str) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            level: 1,
            children: Vec::new(),
            parent_title: Some(parent.to_string()),
        }
    }

    /// Append a child, recording this section as its parent
    pub fn push_child(&mut self, title: impl Into<String>, url: impl Into<String>) {
        let child = NavItem::child(title, url, &self.title);
        self.children.push(child);
    }

    pub fn has_url(&self) -> bool {
        !self.url.is_empty()
    }
}

/// Number of items in a forest, sections and children combined
pub fn count_items(forest: &[NavItem]) -> usize {
    forest.iter().map(|item| 1 + item.children.len()).sum()
}

/// Check the two-level shape of a forest.
///
/// Violations are defects of the producing strategy; they are logged and
/// reported, not repaired.
pub fn check_forest(forest: &[NavItem]) -> bool {
    let mut ok = true;

    for item in forest {
        if item.level != 0 {
            ::log::error!(
                "Navigation item {:?} at the forest root has level {}",
                item.title,
                item.level
            );
            ok = false;
        }

        for child in &item.children {
            if child.level != 1 {
                ::log::error!(
                    "Child {:?} of {:?} has level {}",
                    child.title,
                    item.title,
                    child.level
                );
                ok = false;
            }
            if !child.children.is_empty() {
                ::log::error!(
                    "Child {:?} of {:?} carries {} children beyond the depth cap",
                    child.title,
                    item.title,
                    child.children.len()
                );
                ok = false;
            }
        }
    }

    ok
}

/// Render a forest as an indented `- Title -> url` outline
pub fn outline(forest: &[NavItem]) -> String {
    let mut out = String::new();
    write_outline(forest, 0, &mut out);
    out
}

fn write_outline(items: &[NavItem], depth: usize, out: &mut String) {
    for item in items {
        out.push_str(&"  ".repeat(depth));
        out.push_str("- ");
        out.push_str(&item.title);
        if item.has_url() {
            out.push_str(" -> ");
            out.push_str(&item.url);
        }
        out.push('\n');
        write_outline(&item.children, depth + 1, out);
    }
}
