//! Mind-map output tree: root → category nodes → topics → leaf names.

use serde::{Deserialize, Serialize};

/// A three-level mind map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MindMap {
    pub root: String,
    pub nodes: Vec<CategoryNode>,
}

impl MindMap {
    /// The terminal value for blank input.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, name: &str) -> Option<&CategoryNode> {
        self.nodes.iter().find(|n| n.name == name)
    }
}

/// A top-level category ("Skills", "Other", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryNode {
    pub name: String,
    pub children: Vec<TopicNode>,
}

impl CategoryNode {
    pub fn child(&self, name: &str) -> Option<&TopicNode> {
        self.children.iter().find(|c| c.name == name)
    }
}

/// A second-level topic with its leaf names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicNode {
    pub name: String,
    pub children: Vec<String>,
}

/// Upper-case the first character and lower-case the rest. A first character
/// whose upper-case form is several characters ("ß", "ﬁ") or does not
/// lower-case back to itself is kept as is, so the result always lower-cases
/// to the lower-cased input.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = String::with_capacity(s.len());
    let mut upper = first.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) if u.to_lowercase().eq(first.to_lowercase()) => out.push(u),
        _ => out.push(first),
    }
    out.extend(chars.flat_map(char::to_lowercase));
    out
}
