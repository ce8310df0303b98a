//! Keyword → category table.

use serde::{Deserialize, Serialize};

/// One category and the keyword substrings that select it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub keywords: Vec<String>,
}

impl Category {
    pub fn new(name: &str, keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Whether any keyword occurs (case-insensitively) inside `parent`.
    pub fn matches(&self, parent: &str) -> bool {
        let parent = parent.to_lowercase();
        self.keywords
            .iter()
            .any(|k| parent.contains(k.to_lowercase().as_str()))
    }
}

/// Ordered list of categories. Earlier categories claim parents first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTable(Vec<Category>);

impl CategoryTable {
    pub fn new(categories: Vec<Category>) -> Self {
        Self(categories)
    }

    /// Skills, Education, Locations, Projects.
    pub fn resume() -> Self {
        Self(vec![
            Category::new(
                "Skills",
                &["c/c++", "dbms", "programming", "algorithms", "data structures", "python", "java"],
            ),
            Category::new(
                "Education",
                &["certification", "bootcamp", "degree", "iit bombay", "course"],
            ),
            Category::new("Locations", &["howrah", "city", "region"]),
            Category::new("Projects", &["application", "radio", "software", "research"]),
        ])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::resume()
    }
}
