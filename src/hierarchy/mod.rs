//! Hierarchy extraction: parsed text → bounded three-level mind map.
//!
//! The pipeline runs in fixed stages over a validated [`Doc`]:
//! 1. **Root**: first nominal subject/root of the first sentence
//! 2. **Concepts**: lower-cased noun chunks longer than two characters
//! 3. **Adjacency**: children of subject/object nouns
//! 4. **Categorize**: keyword-matched parents claimed by the first matching
//!    category, in table order
//! 5. **Other**: concepts no category used
//! 6. **Assemble**: category nodes then "Other", capped

pub mod adjacency;
pub mod categories;
pub mod concepts;
pub mod root;
pub mod tree;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::nlp::{Doc, LanguageModel, NlpResult};

pub use adjacency::Adjacency;
pub use categories::{Category, CategoryTable};
pub use concepts::ConceptSet;
pub use root::{FALLBACK_ROOT, select_root};
pub use tree::{CategoryNode, MindMap, TopicNode, capitalize};

/// Name of the leftover bucket.
pub const OTHER_NODE: &str = "Other";

/// Breadth caps at each level of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    /// Category nodes under the root.
    #[serde(default = "default_max_nodes")]
    pub max_nodes: usize,
    /// Topics under each category.
    #[serde(default = "default_max_children")]
    pub max_children: usize,
    /// Leaf names under each topic.
    #[serde(default = "default_max_grandchildren")]
    pub max_grandchildren: usize,
}

fn default_max_nodes() -> usize {
    5
}
fn default_max_children() -> usize {
    10
}
fn default_max_grandchildren() -> usize {
    5
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_nodes: default_max_nodes(),
            max_children: default_max_children(),
            max_grandchildren: default_max_grandchildren(),
        }
    }
}

/// Builds mind maps from parsed documents.
#[derive(Debug, Clone, Default)]
pub struct HierarchyExtractor {
    categories: CategoryTable,
    limits: Limits,
}

impl HierarchyExtractor {
    pub fn new(categories: CategoryTable, limits: Limits) -> Self {
        Self { categories, limits }
    }

    pub fn categories(&self) -> &CategoryTable {
        &self.categories
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Parse `text` with `model` and extract its mind map. The text is
    /// NFKC-normalized and trimmed first; blank text yields an empty root and
    /// no nodes.
    pub fn extract_text(&self, model: &dyn LanguageModel, text: &str) -> NlpResult<MindMap> {
        let text: String = text.nfkc().collect();
        let text = text.trim();
        if text.is_empty() {
            return Ok(MindMap::empty());
        }
        let doc = model.parse(text)?;
        Ok(self.extract(&doc))
    }

    /// Extract the mind map of a parsed document.
    pub fn extract(&self, doc: &Doc) -> MindMap {
        let root = select_root(doc);

        let concepts = ConceptSet::from_doc(doc);
        if concepts.is_empty() {
            tracing::debug!(%root, "no concepts found");
            return MindMap {
                root,
                nodes: Vec::new(),
            };
        }

        let mut adjacency = Adjacency::from_doc(doc);
        tracing::debug!(
            %root,
            concepts = concepts.len(),
            parents = adjacency.len(),
            "built concept set and adjacency"
        );

        let mut nodes: Vec<CategoryNode> = self
            .categories
            .iter()
            .filter_map(|category| self.categorize(category, &concepts, &mut adjacency))
            .collect();

        if let Some(other) = self.leftovers(&nodes, &concepts, &adjacency) {
            nodes.push(other);
        }
        nodes.truncate(self.limits.max_nodes);

        tracing::debug!(
            %root,
            nodes = nodes.len(),
            "extracted hierarchy"
        );
        MindMap { root, nodes }
    }

    /// Claim every remaining parent that matches `category`. Returns `None`
    /// when nothing ends up under the category.
    fn categorize(
        &self,
        category: &Category,
        concepts: &ConceptSet,
        adjacency: &mut Adjacency,
    ) -> Option<CategoryNode> {
        let mut children: Vec<TopicNode> = Vec::new();

        for parent in adjacency.keys_snapshot() {
            if !category.matches(&parent) {
                continue;
            }

            let sub_topics: Vec<TopicNode> = dedup(adjacency.get(&parent))
                .into_iter()
                .filter(|child| concepts.contains(child))
                .map(|child| TopicNode {
                    name: capitalize(&child),
                    children: adjacency
                        .get(&child)
                        .iter()
                        .filter(|gc| concepts.contains(gc))
                        .take(self.limits.max_grandchildren)
                        .map(|gc| capitalize(gc))
                        .collect(),
                })
                .collect();

            if concepts.contains(&parent) {
                children.push(TopicNode {
                    name: capitalize(&parent),
                    children: sub_topics.into_iter().map(|t| t.name).collect(),
                });
            } else {
                children.extend(sub_topics);
            }

            adjacency.remove(&parent);
            tracing::trace!(category = %category.name, %parent, "assigned parent");
        }

        children.truncate(self.limits.max_children);
        for child in &mut children {
            child.children.truncate(self.limits.max_grandchildren);
        }

        (!children.is_empty()).then(|| CategoryNode {
            name: category.name.clone(),
            children,
        })
    }

    /// The "Other" bucket: concepts not used by any category node. Leaf names
    /// come from whatever adjacency entries remain and are not filtered
    /// through the concept set.
    fn leftovers(
        &self,
        nodes: &[CategoryNode],
        concepts: &ConceptSet,
        adjacency: &Adjacency,
    ) -> Option<CategoryNode> {
        let used: HashSet<String> = nodes
            .iter()
            .flat_map(|n| &n.children)
            .flat_map(|c| std::iter::once(&c.name).chain(&c.children))
            .map(|name| name.to_lowercase())
            .collect();

        let children: Vec<TopicNode> = concepts
            .iter()
            .filter(|c| !used.contains(&capitalize(c).to_lowercase()))
            .take(self.limits.max_children)
            .map(|c| TopicNode {
                name: capitalize(c),
                children: adjacency
                    .get(c)
                    .iter()
                    .take(self.limits.max_grandchildren)
                    .cloned()
                    .collect(),
            })
            .collect();

        (!children.is_empty()).then(|| CategoryNode {
            name: OTHER_NODE.to_string(),
            children,
        })
    }
}

/// Deduplicate, keeping the first occurrence.
fn dedup(items: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .iter()
        .filter(|item| seen.insert(item.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::{Dep, DocBuilder, Pos, RuleModel, Span, TokenSpec};

    /// Hand-built document over space-separated words. `arcs[i]` is
    /// `(pos, dep, head)`; chunks are token ranges.
    fn doc(words: &[&str], arcs: &[(Pos, Dep, usize)], chunks: &[std::ops::Range<usize>]) -> Doc {
        let text = words.join(" ");
        let mut b = DocBuilder::new(text.clone());
        let mut offset = 0;
        for (word, &(pos, dep, head)) in words.iter().zip(arcs) {
            b.push(TokenSpec {
                text: word.to_string(),
                span: Span::new(offset, offset + word.len()),
                pos,
                dep,
                head,
            });
            offset += word.len() + 1;
        }
        b.sentence(0..words.len());
        for c in chunks {
            b.noun_chunk(c.clone());
        }
        b.build().unwrap()
    }

    #[test]
    fn blank_text_is_terminal() {
        let ex = HierarchyExtractor::default();
        let model = RuleModel::small();
        assert_eq!(ex.extract_text(&model, "").unwrap(), MindMap::empty());
        assert_eq!(ex.extract_text(&model, "  \n\t ").unwrap(), MindMap::empty());
    }

    #[test]
    fn no_concepts_keeps_root_only() {
        let d = doc(&["Go", "!"], &[(Pos::Verb, Dep::Root, 0), (Pos::Punct, Dep::Punct, 0)], &[]);
        let map = HierarchyExtractor::default().extract(&d);
        assert_eq!(map.root, "Topic");
        assert!(map.nodes.is_empty());
    }

    #[test]
    fn concept_parent_wraps_sub_topic_names() {
        // "Python" (subject, a concept) with conj child "java" which has its
        // own children.
        let d = doc(
            &["Python", "and", "Java", "use", "JVM", "bytecode"],
            &[
                (Pos::Propn, Dep::Nsubj, 3),
                (Pos::Cconj, Dep::Cc, 0),
                (Pos::Propn, Dep::Conj, 0),
                (Pos::Verb, Dep::Root, 3),
                (Pos::Propn, Dep::Compound, 5),
                (Pos::Noun, Dep::Dobj, 3),
            ],
            &[0..1, 2..3, 4..6],
        );
        let map = HierarchyExtractor::default().extract(&d);
        let skills = map.node("Skills").unwrap();
        assert_eq!(
            skills.children,
            vec![TopicNode {
                name: "Python".into(),
                children: vec!["Java".into()],
            }]
        );
    }

    #[test]
    fn category_members_are_excluded_from_other() {
        let d = doc(
            &["Python", "and", "Java", "use", "JVM", "bytecode"],
            &[
                (Pos::Propn, Dep::Nsubj, 3),
                (Pos::Cconj, Dep::Cc, 0),
                (Pos::Propn, Dep::Conj, 0),
                (Pos::Verb, Dep::Root, 3),
                (Pos::Propn, Dep::Compound, 5),
                (Pos::Noun, Dep::Dobj, 3),
            ],
            &[0..1, 2..3, 4..6],
        );
        let map = HierarchyExtractor::default().extract(&d);
        let other = map.node(OTHER_NODE).unwrap();
        assert_eq!(
            other.children,
            vec![TopicNode {
                name: "Jvm bytecode".into(),
                children: vec![],
            }]
        );
        assert!(other.child("Java").is_none());
        assert!(other.child("Python").is_none());
    }

    #[test]
    fn ligatures_do_not_duplicate_concepts() {
        let model = RuleModel::small();
        let map = HierarchyExtractor::default()
            .extract_text(&model, "Alice studied the \u{FB01}le region with python")
            .unwrap();
        let names: Vec<&str> = map
            .nodes
            .iter()
            .flat_map(|n| &n.children)
            .flat_map(|c| std::iter::once(&c.name).chain(&c.children))
            .map(String::as_str)
            .collect();
        assert!(names.iter().all(|n| !n.contains('\u{FB01}')), "{names:?}");

        let used: HashSet<String> = map
            .nodes
            .iter()
            .filter(|n| n.name != OTHER_NODE)
            .flat_map(|n| &n.children)
            .flat_map(|c| std::iter::once(&c.name).chain(&c.children))
            .map(|name| name.to_lowercase())
            .collect();
        if let Some(other) = map.node(OTHER_NODE) {
            for child in &other.children {
                assert!(!used.contains(&child.name.to_lowercase()), "{:?} listed twice", child.name);
            }
        }
    }

    #[test]
    fn non_concept_parent_splices_sub_topics_with_grandchildren() {
        // Parent "city" is not itself a concept ("the city" is), so its
        // concept children are spliced in directly and keep their own leaves.
        let d = doc(
            &["the", "city", "hosts", "Bandel", "and", "Kolkata", "near", "Hooghly"],
            &[
                (Pos::Det, Dep::Det, 1),
                (Pos::Noun, Dep::Nsubj, 2),
                (Pos::Verb, Dep::Root, 2),
                (Pos::Propn, Dep::Dobj, 2),
                (Pos::Cconj, Dep::Cc, 3),
                (Pos::Propn, Dep::Conj, 3),
                (Pos::Adp, Dep::Prep, 2),
                (Pos::Propn, Dep::Pobj, 6),
            ],
            &[0..2, 3..4, 5..6, 7..8],
        );
        let mut adjacency = Adjacency::from_doc(&d);
        assert_eq!(adjacency.get("bandel"), ["kolkata".to_string()]);
        adjacency.extend("city".into(), vec!["bandel".into(), "bandel".into()]);

        let ex = HierarchyExtractor::default();
        let concepts = ConceptSet::from_doc(&d);
        let table = CategoryTable::resume();
        let category = table.iter().nth(2).unwrap();
        let locations = ex.categorize(category, &concepts, &mut adjacency).unwrap();
        assert_eq!(locations.name, "Locations");
        assert_eq!(
            locations.children,
            vec![TopicNode {
                name: "Bandel".into(),
                children: vec!["Kolkata".into()],
            }]
        );
        assert!(!adjacency.contains("city"));
        assert!(adjacency.contains("bandel"));
    }

    #[test]
    fn first_matching_category_wins() {
        // "python research" matches Skills ("python") and Projects ("research").
        let d = doc(
            &["Bob", "does", "python-research"],
            &[
                (Pos::Propn, Dep::Nsubj, 1),
                (Pos::Verb, Dep::Root, 1),
                (Pos::Noun, Dep::Dobj, 1),
            ],
            &[0..1, 2..3],
        );
        let map = HierarchyExtractor::default().extract(&d);
        assert!(map.node("Skills").is_some());
        assert!(map.node("Projects").is_none());
    }

    #[test]
    fn leftovers_use_remaining_adjacency_unfiltered() {
        let d = doc(
            &["Bob", "likes", "tea"],
            &[
                (Pos::Propn, Dep::Nsubj, 1),
                (Pos::Verb, Dep::Root, 1),
                (Pos::Noun, Dep::Dobj, 1),
            ],
            &[0..1, 2..3],
        );
        let ex = HierarchyExtractor::default();
        let concepts = ConceptSet::from_doc(&d);
        let mut adjacency = Adjacency::from_doc(&d);
        adjacency.extend("tea".into(), vec!["green".into(), "hot".into()]);
        let other = ex.leftovers(&[], &concepts, &adjacency).unwrap();
        assert_eq!(other.name, "Other");
        assert_eq!(other.children[0].name, "Bob");
        assert_eq!(other.children[1].name, "Tea");
        assert_eq!(other.children[1].children, vec!["green", "hot"]);
    }

    #[test]
    fn limits_cap_every_level() {
        let limits = Limits {
            max_nodes: 1,
            max_children: 2,
            max_grandchildren: 1,
        };
        let ex = HierarchyExtractor::new(CategoryTable::resume(), limits);
        let model = RuleModel::small();
        let map = ex
            .extract_text(
                &model,
                "Alice studied algorithms, compilers, networks, and databases at IIT Bombay.",
            )
            .unwrap();
        assert!(map.nodes.len() <= 1);
        for node in &map.nodes {
            assert!(node.children.len() <= 2);
            for child in &node.children {
                assert!(child.children.len() <= 1);
            }
        }
    }

    #[test]
    fn extraction_is_deterministic() {
        let ex = HierarchyExtractor::default();
        let model = RuleModel::small();
        let text = "Priya developed software applications with Python and Java. \
                    She studied a degree course in Howrah city.";
        let a = ex.extract_text(&model, text).unwrap();
        let b = ex.extract_text(&model, text).unwrap();
        assert_eq!(a, b);
    }
}
