//! Parent → children adjacency built from subject/object nouns.

use std::collections::HashMap;

use crate::nlp::{Dep, Doc, Pos};

/// Insertion-ordered map from a lower-cased parent noun to its lower-cased
/// syntactic children. Child lists may contain repeats.
#[derive(Debug, Clone, Default)]
pub struct Adjacency {
    order: Vec<String>,
    edges: HashMap<String, Vec<String>>,
}

fn is_parent_role(dep: Dep) -> bool {
    matches!(dep, Dep::Nsubj | Dep::Dobj | Dep::Pobj)
}

fn is_child_pos(pos: Pos) -> bool {
    matches!(pos, Pos::Noun | Pos::Propn | Pos::Adj | Pos::Verb)
}

impl Adjacency {
    /// Collect, for every nominal subject / direct object / prepositional
    /// object, its noun, adjective and verb children. A child whose text is a
    /// substring of the parent's text is skipped.
    pub fn from_doc(doc: &Doc) -> Self {
        let mut adjacency = Self::default();
        for sentence in doc.sentences() {
            for token in sentence {
                if !token.pos.is_nominal() || !is_parent_role(token.dep) {
                    continue;
                }
                let parent = token.lower();
                let children: Vec<String> = doc
                    .children(token)
                    .filter(|child| is_child_pos(child.pos))
                    .map(|child| child.lower())
                    .filter(|child| !parent.contains(child.as_str()))
                    .collect();
                adjacency.extend(parent, children);
            }
        }
        adjacency
    }

    /// Append children under `parent`, creating the entry if needed.
    pub fn extend(&mut self, parent: String, children: Vec<String>) {
        match self.edges.get_mut(&parent) {
            Some(existing) => existing.extend(children),
            None => {
                self.order.push(parent.clone());
                self.edges.insert(parent, children);
            }
        }
    }

    /// Children of `parent`, or an empty slice.
    pub fn get(&self, parent: &str) -> &[String] {
        self.edges.get(parent).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, parent: &str) -> bool {
        self.edges.contains_key(parent)
    }

    pub fn remove(&mut self, parent: &str) -> Option<Vec<String>> {
        let removed = self.edges.remove(parent)?;
        self.order.retain(|p| p != parent);
        Some(removed)
    }

    /// Parent keys in insertion order, detached from the map so entries can
    /// be removed while walking them.
    pub fn keys_snapshot(&self) -> Vec<String> {
        self.order.clone()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::{LanguageModel, RuleModel};

    #[test]
    fn collects_children_of_objects() {
        let doc = RuleModel::small()
            .parse("Alice studied algorithms and data structures at IIT Bombay")
            .unwrap();
        let adj = Adjacency::from_doc(&doc);
        assert_eq!(adj.keys_snapshot(), vec!["alice", "algorithms", "iit bombay"]);
        assert_eq!(adj.get("algorithms"), ["structures".to_string()]);
        assert!(adj.get("alice").is_empty());
    }

    #[test]
    fn merges_repeated_parents_in_order() {
        let mut adj = Adjacency::default();
        adj.extend("python".into(), vec!["java".into()]);
        adj.extend("radio".into(), vec![]);
        adj.extend("python".into(), vec!["java".into(), "rust".into()]);
        assert_eq!(adj.keys_snapshot(), vec!["python", "radio"]);
        assert_eq!(adj.get("python"), ["java", "java", "rust"].map(String::from));
    }

    #[test]
    fn substring_children_are_skipped() {
        let doc = RuleModel::small()
            .parse("Priya developed software applications with Python and Java.")
            .unwrap();
        let adj = Adjacency::from_doc(&doc);
        assert_eq!(adj.get("applications"), ["software".to_string()]);
        assert_eq!(adj.get("python"), ["java".to_string()]);
    }

    #[test]
    fn remove_drops_key_from_order() {
        let mut adj = Adjacency::default();
        adj.extend("a".into(), vec![]);
        adj.extend("b".into(), vec![]);
        assert!(adj.remove("a").is_some());
        assert!(adj.remove("a").is_none());
        assert_eq!(adj.keys_snapshot(), vec!["b"]);
        assert_eq!(adj.len(), 1);
    }
}
