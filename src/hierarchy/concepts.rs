//! The concept set: lower-cased noun chunks used as a membership filter.

use std::collections::HashSet;

use crate::nlp::Doc;

/// Minimum chunk length (in characters) is strictly greater than this.
const MIN_CONCEPT_LEN: usize = 2;

/// Deduplicated concepts in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct ConceptSet {
    order: Vec<String>,
    members: HashSet<String>,
}

impl ConceptSet {
    pub fn from_doc(doc: &Doc) -> Self {
        let mut set = Self::default();
        for chunk in doc.noun_chunks() {
            if chunk.chars().count() > MIN_CONCEPT_LEN {
                set.insert(chunk.to_lowercase());
            }
        }
        set
    }

    pub fn insert(&mut self, concept: String) {
        if self.members.insert(concept.clone()) {
            self.order.push(concept);
        }
    }

    pub fn contains(&self, concept: &str) -> bool {
        self.members.contains(concept)
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

impl FromIterator<String> for ConceptSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut set = Self::default();
        for concept in iter {
            set.insert(concept);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::{LanguageModel, RuleModel};

    #[test]
    fn keeps_first_seen_order_without_duplicates() {
        let set: ConceptSet = ["b", "a", "b", "c"].into_iter().map(String::from).collect();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["b", "a", "c"]);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn drops_short_chunks_and_lowercases() {
        let doc = RuleModel::small().parse("I met Bob at IIT Bombay.").unwrap();
        let set = ConceptSet::from_doc(&doc);
        assert!(set.contains("bob"));
        assert!(set.contains("iit bombay"));
        assert!(!set.contains("i"));
    }
}
