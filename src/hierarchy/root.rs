//! Root-topic selection.

use crate::nlp::{Dep, Doc};

use super::tree::capitalize;

/// Root label when the first sentence has no nominal subject or root.
pub const FALLBACK_ROOT: &str = "Topic";

/// The first nominal subject or root token of the first sentence, capitalized.
/// Later sentences are never consulted.
pub fn select_root(doc: &Doc) -> String {
    doc.sentences()
        .next()
        .and_then(|first| {
            first
                .iter()
                .find(|t| matches!(t.dep, Dep::Nsubj | Dep::Root) && t.pos.is_nominal())
        })
        .map(|t| capitalize(&t.text))
        .unwrap_or_else(|| FALLBACK_ROOT.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::{LanguageModel, RuleModel};

    fn root_of(text: &str) -> String {
        select_root(&RuleModel::small().parse(text).unwrap())
    }

    #[test]
    fn picks_subject_of_first_sentence() {
        assert_eq!(root_of("Alice studied algorithms at IIT Bombay"), "Alice");
    }

    #[test]
    fn nominal_root_of_fragment() {
        assert_eq!(root_of("Skills: C/C++, DBMS"), "Skills");
    }

    #[test]
    fn pronoun_subject_falls_back() {
        assert_eq!(root_of("She studied. Bob coded."), "Topic");
    }

    #[test]
    fn empty_doc_falls_back() {
        assert_eq!(root_of(""), "Topic");
    }
}
