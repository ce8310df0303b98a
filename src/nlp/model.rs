//! The rule-based English model and its two-tier loading.

use std::fmt;
use std::path::Path;

use super::LanguageModel;
use super::doc::{Doc, DocBuilder, TokenSpec};
use super::error::NlpResult;
use super::lexicon::{Lexicon, LexiconSupplement};
use super::parser::parse_sentence;
use super::tagger::{merge_proper_runs, tag_sentence};
use super::tokenizer::tokenize;

/// Which lexicon the model was loaded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTier {
    /// Built-in lexicon extended with an on-disk supplement.
    Large,
    /// Built-in lexicon only.
    Small,
}

impl ModelTier {
    pub fn model_name(self) -> &'static str {
        match self {
            ModelTier::Large => "en_rule_lg",
            ModelTier::Small => "en_rule_sm",
        }
    }
}

impl fmt::Display for ModelTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.model_name())
    }
}

/// Deterministic English tokenizer, tagger and shallow dependency parser.
#[derive(Debug, Clone)]
pub struct RuleModel {
    lexicon: Lexicon,
    tier: ModelTier,
}

impl RuleModel {
    /// Model with the built-in lexicon.
    pub fn small() -> Self {
        Self {
            lexicon: Lexicon::default_english(),
            tier: ModelTier::Small,
        }
    }

    /// Model with the built-in lexicon plus `supplement`.
    pub fn large(supplement: &LexiconSupplement) -> Self {
        let mut lexicon = Lexicon::default_english();
        lexicon.extend(supplement);
        Self {
            lexicon,
            tier: ModelTier::Large,
        }
    }

    /// Load the large tier from `lexicon_path`, falling back to the small tier
    /// when no path is configured or the file does not exist. A file that
    /// exists but cannot be read or parsed is an error.
    pub fn load(lexicon_path: Option<&Path>) -> NlpResult<Self> {
        let Some(path) = lexicon_path else {
            tracing::info!(model = %ModelTier::Small, "no lexicon supplement configured");
            return Ok(Self::small());
        };

        if !path.exists() {
            tracing::warn!(
                path = %path.display(),
                fallback = %ModelTier::Small,
                "lexicon supplement not found, falling back to built-in lexicon"
            );
            return Ok(Self::small());
        }

        let supplement = LexiconSupplement::load(path)?;
        tracing::info!(
            path = %path.display(),
            words = supplement.word_count(),
            model = %ModelTier::Large,
            "loaded lexicon supplement"
        );
        Ok(Self::large(&supplement))
    }

    pub fn tier(&self) -> ModelTier {
        self.tier
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }
}

impl Default for RuleModel {
    fn default() -> Self {
        Self::small()
    }
}

impl LanguageModel for RuleModel {
    fn name(&self) -> &str {
        self.tier.model_name()
    }

    fn parse(&self, text: &str) -> NlpResult<Doc> {
        let mut builder = DocBuilder::new(text);

        for raw in tokenize(text, &self.lexicon) {
            let tags = merge_proper_runs(text, tag_sentence(&raw, &self.lexicon));
            let parse = parse_sentence(&tags);
            let offset = builder.token_count();

            for (tag, arc) in tags.iter().zip(&parse.arcs) {
                builder.push(TokenSpec {
                    text: tag.text.clone(),
                    span: tag.span,
                    pos: tag.pos,
                    dep: arc.dep,
                    head: offset + arc.head,
                });
            }
            for np in parse.noun_chunks(&tags) {
                builder.noun_chunk(offset + np.start..offset + np.head + 1);
            }
            builder.sentence(offset..offset + tags.len());
        }

        let doc = builder.build()?;
        tracing::debug!(
            model = self.name(),
            tokens = doc.tokens().len(),
            sentences = doc.sentence_count(),
            chunks = doc.noun_chunk_ranges().len(),
            "parsed text"
        );
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::Dep;

    #[test]
    fn parse_produces_consistent_doc() {
        let model = RuleModel::small();
        let doc = model
            .parse("Alice studied algorithms. She built a radio application in Howrah.")
            .unwrap();
        assert_eq!(doc.sentence_count(), 2);
        let chunks: Vec<&str> = doc.noun_chunks().collect();
        assert!(chunks.contains(&"a radio application"));
        assert!(chunks.contains(&"Howrah"));

        let roots = doc.tokens().iter().filter(|t| t.dep == Dep::Root).count();
        assert_eq!(roots, 2);
    }

    #[test]
    fn missing_supplement_falls_back_to_small() {
        let dir = tempfile::TempDir::new().unwrap();
        let model = RuleModel::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(model.tier(), ModelTier::Small);
        assert_eq!(model.name(), "en_rule_sm");
    }

    #[test]
    fn present_supplement_loads_large() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("lexicon.toml");
        std::fs::write(&path, "verbs = [\"refine\"]\n").unwrap();
        let model = RuleModel::load(Some(&path)).unwrap();
        assert_eq!(model.tier(), ModelTier::Large);
        assert!(model.lexicon().verb_lemma("refined").is_some());
    }

    #[test]
    fn malformed_supplement_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("lexicon.toml");
        std::fs::write(&path, "verbs = \"not a list\"\n").unwrap();
        assert!(RuleModel::load(Some(&path)).is_err());
    }

    #[test]
    fn empty_text_parses_to_empty_doc() {
        let doc = RuleModel::small().parse("   \n ").unwrap();
        assert!(doc.is_empty());
    }
}
