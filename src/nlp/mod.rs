//! Natural-language parsing: the parse-oracle trait and a rule-based English
//! implementation.
//!
//! The hierarchy extractor only depends on [`LanguageModel`] and [`Doc`]; any
//! tagger/parser that can fill a [`DocBuilder`] plugs in.

pub mod doc;
pub mod error;
pub mod lexicon;
pub mod model;
pub mod parser;
pub mod tagger;
pub mod tokenizer;

pub use doc::{Dep, Doc, DocBuilder, Pos, Span, Token, TokenSpec};
pub use error::{NlpError, NlpResult};
pub use lexicon::{Lexicon, LexiconSupplement};
pub use model::{ModelTier, RuleModel};

use crate::config::NlpConfig;

/// A parse oracle: text in, tokens with POS/dependency annotations and
/// sentence / noun-chunk groupings out.
pub trait LanguageModel: Send + Sync {
    /// Model identifier reported by `/health`.
    fn name(&self) -> &str;

    /// Parse `text` into a validated document.
    fn parse(&self, text: &str) -> NlpResult<Doc>;
}

/// Load the model described by `config`: the large tier when a lexicon
/// supplement is configured and present, otherwise the small tier.
pub fn load_model(config: &NlpConfig) -> NlpResult<RuleModel> {
    RuleModel::load(config.lexicon_path.as_deref())
}
