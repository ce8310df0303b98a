//! Rich diagnostic error types for the language model.

use miette::Diagnostic;
use thiserror::Error;

/// Errors from loading a language model or building a parse.
#[derive(Debug, Error, Diagnostic)]
pub enum NlpError {
    #[error("malformed parse: {message}")]
    #[diagnostic(
        code(mindmapify::nlp::malformed_parse),
        help(
            "The language model produced a document whose token heads, children, \
             sentences, or noun chunks are inconsistent. Every index must be in \
             bounds and sentences must tile the token list in order."
        )
    )]
    MalformedParse { message: String },

    #[error("failed to read lexicon: {path}")]
    #[diagnostic(
        code(mindmapify::nlp::lexicon_read),
        help("Check that the lexicon file is readable, or unset `nlp.lexicon_path` to use the built-in lexicon.")
    )]
    LexiconRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse lexicon {path}: {message}")]
    #[diagnostic(
        code(mindmapify::nlp::lexicon_parse),
        help(
            "A lexicon supplement is a TOML file with optional string arrays \
             `verbs`, `adjectives`, `nouns`, and `adverbs`."
        )
    )]
    LexiconParse { path: String, message: String },
}

/// Result type for language model operations.
pub type NlpResult<T> = std::result::Result<T, NlpError>;
