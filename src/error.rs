//! Top-level error type.
//!
//! Each subsystem defines its own diagnostic enum with an error code and help
//! text. [`MindMapError`] wraps them without losing either.

use miette::Diagnostic;
use thiserror::Error;

use crate::config::ConfigError;
use crate::document::DocumentError;
use crate::nlp::NlpError;

#[derive(Debug, Error, Diagnostic)]
pub enum MindMapError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Nlp(#[from] NlpError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to read input: {path}")]
    #[diagnostic(
        code(mindmapify::input),
        help("Check that the input file exists and is readable.")
    )]
    Input {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type MindMapResult<T> = std::result::Result<T, MindMapError>;
