//! Error types for document text extraction.

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum DocumentError {
    #[error("failed to parse {format}: {message}")]
    #[diagnostic(
        code(mindmapify::document::parse_error),
        help("The file could not be decoded. Check that it is a valid, unencrypted {format} document.")
    )]
    ParseError { format: String, message: String },

    #[error("PDF processing unavailable; rebuild with the `pdf` feature enabled")]
    #[diagnostic(
        code(mindmapify::document::unavailable),
        help("PDF support is compiled in by the default `pdf` cargo feature.")
    )]
    Unavailable,

    #[error("extraction task failed: {message}")]
    #[diagnostic(
        code(mindmapify::document::extraction_task),
        help("The PDF decoder aborted while reading the document. The file is likely malformed.")
    )]
    ExtractionTask { message: String },
}

pub type DocumentResult<T> = std::result::Result<T, DocumentError>;
