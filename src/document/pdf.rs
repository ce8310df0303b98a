//! PDF text extraction using the `pdf-extract` crate.

use super::error::{DocumentError, DocumentResult};
use super::{TextExtractor, clean_text};

/// PDF extractor backed by `pdf-extract`. Pages come back as one string
/// separated by form feeds.
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn format(&self) -> &str {
        "pdf"
    }

    fn extract(&self, data: &[u8]) -> DocumentResult<String> {
        let text =
            pdf_extract::extract_text_from_mem(data).map_err(|e| DocumentError::ParseError {
                format: "pdf".into(),
                message: e.to_string(),
            })?;
        let text = clean_text(&text);
        tracing::debug!(bytes = data.len(), chars = text.chars().count(), "extracted pdf text");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_pdf_bytes() {
        let err = PdfExtractor.extract(b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, DocumentError::ParseError { ref format, .. } if format == "pdf"));
    }
}
