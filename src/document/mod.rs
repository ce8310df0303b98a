//! Raw document bytes → plain text.

pub mod error;
#[cfg(feature = "pdf")]
pub mod pdf;

use std::sync::Arc;

use unicode_normalization::UnicodeNormalization;

pub use error::{DocumentError, DocumentResult};

/// Extracts the full text of a binary document.
pub trait TextExtractor: Send + Sync {
    /// Short format name used in errors and logs.
    fn format(&self) -> &str;

    /// Return the text of every page, concatenated.
    fn extract(&self, data: &[u8]) -> DocumentResult<String>;
}

/// The PDF extractor, if this build has PDF support.
pub fn pdf_extractor() -> Option<Arc<dyn TextExtractor>> {
    #[cfg(feature = "pdf")]
    {
        Some(Arc::new(pdf::PdfExtractor))
    }
    #[cfg(not(feature = "pdf"))]
    {
        None
    }
}

/// NFKC-normalize and trim extracted text. Compatibility normalization
/// splits ligatures ("ﬁ" → "fi") that PDF fonts commonly emit.
pub fn clean_text(raw: &str) -> String {
    raw.nfkc().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_splits_ligatures_and_trims() {
        assert_eq!(clean_text("\n  e\u{FB03}cient \u{FB01}le \x0C"), "efficient file");
    }

    #[test]
    fn clean_text_of_blank_is_empty() {
        assert_eq!(clean_text(" \n\t\x0C "), "");
    }

    #[cfg(feature = "pdf")]
    #[test]
    fn pdf_extractor_is_available() {
        let extractor = pdf_extractor().unwrap();
        assert_eq!(extractor.format(), "pdf");
    }

    #[cfg(not(feature = "pdf"))]
    #[test]
    fn pdf_extractor_is_missing() {
        assert!(pdf_extractor().is_none());
    }
}
