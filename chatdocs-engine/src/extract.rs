//! Upload boundary: document bytes to per-page text.

use lopdf::Document as PdfDocument;
use tracing::{debug, warn};

use crate::error::{EngineError, Result};

/// Converts an uploaded document's raw bytes into per-page text.
///
/// This trait is the capability boundary that owns byte-to-text
/// conversion; the engine never parses PDF binary structure itself.
pub trait TextExtractor: Send + Sync {
    /// Extract the text of every page, in page order.
    fn extract(&self, data: &[u8]) -> Result<Vec<String>>;
}

/// PDF text extraction backed by `lopdf`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    /// Create a new extractor.
    pub fn new() -> Self {
        Self
    }

    /// Check the `%PDF` magic bytes without parsing the document.
    pub fn is_pdf(data: &[u8]) -> bool {
        data.len() >= 4 && &data[..4] == b"%PDF"
    }
}

impl TextExtractor for PdfExtractor {
    fn extract(&self, data: &[u8]) -> Result<Vec<String>> {
        if !Self::is_pdf(data) {
            return Err(EngineError::Extraction(
                "not a PDF file (missing %PDF header)".to_string(),
            ));
        }

        let doc = PdfDocument::load_mem(data)
            .map_err(|e| EngineError::Extraction(format!("failed to load PDF: {e}")))?;

        if doc.is_encrypted() {
            return Err(EngineError::Extraction("PDF is password-protected".to_string()));
        }

        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        let mut pages = Vec::with_capacity(page_numbers.len());
        for number in page_numbers {
            match doc.extract_text(&[number]) {
                Ok(text) => pages.push(text),
                Err(e) => {
                    // Image-only or damaged pages yield empty text; the
                    // rest of the document still gets extracted.
                    warn!(page = number, error = %e, "could not extract page text");
                    pages.push(String::new());
                }
            }
        }

        debug!(page_count = pages.len(), "extracted PDF text");
        Ok(pages)
    }
}
