use std::path::Path;

use lopdf::Document;
use tracing::{debug, warn};

use super::PageSource;
use crate::core::ExtractionError;

/// Reads page text from PDF files with `lopdf`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextSource;

impl PdfTextSource {
    pub fn new() -> Self {
        Self
    }

    /// Extract the text of every page of an in-memory PDF, in page order.
    ///
    /// A page whose text cannot be decoded yields an empty string so page
    /// positions stay aligned with the document.
    pub fn pages_from_bytes(&self, pdf_bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
        let doc = Document::load_mem(pdf_bytes)
            .map_err(|e| ExtractionError::Parse(format!("failed to load PDF: {e}")))?;

        // get_pages() is keyed by 1-based page number, so iteration is in page order.
        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        debug!(pages = page_numbers.len(), "loaded PDF");

        Ok(page_numbers
            .into_iter()
            .map(|number| {
                doc.extract_text(&[number]).unwrap_or_else(|e| {
                    warn!(page = number, error = %e, "could not extract page text");
                    String::new()
                })
            })
            .collect())
    }
}

impl PageSource for PdfTextSource {
    fn pages(&self, path: &Path) -> Result<Vec<String>, ExtractionError> {
        let bytes = std::fs::read(path)?;
        self.pages_from_bytes(&bytes)
    }
}
