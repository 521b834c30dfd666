//! Turning documents into page text.
//!
//! [`PageSource`] is the seam between the pipeline and whatever parses the
//! document. With the `pdf` feature (default), [`PdfTextSource`] reads PDFs.

#[cfg(feature = "pdf")]
mod pdf;

use std::path::Path;

use crate::core::ExtractionError;

#[cfg(feature = "pdf")]
pub use pdf::PdfTextSource;

/// Produces the text of a document, one string per page, in page order.
pub trait PageSource {
    /// # Errors
    ///
    /// Returns [`ExtractionError`] if the document cannot be read or parsed.
    fn pages(&self, path: &Path) -> Result<Vec<String>, ExtractionError>;
}

impl<T: PageSource + ?Sized> PageSource for &T {
    fn pages(&self, path: &Path) -> Result<Vec<String>, ExtractionError> {
        (**self).pages(path)
    }
}
