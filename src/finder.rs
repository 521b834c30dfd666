//! The document pipeline: page text → candidates → (optional) verification.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::{Candidate, FinderError, VatRecord};
use crate::scan::{extract_from_pages, unique_candidates};
use crate::source::PageSource;
use crate::verify::{VatVerifier, VerifyOptions, verify_candidates};

/// Runtime options for [`VatFinder`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinderOptions {
    /// Report each identifier once instead of once per occurrence.
    pub deduplicate: bool,
    /// How verification calls are issued.
    #[serde(flatten)]
    pub verify: VerifyOptions,
}

/// Finds VAT identifiers in documents and optionally verifies them.
///
/// ```ignore
/// use vat_finder::{PdfTextSource, VatFinder, ViesClient};
///
/// let finder = VatFinder::new(PdfTextSource::new()).with_verifier(ViesClient::new()?);
/// let records = finder.process_document("invoice.pdf", true).await?;
/// ```
#[derive(Debug, Clone)]
pub struct VatFinder<S, V = ()> {
    source: S,
    verifier: V,
    options: FinderOptions,
}

impl<S: PageSource> VatFinder<S, ()> {
    /// A finder without a verifier. It can extract, and process documents
    /// unverified, until [`with_verifier`](Self::with_verifier) is called.
    pub fn new(source: S) -> Self {
        Self {
            source,
            verifier: (),
            options: FinderOptions::default(),
        }
    }

    /// Find VAT identifiers in the document at `path`, without verification.
    ///
    /// # Errors
    ///
    /// [`FinderError::Extraction`] if the document cannot be read;
    /// [`FinderError::NoVerifier`] if `verify` is set, since this finder has
    /// nothing to verify with.
    pub async fn process_document(
        &self,
        path: impl AsRef<Path>,
        verify: bool,
    ) -> Result<Vec<VatRecord>, FinderError> {
        if verify {
            return Err(FinderError::NoVerifier);
        }
        let candidates = self.extract_document(path)?;
        Ok(candidates.into_iter().map(VatRecord::unverified).collect())
    }
}

impl<S: PageSource, V> VatFinder<S, V> {
    /// Swap in `verifier`, keeping source and options.
    pub fn with_verifier<W: VatVerifier>(self, verifier: W) -> VatFinder<S, W> {
        VatFinder {
            source: self.source,
            verifier,
            options: self.options,
        }
    }

    /// Replace the finder's options.
    pub fn with_options(mut self, options: FinderOptions) -> Self {
        self.options = options;
        self
    }

    /// Current options.
    pub fn options(&self) -> &FinderOptions {
        &self.options
    }

    /// Read the document and return every candidate found, in page order.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::Extraction`] if the source cannot read the document.
    pub fn extract_document(&self, path: impl AsRef<Path>) -> Result<Vec<Candidate>, FinderError> {
        let path = path.as_ref();
        let pages = self
            .source
            .pages(path)
            .map_err(|source| FinderError::Extraction {
                path: path.to_path_buf(),
                source,
            })?;

        let mut candidates = extract_from_pages(&pages);
        if self.options.deduplicate {
            candidates = unique_candidates(candidates);
        }
        debug!(
            path = %path.display(),
            pages = pages.len(),
            candidates = candidates.len(),
            "extracted candidates"
        );
        Ok(candidates)
    }
}

impl<S: PageSource, V: VatVerifier> VatFinder<S, V> {
    /// Find VAT identifiers in the document at `path`.
    ///
    /// With `verify`, every candidate is checked with the configured
    /// verifier and the records carry the answer; otherwise records hold the
    /// bare candidates.
    ///
    /// # Errors
    ///
    /// [`FinderError::Extraction`] if the document cannot be read;
    /// [`FinderError::Verification`] if any single verification fails, in
    /// which case no records are returned.
    pub async fn process_document(
        &self,
        path: impl AsRef<Path>,
        verify: bool,
    ) -> Result<Vec<VatRecord>, FinderError> {
        let path = path.as_ref();
        let candidates = self.extract_document(path)?;

        if !verify {
            return Ok(candidates.into_iter().map(VatRecord::unverified).collect());
        }

        let records = verify_candidates(&self.verifier, candidates, &self.options.verify).await?;
        info!(
            path = %path.display(),
            records = records.len(),
            valid = records.iter().filter(|r| r.valid() == Some(true)).count(),
            "verified document"
        );
        Ok(records)
    }
}
