use std::path::PathBuf;

use thiserror::Error;

use super::Candidate;

/// Errors raised by a [`PageSource`](crate::source::PageSource) while
/// turning a document into page text.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExtractionError {
    /// The document could not be read from disk.
    #[error("cannot read document: {0}")]
    Io(#[from] std::io::Error),

    /// The bytes were read but are not a parseable document.
    #[error("not a parseable document: {0}")]
    Parse(String),
}

/// Errors raised by a [`VatVerifier`](crate::verify::VatVerifier) for a
/// single candidate.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum VerificationError {
    /// Network or transport error.
    #[error("network error: {0}")]
    Network(String),

    /// The authority answered with an error (e.g. member state unavailable,
    /// rate limit, HTTP failure status).
    #[error("service error: {0}")]
    Service(String),

    /// The authority's answer could not be decoded.
    #[error("malformed response: {0}")]
    Response(String),
}

/// A batch verification aborted because one candidate failed.
///
/// No partial results travel with this error. `index` tells the caller how
/// many candidates preceded the failing one.
#[derive(Debug, Clone, Error)]
#[error("verification of candidate #{index} ({candidate}) failed: {source}")]
pub struct VerificationFailure {
    /// 0-based position of the failing candidate in the input sequence.
    pub index: usize,
    /// The candidate whose verification failed.
    pub candidate: Candidate,
    /// The verifier's error.
    #[source]
    pub source: VerificationError,
}

/// Errors surfaced by [`VatFinder`](crate::finder::VatFinder).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FinderError {
    /// The document could not be turned into page text.
    #[error("an error occurred while opening the file '{}': {source}", .path.display())]
    Extraction {
        path: PathBuf,
        #[source]
        source: ExtractionError,
    },

    /// A candidate's verification failed and the batch was abandoned.
    #[error(transparent)]
    Verification(#[from] VerificationFailure),

    /// Verification was requested from a finder built without a verifier.
    #[error("verification requested but no verifier is configured")]
    NoVerifier,
}

impl FinderError {
    /// The underlying verifier error, if this is a verification failure.
    pub fn verification_error(&self) -> Option<&VerificationError> {
        match self {
            Self::Verification(failure) => Some(&failure.source),
            Self::Extraction { .. } | Self::NoVerifier => None,
        }
    }
}
