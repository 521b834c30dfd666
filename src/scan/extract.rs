use std::ops::Range;

use tracing::trace;

use super::catalog::matcher;
use crate::core::Candidate;

/// A matched identifier together with its byte span in the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VatMatch {
    pub candidate: Candidate,
    pub span: Range<usize>,
}

/// Two-letter country code at the start of `input`.
///
/// `None` if `input` is shorter than two characters or does not start with
/// two ASCII letters.
pub fn country_code_of(input: &str) -> Option<&str> {
    input
        .get(..2)
        .filter(|code| code.bytes().all(|b| b.is_ascii_alphabetic()))
}

/// Everything after the two-letter country code.
///
/// `None` if nothing follows the country code.
pub fn vat_number_of(input: &str) -> Option<&str> {
    input.get(2..).filter(|number| !number.is_empty())
}

/// Find every VAT-shaped identifier in `text`, left to right, without overlap.
///
/// The text is scanned as-is; use [`strip_noise`](super::strip_noise) first
/// when separators may split an identifier.
pub fn find_vat_in_str(text: &str) -> Vec<Candidate> {
    find_vat_matches(text)
        .into_iter()
        .map(|m| m.candidate)
        .collect()
}

/// Like [`find_vat_in_str`], keeping the span of each match.
pub fn find_vat_matches(text: &str) -> Vec<VatMatch> {
    matcher()
        .find_iter(text)
        .filter_map(|m| {
            let candidate = Candidate::from_match(m.as_str())?;
            trace!(vat = %candidate, start = m.start(), "matched VAT candidate");
            Some(VatMatch {
                candidate,
                span: m.range(),
            })
        })
        .collect()
}
