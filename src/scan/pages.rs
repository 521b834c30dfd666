use std::collections::HashSet;

use tracing::debug;

use super::extract::find_vat_in_str;
use crate::core::Candidate;

/// Drop every character that is not an ASCII letter or digit.
///
/// PDF text often breaks identifiers with spaces, line breaks or
/// punctuation ("FR 12 345 678 901").
pub fn strip_noise(page: &str) -> String {
    page.chars().filter(char::is_ascii_alphanumeric).collect()
}

/// Extract candidates from every page, in page order then scan order.
///
/// The same identifier on several pages is reported once per occurrence.
pub fn extract_from_pages<I, S>(pages: I) -> Vec<Candidate>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut found = Vec::new();
    for (index, page) in pages.into_iter().enumerate() {
        let page_candidates = find_vat_in_str(&strip_noise(page.as_ref()));
        debug!(
            page = index + 1,
            candidates = page_candidates.len(),
            "scanned page"
        );
        found.extend(page_candidates);
    }
    found
}

/// Keep the first occurrence of each identifier, preserving order.
pub fn unique_candidates(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|c| seen.insert(c.clone()))
        .collect()
}
