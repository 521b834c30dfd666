//! Finding VAT-shaped identifiers in text.
//!
//! Recognizes the structural shape of EU VAT identifiers for 28 countries.
//! No check-digit arithmetic is done here; a candidate is only "shaped like"
//! a VAT ID until a [`VatVerifier`](crate::verify::VatVerifier) says otherwise.
//!
//! # Example
//!
//! ```
//! use vat_finder::scan::{extract_from_pages, find_vat_in_str};
//!
//! let found = find_vat_in_str("TaxIDFR12345678901please");
//! assert_eq!(found[0].country_code, "FR");
//! assert_eq!(found[0].vat_number, "12345678901");
//!
//! // Pages are stripped of separators before scanning.
//! let found = extract_from_pages(["Invoice\nVAT: DE 123 456 789"]);
//! assert_eq!(found[0].to_string(), "DE123456789");
//! ```

mod catalog;
mod extract;
mod pages;

pub use catalog::{PatternRule, combined_pattern, matcher, rule_for, rules};
pub use extract::{VatMatch, country_code_of, find_vat_in_str, find_vat_matches, vat_number_of};
pub use pages::{extract_from_pages, strip_noise, unique_candidates};
