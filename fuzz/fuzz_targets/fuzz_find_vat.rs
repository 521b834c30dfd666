#![no_main]

use libfuzzer_sys::fuzz_target;
use vat_finder::scan::{extract_from_pages, find_vat_in_str};

fuzz_target!(|text: &str| {
    // Arbitrary text must not panic, and every candidate must be well formed.
    for c in find_vat_in_str(text).into_iter().chain(extract_from_pages([text])) {
        assert_eq!(c.country_code.len(), 2);
        assert!(!c.vat_number.is_empty());
    }
});
