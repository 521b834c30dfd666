#![no_main]

use libfuzzer_sys::fuzz_target;
use vat_finder::PdfTextSource;

fuzz_target!(|data: &[u8]| {
    // Any byte string fed to the page reader returns, never panics.
    let _ = PdfTextSource::new().pages_from_bytes(data);
});
