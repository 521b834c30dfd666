//! # vat-finder
//!
//! Finds European VAT identifiers in document text and optionally verifies
//! them against a VAT authority such as the EU VIES service.
//!
//! The pipeline has three stages:
//!
//! 1. a [`PageSource`](source::PageSource) turns a document into page text,
//! 2. [`scan`] strips separators and matches 28 national VAT shapes,
//! 3. [`verify`] checks each candidate, keeping order and failing fast.
//!
//! ## Quick Start
//!
//! ```rust
//! use vat_finder::scan::extract_from_pages;
//!
//! let pages = ["Invoice\nVAT: DE123456789 Total: 50 EUR"];
//! let found = extract_from_pages(pages);
//!
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].country_code, "DE");
//! assert_eq!(found[0].vat_number, "123456789");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `pdf` (default) | [`PdfTextSource`](source::PdfTextSource), PDF page text via `lopdf` |
//! | `vies` | [`ViesClient`](verify::ViesClient), EU VIES REST verification |
//! | `all` | Everything |
//!
//! The library emits `tracing` events but never installs a subscriber.

pub mod core;
pub mod finder;
pub mod scan;
pub mod source;
pub mod verify;

// Re-export the main entry points at crate root for convenience
pub use crate::core::*;
pub use crate::finder::{FinderOptions, VatFinder};
pub use crate::source::PageSource;
#[cfg(feature = "pdf")]
pub use crate::source::PdfTextSource;
pub use crate::verify::{VatVerifier, VerifyOptions};
#[cfg(feature = "vies")]
pub use crate::verify::ViesClient;
