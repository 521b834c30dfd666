//! Checking candidates against a VAT authority.
//!
//! [`verify_candidates`] drives one call per candidate through any
//! [`VatVerifier`], keeping input order and stopping at the first failure.
//! With the `vies` feature, [`ViesClient`] verifies against the EU VIES API.
//!
//! # Example
//!
//! ```ignore
//! use vat_finder::verify::*;
//!
//! let vies = ViesClient::new()?;
//! let records = verify_candidates(&vies, candidates, &VerifyOptions::default()).await?;
//! ```

mod coordinator;
#[cfg(feature = "vies")]
mod vies;

pub use coordinator::{VatVerifier, VerifyOptions, verify_candidates};
#[cfg(feature = "vies")]
pub use vies::{VIES_URL, ViesClient, ViesConfig};
