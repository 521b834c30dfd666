use std::future::Future;
use std::num::NonZeroUsize;

use chrono::Utc;
use futures::{StreamExt, TryStreamExt, stream};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{Candidate, VatCheck, VatRecord, VerificationError, VerificationFailure};

/// An authority that can tell whether a VAT identifier is registered.
pub trait VatVerifier {
    /// Check one identifier. `vat_number` excludes the country prefix.
    fn verify(
        &self,
        country_code: &str,
        vat_number: &str,
    ) -> impl Future<Output = Result<VatCheck, VerificationError>> + Send;
}

impl<V: VatVerifier> VatVerifier for &V {
    fn verify(
        &self,
        country_code: &str,
        vat_number: &str,
    ) -> impl Future<Output = Result<VatCheck, VerificationError>> + Send {
        (**self).verify(country_code, vat_number)
    }
}

/// How a batch of candidates is verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifyOptions {
    /// Maximum number of verification calls in flight. 1 checks the
    /// candidates one after another.
    pub concurrency: NonZeroUsize,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self {
            concurrency: NonZeroUsize::MIN,
        }
    }
}

impl VerifyOptions {
    /// Allow up to `concurrency` calls in flight at once.
    pub fn with_concurrency(mut self, concurrency: NonZeroUsize) -> Self {
        self.concurrency = concurrency;
        self
    }
}

/// Verify every candidate and return one record per candidate, in input order.
///
/// Up to `options.concurrency` calls run at once, but results are yielded in
/// the order the candidates were given. The first failure in input order
/// ends the batch: calls still in flight are dropped, no further calls are
/// made, and no partial results are returned.
///
/// # Errors
///
/// Returns [`VerificationFailure`] naming the failing candidate and its
/// position.
pub async fn verify_candidates<V>(
    verifier: &V,
    candidates: Vec<Candidate>,
    options: &VerifyOptions,
) -> Result<Vec<VatRecord>, VerificationFailure>
where
    V: VatVerifier,
{
    let total = candidates.len();
    debug!(
        candidates = total,
        concurrency = options.concurrency.get(),
        "verifying candidates"
    );

    let records: Vec<VatRecord> = stream::iter(candidates.into_iter().enumerate())
        .map(|(index, candidate)| async move {
            let request_date = Utc::now();
            match verifier
                .verify(&candidate.country_code, &candidate.vat_number)
                .await
            {
                Ok(check) => {
                    debug!(index, vat = %candidate, valid = check.valid, "verified");
                    Ok(VatRecord::verified(candidate, request_date, check))
                }
                Err(source) => {
                    warn!(index, vat = %candidate, error = %source, "verification failed");
                    Err(VerificationFailure {
                        index,
                        candidate,
                        source,
                    })
                }
            }
        })
        .buffered(options.concurrency.get())
        .try_collect()
        .await?;

    debug!(verified = records.len(), "verification finished");
    Ok(records)
}
