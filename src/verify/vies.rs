//! EU VIES REST API client.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::VatVerifier;
use crate::core::{VatCheck, VerificationError};

/// Public VIES endpoint. No authentication is required.
pub const VIES_URL: &str = "https://ec.europa.eu/taxation_customs/vies/rest-api/check-vat-number";

/// Connection settings for [`ViesClient`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViesConfig {
    /// URL of the `check-vat-number` endpoint.
    pub endpoint: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ViesConfig {
    fn default() -> Self {
        Self {
            endpoint: VIES_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

/// VIES API response structure.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ViesApiResponse {
    valid: Option<bool>,
    name: Option<String>,
    address: Option<String>,
    // Error fields
    error_wrappers: Option<Vec<ViesErrorWrapper>>,
}

#[derive(Debug, Deserialize)]
struct ViesErrorWrapper {
    error: Option<String>,
    message: Option<String>,
}

/// VIES API request body.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ViesRequest {
    country_code: String,
    vat_number: String,
}

impl ViesRequest {
    fn new(country_code: &str, vat_number: &str) -> Self {
        let country_code = country_code.to_uppercase();
        // VIES only knows Greece as EL.
        let country_code = if country_code == "GR" {
            "EL".to_string()
        } else {
            country_code
        };
        Self {
            country_code,
            vat_number: vat_number.to_string(),
        }
    }
}

/// Verifies VAT identifiers against the EU VIES service.
///
/// Holds one HTTP client for all requests.
#[derive(Debug, Clone)]
pub struct ViesClient {
    client: reqwest::Client,
    endpoint: String,
}

impl ViesClient {
    /// Client for the public VIES endpoint with default settings.
    ///
    /// # Errors
    ///
    /// Returns `VerificationError::Network` if the HTTP client cannot be built.
    pub fn new() -> Result<Self, VerificationError> {
        Self::with_config(ViesConfig::default())
    }

    /// Client for the endpoint and timeout in `config`.
    ///
    /// # Errors
    ///
    /// Returns `VerificationError::Network` if the HTTP client cannot be built.
    pub fn with_config(config: ViesConfig) -> Result<Self, VerificationError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| VerificationError::Network(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: config.endpoint,
        })
    }

    /// URL the client posts check requests to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Check a VAT number against VIES.
    ///
    /// `country_code` is the 2-letter prefix (e.g. "DE"; "GR" is sent as "EL").
    /// `vat_number` is the number part without the country prefix.
    ///
    /// # Errors
    ///
    /// Returns `VerificationError::Network` on connection issues,
    /// `VerificationError::Service` on HTTP or API-level errors (e.g. member
    /// state unavailable), `VerificationError::Response` on unexpected
    /// response formats.
    pub async fn check(
        &self,
        country_code: &str,
        vat_number: &str,
    ) -> Result<VatCheck, VerificationError> {
        let req = ViesRequest::new(country_code, vat_number);
        debug!(country = %req.country_code, number = %req.vat_number, "querying VIES");

        let resp = self
            .client
            .post(&self.endpoint)
            .json(&req)
            .send()
            .await
            .map_err(|e| VerificationError::Network(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| VerificationError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(VerificationError::Service(format!("HTTP {status}: {body}")));
        }

        parse_response(&body)
    }
}

impl VatVerifier for ViesClient {
    async fn verify(
        &self,
        country_code: &str,
        vat_number: &str,
    ) -> Result<VatCheck, VerificationError> {
        self.check(country_code, vat_number).await
    }
}

/// Decode a successful VIES response body.
fn parse_response(body: &str) -> Result<VatCheck, VerificationError> {
    let api_resp: ViesApiResponse = serde_json::from_str(body)
        .map_err(|e: serde_json::Error| VerificationError::Response(e.to_string()))?;

    // Check for API-level errors
    if let Some(err) = api_resp.error_wrappers.as_ref().and_then(|errors| errors.first()) {
        let msg = err
            .message
            .clone()
            .or_else(|| err.error.clone())
            .unwrap_or_else(|| "unknown error".into());
        return Err(VerificationError::Service(msg));
    }

    let valid = api_resp
        .valid
        .ok_or_else(|| VerificationError::Response("missing 'valid' field".into()))?;

    Ok(VatCheck {
        valid,
        name: api_resp.name.filter(|n| n != "---" && !n.is_empty()),
        address: api_resp.address.filter(|a| a != "---" && !a.is_empty()),
    })
}
