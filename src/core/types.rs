use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scan::{country_code_of, vat_number_of};

/// A VAT-shaped identifier found in text, split into its parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Two-letter prefix, upper case (e.g. "DE", "EL", "GR").
    pub country_code: String,
    /// Everything after the prefix, upper case, no separators.
    pub vat_number: String,
}

impl Candidate {
    /// Build a candidate from its parts, normalizing both to upper case.
    pub fn new(country_code: &str, vat_number: &str) -> Self {
        Self {
            country_code: country_code.to_ascii_uppercase(),
            vat_number: vat_number.to_ascii_uppercase(),
        }
    }

    /// Split a matched identifier such as `"DE123456789"`.
    ///
    /// Returns `None` if either the country code or the number would be
    /// empty.
    pub fn from_match(matched: &str) -> Option<Self> {
        let country = country_code_of(matched)?;
        let number = vat_number_of(matched)?;
        Some(Self::new(country, number))
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.country_code, self.vat_number)
    }
}

/// Answer of a verification authority for one identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatCheck {
    /// Whether the identifier is currently registered.
    pub valid: bool,
    /// Registered company name, if the authority disclosed it.
    pub name: Option<String>,
    /// Registered address, if the authority disclosed it.
    pub address: Option<String>,
}

impl VatCheck {
    /// A valid registration with name and address.
    pub fn registered(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            valid: true,
            name: Some(name.into()),
            address: Some(address.into()),
        }
    }

    /// An identifier the authority does not know.
    pub fn unregistered() -> Self {
        Self::default()
    }
}

/// Outcome of a verification attempt attached to a [`VatRecord`].
///
/// `name` and `address` are `Some` exactly when `valid` is true.
/// Deserialization rejects input that breaks this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawVerification")]
pub struct Verification {
    /// When the verification call was issued.
    pub request_date: DateTime<Utc>,
    /// Whether the identifier is currently registered.
    pub valid: bool,
    /// Registered company name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Registered address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawVerification {
    request_date: DateTime<Utc>,
    valid: bool,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    address: Option<String>,
}

impl TryFrom<RawVerification> for Verification {
    type Error = String;

    fn try_from(raw: RawVerification) -> Result<Self, Self::Error> {
        if raw.valid != raw.name.is_some() || raw.valid != raw.address.is_some() {
            return Err(format!(
                "name and address must be present exactly when valid is true (valid = {})",
                raw.valid
            ));
        }
        Ok(Self {
            request_date: raw.request_date,
            valid: raw.valid,
            name: raw.name,
            address: raw.address,
        })
    }
}

impl Verification {
    /// Attach an authority's answer, stamped with `request_date`.
    ///
    /// Normalizes name and address: a valid answer always carries both (a
    /// missing one becomes an empty string), an invalid answer carries
    /// neither, even if the authority sent them.
    pub fn new(request_date: DateTime<Utc>, check: VatCheck) -> Self {
        if check.valid {
            Self {
                request_date,
                valid: true,
                name: Some(check.name.unwrap_or_default()),
                address: Some(check.address.unwrap_or_default()),
            }
        } else {
            Self {
                request_date,
                valid: false,
                name: None,
                address: None,
            }
        }
    }
}

/// A candidate plus, when verification ran, the authority's answer.
///
/// Serializes flat: `{countryCode, vatNumber, requestDate?, valid?, name?, address?}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VatRecord {
    #[serde(flatten)]
    pub candidate: Candidate,
    #[serde(flatten)]
    pub verification: Option<Verification>,
}

impl VatRecord {
    /// A record for a candidate that was not sent to any authority.
    pub fn unverified(candidate: Candidate) -> Self {
        Self {
            candidate,
            verification: None,
        }
    }

    /// A record for a candidate that was checked at `request_date`.
    pub fn verified(candidate: Candidate, request_date: DateTime<Utc>, check: VatCheck) -> Self {
        Self {
            candidate,
            verification: Some(Verification::new(request_date, check)),
        }
    }

    /// Country code of the candidate.
    pub fn country_code(&self) -> &str {
        &self.candidate.country_code
    }

    /// Number part of the candidate, without the country code.
    pub fn vat_number(&self) -> &str {
        &self.candidate.vat_number
    }

    /// `None` if verification was not attempted.
    pub fn valid(&self) -> Option<bool> {
        self.verification.as_ref().map(|v| v.valid)
    }

    /// Whether an authority was asked about this candidate.
    pub fn is_verified(&self) -> bool {
        self.verification.is_some()
    }
}

impl From<Candidate> for VatRecord {
    fn from(candidate: Candidate) -> Self {
        Self::unverified(candidate)
    }
}
