use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use vat_finder::{
    Candidate, ExtractionError, FinderError, FinderOptions, PageSource, VatCheck, VatFinder,
    VatRecord, VatVerifier, VerificationError,
};

/// Serves fixed pages for any path.
struct StaticPages(Vec<&'static str>);

impl PageSource for StaticPages {
    fn pages(&self, _path: &Path) -> Result<Vec<String>, ExtractionError> {
        Ok(self.0.iter().map(|p| p.to_string()).collect())
    }
}

/// Fails like an unreadable file.
struct Unreadable;

impl PageSource for Unreadable {
    fn pages(&self, _path: &Path) -> Result<Vec<String>, ExtractionError> {
        Err(ExtractionError::Parse("invalid file header".into()))
    }
}

/// Valid for every number except the ones listed; counts calls.
#[derive(Default)]
struct Authority {
    failing: Vec<&'static str>,
    calls: AtomicUsize,
}

impl VatVerifier for Authority {
    async fn verify(
        &self,
        _country_code: &str,
        vat_number: &str,
    ) -> Result<VatCheck, VerificationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.iter().any(|f| *f == vat_number) {
            return Err(VerificationError::Service("MS_UNAVAILABLE".into()));
        }
        Ok(VatCheck::registered("ACME", "1 Main St"))
    }
}

// ---------------------------------------------------------------------------
// End-to-end scenarios
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unverified_invoice_yields_bare_candidate() {
    let finder = VatFinder::new(StaticPages(vec!["Invoice\nVAT: DE123456789 Total: 50 EUR"]))
        .with_verifier(Authority::default());

    let records = finder.process_document("invoice.pdf", false).await.unwrap();

    assert_eq!(records, vec![VatRecord::unverified(Candidate::new("DE", "123456789"))]);
    assert!(!records[0].is_verified());
}

#[tokio::test]
async fn verified_candidate_carries_registration() {
    let finder = VatFinder::new(StaticPages(vec!["BE0123456789"])).with_verifier(Authority::default());

    let records = finder.process_document("invoice.pdf", true).await.unwrap();

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.country_code(), "BE");
    assert_eq!(record.vat_number(), "0123456789");
    let v = record.verification.as_ref().unwrap();
    assert!(v.valid);
    assert_eq!(v.name.as_deref(), Some("ACME"));
    assert_eq!(v.address.as_deref(), Some("1 Main St"));
}

#[tokio::test]
async fn no_identifiers_yields_empty_result_either_way() {
    let finder = VatFinder::new(StaticPages(vec!["no identifiers here"]))
        .with_verifier(Authority::default());

    assert!(finder.process_document("a.pdf", false).await.unwrap().is_empty());
    assert!(finder.process_document("a.pdf", true).await.unwrap().is_empty());
}

#[tokio::test]
async fn second_failure_discards_all_results() {
    let authority = Authority {
        failing: vec!["U12345678"],
        ..Default::default()
    };
    let finder = VatFinder::new(StaticPages(vec!["DE123456789", "ATU12345678"])).with_verifier(authority);

    let err = finder.process_document("a.pdf", true).await.unwrap_err();

    match &err {
        FinderError::Verification(failure) => {
            assert_eq!(failure.index, 1);
            assert_eq!(failure.candidate, Candidate::new("AT", "U12345678"));
        }
        other => panic!("expected verification failure, got {other:?}"),
    }
    assert!(matches!(
        err.verification_error(),
        Some(VerificationError::Service(msg)) if msg == "MS_UNAVAILABLE"
    ));
}

// ---------------------------------------------------------------------------
// Extraction errors and options
// ---------------------------------------------------------------------------

#[tokio::test]
async fn extraction_failure_is_wrapped_with_path() {
    let finder = VatFinder::new(Unreadable).with_verifier(Authority::default());

    let err = finder.process_document("/tmp/missing.pdf", true).await.unwrap_err();

    assert!(matches!(err, FinderError::Extraction { .. }));
    let msg = err.to_string();
    assert!(msg.starts_with("an error occurred while opening the file"), "{msg}");
    assert!(msg.contains("/tmp/missing.pdf"), "{msg}");
    assert!(msg.contains("invalid file header"), "{msg}");
    assert!(err.verification_error().is_none());
}

#[tokio::test]
async fn skipping_verification_makes_no_calls() {
    let finder = VatFinder::new(StaticPages(vec!["DE123456789 ATU12345678"]))
        .with_verifier(Authority::default());

    let records = finder.process_document("a.pdf", false).await.unwrap();

    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.valid().is_none()));
}

#[tokio::test]
async fn verification_issues_one_call_per_occurrence() {
    let authority = Authority::default();
    let finder = VatFinder::new(StaticPages(vec!["DE123456789", "DE123456789"])).with_verifier(&authority);

    let records = finder.process_document("a.pdf", true).await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(authority.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn deduplicate_option_collapses_repeats() {
    let authority = Authority::default();
    let finder = VatFinder::new(StaticPages(vec!["DE123456789", "ATU12345678 DE 123 456 789"]))
        .with_verifier(&authority)
        .with_options(FinderOptions {
            deduplicate: true,
            ..Default::default()
        });

    let records = finder.process_document("a.pdf", true).await.unwrap();

    let ids: Vec<String> = records.iter().map(|r| r.candidate.to_string()).collect();
    assert_eq!(ids, ["DE123456789", "ATU12345678"]);
    assert_eq!(authority.calls.load(Ordering::SeqCst), 2);
}

#[test]
fn extract_document_needs_no_verifier() {
    let finder = VatFinder::new(StaticPages(vec!["Seller VAT GR 123 456 789"]));

    let found = finder.extract_document("a.pdf").unwrap();

    assert_eq!(found, vec![Candidate::new("GR", "123456789")]);
}

#[tokio::test]
async fn finder_without_verifier_processes_unverified() {
    let finder = VatFinder::new(StaticPages(vec!["VAT ID: DE 123 456 789"]));

    let records = finder.process_document("a.pdf", false).await.unwrap();

    assert_eq!(records, vec![VatRecord::unverified(Candidate::new("DE", "123456789"))]);
}

#[tokio::test]
async fn finder_without_verifier_refuses_to_verify() {
    let finder = VatFinder::new(StaticPages(vec!["VAT ID: DE 123 456 789"]));

    let err = finder.process_document("a.pdf", true).await.unwrap_err();

    assert!(matches!(err, FinderError::NoVerifier));
    assert!(err.verification_error().is_none());
}
