//! Email enrichment for records that arrived without an address.
//!
//! Runs after dedup so each distinct person is predicted at most once.
//! Verification goes through a rate-limited collaborator, so people are
//! processed one at a time.

use leadscout_email::{best_email, EmailVerifier};
use leadscout_shared::{CompanyDomain, PersonRecord};

pub async fn enrich_emails(
    records: &mut [PersonRecord],
    domain: &CompanyDomain,
    verifier: &EmailVerifier,
) {
    for record in records.iter_mut().filter(|r| r.email.is_none()) {
        let (address, verification) = best_email(&record.name, domain, verifier).await;
        tracing::debug!(
            name = %record.name,
            email = %address,
            confidence = verification.confidence,
            source = ?verification.source,
            "predicted email"
        );
        record.email = Some(address);
    }
}
