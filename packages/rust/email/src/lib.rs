//! Email prediction and verification for LeadScout.
//!
//! This crate provides:
//! - [`predictor`] — ordered candidate-address generation from a name and
//!   the resolved company domain
//! - [`EmailVerifier`] — deliverability scoring via the email-intelligence
//!   collaborator, with a local heuristic degradation path
//! - [`best_email`] — the combined predict-then-verify flow

pub mod predictor;
pub mod verifier;

use leadscout_shared::CompanyDomain;
use tracing::debug;

pub use predictor::{NameParts, candidates, clean_name, fallback_address, name_parts};
pub use verifier::{
    CONFIDENCE_THRESHOLD, EmailVerifier, Verification, VerifySource, VerifyStatus,
};

/// Predict candidates for `name` at `domain` and verify them in priority
/// order. Returns the first candidate the external collaborator scores above
/// the confidence threshold; if none qualifies (or no collaborator is
/// configured), returns the primary candidate with its own verification.
///
/// Candidates are verified one at a time: the collaborator is typically
/// rate-limited, so this path is deliberately sequential.
pub async fn best_email(
    name: &str,
    domain: &CompanyDomain,
    verifier: &EmailVerifier,
) -> (String, Verification) {
    let candidates = predictor::candidates(name, domain);

    if candidates.is_empty() {
        let address = predictor::fallback_address(name, domain);
        let verification = verifier.verify(&address).await;
        return (address, verification);
    }

    let mut primary: Option<(String, Verification)> = None;

    for candidate in candidates {
        let verification = verifier.verify(&candidate).await;

        if verification.source == VerifySource::External
            && verification.confidence > CONFIDENCE_THRESHOLD
        {
            debug!(email = %candidate, confidence = verification.confidence, "candidate verified");
            return (candidate, verification);
        }

        if primary.is_none() {
            primary = Some((candidate, verification));
        }
    }

    // No externally-verified winner: fall back to the first.last pattern.
    primary.expect("candidate list was non-empty")
}
