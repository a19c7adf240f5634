//! Email deliverability scoring.
//!
//! When the email-intelligence collaborator is configured, its verification
//! endpoint is called with a bounded timeout and its 0–100 score is mapped
//! linearly to a confidence. On rate-limit/auth/network failure — or when no
//! key is configured at all — scoring degrades to a local heuristic instead
//! of surfacing an error.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

/// Confidence above which a candidate is considered usable.
pub const CONFIDENCE_THRESHOLD: f64 = 0.6;

/// Ceiling for locally-scored confidence; only the collaborator can go higher.
const FALLBACK_CONFIDENCE_CAP: f64 = 0.7;

/// Free-mail providers that make a corporate-contact address less likely.
const FREE_MAIL_DOMAINS: &[&str] = &[
    "gmail.com",
    "yahoo.com",
    "hotmail.com",
    "outlook.com",
    "aol.com",
    "icloud.com",
    "protonmail.com",
    "proton.me",
];

static EMAIL_SYNTAX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+'\-]+@[A-Za-z0-9][A-Za-z0-9.\-]*\.[A-Za-z]{2,}$")
        .expect("email syntax regex")
});

// ---------------------------------------------------------------------------
// Verification result
// ---------------------------------------------------------------------------

/// Deliverability classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerifyStatus {
    Deliverable,
    Undeliverable,
    Risky,
    Unknown,
}

/// Where the verdict came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerifySource {
    External,
    Fallback,
}

/// Outcome of verifying one address. Never an error: every failure mode
/// degrades to a fallback-scored verdict.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Verification {
    pub is_valid: bool,
    pub confidence: f64,
    pub status: VerifyStatus,
    pub source: VerifySource,
}

impl Verification {
    fn rejected() -> Self {
        Self {
            is_valid: false,
            confidence: 0.0,
            status: VerifyStatus::Undeliverable,
            source: VerifySource::Fallback,
        }
    }
}

// ---------------------------------------------------------------------------
// Collaborator wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    data: VerifyData,
}

#[derive(Debug, Deserialize)]
struct VerifyData {
    /// 0–100 deliverability score.
    #[serde(default)]
    score: f64,
    /// "deliverable" | "undeliverable" | "risky" | anything else.
    #[serde(default)]
    status: String,
}

// ---------------------------------------------------------------------------
// EmailVerifier
// ---------------------------------------------------------------------------

/// Scores candidate addresses against the email-intelligence collaborator,
/// with a local heuristic as the degradation path.
pub struct EmailVerifier {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl EmailVerifier {
    /// Create a verifier. `api_key: None` means the collaborator is not
    /// configured and every verdict comes from the local heuristic.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .user_agent(concat!("LeadScout/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: base_url.into(),
            api_key,
        }
    }

    /// Score one address. Malformed input is rejected without any network
    /// call; collaborator failure degrades to the local heuristic.
    pub async fn verify(&self, email: &str) -> Verification {
        if !EMAIL_SYNTAX_RE.is_match(email) {
            return Verification::rejected();
        }

        let Some(key) = &self.api_key else {
            return fallback_score(email);
        };

        match self.verify_external(email, key).await {
            Ok(verification) => verification,
            Err(reason) => {
                warn!(email, %reason, "external verification failed, using local heuristic");
                fallback_score(email)
            }
        }
    }

    async fn verify_external(&self, email: &str, key: &str) -> Result<Verification, String> {
        let url = format!("{}/email-verifier", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("email", email), ("api_key", key)])
            .send()
            .await
            .map_err(|e| format!("request failed: {e}"))?;

        let status = response.status();
        if matches!(
            status,
            StatusCode::TOO_MANY_REQUESTS
                | StatusCode::UNAUTHORIZED
                | StatusCode::FORBIDDEN
                | StatusCode::BAD_REQUEST
        ) {
            return Err(format!("collaborator returned HTTP {status}"));
        }
        if !status.is_success() {
            return Err(format!("unexpected HTTP {status}"));
        }

        let body: VerifyResponse = response
            .json()
            .await
            .map_err(|e| format!("malformed payload: {e}"))?;

        let confidence = (body.data.score / 100.0).clamp(0.0, 1.0);
        let status = match body.data.status.as_str() {
            "deliverable" => VerifyStatus::Deliverable,
            "undeliverable" => VerifyStatus::Undeliverable,
            "risky" => VerifyStatus::Risky,
            _ => VerifyStatus::Unknown,
        };

        let is_valid = match status {
            VerifyStatus::Deliverable => true,
            // Risky addresses count only with real confidence behind them.
            VerifyStatus::Risky => confidence > CONFIDENCE_THRESHOLD,
            VerifyStatus::Undeliverable | VerifyStatus::Unknown => false,
        };

        debug!(email, confidence, ?status, "external verification verdict");

        Ok(Verification {
            is_valid,
            confidence,
            status,
            source: VerifySource::External,
        })
    }
}

/// Local heuristic: conservative syntax already passed, so start at 0.5 and
/// bump for corporate-looking domains, capped below the external range.
fn fallback_score(email: &str) -> Verification {
    let domain = email.split('@').nth(1).unwrap_or_default().to_lowercase();

    let mut confidence: f64 = 0.5;
    if !FREE_MAIL_DOMAINS.contains(&domain.as_str()) {
        confidence += 0.2;
    }
    if domain.ends_with(".com") || domain.ends_with(".org") || domain.ends_with(".net") {
        confidence += 0.1;
    }
    // Quantize to two decimals so 0.5 + 0.1 lands exactly on the threshold
    // instead of a hair above it.
    confidence = ((confidence * 100.0).round() / 100.0).min(FALLBACK_CONFIDENCE_CAP);

    let status = if confidence > CONFIDENCE_THRESHOLD {
        VerifyStatus::Deliverable
    } else {
        VerifyStatus::Unknown
    };

    Verification {
        is_valid: confidence > CONFIDENCE_THRESHOLD,
        confidence,
        status,
        source: VerifySource::Fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn verifier_against(server: &MockServer) -> EmailVerifier {
        EmailVerifier::new(server.uri(), Some("test-key".into()), 5)
    }

    #[tokio::test]
    async fn malformed_address_rejected_without_network() {
        let verifier = EmailVerifier::new("http://127.0.0.1:1", Some("key".into()), 1);
        let v = verifier.verify("not-an-email").await;
        assert!(!v.is_valid);
        assert_eq!(v.confidence, 0.0);
    }

    #[tokio::test]
    async fn external_score_maps_to_confidence() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/email-verifier"))
            .and(query_param("email", "jane.doe@acme.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": { "score": 92, "status": "deliverable" }
            })))
            .mount(&server)
            .await;

        let v = verifier_against(&server).verify("jane.doe@acme.com").await;
        assert!(v.is_valid);
        assert!((v.confidence - 0.92).abs() < 1e-9);
        assert_eq!(v.status, VerifyStatus::Deliverable);
        assert_eq!(v.source, VerifySource::External);
    }

    #[tokio::test]
    async fn risky_needs_high_confidence() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/email-verifier"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": { "score": 55, "status": "risky" }
            })))
            .mount(&server)
            .await;

        let v = verifier_against(&server).verify("maybe@acme.com").await;
        assert!(!v.is_valid);
        assert_eq!(v.status, VerifyStatus::Risky);
    }

    #[tokio::test]
    async fn rate_limit_degrades_to_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/email-verifier"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let v = verifier_against(&server).verify("jane@acme.com").await;
        assert_eq!(v.source, VerifySource::Fallback);
        // Corporate .com domain: 0.5 + 0.2 + 0.1, capped at 0.7
        assert!((v.confidence - 0.7).abs() < 1e-9);
        assert!(v.is_valid);
    }

    #[tokio::test]
    async fn unconfigured_collaborator_uses_fallback() {
        let verifier = EmailVerifier::new("https://api.hunter.io/v2", None, 5);

        let corporate = verifier.verify("jane@acme.com").await;
        assert_eq!(corporate.source, VerifySource::Fallback);
        assert_eq!(corporate.status, VerifyStatus::Deliverable);

        let freemail = verifier.verify("jane@gmail.com").await;
        // 0.5 + 0.1 for .com — below the threshold
        assert!(!freemail.is_valid);
        assert_eq!(freemail.status, VerifyStatus::Unknown);
    }
}
