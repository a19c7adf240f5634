//! Source adapters for key-person discovery.
//!
//! Each adapter wraps one upstream source behind the [`ProviderAdapter`]
//! trait:
//! - [`ProfessionalNetworkAdapter`] — people search on a professional network
//! - [`StartupDatabaseAdapter`] — two-step org lookup in a startup database
//! - [`WebsiteScrapeAdapter`] — team/about page scraping
//! - [`EmailDirectoryAdapter`] — domain search in an email directory
//!
//! Adapters are infallible at the boundary: any upstream failure is logged
//! and surfaces as an empty record list, so one broken source never takes
//! down a discovery run. [`SourceOrchestrator`] fans the adapters out
//! concurrently and merges their output.

use std::time::Duration;

use async_trait::async_trait;

use leadscout_shared::{PersonRecord, SourceKind};

mod email_directory;
mod orchestrator;
mod professional_network;
mod startup_db;
mod website;

pub use email_directory::EmailDirectoryAdapter;
pub use orchestrator::SourceOrchestrator;
pub use professional_network::ProfessionalNetworkAdapter;
pub use startup_db::StartupDatabaseAdapter;
pub use website::WebsiteScrapeAdapter;

// ---------------------------------------------------------------------------
// Adapter trait
// ---------------------------------------------------------------------------

/// A single upstream people source.
///
/// `fetch` never returns an error: adapters handle their own failures
/// (timeouts, auth rejections, unparseable payloads) by logging a warning
/// and returning whatever records they managed to collect, usually none.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Which source this adapter represents, for provenance tagging.
    fn kind(&self) -> SourceKind;

    /// Fetch candidate people for a company.
    async fn fetch(&self, company: &str, website: Option<&str>) -> Vec<PersonRecord>;
}

// ---------------------------------------------------------------------------
// Shared HTTP plumbing
// ---------------------------------------------------------------------------

const USER_AGENT: &str = concat!("leadscout/", env!("CARGO_PKG_VERSION"));

/// Minimum number of records that must survive the relevance filter before
/// we trust it; below this we fall back to the head of the raw results.
const RELEVANCE_FLOOR: usize = 3;

pub(crate) fn build_client(timeout_secs: u64) -> Option<reqwest::Client> {
    match reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(timeout_secs))
        .build()
    {
        Ok(client) => Some(client),
        Err(err) => {
            tracing::warn!(error = %err, "failed to build http client");
            None
        }
    }
}

/// Keep records whose relevance check passes; if too few pass, a sparse or
/// oddly-worded upstream payload is more likely than a genuinely irrelevant
/// one, so return the first few raw records instead of nothing.
pub(crate) fn apply_relevance_filter<F>(records: Vec<PersonRecord>, is_relevant: F) -> Vec<PersonRecord>
where
    F: Fn(&PersonRecord) -> bool,
{
    let filtered: Vec<PersonRecord> = records.iter().filter(|r| is_relevant(r)).cloned().collect();
    if filtered.len() >= RELEVANCE_FLOOR {
        filtered
    } else if records.len() <= RELEVANCE_FLOOR {
        records
    } else {
        records.into_iter().take(RELEVANCE_FLOOR).collect()
    }
}

/// Pull the record array out of a provider payload, tolerating the common
/// envelope keys upstream APIs disagree on.
pub(crate) fn payload_items(value: &serde_json::Value) -> Vec<serde_json::Value> {
    for key in ["data", "elements", "results", "entities", "items"] {
        if let Some(nested) = value.get(key) {
            if let Some(items) = nested.as_array() {
                return items.clone();
            }
            // one level of envelope nesting, e.g. {"data": {"items": [...]}}
            if nested.is_object() {
                let inner = payload_items(nested);
                if !inner.is_empty() {
                    return inner;
                }
            }
        }
    }
    value.as_array().cloned().unwrap_or_default()
}

/// First non-empty string found under any of the given keys.
pub(crate) fn string_field(item: &serde_json::Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        item.get(*key)
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
    })
}
