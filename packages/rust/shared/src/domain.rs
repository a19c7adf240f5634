//! Company domain resolution.
//!
//! The pipeline derives one domain per invocation — from the website when a
//! usable one is given, otherwise synthesized from the company name — and
//! every downstream consumer (email prediction, fallback roster) uses that
//! same value.

use serde::{Deserialize, Serialize};

/// Legal-entity suffixes stripped when synthesizing a domain from the
/// company name.
const LEGAL_SUFFIXES: &[&str] = &["inc", "llc", "corp", "ltd", "co", "gmbh", "plc"];

/// A resolved company domain such as `acme.com`. Immutable for the duration
/// of one pipeline invocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyDomain(String);

impl CompanyDomain {
    /// Resolve a domain from the company website if present and usable,
    /// else synthesize one from the company name.
    pub fn resolve(company_name: &str, website: Option<&str>) -> Self {
        if let Some(site) = website {
            if let Some(domain) = domain_from_website(site) {
                return Self(domain);
            }
        }
        Self(domain_from_company_name(company_name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CompanyDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strip protocol and `www.`, cut at the first path/query/fragment
/// delimiter, and sanity-check the remainder.
fn domain_from_website(website: &str) -> Option<String> {
    let trimmed = website.trim();
    let without_scheme = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);
    let without_www = without_scheme.strip_prefix("www.").unwrap_or(without_scheme);

    let host: &str = without_www
        .split(['/', '?', '#'])
        .next()
        .unwrap_or(without_www);
    let host = host.trim().to_lowercase();

    if host.contains('.') && host.len() > 3 {
        Some(host)
    } else {
        None
    }
}

/// Lowercase the company name, drop legal suffixes and non-alphanumerics,
/// and append `.com`.
fn domain_from_company_name(company_name: &str) -> String {
    let stem: String = company_name
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty() && !LEGAL_SUFFIXES.contains(token))
        .collect();

    if stem.is_empty() {
        // Degenerate input still needs a syntactically valid domain.
        "example.com".to_string()
    } else {
        format!("{stem}.com")
    }
}
