//! Email-directory domain search.
//!
//! Queries an email-intelligence directory for every address it knows under
//! the company domain. Directory rows carry verified names, titles and
//! addresses, which makes this the highest-signal source when the domain
//! resolves correctly. Rows without a usable name or title are dropped;
//! role accounts (info@, sales@) come back nameless and are useless here.

use async_trait::async_trait;

use leadscout_shared::{CompanyDomain, LeadScoutError, PersonRecord, Result, SourceKind};

use crate::{build_client, string_field, ProviderAdapter};

pub struct EmailDirectoryAdapter {
    base_url: String,
    api_key: String,
    timeout_secs: u64,
}

impl EmailDirectoryAdapter {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            api_key: api_key.into(),
            timeout_secs,
        }
    }

    async fn domain_search(&self, domain: &str) -> Result<Vec<PersonRecord>> {
        let client = build_client(self.timeout_secs)
            .ok_or_else(|| LeadScoutError::Network("client setup failed".into()))?;

        let url = format!("{}/domain-search", self.base_url);
        let response = client
            .get(&url)
            .query(&[("domain", domain), ("api_key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| LeadScoutError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LeadScoutError::Network(format!("domain search returned {status}")));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| LeadScoutError::parse(e.to_string()))?;

        let rows = payload
            .get("data")
            .and_then(|data| data.get("emails"))
            .and_then(|emails| emails.as_array())
            .cloned()
            .unwrap_or_default();

        Ok(rows.iter().filter_map(parse_row).collect())
    }
}

#[async_trait]
impl ProviderAdapter for EmailDirectoryAdapter {
    fn kind(&self) -> SourceKind {
        SourceKind::EmailDirectory
    }

    async fn fetch(&self, company: &str, website: Option<&str>) -> Vec<PersonRecord> {
        let domain = CompanyDomain::resolve(company, website);
        match self.domain_search(domain.as_str()).await {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(error = %err, domain = domain.as_str(), "email directory search failed");
                Vec::new()
            }
        }
    }
}

fn parse_row(row: &serde_json::Value) -> Option<PersonRecord> {
    let first = string_field(row, &["first_name"])?;
    let last = string_field(row, &["last_name"])?;
    let position = string_field(row, &["position", "title"])?;
    let name = format!("{first} {last}");

    if !leadscout_extract::is_valid_name(&name) {
        return None;
    }

    let mut record = PersonRecord::observed(name, position, SourceKind::EmailDirectory);
    record.email = string_field(row, &["value", "email"]);
    record.profile_link = string_field(row, &["linkedin"]);
    Some(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn parses_directory_rows_and_skips_nameless_role_accounts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/domain-search"))
            .and(query_param("domain", "brightvolt.com"))
            .and(query_param("api_key", "dir-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {"domain": "brightvolt.com", "emails": [
                    {"value": "maria.gonzalez@brightvolt.com", "first_name": "Maria",
                     "last_name": "Gonzalez", "position": "CEO",
                     "linkedin": "https://pn.example/maria"},
                    {"value": "info@brightvolt.com", "first_name": null,
                     "last_name": null, "position": null},
                    {"value": "d.park@brightvolt.com", "first_name": "David",
                     "last_name": "Park", "position": "VP of Engineering"}
                ]}
            })))
            .mount(&server)
            .await;

        let adapter = EmailDirectoryAdapter::new(server.uri(), "dir-key", 5);
        let records = adapter
            .fetch("BrightVolt", Some("https://brightvolt.com"))
            .await;

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Maria Gonzalez");
        assert_eq!(records[0].email.as_deref(), Some("maria.gonzalez@brightvolt.com"));
        assert_eq!(records[0].sources, vec![SourceKind::EmailDirectory]);
        assert_eq!(records[1].email.as_deref(), Some("d.park@brightvolt.com"));
    }

    #[tokio::test]
    async fn synthesizes_domain_when_no_website_given() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/domain-search"))
            .and(query_param("domain", "brightvolt.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {"emails": []}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let adapter = EmailDirectoryAdapter::new(server.uri(), "dir-key", 5);
        assert!(adapter.fetch("BrightVolt Inc", None).await.is_empty());
    }

    #[tokio::test]
    async fn rate_limit_yields_empty_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/domain-search"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let adapter = EmailDirectoryAdapter::new(server.uri(), "dir-key", 5);
        assert!(adapter.fetch("BrightVolt", None).await.is_empty());
    }
}
