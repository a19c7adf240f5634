//! Professional-network people search.
//!
//! Issues a keyword search ("{company} executives") against a hosted
//! people-search API and keeps results whose headline mentions the company.
//! Upstream payloads are not stable: the result array has appeared under
//! `data`, `elements` and `results` envelopes, and field names drift between
//! camelCase and snake_case, so parsing goes through tolerant helpers.

use async_trait::async_trait;

use leadscout_shared::{LeadScoutError, PersonRecord, Result, SourceKind};

use crate::{apply_relevance_filter, build_client, payload_items, string_field, ProviderAdapter};

pub struct ProfessionalNetworkAdapter {
    base_url: String,
    api_key: String,
    timeout_secs: u64,
}

impl ProfessionalNetworkAdapter {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            api_key: api_key.into(),
            timeout_secs,
        }
    }

    async fn search(&self, company: &str) -> Result<Vec<PersonRecord>> {
        let client = build_client(self.timeout_secs)
            .ok_or_else(|| LeadScoutError::Network("client setup failed".into()))?;

        let url = format!("{}/search/people", self.base_url);
        let keywords = format!("{company} executives");
        let response = client
            .get(&url)
            .query(&[("keywords", keywords.as_str()), ("start", "0")])
            .header("x-rapidapi-key", &self.api_key)
            .send()
            .await
            .map_err(|e| LeadScoutError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LeadScoutError::Network(format!(
                "people search returned {status}"
            )));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| LeadScoutError::parse(e.to_string()))?;

        let records: Vec<PersonRecord> = payload_items(&payload)
            .iter()
            .filter_map(|item| parse_person(item))
            .collect();

        let company_lower = company.to_lowercase();
        Ok(apply_relevance_filter(records, |r| {
            r.position.to_lowercase().contains(&company_lower)
        }))
    }
}

#[async_trait]
impl ProviderAdapter for ProfessionalNetworkAdapter {
    fn kind(&self) -> SourceKind {
        SourceKind::ProfessionalNetwork
    }

    async fn fetch(&self, company: &str, _website: Option<&str>) -> Vec<PersonRecord> {
        match self.search(company).await {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(error = %err, "professional network search failed");
                Vec::new()
            }
        }
    }
}

fn parse_person(item: &serde_json::Value) -> Option<PersonRecord> {
    let name = string_field(item, &["fullName", "full_name", "name"]).or_else(|| {
        let first = string_field(item, &["firstName", "first_name"])?;
        let last = string_field(item, &["lastName", "last_name"])?;
        Some(format!("{first} {last}"))
    })?;
    let position = string_field(item, &["headline", "position", "title", "jobTitle"])?;

    if !leadscout_extract::is_valid_name(&name) {
        return None;
    }

    let mut record = PersonRecord::observed(name, position, SourceKind::ProfessionalNetwork);
    record.profile_link = string_field(item, &["profileURL", "profile_url", "url", "link"]);
    Some(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn parses_search_results_and_filters_on_headline() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/people"))
            .and(query_param("keywords", "Acme executives"))
            .and(header("x-rapidapi-key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {"items": [
                    {"fullName": "Maria Gonzalez", "headline": "CEO at Acme", "profileURL": "https://pn.example/maria"},
                    {"fullName": "David Park", "headline": "CTO at Acme"},
                    {"fullName": "Alan Reed", "headline": "VP Sales at Acme"},
                    {"fullName": "Unrelated Person", "headline": "Barista at Coffee Co"}
                ]}
            })))
            .mount(&server)
            .await;

        let adapter = ProfessionalNetworkAdapter::new(server.uri(), "test-key", 5);
        let records = adapter.fetch("Acme", None).await;

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].name, "Maria Gonzalez");
        assert_eq!(records[0].profile_link.as_deref(), Some("https://pn.example/maria"));
        assert!(records.iter().all(|r| r.sources == vec![SourceKind::ProfessionalNetwork]));
    }

    #[tokio::test]
    async fn handles_snake_case_fields_under_elements_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/people"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "elements": [
                    {"first_name": "Yuki", "last_name": "Tanaka", "position": "Head of Product"}
                ]
            })))
            .mount(&server)
            .await;

        let adapter = ProfessionalNetworkAdapter::new(server.uri(), "k", 5);
        let records = adapter.fetch("Acme", None).await;

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Yuki Tanaka");
        assert_eq!(records[0].position, "Head of Product");
    }

    #[tokio::test]
    async fn upstream_error_yields_empty_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/people"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let adapter = ProfessionalNetworkAdapter::new(server.uri(), "k", 5);
        assert!(adapter.fetch("Acme", None).await.is_empty());
    }

    #[tokio::test]
    async fn garbage_payload_yields_empty_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/people"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let adapter = ProfessionalNetworkAdapter::new(server.uri(), "k", 5);
        assert!(adapter.fetch("Acme", None).await.is_empty());
    }
}
