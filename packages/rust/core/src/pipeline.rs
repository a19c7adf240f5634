//! Discovery pipeline facade.
//!
//! Orchestrate → dedup → enrich → prioritize, with the synthetic roster as
//! the terminal step when everything comes back empty. `discover_key_people`
//! never errors; every failure mode inside the stages degrades to a smaller
//! (but still valid) result.

use tracing::instrument;

use leadscout_email::EmailVerifier;
use leadscout_providers::SourceOrchestrator;
use leadscout_shared::{CompanyDomain, Discovery, PersonRecord, PipelineConfig, SourceFlags};

use crate::{dedup, enrich, fallback, prioritize};

type FallbackFn = fn(&CompanyDomain) -> Vec<PersonRecord>;

pub struct Pipeline {
    orchestrator: SourceOrchestrator,
    verifier: EmailVerifier,
    config: PipelineConfig,
    fallback: FallbackFn,
}

impl Pipeline {
    /// Assemble the pipeline from runtime config: adapters gated on their
    /// keys, verifier pointed at the email-intelligence collaborator.
    pub fn from_config(config: PipelineConfig) -> Self {
        let orchestrator = SourceOrchestrator::from_config(&config);
        let verifier = EmailVerifier::new(
            &config.email_intelligence_url,
            config.email_intelligence_key.clone(),
            config.api_timeout_secs,
        );
        Self::new(orchestrator, verifier, config)
    }

    pub fn new(orchestrator: SourceOrchestrator, verifier: EmailVerifier, config: PipelineConfig) -> Self {
        Self {
            orchestrator,
            verifier,
            config,
            fallback: fallback::roster,
        }
    }

    /// Swap the terminal fallback, mainly so tests can pin the roster.
    pub fn with_fallback(mut self, fallback: FallbackFn) -> Self {
        self.fallback = fallback;
        self
    }

    /// Discover the key people at a company. Always resolves to between 1
    /// and `max_people` records.
    #[instrument(skip_all, fields(company = %company))]
    pub async fn discover_key_people(&self, company: &str, website: Option<&str>) -> Discovery {
        let domain = CompanyDomain::resolve(company, website);
        tracing::debug!(domain = domain.as_str(), "resolved company domain");

        let collected = self.orchestrator.collect(company, website).await;
        let mut merged = dedup::dedup(collected);
        enrich::enrich_emails(&mut merged, &domain, &self.verifier).await;
        let people = prioritize::prioritize(merged, self.config.max_people);

        if people.is_empty() {
            tracing::info!(domain = domain.as_str(), "no records from any source, using fallback roster");
            let roster = (self.fallback)(&domain);
            let sources_used = SourceFlags::from_records(&roster);
            return Discovery {
                people: roster,
                sources_used,
            };
        }

        let sources_used = SourceFlags::from_records(&people);
        tracing::info!(count = people.len(), "discovery complete");
        Discovery {
            people,
            sources_used,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Config with every provider pointed at the mock server.
    fn test_config(server: &MockServer) -> PipelineConfig {
        PipelineConfig {
            max_people: 5,
            api_timeout_secs: 5,
            startup_db_timeout_secs: 5,
            scrape_timeout_secs: 5,
            max_scrape_pages: 3,
            professional_network_url: server.uri(),
            professional_network_key: Some("pn-key".into()),
            startup_database_url: server.uri(),
            startup_database_key: Some("sdb-key".into()),
            email_intelligence_url: server.uri(),
            email_intelligence_key: Some("ei-key".into()),
        }
    }

    #[tokio::test]
    async fn merges_sources_and_ranks_executives_first() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/people"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {"items": [
                    {"fullName": "Maria Gonzalez", "headline": "CEO at BrightVolt",
                     "profileURL": "https://pn.example/maria"},
                    {"fullName": "David Park", "headline": "VP of Engineering at BrightVolt"},
                    {"fullName": "Noor Haddad", "headline": "Engineering Manager at BrightVolt"}
                ]}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/autocompletes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "entities": [{"identifier": {"permalink": "brightvolt"}}]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/searches/people"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "entities": [
                    {"properties": {"name": "Maria Gonzalez",
                                    "primary_job_title": "Chief Executive Officer"}}
                ]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/domain-search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {"emails": [
                    {"value": "maria.gonzalez@brightvolt.com", "first_name": "Maria",
                     "last_name": "Gonzalez", "position": "CEO"}
                ]}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/email-verifier"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {"score": 85, "status": "deliverable"}
            })))
            .mount(&server)
            .await;
        // website paths all miss
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let pipeline = Pipeline::from_config(test_config(&server));
        let uri = server.uri();
        let result = pipeline
            .discover_key_people("BrightVolt", Some(uri.as_str()))
            .await;

        assert!(!result.people.is_empty());
        assert!(result.people.len() <= 5);

        // one merged Maria, ranked first, with the observed address
        let maria = &result.people[0];
        assert_eq!(maria.name, "Maria Gonzalez");
        assert_eq!(maria.position, "Chief Executive Officer");
        assert_eq!(maria.email.as_deref(), Some("maria.gonzalez@brightvolt.com"));
        assert_eq!(
            result.people.iter().filter(|p| p.name == "Maria Gonzalez").count(),
            1
        );

        assert!(result.sources_used.professional_network);
        assert!(result.sources_used.startup_database);
        assert!(result.sources_used.email_directory);
        assert!(!result.sources_used.website_scrape);

        // everyone surviving has an email on the resolved domain
        assert!(result
            .people
            .iter()
            .all(|p| p.email.as_deref().is_some_and(|e| e.contains('@'))));
    }

    #[tokio::test]
    async fn all_sources_failing_yields_the_fallback_roster() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let pipeline = Pipeline::from_config(test_config(&server));
        let uri = server.uri();
        let result = pipeline
            .discover_key_people("Ghost Ship Ventures", Some(uri.as_str()))
            .await;

        assert!((3..=5).contains(&result.people.len()));
        assert!(result.sources_used.all_false());

        let domain = CompanyDomain::resolve("Ghost Ship Ventures", Some(uri.as_str()));
        for person in &result.people {
            let email = person.email.as_deref().unwrap();
            assert!(email.contains(domain.as_str()));
        }
    }

    #[tokio::test]
    async fn custom_fallback_is_used_when_injected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        fn pinned(domain: &CompanyDomain) -> Vec<PersonRecord> {
            vec![PersonRecord {
                name: "Pinned Person".into(),
                position: "CEO".into(),
                email: Some(format!("pinned@{}", domain.as_str())),
                profile_link: None,
                department: leadscout_shared::Department::Executive,
                sources: Vec::new(),
            }]
        }

        let pipeline = Pipeline::from_config(test_config(&server)).with_fallback(pinned);
        let uri = server.uri();
        let result = pipeline.discover_key_people("Acme", Some(uri.as_str())).await;

        assert_eq!(result.people.len(), 1);
        assert_eq!(result.people[0].name, "Pinned Person");
    }

    #[tokio::test]
    async fn result_is_always_bounded_between_one_and_max() {
        let server = MockServer::start().await;
        let rows: Vec<serde_json::Value> = ["Adams", "Baker", "Clark", "Davis", "Evans", "Frost", "Gates", "Hill", "Irwin"]
            .iter()
            .map(|last| {
                serde_json::json!({
                    "value": format!("casey.{}@acme.com", last.to_lowercase()),
                    "first_name": "Casey",
                    "last_name": last,
                    "position": "Engineer"
                })
            })
            .collect();
        Mock::given(method("GET"))
            .and(path("/domain-search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {"emails": rows}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let pipeline = Pipeline::from_config(test_config(&server));
        let uri = server.uri();
        let result = pipeline.discover_key_people("Acme", Some(uri.as_str())).await;

        assert!((1..=5).contains(&result.people.len()));
        assert!(result.sources_used.email_directory);
    }
}
