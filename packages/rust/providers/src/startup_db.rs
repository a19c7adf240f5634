//! Startup-database people lookup.
//!
//! Two requests per discovery: an autocomplete call resolves the company
//! name to an organization identifier, then a people search scoped to that
//! organization returns members ordered by the provider's relevance rank.
//! If the organization cannot be resolved the adapter gives up quietly;
//! searching people without the scope returns mostly noise.

use async_trait::async_trait;

use leadscout_shared::{LeadScoutError, PersonRecord, Result, SourceKind};

use crate::{apply_relevance_filter, build_client, payload_items, string_field, ProviderAdapter};

pub struct StartupDatabaseAdapter {
    base_url: String,
    api_key: String,
    timeout_secs: u64,
}

impl StartupDatabaseAdapter {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            api_key: api_key.into(),
            timeout_secs,
        }
    }

    async fn get_json(&self, client: &reqwest::Client, url: &str, query: &[(&str, &str)]) -> Result<serde_json::Value> {
        let response = client
            .get(url)
            .query(query)
            .header("X-cb-user-key", &self.api_key)
            .send()
            .await
            .map_err(|e| LeadScoutError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LeadScoutError::Network(format!("startup database returned {status}")));
        }
        response
            .json()
            .await
            .map_err(|e| LeadScoutError::parse(e.to_string()))
    }

    /// Step one: resolve the company name to an organization permalink.
    async fn resolve_organization(&self, client: &reqwest::Client, company: &str) -> Result<Option<String>> {
        let url = format!("{}/autocompletes", self.base_url);
        let payload = self
            .get_json(client, &url, &[("query", company), ("collection_ids", "organizations")])
            .await?;

        let permalink = payload_items(&payload).into_iter().find_map(|entity| {
            entity
                .get("identifier")
                .and_then(|id| string_field(id, &["permalink"]))
                .or_else(|| string_field(&entity, &["permalink"]))
        });
        Ok(permalink)
    }

    /// Step two: people search scoped to the resolved organization.
    async fn search_people(&self, client: &reqwest::Client, org_id: &str) -> Result<Vec<PersonRecord>> {
        let url = format!("{}/searches/people", self.base_url);
        let payload = self
            .get_json(
                client,
                &url,
                &[("organization_ids", org_id), ("order", "rank")],
            )
            .await?;

        Ok(payload_items(&payload)
            .iter()
            .filter_map(|entity| parse_person(entity))
            .collect())
    }

    async fn lookup(&self, company: &str) -> Result<Vec<PersonRecord>> {
        let client = build_client(self.timeout_secs)
            .ok_or_else(|| LeadScoutError::Network("client setup failed".into()))?;

        let Some(org_id) = self.resolve_organization(&client, company).await? else {
            tracing::debug!(company, "no organization match in startup database");
            return Ok(Vec::new());
        };
        tracing::debug!(company, org_id, "resolved organization");
        let records = self.search_people(&client, &org_id).await?;

        // The org scope already narrows the search, but rank-ordered people
        // payloads can still run long; the shared filter caps them the same
        // way the professional-network adapter does.
        let company_lower = company.to_lowercase();
        Ok(apply_relevance_filter(records, |r| {
            r.position.to_lowercase().contains(&company_lower)
        }))
    }
}

#[async_trait]
impl ProviderAdapter for StartupDatabaseAdapter {
    fn kind(&self) -> SourceKind {
        SourceKind::StartupDatabase
    }

    async fn fetch(&self, company: &str, _website: Option<&str>) -> Vec<PersonRecord> {
        match self.lookup(company).await {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(error = %err, "startup database lookup failed");
                Vec::new()
            }
        }
    }
}

fn parse_person(entity: &serde_json::Value) -> Option<PersonRecord> {
    // entities nest fields under "properties"; flat payloads carry them
    // at the top level
    let item = entity.get("properties").unwrap_or(entity);

    let name = string_field(item, &["name", "full_name"]).or_else(|| {
        entity
            .get("identifier")
            .and_then(|id| string_field(id, &["value"]))
    })?;
    let position = string_field(item, &["primary_job_title", "title", "position"])?;

    if !leadscout_extract::is_valid_name(&name) {
        return None;
    }

    let mut record = PersonRecord::observed(name, position, SourceKind::StartupDatabase);
    record.profile_link = string_field(item, &["linkedin", "profile_url", "url"]);
    Some(record)
}
