//! Concurrent fan-out across source adapters.

use std::sync::Arc;
use std::time::Instant;

use tracing::instrument;

use leadscout_shared::{PersonRecord, PipelineConfig};

use crate::{
    EmailDirectoryAdapter, ProfessionalNetworkAdapter, ProviderAdapter, StartupDatabaseAdapter,
    WebsiteScrapeAdapter,
};

/// Runs every configured adapter concurrently and concatenates their
/// results. Adapters without an API key are never constructed; the website
/// scraper needs no credentials and is always present.
pub struct SourceOrchestrator {
    adapters: Vec<Arc<dyn ProviderAdapter>>,
}

impl SourceOrchestrator {
    pub fn new(adapters: Vec<Arc<dyn ProviderAdapter>>) -> Self {
        Self { adapters }
    }

    /// Assemble the adapter set from runtime config, gating each keyed
    /// source on its credential.
    pub fn from_config(config: &PipelineConfig) -> Self {
        let mut adapters: Vec<Arc<dyn ProviderAdapter>> = Vec::new();

        if let Some(key) = &config.professional_network_key {
            adapters.push(Arc::new(ProfessionalNetworkAdapter::new(
                &config.professional_network_url,
                key,
                config.api_timeout_secs,
            )));
        } else {
            tracing::debug!("professional network adapter disabled, no api key");
        }

        if let Some(key) = &config.startup_database_key {
            adapters.push(Arc::new(StartupDatabaseAdapter::new(
                &config.startup_database_url,
                key,
                config.startup_db_timeout_secs,
            )));
        } else {
            tracing::debug!("startup database adapter disabled, no api key");
        }

        adapters.push(Arc::new(WebsiteScrapeAdapter::new(
            config.scrape_timeout_secs,
            config.max_scrape_pages,
        )));

        if let Some(key) = &config.email_intelligence_key {
            adapters.push(Arc::new(EmailDirectoryAdapter::new(
                &config.email_intelligence_url,
                key,
                config.api_timeout_secs,
            )));
        } else {
            tracing::debug!("email directory adapter disabled, no api key");
        }

        Self::new(adapters)
    }

    /// Fan out to all adapters and collect their records in adapter order.
    /// A panicking adapter task is logged and treated as an empty source.
    #[instrument(skip_all, fields(company = %company, adapters = self.adapters.len()))]
    pub async fn collect(&self, company: &str, website: Option<&str>) -> Vec<PersonRecord> {
        let mut handles = Vec::with_capacity(self.adapters.len());
        for adapter in &self.adapters {
            let adapter = Arc::clone(adapter);
            let company = company.to_owned();
            let website = website.map(str::to_owned);
            handles.push(tokio::spawn(async move {
                let started = Instant::now();
                let records = adapter.fetch(&company, website.as_deref()).await;
                (adapter.kind(), records, started.elapsed())
            }));
        }

        let mut collected = Vec::new();
        for handle in handles {
            match handle.await {
                Ok((kind, records, elapsed)) => {
                    tracing::debug!(
                        source = kind.as_str(),
                        count = records.len(),
                        elapsed_ms = elapsed.as_millis() as u64,
                        "adapter finished"
                    );
                    collected.extend(records);
                }
                Err(err) => {
                    tracing::warn!(error = %err, "adapter task failed");
                }
            }
        }

        tracing::info!(total = collected.len(), "source collection complete");
        collected
    }
}
