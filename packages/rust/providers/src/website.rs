//! Company-website scraping.
//!
//! Walks a fixed list of likely team/about paths under the company site and
//! runs each page through the extraction strategy chain. Pages that 404 or
//! time out are skipped; the walk stops early once enough candidates have
//! accumulated. Without a website hint the adapter falls back to the domain
//! synthesized from the company name, which simply yields nothing when the
//! guess is wrong.

use async_trait::async_trait;

use leadscout_extract::StrategyChain;
use leadscout_shared::{CompanyDomain, PersonRecord, SourceKind};

use crate::{build_client, ProviderAdapter};

/// Paths probed under the site root, in order.
const PAGE_PATHS: &[&str] = &[
    "/team",
    "/about",
    "/about-us",
    "/leadership",
    "/management",
    "/executives",
    "/staff",
    "/people",
    "/our-team",
    "/founders",
    "/board",
];

/// Stop probing further pages once this many candidates are in hand.
const CANDIDATE_CAP: usize = 10;

pub struct WebsiteScrapeAdapter {
    chain: StrategyChain,
    timeout_secs: u64,
    max_pages: usize,
}

impl WebsiteScrapeAdapter {
    pub fn new(timeout_secs: u64, max_pages: usize) -> Self {
        Self {
            chain: StrategyChain::new(),
            timeout_secs,
            max_pages,
        }
    }

    /// Site root the page paths are appended to. Anything after the host is
    /// dropped so a hint like "acme.com/home" still probes "/team" at the
    /// root rather than under "/home".
    fn base_url(company: &str, website: Option<&str>) -> String {
        let Some(site) = website else {
            return format!("https://{}", CompanyDomain::resolve(company, None).as_str());
        };
        let (scheme, rest) = match site.split_once("://") {
            Some(("http", rest)) => ("http", rest),
            Some((_, rest)) => ("https", rest),
            None => ("https", site),
        };
        let host = rest.split_once('/').map_or(rest, |(host, _)| host);
        format!("{scheme}://{host}")
    }

    async fn fetch_page(&self, client: &reqwest::Client, url: &str) -> Option<String> {
        let response = match client.get(url).send().await {
            Ok(r) => r,
            Err(err) => {
                tracing::debug!(url, error = %err, "page fetch failed");
                return None;
            }
        };
        if !response.status().is_success() {
            tracing::debug!(url, status = %response.status(), "page fetch rejected");
            return None;
        }
        response.text().await.ok()
    }
}

#[async_trait]
impl ProviderAdapter for WebsiteScrapeAdapter {
    fn kind(&self) -> SourceKind {
        SourceKind::WebsiteScrape
    }

    async fn fetch(&self, company: &str, website: Option<&str>) -> Vec<PersonRecord> {
        let Some(client) = build_client(self.timeout_secs) else {
            return Vec::new();
        };
        let base = Self::base_url(company, website);

        let mut records: Vec<PersonRecord> = Vec::new();
        for path in PAGE_PATHS.iter().take(self.max_pages) {
            let url = format!("{base}{path}");
            let Some(html) = self.fetch_page(&client, &url).await else {
                continue;
            };

            let candidates = self.chain.extract(&html);
            tracing::debug!(url, count = candidates.len(), "scraped page");
            for candidate in candidates {
                if records.iter().any(|r| r.name.eq_ignore_ascii_case(&candidate.name)) {
                    continue;
                }
                let mut record =
                    PersonRecord::observed(candidate.name, candidate.title, SourceKind::WebsiteScrape);
                record.email = candidate.email;
                records.push(record);
            }

            if records.len() >= CANDIDATE_CAP {
                break;
            }
        }
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TEAM_PAGE: &str = include_str!("../../../../fixtures/html/team-page.html");

    #[tokio::test]
    async fn scrapes_team_page_and_skips_missing_paths() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/team"))
            .respond_with(ResponseTemplate::new(200).set_body_string(TEAM_PAGE))
            .mount(&server)
            .await;
        // every other path 404s
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let adapter = WebsiteScrapeAdapter::new(5, 6);
        let uri = server.uri();
        let records = adapter.fetch("BrightVolt", Some(uri.as_str())).await;

        assert!(!records.is_empty());
        let maria = records
            .iter()
            .find(|r| r.name == "Maria Gonzalez")
            .unwrap();
        assert_eq!(maria.email.as_deref(), Some("maria.gonzalez@brightvolt.com"));
        assert_eq!(maria.sources, vec![SourceKind::WebsiteScrape]);
    }

    #[tokio::test]
    async fn deduplicates_people_seen_on_multiple_pages() {
        let server = MockServer::start().await;
        for page in ["/team", "/about"] {
            Mock::given(method("GET"))
                .and(path(page))
                .respond_with(ResponseTemplate::new(200).set_body_string(TEAM_PAGE))
                .mount(&server)
                .await;
        }
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let adapter = WebsiteScrapeAdapter::new(5, 6);
        let uri = server.uri();
        let records = adapter.fetch("BrightVolt", Some(uri.as_str())).await;

        let marias = records.iter().filter(|r| r.name == "Maria Gonzalez").count();
        assert_eq!(marias, 1);
    }

    #[tokio::test]
    async fn unreachable_site_yields_empty_list() {
        let adapter = WebsiteScrapeAdapter::new(1, 2);
        let records = adapter
            .fetch("Nonexistent", Some("http://127.0.0.1:1"))
            .await;
        assert!(records.is_empty());
    }

    #[test]
    fn base_url_normalizes_scheme_and_falls_back_to_synthesized_domain() {
        assert_eq!(
            WebsiteScrapeAdapter::base_url("Acme", Some("https://acme.io/")),
            "https://acme.io"
        );
        assert_eq!(
            WebsiteScrapeAdapter::base_url("Acme", Some("acme.io")),
            "https://acme.io"
        );
        assert_eq!(
            WebsiteScrapeAdapter::base_url("Acme", Some("acme.io/home")),
            "https://acme.io"
        );
        assert_eq!(
            WebsiteScrapeAdapter::base_url("Acme", Some("http://acme.io/about/index.html")),
            "http://acme.io"
        );
        assert_eq!(
            WebsiteScrapeAdapter::base_url("Acme Inc", None),
            "https://acme.com"
        );
    }
}
