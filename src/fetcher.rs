//! Network access behind one seam.
//!
//! [`ContentFetcher`] is the single trait the collection pipeline talks to;
//! [`WebFetcher`] is the production implementation over reqwest. Tests swap
//! in a mock so the pipeline logic runs without touching the network.

use std::time::Duration;

use crate::models::{PageMeta, SearchHit};
use crate::scrape;
use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

/// Browser-like User-Agent. The DuckDuckGo HTML endpoint and a fair number
/// of opportunity sites serve empty or blocked pages to default library
/// agents.
const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/120.0.0.0 Safari/537.36";

/// Search and page-fetch operations the collector depends on.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Run one search query and return up to `max_results` hits.
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>>;

    /// Fetch a page and extract its title and meta description.
    async fn page_meta(&self, url: &str) -> Result<PageMeta>;
}

/// Which search backend to query.
pub enum SearchProvider {
    /// Serper.dev Google results, requires an API key.
    Serper { api_key: String },
    /// Keyless DuckDuckGo HTML scrape.
    DuckDuckGo,
}

/// Production fetcher over a shared reqwest client.
pub struct WebFetcher {
    client: reqwest::Client,
    provider: SearchProvider,
}

impl WebFetcher {
    pub fn new(provider: SearchProvider, fetch_timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(fetch_timeout)
            .build()
            .context("building HTTP client")?;
        Ok(Self { client, provider })
    }
}

#[async_trait]
impl ContentFetcher for WebFetcher {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>> {
        match &self.provider {
            SearchProvider::Serper { api_key } => {
                crate::search::serper::search(&self.client, api_key, query, max_results).await
            }
            SearchProvider::DuckDuckGo => {
                crate::search::duckduckgo::search(&self.client, query, max_results).await
            }
        }
    }

    async fn page_meta(&self, url: &str) -> Result<PageMeta> {
        debug!(url, "fetching page metadata");
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("requesting {url}"))?
            .error_for_status()
            .with_context(|| format!("fetching {url}"))?;
        let body = resp
            .text()
            .await
            .with_context(|| format!("reading body of {url}"))?;
        // Parse after the last await; scraper's document type is !Send.
        Ok(scrape::page_meta(&body))
    }
}
