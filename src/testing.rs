// Test mocks for the collection pipeline.
//
// MockFetcher implements ContentFetcher over in-memory maps so collector
// tests run without the network. Builder pattern: `.on_search()`,
// `.on_page()`, `.fail_page()`. Unregistered queries and URLs return `Err`,
// which doubles as the simulated-failure path for search.

use std::collections::{HashMap, HashSet};

use anyhow::{bail, Result};
use async_trait::async_trait;

use crate::fetcher::ContentFetcher;
use crate::models::{PageMeta, SearchHit};

/// Build a search hit for a URL; title and snippet are irrelevant to the
/// collector, which re-scrapes every page.
pub fn hit(url: &str) -> SearchHit {
    SearchHit {
        url: url.to_string(),
        title: "result".to_string(),
        snippet: String::new(),
    }
}

pub struct MockFetcher {
    searches: HashMap<String, Vec<SearchHit>>,
    pages: HashMap<String, PageMeta>,
    failing_pages: HashSet<String>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self {
            searches: HashMap::new(),
            pages: HashMap::new(),
            failing_pages: HashSet::new(),
        }
    }

    pub fn on_search(mut self, query: &str, hits: Vec<SearchHit>) -> Self {
        self.searches.insert(query.to_string(), hits);
        self
    }

    pub fn on_page(mut self, url: &str, title: &str, description: &str) -> Self {
        self.pages.insert(
            url.to_string(),
            PageMeta {
                title: title.to_string(),
                description: description.to_string(),
            },
        );
        self
    }

    pub fn fail_page(mut self, url: &str) -> Self {
        self.failing_pages.insert(url.to_string());
        self
    }
}

#[async_trait]
impl ContentFetcher for MockFetcher {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>> {
        match self.searches.get(query) {
            Some(hits) => Ok(hits.iter().take(max_results).cloned().collect()),
            None => bail!("MockFetcher: no search registered for {query}"),
        }
    }

    async fn page_meta(&self, url: &str) -> Result<PageMeta> {
        if self.failing_pages.contains(url) {
            bail!("MockFetcher: simulated fetch failure for {url}");
        }
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("MockFetcher: no page registered for {url}"))
    }
}
