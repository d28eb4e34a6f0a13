//! Serper.dev search provider (Google results over a JSON API).

use crate::models::SearchHit;
use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info, instrument};

const SERPER_ENDPOINT: &str = "https://google.serper.dev/search";

#[derive(Debug, Deserialize)]
struct SerperResponse {
    #[serde(default)]
    organic: Vec<SerperOrganic>,
}

#[derive(Debug, Deserialize)]
struct SerperOrganic {
    #[serde(default)]
    link: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
}

/// Run one search query against Serper and return up to `max_results` hits.
///
/// Only organic results are considered; rows without an `http(s)` link are
/// dropped.
#[instrument(level = "info", skip(client, api_key))]
pub async fn search(
    client: &reqwest::Client,
    api_key: &str,
    query: &str,
    max_results: usize,
) -> Result<Vec<SearchHit>> {
    let body = serde_json::json!({
        "q": query,
        "num": max_results,
    });

    let resp = client
        .post(SERPER_ENDPOINT)
        .header("X-API-KEY", api_key)
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .await
        .context("Serper API request failed")?;

    let data: SerperResponse = resp
        .error_for_status()
        .context("Serper API returned an error status")?
        .json()
        .await
        .context("Failed to parse Serper response")?;

    let hits: Vec<SearchHit> = data
        .organic
        .into_iter()
        .filter(|r| r.link.starts_with("http"))
        .take(max_results)
        .map(|r| SearchHit {
            url: r.link,
            title: r.title,
            snippet: r.snippet,
        })
        .collect();

    info!(query, count = hits.len(), "Serper search complete");
    debug!(urls = ?hits.iter().map(|h| h.url.as_str()).collect::<Vec<_>>(), "Serper URLs");
    Ok(hits)
}
