//! DuckDuckGo HTML search provider.
//!
//! Keyless fallback used when no Serper API key is configured. Queries the
//! plain-HTML endpoint (`html.duckduckgo.com/html/`) and scrapes the result
//! list. DuckDuckGo wraps destination URLs in redirect links carrying a
//! percent-encoded `uddg=` parameter, which [`unwrap_redirect`] undoes.

use crate::models::SearchHit;
use anyhow::{bail, Context, Result};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{info, instrument};

const DDG_ENDPOINT: &str = "https://html.duckduckgo.com/html/";

static RESULT_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse(".result").unwrap());
static LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a.result__a").unwrap());
static SNIPPET_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a.result__snippet, .result__snippet").unwrap());

/// Run one search query against DuckDuckGo and return up to `max_results`
/// hits.
#[instrument(level = "info", skip(client))]
pub async fn search(
    client: &reqwest::Client,
    query: &str,
    max_results: usize,
) -> Result<Vec<SearchHit>> {
    let resp = client
        .post(DDG_ENDPOINT)
        .form(&[("q", query)])
        .header("Accept", "text/html")
        .send()
        .await
        .context("DuckDuckGo search request failed")?;

    if !resp.status().is_success() {
        bail!("DuckDuckGo search returned HTTP {}", resp.status());
    }

    let body = resp
        .text()
        .await
        .context("reading DuckDuckGo response body")?;

    let hits = parse_results(&body, max_results);
    info!(query, count = hits.len(), "DuckDuckGo search complete");
    Ok(hits)
}

/// Extract result rows from the DuckDuckGo HTML page.
///
/// Parsing stays in a sync helper: scraper's `Html` is `!Send` and must not
/// be held across an await point.
fn parse_results(body: &str, max_results: usize) -> Vec<SearchHit> {
    let document = Html::parse_document(body);
    let mut hits = Vec::new();

    for result in document.select(&RESULT_SELECTOR) {
        if hits.len() >= max_results {
            break;
        }
        let Some(anchor) = result.select(&LINK_SELECTOR).next() else {
            continue;
        };
        let title = anchor.text().collect::<String>().trim().to_string();
        let url = unwrap_redirect(anchor.value().attr("href").unwrap_or(""));
        // Ad rows and tracking stubs surface as non-http hrefs; drop them.
        if title.is_empty() || !url.starts_with("http") {
            continue;
        }
        let snippet = result
            .select(&SNIPPET_SELECTOR)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();
        hits.push(SearchHit { url, title, snippet });
    }

    hits
}

/// Unwrap a DuckDuckGo redirect link.
///
/// Result anchors point at
/// `//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com%2Fpage&rut=...`;
/// the destination is the percent-decoded `uddg` parameter. Links without
/// the parameter are returned unchanged.
fn unwrap_redirect(href: &str) -> String {
    if let Some(pos) = href.find("uddg=") {
        let start = pos + 5;
        let end = href[start..]
            .find('&')
            .map(|i| start + i)
            .unwrap_or(href.len());
        let encoded = &href[start..end];
        if !encoded.is_empty() {
            if let Ok(decoded) = urlencoding::decode(encoded) {
                return decoded.into_owned();
            }
        }
    }
    href.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"
    <html><body>
      <div class="result">
        <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.org%2Ffellowship&rut=abc123">Youth Fellowship</a>
        <a class="result__snippet">Apply now for the fellowship.</a>
      </div>
      <div class="result">
        <a class="result__a" href="https://example.com/direct">Direct Result</a>
        <div class="result__snippet">No redirect on this one.</div>
      </div>
      <div class="result">
        <a class="result__a" href="javascript:void(0)">Sponsored Junk</a>
      </div>
      <div class="result">
        <a class="result__a" href="https://example.net/third">Third</a>
      </div>
    </body></html>
    "##;

    #[test]
    fn test_unwrap_redirect_with_trailing_params() {
        assert_eq!(
            unwrap_redirect("//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.org%2Fa&rut=xyz"),
            "https://example.org/a"
        );
    }

    #[test]
    fn test_unwrap_redirect_without_trailing_params() {
        assert_eq!(
            unwrap_redirect("//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.org"),
            "https://example.org"
        );
    }

    #[test]
    fn test_unwrap_redirect_passthrough() {
        assert_eq!(
            unwrap_redirect("https://example.com/direct"),
            "https://example.com/direct"
        );
    }

    #[test]
    fn test_unwrap_redirect_empty_param() {
        assert_eq!(unwrap_redirect("//duckduckgo.com/l/?uddg=&rut=x"), "//duckduckgo.com/l/?uddg=&rut=x");
    }

    #[test]
    fn test_parse_results_decodes_and_filters() {
        let hits = parse_results(SAMPLE, 10);
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].url, "https://example.org/fellowship");
        assert_eq!(hits[0].title, "Youth Fellowship");
        assert_eq!(hits[0].snippet, "Apply now for the fellowship.");
        assert_eq!(hits[1].url, "https://example.com/direct");
        // The javascript: row is dropped entirely.
        assert_eq!(hits[2].url, "https://example.net/third");
    }

    #[test]
    fn test_parse_results_respects_cap() {
        let hits = parse_results(SAMPLE, 2);
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_parse_results_empty_page() {
        assert!(parse_results("<html><body></body></html>", 10).is_empty());
    }
}
