//! Collection pipeline: one search per category, one fetch per new URL.
//!
//! Everything runs sequentially in category order, so report grouping is
//! deterministic and no provider gets hammered. Failures never abort the
//! run; a failed search drops its category, a failed fetch drops its URL.

use std::collections::HashSet;

use crate::fetcher::ContentFetcher;
use crate::ledger::SeenLedger;
use crate::models::{Category, Opportunity};
use tracing::{debug, info, instrument, warn};

/// Caps on how much one run collects.
#[derive(Debug, Clone, Copy)]
pub struct CollectLimits {
    /// Search results requested per category.
    pub per_category: usize,
    /// Hard ceiling on opportunities across all categories.
    pub max_total: usize,
}

/// Walk the categories and build the opportunity list for this run.
///
/// A URL yields at most one opportunity, attributed to the first category it
/// was found under. URLs already in the ledger are skipped. Collection stops
/// as soon as `limits.max_total` opportunities are recorded, even mid
/// category.
#[instrument(level = "info", skip_all, fields(categories = categories.len()))]
pub async fn collect_opportunities(
    fetcher: &dyn ContentFetcher,
    categories: &[Category],
    limits: CollectLimits,
    ledger: &SeenLedger,
) -> Vec<Opportunity> {
    let mut opportunities: Vec<Opportunity> = Vec::new();
    let mut seen_urls: HashSet<String> = HashSet::new();

    for category in categories {
        if opportunities.len() >= limits.max_total {
            info!(max = limits.max_total, "Reached opportunity cap, stopping");
            break;
        }
        info!(category = %category.name, query = %category.query, "Searching category");
        let hits = match fetcher.search(&category.query, limits.per_category).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!(category = %category.name, error = %e, "Search failed, skipping category");
                continue;
            }
        };
        debug!(category = %category.name, hits = hits.len(), "Search returned");

        for hit in hits {
            if opportunities.len() >= limits.max_total {
                break;
            }
            if seen_urls.contains(&hit.url) || ledger.contains(&hit.url) {
                debug!(url = %hit.url, "Already seen, skipping");
                continue;
            }
            let meta = match fetcher.page_meta(&hit.url).await {
                Ok(meta) => meta,
                Err(e) => {
                    warn!(url = %hit.url, error = %e, "Fetch failed, skipping URL");
                    continue;
                }
            };
            // Only successful fetches count as seen; a URL that failed here
            // may still be picked up under a later category.
            seen_urls.insert(hit.url.clone());
            let opportunity = Opportunity {
                category: category.name.clone(),
                title: meta.title,
                description: meta.description,
                url: hit.url,
            };
            info!(
                category = %opportunity.category,
                title = %opportunity.title,
                host = %opportunity.host_tag().unwrap_or_default(),
                "Recorded opportunity"
            );
            opportunities.push(opportunity);
        }
    }

    info!(count = opportunities.len(), "Collection finished");
    opportunities
}
