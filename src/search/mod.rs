//! Web-search providers for discovering opportunity pages.
//!
//! Each provider module exports one `search(client, ..)` function returning
//! a bounded list of [`crate::models::SearchHit`]s. Provider choice is made
//! once at startup by [`crate::fetcher::WebFetcher`]:
//!
//! | Provider | Module | Method | Notes |
//! |----------|--------|--------|-------|
//! | Serper | [`serper`] | JSON API (`POST google.serper.dev/search`) | Google results; needs `SERPER_API_KEY` |
//! | DuckDuckGo | [`duckduckgo`] | HTML scraping (`POST html.duckduckgo.com/html/`) | Keyless fallback; result links unwrapped from `uddg=` redirects |
//!
//! Providers share the failure policy of the rest of the pipeline: an error
//! is returned to the collector, which logs it and skips the category.

pub mod duckduckgo;
pub mod serper;
