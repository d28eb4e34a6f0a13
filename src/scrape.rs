//! Result-page metadata extraction.
//!
//! Pulls the two fields a report entry needs from raw HTML: the `<title>`
//! text and the `meta[name="description"]` content. Only the standard meta
//! description is consulted, no OpenGraph fallback. Missing or empty values
//! fall back to fixed placeholder strings so downstream formatting never
//! sees an empty field.

use crate::models::PageMeta;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

/// Placeholder title for pages without a usable `<title>`.
pub const NO_TITLE: &str = "No Title";
/// Placeholder description for pages without a usable meta description.
pub const NO_DESCRIPTION: &str = "No description available.";

static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("title").unwrap());
static META_DESCRIPTION_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[name="description"]"#).unwrap());

/// Extract title and meta-description from a result page.
///
/// Infallible: a page that parses to nothing useful still yields the
/// placeholder strings, and `Html::parse_document` itself never fails on
/// malformed input.
pub fn page_meta(html: &str) -> PageMeta {
    let document = Html::parse_document(html);

    let title = document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| NO_TITLE.to_string());

    let description = document
        .select(&META_DESCRIPTION_SELECTOR)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| NO_DESCRIPTION.to_string());

    PageMeta { title, description }
}
