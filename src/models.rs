//! Data models for discovered opportunities.
//!
//! This module defines the core data structures used throughout the
//! application:
//! - [`Category`]: a named grouping with its web-search query
//! - [`SearchHit`]: one raw result from a search provider
//! - [`PageMeta`]: title/description metadata scraped from a result page
//! - [`Opportunity`]: a fully recorded listing, ready for rendering
//!
//! An [`Opportunity`] is created at most once per unique URL per run and is
//! immutable afterwards; it lives until the PDF and digest renderers have
//! consumed it.

use serde::{Deserialize, Serialize};

/// A search category: display name plus the query sent to the search provider.
///
/// Names may carry a decorative emoji suffix (the default table does, and
/// user-added categories get `" 🔥"` appended). Category order is
/// significant for report grouping, so the working set is always a
/// `Vec<Category>`, never a map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Display name, used as the report section header.
    pub name: String,
    /// Query string submitted to the search provider.
    pub query: String,
}

impl Category {
    pub fn new(name: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            query: query.into(),
        }
    }
}

/// One result row returned by a search provider.
///
/// Only `url` drives collection; `title` and `snippet` are carried for
/// logging since the provider's copy is often stale compared to the page
/// itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub url: String,
    pub title: String,
    pub snippet: String,
}

/// Metadata scraped from a single result page.
///
/// Both fields fall back to fixed placeholder strings when the page lacks a
/// `<title>` or a `meta[name="description"]` tag, so they are never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
}

/// A single discovered listing: the unit the PDF report and the social-media
/// digest are built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opportunity {
    /// Name of the category this listing was found under.
    pub category: String,
    /// Page title, or `"No Title"`.
    pub title: String,
    /// Page meta-description, or `"No description available."`.
    pub description: String,
    /// The page URL. Unique across the whole collected set.
    pub url: String,
}

impl Opportunity {
    /// Extract the registrable domain name (the label before the TLD) from
    /// the opportunity's URL, for compact log fields.
    /// For example: `"https://www.unicef.org/careers"` -> `"unicef"`.
    pub fn host_tag(&self) -> Option<String> {
        let parsed = url::Url::parse(&self.url).ok()?;
        let host = parsed.host_str()?;
        let parts: Vec<&str> = host.split('.').collect();
        if parts.len() >= 2 {
            Some(parts[parts.len() - 2].to_string())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_new() {
        let cat = Category::new("Agriculture 🌾", "youth opportunities in agriculture");
        assert_eq!(cat.name, "Agriculture 🌾");
        assert_eq!(cat.query, "youth opportunities in agriculture");
    }

    #[test]
    fn test_category_yaml_round_trip() {
        let yaml = r#"
- name: "Agriculture 🌾"
  query: "youth opportunities in agriculture"
- name: "Scholarships"
  query: "scholarships for young people"
"#;
        let cats: Vec<Category> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cats.len(), 2);
        assert_eq!(cats[0].name, "Agriculture 🌾");
        assert_eq!(cats[1].query, "scholarships for young people");
    }

    #[test]
    fn test_host_tag_subdomain() {
        let opp = Opportunity {
            category: "Agriculture 🌾".to_string(),
            title: "Test".to_string(),
            description: "Desc".to_string(),
            url: "https://www.unicef.org/careers".to_string(),
        };
        assert_eq!(opp.host_tag(), Some("unicef".to_string()));
    }

    #[test]
    fn test_host_tag_simple_domain() {
        let opp = Opportunity {
            category: "c".to_string(),
            title: "t".to_string(),
            description: "d".to_string(),
            url: "https://example.com/page".to_string(),
        };
        assert_eq!(opp.host_tag(), Some("example".to_string()));
    }

    #[test]
    fn test_host_tag_invalid_url() {
        let opp = Opportunity {
            category: "c".to_string(),
            title: "t".to_string(),
            description: "d".to_string(),
            url: "not a url".to_string(),
        };
        assert_eq!(opp.host_tag(), None);
    }
}
