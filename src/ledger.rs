//! Persistent record of URLs already reported.
//!
//! The ledger (`opportunities_seen.json`) lives in the output directory and
//! holds every URL that made it into a report, so later runs skip listings
//! they have already surfaced. Reports written before the ledger existed
//! carry that state only in their own `Link:` lines; when no ledger file is
//! found, [`SeenLedger::import_legacy_reports`] recovers those lines from any
//! report PDFs in the directory and folds them in, so the next save makes the
//! PDF scan unnecessary.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

pub const LEDGER_FILE_NAME: &str = "opportunities_seen.json";

static LINK_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Link:\s*(https?://\S+)").unwrap());

/// On-disk shape of the ledger file.
#[derive(Debug, Serialize, Deserialize)]
struct LedgerFile {
    updated_at: DateTime<Utc>,
    urls: Vec<String>,
}

/// The set of URLs reported by previous runs.
pub struct SeenLedger {
    urls: BTreeSet<String>,
    path: PathBuf,
    loaded: bool,
    dirty: bool,
}

impl SeenLedger {
    /// Load the ledger from `dir`, or start empty if the file is missing or
    /// unreadable. Never fails; a broken ledger only costs dedup coverage.
    pub fn load_or_default(dir: &Path) -> Self {
        let path = dir.join(LEDGER_FILE_NAME);
        let mut ledger = Self {
            urls: BTreeSet::new(),
            path: path.clone(),
            loaded: false,
            dirty: false,
        };
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No ledger file yet, starting empty");
                return ledger;
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not read ledger, starting empty");
                return ledger;
            }
        };
        match serde_json::from_str::<LedgerFile>(&text) {
            Ok(file) => {
                ledger.urls = file.urls.into_iter().collect();
                ledger.loaded = true;
                info!(
                    count = ledger.urls.len(),
                    updated_at = %file.updated_at,
                    "Loaded seen-URL ledger"
                );
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ledger file is corrupt, starting empty");
            }
        }
        ledger
    }

    /// Whether the ledger was read back from disk. False means this is the
    /// first run in this directory (or the file was corrupt) and legacy
    /// reports should be scanned.
    pub fn loaded_from_disk(&self) -> bool {
        self.loaded
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    /// Add a URL to the ledger. No-op if already present.
    pub fn record(&mut self, url: &str) {
        if self.urls.insert(url.to_string()) {
            self.dirty = true;
        }
    }

    /// Recover seen URLs from report PDFs written before the ledger existed.
    ///
    /// Scans `dir` for `*.pdf` files whose name contains the report stem,
    /// extracts their text, and records the URL of every `Link:` line.
    /// Unreadable files are logged and skipped. Returns the number of URLs
    /// newly added.
    #[instrument(level = "info", skip_all, fields(dir = %dir.display()))]
    pub fn import_legacy_reports(&mut self, dir: &Path) -> usize {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "Could not scan output directory for legacy reports");
                return 0;
            }
        };

        let before = self.urls.len();
        for entry in entries.flatten() {
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name.ends_with(".pdf") || !name.contains(crate::outputs::REPORT_FILE_STEM) {
                continue;
            }
            let text = match pdf_extract::extract_text(&path) {
                Ok(text) => text,
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "Could not read legacy report, skipping");
                    continue;
                }
            };
            let urls = extract_link_lines(&text);
            debug!(file = %name, links = urls.len(), "Scanned legacy report");
            for url in urls {
                self.record(&url);
            }
        }
        self.urls.len() - before
    }

    /// Write the ledger back to disk if anything changed this run.
    pub async fn save(&mut self) -> Result<()> {
        if !self.dirty {
            debug!("Ledger unchanged, skipping write");
            return Ok(());
        }
        let file = LedgerFile {
            updated_at: Utc::now(),
            urls: self.urls.iter().cloned().collect(),
        };
        let json = serde_json::to_string_pretty(&file).context("serializing ledger")?;
        tokio::fs::write(&self.path, json)
            .await
            .with_context(|| format!("writing ledger {}", self.path.display()))?;
        info!(path = %self.path.display(), count = self.urls.len(), "Saved seen-URL ledger");
        self.dirty = false;
        Ok(())
    }
}

/// Pull the URLs out of every `Link:` line in a block of extracted text.
fn extract_link_lines(text: &str) -> Vec<String> {
    LINK_LINE
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Opportunity;

    fn sample_opportunity(url: &str) -> Opportunity {
        Opportunity {
            category: "Agriculture 🌾".to_string(),
            title: "Farm Fellowship".to_string(),
            description: "A hands-on farming program for young people.".to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn test_load_missing_file_starts_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let ledger = SeenLedger::load_or_default(tmp.path());
        assert!(ledger.is_empty());
        assert!(!ledger.loaded_from_disk());
    }

    #[test]
    fn test_load_corrupt_file_starts_empty() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(LEDGER_FILE_NAME), "{ not json").unwrap();
        let ledger = SeenLedger::load_or_default(tmp.path());
        assert!(ledger.is_empty());
        assert!(!ledger.loaded_from_disk());
    }

    #[tokio::test]
    async fn test_record_save_reload_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let mut ledger = SeenLedger::load_or_default(tmp.path());
        ledger.record("https://example.org/a");
        ledger.record("https://example.org/b");
        ledger.record("https://example.org/a");
        assert_eq!(ledger.len(), 2);
        ledger.save().await.unwrap();

        let reloaded = SeenLedger::load_or_default(tmp.path());
        assert!(reloaded.loaded_from_disk());
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded.contains("https://example.org/a"));
        assert!(!reloaded.contains("https://example.org/c"));
    }

    #[tokio::test]
    async fn test_save_skips_when_clean() {
        let tmp = tempfile::tempdir().unwrap();
        let mut ledger = SeenLedger::load_or_default(tmp.path());
        ledger.save().await.unwrap();
        assert!(!tmp.path().join(LEDGER_FILE_NAME).exists());
    }

    #[test]
    fn test_extract_link_lines() {
        let text = "Opportunities for Young People\n\
                    - Farm Fellowship\n\
                    Description: A program...\n\
                    Link: https://example.org/farm\n\
                    plain text without a marker\n\
                    Link:https://example.org/tight\n";
        let urls = extract_link_lines(text);
        assert_eq!(
            urls,
            vec!["https://example.org/farm", "https://example.org/tight"]
        );
    }

    #[test]
    fn test_extract_link_lines_none() {
        assert!(extract_link_lines("no markers here\nhttps://example.org/raw").is_empty());
    }

    #[test]
    fn test_import_from_rendered_report() {
        let tmp = tempfile::tempdir().unwrap();
        let opportunities = vec![
            sample_opportunity("https://example.org/farm"),
            sample_opportunity("https://example.net/grant"),
        ];
        let bytes = crate::outputs::pdf::render_report(&opportunities).unwrap();
        fs::write(tmp.path().join("Categorized_Opportunities.pdf"), bytes).unwrap();

        let mut ledger = SeenLedger::load_or_default(tmp.path());
        let imported = ledger.import_legacy_reports(tmp.path());
        assert_eq!(imported, 2);
        assert!(ledger.contains("https://example.org/farm"));
        assert!(ledger.contains("https://example.net/grant"));
    }

    #[test]
    fn test_import_skips_unreadable_pdf() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(
            tmp.path().join("Categorized_Opportunities_old.pdf"),
            "not a pdf at all",
        )
        .unwrap();
        let mut ledger = SeenLedger::load_or_default(tmp.path());
        assert_eq!(ledger.import_legacy_reports(tmp.path()), 0);
    }

    #[test]
    fn test_import_ignores_unrelated_files() {
        let tmp = tempfile::tempdir().unwrap();
        let bytes =
            crate::outputs::pdf::render_report(&[sample_opportunity("https://example.org/x")])
                .unwrap();
        fs::write(tmp.path().join("Holiday_Photos.pdf"), bytes).unwrap();
        fs::write(tmp.path().join("Categorized_Opportunities.txt"), "Link: https://example.org/y")
            .unwrap();

        let mut ledger = SeenLedger::load_or_default(tmp.path());
        assert_eq!(ledger.import_legacy_reports(tmp.path()), 0);
        assert!(ledger.is_empty());
    }
}
