//! # Opportunity Scout
//!
//! A categorized web-search pipeline that discovers opportunity listings for
//! young people, scrapes each result page for its title and description, and
//! renders the new findings as a categorized PDF report plus a plaintext
//! social-media digest.
//!
//! ## Features
//!
//! - Web search per category via Serper.dev (Google results) or the keyless
//!   DuckDuckGo HTML endpoint
//! - Interactive category menu with default, extend, and custom-only modes,
//!   all presettable on the CLI for unattended runs
//! - Cross-run dedup through a persisted seen-URL ledger, seeded from
//!   pre-ledger PDF reports on first run
//! - US-letter PDF report grouped by category, plus an emoji-annotated
//!   digest for copy-paste distribution
//!
//! ## Usage
//!
//! ```sh
//! opportunity_scout --choice 1 -o ./reports
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Selection**: Resolve the category list (defaults, YAML file, menu)
//! 2. **Recall**: Load the seen-URL ledger, seeding it from legacy reports
//! 3. **Collection**: Search each category, scrape each new URL (sequential)
//! 4. **Output**: Write the PDF report and digest, then save the ledger
//!
//! Every failure past argument parsing is logged and absorbed; the process
//! always exits 0.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod categories;
mod cli;
mod collector;
mod fetcher;
mod ledger;
mod models;
mod outputs;
mod scrape;
mod search;
#[cfg(test)]
mod testing;
mod utils;

use categories::{default_categories, load_categories_file, resolve_categories, SelectionPreset};
use cli::Cli;
use collector::{collect_opportunities, CollectLimits};
use fetcher::{SearchProvider, WebFetcher};
use ledger::SeenLedger;
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("opportunity_scout starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(
        ?args.output_dir,
        ?args.choice,
        per_category = args.per_category,
        max_opportunities = args.max_opportunities,
        "Parsed CLI arguments"
    );

    let output_dir = match &args.output_dir {
        Some(dir) => PathBuf::from(dir),
        None => dirs::download_dir().unwrap_or_else(|| PathBuf::from(".")),
    };

    // Early check: everything this run produces lands in one directory
    if let Err(e) = ensure_writable_dir(&output_dir).await {
        error!(
            path = %output_dir.display(),
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return;
    }

    // ---- Category selection ----
    let base = match &args.categories {
        Some(path) => match load_categories_file(Path::new(path)) {
            Ok(categories) => categories,
            Err(e) => {
                error!(path = %path, error = %e, "Could not load categories file");
                return;
            }
        },
        None => default_categories(),
    };
    let preset = SelectionPreset {
        choice: args.choice,
        name: args.category_name.clone(),
        query: args.category_query.clone(),
    };
    let mut input = std::io::stdin().lock();
    let categories = match resolve_categories(&mut input, base, &preset) {
        Ok(categories) => categories,
        Err(e) => {
            error!(error = %e, "Could not read category selection");
            return;
        }
    };
    if categories.is_empty() {
        warn!("Category list is empty; nothing to search");
    }

    println!("\n🔍 Searching for opportunities in the following categories:");
    for category in &categories {
        println!("   - {}", category.name);
    }

    // ---- Prior-output recall ----
    let mut ledger = SeenLedger::load_or_default(&output_dir);
    if !ledger.loaded_from_disk() {
        let imported = ledger.import_legacy_reports(&output_dir);
        if imported > 0 {
            info!(imported, "Seeded ledger from legacy PDF reports");
        }
    }

    // ---- Collection ----
    let provider = match args.serper_api_key.as_deref() {
        Some(key) if !key.trim().is_empty() => {
            info!(provider = "serper", "Search provider selected");
            SearchProvider::Serper {
                api_key: key.trim().to_string(),
            }
        }
        _ => {
            info!(provider = "duckduckgo", "Search provider selected");
            SearchProvider::DuckDuckGo
        }
    };
    let fetcher = match WebFetcher::new(provider, Duration::from_secs(args.fetch_timeout_secs)) {
        Ok(fetcher) => fetcher,
        Err(e) => {
            error!(error = %e, "Could not build HTTP client");
            return;
        }
    };
    let limits = CollectLimits {
        per_category: args.per_category,
        max_total: args.max_opportunities,
    };
    let opportunities = collect_opportunities(&fetcher, &categories, limits, &ledger).await;

    // ---- Outputs ----
    if opportunities.is_empty() {
        println!("\n✅ No new opportunities found. No new PDF generated.");
    } else {
        let report_path = output_dir.join(outputs::REPORT_FILE_NAME);
        match outputs::pdf::write_report(&report_path, &opportunities).await {
            Ok(()) => {
                println!("\n📄 New PDF saved at: {}", report_path.display());

                // Recorded only now: a failed report write leaves these URLs
                // eligible for the next run.
                for opp in &opportunities {
                    ledger.record(&opp.url);
                }

                let digest_path = output_dir.join(outputs::DIGEST_FILE_NAME);
                if let Err(e) = outputs::digest::write_digest(&digest_path, &opportunities).await {
                    error!(path = %digest_path.display(), error = %e, "Failed to write digest");
                } else {
                    println!(
                        "\n📄 Opportunities saved for social media at: {}",
                        digest_path.display()
                    );
                }
            }
            Err(e) => {
                error!(path = %report_path.display(), error = %e, "Failed to write PDF report");
            }
        }
    }

    if let Err(e) = ledger.save().await {
        error!(error = %e, "Failed to save seen-URL ledger");
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );
}
