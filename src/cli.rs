//! Command-line interface definitions for Opportunity Scout.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Secrets can be provided via environment variables; everything that the
//! interactive menu would ask for can be preset here to run unattended.

use clap::Parser;

/// Command-line arguments for the Opportunity Scout application.
///
/// This struct defines all configuration options that can be passed to the
/// application at runtime. Options include the output directory, category
/// selection presets, collection limits, and the search provider API key.
///
/// # Examples
///
/// ```sh
/// # Interactive run, writing into ~/Downloads
/// opportunity_scout
///
/// # Unattended run with the default categories
/// opportunity_scout --choice 1 -o ./reports
///
/// # Single custom category, Serper-backed search
/// opportunity_scout --choice 3 --category-name "Green Energy" \
///     --category-query "renewable energy internships for youth" \
///     --serper-api-key YOUR_KEY
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Output directory for the PDF report, digest, and ledger
    /// (defaults to the platform Downloads directory)
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Optional path to a YAML file with the base category list
    #[arg(short, long)]
    pub categories: Option<String>,

    /// Preset for the category menu: 1 defaults, 2 extend, 3 custom only
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=3))]
    pub choice: Option<u8>,

    /// Name of the added/custom category (with --choice 2 or 3)
    #[arg(long)]
    pub category_name: Option<String>,

    /// Search query of the added/custom category (with --choice 2 or 3)
    #[arg(long)]
    pub category_query: Option<String>,

    /// Search results requested per category
    #[arg(long, default_value_t = 10)]
    pub per_category: usize,

    /// Maximum opportunities collected across all categories
    #[arg(long, default_value_t = 30)]
    pub max_opportunities: usize,

    /// Timeout in seconds for each page fetch
    #[arg(long, default_value_t = 10)]
    pub fetch_timeout_secs: u64,

    /// Serper.dev API key; search falls back to DuckDuckGo HTML without it
    #[arg(long, env = "SERPER_API_KEY")]
    pub serper_api_key: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["opportunity_scout"]);

        assert_eq!(cli.output_dir, None);
        assert_eq!(cli.choice, None);
        assert_eq!(cli.per_category, 10);
        assert_eq!(cli.max_opportunities, 30);
        assert_eq!(cli.fetch_timeout_secs, 10);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["opportunity_scout", "-o", "/tmp/reports", "-c", "cats.yaml"]);

        assert_eq!(cli.output_dir.as_deref(), Some("/tmp/reports"));
        assert_eq!(cli.categories.as_deref(), Some("cats.yaml"));
    }

    #[test]
    fn test_cli_preset_selection() {
        let cli = Cli::parse_from([
            "opportunity_scout",
            "--choice",
            "3",
            "--category-name",
            "Green Energy",
            "--category-query",
            "renewable energy internships for youth",
        ]);

        assert_eq!(cli.choice, Some(3));
        assert_eq!(cli.category_name.as_deref(), Some("Green Energy"));
        assert_eq!(
            cli.category_query.as_deref(),
            Some("renewable energy internships for youth")
        );
    }

    #[test]
    fn test_cli_rejects_out_of_range_choice() {
        assert!(Cli::try_parse_from(["opportunity_scout", "--choice", "4"]).is_err());
        assert!(Cli::try_parse_from(["opportunity_scout", "--choice", "0"]).is_err());
    }

    #[test]
    fn test_cli_limit_overrides() {
        let cli = Cli::parse_from([
            "opportunity_scout",
            "--per-category",
            "5",
            "--max-opportunities",
            "12",
            "--fetch-timeout-secs",
            "30",
        ]);

        assert_eq!(cli.per_category, 5);
        assert_eq!(cli.max_opportunities, 12);
        assert_eq!(cli.fetch_timeout_secs, 30);
    }

    #[test]
    fn test_cli_api_key_from_environment() {
        // SAFETY: the only test that sets or asserts on SERPER_API_KEY.
        unsafe { std::env::set_var("SERPER_API_KEY", "key-from-env") };

        let cli = Cli::parse_from(["opportunity_scout"]);
        assert_eq!(cli.serper_api_key.as_deref(), Some("key-from-env"));

        // An explicit flag wins over the environment.
        let cli = Cli::parse_from(["opportunity_scout", "--serper-api-key", "key-from-flag"]);
        assert_eq!(cli.serper_api_key.as_deref(), Some("key-from-flag"));

        // SAFETY: see above.
        unsafe { std::env::remove_var("SERPER_API_KEY") };
    }
}
