//! Output generation modules for the PDF report and the social-media digest.
//!
//! This module contains submodules responsible for rendering the collected
//! opportunity list to its two deliverables:
//!
//! # Submodules
//!
//! - [`pdf`]: Lays out the categorized report on US-letter pages
//! - [`digest`]: Formats the plaintext blocks for social-media copy-paste
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── Categorized_Opportunities.pdf      # the report
//! ├── Opportunities_SocialMedia.txt      # the digest
//! └── opportunities_seen.json            # dedup ledger (src/ledger.rs)
//! ```
//!
//! Both files are overwritten on every run that collects at least one
//! opportunity; a run that finds nothing writes neither.

pub mod digest;
pub mod pdf;

/// Substring that identifies report PDFs, both for naming the output file
/// and for recognizing legacy reports during ledger seeding.
pub const REPORT_FILE_STEM: &str = "Categorized_Opportunities";

/// File name of the PDF report.
pub const REPORT_FILE_NAME: &str = "Categorized_Opportunities.pdf";

/// File name of the plaintext digest.
pub const DIGEST_FILE_NAME: &str = "Opportunities_SocialMedia.txt";
