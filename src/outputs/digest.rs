//! Formats the social-media digest: one plaintext block per opportunity,
//! meant for manual copy-paste into chat apps. Emoji markers stay in here
//! even though the PDF strips them; chat clients render them fine.

use std::path::Path;

use crate::models::Opportunity;
use crate::utils::truncate_chars;
use anyhow::{Context, Result};
use itertools::Itertools;
use tracing::{info, instrument};

/// Descriptions are cut to this many characters before the ellipsis.
const DESC_MAX_CHARS: usize = 200;

/// One copy-paste block: category line with starred title, then marked
/// description and link lines.
fn format_block(opp: &Opportunity) -> String {
    format!(
        "{} *{}*\n📖 {}...\n🔗 {}\n",
        opp.category,
        opp.title,
        truncate_chars(&opp.description, DESC_MAX_CHARS),
        opp.url
    )
}

/// Join all blocks, blank-line separated, in collection order.
pub fn format_digest(opportunities: &[Opportunity]) -> String {
    opportunities.iter().map(format_block).join("\n\n")
}

/// Format and write the digest to `path`.
#[instrument(level = "info", skip_all, fields(path = %path.display(), count = opportunities.len()))]
pub async fn write_digest(path: &Path, opportunities: &[Opportunity]) -> Result<()> {
    tokio::fs::write(path, format_digest(opportunities))
        .await
        .with_context(|| format!("writing digest {}", path.display()))?;
    info!("Wrote social media digest");
    Ok(())
}
