//! Renders the categorized opportunity report as a US-letter PDF.
//!
//! Layout is a single downward cursor in points: a fixed page header, then
//! per-category sections with underlined headers, then one block per
//! opportunity (bold wrapped title, truncated description, blue link line).
//! The cursor triggers a page break between opportunities when it drops
//! below the floor; continuation pages carry no header.
//!
//! Built-in PDF fonts are WinAnsi encoded, so text is passed through
//! [`win_ansi_safe`] first. Emoji (category decorations mostly) drop out;
//! common typographic characters degrade to their ASCII equivalents. Link
//! lines stay plain `Link: {url}` so the ledger's legacy import can read
//! them back out of old reports.

use std::path::Path;

use crate::models::Opportunity;
use crate::utils::truncate_chars;
use anyhow::{anyhow, Context, Result};
use printpdf::{
    BuiltinFont, Color, Line, Mm, PdfDocument, PdfLayerReference, Point, Pt, Rgb,
};
use tracing::{info, instrument};

const DOC_TITLE: &str = "Categorized Opportunities for Young People";
const PAGE_HEADING: &str = "Opportunities for Young People";
const PAGE_SUBHEADING: &str = "Categorized by Industry";

/// Characters per wrapped line for titles.
const TITLE_WRAP: usize = 80;
/// Characters per wrapped line for descriptions and links.
const BODY_WRAP: usize = 90;
/// Descriptions are cut to this many characters before the ellipsis.
const DESC_MAX_CHARS: usize = 250;

fn black() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
}

fn blue() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.0, 1.0, None))
}

/// Horizontal rule at height `y`, stroked with the current outline settings.
fn hairline(layer: &PdfLayerReference, x1: Pt, x2: Pt, y: Pt) {
    let line = Line {
        points: vec![
            (Point::new(Mm::from(x1), Mm::from(y)), false),
            (Point::new(Mm::from(x2), Mm::from(y)), false),
        ],
        is_closed: false,
    };
    layer.add_line(line);
}

/// Reduce text to characters the built-in WinAnsi fonts can draw.
///
/// Curly quotes, long dashes, and ellipses come back from scraped pages
/// constantly; map those onto ASCII. Whitespace variants become plain
/// spaces. Anything else outside the Latin-1 range (emoji included) is
/// dropped.
fn win_ansi_safe(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{2018}' | '\u{2019}' => out.push('\''),
            '\u{201C}' | '\u{201D}' => out.push('"'),
            '\u{2013}' | '\u{2014}' => out.push('-'),
            '\u{2026}' => out.push_str("..."),
            '\n' | '\r' | '\t' => out.push(' '),
            ' '..='\u{7E}' | '\u{A0}'..='\u{FF}' => out.push(c),
            _ => {}
        }
    }
    out
}

/// Render the report to PDF bytes. Opportunities must already be in
/// category order; a section header is emitted whenever the category
/// changes from the previous entry.
pub fn render_report(opportunities: &[Opportunity]) -> Result<Vec<u8>> {
    // US letter, 612 x 792 pt.
    let (doc, first_page, first_layer) = PdfDocument::new(
        DOC_TITLE,
        Mm::from(Pt(612.0)),
        Mm::from(Pt(792.0)),
        "Layer 1",
    );
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| anyhow!("loading built-in font: {e}"))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| anyhow!("loading built-in font: {e}"))?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    layer.set_outline_color(black());
    layer.set_outline_thickness(1.0);

    layer.use_text(PAGE_HEADING, 16.0, Mm::from(Pt(180.0)), Mm::from(Pt(750.0)), &bold);
    layer.use_text(
        PAGE_SUBHEADING,
        12.0,
        Mm::from(Pt(180.0)),
        Mm::from(Pt(735.0)),
        &regular,
    );
    hairline(&layer, Pt(50.0), Pt(550.0), Pt(730.0));

    let mut y = Pt(710.0);
    let mut current_category: Option<&str> = None;

    for opp in opportunities {
        if y.0 < 100.0 {
            let (page, page_layer) =
                doc.add_page(Mm::from(Pt(612.0)), Mm::from(Pt(792.0)), "Layer 1");
            layer = doc.get_page(page).get_layer(page_layer);
            layer.set_outline_color(black());
            layer.set_outline_thickness(1.0);
            y = Pt(750.0);
        }

        if current_category != Some(opp.category.as_str()) {
            let heading = win_ansi_safe(&opp.category);
            layer.use_text(heading.trim_end(), 14.0, Mm::from(Pt(50.0)), Mm::from(y), &bold);
            hairline(&layer, Pt(50.0), Pt(550.0), Pt(y.0 - 5.0));
            y.0 -= 20.0;
            current_category = Some(opp.category.as_str());
        }

        let title_text = win_ansi_safe(&format!("- {}", opp.title));
        for line in textwrap::wrap(&title_text, TITLE_WRAP) {
            layer.use_text(line.as_ref(), 12.0, Mm::from(Pt(50.0)), Mm::from(y), &bold);
            y.0 -= 15.0;
        }

        let desc_text = win_ansi_safe(&format!(
            "Description: {}...",
            truncate_chars(&opp.description, DESC_MAX_CHARS)
        ));
        for line in textwrap::wrap(&desc_text, BODY_WRAP) {
            layer.use_text(line.as_ref(), 10.0, Mm::from(Pt(50.0)), Mm::from(y), &regular);
            y.0 -= 12.0;
        }

        layer.set_fill_color(blue());
        let link_text = win_ansi_safe(&format!("Link: {}", opp.url));
        for line in textwrap::wrap(&link_text, BODY_WRAP) {
            layer.use_text(line.as_ref(), 10.0, Mm::from(Pt(50.0)), Mm::from(y), &regular);
            y.0 -= 12.0;
        }
        layer.set_fill_color(black());

        y.0 -= 20.0;
    }

    doc.save_to_bytes()
        .map_err(|e| anyhow!("assembling PDF document: {e}"))
}

/// Render and write the report to `path`.
#[instrument(level = "info", skip_all, fields(path = %path.display(), count = opportunities.len()))]
pub async fn write_report(path: &Path, opportunities: &[Opportunity]) -> Result<()> {
    let bytes = render_report(opportunities)?;
    tokio::fs::write(path, bytes)
        .await
        .with_context(|| format!("writing PDF report {}", path.display()))?;
    info!("Wrote PDF report");
    Ok(())
}
