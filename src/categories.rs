//! Category resolution: the default table, optional YAML overrides, and the
//! interactive 1/2/3 selection menu.
//!
//! The resolver is split so the interesting part stays testable without a
//! terminal: [`resolve_selection`] owns the prompt I/O (generic over any
//! `BufRead`, so tests feed it a `Cursor`), while [`apply_selection`] is a
//! pure function from a base category list and a [`Selection`] to the
//! working list.
//!
//! # Selection semantics
//!
//! - choice `1` (or any input that is not `2`/`3`) keeps the base set;
//! - choice `2` appends one user-supplied category to the base set;
//! - choice `3` replaces the base set with a single custom category.
//!
//! User-added categories get a `" 🔥"` suffix on their display name. Inputs
//! are trimmed but otherwise accepted as-is, empty strings included.

use crate::models::Category;
use anyhow::{Context, Result};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::info;

/// The built-in category table used when no `--categories` file is given.
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new("Agriculture 🌾", "youth opportunities in agriculture"),
        Category::new(
            "AI, Data & Analytics 🤖📊",
            "youth opportunities in AI and Data Science",
        ),
        Category::new(
            "Business & Entrepreneurship 💼🚀",
            "business and entrepreneurship programs for youth",
        ),
        Category::new(
            "Career & Personal Development 🎯📚",
            "career development opportunities for young professionals",
        ),
    ]
}

/// Load a base category list from a YAML file of `- name:` / `query:` entries.
pub fn load_categories_file(path: &Path) -> Result<Vec<Category>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading categories file {}", path.display()))?;
    let categories: Vec<Category> = serde_yaml::from_str(&text)
        .with_context(|| format!("parsing categories file {}", path.display()))?;
    info!(
        count = categories.len(),
        path = %path.display(),
        "Loaded categories file"
    );
    Ok(categories)
}

/// What the user chose from the selection menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Keep the base category set.
    Defaults,
    /// Base set plus one appended category.
    Extend { name: String, query: String },
    /// A single custom category, base set discarded.
    Custom { name: String, query: String },
}

/// Menu answers preset on the command line; `None` fields are prompted for.
#[derive(Debug, Default)]
pub struct SelectionPreset {
    pub choice: Option<u8>,
    pub name: Option<String>,
    pub query: Option<String>,
}

/// Print `prompt` without a newline and read one trimmed line from `input`.
fn prompt_line<R: BufRead>(input: &mut R, prompt: &str) -> Result<String> {
    print!("{prompt}");
    io::stdout().flush().context("flushing prompt")?;
    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("reading category selection input")?;
    Ok(line.trim().to_string())
}

/// Take a preset value or prompt for it.
fn preset_or_prompt<R: BufRead>(
    input: &mut R,
    preset: Option<&String>,
    prompt: &str,
) -> Result<String> {
    match preset {
        Some(value) => Ok(value.trim().to_string()),
        None => prompt_line(input, prompt),
    }
}

/// Run the selection menu, prompting only for answers not already preset.
pub fn resolve_selection<R: BufRead>(
    input: &mut R,
    preset: &SelectionPreset,
) -> Result<Selection> {
    let choice = match preset.choice {
        Some(choice) => choice.to_string(),
        None => {
            println!();
            println!("Category Selection Options:");
            println!();
            println!("1️⃣ Use default categories");
            println!("2️⃣ Add extra categories (default + new ones)");
            println!("3️⃣ Define a custom category (search only this one)");
            println!();
            prompt_line(input, "Enter choice (1, 2, or 3): ")?
        }
    };

    match choice.as_str() {
        "2" => {
            let name = preset_or_prompt(
                input,
                preset.name.as_ref(),
                "Enter the name of the new category: ",
            )?;
            let query = preset_or_prompt(
                input,
                preset.query.as_ref(),
                "Enter search query for this category: ",
            )?;
            Ok(Selection::Extend { name, query })
        }
        "3" => {
            let name = preset_or_prompt(
                input,
                preset.name.as_ref(),
                "Enter the name of your custom category: ",
            )?;
            let query = preset_or_prompt(
                input,
                preset.query.as_ref(),
                "Enter search query for this category: ",
            )?;
            Ok(Selection::Custom { name, query })
        }
        // Anything else, "1" included, keeps the base set.
        _ => Ok(Selection::Defaults),
    }
}

/// Apply a [`Selection`] to the base category list.
pub fn apply_selection(base: Vec<Category>, selection: Selection) -> Vec<Category> {
    match selection {
        Selection::Defaults => base,
        Selection::Extend { name, query } => {
            let mut categories = base;
            categories.push(Category::new(format!("{name} 🔥"), query));
            categories
        }
        Selection::Custom { name, query } => {
            vec![Category::new(format!("{name} 🔥"), query)]
        }
    }
}

/// Resolve the working category list: menu, confirmation line, application.
pub fn resolve_categories<R: BufRead>(
    input: &mut R,
    base: Vec<Category>,
    preset: &SelectionPreset,
) -> Result<Vec<Category>> {
    let selection = resolve_selection(input, preset)?;
    match &selection {
        Selection::Extend { name, .. } => println!("✅ Added new category: {name} 🔥"),
        Selection::Custom { name, .. } => println!("✅ Using only category: {name} 🔥"),
        Selection::Defaults => {}
    }
    Ok(apply_selection(base, selection))
}
