//! Catalog command handler.
//!
//! Prints the ingredient groups, their caps and their ingredients.

use super::{exit_codes, load_catalog, write_output, OutputFormat, OutputTarget};
use crate::catalog::IngredientCatalog;
use crate::config::AppConfig;
use anyhow::{Context, Result};
use std::path::PathBuf;
use unicode_width::UnicodeWidthStr;

/// Run the catalog command
pub fn run_catalog(
    config: &AppConfig,
    output: OutputFormat,
    output_file: Option<PathBuf>,
) -> Result<i32> {
    let catalog = load_catalog(config)?;

    let content = match output {
        OutputFormat::Text => format_catalog_text(&catalog),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&catalog).context("failed to serialize catalog")?
        }
    };
    write_output(&content, &OutputTarget::from_option(output_file))?;

    Ok(exit_codes::SUCCESS)
}

/// Plain text listing: one aligned summary line per group, then its ingredients.
fn format_catalog_text(catalog: &IngredientCatalog) -> String {
    let names: Vec<String> = catalog.groups().map(|g| g.display_name()).collect();
    let name_width = names.iter().map(|n| n.width()).max().unwrap_or(0);

    let mut lines = Vec::new();
    for (group, name) in catalog.groups().zip(&names) {
        let pad = name_width - name.width();
        lines.push(format!(
            "{name}{:pad$}  max {:<3} ({} ingredients)",
            "",
            group.cap().to_string(),
            group.len(),
        ));
        for ingredient in group.ingredients() {
            lines.push(format!("    {ingredient}"));
        }
    }
    lines.push(format!(
        "{} groups, {} ingredients",
        catalog.len(),
        catalog.total_ingredients()
    ));
    lines.join("\n")
}
