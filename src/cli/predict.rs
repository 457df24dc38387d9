//! Predict command handler.
//!
//! Implements the `predict` subcommand: applies a list of ingredient toggles
//! to a fresh selection, checks the submit preconditions and prints the
//! predicted rating.

use super::{
    exit_codes, load_catalog, load_predictor, required_group, write_output, OutputFormat,
    OutputTarget,
};
use crate::catalog::{closest_match, display_name, IngredientCatalog};
use crate::config::AppConfig;
use crate::predict::{Prediction, RatingBand};
use crate::selection::SelectionState;
use anyhow::{bail, Context, Result};
use indexmap::IndexMap;
use serde::Serialize;
use std::path::PathBuf;

/// Predict command configuration
#[derive(Debug, Clone, Default)]
pub struct PredictConfig {
    /// `GROUP=INGREDIENT` or bare `INGREDIENT` arguments, applied in order
    pub selections: Vec<String>,
    pub brand: Option<String>,
    pub output: OutputFormat,
    pub output_file: Option<PathBuf>,
}

/// One parsed `--select` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionArg {
    pub group: String,
    pub ingredient: String,
}

/// Resolve a `--select` argument against the catalog.
///
/// A bare ingredient name is looked up across all groups and must belong to
/// exactly one of them.
pub fn parse_selection(catalog: &IngredientCatalog, raw: &str) -> Result<SelectionArg> {
    let (group, ingredient) = match raw.split_once('=') {
        Some((group, ingredient)) => (group.trim().to_string(), ingredient.trim().to_string()),
        None => {
            let ingredient = raw.trim();
            match catalog.groups_containing(ingredient).as_slice() {
                [group] => ((*group).to_string(), ingredient.to_string()),
                [] => {
                    let all = catalog.groups().flat_map(|g| g.ingredients());
                    match closest_match(ingredient, all) {
                        Some(s) => bail!("Unknown ingredient '{ingredient}' (did you mean '{s}'?)"),
                        None => bail!("Unknown ingredient '{ingredient}'"),
                    }
                }
                groups => bail!(
                    "'{ingredient}' appears in several groups ({}); use GROUP={ingredient}",
                    groups.join(", ")
                ),
            }
        }
    };

    catalog.resolve(&group, &ingredient)?;
    Ok(SelectionArg { group, ingredient })
}

/// JSON document written by `predict --output json`.
#[derive(Debug, Serialize)]
struct PredictionReport<'a> {
    generated_at: String,
    model: &'a str,
    selection: IndexMap<&'a str, Vec<&'a str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    brand: Option<&'a str>,
    total_selected: usize,
    rating: f64,
    band: RatingBand,
    raw_output: f64,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    unrecognized: &'a [String],
}

/// Run the predict command, returning the desired exit code.
pub fn run_predict(config: &AppConfig, predict: PredictConfig) -> Result<i32> {
    let catalog = load_catalog(config)?;
    let (predictor, artifacts) = load_predictor(config)?;

    let mut selection = SelectionState::new(&catalog);
    for raw in &predict.selections {
        let arg = parse_selection(&catalog, raw)?;
        let outcome = selection
            .toggle(&arg.group, &arg.ingredient)
            .with_context(|| format!("cannot select '{raw}'"))?;
        tracing::debug!(group = %arg.group, ingredient = %arg.ingredient, ?outcome, "applied toggle");
    }

    if let Some(brand) = &predict.brand {
        check_brand(brand, &artifacts.brands, predictor.columns().contains(brand))?;
        selection.set_brand(Some(brand.clone()));
    }

    let readiness = selection.submit_readiness(required_group(config, &artifacts));
    if let Some(reason) = readiness.reason() {
        eprintln!("Cannot submit: {reason}");
        return Ok(exit_codes::NOT_READY);
    }

    let prediction = predictor.predict(&selection);
    let text = match predict.output {
        OutputFormat::Text => format_text(&selection, &prediction),
        OutputFormat::Json => format_json(&selection, &prediction, predictor.model_name())?,
    };
    write_output(&text, &OutputTarget::from_option(predict.output_file))?;

    Ok(exit_codes::SUCCESS)
}

fn check_brand(brand: &str, known: &[String], is_column: bool) -> Result<()> {
    if known.is_empty() {
        if !is_column {
            tracing::warn!("brand '{brand}' is not a model column and will be ignored");
        }
        return Ok(());
    }
    if known.iter().any(|b| b == brand) {
        return Ok(());
    }
    match closest_match(brand, known.iter().map(String::as_str)) {
        Some(suggestion) => bail!("Unknown brand '{brand}' (did you mean '{suggestion}'?)"),
        None => bail!("Unknown brand '{brand}'"),
    }
}

fn format_text(selection: &SelectionState, prediction: &Prediction) -> String {
    let mut out = String::new();
    for (group, chosen) in selection.groups() {
        if chosen.is_empty() {
            continue;
        }
        out.push_str(&display_name(group));
        out.push('\n');
        for ingredient in chosen {
            out.push_str("  - ");
            out.push_str(ingredient);
            out.push('\n');
        }
    }
    if let Some(brand) = selection.brand() {
        out.push_str(&format!("Brand: {brand}\n"));
    }
    out.push_str(&format!(
        "Total ingredients selected: {}\n",
        selection.total_selected()
    ));
    out.push_str(&format!(
        "Predicted rating: {} ({})",
        prediction.rating, prediction.band
    ));
    out
}

fn format_json(
    selection: &SelectionState,
    prediction: &Prediction,
    model: &str,
) -> Result<String> {
    let report = PredictionReport {
        generated_at: chrono::Utc::now().to_rfc3339(),
        model,
        selection: selection
            .groups()
            .filter(|(_, chosen)| !chosen.is_empty())
            .collect(),
        brand: selection.brand(),
        total_selected: selection.total_selected(),
        rating: prediction.rating.value(),
        band: prediction.band,
        raw_output: prediction.raw,
        unrecognized: &prediction.unrecognized,
    };
    serde_json::to_string_pretty(&report).context("failed to serialize prediction")
}
