//! Form command handler.
//!
//! Launches the interactive selection form.

use super::{exit_codes, load_catalog, load_predictor};
use crate::config::AppConfig;
use crate::tui::{run_form_tui, FormApp, PredictorStatus};
use anyhow::{bail, Result};
use std::io::IsTerminal;

/// Run the form command
///
/// `theme_override` is the `--theme` flag, which wins over a saved preference.
pub fn run_form(config: &AppConfig, theme_override: Option<&str>) -> Result<i32> {
    if !std::io::stdout().is_terminal() {
        bail!("the form needs an interactive terminal; use `scoop predict` in scripts");
    }

    let catalog = load_catalog(config)?;

    // The form stays usable without a model; submitting reports the problem.
    let (status, brands) = match load_predictor(config) {
        Ok((predictor, artifacts)) => (PredictorStatus::Ready(predictor), artifacts.brands),
        Err(e) => {
            tracing::warn!("rating prediction disabled: {e:#}");
            (PredictorStatus::Unavailable(format!("{e:#}")), Vec::new())
        }
    };

    let mut app = FormApp::new(
        catalog,
        status,
        brands,
        config.selection.required_group.clone(),
    );
    run_form_tui(&mut app, &config.tui.theme, theme_override)?;

    Ok(exit_codes::SUCCESS)
}
