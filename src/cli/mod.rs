//! CLI command handlers.
//!
//! Each handler implements one subcommand and returns the process exit code;
//! `main.rs` only parses arguments and dispatches.

mod catalog;
mod form;
mod predict;

pub use catalog::run_catalog;
pub use form::run_form;
pub use predict::{parse_selection, run_predict, PredictConfig, SelectionArg};

use crate::catalog::IngredientCatalog;
use crate::config::AppConfig;
use crate::predict::RatingPredictor;
use crate::regression::ModelArtifacts;
use anyhow::{Context, Result};
use clap::ValueEnum;
use std::path::PathBuf;

/// Process exit codes.
pub mod exit_codes {
    /// Command completed
    pub const SUCCESS: i32 = 0;
    /// The selection does not meet the submit preconditions
    pub const NOT_READY: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}

/// Output format for non-interactive commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON document
    Json,
}

/// Target for output - either stdout or a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    #[must_use]
    pub fn from_option(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Stdout, Self::File)
    }
}

/// Write output to the target (stdout or file)
pub fn write_output(content: &str, target: &OutputTarget) -> Result<()> {
    match target {
        OutputTarget::Stdout => {
            println!("{content}");
            Ok(())
        }
        OutputTarget::File(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            tracing::info!("Output written to {}", path.display());
            Ok(())
        }
    }
}

/// Load the ingredient catalog and apply the configured caps.
pub fn load_catalog(config: &AppConfig) -> Result<IngredientCatalog> {
    let catalog = IngredientCatalog::load(&config.catalog.path)
        .with_context(|| format!("cannot load catalog {}", config.catalog.path.display()))?;
    Ok(catalog.with_caps(&config.selection.caps, config.selection.fallback_cap()))
}

/// Load the model artifacts and build a predictor from them.
pub fn load_predictor(config: &AppConfig) -> Result<(RatingPredictor, ModelArtifacts)> {
    let paths = config.artifacts.paths();
    let artifacts = ModelArtifacts::load(&paths).with_context(|| {
        format!(
            "cannot load model artifacts from {}",
            config.artifacts.model_dir.display()
        )
    })?;
    let predictor = RatingPredictor::from_artifacts(&artifacts, config.rating)?;
    Ok((predictor, artifacts))
}

/// Submit precondition for the loaded artifacts.
///
/// The required group only applies to the brand-aware variant.
#[must_use]
pub fn required_group<'a>(config: &'a AppConfig, artifacts: &ModelArtifacts) -> Option<&'a str> {
    if artifacts.is_brand_aware() {
        config.selection.required_group.as_deref()
    } else {
        None
    }
}
