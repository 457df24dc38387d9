//! **Predict how well an ice-cream recipe will be rated.**
//!
//! `scoop` lets a user pick ingredients from a categorized catalog, optionally
//! together with a brand, and returns a rating predicted by a trained
//! regression model. The same selection rules drive an interactive terminal
//! form and a scriptable `predict` command.
//!
//! ## Core Concepts & Modules
//!
//! - **[`catalog`]**: The [`IngredientCatalog`], loaded from a
//!   `classification,ingredient` CSV, with a selection cap per group.
//! - **[`selection`]**: [`SelectionState`], the caller-owned set of chosen
//!   ingredients. Toggles never let a group exceed its cap.
//! - **[`regression`]**: The [`Regressor`] trait, the persisted model formats
//!   and the [`ModelColumnOrder`] used to one-hot encode a selection.
//! - **[`predict`]**: [`RatingPredictor`], which flattens a selection, runs the
//!   model and rescales the raw output into the displayed rating.
//! - **[`tui`]**: The interactive form built on `ratatui`.
//!
//! ## Getting Started
//!
//! ```no_run
//! use std::path::Path;
//! use scoop::{IngredientCatalog, ModelArtifacts, RatingCorrection, RatingPredictor, SelectionState};
//! use scoop::regression::ArtifactPaths;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let catalog = IngredientCatalog::load(Path::new("data/intermediate/unique_ingredients.csv"))?;
//!     let artifacts = ModelArtifacts::load(&ArtifactPaths::in_dir(Path::new("data/model")))?;
//!     let predictor = RatingPredictor::from_artifacts(&artifacts, RatingCorrection::default())?;
//!
//!     let mut selection = SelectionState::new(&catalog);
//!     selection.toggle("flavors", "vanilla")?;
//!
//!     let prediction = predictor.predict(&selection);
//!     println!("{} ({})", prediction.rating, prediction.band);
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    // usize to f64/u16 casts in layout math and feature vectors; values are small
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // Render functions are long; splitting them hurts readability
    clippy::too_many_lines,
    clippy::struct_excessive_bools,
    clippy::similar_names
)]

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod predict;
pub mod regression;
pub mod selection;
pub mod tui;

// Re-export main types for convenience
pub use catalog::{Cap, IngredientCatalog, IngredientGroup};
pub use config::{AppConfig, ConfigError, Validatable};
pub use error::{ErrorContext, Result, ScoopError};
pub use predict::{Prediction, PredictedRating, RatingBand, RatingCorrection, RatingPredictor};
pub use regression::{FeatureVector, ModelArtifacts, ModelColumnOrder, PersistedModel, Regressor};
pub use selection::{SelectionError, SelectionState, SubmitReadiness, ToggleOutcome};
