//! Rating prediction from a selection.
//!
//! The predictor flattens a [`SelectionState`] into a list of names (every
//! selected ingredient plus the brand identifier, appended exactly once),
//! one-hot encodes it against the [`ModelColumnOrder`], runs the model and
//! applies the [`RatingCorrection`].

mod rating;

pub use rating::{
    PredictedRating, RatingBand, RatingCorrection, DEFAULT_ANCHOR, DEFAULT_MAX_RATING,
    DEFAULT_MIN_RATING, DEFAULT_SLOPE_ABOVE, DEFAULT_SLOPE_BELOW,
};

use crate::error::{ArtifactErrorKind, Result, ScoopError};
use crate::regression::{ModelArtifacts, ModelColumnOrder, Regressor};
use crate::selection::SelectionState;
use serde::Serialize;
use std::sync::Arc;

/// Outcome of one prediction request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    /// Raw model output before correction
    pub raw: f64,
    /// Corrected, bounded rating
    pub rating: PredictedRating,
    /// Qualitative label of `rating`
    pub band: RatingBand,
    /// Flattened names that are not model columns
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unrecognized: Vec<String>,
}

/// Stateless predictor over a loaded model.
#[derive(Clone)]
pub struct RatingPredictor {
    model: Arc<dyn Regressor>,
    columns: ModelColumnOrder,
    correction: RatingCorrection,
}

impl std::fmt::Debug for RatingPredictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RatingPredictor")
            .field("model", &self.model.name())
            .field("columns", &self.columns.len())
            .field("correction", &self.correction)
            .finish()
    }
}

impl RatingPredictor {
    /// Create a predictor, checking the model against the column order.
    pub fn new(
        model: Arc<dyn Regressor>,
        columns: ModelColumnOrder,
        correction: RatingCorrection,
    ) -> Result<Self> {
        if model.n_features() != columns.len() {
            return Err(ScoopError::artifact(
                format!("model '{}'", model.name()),
                ArtifactErrorKind::DimensionMismatch {
                    expected: model.n_features(),
                    found: columns.len(),
                },
            ));
        }
        Ok(Self {
            model,
            columns,
            correction,
        })
    }

    /// Create a predictor from loaded artifacts.
    pub fn from_artifacts(artifacts: &ModelArtifacts, correction: RatingCorrection) -> Result<Self> {
        Self::new(
            Arc::clone(&artifacts.model),
            artifacts.columns.clone(),
            correction,
        )
    }

    #[must_use]
    pub fn columns(&self) -> &ModelColumnOrder {
        &self.columns
    }

    #[must_use]
    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Predict a rating for the selection and its brand.
    #[must_use]
    pub fn predict(&self, selection: &SelectionState) -> Prediction {
        let names = flatten(selection);
        let features = self.columns.vectorize(names.iter().copied());
        let raw = self.model.predict(&features);
        let rating = self.correction.apply(raw);

        let unrecognized: Vec<String> = names
            .iter()
            .filter(|n| !self.columns.contains(n))
            .map(|n| (*n).to_string())
            .collect();
        if !unrecognized.is_empty() {
            tracing::debug!(?unrecognized, "names without a model column were ignored");
        }
        tracing::info!(
            active = features.active_count(),
            raw,
            rating = rating.value(),
            "predicted rating"
        );

        Prediction {
            raw,
            rating,
            band: rating.band(),
            unrecognized,
        }
    }
}

/// Every selected ingredient across all groups, followed by the brand once.
#[must_use]
pub fn flatten(selection: &SelectionState) -> Vec<&str> {
    selection
        .all_selected()
        .chain(selection.brand())
        .collect()
}
