//! Trained regression model and its feature layout.
//!
//! The model is an opaque capability behind the [`Regressor`] trait: it maps a
//! [`FeatureVector`] to a raw scalar. The persisted JSON models in this module
//! ([`PersistedModel`]) are the production implementation; tests substitute
//! stubs.

mod artifacts;
mod persisted;

pub use artifacts::{ArtifactPaths, ModelArtifacts, BRANDS_FILE, COLUMNS_FILE, MODEL_FILE};
pub use persisted::{Kernel, LinearModel, PersistedModel, SvrModel};

use crate::error::{ArtifactErrorKind, Result, ScoopError};
use indexmap::IndexSet;
use std::collections::HashSet;

/// A trained model mapping a feature vector to a raw score.
///
/// Implementations are immutable after loading and shared across requests.
pub trait Regressor: Send + Sync {
    /// Short model description for logs and the UI.
    fn name(&self) -> &str;

    /// Number of input features the model was trained with.
    fn n_features(&self) -> usize;

    /// Raw model output. `features.len()` equals [`Regressor::n_features`].
    fn predict(&self, features: &FeatureVector) -> f64;
}

/// Ordered feature names fixed at training time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelColumnOrder {
    columns: IndexSet<String>,
}

impl ModelColumnOrder {
    /// Build a column order, rejecting empty and duplicate names.
    pub fn new<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = IndexSet::new();
        for column in columns {
            let column = column.into();
            if !set.insert(column.clone()) {
                return Err(ScoopError::artifact(
                    "building column order",
                    ArtifactErrorKind::DuplicateColumn(column),
                ));
            }
        }
        if set.is_empty() {
            return Err(ScoopError::artifact(
                "building column order",
                ArtifactErrorKind::EmptyColumns,
            ));
        }
        Ok(Self { columns: set })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }

    /// One-hot encode `present`: 1.0 for every column named in it, else 0.0.
    ///
    /// Names that are not columns are ignored, as are repeats.
    #[must_use]
    pub fn vectorize<'a, I>(&self, present: I) -> FeatureVector
    where
        I: IntoIterator<Item = &'a str>,
    {
        let present: HashSet<&str> = present.into_iter().collect();
        let values = self
            .columns
            .iter()
            .map(|c| if present.contains(c.as_str()) { 1.0 } else { 0.0 })
            .collect();
        FeatureVector { values }
    }
}

/// Fixed-length 0/1 input vector, one value per model column.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: Vec<f64>,
}

impl FeatureVector {
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of active (1.0) features.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.values.iter().filter(|v| **v != 0.0).count()
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(values: Vec<f64>) -> Self {
        Self { values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vectorize_follows_column_order() {
        let columns = ModelColumnOrder::new(["vanilla", "brand_acme", "mint", "sugar"]).unwrap();
        let vector = columns.vectorize(["sugar", "vanilla", "unknown"]);
        assert_eq!(vector.as_slice(), &[1.0, 0.0, 0.0, 1.0]);
        assert_eq!(vector.active_count(), 2);
    }

    #[test]
    fn test_vectorize_ignores_repeats() {
        let columns = ModelColumnOrder::new(["a", "b"]).unwrap();
        assert_eq!(columns.vectorize(["a", "a", "a"]).as_slice(), &[1.0, 0.0]);
    }

    #[test]
    fn test_column_order_rejects_duplicates() {
        let err = ModelColumnOrder::new(["a", "b", "a"]).unwrap_err();
        assert!(matches!(
            err,
            ScoopError::Artifact {
                source: ArtifactErrorKind::DuplicateColumn(ref c),
                ..
            } if c == "a"
        ));
    }

    #[test]
    fn test_column_order_rejects_empty() {
        assert!(ModelColumnOrder::new(Vec::<String>::new()).is_err());
    }
}
