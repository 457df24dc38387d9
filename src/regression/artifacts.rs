//! Loading of the persisted model artifacts.
//!
//! A model directory holds `model.json`, `columns.json` and, for the
//! brand-aware variant, `brands.json`.

use super::{ModelColumnOrder, PersistedModel, Regressor};
use crate::error::{ArtifactErrorKind, ErrorContext, Result, ScoopError};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// File name of the trained model.
pub const MODEL_FILE: &str = "model.json";

/// File name of the ordered column list.
pub const COLUMNS_FILE: &str = "columns.json";

/// File name of the optional brand list.
pub const BRANDS_FILE: &str = "brands.json";

/// Resolved artifact file locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub columns: PathBuf,
    pub brands: PathBuf,
}

impl ArtifactPaths {
    /// Standard file names inside `dir`.
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            model: dir.join(MODEL_FILE),
            columns: dir.join(COLUMNS_FILE),
            brands: dir.join(BRANDS_FILE),
        }
    }
}

/// Everything loaded from the model directory. Immutable after loading.
#[derive(Clone)]
pub struct ModelArtifacts {
    pub model: Arc<dyn Regressor>,
    pub columns: ModelColumnOrder,
    /// Known brand identifiers; empty when no brand list is shipped
    pub brands: Vec<String>,
}

impl std::fmt::Debug for ModelArtifacts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelArtifacts")
            .field("model", &self.model.name())
            .field("columns", &self.columns.len())
            .field("brands", &self.brands)
            .finish()
    }
}

impl ModelArtifacts {
    /// Load the model, the column order and the optional brand list.
    pub fn load(paths: &ArtifactPaths) -> Result<Self> {
        let model = PersistedModel::from_json(&read(&paths.model)?)
            .with_context(|| format!("loading {}", paths.model.display()))?;

        let names: Vec<String> = serde_json::from_str(&read(&paths.columns)?)
            .with_context(|| format!("loading {}", paths.columns.display()))?;
        let columns = ModelColumnOrder::new(names)
            .with_context(|| format!("loading {}", paths.columns.display()))?;
        if model.n_features() != columns.len() {
            return Err(ScoopError::artifact(
                "checking model against column order",
                ArtifactErrorKind::DimensionMismatch {
                    expected: model.n_features(),
                    found: columns.len(),
                },
            ));
        }

        let brands = if paths.brands.exists() {
            let brands: Vec<String> = serde_json::from_str(&read(&paths.brands)?)
                .with_context(|| format!("loading {}", paths.brands.display()))?;
            brands
        } else {
            tracing::debug!("no brand list at {}", paths.brands.display());
            Vec::new()
        };

        for brand in brands.iter().filter(|b| !columns.contains(b)) {
            tracing::warn!("brand '{brand}' is not a model column and will not affect predictions");
        }

        tracing::info!(
            model = model.name(),
            columns = columns.len(),
            brands = brands.len(),
            "loaded model artifacts"
        );

        Ok(Self {
            model: Arc::new(model),
            columns,
            brands,
        })
    }

    /// Whether a brand list was loaded (brand-aware variant).
    #[must_use]
    pub fn is_brand_aware(&self) -> bool {
        !self.brands.is_empty()
    }
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| ScoopError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_artifacts(dir: &Path, with_brands: bool) {
        std::fs::write(
            dir.join(MODEL_FILE),
            r#"{"kind": "linear", "intercept": 4.45, "coefficients": [0.1, 0.2, 0.3]}"#,
        )
        .unwrap();
        std::fs::write(dir.join(COLUMNS_FILE), r#"["vanilla", "mint", "brand_acme"]"#).unwrap();
        if with_brands {
            std::fs::write(dir.join(BRANDS_FILE), r#"["brand_acme"]"#).unwrap();
        }
    }

    #[test]
    fn test_load_with_brands() {
        let tmp = TempDir::new().unwrap();
        write_artifacts(tmp.path(), true);

        let artifacts = ModelArtifacts::load(&ArtifactPaths::in_dir(tmp.path())).unwrap();
        assert_eq!(artifacts.columns.len(), 3);
        assert_eq!(artifacts.model.n_features(), 3);
        assert_eq!(artifacts.brands, vec!["brand_acme"]);
        assert!(artifacts.is_brand_aware());
    }

    #[test]
    fn test_brands_optional() {
        let tmp = TempDir::new().unwrap();
        write_artifacts(tmp.path(), false);

        let artifacts = ModelArtifacts::load(&ArtifactPaths::in_dir(tmp.path())).unwrap();
        assert!(!artifacts.is_brand_aware());
    }

    #[test]
    fn test_missing_model_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let err = ModelArtifacts::load(&ArtifactPaths::in_dir(tmp.path())).unwrap_err();
        assert!(matches!(err, ScoopError::Io { .. }));
        assert!(err.to_string().contains(MODEL_FILE));
    }

    #[test]
    fn test_dimension_mismatch() {
        let tmp = TempDir::new().unwrap();
        write_artifacts(tmp.path(), false);
        std::fs::write(tmp.path().join(COLUMNS_FILE), r#"["vanilla", "mint"]"#).unwrap();

        let err = ModelArtifacts::load(&ArtifactPaths::in_dir(tmp.path())).unwrap_err();
        assert!(matches!(
            err,
            ScoopError::Artifact {
                source: ArtifactErrorKind::DimensionMismatch {
                    expected: 3,
                    found: 2
                },
                ..
            }
        ));
    }

    #[test]
    fn test_corrupt_columns() {
        let tmp = TempDir::new().unwrap();
        write_artifacts(tmp.path(), false);
        std::fs::write(tmp.path().join(COLUMNS_FILE), "not json").unwrap();

        let err = ModelArtifacts::load(&ArtifactPaths::in_dir(tmp.path())).unwrap_err();
        assert!(err.to_string().contains(COLUMNS_FILE));
    }
}
