//! Configuration type definitions.

use super::defaults::{
    default_caps, DEFAULT_CATALOG_PATH, DEFAULT_MODEL_DIR, DEFAULT_REQUIRED_GROUP, DEFAULT_THEME,
};
use crate::catalog::Cap;
use crate::predict::RatingCorrection;
use crate::regression::ArtifactPaths;
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Top-level configuration, loadable from `.scoop.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Ingredient catalog location
    pub catalog: CatalogConfig,
    /// Trained model artifacts location
    pub artifacts: ArtifactsConfig,
    /// Selection limits and submit rules
    pub selection: SelectionConfig,
    /// Correction applied to the raw model output
    pub rating: RatingCorrection,
    /// Terminal UI settings
    pub tui: TuiConfig,
}

// ============================================================================
// Data Locations
// ============================================================================

/// Where the ingredient catalog lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CatalogConfig {
    /// Path to the CSV catalog (`classification`, `ingredient` columns)
    pub path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_CATALOG_PATH),
        }
    }
}

/// Where the model artifacts live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ArtifactsConfig {
    /// Directory with `model.json`, `columns.json` and optional `brands.json`
    pub model_dir: PathBuf,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from(DEFAULT_MODEL_DIR),
        }
    }
}

impl ArtifactsConfig {
    #[must_use]
    pub fn paths(&self) -> ArtifactPaths {
        ArtifactPaths::in_dir(&self.model_dir)
    }
}

// ============================================================================
// Selection Rules
// ============================================================================

/// Per-group caps and submit preconditions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SelectionConfig {
    /// Maximum selections per group
    #[schemars(with = "std::collections::BTreeMap<String, usize>")]
    pub caps: IndexMap<String, usize>,
    /// Cap for groups missing from `caps` (omit for unbounded)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_cap: Option<usize>,
    /// Group that needs a selection when a brand list is loaded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_group: Option<String>,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            caps: default_caps(),
            default_cap: None,
            required_group: Some(DEFAULT_REQUIRED_GROUP.to_string()),
        }
    }
}

impl SelectionConfig {
    /// Cap applied to groups without an explicit entry.
    #[must_use]
    pub fn fallback_cap(&self) -> Cap {
        Cap::from_limit(self.default_cap)
    }
}

// ============================================================================
// TUI Configuration
// ============================================================================

/// TUI-specific configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TuiConfig {
    /// Theme name: "dark", "light", or "high-contrast"
    pub theme: String,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
        }
    }
}

/// TUI preferences persisted between sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiPreferences {
    /// Theme name: "dark", "light", or "high-contrast"
    pub theme: String,
}

impl Default for TuiPreferences {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
        }
    }
}

impl TuiPreferences {
    /// Path of the preferences file.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("scoop").join("preferences.json"))
    }

    /// Load preferences from disk, falling back to defaults.
    #[must_use]
    pub fn load() -> Self {
        Self::saved().unwrap_or_default()
    }

    /// Preferences previously written with [`save`](Self::save), if any.
    #[must_use]
    pub fn saved() -> Option<Self> {
        Self::config_path()
            .and_then(|p| std::fs::read_to_string(p).ok())
            .and_then(|s| serde_json::from_str(&s).ok())
    }

    /// Save preferences to disk.
    pub fn save(&self) -> std::io::Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let json = serde_json::to_string_pretty(self)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
            std::fs::write(path, json)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.catalog.path, PathBuf::from(DEFAULT_CATALOG_PATH));
        assert_eq!(config.selection.caps.get("flavors"), Some(&3));
        assert_eq!(config.selection.fallback_cap(), Cap::Unbounded);
        assert_eq!(config.selection.required_group.as_deref(), Some("flavors"));
        assert_eq!(config.rating, RatingCorrection::default());
        assert_eq!(config.tui.theme, "dark");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: AppConfig = serde_yaml::from_str("selection:\n  default_cap: 4\n").unwrap();
        assert_eq!(config.selection.fallback_cap(), Cap::Limited(4));
        // Serde default fills the whole section, including the cap table
        assert_eq!(config.selection.caps.len(), 11);
        assert_eq!(config.artifacts.model_dir, PathBuf::from(DEFAULT_MODEL_DIR));
    }

    #[test]
    fn test_preferences_roundtrip_json() {
        let prefs = TuiPreferences {
            theme: "light".to_string(),
        };
        let json = serde_json::to_string(&prefs).unwrap();
        let back: TuiPreferences = serde_json::from_str(&json).unwrap();
        assert_eq!(back, prefs);
    }
}
