//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::AppConfig;
use super::validation::Validatable;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[".scoop.yaml", ".scoop.yml", "scoop.yaml", "scoop.yml"];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/scoop/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
        tracing::warn!("config file {} does not exist", path.display());
    }

    config_search_dirs()
        .iter()
        .find_map(|dir| find_config_in_dir(dir))
}

/// Directories searched for a config file, in order.
#[must_use]
pub fn config_search_dirs() -> Vec<PathBuf> {
    let cwd = std::env::current_dir().ok();
    let git_root = cwd.as_deref().and_then(find_git_root);
    let user_dir = dirs::config_dir().map(|d| d.join("scoop"));

    let mut search: Vec<PathBuf> = Vec::new();
    for dir in [cwd, git_root, user_dir, dirs::home_dir()].into_iter().flatten() {
        if !search.contains(&dir) {
            search.push(dir);
        }
    }
    search
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up from `start`.
fn find_git_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {}", join_errors(.0))]
    Invalid(Vec<super::ConfigError>),
}

fn join_errors(errors: &[super::ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Load and validate an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigFileError::Invalid(errors));
    }
    Ok(config)
}

/// Load config from an explicit or discovered file, or return default.
///
/// An explicit path must exist and hold a valid config. A discovered file
/// that fails to load is skipped with a warning.
pub fn load_or_default(
    explicit_path: Option<&Path>,
) -> Result<(AppConfig, Option<PathBuf>), ConfigFileError> {
    if let Some(path) = explicit_path {
        let config = load_config_file(path)?;
        tracing::debug!("loaded config from {}", path.display());
        return Ok((config, Some(path.to_path_buf())));
    }

    let Some(path) = discover_config_file(None) else {
        return Ok((AppConfig::default(), None));
    };
    match load_config_file(&path) {
        Ok(config) => {
            tracing::debug!("loaded config from {}", path.display());
            Ok((config, Some(path)))
        }
        Err(e) => {
            tracing::warn!("Failed to load config from {}: {}", path.display(), e);
            Ok((AppConfig::default(), None))
        }
    }
}

// ============================================================================
// Configuration Merging
// ============================================================================

/// Values given on the command line that take precedence over the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub catalog_path: Option<PathBuf>,
    pub model_dir: Option<PathBuf>,
    pub theme: Option<String>,
}

impl AppConfig {
    /// Layer command-line overrides over this config.
    pub fn merge(&mut self, overrides: &ConfigOverrides) {
        if let Some(path) = &overrides.catalog_path {
            self.catalog.path.clone_from(path);
        }
        if let Some(dir) = &overrides.model_dir {
            self.artifacts.model_dir.clone_from(dir);
        }
        if let Some(theme) = &overrides.theme {
            self.tui.theme.clone_from(theme);
        }
    }

    /// Load from file and merge with CLI overrides.
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<(Self, Option<PathBuf>), ConfigFileError> {
        let (mut config, loaded_from) = load_or_default(config_path)?;
        config.merge(overrides);
        Ok((config, loaded_from))
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file holding the defaults.
#[must_use]
pub fn generate_example_config() -> String {
    let example = AppConfig::default();
    format!(
        r"# scoop configuration
# Place this file at .scoop.yaml in your project root or ~/.config/scoop/scoop.yaml
#
# rating: raw model output is rescaled around `anchor`
#   (d = raw - anchor; d * anchor * slope + anchor), then clamped and rounded.
# selection.default_cap applies to groups missing from `caps`; omit it for no limit.

{}",
        serde_yaml::to_string(&example).unwrap_or_default()
    )
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".scoop.yaml");
        std::fs::write(&config_path, "tui:\n  theme: light\n").unwrap();

        assert_eq!(find_config_in_dir(tmp.path()), Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_find_git_root() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join(".git")).unwrap();
        let nested = tmp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_git_root(&nested), Some(tmp.path().to_path_buf()));
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");
        let yaml = r"
catalog:
  path: recipes/ingredients.csv
selection:
  caps:
    flavors: 4
  default_cap: 2
rating:
  max_rating: 5.0
";
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.catalog.path, PathBuf::from("recipes/ingredients.csv"));
        assert_eq!(config.selection.caps.len(), 1);
        assert_eq!(config.selection.caps.get("flavors"), Some(&4));
        assert_eq!(config.selection.default_cap, Some(2));
        assert!((config.rating.max_rating - 5.0).abs() < f64::EPSILON);
        assert!((config.rating.anchor - 4.45).abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_load_config_file_invalid_values() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");
        std::fs::write(&config_path, "tui:\n  theme: neon\n").unwrap();

        let err = load_config_file(&config_path).unwrap_err();
        assert!(matches!(err, ConfigFileError::Invalid(_)));
        assert!(err.to_string().contains("tui.theme"));
    }

    #[test]
    fn test_config_merge() {
        let mut config = AppConfig::default();
        config.merge(&ConfigOverrides {
            model_dir: Some(PathBuf::from("/models/svr")),
            theme: Some("light".to_string()),
            ..ConfigOverrides::default()
        });

        assert_eq!(config.artifacts.model_dir, PathBuf::from("/models/svr"));
        assert_eq!(config.tui.theme, "light");
        assert_eq!(config.catalog, AppConfig::default().catalog);
    }

    #[test]
    fn test_generate_example_config_parses() {
        let example = generate_example_config();
        assert!(example.contains("selection:"));
        let parsed: AppConfig = serde_yaml::from_str(&example).unwrap();
        assert_eq!(parsed, AppConfig::default());
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom-config.yaml");
        std::fs::write(&config_path, "tui:\n  theme: dark\n").unwrap();

        assert_eq!(discover_config_file(Some(&config_path)), Some(config_path));
    }

    #[test]
    fn test_explicit_path_failures_are_errors() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("missing.yaml");
        assert!(matches!(
            load_or_default(Some(&missing)),
            Err(ConfigFileError::NotFound(_))
        ));

        let broken = tmp.path().join("broken.yaml");
        std::fs::write(&broken, "selection:\n  caps: [flavors\n").unwrap();
        assert!(matches!(
            load_or_default(Some(&broken)),
            Err(ConfigFileError::Parse(_))
        ));

        let invalid = tmp.path().join("invalid.yaml");
        std::fs::write(&invalid, "selection:\n  caps:\n    flavors: 0\n").unwrap();
        assert!(matches!(
            load_or_default(Some(&invalid)),
            Err(ConfigFileError::Invalid(_))
        ));
    }
}
