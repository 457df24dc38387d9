//! Configuration for scoop.
//!
//! Configuration comes from a YAML file (discovered automatically or given
//! with `--config`), with command-line flags layered on top.
//!
//! ```yaml
//! catalog:
//!   path: data/intermediate/unique_ingredients.csv
//! artifacts:
//!   model_dir: data/model
//! selection:
//!   caps:
//!     flavors: 3
//!     sweeteners: 2
//!   required_group: flavors
//! rating:
//!   anchor: 4.45
//!   min_rating: 3.0
//!   max_rating: 4.81
//! tui:
//!   theme: dark
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{
    default_caps, DEFAULT_CATALOG_PATH, DEFAULT_MODEL_DIR, DEFAULT_REQUIRED_GROUP, DEFAULT_THEME,
    THEME_NAMES,
};
pub use types::{
    AppConfig, ArtifactsConfig, CatalogConfig, SelectionConfig, TuiConfig, TuiPreferences,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    config_search_dirs, discover_config_file, generate_example_config, load_config_file,
    load_or_default, ConfigFileError, ConfigOverrides, CONFIG_FILE_NAMES,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// Editors can use it to validate and complete `.scoop.yaml` files.
pub fn generate_json_schema() -> serde_json::Result<String> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_schema_lists_sections() {
        let schema = generate_json_schema().unwrap();
        for section in ["catalog", "artifacts", "selection", "rating", "tui"] {
            assert!(schema.contains(&format!("\"{section}\"")), "missing {section}");
        }
    }
}
