//! Integration tests for configuration files flowing into commands.

use scoop::cli::{exit_codes, run_predict, OutputFormat, PredictConfig};
use scoop::config::{load_config_file, ConfigFileError, ConfigOverrides, Validatable};
use scoop::AppConfig;
use std::path::Path;
use tempfile::TempDir;

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn write_config(dir: &Path, yaml: &str) -> std::path::PathBuf {
    let path = dir.join(".scoop.yaml");
    std::fs::write(&path, yaml).unwrap();
    path
}

#[test]
fn test_file_caps_limit_predict() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(
        tmp.path(),
        &format!(
            "catalog:\n  path: {FIXTURES_DIR}/catalog.csv\n\
             artifacts:\n  model_dir: {FIXTURES_DIR}/model\n\
             selection:\n  caps:\n    flavors: 1\n"
        ),
    );
    let config = load_config_file(&path).unwrap();
    assert_eq!(config.selection.caps.get("flavors"), Some(&1));

    let predict = PredictConfig {
        selections: vec!["vanilla".to_string(), "mint".to_string()],
        output: OutputFormat::Json,
        output_file: Some(tmp.path().join("r.json")),
        ..Default::default()
    };
    let err = run_predict(&config, predict).unwrap_err();
    assert!(format!("{err:#}").contains("up to 1 ingredients from Flavors"));
}

#[test]
fn test_unlisted_groups_use_default_cap() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(
        tmp.path(),
        &format!(
            "catalog:\n  path: {FIXTURES_DIR}/catalog.csv\n\
             artifacts:\n  model_dir: {FIXTURES_DIR}/model\n\
             selection:\n  caps: {{}}\n  default_cap: 1\n"
        ),
    );
    let config = load_config_file(&path).unwrap();

    let predict = PredictConfig {
        selections: vec!["sugar".to_string(), "honey".to_string()],
        output: OutputFormat::Json,
        output_file: Some(tmp.path().join("r.json")),
        ..Default::default()
    };
    assert!(run_predict(&config, predict).is_err());

    let predict = PredictConfig {
        selections: vec!["sugar".to_string(), "vanilla".to_string()],
        output: OutputFormat::Json,
        output_file: Some(tmp.path().join("r.json")),
        ..Default::default()
    };
    assert_eq!(run_predict(&config, predict).unwrap(), exit_codes::SUCCESS);
}

#[test]
fn test_invalid_rating_section_rejected() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(tmp.path(), "rating:\n  min_rating: 5.0\n  max_rating: 4.0\n");
    match load_config_file(&path) {
        Err(ConfigFileError::Invalid(errors)) => {
            assert!(errors.iter().any(|e| e.field == "rating.min_rating"));
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[test]
fn test_overrides_win_over_file() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(tmp.path(), "tui:\n  theme: light\n");
    let overrides = ConfigOverrides {
        theme: Some("high-contrast".to_string()),
        model_dir: Some(tmp.path().to_path_buf()),
        ..Default::default()
    };

    let (config, loaded_from) = AppConfig::from_file_with_overrides(Some(&path), &overrides).unwrap();
    assert_eq!(loaded_from.as_deref(), Some(path.as_path()));
    assert_eq!(config.tui.theme, "high-contrast");
    assert_eq!(config.artifacts.model_dir, tmp.path());
    assert!(config.is_valid());
}

#[test]
fn test_explicit_config_that_fails_is_not_ignored() {
    let tmp = TempDir::new().unwrap();
    let path = write_config(tmp.path(), "selection:\n  caps:\n    flavors: 0\n");

    let err = AppConfig::from_file_with_overrides(Some(&path), &ConfigOverrides::default())
        .unwrap_err();
    assert!(matches!(err, ConfigFileError::Invalid(_)));

    let missing = tmp.path().join("nope.yaml");
    let err = AppConfig::from_file_with_overrides(Some(&missing), &ConfigOverrides::default())
        .unwrap_err();
    assert!(matches!(err, ConfigFileError::NotFound(_)));
}
