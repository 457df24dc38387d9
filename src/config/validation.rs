//! Configuration validation.

use super::defaults::THEME_NAMES;
use super::types::{AppConfig, SelectionConfig, TuiConfig};
use crate::predict::RatingCorrection;

// ============================================================================
// Configuration Error
// ============================================================================

/// A single invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// Dotted path of the offending field
    pub field: String,
    /// What is wrong with it
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.selection.validate());
        errors.extend(self.rating.validate());
        errors.extend(self.tui.validate());
        errors
    }
}

impl Validatable for SelectionConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        for (group, cap) in &self.caps {
            if *cap == 0 {
                errors.push(ConfigError::new(
                    format!("selection.caps.{group}"),
                    "Cap must be at least 1",
                ));
            }
        }
        if self.default_cap == Some(0) {
            errors.push(ConfigError::new(
                "selection.default_cap",
                "Cap must be at least 1 (omit it for no limit)",
            ));
        }
        if let Some(group) = &self.required_group {
            if group.trim().is_empty() {
                errors.push(ConfigError::new(
                    "selection.required_group",
                    "Group name must not be empty",
                ));
            }
        }
        errors
    }
}

impl Validatable for RatingCorrection {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if !self.anchor.is_finite() {
            errors.push(ConfigError::new(
                "rating.anchor",
                format!("Anchor must be a finite number, got {}", self.anchor),
            ));
        }
        for (field, slope) in [
            ("rating.slope_below", self.slope_below),
            ("rating.slope_above", self.slope_above),
        ] {
            if !(slope.is_finite() && slope > 0.0) {
                errors.push(ConfigError::new(
                    field,
                    format!("Slope must be positive, got {slope}"),
                ));
            }
        }
        if !(self.min_rating.is_finite() && self.max_rating.is_finite())
            || self.min_rating >= self.max_rating
        {
            errors.push(ConfigError::new(
                "rating.min_rating",
                format!(
                    "min_rating ({}) must be below max_rating ({})",
                    self.min_rating, self.max_rating
                ),
            ));
        }
        errors
    }
}

impl Validatable for TuiConfig {
    fn validate(&self) -> Vec<ConfigError> {
        if THEME_NAMES.contains(&self.theme.as_str()) {
            Vec::new()
        } else {
            vec![ConfigError::new(
                "tui.theme",
                format!(
                    "Invalid theme '{}'. Valid options: {}",
                    self.theme,
                    THEME_NAMES.join(", ")
                ),
            )]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().is_valid());
    }

    #[test]
    fn test_zero_caps_rejected() {
        let mut config = AppConfig::default();
        config.selection.caps.insert("flavors".to_string(), 0);
        config.selection.default_cap = Some(0);
        let errors = config.validate();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "selection.caps.flavors");
        assert_eq!(errors[1].field, "selection.default_cap");
    }

    #[test]
    fn test_rating_bounds_and_slopes() {
        let rating = RatingCorrection {
            slope_below: 0.0,
            min_rating: 5.0,
            max_rating: 4.0,
            ..RatingCorrection::default()
        };
        let fields: Vec<_> = rating.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["rating.slope_below", "rating.min_rating"]);

        let rating = RatingCorrection {
            anchor: f64::NAN,
            ..RatingCorrection::default()
        };
        assert!(!rating.is_valid());
    }

    #[test]
    fn test_unknown_theme() {
        let tui = TuiConfig {
            theme: "neon".to_string(),
        };
        let errors = tui.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("high-contrast"));
    }
}
