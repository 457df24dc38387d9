//! Unified error types for scoop.
//!
//! This module provides the error hierarchy for the library, with
//! context chaining for debugging and user-friendly messages.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for scoop operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ScoopError {
    /// Errors while loading or querying the ingredient catalog
    #[error("Ingredient catalog error: {context}")]
    Catalog {
        context: String,
        #[source]
        source: CatalogErrorKind,
    },

    /// Errors while loading the trained model artifacts
    #[error("Model artifact error: {context}")]
    Artifact {
        context: String,
        #[source]
        source: ArtifactErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Specific catalog error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CatalogErrorKind {
    #[error("Missing required column '{0}' in header")]
    MissingColumn(String),

    #[error("Malformed row at line {line}: {message}")]
    MalformedRow { line: usize, message: String },

    #[error("No ingredients found")]
    Empty,

    #[error("Unknown group '{group}'{}", suggestion_suffix(.suggestion))]
    UnknownGroup {
        group: String,
        suggestion: Option<String>,
    },

    #[error("Unknown ingredient '{ingredient}' in group '{group}'{}", suggestion_suffix(.suggestion))]
    UnknownIngredient {
        group: String,
        ingredient: String,
        suggestion: Option<String>,
    },
}

/// Specific model artifact error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ArtifactErrorKind {
    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Model expects {expected} features but column order has {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("Column order is empty")]
    EmptyColumns,

    #[error("Invalid model definition: {0}")]
    InvalidModel(String),
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    suggestion
        .as_ref()
        .map(|s| format!(" (did you mean '{s}'?)"))
        .unwrap_or_default()
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for scoop operations
pub type Result<T> = std::result::Result<T, ScoopError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl ScoopError {
    /// Create a catalog error with context
    pub fn catalog(context: impl Into<String>, source: CatalogErrorKind) -> Self {
        Self::Catalog {
            context: context.into(),
            source,
        }
    }

    /// Create an artifact error with context
    pub fn artifact(context: impl Into<String>, source: ArtifactErrorKind) -> Self {
        Self::Artifact {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for ScoopError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for ScoopError {
    fn from(err: serde_json::Error) -> Self {
        Self::artifact(
            "JSON deserialization",
            ArtifactErrorKind::InvalidJson(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings are chained, so the final message shows the path
/// through the code: `"loading artifacts: reading columns: ..."`.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, only evaluated on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<ScoopError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: ScoopError, new_ctx: &str) -> ScoopError {
    match err {
        ScoopError::Catalog {
            context: existing,
            source,
        } => ScoopError::Catalog {
            context: chain_context(new_ctx, &existing),
            source,
        },
        ScoopError::Artifact {
            context: existing,
            source,
        } => ScoopError::Artifact {
            context: chain_context(new_ctx, &existing),
            source,
        },
        ScoopError::Io {
            path,
            message,
            source,
        } => ScoopError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ScoopError::catalog("at catalog.csv", CatalogErrorKind::Empty);
        assert!(err.to_string().contains("catalog.csv"));

        let err = ScoopError::artifact(
            "loading model",
            ArtifactErrorKind::DimensionMismatch {
                expected: 3,
                found: 4,
            },
        );
        assert!(err.to_string().contains("loading model"));
    }

    #[test]
    fn test_unknown_ingredient_suggestion() {
        let kind = CatalogErrorKind::UnknownIngredient {
            group: "flavors".to_string(),
            ingredient: "vanila".to_string(),
            suggestion: Some("vanilla".to_string()),
        };
        assert_eq!(
            kind.to_string(),
            "Unknown ingredient 'vanila' in group 'flavors' (did you mean 'vanilla'?)"
        );

        let kind = CatalogErrorKind::UnknownGroup {
            group: "toppings".to_string(),
            suggestion: None,
        };
        assert_eq!(kind.to_string(), "Unknown group 'toppings'");
    }

    #[test]
    fn test_error_chain() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = ScoopError::io("/path/to/model.json", io_err);

        assert!(err.to_string().contains("/path/to/model.json"));
    }

    #[test]
    fn test_context_chaining_multiple_levels() {
        fn inner() -> Result<()> {
            Err(ScoopError::artifact(
                "base",
                ArtifactErrorKind::EmptyColumns,
            ))
        }

        fn middle() -> Result<()> {
            inner().context("middle layer")
        }

        fn outer() -> Result<()> {
            middle().context("outer layer")
        }

        match outer() {
            Err(ScoopError::Artifact { context, .. }) => {
                assert_eq!(context, "outer layer: middle layer: base");
            }
            other => panic!("Expected Artifact error, got {other:?}"),
        }
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut called = false;

        let ok_result: Result<i32> = Ok(42);
        let _ = ok_result.with_context(|| {
            called = true;
            "should not be called"
        });
        assert!(!called, "Closure should not be called for Ok result");

        let err_result: Result<i32> = Err(ScoopError::catalog("error", CatalogErrorKind::Empty));
        let _ = err_result.with_context(|| {
            called = true;
            "should be called"
        });
        assert!(called, "Closure should be called for Err result");
    }

    #[test]
    fn test_chain_context_helper() {
        assert_eq!(chain_context("new", ""), "new");
        assert_eq!(chain_context("new", "existing"), "new: existing");
    }
}
