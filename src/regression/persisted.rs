//! JSON-persisted regression models.
//!
//! ```json
//! {"kind": "linear", "intercept": 4.4, "coefficients": [0.01, -0.02]}
//! {"kind": "svr", "kernel": {"type": "rbf", "gamma": 0.05},
//!  "support_vectors": [[1, 0], [0, 1]], "dual_coef": [0.3, -0.1], "intercept": 4.41}
//! ```
//!
//! The SVR decision function is `sum_i dual_coef[i] * K(sv_i, x) + intercept`.

use super::{FeatureVector, Regressor};
use crate::error::{ArtifactErrorKind, Result, ScoopError};
use serde::{Deserialize, Serialize};

/// A model loaded from `model.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PersistedModel {
    Linear(LinearModel),
    Svr(SvrModel),
}

/// Ordinary linear regression: `intercept + coefficients · x`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

/// Epsilon-SVR in dual form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SvrModel {
    pub kernel: Kernel,
    pub support_vectors: Vec<Vec<f64>>,
    pub dual_coef: Vec<f64>,
    pub intercept: f64,
}

/// SVR kernel functions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Kernel {
    /// `<x, y>`
    Linear,
    /// `exp(-gamma * |x - y|^2)`
    Rbf { gamma: f64 },
    /// `(gamma * <x, y> + coef0)^degree`
    Poly { gamma: f64, degree: i32, coef0: f64 },
    /// `tanh(gamma * <x, y> + coef0)`
    Sigmoid { gamma: f64, coef0: f64 },
}

impl Kernel {
    #[inline]
    fn eval(&self, x: &[f64], y: &[f64]) -> f64 {
        match *self {
            Self::Linear => dot(x, y),
            Self::Rbf { gamma } => {
                let sq_dist: f64 = x.iter().zip(y).map(|(a, b)| (a - b) * (a - b)).sum();
                (-gamma * sq_dist).exp()
            }
            Self::Poly {
                gamma,
                degree,
                coef0,
            } => (gamma * dot(x, y) + coef0).powi(degree),
            Self::Sigmoid { gamma, coef0 } => (gamma * dot(x, y) + coef0).tanh(),
        }
    }

    const fn gamma(&self) -> Option<f64> {
        match *self {
            Self::Linear => None,
            Self::Rbf { gamma } | Self::Poly { gamma, .. } | Self::Sigmoid { gamma, .. } => {
                Some(gamma)
            }
        }
    }
}

#[inline]
fn dot(x: &[f64], y: &[f64]) -> f64 {
    x.iter().zip(y).map(|(a, b)| a * b).sum()
}

fn invalid(message: impl Into<String>) -> ScoopError {
    ScoopError::artifact(
        "validating model",
        ArtifactErrorKind::InvalidModel(message.into()),
    )
}

fn ensure_finite(name: &str, values: &[f64]) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(idx) => Err(invalid(format!("{name}[{idx}] is not a finite number"))),
        None => Ok(()),
    }
}

impl PersistedModel {
    /// Parse and validate a model from JSON text.
    pub fn from_json(content: &str) -> Result<Self> {
        let model: Self = serde_json::from_str(content)?;
        model.validate()?;
        Ok(model)
    }

    /// Check internal consistency: non-empty, finite, matching dimensions.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Linear(m) => {
                if m.coefficients.is_empty() {
                    return Err(invalid("linear model has no coefficients"));
                }
                ensure_finite("coefficients", &m.coefficients)?;
                ensure_finite("intercept", &[m.intercept])
            }
            Self::Svr(m) => {
                let Some(first) = m.support_vectors.first() else {
                    return Err(invalid("SVR model has no support vectors"));
                };
                let dim = first.len();
                if dim == 0 {
                    return Err(invalid("support vectors are empty"));
                }
                for (idx, sv) in m.support_vectors.iter().enumerate() {
                    if sv.len() != dim {
                        return Err(invalid(format!(
                            "support vector {idx} has {} values, expected {dim}",
                            sv.len()
                        )));
                    }
                    ensure_finite("support_vectors", sv)?;
                }
                if m.dual_coef.len() != m.support_vectors.len() {
                    return Err(invalid(format!(
                        "{} dual coefficients for {} support vectors",
                        m.dual_coef.len(),
                        m.support_vectors.len()
                    )));
                }
                ensure_finite("dual_coef", &m.dual_coef)?;
                ensure_finite("intercept", &[m.intercept])?;
                if let Some(gamma) = m.kernel.gamma() {
                    if !(gamma.is_finite() && gamma > 0.0) {
                        return Err(invalid(format!("kernel gamma must be positive, got {gamma}")));
                    }
                }
                Ok(())
            }
        }
    }
}

impl Regressor for PersistedModel {
    fn name(&self) -> &str {
        match self {
            Self::Linear(_) => "linear",
            Self::Svr(m) => match m.kernel {
                Kernel::Linear => "svr/linear",
                Kernel::Rbf { .. } => "svr/rbf",
                Kernel::Poly { .. } => "svr/poly",
                Kernel::Sigmoid { .. } => "svr/sigmoid",
            },
        }
    }

    fn n_features(&self) -> usize {
        match self {
            Self::Linear(m) => m.coefficients.len(),
            Self::Svr(m) => m.support_vectors.first().map_or(0, Vec::len),
        }
    }

    fn predict(&self, features: &FeatureVector) -> f64 {
        let x = features.as_slice();
        match self {
            Self::Linear(m) => m.intercept + dot(&m.coefficients, x),
            Self::Svr(m) => {
                m.support_vectors
                    .iter()
                    .zip(&m.dual_coef)
                    .map(|(sv, alpha)| alpha * m.kernel.eval(sv, x))
                    .sum::<f64>()
                    + m.intercept
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_linear_predict() {
        let model = PersistedModel::from_json(
            r#"{"kind": "linear", "intercept": 4.0, "coefficients": [0.5, -0.25, 1.0]}"#,
        )
        .unwrap();
        assert_eq!(model.n_features(), 3);
        assert_eq!(model.name(), "linear");
        let x = FeatureVector::from(vec![1.0, 1.0, 0.0]);
        assert!(approx(model.predict(&x), 4.25));
    }

    #[test]
    fn test_svr_rbf_predict() {
        let model = PersistedModel::from_json(
            r#"{
                "kind": "svr",
                "kernel": {"type": "rbf", "gamma": 0.5},
                "support_vectors": [[1.0, 0.0], [0.0, 1.0]],
                "dual_coef": [0.2, -0.1],
                "intercept": 4.4
            }"#,
        )
        .unwrap();
        assert_eq!(model.name(), "svr/rbf");

        // x equals the first support vector: K = 1 and exp(-0.5 * 2) for the second
        let x = FeatureVector::from(vec![1.0, 0.0]);
        let expected = 0.2 - 0.1 * (-1.0f64).exp() + 4.4;
        assert!(approx(model.predict(&x), expected));
    }

    #[test]
    fn test_svr_poly_and_linear_kernels() {
        let x = [1.0, 2.0];
        let y = [3.0, 1.0];
        assert!(approx(Kernel::Linear.eval(&x, &y), 5.0));
        let poly = Kernel::Poly {
            gamma: 1.0,
            degree: 2,
            coef0: 1.0,
        };
        assert!(approx(poly.eval(&x, &y), 36.0));
        let sigmoid = Kernel::Sigmoid {
            gamma: 0.0,
            coef0: 0.0,
        };
        assert!(approx(sigmoid.eval(&x, &y), 0.0));
    }

    #[test]
    fn test_rejects_mismatched_dual_coef() {
        let err = PersistedModel::from_json(
            r#"{"kind": "svr", "kernel": {"type": "linear"},
                "support_vectors": [[1.0]], "dual_coef": [0.1, 0.2], "intercept": 0.0}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("validating model"));
    }

    #[test]
    fn test_rejects_ragged_support_vectors() {
        assert!(PersistedModel::from_json(
            r#"{"kind": "svr", "kernel": {"type": "rbf", "gamma": 0.1},
                "support_vectors": [[1.0, 0.0], [1.0]], "dual_coef": [0.1, 0.2], "intercept": 0.0}"#,
        )
        .is_err());
    }

    #[test]
    fn test_rejects_non_positive_gamma() {
        assert!(PersistedModel::from_json(
            r#"{"kind": "svr", "kernel": {"type": "rbf", "gamma": 0.0},
                "support_vectors": [[1.0]], "dual_coef": [0.1], "intercept": 0.0}"#,
        )
        .is_err());
    }

    #[test]
    fn test_rejects_unknown_kind() {
        assert!(PersistedModel::from_json(r#"{"kind": "forest", "trees": []}"#).is_err());
    }
}
