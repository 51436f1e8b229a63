//! Binary classifier producing the probability of treatment success.

use serde::{Deserialize, Serialize};
use verrux_common::{Result, VerruxError};

/// Trait for the pre-trained success classifier.
///
/// Rows passed in are already scaled and in artifact feature order.
pub trait SuccessClassifier: Send + Sync {
    /// Number of features the classifier was trained on.
    fn n_features(&self) -> usize;

    /// Probability of the positive (successful treatment) class.
    fn predict_proba(&self, row: &[f64]) -> Result<f64>;
}

/// Logistic regression exported as coefficients + intercept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModel {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LogisticModel {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Result<Self> {
        let model = Self { coefficients, intercept };
        model.validate()?;
        Ok(model)
    }

    pub fn validate(&self) -> Result<()> {
        if self.coefficients.is_empty() {
            return Err(VerruxError::Model("classifier has no coefficients".to_string()));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(VerruxError::Model("classifier parameters must be finite".to_string()));
        }
        Ok(())
    }

    /// Linear decision value w·x + b.
    pub fn decision_function(&self, row: &[f64]) -> Result<f64> {
        if row.len() != self.coefficients.len() {
            return Err(VerruxError::ShapeMismatch {
                expected: self.coefficients.len(),
                actual: row.len(),
            });
        }
        let z: f64 = self
            .coefficients
            .iter()
            .zip(row)
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept;
        Ok(z)
    }
}

/// Logistic function, split by sign so exp() never overflows.
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

impl SuccessClassifier for LogisticModel {
    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict_proba(&self, row: &[f64]) -> Result<f64> {
        let z = self.decision_function(row)?;
        if !z.is_finite() {
            return Err(VerruxError::Model(format!("non-finite decision value {z}")));
        }
        Ok(sigmoid(z))
    }
}
