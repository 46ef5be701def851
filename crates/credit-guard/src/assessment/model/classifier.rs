use serde::{Deserialize, Serialize};

use super::{check_dimensions, check_finite, ClassProbabilities, Classifier, ModelError};

/// Serialized classifier parameters, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierDocument {
    LogisticRegression { coefficients: Vec<f64>, intercept: f64 },
}

impl ClassifierDocument {
    pub fn into_classifier(self) -> Result<Box<dyn Classifier>, ModelError> {
        match self {
            ClassifierDocument::LogisticRegression {
                coefficients,
                intercept,
            } => Ok(Box::new(LogisticRegression::new(coefficients, intercept)?)),
        }
    }
}

/// Binary logistic regression over scaled features.
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticRegression {
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LogisticRegression {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Result<Self, ModelError> {
        check_finite("coefficients", &coefficients)?;
        if !intercept.is_finite() {
            return Err(ModelError::NonFiniteParameter {
                parameter: "intercept",
            });
        }

        Ok(Self {
            coefficients,
            intercept,
        })
    }

    fn decision_function(&self, features: &[f64]) -> f64 {
        self.coefficients
            .iter()
            .zip(features)
            .fold(self.intercept, |acc, (weight, value)| acc + weight * value)
    }
}

impl Classifier for LogisticRegression {
    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict_proba(&self, features: &[f64]) -> Result<ClassProbabilities, ModelError> {
        check_dimensions(self.coefficients.len(), features)?;

        let logit = self.decision_function(features);
        if logit.is_nan() {
            return Err(ModelError::NonFiniteOutput);
        }

        let positive = sigmoid(logit);
        Ok([1.0 - positive, positive])
    }
}

fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let exp = x.exp();
        exp / (1.0 + exp)
    }
}
