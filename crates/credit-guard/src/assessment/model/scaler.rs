use serde::{Deserialize, Serialize};

use super::{check_dimensions, check_finite, ModelError, Scaler};

/// Serialized scaler parameters, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalerDocument {
    Standard { mean: Vec<f64>, scale: Vec<f64> },
    MinMax { min: Vec<f64>, max: Vec<f64> },
}

impl ScalerDocument {
    pub fn into_scaler(self) -> Result<Box<dyn Scaler>, ModelError> {
        match self {
            ScalerDocument::Standard { mean, scale } => {
                Ok(Box::new(StandardScaler::new(mean, scale)?))
            }
            ScalerDocument::MinMax { min, max } => Ok(Box::new(MinMaxScaler::new(min, max)?)),
        }
    }
}

/// `(x - mean) / scale` per column.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    /// A zero scale marks a constant training column and is treated as 1.
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, ModelError> {
        check_finite("mean", &mean)?;
        check_finite("scale", &scale)?;
        check_dimensions(mean.len(), &scale)?;

        let scale = scale
            .into_iter()
            .map(|value| if value == 0.0 { 1.0 } else { value })
            .collect();

        Ok(Self { mean, scale })
    }
}

impl Scaler for StandardScaler {
    fn n_features(&self) -> usize {
        self.mean.len()
    }

    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ModelError> {
        check_dimensions(self.mean.len(), features)?;
        Ok(features
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(value, (mean, scale))| (value - mean) / scale)
            .collect())
    }
}

/// `(x - min) / (max - min)` per column.
#[derive(Debug, Clone, PartialEq)]
pub struct MinMaxScaler {
    min: Vec<f64>,
    range: Vec<f64>,
}

impl MinMaxScaler {
    /// A zero range marks a constant training column and is treated as 1.
    pub fn new(min: Vec<f64>, max: Vec<f64>) -> Result<Self, ModelError> {
        check_finite("min", &min)?;
        check_finite("max", &max)?;
        check_dimensions(min.len(), &max)?;

        let range = min
            .iter()
            .zip(&max)
            .map(|(low, high)| {
                let span = high - low;
                if span == 0.0 {
                    1.0
                } else {
                    span
                }
            })
            .collect();

        Ok(Self { min, range })
    }
}

impl Scaler for MinMaxScaler {
    fn n_features(&self) -> usize {
        self.min.len()
    }

    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ModelError> {
        check_dimensions(self.min.len(), features)?;
        Ok(features
            .iter()
            .zip(self.min.iter().zip(&self.range))
            .map(|(value, (min, range))| (value - min) / range)
            .collect())
    }
}
