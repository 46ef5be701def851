use serde::Serialize;

use super::domain::FeatureVector;

/// Feature values laid out in the classifier's column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignedFeatures {
    values: Vec<f64>,
    defaulted: Vec<String>,
}

impl AlignedFeatures {
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Required columns that were absent from the input and padded with zero.
    pub fn defaulted(&self) -> &[String] {
        &self.defaulted
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Rebuild a name -> value vector using the same column list this was aligned with.
    pub fn to_feature_vector(&self, columns: &[String]) -> FeatureVector {
        columns
            .iter()
            .cloned()
            .zip(self.values.iter().copied())
            .collect()
    }
}

/// Project `features` onto `columns`: missing names become zero, extras are dropped.
pub fn align_columns(features: &FeatureVector, columns: &[String]) -> AlignedFeatures {
    let mut values = Vec::with_capacity(columns.len());
    let mut defaulted = Vec::new();

    for column in columns {
        match features.get(column) {
            Some(value) => values.push(value),
            None => {
                values.push(FeatureVector::MISSING_VALUE);
                defaulted.push(column.clone());
            }
        }
    }

    AlignedFeatures { values, defaulted }
}
