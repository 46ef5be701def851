//! Pre-trained model artifacts: the fitted scaler, the binary classifier, and the ordered
//! column list the classifier was trained on.
//!
//! Each artifact is a JSON document in a single directory. The classifier and scaler are
//! consumed only through the [`Classifier`] and [`Scaler`] traits, so any fitted transform
//! or two-class model with a matching document format can be swapped in.

mod classifier;
mod scaler;
mod store;

pub use classifier::{ClassifierDocument, LogisticRegression};
pub use scaler::{MinMaxScaler, ScalerDocument, StandardScaler};
pub use store::ArtifactStore;

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

pub const CLASSIFIER_FILE: &str = "classifier.json";
pub const SCALER_FILE: &str = "scaler.json";
pub const FEATURE_NAMES_FILE: &str = "feature_names.json";

/// Probabilities for `[low risk, high risk]`.
pub type ClassProbabilities = [f64; 2];

/// Index of the default/high-risk class in [`ClassProbabilities`].
pub const POSITIVE_CLASS: usize = 1;

/// Fitted numeric transform applied before classification.
pub trait Scaler: fmt::Debug + Send + Sync {
    fn n_features(&self) -> usize;

    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ModelError>;
}

/// Two-class probabilistic classifier.
pub trait Classifier: fmt::Debug + Send + Sync {
    fn n_features(&self) -> usize;

    fn predict_proba(&self, features: &[f64]) -> Result<ClassProbabilities, ModelError>;

    fn predict_probability(&self, features: &[f64]) -> Result<f64, ModelError> {
        Ok(self.predict_proba(features)?[POSITIVE_CLASS])
    }
}

/// Failures raised by scaler or classifier parameters and calls.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("expected {expected} features, received {found}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("{parameter} contains a non-finite value")]
    NonFiniteParameter { parameter: &'static str },
    #[error("{parameter} must not be empty")]
    EmptyParameter { parameter: &'static str },
    #[error("model produced a non-finite value")]
    NonFiniteOutput,
}

/// Failures raised while loading or validating the artifact set.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("failed to read model artifact {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("model artifact {} is not valid JSON for its kind: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("model artifact {} is malformed: {source}", path.display())]
    Malformed { path: PathBuf, source: ModelError },
    #[error("feature name list is empty")]
    NoFeatureNames,
    #[error("feature name list contains an empty name")]
    BlankFeatureName,
    #[error("feature name '{0}' is listed more than once")]
    DuplicateFeatureName(String),
    #[error("{component} expects {found} features but the feature name list has {expected}")]
    Inconsistent {
        component: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("no artifact source configured")]
    NoSource,
}

/// Loaded, validated, read-only artifact set.
#[derive(Debug)]
pub struct ModelArtifacts {
    classifier: Box<dyn Classifier>,
    scaler: Box<dyn Scaler>,
    feature_names: Vec<String>,
}

impl ModelArtifacts {
    /// Assemble an artifact set, checking that every component agrees on the column count.
    pub fn new(
        classifier: Box<dyn Classifier>,
        scaler: Box<dyn Scaler>,
        feature_names: Vec<String>,
    ) -> Result<Self, ArtifactError> {
        validate_feature_names(&feature_names)?;

        let expected = feature_names.len();
        if scaler.n_features() != expected {
            return Err(ArtifactError::Inconsistent {
                component: "scaler",
                expected,
                found: scaler.n_features(),
            });
        }
        if classifier.n_features() != expected {
            return Err(ArtifactError::Inconsistent {
                component: "classifier",
                expected,
                found: classifier.n_features(),
            });
        }

        Ok(Self {
            classifier,
            scaler,
            feature_names,
        })
    }

    /// Read `classifier.json`, `scaler.json`, and `feature_names.json` from `dir`.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let dir = dir.as_ref();

        let classifier_path = dir.join(CLASSIFIER_FILE);
        let classifier = read_document::<ClassifierDocument>(&classifier_path)?
            .into_classifier()
            .map_err(|source| ArtifactError::Malformed {
                path: classifier_path,
                source,
            })?;

        let scaler_path = dir.join(SCALER_FILE);
        let scaler = read_document::<ScalerDocument>(&scaler_path)?
            .into_scaler()
            .map_err(|source| ArtifactError::Malformed {
                path: scaler_path,
                source,
            })?;

        let feature_names = read_document::<Vec<String>>(&dir.join(FEATURE_NAMES_FILE))?;

        Self::new(classifier, scaler, feature_names)
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    pub fn scaler(&self) -> &dyn Scaler {
        self.scaler.as_ref()
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }
}

fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let bytes = std::fs::read(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn validate_feature_names(names: &[String]) -> Result<(), ArtifactError> {
    if names.is_empty() {
        return Err(ArtifactError::NoFeatureNames);
    }

    let mut seen = HashSet::with_capacity(names.len());
    for name in names {
        if name.trim().is_empty() {
            return Err(ArtifactError::BlankFeatureName);
        }
        if !seen.insert(name.as_str()) {
            return Err(ArtifactError::DuplicateFeatureName(name.clone()));
        }
    }

    Ok(())
}

pub(crate) fn check_dimensions(expected: usize, features: &[f64]) -> Result<(), ModelError> {
    if features.len() != expected {
        return Err(ModelError::DimensionMismatch {
            expected,
            found: features.len(),
        });
    }
    Ok(())
}

pub(crate) fn check_finite(parameter: &'static str, values: &[f64]) -> Result<(), ModelError> {
    if values.is_empty() {
        return Err(ModelError::EmptyParameter { parameter });
    }
    if values.iter().any(|value| !value.is_finite()) {
        return Err(ModelError::NonFiniteParameter { parameter });
    }
    Ok(())
}
