use std::path::PathBuf;
use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::assessment::domain::FeatureName;
use crate::assessment::intake::ApplicationSubmission;
use crate::assessment::model::{
    ArtifactError, ArtifactStore, ClassProbabilities, Classifier, ModelArtifacts, ModelError,
    Scaler,
};
use crate::assessment::policy::DecisionPolicy;
use crate::assessment::service::RiskAssessmentService;

/// The applicant pre-filled in the intake form.
pub(super) fn submission() -> ApplicationSubmission {
    ApplicationSubmission {
        income: 800_000.0,
        loan_amount: 400_000.0,
        sanction_amount: 200_000.0,
        bank_balance: 100_000.0,
        utilization_ratio: 0.35,
        open_accounts: 5,
    }
}

pub(super) fn canonical_columns() -> Vec<String> {
    FeatureName::ALL
        .iter()
        .map(|name| name.as_str().to_string())
        .collect()
}

pub(super) fn repo_artifact_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../artifacts")
}

/// Fresh scratch directory under the system temp dir.
pub(super) fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "credit-guard-{name}-{}",
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("scratch dir");
    dir
}

/// Classifier that ignores its input and always reports the same high-risk probability.
#[derive(Debug)]
pub(super) struct FixedClassifier {
    pub(super) n_features: usize,
    pub(super) probability: f64,
}

impl Classifier for FixedClassifier {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_proba(&self, features: &[f64]) -> Result<ClassProbabilities, ModelError> {
        if features.len() != self.n_features {
            return Err(ModelError::DimensionMismatch {
                expected: self.n_features,
                found: features.len(),
            });
        }
        Ok([1.0 - self.probability, self.probability])
    }
}

#[derive(Debug)]
pub(super) struct IdentityScaler {
    pub(super) n_features: usize,
}

impl Scaler for IdentityScaler {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ModelError> {
        Ok(features.to_vec())
    }
}

pub(super) fn fixed_artifacts(columns: Vec<String>, probability: f64) -> ModelArtifacts {
    let n_features = columns.len();
    ModelArtifacts::new(
        Box::new(FixedClassifier {
            n_features,
            probability,
        }),
        Box::new(IdentityScaler { n_features }),
        columns,
    )
    .expect("fixed artifacts are consistent")
}

pub(super) fn fixed_service(probability: f64) -> RiskAssessmentService {
    let store = ArtifactStore::preloaded(fixed_artifacts(canonical_columns(), probability));
    RiskAssessmentService::new(Arc::new(store), DecisionPolicy::default())
}

pub(super) fn repo_service() -> RiskAssessmentService {
    let store = ArtifactStore::from_dir(repo_artifact_dir());
    RiskAssessmentService::new(Arc::new(store), DecisionPolicy::default())
}

pub(super) fn broken_service() -> RiskAssessmentService {
    let store = ArtifactStore::with_loader(|| Err(ArtifactError::NoFeatureNames));
    RiskAssessmentService::new(Arc::new(store), DecisionPolicy::default())
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
