use std::sync::Arc;

use tracing::{debug, info, warn};

use super::alignment::align_columns;
use super::domain::RiskAssessment;
use super::features::engineer_features;
use super::intake::{ApplicantInput, ApplicationSubmission, IntakeGuard, ValidationError};
use super::model::{ArtifactError, ArtifactStore};
use super::policy::DecisionPolicy;
use super::scoring::{score_features, ScoringError};

/// Service composing intake validation, feature engineering, model scoring, and the
/// decision policy.
#[derive(Debug)]
pub struct RiskAssessmentService {
    guard: IntakeGuard,
    artifacts: Arc<ArtifactStore>,
    policy: DecisionPolicy,
}

impl RiskAssessmentService {
    pub fn new(artifacts: Arc<ArtifactStore>, policy: DecisionPolicy) -> Self {
        Self {
            guard: IntakeGuard,
            artifacts,
            policy,
        }
    }

    pub fn policy(&self) -> &DecisionPolicy {
        &self.policy
    }

    pub fn artifacts(&self) -> &ArtifactStore {
        &self.artifacts
    }

    /// Force the artifact load so startup fails fast instead of on the first request.
    pub fn ensure_ready(&self) -> Result<(), AssessmentError> {
        self.artifacts.get()?;
        Ok(())
    }

    /// Validate a raw submission and assess it.
    pub fn assess(
        &self,
        submission: ApplicationSubmission,
    ) -> Result<RiskAssessment, AssessmentError> {
        let input = self.guard.validate(submission).map_err(|err| {
            warn!(field = err.field(), error = %err, "submission rejected");
            err
        })?;
        self.assess_input(&input)
    }

    pub fn assess_input(&self, input: &ApplicantInput) -> Result<RiskAssessment, AssessmentError> {
        let artifacts = self.artifacts.get()?;

        let (features, ratios) = engineer_features(input);
        let aligned = align_columns(&features, artifacts.feature_names());
        if !aligned.defaulted().is_empty() {
            debug!(columns = ?aligned.defaulted(), "model columns absent from features, padded with zero");
        }

        let card = score_features(&aligned, &artifacts)?;
        let band = self.policy.band_for(card.score);
        let recommendation = band.recommendation();

        info!(
            score = card.score.value(),
            band = band.label(),
            recommendation = recommendation.label(),
            "applicant assessed"
        );

        Ok(RiskAssessment {
            score: card.score,
            band,
            recommendation,
            probability: card.probability,
            ratios,
            drivers: ratios.drivers(),
            defaulted_features: aligned.defaulted().to_vec(),
        })
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("model artifacts unavailable: {0}")]
    Artifacts(#[from] Arc<ArtifactError>),
    #[error(transparent)]
    Scoring(#[from] ScoringError),
}
