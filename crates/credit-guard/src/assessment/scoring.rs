use serde::Serialize;

use super::alignment::AlignedFeatures;
use super::domain::RiskScore;
use super::model::{ModelArtifacts, ModelError};

/// Raw classifier output next to the integer score derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreCard {
    pub probability: f64,
    pub score: RiskScore,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    #[error("model evaluation failed: {0}")]
    Model(#[from] ModelError),
    #[error("classifier returned probability {0} outside [0, 1]")]
    ProbabilityOutOfRange(f64),
}

/// Scale, classify, and convert the high-risk probability into a 0..=100 score.
pub fn score_features(
    aligned: &AlignedFeatures,
    artifacts: &ModelArtifacts,
) -> Result<ScoreCard, ScoringError> {
    let scaled = artifacts.scaler().transform(aligned.values())?;
    let probability = artifacts.classifier().predict_probability(&scaled)?;
    let score = score_from_probability(probability)?;

    Ok(ScoreCard { probability, score })
}

/// `floor(probability * 100)`; anything outside `[0, 1]` is treated as a broken model.
pub fn score_from_probability(probability: f64) -> Result<RiskScore, ScoringError> {
    if !(0.0..=1.0).contains(&probability) {
        return Err(ScoringError::ProbabilityOutOfRange(probability));
    }

    let scaled = (probability * f64::from(RiskScore::MAX)).floor() as u8;
    RiskScore::new(scaled).ok_or(ScoringError::ProbabilityOutOfRange(probability))
}
