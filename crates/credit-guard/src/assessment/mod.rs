//! Applicant risk assessment: intake validation, feature engineering, column alignment,
//! model scoring, and the approval policy.
//!
//! A request flows through [`IntakeGuard`], [`engineer_features`], [`align_columns`],
//! [`score_features`], and finally [`DecisionPolicy::band_for`]. Every step except the
//! artifact load is pure.

pub mod alignment;
pub mod batch;
pub mod domain;
pub mod features;
pub mod intake;
pub mod model;
pub mod policy;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use alignment::{align_columns, AlignedFeatures};
pub use batch::{assess_csv, assess_csv_path, BatchEntry, BatchError, BatchRowError};
pub use domain::{
    AssessmentView, EngineeredRatios, FeatureName, FeatureVector, Recommendation,
    RiskAssessment, RiskBand, RiskDriver, RiskScore,
};
pub use features::{engineer_features, engineer_ratios};
pub use intake::{ApplicantInput, ApplicationSubmission, IntakeGuard, ValidationError};
pub use model::{ArtifactError, ArtifactStore, ModelArtifacts, ModelError};
pub use policy::{BandRange, DecisionPolicy, PolicyError};
pub use router::assessment_router;
pub use scoring::{score_features, score_from_probability, ScoreCard, ScoringError};
pub use service::{AssessmentError, RiskAssessmentService};
