//! Credit risk decision support.
//!
//! The [`assessment`] workflow turns six applicant inputs into engineered features, scores
//! them with a pre-trained classifier, and maps the resulting risk score onto an approval
//! recommendation.

pub mod assessment;
pub mod config;
pub mod error;
pub mod telemetry;
