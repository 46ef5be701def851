use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;

use super::intake::ApplicationSubmission;
use super::policy::BandRange;
use super::service::{AssessmentError, RiskAssessmentService};

/// Router builder exposing HTTP endpoints for assessments and the active policy.
pub fn assessment_router(service: Arc<RiskAssessmentService>) -> Router {
    Router::new()
        .route("/api/v1/credit/assessments", post(assess_handler))
        .route("/api/v1/credit/policy", get(policy_handler))
        .with_state(service)
}

pub(crate) async fn assess_handler(
    State(service): State<Arc<RiskAssessmentService>>,
    payload: Result<axum::Json<ApplicationSubmission>, JsonRejection>,
) -> Response {
    let submission = match payload {
        Ok(axum::Json(submission)) => submission,
        Err(rejection) => return rejection_response(rejection),
    };

    match service.assess(submission) {
        Ok(assessment) => {
            let view = assessment.view(Utc::now());
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(AssessmentError::Validation(error)) => {
            let payload = json!({
                "error": error.to_string(),
                "field": error.field(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(error @ AssessmentError::Artifacts(_)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

/// Malformed bodies get the same JSON error shape as validation failures.
fn rejection_response(rejection: JsonRejection) -> Response {
    let detail = rejection.body_text();
    let status = match rejection {
        JsonRejection::JsonDataError(_) => StatusCode::UNPROCESSABLE_ENTITY,
        other => other.status(),
    };
    let payload = json!({
        "error": detail,
        "field": rejected_field(&detail),
    });
    (status, axum::Json(payload)).into_response()
}

/// Pull the offending top-level field out of a serde deserialization message.
fn rejected_field(detail: &str) -> Option<String> {
    let detail = detail
        .strip_prefix("Failed to deserialize the JSON body into the target type: ")
        .unwrap_or(detail);

    if let Some(rest) = detail.strip_prefix("missing field `") {
        return rest.split('`').next().map(str::to_string);
    }

    let (path, _) = detail.split_once(": ")?;
    path.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
        .then(|| path.to_string())
}

#[derive(Debug, Serialize)]
pub(crate) struct PolicyView {
    review_from: u8,
    reject_from: u8,
    bands: [BandRange; 3],
}

pub(crate) async fn policy_handler(
    State(service): State<Arc<RiskAssessmentService>>,
) -> axum::Json<PolicyView> {
    let policy = service.policy();
    axum::Json(PolicyView {
        review_from: policy.review_from(),
        reject_from: policy.reject_from(),
        bands: policy.band_ranges(),
    })
}
