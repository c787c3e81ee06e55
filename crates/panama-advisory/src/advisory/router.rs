use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::comparison::{ComparisonMatrix, ComparisonSet};
use super::eligibility::{AssessmentOutcome, EligibilityEngine, ResponseSet, CRITERIA};
use super::projection::{
    project, InvestmentKind, ProjectionDisplay, ProjectionOutcome, ProjectionRequest,
};
use crate::properties::Property;

/// Router builder exposing the stateless decision-tool endpoints.
pub fn advisory_router() -> Router {
    Router::new()
        .route("/api/v1/eligibility/criteria", get(criteria_handler))
        .route("/api/v1/eligibility/assessments", post(assessment_handler))
        .route("/api/v1/investment/programs", get(programs_handler))
        .route("/api/v1/investment/projections", post(projection_handler))
        .route("/api/v1/properties/comparisons", post(comparison_handler))
}

#[derive(Debug, Deserialize)]
pub(crate) struct AssessmentRequest {
    pub(crate) responses: ResponseSet,
}

#[derive(Debug, Serialize)]
pub(crate) struct ProgramView {
    pub(crate) kind: InvestmentKind,
    pub(crate) label: &'static str,
    pub(crate) minimum_investment: f64,
    pub(crate) default_roi_percent: f64,
}

#[derive(Debug, Serialize)]
pub(crate) struct ProjectionResponse {
    pub(crate) projection: ProjectionOutcome,
    pub(crate) display: ProjectionDisplay,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ComparisonRequest {
    pub(crate) properties: Vec<Property>,
}

async fn criteria_handler() -> Json<serde_json::Value> {
    Json(json!({ "criteria": CRITERIA }))
}

pub(crate) async fn assessment_handler(
    Json(payload): Json<AssessmentRequest>,
) -> Json<AssessmentOutcome> {
    Json(EligibilityEngine::new().assess(&payload.responses))
}

async fn programs_handler() -> Json<Vec<ProgramView>> {
    let programs = [
        InvestmentKind::Residency,
        InvestmentKind::RealEstate,
        InvestmentKind::Medical,
        InvestmentKind::Infrastructure,
    ]
    .into_iter()
    .map(|kind| ProgramView {
        kind,
        label: kind.label(),
        minimum_investment: kind.minimum_investment(),
        default_roi_percent: kind.default_roi_percent(),
    })
    .collect();
    Json(programs)
}

pub(crate) async fn projection_handler(Json(payload): Json<ProjectionRequest>) -> Response {
    match project(&payload) {
        Ok(projection) => {
            let display = projection.display_in(payload.currency);
            (
                StatusCode::OK,
                Json(ProjectionResponse {
                    projection,
                    display,
                }),
            )
                .into_response()
        }
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn comparison_handler(Json(payload): Json<ComparisonRequest>) -> Response {
    let mut set = ComparisonSet::new();
    for property in payload.properties {
        if let Err(error) = set.add(property) {
            let payload = json!({ "error": error.to_string() });
            return (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response();
        }
    }

    let matrix: ComparisonMatrix = set.matrix();
    (StatusCode::OK, Json(matrix)).into_response()
}
