use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{ConsultationRequest, LeadId, LeadStatus};
use super::repository::{LeadRepository, NotificationPublisher, RepositoryError};
use super::service::{ConsultationService, ConsultationServiceError};

/// Router builder exposing HTTP endpoints for consultation intake.
pub fn intake_router<R, N>(service: Arc<ConsultationService<R, N>>) -> Router
where
    R: LeadRepository + 'static,
    N: NotificationPublisher + 'static,
{
    Router::new()
        .route("/api/v1/consultations", post(submit_handler::<R, N>))
        .route(
            "/api/v1/consultations/:lead_id",
            get(status_handler::<R, N>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<R, N>(
    State(service): State<Arc<ConsultationService<R, N>>>,
    axum::Json(request): axum::Json<ConsultationRequest>,
) -> Response
where
    R: LeadRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.submit(request) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::ACCEPTED, axum::Json(view)).into_response()
        }
        Err(ConsultationServiceError::Intake(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(ConsultationServiceError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({
                "error": "lead already exists",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn status_handler<R, N>(
    State(service): State<Arc<ConsultationService<R, N>>>,
    Path(lead_id): Path<String>,
) -> Response
where
    R: LeadRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let id = LeadId(lead_id);
    match service.get(&id) {
        Ok(record) => {
            let view = record.status_view();
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        // Unknown ids answer with a pending view instead of 404 so the
        // endpoint leaks nothing about which ids exist.
        Err(ConsultationServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "lead_id": id.0,
                "status": LeadStatus::Received.label(),
                "interest": serde_json::Value::Null,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
