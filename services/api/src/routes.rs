use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use panama_advisory::advisory::advisory_router;
use panama_advisory::intake::{
    intake_router, ConsultationService, LeadRepository, NotificationPublisher,
};
use panama_advisory::properties::{properties_router, PropertyDirectory};

/// Compose the full platform surface: decision tools, consultation intake,
/// listing data, and the operational endpoints.
pub(crate) fn with_platform_routes<R, N, D>(
    consultations: Arc<ConsultationService<R, N>>,
    directory: Arc<D>,
) -> axum::Router
where
    R: LeadRepository + 'static,
    N: NotificationPublisher + 'static,
    D: PropertyDirectory + 'static,
{
    advisory_router()
        .merge(intake_router(consultations))
        .merge(properties_router(directory))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
