use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use super::{AgentInquiry, PropertiesError, PropertyDirectory, PropertyFilters, TourRequest};

/// Router builder exposing the listing endpoints over a directory
/// implementation.
pub fn properties_router<D>(directory: Arc<D>) -> Router
where
    D: PropertyDirectory + 'static,
{
    Router::new()
        .route("/api/v1/properties", get(list_handler::<D>))
        .route("/api/v1/properties/featured", get(featured_handler::<D>))
        .route("/api/v1/properties/search", get(search_handler::<D>))
        .route("/api/v1/properties/stats", get(stats_handler::<D>))
        .route(
            "/api/v1/properties/investment-opportunities",
            get(opportunities_handler::<D>),
        )
        .route("/api/v1/properties/map-data", get(map_data_handler::<D>))
        .route("/api/v1/properties/:property_id", get(detail_handler::<D>))
        .route(
            "/api/v1/properties/:property_id/similar",
            get(similar_handler::<D>),
        )
        .route(
            "/api/v1/properties/:property_id/track-view",
            post(track_view_handler::<D>),
        )
        .route(
            "/api/v1/properties/:property_id/favorite",
            post(favorite_handler::<D>),
        )
        .route(
            "/api/v1/properties/:property_id/contact-agent",
            post(contact_agent_handler::<D>),
        )
        .route(
            "/api/v1/properties/:property_id/schedule-tour",
            post(schedule_tour_handler::<D>),
        )
        .with_state(directory)
}

/// Run one blocking directory call off the async executor.
async fn run_blocking<D, T, F>(directory: Arc<D>, task: F) -> Result<T, Response>
where
    D: PropertyDirectory + 'static,
    T: Send + 'static,
    F: FnOnce(&D) -> Result<T, PropertiesError> + Send + 'static,
{
    match tokio::task::spawn_blocking(move || task(directory.as_ref())).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(error)) => Err(upstream_error_response(error)),
        Err(join_error) => {
            let payload = json!({ "error": format!("property task failed: {join_error}") });
            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response())
        }
    }
}

fn upstream_error_response(error: PropertiesError) -> Response {
    let status = error
        .status_code()
        .and_then(|code| StatusCode::from_u16(code).ok())
        .filter(StatusCode::is_client_error)
        .unwrap_or(StatusCode::BAD_GATEWAY);

    let payload = json!({ "error": error.to_string() });
    (status, Json(payload)).into_response()
}

fn filters_from_query(params: BTreeMap<String, String>) -> PropertyFilters {
    params.into_iter().collect()
}

async fn list_handler<D: PropertyDirectory + 'static>(
    State(directory): State<Arc<D>>,
    Query(params): Query<BTreeMap<String, String>>,
) -> Response {
    let filters = filters_from_query(params);
    match run_blocking(directory, move |d| d.list(&filters)).await {
        Ok(page) => Json(page).into_response(),
        Err(response) => response,
    }
}

async fn search_handler<D: PropertyDirectory + 'static>(
    State(directory): State<Arc<D>>,
    Query(mut params): Query<BTreeMap<String, String>>,
) -> Response {
    let query = params.remove("q").unwrap_or_default();
    let filters = filters_from_query(params);
    match run_blocking(directory, move |d| d.search(&query, &filters)).await {
        Ok(page) => Json(page).into_response(),
        Err(response) => response,
    }
}

async fn featured_handler<D: PropertyDirectory + 'static>(
    State(directory): State<Arc<D>>,
) -> Response {
    match run_blocking(directory, |d| d.featured()).await {
        Ok(listings) => Json(listings).into_response(),
        Err(response) => response,
    }
}

async fn stats_handler<D: PropertyDirectory + 'static>(
    State(directory): State<Arc<D>>,
) -> Response {
    match run_blocking(directory, |d| d.stats()).await {
        Ok(stats) => Json(stats).into_response(),
        Err(response) => response,
    }
}

async fn opportunities_handler<D: PropertyDirectory + 'static>(
    State(directory): State<Arc<D>>,
) -> Response {
    match run_blocking(directory, |d| d.investment_opportunities()).await {
        Ok(listings) => Json(listings).into_response(),
        Err(response) => response,
    }
}

async fn map_data_handler<D: PropertyDirectory + 'static>(
    State(directory): State<Arc<D>>,
) -> Response {
    match run_blocking(directory, |d| d.map_data()).await {
        Ok(pins) => Json(pins).into_response(),
        Err(response) => response,
    }
}

async fn detail_handler<D: PropertyDirectory + 'static>(
    State(directory): State<Arc<D>>,
    Path(property_id): Path<u64>,
) -> Response {
    match run_blocking(directory, move |d| d.detail(property_id)).await {
        Ok(property) => Json(property).into_response(),
        Err(response) => response,
    }
}

async fn similar_handler<D: PropertyDirectory + 'static>(
    State(directory): State<Arc<D>>,
    Path(property_id): Path<u64>,
) -> Response {
    match run_blocking(directory, move |d| d.similar(property_id)).await {
        Ok(listings) => Json(listings).into_response(),
        Err(response) => response,
    }
}

async fn track_view_handler<D: PropertyDirectory + 'static>(
    State(directory): State<Arc<D>>,
    Path(property_id): Path<u64>,
) -> Response {
    match run_blocking(directory, move |d| d.track_view(property_id)).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(response) => response,
    }
}

async fn favorite_handler<D: PropertyDirectory + 'static>(
    State(directory): State<Arc<D>>,
    Path(property_id): Path<u64>,
) -> Response {
    match run_blocking(directory, move |d| d.favorite(property_id)).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(response) => response,
    }
}

async fn contact_agent_handler<D: PropertyDirectory + 'static>(
    State(directory): State<Arc<D>>,
    Path(property_id): Path<u64>,
    Json(inquiry): Json<AgentInquiry>,
) -> Response {
    match run_blocking(directory, move |d| d.contact_agent(property_id, &inquiry)).await {
        Ok(()) => (StatusCode::ACCEPTED, Json(json!({ "status": "forwarded" }))).into_response(),
        Err(response) => response,
    }
}

async fn schedule_tour_handler<D: PropertyDirectory + 'static>(
    State(directory): State<Arc<D>>,
    Path(property_id): Path<u64>,
    Json(request): Json<TourRequest>,
) -> Response {
    match run_blocking(directory, move |d| d.schedule_tour(property_id, &request)).await {
        Ok(()) => (StatusCode::ACCEPTED, Json(json!({ "status": "scheduled" }))).into_response(),
        Err(response) => response,
    }
}
