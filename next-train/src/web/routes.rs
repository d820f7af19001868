//! HTTP route handlers.

use std::path::Path;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{DateTime, Utc};
use tower_http::services::ServeDir;
use tracing::{debug, warn};

use crate::domain::{Direction, Station};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
///
/// `data_dir` is served under `/data` so clients can fetch the raw
/// snapshot documents.
pub fn create_router(state: AppState, data_dir: &Path) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stations", get(list_stations))
        .route("/api/departures", get(departures))
        .nest_service("/data", ServeDir::new(data_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List stations north to south.
async fn list_stations(State(state): State<AppState>) -> Json<StationsResponse> {
    Json(StationsResponse::from_snapshot(state.snapshot()))
}

/// Upcoming departures between two stations.
async fn departures(
    State(state): State<AppState>,
    Query(req): Query<DeparturesRequest>,
) -> Result<Json<DeparturesResponse>, AppError> {
    let snapshot = state.snapshot();
    let origin = find_station(&state, &req.from)?;
    let destination = find_station(&state, &req.to)?;

    let direction = match req.direction.as_deref().filter(|d| !d.is_empty()) {
        Some(raw) => Direction::parse(raw).ok_or_else(|| AppError::BadRequest {
            message: format!("Invalid direction: {raw}"),
        })?,
        None => snapshot
            .direction_between(&origin.id, &destination.id)
            .ok_or_else(|| AppError::BadRequest {
                message: "Origin and destination are the same station".to_string(),
            })?,
    };

    let at = match req.at.as_deref().filter(|a| !a.is_empty()) {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|_| AppError::BadRequest {
                message: format!("Invalid timestamp: {raw}"),
            })?,
        None => Utc::now(),
    };
    let local = state.engine.local_time(&at);

    let board = state
        .engine
        .board(&origin.id, &destination.id, direction, local);

    let schedule_valid = snapshot.is_valid_on(board.service_date);
    if !schedule_valid {
        warn!(
            service_date = %board.service_date,
            valid_from = %snapshot.valid_from,
            valid_to = %snapshot.valid_to,
            "Service date outside the schedule's validity window"
        );
    }
    debug!(
        from = %origin.id,
        to = %destination.id,
        %direction,
        service_type = board.service_type.label(),
        trains = board.len(),
        "Built departure board"
    );

    Ok(Json(DeparturesResponse::from_board(
        &board,
        origin,
        destination,
        schedule_valid,
    )))
}

fn find_station<'s>(state: &'s AppState, id: &str) -> Result<&'s Station, AppError> {
    state
        .snapshot()
        .station(id.trim())
        .ok_or_else(|| AppError::NotFound {
            message: format!("Unknown station: {id}"),
        })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
        };
        debug!(%status, %message, "Request rejected");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
