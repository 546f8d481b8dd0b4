//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::RouteId;
use crate::ptv::{DirectionsForRouteResponse, PtvError, PtvSource, SearchResult};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router<S>(state: AppState<S>) -> Router
where
    S: PtvSource + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/api/ptv/departures", get(departures::<S>))
        .route("/api/ptv/search", get(search_stops::<S>))
        .route("/api/ptv/directions/:route_id", get(directions_for_route::<S>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Train and tram departures for the board.
///
/// A row whose upstream call failed is shown empty. Only when both rows
/// fail does the request fail.
async fn departures<S>(State(state): State<AppState<S>>) -> Result<Json<BoardResponse>, AppError>
where
    S: PtvSource + Send + Sync + 'static,
{
    let result = state.board.fetch().await;

    let (trains, trams) = match (result.trains, result.trams) {
        (Err(e), Err(_)) => return Err(AppError::from(e)),
        (trains, trams) => (trains.unwrap_or_default(), trams.unwrap_or_default()),
    };

    Ok(Json(BoardResponse {
        trains: trains.iter().map(DepartureView::from).collect(),
        trams: trams.iter().map(DepartureView::from).collect(),
    }))
}

/// Search stops by name.
async fn search_stops<S>(
    State(state): State<AppState<S>>,
    Query(req): Query<StopSearchRequest>,
) -> Result<Json<SearchResult>, AppError>
where
    S: PtvSource + Send + Sync + 'static,
{
    let term = req.term.trim();
    if term.is_empty() {
        return Err(AppError::BadRequest {
            message: "Search term must not be empty".to_string(),
        });
    }

    let route_types = req
        .parsed_route_types()
        .map_err(|message| AppError::BadRequest { message })?;

    let result = state
        .board
        .aggregator()
        .search_stops(term, &route_types)
        .await?;

    Ok(Json(result))
}

/// Directions of travel for a route.
async fn directions_for_route<S>(
    State(state): State<AppState<S>>,
    Path(route_id): Path<u32>,
) -> Result<Json<DirectionsForRouteResponse>, AppError>
where
    S: PtvSource + Send + Sync + 'static,
{
    let result = state
        .board
        .aggregator()
        .directions_for_route(RouteId(route_id))
        .await?;

    Ok(Json(result))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Upstream { message: String },
    Internal { message: String },
}

impl From<PtvError> for AppError {
    fn from(e: PtvError) -> Self {
        match e {
            PtvError::Upstream { .. } | PtvError::MalformedResponse { .. } => AppError::Upstream {
                message: e.to_string(),
            },
            PtvError::InvalidKey(_) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
