//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{Method, StatusCode},
    response::IntoResponse,
    routing::get,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::planner::{MISSING_PARAMETER, PlanError, PlanRequest, Planner};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_headers(Any)
        .allow_origin(Any);

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/route", get(plan_route))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Root endpoint.
async fn index() -> &'static str {
    "GTFS trip planner is up and running"
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Plan routes between two stop names.
async fn plan_route(
    State(state): State<AppState>,
    Query(query): Query<RouteQuery>,
) -> Result<Json<Vec<RouteResultDto>>, AppError> {
    let (Some(from), Some(to)) = (query.from.as_deref(), query.to.as_deref()) else {
        return Err(AppError::BadRequest {
            message: MISSING_PARAMETER.to_string(),
        });
    };
    let position = query
        .user_position()
        .map_err(|message| AppError::BadRequest { message })?;

    let mut request = PlanRequest::new(from, to);
    if let Some(position) = position {
        request = request.with_user_position(position);
    }

    let planner = Planner::new(
        Arc::clone(&state.store),
        state.directions.as_ref(),
        state.config.as_ref(),
    );
    let result = planner.plan(&request).await?;

    if result.is_empty() {
        return Err(AppError::NotFound {
            message: "No routes found between the specified stops".to_string(),
        });
    }

    Ok(Json(
        result.routes.into_iter().map(RouteResultDto::from).collect(),
    ))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
    Timeout { message: String },
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::InvalidRequest(message) => AppError::BadRequest { message },
            PlanError::NoMatchingStops(_) => AppError::NotFound {
                message: e.to_string(),
            },
            PlanError::Store { .. } | PlanError::Search(_) => AppError::Internal {
                message: format!("Failed to fetch routes: {e}"),
            },
            PlanError::Timeout => AppError::Timeout {
                message: "Route planning timed out".to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
            AppError::Timeout { message } => (StatusCode::GATEWAY_TIMEOUT, message),
        };

        if status.is_server_error() {
            error!(status = status.as_u16(), %message, "Request failed");
        } else {
            warn!(status = status.as_u16(), %message, "Request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
