//! `GET|POST /log_setup` : lecture et changement du niveau à chaud

use super::{parse_level, LogState};
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::Level;

const LEVELS: [Level; 5] = [
    Level::ERROR,
    Level::WARN,
    Level::INFO,
    Level::DEBUG,
    Level::TRACE,
];

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LogSetupRequest {
    /// Nom du niveau, sans tenir compte de la casse
    pub level: String,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LogSetupResponse {
    pub current_level: String,
    pub available_levels: Vec<String>,
}

impl LogSetupResponse {
    fn new(level: Level) -> Self {
        Self {
            current_level: level.as_str().to_string(),
            available_levels: LEVELS.iter().map(|l| l.as_str().to_string()).collect(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/log_setup",
    responses(
        (status = 200, description = "Current log level", body = LogSetupResponse)
    ),
    tag = "logs"
)]
pub async fn log_setup_get(State(state): State<LogState>) -> Json<LogSetupResponse> {
    Json(LogSetupResponse::new(state.get_max_level()))
}

#[utoipa::path(
    post,
    path = "/log_setup",
    request_body = LogSetupRequest,
    responses(
        (status = 200, description = "Log level changed", body = LogSetupResponse),
        (status = 400, description = "Unknown level name")
    ),
    tag = "logs"
)]
pub async fn log_setup_post(
    State(state): State<LogState>,
    Json(request): Json<LogSetupRequest>,
) -> impl IntoResponse {
    let Some(level) = parse_level(&request.level) else {
        let names: Vec<&str> = LEVELS.iter().map(|l| l.as_str()).collect();
        let body = serde_json::json!({
            "error": format!("Invalid log level '{}'. Must be one of: {}", request.level, names.join(", "))
        });
        return (StatusCode::BAD_REQUEST, Json(body)).into_response();
    };

    state.set_max_level(level);
    tracing::info!("Log level set to {}", level);
    Json(LogSetupResponse::new(level)).into_response()
}

/// Routes de réglage, à monter sous `/api/logs`
pub fn create_logs_router(log_state: LogState) -> Router {
    Router::new()
        .route("/log_setup", get(log_setup_get).post(log_setup_post))
        .with_state(log_state)
}

#[derive(utoipa::OpenApi)]
#[openapi(
    paths(log_setup_get, log_setup_post),
    components(schemas(LogSetupRequest, LogSetupResponse)),
    tags((name = "logs", description = "Runtime log level"))
)]
pub struct LogsApiDoc;
