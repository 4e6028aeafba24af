use std::sync::Arc;

use apikit::problem::{Problem, ProblemResponse};
use axum::{
    extract::{OriginalUri, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use catalog_db::LazyDb;
use chrono::{SecondsFormat, Utc};

use crate::model::{DbPingResponse, HealthResponse, PingResponse, VersionResponse, WelcomeResponse};

pub const WELCOME_MESSAGE: &str = "Welcome to the BlackHole project";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const X_DEBUG_HANDLER: &str = "x-debug-handler";

/// Shared by the host endpoints.
#[derive(Clone)]
pub struct HostState {
    pub db: Arc<LazyDb>,
    pub openapi: Arc<serde_json::Value>,
}

#[utoipa::path(get, path = "/", tag = "host",
    responses((status = 200, description = "Greeting", body = WelcomeResponse)))]
pub async fn root() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: WELCOME_MESSAGE.to_string(),
    })
}

#[utoipa::path(get, path = "/health", tag = "host",
    responses((status = 200, description = "Process is up", body = HealthResponse)))]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

#[utoipa::path(get, path = "/version", tag = "host",
    responses((status = 200, description = "Service version", body = VersionResponse)))]
pub async fn version() -> Json<VersionResponse> {
    Json(VersionResponse {
        version: VERSION.to_string(),
    })
}

/// Liveness probe that also names the handling framework.
#[utoipa::path(get, path = "/ping", tag = "host",
    responses((status = 200, description = "Pong", body = PingResponse)))]
pub async fn ping() -> impl IntoResponse {
    (
        [(HeaderName::from_static(X_DEBUG_HANDLER), HeaderValue::from_static("axum"))],
        Json(PingResponse {
            ok: true,
            ts: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        }),
    )
}

/// Opens the database if needed and runs `SELECT 1`.
#[utoipa::path(get, path = "/db-ping", tag = "host",
    responses(
        (status = 200, description = "Database reachable", body = DbPingResponse),
        (status = 500, description = "Database unreachable", body = DbPingResponse),
    ))]
pub async fn db_ping(State(state): State<HostState>) -> Response {
    let backend = state.db.resolved().descriptor.backend().as_str().to_string();

    let result = match state.db.get().await {
        Ok(handle) => handle.ping().await,
        Err(e) => Err(e),
    };
    match result {
        Ok(one) => Json(DbPingResponse {
            db: "ok".to_string(),
            backend,
            select1: Some(one),
            error: None,
        })
        .into_response(),
        Err(e) => {
            tracing::warn!(%backend, error = %e, "db-ping failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(DbPingResponse {
                    db: "error".to_string(),
                    backend,
                    select1: None,
                    error: Some(e.to_string()),
                }),
            )
                .into_response()
        }
    }
}

pub async fn openapi_json(State(state): State<HostState>) -> impl IntoResponse {
    use axum::http::header;
    ([(header::CACHE_CONTROL, "no-store")], Json((*state.openapi).clone()))
}

pub async fn not_found(OriginalUri(uri): OriginalUri) -> ProblemResponse {
    Problem::new(StatusCode::NOT_FOUND, "Not Found", "No route for this path")
        .with_code("ROUTE_NOT_FOUND")
        .with_instance(uri.path())
        .into()
}
