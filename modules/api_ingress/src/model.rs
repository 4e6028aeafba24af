//! Bodies of the host endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WelcomeResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VersionResponse {
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PingResponse {
    pub ok: bool,
    /// RFC 3339 UTC timestamp.
    pub ts: String,
}

/// Outcome of a `SELECT 1` round trip.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DbPingResponse {
    /// `"ok"` or `"error"`.
    pub db: String,
    /// Backend chosen by the connection resolver (`sqlite`, `postgres`, ...).
    pub backend: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select1: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
