use utoipa::openapi::{Info, OpenApi as OpenApiDoc};
use utoipa::OpenApi;

use crate::model::{DbPingResponse, HealthResponse, PingResponse, VersionResponse, WelcomeResponse};
use crate::web;

pub const API_TITLE: &str = "BlackHole API";

#[derive(OpenApi)]
#[openapi(
    paths(web::root, web::health_check, web::version, web::ping, web::db_ping),
    components(schemas(WelcomeResponse, HealthResponse, VersionResponse, PingResponse, DbPingResponse)),
    tags((name = "host", description = "Service diagnostics"))
)]
struct HostApi;

/// Host endpoints plus every module document, under one title.
pub fn build_openapi(modules: impl IntoIterator<Item = OpenApiDoc>) -> OpenApiDoc {
    let mut doc = HostApi::openapi();
    for module in modules {
        doc.merge(module);
    }
    doc.info = Info::new(API_TITLE, web::VERSION);
    doc
}
