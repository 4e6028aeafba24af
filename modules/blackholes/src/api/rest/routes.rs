use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use utoipa::OpenApi;

use crate::api::rest::{dto, handlers};
use crate::domain::service::Service;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_black_holes,
        handlers::get_black_hole,
        handlers::create_black_hole,
    ),
    components(schemas(dto::BlackHoleRead, dto::BlackHoleCreate, apikit::Problem, apikit::ValidationError)),
    tags((name = "blackholes", description = "Black hole catalog"))
)]
pub struct BlackholesApi;

/// Catalog routes, relative to the `/api/v1` mount point.
pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    router
        .route(
            "/blackholes",
            get(handlers::list_black_holes).post(handlers::create_black_hole),
        )
        .route("/blackholes/{id}", get(handlers::get_black_hole))
        .layer(Extension(service))
}

pub fn openapi() -> utoipa::openapi::OpenApi {
    BlackholesApi::openapi()
}
