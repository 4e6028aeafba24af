use std::sync::Arc;

use apikit::problem::{Problem, ProblemResponse};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        OriginalUri, Path, Query,
    },
    http::StatusCode,
    Extension, Json,
};
use tracing::{error, info};

use crate::api::rest::dto::{BlackHoleCreate, BlackHoleRead, ListQuery};
use crate::api::rest::error::{bad_request, map_domain_error};
use crate::domain::service::Service;

/// List catalog entries ordered by id.
#[utoipa::path(
    get,
    path = "/api/v1/blackholes",
    tag = "blackholes",
    operation_id = "blackholes.list",
    params(ListQuery),
    responses(
        (status = 200, description = "Page of black holes", body = [BlackHoleRead]),
        (status = 400, description = "Invalid paging parameters", body = Problem, content_type = "application/problem+json"),
        (status = 503, description = "Storage unavailable", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn list_black_holes(
    Extension(svc): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<BlackHoleRead>>, ProblemResponse> {
    let Query(query) =
        query.map_err(|r| bad_request(StatusCode::BAD_REQUEST, r.body_text(), uri.path()))?;

    match svc.list_black_holes(query.limit, query.offset).await {
        Ok(items) => Ok(Json(items.into_iter().map(BlackHoleRead::from).collect())),
        Err(e) => {
            error!("Failed to list black holes: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Fetch one catalog entry.
#[utoipa::path(
    get,
    path = "/api/v1/blackholes/{id}",
    tag = "blackholes",
    operation_id = "blackholes.get",
    params(("id" = i32, Path, description = "Black hole id")),
    responses(
        (status = 200, description = "Black hole found", body = BlackHoleRead),
        (status = 404, description = "Not found", body = Problem, content_type = "application/problem+json"),
        (status = 503, description = "Storage unavailable", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn get_black_hole(
    Extension(svc): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<BlackHoleRead>, ProblemResponse> {
    let Path(id) = id.map_err(|r| bad_request(StatusCode::BAD_REQUEST, r.body_text(), uri.path()))?;

    match svc.get_black_hole(id).await {
        Ok(found) => Ok(Json(found.into())),
        Err(e) => {
            info!("Black hole {} not returned: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Add a catalog entry.
#[utoipa::path(
    post,
    path = "/api/v1/blackholes",
    tag = "blackholes",
    operation_id = "blackholes.create",
    request_body = BlackHoleCreate,
    responses(
        (status = 201, description = "Created", body = BlackHoleRead),
        (status = 400, description = "Invalid payload", body = Problem, content_type = "application/problem+json"),
        (status = 503, description = "Storage unavailable", body = Problem, content_type = "application/problem+json"),
    )
)]
pub async fn create_black_hole(
    Extension(svc): Extension<Arc<Service>>,
    OriginalUri(uri): OriginalUri,
    payload: Result<Json<BlackHoleCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<BlackHoleRead>), ProblemResponse> {
    let Json(payload) = payload.map_err(|r| {
        let status = match &r {
            JsonRejection::MissingJsonContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            _ => StatusCode::BAD_REQUEST,
        };
        bad_request(status, r.body_text(), uri.path())
    })?;

    match svc.create_black_hole(payload.into()).await {
        Ok(created) => Ok((StatusCode::CREATED, Json(created.into()))),
        Err(e) => {
            error!("Failed to create black hole: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}
