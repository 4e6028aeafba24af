use apikit::problem::{Problem, ProblemResponse, ValidationError};
use axum::http::StatusCode;

use crate::domain::error::DomainError;

fn from_parts(
    status: StatusCode,
    code: &str,
    title: &str,
    detail: impl Into<String>,
    instance: &str,
) -> ProblemResponse {
    ProblemResponse(Problem::from_parts(status, code, title, detail, instance))
}

/// Map a domain error to an RFC 9457 response.
pub fn map_domain_error(e: &DomainError, instance: &str) -> ProblemResponse {
    match e {
        DomainError::NotFound { id } => from_parts(
            StatusCode::NOT_FOUND,
            "BLACKHOLE_NOT_FOUND",
            "Black hole not found",
            format!("Black hole with id {id} was not found"),
            instance,
        ),
        DomainError::Validation { field, message } => {
            let mut resp = from_parts(
                StatusCode::BAD_REQUEST,
                "BLACKHOLE_VALIDATION",
                "Validation error",
                format!("{field}: {message}"),
                instance,
            );
            resp.0 = resp.0.with_errors(vec![ValidationError {
                detail: message.clone(),
                pointer: format!("/{field}"),
            }]);
            resp
        }
        DomainError::StorageUnavailable { .. } => {
            tracing::warn!(error = %e, "storage unavailable");
            from_parts(
                StatusCode::SERVICE_UNAVAILABLE,
                "STORAGE_UNAVAILABLE",
                "Storage unavailable",
                "The catalog storage is temporarily unavailable",
                instance,
            )
        }
        DomainError::Database { .. } => {
            // Details stay in the log.
            tracing::error!(error = %e, "database error");
            from_parts(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_DB",
                "Internal error",
                "An internal database error occurred",
                instance,
            )
        }
    }
}

/// Malformed request that never reached the domain (bad JSON, bad path or query).
pub fn bad_request(status: StatusCode, detail: impl Into<String>, instance: &str) -> ProblemResponse {
    from_parts(status, "BLACKHOLE_BAD_REQUEST", "Bad request", detail, instance)
}
