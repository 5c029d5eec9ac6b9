//! API error types with HTTP response mapping.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::DomainError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from the client.
    BadRequest(String),
    /// Domain logic error.
    Domain(DomainError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Domain(err) => domain_error_to_response(err),
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn domain_error_to_response(err: DomainError) -> (StatusCode, String) {
    match &err {
        e if e.is_not_found() => (StatusCode::NOT_FOUND, err.to_string()),
        DomainError::SupplierInUse { .. } => (StatusCode::CONFLICT, err.to_string()),
        _ => {
            tracing::error!(error = %err, "domain operation failed");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Domain(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(status = %rejection.status(), "rejected request body");
        ApiError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use axum::extract::rejection::MissingJsonContentType;
    use common::RecordId;

    use super::*;

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn domain_errors_map_to_status_codes() {
        assert_eq!(
            status_of(DomainError::SupplierNotFound(RecordId::new(9)).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(DomainError::OrderNotFound(RecordId::new(9)).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(
                DomainError::SupplierInUse {
                    supplier_id: RecordId::new(1),
                    order_count: 3,
                }
                .into()
            ),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(
                DomainError::DanglingSupplier {
                    supplier_id: RecordId::new(1),
                }
                .into()
            ),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn client_errors_keep_their_status() {
        assert_eq!(
            status_of(ApiError::BadRequest("bad".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ApiError::NotFound("gone".to_string())),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn body_rejections_become_bad_requests() {
        let err = ApiError::from(JsonRejection::from(MissingJsonContentType::default()));
        assert!(matches!(err, ApiError::BadRequest(ref msg) if !msg.is_empty()));
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
    }
}
