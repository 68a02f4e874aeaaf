use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;
use serde_json::json;

use storefront_infra::CatalogError;

/// Success envelope: `{"message": ..., "data": ...}`.
pub fn api_response(
    status: StatusCode,
    message: impl Into<String>,
    data: impl Serialize,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "message": message.into(),
            "data": data,
        })),
    )
        .into_response()
}

/// Error envelope: same shape, `data` is always null.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    api_response(status, message, serde_json::Value::Null)
}

pub fn catalog_error_to_response(err: CatalogError) -> axum::response::Response {
    match err {
        CatalogError::NotFound => error_response(StatusCode::NOT_FOUND, "not found"),
        CatalogError::Validation(msg) => error_response(StatusCode::BAD_REQUEST, msg),
        CatalogError::Store(e) => {
            tracing::error!("store failure: {e}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}
