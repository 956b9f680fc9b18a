use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::{ErrorCode, ErrorResponse};

/// Handler for 404 Not Found errors.
///
/// This can be used as a fallback handler in your router.
pub async fn not_found() -> Response {
    let mut body = ErrorResponse::from_code(ErrorCode::NotFound);
    body.message = "Route not found".to_string();

    (StatusCode::NOT_FOUND, Json(body)).into_response()
}

/// Handler for 405 Method Not Allowed errors.
pub async fn method_not_allowed() -> Response {
    let mut body = ErrorResponse::from_code(ErrorCode::BadRequest);
    body.message = "The HTTP method is not allowed for this resource".to_string();

    (StatusCode::METHOD_NOT_ALLOWED, Json(body)).into_response()
}
