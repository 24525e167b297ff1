use axum::body::Body;
use axum::http::{StatusCode, header};
use axum::response::Response;

pub(crate) fn bad_request(message: &str) -> Response {
    json_error(StatusCode::BAD_REQUEST, message)
}

pub(crate) fn unauthorized(message: &str) -> Response {
    json_error(StatusCode::UNAUTHORIZED, message)
}

pub(crate) fn forbidden(message: &str) -> Response {
    json_error(StatusCode::FORBIDDEN, message)
}

pub(crate) fn not_found(message: &str) -> Response {
    json_error(StatusCode::NOT_FOUND, message)
}

pub(crate) fn conflict(message: &str) -> Response {
    json_error(StatusCode::CONFLICT, message)
}

pub(crate) fn internal_error(message: &str) -> Response {
    json_error(StatusCode::INTERNAL_SERVER_ERROR, message)
}

fn json_error(status: StatusCode, message: &str) -> Response {
    let body = serde_json::json!({ "error": message }).to_string();
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap_or_default()
}

/// Serialize `value` as a 200 JSON response.
pub(crate) fn json_bytes<T: serde::Serialize>(value: &T) -> Response {
    match serde_json::to_vec(value) {
        Ok(bytes) => Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(bytes))
            .unwrap_or_default(),
        Err(err) => internal_error(&format!("serialize response: {}", err)),
    }
}
