use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use crate::utils::PassportError;

/// Every failure is reported as `400 {"detail": ...}`.
///
/// Upload problems carry their own message; anything raised by the
/// extraction pipeline is prefixed so clients can tell the two apart.
impl IntoResponse for PassportError {
    fn into_response(self) -> Response {
        let detail = match &self {
            PassportError::InvalidUpload(msg) => msg.clone(),
            other => format!("Error processing image: {}", other),
        };
        (StatusCode::BAD_REQUEST, Json(json!({ "detail": detail }))).into_response()
    }
}
