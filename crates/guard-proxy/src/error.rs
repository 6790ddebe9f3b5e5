use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Request-level failures. Guard transport trouble is deliberately absent:
/// it is downgraded to a fail-safe verdict inside the guard client and a
/// policy block is a first-class response, not an error.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("invalid request: {0}")]
    InvalidInput(String),

    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),
}

impl ChatError {
    fn status(&self) -> StatusCode {
        match self {
            ChatError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ChatError::BackendUnavailable(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        let body = json!({ "error": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_variants_to_http_status() {
        assert_eq!(
            ChatError::InvalidInput("empty".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ChatError::BackendUnavailable("down".into()).status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
