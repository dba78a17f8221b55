use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use roaster_core::RoasterError;

/// Everything a handler can reject with.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Roaster(#[from] RoasterError),

    #[error("Malformed upload: {0}")]
    Multipart(#[from] MultipartError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, category, detail) = match &self {
            Self::Roaster(err) => {
                let status = if err.is_client_fault() {
                    StatusCode::BAD_REQUEST
                } else {
                    tracing::error!(error = %err, "Analysis failed");
                    StatusCode::INTERNAL_SERVER_ERROR
                };
                (status, err.category().as_str(), err.to_string())
            }
            Self::Multipart(err) => (err.status(), "invalid_upload", self.to_string()),
        };

        let body = Json(json!({
            "detail": detail,
            "category": category,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
