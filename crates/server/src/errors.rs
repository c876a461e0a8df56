use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred";

/// Uniform JSON error body: `{"status": 404, "error": "Not Found", "message": "..."}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: &'static str,
    pub message: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &'static str, message: Option<String>) -> Self {
        Self { status, error, message }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "status": self.status.as_u16(),
            "error": self.error,
            "message": self.message.unwrap_or_default(),
        });
        (self.status, Json(body)).into_response()
    }
}

/// Everything a handler can fail with.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    UnsupportedMediaType(String),
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl From<ApiError> for JsonApiError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::UnsupportedMediaType(msg) => {
                JsonApiError::new(StatusCode::UNSUPPORTED_MEDIA_TYPE, "Unsupported Media Type", Some(msg))
            }
            ApiError::Service(ServiceError::Validation(msg)) => {
                JsonApiError::new(StatusCode::BAD_REQUEST, "Bad Request", Some(msg))
            }
            ApiError::Service(ServiceError::NotFound(msg)) => {
                JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(msg))
            }
            ApiError::Service(e @ ServiceError::Db(_)) => {
                error!(err = %e, "account store failure");
                JsonApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    Some(INTERNAL_ERROR_MESSAGE.into()),
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        JsonApiError::from(self).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
    #[error("migration failed: {0}")]
    Migration(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
