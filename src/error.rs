use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mediavault_auth::SessionError;
use mediavault_image::ImageError;
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by HTTP handlers, rendered as `{"error": "<message>"}`
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid JSON")]
    InvalidJson,

    #[error("Invalid password")]
    InvalidPassword,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    BadRequest(&'static str),

    #[error("Not found")]
    NotFound,

    /// Message shown to the client; the cause is only logged
    #[error("{message}")]
    Internal {
        message: &'static str,
        cause: anyhow::Error,
    },
}

impl AppError {
    pub fn internal(message: &'static str, cause: impl Into<anyhow::Error>) -> Self {
        AppError::Internal {
            message,
            cause: cause.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidJson | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidPassword | AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::InvalidPassword => AppError::InvalidPassword,
        }
    }
}

impl From<ImageError> for AppError {
    fn from(err: ImageError) -> Self {
        match err {
            ImageError::UnsupportedType(_) => AppError::BadRequest("Unsupported file type"),
            ImageError::NotFound => AppError::NotFound,
            other => AppError::internal("Internal server error", other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if let AppError::Internal { message, cause } = &self {
            tracing::error!(error = ?cause, "{message}");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
