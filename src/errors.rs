// src/errors.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("MongoDB error: {0}")]
    MongoDB(#[from] mongodb::error::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid callback payload")]
    InvalidCallback,

    #[error("Archive error: {0}")]
    ArchiveError(String),

    #[error("Service error: {0}")]
    ServiceError(String),
}

// The gateway contract fixes these response bodies verbatim, so they are
// plain text rather than JSON.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::InvalidCallback => (StatusCode::BAD_REQUEST, "Invalid request"),
            AppError::MongoDB(_)
            | AppError::Io(_)
            | AppError::Json(_)
            | AppError::ArchiveError(_)
            | AppError::ServiceError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        };

        (status, message).into_response()
    }
}

// Helper conversion functions
impl AppError {
    pub fn archive(msg: impl Into<String>) -> Self {
        AppError::ArchiveError(msg.into())
    }

    pub fn service(msg: impl Into<String>) -> Self {
        AppError::ServiceError(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
