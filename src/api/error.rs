use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::dtos::{ErrorResponse, ScrapeConflictResponse};
use crate::jobs::{JobError, ScrapeJob};
use crate::store::StoreError;

/// Error type for HTTP handlers; renders `{"detail": ...}` bodies.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    /// Another scrape is running; the body includes it unchanged.
    #[error("Scrape already running")]
    Conflict(Box<ScrapeJob>),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<JobError> for ApiError {
    fn from(err: JobError) -> Self {
        match err {
            JobError::AlreadyRunning(job) => ApiError::Conflict(Box::new(job)),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, detail),
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, detail),
            ApiError::Conflict(job) => {
                return (
                    StatusCode::CONFLICT,
                    Json(ScrapeConflictResponse {
                        detail: "Scrape already running".to_string(),
                        job: *job,
                    }),
                )
                    .into_response();
            }
            ApiError::Store(err) => {
                tracing::error!(error = %err, "store error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { detail })).into_response()
    }
}
