use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{models::Message, validation::ValidationErrors};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Movie not found")]
    NotFound,

    #[error("Invalid movie ID format")]
    InvalidId,

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),

    #[error("stored timestamp out of range: {0}")]
    Timestamp(#[from] jiff::Error),
}

impl StoreError {
    /// True for failures of the backend rather than of the request.
    pub fn is_backend(&self) -> bool {
        matches!(self, StoreError::Database(_) | StoreError::Timestamp(_))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A request-level failure rendered as `{"message": ...}`.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }

    /// Maps a store failure onto its status. Backend failures take
    /// `fallback`, which differs per route.
    pub fn from_store(err: StoreError, fallback: StatusCode) -> Self {
        let status = match &err {
            StoreError::NotFound => StatusCode::NOT_FOUND,
            StoreError::InvalidId | StoreError::Validation(_) => StatusCode::BAD_REQUEST,
            StoreError::Database(_) | StoreError::Timestamp(_) => fallback,
        };
        Self::new(status, err.to_string())
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, message = %self.message, "request failed");
        } else {
            tracing::warn!(status = %self.status, message = %self.message, "request rejected");
        }
        (self.status, Json(Message::new(self.message))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_status() {
        let cases = [
            (StoreError::NotFound, StatusCode::NOT_FOUND, "Movie not found"),
            (StoreError::InvalidId, StatusCode::BAD_REQUEST, "Invalid movie ID format"),
            (
                StoreError::Database(sea_orm::DbErr::Custom("disk full".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
                "disk full",
            ),
        ];
        for (err, status, message) in cases {
            let app = AppError::from_store(err, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(app.status(), status);
            assert!(app.message().contains(message), "{}", app.message());
        }
    }

    #[test]
    fn backend_failure_uses_route_fallback() {
        let err = StoreError::Database(sea_orm::DbErr::Custom("locked".to_string()));
        assert!(err.is_backend());
        let app = AppError::from_store(err, StatusCode::BAD_REQUEST);
        assert_eq!(app.status(), StatusCode::BAD_REQUEST);
    }
}
