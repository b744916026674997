//! Centralized error handling.
//!
//! Provides a unified error type for the entire application, with
//! automatic conversion into the response envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use crate::config::{MSG_DATABASE_ERROR, MSG_INTERNAL_ERROR, MSG_REQUEST_FAILED};
use crate::domain::DomainError;
use crate::types::ApiResponse;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or malformed input, rejected before reaching a service
    #[error("{0}")]
    Validation(String),

    /// Business rule violation
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Lookup found nothing
    #[error("{0}")]
    NotFound(String),

    #[error("Database error")]
    Database(#[from] DbErr),

    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Domain(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) | AppError::NotFound(msg) => msg.clone(),
            AppError::Domain(e) => e.to_string(),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                MSG_DATABASE_ERROR.to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                MSG_INTERNAL_ERROR.to_string()
            }
        }
    }

    /// Whether the message itself is the envelope `message` (no separate `error` field)
    fn is_direct(&self) -> bool {
        matches!(self, AppError::Validation(_) | AppError::NotFound(_))
    }

    /// Replace a unique-constraint violation reported by the store with `domain`.
    ///
    /// Pre-checks race with concurrent writers, so the constraint is the
    /// authoritative signal.
    pub fn on_unique_violation(self, domain: DomainError) -> Self {
        match &self {
            AppError::Database(e)
                if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) =>
            {
                AppError::Domain(domain)
            }
            _ => self,
        }
    }

    /// Replace a foreign-key violation reported by the store with `domain`.
    pub fn on_foreign_key_violation(self, domain: DomainError) -> Self {
        match &self {
            AppError::Database(e)
                if matches!(e.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_))) =>
            {
                AppError::Domain(domain)
            }
            _ => self,
        }
    }

    fn into_envelope(self, message: &str) -> Response {
        let status = self.status();
        let body = if self.is_direct() {
            ApiResponse::failure(self.user_message(), None)
        } else {
            ApiResponse::failure(message, Some(self.user_message()))
        };

        (status, Json(body)).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.into_envelope(MSG_REQUEST_FAILED)
    }
}

/// An [`AppError`] tagged with the failure message of the operation it aborted.
#[derive(Debug)]
pub struct ApiError {
    pub message: &'static str,
    pub source: AppError,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.source.into_envelope(self.message)
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Handler result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Extension trait attaching an operation failure message to a result
pub trait ResultExt<T> {
    fn or_fail(self, message: &'static str) -> ApiResult<T>;
}

impl<T> ResultExt<T> for AppResult<T> {
    fn or_fail(self, message: &'static str) -> ApiResult<T> {
        self.map_err(|source| ApiError { message, source })
    }
}

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self, message: &str) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, message: &str) -> AppResult<T> {
        self.ok_or_else(|| AppError::NotFound(message.to_string()))
    }
}

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::validation("missing").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(DomainError::AlreadyEnrolled).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound("gone".to_string()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(DbErr::Custom("boom".to_string())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_database_details_are_hidden() {
        let err = AppError::from(DbErr::Custom("relation users does not exist".to_string()));
        assert_eq!(err.user_message(), MSG_DATABASE_ERROR);
    }

    #[test]
    fn test_non_constraint_errors_pass_through() {
        let err = AppError::from(DbErr::Custom("timeout".to_string()))
            .on_unique_violation(DomainError::AlreadyEnrolled);
        assert!(matches!(err, AppError::Database(_)));

        let err = AppError::from(DomainError::StudentNotFound)
            .on_unique_violation(DomainError::AlreadyEnrolled);
        assert!(matches!(err, AppError::Domain(DomainError::StudentNotFound)));
    }

    #[test]
    fn test_or_fail_keeps_source() {
        let result: AppResult<()> = Err(DomainError::CourseInactive.into());
        let err = result.or_fail("failed").unwrap_err();

        assert_eq!(err.message, "failed");
        assert!(matches!(err.source, AppError::Domain(DomainError::CourseInactive)));
    }
}
