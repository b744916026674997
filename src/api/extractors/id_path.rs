//! Numeric path id extractor.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::config::MSG_INVALID_ID;
use crate::errors::AppError;

/// Single integer path segment, e.g. `/api/courses/:id`.
///
/// A segment that does not parse is a validation failure rather than
/// axum's plain-text rejection.
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i32>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::validation(MSG_INVALID_ID))?;

        Ok(IdPath(id))
    }
}
