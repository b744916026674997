use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

/// Standard API response envelope shared by every endpoint
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    /// Failure envelope; `error` carries the specific cause when there is one
    pub fn failure(message: impl Into<String>, error: Option<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            error,
        }
    }
}

/// 200 response helper
pub fn ok<T: Serialize>(message: &str, data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success(message, data))
}

/// Created response helper (common pattern for POST endpoints)
pub struct Created<T: Serialize> {
    pub message: &'static str,
    pub data: T,
}

impl<T: Serialize> Created<T> {
    pub fn new(message: &'static str, data: T) -> Self {
        Self { message, data }
    }
}

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> axum::response::Response {
        (
            StatusCode::CREATED,
            Json(ApiResponse::success(self.message, self.data)),
        )
            .into_response()
    }
}
