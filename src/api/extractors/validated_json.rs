//! Validated JSON extractor - Combines deserialization with validation.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::config::MSG_INVALID_FIELD;
use crate::errors::AppError;

/// Validated JSON extractor that automatically validates requests.
///
/// # Example
///
/// ```rust,ignore
/// use serde::Deserialize;
/// use validator::Validate;
/// use smart_edu_api::api::extractors::ValidatedJson;
///
/// #[derive(Deserialize, Validate)]
/// struct CreateCourseRequest {
///     #[validate(required(message = "الاسم والكود مطلوبان"))]
///     name: Option<String>,
/// }
///
/// async fn create_course(ValidatedJson(payload): ValidatedJson<CreateCourseRequest>) {
///     // payload is already validated
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            tracing::debug!("Rejected request body: {}", e.body_text());
            AppError::validation(MSG_INVALID_FIELD)
        })?;

        value
            .validate()
            .map_err(|e| AppError::validation(format_validation_errors(&e)))?;

        Ok(ValidatedJson(value))
    }
}

/// Format validation errors into one message.
///
/// Fields are visited by name and repeated messages collapse, so a request
/// missing both of two jointly required fields reads the same as one
/// missing either.
fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    let mut messages: Vec<String> = Vec::new();
    for (field, errs) in fields {
        for err in errs.iter() {
            let message = err
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{} is invalid", field));
            if !messages.contains(&message) {
                messages.push(message);
            }
        }
    }

    messages.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, Validate)]
    struct Pair {
        #[validate(required(message = "both required"))]
        left: Option<String>,
        #[validate(required(message = "both required"))]
        right: Option<String>,
        #[validate(range(min = 1, message = "positive"))]
        count: Option<i32>,
    }

    #[test]
    fn test_repeated_messages_collapse() {
        let pair = Pair {
            left: None,
            right: None,
            count: None,
        };
        let errors = pair.validate().unwrap_err();

        assert_eq!(format_validation_errors(&errors), "both required");
    }

    #[test]
    fn test_distinct_messages_are_joined_in_field_order() {
        let pair = Pair {
            left: None,
            right: Some("r".to_string()),
            count: Some(0),
        };
        let errors = pair.validate().unwrap_err();

        assert_eq!(format_validation_errors(&errors), "positive, both required");
    }
}
