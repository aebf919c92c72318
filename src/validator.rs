//! JSON body extraction with validation errors instead of axum's plain-text rejections.

use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use campusdesk_core::AppError;

fn missing_field(message: &str) -> Option<&str> {
    message
        .split("missing field `")
        .nth(1)
        .and_then(|rest| rest.split('`').next())
}

/// Maps a rejected JSON body to a validation error.
pub fn body_rejection(rejection: JsonRejection) -> AppError {
    let message = match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            "Missing 'Content-Type: application/json' header".to_string()
        }
        JsonRejection::JsonDataError(err) => {
            let text = err.body_text();
            match missing_field(&text) {
                Some(field) => format!("{} is required", field),
                None if text.contains("invalid type") => {
                    "Invalid field type in request".to_string()
                }
                None => "Invalid request body".to_string(),
            }
        }
        _ => "Invalid request body".to_string(),
    };
    AppError::validation(anyhow!(message))
}

fn rule_violations(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| match &error.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
}

/// JSON body extractor that runs `validator` rules before the handler.
///
/// Every failure, from a malformed body to a rule violation, is a validation error.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(body_rejection)?;

        value
            .validate()
            .map_err(|errors| AppError::validation(anyhow!(rule_violations(&errors))))?;

        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::header::CONTENT_TYPE};
    use campusdesk_core::ErrorKind;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Payload {
        #[validate(length(min = 3, message = "name is too short"))]
        name: String,
    }

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn extract(req: Request) -> Result<ValidatedJson<Payload>, AppError> {
        ValidatedJson::<Payload>::from_request(req, &()).await
    }

    #[test]
    fn test_missing_field_is_named() {
        assert_eq!(
            missing_field("Failed to deserialize: missing field `email` at line 1"),
            Some("email")
        );
        assert_eq!(missing_field("expected value"), None);
    }

    #[tokio::test]
    async fn test_valid_body_passes() {
        let ValidatedJson(payload) = extract(json_request(r#"{"name":"North"}"#))
            .await
            .unwrap();
        assert_eq!(payload.name, "North");
    }

    #[tokio::test]
    async fn test_every_failure_is_validation() {
        let cases = [
            (r#"{}"#, "name is required"),
            (r#"{"name":5}"#, "Invalid field type in request"),
            (r#"{"name":"#, "Invalid request body"),
            (r#"{"name":"ab"}"#, "name is too short"),
        ];
        for (body, expected) in cases {
            let err = extract(json_request(body)).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation, "{}", body);
            assert_eq!(err.error.to_string(), expected, "{}", body);
        }
    }

    #[tokio::test]
    async fn test_missing_content_type_is_validation() {
        let req = Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(r#"{"name":"North"}"#))
            .unwrap();
        let err = extract(req).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.error.to_string().contains("Content-Type"));
    }
}
