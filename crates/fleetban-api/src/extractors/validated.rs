//! Validated JSON extractor
//!
//! Extracts a JSON body and validates it using the `validator` crate.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::response::ApiError;

#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| match rejection {
                JsonRejection::JsonDataError(e) => ApiError::invalid_body(e.body_text()),
                JsonRejection::JsonSyntaxError(e) => ApiError::invalid_body(e.body_text()),
                JsonRejection::MissingJsonContentType(e) => ApiError::invalid_body(e.body_text()),
                JsonRejection::BytesRejection(e) => ApiError::invalid_body(e.body_text()),
                _ => ApiError::invalid_body("Invalid JSON body"),
            })?;

        value.validate()?;

        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, StatusCode};
    use fleetban_service::dto::BulkRemoveBansRequest;

    use super::*;

    async fn extract(body: &'static str) -> Result<ValidatedJson<BulkRemoveBansRequest>, ApiError> {
        let req = Request::post("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();
        ValidatedJson::from_request(req, &()).await
    }

    #[tokio::test]
    async fn test_valid_body() {
        let ValidatedJson(request) = extract(r#"{"ids": ["1", "2"]}"#).await.unwrap();
        assert_eq!(request.ids.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_list_fails_validation() {
        let err = extract(r#"{"ids": []}"#).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_or_non_list_ids() {
        for body in [r"{}", r#"{"ids": "1"}"#, "not json"] {
            let err = extract(body).await.unwrap_err();
            assert_eq!(err.error_code(), "INVALID_BODY", "body: {body}");
        }
    }
}
