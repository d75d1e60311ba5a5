//! error

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, Request};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use sea_orm::DbErr;
use serde::de::DeserializeOwned;
use serde_json::json;
use shelter_common::error_messages;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::service::ListingError;

pub const NOT_FOUND_MESSAGE: &str = "the requested resource could not be found";
pub const SERVER_ERROR_MESSAGE: &str =
    "the server encountered a problem and could not process your request";

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    JsonRejection(#[from] JsonRejection),
    #[error(transparent)]
    QueryRejection(#[from] QueryRejection),
    #[error("invalid id parameter")]
    InvalidId,
    #[error("failed validation")]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Listing(#[from] ListingError),
    #[error(transparent)]
    Db(#[from] DbErr),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::JsonRejection(rejection) => {
                error_response(StatusCode::BAD_REQUEST, json!(rejection.body_text()))
            }
            AppError::QueryRejection(rejection) => {
                error_response(StatusCode::BAD_REQUEST, json!(rejection.body_text()))
            }
            AppError::InvalidId => {
                error_response(StatusCode::BAD_REQUEST, json!("invalid id parameter"))
            }
            AppError::Validation(errors) | AppError::Listing(ListingError::Rejected(errors)) => {
                error_response(
                    StatusCode::UNPROCESSABLE_ENTITY,
                    json!(error_messages(&errors)),
                )
            }
            AppError::Db(DbErr::RecordNotFound(what)) => {
                tracing::debug!(%what, "record not found");
                not_found()
            }
            AppError::Listing(ListingError::Failed(e)) => server_error(&e),
            AppError::Db(e) => server_error(&e),
        }
    }
}

fn error_response(status: StatusCode, error: serde_json::Value) -> Response {
    (status, Json(json!({ "error": error }))).into_response()
}

fn server_error(e: &dyn std::error::Error) -> Response {
    tracing::error!(error = %e, "request failed");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, json!(SERVER_ERROR_MESSAGE))
}

pub fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, json!(NOT_FOUND_MESSAGE))
}

pub fn method_not_allowed(method: &Method) -> Response {
    error_response(
        StatusCode::METHOD_NOT_ALLOWED,
        json!(format!("the {method} method is not supported for this resource")),
    )
}

/// Json extractor that also runs the body's `validator` rules.
pub struct AppJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(AppJson(value))
    }
}

/// Ids are positive integers; anything else never reaches the store.
pub fn parse_id(raw: &str) -> Result<i32, AppError> {
    match raw.parse::<i32>() {
        Ok(id) if id >= 1 => Ok(id),
        _ => Err(AppError::InvalidId),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::ExecutionError;
    use axum::body::to_bytes;
    use std::time::Duration;
    use validator::ValidationError;

    async fn body(res: Response) -> serde_json::Value {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("7").unwrap(), 7);
        for raw in ["0", "-3", "abc", "", "99999999999"] {
            assert!(matches!(parse_id(raw), Err(AppError::InvalidId)), "{raw}");
        }
    }

    #[tokio::test]
    async fn test_rejected_listing_is_422() {
        let mut errors = ValidationErrors::new();
        let mut error = ValidationError::new("sort");
        error.message = Some("invalid sort value".into());
        errors.add("sort", error);
        let res = AppError::from(ListingError::Rejected(errors)).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body(res).await, json!({"error": {"sort": "invalid sort value"}}));
    }

    #[tokio::test]
    async fn test_failure_hides_detail() {
        let err = ListingError::Failed(ExecutionError::Timeout(Duration::from_secs(3)));
        let res = AppError::from(err).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body(res).await, json!({"error": SERVER_ERROR_MESSAGE}));

        let res = AppError::from(DbErr::Custom("connection reset".into())).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body(res).await, json!({"error": SERVER_ERROR_MESSAGE}));
    }

    #[tokio::test]
    async fn test_method_not_allowed() {
        let res = method_not_allowed(&Method::PATCH);
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            body(res).await,
            json!({"error": "the PATCH method is not supported for this resource"})
        );
    }

    #[tokio::test]
    async fn test_not_found() {
        let res = AppError::from(DbErr::RecordNotFound("foods 9".into())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(body(res).await, json!({"error": NOT_FOUND_MESSAGE}));
    }
}
