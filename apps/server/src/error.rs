use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fintrack_core::errors::{DatabaseError, Error as CoreError, FieldViolation, ValidationError};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("Access token required")]
    MissingToken,
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("{0}")]
    BadRequest(String),
    #[error("Too many requests, please try again later.")]
    TooManyRequests,
    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<FieldViolation>>,
}

const INTERNAL_MESSAGE: &str = "Internal server error";

impl ApiError {
    fn status_and_message(self) -> (StatusCode, String, Option<Vec<FieldViolation>>) {
        match self {
            ApiError::Core(e) => match e {
                CoreError::Validation(ValidationError::Fields(fields)) => (
                    StatusCode::BAD_REQUEST,
                    "Validation failed".to_string(),
                    Some(fields),
                ),
                CoreError::Validation(ValidationError::InvalidInput(reason)) => {
                    (StatusCode::BAD_REQUEST, reason, None)
                }
                CoreError::NotFound(entity) => {
                    (StatusCode::NOT_FOUND, format!("{entity} not found"), None)
                }
                CoreError::Database(DatabaseError::NotFound(_)) => {
                    (StatusCode::NOT_FOUND, "Not found".to_string(), None)
                }
                CoreError::Conflict(reason) => (StatusCode::BAD_REQUEST, reason, None),
                CoreError::OutOfRange(what) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    format!("{what} are out of range"),
                    None,
                ),
                CoreError::InvalidCredentials => (
                    StatusCode::BAD_REQUEST,
                    "Invalid credentials".to_string(),
                    None,
                ),
                other => {
                    tracing::error!("Request failed: {}", other);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        INTERNAL_MESSAGE.to_string(),
                        None,
                    )
                }
            },
            ApiError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "Access token required".to_string(),
                None,
            ),
            ApiError::InvalidToken => (
                StatusCode::FORBIDDEN,
                "Invalid or expired token".to_string(),
                None,
            ),
            ApiError::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason, None),
            ApiError::TooManyRequests => (
                StatusCode::TOO_MANY_REQUESTS,
                "Too many requests, please try again later.".to_string(),
                None,
            ),
            ApiError::Internal(reason) => {
                tracing::error!("Request failed: {}", reason);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_MESSAGE.to_string(),
                    None,
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, errors) = self.status_and_message();
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message,
            errors,
        });
        (status, body).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Core(CoreError::Validation(err))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
