use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tablebook_core::CoreError;

use crate::token::TokenError;

#[derive(Debug)]
pub enum AppError {
    Unauthorized(String),
    InvalidToken(String),
    InvalidCredentials(String),
    ValidationError(String),
    NotFound(String),
    Conflict(String),
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::InvalidToken(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::InvalidCredentials(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound(msg) => AppError::NotFound(msg),
            CoreError::Conflict(msg) => AppError::Conflict(msg),
            CoreError::InvalidCredentials => AppError::InvalidCredentials(err.to_string()),
            CoreError::ValidationError(msg) => AppError::ValidationError(msg),
            CoreError::Storage(_) | CoreError::Internal(_) => {
                AppError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Invalid(_) | TokenError::Expired => AppError::InvalidToken(err.to_string()),
            TokenError::MissingSecret
            | TokenError::Encoding(_)
            | TokenError::InvalidLifetime(_) => {
                AppError::InternalServerError(err.to_string())
            }
        }
    }
}
