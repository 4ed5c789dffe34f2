use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use serde_json::json;
use thiserror::Error;

use wedding_shared::auth::SessionError;
use wedding_shared::reconcile::NotInvited;
use wedding_shared::store::StoreError;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    InternalServerError(String),
}

impl AppError {
    pub fn bad_request(message: String) -> Self {
        AppError::BadRequest(message)
    }

    pub fn unauthorized(message: String) -> Self {
        AppError::Unauthorized(message)
    }

    pub fn forbidden(message: String) -> Self {
        AppError::Forbidden(message)
    }

    pub fn internal_server_error(message: String) -> Self {
        AppError::InternalServerError(message)
    }

    /// A name-fallback lookup hit more than one row; the client must
    /// resend with explicit row indexes.
    pub fn ambiguous_match(full_name: &str) -> Self {
        AppError::BadRequest(format!(
            "Ambiguous match for \"{}\". Send rowIndex for each person.",
            full_name
        ))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            AppError::Unauthorized(message) => (StatusCode::UNAUTHORIZED, message),
            AppError::Forbidden(message) => (StatusCode::FORBIDDEN, message),
            AppError::InternalServerError(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        error!("Store operation failed: {}", err);
        AppError::InternalServerError("Failed to reach the guest sheet".to_string())
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Signing => {
                AppError::InternalServerError("Failed to issue session token".to_string())
            }
            SessionError::ExpiredOrInvalid => AppError::Unauthorized("Unauthorized".to_string()),
        }
    }
}

impl From<NotInvited> for AppError {
    fn from(_: NotInvited) -> Self {
        AppError::Forbidden("Not invited to rehearsal dinner".to_string())
    }
}
