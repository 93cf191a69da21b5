use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum BlotterError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),

    #[error("database error: {0}")]
    Storage(#[from] SqlxError),

    #[error("write attempted inside a read-only transaction")]
    ReadOnlyTransaction,

    #[error("JSON error: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("password hashing error: {0}")]
    Hash(String),

    #[error("blocking task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

/// Reasons a caller is refused. Only ever surfaced to clients as a generic 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
pub enum AuthError {
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("missing session cookie")]
    MissingCookie,

    #[error(transparent)]
    Session(#[from] SessionError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
pub enum SessionError {
    #[error("session not found")]
    Missing,

    #[error("session expiry could not be parsed")]
    Malformed,

    #[error("session expired")]
    Expired,
}

impl From<SessionError> for BlotterError {
    fn from(e: SessionError) -> Self {
        BlotterError::Auth(AuthError::Session(e))
    }
}

impl BlotterError {
    pub fn validation(msg: impl Into<String>) -> Self {
        BlotterError::Validation(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        BlotterError::NotFound(what.into())
    }
}

impl IntoResponse for BlotterError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match self {
            BlotterError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    code: "VALIDATION_ERROR".to_string(),
                    message: msg,
                },
            ),
            BlotterError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                ApiErrorBody {
                    code: "NOT_FOUND".to_string(),
                    message: "The requested resource was not found.".to_string(),
                },
            ),
            BlotterError::Auth(_) => (
                StatusCode::UNAUTHORIZED,
                ApiErrorBody {
                    code: "UNAUTHORIZED".to_string(),
                    message: "Authentication error.".to_string(),
                },
            ),
            BlotterError::Storage(_)
            | BlotterError::ReadOnlyTransaction
            | BlotterError::Codec(_)
            | BlotterError::Hash(_)
            | BlotterError::Task(_)
            | BlotterError::Unexpected(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorBody {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred.".to_string(),
                },
            ),
        };
        (status, Json(ApiErrorResponse { error: error_body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
