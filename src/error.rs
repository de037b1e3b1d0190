use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

pub const USER_NOT_FOUND: &str = "User not found";
pub const INVALID_USER_DATA: &str = "Invalid user data";
pub const INVALID_PAGINATION: &str = "Invalid pagination parameters";

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

impl Error {
    pub fn user_not_found() -> Self {
        Error::NotFound(USER_NOT_FOUND.to_string())
    }

    pub fn invalid_user_data() -> Self {
        Error::BadRequest(INVALID_USER_DATA.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Error::Validation(err) => {
                tracing::debug!(error = %err, "user payload failed validation");
                (StatusCode::BAD_REQUEST, INVALID_USER_DATA.to_string())
            }
            Error::Config(msg) => {
                tracing::error!("Configuration error surfaced in a request: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({ "message": message }));
        (status, body).into_response()
    }
}

impl From<PathRejection> for Error {
    fn from(err: PathRejection) -> Self {
        tracing::debug!(error = %err, "rejected user id");
        Error::user_not_found()
    }
}

impl From<QueryRejection> for Error {
    fn from(err: QueryRejection) -> Self {
        tracing::debug!(error = %err, "rejected pagination query");
        Error::BadRequest(INVALID_PAGINATION.to_string())
    }
}

impl From<JsonRejection> for Error {
    fn from(err: JsonRejection) -> Self {
        tracing::debug!(error = %err, "rejected user payload");
        Error::invalid_user_data()
    }
}
