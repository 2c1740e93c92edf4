use actix_web::{HttpResponse, ResponseError};
use shared_types::ErrorResponse;
use thiserror::Error;

/// Body text for every rejected credential, whatever the cause.
pub const UNAUTHORIZED_MESSAGE: &str = "Authentication required";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// The database file is missing, not a regular file, or cannot be opened
    #[error("{0}")]
    DatabaseUnavailable(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("{0}")]
    ServiceUnavailable(String),
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let error_response = ErrorResponse {
            error: self.error_type().to_string(),
            message: self.to_string(),
        };

        match self {
            AppError::NotFound(_) => HttpResponse::NotFound().json(error_response),
            AppError::BadRequest(_)
            | AppError::DatabaseUnavailable(_)
            | AppError::Unsupported(_) => HttpResponse::BadRequest().json(error_response),
            AppError::Unauthorized(_) | AppError::AuthenticationFailed(_) => {
                HttpResponse::Unauthorized().json(error_response)
            }
            AppError::Database(_)
            | AppError::Config(_)
            | AppError::Internal(_)
            | AppError::ServiceUnavailable(_) => {
                tracing::error!("Request failed: {}", self);
                HttpResponse::InternalServerError().json(error_response)
            }
        }
    }
}

impl AppError {
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Database(_) => "database_error",
            AppError::Config(_) => "config_error",
            AppError::DatabaseUnavailable(_) => "database_unavailable",
            AppError::NotFound(_) => "not_found",
            AppError::BadRequest(_) => "invalid_request",
            AppError::Unsupported(_) => "unsupported",
            AppError::Internal(_) => "internal_error",
            AppError::Unauthorized(_) => "unauthorized",
            AppError::AuthenticationFailed(_) => "authentication_failed",
            AppError::ServiceUnavailable(_) => "service_unavailable",
        }
    }

    /// Generic rejection used for missing, malformed, and expired credentials
    pub fn unauthorized() -> Self {
        AppError::Unauthorized(UNAUTHORIZED_MESSAGE.to_string())
    }
}

impl From<actix_web::error::BlockingError> for AppError {
    fn from(err: actix_web::error::BlockingError) -> Self {
        AppError::Internal(format!("Blocking task failed: {err}"))
    }
}

pub type AppResult<T> = Result<T, AppError>;
