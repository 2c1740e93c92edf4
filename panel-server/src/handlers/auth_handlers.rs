use super::AppState;
use crate::auth;
use crate::database::probe;
use crate::error::AppError;
use actix_web::{web, HttpResponse, Result};
use shared_types::{LoginRequest, LoginResponse, LogoutResponse};

const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password.";
const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred.";

/// Check the admin credentials, then the database file, and hand out a token
/// bound to that file.
pub async fn login(
    data: web::Data<AppState>,
    form: web::Form<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let req = form.into_inner();

    if !auth::credentials_match(&data.config, &req.username, &req.password) {
        tracing::warn!("Login rejected for user {}", req.username);
        return Ok(HttpResponse::Unauthorized().json(LoginResponse::failure(INVALID_CREDENTIALS_MESSAGE)));
    }

    let db_path = match req.db_path.as_deref().map(str::trim) {
        Some(path) if !path.is_empty() => path.to_string(),
        _ => data.config.database.default_path.clone(),
    };

    let busy_timeout = data.busy_timeout();
    let probe_path = db_path.clone();
    let probed = web::block(move || probe(&probe_path, busy_timeout))
        .await
        .map_err(AppError::from)
        .and_then(|result| result);

    match probed {
        Ok(()) => {}
        Err(AppError::DatabaseUnavailable(message)) => {
            tracing::warn!("Login rejected, database {} unavailable", db_path);
            return Ok(HttpResponse::BadRequest().json(LoginResponse::failure(message)));
        }
        Err(e) => {
            tracing::error!("Login failed while opening {}: {}", db_path, e);
            return Ok(HttpResponse::InternalServerError().json(LoginResponse::failure(UNEXPECTED_ERROR_MESSAGE)));
        }
    }

    let token = auth::issue(
        &db_path,
        data.config.jwt_secret(),
        data.config.auth.token_ttl_seconds,
    )?;

    tracing::info!("User {} logged in to {}", req.username, db_path);
    Ok(HttpResponse::Ok().json(LoginResponse::success(token)))
}

/// Tokens are stateless; the client simply discards its copy.
pub async fn logout() -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(LogoutResponse {
        success: true,
        message: "Logout successful.".to_string(),
    }))
}
