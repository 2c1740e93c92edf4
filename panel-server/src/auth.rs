use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT claims carried by the panel's bearer token
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub logged_in: bool,
    /// Database file this session operates on
    pub db_path: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(db_path: String, ttl_seconds: i64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            logged_in: true,
            db_path,
            iat: now,
            exp: now + ttl_seconds,
        }
    }
}

/// Authenticated session attached to a request by the middleware
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub db_path: String,
}

/// Sign a fresh token for `db_path`
pub fn issue(db_path: &str, secret: &str, ttl_seconds: i64) -> AppResult<String> {
    let claims = Claims::new(db_path.to_string(), ttl_seconds);
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to generate JWT token: {}", e)))
}

/// Resolve an `Authorization` header into a session.
///
/// Every failure collapses to `None`; the reason is only logged.
pub fn verify(authorization: Option<&str>, secret: &str) -> Option<Session> {
    let header = match authorization {
        Some(h) => h,
        None => {
            tracing::warn!("Auth failed: missing Authorization header");
            return None;
        }
    };

    let token = match header.strip_prefix("Bearer ") {
        Some(t) if !t.trim().is_empty() => t.trim(),
        _ => {
            tracing::warn!("Auth failed: invalid Authorization header format");
            return None;
        }
    };

    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    let claims = match decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    ) {
        Ok(data) => data.claims,
        Err(e) => {
            tracing::warn!("Auth failed: invalid or expired token ({})", e);
            return None;
        }
    };

    if !claims.logged_in || claims.db_path.is_empty() {
        tracing::warn!("Auth failed: token does not describe a logged-in session");
        return None;
    }

    Some(Session {
        db_path: claims.db_path,
    })
}

/// Compare submitted credentials with the configured admin account
pub fn credentials_match(config: &AppConfig, username: &str, password: &str) -> bool {
    username == config.auth.admin_user && password == config.auth.admin_password
}
