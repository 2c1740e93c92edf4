use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ============ Authentication ============

/// Login form submitted by the panel (`application/x-www-form-urlencoded`)
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Database file the session will be bound to
    pub db_path: Option<String>,
}

/// Login outcome; `token` is only present on success
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub token: Option<String>,
}

impl LoginResponse {
    pub fn success(token: String) -> Self {
        Self {
            success: true,
            message: "Login successful.".to_string(),
            token: Some(token),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            token: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct LogoutResponse {
    pub success: bool,
    pub message: String,
}
