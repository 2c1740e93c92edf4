use crate::config::AppConfig;
use crate::error::AppError;
use actix_web::{web, HttpResponse, Result};
use panel_llm_sdk::LlmClient;
use shared_types::ServerStatus;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

pub struct AppState {
    pub config: Arc<AppConfig>,
    /// `None` when no Gemini API key is configured
    pub llm_client: Option<Arc<dyn LlmClient>>,
    pub start_time: SystemTime,
}

impl AppState {
    pub fn new(config: AppConfig, llm_client: Option<Arc<dyn LlmClient>>) -> Self {
        Self {
            config: Arc::new(config),
            llm_client,
            start_time: SystemTime::now(),
        }
    }

    /// How long a handle waits on a locked database file
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.config.database.busy_timeout_ms)
    }
}

pub async fn health_check(data: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let uptime = data
        .start_time
        .elapsed()
        .map_err(|e| AppError::Internal(format!("Failed to calculate uptime: {e}")))?
        .as_secs();

    let status = ServerStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime,
    };

    Ok(HttpResponse::Ok().json(status))
}
