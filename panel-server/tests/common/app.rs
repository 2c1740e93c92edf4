use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header::HeaderMap;
use actix_web::http::StatusCode;
use actix_web::web::{self, Bytes};
use actix_web::test;
use panel_llm_sdk::LlmClient;
use panel_server::auth;
use panel_server::config::AppConfig;
use panel_server::handlers::AppState;
use serde_json::Value;
use std::sync::Arc;

use super::database::TestDatabase;

pub const JWT_SECRET: &str = "integration-test-secret";
pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASSWORD: &str = "s3cret";

/// A test application bound to its own database file
pub struct TestApp {
    pub database: TestDatabase,
    pub app_state: web::Data<AppState>,
}

#[allow(dead_code)]
impl TestApp {
    /// Create a new isolated test application without an LLM client
    pub fn new() -> Self {
        Self::build(TestDatabase::new(25), None, |_| {})
    }

    pub fn with_llm(client: Arc<dyn LlmClient>) -> Self {
        Self::build(TestDatabase::new(3), Some(client), |_| {})
    }

    /// Create a test application after adjusting its configuration
    pub fn with_config<F>(configure: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        Self::build(TestDatabase::new(3), None, configure)
    }

    fn build<F>(database: TestDatabase, llm_client: Option<Arc<dyn LlmClient>>, configure: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = AppConfig::default();
        config.auth.admin_user = ADMIN_USER.to_string();
        config.auth.admin_password = ADMIN_PASSWORD.to_string();
        config.auth.jwt_secret = Some(JWT_SECRET.to_string());
        config.database.default_path = database.path().to_string();
        config.database.busy_timeout_ms = 1000;
        configure(&mut config);

        Self {
            database,
            app_state: web::Data::new(AppState::new(config, llm_client)),
        }
    }

    /// Token for this app's database, signed as the login endpoint would
    pub fn token(&self) -> String {
        self.token_for(self.database.path(), 3600)
    }

    pub fn token_for(&self, db_path: &str, ttl_seconds: i64) -> String {
        auth::issue(db_path, JWT_SECRET, ttl_seconds).expect("issue token")
    }

    pub fn bearer(&self) -> (&'static str, String) {
        ("Authorization", format!("Bearer {}", self.token()))
    }
}

/// Call the service and return status, headers and raw body.
///
/// Errors raised by middleware are rendered the way the server would render
/// them.
pub async fn send_raw<S, R, B>(service: &S, req: R) -> (StatusCode, HeaderMap, Bytes)
where
    S: Service<R, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    match test::try_call_service(service, req).await {
        Ok(resp) => {
            let status = resp.status();
            let headers = resp.headers().clone();
            let body = test::read_body(resp).await;
            (status, headers, body)
        }
        Err(err) => {
            let resp = err.error_response();
            let status = resp.status();
            let headers = resp.headers().clone();
            let body = actix_web::body::to_bytes(resp.into_body())
                .await
                .unwrap_or_default();
            (status, headers, body)
        }
    }
}

/// [`send_raw`] for JSON endpoints
pub async fn send<S, R, B>(service: &S, req: R) -> (StatusCode, Value)
where
    S: Service<R, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, _, body) = send_raw(service, req).await;
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}
