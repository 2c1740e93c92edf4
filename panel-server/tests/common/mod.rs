//! Shared infrastructure for the HTTP integration tests.
//!
//! Every [`TestApp`] owns its own temporary SQLite file and application
//! state, so tests can run in parallel without seeing each other's data.

#![allow(dead_code, unused_imports, unused_macros)]

pub mod app;
pub mod database;
pub mod llm;

pub use app::{send, send_raw, TestApp};
pub use database::TestDatabase;
pub use llm::MockLlmClient;

/// Build the actix test service for a [`TestApp`]
macro_rules! test_service {
    ($app:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($app.app_state.clone())
                .configure(panel_server::routes::configure_routes),
        )
        .await
    };
}
